//! Trait seams for the hardware each loop talks to.
//!
//! Sensor and button reads are synchronous and infallible on this class
//! of board, so the traits stay `Result`-free. Serial output is not
//! abstracted here: the loops take `embedded_hal::serial::Write<u8>`
//! directly.

use crate::frame::FrameBuf;
use crate::Sample;

/// The serial side of the link runs at 115200, 8-N-1. Configuring the
/// UART is the board crate's job; the value is recorded here because
/// every consumer of the stream needs it.
pub const BAUD_RATE: u32 = 115_200;

/// Compass heading and two accelerometer axes, read on demand.
pub trait MotionSensor {
    fn heading(&mut self) -> Sample;
    fn accel_x(&mut self) -> Sample;
    fn accel_y(&mut self) -> Sample;
}

/// The board's two push buttons.
pub trait Buttons {
    fn a_is_pressed(&mut self) -> bool;
    fn b_is_pressed(&mut self) -> bool;
}

/// Broadcast radio, transmit side. Fire-and-forget: the medium is lossy
/// and gives no delivery feedback.
pub trait RadioTx {
    fn send(&mut self, frame: &str);
}

/// Broadcast radio, receive side. `receive` is a non-blocking poll;
/// `None` just means nothing has arrived yet.
pub trait RadioRx {
    fn receive(&mut self) -> Option<FrameBuf>;
}

/// Discrete states the loops push at the board's display or LED. Purely
/// observational; nothing feeds back into the protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    BlinkFast,
    BlinkSlow,
    Asleep,
    Happy,
    Confused,
    Sad,
}

pub trait StatusDisplay {
    fn show(&mut self, status: Status);
    fn clear(&mut self);
}
