//! The transmitting end of the link: smooth the sensors, tag the frame
//! with a sequence number, put it on the air.
#![cfg_attr(not(test), no_std)]

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;

use protocol::average::SlidingAverage;
use protocol::device::{Buttons, MotionSensor, RadioTx, Status, StatusDisplay};
use protocol::frame::{self, FrameBuilder};
use protocol::{Channel, Sequence};

/// Loop pacing, milliseconds per cycle. Fixed by the physical sample
/// rate, not negotiable in software.
pub const TICK_MS: u16 = 10;

// The activity dot lights one cycle in this many.
const BLINK_PERIOD: u8 = 6;

pub struct Transmitter {
    samples: SlidingAverage,
    seq: Sequence,
    blink: u8,
}

impl Transmitter {
    pub fn new() -> Self {
        Self {
            samples: SlidingAverage::new(),
            seq: 0,
            blink: 0,
        }
    }

    pub fn sequence(&self) -> Sequence {
        self.seq
    }

    /// One cycle: sample, smooth, frame, send.
    pub fn step<S, B, R, D>(
        &mut self,
        sensors: &mut S,
        buttons: &mut B,
        radio: &mut R,
        display: &mut D,
    ) -> Result<(), frame::Error>
    where
        S: MotionSensor,
        B: Buttons,
        R: RadioTx,
        D: StatusDisplay,
    {
        self.blink += 1;
        if self.blink >= BLINK_PERIOD {
            display.show(Status::BlinkFast);
            self.blink = 0;
        } else {
            display.clear();
        }

        self.samples.record(Channel::Heading, sensors.heading());
        self.samples.record(Channel::AccelX, sensors.accel_x());
        self.samples.record(Channel::AccelY, sensors.accel_y());
        self.samples.advance();

        let mut builder = FrameBuilder::new();
        builder.int(i32::from(self.seq))?;
        builder.int(self.samples.average(Channel::AccelX))?;
        builder.int(self.samples.average(Channel::AccelY))?;
        builder.int(self.samples.average(Channel::Heading))?;
        builder.flag(buttons.a_is_pressed())?;
        builder.flag(buttons.b_is_pressed())?;
        radio.send(&builder.finish()?);

        self.seq = self.seq.wrapping_add(1);
        Ok(())
    }

    /// Runs until power-off. Only an encoding failure gets out.
    pub fn run<S, B, R, D, T>(
        &mut self,
        sensors: &mut S,
        buttons: &mut B,
        radio: &mut R,
        display: &mut D,
        delay: &mut T,
    ) -> Result<Infallible, frame::Error>
    where
        S: MotionSensor,
        B: Buttons,
        R: RadioTx,
        D: StatusDisplay,
        T: DelayMs<u16>,
    {
        loop {
            self.step(sensors, buttons, radio, display)?;
            delay.delay_ms(TICK_MS);
        }
    }
}
