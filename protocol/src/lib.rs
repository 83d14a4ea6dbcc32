//! Wire protocol and shared loop machinery for the motion capture link.
//!
//! Three devices share this crate: a transmitter that radios smoothed
//! sensor readings, a receiver that relays them over serial, and a
//! standalone capture unit that writes straight to serial. Everything
//! here is `no_std`; device specifics stay behind the traits in
//! [`device`].
#![cfg_attr(not(test), no_std)]

pub mod average;
pub mod device;
pub mod frame;
pub mod mock;
pub mod sequence;

/// A raw sensor reading. Heading is 0-359 degrees, the accelerometer
/// axes are signed device units.
pub type Sample = i32;

/// A transmitter sequence number. Wraps modulo 2^16; the receiver
/// treats the wrap to 0 as a transmitter restart.
pub type Sequence = u16;

/// The three sensed quantities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Heading,
    AccelX,
    AccelY,
}
