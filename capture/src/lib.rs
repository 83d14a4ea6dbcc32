//! The standalone capture unit: the transmitter's sampling pipeline
//! wired straight to serial, no radio leg.
//!
//! Capture frames carry no sequence number. Instead they end with two
//! reserved zero flags, which keeps their field count in step with what
//! a receiver relay emits, so downstream consumers read both streams the
//! same way.
#![cfg_attr(not(test), no_std)]

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::serial::Write;

use protocol::average::SlidingAverage;
use protocol::device::{Buttons, MotionSensor, Status, StatusDisplay};
use protocol::frame::{self, FrameBuilder};
use protocol::Channel;

/// Loop pacing, milliseconds per cycle.
pub const TICK_MS: u16 = 10;

// The heartbeat dot alternates brightness over this many cycles.
const BLINK_PERIOD: u8 = 20;
const BLINK_PHASE: u8 = 10;

#[derive(Debug)]
pub enum Error<E> {
    Frame(frame::Error),
    Serial(nb::Error<E>),
}

impl<E> From<frame::Error> for Error<E> {
    fn from(e: frame::Error) -> Self {
        Error::Frame(e)
    }
}

pub struct Capture {
    samples: SlidingAverage,
    blink: u8,
}

impl Capture {
    pub fn new() -> Self {
        Self {
            samples: SlidingAverage::new(),
            blink: 0,
        }
    }

    /// One cycle: sample, smooth, frame, write to serial.
    pub fn step<S, B, D, Out>(
        &mut self,
        sensors: &mut S,
        buttons: &mut B,
        display: &mut D,
        out: &mut Out,
    ) -> Result<(), Error<Out::Error>>
    where
        S: MotionSensor,
        B: Buttons,
        D: StatusDisplay,
        Out: Write<u8>,
    {
        self.blink += 1;
        if self.blink >= BLINK_PERIOD {
            self.blink = 0;
        }
        if self.blink > BLINK_PHASE {
            display.show(Status::BlinkSlow);
        } else {
            display.show(Status::BlinkFast);
        }

        self.samples.record(Channel::Heading, sensors.heading());
        self.samples.record(Channel::AccelX, sensors.accel_x());
        self.samples.record(Channel::AccelY, sensors.accel_y());
        self.samples.advance();

        let mut builder = FrameBuilder::new();
        builder.int(self.samples.average(Channel::AccelX))?;
        builder.int(self.samples.average(Channel::AccelY))?;
        builder.int(self.samples.average(Channel::Heading))?;
        builder.flag(buttons.a_is_pressed())?;
        builder.flag(buttons.b_is_pressed())?;
        // reserved fields, always zero
        builder.flag(false)?;
        builder.flag(false)?;
        frame::send(out, &builder.finish()?).map_err(Error::Serial)?;
        Ok(())
    }

    /// Runs until power-off.
    pub fn run<S, B, D, Out, T>(
        &mut self,
        sensors: &mut S,
        buttons: &mut B,
        display: &mut D,
        out: &mut Out,
        delay: &mut T,
    ) -> Result<Infallible, Error<Out::Error>>
    where
        S: MotionSensor,
        B: Buttons,
        D: StatusDisplay,
        Out: Write<u8>,
        T: DelayMs<u16>,
    {
        loop {
            self.step(sensors, buttons, display, out)?;
            delay.delay_ms(TICK_MS);
        }
    }
}
