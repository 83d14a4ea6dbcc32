//! The receiving end of the link: gate frames through the sequence
//! tracker and relay their payload over serial with the local button
//! state appended.
//!
//! The relay is transparent on purpose. It never re-parses the payload
//! fields, it just streams the bytes through minus the terminator, so it
//! stays decoupled from whatever field list the transmitter uses.
#![cfg_attr(not(test), no_std)]

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::serial::Write;

use protocol::device::{Buttons, RadioRx, Status, StatusDisplay};
use protocol::frame::{split_sequence, SEPARATOR, TERMINATOR};
use protocol::sequence::{SequenceTracker, Verdict};

/// Loop pacing, milliseconds per cycle.
pub const TICK_MS: u16 = 10;

/// What one receiver cycle did. Gaps and silence never suppress the
/// relay; they only classify, and the display shows them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    /// Nothing on the air this cycle.
    Idle,
    /// A frame was decoded and its payload relayed.
    Relayed(Verdict),
    /// A frame arrived but would not decode; it was dropped.
    Malformed,
}

pub struct Receiver {
    tracker: SequenceTracker,
}

impl Receiver {
    pub fn new() -> Self {
        Self {
            tracker: SequenceTracker::new(),
        }
    }

    /// Startup: show the idle face and, if a frame is already waiting,
    /// adopt its sequence number without classifying it.
    pub fn prime<R, D>(&mut self, radio: &mut R, display: &mut D)
    where
        R: RadioRx,
        D: StatusDisplay,
    {
        display.show(Status::Asleep);
        if let Some(frame) = radio.receive() {
            if let Ok((seq, _)) = split_sequence(&frame) {
                self.tracker.prime(seq);
            }
        }
    }

    /// One cycle: poll the radio, classify, relay.
    pub fn step<R, B, D, Out>(
        &mut self,
        radio: &mut R,
        buttons: &mut B,
        display: &mut D,
        out: &mut Out,
    ) -> Result<Activity, nb::Error<Out::Error>>
    where
        R: RadioRx,
        B: Buttons,
        D: StatusDisplay,
        Out: Write<u8>,
    {
        let frame = match radio.receive() {
            Some(frame) => frame,
            None => {
                if self.tracker.note_missed() {
                    display.show(Status::Sad);
                }
                return Ok(Activity::Idle);
            }
        };
        self.tracker.note_received();

        let (seq, payload) = match split_sequence(&frame) {
            Ok(parts) => parts,
            Err(_) => return Ok(Activity::Malformed),
        };

        let verdict = self.tracker.observe(seq);
        match verdict {
            Verdict::Gap => display.show(Status::Confused),
            Verdict::InSync { recovered: true } => display.show(Status::Happy),
            Verdict::InSync { recovered: false } => {}
        }

        relay(out, payload, buttons.a_is_pressed(), buttons.b_is_pressed())?;
        Ok(Activity::Relayed(verdict))
    }

    /// Runs until power-off. Only a serial write failure gets out.
    pub fn run<R, B, D, Out, T>(
        &mut self,
        radio: &mut R,
        buttons: &mut B,
        display: &mut D,
        out: &mut Out,
        delay: &mut T,
    ) -> Result<Infallible, nb::Error<Out::Error>>
    where
        R: RadioRx,
        B: Buttons,
        D: StatusDisplay,
        Out: Write<u8>,
        T: DelayMs<u16>,
    {
        self.prime(radio, display);
        loop {
            self.step(radio, buttons, display, out)?;
            delay.delay_ms(TICK_MS);
        }
    }
}

/// Streams the opaque payload through minus its terminator, then appends
/// the two local button flags and a fresh terminator.
pub fn relay<Out: Write<u8>>(
    out: &mut Out,
    payload: &str,
    button_a: bool,
    button_b: bool,
) -> nb::Result<(), Out::Error> {
    for byte in payload.bytes() {
        if byte != TERMINATOR as u8 {
            out.write(byte)?;
        }
    }
    for &flag in &[button_a, button_b] {
        out.write(SEPARATOR as u8)?;
        out.write(if flag { b'1' } else { b'0' })?;
    }
    out.write(TERMINATOR as u8)?;
    out.flush()?;
    Ok(())
}
