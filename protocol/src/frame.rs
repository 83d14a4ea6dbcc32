// A frame is a run of comma-separated fields ended by a colon:
//
//     frame = field *("," field) ":"
//     field = integer / flag
//     flag  = "0" / "1"
//
// Integers are base-10 with a leading "-" when negative. Neither "," nor
// ":" can occur inside a field, so there is no escaping.

use core::fmt::{self, Write as _};
use core::str;

use embedded_hal::serial::Write;
use heapless::{consts::*, String, Vec};

use crate::Sequence;

pub const SEPARATOR: char = ',';
pub const TERMINATOR: char = ':';

/// One complete frame. 64 bytes is comfortably above the worst case
/// (six i32 fields plus flags).
pub type FrameBuf = String<U64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The frame no longer fits in a [`FrameBuf`].
    Overflow,
    /// No separator found where a sequence number was expected.
    Truncated,
    /// The leading field did not parse as a sequence number.
    BadSequence,
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::Overflow
    }
}

/// Builds a frame field by field, inserting separators as it goes.
pub struct FrameBuilder {
    buf: FrameBuf,
    empty: bool,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            empty: true,
        }
    }

    fn separate(&mut self) -> Result<(), Error> {
        if self.empty {
            self.empty = false;
            Ok(())
        } else {
            self.buf.push(SEPARATOR).map_err(|_| Error::Overflow)
        }
    }

    pub fn int(&mut self, value: i32) -> Result<(), Error> {
        self.separate()?;
        write!(self.buf, "{}", value)?;
        Ok(())
    }

    pub fn flag(&mut self, value: bool) -> Result<(), Error> {
        self.separate()?;
        self.buf
            .push(if value { '1' } else { '0' })
            .map_err(|_| Error::Overflow)
    }

    pub fn finish(mut self) -> Result<FrameBuf, Error> {
        self.buf.push(TERMINATOR).map_err(|_| Error::Overflow)?;
        Ok(self.buf)
    }
}

/// Partial decode for the receiver: the leading field as a sequence
/// number, the rest untouched.
///
/// The remainder keeps its trailing terminator. The relay strips it byte
/// by byte, which keeps the receiver generic over the payload's field
/// count.
pub fn split_sequence(frame: &str) -> Result<(Sequence, &str), Error> {
    let comma = frame.find(SEPARATOR).ok_or(Error::Truncated)?;
    let seq = frame[..comma].parse().map_err(|_| Error::BadSequence)?;
    Ok((seq, &frame[comma + 1..]))
}

/// Writes a complete frame out over a serial link.
pub fn send<Out: Write<u8>>(out: &mut Out, frame: &str) -> nb::Result<(), Out::Error> {
    for byte in frame.bytes() {
        out.write(byte)?;
    }
    out.flush()?;
    Ok(())
}

/// An in-memory serial sink, mostly for tests.
pub struct SerialBuffer(pub Vec<u8, U256>);

impl Write<u8> for SerialBuffer {
    type Error = u8;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.0.push(word)?;
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

impl SerialBuffer {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.0).unwrap_or("")
    }
}
