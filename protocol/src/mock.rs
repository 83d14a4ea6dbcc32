//! Test doubles for the [`device`](crate::device) traits.
//!
//! These are plain heapless state machines, so they work from `no_std`
//! dependents' tests as well as from this crate's own.

use heapless::{consts::*, Vec};

use crate::device::{Buttons, MotionSensor, RadioRx, RadioTx, Status, StatusDisplay};
use crate::frame::FrameBuf;
use crate::Sample;

/// Returns the same readings every cycle.
pub struct MockSensor {
    pub heading: Sample,
    pub x: Sample,
    pub y: Sample,
}

impl MotionSensor for MockSensor {
    fn heading(&mut self) -> Sample {
        self.heading
    }

    fn accel_x(&mut self) -> Sample {
        self.x
    }

    fn accel_y(&mut self) -> Sample {
        self.y
    }
}

pub struct MockButtons {
    pub a: bool,
    pub b: bool,
}

impl Buttons for MockButtons {
    fn a_is_pressed(&mut self) -> bool {
        self.a
    }

    fn b_is_pressed(&mut self) -> bool {
        self.b
    }
}

/// A queue standing in for the shared radio channel: sends append,
/// receives pop in order. Frames that do not fit are dropped, which is
/// what a lossy medium would do anyway.
pub struct MockRadio {
    queue: Vec<FrameBuf, U16>,
    next: usize,
}

impl MockRadio {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            next: 0,
        }
    }

    /// Number of frames sent and not yet received.
    pub fn pending(&self) -> usize {
        self.queue.len() - self.next
    }
}

impl RadioTx for MockRadio {
    fn send(&mut self, frame: &str) {
        let mut buf = FrameBuf::new();
        if buf.push_str(frame).is_ok() {
            let _ = self.queue.push(buf);
        }
    }
}

impl RadioRx for MockRadio {
    fn receive(&mut self) -> Option<FrameBuf> {
        let frame = self.queue.get(self.next)?.clone();
        self.next += 1;
        Some(frame)
    }
}

/// Records everything shown at it.
pub struct MockDisplay {
    pub last: Option<Status>,
    pub shown: Vec<Status, U32>,
    pub cleared: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            last: None,
            shown: Vec::new(),
            cleared: 0,
        }
    }
}

impl StatusDisplay for MockDisplay {
    fn show(&mut self, status: Status) {
        self.last = Some(status);
        let _ = self.shown.push(status);
    }

    fn clear(&mut self) {
        self.last = None;
        self.cleared += 1;
    }
}
