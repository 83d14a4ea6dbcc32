use crate::{Channel, Sample};

/// How many samples the moving average looks back over.
pub const DEPTH: usize = 4;

const CHANNELS: usize = 3;

/// Depth-4 moving average over the three sensor channels.
///
/// One write index is shared by all channels: record each channel once
/// per cycle, then call [`advance`](SlidingAverage::advance). Slots start
/// at zero, so the first few averages are biased low while the window
/// fills. That warm-up bias is part of the protocol.
pub struct SlidingAverage {
    slots: [[Sample; DEPTH]; CHANNELS],
    index: usize,
}

impl SlidingAverage {
    pub fn new() -> Self {
        Self {
            slots: [[0; DEPTH]; CHANNELS],
            index: 0,
        }
    }

    /// Stores `value` in the current slot for `channel`.
    pub fn record(&mut self, channel: Channel, value: Sample) {
        self.slots[channel as usize][self.index] = value;
    }

    /// Moves the shared write index on to the oldest slot.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % DEPTH;
    }

    /// Mean of the current four slots, truncated toward zero.
    /// Truncation (not flooring) matters: the accelerometer axes go
    /// negative.
    pub fn average(&self, channel: Channel) -> Sample {
        let sum: Sample = self.slots[channel as usize].iter().sum();
        sum / DEPTH as Sample
    }
}
