use crate::Sequence;

/// In-sync frames needed after a gap before the link is reported
/// recovered. Measured in loop cycles (~10ms each).
pub const RECOVERY_TICKS: i32 = 10;

/// Frameless cycles tolerated before the link counts as silent.
pub const SILENCE_TICKS: u32 = 10;

/// How the tracker classified one decoded frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The sequence number immediately follows the last one.
    /// `recovered` is set on exactly the frame that ends a drop streak.
    InSync { recovered: bool },
    /// Dropped or out-of-order delivery.
    Gap,
}

/// Drop detection over the transmitter's sequence numbers.
///
/// The tracker only classifies; it never tells the caller to withhold a
/// payload. Sequence numbers wrap modulo 2^16, and a frame numbered 0 is
/// taken as a transmitter restart: `last` is reset before the continuity
/// check, so the 0 frame itself always classifies as a gap and the
/// following 1 frame as in-sync. The same happens at the natural wrap
/// from 65535, which is accepted: one spurious gap every 65536 frames.
pub struct SequenceTracker {
    last: Sequence,
    drop_streak: i32,
    missed_streak: u32,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self {
            last: 0,
            drop_streak: 0,
            missed_streak: 0,
        }
    }

    /// Adopts `seq` without classification. For the very first frame a
    /// receiver ever sees, where there is no continuity to check.
    pub fn prime(&mut self, seq: Sequence) {
        self.last = seq;
    }

    pub fn last(&self) -> Sequence {
        self.last
    }

    /// Classifies one decoded sequence number.
    pub fn observe(&mut self, seq: Sequence) -> Verdict {
        if seq == 0 {
            // Transmitter restart: forget the old position first.
            self.last = 0;
        }
        let verdict = if seq.wrapping_sub(1) == self.last {
            self.drop_streak -= 1;
            Verdict::InSync {
                recovered: self.drop_streak == 0,
            }
        } else {
            self.drop_streak = RECOVERY_TICKS;
            Verdict::Gap
        };
        self.last = seq;
        verdict
    }

    /// Call once per cycle in which no frame arrived at all. Returns
    /// true exactly when the streak first crosses [`SILENCE_TICKS`].
    /// The streak saturates rather than wrapping: silence can outlast
    /// a u32 of 10ms cycles, and a wrap would re-arm the crossing.
    pub fn note_missed(&mut self) -> bool {
        self.missed_streak = self.missed_streak.saturating_add(1);
        self.missed_streak == SILENCE_TICKS + 1
    }

    /// A frame arrived (whether or not it decoded); the silence streak
    /// is over.
    pub fn note_received(&mut self) {
        self.missed_streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_sequence_is_in_sync() {
        let mut tracker = SequenceTracker::new();
        assert_eq!(
            tracker.observe(1),
            Verdict::InSync { recovered: false }
        );
        assert_eq!(tracker.last(), 1);
    }

    #[test]
    fn a_jump_is_a_gap_and_last_still_advances() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(1);
        assert_eq!(tracker.observe(5), Verdict::Gap);
        assert_eq!(tracker.last(), 5);
    }

    #[test]
    fn zero_resets_last_and_flags_itself_as_a_gap() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(1);
        tracker.observe(2);
        assert_eq!(tracker.observe(0), Verdict::Gap);
        assert_eq!(tracker.last(), 0);
        // the restart passes continuity from the next frame on
        assert_eq!(
            tracker.observe(1),
            Verdict::InSync { recovered: false }
        );
    }

    #[test]
    fn recovery_reports_on_the_tenth_in_sync_frame() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(1);
        tracker.observe(5);
        for seq in 6..15 {
            assert_eq!(
                tracker.observe(seq),
                Verdict::InSync { recovered: false }
            );
        }
        assert_eq!(tracker.observe(15), Verdict::InSync { recovered: true });
        assert_eq!(
            tracker.observe(16),
            Verdict::InSync { recovered: false }
        );
    }

    #[test]
    fn priming_skips_the_continuity_check() {
        let mut tracker = SequenceTracker::new();
        tracker.prime(7);
        assert_eq!(
            tracker.observe(8),
            Verdict::InSync { recovered: false }
        );
    }

    #[test]
    fn the_wrap_to_zero_reads_as_a_restart() {
        let mut tracker = SequenceTracker::new();
        tracker.prime(65534);
        assert_eq!(
            tracker.observe(65535),
            Verdict::InSync { recovered: false }
        );
        assert_eq!(tracker.observe(0), Verdict::Gap);
        assert_eq!(
            tracker.observe(1),
            Verdict::InSync { recovered: false }
        );
    }

    #[test]
    fn silence_is_reported_once_on_the_eleventh_miss() {
        let mut tracker = SequenceTracker::new();
        for _ in 0..10 {
            assert!(!tracker.note_missed());
        }
        assert!(tracker.note_missed());
        assert!(!tracker.note_missed());
    }

    #[test]
    fn an_endless_silence_pegs_the_streak_without_re_arming() {
        let mut tracker = SequenceTracker::new();
        tracker.missed_streak = u32::max_value() - 1;
        assert!(!tracker.note_missed());
        // pegged at the ceiling now; no wrap back toward the threshold
        assert!(!tracker.note_missed());
        assert!(!tracker.note_missed());
        tracker.note_received();
        for _ in 0..10 {
            assert!(!tracker.note_missed());
        }
        assert!(tracker.note_missed());
    }

    #[test]
    fn any_frame_resets_the_missed_streak() {
        let mut tracker = SequenceTracker::new();
        for _ in 0..10 {
            tracker.note_missed();
        }
        tracker.note_received();
        for _ in 0..10 {
            assert!(!tracker.note_missed());
        }
        assert!(tracker.note_missed());
    }
}
