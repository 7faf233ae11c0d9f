//! A synthesized, encoded splice command awaiting emission.

use crate::collaborators::SectionBytes;

/// One synthesized command, held in both its scheduled and immediate wire
/// forms so the scheduler can pick whichever fits a given tick without
/// re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Host-clock time this message was synthesized at.
    pub cr_sys: u64,
    /// Host-clock (27 MHz) deadline this message's scheduled form is due
    /// at, i.e. the event's `pts_prog`. `None` for messages with no future
    /// splice time to wait for (cancels, immediate inserts, bare time
    /// signals with no PTS) — those are due immediately.
    pub scheduled_at: Option<u64>,
    /// Encoded section carrying the command with its real splice time.
    pub scheduled_bytes: Option<SectionBytes>,
    /// Encoded section carrying the same command with the splice time
    /// forced absent (`splice_immediate_flag = 1` / no `time_signal` PTS).
    pub immediate_bytes: Option<SectionBytes>,
}

impl Message {
    /// Whether this message has nothing left to emit.
    pub fn is_empty(&self) -> bool {
        self.scheduled_bytes.is_none() && self.immediate_bytes.is_none()
    }
}
