//! Fragmented input records the reassembly buffer combines into [`crate::event::Event`]s.
//!
//! A single logical splice event can arrive split across several `Input`
//! records — the upstream control-plane protocol this generator sits behind
//! announces an event's start, trickles in descriptors, and later closes it
//! out. Every field besides `start`/`end` is optional because any given
//! fragment may carry only a slice of the full event.

/// One fragment of an in-flight or complete splice event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Input {
    /// Marks this fragment as the first one for its `event_id`. A `start`
    /// fragment for an `event_id` already in progress forces a flush of the
    /// prior event before accumulation begins anew.
    pub start: bool,
    /// Marks this fragment as the last one for its `event_id`; on receipt the
    /// reassembly buffer releases the accumulated event immediately.
    pub end: bool,
    /// Raw `splice_command_type` byte, present on the `start` fragment.
    pub command_type: Option<u8>,
    /// `splice_event_id`, present on the `start` fragment.
    pub event_id: Option<u32>,
    /// `unique_program_id`, present on the `start` fragment of a
    /// `splice_insert`.
    pub unique_program_id: Option<u16>,
    /// `splice_event_cancel_indicator`.
    pub cancel: Option<bool>,
    /// `out_of_network_indicator`.
    pub out_of_network: Option<bool>,
    /// Auto-return flag for the associated break.
    pub auto_return: Option<bool>,
    /// Host-clock (27 MHz) splice time, if this event is scheduled rather
    /// than immediate.
    pub pts_prog: Option<u64>,
    /// Host-clock break duration.
    pub duration: Option<u64>,
    /// Host-clock time this fragment was received, used to stamp the
    /// event's `pts_sys` once assembled.
    pub pts_sys: Option<u64>,
    /// One descriptor byte run carried by this fragment, if any.
    pub descriptor: Option<Vec<u8>>,
}

impl Input {
    /// A fragment that both starts and ends its event in one shot — the
    /// common case for simple, non-split control messages.
    pub fn whole(event_id: u32, command_type: u8, pts_sys: u64) -> Self {
        Self {
            start: true,
            end: true,
            command_type: Some(command_type),
            event_id: Some(event_id),
            pts_sys: Some(pts_sys),
            ..Default::default()
        }
    }
}
