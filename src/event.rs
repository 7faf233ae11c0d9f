//! A fully reassembled splice event, ready for command synthesis.

use crate::types::CommandType;

/// One logical splice event, built up from one or more [`crate::input::Input`]
/// fragments by the reassembly buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Which command this event will synthesize into.
    pub command_type: CommandType,
    /// `splice_event_id` / event identifier carried across all fragments.
    pub event_id: u32,
    /// `unique_program_id`, applicable to `splice_insert` only.
    pub unique_program_id: u16,
    /// `splice_event_cancel_indicator`.
    pub cancel: bool,
    /// `out_of_network_indicator`.
    pub out_of_network: bool,
    /// Whether a downstream auto-return should occur at the end of the break.
    pub auto_return: bool,
    /// Host-clock (27 MHz) time the splice point itself refers to, if known.
    /// `None` means an immediate splice.
    pub pts_prog: Option<u64>,
    /// Host-clock duration of the associated break, if known.
    pub duration: Option<u64>,
    /// Host-clock time this event was assembled at. Used as the `cr_sys` the
    /// scheduler measures intervals against.
    pub pts_sys: u64,
    /// Descriptor byte runs collected across all fragments, in arrival order.
    pub descriptors: Vec<Vec<u8>>,
}
