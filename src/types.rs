//! Wire-level SCTE-35 structures synthesized by this crate.
//!
//! These are output-only types: the shapes the command synthesizer builds
//! and the encoding module serializes. They hold values already resolved to
//! their 90 kHz wire scale — the 27 MHz -> 90 kHz conversion is the
//! synthesizer's job (see [`crate::clock`]), not the encoder's.

/// The three splice command types this generator can synthesize.
///
/// SCTE-35 defines more (`splice_schedule`, `bandwidth_reservation`,
/// `private_command`); this generator only ever emits these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// `splice_null` (0x00) — filler section carrying no splice point.
    Null,
    /// `splice_insert` (0x05) — the classic ad-insertion cue.
    Insert,
    /// `time_signal` (0x06) — a bare timestamp, typically paired with descriptors.
    TimeSignal,
}

impl CommandType {
    /// The `splice_command_type` byte for this command.
    pub fn id(self) -> u8 {
        match self {
            CommandType::Null => 0x00,
            CommandType::Insert => 0x05,
            CommandType::TimeSignal => 0x06,
        }
    }
}

/// Error returned when a raw `splice_command_type` byte is not one of the
/// three command types this generator supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCommandType(pub u8);

impl std::fmt::Display for UnknownCommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported splice_command_type: 0x{:02X}", self.0)
    }
}

impl std::error::Error for UnknownCommandType {}

impl TryFrom<u8> for CommandType {
    type Error = UnknownCommandType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(CommandType::Null),
            0x05 => Ok(CommandType::Insert),
            0x06 => Ok(CommandType::TimeSignal),
            other => Err(UnknownCommandType(other)),
        }
    }
}

/// `splice_time()` — a 33-bit PTS at 90 kHz, or "not specified".
///
/// `None` encodes as `time_specified_flag = 0`; `Some(pts)` encodes as
/// `time_specified_flag = 1` with the given (already wrapped) `pts_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpliceTime(pub Option<u64>);

/// `break_duration()` — the length of a commercial break, at 90 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakDuration {
    /// Whether the network should auto-return at the end of the break.
    pub auto_return: bool,
    /// Duration in 90 kHz ticks, 33 bits.
    pub duration: u64,
}

/// `splice_insert()` (command type 0x05), per ANSI/SCTE 35 §9.7.3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceInsert {
    /// `splice_event_id`.
    pub splice_event_id: u32,
    /// `splice_event_cancel_indicator`. When set, no other field is written
    /// except `splice_event_id` and this flag.
    pub cancel: bool,
    /// `out_of_network_indicator`.
    pub out_of_network: bool,
    /// `splice_time()`, present iff this is not an immediate splice.
    pub splice_time: SpliceTime,
    /// `break_duration()`, present iff a duration was supplied.
    pub break_duration: Option<BreakDuration>,
    /// `unique_program_id`.
    pub unique_program_id: u16,
}

/// `time_signal()` (command type 0x06).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignal {
    /// `splice_time()`.
    pub splice_time: SpliceTime,
}

/// A splice command, tagged by its `splice_command_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceCommand {
    /// `splice_null()` — empty body.
    Null,
    /// `splice_insert()`.
    Insert(SpliceInsert),
    /// `time_signal()`.
    TimeSignal(TimeSignal),
}

impl SpliceCommand {
    /// The `splice_command_type` byte for this command.
    pub fn command_type(&self) -> CommandType {
        match self {
            SpliceCommand::Null => CommandType::Null,
            SpliceCommand::Insert(_) => CommandType::Insert,
            SpliceCommand::TimeSignal(_) => CommandType::TimeSignal,
        }
    }
}

/// An opaque `splice_descriptor()` byte run, already framed by the
/// collaborator as `splice_descriptor_tag` + `descriptor_length` + payload.
///
/// This generator never interprets descriptor contents (segmentation UPIDs,
/// avail IDs, etc.) — it only concatenates whatever well-formed byte runs
/// reassembly collected and sums their lengths into `descriptor_loop_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDescriptor(pub Vec<u8>);

impl RawDescriptor {
    /// A descriptor byte run is well-formed iff it starts with a tag byte, a
    /// `descriptor_length` byte, and exactly `descriptor_length` more bytes.
    /// Malformed runs are the "descriptor export failure" the command
    /// synthesizer must skip rather than emit.
    pub fn is_well_formed(&self) -> bool {
        match self.0.as_slice() {
            [_tag, length, rest @ ..] => *length as usize == rest.len(),
            _ => false,
        }
    }
}

/// A complete SCTE-35 `splice_info_section()`.
///
/// Every other framing field (`table_id`, `protocol_version`, `tier`,
/// `pts_adjustment`, `cw_index`, encryption fields) is fixed by this
/// generator per spec and is not exposed as a struct field — see
/// `encoding::splice_info_section` for the literal values written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceInfoSection {
    /// The splice command carried by this section.
    pub splice_command: SpliceCommand,
    /// Descriptors appended after the command, in order.
    pub splice_descriptors: Vec<RawDescriptor>,
}

impl SpliceInfoSection {
    /// A bare `splice_null()` section with no descriptors.
    pub fn null() -> Self {
        Self {
            splice_command: SpliceCommand::Null,
            splice_descriptors: Vec::new(),
        }
    }
}
