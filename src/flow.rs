//! Flow definitions: the input/output format contract this generator sits
//! between, mirroring the `def` strings a transport-stream multiplexer
//! pipeline negotiates between modules.

use std::fmt;

use crate::clock::UCLOCK_FREQ;

/// Bytes of payload a single MPEG-2 TS packet carries for a PSI section
/// (188 - 4 byte header - 1 byte pointer field).
const TS_PAYLOAD_PER_PACKET: u64 = 183;

/// T-STD transport buffer fill rate for PSI sections, in bytes/s. Reported
/// alongside `octet_rate` as a fixed property of the output flow; it does
/// not enter the `octet_rate` calculation itself.
pub const TB_RATE: u64 = 125_000;

/// Error returned when a flow definition string does not match the prefix
/// this generator requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFlowDef {
    /// The flow definition string that was rejected.
    pub def: String,
    /// The prefix it was expected to start with.
    pub expected_prefix: &'static str,
}

impl fmt::Display for InvalidFlowDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "flow def '{}' does not start with expected prefix '{}'",
            self.def, self.expected_prefix
        )
    }
}

impl std::error::Error for InvalidFlowDef {}

/// The expected input flow, carrying the control-plane messages this
/// generator reassembles into events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFlowDef {
    def: String,
}

impl InputFlowDef {
    /// Required prefix for an acceptable input flow definition.
    pub const PREFIX: &'static str = "void.scte35.";

    /// Validates and wraps a flow definition string.
    pub fn new(def: impl Into<String>) -> Result<Self, InvalidFlowDef> {
        let def = def.into();
        if def.starts_with(Self::PREFIX) {
            Ok(Self { def })
        } else {
            Err(InvalidFlowDef {
                def,
                expected_prefix: Self::PREFIX,
            })
        }
    }

    /// Borrows the underlying flow definition string.
    pub fn as_str(&self) -> &str {
        &self.def
    }
}

/// The output flow this generator produces: MPEG-2 TS PSI sections carrying
/// SCTE-35 `splice_info_section`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFlowDef {
    psi_section_interval: u64,
}

impl OutputFlowDef {
    /// Format tag stamped on every output flow.
    pub const FORMAT: &'static str = "block.mpegtspsi.mpegtsscte35.";

    /// Builds an output flow definition for sections repeated at the given
    /// host-clock interval.
    pub fn new(psi_section_interval: u64) -> Self {
        Self {
            psi_section_interval,
        }
    }

    /// The full output flow definition string.
    pub fn def(&self) -> String {
        Self::FORMAT.to_string()
    }

    /// Minimum bandwidth, in octets/s, a downstream multiplexer must
    /// reserve to carry one section per `psi_section_interval` of
    /// host-clock time.
    pub fn octet_rate(&self) -> u64 {
        if self.psi_section_interval == 0 {
            return 0;
        }
        (TS_PAYLOAD_PER_PACKET * UCLOCK_FREQ) / self.psi_section_interval
    }

    /// T-STD transport buffer fill rate for PSI, fixed per spec.
    pub fn tb_rate(&self) -> u64 {
        TB_RATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_prefix() {
        assert!(InputFlowDef::new("block.mpegts.").is_err());
    }

    #[test]
    fn accepts_expected_prefix() {
        assert!(InputFlowDef::new("void.scte35.").is_ok());
        assert!(InputFlowDef::new("void.scte35.splice").is_ok());
    }

    #[test]
    fn octet_rate_scales_inversely_with_interval() {
        let fast = OutputFlowDef::new(UCLOCK_FREQ);
        let slow = OutputFlowDef::new(UCLOCK_FREQ * 10);
        assert!(fast.octet_rate() > slow.octet_rate());
    }
}
