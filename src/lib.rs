//! SCTE-35 Splice Information Table generator.
//!
//! Reassembles fragmented upstream splice control messages into complete
//! events, synthesizes their `splice_info_section` wire forms, and drives a
//! tick-based scheduler that repeats sections at a configured minimum
//! interval for a downstream MPEG-2 Transport Stream multiplexer.
//!
//! The core entry point is [`generator::SpliceInfoGenerator`]; callers
//! provide their own [`collaborators::BufferProvider`],
//! [`collaborators::Emitter`], and [`collaborators::Logger`] implementations
//! to connect it to their pipeline.

pub mod clock;
pub mod collaborators;
pub mod crc;
pub mod encoding;
pub mod error;
pub mod event;
pub mod flow;
pub mod generator;
pub mod input;
pub mod message;
pub mod queue;
pub mod reassembly;
pub mod scheduler;
pub mod synth;
pub mod types;

pub use collaborators::{BufferProvider, Emitter, Logger};
pub use error::SigError;
pub use event::Event;
pub use generator::SpliceInfoGenerator;
pub use input::Input;
