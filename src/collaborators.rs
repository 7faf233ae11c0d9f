//! Collaborator interfaces the generator is built against, replacing the
//! refcounted vtables (`upipe_mgr`, `uref_mgr`, `ubuf_mgr`) the original
//! pipeline wired at construction. Three seams: who hands out scratch
//! buffers, who receives finished sections, who receives diagnostics.

use std::fmt;

/// A block of memory the generator can write a section into. Handed out by
/// a [`BufferProvider`] and filled in place by the encoding layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBytes(Vec<u8>);

impl SectionBytes {
    /// Wraps an already-encoded section.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrows the encoded bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the section.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the section is empty. A fully-formed `splice_info_section` is
    /// never empty; this exists for the usual `len() == 0` symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Clones the underlying bytes. Messages keep both a scheduled and an
    /// immediate form of the same command alive at once, so the queue needs
    /// to duplicate sections rather than move them.
    pub fn duplicate(&self) -> Self {
        Self(self.0.clone())
    }

    /// Unwraps into the owned byte vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

/// Error returned by a [`BufferProvider`] that cannot satisfy a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocError {
    /// Bytes requested.
    pub requested: usize,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer allocation failed for {} bytes", self.requested)
    }
}

impl std::error::Error for AllocError {}

/// Source of scratch buffers for section encoding. Mirrors the role
/// `ubuf_mgr` played upstream: the generator never allocates directly, it
/// asks a collaborator for memory.
pub trait BufferProvider {
    /// Returns an empty, writable buffer with at least `capacity` bytes
    /// reserved.
    fn alloc(&mut self, capacity: usize) -> Result<Vec<u8>, AllocError>;
}

/// The simplest `BufferProvider`: a direct heap allocation per call. Used as
/// the default collaborator and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct VecBufferProvider;

impl BufferProvider for VecBufferProvider {
    fn alloc(&mut self, capacity: usize) -> Result<Vec<u8>, AllocError> {
        Ok(Vec::with_capacity(capacity))
    }
}

/// Error returned by an [`Emitter`] that rejects a finished section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitError {
    /// Human-readable reason the downstream collaborator gave, if any.
    pub reason: Option<String>,
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "emit rejected: {reason}"),
            None => write!(f, "emit rejected"),
        }
    }
}

impl std::error::Error for EmitError {}

/// A record handed to an [`Emitter`]: the section plus the host-clock time
/// it was emitted at, for downstream PSI packetization/timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// The encoded `splice_info_section`.
    pub section: SectionBytes,
    /// `cr_sys` at the tick that produced this output.
    pub cr_sys: u64,
}

/// Sink for finished sections, replacing the original pipeline's downstream
/// `upipe_output`.
pub trait Emitter {
    /// Delivers one finished section. Implementations may buffer, packetize
    /// into TS, or simply collect for inspection.
    fn emit(&mut self, record: OutputRecord) -> Result<(), EmitError>;
}

/// Collects emitted sections in memory. Used in tests and as a starting
/// point for callers who want to inspect output before wiring a real sink.
#[derive(Debug, Default)]
pub struct VecEmitter {
    /// Sections emitted so far, in emission order.
    pub records: Vec<OutputRecord>,
}

impl Emitter for VecEmitter {
    fn emit(&mut self, record: OutputRecord) -> Result<(), EmitError> {
        self.records.push(record);
        Ok(())
    }
}

/// Severity of a diagnostic passed to a [`Logger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Something is wrong but the generator can continue.
    Warn,
    /// Informational, useful for tracing pipeline behavior.
    Notice,
}

/// Diagnostic sink, replacing the original pipeline's `uprobe` log messages.
pub trait Logger {
    /// Records a diagnostic message at the given level.
    fn log(&mut self, level: LogLevel, message: &str);
}

/// A `Logger` that discards everything. Useful when a caller has no
/// diagnostics sink wired up yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&mut self, _level: LogLevel, _message: &str) {}
}

/// A `Logger` backed by the `log` crate's global dispatcher, so a caller can
/// route generator diagnostics through whatever logging backend they've
/// already configured (`env_logger`, `fern`, etc.).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCrateLogger;

impl Logger for LogCrateLogger {
    fn log(&mut self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Warn => log::warn!("{message}"),
            LogLevel::Notice => log::info!("{message}"),
        }
    }
}
