//! Top-level error type, unifying the collaborator and encoding error kinds
//! a caller of [`crate::generator::SpliceInfoGenerator`] can see.

use std::fmt;

use crate::collaborators::{AllocError, EmitError};
use crate::encoding::EncodingError;
use crate::flow::InvalidFlowDef;

/// Anything that can go wrong while running the generator.
#[derive(Debug, Clone, PartialEq)]
pub enum SigError {
    /// A collaborator could not provide a scratch buffer.
    Alloc(AllocError),
    /// A collaborator rejected a finished section.
    Emit(EmitError),
    /// A structure failed to encode to its wire format.
    Encoding(EncodingError),
    /// A flow definition was rejected.
    InvalidFlowDef(InvalidFlowDef),
}

impl fmt::Display for SigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigError::Alloc(e) => write!(f, "{e}"),
            SigError::Emit(e) => write!(f, "{e}"),
            SigError::Encoding(e) => write!(f, "{e}"),
            SigError::InvalidFlowDef(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SigError {}

impl From<AllocError> for SigError {
    fn from(e: AllocError) -> Self {
        SigError::Alloc(e)
    }
}

impl From<EmitError> for SigError {
    fn from(e: EmitError) -> Self {
        SigError::Emit(e)
    }
}

impl From<EncodingError> for SigError {
    fn from(e: EncodingError) -> Self {
        SigError::Encoding(e)
    }
}

impl From<InvalidFlowDef> for SigError {
    fn from(e: InvalidFlowDef) -> Self {
        SigError::InvalidFlowDef(e)
    }
}
