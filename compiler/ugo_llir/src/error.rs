//! Lowering errors.
//!
//! The first error aborts the whole compilation; callers never see partial
//! output.

use thiserror::Error;
use ugo_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LowerError {
    /// An identifier or assignment target did not resolve through the
    /// scope chain.
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String, span: Span },

    /// A node, operator, or call form outside what lowering handles.
    #[error("unsupported {kind} in lowering: {repr}")]
    UnsupportedNode {
        kind: &'static str,
        repr: String,
        span: Span,
    },
}

impl LowerError {
    pub fn undefined_variable(name: impl Into<String>, span: Span) -> Self {
        LowerError::UndefinedVariable {
            name: name.into(),
            span,
        }
    }

    pub fn unsupported(kind: &'static str, repr: impl Into<String>, span: Span) -> Self {
        LowerError::UnsupportedNode {
            kind,
            repr: repr.into(),
            span,
        }
    }

    /// Source location of the offending node.
    pub fn span(&self) -> Span {
        match self {
            LowerError::UndefinedVariable { span, .. } | LowerError::UnsupportedNode { span, .. } => {
                *span
            }
        }
    }
}
