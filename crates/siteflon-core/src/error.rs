use crate::marker::Marker;
use crate::span::Span;

/// A construct that aborts the whole compilation.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("link label at byte {} is not followed by `(`", .span.start)]
    MalformedLink { span: Span },
    #[error("image label at byte {} is not followed by `(`", .span.start)]
    MalformedImage { span: Span },
}

impl CompileError {
    /// Bytes from the link/image marker up to the byte that failed the `(` check.
    pub fn span(&self) -> Span {
        match self {
            CompileError::MalformedLink { span } | CompileError::MalformedImage { span } => *span,
        }
    }
}

/// Rejected marker assignment.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MarkerError {
    #[error("`{byte}` is assigned to both the {first} and {second} markers")]
    Duplicate {
        byte: char,
        first: Marker,
        second: Marker,
    },
    #[error("`{}` is structural and cannot be used for the {role} marker", .byte.escape_default())]
    Reserved { byte: char, role: Marker },
}
