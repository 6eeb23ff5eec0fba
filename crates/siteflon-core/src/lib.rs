mod compiler;
mod cursor;
mod diagnostic;
mod error;
mod link;
mod marker;
mod options;
mod source_map;
mod span;
mod state;

pub use compiler::{
    CompileResult, compile, compile_bytes, compile_bytes_with_diagnostics,
    compile_with_diagnostics, try_compile,
};
pub use diagnostic::{
    Diagnostic, DiagnosticSeverity, E_IMAGE_NO_URL, E_LINK_NO_URL, W_UNCLOSED, W_UNTERMINATED,
};
pub use error::{CompileError, MarkerError};
pub use marker::{Marker, MarkerSet, MarkerSetBuilder, STRUCTURAL_BYTES};
pub use options::CompileOptions;
pub use source_map::{Position, Range, SourceMap};
pub use span::Span;
pub use state::{MAX_HEADING_LEVEL, OpenState};
