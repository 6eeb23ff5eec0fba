use crate::error::CompileError;
use crate::source_map::{Range, SourceMap};
use crate::span::Span;

pub const E_LINK_NO_URL: &str = "E_LINK_NO_URL";
pub const E_IMAGE_NO_URL: &str = "E_IMAGE_NO_URL";

pub const W_UNCLOSED: &str = "W_UNCLOSED";
pub const W_UNTERMINATED: &str = "W_UNTERMINATED";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub span: Span,
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        span: Span,
        source_map: &SourceMap,
        severity: DiagnosticSeverity,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            span,
            range: source_map.range(span),
            severity,
            code,
            message: message.into(),
        }
    }

    /// The error-level diagnostic for an aborted compilation.
    pub fn from_error(error: &CompileError, source_map: &SourceMap) -> Self {
        let code = match error {
            CompileError::MalformedLink { .. } => E_LINK_NO_URL,
            CompileError::MalformedImage { .. } => E_IMAGE_NO_URL,
        };
        Self::new(
            error.span(),
            source_map,
            DiagnosticSeverity::Error,
            code,
            error.to_string(),
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl DiagnosticSeverity {
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostic, DiagnosticSeverity, E_LINK_NO_URL};
    use crate::error::CompileError;
    use crate::source_map::SourceMap;
    use crate::span::Span;

    #[test]
    fn abort_errors_map_to_positions() {
        let source = b"line\n@[x]y";
        let error = CompileError::MalformedLink {
            span: Span { start: 5, end: 10 },
        };
        let diag = Diagnostic::from_error(&error, &SourceMap::new(source));

        assert_eq!(diag.code, E_LINK_NO_URL);
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.range.start.line, 1);
        assert_eq!(diag.range.start.character, 0);
        assert!(diag.message.contains("byte 5"));
    }
}
