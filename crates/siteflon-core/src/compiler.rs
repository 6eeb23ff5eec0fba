use log::{debug, trace};

use crate::cursor::Cursor;
use crate::diagnostic::{Diagnostic, DiagnosticSeverity, W_UNCLOSED, W_UNTERMINATED};
use crate::error::CompileError;
use crate::link::{scan_destination, scan_image_label, scan_label};
use crate::marker::Marker;
use crate::options::CompileOptions;
use crate::source_map::SourceMap;
use crate::span::Span;
use crate::state::{MAX_HEADING_LEVEL, OpenState, StateStack};

/// Compiles `source` to an HTML fragment. A malformed link or image discards
/// everything and yields the empty string.
pub fn compile(source: &str, options: &CompileOptions) -> String {
    try_compile(source, options).unwrap_or_default()
}

/// Like [`compile`], but reports an aborted compilation as an error.
pub fn try_compile(source: &str, options: &CompileOptions) -> Result<String, CompileError> {
    compile_bytes(source.as_bytes(), options).map(into_string)
}

/// Byte-level entry point. Bytes outside markup are copied unchanged.
pub fn compile_bytes(source: &[u8], options: &CompileOptions) -> Result<Vec<u8>, CompileError> {
    Compiler::new(source, options).run().map(|compiled| compiled.html)
}

/// Output of a checked compilation. `html` is a `String` for text input and
/// a byte buffer for [`compile_bytes_with_diagnostics`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileResult<H = String> {
    /// Empty when the compilation aborted.
    pub html: H,
    pub diagnostics: Vec<Diagnostic>,
}

impl<H> CompileResult<H> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Compiles `source` and reports unclosed constructs as warnings, or the
/// abort as an error.
pub fn compile_with_diagnostics(source: &str, options: &CompileOptions) -> CompileResult {
    let result = compile_bytes_with_diagnostics(source.as_bytes(), options);
    CompileResult {
        html: into_string(result.html),
        diagnostics: result.diagnostics,
    }
}

/// Byte-level [`compile_with_diagnostics`]. Columns in the diagnostics count
/// bytes, so input need not be UTF-8.
pub fn compile_bytes_with_diagnostics(
    source: &[u8],
    options: &CompileOptions,
) -> CompileResult<Vec<u8>> {
    match Compiler::new(source, options).run() {
        Ok(compiled) => CompileResult {
            html: compiled.html,
            diagnostics: compiled.warnings,
        },
        Err(error) => CompileResult {
            html: Vec::new(),
            diagnostics: vec![Diagnostic::from_error(&error, &SourceMap::new(source))],
        },
    }
}

fn into_string(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(value) => value,
        Err(err) => String::from_utf8_lossy(&err.into_bytes()).into_owned(),
    }
}

struct Compiled {
    html: Vec<u8>,
    warnings: Vec<Diagnostic>,
}

/// State of one compilation pass.
struct Compiler<'a> {
    source: &'a [u8],
    cursor: Cursor<'a>,
    options: &'a CompileOptions,
    stack: StateStack,
    out: Vec<u8>,
    unterminated: Vec<(Span, &'static str)>,
}

impl<'a> Compiler<'a> {
    fn new(source: &'a [u8], options: &'a CompileOptions) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            options,
            stack: StateStack::default(),
            out: Vec::with_capacity(source.len()),
            unterminated: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Compiled, CompileError> {
        trace!("compiling {} source bytes", self.source.len());
        while let Some(byte) = self.cursor.current() {
            self.step(byte)?;
        }
        trace!("emitted {} bytes of html", self.out.len());
        let warnings = self.warnings();
        Ok(Compiled {
            html: self.out,
            warnings,
        })
    }

    fn step(&mut self, byte: u8) -> Result<(), CompileError> {
        match self.options.markers.classify(byte) {
            Some(Marker::Escape) => self.escape(),
            Some(Marker::RawBegin) => self.raw_region(),
            Some(Marker::Bold) => self.toggle(OpenState::Bold),
            Some(Marker::Italics) => self.toggle(OpenState::Italics),
            Some(Marker::Underline) => self.toggle(OpenState::Underline),
            Some(Marker::Rule) => self.rule(byte),
            Some(Marker::LineBreak) => self.line_break(byte),
            Some(Marker::Heading) => self.heading(byte),
            Some(Marker::Link) => return self.link(),
            Some(Marker::Image) => return self.image(),
            Some(Marker::Code) => self.code_span(),
            None if byte == b'\n' => self.newline(),
            Some(Marker::RawEnd) | None => self.literal(byte),
        }
        Ok(())
    }

    fn emit(&mut self, html: &str) {
        self.out.extend_from_slice(html.as_bytes());
    }

    fn literal(&mut self, byte: u8) {
        self.out.push(byte);
        self.cursor.advance();
    }

    fn escape(&mut self) {
        self.cursor.advance();
        if let Some(byte) = self.cursor.bump() {
            self.out.push(byte);
        }
    }

    fn raw_region(&mut self) {
        let end = self.options.markers.byte(Marker::RawEnd);
        self.verbatim(end, "raw region");
    }

    fn code_span(&mut self) {
        let end = self.options.markers.byte(Marker::Code);
        self.emit("<pre>");
        self.verbatim(end, "code span");
        self.emit("</pre>");
    }

    /// Copies bytes after the opening marker up to an unescaped `end`, which
    /// is consumed and dropped.
    fn verbatim(&mut self, end: u8, what: &'static str) {
        let open = self.cursor.pos();
        let escape = self.options.markers.byte(Marker::Escape);
        self.cursor.advance();
        loop {
            match self.cursor.bump() {
                None => {
                    self.unterminated
                        .push((Span::clamped(open, 1, self.source.len()), what));
                    break;
                }
                Some(byte) if byte == end => break,
                Some(byte) if byte == escape => {
                    if let Some(escaped) = self.cursor.bump() {
                        self.out.push(escaped);
                    }
                }
                Some(byte) => self.out.push(byte),
            }
        }
    }

    fn toggle(&mut self, state: OpenState) {
        if self.stack.top() == Some(state) {
            self.stack.pop();
            self.emit(state.close_tag());
        } else {
            self.stack.push(state, self.cursor.pos(), 1);
            self.emit(state.open_tag());
        }
        self.cursor.advance();
    }

    fn rule(&mut self, marker: u8) {
        if self.stack.is_empty()
            && self.cursor.peek() == Some(marker)
            && self.cursor.peek2() == Some(marker)
        {
            self.cursor.advance_by(3);
            self.emit("<hr>");
        } else {
            self.literal(marker);
        }
    }

    fn line_break(&mut self, marker: u8) {
        if self.cursor.peek() == Some(marker) {
            self.cursor.advance_by(2);
            self.emit("<br>");
        } else {
            self.literal(marker);
        }
    }

    fn heading(&mut self, marker: u8) {
        let start = self.cursor.pos();
        let mut level = 1;
        self.cursor.advance();
        // The byte ending the run stays unconsumed for the next step.
        while level < MAX_HEADING_LEVEL && self.cursor.is_at(marker) {
            level += 1;
            self.cursor.advance();
        }
        let state = OpenState::Heading(level);
        self.emit(state.open_tag());
        self.stack.push(state, start, usize::from(level));
    }

    fn newline(&mut self) {
        if let Some(state @ OpenState::Heading(_)) = self.stack.top() {
            self.stack.pop();
            self.emit(state.close_tag());
        } else if self.options.preserve_new_lines {
            self.emit("<br>");
        } else {
            self.out.push(b'\n');
        }
        self.cursor.advance();
    }

    fn link(&mut self) -> Result<(), CompileError> {
        let start = self.cursor.pos();
        if self.cursor.peek() != Some(b'[') {
            self.cursor.advance();
            return Ok(());
        }
        self.cursor.advance_by(2);
        let alt = scan_label(&mut self.cursor);
        let url = self.destination(start, |span| CompileError::MalformedLink { span })?;

        self.emit("\n<a href=\"");
        self.out.extend_from_slice(&url);
        self.emit("\">");
        self.out
            .extend_from_slice(if alt.is_empty() { &url } else { &alt });
        self.emit("</a>\n");
        Ok(())
    }

    fn image(&mut self) -> Result<(), CompileError> {
        let start = self.cursor.pos();
        if self.cursor.peek() != Some(b'[') {
            self.cursor.advance();
            return Ok(());
        }
        self.cursor.advance_by(2);
        let label = scan_image_label(&mut self.cursor);
        let url = self.destination(start, |span| CompileError::MalformedImage { span })?;

        self.emit("\n<img src=\"");
        self.out.extend_from_slice(&url);
        self.emit("\" alt=\"");
        self.out
            .extend_from_slice(if label.alt.is_empty() { &url } else { &label.alt });
        self.emit("\"");
        if !label.width.is_empty() {
            self.emit(" width=\"");
            self.out.extend_from_slice(&label.width);
            self.emit("\"");
        }
        if !label.height.is_empty() {
            self.emit(" height=\"");
            self.out.extend_from_slice(&label.height);
            self.emit("\"");
        }
        self.emit(">\n");
        Ok(())
    }

    /// Expects `(` at the cursor and reads the destination behind it.
    fn destination(
        &mut self,
        start: usize,
        malformed: fn(Span) -> CompileError,
    ) -> Result<Vec<u8>, CompileError> {
        if !self.cursor.is_at(b'(') {
            let span = Span::clamped(
                start,
                self.cursor.pos() + 1 - start,
                self.source.len(),
            );
            let error = malformed(span);
            debug!("aborting compilation: {error}");
            return Err(error);
        }
        let open = self.cursor.pos();
        self.cursor.advance();
        let destination = scan_destination(&mut self.cursor);
        if !destination.terminated {
            self.unterminated
                .push((Span::clamped(open, 1, self.source.len()), "link destination"));
        }
        Ok(destination.url)
    }

    fn warnings(&mut self) -> Vec<Diagnostic> {
        let unclosed = std::mem::take(&mut self.stack).into_unclosed();
        if unclosed.is_empty() && self.unterminated.is_empty() {
            return Vec::new();
        }
        let source_map = SourceMap::new(self.source);
        let len = self.source.len();

        let mut warnings: Vec<Diagnostic> = unclosed
            .into_iter()
            .map(|entry| {
                Diagnostic::new(
                    Span::clamped(entry.opened_at, entry.marker_len, len),
                    &source_map,
                    DiagnosticSeverity::Warning,
                    W_UNCLOSED,
                    format!("{} opened here is never closed", entry.state.name()),
                )
            })
            .collect();
        warnings.extend(self.unterminated.drain(..).map(|(span, what)| {
            Diagnostic::new(
                span,
                &source_map,
                DiagnosticSeverity::Warning,
                W_UNTERMINATED,
                format!("{what} runs to the end of input"),
            )
        }));
        warnings.sort_by_key(|diag| diag.span.start);
        warnings
    }
}
