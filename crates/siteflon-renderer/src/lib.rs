use std::fs;
use std::io;
use std::path::Path;

use siteflon_core::{CompileOptions, compile};

const BASE_CSS: &str = include_str!("../assets/styles.css");

/// Name of the stylesheet the default shell links to and `generate_files` writes.
pub const STYLESHEET_FILE: &str = "styles.css";

const HEAD_OPEN: &str = "<!doctype HTML><html><head><link rel=\"stylesheet\" href=\"";
const HEAD_CLOSE: &str = "\"></head><body><div id=\"content\">";
const FOOTER: &str = "</div></body></html>";

/// Fixed document wrapper placed around a compiled fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    stylesheet_href: String,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            stylesheet_href: STYLESHEET_FILE.to_string(),
        }
    }
}

impl Shell {
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet_href = href.into();
        self
    }

    pub fn stylesheet_href(&self) -> &str {
        &self.stylesheet_href
    }

    /// The bundled stylesheet.
    pub fn stylesheet(&self) -> &'static str {
        BASE_CSS
    }

    /// Header, fragment, footer. The fragment is copied as is.
    pub fn wrap(&self, fragment: &str) -> String {
        let mut out = String::with_capacity(self.shell_len() + fragment.len());
        out.push_str(HEAD_OPEN);
        out.push_str(&self.stylesheet_href);
        out.push_str(HEAD_CLOSE);
        out.push_str(fragment);
        out.push_str(FOOTER);
        out
    }

    /// [`Shell::wrap`] for fragments compiled from non-UTF-8 input.
    pub fn wrap_bytes(&self, fragment: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.shell_len() + fragment.len());
        out.extend_from_slice(HEAD_OPEN.as_bytes());
        out.extend_from_slice(self.stylesheet_href.as_bytes());
        out.extend_from_slice(HEAD_CLOSE.as_bytes());
        out.extend_from_slice(fragment);
        out.extend_from_slice(FOOTER.as_bytes());
        out
    }

    fn shell_len(&self) -> usize {
        HEAD_OPEN.len() + self.stylesheet_href.len() + HEAD_CLOSE.len() + FOOTER.len()
    }

    pub fn generate_files(&self, out_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(out_dir)?;
        fs::write(out_dir.join(STYLESHEET_FILE), self.stylesheet())?;
        Ok(())
    }
}

/// Compiles `source` and wraps it in the default shell. A malformed link or
/// image yields an empty document body.
pub fn convert(source: &str, options: &CompileOptions) -> String {
    Shell::default().wrap(&compile(source, options))
}
