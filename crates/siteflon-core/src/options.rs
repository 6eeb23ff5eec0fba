use crate::marker::MarkerSet;

/// Settings for one compilation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompileOptions {
    /// Render bare newlines as `<br>` instead of copying them through.
    pub preserve_new_lines: bool,
    pub markers: MarkerSet,
}
