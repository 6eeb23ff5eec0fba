//! Marker roles and the byte assigned to each of them.

use std::fmt;

use once_cell::sync::Lazy;

use crate::error::MarkerError;

/// Bytes with a fixed structural meaning inside links, images and headings.
/// They can never be reassigned to a marker role.
pub const STRUCTURAL_BYTES: &[u8] = b"\n[]():";

const MARKER_COUNT: usize = 12;

/// A markup role a source byte can play.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Marker {
    Escape,
    RawBegin,
    RawEnd,
    Bold,
    Italics,
    Underline,
    Rule,
    LineBreak,
    Link,
    Image,
    Code,
    Heading,
}

impl Marker {
    pub const ALL: [Marker; MARKER_COUNT] = [
        Marker::Escape,
        Marker::RawBegin,
        Marker::RawEnd,
        Marker::Bold,
        Marker::Italics,
        Marker::Underline,
        Marker::Rule,
        Marker::LineBreak,
        Marker::Link,
        Marker::Image,
        Marker::Code,
        Marker::Heading,
    ];

    pub fn default_byte(self) -> u8 {
        match self {
            Marker::Escape => b'\\',
            Marker::RawBegin => b'{',
            Marker::RawEnd => b'}',
            Marker::Bold => b'*',
            Marker::Italics => b'/',
            Marker::Underline => b'_',
            Marker::Rule => b'-',
            Marker::LineBreak => b';',
            Marker::Link => b'@',
            Marker::Image => b'!',
            Marker::Code => b'`',
            Marker::Heading => b'#',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Marker::Escape => "escape",
            Marker::RawBegin => "raw-begin",
            Marker::RawEnd => "raw-end",
            Marker::Bold => "bold",
            Marker::Italics => "italics",
            Marker::Underline => "underline",
            Marker::Rule => "rule",
            Marker::LineBreak => "line-break",
            Marker::Link => "link",
            Marker::Image => "image",
            Marker::Code => "code",
            Marker::Heading => "heading",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static DEFAULT_MARKERS: Lazy<MarkerSet> =
    Lazy::new(|| MarkerSet::from_roles(Marker::ALL.map(Marker::default_byte)));

/// The byte assigned to every marker role, with a 256-entry lookup table
/// for classifying source bytes.
#[derive(Clone)]
pub struct MarkerSet {
    roles: [u8; MARKER_COUNT],
    table: [Option<Marker>; 256],
}

impl MarkerSet {
    pub fn builder() -> MarkerSetBuilder {
        MarkerSetBuilder::default()
    }

    fn from_roles(roles: [u8; MARKER_COUNT]) -> Self {
        let mut table = [None; 256];
        for marker in Marker::ALL {
            table[usize::from(roles[marker.index()])] = Some(marker);
        }
        Self { roles, table }
    }

    /// The role `byte` plays, if any.
    pub fn classify(&self, byte: u8) -> Option<Marker> {
        self.table[usize::from(byte)]
    }

    pub fn byte(&self, marker: Marker) -> u8 {
        self.roles[marker.index()]
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        DEFAULT_MARKERS.clone()
    }
}

impl fmt::Debug for MarkerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for marker in Marker::ALL {
            map.entry(&marker.name(), &char::from(self.byte(marker)));
        }
        map.finish()
    }
}

impl PartialEq for MarkerSet {
    fn eq(&self, other: &Self) -> bool {
        self.roles == other.roles
    }
}

impl Eq for MarkerSet {}

/// Reassigns marker bytes; validated by [`MarkerSetBuilder::build`].
#[derive(Clone, Debug)]
pub struct MarkerSetBuilder {
    roles: [u8; MARKER_COUNT],
}

impl Default for MarkerSetBuilder {
    fn default() -> Self {
        Self {
            roles: Marker::ALL.map(Marker::default_byte),
        }
    }
}

impl MarkerSetBuilder {
    pub fn set(mut self, marker: Marker, byte: u8) -> Self {
        self.roles[marker.index()] = byte;
        self
    }

    pub fn build(self) -> Result<MarkerSet, MarkerError> {
        for (idx, marker) in Marker::ALL.into_iter().enumerate() {
            let byte = self.roles[idx];
            if STRUCTURAL_BYTES.contains(&byte) {
                return Err(MarkerError::Reserved {
                    byte: char::from(byte),
                    role: marker,
                });
            }
            if let Some(first) = Marker::ALL[..idx]
                .iter()
                .copied()
                .find(|earlier| self.roles[earlier.index()] == byte)
            {
                return Err(MarkerError::Duplicate {
                    byte: char::from(byte),
                    first,
                    second: marker,
                });
            }
        }
        Ok(MarkerSet::from_roles(self.roles))
    }
}
