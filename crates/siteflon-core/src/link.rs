//! Label and destination scanning shared by links and images.

use crate::cursor::Cursor;

/// Contents of an image label: `alt`, or `alt::width::height`.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct ImageLabel {
    pub alt: Vec<u8>,
    pub width: Vec<u8>,
    pub height: Vec<u8>,
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Destination {
    pub url: Vec<u8>,
    /// Whether the balancing `)` was found before end of input.
    pub terminated: bool,
}

/// Reads a label body up to and including `]`, or to end of input.
pub(crate) fn scan_label(cursor: &mut Cursor<'_>) -> Vec<u8> {
    let mut label = Vec::new();
    while let Some(byte) = cursor.bump() {
        if byte == b']' {
            break;
        }
        label.push(byte);
    }
    label
}

/// Reads an image label body up to and including `]`. The first `::` ends
/// the alt text; the width runs to the next `::` (or `]`), the height to `]`.
pub(crate) fn scan_image_label(cursor: &mut Cursor<'_>) -> ImageLabel {
    let mut label = ImageLabel::default();
    while let Some(byte) = cursor.bump() {
        match byte {
            b']' => break,
            b':' if cursor.is_at(b':') => {
                cursor.advance();
                label.width = scan_dimension(cursor);
                if cursor.is_at(b':') {
                    cursor.advance_by(2);
                    label.height = scan_label(cursor);
                } else if cursor.is_at(b']') {
                    cursor.advance();
                }
                break;
            }
            _ => label.alt.push(byte),
        }
    }
    label
}

fn scan_dimension(cursor: &mut Cursor<'_>) -> Vec<u8> {
    let mut value = Vec::new();
    while let Some(byte) = cursor.current() {
        if byte == b']' || (byte == b':' && cursor.peek() == Some(b':')) {
            break;
        }
        value.push(byte);
        cursor.advance();
    }
    value
}

/// Reads a destination after its opening `(` up to the balancing `)`, which
/// is consumed but not included. Nested parentheses are kept in the URL.
pub(crate) fn scan_destination(cursor: &mut Cursor<'_>) -> Destination {
    let mut url = Vec::new();
    let mut depth = 0usize;
    while let Some(byte) = cursor.bump() {
        match byte {
            b')' if depth == 0 => {
                return Destination {
                    url,
                    terminated: true,
                };
            }
            b')' => depth -= 1,
            b'(' => depth += 1,
            _ => {}
        }
        url.push(byte);
    }
    Destination {
        url,
        terminated: false,
    }
}
