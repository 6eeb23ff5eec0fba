/// Highest heading level; longer `#` runs are cut here.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A construct that has been opened and awaits its closing marker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpenState {
    Bold,
    Italics,
    Underline,
    /// Level in `1..=MAX_HEADING_LEVEL`.
    Heading(u8),
}

impl OpenState {
    pub fn name(self) -> &'static str {
        match self {
            OpenState::Bold => "bold",
            OpenState::Italics => "italics",
            OpenState::Underline => "underline",
            OpenState::Heading(_) => "heading",
        }
    }

    pub(crate) fn open_tag(self) -> &'static str {
        match self {
            OpenState::Bold => "<strong>",
            OpenState::Italics => "<em>",
            OpenState::Underline => "<u>",
            OpenState::Heading(level) => heading_tag(level, HEADING_OPEN),
        }
    }

    pub(crate) fn close_tag(self) -> &'static str {
        match self {
            OpenState::Bold => "</strong>",
            OpenState::Italics => "</em>",
            OpenState::Underline => "</u>",
            OpenState::Heading(level) => heading_tag(level, HEADING_CLOSE),
        }
    }
}

const HEADING_OPEN: [&str; MAX_HEADING_LEVEL as usize] =
    ["<h1>", "<h2>", "<h3>", "<h4>", "<h5>", "<h6>"];
const HEADING_CLOSE: [&str; MAX_HEADING_LEVEL as usize] =
    ["</h1>", "</h2>", "</h3>", "</h4>", "</h5>", "</h6>"];

fn heading_tag(level: u8, tags: [&'static str; MAX_HEADING_LEVEL as usize]) -> &'static str {
    let idx = usize::from(level.clamp(1, MAX_HEADING_LEVEL)) - 1;
    tags[idx]
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub state: OpenState,
    /// Byte offset of the marker that opened the state.
    pub opened_at: usize,
    /// Length of that marker in bytes.
    pub marker_len: usize,
}

/// LIFO stack of open states. Only the top is ever consulted when a toggle
/// marker decides between opening and closing.
#[derive(Debug, Default)]
pub(crate) struct StateStack {
    entries: Vec<OpenEntry>,
}

impl StateStack {
    pub fn push(&mut self, state: OpenState, opened_at: usize, marker_len: usize) {
        self.entries.push(OpenEntry {
            state,
            opened_at,
            marker_len,
        });
    }

    pub fn pop(&mut self) -> Option<OpenEntry> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<OpenState> {
        self.entries.last().map(|entry| entry.state)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries never closed, bottom first.
    pub fn into_unclosed(self) -> Vec<OpenEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::{OpenState, StateStack};

    #[test]
    fn only_the_top_is_visible() {
        let mut stack = StateStack::default();
        stack.push(OpenState::Bold, 0, 1);
        stack.push(OpenState::Underline, 1, 1);

        assert_eq!(stack.top(), Some(OpenState::Underline));
        assert_eq!(stack.pop().map(|entry| entry.state), Some(OpenState::Underline));
        assert_eq!(stack.top(), Some(OpenState::Bold));
        assert!(!stack.is_empty());
    }

    #[test]
    fn heading_tags_follow_level() {
        assert_eq!(OpenState::Heading(1).open_tag(), "<h1>");
        assert_eq!(OpenState::Heading(6).close_tag(), "</h6>");
        assert_eq!(OpenState::Heading(9).close_tag(), "</h6>");
        assert_eq!(OpenState::Italics.close_tag(), "</em>");
    }
}
