//! Search input state.

/// Shown when a blank term is submitted.
pub const EMPTY_TERM_MESSAGE: &str = "Please enter a search term";

/// Preset terms offered on the search prompt.
pub const SUGGESTIONS: [&str; 5] = ["bus", "rail", "ferry", "electric", "facility"];

/// Free-text search input.
#[derive(Debug)]
pub struct SearchInput {
    is_editing: bool,
    buffer: String,
    last_submitted: String,
    rejected: bool,
    suggestion: Option<usize>,
}

impl SearchInput {
    /// Create a new search input, focused and empty.
    pub fn new() -> Self {
        Self {
            is_editing: true,
            buffer: String::new(),
            last_submitted: String::new(),
            rejected: false,
            suggestion: None,
        }
    }

    /// Check if the input has focus.
    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// Focus the input, keeping its text.
    pub fn start(&mut self) {
        self.is_editing = true;
    }

    /// Add a character to the input.
    pub fn input(&mut self, c: char) {
        self.buffer.push(c);
        self.rejected = false;
    }

    /// Remove the last character from the input.
    pub fn backspace(&mut self) {
        self.buffer.pop();
        self.rejected = false;
    }

    /// Leave the input without searching.
    pub fn cancel(&mut self) {
        self.is_editing = false;
    }

    /// Replace the input text.
    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.rejected = false;
    }

    /// Empty the input and focus it.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.is_editing = true;
        self.rejected = false;
        self.suggestion = None;
    }

    /// Fill the input with the next preset term.
    pub fn cycle_suggestion(&mut self) {
        let next = self
            .suggestion
            .map_or(0, |idx| (idx + 1) % SUGGESTIONS.len());
        self.suggestion = Some(next);
        self.set(SUGGESTIONS[next]);
    }

    /// Whether the last submit was refused for a blank term.
    pub fn is_rejected(&self) -> bool {
        self.rejected
    }

    /// Take the current term for a search, or `None` when it is blank.
    ///
    /// A blank term leaves the input focused and marks it rejected.
    pub fn submit(&mut self) -> Option<String> {
        let term = self.buffer.trim();
        if term.is_empty() {
            self.is_editing = true;
            self.rejected = true;
            return None;
        }
        self.last_submitted = term.to_string();
        self.is_editing = false;
        self.rejected = false;
        Some(self.last_submitted.clone())
    }

    /// Current input text, trimmed.
    pub fn term(&self) -> &str {
        self.buffer.trim()
    }

    /// Raw input text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The last term that was searched.
    pub fn last_submitted(&self) -> &str {
        &self.last_submitted
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_submit_is_rejected() {
        let mut search = SearchInput::new();
        search.input(' ');
        search.input(' ');
        assert_eq!(search.submit(), None);
        assert!(search.is_editing());
        assert!(search.is_rejected());
        assert_eq!(search.last_submitted(), "");

        // typing again clears the rejection
        search.input('b');
        assert!(!search.is_rejected());
    }

    #[test]
    fn test_suggestions_cycle_and_wrap() {
        let mut search = SearchInput::new();
        search.cycle_suggestion();
        assert_eq!(search.buffer(), "bus");
        search.cycle_suggestion();
        assert_eq!(search.buffer(), "rail");

        for _ in 0..SUGGESTIONS.len() - 1 {
            search.cycle_suggestion();
        }
        assert_eq!(search.buffer(), "bus");
        assert_eq!(search.submit(), Some("bus".to_string()));
    }

    #[test]
    fn test_submit_trims() {
        let mut search = SearchInput::new();
        for c in " rail ".chars() {
            search.input(c);
        }
        assert_eq!(search.submit(), Some("rail".to_string()));
        assert!(!search.is_editing());
        assert_eq!(search.buffer(), " rail ");
        assert_eq!(search.term(), "rail");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut search = SearchInput::new();
        search.set("bus");
        search.backspace();
        assert_eq!(search.buffer(), "bu");
        search.cancel();
        search.clear();
        assert_eq!(search.buffer(), "");
        assert!(search.is_editing());
    }
}
