//! Email capture gate.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Check an address against `local@domain.tld` shape with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Why a submitted address was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// Nothing was entered.
    Empty,
    /// The address does not look like an email address.
    Invalid,
}

impl GateRejection {
    /// Message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            GateRejection::Empty => "Please enter your email address.",
            GateRejection::Invalid => "Please enter a valid email address.",
        }
    }
}

/// Mandatory email step in front of every export.
#[derive(Debug, Default)]
pub struct EmailGate {
    visible: bool,
    input: String,
    rejection: Option<GateRejection>,
}

impl EmailGate {
    /// Create a closed gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the gate is open.
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Open the gate.
    pub fn open(&mut self) {
        self.visible = true;
        self.rejection = None;
    }

    /// Close the gate and clear its input.
    pub fn close(&mut self) {
        self.visible = false;
        self.input.clear();
        self.rejection = None;
    }

    /// Add a character to the input.
    pub fn input(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove the last character from the input.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Current input text.
    pub fn value(&self) -> &str {
        &self.input
    }

    /// Last rejection, if the previous submit failed.
    pub fn rejection(&self) -> Option<GateRejection> {
        self.rejection
    }

    /// Validate the input. On success returns the trimmed address; the gate
    /// stays open either way until [`EmailGate::close`].
    pub fn submit(&mut self) -> Result<String, GateRejection> {
        let email = self.input.trim();
        let verdict = if email.is_empty() {
            Err(GateRejection::Empty)
        } else if !is_valid_email(email) {
            Err(GateRejection::Invalid)
        } else {
            Ok(email.to_string())
        };
        self.rejection = verdict.as_ref().err().copied();
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("someone@example.com"));
        assert!(is_valid_email("  a.b+c@sub.example.org "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("sp ace@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_rejected_submit_keeps_gate_open() {
        let mut gate = EmailGate::new();
        gate.open();
        for c in "not-an-email".chars() {
            gate.input(c);
        }

        assert_eq!(gate.submit(), Err(GateRejection::Invalid));
        assert!(gate.is_open());
        assert_eq!(gate.value(), "not-an-email");
        assert_eq!(
            gate.rejection().map(GateRejection::message),
            Some("Please enter a valid email address.")
        );
    }

    #[test]
    fn test_empty_submit() {
        let mut gate = EmailGate::new();
        gate.open();
        gate.input(' ');
        assert_eq!(gate.submit(), Err(GateRejection::Empty));
    }

    #[test]
    fn test_accepted_submit_then_close() {
        let mut gate = EmailGate::new();
        gate.open();
        for c in " me@example.com ".chars() {
            gate.input(c);
        }
        assert_eq!(gate.submit(), Ok("me@example.com".to_string()));
        assert_eq!(gate.rejection(), None);

        gate.close();
        assert!(!gate.is_open());
        assert_eq!(gate.value(), "");
    }
}
