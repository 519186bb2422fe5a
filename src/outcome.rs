/// How many characters of a transport error are kept in the report.
pub const ERROR_MESSAGE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed { actual: u16 },
    Mismatched { expected: u16, actual: u16 },
    /// The request never produced a response: timeout, refused connection, bad url...
    TransportError(String),
}

impl Outcome {
    pub fn from_status(expected: u16, actual: u16) -> Outcome {
        if actual == expected {
            Outcome::Passed { actual }
        } else {
            Outcome::Mismatched { expected, actual }
        }
    }

    pub fn transport_error(message: &str) -> Outcome {
        Outcome::TransportError(truncate(message, ERROR_MESSAGE_MAX_CHARS))
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Passed { .. })
    }

    pub fn actual_status(&self) -> Option<u16> {
        match self {
            Outcome::Passed { actual } | Outcome::Mismatched { actual, .. } => Some(*actual),
            Outcome::TransportError(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub description: String,
    pub url: String,
    pub expected_status: u16,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    /// Every non passing case, transport errors included.
    pub failed: usize,
    pub errored: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Passed { .. } => self.passed += 1,
            Outcome::Mismatched { .. } => self.failed += 1,
            Outcome::TransportError(_) => {
                self.failed += 1;
                self.errored += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Keeps the first `max_chars` characters, never splitting one.
pub fn truncate(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
