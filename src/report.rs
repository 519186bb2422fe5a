use crate::case::TestCase;
use crate::outcome::{CaseResult, Outcome, Summary};
use std::fmt;

pub const RULE: &str = "============================================================";

impl fmt::Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.outcome {
            Outcome::Passed { actual } | Outcome::Mismatched { actual, .. } => {
                let marker = if self.outcome.is_pass() {
                    "✅ PASS"
                } else {
                    "❌ FAIL"
                };

                writeln!(f, "{} - {}", marker, self.description)?;
                writeln!(f, "       URL: {}", self.url)?;
                writeln!(f, "       Expected: {}, Got: {}", self.expected_status, actual)
            }
            Outcome::TransportError(cause) => {
                writeln!(f, "❌ ERROR - {}: {}", self.description, cause)?;
                writeln!(f, "       URL: {}", self.url)?;
                writeln!(f, "       Expected: {}, Got: no response", self.expected_status)
            }
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        write!(f, "Results: {} passed, {} failed", self.passed, self.failed)?;
        if self.errored > 0 {
            write!(f, " ({} without response)", self.errored)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;

        if self.all_passed() {
            writeln!(
                f,
                "\n🎉 All tests passed! Path traversal vulnerability is fixed."
            )
        } else {
            writeln!(
                f,
                "\n⚠️  {} test(s) failed. Review the output above.",
                self.failed
            )
        }
    }
}

pub fn case_table(cases: &[TestCase]) -> String {
    cases.iter().map(|case| format!("{}\n", case)).collect()
}
