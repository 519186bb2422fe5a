use crate::config::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// One request sent to the server under test.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestCase {
    pub path: String,
    pub expected_status: u16,
    pub description: String,
}

impl TestCase {
    pub fn new(path: &str, expected_status: u16, description: &str) -> TestCase {
        TestCase {
            path: path.to_string(),
            expected_status,
            description: description.to_string(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::RelativeCasePath {
                path: self.path.clone(),
                description: self.description.clone(),
            });
        }

        if !is_http_status(self.expected_status) {
            return Err(ConfigError::InvalidExpectedStatus {
                status: self.expected_status,
                description: self.description.clone(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {:<28} {}",
            self.expected_status, self.path, self.description
        )
    }
}

pub fn is_http_status(status: u16) -> bool {
    (100..=599).contains(&status)
}

// (path, expected status, description)
const DEFAULT_CASES: [(&str, u16, &str); 14] = [
    ("/", 200, "Root path should serve index.html"),
    ("/index.html", 200, "Direct index.html access"),
    ("/app.js", 200, "App.js file access"),
    ("/styles.css", 200, "CSS file access"),
    // traversal attempts must all be blocked
    ("/../package.json", 403, "Basic path traversal (../)"),
    ("/..%2fpackage.json", 403, "URL encoded path traversal"),
    ("/....//package.json", 403, "Double dot path traversal"),
    ("/../server.js", 403, "Access server.js via traversal"),
    ("/../../etc/passwd", 403, "System file access attempt"),
    ("/data/../server.js", 403, "Traversal within allowed dir"),
    ("/index.html%00.txt", 403, "Null byte injection"),
    ("/etc/passwd", 403, "Absolute path to system file"),
    ("/root/.bashrc", 403, "Absolute path to root file"),
    // a missing file is not found, not forbidden
    ("/nonexistent-file-12345.js", 404, "Non-existent file"),
];

pub fn default_cases() -> Vec<TestCase> {
    DEFAULT_CASES
        .iter()
        .map(|(path, status, description)| TestCase::new(path, *status, description))
        .collect()
}

#[derive(Debug, Deserialize)]
struct CasesFile {
    #[serde(rename = "case", default)]
    cases: Vec<TestCase>,
}

pub fn parse_cases(content: &str, origin: &Path) -> Result<Vec<TestCase>, ConfigError> {
    let file: CasesFile = toml::from_str(content).map_err(|source| ConfigError::InvalidCasesFile {
        path: origin.to_path_buf(),
        source,
    })?;

    if file.cases.is_empty() {
        return Err(ConfigError::NoCases(origin.to_path_buf()));
    }

    for case in &file.cases {
        case.validate()?;
    }

    Ok(file.cases)
}

pub fn load_cases(path: &Path) -> Result<Vec<TestCase>, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ConfigError::UnreadableCasesFile {
            path: path.to_path_buf(),
            source,
        })?;

    parse_cases(&content, path)
}
