use super::args;
use super::case::{default_cases, load_cases, TestCase};
use log::info;
use std::env::{self, VarError};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_START_COMMAND: &str = "node server.js";
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {source}")]
    InvalidBaseUrl { url: String, source: url::ParseError },
    #[error("base url {0:?} must be a plain http url without query or fragment")]
    UnsupportedBaseUrl(String),
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("unable to read cases file {path:?}: {source}")]
    UnreadableCasesFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid cases file {path:?}: {source}")]
    InvalidCasesFile {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("cases file {0:?} does not hold any [[case]]")]
    NoCases(PathBuf),
    #[error("case {description:?}: path {path:?} must start with '/'")]
    RelativeCasePath { path: String, description: String },
    #[error("case {description:?}: {status} is not an http status code")]
    InvalidExpectedStatus { status: u16, description: String },
    #[error("unable to enter working directory {path:?}: {source}")]
    WorkingDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base url without trailing slash, case paths are appended verbatim.
    pub base_url: String,
    pub working_directory: Option<PathBuf>,
    pub cases: Vec<TestCase>,
    pub probe_timeout: Duration,
    pub request_timeout: Duration,
    pub start_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            working_directory: None,
            cases: default_cases(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            start_command: DEFAULT_START_COMMAND.to_string(),
        }
    }
}

impl Config {
    pub fn create_config(args: &args::Args) -> Result<Config, ConfigError> {
        let default_config = Config::default();

        let base_url = match flag_or_env(&args.flag_base_url, "TRAVERSAL_CHECK_BASE_URL") {
            Some(url) => normalize_base_url(&url)?,
            None => default_config.base_url,
        };

        let working_directory =
            flag_or_env(&args.flag_working_directory, "TRAVERSAL_CHECK_WORKING_DIRECTORY")
                .map(PathBuf::from);

        let cases = match flag_or_env(&args.flag_cases_file, "TRAVERSAL_CHECK_CASES_FILE") {
            Some(path) => load_cases(&PathBuf::from(path))?,
            None => default_config.cases,
        };

        let probe_timeout = timeout(
            args.flag_probe_timeout,
            "--probe-timeout",
            "TRAVERSAL_CHECK_PROBE_TIMEOUT",
            default_config.probe_timeout,
        )?;

        let request_timeout = timeout(
            args.flag_request_timeout,
            "--request-timeout",
            "TRAVERSAL_CHECK_REQUEST_TIMEOUT",
            default_config.request_timeout,
        )?;

        let start_command = flag_or_env(&args.flag_start_command, "TRAVERSAL_CHECK_START_COMMAND")
            .unwrap_or(default_config.start_command);

        Ok(Config {
            base_url,
            working_directory,
            cases,
            probe_timeout,
            request_timeout,
            start_command,
        })
    }

    pub fn enter_working_directory(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.working_directory {
            env::set_current_dir(path).map_err(|source| ConfigError::WorkingDirectory {
                path: path.clone(),
                source,
            })?;
            info!("working directory set to {:?}", path);
        }

        Ok(())
    }

    pub fn url_for(&self, case: &TestCase) -> String {
        format!("{}{}", self.base_url, case.path)
    }
}

fn flag_or_env(flag: &Option<String>, var: &str) -> Option<String> {
    match flag {
        Some(value) => Some(value.clone()),
        None => env::var(var).ok().filter(|v| !v.is_empty()),
    }
}

fn timeout(
    flag: Option<u64>,
    flag_name: &'static str,
    var: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let (secs, name) = match flag {
        Some(secs) => (secs, flag_name),
        None => match env_seconds(var, env::var(var))? {
            Some(secs) => (secs, var),
            None => return Ok(default),
        },
    };

    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            name,
            value: secs.to_string(),
        });
    }

    Ok(Duration::from_secs(secs))
}

fn env_seconds(
    var: &'static str,
    lookup: Result<String, VarError>,
) -> Result<Option<u64>, ConfigError> {
    match lookup {
        Ok(value) => {
            let parsed = value.trim().parse::<u64>();
            match parsed {
                Ok(secs) => Ok(Some(secs)),
                Err(_) => Err(ConfigError::InvalidTimeout { name: var, value }),
            }
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidTimeout {
            name: var,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

// The parsed url is only used for validation: joining paths onto a `Url`
// would normalize the traversal sequences the cases rely on.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;

    // checked on the raw string too, `Url` lowercases the scheme it reports
    if !raw.starts_with("http://")
        || parsed.scheme() != "http"
        || parsed.host().is_none()
        || parsed.query().is_some()
        || parsed.fragment().is_some()
    {
        return Err(ConfigError::UnsupportedBaseUrl(raw.to_string()));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
