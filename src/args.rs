use serde::Deserialize;

pub const USAGE: &str = "
Path traversal smoke test for a static file server.

Usage:
  traversal_check [--base-url=<base-url>] [--working-directory=<working-directory>] [--cases-file=<cases-file>] [--probe-timeout=<probe-timeout>] [--request-timeout=<request-timeout>] [--start-command=<start-command>]
  traversal_check list [--cases-file=<cases-file>]
  traversal_check (-h | --help)
  traversal_check --version

Options:
  -h --help             Show this screen.
  --version             Show version.
  --base-url=<base-url>                     Server under test, falls back to TRAVERSAL_CHECK_BASE_URL.
  --working-directory=<working-directory>   Directory entered before the run.
  --cases-file=<cases-file>                 TOML file replacing the built-in cases.
  --probe-timeout=<probe-timeout>           Seconds to wait for the liveness probe.
  --request-timeout=<request-timeout>       Seconds to wait for each case.
  --start-command=<start-command>           Command suggested when the server is down.
";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Args {
    pub flag_base_url: Option<String>,
    pub flag_working_directory: Option<String>,
    pub flag_cases_file: Option<String>,
    pub flag_probe_timeout: Option<u64>,
    pub flag_request_timeout: Option<u64>,
    pub flag_start_command: Option<String>,
    pub cmd_list: bool,
}
