pub mod args;
pub mod case;
pub mod config;
pub mod outcome;
pub mod probe;
pub mod report;
pub mod runner;

use config::Config;
use log::{info, warn};

/// Exit code used when the configuration cannot be resolved.
pub const EXIT_CONFIG_ERROR: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    AllPassed,
    SomeFailed,
    ServerUnreachable,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::AllPassed => 0,
            RunStatus::SomeFailed => 1,
            RunStatus::ServerUnreachable => 2,
        }
    }
}

/// Probes the server, then runs every case in order and prints the report.
///
/// Must be awaited inside an actix system, the http client is not `Send`.
pub async fn run(config: &Config) -> RunStatus {
    println!("{}", report::RULE);
    println!("Path Traversal Vulnerability Test");
    println!("{}", report::RULE);

    println!("\n🚀 Checking server at {}...", config.base_url);

    let client = runner::build_client(config);

    if let Err(e) = probe::check_liveness(&client, config).await {
        warn!("liveness probe on {} failed: {}", config.base_url, e);
        println!("Please start the server manually: {}", config.start_command);
        return RunStatus::ServerUnreachable;
    }

    println!("Server is already running");
    println!("\n🧪 Running tests...\n");

    let run = runner::run_cases(&client, config).await;

    info!(
        "{} cases run: {} passed, {} failed ({} transport errors)",
        run.summary.total(),
        run.summary.passed,
        run.summary.failed,
        run.summary.errored
    );

    print!("{}", run.summary);

    if run.summary.all_passed() {
        RunStatus::AllPassed
    } else {
        RunStatus::SomeFailed
    }
}
