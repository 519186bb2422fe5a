extern crate env_logger;
extern crate log;
extern crate traversal_check;

use docopt::Docopt;
use log::{error, info};
use std::env;
use std::process;
use traversal_check::args::{Args, USAGE};
use traversal_check::config::Config;
use traversal_check::report::case_table;
use traversal_check::EXIT_CONFIG_ERROR;

fn main() {
    env_logger::init();

    let sentry_guard = init_sentry();

    let docopt: Docopt = Docopt::new(USAGE)
        .unwrap_or_else(|e| e.exit())
        .version(Some(env!("CARGO_PKG_VERSION").to_string()));

    let args: Args = docopt.deserialize().unwrap_or_else(|e| e.exit());

    let config = match Config::create_config(&args).and_then(|config| {
        if !args.cmd_list {
            config.enter_working_directory()?;
        }
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            sentry::capture_error(&e);
            eprintln!("traversal_check: {}", e);
            exit(EXIT_CONFIG_ERROR, sentry_guard);
        }
    };

    if args.cmd_list {
        print!("{}", case_table(&config.cases));
        return;
    }

    let status = actix_rt::System::new().block_on(traversal_check::run(&config));

    exit(status.exit_code(), sentry_guard);
}

fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let url = env::var("TRAVERSAL_CHECK_SENTRY_URL").ok()?;

    match url.parse::<sentry::types::Dsn>() {
        Ok(dsn) => {
            info!("Sentry will be notified on {}", url);
            let mut options = sentry::ClientOptions::default();
            options.dsn = Some(dsn);
            Some(sentry::init(options))
        }
        Err(e) => {
            error!("ignoring invalid TRAVERSAL_CHECK_SENTRY_URL: {}", e);
            None
        }
    }
}

// process::exit skips destructors, the guard is dropped first to flush pending events
fn exit(code: i32, sentry_guard: Option<sentry::ClientInitGuard>) -> ! {
    drop(sentry_guard);
    process::exit(code)
}
