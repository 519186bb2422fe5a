#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Top level directories a patched server refuses to even look up.
const SYSTEM_DIRECTORIES: [&str; 6] = ["etc", "root", "proc", "home", "usr", "var"];

/// `/slow` answers after this delay, whatever the mode.
pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ServerMode {
    Patched,
    Vulnerable,
    /// Answers 500 to everything, the server is up but broken.
    Failing,
}

#[derive(Clone)]
struct Fixture {
    mode: ServerMode,
    public_dir: PathBuf,
}

/// A static file server serving `<tmp>/public`, with `package.json` and
/// `server.js` one level above, like a node app checkout.
pub struct FixtureServer {
    pub base_url: String,
    handle: ServerHandle,
    _root: TempDir,
}

impl FixtureServer {
    pub fn start(mode: ServerMode) -> FixtureServer {
        let root = TempDir::new().unwrap();
        root.child("package.json").write_str("{\"name\": \"group-buying\"}").unwrap();
        root.child("server.js").write_str("// server").unwrap();
        root.child("public/index.html").write_str("<html></html>").unwrap();
        root.child("public/app.js").write_str("console.log('app');").unwrap();
        root.child("public/styles.css").write_str("body {}").unwrap();

        let fixture = Fixture {
            mode,
            public_dir: root.path().join("public"),
        };

        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            actix_rt::System::new().block_on(async move {
                let server = HttpServer::new(move || {
                    App::new()
                        .app_data(web::Data::new(fixture.clone()))
                        .default_service(web::to(serve))
                })
                .workers(1)
                .bind(("127.0.0.1", 0))
                .expect("fixture server should bind");

                let port = server.addrs()[0].port();
                let server = server.run();

                tx.send((port, server.handle())).unwrap();
                server.await.unwrap();
            })
        });

        let (port, handle) = rx.recv().expect("fixture server should start");

        FixtureServer {
            base_url: format!("http://127.0.0.1:{}", port),
            handle,
            _root: root,
        }
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        // the stop command is sent eagerly, no need to await it
        drop(self.handle.stop(false));
    }
}

async fn serve(req: HttpRequest, fixture: web::Data<Fixture>) -> HttpResponse {
    // the raw path, as sent on the wire
    let raw_path = req.uri().path();

    if raw_path == "/slow" {
        actix_rt::time::sleep(SLOW_RESPONSE_DELAY).await;
        return HttpResponse::new(StatusCode::OK);
    }

    let status = match fixture.mode {
        ServerMode::Patched => patched_lookup(&fixture.public_dir, raw_path),
        ServerMode::Vulnerable => read_status(&fixture.public_dir, raw_path),
        ServerMode::Failing => StatusCode::INTERNAL_SERVER_ERROR,
    };

    HttpResponse::new(status)
}

fn patched_lookup(public_dir: &Path, raw_path: &str) -> StatusCode {
    let lowered = raw_path.to_ascii_lowercase();

    if raw_path.contains("..")
        || lowered.contains("%2e")
        || lowered.contains("%2f")
        || lowered.contains("%5c")
        || lowered.contains("%00")
    {
        return StatusCode::FORBIDDEN;
    }

    let first_segment = raw_path.trim_start_matches('/').split('/').next().unwrap_or("");
    if SYSTEM_DIRECTORIES.contains(&first_segment) {
        return StatusCode::FORBIDDEN;
    }

    read_status(public_dir, raw_path)
}

fn read_status(public_dir: &Path, raw_path: &str) -> StatusCode {
    let relative = match raw_path {
        "/" => "index.html",
        p => p.trim_start_matches('/'),
    };

    if public_dir.join(relative).is_file() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

/// An url nothing listens on.
pub fn unreachable_base_url() -> String {
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    format!("http://127.0.0.1:{}", port)
}

pub fn traversal_check(base_url: &str) -> Command {
    let mut command = Command::cargo_bin("traversal_check").unwrap();
    command
        .arg(format!("--base-url={}", base_url))
        .arg("--request-timeout=2")
        .arg("--probe-timeout=1");
    command
}
