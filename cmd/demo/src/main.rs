//! serror demo
//!
//! Runs a few requests against an in-memory user store and shows how a
//! transport layer consumes errors: the coder picks the HTTP status and the
//! exit code, the compact render goes to the client, the verbose render goes
//! to the log.
//!
//! # Usage
//!
//! ```text
//! serror-demo [seed.csv]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Log filter (default `info`)
//! - `SERROR_STACK=0` - Disable stack capture
//! - `SERROR_STACK_DEPTH=<n>` - Frames kept per trace

mod store;

use std::path::PathBuf;
use std::process::ExitCode;

use serror::config::{self, StackConfig};
use serror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use store::Store;

/// Status line a transport would send for this error.
fn http_status(err: &Error) -> u16 {
    serror::parse_coder(err).http_status()
}

/// 0 on success, 1 for client errors, 2 for server errors.
fn exit_code(err: &Error) -> u8 {
    match http_status(err) {
        400..=499 => 1,
        _ => 2,
    }
}

fn respond(request: &str, result: serror::Result<String>) -> Option<Error> {
    match result {
        Ok(body) => {
            info!(request, status = 200, "{}", body);
            None
        }
        Err(err) => {
            let status = http_status(&err);
            if status >= 500 {
                error!(request, status, "{:#}", err);
            } else {
                warn!(request, status, "{}", err);
                debug!(request, "{:#}", err);
            }
            Some(err)
        }
    }
}

fn run(store: &mut Store, seed: Option<PathBuf>) -> Vec<Error> {
    let mut failed = Vec::new();

    if let Some(path) = seed {
        let outcome = store
            .load_seed(&path)
            .map(|n| format!("loaded {} users from {}", n, path.display()));
        failed.extend(respond("POST /seed", outcome));
    }

    let requests: [(&str, Box<dyn FnOnce(&mut Store) -> serror::Result<String>>); 5] = [
        ("POST /users/jane", Box::new(|s: &mut Store| s.create("jane", 30).map(|u| format!("created {:?}", u)))),
        ("GET /users/jane", Box::new(|s: &mut Store| s.get("jane").map(|u| format!("{:?}", u)))),
        ("GET /users/bob", Box::new(|s: &mut Store| s.get("bob").map(|u| format!("{:?}", u)))),
        ("POST /users/", Box::new(|s: &mut Store| s.create("", -4).map(|u| format!("created {:?}", u)))),
        ("POST /users/jane", Box::new(|s: &mut Store| s.create("jane", 31).map(|u| format!("created {:?}", u)))),
    ];
    for (request, handler) in requests {
        failed.extend(respond(request, handler(store)));
    }

    failed
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    if !config::install(StackConfig::from_env()) {
        warn!("stack config already installed; keeping it");
    }
    let cfg = config::current();
    debug!(enabled = cfg.enabled, max_depth = cfg.max_depth, "stack capture");

    let seed = std::env::args_os().nth(1).map(PathBuf::from);
    let mut store = Store::new();
    let failed = run(&mut store, seed);

    info!(users = store.len(), failures = failed.len(), "done");

    let code = failed.iter().map(exit_code).max().unwrap_or(0);
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serror::codes::{ERR_INTERNAL_SERVER, ERR_NOT_FOUND};

    #[test]
    fn exit_codes_follow_status() {
        assert_eq!(exit_code(&serror::new_with_code(ERR_NOT_FOUND, "x")), 1);
        assert_eq!(exit_code(&serror::new_with_code(ERR_INTERNAL_SERVER, "x")), 2);
        assert_eq!(exit_code(&serror::new("uncategorized")), 2);
    }

    #[test]
    fn outer_coder_picks_status() {
        let err = serror::new_with_code(ERR_NOT_FOUND, "row missing").with_code(ERR_INTERNAL_SERVER);
        assert_eq!(http_status(&err), 500);
    }

    #[test]
    fn scripted_requests() {
        let mut store = Store::new();
        let failed = run(&mut store, None);
        let statuses: Vec<u16> = failed.iter().map(http_status).collect();
        assert_eq!(statuses, [404, 422, 409]);
        assert_eq!(store.len(), 1);
    }
}
