//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging with a default filter level.
///
/// `RUST_LOG` overrides the default; `RUST_LOG=restcall=debug` shows every
/// dispatched request.
pub fn init() {
    let env = Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
}

/// Like [`init`], but safe to call more than once (useful from tests).
pub fn try_init() -> bool {
    let env = Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).try_init().is_ok()
}
