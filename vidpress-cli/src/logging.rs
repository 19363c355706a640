// vidpress-cli/src/logging.rs
//
// Logging setup and helpers. The application uses env_logger with the
// RUST_LOG environment variable (info by default, debug/trace for more).

use std::io::Write;

/// Initializes the env_logger backend with an info default and a terse
/// level-prefixed format.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}
