use std::io::Write;

/// Set up env_logger, it is configured via the RUST_LOG environment variable.
/// Log lines go to stderr so that stdout only carries the outcome of the run.
pub fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        #[cfg(debug_assertions)]
        std::env::set_var("RUST_LOG", "debug");
        #[cfg(not(debug_assertions))]
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

/// list the recipients for a log line,
/// the header only ever shows the first one.
#[inline]
pub fn recipient_summary(recipients: &[String]) -> String {
    match recipients {
        [] => "no recipients".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (+{} envelope only)", first, rest.len()),
    }
}
