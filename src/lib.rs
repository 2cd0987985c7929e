// tell the rust compiler which modules we have in extra files
pub mod cli_parser;
pub mod configuration;
pub mod error;
pub mod log_functions;
pub mod mail_message;
pub mod mail_plain_auth;
pub mod unsecure_string;

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROGRAM_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const PROGRAM_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// configuration file that is read from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "smtp_config.json";
