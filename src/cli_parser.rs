use crate::configuration::SmtpConfiguration;
use crate::mail_message::EMailMessage;
use crate::DEFAULT_CONFIG_FILE;
use crate::PROGRAM_AUTHORS;
use crate::PROGRAM_DESCRIPTION;
use crate::PROGRAM_NAME;
use crate::PROGRAM_VERSION;

pub const ARG_CONFIG_FILE: &str = "configfile";
pub const ARG_MAIL_FROM: &str = "from";
pub const ARG_MAIL_TO: &str = "to";
pub const ARG_MAIL_SUBJECT: &str = "subject";
pub const ARG_MAIL_BODY: &str = "body";
pub const ARG_STRICT: &str = "strict";

pub const DEFAULT_MAIL_TO: &str = "recipient@example.com";
pub const DEFAULT_MAIL_SUBJECT: &str = "Rust SMTP test mail";
pub const DEFAULT_MAIL_BODY: &str = "This is a test mail sent with Rust.";

/// Build the command line interface with help of clap.
pub fn build_cli() -> clap::Command {
    clap::Command::new(PROGRAM_NAME)
        .version(PROGRAM_VERSION)
        .author(PROGRAM_AUTHORS)
        .about(PROGRAM_DESCRIPTION)
        .arg(
            clap::Arg::new(ARG_CONFIG_FILE)
                .short('c')
                .long("config-file")
                .value_name("json configuration file")
                .help("json file with server, port, username and password of the SMTP server")
                .num_args(1)
                .default_value(DEFAULT_CONFIG_FILE),
        )
        .arg(
            clap::Arg::new(ARG_MAIL_FROM)
                .short('f')
                .long("from")
                .value_name("address")
                .help("sender address, defaults to the username of the configuration file")
                .num_args(1),
        )
        .arg(
            clap::Arg::new(ARG_MAIL_TO)
                .short('t')
                .long("to")
                .value_name("address")
                .help("recipient address, may be given more than once")
                .action(clap::ArgAction::Append)
                .default_value(DEFAULT_MAIL_TO),
        )
        .arg(
            clap::Arg::new(ARG_MAIL_SUBJECT)
                .short('s')
                .long("subject")
                .value_name("text")
                .help("subject line of the mail")
                .num_args(1)
                .default_value(DEFAULT_MAIL_SUBJECT),
        )
        .arg(
            clap::Arg::new(ARG_MAIL_BODY)
                .short('b')
                .long("body")
                .value_name("text")
                .help("body text of the mail, sent as it is")
                .num_args(1)
                .default_value(DEFAULT_MAIL_BODY),
        )
        .arg(
            clap::Arg::new(ARG_STRICT)
                .long("strict")
                .help("reject a configuration with empty server, username or port 0")
                .action(clap::ArgAction::SetTrue),
        )
        .after_help(r##"Without any parameters smtp_config.json is read from the working directory."##)
}

/// Parse the command line parameters with help of clap.
pub fn parse_cli_parameters() -> clap::ArgMatches {
    build_cli().get_matches()
}

/// get the path of the configuration file
pub fn config_file(arg_matches: &clap::ArgMatches) -> String {
    arg_matches
        .get_one::<String>(ARG_CONFIG_FILE)
        .map(String::to_string)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
}

/// check if the optional pre flight check should run
pub fn strict_configuration(arg_matches: &clap::ArgMatches) -> bool {
    arg_matches.get_flag(ARG_STRICT)
}

/// Build the message record from the command line parameters.
/// Without a sender address the username of the loaded
/// configuration is used.
pub fn message_from_arguments(
    arg_matches: &clap::ArgMatches,
    smtp_configuration: &SmtpConfiguration,
) -> EMailMessage {
    let mail_from = arg_matches
        .get_one::<String>(ARG_MAIL_FROM)
        .unwrap_or(&smtp_configuration.username);
    let mail_to: Vec<String> = arg_matches
        .get_many::<String>(ARG_MAIL_TO)
        .map(|values| values.cloned().collect())
        .unwrap_or_else(|| vec![DEFAULT_MAIL_TO.to_string()]);
    let mail_subject = arg_matches
        .get_one::<String>(ARG_MAIL_SUBJECT)
        .map(String::as_str)
        .unwrap_or(DEFAULT_MAIL_SUBJECT);
    let mail_body = arg_matches
        .get_one::<String>(ARG_MAIL_BODY)
        .map(String::as_str)
        .unwrap_or(DEFAULT_MAIL_BODY);
    EMailMessage::new(mail_from, mail_to, mail_subject, mail_body)
}
