use log::{info, warn};
use smtp_plain_sender::cli_parser::{
    config_file, message_from_arguments, parse_cli_parameters, strict_configuration,
};
use smtp_plain_sender::configuration::SmtpConfiguration;
use smtp_plain_sender::log_functions::{init_logging, recipient_summary};
use smtp_plain_sender::mail_plain_auth::SendEMail;
use std::path::Path;

fn main() {
    init_logging();

    // parse cli parameters and load the configuration
    let clap_arg_matches = parse_cli_parameters();
    let config_file = config_file(&clap_arg_matches);
    let smtp_configuration = match SmtpConfiguration::read_from_file(Path::new(&config_file))
        .and_then(|c| {
            if strict_configuration(&clap_arg_matches) {
                c.pre_flight_check()?;
            }
            Ok(c)
        }) {
        Err(e) => {
            warn!("Cannot load SMTP configuration from {}: {}", &config_file, &e);
            println!("Failed to load configuration: {}", e);
            return;
        }
        Ok(c) => c,
    };

    let email_message = message_from_arguments(&clap_arg_matches, &smtp_configuration);
    info!(
        "sending '{}' to {}",
        &email_message.subject,
        recipient_summary(&email_message.to)
    );

    // the outcome is only reported as text, the exit status stays 0
    if let Err(e) = smtp_configuration.send_mail(&email_message) {
        println!("Failed to send email: {}", e);
        return;
    }
    println!("Email sent successfully!");
}
