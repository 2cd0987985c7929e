use crate::configuration::SmtpConfiguration;
use crate::error::SmtpSenderError;
pub use crate::mail_message::{
    check_envelope_address, EMailMessage, ParseMailAddressErrorContext, SendEMail,
};
use crate::unsecure_string::SecureStringToUnsecureString;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::SmtpConnection;
use lettre::transport::smtp::commands::Data;
use lettre::transport::smtp::extension::ClientId;
use lettre::transport::smtp::response::Response;
use log::{debug, info, warn};
use std::fmt;

/// `MAIL FROM` with the sender as it is, lettre's own command
/// only takes parsed `user@domain` addresses.
struct MailFrom<'a>(&'a str);

impl fmt::Display for MailFrom<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MAIL FROM:<{}>\r\n", self.0)
    }
}

/// `RCPT TO` with the recipient as it is
struct RcptTo<'a>(&'a str);

impl fmt::Display for RcptTo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RCPT TO:<{}>\r\n", self.0)
    }
}

/// authenticate, hand over the envelope and write the payload
/// on an established connection.
fn submit_message(
    connection: &mut SmtpConnection,
    credentials: &Credentials,
    mail_from: &str,
    rcpt_to: &[&str],
    payload: &[u8],
) -> Result<Response, lettre::transport::smtp::Error> {
    connection.auth(&[Mechanism::Plain], credentials)?;
    connection.command(MailFrom(mail_from))?;
    for recipient in rcpt_to {
        connection.command(RcptTo(*recipient))?;
    }
    connection.command(Data)?;
    // written without looking at 8BITMIME, the payload is not encoded
    connection.message(payload)
}

impl SendEMail for SmtpConfiguration {
    /// The `SendEMail` trait is a contract
    /// for implementing different flavors of `send_mail()`.
    /// This is the default implementation that sends
    /// credentials with AUTH PLAIN and does not use TLS.
    fn send_mail(&self, message: &EMailMessage) -> Result<(), SmtpSenderError> {
        if message.to.is_empty() {
            return Err(SmtpSenderError::SubmissionFailure(
                "message has no recipients".into(),
            ));
        }
        let mail_from =
            check_envelope_address(&message.from, ParseMailAddressErrorContext::FromAddress)?;
        let rcpt_to = message
            .to
            .iter()
            .map(|r| check_envelope_address(r, ParseMailAddressErrorContext::ToAddress))
            .collect::<Result<Vec<&str>, SmtpSenderError>>()?;
        let payload = message.format_payload();

        info!("submitting mail to {}", self.submission_target());
        debug!(
            "envelope from {}, {} recipient(s), {} payload bytes",
            mail_from,
            rcpt_to.len(),
            payload.len()
        );

        let credentials = Credentials::new(
            self.username.clone(),
            self.password.to_unsecure_string(),
        );
        // no timeout, no tls
        let mut connection = SmtpConnection::connect(
            (self.server.as_str(), self.port),
            None,
            &ClientId::default(),
            None,
            None,
        )
        .map_err(|e| {
            warn!("cannot connect to {}: {}", self.submission_target(), &e);
            SmtpSenderError::from(e)
        })?;
        match submit_message(
            &mut connection,
            &credentials,
            mail_from,
            &rcpt_to,
            payload.as_bytes(),
        ) {
            Ok(response) => {
                info!(
                    "mail accepted by {}: {}",
                    self.submission_target(),
                    response.code()
                );
                connection.quit()?;
                Ok(())
            }
            Err(e) => {
                warn!("submission to {} failed: {}", self.submission_target(), &e);
                connection.abort();
                Err(e.into())
            }
        }
    }
}
