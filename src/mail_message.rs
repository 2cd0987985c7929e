use crate::error::SmtpSenderError;

/// Holds the single message that is
/// submitted during one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EMailMessage {
    pub from: String,
    /// All entries are used as envelope recipients,
    /// only the first one shows up in the `To` header.
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl EMailMessage {
    pub fn new(from: &str, to: Vec<String>, subject: &str, body: &str) -> EMailMessage {
        EMailMessage {
            from: from.to_string(),
            to,
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    /// Build the text that is transmitted after the DATA command.
    ///
    /// Headers are `From`, `To` (first recipient only) and `Subject`,
    /// followed by an empty line and the body as it is. No encoding,
    /// no line wrapping, no charset declaration.
    pub fn format_payload(&self) -> String {
        let primary_recipient = self.to.first().map(String::as_str).unwrap_or_default();
        let mut payload = format!("From: {}\r\n", self.from);
        payload.push_str(&format!("To: {}\r\n", primary_recipient));
        payload.push_str(&format!("Subject: {}\r\n\r\n", self.subject));
        payload.push_str(&self.body);
        payload
    }
}

/// Used to add details to envelope address errors
#[derive(Debug)]
pub enum ParseMailAddressErrorContext {
    FromAddress,
    ToAddress,
}

/// check an envelope address before it is written into a
/// MAIL FROM or RCPT TO command line.
///
/// The address is sent as it is, only line breaks are rejected
/// because they would end the command early. A plain account
/// name without `@` is a valid sender.
///
/// # Arguments
///
/// - `address`:         address for the SMTP envelope
/// - `error_context`:   context that shows what the address should be used for
///   (envelope sender or recipient)
pub fn check_envelope_address(
    address: &str,
    error_context: ParseMailAddressErrorContext,
) -> Result<&str, SmtpSenderError> {
    if address.contains(['\r', '\n']) {
        return Err(SmtpSenderError::SubmissionFailure(format!(
            "address contains CR or LF <{}>, {:?}",
            address.escape_debug(),
            error_context
        )));
    }
    Ok(address)
}

/// This trait is a contract for implementing different
/// flavors of `send_mail()`.
/// The default implementation authenticates with AUTH PLAIN
/// and does not use TLS.
pub trait SendEMail {
    /// submits the message in one blocking attempt, there is no retry.
    ///
    /// # Arguments
    ///
    /// - `message`:    sender, recipients, subject and body of the mail
    fn send_mail(&self, message: &EMailMessage) -> Result<(), SmtpSenderError>;
}
