use crate::error::SmtpSenderError;
use log::{debug, info};
use secstr::SecStr;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Holds the deserialized entries of the json file
/// with the SMTP server connection details.
///
/// Missing keys and keys with a `null` value are not an
/// error, they take their default value. Unknown keys are ignored.
#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct SmtpConfiguration {
    pub server: String,
    pub port: u16,
    pub username: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecStr,
}

impl Default for SmtpConfiguration {
    fn default() -> Self {
        SmtpConfiguration {
            server: String::new(),
            port: 0,
            username: String::new(),
            password: SecStr::from(""),
        }
    }
}

/// The password is stored as `SecStr` so that it is zeroed
/// on drop and never shows up in debug output.
fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecStr, D::Error>
where
    D: Deserializer<'de>,
{
    let plain = String::deserialize(deserializer)?;
    Ok(SecStr::from(plain))
}

/// Loads a json file and deserializes it into an
/// instance of SmtpConfiguration
impl SmtpConfiguration {
    /// Read the SMTP configuration from a json file.
    ///
    /// The file handle is closed on every return path, the content
    /// is read into memory completely before it is parsed.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SmtpSenderError> {
        debug!("loading configuration from {}", path.as_ref().display());
        let mut file = File::open(&path).map_err(SmtpSenderError::OpenFailure)?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(SmtpSenderError::ReadFailure)?;
        // only a json object is accepted, serde would fill the struct from an array
        let mut entries: Map<String, Value> = serde_json::from_str(&content)?;
        // `null` is treated like a missing key
        entries.retain(|_, value| !value.is_null());
        let parsed_config: SmtpConfiguration = serde_json::from_value(Value::Object(entries))?;
        info!(
            "loaded configuration for {}",
            parsed_config.submission_target()
        );
        Ok(parsed_config)
    }

    /// Optional check after the configuration file has been loaded.
    /// The parser itself is permissive, this catches the values that
    /// are silently left empty by missing keys.
    pub fn pre_flight_check(&self) -> Result<(), SmtpSenderError> {
        if self.server.trim().is_empty() {
            return Err(SmtpSenderError::InvalidConfiguration(
                "server must not be empty".into(),
            ));
        }
        if self.port == 0 {
            return Err(SmtpSenderError::InvalidConfiguration(
                "port must be in the range 1-65535".into(),
            ));
        }
        if self.username.is_empty() {
            return Err(SmtpSenderError::InvalidConfiguration(
                "username must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// get the `<server>:<port>` address the mail is submitted to
    pub fn submission_target(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}
