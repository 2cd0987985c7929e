use secstr::SecStr;

/// This trait is used to hand the stored
/// `SecStr` password to the SMTP credentials
pub trait SecureStringToUnsecureString {
    fn to_unsecure_string(&self) -> std::string::String;
}

/// Converts `SecStr` into unsecure `String`
///
/// # Returns
///
/// - `String`: unsecure representation of the stored string,
///   invalid UTF-8 sequences are replaced.
impl SecureStringToUnsecureString for SecStr {
    fn to_unsecure_string(&self) -> std::string::String {
        String::from_utf8_lossy(self.unsecure()).into_owned()
    }
}
