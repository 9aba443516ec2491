//! Source of the `Authorization` header value.

/// Supplies the authorization value sent with authenticated requests.
///
/// The value is opaque to the client: it is forwarded verbatim as the
/// `Authorization` header and never parsed or validated.
pub trait CredentialProvider: Send + Sync {
    /// Returns the header value, or `None` to send the request unauthenticated.
    fn authorization(&self) -> Option<String>;
}

/// Provider for anonymous use (public survey submissions, login).
pub struct NoCredential;

impl CredentialProvider for NoCredential {
    fn authorization(&self) -> Option<String> {
        None
    }
}

impl CredentialProvider for String {
    fn authorization(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.clone())
        }
    }
}

impl CredentialProvider for Option<String> {
    fn authorization(&self) -> Option<String> {
        self.as_ref().and_then(|s| s.authorization())
    }
}
