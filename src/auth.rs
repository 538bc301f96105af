//! Authentication boundary.
//!
//! The pipeline treats the verdict as opaque: a request credential goes in,
//! yes/no comes out. Token issuance lives in an external service.

/// Yes/no verdict for a caller-supplied credential.
pub trait Authenticator: Send + Sync {
    fn verify(&self, credential: Option<&str>) -> bool;
}

/// Reference implementation: compares the bearer token against a single
/// configured API secret.
pub struct ApiTokenAuthenticator {
    api_token: String,
}

impl ApiTokenAuthenticator {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }
}

impl Authenticator for ApiTokenAuthenticator {
    fn verify(&self, credential: Option<&str>) -> bool {
        match credential {
            Some(token) => token == self.api_token,
            None => false,
        }
    }
}
