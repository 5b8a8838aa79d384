use super::AccessToken;
use crate::error::RouteRegistrationError;

/// produces a fresh bearer token on every call. implementations do not
/// cache; the batch asks for a new token before each request.
pub trait TokenSource {
    fn fetch_token(&self) -> Result<AccessToken, RouteRegistrationError>;

    /// human-readable description for log lines.
    fn describe(&self) -> String;
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn fetch_token(&self) -> Result<AccessToken, RouteRegistrationError> {
        (**self).fetch_token()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// hands out the same token every time. used for dry runs.
pub struct StaticTokenSource {
    token: AccessToken,
}

impl StaticTokenSource {
    pub fn new(token: &str) -> Self {
        Self {
            token: AccessToken::new(token.to_string()),
        }
    }
}

impl TokenSource for StaticTokenSource {
    fn fetch_token(&self) -> Result<AccessToken, RouteRegistrationError> {
        Ok(self.token.clone())
    }

    fn describe(&self) -> String {
        String::from("static token")
    }
}
