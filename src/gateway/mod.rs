// src/gateway/mod.rs

pub mod http;

use async_trait::async_trait;

use crate::{
    error::GatewayError,
    models::{
        question::Question,
        submission::{SubmissionRequest, SubmissionResponse},
    },
    utils::cookie::{CSRF_COOKIE, find_cookie},
};

pub use http::HttpGateway;

/// The two network calls a quiz session needs.
#[async_trait]
pub trait QuizApi: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>, GatewayError>;

    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse, GatewayError>;
}

/// Supplies the anti-forgery token sent with state-mutating requests.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Omits the token entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Reads the `csrftoken` cookie out of a cookie header captured from the host page.
#[derive(Debug, Clone)]
pub struct CookieToken {
    header: String,
}

impl CookieToken {
    pub fn new(header: impl Into<String>) -> Self {
        Self { header: header.into() }
    }
}

impl TokenSource for CookieToken {
    fn token(&self) -> Option<String> {
        find_cookie(&self.header, CSRF_COOKIE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_sources() {
        assert_eq!(NoToken.token(), None);
        assert_eq!(StaticToken("abc".into()).token().as_deref(), Some("abc"));
        assert_eq!(
            CookieToken::new("a=1; csrftoken=xyz").token().as_deref(),
            Some("xyz")
        );
        let boxed: Box<dyn TokenSource> = Box::new(CookieToken::new("a=1"));
        assert_eq!(boxed.token(), None);
    }
}
