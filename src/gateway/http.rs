// src/gateway/http.rs

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{ConfigError, GatewayError},
    models::{
        question::Question,
        submission::{SubmissionRequest, SubmissionResponse},
    },
    routes::ApiRoutes,
};

use super::{CookieToken, NoToken, QuizApi, StaticToken, TokenSource};

/// Header the anti-forgery token travels in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// [`QuizApi`] over HTTP/JSON.
pub struct HttpGateway {
    client: Client,
    routes: ApiRoutes,
    tokens: Box<dyn TokenSource>,
}

impl HttpGateway {
    pub fn new(client: Client, routes: ApiRoutes, tokens: Box<dyn TokenSource>) -> Self {
        Self { client, routes, tokens }
    }

    /// Builds the gateway from configuration.
    ///
    /// A static token wins over one read from the cookie header.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let routes = ApiRoutes::from_config(config)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "QUIZ_REQUEST_TIMEOUT_SECS",
                reason: e.to_string(),
            })?;

        let tokens: Box<dyn TokenSource> = match (&config.csrf_token, &config.cookie) {
            (Some(token), _) => Box::new(StaticToken(token.clone())),
            (None, Some(cookie)) => Box::new(CookieToken::new(cookie.clone())),
            (None, None) => Box::new(NoToken),
        };

        Ok(Self::new(client, routes, tokens))
    }

    pub fn routes(&self) -> &ApiRoutes {
        &self.routes
    }
}

#[async_trait]
impl QuizApi for HttpGateway {
    async fn fetch_questions(&self) -> Result<Vec<Question>, GatewayError> {
        tracing::debug!(url = %self.routes.questions, "fetching questions");
        let response = self.client.get(self.routes.questions.clone()).send().await?;
        decode(response).await
    }

    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse, GatewayError> {
        tracing::debug!(url = %self.routes.submit, answers = request.answers.len(), "posting submission");
        let token = self.tokens.token().ok_or_else(|| {
            tracing::warn!("No anti-forgery token available, refusing to submit");
            GatewayError::Token("no csrftoken configured".to_string())
        })?;
        let response = self
            .client
            .post(self.routes.submit.clone())
            .header(CSRF_HEADER, token)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }
}

/// Maps non-success statuses to [`GatewayError::Status`] and decodes the body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
            .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
        return Err(GatewayError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}
