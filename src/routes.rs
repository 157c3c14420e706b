// src/routes.rs

use url::Url;

use crate::{config::Config, error::ConfigError};

/// Resolved endpoints of the quiz API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoutes {
    pub questions: Url,
    pub submit: Url,
}

impl ApiRoutes {
    /// Resolves both endpoint paths relative to `base`.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `http://host/quiz/3` + `api` gives `http://host/quiz/3/api`.
    pub fn resolve(base: &str, questions_path: &str, submit_path: &str) -> Result<Self, ConfigError> {
        let mut base = Url::parse(base).map_err(|e| ConfigError::Invalid {
            key: "QUIZ_API_BASE_URL",
            reason: e.to_string(),
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let join = |key: &'static str, path: &str| {
            base.join(path.trim_start_matches('/')).map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            })
        };

        Ok(Self {
            questions: join("QUIZ_QUESTIONS_PATH", questions_path)?,
            submit: join("QUIZ_SUBMIT_PATH", submit_path)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::resolve(&config.api_base_url, &config.questions_path, &config.submit_path)
    }
}
