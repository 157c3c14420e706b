// src/quiz/runner.rs

use crate::{
    error::QuizError,
    gateway::QuizApi,
    models::question::QuestionId,
    presenter::Presenter,
    quiz::{
        navigation::Direction,
        session::{Completion, QuizSession},
    },
};

/// Drives a [`QuizSession`] against a [`QuizApi`].
///
/// Each gateway call is started from a session ticket and its outcome is fed
/// back with the same token, so the session alone decides whether it applies.
pub struct QuizRunner<A, P> {
    api: A,
    session: QuizSession<P>,
}

impl<A: QuizApi, P: Presenter> QuizRunner<A, P> {
    pub fn new(api: A, presenter: P) -> Self {
        Self {
            api,
            session: QuizSession::new(presenter),
        }
    }

    /// Fetches a fresh question set. Also used to restart after a review.
    pub async fn load(&mut self) -> Result<Completion, QuizError> {
        let ticket = self.session.begin_load();
        let result = self.api.fetch_questions().await;
        self.session.complete_load(ticket.token, result)
    }

    pub async fn restart(&mut self) -> Result<Completion, QuizError> {
        tracing::info!("restarting quiz session");
        self.load().await
    }

    pub fn select(&mut self, question_id: &QuestionId, option_index: usize) -> Result<(), QuizError> {
        self.session.select(question_id, option_index)
    }

    /// Selects an option on whatever question is currently shown.
    pub fn select_current(&mut self, option_index: usize) -> Result<(), QuizError> {
        match self.session.current_question().map(|q| q.question_id.clone()) {
            Some(id) => self.session.select(&id, option_index),
            None => Ok(()),
        }
    }

    /// Applies a navigation request; an allowed `Submit` performs the
    /// round-trip and yields its outcome. Everything else yields `None`.
    pub async fn navigate(&mut self, direction: Direction) -> Option<Result<Completion, QuizError>> {
        let ticket = self.session.navigate(direction)?;
        let result = self.api.submit(&ticket.request).await;
        Some(self.session.complete_submit(ticket.token, result))
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &QuizSession<P> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession<P> {
        &mut self.session
    }
}
