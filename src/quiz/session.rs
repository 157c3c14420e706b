// src/quiz/session.rs

use crate::{
    error::{ErrorKind, GatewayError, LoadErrorKind, QuizError, SubmitErrorKind},
    models::{
        question::{Label, Question, QuestionId, validate_question_set},
        review::Review,
        submission::{SubmissionRequest, SubmissionResponse},
    },
    presenter::Presenter,
    state::{AttemptToken, Phase, SessionState},
};

use super::{
    answer_store::AnswerStore,
    navigation::{Direction, NavAffordances},
};

/// Issued when a load starts; hand the token back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: AttemptToken,
}

/// Issued when a submission starts: the frozen payload and its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub token: AttemptToken,
    pub request: SubmissionRequest,
}

/// Whether a network completion was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// One quiz traversal: load, answer, submit, review.
///
/// Owns the question set, the current position and the answer store. All
/// mutation goes through `&mut self`, so events are applied one at a time.
/// Network calls happen outside: `begin_load`/`navigate(Submit)` hand out a
/// ticket, and the matching `complete_*` call feeds the outcome back in.
pub struct QuizSession<P> {
    presenter: P,
    questions: Vec<Question>,
    position: usize,
    answers: AnswerStore,
    state: SessionState,
    last_token: AttemptToken,
    last_error: Option<ErrorKind>,
}

impl<P: Presenter> QuizSession<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            questions: Vec::new(),
            position: 0,
            answers: AnswerStore::default(),
            state: SessionState::Idle,
            last_token: 0,
            last_error: None,
        }
    }

    /// Discards everything and enters `Loading`.
    ///
    /// Also serves as restart: any load or submission still in flight is
    /// superseded by the new token.
    pub fn begin_load(&mut self) -> LoadTicket {
        let token = self.next_token();
        self.questions.clear();
        self.answers = AnswerStore::default();
        self.position = 0;
        self.last_error = None;
        self.state = SessionState::Loading { token };
        tracing::debug!(token, "loading question set");
        LoadTicket { token }
    }

    pub fn complete_load(
        &mut self,
        token: AttemptToken,
        result: Result<Vec<Question>, GatewayError>,
    ) -> Result<Completion, QuizError> {
        if self.state != (SessionState::Loading { token }) {
            tracing::debug!(token, state = ?self.state.phase(), "ignoring stale load completion");
            return Ok(Completion::Stale);
        }

        let questions = match result {
            Ok(questions) => questions,
            Err(e) => return Err(self.fail_load(e.load_kind(), e.to_string())),
        };

        if questions.is_empty() {
            return Err(self.fail_load(LoadErrorKind::NoQuestions, "question set is empty".to_string()));
        }
        if let Err(reason) = validate_question_set(&questions) {
            return Err(self.fail_load(LoadErrorKind::ParseError, reason));
        }

        tracing::info!(count = questions.len(), "question set loaded");
        self.answers = AnswerStore::new(&questions);
        self.questions = questions;
        self.position = 0;
        self.state = SessionState::Answering;
        self.render_current();
        Ok(Completion::Applied)
    }

    /// Records the option at `option_index` for `question_id`.
    ///
    /// Ignored outside `Answering`, which is how late selections after the
    /// store is frozen are dropped.
    pub fn select(&mut self, question_id: &QuestionId, option_index: usize) -> Result<(), QuizError> {
        if self.state != SessionState::Answering {
            tracing::debug!(%question_id, state = ?self.state.phase(), "ignoring selection");
            return Ok(());
        }

        let option_count = self
            .questions
            .iter()
            .find(|q| &q.question_id == question_id)
            .map(Question::option_count)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.clone()))?;

        let recorded = match Label::from_index(option_index) {
            Some(label) => self.answers.record(question_id, label),
            None => Err(QuizError::InvalidLabel {
                question_id: question_id.clone(),
                index: option_index,
                option_count,
            }),
        };

        if let Err(e) = recorded {
            tracing::error!("Rejected selection: {}", e);
            if let Some(kind) = e.kind() {
                self.last_error = Some(kind);
                self.presenter.render_error(kind, &e.to_string());
            }
            return Err(e);
        }

        self.render_current();
        Ok(())
    }

    /// Applies a navigation request if the decision table allows it.
    ///
    /// Illegal requests leave everything untouched. A legal `Submit` freezes
    /// the answer store and returns the request to send.
    pub fn navigate(&mut self, direction: Direction) -> Option<SubmitTicket> {
        if self.state != SessionState::Answering {
            tracing::debug!(?direction, state = ?self.state.phase(), "ignoring navigation");
            return None;
        }

        let nav = self.affordances();
        if !nav.allows(direction) {
            tracing::warn!(?direction, position = self.position, "navigation not allowed");
            return None;
        }

        match direction {
            Direction::Back => {
                self.position -= 1;
                self.render_current();
                None
            }
            Direction::Next => {
                self.position += 1;
                self.render_current();
                None
            }
            Direction::Submit => {
                let token = self.next_token();
                let request = self.answers.to_submission_payload();
                self.state = SessionState::Submitting { token };
                self.last_error = None;
                tracing::info!(token, answered = request.answers.len(), "submitting answers");
                self.render_current();
                Some(SubmitTicket { token, request })
            }
        }
    }

    pub fn complete_submit(
        &mut self,
        token: AttemptToken,
        result: Result<SubmissionResponse, GatewayError>,
    ) -> Result<Completion, QuizError> {
        if self.state != (SessionState::Submitting { token }) {
            tracing::debug!(token, state = ?self.state.phase(), "ignoring stale submit completion");
            return Ok(Completion::Stale);
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => return Err(self.fail_submit(e.submit_kind(), e.to_string())),
        };

        match Review::build(&self.questions, response) {
            Ok(review) => {
                tracing::info!(score = review.score, total = review.total, "submission scored");
                self.presenter.render_review(&review);
                self.state = SessionState::Reviewing(Box::new(review));
                Ok(Completion::Applied)
            }
            Err(reason) => Err(self.fail_submit(SubmitErrorKind::MalformedResult, reason)),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Meaningful only while answering or submitting.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::Answering | SessionState::Submitting { .. } => self.questions.get(self.position),
            _ => None,
        }
    }

    /// Whether the question on screen has an option at `option_index`.
    pub fn offers_option(&self, option_index: usize) -> bool {
        self.state == SessionState::Answering
            && self
                .current_question()
                .is_some_and(|q| option_index < q.option_count())
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Legal actions right now; everything is disabled outside `Answering`.
    pub fn affordances(&self) -> NavAffordances {
        if self.state != SessionState::Answering {
            return NavAffordances::default();
        }
        let answered = self
            .questions
            .get(self.position)
            .is_some_and(|q| self.answers.has_answer(&q.question_id));
        NavAffordances::evaluate(self.position, self.questions.len(), answered)
    }

    pub fn review(&self) -> Option<&Review> {
        match &self.state {
            SessionState::Reviewing(review) => Some(review),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn next_token(&mut self) -> AttemptToken {
        self.last_token += 1;
        self.last_token
    }

    fn render_current(&mut self) {
        if !matches!(self.state, SessionState::Answering | SessionState::Submitting { .. }) {
            return;
        }
        let nav = self.affordances();
        if let Some(question) = self.questions.get(self.position) {
            let current = self.answers.get(&question.question_id);
            self.presenter
                .render_question(question, current, self.position, self.questions.len(), nav);
        }
    }

    fn fail_load(&mut self, kind: LoadErrorKind, message: String) -> QuizError {
        tracing::warn!(?kind, "Failed to load questions: {}", message);
        self.state = SessionState::LoadFailed(kind);
        self.last_error = Some(ErrorKind::LoadFailed(kind));
        self.presenter.render_error(ErrorKind::LoadFailed(kind), &message);
        QuizError::Load { kind, message }
    }

    /// Unfreezes the store and returns to the last question so the user can retry.
    fn fail_submit(&mut self, kind: SubmitErrorKind, message: String) -> QuizError {
        if kind.is_contract_violation() {
            tracing::error!(?kind, "Submission response violates the contract: {}", message);
        } else {
            tracing::warn!(?kind, "Failed to submit answers: {}", message);
        }
        self.state = SessionState::Answering;
        self.position = self.questions.len().saturating_sub(1);
        self.last_error = Some(ErrorKind::SubmitFailed(kind));
        self.presenter.render_error(ErrorKind::SubmitFailed(kind), &message);
        self.render_current();
        QuizError::Submit { kind, message }
    }
}
