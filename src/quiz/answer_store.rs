// src/quiz/answer_store.rs

use std::collections::HashMap;

use crate::{
    error::QuizError,
    models::{
        question::{Label, Question, QuestionId},
        submission::{AnswerEntry, SubmissionRequest},
    },
};

/// In-memory map from question identity to the chosen label.
///
/// Knows the option count of every loaded question so it can refuse labels
/// that do not address an option, and so it never holds identities outside
/// the loaded set.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    /// Question identities in load order, with their option counts.
    questions: Vec<(QuestionId, usize)>,
    answers: HashMap<QuestionId, Label>,
}

impl AnswerStore {
    pub fn new(questions: &[Question]) -> Self {
        Self {
            questions: questions
                .iter()
                .map(|q| (q.question_id.clone(), q.option_count()))
                .collect(),
            answers: HashMap::new(),
        }
    }

    /// Records `label` for `question_id`, replacing any earlier choice.
    pub fn record(&mut self, question_id: &QuestionId, label: Label) -> Result<(), QuizError> {
        let option_count = self
            .questions
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, count)| *count)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.clone()))?;

        if !label.fits(option_count) {
            return Err(QuizError::InvalidLabel {
                question_id: question_id.clone(),
                index: label.index(),
                option_count,
            });
        }

        self.answers.insert(question_id.clone(), label);
        Ok(())
    }

    /// Current label, or `None` when unanswered.
    pub fn get(&self, question_id: &QuestionId) -> Option<Label> {
        self.answers.get(question_id).copied()
    }

    pub fn has_answer(&self, question_id: &QuestionId) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Answered questions only, in load order.
    pub fn to_submission_payload(&self) -> SubmissionRequest {
        let answers = self
            .questions
            .iter()
            .filter_map(|(id, _)| {
                self.get(id).map(|label| AnswerEntry {
                    question_id: id.clone(),
                    label,
                })
            })
            .collect();
        SubmissionRequest { answers }
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}
