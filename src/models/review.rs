// src/models/review.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{
    question::{Label, Question, QuestionId},
    submission::{ResultItem, SubmissionResponse},
};

/// Highlight applied to one option in the review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOption {
    pub label: Label,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub question_id: QuestionId,
    pub prompt: String,
    pub options: Vec<ReviewOption>,
    pub correct_label: Label,
    pub user_label: Option<Label>,
    pub explanation: String,
    pub outcome: Outcome,
}

/// Scored review of a submitted attempt.
///
/// The score is taken from the server as-is; nothing is re-scored here.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub score: f64,
    pub total: usize,
    pub items: Vec<ReviewItem>,
    pub completed_at: DateTime<Utc>,
}

impl Review {
    /// Checks a submission response against the loaded question set and
    /// projects it into review items in original question order.
    ///
    /// Every loaded question must appear exactly once in the results, and
    /// every label must address an existing option.
    pub fn build(questions: &[Question], response: SubmissionResponse) -> Result<Review, String> {
        if response.results.len() != questions.len() {
            return Err(format!(
                "expected {} results, got {}",
                questions.len(),
                response.results.len()
            ));
        }

        let mut by_id: HashMap<QuestionId, ResultItem> = HashMap::with_capacity(response.results.len());
        for item in response.results {
            let id = item.question_id.clone();
            if by_id.insert(id.clone(), item).is_some() {
                return Err(format!("duplicate result for question {}", id));
            }
        }

        let mut items = Vec::with_capacity(questions.len());
        for question in questions {
            let result = by_id
                .remove(&question.question_id)
                .ok_or_else(|| format!("missing result for question {}", question.question_id))?;
            items.push(review_item(question, result)?);
        }

        Ok(Review {
            score: response.score,
            total: questions.len(),
            items,
            completed_at: Utc::now(),
        })
    }

    pub fn correct_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.outcome == Outcome::Correct)
            .count()
    }
}

fn review_item(question: &Question, result: ResultItem) -> Result<ReviewItem, String> {
    let options = if result.options.is_empty() {
        question.options.clone()
    } else if result.options.len() != question.option_count() {
        return Err(format!(
            "result for question {} has {} options, loaded question has {}",
            question.question_id,
            result.options.len(),
            question.option_count()
        ));
    } else {
        result.options
    };

    if !result.correct_label.fits(options.len()) {
        return Err(format!(
            "correct label {} out of range for question {}",
            result.correct_label, question.question_id
        ));
    }
    if let Some(user) = result.user_label {
        if !user.fits(options.len()) {
            return Err(format!(
                "user label {} out of range for question {}",
                user, question.question_id
            ));
        }
    }

    let outcome = match result.user_label {
        None => Outcome::Unanswered,
        Some(user) if user == result.correct_label => Outcome::Correct,
        Some(_) => Outcome::Incorrect,
    };

    let options = options
        .into_iter()
        .enumerate()
        .filter_map(|(i, text)| {
            let label = Label::from_index(i)?;
            let mark = if label == result.correct_label {
                OptionMark::Correct
            } else if result.user_label == Some(label) {
                OptionMark::Incorrect
            } else {
                OptionMark::Plain
            };
            Some(ReviewOption { label, text, mark })
        })
        .collect();

    Ok(ReviewItem {
        question_id: question.question_id.clone(),
        prompt: result.prompt,
        options,
        correct_label: result.correct_label,
        user_label: result.user_label,
        explanation: result.explanation,
        outcome,
    })
}
