// src/models/question.rs

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::{Validate, ValidationError};

/// Opaque question identity as issued by the quiz API.
///
/// The server may use integers or strings; whichever it sends is echoed back
/// unchanged on submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        QuestionId::Number(value)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        QuestionId::Text(value.to_string())
    }
}

/// Highest number of options a question may carry: one per letter A-Z.
pub const MAX_OPTIONS: usize = 26;

/// Single-letter designation of an option, derived from its position.
///
/// Never stored alongside the option; always recomputed with
/// [`Label::from_index`] so submission and review agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(char);

impl Label {
    /// Maps a zero-based option index to its letter (`0 -> 'A'`).
    pub fn from_index(index: usize) -> Option<Label> {
        if index < MAX_OPTIONS {
            Some(Label((b'A' + index as u8) as char))
        } else {
            None
        }
    }

    /// Parses a single uppercase letter.
    pub fn parse(raw: &str) -> Option<Label> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Some(Label(c)),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        (self.0 as u8 - b'A') as usize
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Whether this label addresses one of `option_count` options.
    pub fn fits(self, option_count: usize) -> bool {
        self.index() < option_count
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Label::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid option label '{}'", raw)))
    }
}

/// A multiple-choice question as served by `GET questions`.
///
/// Immutable once loaded. The position of each option encodes its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(alias = "id")]
    pub question_id: QuestionId,

    #[serde(alias = "question")]
    #[validate(length(min = 1, max = 2000))]
    pub prompt: String,

    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
}

impl Question {
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Option text for a label, if the label fits this question.
    pub fn option(&self, label: Label) -> Option<&str> {
        self.options.get(label.index()).map(String::as_str)
    }

    /// Options paired with their derived labels.
    pub fn labelled_options(&self) -> impl Iterator<Item = (Label, &str)> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(i, text)| Label::from_index(i).map(|label| (label, text.as_str())))
    }
}

fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() < 2 {
        return Err(ValidationError::new("too_few_options"));
    }
    if options.len() > MAX_OPTIONS {
        return Err(ValidationError::new("too_many_options"));
    }
    Ok(())
}

/// Validates a freshly fetched question set.
///
/// Returns a human readable reason on the first violation.
pub fn validate_question_set(questions: &[Question]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for question in questions {
        question
            .validate()
            .map_err(|e| format!("question {}: {}", question.question_id, e))?;
        if !seen.insert(&question.question_id) {
            return Err(format!("duplicate question id {}", question.question_id));
        }
    }
    Ok(())
}
