// src/models/submission.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::question::{Label, QuestionId};

/// One answered question in a submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: QuestionId,
    pub label: Label,
}

/// Body of `POST submission`. Only answered questions are included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub answers: Vec<AnswerEntry>,
}

/// Server-scored outcome for a single question.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(alias = "question_id")]
    pub question_id: QuestionId,

    #[serde(alias = "question")]
    pub prompt: String,

    #[serde(deserialize_with = "options_list_or_map")]
    pub options: Vec<String>,

    #[serde(alias = "correct_answer")]
    pub correct_label: Label,

    #[serde(alias = "user_answer", default)]
    pub user_label: Option<Label>,

    #[serde(alias = "answer_explanation", default, deserialize_with = "null_as_empty")]
    pub explanation: String,
}

/// Response of `POST submission`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubmissionResponse {
    pub score: f64,
    pub results: Vec<ResultItem>,
}

/// Options arrive either as an ordered list or keyed by label (`{"A": ..}`).
///
/// Keyed options must run from `A` without gaps so each text stays at its label.
fn options_list_or_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Options {
        List(Vec<String>),
        Keyed(BTreeMap<String, Option<String>>),
    }

    match Options::deserialize(deserializer)? {
        Options::List(list) => Ok(list),
        Options::Keyed(map) => {
            let mut keyed = Vec::with_capacity(map.len());
            for (key, text) in map {
                let label = Label::parse(&key).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid option key '{}'", key))
                })?;
                keyed.push((label, text.unwrap_or_default()));
            }
            keyed.sort_by_key(|(label, _)| *label);
            for (position, (label, _)) in keyed.iter().enumerate() {
                if label.index() != position {
                    let expected = Label::from_index(position).map(|l| l.to_string()).unwrap_or_default();
                    return Err(serde::de::Error::custom(format!(
                        "option keys skip '{}' before '{}'",
                        expected, label
                    )));
                }
            }
            Ok(keyed.into_iter().map(|(_, text)| text).collect())
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let req = SubmissionRequest {
            answers: vec![AnswerEntry {
                question_id: QuestionId::Number(4),
                label: Label::parse("B").unwrap(),
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"answers": [{"questionId": 4, "label": "B"}]}));
    }

    #[test]
    fn result_item_accepts_keyed_options_and_legacy_names() {
        let item: ResultItem = serde_json::from_value(serde_json::json!({
            "question_id": 3,
            "question": "Queue order?",
            "options": {"B": "LIFO", "A": "FIFO", "C": null},
            "user_answer": "B",
            "correct_answer": "A",
            "answer_explanation": null,
            "is_correct": false
        }))
        .unwrap();

        assert_eq!(item.options, vec!["FIFO", "LIFO", ""]);
        assert_eq!(item.correct_label, Label::parse("A").unwrap());
        assert_eq!(item.user_label, Label::parse("B"));
        assert_eq!(item.explanation, "");
    }

    #[test]
    fn keyed_options_with_a_gap_are_rejected() {
        let res: Result<ResultItem, _> = serde_json::from_value(serde_json::json!({
            "question_id": 3,
            "question": "Queue order?",
            "options": {"A": "a", "B": "b", "D": "d"},
            "correct_answer": "D"
        }));
        let err = res.unwrap_err().to_string();
        assert!(err.contains("skip 'C'"), "{}", err);
    }

    #[test]
    fn missing_user_label_means_unanswered() {
        let item: ResultItem = serde_json::from_value(serde_json::json!({
            "questionId": "q1",
            "prompt": "p",
            "options": ["x", "y"],
            "correctLabel": "A",
            "explanation": "because"
        }))
        .unwrap();
        assert!(item.user_label.is_none());
    }

    #[test]
    fn bad_label_is_a_decode_error() {
        let res: Result<ResultItem, _> = serde_json::from_value(serde_json::json!({
            "questionId": 1,
            "prompt": "p",
            "options": ["x", "y"],
            "correctLabel": "7",
            "explanation": ""
        }));
        assert!(res.is_err());
    }
}
