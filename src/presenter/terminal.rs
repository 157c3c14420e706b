// src/presenter/terminal.rs

use std::{fmt::Write as _, io::Write};

use crate::{
    error::ErrorKind,
    models::{
        question::{Label, Question},
        review::{OptionMark, Outcome, Review},
    },
    quiz::navigation::NavAffordances,
    utils::html::plain_text,
};

use super::Presenter;

/// Plain-text presenter for a terminal.
pub struct TerminalPresenter<W> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::error!("Failed to write to terminal: {:?}", e);
        }
    }
}

/// Score without a trailing `.0` for whole numbers.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{:.2}", score)
    }
}

fn nav_hint(nav: NavAffordances) -> String {
    let mut actions = Vec::new();
    if nav.can_go_back {
        actions.push("[p]revious");
    }
    if nav.can_advance {
        actions.push("[n]ext");
    }
    if nav.can_submit {
        actions.push("[s]ubmit");
    }
    if actions.is_empty() {
        "choose an option".to_string()
    } else {
        actions.join("  ")
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_question(
        &mut self,
        question: &Question,
        current: Option<Label>,
        position: usize,
        total: usize,
        nav: NavAffordances,
    ) {
        let mut text = String::new();
        let _ = writeln!(text, "\nQ {}/{}  {}", position + 1, total, plain_text(&question.prompt));
        for (label, option) in question.labelled_options() {
            let marker = if current == Some(label) { '*' } else { ' ' };
            let _ = writeln!(text, "  {} {}) {}", marker, label, plain_text(option));
        }
        let _ = writeln!(text, "  -> {}", nav_hint(nav));
        self.emit(&text);
    }

    fn render_review(&mut self, review: &Review) {
        let mut text = String::new();
        let _ = writeln!(
            text,
            "\nScore: {} / {}  ({} correct, {})",
            format_score(review.score),
            review.total,
            review.correct_count(),
            review.completed_at.format("%Y-%m-%d %H:%M UTC")
        );
        for (i, item) in review.items.iter().enumerate() {
            let verdict = match item.outcome {
                Outcome::Correct => "correct",
                Outcome::Incorrect => "incorrect",
                Outcome::Unanswered => "unanswered",
            };
            let _ = writeln!(text, "\n{}. {} [{}]", i + 1, plain_text(&item.prompt), verdict);
            for option in &item.options {
                let marker = match option.mark {
                    OptionMark::Correct => "ok",
                    OptionMark::Incorrect => "xx",
                    OptionMark::Plain => "  ",
                };
                let _ = writeln!(text, "  {} {}) {}", marker, option.label, plain_text(&option.text));
            }
            if !item.explanation.is_empty() {
                let _ = writeln!(text, "  {}", plain_text(&item.explanation));
            }
        }
        let _ = writeln!(text, "\n[r]estart  [q]uit");
        self.emit(&text);
    }

    fn render_error(&mut self, kind: ErrorKind, message: &str) {
        self.emit(&format!("\n! {}: {}\n", kind, message));
    }
}
