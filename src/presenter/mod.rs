// src/presenter/mod.rs

pub mod terminal;

use crate::{
    error::ErrorKind,
    models::{
        question::{Label, Question},
        review::Review,
    },
    quiz::navigation::NavAffordances,
};

/// Rendering surface driven by the quiz session.
///
/// The session only pushes data out through these calls; user input comes
/// back through [`crate::quiz::session::QuizSession::select`] and
/// [`crate::quiz::session::QuizSession::navigate`].
pub trait Presenter {
    fn render_question(
        &mut self,
        question: &Question,
        current: Option<Label>,
        position: usize,
        total: usize,
        nav: NavAffordances,
    );

    fn render_review(&mut self, review: &Review);

    fn render_error(&mut self, kind: ErrorKind, message: &str);
}
