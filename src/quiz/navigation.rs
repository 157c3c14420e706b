// src/quiz/navigation.rs

/// Navigation request coming from the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Next,
    Submit,
}

/// Which navigation actions are legal at the current position.
///
/// Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavAffordances {
    pub can_go_back: bool,
    pub can_advance: bool,
    pub can_submit: bool,
    pub is_last: bool,
}

impl NavAffordances {
    /// Decision table over `(position, total, answered)`.
    ///
    /// Forward movement and submission require the current question to be
    /// answered; going back only requires not being at the start.
    pub fn evaluate(position: usize, total: usize, has_answer_at_position: bool) -> Self {
        let is_last = total > 0 && position == total - 1;
        Self {
            can_go_back: position > 0,
            can_advance: !is_last && has_answer_at_position,
            can_submit: is_last && has_answer_at_position,
            is_last,
        }
    }

    pub fn allows(&self, direction: Direction) -> bool {
        match direction {
            Direction::Back => self.can_go_back,
            Direction::Next => self.can_advance,
            Direction::Submit => self.can_submit,
        }
    }
}
