use derive_more::Display;

use crate::color::Color;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchState {
    #[default]
    #[display("in progress")]
    InProgress,
    /// Terminal: the named color delivered checkmate.
    #[display("checkmate, {_0} wins")]
    Checkmate(Color),
}
impl MatchState {
    pub fn is_over(self) -> bool {
        self != MatchState::InProgress
    }
}
