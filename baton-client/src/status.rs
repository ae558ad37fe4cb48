use baton_core::PeerId;
use std::fmt;

/// What the status bar says about the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStatus {
    Connecting,
    MyTurn,
    Spectating(PeerId),
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnStatus::Connecting => f.write_str("Connecting..."),
            TurnStatus::MyTurn => f.write_str("It's YOUR turn to draw!"),
            TurnStatus::Spectating(holder) => {
                write!(f, "It's {}'s turn. Spectating...", holder)
            }
        }
    }
}
