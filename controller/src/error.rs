use bingo::Rejection;

#[derive(Debug, PartialEq, Eq)]
/// Error type for requests to the [`GameController`](crate::GameController).
pub enum ControllerError {
    /// The rule engine rejected the action.
    Rejected(Rejection),
    /// The computer player is still thinking about its move.
    AiThinking,
    /// A human action was sent while a computer player is to move.
    NotHumanTurn,
    /// A computer move was requested while a human player is to move.
    NotComputerTurn,
    NoPendingAiMove,
    /// The background computation ended without reporting a move.
    AiWorkerLost,
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::Rejected(_) => write!(f, "The action was rejected"),
            ControllerError::AiThinking => {
                write!(f, "The computer player is still thinking")
            }
            ControllerError::NotHumanTurn => {
                write!(f, "It is the computer player's turn")
            }
            ControllerError::NotComputerTurn => write!(f, "It is a human player's turn"),
            ControllerError::NoPendingAiMove => {
                write!(f, "No computer move has been requested")
            }
            ControllerError::AiWorkerLost => {
                write!(f, "The computer player stopped without choosing a move")
            }
        }
    }
}

impl From<Rejection> for ControllerError {
    fn from(rejection: Rejection) -> Self {
        ControllerError::Rejected(rejection)
    }
}
