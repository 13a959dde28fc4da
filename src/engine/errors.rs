use thiserror::Error;

use crate::engine::actions::ActionKind;

/// Ошибки движка. Любая из них оставляет состояние сессии ровно таким,
/// каким оно было до вызова (кроме текстового `message`).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Ставка не положительная, не целая или вне лимитов стола.
    #[error("INVALID BET AMOUNT")]
    InvalidAmount,

    #[error("NOT ENOUGH MONEY")]
    InsufficientFunds,

    #[error("ACTION {action} NOT ALLOWED IN {phase}")]
    IllegalAction { action: ActionKind, phase: String },

    #[error("UNKNOWN SELECTION: {0}")]
    InvalidSelection(String),

    #[error("INTERNAL ERROR: {0}")]
    Internal(&'static str),
}

impl EngineError {
    pub fn illegal(action: ActionKind, phase: impl ToString) -> Self {
        EngineError::IllegalAction {
            action,
            phase: phase.to_string(),
        }
    }
}
