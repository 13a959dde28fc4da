use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    #[error("BAD REQUEST: {0}")]
    BadRequest(String),

    /// Ошибка движка (ставки, действия).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Внутренняя ошибка сервера.
    #[error("INTERNAL ERROR: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP-статус для ответа.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Engine(e) => match e {
                EngineError::InvalidAmount | EngineError::InvalidSelection(_) => 400,
                EngineError::InsufficientFunds => 402,
                EngineError::IllegalAction { .. } => 409,
                EngineError::Internal(_) => 500,
            },
            ApiError::Internal(_) => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

/// Тело ответа с ошибкой: `{ "error": "..." }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
