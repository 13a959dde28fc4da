use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SessionId;

/// Денежное состояние одного игрока.
///
/// Меняется только через операции движка (engine::blackjack, engine::spin):
/// одно списание при открытии раунда, одно зачисление при расчёте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    /// Текущий банк игрока.
    pub bank: Chips,
    /// Текст для фронта. Не является авторитетным состоянием.
    pub message: String,
    /// Сколько раундов закрыто во всех играх сессии.
    pub rounds_played: u64,
}

impl Session {
    pub fn new(id: impl Into<SessionId>, bank: Chips) -> Self {
        Self {
            id: id.into(),
            bank,
            message: "PLACE YOUR BET".to_string(),
            rounds_played: 0,
        }
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }
}
