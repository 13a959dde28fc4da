use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Имя действия (то, что видит фронт в `legal_actions`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PlaceBet,
    ClearBet,
    Deal,
    Hit,
    Stand,
    Double,
    NewRound,
    Spin,
    /// Вернуть банк сессии к стартовому.
    Reset,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::PlaceBet => "place_bet",
            ActionKind::ClearBet => "clear_bet",
            ActionKind::Deal => "deal",
            ActionKind::Hit => "hit",
            ActionKind::Stand => "stand",
            ActionKind::Double => "double",
            ActionKind::NewRound => "new_round",
            ActionKind::Spin => "spin",
            ActionKind::Reset => "reset",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Действие игрока в блэкджеке.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum BlackjackAction {
    /// Добавить фишку к текущей ставке (ставка копится, банк пока не трогаем).
    PlaceBet(Chips),
    ClearBet,
    Deal,
    Hit,
    Stand,
    Double,
    NewRound,
}

impl BlackjackAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            BlackjackAction::PlaceBet(_) => ActionKind::PlaceBet,
            BlackjackAction::ClearBet => ActionKind::ClearBet,
            BlackjackAction::Deal => ActionKind::Deal,
            BlackjackAction::Hit => ActionKind::Hit,
            BlackjackAction::Stand => ActionKind::Stand,
            BlackjackAction::Double => ActionKind::Double,
            BlackjackAction::NewRound => ActionKind::NewRound,
        }
    }
}
