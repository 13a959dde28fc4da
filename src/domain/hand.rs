use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::RoundId;

/// Фаза раунда блэкджека.
///
/// `DealerTurn` и `Settling` проходят внутри одного действия (stand/double)
/// и видны только в истории раунда, в снапшоте между действиями их нет.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Betting,
    PlayerTurn,
    DealerTurn,
    Settling,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Betting => "BETTING",
            Phase::PlayerTurn => "PLAYER_TURN",
            Phase::DealerTurn => "DEALER_TURN",
            Phase::Settling => "SETTLING",
            Phase::Done => "DONE",
        };
        write!(f, "{s}")
    }
}

/// Карта на столе + флаг видимости.
/// `face_up` — только метаданные для фронта, в оценке руки не участвует.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandCard {
    pub card: Card,
    pub face_up: bool,
}

/// Рука игрока или дилера.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<HandCard>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card, face_up: bool) {
        self.cards.push(HandCard { card, face_up });
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Все карты руки, независимо от видимости.
    pub fn all_cards(&self) -> Vec<Card> {
        self.cards.iter().map(|c| c.card).collect()
    }

    /// Только открытые карты.
    pub fn visible_cards(&self) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|c| c.face_up)
            .map(|c| c.card)
            .collect()
    }

    pub fn has_hidden(&self) -> bool {
        self.cards.iter().any(|c| !c.face_up)
    }

    /// Открыть все закрытые карты. Возвращает открытые этим вызовом.
    pub fn reveal_all(&mut self) -> Vec<Card> {
        let mut revealed = Vec::new();
        for c in self.cards.iter_mut().filter(|c| !c.face_up) {
            c.face_up = true;
            revealed.push(c.card);
        }
        revealed
    }
}

/// Исход раунда блэкджека.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    PlayerBlackjack,
    DealerBlackjack,
    /// Оба натуральных блэкджека.
    BlackjackPush,
    PlayerBust,
    DealerBust,
    PlayerWins,
    DealerWins,
    Push,
}

impl RoundOutcome {
    /// Текст для поля `message`.
    pub fn message(&self, credit: Chips, stake: Chips) -> String {
        match self {
            RoundOutcome::PlayerBlackjack => format!("BLACKJACK! +{}", credit - stake),
            RoundOutcome::DealerBlackjack => "DEALER BLACKJACK".to_string(),
            RoundOutcome::BlackjackPush | RoundOutcome::Push => "PUSH".to_string(),
            RoundOutcome::PlayerBust => "BUST".to_string(),
            RoundOutcome::DealerBust => "DEALER BUST • YOU WIN".to_string(),
            RoundOutcome::PlayerWins => "YOU WIN".to_string(),
            RoundOutcome::DealerWins => "YOU LOSE".to_string(),
        }
    }
}

/// Итог расчёта раунда: исход + сколько вернуть в банк.
/// Ставка к этому моменту уже списана, `credit` включает возврат ставки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settlement {
    pub round_id: RoundId,
    pub outcome: RoundOutcome,
    pub stake: Chips,
    pub credit: Chips,
    pub player_total: u32,
    pub dealer_total: u32,
}
