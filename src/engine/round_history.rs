use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{Phase, RoundOutcome};
use crate::domain::RoundId;

/// Чья рука.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player,
    Dealer,
}

/// Тип события в раунде.
///
/// Последовательность событий — авторитетная запись раунда. Фронт проигрывает
/// её в своём темпе (анимация раздачи, добор дилера), движок не ждёт анимаций.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEventKind {
    /// Фишка добавлена к ставке.
    BetPlaced { amount: Chips, total: Chips },

    BetCleared,

    /// Ставка списана, раунд открыт.
    RoundOpened {
        round_id: RoundId,
        stake: Chips,
        bank_after: Chips,
    },

    /// Шуз закончился и пересобран.
    ShoeReshuffled { cards: usize },

    /// Карта пошла в руку. `card` = None для закрытой карты в отредактированной истории.
    CardDealt {
        seat: Seat,
        card: Option<Card>,
        face_up: bool,
    },

    /// Открыта закрытая карта дилера.
    HoleCardRevealed { card: Card },

    PhaseChanged { phase: Phase },

    /// Удвоение: вторая ставка списана.
    Doubled { extra_stake: Chips, total_stake: Chips },

    /// Расчёт раунда: единственное зачисление в банк.
    Settled {
        outcome: RoundOutcome,
        credit: Chips,
        bank_after: Chips,
    },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// История текущего раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Копия истории без значений закрытых карт (для снапшота, пока карта не открыта).
    pub fn redacted(&self) -> Vec<RoundEvent> {
        self.events
            .iter()
            .map(|e| match &e.kind {
                RoundEventKind::CardDealt {
                    seat,
                    face_up: false,
                    ..
                } => RoundEvent {
                    index: e.index,
                    kind: RoundEventKind::CardDealt {
                        seat: *seat,
                        card: None,
                        face_up: false,
                    },
                },
                _ => e.clone(),
            })
            .collect()
    }
}
