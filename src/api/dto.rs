use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandCard, Phase, Settlement};
use crate::domain::slots::Paytable;
use crate::domain::wheel::Sector;
use crate::domain::{RoundId, SessionId};
use crate::engine::actions::ActionKind;
use crate::engine::round_history::RoundEvent;
use crate::engine::spin::{RouletteSpin, SlotSpin};

/// Карта в снапшоте. Значение закрытой карты не отдаём: `card = None`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardView {
    pub card: Option<Card>,
    pub face_up: bool,
}

impl From<&HandCard> for CardView {
    fn from(hc: &HandCard) -> Self {
        Self {
            card: hc.face_up.then_some(hc.card),
            face_up: hc.face_up,
        }
    }
}

/// Снапшот стола блэкджека после действия.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackSnapshot {
    pub phase: Phase,
    pub bank: Chips,
    pub current_bet: Chips,
    pub player_hand: Vec<CardView>,
    pub dealer_hand: Vec<CardView>,
    pub player_value: u32,
    /// Только по открытым картам дилера.
    pub dealer_value: u32,
    pub message: String,
    pub legal_actions: Vec<ActionKind>,
    pub round_id: RoundId,
    /// История текущего раунда без значений закрытых карт.
    pub history: Vec<RoundEvent>,
    pub last_settlement: Option<Settlement>,
}

/// Снапшот рулетки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteSnapshot {
    pub bank: Chips,
    pub message: String,
    pub next_round: RoundId,
    pub wheel: Vec<Sector>,
    pub recent_numbers: Vec<u8>,
    pub last_spin: Option<RouletteSpin>,
}

/// Снапшот слотов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotsSnapshot {
    pub bank: Chips,
    pub message: String,
    pub next_round: RoundId,
    pub paytable: Paytable,
    pub last_spin: Option<SlotSpin>,
}

/// Ответ на спин рулетки: итог + свежий снапшот.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteSpinResponse {
    pub spin: RouletteSpin,
    pub snapshot: RouletteSnapshot,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotsSpinResponse {
    pub spin: SlotSpin,
    pub snapshot: SlotsSnapshot,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommandResponse {
    Blackjack(BlackjackSnapshot),
    Roulette(RouletteSpinResponse),
    Slots(SlotsSpinResponse),
}

/// Ответ на `POST /api/sessions`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionCreatedDto {
    pub session_id: SessionId,
    pub blackjack: BlackjackSnapshot,
}
