use serde::{Deserialize, Serialize};

use crate::domain::rules::GameRules;
use crate::domain::session::Session;
use crate::domain::wheel::Sector;
use crate::engine::blackjack::BlackjackEngine;
use crate::engine::spin::{RouletteTable, SlotsTable};
use crate::engine::validation::legal_actions;

use super::dto::{BlackjackSnapshot, CardView, RouletteSnapshot, SlotsSnapshot};

/// Запросы "только чтение".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    Blackjack,
    Roulette,
    Slots,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum QueryResponse {
    Blackjack(BlackjackSnapshot),
    Roulette(RouletteSnapshot),
    Slots(SlotsSnapshot),
}

/// Снапшот блэкджека. Закрытая карта дилера не раскрывается ни в руке,
/// ни в истории, сумма дилера считается только по открытым картам.
pub fn build_blackjack_snapshot(session: &Session, engine: &BlackjackEngine) -> BlackjackSnapshot {
    BlackjackSnapshot {
        phase: engine.phase,
        bank: session.bank,
        current_bet: engine.current_bet,
        player_hand: engine.player.cards.iter().map(CardView::from).collect(),
        dealer_hand: engine.dealer.cards.iter().map(CardView::from).collect(),
        player_value: engine.player_total(),
        dealer_value: engine.dealer_visible_total(),
        message: session.message.clone(),
        legal_actions: legal_actions(engine, session.bank),
        round_id: engine.round_id,
        history: engine.history.redacted(),
        last_settlement: engine.last_settlement,
    }
}

pub fn build_roulette_snapshot(session: &Session, table: &RouletteTable) -> RouletteSnapshot {
    RouletteSnapshot {
        bank: session.bank,
        message: session.message.clone(),
        next_round: table.next_round,
        wheel: Sector::wheel(),
        recent_numbers: table.recent_numbers.iter().copied().collect(),
        last_spin: table.last_spin.clone(),
    }
}

pub fn build_slots_snapshot(
    session: &Session,
    table: &SlotsTable,
    rules: &GameRules,
) -> SlotsSnapshot {
    SlotsSnapshot {
        bank: session.bank,
        message: session.message.clone(),
        next_round: table.next_round,
        paytable: rules.paytable,
        last_spin: table.last_spin.clone(),
    }
}
