use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::commands::Command;
use crate::api::dto::{
    BlackjackSnapshot, CommandResponse, RouletteSnapshot, RouletteSpinResponse, SlotsSnapshot,
    SlotsSpinResponse,
};
use crate::api::queries::{
    build_blackjack_snapshot, build_roulette_snapshot, build_slots_snapshot, Query, QueryResponse,
};
use crate::domain::rules::GameRules;
use crate::domain::session::Session;
use crate::domain::SessionId;
use crate::engine::actions::ActionKind;
use crate::engine::blackjack::{apply_action, reset_bank, BlackjackEngine};
use crate::engine::errors::EngineError;
use crate::engine::spin::{spin_roulette, spin_slots, RouletteTable, SlotsTable};
use crate::engine::validation::ensure_no_open_round;
use crate::engine::RandomSource;

/// Всё состояние одной сессии, которое уходит в хранилище.
///
/// Банк общий для всех игр, столы у каждой игры свои.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub session: Session,
    pub blackjack: BlackjackEngine,
    pub roulette: RouletteTable,
    pub slots: SlotsTable,
}

impl SessionRecord {
    /// Новая сессия со стартовым банком из правил.
    pub fn new(id: impl Into<SessionId>, rules: &GameRules) -> Self {
        Self {
            session: Session::new(id, rules.starting_bank),
            blackjack: BlackjackEngine::new(rules.decks),
            roulette: RouletteTable::new(),
            slots: SlotsTable::new(),
        }
    }
}

/// Живая сессия: запись + её собственный источник случайности.
///
/// Владеет состоянием эксклюзивно, менять его можно только через `execute`.
#[derive(Debug)]
pub struct GameSession<R> {
    pub record: SessionRecord,
    pub rng: R,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(record: SessionRecord, rng: R) -> Self {
        Self { record, rng }
    }

    pub fn id(&self) -> &str {
        &self.record.session.id
    }

    /// Выполнить команду и вернуть свежий снапшот.
    ///
    /// Ошибка не меняет ничего, кроме `message`: туда пишется текст ошибки.
    pub fn execute(
        &mut self,
        rules: &GameRules,
        command: Command,
    ) -> Result<CommandResponse, EngineError> {
        let result = self.dispatch(rules, command);

        if let Err(err) = &result {
            debug!(session = %self.record.session.id, error = %err, "action rejected");
            self.record.session.set_message(err.to_string());
        }

        result
    }

    fn dispatch(
        &mut self,
        rules: &GameRules,
        command: Command,
    ) -> Result<CommandResponse, EngineError> {
        let rec = &mut self.record;

        match command {
            Command::Blackjack { action } => {
                apply_action(
                    &mut rec.session,
                    &mut rec.blackjack,
                    rules,
                    &mut self.rng,
                    action,
                )?;
                Ok(CommandResponse::Blackjack(build_blackjack_snapshot(
                    &rec.session,
                    &rec.blackjack,
                )))
            }
            Command::Reset => {
                reset_bank(&mut rec.session, &mut rec.blackjack, rules)?;
                Ok(CommandResponse::Blackjack(build_blackjack_snapshot(
                    &rec.session,
                    &rec.blackjack,
                )))
            }
            Command::RouletteSpin(cmd) => {
                ensure_no_open_round(rec.blackjack.phase, ActionKind::Spin)?;
                let spin = spin_roulette(
                    &mut rec.session,
                    &mut rec.roulette,
                    rules,
                    &mut self.rng,
                    cmd.bet,
                    cmd.selection,
                    cmd.round,
                )?;
                Ok(CommandResponse::Roulette(RouletteSpinResponse {
                    spin,
                    snapshot: build_roulette_snapshot(&rec.session, &rec.roulette),
                }))
            }
            Command::SlotsSpin(cmd) => {
                ensure_no_open_round(rec.blackjack.phase, ActionKind::Spin)?;
                let spin = spin_slots(
                    &mut rec.session,
                    &mut rec.slots,
                    rules,
                    &mut self.rng,
                    cmd.bet,
                    cmd.round,
                )?;
                Ok(CommandResponse::Slots(SlotsSpinResponse {
                    spin,
                    snapshot: build_slots_snapshot(&rec.session, &rec.slots, rules),
                }))
            }
        }
    }

    pub fn query(&self, rules: &GameRules, query: Query) -> QueryResponse {
        match query {
            Query::Blackjack => QueryResponse::Blackjack(self.blackjack_snapshot()),
            Query::Roulette => QueryResponse::Roulette(self.roulette_snapshot()),
            Query::Slots => QueryResponse::Slots(self.slots_snapshot(rules)),
        }
    }

    pub fn blackjack_snapshot(&self) -> BlackjackSnapshot {
        build_blackjack_snapshot(&self.record.session, &self.record.blackjack)
    }

    pub fn roulette_snapshot(&self) -> RouletteSnapshot {
        build_roulette_snapshot(&self.record.session, &self.record.roulette)
    }

    pub fn slots_snapshot(&self, rules: &GameRules) -> SlotsSnapshot {
        build_slots_snapshot(&self.record.session, &self.record.slots, rules)
    }
}
