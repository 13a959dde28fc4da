//! Движок раундов: фазы, допустимые действия, списание/зачисление банка.
//!
//! Высокоуровневые объекты:
//!   - `BlackjackEngine` + `apply_action` – раунд блэкджека (ставка → раздача → ход игрока → расчёт);
//!   - `RouletteTable` / `SlotsTable` + `spin_*` – мгновенные спины;
//!   - `SessionManager` – по одному экземпляру на сессию, действия сериализуются мьютексом.

pub mod actions;
pub mod blackjack;
pub mod errors;
pub mod round_history;
pub mod session_manager;
pub mod spin;
pub mod validation;

pub use actions::{ActionKind, BlackjackAction};
pub use blackjack::{apply_action, reset_bank, BlackjackEngine, RoundStatus};
pub use errors::EngineError;
pub use round_history::{RoundEvent, RoundEventKind, RoundHistory, Seat};
pub use session_manager::SessionManager;
pub use spin::{parse_selection, spin_roulette, spin_slots, RouletteSpin, RouletteTable, SlotSpin, SlotsTable};
pub use validation::{ensure_no_open_round, ensure_phase, legal_actions};

/// Источник случайности для движка.
///
/// Движок никогда не смотрит, какая реализация подставлена: детерминизм
/// в тестах достигается только заменой источника (см. `infra::rng`).
pub trait RandomSource {
    /// Равномерный индекс в `0..upper`. `upper` > 0.
    fn next_index(&mut self, upper: usize) -> usize;

    /// Случайная перестановка на месте.
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Случайный элемент последовательности.
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_index(items.len());
        items.get(idx)
    }
}
