//! Оценка исходов: чистые функции без состояния.
//!
//!   - `blackjack` — сумма руки (soft/hard), натуралы, исход и выплата;
//!   - `roulette`  — выплата по цвету (true odds);
//!   - `slots`     — 5 линий сетки 3×3 по пейтейблу.

pub mod blackjack;
pub mod roulette;
pub mod slots;

pub use blackjack::{hand_value, is_bust, is_natural, HandValue};
pub use slots::{evaluate_grid, GridEvaluation, LineWin};
