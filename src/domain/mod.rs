//! Доменная модель казино: карты, шуз, руки, колесо рулетки, символы слотов,
//! денежное состояние сессии и правила игр.

pub mod card;
pub mod chips;
pub mod hand;
pub mod rules;
pub mod session;
pub mod shoe;
pub mod slots;
pub mod wheel;

// Базовые идентификаторы
pub type SessionId = String;
pub type RoundId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use hand::*;
pub use rules::*;
pub use session::*;
pub use shoe::*;
pub use slots::*;
pub use wheel::*;
