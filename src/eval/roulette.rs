use crate::domain::chips::Chips;
use crate::domain::wheel::{Color, Sector};

/// Выплата за угаданный зелёный (0): 35 к 1.
pub const GREEN_ODDS: u64 = 35;
/// Выплата за угаданный красный/чёрный: 1 к 1.
pub const COLOR_ODDS: u64 = 1;

/// Сколько вернуть в банк после спина (ставка уже списана).
///
/// Схема true odds: при выигрыше возвращается ставка + ставка × коэффициент,
/// при проигрыше ничего.
pub fn credit_for(bet: Chips, selection: Color, sector: &Sector) -> Chips {
    if selection != sector.color {
        return Chips::ZERO;
    }
    let odds = match selection {
        Color::Green => GREEN_ODDS,
        Color::Red | Color::Black => COLOR_ODDS,
    };
    bet + bet.times(odds)
}
