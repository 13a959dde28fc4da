use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Европейская рулетка: реальный порядок секторов по часовой стрелке.
pub const WHEEL_ORDER: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Красные номера (18 из 1..=36). Остальные ненулевые — чёрные, 0 — зелёный.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Цвет сектора (и ставка игрока на цвет).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    /// Цвет номера. Зависит только от номера, не от положения на колесе.
    pub fn of(number: u8) -> Color {
        if number == 0 {
            Color::Green
        } else if RED_NUMBERS.contains(&number) {
            Color::Red
        } else {
            Color::Black
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Green => "green",
        };
        write!(f, "{s}")
    }
}

/// Понимаем и английские, и исходные испанские названия цветов.
impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" | "rojo" => Ok(Color::Red),
            "black" | "negro" => Ok(Color::Black),
            "green" | "verde" => Ok(Color::Green),
            other => Err(format!("Unknown color: {other}")),
        }
    }
}

/// Один сектор колеса.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sector {
    /// Позиция в `WHEEL_ORDER`.
    pub index: usize,
    pub number: u8,
    pub color: Color,
}

impl Sector {
    /// Сектор по индексу колеса. `None`, если индекс вне колеса.
    pub fn at(index: usize) -> Option<Sector> {
        WHEEL_ORDER.get(index).map(|&number| Sector {
            index,
            number,
            color: Color::of(number),
        })
    }

    /// Всё колесо в фиксированном порядке.
    pub fn wheel() -> Vec<Sector> {
        (0..WHEEL_ORDER.len()).filter_map(Sector::at).collect()
    }
}
