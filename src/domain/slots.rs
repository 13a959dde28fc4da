use core::fmt;

use serde::{Deserialize, Serialize};

/// Символ барабана.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Cherry,
    Lemon,
    Grape,
    Bell,
    Star,
    Seven,
}

impl Symbol {
    /// Набор символов, из которого независимо тянется каждая ячейка.
    pub const ALL: [Symbol; 6] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Grape,
        Symbol::Bell,
        Symbol::Star,
        Symbol::Seven,
    ];
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Grape => "🍇",
            Symbol::Bell => "🔔",
            Symbol::Star => "⭐",
            Symbol::Seven => "7️⃣",
        };
        write!(f, "{s}")
    }
}

/// Сетка 3×3: `grid[row][col]`.
pub type Grid = [[Symbol; 3]; 3];

/// Выигрышная линия.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WinLine {
    Row(u8),
    /// Слева сверху → справа снизу.
    MainDiagonal,
    /// Справа сверху → слева снизу.
    AntiDiagonal,
}

impl WinLine {
    /// Ровно 5 линий: 3 горизонтали + 2 диагонали.
    pub const ALL: [WinLine; 5] = [
        WinLine::Row(0),
        WinLine::Row(1),
        WinLine::Row(2),
        WinLine::MainDiagonal,
        WinLine::AntiDiagonal,
    ];

    /// Координаты (row, col) трёх ячеек линии.
    pub fn cells(self) -> [(usize, usize); 3] {
        match self {
            WinLine::Row(r) => {
                let r = r as usize;
                [(r, 0), (r, 1), (r, 2)]
            }
            WinLine::MainDiagonal => [(0, 0), (1, 1), (2, 2)],
            WinLine::AntiDiagonal => [(0, 2), (1, 1), (2, 0)],
        }
    }
}

/// Пейтейбл: множитель ставки за линию из трёх одинаковых символов.
/// Неизменяемая конфигурация, одинаковая для всех раундов.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paytable {
    pub cherry: u64,
    pub lemon: u64,
    pub grape: u64,
    pub bell: u64,
    pub star: u64,
    pub seven: u64,
}

impl Paytable {
    pub fn multiplier(&self, symbol: Symbol) -> u64 {
        match symbol {
            Symbol::Cherry => self.cherry,
            Symbol::Lemon => self.lemon,
            Symbol::Grape => self.grape,
            Symbol::Bell => self.bell,
            Symbol::Star => self.star,
            Symbol::Seven => self.seven,
        }
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Self {
            cherry: 5,
            lemon: 4,
            grape: 6,
            bell: 8,
            star: 10,
            seven: 20,
        }
    }
}
