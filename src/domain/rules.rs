use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::slots::Paytable;

/// Лимиты ставки за столом (одинаковые для всех игр сессии).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableLimits {
    pub min_bet: Chips,
    pub max_bet: Chips,
}

impl TableLimits {
    pub fn new(min_bet: Chips, max_bet: Chips) -> Self {
        Self { min_bet, max_bet }
    }

    pub fn allows(&self, amount: Chips) -> bool {
        amount >= self.min_bet && amount <= self.max_bet
    }
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            min_bet: Chips(1),
            max_bet: Chips(10_000),
        }
    }
}

/// Правила всех игр. Неизменяемая конфигурация, общая для всех сессий.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameRules {
    /// Стартовый банк новой сессии.
    pub starting_bank: Chips,
    /// Сколько колод в шузе блэкджека.
    pub decks: u8,
    /// Дилер добирает, пока сумма меньше этого порога (стоит на любом 17, включая soft 17).
    pub dealer_stands_on: u32,
    pub limits: TableLimits,
    pub paytable: Paytable,
    /// Сколько последних номеров рулетки хранить.
    pub roulette_history: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_bank: Chips(500),
            decks: 4,
            dealer_stands_on: 17,
            limits: TableLimits::default(),
            paytable: Paytable::default(),
            roulette_history: 8,
        }
    }
}
