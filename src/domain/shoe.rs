use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Шуз блэкджека: несколько колод подряд, карты берутся с хвоста.
/// Перемешивание делает engine (через RandomSource), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shoe {
    pub cards: Vec<Card>,
    /// Сколько колод кладётся в шуз при пересборке.
    pub decks: u8,
}

impl Shoe {
    /// Полный упорядоченный шуз: для каждой колоды масти ♠ ♥ ♦ ♣, внутри A..K.
    pub fn fresh(decks: u8) -> Self {
        let mut cards = Vec::with_capacity(52 * decks as usize);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Shoe { cards, decks }
    }

    /// Заранее сложенный шуз (тесты, реплей). Первой выйдет ПОСЛЕДНЯЯ карта списка.
    pub fn stacked(cards: Vec<Card>, decks: u8) -> Self {
        Shoe { cards, decks }
    }

    /// Удобный вариант `stacked`: карты перечислены в порядке раздачи.
    pub fn in_deal_order(mut cards: Vec<Card>, decks: u8) -> Self {
        cards.reverse();
        Shoe { cards, decks }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Сколько карт в полном шузе.
    pub fn full_size(&self) -> usize {
        52 * self.decks as usize
    }

    /// Взять одну карту с хвоста.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Вернуть шуз к полному упорядоченному набору (перед перемешиванием).
    pub fn refill(&mut self) {
        *self = Shoe::fresh(self.decks);
    }
}
