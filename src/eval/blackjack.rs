use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::RoundOutcome;

/// Перебор.
pub const BUST_LIMIT: u32 = 21;

/// Значение руки блэкджека.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandValue {
    pub total: u32,
    /// Есть туз, который всё ещё считается за 11.
    pub soft: bool,
}

/// Сумма руки по правилу soft/hard.
///
/// Сначала каждый туз считается за 11, затем, пока сумма > 21 и есть
/// неуменьшенный туз, один туз переводится в 1. `[A, A, 9]` = 21.
pub fn hand_value(cards: &[Card]) -> HandValue {
    let mut total = 0;
    let mut aces = 0;
    for card in cards {
        total += card.rank.base_points();
        if card.rank.is_ace() {
            aces += 1;
        }
    }
    while total > BUST_LIMIT && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    HandValue {
        total,
        soft: aces > 0,
    }
}

/// Натуральный блэкджек: ровно две карты на 21.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards).total == BUST_LIMIT
}

pub fn is_bust(cards: &[Card]) -> bool {
    hand_value(cards).total > BUST_LIMIT
}

/// Дилер берёт карту, пока сумма меньше порога (soft 17 тоже стоит).
pub fn dealer_should_draw(cards: &[Card], stands_on: u32) -> bool {
    hand_value(cards).total < stands_on
}

/// Сколько вернуть в банк при данном исходе. Ставка уже списана,
/// поэтому выигрыш = ставка + чистый выигрыш, пуш = ставка.
pub fn credit_for(outcome: RoundOutcome, stake: Chips) -> Chips {
    match outcome {
        RoundOutcome::PlayerBlackjack => stake + Chips(stake.0 * 3 / 2),
        RoundOutcome::DealerBust | RoundOutcome::PlayerWins => stake.times(2),
        RoundOutcome::BlackjackPush | RoundOutcome::Push => stake,
        RoundOutcome::DealerBlackjack | RoundOutcome::PlayerBust | RoundOutcome::DealerWins => {
            Chips::ZERO
        }
    }
}

/// Проверка натуральных блэкджеков сразу после раздачи.
/// `None` — ни у кого нет натурала, раунд продолжается.
pub fn natural_outcome(player: &[Card], dealer: &[Card]) -> Option<RoundOutcome> {
    match (is_natural(player), is_natural(dealer)) {
        (true, true) => Some(RoundOutcome::BlackjackPush),
        (true, false) => Some(RoundOutcome::PlayerBlackjack),
        (false, true) => Some(RoundOutcome::DealerBlackjack),
        (false, false) => None,
    }
}

/// Исход законченной руки (после добора дилера или перебора игрока).
pub fn showdown_outcome(player: &[Card], dealer: &[Card]) -> RoundOutcome {
    let pv = hand_value(player).total;
    if pv > BUST_LIMIT {
        return RoundOutcome::PlayerBust;
    }

    let dv = hand_value(dealer).total;
    if dv > BUST_LIMIT {
        RoundOutcome::DealerBust
    } else if pv > dv {
        RoundOutcome::PlayerWins
    } else if pv < dv {
        RoundOutcome::DealerWins
    } else {
        RoundOutcome::Push
    }
}
