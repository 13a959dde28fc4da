use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::chips::Chips;
use crate::domain::rules::GameRules;
use crate::domain::session::Session;
use crate::domain::slots::{Grid, Symbol};
use crate::domain::wheel::{Color, Sector, WHEEL_ORDER};
use crate::domain::RoundId;
use crate::engine::actions::ActionKind;
use crate::engine::errors::EngineError;
use crate::engine::validation::validate_amount;
use crate::engine::RandomSource;
use crate::eval::roulette;
use crate::eval::slots::{evaluate_grid, LineWin};

/// Итог одного спина рулетки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteSpin {
    pub round_id: RoundId,
    pub bet: Chips,
    pub selection: Color,
    /// Выпавший сектор.
    pub outcome: Sector,
    /// Сколько зачислено в банк (0 при проигрыше).
    pub win: Chips,
    /// Банк после зачисления.
    pub bank: Chips,
}

/// Итог одного спина слотов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotSpin {
    pub round_id: RoundId,
    pub bet: Chips,
    pub outcome: Grid,
    pub lines: Vec<LineWin>,
    pub win: Chips,
    pub bank: Chips,
}

/// Стол рулетки одной сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteTable {
    /// Id раунда, который откроет следующий спин.
    pub next_round: RoundId,
    pub last_spin: Option<RouletteSpin>,
    /// Последние выпавшие номера, свежий первым.
    pub recent_numbers: VecDeque<u8>,
}

impl RouletteTable {
    pub fn new() -> Self {
        Self {
            next_round: 1,
            last_spin: None,
            recent_numbers: VecDeque::new(),
        }
    }
}

impl Default for RouletteTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Стол слотов одной сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotsTable {
    pub next_round: RoundId,
    pub last_spin: Option<SlotSpin>,
}

impl SlotsTable {
    pub fn new() -> Self {
        Self {
            next_round: 1,
            last_spin: None,
        }
    }
}

impl Default for SlotsTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Разобрать ставку на цвет из строки клиента.
pub fn parse_selection(raw: &str) -> Result<Color, EngineError> {
    raw.parse::<Color>()
        .map_err(|_| EngineError::InvalidSelection(raw.trim().to_string()))
}

/// Общие проверки перед спином. Ничего не меняет.
fn validate_spin(
    session: &Session,
    rules: &GameRules,
    bet: Chips,
    next_round: RoundId,
    expected_round: Option<RoundId>,
) -> Result<(), EngineError> {
    if let Some(expected) = expected_round {
        if expected != next_round {
            return Err(EngineError::illegal(
                ActionKind::Spin,
                format!("ROUND {next_round}"),
            ));
        }
    }
    validate_amount(bet, &rules.limits)?;
    if bet > session.bank {
        return Err(EngineError::InsufficientFunds);
    }
    Ok(())
}

/// Банк после спина: минус ставка, плюс выигрыш. Считается до любой мутации.
fn settle_spin(bank: Chips, bet: Chips, win: Chips) -> Result<Chips, EngineError> {
    bank.checked_sub(bet)
        .and_then(|b| b.checked_add(win))
        .ok_or(EngineError::Internal("bank overflow"))
}

/// Спин рулетки: списать ставку, выбрать сектор, зачислить выигрыш.
///
/// `expected_round` — защита от повторной отправки: если клиент прислал
/// id раунда и он не совпадает с `next_round`, спин отклоняется.
pub fn spin_roulette<R: RandomSource>(
    session: &mut Session,
    table: &mut RouletteTable,
    rules: &GameRules,
    rng: &mut R,
    bet: Chips,
    selection: Color,
    expected_round: Option<RoundId>,
) -> Result<RouletteSpin, EngineError> {
    validate_spin(session, rules, bet, table.next_round, expected_round)?;

    let idx = rng.next_index(WHEEL_ORDER.len());
    let sector = Sector::at(idx).ok_or(EngineError::Internal("wheel index out of range"))?;

    let win = roulette::credit_for(bet, selection, &sector);
    session.bank = settle_spin(session.bank, bet, win)?;
    session.rounds_played += 1;

    let round_id = table.next_round;
    table.next_round += 1;
    table.recent_numbers.push_front(sector.number);
    table.recent_numbers.truncate(rules.roulette_history);

    session.set_message(if win.is_zero() {
        format!("{} {} • YOU LOSE", sector.number, sector.color)
    } else {
        format!("{} {} • YOU WIN {}", sector.number, sector.color, win)
    });

    debug!(
        session = %session.id,
        round_id,
        bet = bet.0,
        number = sector.number,
        win = win.0,
        bank = session.bank.0,
        "roulette spin settled"
    );

    let spin = RouletteSpin {
        round_id,
        bet,
        selection,
        outcome: sector,
        win,
        bank: session.bank,
    };
    table.last_spin = Some(spin.clone());
    Ok(spin)
}

/// Спин слотов: девять независимых символов, 5 линий.
pub fn spin_slots<R: RandomSource>(
    session: &mut Session,
    table: &mut SlotsTable,
    rules: &GameRules,
    rng: &mut R,
    bet: Chips,
    expected_round: Option<RoundId>,
) -> Result<SlotSpin, EngineError> {
    validate_spin(session, rules, bet, table.next_round, expected_round)?;

    let mut grid: Grid = [[Symbol::Cherry; 3]; 3];
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            *cell = *rng
                .choice(&Symbol::ALL)
                .ok_or(EngineError::Internal("empty symbol set"))?;
        }
    }

    let eval = evaluate_grid(&grid, bet, &rules.paytable);
    session.bank = settle_spin(session.bank, bet, eval.total)?;
    session.rounds_played += 1;

    let round_id = table.next_round;
    table.next_round += 1;

    session.set_message(if eval.total.is_zero() {
        "NO WIN".to_string()
    } else {
        format!("YOU WIN {}", eval.total)
    });

    debug!(
        session = %session.id,
        round_id,
        bet = bet.0,
        lines = eval.lines.len(),
        win = eval.total.0,
        bank = session.bank.0,
        "slots spin settled"
    );

    let spin = SlotSpin {
        round_id,
        bet,
        outcome: grid,
        lines: eval.lines,
        win: eval.total,
        bank: session.bank,
    };
    table.last_spin = Some(spin.clone());
    Ok(spin)
}
