use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::chips::Chips;
use crate::domain::wheel::Color;
use crate::domain::RoundId;
use crate::engine::actions::BlackjackAction;
use crate::engine::errors::EngineError;
use crate::engine::spin::parse_selection;

/// Команда верхнего уровня: всё, что меняет состояние сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum Command {
    /// Действие за столом блэкджека.
    Blackjack { action: BlackjackAction },

    /// Спин рулетки со ставкой на цвет.
    RouletteSpin(RouletteSpinCommand),

    /// Спин слотов.
    SlotsSpin(SlotsSpinCommand),

    /// Вернуть банк к стартовому (между раундами).
    Reset,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteSpinCommand {
    pub bet: Chips,
    pub selection: Color,
    /// Ожидаемый id раунда (защита от повторной отправки).
    pub round: Option<RoundId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotsSpinCommand {
    pub bet: Chips,
    pub round: Option<RoundId>,
}

/// Тело `POST .../blackjack/bet`.
///
/// Сумма приходит как произвольный JSON: клиент может прислать число,
/// строку или мусор. Разбор в `parse_amount`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BetRequest {
    #[serde(default)]
    pub amount: Value,
}

impl BetRequest {
    pub fn into_command(self) -> Result<Command, EngineError> {
        Ok(Command::Blackjack {
            action: BlackjackAction::PlaceBet(parse_amount(&self.amount)?),
        })
    }
}

/// Тело `POST .../roulette/spin`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouletteSpinRequest {
    #[serde(default)]
    pub bet: Value,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub round: Option<RoundId>,
}

impl RouletteSpinRequest {
    pub fn into_command(self) -> Result<Command, EngineError> {
        let bet = parse_amount(&self.bet)?;
        let selection = parse_selection(&self.color)?;
        Ok(Command::RouletteSpin(RouletteSpinCommand {
            bet,
            selection,
            round: self.round,
        }))
    }
}

/// Тело `POST .../slots/spin`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlotsSpinRequest {
    #[serde(default)]
    pub bet: Value,
    #[serde(default)]
    pub round: Option<RoundId>,
}

impl SlotsSpinRequest {
    pub fn into_command(self) -> Result<Command, EngineError> {
        Ok(Command::SlotsSpin(SlotsSpinCommand {
            bet: parse_amount(&self.bet)?,
            round: self.round,
        }))
    }
}

/// Сумма ставки из JSON: положительное целое (числом или строкой).
///
/// Дробные, отрицательные, ноль, `null` и прочее — `InvalidAmount`.
pub fn parse_amount(raw: &Value) -> Result<Chips, EngineError> {
    let amount = match raw {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match amount {
        Some(a) if a > 0 => Ok(Chips(a)),
        _ => Err(EngineError::InvalidAmount),
    }
}
