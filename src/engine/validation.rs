use crate::domain::chips::Chips;
use crate::domain::hand::Phase;
use crate::domain::rules::TableLimits;
use crate::engine::actions::ActionKind;
use crate::engine::blackjack::BlackjackEngine;
use crate::engine::errors::EngineError;

/// Действия, разрешённые фазой (без учёта руки и банка).
pub fn phase_actions(phase: Phase) -> &'static [ActionKind] {
    match phase {
        Phase::Betting => &[ActionKind::PlaceBet, ActionKind::ClearBet, ActionKind::Deal],
        Phase::PlayerTurn => &[ActionKind::Hit, ActionKind::Stand, ActionKind::Double],
        Phase::Done => &[ActionKind::NewRound],
        // Транзитные фазы внутри одного действия.
        Phase::DealerTurn | Phase::Settling => &[],
    }
}

/// Проверка, что действие вообще допустимо в текущей фазе.
pub fn ensure_phase(phase: Phase, action: ActionKind) -> Result<(), EngineError> {
    if phase_actions(phase).contains(&action) {
        Ok(())
    } else {
        Err(EngineError::illegal(action, phase))
    }
}

/// Хватает ли оставшегося банка на вторую ставку (ставка уже списана при раздаче).
pub fn can_double(engine: &BlackjackEngine, bank: Chips) -> bool {
    engine.phase == Phase::PlayerTurn && engine.player.len() == 2 && engine.current_bet <= bank
}

/// Список допустимых действий для снапшота.
///
/// Всегда вычисляется заново из фазы (плюс рука/банк для double),
/// отдельно нигде не хранится.
pub fn legal_actions(engine: &BlackjackEngine, bank: Chips) -> Vec<ActionKind> {
    phase_actions(engine.phase)
        .iter()
        .copied()
        .filter(|a| *a != ActionKind::Double || can_double(engine, bank))
        .collect()
}

/// Размер ставки: положительный и в лимитах стола.
pub fn validate_amount(amount: Chips, limits: &TableLimits) -> Result<(), EngineError> {
    if amount.is_zero() || !limits.allows(amount) {
        return Err(EngineError::InvalidAmount);
    }
    Ok(())
}

/// В сессии открыт не больше одного раунда. Пока раунд блэкджека не рассчитан
/// (ставка списана, карты на столе), спины и сброс банка запрещены.
pub fn ensure_no_open_round(
    blackjack_phase: Phase,
    action: ActionKind,
) -> Result<(), EngineError> {
    match blackjack_phase {
        Phase::Betting | Phase::Done => Ok(()),
        phase => Err(EngineError::illegal(action, phase)),
    }
}
