use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{Hand, Phase, RoundOutcome, Settlement};
use crate::domain::rules::GameRules;
use crate::domain::session::Session;
use crate::domain::shoe::Shoe;
use crate::domain::RoundId;
use crate::engine::actions::{ActionKind, BlackjackAction};
use crate::engine::errors::EngineError;
use crate::engine::round_history::{RoundEventKind, RoundHistory, Seat};
use crate::engine::validation::{ensure_no_open_round, ensure_phase, validate_amount};
use crate::engine::RandomSource;
use crate::eval::blackjack::{
    credit_for, dealer_should_draw, hand_value, is_bust, natural_outcome, showdown_outcome,
};

/// Статус раунда для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    /// Раунд не открыт или ждёт следующего хода игрока.
    Ongoing,
    /// Раунд рассчитан этим действием.
    Finished(Settlement),
}

/// Состояние стола блэкджека одной сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackEngine {
    pub phase: Phase,
    /// Накопленная ставка. В фазе ставок ещё не списана, после раздачи списана.
    pub current_bet: Chips,
    /// Id последнего открытого раунда (0 — ещё не было).
    pub round_id: RoundId,
    pub shoe: Shoe,
    pub player: Hand,
    /// Вторая карта дилера лежит закрытой до конца хода игрока.
    pub dealer: Hand,
    /// История текущего раунда.
    pub history: RoundHistory,
    /// Расчёт последнего закрытого раунда.
    pub last_settlement: Option<Settlement>,
}

impl BlackjackEngine {
    /// Новый стол с пустым шузом: первая же раздача соберёт и перемешает его.
    pub fn new(decks: u8) -> Self {
        Self::with_shoe(Shoe::stacked(Vec::new(), decks))
    }

    /// Стол с заранее подготовленным шузом.
    pub fn with_shoe(shoe: Shoe) -> Self {
        Self {
            phase: Phase::Betting,
            current_bet: Chips::ZERO,
            round_id: 0,
            shoe,
            player: Hand::new(),
            dealer: Hand::new(),
            history: RoundHistory::new(),
            last_settlement: None,
        }
    }

    pub fn player_total(&self) -> u32 {
        hand_value(&self.player.all_cards()).total
    }

    /// Сумма дилера по открытым картам (то, что можно показать игроку).
    pub fn dealer_visible_total(&self) -> u32 {
        hand_value(&self.dealer.visible_cards()).total
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.history.push(RoundEventKind::PhaseChanged { phase });
    }
}

/// Применить действие игрока. Возвращает статус раунда (идёт / рассчитан).
///
/// При ошибке состояние не меняется: все проверки идут до первой мутации.
pub fn apply_action<R: RandomSource>(
    session: &mut Session,
    engine: &mut BlackjackEngine,
    rules: &GameRules,
    rng: &mut R,
    action: BlackjackAction,
) -> Result<RoundStatus, EngineError> {
    match action {
        BlackjackAction::PlaceBet(amount) => {
            place_bet(session, engine, rules, amount)?;
            Ok(RoundStatus::Ongoing)
        }
        BlackjackAction::ClearBet => {
            clear_bet(session, engine)?;
            Ok(RoundStatus::Ongoing)
        }
        BlackjackAction::Deal => deal(session, engine, rules, rng),
        BlackjackAction::Hit => hit(session, engine, rng),
        BlackjackAction::Stand => stand(session, engine, rules, rng),
        BlackjackAction::Double => double(session, engine, rules, rng),
        BlackjackAction::NewRound => {
            new_round(session, engine)?;
            Ok(RoundStatus::Ongoing)
        }
    }
}

/// Добавить фишку к ставке. Банк не трогаем до раздачи.
pub fn place_bet(
    session: &mut Session,
    engine: &mut BlackjackEngine,
    rules: &GameRules,
    amount: Chips,
) -> Result<(), EngineError> {
    ensure_phase(engine.phase, ActionKind::PlaceBet)?;
    validate_amount(amount, &rules.limits)?;
    if amount > session.bank {
        return Err(EngineError::InvalidAmount);
    }

    let total = engine.current_bet + amount;
    if total > session.bank {
        return Err(EngineError::InsufficientFunds);
    }
    if total > rules.limits.max_bet {
        return Err(EngineError::InvalidAmount);
    }

    engine.current_bet = total;
    engine.history.push(RoundEventKind::BetPlaced { amount, total });
    session.set_message(format!("BET: {total}"));
    Ok(())
}

/// Сбросить ставку.
pub fn clear_bet(session: &mut Session, engine: &mut BlackjackEngine) -> Result<(), EngineError> {
    ensure_phase(engine.phase, ActionKind::ClearBet)?;

    engine.current_bet = Chips::ZERO;
    engine.history.push(RoundEventKind::BetCleared);
    session.set_message("BET CLEARED");
    Ok(())
}

/// Раздача:
/// - списывает ставку ровно один раз;
/// - раздаёт игрок, дилер, игрок, дилер (вторая карта дилера закрыта);
/// - при натуральном блэкджеке у кого-либо сразу рассчитывает раунд.
pub fn deal<R: RandomSource>(
    session: &mut Session,
    engine: &mut BlackjackEngine,
    rules: &GameRules,
    rng: &mut R,
) -> Result<RoundStatus, EngineError> {
    ensure_phase(engine.phase, ActionKind::Deal)?;
    if engine.current_bet.is_zero() {
        return Err(EngineError::InvalidAmount);
    }
    let bank_after = session
        .bank
        .checked_sub(engine.current_bet)
        .ok_or(EngineError::InsufficientFunds)?;
    validate_amount(engine.current_bet, &rules.limits)?;

    // Открываем раунд.
    session.bank = bank_after;
    engine.round_id += 1;
    engine.player.clear();
    engine.dealer.clear();
    engine.last_settlement = None;
    engine.history.push(RoundEventKind::RoundOpened {
        round_id: engine.round_id,
        stake: engine.current_bet,
        bank_after,
    });

    debug!(
        session = %session.id,
        round_id = engine.round_id,
        stake = engine.current_bet.0,
        "blackjack round opened"
    );

    deal_card(engine, rng, Seat::Player, true)?;
    deal_card(engine, rng, Seat::Dealer, true)?;
    deal_card(engine, rng, Seat::Player, true)?;
    deal_card(engine, rng, Seat::Dealer, false)?;

    engine.set_phase(Phase::PlayerTurn);
    session.set_message("");

    if let Some(outcome) = natural_outcome(&engine.player.all_cards(), &engine.dealer.all_cards()) {
        reveal_hole_card(engine);
        let settlement = settle(session, engine, outcome);
        return Ok(RoundStatus::Finished(settlement));
    }

    Ok(RoundStatus::Ongoing)
}

/// Ещё карту игроку. При переборе раунд проигран.
pub fn hit<R: RandomSource>(
    session: &mut Session,
    engine: &mut BlackjackEngine,
    rng: &mut R,
) -> Result<RoundStatus, EngineError> {
    ensure_phase(engine.phase, ActionKind::Hit)?;

    deal_card(engine, rng, Seat::Player, true)?;

    if is_bust(&engine.player.all_cards()) {
        reveal_hole_card(engine);
        let settlement = settle(session, engine, RoundOutcome::PlayerBust);
        return Ok(RoundStatus::Finished(settlement));
    }

    Ok(RoundStatus::Ongoing)
}

/// Игрок остановился: ход дилера и расчёт.
pub fn stand<R: RandomSource>(
    session: &mut Session,
    engine: &mut BlackjackEngine,
    rules: &GameRules,
    rng: &mut R,
) -> Result<RoundStatus, EngineError> {
    ensure_phase(engine.phase, ActionKind::Stand)?;

    let settlement = play_dealer_and_settle(session, engine, rules, rng)?;
    Ok(RoundStatus::Finished(settlement))
}

/// Удвоение: только на двух картах и если банк покрывает вторую ставку.
/// Ровно одна карта, затем автоматический stand.
pub fn double<R: RandomSource>(
    session: &mut Session,
    engine: &mut BlackjackEngine,
    rules: &GameRules,
    rng: &mut R,
) -> Result<RoundStatus, EngineError> {
    ensure_phase(engine.phase, ActionKind::Double)?;
    if engine.player.len() != 2 {
        return Err(EngineError::illegal(ActionKind::Double, engine.phase));
    }
    let extra = engine.current_bet;
    let bank_after = session
        .bank
        .checked_sub(extra)
        .ok_or(EngineError::InsufficientFunds)?;

    session.bank = bank_after;
    engine.current_bet = extra.times(2);
    engine.history.push(RoundEventKind::Doubled {
        extra_stake: extra,
        total_stake: engine.current_bet,
    });

    deal_card(engine, rng, Seat::Player, true)?;

    if is_bust(&engine.player.all_cards()) {
        reveal_hole_card(engine);
        let settlement = settle(session, engine, RoundOutcome::PlayerBust);
        return Ok(RoundStatus::Finished(settlement));
    }

    let settlement = play_dealer_and_settle(session, engine, rules, rng)?;
    Ok(RoundStatus::Finished(settlement))
}

/// Закрыть рассчитанный раунд и вернуться к ставкам.
pub fn new_round(session: &mut Session, engine: &mut BlackjackEngine) -> Result<(), EngineError> {
    ensure_phase(engine.phase, ActionKind::NewRound)?;

    engine.player.clear();
    engine.dealer.clear();
    engine.current_bet = Chips::ZERO;
    engine.history.clear();
    engine.phase = Phase::Betting;
    session.set_message("PLACE YOUR BET");
    Ok(())
}

/// Начать заново: банк возвращается к стартовому, стол блэкджека к ставкам.
///
/// Только между раундами. `round_id`, `next_round` и `rounds_played` не сбрасываются.
pub fn reset_bank(
    session: &mut Session,
    engine: &mut BlackjackEngine,
    rules: &GameRules,
) -> Result<(), EngineError> {
    ensure_no_open_round(engine.phase, ActionKind::Reset)?;

    engine.player.clear();
    engine.dealer.clear();
    engine.current_bet = Chips::ZERO;
    engine.history.clear();
    engine.last_settlement = None;
    engine.phase = Phase::Betting;

    let previous = session.bank;
    session.bank = rules.starting_bank;
    session.set_message("PLACE YOUR BET");

    info!(
        session = %session.id,
        previous = previous.0,
        bank = session.bank.0,
        "session bank reset"
    );
    Ok(())
}

/// Открыть карту дилера, добрать до порога и рассчитать.
fn play_dealer_and_settle<R: RandomSource>(
    session: &mut Session,
    engine: &mut BlackjackEngine,
    rules: &GameRules,
    rng: &mut R,
) -> Result<Settlement, EngineError> {
    reveal_hole_card(engine);
    engine.set_phase(Phase::DealerTurn);

    while dealer_should_draw(&engine.dealer.all_cards(), rules.dealer_stands_on) {
        deal_card(engine, rng, Seat::Dealer, true)?;
    }

    let outcome = showdown_outcome(&engine.player.all_cards(), &engine.dealer.all_cards());
    Ok(settle(session, engine, outcome))
}

/// Единственная точка зачисления в банк за раунд.
fn settle(session: &mut Session, engine: &mut BlackjackEngine, outcome: RoundOutcome) -> Settlement {
    engine.set_phase(Phase::Settling);

    let stake = engine.current_bet;
    let credit = credit_for(outcome, stake);
    session.bank += credit;
    session.rounds_played += 1;

    let settlement = Settlement {
        round_id: engine.round_id,
        outcome,
        stake,
        credit,
        player_total: engine.player_total(),
        dealer_total: hand_value(&engine.dealer.all_cards()).total,
    };

    engine.history.push(RoundEventKind::Settled {
        outcome,
        credit,
        bank_after: session.bank,
    });
    engine.last_settlement = Some(settlement);
    engine.set_phase(Phase::Done);
    session.set_message(outcome.message(credit, stake));

    debug!(
        session = %session.id,
        round_id = settlement.round_id,
        ?outcome,
        stake = stake.0,
        credit = credit.0,
        bank = session.bank.0,
        "blackjack round settled"
    );

    settlement
}

/// Открыть закрытую карту дилера (если она ещё закрыта).
fn reveal_hole_card(engine: &mut BlackjackEngine) {
    for card in engine.dealer.reveal_all() {
        engine.history.push(RoundEventKind::HoleCardRevealed { card });
    }
}

/// Карта из шуза в руку. Пустой шуз пересобирается и перемешивается.
fn deal_card<R: RandomSource>(
    engine: &mut BlackjackEngine,
    rng: &mut R,
    seat: Seat,
    face_up: bool,
) -> Result<Card, EngineError> {
    let card = draw_from_shoe(engine, rng)?;
    match seat {
        Seat::Player => engine.player.push(card, face_up),
        Seat::Dealer => engine.dealer.push(card, face_up),
    }
    engine.history.push(RoundEventKind::CardDealt {
        seat,
        card: Some(card),
        face_up,
    });
    Ok(card)
}

fn draw_from_shoe<R: RandomSource>(
    engine: &mut BlackjackEngine,
    rng: &mut R,
) -> Result<Card, EngineError> {
    if engine.shoe.is_empty() {
        engine.shoe.refill();
        rng.shuffle(&mut engine.shoe.cards);
        engine.history.push(RoundEventKind::ShoeReshuffled {
            cards: engine.shoe.len(),
        });
    }
    engine
        .shoe
        .draw_one()
        .ok_or(EngineError::Internal("shoe has no cards after reshuffle"))
}
