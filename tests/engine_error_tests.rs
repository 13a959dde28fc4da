// tests/engine_error_tests.rs
//
// Ошибки движка. Мы тестируем:
//  1) placeBet вне фазы ставок -> IllegalAction
//  2) Нулевая ставка и ставка вне лимитов -> InvalidAmount
//  3) Ставка больше банка -> InvalidAmount
//  4) Накопленная ставка больше банка -> InsufficientFunds
//  5) deal без ставки -> InvalidAmount
//  6) deal, когда банк уже меньше ставки -> InsufficientFunds, ничего не списано
//  7) hit/stand/double в BETTING -> IllegalAction
//  8) new_round до расчёта -> IllegalAction
//  9) Ошибка на уровне сессии пишет текст в message и больше ничего не меняет
// 10) Разбор сумм из JSON и цвета рулетки
// 11) Тексты ошибок и HTTP-статусы

use casino_engine::api::commands::{parse_amount, Command};
use casino_engine::api::errors::ApiError;
use casino_engine::domain::chips::Chips;
use casino_engine::domain::hand::Phase;
use casino_engine::domain::rules::{GameRules, TableLimits};
use casino_engine::domain::session::Session;
use casino_engine::domain::wheel::Color;
use casino_engine::engine::blackjack::{deal, hit, new_round, place_bet, stand, BlackjackEngine};
use casino_engine::engine::spin::parse_selection;
use casino_engine::engine::{ActionKind, BlackjackAction, EngineError, RandomSource};
use casino_engine::infra::rng::{DeterministicRng, ScriptedRng};
use casino_engine::state::{GameSession, SessionRecord};
use serde_json::json;

fn fresh() -> (Session, BlackjackEngine, GameRules) {
    let rules = GameRules::default();
    (
        Session::new("err", rules.starting_bank),
        BlackjackEngine::new(rules.decks),
        rules,
    )
}

//
// TEST 1 — ставка вне фазы ставок
//
#[test]
fn place_bet_outside_betting_is_illegal() {
    let (mut session, mut engine, rules) = fresh();
    let mut rng = DeterministicRng::from_seed(1);
    place_bet(&mut session, &mut engine, &rules, Chips(10)).unwrap();
    deal(&mut session, &mut engine, &rules, &mut rng).unwrap();

    let err = place_bet(&mut session, &mut engine, &rules, Chips(10)).unwrap_err();

    assert!(matches!(
        err,
        EngineError::IllegalAction {
            action: ActionKind::PlaceBet,
            ..
        }
    ));
}

//
// TEST 2 — ноль и выход за лимиты
//
#[test]
fn zero_and_out_of_limit_bets_are_invalid() {
    let (mut session, mut engine, mut rules) = fresh();

    assert_eq!(
        place_bet(&mut session, &mut engine, &rules, Chips::ZERO),
        Err(EngineError::InvalidAmount)
    );

    rules.limits = TableLimits::new(Chips(5), Chips(100));
    assert_eq!(
        place_bet(&mut session, &mut engine, &rules, Chips(4)),
        Err(EngineError::InvalidAmount)
    );
    assert_eq!(
        place_bet(&mut session, &mut engine, &rules, Chips(101)),
        Err(EngineError::InvalidAmount)
    );
    assert_eq!(engine.current_bet, Chips::ZERO);
}

//
// TEST 3 — одна фишка больше банка
//
#[test]
fn single_bet_above_bank_is_invalid_amount() {
    let (mut session, mut engine, rules) = fresh();

    let err = place_bet(&mut session, &mut engine, &rules, Chips(501)).unwrap_err();

    assert_eq!(err, EngineError::InvalidAmount);
    assert_eq!(engine.current_bet, Chips::ZERO);
}

//
// TEST 4 — накопленная ставка больше банка
//
#[test]
fn accumulated_bet_above_bank_is_insufficient_funds() {
    let (mut session, mut engine, rules) = fresh();
    place_bet(&mut session, &mut engine, &rules, Chips(400)).unwrap();

    let err = place_bet(&mut session, &mut engine, &rules, Chips(200)).unwrap_err();

    assert_eq!(err, EngineError::InsufficientFunds);
    assert_eq!(engine.current_bet, Chips(400));
    assert_eq!(err.to_string(), "NOT ENOUGH MONEY");
}

//
// TEST 5 — deal без ставки
//
#[test]
fn deal_without_bet_is_invalid_amount() {
    let (mut session, mut engine, rules) = fresh();
    let mut rng = ScriptedRng::default();

    let err = deal(&mut session, &mut engine, &rules, &mut rng).unwrap_err();

    assert_eq!(err, EngineError::InvalidAmount);
    assert_eq!(engine.phase, Phase::Betting);
    assert!(engine.shoe.is_empty(), "nothing drawn on rejected deal");
}

//
// TEST 6 — deal, когда банк уже не покрывает ставку
//
#[test]
fn deal_with_bet_above_bank_debits_nothing() {
    let (mut session, mut engine, rules) = fresh();
    let mut rng = ScriptedRng::default();
    place_bet(&mut session, &mut engine, &rules, Chips(100)).unwrap();
    session.bank = Chips(50);

    let err = deal(&mut session, &mut engine, &rules, &mut rng).unwrap_err();

    assert_eq!(err, EngineError::InsufficientFunds);
    assert_eq!(session.bank, Chips(50));
    assert_eq!(engine.round_id, 0);
    assert!(engine.player.is_empty());
}

//
// TEST 7 — ходы игрока в фазе ставок
//
#[test]
fn player_moves_in_betting_are_illegal() {
    let (mut session, mut engine, rules) = fresh();
    let mut rng = ScriptedRng::default();

    assert!(matches!(
        hit(&mut session, &mut engine, &mut rng),
        Err(EngineError::IllegalAction { action: ActionKind::Hit, .. })
    ));
    assert!(matches!(
        stand(&mut session, &mut engine, &rules, &mut rng),
        Err(EngineError::IllegalAction { action: ActionKind::Stand, .. })
    ));

    let err = casino_engine::engine::blackjack::double(&mut session, &mut engine, &rules, &mut rng)
        .unwrap_err();
    assert_eq!(err.to_string(), "ACTION double NOT ALLOWED IN BETTING");
}

//
// TEST 8 — new_round до расчёта
//
#[test]
fn new_round_before_done_is_illegal() {
    let (mut session, mut engine, _rules) = fresh();

    let err = new_round(&mut session, &mut engine).unwrap_err();

    assert!(matches!(
        err,
        EngineError::IllegalAction {
            action: ActionKind::NewRound,
            ..
        }
    ));
}

//
// TEST 9 — ошибка в сессии: только message
//
#[test]
fn session_error_only_touches_message() {
    let rules = GameRules::default();
    let mut game = GameSession::new(SessionRecord::new("g", &rules), ScriptedRng::default());
    let before = game.record.clone();

    let err = game
        .execute(
            &rules,
            Command::Blackjack {
                action: BlackjackAction::Hit,
            },
        )
        .unwrap_err();

    assert!(matches!(err, EngineError::IllegalAction { .. }));
    assert_eq!(game.record.session.message, err.to_string());

    let mut after = game.record.clone();
    after.session.message = before.session.message.clone();
    assert_eq!(after, before);
}

//
// TEST 10 — разбор сумм и цветов
//
#[test]
fn amount_and_selection_parsing() {
    assert_eq!(parse_amount(&json!(25)), Ok(Chips(25)));
    assert_eq!(parse_amount(&json!("40")), Ok(Chips(40)));
    assert_eq!(parse_amount(&json!(10.0)), Ok(Chips(10)));

    for bad in [json!(0), json!(-5), json!(2.5), json!("abc"), json!(null), json!([1])] {
        assert_eq!(parse_amount(&bad), Err(EngineError::InvalidAmount), "{bad}");
    }

    assert_eq!(parse_selection("red"), Ok(Color::Red));
    assert_eq!(parse_selection(" Negro "), Ok(Color::Black));
    assert_eq!(parse_selection("verde"), Ok(Color::Green));
    assert_eq!(
        parse_selection("purple"),
        Err(EngineError::InvalidSelection("purple".to_string()))
    );
}

//
// TEST 11 — HTTP-статусы ошибок
//
#[test]
fn api_error_status_codes() {
    assert_eq!(ApiError::from(EngineError::InvalidAmount).status_code(), 400);
    assert_eq!(
        ApiError::from(EngineError::InvalidSelection("x".into())).status_code(),
        400
    );
    assert_eq!(ApiError::from(EngineError::InsufficientFunds).status_code(), 402);
    assert_eq!(
        ApiError::from(EngineError::illegal(ActionKind::Hit, Phase::Done)).status_code(),
        409
    );
    assert_eq!(ApiError::BadRequest("broken json".into()).status_code(), 400);

    let body = ApiError::from(EngineError::InsufficientFunds).body();
    assert_eq!(body.error, "NOT ENOUGH MONEY");
}

//
// TEST 12 — shuffle пустого среза не падает
//
#[test]
fn shuffle_empty_slice_is_fine() {
    let mut rng = DeterministicRng::from_seed(5);
    let mut empty: Vec<u8> = Vec::new();
    rng.shuffle(&mut empty);
    assert!(empty.is_empty());
}
