// tests/session_manager_tests.rs
//
// SessionManager: по одному экземпляру на сессию, действия сериализуются,
// записи ходят через хранилище.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use casino_engine::api::{Command, CommandResponse, Query, QueryResponse, SlotsSpinCommand};
use casino_engine::domain::chips::Chips;
use casino_engine::domain::hand::Phase;
use casino_engine::domain::rules::GameRules;
use casino_engine::engine::{BlackjackAction, EngineError, SessionManager};
use casino_engine::infra::{DeterministicRng, InMemorySessionStore, RngSeed, SessionStore};

fn manager_with(store: Arc<InMemorySessionStore>) -> SessionManager<DeterministicRng> {
    let seed = RngSeed::from_u64(99);
    SessionManager::new(GameRules::default(), store, move |id: &str, nonce: u64| {
        seed.derive(id, nonce).to_rng()
    })
}

fn bj(action: BlackjackAction) -> Command {
    Command::Blackjack { action }
}

//
// TEST 1 — неизвестный id создаёт сессию со стартовым банком
//
#[test]
fn unknown_session_is_created_on_first_use() {
    let store = Arc::new(InMemorySessionStore::new());
    let manager = manager_with(Arc::clone(&store));

    assert!(!manager.has_session("new"));
    let snap = match manager.query("new", Query::Blackjack) {
        QueryResponse::Blackjack(s) => s,
        other => panic!("unexpected response {other:?}"),
    };

    assert!(manager.has_session("new"));
    assert_eq!(manager.session_count(), 1);
    assert_eq!(snap.bank, Chips(500));
    assert_eq!(snap.phase, Phase::Betting);
    assert_eq!(snap.message, "PLACE YOUR BET");
    assert_eq!(store.len(), 1);
}

//
// TEST 2 — сессии изолированы друг от друга
//
#[test]
fn sessions_are_isolated() {
    let manager = manager_with(Arc::new(InMemorySessionStore::new()));

    manager
        .execute("a", bj(BlackjackAction::PlaceBet(Chips(100))))
        .unwrap();
    manager.execute("a", bj(BlackjackAction::Deal)).unwrap();

    let b = match manager.query("b", Query::Blackjack) {
        QueryResponse::Blackjack(s) => s,
        other => panic!("unexpected response {other:?}"),
    };
    assert_eq!(b.bank, Chips(500));
    assert_eq!(b.current_bet, Chips::ZERO);
    assert_eq!(manager.session_count(), 2);
}

//
// TEST 3 — много потоков долбят одну сессию: ни одного двойного списания
//
#[test]
fn concurrent_spins_never_double_debit() {
    let manager = Arc::new(manager_with(Arc::new(InMemorySessionStore::new())));
    let id = "hot";

    // Все потоки шлют спин с одним и тем же ожидаемым раундом:
    // пройти должен ровно один.
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                manager.execute(
                    id,
                    Command::SlotsSpin(SlotsSpinCommand {
                        bet: Chips(10),
                        round: Some(1),
                    }),
                )
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let ok: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(ok.len(), 1, "exactly one spin must resolve");
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, EngineError::IllegalAction { .. })));

    let win = match ok[0] {
        CommandResponse::Slots(resp) => resp.spin.win,
        other => panic!("unexpected response {other:?}"),
    };

    let bank = manager.get_or_create(id).lock().record.session.bank;
    assert_eq!(bank, Chips(500) - Chips(10) + win);
}

//
// TEST 4 — параллельные раунды блэкджека в одной сессии сохраняют банк
//
#[test]
fn concurrent_blackjack_actions_conserve_bank() {
    let manager = Arc::new(manager_with(Arc::new(InMemorySessionStore::new())));
    let id = "bj";

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for _ in 0..50 {
                    let _ = manager.execute(id, bj(BlackjackAction::PlaceBet(Chips(5))));
                    let _ = manager.execute(id, bj(BlackjackAction::Deal));
                    let _ = manager.execute(id, bj(BlackjackAction::Stand));
                    let _ = manager.execute(id, bj(BlackjackAction::NewRound));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let shared = manager.get_or_create(id);
    let game = shared.lock();
    let record = &game.record;

    // Между действиями снапшот никогда не видит транзитных фаз.
    assert!(matches!(
        record.blackjack.phase,
        Phase::Betting | Phase::PlayerTurn | Phase::Done
    ));

    // Раунд в PLAYER_TURN уже списан: учитываем его ставку.
    let open_stake = if record.blackjack.phase == Phase::PlayerTurn {
        record.blackjack.current_bet
    } else {
        Chips::ZERO
    };
    // Банк + открытая ставка не может превысить стартовый банк + всё зачисленное.
    assert!(record.session.bank + open_stake <= Chips(500) + Chips(10 * 400));
    assert!(record.blackjack.round_id >= 1);
}

//
// TEST 5 — запись переживает выгрузку из памяти
//
#[test]
fn session_record_round_trips_through_store() {
    let store = Arc::new(InMemorySessionStore::new());

    {
        let manager = manager_with(Arc::clone(&store));
        manager
            .execute("p", bj(BlackjackAction::PlaceBet(Chips(40))))
            .unwrap();
        manager.execute("p", bj(BlackjackAction::Deal)).unwrap();
    }

    let saved = store.load("p").expect("record saved after actions");
    assert_eq!(saved.blackjack.round_id, 1);
    assert_eq!(saved.blackjack.current_bet, Chips(40));

    // Новый менеджер поверх того же хранилища видит тот же стол.
    let manager = manager_with(Arc::clone(&store));
    let snap = match manager.query("p", Query::Blackjack) {
        QueryResponse::Blackjack(s) => s,
        other => panic!("unexpected response {other:?}"),
    };
    assert_eq!(snap.round_id, 1);
    assert_eq!(snap.bank, saved.session.bank);
    assert_eq!(snap.player_hand.len(), saved.blackjack.player.len());

    // Запись также переживает JSON.
    let json = serde_json::to_string(&saved).unwrap();
    let back: casino_engine::SessionRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, saved);
}

//
// TEST 6 — неудачное действие тоже сохраняется (с новым message)
//
#[test]
fn failed_action_saves_message() {
    let store = Arc::new(InMemorySessionStore::new());
    let manager = manager_with(Arc::clone(&store));

    let err = manager.execute("m", bj(BlackjackAction::Hit)).unwrap_err();

    let saved = store.load("m").unwrap();
    assert_eq!(saved.session.message, err.to_string());
    assert_eq!(saved.session.bank, Chips(500));
}

//
// TEST 7 — remove выгружает сессию
//
#[test]
fn remove_drops_session() {
    let store = Arc::new(InMemorySessionStore::new());
    let manager = manager_with(Arc::clone(&store));
    manager.get_or_create("gone");

    assert!(manager.remove("gone"));
    assert!(!manager.has_session("gone"));
    assert!(store.load("gone").is_none());
    assert!(!manager.remove("gone"));
}

//
// TEST 8 — одинаковый мастер-seed даёт одинаковые раунды
//
#[test]
fn same_master_seed_replays_sessions() {
    let m1 = manager_with(Arc::new(InMemorySessionStore::new()));
    let m2 = manager_with(Arc::new(InMemorySessionStore::new()));

    for m in [&m1, &m2] {
        m.execute("r", bj(BlackjackAction::PlaceBet(Chips(10)))).unwrap();
        m.execute("r", bj(BlackjackAction::Deal)).unwrap();
    }

    let s1 = m1.get_or_create("r").lock().record.blackjack.clone();
    let s2 = m2.get_or_create("r").lock().record.blackjack.clone();
    assert_eq!(s1.player, s2.player);
    assert_eq!(s1.dealer, s2.dealer);
}

//
// TEST 9 — remove ждёт действие, которое уже держит сессию
//
#[test]
fn remove_waits_for_in_flight_action() {
    let store = Arc::new(InMemorySessionStore::new());
    let manager = Arc::new(manager_with(Arc::clone(&store)));
    manager.get_or_create("busy");

    let (locked_tx, locked_rx) = mpsc::channel();
    let worker = {
        let manager = Arc::clone(&manager);
        thread::spawn(move || {
            manager.with_session("busy", |session, _| {
                locked_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(50));
                session.record.session.set_message("late write");
            });
        })
    };

    // Действие уже под мьютексом, когда вызываем remove.
    locked_rx.recv().unwrap();
    assert!(manager.remove("busy"));
    worker.join().unwrap();

    assert!(store.load("busy").is_none(), "in-flight save must not resurrect the record");
    assert!(!manager.has_session("busy"));
}

//
// TEST 10 — сброс через команду и запрет сброса посреди раунда
//
#[test]
fn reset_command_restores_bank() {
    let store = Arc::new(InMemorySessionStore::new());
    let manager = manager_with(Arc::clone(&store));

    manager
        .execute("broke", bj(BlackjackAction::PlaceBet(Chips(500))))
        .unwrap();
    manager.execute("broke", bj(BlackjackAction::Deal)).unwrap();

    let phase = manager.get_or_create("broke").lock().record.blackjack.phase;
    if phase == Phase::PlayerTurn {
        let err = manager.execute("broke", Command::Reset).unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction { .. }));
        manager.execute("broke", bj(BlackjackAction::Stand)).unwrap();
    }

    let snap = match manager.execute("broke", Command::Reset).unwrap() {
        CommandResponse::Blackjack(s) => s,
        other => panic!("unexpected response {other:?}"),
    };
    assert_eq!(snap.bank, Chips(500));
    assert_eq!(snap.phase, Phase::Betting);
    assert_eq!(store.load("broke").unwrap().session.bank, Chips(500));
}
