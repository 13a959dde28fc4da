// src/bin/casino_stress_test.rs

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use casino_engine::api::{Command, CommandResponse, RouletteSpinCommand, SlotsSpinCommand};
use casino_engine::domain::chips::Chips;
use casino_engine::domain::hand::Phase;
use casino_engine::domain::rules::GameRules;
use casino_engine::domain::wheel::Color;
use casino_engine::engine::{BlackjackAction, EngineError, SessionManager};
use casino_engine::infra::{DeterministicRng, IdGenerator, InMemorySessionStore, RngSeed};
use casino_engine::server::init_tracing;

// Параметры нагрузки
const NUM_SESSIONS: usize = 64; // сколько сессий
const ROUNDS_PER_SESSION: u32 = 300; // раундов на сессию (по кругу: блэкджек, рулетка, слоты)
const BET: u64 = 5;

/// Статистика одной сессии.
#[derive(Default, Debug)]
struct SessionStats {
    rounds: u64,
    staked: u64,
    credited: u64,
    rejected: u64,
}

fn main() {
    init_tracing("casino_engine=warn");
    println!("casino_stress_test: стартуем стресс-тест движка казино…");

    let rules = GameRules::default();
    let starting_bank = rules.starting_bank.0;
    let seed = RngSeed::from_u64(7);
    let manager = Arc::new(SessionManager::new(
        rules,
        Arc::new(InMemorySessionStore::new()),
        move |id: &str, nonce: u64| seed.derive(id, nonce).to_rng(),
    ));

    let id_gen = IdGenerator::new("stress");
    let ids: Vec<String> = (0..NUM_SESSIONS).map(|_| id_gen.next_session_id()).collect();

    println!(
        "[STRESS] {} сессий, по {} раундов, ставка {}.",
        NUM_SESSIONS, ROUNDS_PER_SESSION, BET
    );

    let started = Instant::now();

    // Каждая сессия в своём потоке.
    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let stats = play_session(&manager, &id);
                (id, stats)
            })
        })
        .collect();

    let mut total_rounds = 0u64;
    let mut broken = 0usize;

    for handle in handles {
        let (id, stats) = match handle.join() {
            Ok(r) => r,
            Err(_) => {
                eprintln!("[STRESS] поток сессии упал");
                broken += 1;
                continue;
            }
        };
        total_rounds += stats.rounds;

        // Сохранение банка: старт - ставки + зачисления == текущий банк.
        let bank = manager.get_or_create(&id).lock().record.session.bank.0;
        let expected = starting_bank + stats.credited - stats.staked;
        if bank != expected {
            eprintln!(
                "[STRESS][{id}] НАРУШЕНО сохранение банка: bank={bank}, ожидалось {expected} ({stats:?})"
            );
            broken += 1;
        }
    }

    let elapsed = started.elapsed();
    println!(
        "[STRESS] Раундов: {} за {:.2?} ({:.0} раундов/с).",
        total_rounds,
        elapsed,
        total_rounds as f64 / elapsed.as_secs_f64().max(1e-9)
    );

    if broken == 0 {
        println!("[STRESS] Все сессии сошлись по банку.");
    } else {
        eprintln!("[STRESS] Сессий с нарушениями: {broken}");
        std::process::exit(1);
    }
}

fn play_session(manager: &SessionManager<DeterministicRng>, id: &str) -> SessionStats {
    let mut stats = SessionStats::default();

    for round in 0..ROUNDS_PER_SESSION {
        let result = match round % 3 {
            0 => blackjack_round(manager, id, &mut stats),
            1 => roulette_spin(manager, id, &mut stats, round),
            _ => slots_spin(manager, id, &mut stats),
        };

        match result {
            Ok(()) => stats.rounds += 1,
            Err(EngineError::InsufficientFunds) => break,
            Err(_) => stats.rejected += 1,
        }
    }

    stats
}

fn blackjack_round(
    manager: &SessionManager<DeterministicRng>,
    id: &str,
    stats: &mut SessionStats,
) -> Result<(), EngineError> {
    let bj = |action| manager.execute(id, Command::Blackjack { action });

    bj(BlackjackAction::PlaceBet(Chips::new(BET)))?;
    let mut snap = match bj(BlackjackAction::Deal)? {
        CommandResponse::Blackjack(s) => s,
        _ => return Err(EngineError::Internal("unexpected response")),
    };

    while snap.phase == Phase::PlayerTurn {
        let action = if snap.player_value < 17 {
            BlackjackAction::Hit
        } else {
            BlackjackAction::Stand
        };
        snap = match bj(action)? {
            CommandResponse::Blackjack(s) => s,
            _ => return Err(EngineError::Internal("unexpected response")),
        };
    }

    if let Some(st) = snap.last_settlement {
        stats.staked += st.stake.0;
        stats.credited += st.credit.0;
    }

    bj(BlackjackAction::NewRound)?;
    Ok(())
}

fn roulette_spin(
    manager: &SessionManager<DeterministicRng>,
    id: &str,
    stats: &mut SessionStats,
    round: u32,
) -> Result<(), EngineError> {
    let selection = match round % 5 {
        0 => Color::Green,
        1 | 2 => Color::Red,
        _ => Color::Black,
    };
    let cmd = Command::RouletteSpin(RouletteSpinCommand {
        bet: Chips::new(BET),
        selection,
        round: None,
    });
    if let CommandResponse::Roulette(resp) = manager.execute(id, cmd)? {
        stats.staked += resp.spin.bet.0;
        stats.credited += resp.spin.win.0;
    }
    Ok(())
}

fn slots_spin(
    manager: &SessionManager<DeterministicRng>,
    id: &str,
    stats: &mut SessionStats,
) -> Result<(), EngineError> {
    let cmd = Command::SlotsSpin(SlotsSpinCommand {
        bet: Chips::new(BET),
        round: None,
    });
    if let CommandResponse::Slots(resp) = manager.execute(id, cmd)? {
        stats.staked += resp.spin.bet.0;
        stats.credited += resp.spin.win.0;
    }
    Ok(())
}
