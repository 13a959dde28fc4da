// src/bin/casino_dev_cli.rs

use std::sync::Arc;

use casino_engine::api::{
    BlackjackSnapshot, CardView, Command, CommandResponse, RouletteSpinCommand, SlotsSpinCommand,
};
use casino_engine::domain::chips::Chips;
use casino_engine::domain::hand::Phase;
use casino_engine::domain::rules::GameRules;
use casino_engine::domain::slots::Grid;
use casino_engine::domain::wheel::Color;
use casino_engine::engine::{ActionKind, BlackjackAction, SessionManager};
use casino_engine::infra::{IdGenerator, InMemorySessionStore, RngSeed};
use casino_engine::server::init_tracing;

fn main() {
    init_tracing("casino_engine=info");
    println!("casino_dev_cli: стартуем dev-CLI казино…");

    // 1. Детерминированный мастер-seed: прогон воспроизводится один в один.
    let seed = RngSeed::from_u64(2024);
    let id_gen = IdGenerator::new("cli");
    let manager = SessionManager::new(
        GameRules::default(),
        Arc::new(InMemorySessionStore::new()),
        move |id: &str, nonce: u64| seed.derive(id, nonce).to_rng(),
    );

    let session_id = id_gen.next_session_id();
    println!("[CLI] Сессия {session_id}, seed={}", seed.to_hex());

    // 2. Несколько раундов блэкджека по простой стратегии.
    println!();
    println!("================ BLACKJACK =================");
    for round in 1..=5 {
        play_blackjack_round(&manager, &session_id, round, Chips::new(25));
    }

    // 3. Рулетка: по одному спину на каждый цвет.
    println!();
    println!("================ ROULETTE =================");
    for color in [Color::Red, Color::Black, Color::Green] {
        let cmd = Command::RouletteSpin(RouletteSpinCommand {
            bet: Chips::new(10),
            selection: color,
            round: None,
        });
        match manager.execute(&session_id, cmd) {
            Ok(CommandResponse::Roulette(resp)) => {
                let s = resp.spin;
                println!(
                    "[CLI] round={} ставка {} на {} → выпало {} {} | выигрыш {} | банк {}",
                    s.round_id, s.bet, s.selection, s.outcome.number, s.outcome.color, s.win, s.bank
                );
                println!("[CLI] последние номера: {:?}", resp.snapshot.recent_numbers);
            }
            Ok(other) => println!("[CLI] неожиданный ответ: {other:?}"),
            Err(e) => println!("[CLI] ОШИБКА спина рулетки: {e}"),
        }
    }

    // 4. Слоты.
    println!();
    println!("================ SLOTS =================");
    for _ in 0..3 {
        let cmd = Command::SlotsSpin(SlotsSpinCommand {
            bet: Chips::new(5),
            round: None,
        });
        match manager.execute(&session_id, cmd) {
            Ok(CommandResponse::Slots(resp)) => {
                let s = resp.spin;
                print_grid(&s.outcome);
                for line in &s.lines {
                    println!("[CLI]   линия {:?}: {} → {}", line.line, line.symbol, line.amount);
                }
                println!("[CLI] round={} выигрыш {} | банк {}", s.round_id, s.win, s.bank);
            }
            Ok(other) => println!("[CLI] неожиданный ответ: {other:?}"),
            Err(e) => println!("[CLI] ОШИБКА спина слотов: {e}"),
        }
    }

    println!();
    println!("[CLI] Завершение работы dev-CLI.");
}

/// Один раунд: ставка, раздача, добор до 17 (double на 10/11), новый раунд.
fn play_blackjack_round<R: casino_engine::RandomSource>(
    manager: &SessionManager<R>,
    session_id: &str,
    round: u32,
    bet: Chips,
) {
    println!();
    println!("------ ROUND {round} ------");

    let mut snap = match blackjack(manager, session_id, BlackjackAction::PlaceBet(bet)) {
        Some(s) => s,
        None => return,
    };
    println!("[CLI] {} | банк {}", snap.message, snap.bank);

    snap = match blackjack(manager, session_id, BlackjackAction::Deal) {
        Some(s) => s,
        None => return,
    };
    debug_print_snapshot(&snap);

    while snap.phase == Phase::PlayerTurn {
        let action = if snap.legal_actions.contains(&ActionKind::Double)
            && (snap.player_value == 10 || snap.player_value == 11)
        {
            BlackjackAction::Double
        } else if snap.player_value < 17 {
            BlackjackAction::Hit
        } else {
            BlackjackAction::Stand
        };
        println!("[CLI] игрок: {:?}", action.kind());

        snap = match blackjack(manager, session_id, action) {
            Some(s) => s,
            None => return,
        };
        debug_print_snapshot(&snap);
    }

    if let Some(st) = snap.last_settlement {
        println!(
            "[CLI] итог: {:?} | ставка {} | зачислено {} | игрок {} vs дилер {}",
            st.outcome, st.stake, st.credit, st.player_total, st.dealer_total
        );
    }
    println!("[CLI] событий в истории раунда: {}", snap.history.len());

    let _ = blackjack(manager, session_id, BlackjackAction::NewRound);
}

fn blackjack<R: casino_engine::RandomSource>(
    manager: &SessionManager<R>,
    session_id: &str,
    action: BlackjackAction,
) -> Option<BlackjackSnapshot> {
    match manager.execute(session_id, Command::Blackjack { action }) {
        Ok(CommandResponse::Blackjack(snap)) => Some(snap),
        Ok(other) => {
            println!("[CLI] неожиданный ответ: {other:?}");
            None
        }
        Err(e) => {
            println!("[CLI] ОШИБКА действия {:?}: {e}", action.kind());
            None
        }
    }
}

fn cards_to_string(cards: &[CardView]) -> String {
    cards
        .iter()
        .map(|c| match c.card {
            Some(card) => card.to_string(),
            None => "??".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn debug_print_snapshot(snap: &BlackjackSnapshot) {
    println!(
        "[CLI] фаза {} | игрок [{}] = {} | дилер [{}] = {} | банк {} | ставка {}",
        snap.phase,
        cards_to_string(&snap.player_hand),
        snap.player_value,
        cards_to_string(&snap.dealer_hand),
        snap.dealer_value,
        snap.bank,
        snap.current_bet,
    );
    if !snap.message.is_empty() {
        println!("[CLI] сообщение: {}", snap.message);
    }
}

fn print_grid(grid: &Grid) {
    for row in grid {
        let cells: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        println!("[CLI]   {}", cells.join(" "));
    }
}
