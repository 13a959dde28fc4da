//! Таблица маршрутов.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::*;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/sessions", post(create_session_handler))
        .route("/api/sessions/:id/reset", post(reset_session_handler))
        // Блэкджек
        .route("/api/sessions/:id/blackjack", get(blackjack_state_handler))
        .route("/api/sessions/:id/blackjack/bet", post(blackjack_bet_handler))
        .route(
            "/api/sessions/:id/blackjack/clear_bet",
            post(blackjack_clear_bet_handler),
        )
        .route("/api/sessions/:id/blackjack/deal", post(blackjack_deal_handler))
        .route("/api/sessions/:id/blackjack/hit", post(blackjack_hit_handler))
        .route("/api/sessions/:id/blackjack/stand", post(blackjack_stand_handler))
        .route("/api/sessions/:id/blackjack/double", post(blackjack_double_handler))
        .route(
            "/api/sessions/:id/blackjack/new_round",
            post(blackjack_new_round_handler),
        )
        // Рулетка
        .route("/api/sessions/:id/roulette", get(roulette_state_handler))
        .route("/api/sessions/:id/roulette/spin", post(roulette_spin_handler))
        // Слоты
        .route("/api/sessions/:id/slots", get(slots_state_handler))
        .route("/api/sessions/:id/slots/spin", post(slots_spin_handler))
        .with_state(state)
}
