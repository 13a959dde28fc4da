//! HTTP-обработчики: JSON запроса → команда движка → снапшот.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::api::commands::{BetRequest, Command, RouletteSpinRequest, SlotsSpinRequest};
use crate::api::dto::{CommandResponse, SessionCreatedDto};
use crate::api::errors::ApiError;
use crate::api::queries::{Query, QueryResponse};
use crate::engine::actions::BlackjackAction;
use crate::engine::errors::EngineError;
use crate::engine::session_manager::SessionManager;
use crate::infra::ids::new_session_id;
use crate::infra::rng::DeterministicRng;

/// Общее состояние обработчиков.
pub struct AppState {
    pub manager: SessionManager<DeterministicRng>,
}

pub type SharedState = Arc<AppState>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

/// Команда в сессию. Ошибка разбора запроса тоже пишется в `message`
/// сессии, как и ошибка самого движка.
fn run_command(
    state: &AppState,
    id: &str,
    command: Result<Command, EngineError>,
) -> Result<Json<CommandResponse>, ApiError> {
    match command {
        Ok(cmd) => Ok(Json(state.manager.execute(id, cmd)?)),
        Err(err) => {
            state.manager.with_session(id, |session, _| {
                session.record.session.set_message(err.to_string())
            });
            Err(err.into())
        }
    }
}

fn blackjack(
    state: &AppState,
    id: &str,
    action: BlackjackAction,
) -> Result<Json<CommandResponse>, ApiError> {
    run_command(state, id, Ok(Command::Blackjack { action }))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(v)| v)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub async fn health_handler(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.manager.session_count(),
    }))
}

pub async fn create_session_handler(
    State(state): State<SharedState>,
) -> (StatusCode, Json<SessionCreatedDto>) {
    let session_id = new_session_id();
    let shared = state.manager.get_or_create(&session_id);
    let blackjack = shared.lock().blackjack_snapshot();
    (
        StatusCode::CREATED,
        Json(SessionCreatedDto {
            session_id,
            blackjack,
        }),
    )
}

// ---------- blackjack ----------

pub async fn blackjack_state_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Json<QueryResponse> {
    Json(state.manager.query(&id, Query::Blackjack))
}

pub async fn blackjack_bet_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<BetRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let req = body(payload)?;
    run_command(&state, &id, req.into_command())
}

pub async fn blackjack_clear_bet_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    blackjack(&state, &id, BlackjackAction::ClearBet)
}

pub async fn blackjack_deal_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    blackjack(&state, &id, BlackjackAction::Deal)
}

pub async fn blackjack_hit_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    blackjack(&state, &id, BlackjackAction::Hit)
}

pub async fn blackjack_stand_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    blackjack(&state, &id, BlackjackAction::Stand)
}

pub async fn blackjack_double_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    blackjack(&state, &id, BlackjackAction::Double)
}

pub async fn blackjack_new_round_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    blackjack(&state, &id, BlackjackAction::NewRound)
}

pub async fn reset_session_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    run_command(&state, &id, Ok(Command::Reset))
}

// ---------- roulette / slots ----------

pub async fn roulette_state_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Json<QueryResponse> {
    Json(state.manager.query(&id, Query::Roulette))
}

pub async fn roulette_spin_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<RouletteSpinRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let req = body(payload)?;
    run_command(&state, &id, req.into_command())
}

pub async fn slots_state_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Json<QueryResponse> {
    Json(state.manager.query(&id, Query::Slots))
}

pub async fn slots_spin_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<SlotsSpinRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let req = body(payload)?;
    run_command(&state, &id, req.into_command())
}
