//! Движок игровых раундов казино: блэкджек, рулетка, слоты.
//!
//! Слои (от листьев к краю):
//!   - `domain` — карты, шуз, руки, колесо, символы, банк сессии, правила;
//!   - `eval`   — чистые функции исхода и выплаты;
//!   - `engine` — фазы, допустимые действия, одно списание и одно зачисление на раунд;
//!   - `state`  — запись сессии и живая сессия со своим RNG;
//!   - `infra`  — RNG, seed'ы, id, хранилище;
//!   - `api`    — команды, запросы, DTO, ошибки для клиента;
//!   - `server` — HTTP-адаптер на axum;
//!   - `config` — TOML-конфиг.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod server;
pub mod state;

pub use config::{ConfigError, EngineConfig};
pub use engine::{EngineError, RandomSource, SessionManager};
pub use state::{GameSession, SessionRecord};
