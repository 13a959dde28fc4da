//! Инфраструктурный слой вокруг движка казино:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - абстракция хранения сессий.

pub mod ids;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use ids::*;
pub use persistence::{InMemorySessionStore, SessionStore};
pub use rng::*;
pub use rng_seed::RngSeed;
