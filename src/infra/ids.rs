use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::SessionId;

/// Новый id сессии для сервера (uuid v4).
pub fn new_session_id() -> SessionId {
    Uuid::new_v4().to_string()
}

/// Последовательные id сессий вида `{prefix}-{n}`.
///
/// Удобно для CLI и стресс-теста: логи читаются глазами,
/// а seed сессии детерминирован при одинаковом мастер-seed.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_session_id(&self) -> SessionId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
