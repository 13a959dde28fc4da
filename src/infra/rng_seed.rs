//! RngSeed — доменно-разделённый seed для RNG сессий.
//!
//! Позволяет:
//!   - хранить мастер-seed ([u8;32], из конфига в hex или из u64 в тестах);
//!   - детерминированно выводить seed конкретной сессии:
//!         new = H(domain || master || session_id || nonce)
//!   - создавать DeterministicRng из seed.
//!
//! С заданным мастер-seed каждая сессия воспроизводится целиком.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

const DOMAIN_TAG: &[u8] = b"CASINO_ENGINE_RNG_V1";

/// 32-байтовый seed для RNG.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Разобрать 64 hex-символа. `None`, если строка не hex или не 32 байта.
    pub fn from_hex(s: &str) -> Option<Self> {
        let raw = hex::decode(s.trim()).ok()?;
        let bytes: [u8; 32] = raw.try_into().ok()?;
        Some(Self { bytes })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Seed для конкретной сессии.
    ///
    /// `nonce` — счётчик внутри сессии (сколько раундов уже сыграно), чтобы
    /// восстановленная из хранилища сессия не повторяла уже выданные карты.
    pub fn derive(&self, session_id: &str, nonce: u64) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(DOMAIN_TAG);
        hasher.update(self.bytes);

        // Длина перед id, чтобы "ab"+"c" и "a"+"bc" не совпали.
        hasher.update((session_id.len() as u64).to_le_bytes());
        hasher.update(session_id.as_bytes());

        hasher.update(nonce.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed_bytes(self.bytes)
    }
}
