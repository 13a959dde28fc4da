use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::api::commands::Command;
use crate::api::dto::CommandResponse;
use crate::api::queries::{Query, QueryResponse};
use crate::domain::rules::GameRules;
use crate::domain::SessionId;
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;
use crate::infra::persistence::SessionStore;
use crate::state::{GameSession, SessionRecord};

/// Фабрика RNG для сессии: `(session_id, rounds_played) -> R`.
pub type RngFactory<R> = Box<dyn Fn(&str, u64) -> R + Send + Sync>;

/// Живая сессия под собственным мьютексом.
pub type SharedSession<R> = Arc<Mutex<GameSession<R>>>;

/// Менеджер сессий:
/// - держит по одной `GameSession` на id;
/// - любое действие берёт мьютекс сессии на всё время выполнения,
///   так что банк одной сессии меняет строго одно действие за раз;
/// - разные сессии работают параллельно, общие только неизменяемые правила;
/// - после каждого действия (успешного или нет) запись уходит в хранилище.
pub struct SessionManager<R> {
    rules: Arc<GameRules>,
    sessions: DashMap<SessionId, SharedSession<R>>,
    store: Arc<dyn SessionStore>,
    rng_factory: RngFactory<R>,
}

impl<R: RandomSource> SessionManager<R> {
    pub fn new(
        rules: GameRules,
        store: Arc<dyn SessionStore>,
        rng_factory: impl Fn(&str, u64) -> R + Send + Sync + 'static,
    ) -> Self {
        Self {
            rules: Arc::new(rules),
            sessions: DashMap::new(),
            store,
            rng_factory: Box::new(rng_factory),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Найти сессию в памяти, иначе восстановить из хранилища,
    /// иначе создать новую со стартовым банком.
    pub fn get_or_create(&self, id: &str) -> SharedSession<R> {
        if let Some(existing) = self.sessions.get(id) {
            return Arc::clone(existing.value());
        }

        let entry = self.sessions.entry(id.to_string()).or_insert_with(|| {
            let record = match self.store.load(id) {
                Some(record) => {
                    info!(session = id, bank = record.session.bank.0, "session restored");
                    record
                }
                None => {
                    let record = SessionRecord::new(id, &self.rules);
                    self.store.save(id, &record);
                    info!(session = id, bank = record.session.bank.0, "session created");
                    record
                }
            };
            let rng = (self.rng_factory)(id, record.session.rounds_played);
            Arc::new(Mutex::new(GameSession::new(record, rng)))
        });

        Arc::clone(entry.value())
    }

    /// Выполнить замыкание под мьютексом сессии и сохранить запись.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameSession<R>, &GameRules) -> T,
    ) -> T {
        let shared = self.get_or_create(id);
        let mut session = shared.lock();
        let out = f(&mut *session, &self.rules);
        self.store.save(id, &session.record);
        out
    }

    /// Выполнить команду в сессии.
    pub fn execute(&self, id: &str, command: Command) -> Result<CommandResponse, EngineError> {
        self.with_session(id, |session, rules| session.execute(rules, command))
    }

    /// Снапшот без изменения состояния.
    pub fn query(&self, id: &str, query: Query) -> QueryResponse {
        let shared = self.get_or_create(id);
        let session = shared.lock();
        session.query(&self.rules, query)
    }

    pub fn has_session(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Выгрузить сессию из памяти и из хранилища.
    ///
    /// Сначала убираем из карты, затем ждём мьютекс: действие, которое уже
    /// держит сессию, сохранится раньше, чем запись будет стёрта.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id);
        let _guard = removed.as_ref().map(|(_, shared)| shared.lock());
        self.store.remove(id);
        removed.is_some()
    }
}
