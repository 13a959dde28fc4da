use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::SessionId;
use crate::state::SessionRecord;

/// Абстракция хранилища сессий.
///
/// Долговечность на совести реализации. Движку нужно только
/// «загрузить по id» и «сохранить после действия».
pub trait SessionStore: Send + Sync {
    fn load(&self, id: &str) -> Option<SessionRecord>;

    fn save(&self, id: &str, record: &SessionRecord);

    fn remove(&self, id: &str);
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    records: RwLock<HashMap<SessionId, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: &str) -> Option<SessionRecord> {
        self.records.read().get(id).cloned()
    }

    fn save(&self, id: &str, record: &SessionRecord) {
        self.records.write().insert(id.to_string(), record.clone());
    }

    fn remove(&self, id: &str) {
        self.records.write().remove(id);
    }
}
