//! Session storage for in-progress dialog flows.
//!
//! A session exists only while a compare or top-N flow is running; "idle" is
//! the absence of an entry. The store never expires entries on its own: a
//! flow the user abandons stays until the same session id completes it.

use dashmap::DashMap;

/// Where a session is inside a multi-step flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// Compare, step 1: waiting for the first item name.
    AwaitingFirstFood,
    /// Compare, step 2: waiting for the second item name.
    AwaitingSecondFood { food1: String },
    /// Top-N, step 1: waiting for `food` or `beverages`.
    AwaitingCategory,
    /// Top-N, step 2: waiting for the nutrient criterion.
    AwaitingNutrient { category: crate::dataset::Category },
}

impl Session {
    /// `"compare"` or `"top"`.
    pub fn mode(&self) -> &'static str {
        match self {
            Session::AwaitingFirstFood | Session::AwaitingSecondFood { .. } => "compare",
            Session::AwaitingCategory | Session::AwaitingNutrient { .. } => "top",
        }
    }

    /// 1 or 2.
    pub fn step(&self) -> u8 {
        match self {
            Session::AwaitingFirstFood | Session::AwaitingCategory => 1,
            Session::AwaitingSecondFood { .. } | Session::AwaitingNutrient { .. } => 2,
        }
    }
}

/// Storage for sessions keyed by an opaque session id.
///
/// Each call is atomic on its own, but a dialog step is a `get` followed by a
/// `put` or `remove`. Two concurrent requests for the same id may therefore
/// interleave, and the last write wins.
pub trait SessionStore: Send + Sync {
    fn get(&self, session_id: &str) -> Option<Session>;

    fn put(&self, session_id: &str, session: Session);

    fn remove(&self, session_id: &str) -> Option<Session>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sharded in-memory store. Requests for different ids do not contend.
#[derive(Debug, Default)]
pub struct InMemorySessions {
    sessions: DashMap<String, Session>,
}

impl InMemorySessions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessions {
    fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }

    fn put(&self, session_id: &str, session: Session) {
        self.sessions.insert(session_id.to_string(), session);
    }

    fn remove(&self, session_id: &str) -> Option<Session> {
        self.sessions.remove(session_id).map(|(_, session)| session)
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
