//! Dialog state machine.
//!
//! ```text
//!            CompareInit                 any text               any text
//!   Idle ───────────────▶ AwaitingFirstFood ──────▶ AwaitingSecondFood ──────▶ compare() ──▶ Idle
//!     │
//!     │      TopInit                  food|beverages               any text
//!     └─────────────────▶ AwaitingCategory ──────────▶ AwaitingNutrient ──────▶ top_n() ──▶ Idle
//!                           ▲        │ anything else
//!                           └────────┘ (reprompt, unchanged)
//! ```
//!
//! In `Idle` every other intent is answered immediately and no session is
//! created. The final step of each flow always deletes the session, whether
//! the query succeeded or not. There is no cancel command.

#[path = "dialog/session.rs"]
mod session;

pub use session::{InMemorySessions, Session, SessionStore};

use crate::api::Options;
use crate::dataset::{Category, Dataset, FoodItem};
use crate::error::Error;
use crate::intent::{Intent, classify};
use crate::query::{self, ComparisonResult, TopNResult};
use log::debug;

/// Fixed replies: canned answers and flow prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    Greeting,
    Help,
    Thanks,
    Menu,
    NutritionInfo,
    AskFirstFood,
    AskSecondFood,
    AskCategory,
    AskNutrient,
}

/// Outcome of one request, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    Say(Message),
    Found(Vec<FoodItem>),
    Compared(ComparisonResult),
    Ranked(TopNResult),
    Failed(Error),
}

impl Turn {
    pub fn is_error(&self) -> bool {
        matches!(self, Turn::Failed(_))
    }
}

impl<T: Into<Turn>> From<crate::error::Result<T>> for Turn {
    fn from(result: crate::error::Result<T>) -> Self {
        result.map_or_else(Turn::Failed, Into::into)
    }
}

impl From<Vec<FoodItem>> for Turn {
    fn from(items: Vec<FoodItem>) -> Self {
        Turn::Found(items)
    }
}

impl From<ComparisonResult> for Turn {
    fn from(result: ComparisonResult) -> Self {
        Turn::Compared(result)
    }
}

impl From<TopNResult> for Turn {
    fn from(result: TopNResult) -> Self {
        Turn::Ranked(result)
    }
}

/// Routes each request through the active session, the intent classifier,
/// or a plain lookup.
#[derive(Debug, Default)]
pub struct Dialog<S = InMemorySessions> {
    sessions: S,
}

impl Dialog<InMemorySessions> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SessionStore> Dialog<S> {
    pub fn with_store(sessions: S) -> Self {
        Dialog { sessions }
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Current session for `session_id`, `None` when idle.
    pub fn session(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id)
    }

    /// Process one request against `dataset`.
    pub fn handle(&self, dataset: &Dataset, options: &Options, session_id: &str, text: &str) -> Turn {
        match self.sessions.get(session_id) {
            Some(session) => self.advance(dataset, options, session_id, session, text),
            None => self.start(dataset, session_id, text),
        }
    }

    fn start(&self, dataset: &Dataset, session_id: &str, text: &str) -> Turn {
        match classify(text) {
            Intent::Greeting => Turn::Say(Message::Greeting),
            Intent::Help => Turn::Say(Message::Help),
            Intent::Thanks => Turn::Say(Message::Thanks),
            Intent::Menu => Turn::Say(Message::Menu),
            Intent::NutritionInfoPrompt => Turn::Say(Message::NutritionInfo),
            Intent::CompareInit => {
                self.enter(session_id, Session::AwaitingFirstFood);
                Turn::Say(Message::AskFirstFood)
            }
            Intent::TopInit => {
                self.enter(session_id, Session::AwaitingCategory);
                Turn::Say(Message::AskCategory)
            }
            Intent::None => query::lookup(dataset, text).into(),
        }
    }

    fn advance(&self, dataset: &Dataset, options: &Options, session_id: &str, session: Session, text: &str) -> Turn {
        match session {
            Session::AwaitingFirstFood => {
                self.enter(session_id, Session::AwaitingSecondFood { food1: text.to_string() });
                Turn::Say(Message::AskSecondFood)
            }
            Session::AwaitingSecondFood { food1 } => {
                self.finish(session_id);
                query::compare(dataset, &food1, text).into()
            }
            Session::AwaitingCategory => match Category::parse(text) {
                Some(category) => {
                    self.enter(session_id, Session::AwaitingNutrient { category });
                    Turn::Say(Message::AskNutrient)
                }
                None => {
                    debug!("session {session_id}: rejected category {text:?}");
                    Turn::Failed(Error::InvalidCategory(text.to_string()))
                }
            },
            Session::AwaitingNutrient { category } => {
                self.finish(session_id);
                query::top_n(dataset, category, text, options.top_n).into()
            }
        }
    }

    fn enter(&self, session_id: &str, session: Session) {
        debug!("session {session_id}: {} step {}", session.mode(), session.step());
        self.sessions.put(session_id, session);
    }

    fn finish(&self, session_id: &str) {
        if let Some(session) = self.sessions.remove(session_id) {
            debug!("session {session_id}: {} finished", session.mode());
        }
    }
}
