//! A rule-based conversational engine over a small nutrition table.
//!
//! Every request is a `(session_id, text)` pair. If the session is in the
//! middle of a multi-step flow (compare two items, top-N by nutrient) the
//! dialog state machine consumes the text; otherwise the intent classifier
//! decides what to do, and anything it does not recognise is treated as a
//! name lookup.
//!
//! ```
//! use nutribot::{Category, Dataset, FoodItem, NutriBot};
//!
//! let dataset = Dataset::new(
//!     vec![FoodItem::new("apple", Category::Food).protein(0.3)],
//!     vec![FoodItem::new("orange juice", Category::Beverage).protein(0.7)],
//! );
//! let bot = NutriBot::new(dataset);
//!
//! let reply = bot.respond("client-1", "juice");
//! assert!(reply.text.contains("Orange Juice"));
//! ```

extern crate self as nutribot;

#[macro_use]
mod macros;
mod api;
mod dataset;
mod dialog;
mod error;
mod format;
mod intent;
mod query;

pub use api::{DatasetInfo, NutriBot, Options, Reply, Status};
pub use dataset::{Category, Dataset, DatasetHandle, FoodItem, LoadError, load_csv, load_reader};
pub use dialog::{Dialog, InMemorySessions, Message, Session, SessionStore, Turn};
pub use error::{Error, Missing, Result};
pub use format::{render, title_case};
pub use intent::{Classification, Cue, Intent, classify, classify_verbose};
pub use query::{ComparisonResult, Nutrient, TopNResult, compare, lookup, rank, top_n};
