use crate::dataset::{Dataset, DatasetHandle, FoodItem};
use crate::dialog::{Dialog, InMemorySessions, SessionStore, Turn};
use crate::error::{Error, Result};
use log::{info, warn};

/// Engine options.
#[derive(Debug, Clone)]
pub struct Options {
    /// How many items a top-N answer lists.
    pub top_n: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

/// Whether a reply carries an answer or a (recoverable) error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Error,
}

/// Text returned to the transport for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub status: Status,
}

/// Row counts and first rows of the loaded tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    pub food_rows: usize,
    pub beverage_rows: usize,
    pub food_sample: Option<FoodItem>,
    pub beverage_sample: Option<FoodItem>,
}

impl DatasetInfo {
    fn of(dataset: &Dataset) -> Self {
        DatasetInfo {
            food_rows: dataset.food().len(),
            beverage_rows: dataset.beverages().len(),
            food_sample: dataset.food().first().cloned(),
            beverage_sample: dataset.beverages().first().cloned(),
        }
    }
}

/// The conversational engine: dataset snapshot, dialog sessions and options.
///
/// `NutriBot` is `Sync`; share it between request handlers by reference or
/// behind an `Arc`.
///
/// # Example
/// ```
/// use nutribot::{Category, Dataset, FoodItem, NutriBot, Status};
///
/// let bot = NutriBot::new(Dataset::new(
///     vec![
///         FoodItem::new("apple", Category::Food).protein(0.3),
///         FoodItem::new("banana", Category::Food).protein(1.1),
///     ],
///     vec![],
/// ));
///
/// bot.respond("10.0.0.7", "compare");
/// bot.respond("10.0.0.7", "apple");
/// let reply = bot.respond("10.0.0.7", "banana");
///
/// assert_eq!(reply.status, Status::Ok);
/// assert!(reply.text.ends_with("✅ Banana is richer in protein."));
/// ```
#[derive(Debug)]
pub struct NutriBot<S = InMemorySessions> {
    dataset: DatasetHandle,
    dialog: Dialog<S>,
    options: Options,
}

impl NutriBot<InMemorySessions> {
    /// Engine with in-memory sessions and default [`Options`].
    pub fn new(dataset: Dataset) -> Self {
        Self::with_store(dataset, InMemorySessions::new(), Options::default())
    }

    pub fn with_options(dataset: Dataset, options: Options) -> Self {
        Self::with_store(dataset, InMemorySessions::new(), options)
    }
}

impl<S: SessionStore> NutriBot<S> {
    pub fn with_store(dataset: Dataset, sessions: S, options: Options) -> Self {
        NutriBot { dataset: DatasetHandle::new(dataset), dialog: Dialog::with_store(sessions), options }
    }

    /// Handle one request and render the reply.
    pub fn respond(&self, session_id: &str, text: &str) -> Reply {
        crate::format::render(&self.turn(session_id, text))
    }

    /// Handle one request and return the structured outcome.
    ///
    /// The dataset snapshot is taken once, so a concurrent [`NutriBot::reload`]
    /// never changes the table halfway through a request.
    pub fn turn(&self, session_id: &str, text: &str) -> Turn {
        let dataset = self.dataset.snapshot();
        self.dialog.handle(&dataset, &self.options, session_id, text)
    }

    /// Replace the dataset for all subsequent requests.
    pub fn reload(&self, dataset: Dataset) -> DatasetInfo {
        let info = DatasetInfo::of(&dataset);
        self.dataset.swap(dataset);
        info!("dataset reloaded: {} food rows, {} beverage rows", info.food_rows, info.beverage_rows);
        info
    }

    /// Run `load` and swap in its result. On failure the current dataset
    /// stays in place and the error is returned as [`Error::LoaderFailure`].
    pub fn reload_with<F, E>(&self, load: F) -> Result<DatasetInfo>
    where
        F: FnOnce() -> std::result::Result<Dataset, E>,
        E: std::fmt::Display,
    {
        match load() {
            Ok(dataset) => Ok(self.reload(dataset)),
            Err(err) => {
                warn!("dataset reload failed, keeping current data: {err}");
                Err(Error::LoaderFailure(err.to_string()))
            }
        }
    }

    pub fn dataset_info(&self) -> DatasetInfo {
        DatasetInfo::of(&self.dataset.snapshot())
    }

    pub fn sessions(&self) -> &S {
        self.dialog.sessions()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Category, LoadError};
    use crate::dialog::Session;

    fn reference_dataset() -> Dataset {
        Dataset::new(
            vec![
                FoodItem::new("apple", Category::Food).energy(52.0).carbs(14.0).protein(0.3).fat(0.2).fibre(2.4),
                FoodItem::new("banana", Category::Food).energy(89.0).carbs(23.0).protein(1.1).fat(0.3).fibre(2.6),
            ],
            vec![FoodItem::new("green tea", Category::Beverage).energy(1.0)],
        )
    }

    #[test]
    fn compare_dialog_renders_both_cards() {
        let bot = NutriBot::new(reference_dataset());

        let reply = bot.respond("10.0.0.1", "compare");
        assert_eq!(reply, Reply { text: "Let's compare two foods! Please enter the first food item:".into(), status: Status::Ok });
        assert_eq!(bot.dialog.session("10.0.0.1"), Some(Session::AwaitingFirstFood));

        let reply = bot.respond("10.0.0.1", "apple");
        assert_eq!(reply.text, "Got it! Now enter the second food item:");

        let reply = bot.respond("10.0.0.1", "banana");
        assert_eq!(reply.status, Status::Ok);
        assert!(reply.text.starts_with("📊 Comparison:"));
        assert!(reply.text.contains("🔹 Apple:\n   🔥 52 kcal | 🍞 14g | 🥚 0.3g | 🧈 0.2g | 🌾 2.4g"));
        assert!(reply.text.contains("🔹 Banana:\n   🔥 89 kcal | 🍞 23g | 🥚 1.1g | 🧈 0.3g | 🌾 2.6g"));
        assert!(reply.text.ends_with("✅ Banana is richer in protein."));
        assert!(bot.sessions().is_empty());
    }

    #[test]
    fn errors_are_replies_not_faults() {
        let bot = NutriBot::new(reference_dataset());

        let reply = bot.respond("a", "durian");
        assert_eq!(reply.status, Status::Error);
        assert_eq!(reply.text, "❌ Sorry, I couldn't find that food item.");

        bot.respond("a", "top");
        let reply = bot.respond("a", "snacks");
        assert_eq!(reply, Reply { text: "Please specify either 'food' or 'beverages'.".into(), status: Status::Error });

        bot.respond("a", "food");
        let reply = bot.respond("a", "sweet");
        assert_eq!(reply, Reply { text: "❌ Invalid nutrient type.".into(), status: Status::Error });
        assert!(bot.sessions().is_empty());
    }

    #[test]
    fn top_n_uses_options() {
        let bot = NutriBot::with_options(reference_dataset(), Options { top_n: 1 });
        bot.respond("a", "suggest");
        bot.respond("a", "food");
        let reply = bot.respond("a", "high protein");
        assert!(reply.text.starts_with("Top 1 items for High Protein in Food:\n"));
        assert!(reply.text.contains("Banana"));
        assert!(!reply.text.contains("Apple"));
    }

    #[test]
    fn reload_swaps_the_table() {
        let bot = NutriBot::new(reference_dataset());
        assert_eq!(bot.respond("a", "kiwi").status, Status::Error);

        let info = bot.reload(Dataset::new(vec![FoodItem::new("Kiwi", Category::Food)], vec![]));
        assert_eq!(info.food_rows, 1);
        assert_eq!(info.beverage_rows, 0);
        assert_eq!(info.food_sample.map(|i| i.name), Some("kiwi".to_string()));

        assert!(bot.respond("a", "kiwi").text.starts_with("🍽️ Kiwi:"));
        assert_eq!(bot.respond("a", "apple").status, Status::Error);
    }

    #[test]
    fn failed_reload_keeps_current_data() {
        let bot = NutriBot::new(reference_dataset());
        let before = bot.dataset_info();

        let err = bot.reload_with(|| Err::<Dataset, _>(LoadError::MissingColumn("fat_g"))).unwrap_err();
        assert_eq!(err, Error::LoaderFailure("missing required column 'fat_g'".to_string()));
        assert_eq!(bot.dataset_info(), before);
        assert!(bot.respond("a", "apple").text.starts_with("🍽️ Apple:"));

        let info = bot.reload_with(|| Ok::<_, LoadError>(Dataset::default())).unwrap();
        assert_eq!((info.food_rows, info.beverage_rows), (0, 0));
    }

    #[test]
    fn dialog_survives_reload_mid_flow() {
        let bot = NutriBot::new(reference_dataset());
        bot.respond("a", "compare");
        bot.respond("a", "apple");

        bot.reload(Dataset::new(vec![FoodItem::new("apple", Category::Food).protein(5.0)], vec![]));
        let reply = bot.respond("a", "banana");
        assert_eq!(reply.text, "❌ One or both foods not found.");
        assert!(bot.sessions().is_empty());
    }

    #[test]
    fn readers_never_see_a_partial_reload() {
        let small = || Dataset::new(vec![FoodItem::new("oats", Category::Food)], vec![FoodItem::new("oat milk", Category::Beverage)]);
        let large = || {
            Dataset::new(
                (0..50).map(|i| FoodItem::new(format!("oat bar {i}"), Category::Food)).collect(),
                (0..50).map(|i| FoodItem::new(format!("oat drink {i}"), Category::Beverage)).collect(),
            )
        };
        let bot = NutriBot::new(small());

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..200 {
                    bot.reload(if i % 2 == 0 { large() } else { small() });
                }
            });
            for worker in 0..4 {
                let bot = &bot;
                scope.spawn(move || {
                    for _ in 0..200 {
                        match bot.turn(&format!("reader-{worker}"), "oat") {
                            Turn::Found(items) => assert!(items.len() == 2 || items.len() == 100, "saw {} rows", items.len()),
                            other => panic!("unexpected turn: {other:?}"),
                        }
                    }
                });
            }
        });
    }
}
