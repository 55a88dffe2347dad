//! In-memory nutrition table.
//!
//! A [`Dataset`] is two ordered sequences of [`FoodItem`]s, one per
//! [`Category`], exposed to the query engine as one logical collection in the
//! order food ++ beverages. Datasets are immutable: a reload builds a fresh
//! `Dataset` and swaps it into a [`DatasetHandle`] in one step, so a reader
//! holding a snapshot never sees a half-updated table.
//!
//! Loading from disk lives in `dataset/loader.rs`.

#[path = "dataset/loader.rs"]
mod loader;

pub use loader::{LoadError, load_csv, load_reader};

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

/// Which table an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Beverage,
}

impl Category {
    /// Parses the dialog's category answer. Only the exact words `food` and
    /// `beverages` are accepted, ignoring case.
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "food" => Some(Category::Food),
            "beverages" => Some(Category::Beverage),
            _ => None,
        }
    }

    /// The word users type for this category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Beverage => "beverages",
        }
    }
}

/// One row of the nutrition table.
///
/// `name` is stored lower-cased; use [`FoodItem::display_name`] for output.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub name: String,
    pub energy_kcal: f64,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub fibre_g: f64,
    pub category: Category,
}

impl FoodItem {
    /// Create an item with all nutrients at zero. The name is case-folded.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        FoodItem {
            name: name.into().to_lowercase(),
            energy_kcal: 0.0,
            carbs_g: 0.0,
            protein_g: 0.0,
            fat_g: 0.0,
            fibre_g: 0.0,
            category,
        }
    }

    pub fn energy(mut self, kcal: f64) -> Self {
        self.energy_kcal = kcal;
        self
    }

    pub fn carbs(mut self, grams: f64) -> Self {
        self.carbs_g = grams;
        self
    }

    pub fn protein(mut self, grams: f64) -> Self {
        self.protein_g = grams;
        self
    }

    pub fn fat(mut self, grams: f64) -> Self {
        self.fat_g = grams;
        self
    }

    pub fn fibre(mut self, grams: f64) -> Self {
        self.fibre_g = grams;
        self
    }

    /// Title-cased name, e.g. `"apple juice"` -> `"Apple Juice"`.
    pub fn display_name(&self) -> String {
        crate::format::title_case(&self.name)
    }
}

/// Immutable snapshot of both tables.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    food: Vec<FoodItem>,
    beverages: Vec<FoodItem>,
}

impl Dataset {
    /// Build a dataset from the two tables, in row order.
    ///
    /// Items are re-tagged with the category of the table they were passed in,
    /// so callers cannot smuggle a beverage into the food table.
    pub fn new(food: Vec<FoodItem>, beverages: Vec<FoodItem>) -> Self {
        let food = food.into_iter().map(|item| FoodItem { category: Category::Food, ..item }).collect();
        let beverages =
            beverages.into_iter().map(|item| FoodItem { category: Category::Beverage, ..item }).collect();
        Dataset { food, beverages }
    }

    /// Load both tables from CSV files.
    pub fn load(food_path: impl AsRef<Path>, beverage_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let food = load_csv(food_path, Category::Food)?;
        let beverages = load_csv(beverage_path, Category::Beverage)?;
        log::info!("loaded dataset: {} food rows, {} beverage rows", food.len(), beverages.len());
        Ok(Dataset { food, beverages })
    }

    pub fn food(&self) -> &[FoodItem] {
        &self.food
    }

    pub fn beverages(&self) -> &[FoodItem] {
        &self.beverages
    }

    /// Rows of a single category.
    pub fn category(&self, category: Category) -> &[FoodItem] {
        match category {
            Category::Food => &self.food,
            Category::Beverage => &self.beverages,
        }
    }

    /// All rows: food first, then beverages, each in original order.
    pub fn iter(&self) -> impl Iterator<Item = &FoodItem> {
        self.food.iter().chain(self.beverages.iter())
    }

    pub fn len(&self) -> usize {
        self.food.len() + self.beverages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared, swappable reference to the current [`Dataset`].
///
/// Readers call [`DatasetHandle::snapshot`] once per request and keep the
/// returned `Arc` for the whole request. [`DatasetHandle::swap`] replaces the
/// pointer under a short write lock; readers already holding the old snapshot
/// keep using it until they drop it.
#[derive(Debug)]
pub struct DatasetHandle {
    current: RwLock<Arc<Dataset>>,
}

impl DatasetHandle {
    pub fn new(dataset: Dataset) -> Self {
        DatasetHandle { current: RwLock::new(Arc::new(dataset)) }
    }

    pub fn snapshot(&self) -> Arc<Dataset> {
        self.current.read().clone()
    }

    /// Install `dataset` and return the snapshot it replaced.
    pub fn swap(&self, dataset: Dataset) -> Arc<Dataset> {
        std::mem::replace(&mut *self.current.write(), Arc::new(dataset))
    }
}
