//! Query engine: lookup, pairwise comparison and top-N ranking.
//!
//! All three are pure functions over a borrowed [`Dataset`] snapshot. Name
//! matching is a literal, case-insensitive substring test against the stored
//! (already lower-cased) item name.
//!
//! ```text
//! lookup(q)        food ++ beverages ──filter(name ⊇ q)──▶ Vec<FoodItem>
//! compare(a, b)    food ++ beverages ──first(name ⊇ a), first(name ⊇ b)──▶ ComparisonResult
//! top_n(c, k, n)   category(c) ──top-K by nutrient k, ties by row order──▶ TopNResult
//! ```

use crate::dataset::{Category, Dataset, FoodItem};
use crate::error::{Error, Missing, Result};
use std::cmp::Ordering;
use std::str::FromStr;

/// Every item whose name contains `query`, in dataset order.
///
/// The query is trimmed and case-folded first; an empty query therefore
/// matches every item.
pub fn lookup(dataset: &Dataset, query: &str) -> Result<Vec<FoodItem>> {
    let needle = query.trim().to_lowercase();
    let matches: Vec<FoodItem> = dataset.iter().filter(|item| item.name.contains(&needle)).cloned().collect();

    if matches.is_empty() { Err(Error::NotFound(Missing::Item(query.to_string()))) } else { Ok(matches) }
}

fn first_match<'a>(dataset: &'a Dataset, name: &str) -> Option<&'a FoodItem> {
    let needle = name.to_lowercase();
    dataset.iter().find(|item| item.name.contains(&needle))
}

/// Side-by-side view of two items.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub first: FoodItem,
    pub second: FoodItem,
}

impl ComparisonResult {
    /// The item with strictly more protein, or `None` on an exact tie.
    pub fn richer_in_protein(&self) -> Option<&FoodItem> {
        match self.first.protein_g.partial_cmp(&self.second.protein_g) {
            Some(Ordering::Greater) => Some(&self.first),
            Some(Ordering::Less) => Some(&self.second),
            _ => None,
        }
    }

    /// One-line verdict shown under the comparison card.
    pub fn key_insight(&self) -> String {
        match self.richer_in_protein() {
            Some(item) => format!("✅ {} is richer in protein.", item.display_name()),
            None => "ℹ️ Both have similar protein levels.".to_string(),
        }
    }
}

/// Compare the first match for `name1` with the first match for `name2`.
///
/// Each side is resolved independently against food ++ beverages, so both
/// sides may resolve to the same row. The names are case-folded but not
/// trimmed.
pub fn compare(dataset: &Dataset, name1: &str, name2: &str) -> Result<ComparisonResult> {
    match (first_match(dataset, name1), first_match(dataset, name2)) {
        (Some(first), Some(second)) => Ok(ComparisonResult { first: first.clone(), second: second.clone() }),
        _ => Err(Error::NotFound(Missing::Pair(name1.to_string(), name2.to_string()))),
    }
}

/// Ranking criterion for [`top_n`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    LowFat,
    HighProtein,
    HighFibre,
}

impl Nutrient {
    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::LowFat => "low fat",
            Nutrient::HighProtein => "high protein",
            Nutrient::HighFibre => "high fibre",
        }
    }

    fn value(&self, item: &FoodItem) -> f64 {
        match self {
            Nutrient::LowFat => item.fat_g,
            Nutrient::HighProtein => item.protein_g,
            Nutrient::HighFibre => item.fibre_g,
        }
    }

    /// Ordering that puts the best candidate first.
    fn rank(&self, a: f64, b: f64) -> Ordering {
        match self {
            Nutrient::LowFat => a.total_cmp(&b),
            Nutrient::HighProtein | Nutrient::HighFibre => b.total_cmp(&a),
        }
    }
}

impl FromStr for Nutrient {
    type Err = Error;

    /// Accepts `low fat` / `low_fat`, `high protein` / `high_protein` and
    /// `high fibre` / `high_fibre`, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low fat" | "low_fat" => Ok(Nutrient::LowFat),
            "high protein" | "high_protein" => Ok(Nutrient::HighProtein),
            "high fibre" | "high_fibre" => Ok(Nutrient::HighFibre),
            _ => Err(Error::InvalidNutrient(s.to_string())),
        }
    }
}

/// Ranked items of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct TopNResult {
    pub category: Category,
    pub nutrient: Nutrient,
    /// The requested N (the list may be shorter).
    pub requested: usize,
    pub items: Vec<FoodItem>,
}

/// Parse `nutrient` and [`rank`] the category by it.
pub fn top_n(dataset: &Dataset, category: Category, nutrient: &str, n: usize) -> Result<TopNResult> {
    let nutrient: Nutrient = nutrient.parse()?;
    Ok(rank(dataset, category, nutrient, n))
}

/// The `n` best items of `category` for `nutrient`.
///
/// Uses a partial selection so only the head is fully sorted. Ties keep their
/// original row order.
pub fn rank(dataset: &Dataset, category: Category, nutrient: Nutrient, n: usize) -> TopNResult {
    let rows = dataset.category(category);
    let mut keyed: Vec<(usize, f64)> = rows.iter().enumerate().map(|(idx, item)| (idx, nutrient.value(item))).collect();

    let order = |a: &(usize, f64), b: &(usize, f64)| nutrient.rank(a.1, b.1).then(a.0.cmp(&b.0));

    if n < keyed.len() {
        if n > 0 {
            keyed.select_nth_unstable_by(n - 1, order);
        }
        keyed.truncate(n);
    }
    keyed.sort_by(order);

    TopNResult { category, nutrient, requested: n, items: keyed.into_iter().map(|(idx, _)| rows[idx].clone()).collect() }
}
