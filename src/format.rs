//! Reply text.
//!
//! Every [`Turn`] renders through [`render`] into a fixed template. Nutrient
//! fields always appear in the same order: energy, carbs, protein, fat, fibre
//! for cards and comparisons; energy, fat, protein, fibre for top-N lists.

use crate::api::{Reply, Status};
use crate::dataset::FoodItem;
use crate::dialog::{Message, Turn};
use crate::error::{Error, Missing};
use crate::query::{ComparisonResult, TopNResult};

/// Capitalise the first letter of every run of letters and lower-case the
/// rest, so `"o'brien's 100g mix"` becomes `"O'Brien'S 100G Mix"`.
pub fn title_case(text: &str) -> String {
    regex!(r"\p{L}+")
        .replace_all(text, |caps: &regex::Captures| {
            let word = &caps[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .into_owned()
}

/// Turn an engine outcome into the text shown to the user.
pub fn render(turn: &Turn) -> Reply {
    match turn {
        Turn::Say(message) => Reply { text: message_text(*message), status: Status::Ok },
        Turn::Found(items) => Reply { text: nutrition_cards(items), status: Status::Ok },
        Turn::Compared(result) => Reply { text: comparison_card(result), status: Status::Ok },
        Turn::Ranked(result) => Reply { text: top_list(result), status: Status::Ok },
        Turn::Failed(err) => Reply { text: error_text(err), status: Status::Error },
    }
}

pub(crate) fn message_text(message: Message) -> String {
    match message {
        Message::Greeting => {
            "👋 Hello! I'm NutriBot. How may I assist you today? Type MENU to see all available commands.".to_string()
        }
        Message::Help => concat!(
            "😊 I can help you with:\n",
            "1. 🍽️ Nutritional info of any food or drink\n",
            "2. ⚖️ Compare two foods\n",
            "3. 🔍 Suggest top low-fat, high-protein, or fiber-rich items\n",
            "Type one of these to get started!"
        )
        .to_string(),
        Message::Thanks => "You're most welcome! 💚".to_string(),
        Message::Menu => concat!(
            "\nWhat would you like to do?\n",
            "1️⃣ Know nutrition info\n",
            "2️⃣ Compare two food items\n",
            "3️⃣ Get top 5 (low fat/high protein/high fibre)\n"
        )
        .to_string(),
        Message::NutritionInfo => {
            "Sure! Please enter the name of the food or drink you want nutritional info for:".to_string()
        }
        Message::AskFirstFood => "Let's compare two foods! Please enter the first food item:".to_string(),
        Message::AskSecondFood => "Got it! Now enter the second food item:".to_string(),
        Message::AskCategory => "Great! First, should I search in 'food' or 'beverages'?".to_string(),
        Message::AskNutrient => "Now choose nutrient type - 'low fat', 'high protein', or 'high fibre':".to_string(),
    }
}

pub(crate) fn error_text(err: &Error) -> String {
    match err {
        Error::NotFound(Missing::Item(_)) => "❌ Sorry, I couldn't find that food item.".to_string(),
        Error::NotFound(Missing::Pair(..)) => "❌ One or both foods not found.".to_string(),
        Error::InvalidCategory(_) => "Please specify either 'food' or 'beverages'.".to_string(),
        Error::InvalidNutrient(_) => "❌ Invalid nutrient type.".to_string(),
        Error::LoaderFailure(message) => format!("⚠️ Could not load the nutrition data: {message}"),
    }
}

fn nutrition_card(item: &FoodItem) -> String {
    format!(
        "🍽️ {}:\n   🔥 Energy: {} kcal\n   🍞 Carbs: {} g\n   🥚 Protein: {} g\n   🧈 Fat: {} g\n   🌾 Fibre: {} g",
        item.display_name(),
        item.energy_kcal,
        item.carbs_g,
        item.protein_g,
        item.fat_g,
        item.fibre_g
    )
}

fn nutrition_cards(items: &[FoodItem]) -> String {
    items.iter().map(nutrition_card).collect::<Vec<_>>().join("\n\n")
}

fn comparison_side(item: &FoodItem) -> String {
    format!(
        "🔹 {}:\n   🔥 {} kcal | 🍞 {}g | 🥚 {}g | 🧈 {}g | 🌾 {}g\n",
        item.display_name(),
        item.energy_kcal,
        item.carbs_g,
        item.protein_g,
        item.fat_g,
        item.fibre_g
    )
}

fn comparison_card(result: &ComparisonResult) -> String {
    format!(
        "📊 Comparison:\n\n{}\n{}\n{}",
        comparison_side(&result.first),
        comparison_side(&result.second),
        result.key_insight()
    )
}

fn top_list(result: &TopNResult) -> String {
    let mut out = format!(
        "Top {} items for {} in {}:\n",
        result.requested,
        title_case(result.nutrient.label()),
        title_case(result.category.label())
    );
    for item in &result.items {
        out.push_str(&format!(
            "\n🍽️ {}:\n   🔥 Energy: {} kcal\n   🧈 Fat: {} g\n   🥚 Protein: {} g\n   🌾 Fibre: {} g\n",
            item.display_name(),
            item.energy_kcal,
            item.fat_g,
            item.protein_g,
            item.fibre_g
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Category, Dataset};
    use crate::query::{Nutrient, compare, rank};

    fn apple() -> FoodItem {
        FoodItem::new("apple", Category::Food).energy(52.0).carbs(14.0).protein(0.3).fat(0.2).fibre(2.4)
    }

    fn banana() -> FoodItem {
        FoodItem::new("banana", Category::Food).energy(89.0).carbs(23.0).protein(1.1).fat(0.3).fibre(2.6)
    }

    #[test]
    fn title_case_follows_word_runs() {
        assert_eq!(title_case("apple juice"), "Apple Juice");
        assert_eq!(title_case("WHOLE milk"), "Whole Milk");
        assert_eq!(title_case("o'brien's 100g mix"), "O'Brien'S 100G Mix");
        assert_eq!(title_case("pie (baked)"), "Pie (Baked)");
        assert_eq!(title_case("crème brûlée"), "Crème Brûlée");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn nutrition_card_lists_fields_in_order() {
        let reply = render(&Turn::Found(vec![apple()]));
        assert_eq!(reply.status, Status::Ok);
        assert_eq!(
            reply.text,
            "🍽️ Apple:\n   🔥 Energy: 52 kcal\n   🍞 Carbs: 14 g\n   🥚 Protein: 0.3 g\n   🧈 Fat: 0.2 g\n   🌾 Fibre: 2.4 g"
        );
    }

    #[test]
    fn multiple_cards_are_blank_line_separated() {
        let reply = render(&Turn::Found(vec![apple(), banana()]));
        let cards: Vec<&str> = reply.text.split("\n\n").collect();
        assert_eq!(cards.len(), 2);
        assert!(cards[1].starts_with("🍽️ Banana:"));
    }

    #[test]
    fn comparison_card_matches_template() {
        let ds = Dataset::new(vec![apple(), banana()], vec![]);
        let reply = render(&Turn::Compared(compare(&ds, "apple", "banana").unwrap()));
        let expected = "📊 Comparison:\n\n\
🔹 Apple:\n   🔥 52 kcal | 🍞 14g | 🥚 0.3g | 🧈 0.2g | 🌾 2.4g\n\
\n🔹 Banana:\n   🔥 89 kcal | 🍞 23g | 🥚 1.1g | 🧈 0.3g | 🌾 2.6g\n\
\n✅ Banana is richer in protein.";
        assert_eq!(reply.text, expected);
    }

    #[test]
    fn top_list_matches_template() {
        let ds = Dataset::new(vec![apple(), banana()], vec![]);
        let reply = render(&Turn::Ranked(rank(&ds, Category::Food, Nutrient::HighFibre, 5)));
        let expected = "Top 5 items for High Fibre in Food:\n\
\n🍽️ Banana:\n   🔥 Energy: 89 kcal\n   🧈 Fat: 0.3 g\n   🥚 Protein: 1.1 g\n   🌾 Fibre: 2.6 g\n\
\n🍽️ Apple:\n   🔥 Energy: 52 kcal\n   🧈 Fat: 0.2 g\n   🥚 Protein: 0.3 g\n   🌾 Fibre: 2.4 g\n";
        assert_eq!(reply.text, expected);
    }

    #[test]
    fn errors_render_with_error_status() {
        let cases = [
            (Error::NotFound(Missing::Item("x".into())), "❌ Sorry, I couldn't find that food item."),
            (Error::NotFound(Missing::Pair("x".into(), "y".into())), "❌ One or both foods not found."),
            (Error::InvalidCategory("drinks".into()), "Please specify either 'food' or 'beverages'."),
            (Error::InvalidNutrient("tasty".into()), "❌ Invalid nutrient type."),
        ];
        for (err, text) in cases {
            let reply = render(&Turn::Failed(err));
            assert_eq!(reply.status, Status::Error);
            assert_eq!(reply.text, text);
        }

        let reply = render(&Turn::Failed(Error::LoaderFailure("missing required column 'fat_g'".into())));
        assert!(reply.text.contains("fat_g"));
    }
}
