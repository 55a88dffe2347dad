//! Intent classification.
//!
//! Classification is two cheap passes over the case-folded input:
//!
//! ```text
//! input ── TriggerInfo::scan ──▶ Cue mask   (every rule whose phrase occurs)
//!                                   │
//! DEFAULT_RULES (declared order) ───┴─ first rule whose cue is raised ──▶ Intent
//! ```
//!
//! Matching is plain substring search, so several rules can fire on the same
//! input ("hi 2" raises both `GREETING` and `COMPARE`). The declared order in
//! `intent/rules.rs` decides the winner and is load-bearing.

#[path = "intent/rules.rs"]
mod rules;
#[path = "intent/trigger.rs"]
mod trigger;

pub use trigger::{Cue, TriggerInfo};

use log::debug;
use once_cell::sync::Lazy;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(rules::get);

/// What the user wants when no dialog is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Help,
    Thanks,
    CompareInit,
    TopInit,
    NutritionInfoPrompt,
    Menu,
    /// Nothing recognised; the text is a food name to look up.
    None,
}

/// One classification rule, declared with the `rule!` macro.
#[derive(Debug)]
pub(crate) struct Rule {
    pub name: &'static str,
    pub cue: Cue,
    /// Lower-case phrases; ANY occurring as a substring raises `cue`.
    pub triggers: &'static [&'static str],
    pub intent: Intent,
}

/// Result of [`classify_verbose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    /// Name of the winning rule, `None` when nothing matched.
    pub rule: Option<&'static str>,
    /// Every cue raised by the input, including those that lost on order.
    pub cues: Cue,
}

/// Classify `text` with the default rule table.
pub fn classify(text: &str) -> Intent {
    classify_verbose(text).intent
}

/// Like [`classify`], but also reports the winning rule and all raised cues.
pub fn classify_verbose(text: &str) -> Classification {
    classify_with(text, &DEFAULT_RULES)
}

pub(crate) fn classify_with(text: &str, rules: &[Rule]) -> Classification {
    let info = TriggerInfo::scan(text, rules);
    let winner = rules.iter().find(|rule| info.cues.contains(rule.cue));

    let classification = Classification {
        intent: winner.map_or(Intent::None, |rule| rule.intent),
        rule: winner.map(|rule| rule.name),
        cues: info.cues,
    };
    debug!("classify {:?}: {:?} via {:?} (cues {:?})", info.lower, classification.intent, classification.rule, info.cues);
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_examples() {
        let cases: Vec<(Intent, &str)> = vec![
            (Intent::Greeting, "hi"),
            (Intent::Greeting, "Hello there"),
            (Intent::Greeting, "HEY"),
            (Intent::Help, "help"),
            (Intent::Help, "What can you do?"),
            (Intent::Thanks, "thanks!"),
            (Intent::Thanks, "Thank you"),
            (Intent::CompareInit, "compare"),
            (Intent::CompareInit, "I want a comparison"),
            (Intent::CompareInit, "2"),
            (Intent::TopInit, "top"),
            (Intent::TopInit, "suggest a snack"),
            (Intent::TopInit, "recommend"),
            (Intent::TopInit, "3"),
            (Intent::NutritionInfoPrompt, "1"),
            (Intent::NutritionInfoPrompt, "nutrition"),
            (Intent::NutritionInfoPrompt, "info please"),
            (Intent::Menu, "menu"),
            (Intent::Menu, "show options"),
            (Intent::None, "banana"),
            (Intent::None, "apple"),
            (Intent::None, ""),
        ];

        for (expected, input) in cases {
            assert_eq!(classify(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn earlier_rules_win_on_overlap() {
        // "hi" is checked before the digit shortcuts.
        assert_eq!(classify("hi 2"), Intent::Greeting);
        assert_eq!(classify("2 hi"), Intent::Greeting);
        // compare ("2") before top ("3") before info ("1").
        assert_eq!(classify("23"), Intent::CompareInit);
        assert_eq!(classify("32"), Intent::CompareInit);
        assert_eq!(classify("13"), Intent::TopInit);
        // menu is last of all.
        assert_eq!(classify("menu 2"), Intent::CompareInit);
        assert_eq!(classify("info menu"), Intent::NutritionInfoPrompt);
        assert_eq!(classify("thank you for the help"), Intent::Help);
    }

    #[test]
    fn substring_matching_reaches_inside_words() {
        assert_eq!(classify("chicken"), Intent::Greeting);
        assert_eq!(classify("white rice"), Intent::Greeting);
        assert_eq!(classify("fish"), Intent::None);
        assert_eq!(classify("stop"), Intent::TopInit);
        assert_eq!(classify("information"), Intent::NutritionInfoPrompt);
        assert_eq!(classify("100g rice"), Intent::NutritionInfoPrompt);
    }

    #[test]
    fn verbose_reports_losing_cues() {
        let c = classify_verbose("hi, compare 3 options");
        assert_eq!(c.intent, Intent::Greeting);
        assert_eq!(c.rule, Some("greeting"));
        assert_eq!(c.cues, Cue::GREETING | Cue::COMPARE | Cue::TOP | Cue::MENU);

        let none = classify_verbose("mango");
        assert_eq!(none.intent, Intent::None);
        assert_eq!(none.rule, None);
        assert!(none.cues.is_empty());
    }

    #[test]
    fn default_rules_are_declared_in_priority_order() {
        let names: Vec<&str> = DEFAULT_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["greeting", "help", "thanks", "compare", "top", "nutrition_info", "menu"]);

        let mut seen = Cue::empty();
        for rule in DEFAULT_RULES.iter() {
            assert!(!seen.intersects(rule.cue), "cue reused by {}", rule.name);
            seen |= rule.cue;
        }
        assert_eq!(seen, Cue::all());
    }

    #[test]
    fn custom_rule_order_changes_the_winner() {
        let rules = vec![
            rule! { name: "compare", cue: Cue::COMPARE, triggers: ["2"], intent: Intent::CompareInit },
            rule! { name: "greeting", cue: Cue::GREETING, triggers: ["hi"], intent: Intent::Greeting },
        ];
        assert_eq!(classify_with("hi 2", &rules).intent, Intent::CompareInit);
        assert_eq!(classify_with("hi", &rules).intent, Intent::Greeting);
    }
}
