use super::{Cue, Intent, Rule};

/// The default rule table, highest priority first.
///
/// Greeting, help and thanks come before the flow triggers, and the flow
/// triggers come before the info/menu shortcuts: "2" and "3" are both menu
/// numbers and compare/top triggers, and must resolve to the flows.
pub(crate) fn get() -> Vec<Rule> {
    vec![
        rule! {
            name: "greeting",
            cue: Cue::GREETING,
            triggers: ["hi", "hello", "hey"],
            intent: Intent::Greeting,
        },
        rule! {
            name: "help",
            cue: Cue::HELP,
            triggers: ["help", "what can you do"],
            intent: Intent::Help,
        },
        rule! {
            name: "thanks",
            cue: Cue::THANKS,
            triggers: ["thank"],
            intent: Intent::Thanks,
        },
        rule! {
            name: "compare",
            cue: Cue::COMPARE,
            triggers: ["compare", "comparison", "2"],
            intent: Intent::CompareInit,
        },
        rule! {
            name: "top",
            cue: Cue::TOP,
            triggers: ["top", "suggest", "recommend", "3"],
            intent: Intent::TopInit,
        },
        rule! {
            name: "nutrition_info",
            cue: Cue::INFO,
            triggers: ["1", "nutrition", "info"],
            intent: Intent::NutritionInfoPrompt,
        },
        rule! {
            name: "menu",
            cue: Cue::MENU,
            triggers: ["menu", "option"],
            intent: Intent::Menu,
        },
    ]
}
