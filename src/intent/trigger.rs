//! Trigger scanning.
//!
//! Walks the rule table once and raises the cue bit of every rule that has at
//! least one trigger phrase inside the case-folded input. Selecting the winner
//! is left to the caller, which walks the rules again in declared order.

use super::Rule;

bitflags::bitflags! {
    /// One bit per intent rule.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Cue: u8 {
        const GREETING = 1 << 0;
        const HELP     = 1 << 1;
        const THANKS   = 1 << 2;
        const COMPARE  = 1 << 3;
        const TOP      = 1 << 4;
        const INFO     = 1 << 5;
        const MENU     = 1 << 6;
    }
}

/// Signals detected in one input.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    /// The case-folded input the triggers were matched against.
    pub lower: String,
    pub cues: Cue,
}

impl TriggerInfo {
    pub(crate) fn scan(input: &str, rules: &[Rule]) -> Self {
        let lower = input.to_lowercase();
        let mut cues = Cue::empty();

        for rule in rules {
            if rule.triggers.iter().any(|phrase| lower.contains(phrase)) {
                cues |= rule.cue;
            }
        }

        TriggerInfo { lower, cues }
    }
}
