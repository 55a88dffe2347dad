#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declares one intent rule: the cue bit it owns, the phrases that raise the
/// cue, and the intent it yields when it is the first raised cue in order.
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        cue: $cue:expr,
        triggers: [ $($trigger:expr),* $(,)? ],
        intent: $intent:expr
        $(,)?
    ) => {{
        $crate::intent::Rule {
            name: $name,
            cue: $cue,
            triggers: &[ $($trigger),* ],
            intent: $intent,
        }
    }};
}
