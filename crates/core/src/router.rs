//! Intent routing: ordered pattern rules mapping a raw utterance to a
//! capability dispatch or the generative fallback.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{CapabilityKind, RoutingDecision};

/// One dispatch rule: a compiled pattern whose first capture group is the
/// capability argument.
struct IntentRule {
    kind: CapabilityKind,
    pattern: Regex,
}

/// The rule table, compiled once and evaluated in order. First match wins.
///
/// Order is load-bearing: the web-search rule is anchored to the start of
/// the utterance so that "search youtube for ..." falls past it and reaches
/// the video rule, and the news rule runs before both search rules.
fn rules() -> &'static [IntentRule] {
    static RULES: OnceLock<Vec<IntentRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            IntentRule {
                kind: CapabilityKind::News,
                pattern: Regex::new(r"(?i)news about(.*)").expect("Invalid news pattern"),
            },
            IntentRule {
                kind: CapabilityKind::PhoneValidation,
                pattern: Regex::new(r"(?i)verify phone (\+?\d+)")
                    .expect("Invalid phone pattern"),
            },
            IntentRule {
                kind: CapabilityKind::Screenshot,
                pattern: Regex::new(r"(?i)screenshot of (https?://\S+)")
                    .expect("Invalid screenshot pattern"),
            },
            IntentRule {
                kind: CapabilityKind::WebSearch,
                pattern: Regex::new(r"(?i)^search for(.*)").expect("Invalid search pattern"),
            },
            IntentRule {
                kind: CapabilityKind::VideoSearch,
                pattern: Regex::new(r"(?i)search youtube for(.*)")
                    .expect("Invalid video pattern"),
            },
        ]
    })
}

/// Decide which backend answers the given utterance.
///
/// Pure function of the input string: case-insensitive rules, evaluated in
/// fixed order, first match wins. A rule whose extracted argument trims to
/// empty does not match and evaluation continues with the next rule; when
/// nothing matches the utterance goes to the generative responder.
pub fn route(utterance: &str) -> RoutingDecision {
    for rule in rules() {
        if let Some(caps) = rule.pattern.captures(utterance) {
            let argument = caps.get(1).map_or("", |m| m.as_str()).trim();
            if !argument.is_empty() {
                return RoutingDecision::Capability {
                    kind: rule.kind,
                    argument: argument.to_string(),
                };
            }
        }
    }
    RoutingDecision::Generative
}
