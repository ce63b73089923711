// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Intent rules for the operations assistant.
//!
//! Rules are evaluated top to bottom and the first rule with a trigger
//! contained in the message wins. Matching is a case-insensitive substring
//! search, so `"fog and storm today"` resolves to visibility because the fog
//! rule is listed before the storm rule. The assistant keeps no memory of
//! earlier turns.

/// One intent: its trigger words and the canned answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentRule {
    /// Short name used in logs and tests.
    pub name: &'static str,
    /// Lowercase substrings that select this rule.
    pub triggers: &'static [&'static str],
    /// The assistant's answer.
    pub response: &'static str,
}

impl IntentRule {
    fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t))
    }
}

/// Answer given when no rule matches.
pub const FALLBACK_RESPONSE: &str = "I can help with weather, delays, crew availability, \
     visibility and storm risk. Could you rephrase your question around one of those?";

/// The ordered rule table.
pub const INTENT_RULES: [IntentRule; 6] = [
    IntentRule {
        name: "weather",
        triggers: &["weather", "forecast"],
        response: "Today's forecast: morning fog at DEL and LKO clearing by 09:00, \
             with a chance of afternoon thunderstorms over BOM and GOI.",
    },
    IntentRule {
        name: "delay",
        triggers: &["delay", "cancel"],
        response: "Which flight are you asking about? Share the flight number and I \
             will check its delay and cancellation status.",
    },
    IntentRule {
        name: "crew",
        triggers: &["crew", "staff"],
        response: "Standby crew are available at DEL and BOM. Open the crew view to \
             check duty hours before reassigning anyone.",
    },
    IntentRule {
        name: "greeting",
        triggers: &["hello", "hi", "hey"],
        response: "Hello! I'm the operations assistant. Ask me about weather, delays \
             or crew availability.",
    },
    IntentRule {
        name: "visibility",
        triggers: &["fog", "visibility"],
        response: "Visibility at DEL is currently 800m in fog and is expected to rise \
             above 1500m by mid-morning. CAT III approaches remain in use.",
    },
    IntentRule {
        name: "storm",
        triggers: &["thunderstorm", "storm"],
        response: "There is a 60% probability of thunderstorms over BOM between 15:00 \
             and 18:00. Expect holding and possible diversions.",
    },
];

/// Returns the first rule matching `text`, if any.
#[must_use]
pub fn match_intent(text: &str) -> Option<&'static IntentRule> {
    let lowered: String = text.to_lowercase();
    INTENT_RULES.iter().find(|rule| rule.matches(&lowered))
}

/// Returns the assistant's answer to `text`.
#[must_use]
pub fn respond(text: &str) -> &'static str {
    match_intent(text).map_or(FALLBACK_RESPONSE, |rule| rule.response)
}
