// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action inputs (slots, latest utterance) and outputs (responses, slot events).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Slot names the actions read or write.
pub mod slot {
    pub const PHONE: &str = "phone";
    pub const NAME: &str = "name";
    pub const OUTAGE_DESCRIPTION: &str = "outage_description";
    pub const SUPPORT_PHONE: &str = "support_phone";
    pub const TICKET_DESCRIPTION: &str = "ticket_description";
    pub const AWAITING_NAME: &str = "awaiting_name";
    pub const AWAITING_PHONE: &str = "awaiting_phone";
}

/// The dialogue slots actions care about. Any other slot the engine tracks
/// is ignored.
///
/// Slot values are typed by the engine's domain file, not by us, so a text
/// slot holding a number or a list still deserializes. The raw JSON text is
/// kept and fails validation inside the action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slots {
    #[serde(deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub outage_description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub support_phone: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub ticket_description: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub awaiting_name: Option<bool>,
    #[serde(deserialize_with = "lenient_flag")]
    pub awaiting_phone: Option<bool>,
}

/// Strings pass through, null is unset, anything else becomes its JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Only JSON booleans count as a flag.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| v.as_bool()))
}

/// Treats blank slot values as unset.
pub(crate) fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Everything an action may read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionContext {
    pub sender_id: String,
    pub slots: Slots,
    pub latest_text: String,
}

impl ActionContext {
    pub fn new(sender_id: impl Into<String>, slots: Slots, latest_text: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            slots,
            latest_text: latest_text.into(),
        }
    }

    /// The latest utterance, lowercased.
    pub(crate) fn latest_text_lower(&self) -> String {
        self.latest_text.trim().to_lowercase()
    }
}

/// A slot mutation returned to the dialogue engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename = "slot")]
pub struct SlotEvent {
    pub name: String,
    pub value: Value,
}

impl SlotEvent {
    pub fn set(name: &str, value: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn clear(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Value::Null,
        }
    }
}

/// What an action produced: messages for the user and slot mutations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub responses: Vec<String>,
    pub events: Vec<SlotEvent>,
}

impl ActionOutcome {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            responses: vec![text.into()],
            events: Vec::new(),
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: SlotEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Value of the last event for `name`, if the outcome sets it.
    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.events.iter().rev().find(|e| e.name == name).map(|e| &e.value)
    }
}
