//! Structured audit events.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

pub const EVENT_TYPE_MINT_TOKENS: &str = "mint_tokens";
pub const EVENT_TYPE_TRANSFER_TOKENS: &str = "transfer_tokens";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

/// An event type plus its attributes, kept in insertion order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Vec<EventAttribute>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push(EventAttribute {
            key: key.into(),
            value: value.to_string(),
        });
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for attr in &self.attributes {
            write!(f, " {}={}", attr.key, attr.value)?;
        }
        Ok(())
    }
}

/// Append-only destination for events. Emission is fire-and-forget.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

/// Collects events in emission order.
#[derive(Debug, Default, Clone)]
pub struct EventManager {
    events: Vec<Event>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl EventSink for EventManager {
    fn emit(&mut self, event: Event) {
        info!(event = %event, "emitted");
        self.events.push(event);
    }
}

/// Emitted after a successful issuance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintTokensEvent {
    pub creator: String,
    pub amount: u64,
    pub denom: String,
}

impl From<MintTokensEvent> for Event {
    fn from(ev: MintTokensEvent) -> Self {
        Event::new(EVENT_TYPE_MINT_TOKENS)
            .with_attribute("creator", ev.creator)
            .with_attribute("amount", ev.amount)
            .with_attribute("denom", ev.denom)
    }
}

/// Emitted after a successful transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferTokensEvent {
    pub from: String,
    pub to: String,
    pub amount: u64,
    pub denom: String,
}

impl From<TransferTokensEvent> for Event {
    fn from(ev: TransferTokensEvent) -> Self {
        Event::new(EVENT_TYPE_TRANSFER_TOKENS)
            .with_attribute("from", ev.from)
            .with_attribute("to", ev.to)
            .with_attribute("amount", ev.amount)
            .with_attribute("denom", ev.denom)
    }
}
