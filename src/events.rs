// 11.0: every processed message produces events. used for audit trails and for
// notifying whatever sits downstream. the EventPayload enum lists all event types.
// the core only hands events to an EventSink; storage is the sink's business.

use crate::config::EventLogConfig;
use crate::decoder::FieldMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: DateTime<Utc>, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

// serialises as {"type": "OrderFilled", "data": {...}}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EventPayload {
    OrderCreated(OrderCreatedEvent),
    OrderFilled(OrderFilledEvent),
    OrderRejected(OrderRejectedEvent),
}

impl EventPayload {
    pub fn event_type(&self) -> &'static str {
        match self {
            EventPayload::OrderCreated(_) => "OrderCreated",
            EventPayload::OrderFilled(_) => "OrderFilled",
            EventPayload::OrderRejected(_) => "OrderRejected",
        }
    }
}

/// Emitted right after a message decodes into an order. Carries every decoded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub fields: FieldMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilledEvent {
    pub symbol: String,
    pub qty: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRejectedEvent {
    pub reason: String,
}

/// Receives events in the order they happen.
pub trait EventSink {
    fn record(&mut self, payload: EventPayload);
}

impl EventSink for Vec<EventPayload> {
    fn record(&mut self, payload: EventPayload) {
        self.push(payload);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("Failed to write journal: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize journal: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory event journal. Stamps each event with an id and UTC time and keeps
/// at most `max_events`, dropping the oldest first.
#[derive(Debug)]
pub struct EventLog {
    config: EventLogConfig,
    events: Vec<Event>,
    next_event_id: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

impl EventLog {
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
            next_event_id: 1,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn to_json(&self) -> Result<String, JournalError> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }

    /// Write the journal to `path` as a pretty-printed JSON array.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), JournalError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), events = self.events.len(), "journal saved");
        Ok(())
    }
}

impl EventSink for EventLog {
    fn record(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), Utc::now(), payload);
        self.next_event_id += 1;

        if self.config.verbose {
            tracing::info!(id = event.id.0, event_type = event.payload.event_type(), payload = ?event.payload, "event");
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}
