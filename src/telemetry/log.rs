//! Fixed-capacity action event log
//!
//! The log never evicts: once `max_events` entries exist, further appends
//! are refused and counted in `dropped_count`.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

use super::action_event::ActionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionStreamHeader {
    pub event_count: u32,
    pub dropped_count: u32,
    pub last_append_tick: Tick,
}

/// Append `event` unless the buffer already holds `max_events` entries
pub fn try_append(
    header: &mut ActionStreamHeader,
    buffer: &mut Vec<ActionEvent>,
    event: ActionEvent,
    max_events: usize,
) -> bool {
    if buffer.len() >= max_events {
        if header.dropped_count == 0 {
            tracing::warn!("Action event log full at {} events, dropping new events", max_events);
        }
        header.dropped_count = header.dropped_count.saturating_add(1);
        return false;
    }

    header.last_append_tick = event.tick;
    buffer.push(event);
    header.event_count = header.event_count.saturating_add(1);
    true
}

/// Process-wide action event stream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionEventLog {
    pub header: ActionStreamHeader,
    events: Vec<ActionEvent>,
    max_events: usize,
}

impl ActionEventLog {
    pub fn new(max_events: usize) -> Self {
        Self {
            header: ActionStreamHeader::default(),
            events: Vec::with_capacity(max_events.min(1024)),
            max_events,
        }
    }

    pub fn try_push(&mut self, event: ActionEvent) -> bool {
        try_append(&mut self.header, &mut self.events, event, self.max_events)
    }

    pub fn events(&self) -> &[ActionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn max_events(&self) -> usize {
        self.max_events
    }

    pub fn is_full(&self) -> bool {
        self.events.len() >= self.max_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(tick: Tick) -> ActionEvent {
        ActionEvent {
            tick,
            ..ActionEvent::default()
        }
    }

    #[test]
    fn test_refuses_at_capacity() {
        let mut header = ActionStreamHeader::default();
        let mut buffer = Vec::new();

        for tick in 0..100 {
            assert!(try_append(&mut header, &mut buffer, event(tick), 100));
        }
        assert!(!try_append(&mut header, &mut buffer, event(100), 100));

        assert_eq!(buffer.len(), 100);
        assert_eq!(header.event_count, 100);
        assert_eq!(header.dropped_count, 1);
        assert_eq!(header.last_append_tick, 99);
        // Oldest entry is never evicted
        assert_eq!(buffer[0].tick, 0);
    }

    #[test]
    fn test_zero_capacity_drops_everything() {
        let mut log = ActionEventLog::new(0);
        assert!(log.is_full());
        assert!(!log.try_push(event(1)));
        assert!(log.is_empty());
        assert_eq!(log.header.dropped_count, 1);
    }

    #[test]
    fn test_log_push() {
        let mut log = ActionEventLog::new(2);
        assert!(log.try_push(event(5)));
        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].tick, 5);
        assert_eq!(log.max_events(), 2);
    }
}
