//! Outbound message queue
//!
//! Key events and backlight levels are queued here by the control logic
//! and drained by the firmware, which owns the bus client.

use cdu_protocol::topics::Topic;
use cdu_protocol::{OutboundMessage, TopicConfig};
use heapless::Deque;
use log::{trace, warn};

use crate::config::BacklightConfig;
use crate::keymap::KeyChangeEvent;
use crate::state::ConnectivityMode;

/// Maximum queued outbound messages between drains
pub const OUTBOUND_QUEUE_LEN: usize = 64;

/// FIFO of messages waiting to be published
#[derive(Debug, Clone)]
pub struct OutputDispatch {
    queue: Deque<OutboundMessage, OUTBOUND_QUEUE_LEN>,
    input_prefix: Topic,
    backlight_topic: Topic,
    backlight: BacklightConfig,
}

impl OutputDispatch {
    /// Create an empty queue for the given topics
    pub fn new(topics: &TopicConfig, backlight: BacklightConfig) -> Self {
        Self {
            queue: Deque::new(),
            input_prefix: topics.input_prefix.clone(),
            backlight_topic: topics.backlight.clone(),
            backlight,
        }
    }

    /// Queue a key event for the simulator
    ///
    /// Events are discarded while the broker is not connected.
    pub fn forward_key(&mut self, event: &KeyChangeEvent, mode: ConnectivityMode) {
        if !mode.is_connected() {
            trace!("not connected, discarding {}={}", event.name, event.value);
            return;
        }
        match OutboundMessage::key_event(&self.input_prefix, event.name, event.value) {
            Ok(msg) => self.enqueue(msg),
            Err(e) => warn!("cannot build key message for {}: {}", event.name, e),
        }
    }

    /// Queue a backlight level from a raw auxiliary brightness value
    pub fn backlight(&mut self, raw: i32) {
        let fraction = self.normalize(raw);
        match OutboundMessage::backlight(&self.backlight_topic, self.backlight.pin, fraction) {
            Ok(msg) => self.enqueue(msg),
            Err(e) => warn!("cannot build backlight message: {}", e),
        }
    }

    /// Raw value as a fraction of full scale, clamped to 0.0..=1.0
    pub fn normalize(&self, raw: i32) -> f32 {
        if self.backlight.max_raw <= 0 {
            return 0.0;
        }
        let fraction = raw as f32 / self.backlight.max_raw as f32;
        fraction.clamp(0.0, 1.0)
    }

    /// Take the oldest queued message
    pub fn pop(&mut self) -> Option<OutboundMessage> {
        self.queue.pop_front()
    }

    fn enqueue(&mut self, msg: OutboundMessage) {
        if let Err(msg) = self.queue.push_back(msg) {
            warn!("outbound queue full, dropping message for {}", msg.topic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch() -> OutputDispatch {
        OutputDispatch::new(&TopicConfig::default(), BacklightConfig::default())
    }

    fn key(name: &'static str, value: i32) -> KeyChangeEvent {
        KeyChangeEvent {
            name,
            value,
            position: 0,
            pressed: value != 0,
        }
    }

    #[test]
    fn test_forward_when_connected() {
        let mut out = dispatch();
        out.forward_key(&key("CDU_1", 1), ConnectivityMode::Connected);
        out.forward_key(&key("CDU_1", 0), ConnectivityMode::Connected);

        let first = out.pop().unwrap();
        assert_eq!(first.topic.as_str(), "dcs-bios/input/cdu/CDU_1");
        assert_eq!(first.payload.as_str(), "1");
        assert_eq!(out.pop().unwrap().payload.as_str(), "0");
        assert!(out.pop().is_none());
    }

    #[test]
    fn test_discard_when_disconnected() {
        let mut out = dispatch();
        out.forward_key(&key("CDU_1", 1), ConnectivityMode::Disconnected);
        assert!(out.pop().is_none());
    }

    #[test]
    fn test_backlight_half() {
        let mut out = dispatch();
        out.backlight(32768);
        let msg = out.pop().unwrap();
        assert_eq!(msg.topic.as_str(), "cdu/backlight");
        assert_eq!(msg.payload.as_str(), "18=0.50");
    }

    #[test]
    fn test_backlight_clamped() {
        let mut out = dispatch();
        out.backlight(-10);
        out.backlight(200_000);
        assert_eq!(out.pop().unwrap().payload.as_str(), "18=0.00");
        assert_eq!(out.pop().unwrap().payload.as_str(), "18=1.00");
    }

    #[test]
    fn test_zero_scale_is_off() {
        let out = OutputDispatch::new(
            &TopicConfig::default(),
            BacklightConfig { pin: 12, max_raw: 0 },
        );
        assert_eq!(out.normalize(500), 0.0);
    }

    #[test]
    fn test_overflow_keeps_oldest() {
        let mut out = dispatch();
        for i in 0..(OUTBOUND_QUEUE_LEN as i32 + 5) {
            out.forward_key(&key("CDU_A", i), ConnectivityMode::Connected);
        }
        let mut payloads = std::vec::Vec::new();
        while let Some(msg) = out.pop() {
            payloads.push(msg.payload);
        }
        assert_eq!(payloads.len(), OUTBOUND_QUEUE_LEN);
        assert_eq!(payloads[0].as_str(), "0");
    }
}
