//! Outbound bus messages

use core::fmt::Write;

use heapless::String;

use crate::topics::{Topic, TopicError};

/// Maximum outbound payload length in bytes
pub const MAX_PAYLOAD_LEN: usize = 32;

/// A message ready to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Destination topic
    pub topic: Topic,
    /// Text payload
    pub payload: String<MAX_PAYLOAD_LEN>,
}

impl OutboundMessage {
    /// Key event: `<prefix>/<name>` carrying the integer value
    pub fn key_event(prefix: &str, name: &str, value: i32) -> Result<Self, TopicError> {
        let mut topic = Topic::new();
        write!(topic, "{}/{}", prefix, name).map_err(|_| TopicError::TooLong)?;

        let mut payload = String::new();
        write!(payload, "{}", value).map_err(|_| TopicError::TooLong)?;

        Ok(Self { topic, payload })
    }

    /// Backlight level: `"<pin>=<fraction>"`, fraction with two decimals
    pub fn backlight(topic: &str, pin: u8, fraction: f32) -> Result<Self, TopicError> {
        let topic = Topic::try_from(topic).map_err(|_| TopicError::TooLong)?;

        let mut payload = String::new();
        write!(payload, "{}={:.2}", pin, fraction).map_err(|_| TopicError::TooLong)?;

        Ok(Self { topic, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_format() {
        let msg = OutboundMessage::key_event("dcs-bios/input/cdu", "CDU_PG", 2).unwrap();
        assert_eq!(msg.topic.as_str(), "dcs-bios/input/cdu/CDU_PG");
        assert_eq!(msg.payload.as_str(), "2");
    }

    #[test]
    fn test_backlight_format() {
        let msg = OutboundMessage::backlight("cdu/backlight", 18, 0.5).unwrap();
        assert_eq!(msg.topic.as_str(), "cdu/backlight");
        assert_eq!(msg.payload.as_str(), "18=0.50");

        let msg = OutboundMessage::backlight("cdu/backlight", 18, 1.0).unwrap();
        assert_eq!(msg.payload.as_str(), "18=1.00");
    }

    #[test]
    fn test_topic_too_long() {
        let long = [b'x'; 120];
        let long = core::str::from_utf8(&long).unwrap();
        assert_eq!(
            OutboundMessage::key_event(long, "CDU_A", 1),
            Err(TopicError::TooLong)
        );
    }
}
