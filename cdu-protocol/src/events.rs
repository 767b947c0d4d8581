//! Inbound bus events
//!
//! Everything the bus client learns is funnelled into one of these and
//! handed to the control loop, which is the only consumer.

use heapless::Vec;

use crate::topics::{InboundTopic, TopicConfig, TopicError};

/// Largest line payload carried by an event
pub const MAX_LINE_PAYLOAD: usize = 128;

/// Event originating from the bus client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Broker accepted the connection (CONNACK return code)
    Connected {
        /// CONNACK return code, 0 on success
        code: u8,
    },
    /// Connection to the broker was lost
    Disconnected,
    /// Raw text for one display row
    Line {
        /// Display row
        row: u8,
        /// Undecoded payload bytes
        payload: Vec<u8, MAX_LINE_PAYLOAD>,
    },
    /// CDU brightness code (0 = dim, 2 = bright, others ignored downstream)
    Brightness(i32),
    /// Raw auxiliary instrument brightness
    AuxBrightness(i32),
}

impl InboundEvent {
    /// Build an event from a received publish
    pub fn from_publish(topics: &TopicConfig, topic: &str, payload: &[u8]) -> Result<Self, TopicError> {
        match topics.classify(topic)? {
            InboundTopic::Line(row) => {
                let payload = Vec::from_slice(payload).map_err(|_| TopicError::PayloadTooLarge)?;
                Ok(InboundEvent::Line { row, payload })
            }
            InboundTopic::Brightness => parse_int(payload).map(InboundEvent::Brightness),
            InboundTopic::AuxBrightness => parse_int(payload).map(InboundEvent::AuxBrightness),
        }
    }

    /// Returns true if this event carries simulator telemetry
    pub fn is_telemetry(&self) -> bool {
        matches!(
            self,
            InboundEvent::Line { .. } | InboundEvent::Brightness(_) | InboundEvent::AuxBrightness(_)
        )
    }
}

/// Parse a decimal integer payload, tolerating surrounding whitespace
fn parse_int(payload: &[u8]) -> Result<i32, TopicError> {
    core::str::from_utf8(payload)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or(TopicError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_event() {
        let topics = TopicConfig::default();
        let event =
            InboundEvent::from_publish(&topics, "dcs-bios/output/cdu_display/cdu_line3", b"WP\xBB").unwrap();
        match event {
            InboundEvent::Line { row, payload } => {
                assert_eq!(row, 3);
                assert_eq!(payload.as_slice(), b"WP\xBB");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_line_payload_too_large() {
        let topics = TopicConfig::default();
        let big = [b'A'; MAX_LINE_PAYLOAD + 1];
        assert_eq!(
            InboundEvent::from_publish(&topics, "dcs-bios/output/cdu_display/cdu_line0", &big),
            Err(TopicError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_brightness_event() {
        let topics = TopicConfig::default();
        assert_eq!(
            InboundEvent::from_publish(&topics, "dcs-bios/output/cdu/cdu_brt", b"2"),
            Ok(InboundEvent::Brightness(2))
        );
        assert_eq!(
            InboundEvent::from_publish(&topics, "dcs-bios/output/cdu/cdu_brt", b" 0\n"),
            Ok(InboundEvent::Brightness(0))
        );
    }

    #[test]
    fn test_invalid_integer() {
        let topics = TopicConfig::default();
        assert_eq!(
            InboundEvent::from_publish(&topics, "dcs-bios/output/cdu/cdu_brt", b"bright"),
            Err(TopicError::InvalidValue)
        );
    }

    #[test]
    fn test_aux_brightness_event() {
        let topics = TopicConfig::default();
        assert_eq!(
            InboundEvent::from_publish(
                &topics,
                "dcs-bios/output/light_system_control_panel/lcp_aux_inst",
                b"65535"
            ),
            Ok(InboundEvent::AuxBrightness(65535))
        );
    }

    #[test]
    fn test_is_telemetry() {
        assert!(InboundEvent::Brightness(0).is_telemetry());
        assert!(!InboundEvent::Connected { code: 0 }.is_telemetry());
        assert!(!InboundEvent::Disconnected.is_telemetry());
    }
}
