//! Topic families and inbound topic classification

use core::fmt;

use heapless::String;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Maximum topic length in bytes
pub const MAX_TOPIC_LEN: usize = 96;

/// Topic string
pub type Topic = String<MAX_TOPIC_LEN>;

/// Errors from topic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicError {
    /// Topic does not belong to any subscribed family
    Unknown,
    /// Line topic suffix is not a row number
    InvalidRow,
    /// Payload larger than the event can carry
    PayloadTooLarge,
    /// Numeric payload did not parse as an integer
    InvalidValue,
    /// Built topic or payload exceeds its capacity
    TooLong,
}

impl fmt::Display for TopicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicError::Unknown => write!(f, "unknown topic"),
            TopicError::InvalidRow => write!(f, "invalid line row in topic"),
            TopicError::PayloadTooLarge => write!(f, "payload too large"),
            TopicError::InvalidValue => write!(f, "payload is not an integer"),
            TopicError::TooLong => write!(f, "topic or payload too long"),
        }
    }
}

/// Which inbound family a topic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundTopic {
    /// Display line text for the given row
    Line(u8),
    /// CDU brightness rocker position
    Brightness,
    /// Auxiliary instrument brightness knob
    AuxBrightness,
}

/// Topic names used on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TopicConfig {
    /// Subscription filter for the line family
    pub line_filter: Topic,
    /// Line topic prefix; the row number follows it
    pub line_prefix: Topic,
    /// CDU brightness topic
    pub brightness: Topic,
    /// Auxiliary instrument brightness topic
    pub aux_brightness: Topic,
    /// Prefix for outbound key events; `/<KEY>` is appended
    pub input_prefix: Topic,
    /// Backlight control topic
    pub backlight: Topic,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            line_filter: topic("dcs-bios/output/cdu_display/+"),
            line_prefix: topic("dcs-bios/output/cdu_display/cdu_line"),
            brightness: topic("dcs-bios/output/cdu/cdu_brt"),
            aux_brightness: topic("dcs-bios/output/light_system_control_panel/lcp_aux_inst"),
            input_prefix: topic("dcs-bios/input/cdu"),
            backlight: topic("cdu/backlight"),
        }
    }
}

impl TopicConfig {
    /// Topic filters to subscribe to after every (re)connect
    pub fn subscriptions(&self) -> [&str; 3] {
        [
            self.line_filter.as_str(),
            self.brightness.as_str(),
            self.aux_brightness.as_str(),
        ]
    }

    /// Classify an inbound topic
    pub fn classify(&self, topic: &str) -> Result<InboundTopic, TopicError> {
        if let Some(suffix) = topic.strip_prefix(self.line_prefix.as_str()) {
            // u8::from_str also takes a leading '+'
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TopicError::InvalidRow);
            }
            return suffix
                .parse::<u8>()
                .map(InboundTopic::Line)
                .map_err(|_| TopicError::InvalidRow);
        }
        if topic == self.brightness.as_str() {
            return Ok(InboundTopic::Brightness);
        }
        if topic == self.aux_brightness.as_str() {
            return Ok(InboundTopic::AuxBrightness);
        }
        Err(TopicError::Unknown)
    }
}

/// Build a topic from a literal, truncating at capacity
fn topic(s: &str) -> Topic {
    let mut t = Topic::new();
    for c in s.chars() {
        if t.push(c).is_err() {
            break;
        }
    }
    t
}
