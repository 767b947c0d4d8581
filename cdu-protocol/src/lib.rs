//! CDU simulation bus protocol
//!
//! This crate defines what travels over MQTT between the CDU and the
//! simulation host (DCS-BIOS bridged onto the broker):
//!
//! ```text
//!   host ──► dcs-bios/output/cdu_display/cdu_line<N>   raw line bytes
//!   host ──► dcs-bios/output/cdu/cdu_brt               "0" dim | "2" bright
//!   host ──► .../lcp_aux_inst                          aux brightness 0..max
//!   CDU  ──► dcs-bios/input/cdu/<KEY>                  key value
//!   CDU  ──► cdu/backlight                             "<pin>=<fraction>"
//! ```
//!
//! Line payloads use a single-byte encoding where a handful of codes stand
//! for glyphs; [`glyph`] turns them into display text.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod events;
pub mod glyph;
pub mod messages;
pub mod topics;

pub use events::{InboundEvent, MAX_LINE_PAYLOAD};
pub use glyph::{decode_line, GlyphError};
pub use messages::{OutboundMessage, MAX_PAYLOAD_LEN};
pub use topics::{TopicConfig, TopicError, MAX_TOPIC_LEN};
