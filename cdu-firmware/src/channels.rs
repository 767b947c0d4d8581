//! Inter-task communication channels
//!
//! The bus thread is the only producer and the control task the only
//! consumer, so every bus event reaches the controller state through here.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use cdu_protocol::InboundEvent;

/// Channel capacity for bus events
const INBOUND_CHANNEL_SIZE: usize = 32;

/// Events from the bus client thread (connects, telemetry)
pub static INBOUND: Channel<CriticalSectionRawMutex, InboundEvent, INBOUND_CHANNEL_SIZE> =
    Channel::new();
