//! MQTT client thread
//!
//! `rumqttc`'s blocking event loop runs on its own OS thread. It never
//! touches controller state: every notification becomes an
//! [`InboundEvent`] sent into [`INBOUND`](crate::channels::INBOUND).
//! Publishing goes through [`BusHandle`] from the control task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, trace, warn};
use rumqttc::{Client, Connection, Event, MqttOptions, Outgoing, Packet, QoS};

use cdu_core::config::BusConfig;
use cdu_protocol::{InboundEvent, OutboundMessage, TopicConfig};

use crate::channels::INBOUND;
use crate::error::Error;

/// Request queue depth between the client handle and the event loop
const REQUEST_CAPACITY: usize = 16;

/// Control-side handle to the bus thread
pub struct BusHandle {
    client: Client,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl BusHandle {
    /// Connect in the background and start forwarding events
    pub fn start(bus: &BusConfig, topics: &TopicConfig) -> Result<Self, Error> {
        let mut options = MqttOptions::new(bus.client_id.as_str(), bus.host.as_str(), bus.port);
        options.set_keep_alive(Duration::from_secs(u64::from(bus.keep_alive_s)));
        options.set_clean_session(true);

        let (client, connection) = Client::new(options, REQUEST_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));

        let worker = BusWorker {
            client: client.clone(),
            topics: topics.clone(),
            reconnect_delay: Duration::from_millis(u64::from(bus.reconnect_delay_ms)),
            stop: stop.clone(),
            connected: false,
        };
        let thread = thread::Builder::new()
            .name("cdu-bus".into())
            .spawn(move || worker.run(connection))?;

        info!("Bus client started for {}:{}", bus.host, bus.port);
        Ok(Self {
            client,
            stop,
            thread: Some(thread),
        })
    }

    /// Queue a message without blocking the caller
    ///
    /// Messages that do not fit in the request queue are dropped.
    pub fn publish(&mut self, msg: &OutboundMessage) {
        trace!("publish {} {}", msg.topic, msg.payload);
        if let Err(e) = self
            .client
            .try_publish(msg.topic.as_str(), QoS::AtMostOnce, false, msg.payload.as_bytes())
        {
            warn!("Dropping publish to {}: {}", msg.topic, e);
        }
    }

    /// Disconnect and wait for the bus thread to exit
    pub fn shutdown(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Err(e) = self.client.try_disconnect() {
            debug!("Disconnect request failed: {}", e);
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Bus thread panicked");
            }
        }
        info!("Bus client stopped");
    }
}

/// State owned by the bus thread
struct BusWorker {
    client: Client,
    topics: TopicConfig,
    reconnect_delay: Duration,
    stop: Arc<AtomicBool>,
    connected: bool,
}

impl BusWorker {
    fn run(mut self, mut connection: Connection) {
        for notification in connection.iter() {
            if self.stopping() {
                break;
            }
            match notification {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    self.connected = true;
                    self.subscribe();
                    emit(InboundEvent::Connected { code: ack.code as u8 });
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    match InboundEvent::from_publish(&self.topics, &publish.topic, &publish.payload) {
                        Ok(event) => emit(event),
                        Err(e) => trace!("Ignoring publish on {}: {}", publish.topic, e),
                    }
                }
                Ok(Event::Outgoing(Outgoing::Disconnect)) => debug!("Disconnect sent"),
                Ok(_) => {}
                Err(e) => {
                    if self.connected {
                        warn!("Bus connection lost: {}", e);
                        self.connected = false;
                        emit(InboundEvent::Disconnected);
                    } else {
                        debug!("Bus connect failed: {}", e);
                    }
                    if self.stopping() {
                        break;
                    }
                    thread::sleep(self.reconnect_delay);
                }
            }
        }
        info!("Bus thread exiting");
    }

    fn stopping(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// (Re)subscribe after every CONNACK so reconnects renew subscriptions
    fn subscribe(&mut self) {
        for topic in self.topics.subscriptions() {
            // Non-blocking: this thread also drains the request queue
            match self.client.try_subscribe(topic, QoS::AtMostOnce) {
                Ok(()) => debug!("Subscribed to {}", topic),
                Err(e) => warn!("Subscribe to {} failed: {}", topic, e),
            }
        }
    }
}

/// Hand an event to the control task, waiting while the channel is full
fn emit(event: InboundEvent) {
    embassy_futures::block_on(INBOUND.send(event));
}
