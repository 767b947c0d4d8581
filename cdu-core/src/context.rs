//! Owned controller context
//!
//! One [`CduContext`] holds everything the control loop mutates: the key
//! tables, the page machine, the mirrored screen and the outbound queue.
//! The firmware feeds it bus events and matrix samples; nothing else
//! touches this state.

use cdu_display::{Color, DisplayBackend, DisplayError, Screen};
use cdu_protocol::{InboundEvent, OutboundMessage};
use heapless::String;
use log::{debug, info};

use crate::config::{CduConfig, UiConfig, MAX_HOST_LEN};
use crate::dispatch::OutputDispatch;
use crate::keymap::{KeyChangeEvent, KeyMapper, MatrixSample, CDU_LAYOUT, KEY_COUNT};
use crate::render::{LineOutcome, RenderPipeline};
use crate::state::{pages, ConnectivityMode, Event, LongPressTimer, MenuSelection, Page};

/// What the control loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep scanning
    Continue,
    /// SHUTDOWN was committed from the menu
    Shutdown,
}

/// Controller state
pub struct CduContext {
    ui: UiConfig,
    host: String<MAX_HOST_LEN>,
    port: u16,

    mapper: KeyMapper,
    mode: ConnectivityMode,
    page: Page,
    /// Page whose static content is on screen
    last_page: Option<Page>,
    selection: MenuSelection,
    long_press: LongPressTimer,
    render: RenderPipeline,
    dispatch: OutputDispatch,
    /// Positions whose press went out to the simulator
    forwarded: [bool; KEY_COUNT],

    last_key: Option<KeyChangeEvent>,
    connack_code: u8,
    menu_dirty: bool,
    matrix_dirty: bool,
    flush_pending: bool,
    shutdown_requested: bool,
}

impl CduContext {
    /// Create a context on the menu page, disconnected
    pub fn new(config: &CduConfig) -> Self {
        Self {
            ui: config.ui.clone(),
            host: config.bus.host.clone(),
            port: config.bus.port,
            mapper: KeyMapper::new(&CDU_LAYOUT),
            mode: ConnectivityMode::Disconnected,
            page: Page::Menu,
            last_page: None,
            selection: MenuSelection::Sim,
            long_press: LongPressTimer::new(),
            render: RenderPipeline::new(),
            dispatch: OutputDispatch::new(&config.topics, config.backlight),
            forwarded: [false; KEY_COUNT],
            last_key: None,
            connack_code: 0,
            menu_dirty: false,
            matrix_dirty: false,
            flush_pending: false,
            shutdown_requested: false,
        }
    }

    /// Current page
    pub fn page(&self) -> Page {
        self.page
    }

    /// Current broker connectivity
    pub fn mode(&self) -> ConnectivityMode {
        self.mode
    }

    /// Menu cursor
    pub fn selection(&self) -> MenuSelection {
        self.selection
    }

    /// Telemetry buffer and active color
    pub fn render(&self) -> &RenderPipeline {
        &self.render
    }

    /// Check if SHUTDOWN has been committed
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Take the oldest message waiting to be published
    pub fn next_outbound(&mut self) -> Option<OutboundMessage> {
        self.dispatch.pop()
    }

    /// Apply one event from the bus client
    pub fn handle_bus_event<D: DisplayBackend>(
        &mut self,
        event: InboundEvent,
        display: &mut D,
    ) -> Result<(), DisplayError> {
        let telemetry = event.is_telemetry();

        match event {
            InboundEvent::Connected { code } => {
                info!("bus connected (code {})", code);
                self.mode = ConnectivityMode::Connected;
                self.connack_code = code;
                self.apply(Event::BusConnected);
            }
            InboundEvent::Disconnected => {
                info!("bus disconnected");
                self.mode = ConnectivityMode::Disconnected;
                self.apply(Event::BusDisconnected);
            }
            InboundEvent::Line { row, payload } => {
                let outcome = self.render.update_line(row, &payload, self.page, display)?;
                if outcome == LineOutcome::Painted {
                    self.flush_pending = true;
                }
            }
            InboundEvent::Brightness(code) => {
                if self.render.set_brightness(code, self.page, display)? {
                    self.flush_pending = true;
                }
            }
            InboundEvent::AuxBrightness(raw) => self.dispatch.backlight(raw),
        }

        if telemetry {
            self.apply(Event::TelemetryReceived);
        }

        self.refresh(display)
    }

    /// Process one matrix sample taken at `now_ms`
    pub fn tick<D: DisplayBackend>(
        &mut self,
        sample: &MatrixSample,
        now_ms: u64,
        display: &mut D,
    ) -> Result<TickOutcome, DisplayError> {
        let events = self.mapper.update(sample);

        for event in &events {
            debug!("key {}={}", event.name, event.value);
            self.forward(event);
            self.handle_key(event, now_ms);
        }

        if let Some(last) = events.last() {
            self.last_key = Some(*last);
            self.matrix_dirty = true;
        }

        if self.long_press.poll(now_ms, self.ui.long_press_ms) {
            info!("long press, returning to menu");
            self.apply(Event::LongPress);
        }

        if self.shutdown_requested {
            display.clear()?;
            pages::shutdown().render(display, Color::Alert)?;
            display.flush()?;
            return Ok(TickOutcome::Shutdown);
        }

        self.refresh(display)?;
        Ok(TickOutcome::Continue)
    }

    /// Send a key to the simulator, keeping presses and releases paired
    ///
    /// A release goes out whenever its press did, even if the page has
    /// changed since. A release whose press was not sent is dropped.
    fn forward(&mut self, event: &KeyChangeEvent) {
        let Some(sent) = self.forwarded.get_mut(event.position) else {
            return;
        };
        if event.pressed {
            if self.page.forwards_keys() && self.mode.is_connected() {
                self.dispatch.forward_key(event, self.mode);
                *sent = true;
            }
        } else if core::mem::take(sent) {
            self.dispatch.forward_key(event, self.mode);
        }
    }

    fn handle_key(&mut self, event: &KeyChangeEvent, now_ms: u64) {
        let select = &self.ui.select;

        if select.is_key(event.name) {
            if event.value != select.value {
                self.long_press.clear();
            } else if self.page == Page::Menu {
                self.commit();
            } else if self.page.accepts_long_press() {
                self.long_press.arm(now_ms);
            }
            return;
        }

        if self.page != Page::Menu {
            return;
        }
        let moved = if self.ui.menu_up.matches(event.name, event.value) {
            self.selection.up()
        } else if self.ui.menu_down.matches(event.name, event.value) {
            self.selection.down()
        } else {
            return;
        };
        if moved != self.selection {
            self.selection = moved;
            self.menu_dirty = true;
        }
    }

    fn commit(&mut self) {
        info!("menu: {} selected", self.selection.label());
        match self.selection {
            MenuSelection::Sim => self.apply(Event::SelectSim {
                connected: self.mode.is_connected(),
            }),
            MenuSelection::Matrix => self.apply(Event::SelectMatrix),
            MenuSelection::Shutdown => self.shutdown_requested = true,
        }
    }

    fn apply(&mut self, event: Event) {
        let next = self.page.transition(event);
        if next != self.page {
            info!("page {} -> {}", self.page, next);
            self.page = next;
        }
    }

    /// Paint whatever the current page needs, then flush if anything changed
    fn refresh<D: DisplayBackend>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        if self.last_page != Some(self.page) {
            self.enter_page(display)?;
            self.last_page = Some(self.page);
            self.menu_dirty = false;
            self.matrix_dirty = false;
            self.flush_pending = true;
        } else if self.page == Page::Menu && self.menu_dirty {
            self.paint_static(&pages::menu(self.selection), display)?;
            self.menu_dirty = false;
            self.flush_pending = true;
        } else if self.page == Page::Matrix && self.matrix_dirty {
            self.paint_static(&self.matrix_screen(), display)?;
            self.matrix_dirty = false;
            self.flush_pending = true;
        }
        self.matrix_dirty = false;

        if self.flush_pending {
            display.flush()?;
            self.flush_pending = false;
        }
        Ok(())
    }

    fn enter_page<D: DisplayBackend>(&self, display: &mut D) -> Result<(), DisplayError> {
        match self.page {
            Page::Connecting => self.paint_static(&pages::connecting(&self.host, self.port), display),
            Page::Waiting => self.paint_static(&pages::waiting(self.connack_code), display),
            Page::Menu => self.paint_static(&pages::menu(self.selection), display),
            Page::Matrix => self.paint_static(&self.matrix_screen(), display),
            Page::Sim => {
                display.clear()?;
                self.render.repaint(display)
            }
        }
    }

    fn matrix_screen(&self) -> Screen {
        let last = self.last_key.map(|k| (k.name, k.value));
        pages::matrix(self.mapper.state(), last)
    }

    fn paint_static<D: DisplayBackend>(&self, screen: &Screen, display: &mut D) -> Result<(), DisplayError> {
        display.clear()?;
        screen.render(display, Color::Bright)
    }
}
