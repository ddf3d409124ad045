//! Demo iced application hosting the selector strip
//!
//! Wires a `SelectorController` to the canvas widget: pointer messages are
//! stamped with the app clock and fed in, the 33ms tick drives fling
//! physics and the timer wheel, and listener callbacks come back over an
//! mpsc channel so the app can react (the demo starts the highlight on
//! every settled selection).

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use iced::widget::{column, text};
use iced::{time, Element, Subscription, Task, Theme};
use rand::Rng;

use wavestrip_core::{
    PointerEvent, PointerKind, SelectorConfig, SelectorController, SelectorListener, TimerWheel,
};
use wavestrip_widgets::{wave_strip, StripStyle, STRIP_HEIGHT};

/// Strip canvas width; the window is sized so the fill matches.
pub const STRIP_WIDTH: f32 = 720.0;

/// Amplitude data arrives this long after startup, like a host screen that
/// finishes decoding in the background.
const DATA_DELAY_MS: u64 = 1000;

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Tick for periodic updates (fling physics, timer wheel, data seed)
    Tick,
    /// Pointer phase + strip-local x from the canvas
    Pointer(PointerKind, f32),
}

/// Selector callback relayed to the app loop.
#[derive(Debug, Clone, Copy)]
enum ListenerEvent {
    Changing(u64),
    Select(u64),
    Ready,
    Limit,
}

/// Forwards selector callbacks over a channel.
struct ChannelListener {
    tx: Sender<ListenerEvent>,
}

impl SelectorListener for ChannelListener {
    fn on_changing(&mut self, time_ms: u64) {
        self.tx.send(ListenerEvent::Changing(time_ms)).ok();
    }

    fn on_select(&mut self, time_ms: u64) {
        self.tx.send(ListenerEvent::Select(time_ms)).ok();
    }

    fn on_ready(&mut self) {
        self.tx.send(ListenerEvent::Ready).ok();
    }

    fn on_limit(&mut self) {
        self.tx.send(ListenerEvent::Limit).ok();
    }
}

/// Application state
pub struct DemoApp {
    selector: SelectorController,
    wheel: TimerWheel,
    listener_rx: Receiver<ListenerEvent>,
    started: Instant,
    laid_out: bool,
    data_seeded: bool,
    status: String,
}

impl DemoApp {
    pub fn new() -> (Self, Task<Message>) {
        let (tx, listener_rx) = mpsc::channel();

        let mut selector = SelectorController::new(SelectorConfig::default());
        selector.set_listener(Box::new(ChannelListener { tx }));
        selector.set_play_duration(5000);
        // Layout has not happened yet: the seek is stored and replayed
        // during the ready sequence
        selector.seek_to(2000);

        let app = Self {
            selector,
            wheel: TimerWheel::new(),
            listener_rx,
            started: Instant::now(),
            laid_out: false,
            data_seeded: false,
            status: String::from("decoding..."),
        };
        (app, Task::none())
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Update application state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                let now = self.now_ms();
                // The strip size is known once the first frame is up, the
                // way a view reports its measured size
                if !self.laid_out {
                    self.laid_out = true;
                    self.selector
                        .layout(STRIP_WIDTH, STRIP_HEIGHT, &mut self.wheel);
                }
                if !self.data_seeded && now >= DATA_DELAY_MS {
                    self.data_seeded = true;
                    let mut rng = rand::thread_rng();
                    let volumes: Vec<u32> =
                        (0..200).map(|_| rng.gen_range(0..65_536)).collect();
                    self.selector.set_data(&volumes, &mut self.wheel);
                }

                self.selector.on_frame(now);
                for token in self.wheel.poll(now) {
                    self.selector.handle_timer(token, now, &mut self.wheel);
                }

                for event in self.listener_rx.try_iter().collect::<Vec<_>>() {
                    match event {
                        ListenerEvent::Changing(time_ms) => {
                            self.status = format!("choosing {:.1}s", time_ms as f64 / 1000.0);
                        }
                        ListenerEvent::Select(time_ms) => {
                            log::info!("selected start {}ms", time_ms);
                            self.status = format!("start {:.1}s", time_ms as f64 / 1000.0);
                            self.selector.start_highlight(&mut self.wheel);
                        }
                        ListenerEvent::Ready => {
                            log::info!("selector ready");
                            self.status = String::from("ready");
                        }
                        ListenerEvent::Limit => {
                            log::info!("scroll limit reached");
                            self.status = String::from("end of track");
                        }
                    }
                }

                // iced redraws after every message; the explicit request is
                // for hosts with manual invalidation
                self.selector.take_redraw();
                Task::none()
            }

            Message::Pointer(kind, x) => {
                let event = PointerEvent {
                    kind,
                    x,
                    timestamp_ms: self.now_ms(),
                };
                self.selector.handle_pointer(event, &mut self.wheel);
                Task::none()
            }
        }
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let strip = wave_strip(self.selector.frame(), StripStyle::default(), Message::Pointer);

        column![text(&self.status).size(14), strip]
            .spacing(10)
            .padding(10)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        // Drive physics and timers at ~30fps
        time::every(Duration::from_millis(33)).map(|_| Message::Tick)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
