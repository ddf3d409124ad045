//! Wavestrip demo - interactive waveform start-time selector
//!
//! Seeds the selector with generated amplitude data (arriving a second
//! after launch, like a real decode), then lets you drag and fling the
//! strip to pick a start time. Every settled selection plays a 5s
//! highlight from the selection line.

mod app;

use iced::Size;

use app::{DemoApp, Message};
use wavestrip_core::calc_sample_step;

fn main() -> iced::Result {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("wavestrip-demo starting up");
    log::info!(
        "sample step for 44.1kHz, 72 bars over 40s: {}",
        calc_sample_step(44_100, 72, 40)
    );

    iced::application(DemoApp::new, update, view)
        .subscription(subscription)
        .theme(theme)
        .title("Wavestrip Demo")
        .window_size(Size::new(740.0, 220.0))
        .run()
}

/// Update function for iced
fn update(app: &mut DemoApp, message: Message) -> iced::Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &DemoApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &DemoApp) -> iced::Subscription<Message> {
    app.subscription()
}

/// Theme function for iced
fn theme(app: &DemoApp) -> iced::Theme {
    app.theme()
}
