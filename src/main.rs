mod app;
mod application;
mod domain;
mod fetcher;
mod logging;
mod ui;
mod utils;

use iced::{window, Size};

const WINDOW_WIDTH: f32 = 750.0;
const WINDOW_HEIGHT: f32 = 400.0;

fn main() -> iced::Result {
    logging::initialize();
    log::info!("Starting YouTube Download {}", env!("CARGO_PKG_VERSION"));

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title("YouTube Download")
        .window(window::Settings {
            size: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            resizable: false,
            ..Default::default()
        })
        .run()
}
