use iced::{
    widget::{button, column, radio, row, text, text_input, Space},
    Alignment, Element, Length,
};

use crate::domain::{DownloadMode, DownloadPhase, FetchStatus};

const LABEL_WIDTH: f32 = 90.0;

/// Main view state
pub struct DownloadView {
    pub url: String,
    /// Shown read-only; only the folder picker or the cwd default write it.
    pub save_path: String,
    pub mode: DownloadMode,
    pub status_message: Option<String>,
    /// Set while the native folder dialog is open.
    pub picking_folder: bool,
    phase: DownloadPhase,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self {
            url: String::new(),
            save_path: String::new(),
            mode: DownloadMode::default(),
            status_message: None,
            picking_folder: false,
            phase: DownloadPhase::Idle,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    UrlChanged(String),
    ModeSelected(DownloadMode),
    OpenFolderPressed,
    DownloadPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::UrlChanged(url) => {
                self.url = url;
            }
            DownloadMessage::ModeSelected(mode) => {
                // Radios cannot be greyed out, so drop clicks while busy instead.
                if self.inputs_enabled() {
                    self.mode = mode;
                }
            }
            DownloadMessage::OpenFolderPressed | DownloadMessage::DownloadPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn phase(&self) -> DownloadPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: DownloadPhase) {
        self.phase = phase;
    }

    pub fn inputs_enabled(&self) -> bool {
        self.phase == DownloadPhase::Idle
    }

    pub fn folder_picker_enabled(&self) -> bool {
        self.inputs_enabled() && !self.picking_folder
    }

    pub fn set_status(&mut self, status: FetchStatus) {
        self.status_message = Some(status.message());
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let enabled = self.inputs_enabled();

        let url_row = row![
            text("Video URL").size(16).width(Length::Fixed(LABEL_WIDTH)),
            text_input("https://www.youtube.com/watch?v=...", &self.url)
                .on_input(DownloadMessage::UrlChanged)
                .padding(8)
                .size(16),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mode_row = row![
            radio(
                "Audio Only",
                DownloadMode::AudioOnly,
                Some(self.mode),
                DownloadMessage::ModeSelected
            ),
            radio(
                "Video with Audio",
                DownloadMode::VideoWithAudio,
                Some(self.mode),
                DownloadMessage::ModeSelected
            ),
        ]
        .spacing(30);

        // No `on_input`: the path field is read-only.
        let save_row = row![
            text("Save To").size(16).width(Length::Fixed(LABEL_WIDTH)),
            text_input("Current folder", &self.save_path)
                .padding(8)
                .size(16),
            button("Open Folder")
                .on_press_maybe(
                    self.folder_picker_enabled()
                        .then_some(DownloadMessage::OpenFolderPressed)
                )
                .padding([8, 16]),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mut content = column![
            text("YouTube Video and Audio Downloader").size(28),
            Space::new().height(Length::Fixed(20.0)),
            url_row,
            mode_row,
            save_row,
            Space::new().height(Length::Fixed(10.0)),
            button("Download")
                .on_press_maybe(enabled.then_some(DownloadMessage::DownloadPressed))
                .padding([10, 20]),
        ]
        .padding(20)
        .spacing(15)
        .align_x(Alignment::Center);

        if let Some(status) = &self.status_message {
            content = content.push(text(status).size(14));
        }

        content.into()
    }
}
