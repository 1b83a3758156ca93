use std::path::PathBuf;
use std::sync::Arc;

use iced::Task;

use crate::application::{DownloadCoordinator, FetchEvent};
use crate::domain::{DownloadPhase, DownloadRequest, FetchStatus};
use crate::fetcher::{FetcherConfig, MediaFetcher, YtDlpFetcher};
use crate::ui::{DownloadMessage, DownloadView};
use crate::utils::{default_save_dir, with_trailing_separator};

pub struct DownloadApp {
    view: DownloadView,
    coordinator: DownloadCoordinator,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadApp {
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(YtDlpFetcher::new(FetcherConfig::default())))
    }

    pub fn with_fetcher(fetcher: Arc<dyn MediaFetcher>) -> Self {
        Self {
            view: DownloadView::default(),
            coordinator: DownloadCoordinator::new(fetcher),
        }
    }

    /// Snapshot the form and switch to busy.
    ///
    /// Controls are disabled here, before the background task exists, so a
    /// second click can never start a second fetch. Returns `None` if a
    /// download is already running.
    fn begin_download(&mut self) -> Option<DownloadRequest> {
        if self.view.phase() == DownloadPhase::Busy {
            log::warn!("Download already running, ignoring trigger");
            return None;
        }

        if self.view.save_path.is_empty() {
            self.view.save_path = default_save_dir();
        }

        self.view.set_phase(DownloadPhase::Busy);

        let request = DownloadRequest {
            url: self.view.url.clone(),
            destination: PathBuf::from(&self.view.save_path),
            mode: self.view.mode,
        };
        log::info!(
            "Download requested: {} ({}) -> {}",
            request.url,
            request.mode,
            request.destination.display()
        );

        Some(request)
    }

    fn apply_folder_choice(&mut self, choice: Option<PathBuf>) {
        let Some(dir) = choice else {
            log::debug!("Folder selection cancelled");
            return;
        };

        // The running download already has its destination.
        if !self.view.inputs_enabled() {
            log::warn!(
                "Ignoring folder {} picked while a download is running",
                dir.display()
            );
            return;
        }

        self.view.save_path = with_trailing_separator(&dir);
    }

    fn apply_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Downloading => {
                self.view.set_status(FetchStatus::Downloading);
            }
            FetchEvent::Finished(result) => {
                if self.view.phase() == DownloadPhase::Idle {
                    log::warn!("Ignoring completion with no download running: {:?}", result);
                    return;
                }

                let status = match result {
                    Ok(_) => FetchStatus::Completed,
                    Err(kind) => FetchStatus::Failed(kind),
                };
                self.view.set_status(status);
                self.view.set_phase(DownloadPhase::Idle);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// Directory picked in the native dialog, `None` when cancelled
    FolderChosen(Option<PathBuf>),
    /// Status from the running download, delivered on the UI thread
    Fetch(FetchEvent),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                DownloadMessage::DownloadPressed => {
                    if let Some(request) = app.begin_download() {
                        // Runs on iced's executor; every event comes back through `update`.
                        return Task::stream(app.coordinator.fetch_stream(request))
                            .map(Message::Fetch);
                    }
                }
                DownloadMessage::OpenFolderPressed => {
                    if app.view.folder_picker_enabled() {
                        app.view.picking_folder = true;
                        return Task::perform(
                            DownloadCoordinator::choose_folder(),
                            Message::FolderChosen,
                        );
                    }
                }
                _ => {}
            }
        }
        Message::FolderChosen(choice) => {
            app.view.picking_folder = false;
            app.apply_folder_choice(choice);
        }
        Message::Fetch(event) => {
            app.apply_fetch_event(event);
        }
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
