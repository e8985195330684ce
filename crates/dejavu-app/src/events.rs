use std::sync::Arc;

use dejavu_api::SearchBackend;
use dejavu_core::route::{History, Route};
use dejavu_types::{AppEvent, DisplaySize, GridView, Match, UiEvent, ViewUpdate};
use kanal::{AsyncReceiver, AsyncSender};

use crate::state::AppState;

pub mod detail_view;
pub mod search_view;

/// Owner of all navigation state. Fetch resolutions re-enter through the
/// same receiver as UI events, stamped with their key, and are checked
/// against the current location before they may touch any view state.
pub struct EventLoop {
    state: Arc<AppState>,
    backend: Arc<dyn SearchBackend>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    /// Loops resolution events back into this event loop.
    app_tx: AsyncSender<AppEvent>,
    history: History,
    viewport: DisplaySize,
    /// Grid currently on screen, for `open <index>`.
    grid: Option<GridView>,
    /// Matches from the most recent successful search, the only source of
    /// region geometry for client-side overlays.
    last_matches: Option<Arc<Vec<Match>>>,
}

/// App's main loop.
pub async fn event_loop(
    state: Arc<AppState>,
    backend: Arc<dyn SearchBackend>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    app_tx: AsyncSender<AppEvent>,
    initial_location: String,
) -> anyhow::Result<()> {
    let viewport = {
        let config = state.config.read().await;
        DisplaySize {
            width: config.ui.viewport_width,
            height: config.ui.viewport_height,
        }
    };

    let mut event_loop = EventLoop {
        state,
        backend,
        app_to_ui_tx,
        app_tx,
        history: History::new(initial_location.clone()),
        viewport,
        grid: None,
        last_matches: None,
    };

    event_loop.announce(initial_location.clone()).await?;
    event_loop.dispatch(&initial_location).await?;

    loop {
        let event = ui_to_app_rx.recv().await?;
        if !event_loop.handle(event).await? {
            return Ok(());
        }
    }
}

impl EventLoop {
    /// Returns false once the loop should stop.
    async fn handle(&mut self, event: AppEvent) -> anyhow::Result<bool> {
        match event {
            AppEvent::Ui(event) => self.handle_ui(event).await,
            AppEvent::SearchResolved { keyword } => {
                self.on_search_resolved(keyword).await?;
                Ok(true)
            }
            AppEvent::ImageResolved { selection } => {
                self.on_image_resolved(selection).await?;
                Ok(true)
            }
            // Presenter-bound events never arrive on this receiver.
            _ => Ok(true),
        }
    }

    /// Returns false on quit, after telling the presenter to shut down.
    async fn handle_ui(&mut self, event: UiEvent) -> anyhow::Result<bool> {
        match event {
            UiEvent::SubmitKeyword(keyword) => {
                self.navigate(Route::search(&keyword).to_location()).await?;
            }
            UiEvent::OpenResult(index) => {
                let target = self
                    .grid
                    .as_ref()
                    .and_then(|grid| grid.tiles.get(index))
                    .map(|tile| tile.target.clone());
                match target {
                    Some(target) => self.navigate(target).await?,
                    None => tracing::warn!("no result tile at index {index}"),
                }
            }
            UiEvent::OpenLocation(location) => self.navigate(location).await?,
            UiEvent::Back => {
                let location = self.history.back().map(str::to_string);
                self.jump(location).await?;
            }
            UiEvent::Forward => {
                let location = self.history.forward().map(str::to_string);
                self.jump(location).await?;
            }
            UiEvent::Reload => {
                let location = self.history.current().to_string();
                self.dispatch(&location).await?;
            }
            UiEvent::ViewportResized { width, height } => {
                self.viewport = DisplaySize { width, height };
                // Overlay mapping depends on the displayed size, so a shown
                // detail view is rebuilt, not kept.
                self.refresh_detail().await?;
            }
            UiEvent::Quit => {
                let _ = self.app_to_ui_tx.send(AppEvent::Shutdown).await;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Pushes a new location and dispatches it. Navigation is the only
    /// trigger for downstream fetches.
    async fn navigate(&mut self, location: String) -> anyhow::Result<()> {
        self.history.navigate(location.clone());
        self.announce(location.clone()).await?;
        self.dispatch(&location).await
    }

    /// Back/forward movement: the cursor already moved, just re-dispatch.
    async fn jump(&mut self, location: Option<String>) -> anyhow::Result<()> {
        let Some(location) = location else {
            return Ok(());
        };
        self.announce(location.clone()).await?;
        self.dispatch(&location).await
    }

    async fn announce(&self, location: String) -> anyhow::Result<()> {
        self.app_to_ui_tx
            .send(AppEvent::LocationChanged(location))
            .await?;
        Ok(())
    }

    async fn dispatch(&mut self, location: &str) -> anyhow::Result<()> {
        match Route::parse(location) {
            Route::Search { text: Some(keyword) } => self.show_search(keyword).await,
            Route::Detail {
                selection: Some(selection),
            } => self.show_detail(selection).await,
            // No query yet, or malformed parameters: placeholder, not error.
            Route::Home | Route::Search { text: None } | Route::Detail { selection: None } => {
                self.send_view(ViewUpdate::Blank).await
            }
        }
    }

    async fn send_view(&self, view: ViewUpdate) -> anyhow::Result<()> {
        self.app_to_ui_tx.send(AppEvent::View(view)).await?;
        Ok(())
    }

    fn current_route(&self) -> Route {
        Route::parse(self.history.current())
    }
}
