use dejavu_core::fetch::{self, FetchState};
use dejavu_core::grid;
use dejavu_core::route::Route;
use dejavu_types::{AppEvent, ViewUpdate};

use super::EventLoop;

impl EventLoop {
    /// Search route entered: show pending, subscribe to the keyword's fetch
    /// (deduplicated and memoized per keyword) and arrange for the arrival
    /// to re-enter the loop stamped with its keyword.
    pub(super) async fn show_search(&mut self, keyword: String) -> anyhow::Result<()> {
        self.send_view(ViewUpdate::SearchPending {
            keyword: keyword.clone(),
        })
        .await?;

        let rx = self.state.searches.fetch(keyword.clone(), {
            let backend = self.backend.clone();
            let keyword = keyword.clone();
            move || async move { backend.search(&keyword).await }
        });

        let app_tx = self.app_tx.clone();
        tokio::spawn(async move {
            let _ = fetch::resolved(rx).await;
            let _ = app_tx.send(AppEvent::SearchResolved { keyword }).await;
        });

        Ok(())
    }

    pub(super) async fn on_search_resolved(&mut self, keyword: String) -> anyhow::Result<()> {
        // Key-stamped arrival check: only the keyword of the current route
        // may touch view state. Anything else resolved too late.
        let expected = Route::Search {
            text: Some(keyword.clone()),
        };
        if self.current_route() != expected {
            tracing::debug!("discarding stale search arrival for {keyword:?}");
            return Ok(());
        }

        match self.state.searches.peek(&keyword) {
            Some(FetchState::Ready(matches)) => {
                self.last_matches = Some(matches.clone());
                let grid = grid::build_grid(&keyword, matches.as_slice());
                self.grid = Some(grid.clone());
                self.send_view(ViewUpdate::Grid(grid)).await
            }
            Some(FetchState::Failed(cause)) => {
                tracing::warn!("search for {keyword:?} failed: {cause}");
                self.send_view(ViewUpdate::Unavailable {
                    message: cause.to_string(),
                })
                .await
            }
            // Re-issued since this arrival; a newer one will follow.
            _ => Ok(()),
        }
    }
}
