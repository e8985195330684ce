use dejavu_core::detail;
use dejavu_core::fetch::{self, FetchState};
use dejavu_core::route::Route;
use dejavu_types::{AppEvent, PixelSize, Selection, ViewUpdate};

use super::EventLoop;

impl EventLoop {
    /// Detail route entered: the fetch key is the whole selection, so a
    /// changed image id or id list re-fetches while an identical pair is
    /// served from the cache.
    pub(super) async fn show_detail(&mut self, selection: Selection) -> anyhow::Result<()> {
        self.send_view(ViewUpdate::DetailPending {
            image_id: selection.image_id.clone(),
        })
        .await?;

        let rx = self.state.images.fetch(selection.clone(), {
            let backend = self.backend.clone();
            let selection = selection.clone();
            move || async move { backend.fetch_image(&selection).await }
        });

        let app_tx = self.app_tx.clone();
        tokio::spawn(async move {
            let _ = fetch::resolved(rx).await;
            let _ = app_tx.send(AppEvent::ImageResolved { selection }).await;
        });

        Ok(())
    }

    pub(super) async fn on_image_resolved(&mut self, selection: Selection) -> anyhow::Result<()> {
        let expected = Route::Detail {
            selection: Some(selection.clone()),
        };
        if self.current_route() != expected {
            tracing::debug!("discarding stale image arrival for {}", selection.image_id);
            return Ok(());
        }

        match self.state.images.peek(&selection) {
            Some(FetchState::Ready(image)) => self.send_detail(&selection, image.native).await,
            Some(FetchState::Failed(cause)) => {
                tracing::warn!("image fetch for {} failed: {cause}", selection.image_id);
                self.send_view(ViewUpdate::Unavailable {
                    message: cause.to_string(),
                })
                .await
            }
            _ => Ok(()),
        }
    }

    /// Rebuilds and sends the detail view for the current viewport. Region
    /// geometry comes from the last search payload when the image was
    /// reached through a grid; a cold navigation has none and renders the
    /// backend-marked image without client-side overlays.
    pub(super) async fn send_detail(
        &mut self,
        selection: &Selection,
        native: PixelSize,
    ) -> anyhow::Result<()> {
        let regions = self
            .last_matches
            .as_ref()
            .and_then(|matches| matches.iter().find(|m| m.image_id == selection.image_id))
            .map(|m| m.texts.as_slice());

        let view = detail::build_detail(selection, regions, native, self.viewport);
        self.send_view(ViewUpdate::Detail(view)).await
    }

    /// Viewport changed: remap a currently shown, already fetched detail.
    pub(super) async fn refresh_detail(&mut self) -> anyhow::Result<()> {
        let Route::Detail {
            selection: Some(selection),
        } = self.current_route()
        else {
            return Ok(());
        };

        if let Some(FetchState::Ready(image)) = self.state.images.peek(&selection) {
            self.send_detail(&selection, image.native).await?;
        }
        Ok(())
    }
}
