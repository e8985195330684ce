use std::sync::Arc;

use dejavu_api::SearchBackend;
use dejavu_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::input_loop;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Channel pairs wiring the event loop, presenter, and stdin reader.
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // view updates can burst on fast navigation
            ui_to_app: kanal::bounded_async(64),  // user input plus fetch resolutions
        }
    }
}

/// Owns the channels, shared state, and cancellation token, and spawns the
/// three long-lived loops into one `JoinSet`.
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        backend: Arc<dyn SearchBackend>,
        initial_location: String,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop; fetch resolutions loop back through the ui_to_app sender.
        tasks.spawn(event_loop(
            self.state.clone(),
            backend,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.channels.ui_to_app.0.clone(),
            initial_location,
        ));

        // Presenter loop
        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone()));

        // Stdin reader
        tasks.spawn(input_loop(
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
