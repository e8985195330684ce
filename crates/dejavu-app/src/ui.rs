use dejavu_types::{AppEvent, ViewUpdate};
use kanal::AsyncReceiver;

/// Presenter loop. Owns no model state; it just writes out what the event
/// loop decided to show.
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    loop {
        let event = app_to_ui_rx.recv().await?;
        match event {
            AppEvent::LocationChanged(location) => println!("@ {location}"),
            AppEvent::View(update) => {
                for line in render_lines(&update) {
                    println!("{line}");
                }
            }
            AppEvent::Shutdown => return Ok(()),
            _ => {}
        }
    }
}

fn render_lines(update: &ViewUpdate) -> Vec<String> {
    match update {
        ViewUpdate::Blank => {
            vec!["nothing to show yet - try `search <keyword>`".to_string()]
        }
        ViewUpdate::SearchPending { keyword } => {
            vec![format!("searching for \"{keyword}\"...")]
        }
        ViewUpdate::Grid(grid) => {
            let mut lines = vec![format!(
                "results for \"{}\": {} shown, {} dropped",
                grid.keyword,
                grid.tiles.len(),
                grid.dropped
            )];
            for (index, tile) in grid.tiles.iter().enumerate() {
                lines.push(format!(
                    "  [{index}] image {} ({}) -> {}",
                    tile.image_id,
                    snippet(&tile.matched),
                    tile.target
                ));
            }
            lines
        }
        ViewUpdate::DetailPending { image_id } => {
            vec![format!("loading image {image_id}...")]
        }
        ViewUpdate::Detail(view) => {
            let mut lines = vec![format!(
                "image {} native {}x{} displayed {:.0}x{:.0} ({})",
                view.image_id,
                view.native.width,
                view.native.height,
                view.display.width,
                view.display.height,
                view.image_url
            )];
            for overlay in &view.overlays {
                lines.push(format!(
                    "  highlight at ({:.1}, {:.1}) size {:.1}x{:.1}",
                    overlay.left, overlay.top, overlay.width, overlay.height
                ));
            }
            lines
        }
        ViewUpdate::Unavailable { message } => {
            vec![format!("unavailable: {message}")]
        }
    }
}

fn snippet(matched: &[String]) -> String {
    const MAX_LEN: usize = 60;
    if matched.is_empty() {
        return "no localized match".to_string();
    }
    let joined = matched.join(", ");
    if joined.chars().count() <= MAX_LEN {
        return joined;
    }
    let cut: String = joined.chars().take(MAX_LEN).collect();
    format!("{cut}...")
}
