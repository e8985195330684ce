use dejavu_types::{AppEvent, UiEvent};
use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Stdin command reader, the navigation bar of this client. Collects user
/// intents and dispatches them; it never touches model state itself.
pub async fn input_loop(
    cancel: CancellationToken,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // EOF: treat like quit so the loops wind down.
                    ui_to_app_tx.send(AppEvent::Ui(UiEvent::Quit)).await?;
                    return Ok(());
                };

                if line.trim().is_empty() {
                    continue;
                }

                match parse_command(&line) {
                    Some(event) => {
                        let quit = event == UiEvent::Quit;
                        ui_to_app_tx.send(AppEvent::Ui(event)).await?;
                        if quit {
                            return Ok(());
                        }
                    }
                    None => println!("unknown command: {}", line.trim()),
                }
            }
        }
    }
}

/// One line of input to one intent.
///
///   search <keyword>      submit a keyword (may be empty)
///   open <index|location> open a grid tile or a raw location
///   back | forward        move through the location history
///   reload                re-dispatch the current location
///   size <W>x<H>          change the viewport
///   quit
pub fn parse_command(line: &str) -> Option<UiEvent> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "search" | "s" => Some(UiEvent::SubmitKeyword(rest.to_string())),
        "open" | "o" => {
            if rest.starts_with('/') {
                Some(UiEvent::OpenLocation(rest.to_string()))
            } else {
                rest.parse().ok().map(UiEvent::OpenResult)
            }
        }
        "back" | "b" => Some(UiEvent::Back),
        "forward" | "f" => Some(UiEvent::Forward),
        "reload" | "r" => Some(UiEvent::Reload),
        "size" => {
            let (width, height) = rest.split_once('x')?;
            Some(UiEvent::ViewportResized {
                width: width.trim().parse().ok()?,
                height: height.trim().parse().ok()?,
            })
        }
        "quit" | "q" | "exit" => Some(UiEvent::Quit),
        _ => None,
    }
}
