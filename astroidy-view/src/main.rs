use anyhow::{Context, Result};
use astroidy_common::logging;
use astroidy_view::client::ProxyClient;
use astroidy_view::command::{Command, HELP_TEXT};
use astroidy_view::config::ViewConfig;
use astroidy_view::render::render_page;
use astroidy_view::state::NoticeLevel;
use astroidy_view::{Event, ViewController, ViewState};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const CONFIG_PATH: &str = "view.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let config = ViewConfig::load(CONFIG_PATH)?;

    // stdout belongs to the page, so logs only go to file
    let _logging_guard = logging::init_logging("logs", "astroidy-view", &config.log_level, false)
        .context("Failed to initialize logging")?;

    tracing::info!("Astroidy view starting against {}{}", config.proxy_url, config.feed_path);

    let source = Arc::new(ProxyClient::new(&config)?);
    let (mut controller, mut completions) = ViewController::new(ViewState::default(), source);
    controller.dispatch(Event::Mounted);
    redraw(&mut controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(event) = completions.recv() => {
                controller.dispatch(event);
                redraw(&mut controller);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if !handle_line(&mut controller, &line) {
                    break;
                }
            }
        }
    }

    tracing::info!("Astroidy view stopped");
    Ok(())
}

/// Run one input line; `false` means the user asked to leave
fn handle_line(controller: &mut ViewController, line: &str) -> bool {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(e) => {
            println!("{}", e);
            return true;
        }
    };

    match command {
        Command::Quit => return false,
        Command::Help => {
            println!("{}", HELP_TEXT);
            return true;
        }
        _ => {}
    }

    match command.to_event(controller.state()) {
        Ok(Some(event)) => {
            controller.dispatch(event);
            redraw(controller);
        }
        Ok(None) => redraw(controller),
        Err(e) => println!("{}", e),
    }
    true
}

fn redraw(controller: &mut ViewController) {
    print!("{}", render_page(controller.state()));
    for notice in controller.take_notices() {
        match notice.level {
            NoticeLevel::Warning => println!("! {}", notice.message),
            NoticeLevel::Error => println!("!! {}", notice.message),
        }
    }
    println!("> (type 'help' for commands)");
}
