//! Terminal browser for the proof library.

pub mod app;
mod widgets;

use std::io::stdout;

use app::App;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::prelude::*;

use crate::{
    error::Result,
    library::{KeyValueStorage, ProofStore},
};

pub async fn run<S: KeyValueStorage>(store: ProofStore<S>) -> Result<()> {
    let mut app = App::new(store)?;

    enable_raw_mode()?;
    stdout()
        .execute(EnterAlternateScreen)?
        .execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    tracing::info!("TUI started");

    let mut event_stream = EventStream::new();
    let result: Result<()> = async {
        while !app.should_exit {
            terminal.draw(|frame| app.render(frame))?;
            match event_stream.next().await {
                Some(Ok(event)) => app.handle_event(&event),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        }
        Ok(())
    }
    .await;

    disable_raw_mode()?;
    stdout()
        .execute(DisableMouseCapture)?
        .execute(LeaveAlternateScreen)?;
    tracing::info!("TUI stopped");

    result
}
