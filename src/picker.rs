//! Interactive fuzzy selection of candidate resources.
//!
//! The selection model in [`state`] is plain data and fully testable; only
//! the event loop here touches the terminal. Matching is delegated to
//! frizbee.

mod render;
mod state;

use std::time::Duration;

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use thiserror::Error;

use crate::resource::Resource;
use state::{KeyOutcome, PickerState};

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("selection aborted")]
    Aborted,

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Run the fuzzy picker over the candidates and return the addresses chosen
/// by the operator, in selection order. The terminal is restored before
/// returning, whether or not a selection was made.
pub fn pick(resources: &[Resource]) -> Result<Vec<String>, PickerError> {
    let mut terminal = ratatui::try_init()?;
    let result = run_event_loop(&mut terminal, resources);
    ratatui::restore();
    result
}

fn run_event_loop(
    terminal: &mut DefaultTerminal,
    resources: &[Resource],
) -> Result<Vec<String>, PickerError> {
    let mut state = PickerState::new(resources);
    loop {
        terminal.draw(|frame| render::draw(frame, &state))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match state.handle_key(key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Abort => return Err(PickerError::Aborted),
                KeyOutcome::Accept(chosen) => return Ok(chosen),
            },
            _ => {}
        }
    }
}
