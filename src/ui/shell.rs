use anyhow::Result;

use crate::usecases::{
    context::AppContext,
    contracts::{AppEventSource, SessionOrchestrator},
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn SessionOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        user_id = context.user_id,
        backend = %context.config.backend.base_url,
        "starting chat shell"
    );

    let mut terminal = TerminalSession::new()?;

    while orchestrator.state().is_running() {
        terminal.draw(|frame| view::render(frame, orchestrator.state(), context.user_id))?;

        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }
    }

    Ok(())
}
