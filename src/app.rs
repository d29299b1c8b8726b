use std::{sync::mpsc, time::Duration};

use anyhow::Result;

use crate::{
    backend::{
        self, live::LiveChannelMonitor, rest::QuickHireRestClient, worker::RestWorker,
        BackendHandle,
    },
    cli::{Cli, Command},
    domain, infra, ui,
    usecases::{self, bootstrap, context::AppContext, session::ChatSessionOrchestrator},
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let context = bootstrap::bootstrap(cli.config.as_deref(), cli.user_id)?;

            tracing::debug!(
                ui = ui::module_name(),
                domain = domain::module_name(),
                backend = backend::module_name(),
                usecases = usecases::module_name(),
                infra = infra::module_name(),
                "module boundaries loaded"
            );

            run_session(&context)?;
        }
    }

    Ok(())
}

fn run_session(context: &AppContext) -> Result<()> {
    let (events_tx, events_rx) = mpsc::channel();

    let rest_client = QuickHireRestClient::new(&context.config.backend)?;
    let rest_worker = RestWorker::start(
        rest_client,
        context.user_id,
        context.config.session.history_page_size,
        events_tx.clone(),
    )?;

    let runtime = tokio::runtime::Runtime::new()?;
    let (live_monitor, live_handle) = LiveChannelMonitor::start(
        &runtime,
        context.config.backend.ws_url(),
        context.user_id,
        Duration::from_millis(context.config.backend.reconnect_delay_ms),
        events_tx,
    );

    let backend = BackendHandle::new(rest_worker.request_tx(), live_handle);
    let mut orchestrator = ChatSessionOrchestrator::new(context.user_id, backend);

    // Kick off the initial roster fetch before the first frame.
    orchestrator.request_initial_roster();

    let mut event_source = ui::event_source::CompositeEventSource::new(events_rx);
    let result = ui::shell::start(context, &mut event_source, &mut orchestrator);

    // The monitor and worker stop via their Drop impls; the runtime is
    // dropped last so the channel task can run its teardown.
    drop(orchestrator);
    drop(live_monitor);
    drop(rest_worker);
    drop(runtime);

    result
}
