use super::{
    compose_state::ComposeState, conversation_state::ConversationState,
    events::ConnectivityStatus, roster_state::RosterState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Roster,
    Compose,
}

/// Everything a mounted chat view owns. Torn down with the view; nothing
/// here outlives the session loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    connectivity: ConnectivityStatus,
    active_pane: ActivePane,
    roster: RosterState,
    conversation: ConversationState,
    compose: ComposeState,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            connectivity: ConnectivityStatus::Connecting,
            active_pane: ActivePane::Roster,
            roster: RosterState::default(),
            conversation: ConversationState::default(),
            compose: ComposeState::default(),
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn connectivity(&self) -> ConnectivityStatus {
        self.connectivity
    }

    pub fn set_connectivity(&mut self, status: ConnectivityStatus) {
        self.connectivity = status;
    }

    pub fn active_pane(&self) -> ActivePane {
        self.active_pane
    }

    pub fn focus_pane(&mut self, pane: ActivePane) {
        self.active_pane = pane;
    }

    pub fn roster(&self) -> &RosterState {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut RosterState {
        &mut self.roster
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut ConversationState {
        &mut self.conversation
    }

    pub fn compose(&self) -> &ComposeState {
        &self.compose
    }

    pub fn compose_mut(&mut self) -> &mut ComposeState {
        &mut self.compose
    }
}
