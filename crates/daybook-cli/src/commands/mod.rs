pub mod canvas;
pub mod config;
pub mod entry;
pub mod goals;
pub mod todos;

use daybook_core::gateway::PersistenceGateway;
use daybook_core::{DashboardSession, Tab};

use crate::error::CliError;

/// Convert a 1-based position from the command line to a list index.
pub fn position_to_index(position: usize) -> Result<usize, CliError> {
    position.checked_sub(1).ok_or(CliError::InvalidIndex)
}

/// Load `tab` from the backend, refusing to continue if it declined.
///
/// Mutating commands save the whole list afterwards, so working from a list
/// that never loaded would overwrite the stored one.
pub async fn require_loaded<G: PersistenceGateway>(
    session: &mut DashboardSession<G>,
    tab: Tab,
    what: &'static str,
) -> Result<(), CliError> {
    if session.reload(tab).await? {
        Ok(())
    } else {
        Err(CliError::LoadDeclined(what))
    }
}
