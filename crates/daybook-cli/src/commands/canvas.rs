use daybook_core::gateway::PersistenceGateway;
use daybook_core::{Command, DashboardSession, Tab};

use crate::cli::CanvasCommands;
use crate::commands::require_loaded;
use crate::error::CliError;

pub async fn run_canvas<G: PersistenceGateway>(
    session: &mut DashboardSession<G>,
    command: CanvasCommands,
) -> Result<(), CliError> {
    match command {
        CanvasCommands::Show => {
            require_loaded(session, Tab::Canvas, "canvas").await?;
            println!(
                "{}",
                serde_json::to_string_pretty(session.canvas().elements())?
            );
        }
        CanvasCommands::Save => {
            session.dispatch(Command::SaveCanvas).await?;
            println!(
                "Canvas saved ({} elements)",
                session.canvas().collect().len()
            );
        }
    }
    Ok(())
}
