use daybook_core::gateway::PersistenceGateway;
use daybook_core::models::Goal;
use daybook_core::{Command, DashboardSession, Outcome, Tab};

use crate::cli::GoalsCommands;
use crate::commands::{position_to_index, require_loaded};
use crate::error::CliError;

pub async fn run_goals<G: PersistenceGateway>(
    session: &mut DashboardSession<G>,
    command: GoalsCommands,
) -> Result<(), CliError> {
    require_loaded(session, Tab::Goals, "goals").await?;

    match command {
        GoalsCommands::List { json } => {
            let goals = session.goals().items();
            if json {
                println!("{}", serde_json::to_string_pretty(goals)?);
            } else if goals.is_empty() {
                println!("No goals");
            } else {
                for line in format_goal_lines(goals) {
                    println!("{line}");
                }
            }
            return Ok(());
        }
        GoalsCommands::Add { title, description } => {
            if let Outcome::GoalAdded(index) = session.dispatch(Command::AddGoal).await? {
                session
                    .dispatch(Command::UpdateGoal {
                        index,
                        title,
                        description,
                    })
                    .await?;
            }
        }
        GoalsCommands::Remove { index } => {
            let index = position_to_index(index)?;
            session.dispatch(Command::DeleteGoal(index)).await?;
        }
    }

    session.dispatch(Command::SaveGoals).await?;
    println!("Goals saved ({} total)", session.goals().collect().len());
    Ok(())
}

pub fn format_goal_lines(goals: &[Goal]) -> Vec<String> {
    goals
        .iter()
        .enumerate()
        .map(|(index, goal)| {
            if goal.description.trim().is_empty() {
                format!("{}. {}", index + 1, goal.title)
            } else {
                format!("{}. {} - {}", index + 1, goal.title, goal.description)
            }
        })
        .collect()
}
