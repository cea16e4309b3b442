use daybook_core::gateway::PersistenceGateway;
use daybook_core::models::TodoItem;
use daybook_core::{Command, DashboardSession, Outcome, Tab};

use crate::cli::TodosCommands;
use crate::commands::{position_to_index, require_loaded};
use crate::error::CliError;

pub async fn run_todos<G: PersistenceGateway>(
    session: &mut DashboardSession<G>,
    command: TodosCommands,
) -> Result<(), CliError> {
    require_loaded(session, Tab::Todos, "to-do list").await?;

    match command {
        TodosCommands::List { json } => {
            let items = session.todos().items();
            if json {
                println!("{}", serde_json::to_string_pretty(items)?);
            } else if items.is_empty() {
                println!("No to-dos");
            } else {
                for line in format_todo_lines(items) {
                    println!("{line}");
                }
            }
            return Ok(());
        }
        TodosCommands::Add { text } => {
            let outcome = session.dispatch(Command::AddTodo(text.join(" "))).await?;
            if outcome == Outcome::TodoAdded(None) {
                return Err(CliError::EmptyTodo);
            }
        }
        TodosCommands::Done { index } => {
            let index = position_to_index(index)?;
            session
                .dispatch(Command::ToggleTodo {
                    index,
                    completed: true,
                })
                .await?;
        }
        TodosCommands::Undo { index } => {
            let index = position_to_index(index)?;
            session
                .dispatch(Command::ToggleTodo {
                    index,
                    completed: false,
                })
                .await?;
        }
        TodosCommands::Remove { index } => {
            let index = position_to_index(index)?;
            session.dispatch(Command::DeleteTodo(index)).await?;
        }
    }

    session.dispatch(Command::SaveTodos).await?;
    for line in format_todo_lines(session.todos().items()) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_todo_lines(items: &[TodoItem]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mark = if item.completed { 'x' } else { ' ' };
            format!("{}. [{mark}] {}", index + 1, item.text)
        })
        .collect()
}
