use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::media::MediaFile;
use crate::models::{BlockId, EntrySubmission};

/// Dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Entry,
    Canvas,
    Todos,
    Goals,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Entry, Self::Canvas, Self::Todos, Self::Goals];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Canvas => "canvas",
            Self::Todos => "todos",
            Self::Goals => "goals",
        }
    }

    /// Page heading shown while the tab is active.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Entry => "Journal Entry",
            Self::Canvas => "Canvas",
            Self::Todos => "To-Do List",
            Self::Goals => "My Goals",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown tab: {value}")))
    }
}

/// A user interaction routed through [`DashboardSession::dispatch`].
///
/// [`DashboardSession::dispatch`]: super::DashboardSession::dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SwitchTab(Tab),
    LoadInitialData,
    SetTitle(String),
    AddTextBlock(String),
    AddMedia(MediaFile),
    RemoveBlock(BlockId),
    UpdateText { id: BlockId, text: String },
    UpdateCaption { id: BlockId, caption: String },
    StartRecording,
    RecordSamples(Vec<i16>),
    StopRecording,
    SubmitEntry,
    NewEntry,
    AddTodo(String),
    ToggleTodo { index: usize, completed: bool },
    DeleteTodo(usize),
    SaveTodos,
    AddGoal,
    UpdateGoal {
        index: usize,
        title: String,
        description: String,
    },
    DeleteGoal(usize),
    SaveGoals,
    SaveCanvas,
}

impl Command {
    /// Short name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SwitchTab(_) => "switch_tab",
            Self::LoadInitialData => "load_initial_data",
            Self::SetTitle(_) => "set_title",
            Self::AddTextBlock(_) => "add_text_block",
            Self::AddMedia(_) => "add_media",
            Self::RemoveBlock(_) => "remove_block",
            Self::UpdateText { .. } => "update_text",
            Self::UpdateCaption { .. } => "update_caption",
            Self::StartRecording => "start_recording",
            Self::RecordSamples(_) => "record_samples",
            Self::StopRecording => "stop_recording",
            Self::SubmitEntry => "submit_entry",
            Self::NewEntry => "new_entry",
            Self::AddTodo(_) => "add_todo",
            Self::ToggleTodo { .. } => "toggle_todo",
            Self::DeleteTodo(_) => "delete_todo",
            Self::SaveTodos => "save_todos",
            Self::AddGoal => "add_goal",
            Self::UpdateGoal { .. } => "update_goal",
            Self::DeleteGoal(_) => "delete_goal",
            Self::SaveGoals => "save_goals",
            Self::SaveCanvas => "save_canvas",
        }
    }
}

/// Which lists a load actually refreshed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub todos: bool,
    pub goals: bool,
    pub canvas: bool,
}

/// Result of a successfully dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Local state changed; nothing else to report.
    Updated,
    TabSwitched(Tab),
    Loaded(LoadReport),
    BlockAdded(BlockId),
    RecordingStarted,
    /// The voice block created on stop, if a recording was running.
    RecordingSaved(Option<BlockId>),
    EntrySaved(EntrySubmission),
    /// Index of the new to-do; `None` when blank input was ignored.
    TodoAdded(Option<usize>),
    GoalAdded(usize),
    Saved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_parses_names_and_exposes_titles() {
        assert_eq!("Todos".parse::<Tab>().unwrap(), Tab::Todos);
        assert_eq!(" goals ".parse::<Tab>().unwrap(), Tab::Goals);
        assert!(matches!(
            "calendar".parse::<Tab>(),
            Err(Error::InvalidInput(_))
        ));

        let titles: Vec<&str> = Tab::ALL.iter().map(|tab| tab.title()).collect();
        assert_eq!(
            titles,
            vec!["Journal Entry", "Canvas", "To-Do List", "My Goals"]
        );
        assert_eq!(Tab::default(), Tab::Entry);
    }

    #[test]
    fn command_names_are_snake_case() {
        assert_eq!(Command::SubmitEntry.name(), "submit_entry");
        assert_eq!(
            Command::ToggleTodo {
                index: 0,
                completed: true
            }
            .name(),
            "toggle_todo"
        );
    }
}
