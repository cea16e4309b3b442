//! Dashboard session.
//!
//! `DashboardSession` owns everything a dashboard shows: the entry editor,
//! the to-do/goal/canvas editors, the voice recorder and the notifier. Front
//! ends translate user events into [`Command`]s and hand them to
//! [`DashboardSession::dispatch`], which applies one mutation per command and
//! talks to the backend through a [`PersistenceGateway`].

mod command;

use std::fmt;

pub use command::{Command, LoadReport, Outcome, Tab};

use crate::config::ClientConfig;
use crate::editor::{EditorSession, EditorView};
use crate::error::{Error, Result};
use crate::gateway::PersistenceGateway;
use crate::lists::{CanvasBoard, GoalList, TodoList};
use crate::media::MediaFile;
use crate::models::{BlockKind, EntrySubmission};
use crate::notify::Notifier;
use crate::util::today_utc;
use crate::voice::{MicrophoneAccess, StaticMicrophoneAccess, VoiceRecorder};

pub struct DashboardSession<G> {
    gateway: G,
    config: ClientConfig,
    tab: Tab,
    editor: EditorSession,
    todos: TodoList,
    goals: GoalList,
    canvas: CanvasBoard,
    recorder: VoiceRecorder,
    microphone: Box<dyn MicrophoneAccess + Send + Sync>,
    notifier: Notifier,
}

impl<G> fmt::Debug for DashboardSession<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DashboardSession")
            .field("config", &self.config)
            .field("tab", &self.tab)
            .field("editor", &self.editor)
            .field("todos", &self.todos.len())
            .field("goals", &self.goals.len())
            .field("recording", &self.recorder.is_recording())
            .finish_non_exhaustive()
    }
}

impl<G: PersistenceGateway> DashboardSession<G> {
    /// New session on the entry tab with a blank editor.
    ///
    /// Microphone access is refused until a source is installed with
    /// [`with_microphone`](Self::with_microphone).
    pub fn new(gateway: G, config: ClientConfig) -> Self {
        let notifier = Notifier::new(config.notification_ms);
        Self {
            gateway,
            config,
            tab: Tab::Entry,
            editor: EditorSession::new(),
            todos: TodoList::new(),
            goals: GoalList::new(),
            canvas: CanvasBoard::new(),
            recorder: VoiceRecorder::default(),
            microphone: Box::new(StaticMicrophoneAccess { granted: false }),
            notifier,
        }
    }

    #[must_use]
    pub fn with_microphone(mut self, microphone: impl MicrophoneAccess + Send + Sync + 'static) -> Self {
        self.microphone = Box::new(microphone);
        self
    }

    #[must_use]
    pub fn with_recorder(mut self, recorder: VoiceRecorder) -> Self {
        self.recorder = recorder;
        self
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn tab(&self) -> Tab {
        self.tab
    }

    pub const fn editor(&self) -> &EditorSession {
        &self.editor
    }

    pub const fn todos(&self) -> &TodoList {
        &self.todos
    }

    pub const fn goals(&self) -> &GoalList {
        &self.goals
    }

    pub const fn canvas(&self) -> &CanvasBoard {
        &self.canvas
    }

    pub const fn recorder(&self) -> &VoiceRecorder {
        &self.recorder
    }

    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Forward editor renders to the presentation layer.
    pub fn set_render_hook(&mut self, hook: impl FnMut(EditorView<'_>) + Send + 'static) {
        self.editor.set_render_hook(hook);
    }

    /// Apply one command.
    ///
    /// Failures are logged and returned. A command that fails without
    /// showing its own message surfaces the error text as a notification.
    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        let name = command.name();
        let notified_before = self.notifier.history().len();

        let result = self.apply(command).await;
        if let Err(error) = &result {
            tracing::warn!(command = name, error = %error, "Dashboard command failed");
            if self.notifier.history().len() == notified_before {
                self.notifier.error(error.to_string());
            }
        }
        result
    }

    async fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::SwitchTab(tab) => Ok(self.switch_tab(tab).await),
            Command::LoadInitialData => Ok(Outcome::Loaded(self.load_initial_data().await)),
            Command::SetTitle(title) => {
                self.editor.set_title(title);
                Ok(Outcome::Updated)
            }
            Command::AddTextBlock(text) => Ok(Outcome::BlockAdded(self.editor.add_text_block(text))),
            Command::AddMedia(file) => Ok(self.add_media(file)),
            Command::RemoveBlock(id) => {
                self.editor.remove_block(id)?;
                self.notifier.success("Block removed");
                Ok(Outcome::Updated)
            }
            Command::UpdateText { id, text } => {
                self.editor.update_text(id, text)?;
                Ok(Outcome::Updated)
            }
            Command::UpdateCaption { id, caption } => {
                self.editor.update_caption(id, caption)?;
                Ok(Outcome::Updated)
            }
            Command::StartRecording => self.start_recording(),
            Command::RecordSamples(samples) => {
                self.recorder.push_samples(&samples);
                Ok(Outcome::Updated)
            }
            Command::StopRecording => self.stop_recording(),
            Command::SubmitEntry => self.submit_entry().await,
            Command::NewEntry => {
                self.editor.reset();
                self.notifier.success("New entry started");
                Ok(Outcome::Updated)
            }
            Command::AddTodo(text) => Ok(Outcome::TodoAdded(self.todos.add(&text))),
            Command::ToggleTodo { index, completed } => {
                self.todos.toggle(index, completed)?;
                Ok(Outcome::Updated)
            }
            Command::DeleteTodo(index) => {
                self.todos.remove(index)?;
                Ok(Outcome::Updated)
            }
            Command::SaveTodos => self.save_todos().await,
            Command::AddGoal => Ok(Outcome::GoalAdded(self.goals.add())),
            Command::UpdateGoal {
                index,
                title,
                description,
            } => {
                self.goals.update(index, title, description)?;
                Ok(Outcome::Updated)
            }
            Command::DeleteGoal(index) => {
                self.goals.remove(index)?;
                Ok(Outcome::Updated)
            }
            Command::SaveGoals => self.save_goals().await,
            Command::SaveCanvas => self.save_canvas().await,
        }
    }

    async fn switch_tab(&mut self, tab: Tab) -> Outcome {
        self.tab = tab;
        tracing::debug!(tab = %tab, title = tab.title(), "Switched tab");
        self.refresh(tab).await;
        Outcome::TabSwitched(tab)
    }

    /// Load to-dos, goals, then canvas. A failing load does not stop the rest.
    pub async fn load_initial_data(&mut self) -> LoadReport {
        LoadReport {
            todos: self.refresh(Tab::Todos).await,
            goals: self.refresh(Tab::Goals).await,
            canvas: self.refresh(Tab::Canvas).await,
        }
    }

    async fn refresh(&mut self, tab: Tab) -> bool {
        match self.reload(tab).await {
            Ok(replaced) => replaced,
            Err(error) => {
                tracing::warn!(tab = %tab, error = %error, "Failed to load tab data");
                false
            }
        }
    }

    /// Replace the list behind `tab` with the backend's copy.
    ///
    /// Returns `Ok(false)` when the backend declined and the list was kept.
    /// The entry tab has nothing to load.
    pub async fn reload(&mut self, tab: Tab) -> Result<bool> {
        match tab {
            Tab::Entry => Ok(false),
            Tab::Todos => Ok(self
                .gateway
                .get_todos()
                .await?
                .map(|items| self.todos.replace(items))
                .is_some()),
            Tab::Goals => Ok(self
                .gateway
                .get_goals()
                .await?
                .map(|items| self.goals.replace(items))
                .is_some()),
            Tab::Canvas => Ok(self
                .gateway
                .get_canvas()
                .await?
                .map(|elements| self.canvas.replace(elements))
                .is_some()),
        }
    }

    fn add_media(&mut self, file: MediaFile) -> Outcome {
        let pending = self.editor.reserve_block(file.kind());
        let id = self.editor.complete_block(pending, file.into_payload());
        Outcome::BlockAdded(id)
    }

    fn start_recording(&mut self) -> Result<Outcome> {
        match self.recorder.start(&*self.microphone) {
            Ok(()) => {
                self.notifier.success("Recording started");
                Ok(Outcome::RecordingStarted)
            }
            Err(error @ Error::PermissionDenied(_)) => {
                self.notifier.error("Could not access microphone");
                Err(error)
            }
            Err(error) => Err(error),
        }
    }

    fn stop_recording(&mut self) -> Result<Outcome> {
        let Some(payload) = self.recorder.stop()? else {
            return Ok(Outcome::RecordingSaved(None));
        };
        let id = self.editor.add_block(BlockKind::Voice, Some(payload));
        self.notifier.success("Recording saved");
        Ok(Outcome::RecordingSaved(Some(id)))
    }

    /// Build the submission for the current editor contents.
    pub fn entry_submission(&self) -> EntrySubmission {
        let blocks = if self.config.include_media {
            self.editor.serialize_with_media()
        } else {
            self.editor.serialize()
        };
        EntrySubmission {
            date: today_utc(),
            title: self.editor.title().trim().to_string(),
            blocks,
        }
    }

    async fn submit_entry(&mut self) -> Result<Outcome> {
        if self.editor.is_blank() {
            self.notifier.error("Please add a title or content");
            return Err(Error::InvalidInput(
                "Entry has no title or content".to_string(),
            ));
        }

        let entry = self.entry_submission();
        match self.gateway.save_entry(&entry).await {
            Ok(()) => {
                self.notifier.success("Entry saved successfully!");
                self.editor.reset();
                Ok(Outcome::EntrySaved(entry))
            }
            Err(error) => {
                self.notifier.error("Failed to save entry");
                Err(error)
            }
        }
    }

    async fn save_todos(&mut self) -> Result<Outcome> {
        match self.gateway.save_todos(&self.todos.collect()).await {
            Ok(()) => {
                self.notifier.success("To-Do list saved!");
                Ok(Outcome::Saved)
            }
            Err(error) => {
                self.notifier.error("Failed to save to-do list");
                Err(error)
            }
        }
    }

    async fn save_goals(&mut self) -> Result<Outcome> {
        match self.gateway.save_goals(&self.goals.collect()).await {
            Ok(()) => {
                self.notifier.success("Goals saved!");
                Ok(Outcome::Saved)
            }
            Err(error) => {
                self.notifier.error("Failed to save goals");
                Err(error)
            }
        }
    }

    async fn save_canvas(&mut self) -> Result<Outcome> {
        match self.gateway.save_canvas(&self.canvas.collect()).await {
            Ok(()) => {
                self.notifier.success("Canvas saved!");
                Ok(Outcome::Saved)
            }
            Err(error) => {
                self.notifier.error("Failed to save canvas");
                Err(error)
            }
        }
    }
}
