use serde::Serialize;
use tracing::{debug, info, warn};

use crate::datetime::format_task_date;
use crate::error::{ChecklistError, NameKind, Result};
use crate::model::{create_list, create_task, remove_by_id, remove_completed, select_by_id};
use crate::persistence;
use crate::state::AppState;
use crate::storage::KeyValueStorage;
use crate::view::{View, render};

/// User input the controller understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectList(String),
    ToggleTask(String),
    ClearCompleted,
    DeleteList,
    CreateList { name: String },
    CreateTask { name: String, date: String },
}

/// How much of the view a frontend must rebuild after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Refresh {
    None,
    Count,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Message shown to the user after a rejected or failed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn from_error(err: &ChecklistError) -> Self {
        let level = if err.is_validation() {
            NoticeLevel::Warning
        } else {
            NoticeLevel::Error
        };
        Self {
            level,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub refresh: Refresh,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn refresh(refresh: Refresh) -> Self {
        Self {
            refresh,
            notice: None,
        }
    }

    fn rejected(err: &ChecklistError) -> Self {
        Self {
            refresh: Refresh::None,
            notice: Some(Notice::from_error(err)),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.notice,
            Some(Notice {
                level: NoticeLevel::Error,
                ..
            })
        )
    }
}

/// Owns the application state and its storage. Every event mutates the
/// state, persists it, and reports what to redraw.
#[derive(Debug)]
pub struct Controller<S> {
    state: AppState,
    storage: S,
}

impl<S: KeyValueStorage> Controller<S> {
    #[tracing::instrument(skip(storage))]
    pub fn load(storage: S) -> Self {
        let state = persistence::load(&storage);
        info!(
            lists = state.lists.len(),
            selected = ?state.selected_list_id,
            "loaded checklist state"
        );
        Self { state, storage }
    }

    pub fn new(storage: S, state: AppState) -> Self {
        Self { state, storage }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Hands back the storage, e.g. to reopen it with [`Controller::load`].
    pub fn into_parts(self) -> (AppState, S) {
        (self.state, self.storage)
    }

    pub fn view(&self) -> View {
        render(&self.state)
    }

    /// Applies one event. Rejected input leaves state untouched; a failed
    /// write restores the state from before the event.
    #[tracing::instrument(skip(self))]
    pub fn handle(&mut self, event: Event) -> Outcome {
        let snapshot = self.state.clone();

        let refresh = match self.apply(event) {
            Ok(refresh) => refresh,
            Err(err) => {
                debug!(error = %err, "event rejected");
                self.state = snapshot;
                return Outcome::rejected(&err);
            }
        };

        if refresh == Refresh::None {
            return Outcome::refresh(Refresh::None);
        }

        if let Err(err) = persistence::save(&mut self.storage, &self.state) {
            warn!(error = %err, "failed to persist state; restoring previous state");
            self.state = snapshot;
            // Best effort: a partial write may have landed on one key.
            if let Err(restore_err) = persistence::save(&mut self.storage, &self.state) {
                warn!(error = %restore_err, "failed to restore stored state");
            }
            return Outcome {
                refresh: Refresh::Full,
                notice: Some(Notice::from_error(&err)),
            };
        }

        Outcome::refresh(refresh)
    }

    fn apply(&mut self, event: Event) -> Result<Refresh> {
        match event {
            Event::SelectList(id) => self.select_list(id),
            Event::ToggleTask(task_id) => Ok(self.toggle_task(&task_id)),
            Event::ClearCompleted => Ok(self.clear_completed()),
            Event::DeleteList => Ok(self.delete_list()),
            Event::CreateList { name } => self.create_list(&name),
            Event::CreateTask { name, date } => self.create_task(&name, &date),
        }
    }

    fn select_list(&mut self, id: String) -> Result<Refresh> {
        if select_by_id(&self.state.lists, Some(id.as_str())).is_none() {
            return Err(ChecklistError::UnknownList(id));
        }
        debug!(list_id = %id, "selected list");
        self.state.selected_list_id = Some(id);
        Ok(Refresh::Full)
    }

    fn toggle_task(&mut self, task_id: &str) -> Refresh {
        let Some(list) = self.state.selected_list_mut() else {
            return Refresh::None;
        };
        let Some(task) = list.tasks.iter_mut().find(|task| task.id == task_id) else {
            debug!(task_id, "toggle for unknown task ignored");
            return Refresh::None;
        };
        task.complete = !task.complete;
        debug!(task_id, complete = task.complete, "toggled task");
        Refresh::Count
    }

    fn clear_completed(&mut self) -> Refresh {
        let Some(list) = self.state.selected_list_mut() else {
            return Refresh::None;
        };
        let before = list.tasks.len();
        list.tasks = remove_completed(std::mem::take(&mut list.tasks));
        debug!(removed = before - list.tasks.len(), "cleared completed tasks");
        Refresh::Full
    }

    fn delete_list(&mut self) -> Refresh {
        let Some(id) = self.state.selected_list_id.take() else {
            return Refresh::None;
        };
        self.state.lists = remove_by_id(std::mem::take(&mut self.state.lists), &id);
        info!(list_id = %id, "deleted list");
        Refresh::Full
    }

    fn create_list(&mut self, name: &str) -> Result<Refresh> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChecklistError::EmptyName(NameKind::List));
        }
        let list = create_list(name);
        info!(list_id = %list.id, "created list");
        self.state.lists.push(list);
        Ok(Refresh::Full)
    }

    fn create_task(&mut self, name: &str, date: &str) -> Result<Refresh> {
        if self.state.selected_list().is_none() {
            debug!("task submitted with no list selected; ignored");
            return Ok(Refresh::None);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ChecklistError::EmptyName(NameKind::Task));
        }
        let date = format_task_date(date)?;

        let task = create_task(name, date);
        let Some(list) = self.state.selected_list_mut() else {
            return Ok(Refresh::None);
        };
        info!(list_id = %list.id, task_id = %task.id, "created task");
        list.tasks.push(task);
        Ok(Refresh::Full)
    }
}
