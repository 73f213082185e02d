//! Mutation handlers. Every write goes to the API and is followed by a full
//! reload; the local snapshot is never patched in place.

use crate::client::HabitClient;
use crate::errors::HabitError;
use crate::models::{CATEGORIES, DEFAULT_CATEGORY, Dashboard, Draft, Habit, HabitId, NewHabit};
use crate::view::{Filter, ViewEvent, ViewState, project};
use chrono::NaiveTime;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const EMPTY_NAME_NOTICE: &str = "Digite um hábito!";

/// What the caller has to do after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    Now,
    /// Show the completion placeholder first, reload once the delay passes.
    After(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Load,
    Create,
    Toggle,
    Delete,
}

impl Action {
    fn failure_notice(self) -> &'static str {
        match self {
            Action::Load => "Erro ao carregar hábitos!",
            Action::Create => "Erro ao criar hábito!",
            Action::Toggle => "Erro ao salvar! Verifique se o servidor está rodando.",
            Action::Delete => "Erro ao deletar!",
        }
    }

    fn notice_for(self, err: &HabitError) -> String {
        match err {
            HabitError::Validation(message) => message.clone(),
            HabitError::Server { status, .. } => {
                format!("{} (status {status})", self.failure_notice())
            }
            _ => self.failure_notice().to_string(),
        }
    }
}

pub struct Tracker {
    client: HabitClient,
    habits: Vec<Habit>,
    view: ViewState,
    completion_delay: Duration,
}

impl Tracker {
    pub fn new(client: HabitClient, completion_delay: Duration) -> Self {
        Self {
            client,
            habits: Vec::new(),
            view: ViewState::default(),
            completion_delay,
        }
    }

    /// The most recently fetched collection.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn dashboard(&self) -> Dashboard {
        project(&self.habits, &self.view)
    }

    /// Projects the page and spends the one-shot notice and placeholder.
    pub fn render_once(&mut self) -> Dashboard {
        let dashboard = self.dashboard();
        self.transition(ViewEvent::Rendered);
        dashboard
    }

    /// Drops a pending notice that was already reported some other way.
    pub fn dismiss_notice(&mut self) {
        self.transition(ViewEvent::NoticeDismissed);
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(filter = filter.as_str(), "filter changed");
        self.transition(ViewEvent::FilterChanged(filter));
    }

    pub fn toggle_theme(&mut self) {
        self.transition(ViewEvent::ThemeToggled);
    }

    /// Re-fetches the whole collection. On failure the previous snapshot stays.
    pub async fn reload(&mut self) -> Result<&[Habit], HabitError> {
        match self.client.list().await {
            Ok(habits) => {
                debug!(count = habits.len(), "habits reloaded");
                self.habits = habits;
                Ok(&self.habits)
            }
            Err(err) => Err(self.surface(Action::Load, err)),
        }
    }

    pub async fn create(&mut self, draft: Draft) -> Result<Reload, HabitError> {
        let habit = match validate_draft(&draft) {
            Ok(habit) => habit,
            Err(err) => {
                self.transition(ViewEvent::DraftKept(draft));
                return Err(self.surface(Action::Create, err));
            }
        };

        if let Err(err) = self.client.create(&habit).await {
            self.transition(ViewEvent::DraftKept(draft));
            return Err(self.surface(Action::Create, err));
        }

        info!(name = %habit.name, "habit created");
        self.transition(ViewEvent::DraftCleared);
        Ok(Reload::Now)
    }

    /// Sends `completed` (already inverted by the card) for one habit.
    pub async fn toggle(&mut self, id: &HabitId, completed: bool) -> Result<Reload, HabitError> {
        if let Err(err) = self.client.set_completed(id, completed).await {
            return Err(self.surface(Action::Toggle, err));
        }

        info!(%id, completed, "habit toggled");
        if !completed {
            return Ok(Reload::Now);
        }

        self.transition(ViewEvent::Completed {
            id: id.clone(),
            delay: self.completion_delay,
        });
        Ok(Reload::After(self.completion_delay))
    }

    pub async fn delete(&mut self, id: &HabitId) -> Result<Reload, HabitError> {
        if let Err(err) = self.client.delete(id).await {
            return Err(self.surface(Action::Delete, err));
        }

        info!(%id, "habit deleted");
        Ok(Reload::Now)
    }

    /// Performs the reload a mutation asked for, waiting out a deferred one.
    pub async fn settle(&mut self, reload: Reload) -> Result<&[Habit], HabitError> {
        if let Reload::After(delay) = reload {
            tokio::time::sleep(delay).await;
        }
        self.reload().await
    }

    fn transition(&mut self, event: ViewEvent) {
        self.view = std::mem::take(&mut self.view).apply(event);
    }

    fn surface(&mut self, action: Action, err: HabitError) -> HabitError {
        warn!(?action, "habit action failed: {err}");
        self.transition(ViewEvent::Failed(action.notice_for(&err)));
        err
    }
}

/// Turns the form draft into a create request, or explains why it can't.
pub fn validate_draft(draft: &Draft) -> Result<NewHabit, HabitError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(HabitError::validation(EMPTY_NAME_NOTICE));
    }

    let category = match draft.category.trim() {
        "" => None,
        label if label == DEFAULT_CATEGORY || CATEGORIES.contains(&label) => {
            Some(label.to_string())
        }
        label => {
            return Err(HabitError::validation(format!(
                "Categoria desconhecida: {label}"
            )));
        }
    };

    let habit_time = match draft.habit_time.trim() {
        "" => None,
        time => match NaiveTime::parse_from_str(time, "%H:%M") {
            Ok(parsed) => Some(parsed.format("%H:%M").to_string()),
            Err(_) => {
                return Err(HabitError::validation(format!(
                    "Horário inválido: {time} (use HH:MM)"
                )));
            }
        },
    };

    Ok(NewHabit {
        name: name.to_string(),
        category,
        habit_time,
    })
}
