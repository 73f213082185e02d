//! Client view state and the projection of a habit snapshot into a
//! [`Dashboard`].
//!
//! Nothing here touches the network: [`project`] is a pure function of the
//! last fetched collection and the current [`ViewState`], and the state only
//! changes through [`ViewState::apply`].

use crate::models::{
    CATEGORIES, Dashboard, Draft, FilterButton, Habit, HabitCard, HabitEntry, HabitId, Theme,
};
use crate::stats::{category_counts, streak_ranking};
use serde::Serialize;
use std::time::Duration;

const ALL_VALUE: &str = "all";
const ALL_LABEL: &str = "Todos";
const MISSING_TIME: &str = "--:--";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Parses a filter menu value: `all` or one of the fixed categories.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == ALL_VALUE {
            return Some(Filter::All);
        }
        CATEGORIES
            .iter()
            .find(|label| **label == value)
            .map(|label| Filter::Category((*label).to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => ALL_VALUE,
            Filter::Category(label) => label,
        }
    }

    pub fn matches(&self, habit: &Habit) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(label) => habit.category == *label,
        }
    }
}

/// Habits visible under `filter`, in their original order.
pub fn filter_habits<'a>(habits: &'a [Habit], filter: &Filter) -> Vec<&'a Habit> {
    habits.iter().filter(|habit| filter.matches(habit)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub id: HabitId,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub filter: Filter,
    pub theme: Theme,
    pub draft: Draft,
    pub notice: Option<String>,
    pub placeholder: Option<Placeholder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    FilterChanged(Filter),
    ThemeToggled,
    DraftKept(Draft),
    /// A create went through: name and time are emptied, the category stays.
    DraftCleared,
    Failed(String),
    NoticeDismissed,
    Completed { id: HabitId, delay: Duration },
    /// The page was shown; one-shot notice and placeholder are spent.
    Rendered,
}

impl ViewState {
    pub fn apply(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::FilterChanged(filter) => Self { filter, ..self },
            ViewEvent::ThemeToggled => Self {
                theme: self.theme.toggled(),
                ..self
            },
            ViewEvent::DraftKept(draft) => Self { draft, ..self },
            ViewEvent::DraftCleared => Self {
                draft: Draft {
                    category: self.draft.category.clone(),
                    ..Draft::default()
                },
                ..self
            },
            ViewEvent::Failed(message) => Self {
                notice: Some(message),
                ..self
            },
            ViewEvent::NoticeDismissed => Self {
                notice: None,
                ..self
            },
            ViewEvent::Completed { id, delay } => Self {
                placeholder: Some(Placeholder {
                    id,
                    delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                }),
                ..self
            },
            ViewEvent::Rendered => Self {
                notice: None,
                placeholder: None,
                ..self
            },
        }
    }
}

pub fn project(habits: &[Habit], view: &ViewState) -> Dashboard {
    let counts = category_counts(habits);

    let mut filters = Vec::with_capacity(CATEGORIES.len() + 1);
    filters.push(FilterButton {
        value: ALL_VALUE.to_string(),
        label: ALL_LABEL.to_string(),
        count: counts.total,
        active: view.filter == Filter::All,
    });
    filters.extend(CATEGORIES.iter().map(|label| FilterButton {
        value: (*label).to_string(),
        label: (*label).to_string(),
        count: counts.count_for(label),
        active: view.filter.as_str() == *label,
    }));

    let cards = filter_habits(habits, &view.filter)
        .into_iter()
        .map(|habit| match &view.placeholder {
            Some(placeholder) if placeholder.id == habit.id => HabitCard::Placeholder {
                id: habit.id.clone(),
            },
            _ => HabitCard::Entry(entry_for(habit)),
        })
        .collect();

    Dashboard {
        total: counts.total,
        filters,
        ranking: streak_ranking(habits),
        cards,
        theme: view.theme,
        theme_toggle_label: view.theme.toggle_label().to_string(),
        notice: view.notice.clone(),
        draft: view.draft.clone(),
        refresh_after_ms: view.placeholder.as_ref().map(|placeholder| placeholder.delay_ms),
    }
}

fn entry_for(habit: &Habit) -> HabitEntry {
    HabitEntry {
        id: habit.id.clone(),
        name: habit.name.clone(),
        time_label: habit
            .habit_time
            .clone()
            .unwrap_or_else(|| MISSING_TIME.to_string()),
        category: habit.category.clone(),
        streak_label: format!("{} dias", habit.streak),
        completed: habit.completed,
        toggle_to: !habit.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_CATEGORY, Ranking};

    fn habit(id: &str, category: &str, streak: u64, completed: bool) -> Habit {
        Habit {
            id: HabitId::from(id),
            name: format!("habit {id}"),
            category: category.to_string(),
            habit_time: None,
            streak,
            completed,
        }
    }

    fn sample() -> Vec<Habit> {
        vec![
            habit("1", "Saúde", 3, false),
            habit("2", "Lazer", 5, true),
            habit("3", "Saúde", 2, false),
            habit("4", DEFAULT_CATEGORY, 0, false),
        ]
    }

    #[test]
    fn filter_all_returns_everything_in_order() {
        let habits = sample();
        let visible = filter_habits(&habits, &Filter::All);
        let ids: Vec<&str> = visible.iter().map(|habit| habit.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn filter_category_keeps_matching_subsequence() {
        let habits = sample();
        let visible = filter_habits(&habits, &Filter::Category("Saúde".into()));
        let ids: Vec<&str> = visible.iter().map(|habit| habit.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(filter_habits(&habits, &Filter::Category("Trabalho".into())).is_empty());
    }

    #[test]
    fn filter_parse_accepts_menu_values_only() {
        assert_eq!(Filter::parse("all"), Some(Filter::All));
        assert_eq!(
            Filter::parse(" Lazer "),
            Some(Filter::Category("Lazer".into()))
        );
        assert_eq!(Filter::parse("Jardinagem"), None);
        assert_eq!(Filter::parse(""), None);
    }

    #[test]
    fn transitions_do_not_touch_unrelated_fields() {
        let view = ViewState::default()
            .apply(ViewEvent::FilterChanged(Filter::Category("Lazer".into())))
            .apply(ViewEvent::ThemeToggled)
            .apply(ViewEvent::Failed("Erro ao deletar!".into()));
        assert_eq!(view.filter, Filter::Category("Lazer".into()));
        assert_eq!(view.theme, Theme::Dark);
        assert_eq!(view.notice.as_deref(), Some("Erro ao deletar!"));

        let view = view.apply(ViewEvent::Rendered);
        assert_eq!(view.notice, None);
        assert_eq!(view.filter, Filter::Category("Lazer".into()));
        assert_eq!(view.theme, Theme::Dark);
    }

    #[test]
    fn draft_is_kept_until_cleared() {
        let draft = Draft {
            name: "Ler".into(),
            category: "Estudos".into(),
            habit_time: "25:00".into(),
        };
        let view = ViewState::default().apply(ViewEvent::DraftKept(draft.clone()));
        assert_eq!(view.draft, draft);
        let view = view.apply(ViewEvent::Rendered);
        assert_eq!(view.draft, draft);
        assert_eq!(
            view.apply(ViewEvent::DraftCleared).draft,
            Draft {
                category: "Estudos".into(),
                ..Draft::default()
            }
        );
    }

    #[test]
    fn dismissing_notice_keeps_placeholder() {
        let view = ViewState::default()
            .apply(ViewEvent::Completed {
                id: HabitId::from("2"),
                delay: Duration::from_millis(800),
            })
            .apply(ViewEvent::Failed("Erro ao carregar hábitos!".into()))
            .apply(ViewEvent::NoticeDismissed);
        assert_eq!(view.notice, None);
        assert_eq!(view.placeholder.as_ref().map(|p| p.id.as_str()), Some("2"));
    }

    #[test]
    fn projection_counts_and_filters() {
        let habits = sample();
        let view = ViewState::default().apply(ViewEvent::FilterChanged(Filter::Category(
            "Saúde".into(),
        )));
        let dashboard = project(&habits, &view);

        assert_eq!(dashboard.total, 4);
        assert_eq!(dashboard.filters.len(), 6);
        assert_eq!(dashboard.filters[0].value, "all");
        assert_eq!(dashboard.filters[0].count, 4);
        assert!(!dashboard.filters[0].active);
        let saude = &dashboard.filters[1];
        assert_eq!((saude.label.as_str(), saude.count, saude.active), ("Saúde", 2, true));
        assert_eq!(dashboard.cards.len(), 2);
        assert_eq!(
            dashboard.ranking,
            project(&habits, &ViewState::default()).ranking
        );
    }

    #[test]
    fn projection_fills_card_labels() {
        let mut habits = sample();
        habits[1].habit_time = Some("07:30".into());
        let dashboard = project(&habits, &ViewState::default());

        let HabitCard::Entry(first) = &dashboard.cards[0] else {
            panic!("expected entry card");
        };
        assert_eq!(first.time_label, "--:--");
        assert_eq!(first.streak_label, "3 dias");
        assert!(first.toggle_to);

        let HabitCard::Entry(second) = &dashboard.cards[1] else {
            panic!("expected entry card");
        };
        assert_eq!(second.time_label, "07:30");
        assert!(second.completed);
        assert!(!second.toggle_to);
    }

    #[test]
    fn projection_shows_placeholder_and_refresh() {
        let habits = sample();
        let view = ViewState::default().apply(ViewEvent::Completed {
            id: HabitId::from("3"),
            delay: Duration::from_millis(800),
        });
        let dashboard = project(&habits, &view);

        assert_eq!(
            dashboard.cards[2],
            HabitCard::Placeholder {
                id: HabitId::from("3")
            }
        );
        assert_eq!(dashboard.refresh_after_ms, Some(800));

        let settled = project(&habits, &view.apply(ViewEvent::Rendered));
        assert!(matches!(settled.cards[2], HabitCard::Entry(_)));
        assert_eq!(settled.refresh_after_ms, None);
    }

    #[test]
    fn projection_of_empty_collection() {
        let dashboard = project(&[], &ViewState::default());
        assert_eq!(dashboard.total, 0);
        assert!(dashboard.cards.is_empty());
        assert_eq!(dashboard.ranking, Ranking::Empty);
        assert!(dashboard.filters.iter().all(|button| button.count == 0));
        assert_eq!(dashboard.theme_toggle_label, "Modo Escuro");
    }
}
