use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fixed category labels offered by the habit form and filter menu.
pub const CATEGORIES: [&str; 5] = ["Saúde", "Estudos", "Lazer", "Trabalho", "Outros"];

/// Label used for habits the server returns without a category.
pub const DEFAULT_CATEGORY: &str = "Geral";

/// Opaque habit identifier. The API may hand it out as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct HabitId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for HabitId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        }
    }
}

impl HabitId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for HabitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub habit_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streak: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

fn category_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_empty(deserializer)?.unwrap_or_else(default_category))
}

/// Body of `POST /api/habits`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHabit {
    pub name: String,
    pub category: Option<String>,
    pub habit_time: Option<String>,
}

/// Body of `PUT /api/habits/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompletionUpdate {
    pub completed: bool,
}

/// Contents of the create form, kept around when a create is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub name: String,
    pub category: String,
    pub habit_time: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub total: usize,
    pub by_category: Vec<CategoryCount>,
}

impl CategoryCounts {
    pub fn count_for(&self, label: &str) -> usize {
        self.by_category
            .iter()
            .find(|entry| entry.label == label)
            .map_or(0, |entry| entry.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub category: String,
    pub streak_total: u64,
}

/// Top categories by summed streak, or the empty-state marker when nothing
/// has a streak yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum Ranking {
    Empty,
    Top(Vec<RankEntry>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn body_class(self) -> &'static str {
        match self {
            Theme::Light => "",
            Theme::Dark => "dark-mode",
        }
    }

    /// Label of the button that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Modo Escuro",
            Theme::Dark => "Modo Claro",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    pub value: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitEntry {
    pub id: HabitId,
    pub name: String,
    pub time_label: String,
    pub category: String,
    pub streak_label: String,
    pub completed: bool,
    /// Completion value sent when the card's check button is pressed.
    pub toggle_to: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HabitCard {
    Entry(HabitEntry),
    Placeholder { id: HabitId },
}

/// Toolkit-independent display model of the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total: usize,
    pub filters: Vec<FilterButton>,
    pub ranking: Ranking,
    pub cards: Vec<HabitCard>,
    pub theme: Theme,
    pub theme_toggle_label: String,
    pub notice: Option<String>,
    pub draft: Draft,
    pub refresh_after_ms: Option<u64>,
}
