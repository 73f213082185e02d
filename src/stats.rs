use crate::models::{
    CATEGORIES, CategoryCount, CategoryCounts, DEFAULT_CATEGORY, Habit, RankEntry, Ranking,
};

const RANKING_SIZE: usize = 3;

/// Counts per category. Fixed categories come first (zero when unused), then
/// the default label, then any label the server invented, in first-seen order.
pub fn category_counts(habits: &[Habit]) -> CategoryCounts {
    let mut by_category: Vec<CategoryCount> = CATEGORIES
        .iter()
        .chain(std::iter::once(&DEFAULT_CATEGORY))
        .map(|label| CategoryCount {
            label: (*label).to_string(),
            count: 0,
        })
        .collect();

    for habit in habits {
        match by_category
            .iter_mut()
            .find(|entry| entry.label == habit.category)
        {
            Some(entry) => entry.count += 1,
            None => by_category.push(CategoryCount {
                label: habit.category.clone(),
                count: 1,
            }),
        }
    }

    CategoryCounts {
        total: habits.len(),
        by_category,
    }
}

/// Top categories by summed streak. Equal sums keep the order in which the
/// categories were first seen.
pub fn streak_ranking(habits: &[Habit]) -> Ranking {
    let mut totals: Vec<RankEntry> = Vec::new();
    for habit in habits {
        match totals
            .iter_mut()
            .find(|entry| entry.category == habit.category)
        {
            Some(entry) => entry.streak_total = entry.streak_total.saturating_add(habit.streak),
            None => totals.push(RankEntry {
                category: habit.category.clone(),
                streak_total: habit.streak,
            }),
        }
    }

    // sort_by is stable, which is what gives first-seen tie breaking
    totals.sort_by(|a, b| b.streak_total.cmp(&a.streak_total));
    totals.truncate(RANKING_SIZE);

    match totals.first() {
        Some(top) if top.streak_total > 0 => Ranking::Top(totals),
        _ => Ranking::Empty,
    }
}
