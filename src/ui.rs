use crate::models::{CATEGORIES, DEFAULT_CATEGORY, Dashboard, HabitCard, HabitEntry, Ranking};
use std::fmt::Write;

const RANKING_EMPTY: &str = "Comece sua jornada!";

pub fn render_index(dashboard: &Dashboard) -> String {
    let refresh = dashboard
        .refresh_after_ms
        .map(|ms| {
            // meta refresh only honours whole seconds
            format!(
                r#"<meta http-equiv="refresh" content="{};url=/" />"#,
                ms.div_ceil(1000)
            )
        })
        .unwrap_or_default();
    let notice = dashboard
        .notice
        .as_deref()
        .map(|message| format!(r#"<div class="notice" role="alert">{}</div>"#, escape(message)))
        .unwrap_or_default();

    INDEX_HTML
        .replace("{{REFRESH}}", &refresh)
        .replace("{{BODY_CLASS}}", dashboard.theme.body_class())
        .replace("{{THEME_LABEL}}", &escape(&dashboard.theme_toggle_label))
        .replace("{{NOTICE}}", &notice)
        .replace("{{FILTERS}}", &render_filters(dashboard))
        .replace("{{RANKING}}", &render_ranking(&dashboard.ranking))
        .replace("{{CATEGORY_OPTIONS}}", &render_category_options(&dashboard.draft.category))
        .replace("{{DRAFT_NAME}}", &escape(&dashboard.draft.name))
        .replace("{{DRAFT_TIME}}", &escape(&dashboard.draft.habit_time))
        .replace("{{HABITS}}", &render_cards(&dashboard.cards))
}

fn render_filters(dashboard: &Dashboard) -> String {
    let mut html = String::new();
    for button in &dashboard.filters {
        let _ = write!(
            html,
            r#"<form method="post" action="/filter"><button class="menu-item{active}" id="btn-{value}" name="category" value="{value}" type="submit">{label} <span class="counter">{count}</span></button></form>"#,
            active = if button.active { " active" } else { "" },
            value = escape(&button.value),
            label = escape(&button.label),
            count = button.count,
        );
    }
    html
}

fn render_ranking(ranking: &Ranking) -> String {
    match ranking {
        Ranking::Empty => format!(r#"<li class="ranking-empty">{RANKING_EMPTY}</li>"#),
        Ranking::Top(entries) => entries
            .iter()
            .map(|entry| {
                format!(
                    r#"<li class="ranking-item"><span>{}</span><span class="rank-count">{}</span></li>"#,
                    escape(&entry.category),
                    entry.streak_total
                )
            })
            .collect(),
    }
}

fn render_category_options(selected: &str) -> String {
    let mut html = format!(
        r#"<option value=""{}>{DEFAULT_CATEGORY}</option>"#,
        if selected.is_empty() { " selected" } else { "" }
    );
    for label in CATEGORIES {
        let _ = write!(
            html,
            r#"<option value="{label}"{}>{label}</option>"#,
            if selected == label { " selected" } else { "" }
        );
    }
    html
}

fn render_cards(cards: &[HabitCard]) -> String {
    if cards.is_empty() {
        return r#"<li class="habit-empty">Nenhum hábito por aqui.</li>"#.to_string();
    }

    cards
        .iter()
        .map(|card| match card {
            HabitCard::Entry(entry) => render_entry(entry),
            HabitCard::Placeholder { id } => format!(
                r#"<li class="poof-disappear" data-id="{}"><span class="cloud-poof-icon">&#9729;</span></li>"#,
                escape(id.as_str())
            ),
        })
        .collect()
}

fn render_entry(entry: &HabitEntry) -> String {
    let id = escape(entry.id.as_str());
    format!(
        r#"<li class="{li_class}" data-id="{id}">
  <div class="habit-info">
    <span class="habit-name">{name}</span>
    <span class="habit-time">&#128339; {time}</span>
    <div class="habit-meta">
      <span class="habit-category">{category}</span>
      <span class="habit-streak">&#9729; {streak}</span>
    </div>
  </div>
  <div class="actions">
    <form method="post" action="/habits/{id}/toggle">
      <input type="hidden" name="completed" value="{toggle_to}" />
      <button class="btn-check{done}" type="submit" title="Concluir">&#10003;</button>
    </form>
    <form method="post" action="/habits/{id}/delete">
      <button class="btn-delete" type="submit" title="Excluir">&#128465;</button>
    </form>
  </div>
</li>"#,
        li_class = if entry.completed { "completed" } else { "" },
        name = escape(&entry.name),
        time = escape(&entry.time_label),
        category = escape(&entry.category),
        streak = escape(&entry.streak_label),
        toggle_to = entry.toggle_to,
        done = if entry.completed { " done" } else { "" },
    )
}

/// HTML-escapes text. Braces are escaped too so user text can never form a
/// template placeholder.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  {{REFRESH}}
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg: #eef3f8;
      --ink: #22303c;
      --muted: #6b7a89;
      --card: #ffffff;
      --accent: #4a90d9;
      --done: #3fb68b;
      --danger: #e0584f;
      --shadow: 0 12px 32px rgba(34, 48, 60, 0.12);
    }

    body.dark-mode {
      --bg: #161c22;
      --ink: #e6edf3;
      --muted: #9aa7b4;
      --card: #222b34;
      --shadow: 0 12px 32px rgba(0, 0, 0, 0.4);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      grid-template-columns: 240px 1fr;
    }

    aside {
      padding: 28px 18px;
      display: grid;
      align-content: start;
      gap: 8px;
    }

    .menu-item {
      width: 100%;
      display: flex;
      justify-content: space-between;
      border: none;
      border-radius: 12px;
      padding: 10px 14px;
      background: transparent;
      color: var(--ink);
      font: inherit;
      cursor: pointer;
    }

    .menu-item.active {
      background: var(--accent);
      color: #fff;
    }

    .counter {
      font-weight: 600;
    }

    main {
      padding: 28px;
      display: grid;
      align-content: start;
      gap: 22px;
    }

    .panel {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .notice {
      background: var(--danger);
      color: #fff;
      border-radius: 12px;
      padding: 12px 16px;
    }

    #habitForm {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    #habitForm input,
    #habitForm select,
    #habitForm button {
      font: inherit;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid var(--muted);
      background: var(--card);
      color: var(--ink);
    }

    #habitList {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 12px;
    }

    #habitList li {
      display: flex;
      justify-content: space-between;
      align-items: center;
      background: var(--card);
      border-radius: 14px;
      box-shadow: var(--shadow);
      padding: 14px 18px;
    }

    #habitList li.completed .habit-name {
      text-decoration: line-through;
      color: var(--muted);
    }

    .habit-info {
      display: grid;
      gap: 4px;
    }

    .habit-time,
    .habit-meta {
      color: var(--muted);
      font-size: 0.9rem;
      display: flex;
      gap: 12px;
    }

    .actions {
      display: flex;
      gap: 8px;
    }

    .actions button {
      border: none;
      border-radius: 50%;
      width: 38px;
      height: 38px;
      cursor: pointer;
      background: var(--bg);
      color: var(--ink);
    }

    .btn-check.done {
      background: var(--done);
      color: #fff;
    }

    .btn-delete:hover {
      background: var(--danger);
      color: #fff;
    }

    .poof-disappear {
      justify-content: center !important;
      animation: poof 800ms ease forwards;
    }

    .cloud-poof-icon {
      font-size: 2rem;
    }

    @keyframes poof {
      from {
        opacity: 1;
        transform: scale(1);
      }
      to {
        opacity: 0;
        transform: scale(1.4);
      }
    }

    #rankingList {
      margin: 0;
      padding-left: 20px;
      display: grid;
      gap: 6px;
    }

    .ranking-item {
      display: flex;
      justify-content: space-between;
    }

    .ranking-empty,
    .habit-empty {
      color: var(--muted);
      list-style: none;
    }
  </style>
</head>
<body class="{{BODY_CLASS}}">
  <aside>
    <h2>Categorias</h2>
    {{FILTERS}}
    <form method="post" action="/theme">
      <button class="menu-item" id="theme-btn" type="submit">{{THEME_LABEL}}</button>
    </form>
  </aside>

  <main>
    <header>
      <h1>Meus Hábitos</h1>
    </header>

    {{NOTICE}}

    <section class="panel">
      <form id="habitForm" method="post" action="/habits">
        <input id="habitInput" name="name" placeholder="Novo hábito" value="{{DRAFT_NAME}}" />
        <input id="timeInput" name="habit_time" type="time" value="{{DRAFT_TIME}}" />
        <select id="categoryInput" name="category">{{CATEGORY_OPTIONS}}</select>
        <button type="submit">Adicionar</button>
      </form>
    </section>

    <section class="panel">
      <h2>Ranking</h2>
      <ol id="rankingList">{{RANKING}}</ol>
    </section>

    <ul id="habitList">
{{HABITS}}
    </ul>
  </main>
</body>
</html>
"#;
