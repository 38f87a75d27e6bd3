use crate::models::{RepeatType, StreakView};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render_index(date: &str, streaks: &[StreakView]) -> String {
    let rows = if streaks.is_empty() {
        r#"<li class="empty">No streaks yet. Add one below.</li>"#.to_string()
    } else {
        streaks.iter().map(render_row).collect::<Vec<_>>().join("\n")
    };
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{ROWS}}", &rows)
}

fn render_row(view: &StreakView) -> String {
    let streak = &view.streak;
    let (label, class, disabled) = match (view.clickable_today, view.completed_today) {
        (false, _) => ("Not today", "btn-off", " disabled"),
        (true, true) => ("Done, undo", "btn-done", ""),
        (true, false) => ("Mark done", "btn-todo", ""),
    };
    let progress = match (view.progress, streak.daily_goal) {
        (Some(_), Some(goal)) => format!(
            r#"<span class="progress">{} / {} {}</span>"#,
            streak.daily_progress,
            goal,
            escape_html(streak.unit.as_deref().unwrap_or(""))
        ),
        _ => String::new(),
    };
    let id = escape_html(&streak.id);

    format!(
        r#"<li class="streak" data-id="{id}">
  <div class="meta">
    <span class="name">{name}</span>
    <span class="repeat">{repeat}</span>
    {progress}
  </div>
  <span class="count">{count}</span>
  <form method="post" action="/streaks/{id}/toggle">
    <button class="{class}" type="submit"{disabled}>{label}</button>
  </form>
  <form method="post" action="/streaks/{id}/reset">
    <button class="btn-reset" type="submit">Reset</button>
  </form>
  <button class="btn-delete" type="button" data-delete="{id}">Delete</button>
</li>"#,
        name = escape_html(&streak.name),
        repeat = repeat_label(view),
        count = streak.count,
    )
}

fn repeat_label(view: &StreakView) -> String {
    let streak = &view.streak;
    match streak.repeat_type {
        RepeatType::Day => "Daily".to_string(),
        RepeatType::Month => "Monthly".to_string(),
        RepeatType::Week if streak.selected_days.is_empty() => "Once a week".to_string(),
        RepeatType::Week => streak
            .selected_days
            .iter()
            .filter_map(|day| WEEKDAY_LABELS.get(usize::from(*day)))
            .copied()
            .collect::<Vec<_>>()
            .join(" · "),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Streaks</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #23211f;
      --accent: #3a7d44;
      --muted: #8b857c;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(35, 33, 31, 0.12);
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
      place-items: start center;
      padding: 32px 16px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 20px;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .streak {
      display: grid;
      grid-template-columns: 1fr auto auto auto auto;
      align-items: center;
      gap: 10px;
      padding: 12px 14px;
      border-radius: 14px;
      background: var(--bg);
    }

    .meta {
      display: grid;
    }

    .repeat,
    .progress,
    .empty {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .count {
      font-size: 1.4rem;
      font-weight: 600;
    }

    button {
      border: 0;
      border-radius: 10px;
      padding: 8px 12px;
      cursor: pointer;
      font: inherit;
    }

    .btn-todo {
      background: var(--accent);
      color: #fff;
    }

    .btn-done {
      background: #d9ead3;
      color: var(--accent);
    }

    .btn-off {
      background: #e4e0d8;
      color: var(--muted);
      cursor: not-allowed;
    }

    form.create {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      align-items: center;
    }

    .status {
      min-height: 1.2em;
      color: #b3412b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Streaks</h1>
      <span id="date">{{DATE}}</span>
    </header>

    <ul id="streaks">
{{ROWS}}
    </ul>

    <form id="create-form" class="create">
      <input name="name" placeholder="New streak" required />
      <select name="repeatType">
        <option value="day">Daily</option>
        <option value="week">Weekly</option>
        <option value="month">Monthly</option>
      </select>
      <label><input type="checkbox" name="day" value="1" />Mon</label>
      <label><input type="checkbox" name="day" value="2" />Tue</label>
      <label><input type="checkbox" name="day" value="3" />Wed</label>
      <label><input type="checkbox" name="day" value="4" />Thu</label>
      <label><input type="checkbox" name="day" value="5" />Fri</label>
      <label><input type="checkbox" name="day" value="6" />Sat</label>
      <label><input type="checkbox" name="day" value="0" />Sun</label>
      <button class="btn-todo" type="submit">Add</button>
    </form>
    <div id="status" class="status" role="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        throw new Error(body.error || 'Request failed');
      }
      return res;
    };

    document.getElementById('create-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      const payload = {
        name: form.get('name'),
        repeatType: form.get('repeatType'),
        selectedDays: form.getAll('day').map(Number)
      };
      request('/api/streaks', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      })
        .then(() => window.location.reload())
        .catch((err) => { statusEl.textContent = err.message; });
    });

    document.querySelectorAll('[data-delete]').forEach((button) => {
      button.addEventListener('click', () => {
        request(`/api/streaks/${encodeURIComponent(button.dataset.delete)}`, { method: 'DELETE' })
          .then(() => window.location.reload())
          .catch((err) => { statusEl.textContent = err.message; });
      });
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Streak;
    use crate::schedule::tests::{at, streak};

    fn view(streak: Streak, clickable: bool, completed: bool) -> StreakView {
        StreakView {
            streak,
            completed_today: completed,
            clickable_today: clickable,
            progress: None,
        }
    }

    #[test]
    fn renders_button_state_per_streak() {
        let created = at(2024, 1, 1, 9, 0);
        let mut gym = streak(RepeatType::Week, &[1, 3, 5], 2, created, created);
        gym.name = "Gym <legs>".to_string();
        let read = streak(RepeatType::Day, &[], 1, created, created);

        let html = render_index(
            "2024-01-02",
            &[view(gym, false, false), view(read, true, true)],
        );
        assert!(html.contains("2024-01-02"));
        assert!(html.contains("Gym &lt;legs&gt;"));
        assert!(html.contains("Mon · Wed · Fri"));
        assert!(html.contains(r#"<button class="btn-off" type="submit" disabled>Not today</button>"#));
        assert!(html.contains("Done, undo"));
        assert!(!html.contains("{{ROWS}}"));
    }

    #[test]
    fn renders_empty_state() {
        let html = render_index("2024-01-02", &[]);
        assert!(html.contains("No streaks yet"));
        assert!(html.contains("encodeURIComponent(button.dataset.delete)"));
    }
}
