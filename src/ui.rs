use crate::models::{ListResponse, Task};

pub fn render_index(list: &ListResponse) -> String {
    let date = escape_html(list.date.as_str());
    let dates = render_date_options(list);
    let tasks = render_tasks(&list.tasks);
    fill_template(
        INDEX_HTML,
        &[("DATE", &date), ("DATES", &dates), ("TASKS", &tasks)],
    )
}

/// Substituted text is never rescanned for placeholders.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end + 2))
        });
        match value {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &after[consumed..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_tasks(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|task| {
            format!(
                r#"<li class="task-item{done}" data-id="{id}"><span class="task-text">{text}</span></li>"#,
                done = if task.done { " done" } else { "" },
                id = task.id,
                text = escape_html(&task.text),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_date_options(list: &ListResponse) -> String {
    list.dates
        .iter()
        .map(|date| {
            let label = escape_html(date.as_str());
            let selected = if *date == list.date { " selected" } else { "" };
            format!(r#"<option value="{label}"{selected}>{label}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0, user-scalable=no" />
  <title>Daily Checklist</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    header {
      display: grid;
      gap: 10px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 4vw, 2.2rem);
      margin: 0;
    }

    .date-row {
      display: flex;
      gap: 10px;
      align-items: center;
    }

    select {
      flex: 1;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.18);
      font: inherit;
      background: white;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    #task-list {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .task-item {
      position: relative;
      overflow: hidden;
      border-radius: 16px;
      background: var(--accent);
    }

    .task-item.dragging {
      z-index: 2;
      box-shadow: 0 12px 28px rgba(47, 72, 88, 0.25);
    }

    .task-placeholder {
      height: 52px;
      border-radius: 16px;
      border: 2px dashed rgba(47, 72, 88, 0.25);
    }

    .delete-swipe-btn {
      position: absolute;
      top: 0;
      right: 0;
      bottom: 0;
      width: 80px;
      border-radius: 0;
      background: transparent;
    }

    .task-content {
      position: relative;
      display: flex;
      align-items: center;
      gap: 12px;
      padding: 14px 16px;
      background: white;
      border: 1px solid rgba(47, 72, 88, 0.08);
      border-radius: 16px;
      transition: transform 150ms ease;
      touch-action: none;
    }

    .task-item.done .task-text {
      text-decoration: line-through;
      color: #8b857d;
    }

    .task-text {
      flex: 1;
    }

    form.add {
      display: flex;
      gap: 10px;
    }

    form.add input {
      flex: 1;
      padding: 12px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.18);
      font: inherit;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1 id="date">{{DATE}}</h1>
      <div class="date-row">
        <select id="past-dates" aria-label="view past lists">
{{DATES}}
        </select>
        <button id="today-btn" type="button">Today</button>
      </div>
    </header>

    <ul id="task-list">
{{TASKS}}
    </ul>

    <form class="add" id="add-form" method="post" action="/tasks/add">
      <input id="new-task" name="text" placeholder="New task" autocomplete="off" />
      <button type="submit">Add</button>
    </form>

    <div id="status" class="status" aria-live="polite"></div>
  </main>

  <script>
    const taskListEl = document.getElementById('task-list');
    const dateEl = document.getElementById('date');
    const pastDatesEl = document.getElementById('past-dates');
    const statusEl = document.getElementById('status');
    const newTaskInput = document.getElementById('new-task');
    const todayBtn = document.getElementById('today-btn');

    const SWIPE_THRESHOLD = 60;
    const DELETE_OFFSET = 80;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type;
    };

    const request = async (method, url, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['content-type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      render(await res.json());
    };

    const run = (promise) => promise.catch((err) => setStatus(err.message, 'error'));

    const renderDates = (dates, current) => {
      pastDatesEl.innerHTML = '';
      dates.forEach((date) => {
        const option = document.createElement('option');
        option.value = date;
        option.textContent = date;
        option.selected = date === current;
        pastDatesEl.appendChild(option);
      });
    };

    const render = (list) => {
      dateEl.textContent = list.date;
      todayBtn.hidden = list.is_today;
      renderDates(list.dates, list.date);
      taskListEl.innerHTML = '';
      list.tasks.forEach((task) => taskListEl.appendChild(renderTask(task)));
    };

    const renderTask = (task) => {
      const li = document.createElement('li');
      li.className = task.done ? 'task-item done' : 'task-item';
      li.dataset.id = task.id;

      const deleteBtn = document.createElement('button');
      deleteBtn.className = 'delete-swipe-btn';
      deleteBtn.textContent = 'Delete';
      deleteBtn.onclick = () => run(request('DELETE', `/api/tasks/${task.id}`));

      const content = document.createElement('div');
      content.className = 'task-content';

      const checkbox = document.createElement('input');
      checkbox.type = 'checkbox';
      checkbox.checked = task.done;
      checkbox.onchange = () => run(request('POST', `/api/tasks/${task.id}/toggle`));

      const span = document.createElement('span');
      span.className = 'task-text';
      span.textContent = task.text;

      content.appendChild(checkbox);
      content.appendChild(span);
      li.appendChild(deleteBtn);
      li.appendChild(content);
      attachGestures(li, content, task.id);
      return li;
    };

    const attachGestures = (li, content, id) => {
      let startX = 0;
      let startY = 0;
      let deltaX = 0;
      let placeholder = null;

      content.addEventListener('touchstart', (e) => {
        if (e.touches.length > 1) return;
        startX = e.touches[0].clientX;
        startY = e.touches[0].clientY;
        deltaX = 0;
        placeholder = document.createElement('li');
        placeholder.className = 'task-placeholder';
        li.classList.add('dragging');
        taskListEl.insertBefore(placeholder, li.nextSibling);
      });

      content.addEventListener('touchmove', (e) => {
        if (!placeholder) return;
        e.preventDefault();
        const touch = e.touches[0];
        deltaX = touch.clientX - startX;
        const deltaY = touch.clientY - startY;

        if (Math.abs(deltaX) > Math.abs(deltaY) && deltaX < 0) {
          content.style.transform = `translateX(${deltaX}px)`;
          return;
        }

        li.style.transform = `translateY(${deltaY}px)`;
        const others = [...taskListEl.querySelectorAll('.task-item')].filter((el) => el !== li);
        for (const other of others) {
          const rect = other.getBoundingClientRect();
          if (touch.clientY > rect.top && touch.clientY < rect.bottom) {
            if (touch.clientY < rect.top + rect.height / 2) {
              taskListEl.insertBefore(placeholder, other);
            } else {
              taskListEl.insertBefore(placeholder, other.nextSibling);
            }
            break;
          }
        }
      });

      const release = (commit) => {
        if (!placeholder) return;
        li.classList.remove('dragging');
        li.style.transform = '';

        const rows = [...taskListEl.children].filter((el) => el !== li);
        const slot = rows.filter((el) => el.classList.contains('task-item') || el === placeholder)
          .indexOf(placeholder);
        placeholder.remove();
        placeholder = null;

        if (deltaX < -SWIPE_THRESHOLD) {
          content.style.transform = `translateX(-${DELETE_OFFSET}px)`;
          return;
        }
        content.style.transform = 'translateX(0)';

        const from = [...taskListEl.querySelectorAll('.task-item')].indexOf(li);
        if (commit && slot >= 0 && slot !== from) {
          run(request('POST', `/api/tasks/${id}/move`, { to: slot }));
        }
      };

      content.addEventListener('touchend', () => release(true));
      content.addEventListener('touchcancel', () => release(false));
    };

    document.getElementById('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const text = newTaskInput.value;
      newTaskInput.value = '';
      run(request('POST', '/api/tasks', { text }));
    });

    pastDatesEl.addEventListener('change', () => {
      run(request('POST', '/api/select', { date: pastDatesEl.value }));
    });

    todayBtn.addEventListener('click', () => {
      run(request('GET', '/api/today'));
    });

    run(request('GET', '/api/today'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::DateKey;

    #[test]
    fn index_escapes_task_text_and_marks_selected_date() {
        let date = DateKey::new("Monday (1/5/2026)").unwrap();
        let mut task = Task::new("<b>mop</b> & dust");
        task.done = true;
        let list = ListResponse {
            date: date.clone(),
            is_today: false,
            tasks: vec![task],
            dates: vec![date, DateKey::new("other").unwrap()],
        };

        let html = render_index(&list);
        assert!(html.contains("&lt;b&gt;mop&lt;/b&gt; &amp; dust"));
        assert!(html.contains(r#"class="task-item done""#));
        assert!(html.contains(r#"<option value="Monday (1/5/2026)" selected>"#));
        assert!(html.contains(r#"<option value="other">other</option>"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn placeholder_text_in_labels_is_not_expanded() {
        let date = DateKey::new("{{TASKS}}").unwrap();
        let list = ListResponse {
            date: date.clone(),
            is_today: false,
            tasks: vec![Task::new("{{DATE}}")],
            dates: vec![date],
        };

        let html = render_index(&list);
        assert_eq!(html.matches(r#"<li class="task-item""#).count(), 1);
        assert!(html.contains(r#"<h1 id="date">{{TASKS}}</h1>"#));
        assert!(html.contains(r#"<option value="{{TASKS}}" selected>{{TASKS}}</option>"#));
        assert!(html.contains(r#"<span class="task-text">{{DATE}}</span>"#));
    }
}
