//! HTML rendering.
//!
//! Pure functions from data to markup; no validation, no I/O. User-supplied
//! text goes through [`escape`] before interpolation.

use crate::auth::repo::User;
use crate::tasks::repo::Task;

/// Escape text for safe interpolation into HTML.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn base_style() -> &'static str {
    r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background: #f5f5f5; color: #333;
        display: flex; justify-content: center;
        min-height: 100vh; padding: 40px 20px;
    }
    .card {
        background: #fff; border-radius: 16px; padding: 32px;
        max-width: 640px; width: 100%; box-shadow: 0 4px 24px rgba(0,0,0,0.08);
        height: fit-content;
    }
    .logo { text-align: center; margin-bottom: 24px; }
    .logo h1 { font-size: 28px; color: #1a1a2e; }
    .logo p { font-size: 14px; color: #666; margin-top: 4px; }
    .form-group { margin-bottom: 16px; }
    .form-group label { display: block; font-size: 14px; font-weight: 500; margin-bottom: 6px; color: #444; }
    .form-group input, .form-group textarea {
        width: 100%; padding: 12px 14px; border: 1.5px solid #ddd;
        border-radius: 10px; font-size: 16px; outline: none;
    }
    .form-group input:focus, .form-group textarea:focus { border-color: #4a6cf7; }
    .btn {
        width: 100%; padding: 14px; border: none; border-radius: 10px;
        font-size: 16px; font-weight: 600; cursor: pointer;
    }
    .btn-primary { background: #4a6cf7; color: #fff; }
    .btn-primary:hover { background: #3b5de7; }
    .error { background: #fff0f0; color: #d32f2f; padding: 10px 14px; border-radius: 8px; font-size: 13px; margin-bottom: 16px; }
    .link { text-align: center; margin-top: 16px; font-size: 14px; color: #666; }
    .link a { color: #4a6cf7; text-decoration: none; }
    .link a:hover { text-decoration: underline; }
    .topbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }
    .topbar a { color: #4a6cf7; text-decoration: none; font-size: 14px; margin-left: 12px; }
    .task { border: 1px solid #eee; border-radius: 10px; padding: 16px; margin-bottom: 12px; }
    .task h3 { font-size: 17px; color: #1a1a2e; }
    .task p { font-size: 14px; color: #555; margin-top: 6px; white-space: pre-wrap; }
    .task .meta { font-size: 12px; color: #999; margin-top: 8px; }
    .task .actions { margin-top: 8px; font-size: 13px; }
    .task .actions a { color: #4a6cf7; text-decoration: none; margin-right: 12px; }
    .task .actions a.danger { color: #d32f2f; }
    "#
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape(e)))
        .unwrap_or_default()
}

pub fn render_login(error: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>Taskboard - Login</title>
<style>{style}</style>
</head><body>
<div class="card">
  <div class="logo"><h1>Taskboard</h1><p>Sign in to manage your tasks</p></div>
  {error_html}
  <form method="POST" action="/login">
    <div class="form-group">
      <label>Email</label>
      <input type="email" name="email" required autocomplete="email" placeholder="you@example.com">
    </div>
    <div class="form-group">
      <label>Password</label>
      <input type="password" name="password" required autocomplete="current-password" placeholder="Enter password">
    </div>
    <button type="submit" class="btn btn-primary">Login</button>
  </form>
  <div class="link">No account? <a href="/register">Register</a></div>
</div>
</body></html>"#,
        style = base_style(),
        error_html = error_block(error),
    )
}

pub fn render_register(error: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>Taskboard - Register</title>
<style>{style}</style>
</head><body>
<div class="card">
  <div class="logo"><h1>Taskboard</h1><p>Create an account</p></div>
  {error_html}
  <form method="POST" action="/register">
    <div class="form-group">
      <label>Name</label>
      <input type="text" name="name" required autocomplete="name" placeholder="Your name">
    </div>
    <div class="form-group">
      <label>Email</label>
      <input type="email" name="email" required autocomplete="email" placeholder="you@example.com">
    </div>
    <div class="form-group">
      <label>Password</label>
      <input type="password" name="password" required autocomplete="new-password" placeholder="At least 8 characters">
    </div>
    <button type="submit" class="btn btn-primary">Register</button>
  </form>
  <div class="link">Already registered? <a href="/login">Login</a></div>
</div>
</body></html>"#,
        style = base_style(),
        error_html = error_block(error),
    )
}

pub fn render_tasks(tasks: &[Task], current_user: &User) -> String {
    let rows: String = tasks
        .iter()
        .map(|t| {
            // Edit/delete links only on the viewer's own tasks; the server
            // enforces ownership regardless of what the page shows.
            let actions = if t.user_id == current_user.id {
                format!(
                    r#"<div class="actions"><a href="/update/{id}">Edit</a><a class="danger" href="/delete/{id}">Delete</a></div>"#,
                    id = t.id,
                )
            } else {
                String::new()
            };
            format!(
                r#"<div class="task">
  <h3>{title}</h3>
  <p>{description}</p>
  <div class="meta">by {username}</div>
  {actions}
</div>"#,
                title = escape(&t.title),
                description = escape(&t.description),
                username = escape(&t.username),
            )
        })
        .collect();

    let empty = if tasks.is_empty() {
        r#"<p style="text-align:center;color:#999;">No tasks yet. Add one!</p>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>Taskboard</title>
<style>{style}</style>
</head><body>
<div class="card">
  <div class="topbar">
    <div><strong>Hi, {name}</strong></div>
    <div><a href="/add">Add task</a><a href="/logout">Logout</a></div>
  </div>
  {rows}
  {empty}
</div>
</body></html>"#,
        style = base_style(),
        name = escape(&current_user.name),
    )
}

pub fn render_add(error: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>Taskboard - Add task</title>
<style>{style}</style>
</head><body>
<div class="card">
  <div class="logo"><h1>Add task</h1></div>
  {error_html}
  <form method="POST" action="/add">
    <div class="form-group">
      <label>Title</label>
      <input type="text" name="title" required placeholder="What needs doing?">
    </div>
    <div class="form-group">
      <label>Description</label>
      <textarea name="description" rows="4" required placeholder="Details"></textarea>
    </div>
    <button type="submit" class="btn btn-primary">Add</button>
  </form>
  <div class="link"><a href="/">Back to list</a></div>
</div>
</body></html>"#,
        style = base_style(),
        error_html = error_block(error),
    )
}

pub fn render_edit(task: &Task) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>Taskboard - Edit task</title>
<style>{style}</style>
</head><body>
<div class="card">
  <div class="logo"><h1>Edit task</h1></div>
  <form method="POST" action="/update/{id}">
    <div class="form-group">
      <label>Title</label>
      <input type="text" name="title" required value="{title}">
    </div>
    <div class="form-group">
      <label>Description</label>
      <textarea name="description" rows="4" required>{description}</textarea>
    </div>
    <button type="submit" class="btn btn-primary">Save</button>
  </form>
  <div class="link"><a href="/">Back to list</a></div>
</div>
</body></html>"#,
        style = base_style(),
        id = task.id,
        title = escape(&task.title),
        description = escape(&task.description),
    )
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>Taskboard - Error</title>
<style>{style}</style>
</head><body>
<div class="card">
  <div class="logo"><h1>Taskboard</h1></div>
  <div class="error">{msg}</div>
  <div class="link"><a href="/">Back to list</a></div>
</div>
</body></html>"#,
        style = base_style(),
        msg = escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".into(),
            email: "a@x.com".into(),
            password_hash: "hash".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn sample_task(owner: &User, title: &str) -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id: owner.id,
            username: owner.name.clone(),
            title: title.into(),
            description: "[Added on: 25 Aug 2026] Buy milk".into(),
            completed: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>"a"&'b'</script>"#),
            "&lt;script&gt;&quot;a&quot;&amp;&#39;b&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn login_page_has_form_fields() {
        let html = render_login(Some("Invalid email or password."));
        assert!(html.contains(r#"name="email""#));
        assert!(html.contains(r#"name="password""#));
        assert!(html.contains("Invalid email or password."));
    }

    #[test]
    fn task_list_escapes_titles() {
        let user = sample_user();
        let task = sample_task(&user, "<b>sneaky</b>");
        let html = render_tasks(&[task], &user);
        assert!(html.contains("&lt;b&gt;sneaky&lt;/b&gt;"));
        assert!(!html.contains("<b>sneaky</b>"));
    }

    #[test]
    fn own_tasks_get_edit_links_others_do_not() {
        let alice = sample_user();
        let mut bob = sample_user();
        bob.name = "Bob".into();
        let theirs = sample_task(&bob, "Groceries");
        let mine = sample_task(&alice, "Laundry");
        let html = render_tasks(&[theirs.clone(), mine.clone()], &alice);
        assert!(html.contains(&format!("/delete/{}", mine.id)));
        assert!(!html.contains(&format!("/delete/{}", theirs.id)));
    }
}
