//! HTML shells for the landing page and the admin pages.
//!
//! The pages are thin: they load the admin client, which talks to `/api/*`.
//! Access to the admin pages is decided by the session gate before any of
//! these handlers run.

use axum::response::Html;

use crate::session::gate::{DASHBOARD_PATH, LOGIN_PATH};

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap page content in the shared document skeleton.
fn page_shell(title: &str, body: &str) -> String {
    let title = html_escape(title);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f7f7f8;
            color: #1f2937;
        }}
        main {{
            max-width: 960px;
            margin: 48px auto;
            padding: 0 16px;
        }}
        nav a {{
            margin-right: 16px;
        }}
        form {{
            display: flex;
            flex-direction: column;
            gap: 12px;
            max-width: 320px;
        }}
        .error {{
            color: #b91c1c;
        }}
    </style>
</head>
<body>
<main>
    <h1>{title}</h1>
{body}
</main>
</body>
</html>"##
    )
}

/// Navigation and logout button shared by the admin pages.
fn admin_nav() -> String {
    format!(
        r##"    <nav>
        <a href="{DASHBOARD_PATH}">Dashboard</a>
        <a href="/admin/courses">Courses</a>
        <a href="/admin/profile">Profile</a>
        <button id="logout">Log out</button>
    </nav>
    <script>
        document.getElementById('logout').addEventListener('click', async () => {{
            await fetch('/api/auth/logout', {{ method: 'POST' }});
            window.location.href = '{LOGIN_PATH}';
        }});
    </script>"##
    )
}

/// Render an admin page with the given heading and section content.
pub fn admin_page_html(title: &str, section: &str) -> String {
    let body = format!(
        "{}\n    <section id=\"app\" data-section=\"{}\"></section>",
        admin_nav(),
        html_escape(section)
    );
    page_shell(title, &body)
}

/// Render the login page.
pub fn login_page_html() -> String {
    let body = format!(
        r##"    <form id="login">
        <input name="email" type="email" placeholder="Email" required>
        <input name="password" type="password" placeholder="Password" required>
        <button type="submit">Sign in</button>
        <p class="error" id="error"></p>
    </form>
    <script>
        document.getElementById('login').addEventListener('submit', async (event) => {{
            event.preventDefault();
            const form = new FormData(event.target);
            const response = await fetch('/api/auth/login', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify(Object.fromEntries(form)),
            }});
            if (response.ok) {{
                window.location.href = '{DASHBOARD_PATH}';
            }} else {{
                const data = await response.json().catch(() => ({{}}));
                document.getElementById('error').textContent = data.message || 'Login failed';
            }}
        }});
    </script>"##
    );
    page_shell("Admin Login", &body)
}

/// Render the public landing page.
pub fn landing_page_html() -> String {
    page_shell(
        "Courses",
        r##"    <section id="banner"></section>
    <section id="trending" data-source="/api/trending"></section>
    <section id="demos" data-source="/api/demovideos"></section>"##,
    )
}

pub async fn landing_page() -> Html<String> {
    Html(landing_page_html())
}

pub async fn login_page() -> Html<String> {
    Html(login_page_html())
}

pub async fn dashboard_page() -> Html<String> {
    Html(admin_page_html("Dashboard", "dashboard"))
}

pub async fn courses_page() -> Html<String> {
    Html(admin_page_html("Courses", "courses"))
}

pub async fn profile_page() -> Html<String> {
    Html(admin_page_html("Profile", "profile"))
}
