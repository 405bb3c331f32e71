//! Server-rendered HTML shells. The pages carry no data of their own; the
//! browser fetches everything through the JSON API with the session cookie.

use axum::response::Html;

use crate::gate::Credential;
use crate::types::Role;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} | MentorBridge</title>\n</head>\n<body>\n\
         <header><a href=\"/\">MentorBridge</a></header>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

pub fn home() -> Html<String> {
    layout(
        "Welcome",
        "<h1>Find a mentor. Share what you know.</h1>\n\
         <p><a href=\"/login\">Sign in</a> or <a href=\"/register\">create an account</a>.</p>",
    )
}

const AUTH_SCRIPT: &str = "<script>\n\
document.querySelector('form').addEventListener('submit', async (event) => {\n\
  event.preventDefault();\n\
  const form = event.target;\n\
  const body = Object.fromEntries(new FormData(form));\n\
  const res = await fetch(form.action, { method: 'POST', headers: { 'content-type': 'application/json' }, body: JSON.stringify(body) });\n\
  const json = await res.json();\n\
  if (json.success) { window.location = json.data.redirect_to; }\n\
  else { document.getElementById('error').textContent = json.message; }\n\
});\n\
</script>";

pub fn login() -> Html<String> {
    layout(
        "Sign in",
        &format!(
            "<h1>Sign in</h1>\n<p id=\"error\" role=\"alert\"></p>\n\
             <form action=\"/api/auth/login\" method=\"post\">\n\
             <label>Email <input name=\"email\" type=\"email\" required></label>\n\
             <label>Password <input name=\"password\" type=\"password\" required></label>\n\
             <button type=\"submit\">Sign in</button>\n</form>\n\
             <p>No account? <a href=\"/register\">Register</a></p>\n{}",
            AUTH_SCRIPT
        ),
    )
}

pub fn register(allow_registration: bool) -> Html<String> {
    if !allow_registration {
        return layout("Register", "<h1>Registration is closed</h1>");
    }
    layout(
        "Register",
        &format!(
            "<h1>Create an account</h1>\n<p id=\"error\" role=\"alert\"></p>\n\
             <form action=\"/api/auth/register\" method=\"post\">\n\
             <label>Name <input name=\"name\" required></label>\n\
             <label>Email <input name=\"email\" type=\"email\" required></label>\n\
             <label>Password <input name=\"password\" type=\"password\" minlength=\"8\" required></label>\n\
             <label>I want to <select name=\"role\">\
             <option value=\"MENTEE\">find a mentor</option>\
             <option value=\"MENTOR\">mentor others</option></select></label>\n\
             <button type=\"submit\">Register</button>\n</form>\n{}",
            AUTH_SCRIPT
        ),
    )
}

pub fn pending_approval() -> Html<String> {
    layout(
        "Awaiting approval",
        "<h1>Your mentor account is awaiting approval</h1>\n\
         <p>An administrator will review your registration shortly. \
         Once approved, sign in again to reach your dashboard.</p>",
    )
}

/// Dashboard shell for the caller's role; `section` is the sub-path after the
/// role's dashboard prefix.
pub fn dashboard(credential: &Credential, section: &str) -> Html<String> {
    let (heading, links): (&str, &[(&str, &str)]) = match credential.role {
        Role::Admin => (
            "Administration",
            &[("users", "Users"), ("approvals", "Mentor approvals"), ("stats", "Platform stats")],
        ),
        Role::Mentor => (
            "Mentor dashboard",
            &[("requests", "Requests"), ("sessions", "Sessions"), ("messages", "Messages")],
        ),
        Role::Mentee => (
            "Mentee dashboard",
            &[("mentors", "Find mentors"), ("sessions", "Sessions"), ("progress", "Progress")],
        ),
    };
    let base = crate::gate::landing_path(credential.role);

    let nav: String = links
        .iter()
        .map(|(slug, label)| format!("<li><a href=\"{}/{}\">{}</a></li>", base, slug, label))
        .collect();

    let section = section.trim_matches('/');
    let subtitle = if section.is_empty() {
        String::new()
    } else {
        format!("<h2>{}</h2>\n", escape(section))
    };

    layout(
        heading,
        &format!(
            "<h1>{}</h1>\n<nav><ul>{}</ul></nav>\n{}\
             <section id=\"content\" data-section=\"{}\"></section>\n\
             <form action=\"/api/auth/logout\" method=\"post\"><button type=\"submit\">Sign out</button></form>",
            heading,
            nav,
            subtitle,
            escape(section)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn credential(role: Role) -> Credential {
        let now = Utc::now();
        Credential {
            subject_id: Uuid::new_v4(),
            role,
            is_approved: true,
            issued_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn dashboard_links_stay_in_role_area() {
        let Html(page) = dashboard(&credential(Role::Mentor), "");
        assert!(page.contains("/dashboard/mentor/sessions"));
        assert!(!page.contains("/dashboard/admin"));
    }

    #[test]
    fn dashboard_section_is_escaped() {
        let Html(page) = dashboard(&credential(Role::Mentee), "/<script>/");
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<h2><script>"));
    }

    #[test]
    fn closed_registration_has_no_form() {
        let Html(page) = register(false);
        assert!(!page.contains("<form"));
    }
}
