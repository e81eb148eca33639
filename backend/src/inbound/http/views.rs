//! Server-rendered HTML pages.
//!
//! Pages are assembled from string fragments. Every value that did not
//! originate in this file passes through [`escape`] before it is written.

use std::fmt::Write as _;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};

use crate::domain::InventoryItem;

use super::flash::Flash;

/// HTML-escape text for use in element content or quoted attributes.
///
/// # Examples
/// ```
/// use inventory::inbound::http::views::escape;
///
/// assert_eq!(escape(r#"<b a="1">&'"#), "&lt;b a=&quot;1&quot;&gt;&amp;&#x27;");
/// ```
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap a rendered page in a response with the given status.
pub(crate) fn html(status: StatusCode, page: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(page)
}

/// `302 Found` to `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn layout(title: &str, signed_in: bool, flashes: &[Flash], body: &str) -> String {
    let nav = if signed_in {
        r#"<a href="/">Inventory</a> <a href="/logout">Logout</a>"#
    } else {
        r#"<a href="/login">Login</a> <a href="/register">Register</a>"#
    };
    let mut messages = String::new();
    for flash in flashes {
        // Writing into a String cannot fail.
        let _ = write!(
            messages,
            r#"<div class="alert alert-{}">{}</div>"#,
            flash.level.as_str(),
            escape(&flash.text)
        );
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav>{nav}</nav>
<main>
{messages}
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Username <input type="text" name="username" maxlength="50" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit}</button>
</form>"#
    )
}

/// Login form.
pub fn login_page(flashes: &[Flash]) -> String {
    let body = format!(
        "<h1>Login</h1>\n{}\n<p>No account? <a href=\"/register\">Register</a></p>",
        credentials_form("/login", "Login")
    );
    layout("Login", false, flashes, &body)
}

/// Registration form.
pub fn register_page(flashes: &[Flash]) -> String {
    let body = format!(
        "<h1>Register</h1>\n{}\n<p>Already registered? <a href=\"/login\">Login</a></p>",
        credentials_form("/register", "Register")
    );
    layout("Register", false, flashes, &body)
}

/// Inventory table with the add form and a delete form per row.
///
/// `confirmation_token` is embedded in each delete form.
pub fn inventory_page(items: &[InventoryItem], confirmation_token: &str, flashes: &[Flash]) -> String {
    let token = escape(confirmation_token);
    let mut rows = String::new();
    for item in items {
        let _ = write!(
            rows,
            r#"<tr><td>{id}</td><td>{name}</td><td>{quantity}</td><td><form method="post" action="/delete_item/{id}"><input type="hidden" name="csrf_token" value="{token}"><button type="submit">Delete</button></form></td></tr>
"#,
            id = item.id(),
            name = escape(item.name().as_ref()),
            quantity = item.quantity(),
        );
    }
    if items.is_empty() {
        rows.push_str("<tr><td colspan=\"4\">No items yet.</td></tr>\n");
    }
    let body = format!(
        r#"<h1>Inventory</h1>
<form method="post" action="/add_item">
<label>Item name <input type="text" name="item_name" maxlength="100" required></label>
<label>Quantity <input type="number" name="quantity" min="0" required></label>
<button type="submit">Add item</button>
</form>
<table>
<thead><tr><th>ID</th><th>Item</th><th>Quantity</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    );
    layout("Inventory", true, flashes, &body)
}

/// Error page shown for failures that do not redirect.
pub fn error_page(status: u16, reason: &str, message: &str, trace_id: Option<&str>) -> String {
    let reference = trace_id
        .map(|id| format!("\n<p class=\"trace\">Reference: {}</p>", escape(id)))
        .unwrap_or_default();
    let body = format!(
        "<h1>{status} {reason}</h1>\n<p>{message}</p>{reference}\n<p><a href=\"/\">Back to inventory</a></p>",
        reason = escape(reason),
        message = escape(message),
    );
    layout(reason, false, &[], &body)
}
