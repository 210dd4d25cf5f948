use crate::locals::Locals;
use crate::views::{shell, text};

pub fn index(locals: &Locals) -> maud::Markup {
    let title = text(locals, "title").unwrap_or("home".into());
    let logged_out = locals.get("logged_out").is_some_and(|value| !value.is_null());

    let markup = maud::html! {
        @if logged_out {
            p .notice { "You have been logged out." }
        }
        h1 { (text(locals, "heading").unwrap_or("Hello, World!".into())) }
    };

    shell::document(markup, &title, locals)
}

pub fn page(locals: &Locals) -> maud::Markup {
    let title = text(locals, "title").unwrap_or("page".into());

    let markup = maud::html! {
        h1 { (text(locals, "heading").unwrap_or(title.clone())) }
        @if let Some(body) = text(locals, "body") {
            p { (body) }
        }
    };

    shell::document(markup, &title, locals)
}

pub fn account(locals: &Locals) -> maud::Markup {
    let title = text(locals, "title").unwrap_or("account".into());
    let private = locals
        .get("private_cookies")
        .and_then(|value| value.as_array())
        .map(|names| names.iter().filter_map(|n| n.as_str()).collect::<Vec<_>>())
        .unwrap_or_default();

    let markup = maud::html! {
        h1 { (title) }
        @if let Some(user) = text(locals, "user") {
            p { "Signed in as " strong { (user) } }
        }
        @if !private.is_empty() {
            p { "Private cookies held by this browser:" }
            ul {
                @for name in &private {
                    li { code { (name) } }
                }
            }
            a href="/logout" { "Log out" }
        }
    };

    shell::document(markup, &title, locals)
}

// Debug view: dumps the whole context as JSON.
pub fn inspect(locals: &Locals) -> maud::Markup {
    let markup = maud::html! {
        h1 { "locals" }
        table {
            @for (key, value) in locals {
                tr {
                    th { (key) }
                    td { code { (value.to_string()) } }
                }
            }
        }
    };

    shell::document(markup, "inspect", locals)
}
