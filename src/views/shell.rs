use crate::locals::Locals;
use crate::views::text;

pub fn document(markup: maud::Markup, title: &str, locals: &Locals) -> maud::Markup {
    let signed_in = locals
        .get("private_cookies")
        .and_then(|value| value.as_array())
        .is_some_and(|names| !names.is_empty());

    maud::html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (stylesheet(locals))
                title { (title) " - viewgate" }
            }

            body {
                div .container {
                    (header(signed_in))
                    main { (markup) }
                }
            }
        }
    }
}

fn stylesheet(locals: &Locals) -> maud::Markup {
    maud::html! {
        @if let Some(href) = text(locals, "stylesheet") {
            link rel="stylesheet" href=(href);
        }
    }
}

fn header(signed_in: bool) -> maud::Markup {
    maud::html! {
        nav {
            span {
                a href="/" { "viewgate" }
            }
            @if signed_in {
                div {
                    a href="/account" { "Account" }
                    " - "
                    a href="/logout" { "Log out" }
                }
            }
        }
    }
}
