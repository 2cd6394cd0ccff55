use leptos::prelude::*;

use crate::document::{PageDocument, PageElement, RenderedTile};

const STYLESHEET_HREF: &str = "style.css";

/// Renders the full HTML document for the current page state.
pub fn render_page_document(document: &PageDocument) -> String {
    let title = view! { <title>{document.title.clone()}</title> }.to_html();
    let body = render_page_body(document);
    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\" />\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
{title}\n<link rel=\"stylesheet\" href=\"{STYLESHEET_HREF}\" />\n</head>\n\
<body>\n{body}\n</body>\n</html>\n"
    )
}

/// Renders the `#wedding-app` container without the document wrapper.
pub fn render_page_body(document: &PageDocument) -> String {
    let loading = document.loading.clone().map(|loading| {
        view! {
            <div id="loading" class="loading" style=loading.display.as_css()>
                {loading.text}
            </div>
        }
    });
    let error = document.error.clone().map(|error| {
        view! {
            <div id="error" class="error" role="alert" style=error.display.as_css()>
                {error.text}
            </div>
        }
    });
    let welcome = render_welcome(document.welcome.clone(), document.user_name.clone());
    let navigation = document.navigation.clone().map(|mount| {
        let tile_count = mount.tiles.len().to_string();
        view! {
            <nav
                id="navigation"
                class="navigation"
                aria-label="Navigation"
                data-tile-count=tile_count
                style=mount.display.as_css()
            >
                {mount
                    .tiles
                    .into_iter()
                    .enumerate()
                    .map(|(index, tile)| render_tile(index, tile))
                    .collect_view()}
            </nav>
        }
    });

    view! {
        <main id="wedding-app">
            {loading}
            {error}
            {welcome}
            {navigation}
        </main>
    }
    .to_html()
}

fn render_welcome(welcome: Option<PageElement>, user_name: Option<PageElement>) -> impl IntoView {
    let user_name = user_name.map(|user_name| {
        view! {
            <span id="userName" style=user_name.display.as_css()>{user_name.text}</span>
        }
    });
    match welcome {
        Some(welcome) => view! {
            <section id="welcome" class="welcome" style=welcome.display.as_css()>
                <h2>"Bienvenue " {user_name}</h2>
            </section>
        }
        .into_any(),
        None => user_name.into_any(),
    }
}

fn render_tile(index: usize, tile: RenderedTile) -> impl IntoView {
    let badge = tile
        .badge
        .map(|badge| view! { <span class="admin-badge">{badge}</span> });
    view! {
        <a class="tab-card" href=tile.href data-tab-index=index.to_string()>
            <div class="tab-icon">{tile.icon}</div>
            <h3>{tile.title}</h3>
            <p>{tile.description}</p>
            {badge}
        </a>
    }
}
