use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, put},
    Router,
};
use log::{debug, info};
use serde::Deserialize;

use crate::auth::RequireAuth;
use crate::errors::WikiError;
use crate::services::{MarkupService, PageStore, SearchService};
use crate::types::{AppState, Page};
use crate::utils::last_modified_html;
use crate::views;

/// Placeholder shown when a requested page has no backing file
pub const MISSING_PAGE_CONTENT: &str =
    "Page does not exist. Click on the button above to create it.";

#[derive(Deserialize)]
pub struct ShowParams {
    page: Option<String>,
}

#[derive(Deserialize)]
pub struct PageParam {
    page: String,
}

#[derive(Deserialize)]
pub struct EditForm {
    page: String,
    content: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    terms: Option<String>,
    commit: Option<String>,
}

/// Build the application router.
///
/// POST doubles for PUT/DELETE on the mutating routes so plain HTML forms
/// can reach the same handlers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show))
        .route("/show", get(show))
        .route("/show_all", get(show_all))
        .route("/edit", get(edit))
        .route("/preview", put(preview).post(preview))
        .route("/update", put(update).post(update))
        .route("/destroy", delete(destroy).post(destroy))
        .route("/search", get(search))
        .with_state(state)
}

/// Render a page; no `page` parameter resolves to the main page
pub async fn show(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(params): Query<ShowParams>,
) -> Result<impl IntoResponse, WikiError> {
    let name = params.page.as_deref().unwrap_or(&state.config.main_page);
    let page = Page::new(name)?;
    info!("Showing page: {}", page);

    let store = PageStore::new(state.config.pages_dir.clone());
    let markup = MarkupService::new(state.config.parser);

    let (content, modified) = match store.read(&page)? {
        Some(content) => (content, last_modified_html(&store.page_path(&page))),
        None => {
            debug!("Page {} has no backing file, showing placeholder", page);
            (MISSING_PAGE_CONTENT.to_string(), String::new())
        }
    };
    let parsed = markup.render(&content);

    Ok(Html(views::show(&page, &parsed, &modified)))
}

/// List every page alphabetically
pub async fn show_all(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<impl IntoResponse, WikiError> {
    let store = PageStore::new(state.config.pages_dir.clone());
    let names = store.list()?;
    Ok(Html(views::show_all(&names)))
}

/// Open a page for editing; the reserved listing name is not editable
pub async fn edit(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(params): Query<PageParam>,
) -> Result<Response, WikiError> {
    if params.page == state.config.all_page {
        debug!("Refusing edit of reserved page {}", params.page);
        return Ok(Redirect::to("/show_all").into_response());
    }
    let page = Page::new(&params.page)?;
    info!("Editing page: {}", page);

    let store = PageStore::new(state.config.pages_dir.clone());
    let markup = MarkupService::new(state.config.parser);

    let content = store.read(&page)?.unwrap_or_default();
    let parsed = markup.render(&content);

    Ok(Html(views::edit(&page, &content, &parsed)).into_response())
}

/// Render submitted content into the edit view without writing it
pub async fn preview(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Form(form): Form<EditForm>,
) -> Result<impl IntoResponse, WikiError> {
    let page = Page::new(&form.page)?;
    debug!("Previewing page: {}", page);

    let markup = MarkupService::new(state.config.parser);
    let parsed = markup.render(&form.content);

    Ok(Html(views::edit(&page, &form.content, &parsed)))
}

/// Write submitted content and redirect to the page view
pub async fn update(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Form(form): Form<EditForm>,
) -> Result<Response, WikiError> {
    if form.page == state.config.all_page {
        debug!("Refusing update of reserved page {}", form.page);
        return Ok(Redirect::to("/show_all").into_response());
    }
    let page = Page::new(&form.page)?;

    let store = PageStore::new(state.config.pages_dir.clone());
    store.write(&page, &form.content)?;
    info!("Updated page: {}", page);

    Ok(Redirect::to(&format!("/show?page={}", page.name())).into_response())
}

/// Delete a page's backing file; the main page is protected
pub async fn destroy(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(params): Query<PageParam>,
) -> Result<Response, WikiError> {
    if params.page == state.config.all_page {
        debug!("Refusing destroy of reserved page {}", params.page);
        return Ok(Redirect::to("/show_all").into_response());
    }
    let page = Page::new(&params.page)?;
    if page.name() == state.config.main_page {
        debug!("Refusing destroy of main page {}", page);
        return Ok(Redirect::to("/").into_response());
    }

    let store = PageStore::new(state.config.pages_dir.clone());
    store.delete(&page)?;
    info!("Destroyed page: {}", page);

    Ok(Redirect::to("/").into_response())
}

/// Search pages, or jump to creating one named after the terms
pub async fn search(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(params): Query<SearchParams>,
) -> Result<Response, WikiError> {
    let terms = params.terms.unwrap_or_default();

    if params.commit.as_deref() == Some("Create") {
        let page = Page::new(&terms)?;
        info!("Creating page from search terms: {}", page);
        return Ok(Redirect::to(&format!("/edit?page={}", page.name())).into_response());
    }

    let store = PageStore::new(state.config.pages_dir.clone());
    let results = SearchService::new(store).search(&terms)?;
    info!("Search for '{}' returned {} results", terms, results.len());

    Ok(Html(views::search(&terms, &results)).into_response())
}
