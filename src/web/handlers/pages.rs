use crate::models::Viewer;
use crate::services::html::{
    html_escape, login_link, login_status, main_page_link, new_page_link, page_link,
    settings_link, tag_blocks,
};
use crate::services::slug::is_valid_slug;
use crate::web::error::{AppError, AppResult};
use crate::web::extractors::CurrentViewer;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

const NAV_SEPARATOR: &str = " | ";

#[derive(Serialize)]
struct Nav {
    main_page: String,
    new_page: String,
    settings: String,
    login: String,
    login_status: String,
}

#[derive(Serialize)]
struct TagView {
    name: String,
    count: u32,
    url: String,
}

fn make_context(state: &AppState, viewer: &Viewer) -> Context {
    let links = &state.links;
    let nav = Nav {
        main_page: main_page_link(links, &state.config.site.title),
        new_page: new_page_link(links, viewer, NAV_SEPARATOR),
        settings: settings_link(links, viewer, NAV_SEPARATOR),
        login: login_link(
            links,
            viewer,
            state.config.auth.windows_authentication,
            "",
        ),
        login_status: login_status(viewer),
    };

    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("viewer", viewer);
    ctx.insert("nav", &nav);
    ctx.insert("stylesheet", &state.assets.css_link("wiki.css"));
    ctx
}

pub async fn home(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
) -> AppResult<Html<String>> {
    let tags: Vec<TagView> = state
        .tags
        .summaries()
        .into_iter()
        .map(|t| TagView {
            url: html_escape(&state.links.tag(&t.name)),
            name: t.name,
            count: t.count,
        })
        .collect();

    let mut ctx = make_context(&state, &viewer);
    ctx.insert("tags", &tags);

    let html = state.templates.render("home.html", &ctx)?;
    Ok(Html(html))
}

pub async fn tag(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let summary = state.tags.get(&name).ok_or(AppError::NotFound)?;
    let pages: Vec<String> = state
        .pages
        .with_tag(&name)
        .iter()
        .map(|p| page_link(&state.links, &p.title, &p.slug, None))
        .collect();

    let mut ctx = make_context(&state, &viewer);
    ctx.insert("tag", &summary);
    ctx.insert("pages", &pages);

    let html = state.templates.render("tag.html", &ctx)?;
    Ok(Html(html))
}

pub async fn page(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    if !is_valid_slug(&slug) {
        return Err(AppError::NotFound);
    }
    let page = state.pages.get(&slug).ok_or(AppError::NotFound)?;
    let html = state.markup.render(&page.content)?;

    let mut ctx = make_context(&state, &viewer);
    ctx.insert("title", &page.title);
    ctx.insert("slug", &page.slug);
    ctx.insert("page_url", &html_escape(&state.links.page(&page.slug)));
    ctx.insert("tag_blocks", &tag_blocks(&state.links, &page.tag_field()));
    ctx.insert("html", &html);

    let rendered = state.templates.render("page.html", &ctx)?;
    Ok(Html(rendered))
}

pub async fn new_page(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
) -> AppResult<Html<String>> {
    require_login(&viewer)?;

    let mut ctx = make_context(&state, &viewer);
    ctx.insert(
        "urls",
        &serde_json::json!({
            "new_page": html_escape(&state.links.new_page()),
            "preview": state.links.preview(),
            "all_tags": state.links.all_tags(),
        }),
    );
    ctx.insert("edit_script", &state.assets.script_link("edit.js"));

    let html = state.templates.render("edit.html", &ctx)?;
    Ok(Html(html))
}

#[derive(Deserialize)]
pub struct PageForm {
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: String,
}

pub async fn create_page(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Form(form): Form<PageForm>,
) -> AppResult<Redirect> {
    require_login(&viewer)?;

    let page = state
        .pages
        .create(&form.title, &form.content, &form.tags)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    state.tags.record(&page.tag_field());

    Ok(Redirect::to(&state.links.page(&page.slug)))
}

/// The editor posts its raw markup as a single `id` field.
#[derive(Deserialize)]
pub struct PreviewForm {
    #[serde(default)]
    id: String,
}

pub async fn preview(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Form(form): Form<PreviewForm>,
) -> AppResult<Html<String>> {
    require_login(&viewer)?;

    let html = state.markup.render(&form.id)?;

    let mut ctx = Context::new();
    ctx.insert("html", &html);

    let rendered = state.templates.render("preview.html", &ctx)?;
    Ok(Html(rendered))
}

pub async fn all_tags(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.tags.names())
}

fn require_login(viewer: &Viewer) -> AppResult<()> {
    if viewer.is_logged_in {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
