use crate::services::slug::encode_title;
use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SlugQuery {
    #[serde(default)]
    title: String,
}

#[derive(Serialize)]
pub struct SlugResponse {
    title: String,
    slug: String,
}

pub async fn slug(Query(query): Query<SlugQuery>) -> Json<SlugResponse> {
    let slug = encode_title(&query.title);
    Json(SlugResponse {
        title: query.title,
        slug,
    })
}
