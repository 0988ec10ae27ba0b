use crate::db::Database;
use actix_web::{web, HttpResponse, Responder};
use common::responses::PostsPage;
use log::error;
use serde::Deserialize;
use serde_json::json;

/// Fixed page size of the listing.
const PAGE_SIZE: u64 = 20;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    search: Option<String>,
}

/// HTTP handler for `GET /posts`.
pub(crate) async fn process(
    db: web::Data<Database>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match list_posts(&db, &query) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => {
            error!("record listing failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Database error" }))
        }
    }
}

fn list_posts(db: &Database, query: &ListQuery) -> Result<PostsPage, rusqlite::Error> {
    let page = parse_page(query.page.as_deref());
    let search = query.search.as_deref().unwrap_or_default();

    let total = db.count(search)?;
    let data = db.find_page(search, page, PAGE_SIZE)?;

    Ok(PostsPage {
        data,
        total,
        page,
        pages: total.div_ceil(PAGE_SIZE),
    })
}

/// 1-based page number; anything absent or not a positive integer falls
/// back to the first page.
fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1)
}
