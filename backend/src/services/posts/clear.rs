use crate::db::Database;
use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;

/// HTTP handler for `DELETE /posts`. Removes every record; clearing an
/// empty store is still a success.
pub(crate) async fn process(db: web::Data<Database>) -> impl Responder {
    match db.delete_all() {
        Ok(removed) => {
            info!("cleared {} records", removed);
            HttpResponse::Ok().json(json!({ "message": "All data cleared" }))
        }
        Err(e) => {
            error!("clear failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Database error" }))
        }
    }
}
