use crate::config::AppConfig;
use crate::db::Database;
use crate::ingest::error::UploadError;
use crate::ingest::pipeline::{self, UploadOutcome};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::responses::UploadResponse;
use futures_util::StreamExt;
use log::error;
use serde_json::json;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// HTTP handler for `POST /upload`.
///
/// # Responses
///
/// - `200`: the file was processed; the body carries the accepted and
///   rejected row counts.
/// - `400`: client fault, either no `file` field or missing columns.
/// - `500`: store or stream fault; details go to the log, the body stays
///   generic.
pub async fn process(
    db: web::Data<Database>,
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> impl Responder {
    match upload_csv(&db, &config, payload).await {
        Ok(outcome) => HttpResponse::Ok().json(UploadResponse {
            message: "Upload processed".to_string(),
            success_count: outcome.success_count,
            error_count: outcome.error_count(),
        }),
        Err(err) => error_response(err),
    }
}

async fn upload_csv(
    db: &Database,
    config: &AppConfig,
    payload: Multipart,
) -> Result<UploadOutcome, UploadError> {
    let artifact = receive_file(config, payload).await?;
    run_pipeline(db, artifact, config.upload_delay_ms).await
}

/// Stream the multipart `file` field into a uniquely named artifact under
/// the upload directory.
///
/// A payload that never yields that field, including a request that is not
/// multipart at all, is the client's fault and maps to `NoFile`. Failures
/// after the field started streaming are stream faults and drop the
/// partial artifact.
async fn receive_file(config: &AppConfig, mut payload: Multipart) -> Result<PathBuf, UploadError> {
    while let Some(item) = payload.next().await {
        let Ok(mut field) = item else {
            return Err(UploadError::NoFile);
        };
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|name| name.to_string()));
        if field_name.as_deref() != Some("file") {
            continue;
        }

        let path = Path::new(&config.upload_dir).join(format!("upload_{}.csv", Uuid::new_v4()));
        let file = File::create(&path).map_err(|e| UploadError::Stream(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| stream_failed(&path, e))?;
            writer.write_all(&chunk).map_err(|e| stream_failed(&path, e))?;
        }
        writer.flush().map_err(|e| stream_failed(&path, e))?;
        return Ok(path);
    }
    Err(UploadError::NoFile)
}

/// The pipeline does file and database work, so it runs on a blocking
/// worker. A panicked worker surfaces as a stream fault.
async fn run_pipeline(
    db: &Database,
    artifact: PathBuf,
    delay_ms: u64,
) -> Result<UploadOutcome, UploadError> {
    let db = db.clone();
    let handle = tokio::task::spawn_blocking(move || pipeline::run(&db, &artifact, delay_ms));
    match handle.await {
        Ok(result) => result,
        Err(join_err) => Err(UploadError::Stream(format!("join error: {}", join_err))),
    }
}

fn stream_failed(path: &Path, err: impl std::fmt::Display) -> UploadError {
    if path.exists() {
        let _ = fs::remove_file(path);
    }
    UploadError::Stream(err.to_string())
}

fn error_response(err: UploadError) -> HttpResponse {
    match err {
        UploadError::NoFile => {
            HttpResponse::BadRequest().json(json!({ "error": "No file uploaded" }))
        }
        UploadError::MissingColumns(missing) => HttpResponse::BadRequest().json(json!({
            "error": format!("Invalid CSV. Missing columns: {}", missing.join(", ")),
            "detail": "Please use the sample CSV format provided.",
        })),
        UploadError::Database(e) => {
            error!("batch persistence failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Database error" }))
        }
        UploadError::Stream(message) => {
            error!("upload stream failed: {}", message);
            HttpResponse::InternalServerError().json(json!({ "error": message }))
        }
    }
}
