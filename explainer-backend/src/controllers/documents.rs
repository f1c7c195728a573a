//! Document upload: multipart PDF in, fresh chat session out

use crate::ingest::{ContentLoader, IngestError};
use crate::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use std::io::Write;
use std::path::Path;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/documents").route(web::post().to(upload_document)));
}

/// Accept a PDF upload, extract its text and create a session seeded with
/// the document context. The upload is spooled to a named temp file that is
/// dropped on every exit path, success or failure.
async fn upload_document(data: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let mut field = match payload.try_next().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "No file provided"
            }));
        }
        Err(e) => {
            log::warn!("[UPLOAD] Malformed multipart payload: {}", e);
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Malformed upload"
            }));
        }
    };

    let filename = field
        .content_disposition()
        .get_filename()
        .unwrap_or("upload")
        .to_string();

    // Carry only the extension into the temp path; the loader keys off it
    let suffix = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let mut temp = match tempfile::Builder::new()
        .prefix("uploaded-")
        .suffix(&suffix)
        .tempfile()
    {
        Ok(t) => t,
        Err(e) => {
            log::error!("[UPLOAD] Failed to create temp file: {}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to store upload"
            }));
        }
    };

    loop {
        match field.try_next().await {
            Ok(Some(chunk)) => {
                if let Err(e) = temp.write_all(&chunk) {
                    log::error!("[UPLOAD] Failed to write upload: {}", e);
                    return HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": "Failed to store upload"
                    }));
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("[UPLOAD] Upload stream error: {}", e);
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Upload interrupted"
                }));
            }
        }
    }

    log::info!("[UPLOAD] Received '{}', extracting text", filename);

    // PDF parsing is CPU-bound; run it off the actix workers. The temp file
    // moves into the closure and is removed when it drops, whatever happens.
    let max_chunks = data.config.max_document_chunks;
    let extraction = web::block(move || {
        let loader = ContentLoader::new();
        loader.get_text(temp.path(), max_chunks)
    })
    .await;

    let document_context = match extraction {
        Ok(Ok(text)) => text,
        Ok(Err(e @ IngestError::UnsupportedFormat(_))) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
        Ok(Err(e)) => {
            log::warn!("[UPLOAD] Extraction failed for '{}': {}", filename, e);
            return HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
        Err(e) => {
            log::error!("[UPLOAD] Extraction task failed: {}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Extraction failed"
            }));
        }
    };

    let content_chars = document_context.chars().count();
    let (session_id, handle) = data.sessions.create(&document_context);
    let session = handle.lock().await;

    HttpResponse::Ok().json(serde_json::json!({
        "session_id": session_id,
        "active_agent": session.state.active,
        "preview": session.document_preview,
        "content_chars": content_chars,
    }))
}
