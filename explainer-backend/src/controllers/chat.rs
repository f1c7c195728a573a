//! Chat turns against a session's agent swarm

use crate::sessions::ChatMessage;
use crate::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct SendMessageRequest {
    content: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/sessions/{id}")
            .route(web::get().to(get_session))
            .route(web::delete().to(delete_session)),
    );
    cfg.service(
        web::resource("/api/sessions/{id}/messages").route(web::post().to(post_message)),
    );
    cfg.service(
        web::resource("/api/sessions/{id}/transcript").route(web::get().to(get_transcript)),
    );
}

/// One user turn: dispatch to the active agent, follow any handoff chain,
/// commit the new state only if the turn produced an answer.
async fn post_message(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SendMessageRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let Some(handle) = data.sessions.get(&id) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "Session not found"
        }));
    };

    let content = body.content.trim();
    if content.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Message must not be empty"
        }));
    }

    let mut session = handle.lock().await;
    match data.router.advance(&session.state, content).await {
        Ok((state, reply)) => {
            session.state = state;
            session.transcript.push(ChatMessage::user(content));
            session
                .transcript
                .push(ChatMessage::assistant(reply.answer.clone(), reply.agent));

            HttpResponse::Ok().json(serde_json::json!({
                "answer": reply.answer,
                "agent": reply.agent,
                "agent_label": reply.agent.label(),
                "handoffs": reply.handoffs,
                "active_agent": session.state.active,
            }))
        }
        Err(e) => {
            // Surface the failure in the transcript; swarm state is left
            // exactly as it was before the turn
            log::error!("[CHAT] Turn failed for session {}: {}", id, e);
            let message = format!("Error: {}", e);
            session.transcript.push(ChatMessage::user(content));
            session.transcript.push(ChatMessage::error(message.clone()));

            HttpResponse::BadGateway().json(serde_json::json!({
                "error": message,
                "active_agent": session.state.active,
            }))
        }
    }
}

async fn get_session(data: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let Some(handle) = data.sessions.get(&id) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "Session not found"
        }));
    };

    let session = handle.lock().await;
    HttpResponse::Ok().json(serde_json::json!({
        "session_id": session.id,
        "active_agent": session.state.active,
        "active_agent_label": session.state.active.label(),
        "preview": session.document_preview,
        "transcript_len": session.transcript.len(),
        "created_at": session.created_at,
    }))
}

async fn get_transcript(data: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let Some(handle) = data.sessions.get(&id) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "Session not found"
        }));
    };

    let session = handle.lock().await;
    HttpResponse::Ok().json(&session.transcript)
}

/// Discard a session and its document context
async fn delete_session(data: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    if data.sessions.remove(&id) {
        log::info!("[SESSIONS] Discarded session {}", id);
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(serde_json::json!({
            "error": "Session not found"
        }))
    }
}
