use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use duel_gameplay::GameKind;

/// Server info, mirroring the landing page of the original deployment.
/// Informational only.
pub async fn index(arena: web::Data<Arena>) -> impl Responder {
    match arena.snapshot().await {
        Ok(sessions) => HttpResponse::Ok().json(serde_json::json!({
            "name": "duel-server",
            "status": "running",
            "active_sessions": sessions.len(),
            "supported_games": GameKind::ALL.iter().map(|k| k.label()).collect::<Vec<_>>(),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().body(e.to_string()),
    }
}

/// Live session listing: id, game type, status, participant count.
/// Read-only; no mutation capability.
pub async fn games(arena: web::Data<Arena>) -> impl Responder {
    match arena.snapshot().await {
        Ok(sessions) => HttpResponse::Ok().json(sessions),
        Err(e) => HttpResponse::ServiceUnavailable().body(e.to_string()),
    }
}

/// WebSocket upgrade into the bridge.
pub async fn play(
    arena: web::Data<Arena>,
    req: HttpRequest,
    body: web::Payload,
) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            arena.bridge(session, stream);
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
