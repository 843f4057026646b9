//! Simple liveness / readiness probe

use actix_web::{get, web, HttpResponse, Responder};

use crate::game::coordinator::GameCoordinator;

#[get("/healthz")]
pub async fn healthz(game: web::Data<GameCoordinator>) -> impl Responder {
    if let Err(e) = game.store().ping().await {
        log::warn!("health check failed: {e}");
        return HttpResponse::ServiceUnavailable().body("db");
    }
    HttpResponse::Ok().body("ok")
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(healthz);
}
