//! Match creation, listing and the match-update entry point.

use actix_web::{get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::GameError,
    game::{
        coordinator::GameCoordinator,
        types::{MatchId, MatchUpdate, PlayerId},
    },
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchReq {
    pub id_player1: PlayerId,
}

#[derive(Serialize)]
pub struct MatchCreated {
    pub match_id: MatchId,
    pub match_url: String,
}

/// POST /api/match
#[post("/match")]
pub async fn create_match(
    info: web::Json<CreateMatchReq>,
    game: web::Data<GameCoordinator>,
) -> Result<HttpResponse, GameError> {
    let match_id = game.create_match(info.id_player1).await?;
    Ok(HttpResponse::Ok().json(MatchCreated {
        match_id,
        match_url: format!("/api/match/{match_id}"),
    }))
}

/// GET /api/match
#[get("/match")]
pub async fn list_matches(game: web::Data<GameCoordinator>) -> Result<HttpResponse, GameError> {
    Ok(HttpResponse::Ok().json(game.list_matches().await?))
}

/// GET /api/match/{id} — the match with all its rounds.
#[get("/match/{id}")]
pub async fn get_match(
    path: web::Path<MatchId>,
    game: web::Data<GameCoordinator>,
) -> Result<HttpResponse, GameError> {
    Ok(HttpResponse::Ok().json(game.get_match_with_rounds(path.into_inner()).await?))
}

/// PUT /api/match/{id}
#[put("/match/{id}")]
pub async fn update_match(
    path: web::Path<MatchId>,
    info: web::Json<MatchUpdate>,
    game: web::Data<GameCoordinator>,
) -> Result<HttpResponse, GameError> {
    let updated = game.update_match(path.into_inner(), info.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_match)
        .service(list_matches)
        .service(get_match)
        .service(update_match);
}
