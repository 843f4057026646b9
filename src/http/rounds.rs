use actix_web::{post, put, web, HttpResponse};

use crate::{
    error::GameError,
    game::{coordinator::GameCoordinator, types::RoundInput},
};

/// POST /api/round — open the next round.
#[post("/round")]
pub async fn create_round(
    info: web::Json<RoundInput>,
    game: web::Data<GameCoordinator>,
) -> Result<HttpResponse, GameError> {
    let round = game.create_round(info.into_inner()).await?;
    Ok(HttpResponse::Ok().json(round))
}

/// PUT /api/round — submit one or both picks.
#[put("/round")]
pub async fn update_round(
    info: web::Json<RoundInput>,
    game: web::Data<GameCoordinator>,
) -> Result<HttpResponse, GameError> {
    let round = game.update_round(info.into_inner()).await?;
    Ok(HttpResponse::Ok().json(round))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_round).service(update_round);
}
