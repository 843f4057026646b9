//! Player registration and lookup.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{error::GameError, game::coordinator::GameCoordinator, game::types::PlayerId};

#[derive(Deserialize)]
pub struct CreateUserReq {
    pub name: String,
}

/// GET /api/users
#[get("/users")]
pub async fn list_users(game: web::Data<GameCoordinator>) -> Result<HttpResponse, GameError> {
    Ok(HttpResponse::Ok().json(game.list_users().await?))
}

/// POST /api/users
#[post("/users")]
pub async fn create_user(
    info: web::Json<CreateUserReq>,
    game: web::Data<GameCoordinator>,
) -> Result<HttpResponse, GameError> {
    let id = game.create_user(&info.name).await?;
    Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

/// GET /api/users/{id}
#[get("/users/{id}")]
pub async fn get_user(
    path: web::Path<PlayerId>,
    game: web::Data<GameCoordinator>,
) -> Result<HttpResponse, GameError> {
    Ok(HttpResponse::Ok().json(game.get_user(path.into_inner()).await?))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users).service(create_user).service(get_user);
}
