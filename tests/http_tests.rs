//! Request surface over the in-memory store.

mod common;

use actix_web::{
    http::{header, StatusCode},
    test, web, App,
};
use serde_json::{json, Value};

use common::coordinator;
use pokefumi_server::{cors::cors_middleware, http::routes::init_routes};

#[actix_rt::test]
async fn match_lifecycle_over_http() {
    let (game, _, _) = coordinator();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(game))
            .configure(init_routes),
    )
    .await;

    for name in ["ash", "misty"] {
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": name }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({ "idPlayer1": 1 }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["match_id"], 1);
    assert_eq!(created["match_url"], "/api/match/1");

    let req = test::TestRequest::put()
        .uri("/api/match/1")
        .set_json(json!({
            "idPlayer2": 2,
            "pokemonsPlayer1": ["pikachu"],
            "pokemonsPlayer2": ["squirtle"],
            "status": "IN_PROGRESS"
        }))
        .to_request();
    let started: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(started["status"], "IN_PROGRESS");
    assert_eq!(started["rounds"], json!([]));

    let req = test::TestRequest::put()
        .uri("/api/round")
        .set_json(json!({ "matchId": 1, "roundNumber": 1, "pokemonPlayer1": "pikachu" }))
        .to_request();
    let round: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(round["status"], "STARTED");
    assert!(round.get("winner").is_none());

    let req = test::TestRequest::put()
        .uri("/api/round")
        .set_json(json!({ "matchId": 1, "roundNumber": 1, "pokemonPlayer2": "squirtle" }))
        .to_request();
    let round: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(round["status"], "FINISHED");
    assert_eq!(round["winner"], 1);

    let req = test::TestRequest::get().uri("/api/match/1").to_request();
    let finished: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(finished["status"], "FINISHED");
    assert_eq!(finished["winner"], 1);
    assert_eq!(finished["rounds"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get().uri("/api/users/1").to_request();
    let winner: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(winner["score"], 10);
}

#[actix_rt::test]
async fn missing_match_is_404_without_body() {
    let (game, _, _) = coordinator();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(game))
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/match/9").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_rt::test]
async fn rule_violation_is_400_with_reason() {
    let (game, _, _) = coordinator();
    game.create_user("ash").await.unwrap();
    game.create_match(1).await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(game))
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/match/1")
        .set_json(json!({ "idPlayer2": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body, "You cannot play against yourself");
}

#[actix_rt::test]
async fn healthz_answers_ok() {
    let (game, _, _) = coordinator();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(game))
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/healthz").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "ok");
}

#[actix_rt::test]
async fn any_origin_is_allowed_by_default() {
    let (game, _, _) = coordinator();
    let app = test::init_service(
        App::new()
            .wrap(cors_middleware(&[]))
            .app_data(web::Data::new(game))
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/healthz")
        .insert_header((header::ORIGIN, "http://game.example"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let preflight = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/round")
        .insert_header((header::ORIGIN, "http://game.example"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PUT"))
        .to_request();
    let resp = test::call_service(&app, preflight).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[actix_rt::test]
async fn configured_origin_is_echoed_back() {
    let (game, _, _) = coordinator();
    let origins = vec!["https://poke.example".to_owned()];
    let app = test::init_service(
        App::new()
            .wrap(cors_middleware(&origins))
            .app_data(web::Data::new(game))
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header((header::ORIGIN, "https://poke.example"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://poke.example"
    );
}
