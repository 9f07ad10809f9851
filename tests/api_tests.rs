// HTTP API tests for TripSync

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use tripsync::config::Settings;
use tripsync::routes::{configure_routes, error::{json_config, query_config}, AppState};
use tripsync::services::{Catalog, ImageCache};

fn app_state() -> AppState {
    let catalog = Catalog::from_json(include_str!("../data/destinations.json")).unwrap();
    AppState::new(Settings::default(), catalog, ImageCache::in_memory(100, 3600))
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .app_data(json_config())
                .app_data(query_config())
                .configure(configure_routes),
        )
        .await
    };
}

fn asha() -> Value {
    json!({
        "name": "Asha",
        "travelerType": "friends",
        "interests": ["beach", "nightlife", "food"],
        "budget": "low"
    })
}

fn ravi() -> Value {
    json!({
        "name": "Ravi",
        "travelerType": "friends",
        "interests": ["mountains", "trekking", "camping"],
        "budget": 4500
    })
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["destinations"], 15);
    assert_eq!(body["groups"], 0);
}

#[actix_web::test]
async fn test_solo_recommend() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/recommend")
        .set_json(json!({ "profile": asha(), "limit": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let results = body["results"].as_array().unwrap();
    assert!(!results.is_empty() && results.len() <= 5);
    assert_eq!(results[0]["name"], "Goa");
    assert_eq!(body["totalCandidates"], 15);
}

#[actix_web::test]
async fn test_recommend_rejects_unknown_traveler_type() {
    let app = init_app!();

    let mut profile = asha();
    profile["travelerType"] = json!("astronaut");

    let req = test::TestRequest::post()
        .uri("/api/v1/recommend")
        .set_json(json!({ "profile": profile }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_profile");
    assert_eq!(body["statusCode"], 400);
}

#[actix_web::test]
async fn test_recommend_rejects_empty_interests() {
    let app = init_app!();

    let mut profile = asha();
    profile["interests"] = json!([]);

    let req = test::TestRequest::post()
        .uri("/api/v1/recommend")
        .set_json(json!({ "profile": profile }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/recommend")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_group_lifecycle() {
    let app = init_app!();

    // Create
    let req = test::TestRequest::post().uri("/api/v1/groups").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let code = body["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);
    assert_eq!(body["status"], "pending");

    // Join, lower-case code is accepted
    for (profile, expected) in [(asha(), 1), (ravi(), 2)] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/groups/{}/members", code.to_lowercase()))
            .set_json(profile)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["memberCount"], expected);
        assert_eq!(body["code"], code.as_str());
    }

    // Pending poll returns immediately
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/groups/{}/result", code))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ready"], false);
    assert_eq!(body["status"], "pending");
    assert!(body["results"].as_array().unwrap().is_empty());

    // Members
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/groups/{}/members", code))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["name"], "Asha");
    assert_eq!(members[0]["isOwner"], true);
    assert_eq!(members[1]["isOwner"], false);
    assert_eq!(members[1]["budget"], "mid");
    assert!(body.get("results").is_none());

    // Generate twice
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/groups/{}/generate", code))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first["alreadyGenerated"], false);
    assert_eq!(first["status"], "generated");
    assert!(!first["results"].as_array().unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/groups/{}/generate", code))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second["alreadyGenerated"], true);
    assert_eq!(first["results"], second["results"]);

    // Poll sees the same result
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/groups/{}/result", code))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["results"], first["results"]);

    // Members view now carries the results too
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/groups/{}/members", code))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "generated");
    assert_eq!(body["results"], first["results"]);
}

#[actix_web::test]
async fn test_unknown_group_is_404() {
    let app = init_app!();

    for (method, path) in [
        ("POST", "/api/v1/groups/QQQQQQ/generate"),
        ("GET", "/api/v1/groups/QQQQQQ/result"),
        ("GET", "/api/v1/groups/QQQQQQ/members"),
    ] {
        let req = match method {
            "POST" => test::TestRequest::post(),
            _ => test::TestRequest::get(),
        }
        .uri(path)
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{} {}", method, path);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "group_not_found");
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/groups/QQQQQQ/members")
        .set_json(asha())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_generate_empty_group() {
    let app = init_app!();

    let req = test::TestRequest::post().uri("/api/v1/groups").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let code = body["code"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/groups/{}/generate", code))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "generated");
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_destinations_and_similar() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/destinations").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 15);

    let req = test::TestRequest::get()
        .uri("/api/v1/destinations/goa/similar?limit=3")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let similar = body["similar"].as_array().unwrap();
    assert_eq!(similar.len(), 3);
    assert!(similar.iter().all(|s| s["name"] != "Goa"));

    let req = test::TestRequest::get()
        .uri("/api/v1/destinations/Atlantis/similar")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_image_cache_round_trip() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/images?place=Hampi&region=Karnataka")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/api/v1/images")
        .set_json(json!({
            "place": "Hampi",
            "region": "Karnataka",
            "url": "https://images.example.com/hampi.jpg"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["key"], "hampi|karnataka");

    let req = test::TestRequest::get()
        .uri("/api/v1/images?place=HAMPI&region=karnataka")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["url"], "https://images.example.com/hampi.jpg");

    let req = test::TestRequest::put()
        .uri("/api/v1/images")
        .set_json(json!({ "place": "Hampi", "url": "ftp://nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_incomplete_profiles_are_invalid_profiles() {
    let app = init_app!();

    let mut no_type = asha();
    no_type.as_object_mut().unwrap().remove("travelerType");
    let mut no_interests = asha();
    no_interests.as_object_mut().unwrap().remove("interests");
    let mut no_budget = asha();
    no_budget.as_object_mut().unwrap().remove("budget");
    let mut bad_month = asha();
    bad_month["months"] = json!([300]);

    for profile in [no_type, no_interests, no_budget, bad_month] {
        let req = test::TestRequest::post()
            .uri("/api/v1/recommend")
            .set_json(json!({ "profile": profile.clone() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", profile);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_profile", "{}", profile);
    }
}

#[actix_web::test]
async fn test_join_without_traveler_type_is_invalid_profile() {
    let app = init_app!();

    let req = test::TestRequest::post().uri("/api/v1/groups").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let code = body["code"].as_str().unwrap().to_string();

    let mut profile = ravi();
    profile.as_object_mut().unwrap().remove("travelerType");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/groups/{}/members", code))
        .set_json(profile)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_profile");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/groups/{}/members", code))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["members"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_single_member_group_reports_member_scores() {
    let app = init_app!();

    let req = test::TestRequest::post().uri("/api/v1/groups").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let code = body["code"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/groups/{}/members", code))
        .set_json(asha())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/groups/{}/generate", code))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let top = &body["results"][0];
    let members = top["memberScores"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["name"], "Asha");
    assert_eq!(members[0]["score"], top["score"]);

    // Solo responses carry no per-member scores
    let req = test::TestRequest::post()
        .uri("/api/v1/recommend")
        .set_json(json!({ "profile": asha() }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["results"][0].get("memberScores").is_none());
}
