mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::Fixture;
use community_portal::app;
use serde_json::{json, Value};

async fn server() -> (TestServer, Fixture) {
    let fx = Fixture::sqlite(true).await;
    let server = TestServer::new(app::api_routes(&fx.services)).unwrap();
    (server, fx)
}

#[tokio::test]
async fn test_list_areas() {
    let (server, _fx) = server().await;

    let response = server.get("/api/areas").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
    assert_eq!(body["meta"]["total"], 7);
    assert_eq!(body["data"][0]["name"], "Arts & Culture");
}

#[tokio::test]
async fn test_unknown_area_is_404() {
    let (server, _fx) = server().await;

    let response = server.get("/api/areas/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Area 9999 not found");
}

#[tokio::test]
async fn test_area_events_and_overview() {
    let (server, fx) = server().await;
    let social = fx.category_id("Social Services").await;

    let response = server
        .get(&format!("/api/areas/{social}/events?upcoming=true"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"][0]["title"], "Annual Local Community Fair");
    assert_eq!(body["meta"]["total"], 1);

    let body: Value = server.get("/api/areas/overview").await.json();
    let areas = body["data"].as_array().unwrap();
    assert_eq!(areas.len(), 7);
    assert!(areas
        .iter()
        .all(|a| a["upcoming_events"].as_array().unwrap().len() <= 3));

    let body: Value = server.get("/api/areas/event-counts").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_event_filters() {
    let (server, _fx) = server().await;

    let body: Value = server.get("/api/events").await.json();
    assert_eq!(body["meta"]["total"], 4);

    let body: Value = server.get("/api/events?featured=true").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["featured"], true);

    let body: Value = server.get("/api/events?upcoming=true&limit=2").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let body: Value = server
        .get("/api/events?from=2025-08-18&to=2025-08-20")
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let body: Value = server.get("/api/events?location=arts%20center").await.json();
    assert_eq!(body["data"][0]["title"], "Art Workshop");

    let body: Value = server.get("/api/events/upcoming").await.json();
    assert_eq!(body["meta"]["total"], 4);

    server
        .get("/api/events?from=2025-08-18")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_event_crud() {
    let (server, fx) = server().await;
    let arts = fx.category_id("Arts & Culture").await;

    let response = server
        .post("/api/events")
        .json(&json!({
            "title": "  Open Mic  ",
            "date": "2025-03-14",
            "start_time": "19:30:00",
            "location": "The Old Library",
            "description": "   ",
            "category_id": arts
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["title"], "Open Mic");
    assert_eq!(body["data"]["description"], Value::Null);
    assert_eq!(body["data"]["category_name"], "Arts & Culture");

    let response = server
        .put(&format!("/api/events/{id}"))
        .json(&json!({ "title": "Open Mic Night", "date": "2025-03-21" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["date"], "2025-03-21");
    assert_eq!(body["data"]["category_id"], Value::Null);

    server
        .put("/api/events/9999")
        .json(&json!({ "title": "Nowhere", "date": "2025-03-21" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .delete(&format!("/api/events/{id}"))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/events/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/api/events/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_event_validation() {
    let (server, _fx) = server().await;

    let response = server
        .post("/api/events")
        .json(&json!({
            "title": "Backwards",
            "date": "2025-03-14",
            "start_time": "20:00:00",
            "end_time": "18:00:00"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    server
        .post("/api/events")
        .json(&json!({ "title": "", "date": "2025-03-14" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/events")
        .json(&json!({ "title": "Orphan", "date": "2025-03-14", "category_id": 4242 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/events")
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON syntax"));
}

#[tokio::test]
async fn test_whitespace_only_required_fields_are_rejected() {
    let (server, _fx) = server().await;

    server
        .post("/api/events")
        .json(&json!({ "title": "   ", "date": "2025-03-14" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/areas")
        .json(&json!({ "name": "  " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": "   ",
            "email": "jane@example.com",
            "subject": "   ",
            "message": "   "
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let message = response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .to_string();
    for field in ["name", "subject", "message"] {
        assert!(message.contains(&format!("{field}: ")), "{message}");
    }

    let body: Value = server.get("/api/messages").await.json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_area_crud_detaches_events() {
    let (server, fx) = server().await;
    let arts = fx.category_id("Arts & Culture").await;

    server
        .post("/api/areas")
        .json(&json!({ "name": "Arts & Culture" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/areas")
        .json(&json!({ "name": "Youth Clubs", "description": "After-school clubs" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/areas/{id}"))
        .json(&json!({ "name": "Youth & Family Clubs" }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["data"]["name"],
        "Youth & Family Clubs"
    );

    server
        .delete(&format!("/api/areas/{arts}"))
        .await
        .assert_status_ok();

    let body: Value = server.get("/api/events?location=community%20center").await.json();
    assert_eq!(body["data"][0]["title"], "Community Movie Night");
    assert_eq!(body["data"][0]["category_id"], Value::Null);
    assert_eq!(body["data"][0]["category_name"], Value::Null);
}

#[tokio::test]
async fn test_search_envelope() {
    let (server, _fx) = server().await;

    let response = server.get("/api/search?q=farmers").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["query"], "farmers");
    assert_eq!(body["data"]["category_id"], Value::Null);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["results"][0]["type"], "event");
    assert_eq!(body["data"]["results"][0]["title"], "Farmers Market");

    let body: Value = server.get("/api/search?q=arts").await.json();
    assert_eq!(body["data"]["results"][0]["type"], "area");

    let body: Value = server.get("/api/search").await.json();
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_contact_form() {
    let (server, _fx) = server().await;

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "",
            "subject": "Volunteering",
            "area": "Social Services",
            "message": "I'd like to help at the fair.",
            "newsletter": "on"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["subject"], "Volunteering");
    assert!(body["data"].get("email").is_none());

    server
        .post("/api/contact")
        .json(&json!({
            "name": "Bad",
            "email": "not-an-email",
            "subject": "S",
            "message": "M"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body: Value = server.get("/api/messages").await.json();
    let messages = body["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["area"], "Social Services");
    for hidden in ["name", "email", "phone", "message"] {
        assert!(messages[0].get(hidden).is_none());
    }
}

#[tokio::test]
async fn test_home_stats_and_health() {
    let (server, _fx) = server().await;

    let body: Value = server.get("/api/home").await.json();
    let home = &body["data"];
    assert_eq!(home["featured_events"].as_array().unwrap().len(), 1);
    assert_eq!(home["upcoming_events"].as_array().unwrap().len(), 4);
    assert_eq!(home["areas"].as_array().unwrap().len(), 7);
    assert!(home["areas"]
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["upcoming_events"].as_array().unwrap().len() <= 2));
    assert_eq!(home["stats"]["total_events"], 4);

    let body: Value = server.get("/api/stats").await.json();
    assert_eq!(body["data"]["upcoming_events"], 4);
    assert_eq!(body["data"]["past_events"], 0);

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["backend"], "sqlite");
    assert_eq!(body["foreign_keys_enabled"], true);
}
