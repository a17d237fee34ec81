//! End-to-end tests for `/api/pets` against an in-memory database.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Local};
use common::{pet_json, TestApp};
use serde_json::json;

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_with_assigned_id() {
    let app = TestApp::new().await;

    let (status, body) = app.post_json("/api/pets", &pet_json("Rex", &["Rabies"])).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Successfully registered new Pet");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["name"], "Rex");
    assert_eq!(body["data"]["species"], "DOG");
    assert_eq!(body["data"]["ownerEmail"], "alice@example.com");
    assert_eq!(body["data"]["vaccines"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["vaccines"][0]["name"], "Rabies");
    assert_eq!(body["data"]["vaccines"][0]["dateGiven"], "2024-01-01");
}

#[tokio::test]
async fn test_create_notifies_owner() {
    let app = TestApp::new().await;

    app.create(&pet_json("Rex", &[])).await;

    let sent = app.notifier.sent.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![("alice@example.com".to_string(), "Rex".to_string())]
    );
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = TestApp::new().await;
    let mut pet = pet_json("Rex", &[]);
    pet["id"] = json!(77);

    let id = app.create(&pet).await;

    assert_ne!(id, 77);
}

#[tokio::test]
async fn test_create_without_vaccines() {
    let app = TestApp::new().await;
    let mut pet = pet_json("Tom", &[]);
    pet.as_object_mut().unwrap().remove("vaccines");
    pet["species"] = json!("cat");

    let (status, body) = app.post_json("/api/pets", &pet).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["species"], "CAT");
    assert_eq!(body["data"]["vaccines"], json!([]));
}

#[tokio::test]
async fn test_create_rejects_short_contact() {
    let app = TestApp::new().await;
    let mut pet = pet_json("Rex", &[]);
    pet["ownerContact"] = json!("12345");

    let (status, body) = app.post_json("/api/pets", &pet).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["data"]["ownerContact"].is_string());
    assert!(app.notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let app = TestApp::new().await;
    let body = json!({
        "name": "",
        "species": "DOG",
        "ownerName": "Alice",
        "ownerContact": "1234567890",
        "ownerEmail": "not-an-email",
        "vaccines": [{ "name": "", "dateGiven": null }],
    });

    let (status, body) = app.post_json("/api/pets", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = body["data"].as_object().unwrap();
    assert!(fields.contains_key("name"));
    assert!(fields.contains_key("ownerEmail"));
    assert!(fields.contains_key("vaccines[0].name"));
    assert!(fields.contains_key("vaccines[0].dateGiven"));
    assert!(!fields.contains_key("ownerContact"));
}

#[tokio::test]
async fn test_create_rejects_malformed_email() {
    let app = TestApp::new().await;

    for email in ["a..b@x.com", "a,b@x.com", "a@x_y!.com"] {
        let mut pet = pet_json("Rex", &[]);
        pet["ownerEmail"] = json!(email);

        let (status, body) = app.post_json("/api/pets", &pet).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
        assert!(body["data"]["ownerEmail"].is_string(), "{email}");
    }
    assert!(app.notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_rejects_missing_species() {
    let app = TestApp::new().await;
    let mut pet = pet_json("Rex", &[]);
    pet.as_object_mut().unwrap().remove("species");

    let (status, body) = app.post_json("/api/pets", &pet).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["species"].is_string());
}

#[tokio::test]
async fn test_create_rejects_future_vaccination() {
    let app = TestApp::new().await;
    let tomorrow = Local::now().date_naive() + Duration::days(1);
    let mut pet = pet_json("Rex", &[]);
    pet["vaccines"] = json!([{ "name": "Rabies", "dateGiven": tomorrow.to_string() }]);

    let (status, body) = app.post_json("/api/pets", &pet).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["vaccines[0].dateGiven"].is_string());
}

#[tokio::test]
async fn test_create_accepts_vaccination_today() {
    let app = TestApp::new().await;
    let today = Local::now().date_naive();
    let mut pet = pet_json("Rex", &[]);
    pet["vaccines"] = json!([{ "name": "Rabies", "dateGiven": today.to_string() }]);

    let (status, _) = app.post_json("/api/pets", &pet).await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_raw("POST", "/api/pets", "{ \"name\": ".to_string())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Malformed JSON request or unreadable message. Please check your input."
    );
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_unknown_species_is_malformed() {
    let app = TestApp::new().await;
    let mut pet = pet_json("Rex", &[]);
    pet["species"] = json!("UNICORN");

    let (status, body) = app.post_json("/api/pets", &pet).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Malformed JSON request or unreadable message. Please check your input."
    );
}

#[tokio::test]
async fn test_missing_content_type_is_400() {
    let app = TestApp::new().await;
    let request = Request::post("/api/pets")
        .body(Body::from(pet_json("Rex", &[]).to_string()))
        .unwrap();

    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_list_reports_count() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/pets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully retrieved all 0 pets details");
    assert_eq!(body["data"], json!([]));

    app.create(&pet_json("Rex", &["Rabies"])).await;
    app.create(&pet_json("Tom", &[])).await;

    let (_, body) = app.get("/api/pets").await;
    assert_eq!(body["message"], "Successfully retrieved all 2 pets details");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_by_id() {
    let app = TestApp::new().await;
    let id = app.create(&pet_json("Rex", &["Rabies", "Parvo"])).await;

    let (status, body) = app.get(&format!("/api/pets/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Fetched Pet details with pet Id: {id}"));
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["vaccines"][1]["name"], "Parvo");
}

#[tokio::test]
async fn test_get_missing_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/pets/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pet with ID: 999 was not found.");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/pets/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Malformed JSON request or unreadable message. Please check your input."
    );
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_replaces_record() {
    let app = TestApp::new().await;
    let id = app.create(&pet_json("Rex", &["Rabies", "Parvo"])).await;

    let mut replacement = pet_json("Max", &["Distemper"]);
    replacement["breed"] = json!(null);
    let (status, body) = app
        .put_json(&format!("/api/pets/{id}"), &replacement)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Pet updated successfully");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["name"], "Max");
    assert!(body["data"]["breed"].is_null());
    assert_eq!(body["data"]["vaccines"].as_array().unwrap().len(), 1);

    let (_, body) = app.get(&format!("/api/pets/{id}")).await;
    assert_eq!(body["data"]["name"], "Max");
    assert_eq!(body["data"]["vaccines"][0]["name"], "Distemper");
}

#[tokio::test]
async fn test_update_missing_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.put_json("/api/pets/42", &pet_json("Rex", &[])).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pet with ID: 42 was not found.");

    let (_, body) = app.get("/api/pets").await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = TestApp::new().await;
    let mut pet = pet_json("Rex", &[]);
    pet["ownerEmail"] = json!("nope");

    let (status, body) = app.put_json("/api/pets/42", &pet).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["ownerEmail"].is_string());
}

#[tokio::test]
async fn test_update_does_not_notify() {
    let app = TestApp::new().await;
    let id = app.create(&pet_json("Rex", &[])).await;

    app.put_json(&format!("/api/pets/{id}"), &pet_json("Max", &[]))
        .await;

    assert_eq!(app.notifier.sent.lock().unwrap().len(), 1);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = TestApp::new().await;
    let id = app.create(&pet_json("Rex", &["Rabies"])).await;
    let uri = format!("/api/pets/{id}");

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Pet with ID: {id} was not found."));
}

#[tokio::test]
async fn test_deleted_id_is_not_reused() {
    let app = TestApp::new().await;
    let first = app.create(&pet_json("Rex", &[])).await;
    app.delete(&format!("/api/pets/{first}")).await;

    let second = app.create(&pet_json("Tom", &[])).await;

    assert!(second > first);
}

// =============================================================================
// Vaccination search
// =============================================================================

#[tokio::test]
async fn test_vaccinated_search_ignores_case() {
    let app = TestApp::new().await;
    let rex = app.create(&pet_json("Rex", &["Rabies"])).await;
    app.create(&pet_json("Tom", &["Parvo"])).await;

    let (status, body) = app.get("/api/pets/vaccinated/RABIES").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Fetched all pet details with vaccination: RABIES"
    );
    let pets = body["data"].as_array().unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0]["id"], rex);
}

#[tokio::test]
async fn test_vaccinated_search_lists_each_pet_once() {
    let app = TestApp::new().await;
    app.create(&pet_json("Rex", &["Rabies", "rabies"])).await;

    let (_, body) = app.get("/api/pets/vaccinated/rabies").await;

    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_vaccinated_search_decodes_path() {
    let app = TestApp::new().await;
    app.create(&pet_json("Tom", &["Feline Leukemia"])).await;

    let (status, body) = app
        .get("/api/pets/vaccinated/feline%20leukemia")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_vaccinated_search_without_matches() {
    let app = TestApp::new().await;
    app.create(&pet_json("Rex", &["Rabies"])).await;

    let (status, body) = app.get("/api/pets/vaccinated/Lepto").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

// =============================================================================
// Unmatched requests
// =============================================================================

#[tokio::test]
async fn test_unknown_path_returns_envelope() {
    let app = TestApp::new().await;

    for uri in ["/api/pets/", "/api/owners", "/nowhere"] {
        let (status, body) = app.get(uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["message"].is_string(), "{uri}");
        assert!(body["data"].is_null(), "{uri}");
    }
}

#[tokio::test]
async fn test_unsupported_method_returns_envelope() {
    let app = TestApp::new().await;
    let request = Request::patch("/api/pets/1").body(Body::empty()).unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body["message"],
        "Request method not supported for this resource"
    );
    assert!(body["data"].is_null());
}
