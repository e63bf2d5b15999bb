//! Tests for land module
//!
//! These tests verify:
//! - Request validation
//! - Owner-scoped listing and creation
//! - Ownership checks on update/delete (404 vs 403)
//! - Pro-only detail reads

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::test_support::{
        TestApp, ALICE_ID, ALICE_TOKEN, BOB_ID, BOB_TOKEN,
    };
    use crate::common::Validator;
    use crate::profile::ProfileService;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    async fn create_plot(app: &TestApp, token: &str, name: &str) -> String {
        let (status, body) = app
            .call(
                Method::POST,
                "/api/land",
                Some(token),
                Some(json!({ "name": name, "latitude": 6.5, "longitude": 3.4 })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_create_validation() {
        let ok = models::CreateLandRequest {
            name: Some("North Field".into()),
            latitude: Some(-33.9),
            longitude: Some(151.2),
            soil_health: None,
        };
        assert!(validators::CreateLandValidator.validate(&ok).is_valid);

        let missing_name = models::CreateLandRequest {
            name: Some("   ".into()),
            ..Default::default()
        };
        let result = validators::CreateLandValidator.validate(&missing_name);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "name");

        let bad_coords = models::CreateLandRequest {
            name: Some("Plot".into()),
            latitude: Some(91.0),
            longitude: Some(-181.0),
            soil_health: None,
        };
        assert_eq!(
            validators::CreateLandValidator.validate(&bad_coords).errors.len(),
            2
        );
    }

    #[test]
    fn test_update_validation_allows_partial() {
        let empty = models::UpdateLandRequest::default();
        assert!(validators::UpdateLandValidator.validate(&empty).is_valid);

        let blank_name = models::UpdateLandRequest {
            name: Some("".into()),
            ..Default::default()
        };
        assert!(!validators::UpdateLandValidator.validate(&blank_name).is_valid);
    }

    #[tokio::test]
    async fn test_create_then_list_returns_record() {
        let app = TestApp::new().await;

        let (status, body) = app
            .call(
                Method::POST,
                "/api/land",
                Some(ALICE_TOKEN),
                Some(json!({ "name": "Plot A", "soil_health": "good" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user_id"], ALICE_ID);
        assert_eq!(body["name"], "Plot A");
        assert_eq!(body["soil_health"], "good");
        assert!(body["latitude"].is_null());

        let (status, list) = app
            .call(Method::GET, "/api/land", Some(ALICE_TOKEN), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], body["id"]);
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_newest_first() {
        let app = TestApp::new().await;
        let first = create_plot(&app, ALICE_TOKEN, "First").await;
        let second = create_plot(&app, ALICE_TOKEN, "Second").await;
        create_plot(&app, BOB_TOKEN, "Bob's").await;

        let (_, list) = app
            .call(Method::GET, "/api/land", Some(ALICE_TOKEN), None)
            .await;
        let ids: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_name() {
        let app = TestApp::new().await;

        let (status, body) = app
            .call(
                Method::POST,
                "/api/land",
                Some(ALICE_TOKEN),
                Some(json!({ "latitude": 10.0 })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (_, list) = app
            .call(Method::GET, "/api/land", Some(ALICE_TOKEN), None)
            .await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_string_coordinates() {
        let app = TestApp::new().await;

        let (status, body) = app
            .call(
                Method::POST,
                "/api/land",
                Some(ALICE_TOKEN),
                Some(json!({ "name": "River plot", "latitude": "6.45", "longitude": "" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["latitude"], 6.45);
        assert!(body["longitude"].is_null());
    }

    #[tokio::test]
    async fn test_mistyped_body_is_json_bad_request() {
        let app = TestApp::new().await;

        let (status, body) = app
            .call(
                Method::POST,
                "/api/land",
                Some(ALICE_TOKEN),
                Some(json!({ "name": ["not", "a", "string"] })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_owner_updates_supplied_fields_only() {
        let app = TestApp::new().await;
        let id = create_plot(&app, ALICE_TOKEN, "Plot A").await;

        let (status, body) = app
            .call(
                Method::PUT,
                &format!("/api/land/{}", id),
                Some(ALICE_TOKEN),
                Some(json!({ "soil_health": "poor" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Plot A");
        assert_eq!(body["soil_health"], "poor");
        assert_eq!(body["latitude"], 6.5);
    }

    #[tokio::test]
    async fn test_non_owner_update_is_forbidden_and_unchanged() {
        let app = TestApp::new().await;
        let id = create_plot(&app, ALICE_TOKEN, "Plot A").await;

        let (status, body) = app
            .call(
                Method::PUT,
                &format!("/api/land/{}", id),
                Some(BOB_TOKEN),
                Some(json!({ "name": "Hijacked" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden");

        let row = LandService::new(app.db.clone()).get(&id).await.unwrap().unwrap();
        assert_eq!(row.name, "Plot A");
        assert_eq!(row.user_id, ALICE_ID);
    }

    #[tokio::test]
    async fn test_ownership_is_checked_before_validation() {
        let app = TestApp::new().await;
        let id = create_plot(&app, ALICE_TOKEN, "Plot A").await;

        let (status, _) = app
            .call(
                Method::PUT,
                &format!("/api/land/{}", id),
                Some(BOB_TOKEN),
                Some(json!({ "latitude": 500.0 })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let app = TestApp::new().await;

        let (status, body) = app
            .call(
                Method::PUT,
                "/api/land/LD-NOPE0000",
                Some(ALICE_TOKEN),
                Some(json!({ "name": "x" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");

        let (status, _) = app
            .call(Method::DELETE, "/api/land/LD-NOPE0000", Some(ALICE_TOKEN), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_by_owner_and_non_owner() {
        let app = TestApp::new().await;
        let id = create_plot(&app, ALICE_TOKEN, "Plot A").await;
        let uri = format!("/api/land/{}", id);

        let (status, _) = app.call(Method::DELETE, &uri, Some(BOB_TOKEN), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app.call(Method::DELETE, &uri, Some(ALICE_TOKEN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (_, list) = app
            .call(Method::GET, "/api/land", Some(ALICE_TOKEN), None)
            .await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pro_details_require_pro_tier() {
        let app = TestApp::new().await;
        let id = create_plot(&app, ALICE_TOKEN, "Plot A").await;

        sqlx::query(
            "INSERT INTO crop_tracking (id, land_id, crop_name, yield_amount, yield_unit) VALUES (?, ?, ?, ?, ?)",
        )
        .bind("CR-00000001")
        .bind(&id)
        .bind("maize")
        .bind(1.5)
        .bind("t")
        .execute(&app.db)
        .await
        .unwrap();

        let uri = format!("/api/land/{}/crops", id);

        let (status, body) = app.call(Method::GET, &uri, Some(ALICE_TOKEN), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Pro subscription required");

        ProfileService::new(app.db.clone())
            .promote_to_pro(ALICE_ID, "2026-01-01T00:00:00Z")
            .await
            .unwrap();

        let (status, body) = app.call(Method::GET, &uri, Some(ALICE_TOKEN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["crop_name"], "maize");

        let (status, body) = app
            .call(Method::GET, &format!("/api/land/{}/images", id), Some(ALICE_TOKEN), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pro_details_still_check_ownership() {
        let app = TestApp::new().await;
        let id = create_plot(&app, ALICE_TOKEN, "Plot A").await;

        ProfileService::new(app.db.clone())
            .promote_to_pro(BOB_ID, "2026-01-01T00:00:00Z")
            .await
            .unwrap();

        let (status, _) = app
            .call(
                Method::GET,
                &format!("/api/land/{}/documents", id),
                Some(BOB_TOKEN),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_details() {
        let app = TestApp::new().await;
        let id = create_plot(&app, ALICE_TOKEN, "Plot A").await;

        sqlx::query("INSERT INTO land_images (id, land_id, image_url) VALUES (?, ?, ?)")
            .bind("IM-00000001")
            .bind(&id)
            .bind("https://cdn.test/a.png")
            .execute(&app.db)
            .await
            .unwrap();

        LandService::new(app.db.clone())
            .delete(&id, ALICE_ID)
            .await
            .unwrap();

        let images = LandService::new(app.db.clone()).images(&id).await.unwrap();
        assert!(images.is_empty());
    }
}
