#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send, token_for};
    use axum::{Router, http::StatusCode};
    use db::models::user::Model as UserModel;
    use serde_json::json;

    struct TestData {
        student: UserModel,
        admin: UserModel,
    }

    async fn setup_test_data(db: &sea_orm::DatabaseConnection) -> TestData {
        let student = UserModel::create(db, "22BCE10004", "student@vitbhopal.ac.in", false)
            .await
            .expect("Failed to create student");
        let admin = UserModel::create(db, "admin", "admin@vitbhopal.ac.in", true)
            .await
            .expect("Failed to create admin");
        TestData { student, admin }
    }

    async fn create_event(app: &Router, admin_token: &str) -> i64 {
        let (status, json) = send(
            app,
            "POST",
            "/api/events",
            Some(admin_token),
            Some(json!({
                "title": "Old Title",
                "date": "2024-12-05",
                "venue": "Auditorium",
                "category": "technical",
                "contactEmail": "club@vitbhopal.ac.in"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_i64().unwrap()
    }

    /// Test Case: Only the title differs when the date is resubmitted as a timestamp
    #[tokio::test]
    async fn test_submit_update_keeps_only_changed_fields() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let event_id = create_event(&app, &admin_token).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/events/submit-update",
            Some(&token_for(&data.student)),
            Some(json!({
                "eventId": event_id,
                "title": "New Title",
                "date": "2024-12-05T00:00:00.000Z",
                "venue": "Auditorium",
                "category": "technical"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, json) = send(&app, "GET", "/api/events/pending-updates", Some(&admin_token), None).await;
        let pending = json["data"]["pendingUpdates"].as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(
            pending[0]["changes"],
            json!({ "title": { "old": "Old Title", "new": "New Title" } })
        );
    }

    /// Test Case: Approved event update is applied to the record
    #[tokio::test]
    async fn test_approve_event_update() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let event_id = create_event(&app, &admin_token).await;

        let (_, json) = send(
            &app,
            "POST",
            "/api/events/submit-update",
            Some(&token_for(&data.student)),
            Some(json!({ "eventId": event_id, "date": "2024-12-06", "venue": "Open Air Theatre" })),
        )
        .await;
        let update_id = json["data"]["pendingUpdateId"].as_i64().unwrap();

        let (status, json) = send(
            &app,
            "POST",
            "/api/events/approve-update",
            Some(&admin_token),
            Some(json!({ "pendingUpdateId": update_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["date"], "2024-12-06");
        assert_eq!(json["data"]["venue"], "Open Air Theatre");
        assert_eq!(json["data"]["title"], "Old Title");
    }

    /// Test Case: Update to a deleted event cannot be approved and stays pending
    #[tokio::test]
    async fn test_approve_update_for_deleted_event() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let event_id = create_event(&app, &admin_token).await;

        let (_, json) = send(
            &app,
            "POST",
            "/api/events/submit-update",
            Some(&token_for(&data.student)),
            Some(json!({ "eventId": event_id, "title": "Renamed" })),
        )
        .await;
        let update_id = json["data"]["pendingUpdateId"].as_i64().unwrap();

        let (status, _) = send(&app, "DELETE", &format!("/api/events/{event_id}"), Some(&admin_token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(
            &app,
            "POST",
            "/api/events/approve-update",
            Some(&admin_token),
            Some(json!({ "pendingUpdateId": update_id })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], format!("Event {event_id} not found"));

        let (_, json) = send(&app, "GET", "/api/events/pending-updates", Some(&admin_token), None).await;
        assert_eq!(json["data"]["pendingUpdates"].as_array().unwrap().len(), 1);
    }

    /// Test Case: Unknown category value is a bad request
    #[tokio::test]
    async fn test_submit_addition_unknown_category() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/events/submit-addition",
            Some(&token_for(&data.student)),
            Some(json!({
                "title": "Hackathon",
                "date": "2025-01-20",
                "venue": "Lab 1",
                "category": "gaming",
                "contactEmail": "club@vitbhopal.ac.in"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("category"));

        let (_, json) = send(&app, "GET", "/api/me/update-quota", Some(&token_for(&data.student)), None).await;
        assert_eq!(json["data"]["used"], 0);
    }

    /// Test Case: Unparseable date is a bad request in the usual envelope
    #[tokio::test]
    async fn test_submit_addition_unparseable_date() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/events/submit-addition",
            Some(&token_for(&data.student)),
            Some(json!({
                "title": "Hackathon",
                "date": "next tuesday",
                "venue": "Lab 1",
                "category": "technical",
                "contactEmail": "club@vitbhopal.ac.in"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].is_string());
    }

    /// Test Case: Faculty and event proposals draw from the same quota
    #[tokio::test]
    async fn test_quota_shared_with_faculty() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let token = token_for(&data.student);

        for i in 0..3 {
            let (status, _) = send(
                &app,
                "POST",
                "/api/faculty/submit-addition",
                Some(&token),
                Some(json!({
                    "name": format!("Dr. {i}"),
                    "email": format!("f{i}@vitbhopal.ac.in"),
                    "cabin": "A1"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        for i in 0..2 {
            let (status, _) = send(
                &app,
                "POST",
                "/api/events/submit-addition",
                Some(&token),
                Some(json!({
                    "title": format!("Talk {i}"),
                    "date": "2025-01-20",
                    "venue": "Lab 1",
                    "category": "workshop",
                    "contactEmail": "club@vitbhopal.ac.in"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, json) = send(
            &app,
            "POST",
            "/api/events/submit-addition",
            Some(&token),
            Some(json!({
                "title": "One Too Many",
                "date": "2025-01-21",
                "venue": "Lab 1",
                "category": "workshop",
                "contactEmail": "club@vitbhopal.ac.in"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["data"]["limit"], 5);
        assert!(json["data"]["resetTime"].is_string());
    }
}
