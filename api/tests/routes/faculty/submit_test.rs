#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send, token_for};
    use axum::http::StatusCode;
    use db::models::faculty::Model as FacultyModel;
    use db::models::user::Model as UserModel;
    use serde_json::json;

    struct TestData {
        student: UserModel,
        admin: UserModel,
    }

    async fn setup_test_data(db: &sea_orm::DatabaseConnection) -> TestData {
        let student = UserModel::create(db, "22BCE10001", "student@vitbhopal.ac.in", false)
            .await
            .expect("Failed to create student");
        let admin = UserModel::create(db, "admin", "admin@vitbhopal.ac.in", true)
            .await
            .expect("Failed to create admin");
        TestData { student, admin }
    }

    /// Test Case: Addition is stored as a pending proposal with null old values
    #[tokio::test]
    async fn test_submit_addition_creates_pending_proposal() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let token = token_for(&data.student);

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-addition",
            Some(&token),
            Some(json!({ "name": "Dr. X", "email": "x@vitbhopal.ac.in", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        let pending_id = json["data"]["pendingUpdateId"].as_i64().unwrap();

        let admin_token = token_for(&data.admin);
        let (status, json) = send(&app, "GET", "/api/faculty/pending-additions", Some(&admin_token), None).await;
        assert_eq!(status, StatusCode::OK);

        let pending = json["data"]["pendingAdditions"].as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["id"], pending_id);
        assert_eq!(pending[0]["kind"], "addition");
        assert_eq!(pending[0]["status"], "pending");
        assert_eq!(pending[0]["submitted_by"], data.student.id);
        assert_eq!(pending[0]["changes"]["name"], json!({ "old": null, "new": "Dr. X" }));
        assert_eq!(pending[0]["changes"]["cabin"], json!({ "old": null, "new": "A1" }));
    }

    /// Test Case: Missing required field is a 400 and uses no quota
    #[tokio::test]
    async fn test_submit_addition_missing_required_field() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let token = token_for(&data.student);

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-addition",
            Some(&token),
            Some(json!({ "name": "Dr. X", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("email"));

        let (_, json) = send(&app, "GET", "/api/me/update-quota", Some(&token), None).await;
        assert_eq!(json["data"]["used"], 0);
    }

    /// Test Case: Malformed email is rejected
    #[tokio::test]
    async fn test_submit_addition_invalid_email() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/faculty/submit-addition",
            Some(&token_for(&data.student)),
            Some(json!({ "name": "Dr. X", "email": "nope", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    /// Test Case: Submitting without a token is unauthorized
    #[tokio::test]
    async fn test_submit_addition_requires_auth() {
        let (app, _state) = make_test_app().await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-addition",
            None,
            Some(json!({ "name": "Dr. X", "email": "x@vitbhopal.ac.in", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Authentication required");
    }

    /// Test Case: Update with only unchanged values is refused
    #[tokio::test]
    async fn test_submit_update_no_changes() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty",
            Some(&admin_token),
            Some(json!({ "name": "Dr. X", "email": "x@vitbhopal.ac.in", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let faculty_id = json["data"]["id"].as_i64().unwrap();

        let token = token_for(&data.student);
        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-update",
            Some(&token),
            Some(json!({ "facultyId": faculty_id, "name": "Dr. X", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "No changes detected");

        let (_, json) = send(&app, "GET", "/api/faculty/pending-updates", Some(&admin_token), None).await;
        assert!(json["data"]["pendingUpdates"].as_array().unwrap().is_empty());
    }

    /// Test Case: Update without a target id is a bad request
    #[tokio::test]
    async fn test_submit_update_missing_target_id() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-update",
            Some(&token_for(&data.student)),
            Some(json!({ "cabin": "B2" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("targetId"));
    }

    /// Test Case: Update against a record that does not exist
    #[tokio::test]
    async fn test_submit_update_unknown_target() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-update",
            Some(&token_for(&data.student)),
            Some(json!({ "targetId": 999, "cabin": "B2" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Faculty 999 not found");
    }

    /// Test Case: Sixth submission inside 24 hours is rate limited
    #[tokio::test]
    async fn test_sixth_submission_is_rate_limited() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let token = token_for(&data.student);

        for i in 0..5 {
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

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-addition",
            Some(&token),
            Some(json!({ "name": "Dr. 6", "email": "f6@vitbhopal.ac.in", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["limit"], 5);

        let student = UserModel::find_by_id(app_state.db(), data.student.id)
            .await
            .unwrap()
            .unwrap();
        let window_start = student.last_update_date.unwrap();
        let reset: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(json["data"]["resetTime"].clone()).unwrap();
        assert_eq!(reset, window_start + chrono::Duration::hours(24));
        assert_eq!(student.update_count, 5);
    }

    /// Test Case: Duplicate faculty email is a conflict
    #[tokio::test]
    async fn test_submit_addition_duplicate_email() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        FacultyModel::create_from_changes(
            app_state.db(),
            &db::models::changes::FacultyChanges {
                name: Some(db::models::changes::FieldChange::added("Dr. X".into())),
                email: Some(db::models::changes::FieldChange::added("x@vitbhopal.ac.in".into())),
                cabin: Some(db::models::changes::FieldChange::added("A1".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let (status, _) = send(
            &app,
            "POST",
            "/api/faculty/submit-addition",
            Some(&token_for(&data.student)),
            Some(json!({ "name": "Dr. Y", "email": "x@vitbhopal.ac.in", "cabin": "B2" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
