#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send, token_for};
    use axum::{Router, http::StatusCode};
    use db::models::user::Model as UserModel;
    use serde_json::{Value, json};

    struct TestData {
        student: UserModel,
        admin: UserModel,
    }

    async fn setup_test_data(db: &sea_orm::DatabaseConnection) -> TestData {
        let student = UserModel::create(db, "22BCE10002", "student@vitbhopal.ac.in", false)
            .await
            .expect("Failed to create student");
        let admin = UserModel::create(db, "admin", "admin@vitbhopal.ac.in", true)
            .await
            .expect("Failed to create admin");
        TestData { student, admin }
    }

    async fn submit_dr_x(app: &Router, token: &str) -> i64 {
        let (status, json) = send(
            app,
            "POST",
            "/api/faculty/submit-addition",
            Some(token),
            Some(json!({ "name": "Dr. X", "email": "x@vitbhopal.ac.in", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["pendingUpdateId"].as_i64().unwrap()
    }

    async fn review(app: &Router, token: &str, action: &str, id: i64, notes: Option<&str>) -> (StatusCode, Value) {
        send(
            app,
            "POST",
            &format!("/api/faculty/{action}"),
            Some(token),
            Some(json!({ "pendingUpdateId": id, "notes": notes })),
        )
        .await
    }

    /// Test Case: Approving an addition creates the record and closes the proposal
    #[tokio::test]
    async fn test_approve_addition_creates_record() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let pending_id = submit_dr_x(&app, &token_for(&data.student)).await;

        let (status, json) = review(&app, &admin_token, "approve-addition", pending_id, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["name"], "Dr. X");
        assert_eq!(json["data"]["email"], "x@vitbhopal.ac.in");
        assert_eq!(json["data"]["cabin"], "A1");
        let faculty_id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = send(&app, "GET", &format!("/api/faculty/{faculty_id}"), Some(&admin_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Dr. X");

        let (_, json) = send(&app, "GET", "/api/faculty/pending-additions", Some(&admin_token), None).await;
        assert!(json["data"]["pendingAdditions"].as_array().unwrap().is_empty());

        let (_, json) = send(&app, "GET", "/api/faculty/my-submissions", Some(&token_for(&data.student)), None).await;
        let submissions = json["data"]["submissions"].as_array().unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0]["status"], "approved");
        assert_eq!(submissions[0]["reviewed_by"], data.admin.id);
    }

    /// Test Case: Approving an update changes only the proposed fields
    #[tokio::test]
    async fn test_approve_update_applies_changes() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let pending_id = submit_dr_x(&app, &token_for(&data.student)).await;
        let (_, json) = review(&app, &admin_token, "approve-addition", pending_id, None).await;
        let faculty_id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-update",
            Some(&token_for(&data.student)),
            Some(json!({ "facultyId": faculty_id, "name": "Dr. X", "cabin": "B2" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let update_id = json["data"]["pendingUpdateId"].as_i64().unwrap();

        let (_, json) = send(&app, "GET", "/api/faculty/pending-updates", Some(&admin_token), None).await;
        let pending = json["data"]["pendingUpdates"].as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["target_id"], faculty_id);
        assert_eq!(pending[0]["changes"], json!({ "cabin": { "old": "A1", "new": "B2" } }));

        let (status, json) = review(&app, &admin_token, "approve-update", update_id, Some("Checked")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["cabin"], "B2");
        assert_eq!(json["data"]["name"], "Dr. X");
    }

    /// Test Case: A rejected proposal cannot be approved afterwards
    #[tokio::test]
    async fn test_rejected_proposal_is_final() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let pending_id = submit_dr_x(&app, &token_for(&data.student)).await;

        let (status, json) = review(&app, &admin_token, "reject-addition", pending_id, Some("Not a faculty member")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "rejected");
        assert_eq!(json["data"]["notes"], "Not a faculty member");
        let rejected_at = json["data"]["reviewed_at"].clone();
        assert!(rejected_at.is_string());

        let (status, _) = review(&app, &admin_token, "approve-addition", pending_id, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, json) = send(&app, "GET", "/api/faculty", Some(&admin_token), None).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let (_, json) = send(&app, "GET", "/api/faculty/my-submissions", Some(&token_for(&data.student)), None).await;
        let submission = &json["data"]["submissions"][0];
        assert_eq!(submission["status"], "rejected");
        assert_eq!(submission["notes"], "Not a faculty member");
        assert_eq!(submission["reviewed_at"], rejected_at);
    }

    /// Test Case: Approving a second addition with a taken email is a conflict and stays pending
    #[tokio::test]
    async fn test_approve_duplicate_email_stays_pending() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let token = token_for(&data.student);

        let first_id = submit_dr_x(&app, &token).await;
        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty/submit-addition",
            Some(&token),
            Some(json!({ "name": "Dr. X Junior", "email": "x@vitbhopal.ac.in", "cabin": "B2" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let second_id = json["data"]["pendingUpdateId"].as_i64().unwrap();

        let (status, _) = review(&app, &admin_token, "approve-addition", first_id, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = review(&app, &admin_token, "approve-addition", second_id, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);

        let (_, json) = send(&app, "GET", "/api/faculty/pending-additions", Some(&admin_token), None).await;
        let pending = json["data"]["pendingAdditions"].as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["id"], second_id);
        assert_eq!(pending[0]["status"], "pending");

        let (_, json) = send(&app, "GET", "/api/faculty", Some(&admin_token), None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    /// Test Case: Rejecting after approval is not found
    #[tokio::test]
    async fn test_reject_after_approve_not_found() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let pending_id = submit_dr_x(&app, &token_for(&data.student)).await;

        let (status, _) = review(&app, &admin_token, "approve-addition", pending_id, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = review(&app, &admin_token, "reject-addition", pending_id, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    /// Test Case: An addition id is not reviewable through the update endpoints
    #[tokio::test]
    async fn test_review_wrong_scope_not_found() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let pending_id = submit_dr_x(&app, &token_for(&data.student)).await;

        let (status, _) = review(&app, &admin_token, "approve-update", pending_id, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, json) = send(&app, "GET", "/api/faculty/pending-additions", Some(&admin_token), None).await;
        assert_eq!(json["data"]["pendingAdditions"].as_array().unwrap().len(), 1);
    }

    /// Test Case: Non-admins cannot review or list the queue
    #[tokio::test]
    async fn test_review_requires_admin() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let token = token_for(&data.student);
        let pending_id = submit_dr_x(&app, &token).await;

        let (status, json) = review(&app, &token, "approve-addition", pending_id, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Admin access required");

        let (status, _) = send(&app, "GET", "/api/faculty/pending-additions", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    /// Test Case: Review notes longer than 1000 characters are refused
    #[tokio::test]
    async fn test_review_notes_too_long() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let admin_token = token_for(&data.admin);
        let pending_id = submit_dr_x(&app, &token_for(&data.student)).await;

        let notes = "x".repeat(1001);
        let (status, _) = review(&app, &admin_token, "reject-addition", pending_id, Some(&notes)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = send(&app, "GET", "/api/faculty/pending-additions", Some(&admin_token), None).await;
        assert_eq!(json["data"]["pendingAdditions"].as_array().unwrap().len(), 1);
    }
}
