#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send, token_for};
    use axum::http::StatusCode;
    use db::models::user::Model as UserModel;
    use serde_json::json;

    async fn admin_and_student(db: &sea_orm::DatabaseConnection) -> (UserModel, UserModel) {
        let admin = UserModel::create(db, "admin", "admin@vitbhopal.ac.in", true)
            .await
            .expect("Failed to create admin");
        let student = UserModel::create(db, "22BCE10003", "student@vitbhopal.ac.in", false)
            .await
            .expect("Failed to create student");
        (admin, student)
    }

    /// Test Case: Admin create, update, read and delete of a faculty record
    #[tokio::test]
    async fn test_admin_record_lifecycle() {
        let (app, app_state) = make_test_app().await;
        let (admin, _) = admin_and_student(app_state.db()).await;
        let token = token_for(&admin);

        let (status, json) = send(
            &app,
            "POST",
            "/api/faculty",
            Some(&token),
            Some(json!({
                "name": "Dr. Y",
                "email": "y@vitbhopal.ac.in",
                "cabin": "C3",
                "department": "SCSE"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json["data"]["id"].as_i64().unwrap();
        assert_eq!(json["data"]["department"], "SCSE");

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/faculty/{id}"),
            Some(&token),
            Some(json!({ "designation": "Professor" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["designation"], "Professor");
        assert_eq!(json["data"]["cabin"], "C3");

        let (status, json) = send(&app, "GET", "/api/faculty", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "DELETE", &format!("/api/faculty/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(&app, "GET", &format!("/api/faculty/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], format!("Faculty {id} not found"));

        let (status, _) = send(&app, "DELETE", &format!("/api/faculty/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Test Case: Students can read records but not write them directly
    #[tokio::test]
    async fn test_student_cannot_write_records() {
        let (app, app_state) = make_test_app().await;
        let (_, student) = admin_and_student(app_state.db()).await;
        let token = token_for(&student);

        let (status, json) = send(&app, "GET", "/api/faculty", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"].as_array().unwrap().is_empty());

        let (status, _) = send(
            &app,
            "POST",
            "/api/faculty",
            Some(&token),
            Some(json!({ "name": "Dr. Z", "email": "z@vitbhopal.ac.in", "cabin": "D4" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    /// Test Case: Reading records requires a token
    #[tokio::test]
    async fn test_list_requires_auth() {
        let (app, _state) = make_test_app().await;
        let (status, _) = send(&app, "GET", "/api/faculty", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Direct create with a taken email is a conflict
    #[tokio::test]
    async fn test_admin_create_duplicate_email() {
        let (app, app_state) = make_test_app().await;
        let (admin, _) = admin_and_student(app_state.db()).await;
        let token = token_for(&admin);
        let body = json!({ "name": "Dr. Y", "email": "y@vitbhopal.ac.in", "cabin": "C3" });

        let (status, _) = send(&app, "POST", "/api/faculty", Some(&token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, json) = send(&app, "POST", "/api/faculty", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);
    }
}
