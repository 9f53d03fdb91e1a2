#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send, token_for};
    use axum::http::StatusCode;
    use db::models::user::Model as UserModel;
    use serde_json::{Value, json};

    /// Test Case: Fresh user has the full quota and no reset time
    #[tokio::test]
    async fn test_update_quota_fresh_user() {
        let (app, app_state) = make_test_app().await;
        let user = UserModel::create(app_state.db(), "22BCE10005", "fresh@vitbhopal.ac.in", false)
            .await
            .unwrap();

        let (status, json) = send(&app, "GET", "/api/me/update-quota", Some(&token_for(&user)), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["limit"], 5);
        assert_eq!(json["data"]["used"], 0);
        assert_eq!(json["data"]["remaining"], 5);
        assert_eq!(json["data"]["resetTime"], Value::Null);
    }

    /// Test Case: Accepted submissions are counted
    #[tokio::test]
    async fn test_update_quota_counts_submissions() {
        let (app, app_state) = make_test_app().await;
        let user = UserModel::create(app_state.db(), "22BCE10006", "busy@vitbhopal.ac.in", false)
            .await
            .unwrap();
        let token = token_for(&user);

        let (status, _) = send(
            &app,
            "POST",
            "/api/faculty/submit-addition",
            Some(&token),
            Some(json!({ "name": "Dr. X", "email": "x@vitbhopal.ac.in", "cabin": "A1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, json) = send(&app, "GET", "/api/me/update-quota", Some(&token), None).await;
        assert_eq!(json["data"]["used"], 1);
        assert_eq!(json["data"]["remaining"], 4);
        assert!(json["data"]["resetTime"].is_string());
    }

    /// Test Case: Quota endpoint requires a token
    #[tokio::test]
    async fn test_update_quota_requires_auth() {
        let (app, _state) = make_test_app().await;
        let (status, _) = send(&app, "GET", "/api/me/update-quota", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
