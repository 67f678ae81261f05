use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        admin::update_table_limits,
        sessions::{create_session, get_session, get_users, update_session},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/sessionmanager/getsession/{account_num}/{user_id}",
            get(get_session),
        )
        .route("/sessionmanager/getusers/{account_num}", get(get_users))
        .route(
            "/sessionmanager/create/{account_num}/{user_name}",
            post(create_session),
        )
        .route(
            "/sessionmanager/update/{account_num}/{user_id}",
            post(update_session),
        )
        .route("/sessionmanager/tablelimits", post(update_table_limits))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(15),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(body.into())
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_user_id_string() {
        let app = create_app(AppState::in_memory());

        let response = app
            .oneshot(post("/sessionmanager/create/100/alice", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"userID": "1"}));
    }

    #[tokio::test]
    async fn test_create_then_get_session() {
        let app = create_app(AppState::in_memory());

        app.clone()
            .oneshot(post("/sessionmanager/create/100/alice", Body::empty()))
            .await
            .unwrap();

        let response = app
            .oneshot(get_req("/sessionmanager/getsession/100/1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"userName": "alice"}));
    }

    #[tokio::test]
    async fn test_get_users_lists_account_members() {
        let app = create_app(AppState::in_memory());

        for name in ["alice", "bob"] {
            app.clone()
                .oneshot(post(
                    &format!("/sessionmanager/create/100/{name}"),
                    Body::empty(),
                ))
                .await
                .unwrap();
        }
        // A user in another account must not appear in the listing.
        app.clone()
            .oneshot(post("/sessionmanager/create/200/carol", Body::empty()))
            .await
            .unwrap();

        let response = app
            .oneshot(get_req("/sessionmanager/getusers/100"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut users = body_json(response).await;
        users
            .as_array_mut()
            .unwrap()
            .sort_by_key(|u| u["userID"].as_i64());
        assert_eq!(
            users,
            json!([
                {"userName": "alice", "userID": 1},
                {"userName": "bob", "userID": 2},
            ])
        );
    }

    #[tokio::test]
    async fn test_update_applies_merge_patch() {
        let app = create_app(AppState::in_memory());

        app.clone()
            .oneshot(post("/sessionmanager/create/100/alice", Body::empty()))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post(
                "/sessionmanager/update/100/1",
                r#"{"userName": null, "favoriteColor": "blue"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"favoriteColor": "blue"})
        );

        // The merged document is what a subsequent read returns.
        let response = app
            .oneshot(get_req("/sessionmanager/getsession/100/1"))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await,
            json!({"favoriteColor": "blue"})
        );
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let app = create_app(AppState::in_memory());

        let response = app
            .oneshot(get_req("/sessionmanager/getsession/100/999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_of_unknown_session_is_404() {
        let app = create_app(AppState::in_memory());

        let response = app
            .oneshot(post("/sessionmanager/update/100/999", r#"{"a": 1}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_patch_body_is_400() {
        let app = create_app(AppState::in_memory());

        app.clone()
            .oneshot(post("/sessionmanager/create/100/alice", Body::empty()))
            .await
            .unwrap();

        let response = app
            .oneshot(post("/sessionmanager/update/100/1", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_table_limits_returns_no_content() {
        let app = create_app(AppState::in_memory());

        let response = app
            .oneshot(post(
                "/sessionmanager/tablelimits?readUnits=50",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_empty_account_listing_is_empty_array() {
        let app = create_app(AppState::in_memory());

        let response = app
            .oneshot(get_req("/sessionmanager/getusers/42"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }
}
