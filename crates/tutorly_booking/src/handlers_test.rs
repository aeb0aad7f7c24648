#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use axum::body::{to_bytes, Body};
    use axum::Router;
    use http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;
    use tutorly_config::{AppConfig, ServerConfig};
    use tutorly_db::mock::InMemorySlotRepository;

    // Helper function to create a mock AppConfig for testing
    fn create_mock_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: None,
            zoom: None,
        })
    }

    fn test_app(repo: Arc<InMemorySlotRepository>) -> Router {
        routes(create_mock_config(), repo)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn get_session_without_date_is_400() {
        let app = test_app(Arc::new(InMemorySlotRepository::new()));

        let response = app
            .oneshot(Request::get("/session").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing date parameters");
    }

    #[tokio::test]
    async fn get_session_with_empty_day_is_400() {
        let app = test_app(Arc::new(InMemorySlotRepository::new()));

        let response = app
            .oneshot(
                Request::get("/session?date=2024-03-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "No available sessions for today");
    }

    #[tokio::test]
    async fn get_session_returns_open_sessions() {
        let repo = Arc::new(InMemorySlotRepository::new());
        repo.seed("2024-03-01 10:00", 1, "Alice");
        let app = test_app(repo);

        let response = app
            .oneshot(
                Request::get("/session?date=2024-03-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["sessions"],
            serde_json::json!([{"name": "Alice", "date": "2024-03-01 10:00"}])
        );
    }

    fn schedule_request(form: &str) -> Request<Body> {
        Request::post("/schedule")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn schedule_books_the_first_selected_slot() {
        let repo = Arc::new(InMemorySlotRepository::new());
        repo.seed("2024-03-01 10:00", 3, "Alice");
        repo.seed("2024-03-01 14:00", 3, "Alice");
        let app = test_app(repo.clone());

        let response = app
            .oneshot(schedule_request(
                "name=Bob-Lee&email=b%40x.com&sessions=2024-03-01+10%3A00,2024-03-01+14%3A00",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["date"], "2024-03-01 10:00");
        assert_eq!(body["id"], 3);
        assert_eq!(body["email"], "b@x.com");

        // the second selection is ignored, not booked
        let extra = repo.get("2024-03-01 14:00", 3).expect("slot");
        assert!(extra.student.is_none());
    }

    #[tokio::test]
    async fn schedule_conflict_is_409() {
        let repo = Arc::new(InMemorySlotRepository::new());
        repo.seed("2024-03-01 10:00", 1, "Alice");
        let app = test_app(repo);

        let first = app
            .clone()
            .oneshot(schedule_request(
                "name=Bob-Lee&email=b%40x.com&sessions=2024-03-01+10%3A00",
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(schedule_request(
                "name=Eve&email=e%40x.com&sessions=2024-03-01+10%3A00",
            ))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn schedule_with_no_selection_is_400() {
        let repo = Arc::new(InMemorySlotRepository::new());
        let app = test_app(repo);

        let response = app
            .oneshot(schedule_request("name=Bob-Lee&email=b%40x.com&sessions="))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
