// File: services/tutorly_backend/src/main.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;
use tutorly_booking::routes as booking_routes;
use tutorly_config::load_config;
use tutorly_db::{DbClient, SlotRepository, SqlSlotRepository};
use tutorly_zoom::routes as zoom_routes;

#[tokio::main]
async fn main() {
    tutorly_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let db_client = DbClient::new(&config)
        .await
        .expect("Failed to connect to the database");
    let slots: Arc<dyn SlotRepository> = Arc::new(SqlSlotRepository::new(db_client.clone()));

    let mut app = Router::new()
        .route("/", get(|| async { "Welcome to the Tutorly API!" }))
        .merge(booking_routes(config.clone(), slots))
        .merge(zoom_routes(config.clone(), db_client));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use tutorly_booking::doc::BookingApiDoc;
        use tutorly_zoom::doc::ZoomApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Tutorly API",
                version = "0.1.0",
                description = "Tutoring session booking and Zoom provisioning API"
            ),
            tags( (name = "Tutorly", description = "Core service endpoints")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        openapi_doc.merge(ZoomApiDoc::openapi());
        info!("Adding Swagger UI at /docs");

        let swagger_ui = SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Booking form, authorization redirect page and the rest of the static site
    app = app.fallback_service(ServeDir::new("public"));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
