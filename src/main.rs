mod analysis;
mod api;
mod classifier;
mod comments;
mod config;
mod sentiment;
mod youtube;

use axum::{
    routing::{get, post},
    Router,
};
use dotenv::dotenv;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{AnalysisGate, AppState};
use crate::classifier::TextClassifier;
use crate::comments::{RoutingSource, SyntheticSource};
use crate::youtube::YouTubeSource;

#[derive(OpenApi)]
#[openapi(
    paths(api::analyze_url, api::analyze_text, api::health),
    components(
        schemas(
            api::AnalyzeRequest,
            api::ErrorResponse,
            api::HealthResponse,
            classifier::TextAnalysisRequest,
            classifier::TextAnalysisResponse,
            analysis::AnalysisReport,
            comments::Comment,
            comments::ContentCategory,
            sentiment::SentimentLabel,
            sentiment::AggregateSentiment,
            sentiment::CommentStats
        )
    ),
    tags(
        (name = "analysis", description = "Sentiment Analysis API")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env()?;
    let http = reqwest::Client::new();

    let comment_source = RoutingSource {
        youtube: YouTubeSource::new(
            http.clone(),
            config.rapidapi_key.clone(),
            SyntheticSource::new(config.synthetic_delay),
        ),
        synthetic: SyntheticSource::new(config.synthetic_delay),
    };

    let state = Arc::new(AppState {
        comment_source: Arc::new(comment_source),
        classifier: TextClassifier::new(http, config.classifier.clone()),
        gate: AnalysisGate::new(),
    });

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/analyze", post(api::analyze_url))
        .route("/analyze/text", post(api::analyze_text))
        .route("/health", get(api::health))
        .nest_service("/", ServeDir::new("static")) // Serve Dashboard
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    println!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
