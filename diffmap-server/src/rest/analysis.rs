use crate::ServerConfig;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use diffmap_core::DiffmapError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub idea: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Runs the pipeline and returns the bundle as JSON.
pub async fn analyze(
    State(config): State<ServerConfig>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    match config.pipeline.run(&req.idea).await {
        Ok(bundle) => (StatusCode::OK, Json(bundle)).into_response(),
        Err(e) => error_response(&config, e),
    }
}

/// Runs the pipeline and returns the bundle as a JSON file download.
pub async fn export_analysis(
    State(config): State<ServerConfig>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let bundle = match config.pipeline.run(&req.idea).await {
        Ok(bundle) => bundle,
        Err(e) => return error_response(&config, e),
    };

    let body = match bundle.to_json_pretty() {
        Ok(body) => body,
        Err(e) => return error_response(&config, e),
    };

    let disposition = format!("attachment; filename=\"{}\"", bundle.export_file_name());
    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    (StatusCode::OK, headers, body).into_response()
}

fn error_response(config: &ServerConfig, e: DiffmapError) -> Response {
    let status = match &e {
        DiffmapError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DiffmapError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DiffmapError::Search(_) | DiffmapError::Model(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let error = if config.security.expose_error_details || status == StatusCode::BAD_REQUEST {
        e.to_string()
    } else {
        "analysis failed".to_string()
    };

    tracing::error!(status = %status, error = %e, "Request failed");
    (status, Json(ErrorBody { error })).into_response()
}
