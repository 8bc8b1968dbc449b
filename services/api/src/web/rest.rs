//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::course::CourseError;
use crate::render::{self, sanitize_filename, DEFAULT_FILENAME};
use crate::web::protocol::{
    CourseResponse, ErrorResponse, GenerateCourseRequest, GeneratePdfRequest, HealthResponse,
    PdfResponse, QuizQuestionResponse, QuizResponse, SummaryResponse, VideoResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_course_handler,
        generate_pdf_handler,
        health_handler,
    ),
    components(
        schemas(
            GenerateCourseRequest, GeneratePdfRequest, CourseResponse, QuizResponse,
            QuizQuestionResponse, SummaryResponse, PdfResponse, VideoResponse,
            HealthResponse, ErrorResponse,
        )
    ),
    tags(
        (name = "ByteMentor API", description = "Generates mini-courses and study-guide PDFs.")
    )
)]
pub struct ApiDoc;

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

pub async fn index_handler() -> Html<&'static str> {
    Html(
        "<h1>Welcome to ByteMentor API!</h1>\
         <p>Use /api/generate-course to generate courses and /api/generate-pdf to render study guides.</p>",
    )
}

/// Liveness check. No upstream dependencies are probed.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "ByteMentor API running".to_string(),
    })
}

/// Generate a complete mini-course for a keyword.
///
/// Providers that cannot reach their upstream serve fallback content, so a
/// 500 is returned only when the orchestration itself fails.
#[utoipa::path(
    post,
    path = "/api/generate-course",
    request_body = GenerateCourseRequest,
    responses(
        (status = 200, description = "Course generated", body = CourseResponse),
        (status = 400, description = "Keyword missing or blank", body = ErrorResponse),
        (status = 500, description = "Course generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_course_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateCourseRequest>, JsonRejection>,
) -> ApiResult<CourseResponse> {
    let Json(request) = payload.map_err(|e| {
        info!("Rejected course request body: {}", e);
        bad_request("Keyword is required")
    })?;
    let keyword = request.keyword.unwrap_or_default();

    info!("Generating course for keyword: {}", keyword.trim());
    match app_state.orchestrator.assemble(&keyword).await {
        Ok(course) => Ok(Json(course.into())),
        Err(CourseError::InvalidTopic(e)) => Err(bad_request(&e.to_string())),
        Err(e @ CourseError::Orchestration(_)) => {
            error!("Course generation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Failed to generate course",
                    e.to_string(),
                )),
            ))
        }
    }
}

/// Render text to a PDF and return it base64-encoded.
#[utoipa::path(
    post,
    path = "/api/generate-pdf",
    request_body = GeneratePdfRequest,
    responses(
        (status = 200, description = "PDF rendered", body = PdfResponse),
        (status = 400, description = "Text missing", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_pdf_handler(
    payload: Result<Json<GeneratePdfRequest>, JsonRejection>,
) -> ApiResult<PdfResponse> {
    let Json(request) = payload.map_err(|_| bad_request("Text is required"))?;
    let text = request
        .renderable_text()
        .ok_or_else(|| bad_request("Text is required"))?;

    let filename = sanitize_filename(
        request
            .filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME),
    );

    match render::render(&text, &filename) {
        Ok(doc) => {
            info!(filename = %doc.filename, pages = doc.page_count, "PDF rendered.");
            Ok(Json(PdfResponse::encode(doc.filename, &doc.bytes)))
        }
        Err(e) => {
            error!("/api/generate-pdf error: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details("Failed to generate PDF", e.to_string())),
            ))
        }
    }
}

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
