//! HTTP endpoints for document submission and provider diagnostics.

use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;
use crate::ErrorResponse;

use super::models::{
    DocumentFailureResponse, DocumentRequest, DocumentSuccessResponse, SubmitDocumentRequest,
};
use super::pipeline::{PipelineOutcome, Stage};

#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    post,
    path = "/documents",
    request_body = SubmitDocumentRequest,
    responses(
        (status = 200, description = "Document generated and emailed", body = DocumentSuccessResponse),
        (status = 400, description = "Missing required fields", body = DocumentFailureResponse),
        (status = 500, description = "Rendering failed", body = DocumentFailureResponse),
        (status = 502, description = "Generation or delivery failed", body = DocumentFailureResponse)
    )
)]
pub async fn submit_document(
    req: web::Json<SubmitDocumentRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let request = DocumentRequest::from(req.into_inner());

    match state.pipeline.run(&request).await {
        PipelineOutcome::Done { preview_text } => HttpResponse::Ok().json(DocumentSuccessResponse {
            success: true,
            preview_text,
        }),
        PipelineOutcome::Failed { stage, message } => {
            let body = DocumentFailureResponse {
                success: false,
                stage: stage.to_string(),
                message,
            };
            match stage {
                Stage::Validation => HttpResponse::BadRequest().json(body),
                Stage::Rendering => HttpResponse::InternalServerError().json(body),
                Stage::Generation | Stage::Delivery => HttpResponse::BadGateway().json(body),
            }
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    get,
    path = "/account/status",
    responses(
        (status = 200, description = "Provider account information"),
        (status = 502, description = "Provider unreachable or rejected the key", body = ErrorResponse)
    )
)]
pub async fn account_status(state: web::Data<AppState>) -> impl Responder {
    match state.account_client.account_status().await {
        Ok(info) => HttpResponse::Ok().json(info),
        Err(e) => HttpResponse::BadGateway().json(ErrorResponse::bad_gateway(&e.to_string())),
    }
}
