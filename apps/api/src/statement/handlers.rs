use axum::{response::Html, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::intake::validation::validate_intake;
use crate::orders::models::{Product, STATEMENT_PRODUCT};
use crate::statement::catalog::{
    AdjustmentCategory, ADJUSTMENT_CATALOG, CHALLENGE_AREAS, ENVIRONMENT_OPTIONS,
    NEURODIVERGENCE_OPTIONS,
};
use crate::statement::sections::{plan_document, DocumentPlan};
use crate::statement::{compose, IntakeRecord, OutputFormat};

/// Validates an intake record, returning its warnings or a 400 with every
/// offending field.
pub fn require_valid(record: &IntakeRecord) -> Result<Vec<String>, AppError> {
    let result = validate_intake(record);
    if !result.passed {
        debug!("Intake rejected: {} field errors", result.errors.len());
        return Err(AppError::InvalidIntake(result.errors));
    }
    Ok(result.warnings)
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub adjustment_categories: &'static [AdjustmentCategory],
    pub neurodivergence_options: &'static [&'static str],
    pub environment_options: &'static [&'static str],
    pub challenge_areas: &'static [&'static str],
    pub product: Product,
}

/// GET /api/v1/catalog
pub async fn handle_get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        adjustment_categories: ADJUSTMENT_CATALOG.categories,
        neurodivergence_options: NEURODIVERGENCE_OPTIONS,
        environment_options: ENVIRONMENT_OPTIONS,
        challenge_areas: CHALLENGE_AREAS,
        product: STATEMENT_PRODUCT,
    })
}

#[derive(Deserialize)]
pub struct PreviewRequest {
    pub intake: IntakeRecord,
    /// Overrides the format stored in the intake record.
    pub output_format: Option<OutputFormat>,
}

impl PreviewRequest {
    fn format(&self) -> OutputFormat {
        self.output_format.unwrap_or(self.intake.output_format)
    }
}

/// POST /api/v1/statements/preview
pub async fn handle_preview(Json(req): Json<PreviewRequest>) -> Result<Html<String>, AppError> {
    require_valid(&req.intake)?;
    let document = compose(&req.intake, req.format());
    Ok(Html(document.html))
}

#[derive(Serialize)]
pub struct PlanResponse {
    pub plan: DocumentPlan,
    pub warnings: Vec<String>,
}

/// POST /api/v1/statements/plan
pub async fn handle_plan(Json(req): Json<PreviewRequest>) -> Result<Json<PlanResponse>, AppError> {
    let warnings = require_valid(&req.intake)?;
    Ok(Json(PlanResponse {
        plan: plan_document(&req.intake, req.format()),
        warnings,
    }))
}
