//! # 来院記録ハンドラ
//!
//! - `GET /owner/{owner_id}/pets/{pet_id}/visits` - 来院記録一覧（新しい順）
//! - `POST /owner/{owner_id}/pets/{pet_id}/visits` - 来院記録登録（日付省略時は今日）

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use petclinic_domain::{owner::OwnerId, pet::PetId, visit::Visit};
use serde::{Deserialize, Serialize};

use super::ClinicState;
use crate::{error::CoreApiError, extract::FormJson, usecase::VisitInput};

/// 来院記録 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitDto {
    pub id:          Option<i32>,
    pub pet_id:      i32,
    pub date:        NaiveDate,
    pub description: String,
    #[serde(rename = "new")]
    pub is_new:      bool,
}

impl From<&Visit> for VisitDto {
    fn from(visit: &Visit) -> Self {
        Self {
            id:          visit.id().map(|id| id.as_i32()),
            pet_id:      visit.pet_id().as_i32(),
            date:        visit.date(),
            description: visit.description().to_string(),
            is_new:      visit.is_new(),
        }
    }
}

/// 来院記録登録リクエスト
#[derive(Debug, Deserialize)]
pub struct VisitRequest {
    #[serde(default)]
    pub date:        Option<NaiveDate>,
    pub description: String,
}

/// GET /owner/{owner_id}/pets/{pet_id}/visits
pub async fn list_visits(
    State(state): State<Arc<ClinicState>>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, CoreApiError> {
    let visits = state
        .usecase
        .find_visits(OwnerId::new(owner_id), PetId::new(pet_id))
        .await?;

    let items: Vec<VisitDto> = visits.iter().map(VisitDto::from).collect();
    Ok(Json(items))
}

/// POST /owner/{owner_id}/pets/{pet_id}/visits
pub async fn add_visit(
    State(state): State<Arc<ClinicState>>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    FormJson(req): FormJson<VisitRequest>,
) -> Result<impl IntoResponse, CoreApiError> {
    let input = VisitInput {
        date:        req.date,
        description: req.description,
    };
    let visit = state
        .usecase
        .add_visit(OwnerId::new(owner_id), PetId::new(pet_id), input)
        .await?;

    Ok((StatusCode::CREATED, Json(VisitDto::from(&visit))))
}
