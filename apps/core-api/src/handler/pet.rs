//! # ペットハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /pettypes` - ペット種別一覧
//! - `POST /owner/{owner_id}/pets` - ペット登録
//! - `PUT /owner/{owner_id}/pets/{pet_id}` - ペット更新

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use petclinic_domain::{
    owner::OwnerId,
    pet::{Pet, PetId, PetType, PetTypeId},
};
use serde::{Deserialize, Serialize};

use super::{ClinicState, visit::VisitDto};
use crate::{error::CoreApiError, extract::FormJson, usecase::PetInput};

/// ペット種別 DTO
#[derive(Debug, Serialize)]
pub struct PetTypeDto {
    pub id:   i32,
    pub name: String,
}

impl From<&PetType> for PetTypeDto {
    fn from(pet_type: &PetType) -> Self {
        Self {
            id:   pet_type.id().as_i32(),
            name: pet_type.name().to_string(),
        }
    }
}

/// ペット DTO（来院記録は新しい順）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetDto {
    pub id:         Option<i32>,
    pub name:       String,
    pub birth_date: NaiveDate,
    #[serde(rename = "type")]
    pub pet_type:   PetTypeDto,
    pub visits:     Vec<VisitDto>,
    #[serde(rename = "new")]
    pub is_new:     bool,
}

impl From<&Pet> for PetDto {
    fn from(pet: &Pet) -> Self {
        Self {
            id:         pet.id().map(|id| id.as_i32()),
            name:       pet.name().to_string(),
            birth_date: pet.birth_date(),
            pet_type:   PetTypeDto::from(pet.pet_type()),
            visits:     pet.visits().iter().map(VisitDto::from).collect(),
            is_new:     pet.is_new(),
        }
    }
}

/// ペット登録・更新リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRequest {
    pub name:       String,
    pub birth_date: NaiveDate,
    pub type_id:    i32,
}

impl From<PetRequest> for PetInput {
    fn from(req: PetRequest) -> Self {
        Self {
            name:       req.name,
            birth_date: req.birth_date,
            type_id:    PetTypeId::new(req.type_id),
        }
    }
}

/// GET /pettypes
pub async fn list_pet_types(
    State(state): State<Arc<ClinicState>>,
) -> Result<impl IntoResponse, CoreApiError> {
    let pet_types = state.usecase.find_pet_types().await?;

    let items: Vec<PetTypeDto> = pet_types.iter().map(PetTypeDto::from).collect();
    Ok(Json(items))
}

/// POST /owner/{owner_id}/pets
pub async fn add_pet(
    State(state): State<Arc<ClinicState>>,
    Path(owner_id): Path<i32>,
    FormJson(req): FormJson<PetRequest>,
) -> Result<impl IntoResponse, CoreApiError> {
    let pet = state
        .usecase
        .add_pet(OwnerId::new(owner_id), req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(PetDto::from(&pet))))
}

/// PUT /owner/{owner_id}/pets/{pet_id}
pub async fn update_pet(
    State(state): State<Arc<ClinicState>>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    FormJson(req): FormJson<PetRequest>,
) -> Result<impl IntoResponse, CoreApiError> {
    let pet = state
        .usecase
        .update_pet(OwnerId::new(owner_id), PetId::new(pet_id), req.into())
        .await?;

    Ok(Json(PetDto::from(&pet)))
}
