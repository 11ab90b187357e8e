//! # 獣医ハンドラ
//!
//! - `GET /vets` - 獣医一覧（専門分野付き）

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use petclinic_domain::vet::{Specialty, Vet};
use serde::Serialize;

use super::ClinicState;
use crate::error::CoreApiError;

/// 専門分野 DTO
#[derive(Debug, Serialize)]
pub struct SpecialtyDto {
    pub id:   i32,
    pub name: String,
}

impl From<&Specialty> for SpecialtyDto {
    fn from(specialty: &Specialty) -> Self {
        Self {
            id:   specialty.id().as_i32(),
            name: specialty.name().to_string(),
        }
    }
}

/// 獣医 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VetDto {
    pub id:                i32,
    pub first_name:        String,
    pub last_name:         String,
    pub specialties:       Vec<SpecialtyDto>,
    pub nr_of_specialties: usize,
}

impl From<&Vet> for VetDto {
    fn from(vet: &Vet) -> Self {
        Self {
            id:                vet.id().as_i32(),
            first_name:        vet.first_name().to_string(),
            last_name:         vet.last_name().to_string(),
            specialties:       vet.specialties().iter().map(SpecialtyDto::from).collect(),
            nr_of_specialties: vet.nr_of_specialties(),
        }
    }
}

/// GET /vets
pub async fn list_vets(
    State(state): State<Arc<ClinicState>>,
) -> Result<impl IntoResponse, CoreApiError> {
    let vets = state.usecase.find_vets().await?;

    let items: Vec<VetDto> = vets.iter().map(VetDto::from).collect();
    Ok(Json(items))
}
