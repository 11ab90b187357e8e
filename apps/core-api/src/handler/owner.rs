//! # 飼い主ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /owners?lastName=` - 姓の前方一致で検索
//! - `POST /owners` - 飼い主登録
//! - `GET /owner/{owner_id}` - 飼い主詳細（ペット・来院記録を含む）
//! - `PUT /owner/{owner_id}` - 連絡先の更新
//! - `DELETE /owner/delete/{owner_id}` - 飼い主削除
//!
//! 削除ルートは DELETE のみ登録するため、他のメソッドはルーターが 405 を返す。
//! 削除に失敗した場合は理由を問わず `404 Oops`（[`CoreApiError::OwnerDeletion`]）。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use petclinic_domain::owner::{Owner, OwnerId, OwnerProfile};
use serde::{Deserialize, Serialize};

use super::{ClinicState, pet::PetDto};
use crate::{error::CoreApiError, extract::FormJson};

// --- リクエスト/レスポンス型 ---

/// 飼い主 DTO
///
/// フィールド順はそのまま JSON のキー順になる。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    pub id:         Option<i32>,
    pub first_name: String,
    pub last_name:  String,
    pub address:    String,
    pub city:       String,
    pub telephone:  String,
    pub pets:       Vec<PetDto>,
    #[serde(rename = "new")]
    pub is_new:     bool,
}

impl From<&Owner> for OwnerDto {
    fn from(owner: &Owner) -> Self {
        Self {
            id:         owner.id().map(|id| id.as_i32()),
            first_name: owner.first_name().to_string(),
            last_name:  owner.last_name().to_string(),
            address:    owner.address().to_string(),
            city:       owner.city().to_string(),
            telephone:  owner.telephone().to_string(),
            pets:       owner.pets().iter().map(PetDto::from).collect(),
            is_new:     owner.is_new(),
        }
    }
}

/// 飼い主登録・更新リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    pub first_name: String,
    pub last_name:  String,
    pub address:    String,
    pub city:       String,
    pub telephone:  String,
}

impl From<OwnerRequest> for OwnerProfile {
    fn from(req: OwnerRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name:  req.last_name,
            address:    req.address,
            city:       req.city,
            telephone:  req.telephone,
        }
    }
}

/// 飼い主検索クエリ
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindOwnersQuery {
    #[serde(default)]
    pub last_name: String,
}

// --- ハンドラ ---

/// GET /owners?lastName=
pub async fn find_owners(
    State(state): State<Arc<ClinicState>>,
    Query(query): Query<FindOwnersQuery>,
) -> Result<impl IntoResponse, CoreApiError> {
    let owners = state.usecase.find_owners(&query.last_name).await?;

    let items: Vec<OwnerDto> = owners.iter().map(OwnerDto::from).collect();
    Ok(Json(items))
}

/// POST /owners
pub async fn create_owner(
    State(state): State<Arc<ClinicState>>,
    FormJson(req): FormJson<OwnerRequest>,
) -> Result<impl IntoResponse, CoreApiError> {
    let owner = state.usecase.create_owner(req.into()).await?;

    Ok((StatusCode::CREATED, Json(OwnerDto::from(&owner))))
}

/// GET /owner/{owner_id}
pub async fn get_owner(
    State(state): State<Arc<ClinicState>>,
    Path(owner_id): Path<i32>,
) -> Result<impl IntoResponse, CoreApiError> {
    let owner = state.usecase.find_owner(OwnerId::new(owner_id)).await?;

    Ok(Json(OwnerDto::from(&owner)))
}

/// PUT /owner/{owner_id}
pub async fn update_owner(
    State(state): State<Arc<ClinicState>>,
    Path(owner_id): Path<i32>,
    FormJson(req): FormJson<OwnerRequest>,
) -> Result<impl IntoResponse, CoreApiError> {
    let owner = state
        .usecase
        .update_owner(OwnerId::new(owner_id), req.into())
        .await?;

    Ok(Json(OwnerDto::from(&owner)))
}

/// DELETE /owner/delete/{owner_id}
///
/// 成功時は本文なしの 200。
pub async fn delete_owner(
    State(state): State<Arc<ClinicState>>,
    Path(owner_id): Path<i32>,
) -> Result<impl IntoResponse, CoreApiError> {
    state.usecase.delete_owner(OwnerId::new(owner_id)).await?;

    Ok(StatusCode::OK)
}
