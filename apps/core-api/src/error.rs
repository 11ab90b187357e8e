//! # Core API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! - ドメイン層の [`DomainError`] とインフラ層の [`InfraError`] は `From` で変換する
//! - レスポンス本文は RFC 9457 Problem Details（[`ErrorResponse`]）
//! - 飼い主削除の失敗だけは固定の `404 Oops`（text/plain）を返す

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use petclinic_domain::DomainError;
use petclinic_infra::InfraError;
use petclinic_shared::ErrorResponse;
use thiserror::Error;

/// 飼い主削除に失敗したときのレスポンス本文
pub const OWNER_DELETION_FAILED_BODY: &str = "Oops";

/// Core API 層で発生するエラー
///
/// `IntoResponse` を実装しているため、ハンドラは `Result<_, CoreApiError>` を返せばよい。
#[derive(Debug, Error)]
pub enum CoreApiError {
    /// リソースが見つからない（404 Not Found）
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 入力値が不正（400 Bad Request）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 既存データとの競合（409 Conflict）
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// データベースエラー（500 Internal Server Error）
    #[error("データベースエラー: {0}")]
    Database(#[source] InfraError),

    /// 飼い主の削除に失敗した（404、本文 `Oops`）
    ///
    /// ゲートウェイの失敗理由は区別せず、すべて「見つからない」として扱う。
    #[error("飼い主を削除できませんでした: {0}")]
    OwnerDeletion(#[source] InfraError),
}

impl From<DomainError> for CoreApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::BadRequest(msg),
            DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
            DomainError::Conflict(msg) => Self::Conflict(msg),
        }
    }
}

impl From<InfraError> for CoreApiError {
    fn from(err: InfraError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Database(err)
        }
    }
}

impl IntoResponse for CoreApiError {
    fn into_response(self) -> Response {
        let body = match self {
            CoreApiError::OwnerDeletion(err) => {
                tracing::warn!(error = %err, "飼い主の削除に失敗しました");
                return (StatusCode::NOT_FOUND, OWNER_DELETION_FAILED_BODY).into_response();
            }
            CoreApiError::NotFound(msg) => ErrorResponse::not_found(msg),
            CoreApiError::BadRequest(msg) => ErrorResponse::validation_error(msg),
            CoreApiError::Conflict(msg) => ErrorResponse::conflict(msg),
            CoreApiError::Database(err) => {
                tracing::error!(
                    error = %err,
                    span_trace = %err.span_trace(),
                    "データベースエラー"
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_owner_deletionは404とoopsを返す() {
        let response = CoreApiError::OwnerDeletion(InfraError::unexpected("boom")).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_string(response).await, "Oops");
    }

    #[tokio::test]
    async fn test_databaseエラーは内部情報を含まない500を返す() {
        let response = CoreApiError::Database(InfraError::unexpected("secret")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(!body.contains("secret"));
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], 500);
    }

    #[test]
    fn test_domain_errorの変換() {
        assert!(matches!(
            CoreApiError::from(DomainError::Validation("x".to_string())),
            CoreApiError::BadRequest(_)
        ));
        assert!(matches!(
            CoreApiError::from(DomainError::Conflict("x".to_string())),
            CoreApiError::Conflict(_)
        ));
    }

    #[test]
    fn test_infra_errorのnot_foundは404に変換される() {
        assert!(matches!(
            CoreApiError::from(InfraError::not_found("Pet", 3)),
            CoreApiError::NotFound(_)
        ));
        assert!(matches!(
            CoreApiError::from(InfraError::unexpected("x")),
            CoreApiError::Database(_)
        ));
    }
}
