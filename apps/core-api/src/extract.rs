//! # リクエスト抽出
//!
//! axum 標準の [`Json`] 抽出子はデシリアライズ失敗時に 422、Content-Type 不一致時に
//! 415 を平文で返す。[`FormJson`] はこれらを [`CoreApiError::BadRequest`] に変換し、
//! 他の入力エラーと同じ 400 Problem Details で応答する。

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::CoreApiError;

/// JSON リクエストボディの抽出子
///
/// 失敗時のレスポンスは 400 `validation-error`。
#[derive(Debug, Clone)]
pub struct FormJson<T>(pub T);

impl<T, S> FromRequest<S> for FormJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CoreApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for CoreApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "リクエストボディを解釈できません");
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{self, header},
    };
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_正しいjsonは値を取り出す() {
        let req = request(Some("application/json"), r#"{"name":"Leo"}"#);

        let FormJson(payload) = FormJson::<Payload>::from_request(req, &()).await.unwrap();

        assert_eq!(payload.name, "Leo");
    }

    #[tokio::test]
    async fn test_必須フィールドの欠落はbad_requestになる() {
        let req = request(Some("application/json"), "{}");

        let result = FormJson::<Payload>::from_request(req, &()).await;

        assert!(matches!(result, Err(CoreApiError::BadRequest(msg)) if msg.contains("name")));
    }

    #[tokio::test]
    async fn test_content_typeがない場合もbad_requestになる() {
        let req = request(None, r#"{"name":"Leo"}"#);

        let result = FormJson::<Payload>::from_request(req, &()).await;

        assert!(matches!(result, Err(CoreApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_壊れたjsonはbad_requestになる() {
        let req = request(Some("application/json"), r#"{"name":"#);

        let result = FormJson::<Payload>::from_request(req, &()).await;

        assert!(matches!(result, Err(CoreApiError::BadRequest(_))));
    }
}
