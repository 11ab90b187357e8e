//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | フォーム入力の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//! | `Conflict` | 409 Conflict | 同名ペットの重複など |
//!
//! ## 使用例
//!
//! ```rust
//! use petclinic_domain::DomainError;
//!
//! fn find_owner(id: i32) -> Result<(), DomainError> {
//!     Err(DomainError::NotFound {
//!         entity_type: "Owner",
//!         id:          id.to_string(),
//!     })
//! }
//!
//! assert!(find_owner(42).is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// - 必須フィールドが未入力
   /// - 電話番号が数字 10 桁以内でない
   /// - 誕生日が未来日
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// エンティティが見つからない
   #[error("{entity_type} が見つかりません: {id}")]
   NotFound {
      /// エンティティの種類（"Owner", "Pet" など）
      entity_type: &'static str,
      /// 検索に使用した識別子
      id:          String,
   },

   /// 競合エラー
   ///
   /// 同じ飼い主が同名のペットを登録しようとした場合など。
   #[error("競合が発生しました: {0}")]
   Conflict(String),
}
