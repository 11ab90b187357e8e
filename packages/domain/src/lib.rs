//! # PetClinic ドメイン層
//!
//! 動物病院の業務を表現するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（Owner, Pet, Visit, Vet）
//! - **値オブジェクト**: 識別子のみで比較される ID 型、入力フォーム（OwnerProfile など）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-api → infra → domain
//!     ↘               ↗
//!       ────────────
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 現在時刻の抽象化
//! - [`error`] - ドメインエラー
//! - [`owner`] - 飼い主
//! - [`pet`] - ペットとペット種別
//! - [`visit`] - 来院記録
//! - [`vet`] - 獣医と専門分野
//!
//! ## 使用例
//!
//! ```rust
//! use petclinic_domain::owner::{Owner, OwnerProfile};
//!
//! let owner = Owner::new(OwnerProfile {
//!    first_name: "George".to_string(),
//!    last_name:  "Franklin".to_string(),
//!    address:    "110 W. Liberty St.".to_string(),
//!    city:       "Madison".to_string(),
//!    telephone:  "6085551023".to_string(),
//! });
//!
//! assert!(owner.is_new());
//! assert!(owner.pets().is_empty());
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;

pub use error::DomainError;
