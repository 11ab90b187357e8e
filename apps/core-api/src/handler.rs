//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、検証と組み立てはユースケースに委譲

pub mod health;
pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;

pub use health::health_check;
pub use owner::{create_owner, delete_owner, find_owners, get_owner, update_owner};
pub use pet::{add_pet, list_pet_types, update_pet};
pub use vet::list_vets;
pub use visit::{add_visit, list_visits};

use crate::usecase::ClinicUseCaseImpl;

/// 全ハンドラ共通の共有状態
pub struct ClinicState {
    pub usecase: ClinicUseCaseImpl,
}
