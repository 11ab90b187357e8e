//! # PetClinic インフラ層
//!
//! 外部システム（PostgreSQL）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ**: 飼い主・ペット・来院記録・獣医のデータゲートウェイ
//! - **テスト用実装**: `test-utils` feature で公開するインメモリリポジトリ
//!
//! ## 依存関係
//!
//! ```text
//! core-api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use petclinic_infra::{db, repository::{OwnerRepository, PostgresOwnerRepository}};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/petclinic").await?;
//!     let owners = PostgresOwnerRepository::new(pool);
//!     let found = owners.find_by_last_name("Davis").await?;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
