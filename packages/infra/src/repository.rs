//! # リポジトリ
//!
//! ユースケース層が利用するデータゲートウェイのトレイトと、その PostgreSQL 実装。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケースはトレイト（`Arc<dyn OwnerRepository>` など）にのみ依存する
//! - **テスタビリティ**: テストではスタブやインメモリ実装に差し替える
//! - **集約単位の読み込み**: 飼い主はペットと来院記録を含めて一括で読み込む

pub mod owner_repository;
pub mod pet_repository;
pub mod vet_repository;
pub mod visit_repository;

pub use owner_repository::{OwnerRepository, PostgresOwnerRepository};
pub use pet_repository::{PetRepository, PostgresPetRepository};
pub use vet_repository::{PostgresVetRepository, VetRepository};
pub use visit_repository::{PostgresVisitRepository, VisitRepository};
