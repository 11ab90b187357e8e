//! # PetClinic Core API ライブラリ
//!
//! ルーター・ハンドラ・ユースケースを公開する。
//! `main` と統合テスト（`tests/`）の両方から利用する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;
