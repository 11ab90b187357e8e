//! # ユースケース層
//!
//! 入力検証とリポジトリ呼び出しの組み立てを担当する。
//! ハンドラはユースケースを呼び出し、結果を DTO に変換するだけにする。

pub mod clinic;

pub use clinic::{ClinicUseCaseImpl, PetInput, VisitInput};
