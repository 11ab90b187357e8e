//! テスト共通フィクスチャ
//!
//! シードデータ（`migrations/*_seed_petclinic_data.sql`）の ID と、
//! エンティティ生成・行数確認のヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::NaiveDate;
use petclinic_domain::{
   owner::{Owner, OwnerId, OwnerProfile},
   pet::{Pet, PetDetails, PetType, PetTypeId},
};
use sqlx::PgPool;

/// シードデータの飼い主 Jean Coleman（ペット Samantha・Max を所有）
pub const COLEMAN_ID: i32 = 6;
/// Coleman の猫 Samantha
pub const SAMANTHA_ID: i32 = 7;
/// Coleman の猫 Max
pub const MAX_ID: i32 = 8;
/// どのテーブルにも存在しない ID
pub const MISSING_ID: i32 = 9999;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
   NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn profile(last_name: &str) -> OwnerProfile {
   OwnerProfile {
      first_name: "Jean".to_string(),
      last_name:  last_name.to_string(),
      address:    "105 N. Lake St.".to_string(),
      city:       "Monona".to_string(),
      telephone:  "6085552654".to_string(),
   }
}

pub fn new_owner(last_name: &str) -> Owner {
   Owner::new(profile(last_name))
}

/// 猫（シードの type_id = 1）のペット
pub fn new_cat(name: &str) -> Pet {
   Pet::new(PetDetails {
      name:       name.to_string(),
      birth_date: date(2022, 9, 4),
      pet_type:   PetType::new(PetTypeId::new(1), "cat"),
   })
}

pub fn owner_id(id: i32) -> OwnerId {
   OwnerId::new(id)
}

/// 任意の SQL で件数を数える
pub async fn count(pool: &PgPool, sql: &str, id: i32) -> i64 {
   sqlx::query_scalar(sql)
      .bind(id)
      .fetch_one(pool)
      .await
      .expect("件数の取得に失敗")
}
