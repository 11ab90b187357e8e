//! # PetRepository
//!
//! ペットとペット種別（マスタ）の永続化を担当するリポジトリ。
//!
//! 飼い主の読み込み時には [`load_pets_by_owner`] で複数飼い主分のペットを
//! 一括取得し、N+1 クエリを避ける。

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use petclinic_domain::{
   owner::OwnerId,
   pet::{Pet, PetDetails, PetId, PetType, PetTypeId},
};
use sqlx::PgPool;

use super::visit_repository::load_visits_by_pet;
use crate::error::InfraError;

/// ペットリポジトリトレイト
#[async_trait]
pub trait PetRepository: Send + Sync {
   /// ペット種別を名前順で全件取得する
   async fn find_pet_types(&self) -> Result<Vec<PetType>, InfraError>;

   /// ID でペット種別を検索する
   async fn find_pet_type(&self, id: &PetTypeId) -> Result<Option<PetType>, InfraError>;

   /// 飼い主に紐づくペットを挿入し、採番された ID を返す
   async fn insert(&self, owner_id: &OwnerId, pet: &Pet) -> Result<PetId, InfraError>;

   /// ペットの名前・誕生日・種別を更新する
   ///
   /// 対象が存在しない場合は `InfraErrorKind::NotFound`。
   async fn update(&self, pet: &Pet) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の PetRepository
#[derive(Debug, Clone)]
pub struct PostgresPetRepository {
   pool: PgPool,
}

impl PostgresPetRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[derive(Debug, sqlx::FromRow)]
struct PetTypeRow {
   id:   i32,
   name: String,
}

impl From<PetTypeRow> for PetType {
   fn from(row: PetTypeRow) -> Self {
      PetType::new(PetTypeId::new(row.id), row.name)
   }
}

#[derive(Debug, sqlx::FromRow)]
struct PetRow {
   id:         i32,
   owner_id:   i32,
   name:       String,
   birth_date: NaiveDate,
   type_id:    i32,
   type_name:  String,
}

/// 指定した飼い主群のペットを来院記録付きで取得し、飼い主 ID ごとにまとめる
pub(crate) async fn load_pets_by_owner(
   pool: &PgPool,
   owner_ids: &[i32],
) -> Result<HashMap<i32, Vec<Pet>>, InfraError> {
   if owner_ids.is_empty() {
      return Ok(HashMap::new());
   }

   let rows = sqlx::query_as::<_, PetRow>(
      r#"
      SELECT p.id, p.owner_id, p.name, p.birth_date, t.id AS type_id, t.name AS type_name
      FROM pets p
      INNER JOIN types t ON t.id = p.type_id
      WHERE p.owner_id = ANY($1)
      "#,
   )
   .bind(owner_ids)
   .fetch_all(pool)
   .await?;

   let pet_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
   let mut visits = load_visits_by_pet(pool, &pet_ids).await?;

   let mut pets: HashMap<i32, Vec<Pet>> = HashMap::new();
   for row in rows {
      let pet = Pet::from_db(
         PetId::new(row.id),
         PetDetails {
            name:       row.name,
            birth_date: row.birth_date,
            pet_type:   PetType::new(PetTypeId::new(row.type_id), row.type_name),
         },
         visits.remove(&row.id).unwrap_or_default(),
      );
      pets.entry(row.owner_id).or_default().push(pet);
   }
   Ok(pets)
}

#[async_trait]
impl PetRepository for PostgresPetRepository {
   async fn find_pet_types(&self) -> Result<Vec<PetType>, InfraError> {
      let rows = sqlx::query_as::<_, PetTypeRow>("SELECT id, name FROM types ORDER BY name ASC")
         .fetch_all(&self.pool)
         .await?;

      Ok(rows.into_iter().map(PetType::from).collect())
   }

   async fn find_pet_type(&self, id: &PetTypeId) -> Result<Option<PetType>, InfraError> {
      let row = sqlx::query_as::<_, PetTypeRow>("SELECT id, name FROM types WHERE id = $1")
         .bind(id.as_i32())
         .fetch_optional(&self.pool)
         .await?;

      Ok(row.map(PetType::from))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%owner_id, pet_name = %pet.name()))]
   async fn insert(&self, owner_id: &OwnerId, pet: &Pet) -> Result<PetId, InfraError> {
      let id: i32 = sqlx::query_scalar(
         r#"
         INSERT INTO pets (name, birth_date, type_id, owner_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id
         "#,
      )
      .bind(pet.name())
      .bind(pet.birth_date())
      .bind(pet.pet_type().id().as_i32())
      .bind(owner_id.as_i32())
      .fetch_one(&self.pool)
      .await?;

      Ok(PetId::new(id))
   }

   async fn update(&self, pet: &Pet) -> Result<(), InfraError> {
      let id = pet
         .id()
         .ok_or_else(|| InfraError::unexpected("未保存のペットは更新できません"))?;

      let result = sqlx::query(
         r#"
         UPDATE pets
         SET name = $2, birth_date = $3, type_id = $4
         WHERE id = $1
         "#,
      )
      .bind(id.as_i32())
      .bind(pet.name())
      .bind(pet.birth_date())
      .bind(pet.pet_type().id().as_i32())
      .execute(&self.pool)
      .await?;

      if result.rows_affected() == 0 {
         return Err(InfraError::not_found("Pet", id));
      }
      Ok(())
   }
}
