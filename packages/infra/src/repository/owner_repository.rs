//! # OwnerRepository
//!
//! 飼い主の永続化を担当するリポジトリ。
//!
//! 飼い主は所有するペットと、各ペットの来院記録を含めて読み込む。
//! 削除時はペット・来院記録も FK の `ON DELETE CASCADE` で同時に削除される。

use async_trait::async_trait;
use petclinic_domain::owner::{Owner, OwnerId, OwnerProfile};
use sqlx::PgPool;

use super::pet_repository::load_pets_by_owner;
use crate::error::InfraError;

/// 飼い主リポジトリトレイト
#[async_trait]
pub trait OwnerRepository: Send + Sync {
   /// ID で飼い主を検索する（ペット・来院記録を含む）
   async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, InfraError>;

   /// 姓の前方一致で飼い主を検索する
   ///
   /// 空文字列の場合は全件を返す。結果は姓の昇順。
   async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, InfraError>;

   /// 飼い主を挿入し、採番された ID を返す（ペットは対象外）
   async fn insert(&self, owner: &Owner) -> Result<OwnerId, InfraError>;

   /// 飼い主の連絡先情報を更新する
   ///
   /// 対象が存在しない場合は `InfraErrorKind::NotFound`。
   async fn update(&self, owner: &Owner) -> Result<(), InfraError>;

   /// 飼い主を削除する
   ///
   /// 対象が存在しない場合は `InfraErrorKind::NotFound`。
   async fn delete(&self, id: &OwnerId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の OwnerRepository
#[derive(Debug, Clone)]
pub struct PostgresOwnerRepository {
   pool: PgPool,
}

impl PostgresOwnerRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }

   async fn attach_pets(&self, rows: Vec<OwnerRow>) -> Result<Vec<Owner>, InfraError> {
      let owner_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
      let mut pets = load_pets_by_owner(&self.pool, &owner_ids).await?;

      Ok(rows
         .into_iter()
         .map(|row| {
            let owner_pets = pets.remove(&row.id).unwrap_or_default();
            row.into_owner(owner_pets)
         })
         .collect())
   }
}

#[derive(Debug, sqlx::FromRow)]
struct OwnerRow {
   id:         i32,
   first_name: String,
   last_name:  String,
   address:    String,
   city:       String,
   telephone:  String,
}

impl OwnerRow {
   fn into_owner(self, pets: Vec<petclinic_domain::pet::Pet>) -> Owner {
      Owner::from_db(
         OwnerId::new(self.id),
         OwnerProfile {
            first_name: self.first_name,
            last_name:  self.last_name,
            address:    self.address,
            city:       self.city,
            telephone:  self.telephone,
         },
         pets,
      )
   }
}

/// LIKE パターンのメタ文字をエスケープする
fn escape_like(value: &str) -> String {
   value
      .replace('\\', "\\\\")
      .replace('%', "\\%")
      .replace('_', "\\_")
}

#[async_trait]
impl OwnerRepository for PostgresOwnerRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, InfraError> {
      let row = sqlx::query_as::<_, OwnerRow>(
         r#"
         SELECT id, first_name, last_name, address, city, telephone
         FROM owners
         WHERE id = $1
         "#,
      )
      .bind(id.as_i32())
      .fetch_optional(&self.pool)
      .await?;

      let Some(row) = row else {
         return Ok(None);
      };

      Ok(self.attach_pets(vec![row]).await?.into_iter().next())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%last_name))]
   async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, InfraError> {
      let rows = sqlx::query_as::<_, OwnerRow>(
         r#"
         SELECT id, first_name, last_name, address, city, telephone
         FROM owners
         WHERE last_name LIKE $1 || '%'
         ORDER BY last_name ASC, id ASC
         "#,
      )
      .bind(escape_like(last_name))
      .fetch_all(&self.pool)
      .await?;

      self.attach_pets(rows).await
   }

   async fn insert(&self, owner: &Owner) -> Result<OwnerId, InfraError> {
      let id: i32 = sqlx::query_scalar(
         r#"
         INSERT INTO owners (first_name, last_name, address, city, telephone)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id
         "#,
      )
      .bind(owner.first_name())
      .bind(owner.last_name())
      .bind(owner.address())
      .bind(owner.city())
      .bind(owner.telephone())
      .fetch_one(&self.pool)
      .await?;

      Ok(OwnerId::new(id))
   }

   async fn update(&self, owner: &Owner) -> Result<(), InfraError> {
      let id = owner
         .id()
         .ok_or_else(|| InfraError::unexpected("未保存の飼い主は更新できません"))?;

      let result = sqlx::query(
         r#"
         UPDATE owners
         SET first_name = $2, last_name = $3, address = $4, city = $5, telephone = $6
         WHERE id = $1
         "#,
      )
      .bind(id.as_i32())
      .bind(owner.first_name())
      .bind(owner.last_name())
      .bind(owner.address())
      .bind(owner.city())
      .bind(owner.telephone())
      .execute(&self.pool)
      .await?;

      if result.rows_affected() == 0 {
         return Err(InfraError::not_found("Owner", id));
      }
      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &OwnerId) -> Result<(), InfraError> {
      let result = sqlx::query("DELETE FROM owners WHERE id = $1")
         .bind(id.as_i32())
         .execute(&self.pool)
         .await?;

      if result.rows_affected() == 0 {
         return Err(InfraError::not_found("Owner", id));
      }
      Ok(())
   }
}
