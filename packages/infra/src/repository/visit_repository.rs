//! # VisitRepository
//!
//! 来院記録の永続化を担当するリポジトリ。

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use petclinic_domain::{
   pet::PetId,
   visit::{Visit, VisitId},
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 来院記録リポジトリトレイト
#[async_trait]
pub trait VisitRepository: Send + Sync {
   /// 来院記録を挿入し、採番された ID を返す
   async fn insert(&self, visit: &Visit) -> Result<VisitId, InfraError>;

   /// ペットの来院記録を日付の新しい順で取得する
   async fn find_by_pet_id(&self, pet_id: &PetId) -> Result<Vec<Visit>, InfraError>;
}

/// PostgreSQL 実装の VisitRepository
#[derive(Debug, Clone)]
pub struct PostgresVisitRepository {
   pool: PgPool,
}

impl PostgresVisitRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[derive(Debug, sqlx::FromRow)]
struct VisitRow {
   id:          i32,
   pet_id:      i32,
   visit_date:  NaiveDate,
   description: String,
}

impl From<VisitRow> for Visit {
   fn from(row: VisitRow) -> Self {
      Visit::from_db(
         VisitId::new(row.id),
         PetId::new(row.pet_id),
         row.visit_date,
         row.description,
      )
   }
}

/// 指定したペット群の来院記録を取得し、ペット ID ごとにまとめる
pub(crate) async fn load_visits_by_pet(
   pool: &PgPool,
   pet_ids: &[i32],
) -> Result<HashMap<i32, Vec<Visit>>, InfraError> {
   if pet_ids.is_empty() {
      return Ok(HashMap::new());
   }

   let rows = sqlx::query_as::<_, VisitRow>(
      r#"
      SELECT id, pet_id, visit_date, description
      FROM visits
      WHERE pet_id = ANY($1)
      ORDER BY visit_date DESC, id DESC
      "#,
   )
   .bind(pet_ids)
   .fetch_all(pool)
   .await?;

   let mut visits: HashMap<i32, Vec<Visit>> = HashMap::new();
   for row in rows {
      visits.entry(row.pet_id).or_default().push(Visit::from(row));
   }
   Ok(visits)
}

#[async_trait]
impl VisitRepository for PostgresVisitRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(pet_id = %visit.pet_id()))]
   async fn insert(&self, visit: &Visit) -> Result<VisitId, InfraError> {
      let id: i32 = sqlx::query_scalar(
         r#"
         INSERT INTO visits (pet_id, visit_date, description)
         VALUES ($1, $2, $3)
         RETURNING id
         "#,
      )
      .bind(visit.pet_id().as_i32())
      .bind(visit.date())
      .bind(visit.description())
      .fetch_one(&self.pool)
      .await?;

      Ok(VisitId::new(id))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%pet_id))]
   async fn find_by_pet_id(&self, pet_id: &PetId) -> Result<Vec<Visit>, InfraError> {
      let rows = sqlx::query_as::<_, VisitRow>(
         r#"
         SELECT id, pet_id, visit_date, description
         FROM visits
         WHERE pet_id = $1
         ORDER BY visit_date DESC, id DESC
         "#,
      )
      .bind(pet_id.as_i32())
      .fetch_all(&self.pool)
      .await?;

      Ok(rows.into_iter().map(Visit::from).collect())
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_トレイトはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresVisitRepository>();
   }
}
