//! # VetRepository
//!
//! 獣医と専門分野（マスタ）の読み取りを担当するリポジトリ。
//! 獣医データはマイグレーションで投入され、アプリケーションからは更新しない。

use std::collections::HashMap;

use async_trait::async_trait;
use petclinic_domain::vet::{Specialty, SpecialtyId, Vet, VetId};
use sqlx::PgPool;

use crate::error::InfraError;

/// 獣医リポジトリトレイト
#[async_trait]
pub trait VetRepository: Send + Sync {
   /// 獣医を専門分野付きで全件取得する（姓・名の順）
   async fn find_all(&self) -> Result<Vec<Vet>, InfraError>;
}

/// PostgreSQL 実装の VetRepository
#[derive(Debug, Clone)]
pub struct PostgresVetRepository {
   pool: PgPool,
}

impl PostgresVetRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[derive(Debug, sqlx::FromRow)]
struct VetRow {
   id:         i32,
   first_name: String,
   last_name:  String,
}

#[derive(Debug, sqlx::FromRow)]
struct VetSpecialtyRow {
   vet_id: i32,
   id:     i32,
   name:   String,
}

#[async_trait]
impl VetRepository for PostgresVetRepository {
   async fn find_all(&self) -> Result<Vec<Vet>, InfraError> {
      let vets = sqlx::query_as::<_, VetRow>(
         "SELECT id, first_name, last_name FROM vets ORDER BY last_name ASC, first_name ASC",
      )
      .fetch_all(&self.pool)
      .await?;

      let specialty_rows = sqlx::query_as::<_, VetSpecialtyRow>(
         r#"
         SELECT vs.vet_id, s.id, s.name
         FROM vet_specialties vs
         INNER JOIN specialties s ON s.id = vs.specialty_id
         "#,
      )
      .fetch_all(&self.pool)
      .await?;

      let mut specialties: HashMap<i32, Vec<Specialty>> = HashMap::new();
      for row in specialty_rows {
         specialties
            .entry(row.vet_id)
            .or_default()
            .push(Specialty::new(SpecialtyId::new(row.id), row.name));
      }

      Ok(vets
         .into_iter()
         .map(|row| {
            Vet::new(
               VetId::new(row.id),
               row.first_name,
               row.last_name,
               specialties.remove(&row.id).unwrap_or_default(),
            )
         })
         .collect())
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_トレイトはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresVetRepository>();
   }
}
