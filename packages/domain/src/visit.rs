//! # 来院記録（Visit）
//!
//! ペットの来院日と診療内容を表現する。

use chrono::NaiveDate;

use crate::{DomainError, macros::require_text_within, pet::PetId};

/// 診療内容の最大文字数
pub const DESCRIPTION_MAX_LENGTH: usize = 255;

define_serial_id! {
   /// 来院記録 ID
   pub struct VisitId;
}

/// 来院記録エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
   id:          Option<VisitId>,
   pet_id:      PetId,
   date:        NaiveDate,
   description: String,
}

impl Visit {
   /// 未保存の来院記録を作成する
   ///
   /// 診療内容は必須（前後の空白は除去）で 255 文字まで。
   pub fn new(
      pet_id: PetId,
      date: NaiveDate,
      description: impl Into<String>,
   ) -> Result<Self, DomainError> {
      Ok(Self {
         id: None,
         pet_id,
         date,
         description: require_text_within(description.into(), "診療内容", DESCRIPTION_MAX_LENGTH)?,
      })
   }

   /// DB から取得したデータで復元する
   pub fn from_db(
      id: VisitId,
      pet_id: PetId,
      date: NaiveDate,
      description: impl Into<String>,
   ) -> Self {
      Self {
         id: Some(id),
         pet_id,
         date,
         description: description.into(),
      }
   }

   pub fn with_id(self, id: VisitId) -> Self {
      Self {
         id: Some(id),
         ..self
      }
   }

   pub fn id(&self) -> Option<VisitId> {
      self.id
   }

   pub fn is_new(&self) -> bool {
      self.id.is_none()
   }

   pub fn pet_id(&self) -> PetId {
      self.pet_id
   }

   pub fn date(&self) -> NaiveDate {
      self.date
   }

   pub fn description(&self) -> &str {
      &self.description
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_newは未保存の来院記録を作成する() {
      let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

      let visit = Visit::new(PetId::new(7), date, " rabies shot ").unwrap();

      assert!(visit.is_new());
      assert_eq!(visit.description(), "rabies shot");
      assert_eq!(visit.pet_id(), PetId::new(7));
   }

   #[test]
   fn test_newは空の診療内容を拒否する() {
      let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

      let result = Visit::new(PetId::new(7), date, "");

      assert!(matches!(result, Err(DomainError::Validation(_))));
   }

   #[test]
   fn test_newは上限を超える診療内容を拒否する() {
      let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

      let result = Visit::new(PetId::new(7), date, "x".repeat(DESCRIPTION_MAX_LENGTH + 1));

      assert!(matches!(result, Err(DomainError::Validation(_))));
   }
}
