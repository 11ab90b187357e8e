//! # ペット（Pet）とペット種別（PetType）
//!
//! 飼い主が連れてくるペットと、その種別（猫・犬など）を表現する。
//! ペットは来院記録（[`Visit`]）を日付の新しい順に保持する。

use chrono::NaiveDate;

use crate::{DomainError, macros::require_text_within, visit::Visit};

/// ペット名の最大文字数
pub const PET_NAME_MAX_LENGTH: usize = 30;

define_serial_id! {
   /// ペット ID
   pub struct PetId;
}

define_serial_id! {
   /// ペット種別 ID
   pub struct PetTypeId;
}

/// ペット種別（マスタデータ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetType {
   id:   PetTypeId,
   name: String,
}

impl PetType {
   pub fn new(id: PetTypeId, name: impl Into<String>) -> Self {
      Self {
         id,
         name: name.into(),
      }
   }

   pub fn id(&self) -> PetTypeId {
      self.id
   }

   pub fn name(&self) -> &str {
      &self.name
   }
}

/// ペットの属性（登録・更新フォーム）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDetails {
   pub name:       String,
   pub birth_date: NaiveDate,
   pub pet_type:   PetType,
}

impl PetDetails {
   /// 入力値を検証する
   ///
   /// - 名前は必須（前後の空白は除去）で 30 文字まで
   /// - 誕生日は `today` 以前
   pub fn validated(self, today: NaiveDate) -> Result<Self, DomainError> {
      let name = require_text_within(self.name, "ペット名", PET_NAME_MAX_LENGTH)?;
      if self.birth_date > today {
         return Err(DomainError::Validation(
            "誕生日に未来の日付は指定できません".to_string(),
         ));
      }
      Ok(Self { name, ..self })
   }
}

/// ペットエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
   id:         Option<PetId>,
   name:       String,
   birth_date: NaiveDate,
   pet_type:   PetType,
   visits:     Vec<Visit>,
}

impl Pet {
   /// 未保存のペットを作成する
   pub fn new(details: PetDetails) -> Self {
      Self {
         id:         None,
         name:       details.name,
         birth_date: details.birth_date,
         pet_type:   details.pet_type,
         visits:     Vec::new(),
      }
   }

   /// DB から取得したデータで復元する
   pub fn from_db(id: PetId, details: PetDetails, visits: Vec<Visit>) -> Self {
      let mut pet = Self::new(details);
      pet.id = Some(id);
      pet.visits = visits;
      pet.sort_visits();
      pet
   }

   pub fn with_id(self, id: PetId) -> Self {
      Self {
         id: Some(id),
         ..self
      }
   }

   /// 名前・誕生日・種別を差し替えたペットを返す（来院記録はそのまま）
   pub fn with_details(self, details: PetDetails) -> Self {
      Self {
         name: details.name,
         birth_date: details.birth_date,
         pet_type: details.pet_type,
         ..self
      }
   }

   pub fn add_visit(&mut self, visit: Visit) {
      self.visits.push(visit);
      self.sort_visits();
   }

   // 新しい来院が先頭。同日は ID の大きい方が先
   fn sort_visits(&mut self) {
      self.visits
         .sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| b.id().cmp(&a.id())));
   }

   // Getter メソッド

   pub fn id(&self) -> Option<PetId> {
      self.id
   }

   pub fn is_new(&self) -> bool {
      self.id.is_none()
   }

   pub fn name(&self) -> &str {
      &self.name
   }

   pub fn birth_date(&self) -> NaiveDate {
      self.birth_date
   }

   pub fn pet_type(&self) -> &PetType {
      &self.pet_type
   }

   /// 日付の新しい順の来院記録
   pub fn visits(&self) -> &[Visit] {
      &self.visits
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;
   use crate::visit::VisitId;

   fn date(y: i32, m: u32, d: u32) -> NaiveDate {
      NaiveDate::from_ymd_opt(y, m, d).unwrap()
   }

   fn details(name: &str, birth_date: NaiveDate) -> PetDetails {
      PetDetails {
         name: name.to_string(),
         birth_date,
         pet_type: PetType::new(PetTypeId::new(2), "dog"),
      }
   }

   #[test]
   fn test_validatedは名前の空白を除去する() {
      let result = details("  Rosy ", date(2021, 4, 17)).validated(date(2026, 1, 1));

      assert_eq!(result.unwrap().name, "Rosy");
   }

   #[test]
   fn test_validatedは空の名前を拒否する() {
      let result = details(" ", date(2021, 4, 17)).validated(date(2026, 1, 1));

      assert!(matches!(result, Err(DomainError::Validation(_))));
   }

   #[test]
   fn test_validatedは上限を超える名前を拒否し上限ちょうどは許可する() {
      let today = date(2026, 1, 1);
      let at_limit = "R".repeat(PET_NAME_MAX_LENGTH);
      let over_limit = "R".repeat(PET_NAME_MAX_LENGTH + 1);

      assert!(details(&at_limit, date(2021, 4, 17)).validated(today).is_ok());
      assert!(matches!(
         details(&over_limit, date(2021, 4, 17)).validated(today),
         Err(DomainError::Validation(_))
      ));
   }

   #[test]
   fn test_validatedは未来の誕生日を拒否し当日は許可する() {
      let today = date(2026, 1, 1);

      assert!(details("Rosy", date(2026, 1, 2)).validated(today).is_err());
      assert!(details("Rosy", today).validated(today).is_ok());
   }

   #[test]
   fn test_来院記録は新しい順に並ぶ() {
      let pet_id = PetId::new(1);
      let mut pet = Pet::from_db(
         pet_id,
         details("Rosy", date(2021, 4, 17)),
         vec![
            Visit::from_db(VisitId::new(1), pet_id, date(2025, 3, 4), "rabies shot"),
            Visit::from_db(VisitId::new(2), pet_id, date(2025, 6, 4), "neutered"),
         ],
      );
      pet.add_visit(Visit::from_db(VisitId::new(3), pet_id, date(2024, 1, 1), "spayed"));

      let dates: Vec<NaiveDate> = pet.visits().iter().map(|v| v.date()).collect();
      assert_eq!(dates, vec![date(2025, 6, 4), date(2025, 3, 4), date(2024, 1, 1)]);
   }

   #[test]
   fn test_同じ日の来院記録はidの降順に並ぶ() {
      let pet_id = PetId::new(1);
      let same_day = date(2025, 3, 4);
      let mut pet = Pet::from_db(
         pet_id,
         details("Rosy", date(2021, 4, 17)),
         vec![
            Visit::from_db(VisitId::new(1), pet_id, same_day, "rabies shot"),
            Visit::from_db(VisitId::new(3), pet_id, same_day, "spayed"),
         ],
      );
      pet.add_visit(Visit::from_db(VisitId::new(2), pet_id, same_day, "neutered"));

      let ids: Vec<Option<VisitId>> = pet.visits().iter().map(|v| v.id()).collect();
      assert_eq!(
         ids,
         vec![Some(VisitId::new(3)), Some(VisitId::new(2)), Some(VisitId::new(1))]
      );
   }

   #[test]
   fn test_with_detailsは来院記録を保持する() {
      let pet_id = PetId::new(1);
      let pet = Pet::from_db(
         pet_id,
         details("Rosy", date(2021, 4, 17)),
         vec![Visit::from_db(VisitId::new(1), pet_id, date(2025, 3, 4), "rabies shot")],
      );

      let updated = pet.with_details(details("Rosie", date(2021, 4, 18)));

      assert_eq!(updated.name(), "Rosie");
      assert_eq!(updated.visits().len(), 1);
      assert!(!updated.is_new());
   }
}
