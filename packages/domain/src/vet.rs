//! # 獣医（Vet）と専門分野（Specialty）
//!
//! 獣医一覧は参照専用のマスタデータであり、アプリケーションからは更新しない。

define_serial_id! {
   /// 獣医 ID
   pub struct VetId;
}

define_serial_id! {
   /// 専門分野 ID
   pub struct SpecialtyId;
}

/// 専門分野（radiology, surgery など）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specialty {
   id:   SpecialtyId,
   name: String,
}

impl Specialty {
   pub fn new(id: SpecialtyId, name: impl Into<String>) -> Self {
      Self {
         id,
         name: name.into(),
      }
   }

   pub fn id(&self) -> SpecialtyId {
      self.id
   }

   pub fn name(&self) -> &str {
      &self.name
   }
}

/// 獣医エンティティ
///
/// 専門分野は名前順で保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vet {
   id:          VetId,
   first_name:  String,
   last_name:   String,
   specialties: Vec<Specialty>,
}

impl Vet {
   pub fn new(
      id: VetId,
      first_name: impl Into<String>,
      last_name: impl Into<String>,
      mut specialties: Vec<Specialty>,
   ) -> Self {
      specialties.sort_by(|a, b| a.name().cmp(b.name()));
      Self {
         id,
         first_name: first_name.into(),
         last_name: last_name.into(),
         specialties,
      }
   }

   pub fn id(&self) -> VetId {
      self.id
   }

   pub fn first_name(&self) -> &str {
      &self.first_name
   }

   pub fn last_name(&self) -> &str {
      &self.last_name
   }

   pub fn specialties(&self) -> &[Specialty] {
      &self.specialties
   }

   pub fn nr_of_specialties(&self) -> usize {
      self.specialties.len()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_専門分野は名前順に並ぶ() {
      let vet = Vet::new(
         VetId::new(3),
         "Linda",
         "Douglas",
         vec![
            Specialty::new(SpecialtyId::new(3), "dentistry"),
            Specialty::new(SpecialtyId::new(2), "surgery"),
            Specialty::new(SpecialtyId::new(1), "anesthesia"),
         ],
      );

      let names: Vec<&str> = vet.specialties().iter().map(|s| s.name()).collect();
      assert_eq!(names, vec!["anesthesia", "dentistry", "surgery"]);
      assert_eq!(vet.nr_of_specialties(), 3);
   }

   #[test]
   fn test_専門分野なしの獣医() {
      let vet = Vet::new(VetId::new(1), "James", "Carter", Vec::new());

      assert_eq!(vet.nr_of_specialties(), 0);
   }
}
