//! # 飼い主（Owner）
//!
//! 動物病院の顧客である飼い主と、その連絡先情報を表現する。
//!
//! ## 設計方針
//!
//! - **ID は DB 採番**: 未保存の飼い主は `id == None`（`is_new() == true`）
//! - **ペットは名前順**: 保持するペット一覧は常に名前の昇順（大文字小文字を区別しない）
//! - **入力検証はフォーム側**: [`OwnerProfile::validated`] で検証し、エンティティ自体は
//!   DB から読み込んだ値をそのまま保持する
//!
//! ## 使用例
//!
//! ```rust
//! use petclinic_domain::owner::{Owner, OwnerId, OwnerProfile};
//!
//! let profile = OwnerProfile {
//!    first_name: " Betty ".to_string(),
//!    last_name:  "Davis".to_string(),
//!    address:    "638 Cardinal Ave.".to_string(),
//!    city:       "Sun Prairie".to_string(),
//!    telephone:  "6085551749".to_string(),
//! }
//! .validated()
//! .unwrap();
//!
//! let owner = Owner::new(profile).with_id(OwnerId::new(2));
//! assert_eq!(owner.first_name(), "Betty");
//! assert!(!owner.is_new());
//! ```

use crate::{
   DomainError,
   macros::{require_text, require_text_within},
   pet::{Pet, PetId},
};

/// 電話番号の最大桁数
pub const TELEPHONE_MAX_DIGITS: usize = 10;
/// 氏名（名・姓それぞれ）の最大文字数
pub const NAME_MAX_LENGTH: usize = 30;
/// 住所の最大文字数
pub const ADDRESS_MAX_LENGTH: usize = 255;
/// 市区町村の最大文字数
pub const CITY_MAX_LENGTH: usize = 80;

define_serial_id! {
   /// 飼い主 ID
   pub struct OwnerId;
}

/// 飼い主の連絡先情報（登録・更新フォーム）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerProfile {
   pub first_name: String,
   pub last_name:  String,
   pub address:    String,
   pub city:       String,
   pub telephone:  String,
}

impl OwnerProfile {
   /// 入力値を検証し、前後の空白を除去したプロフィールを返す
   ///
   /// # バリデーション
   ///
   /// - 氏名・住所・市区町村は必須
   /// - 名・姓は 30 文字、住所は 255 文字、市区町村は 80 文字まで
   /// - 電話番号は数字のみ 1〜10 桁
   pub fn validated(self) -> Result<Self, DomainError> {
      let telephone = require_text(self.telephone, "電話番号")?;
      if telephone.len() > TELEPHONE_MAX_DIGITS || !telephone.chars().all(|c| c.is_ascii_digit())
      {
         return Err(DomainError::Validation(format!(
            "電話番号は {TELEPHONE_MAX_DIGITS} 桁以内の数字である必要があります"
         )));
      }

      Ok(Self {
         first_name: require_text_within(self.first_name, "名", NAME_MAX_LENGTH)?,
         last_name: require_text_within(self.last_name, "姓", NAME_MAX_LENGTH)?,
         address: require_text_within(self.address, "住所", ADDRESS_MAX_LENGTH)?,
         city: require_text_within(self.city, "市区町村", CITY_MAX_LENGTH)?,
         telephone,
      })
   }
}

/// 飼い主エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
   id:         Option<OwnerId>,
   first_name: String,
   last_name:  String,
   address:    String,
   city:       String,
   telephone:  String,
   pets:       Vec<Pet>,
}

impl Owner {
   /// 未保存の飼い主を作成する（ペットなし）
   pub fn new(profile: OwnerProfile) -> Self {
      Self {
         id:         None,
         first_name: profile.first_name,
         last_name:  profile.last_name,
         address:    profile.address,
         city:       profile.city,
         telephone:  profile.telephone,
         pets:       Vec::new(),
      }
   }

   /// DB から取得したデータで復元する
   pub fn from_db(id: OwnerId, profile: OwnerProfile, pets: Vec<Pet>) -> Self {
      let mut owner = Self::new(profile);
      owner.id = Some(id);
      owner.pets = pets;
      owner.sort_pets();
      owner
   }

   /// 採番された ID を設定した飼い主を返す
   pub fn with_id(self, id: OwnerId) -> Self {
      Self {
         id: Some(id),
         ..self
      }
   }

   /// 連絡先情報を差し替えた飼い主を返す（ペットはそのまま）
   pub fn with_profile(self, profile: OwnerProfile) -> Self {
      Self {
         first_name: profile.first_name,
         last_name: profile.last_name,
         address: profile.address,
         city: profile.city,
         telephone: profile.telephone,
         ..self
      }
   }

   /// ペットを追加する
   pub fn add_pet(&mut self, pet: Pet) {
      self.pets.push(pet);
      self.sort_pets();
   }

   /// 保持しているペットを差し替える（ID で照合）
   ///
   /// 該当するペットがいない場合は `false` を返す。
   pub fn replace_pet(&mut self, pet: Pet) -> bool {
      let Some(pet_id) = pet.id() else {
         return false;
      };
      let Some(slot) = self.pets.iter_mut().find(|p| p.id() == Some(pet_id)) else {
         return false;
      };
      *slot = pet;
      self.sort_pets();
      true
   }

   /// 名前でペットを検索する（大文字小文字を区別しない）
   ///
   /// `excluding` を指定すると、その ID のペットは照合対象から外す。
   /// ペット名変更時の重複チェックで使用する。
   pub fn find_pet_by_name(&self, name: &str, excluding: Option<PetId>) -> Option<&Pet> {
      let name = name.to_lowercase();
      self.pets
         .iter()
         .filter(|p| excluding.is_none() || p.id() != excluding)
         .find(|p| p.name().to_lowercase() == name)
   }

   /// ID でペットを検索する
   pub fn find_pet(&self, pet_id: PetId) -> Option<&Pet> {
      self.pets.iter().find(|p| p.id() == Some(pet_id))
   }

   fn sort_pets(&mut self) {
      self.pets.sort_by_key(|p| p.name().to_lowercase());
   }

   // Getter メソッド

   pub fn id(&self) -> Option<OwnerId> {
      self.id
   }

   /// 未保存（ID 未採番）かどうか
   pub fn is_new(&self) -> bool {
      self.id.is_none()
   }

   pub fn first_name(&self) -> &str {
      &self.first_name
   }

   pub fn last_name(&self) -> &str {
      &self.last_name
   }

   pub fn address(&self) -> &str {
      &self.address
   }

   pub fn city(&self) -> &str {
      &self.city
   }

   pub fn telephone(&self) -> &str {
      &self.telephone
   }

   /// 名前順のペット一覧
   pub fn pets(&self) -> &[Pet] {
      &self.pets
   }

   /// 連絡先情報を取り出す
   pub fn profile(&self) -> OwnerProfile {
      OwnerProfile {
         first_name: self.first_name.clone(),
         last_name:  self.last_name.clone(),
         address:    self.address.clone(),
         city:       self.city.clone(),
         telephone:  self.telephone.clone(),
      }
   }
}
