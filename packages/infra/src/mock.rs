//! # テスト用モックリポジトリ
//!
//! ユースケーステスト・ハンドラテストで使用するインメモリリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! petclinic-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! [`MockClinicStore`] は 4 つのリポジトリトレイトをすべて実装する。
//! 同じインスタンスを clone して各トレイトオブジェクトとして渡すと、
//! 飼い主・ペット・来院記録が 1 つのストアで整合的に扱われる。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use petclinic_domain::{
   owner::{Owner, OwnerId},
   pet::{Pet, PetId, PetType, PetTypeId},
   vet::Vet,
   visit::{Visit, VisitId},
};

use crate::{
   error::InfraError,
   repository::{OwnerRepository, PetRepository, VetRepository, VisitRepository},
};

#[derive(Default)]
struct StoreState {
   owners:        Vec<Owner>,
   pet_types:     Vec<PetType>,
   vets:          Vec<Vet>,
   next_owner_id: i32,
   next_pet_id:   i32,
   next_visit_id: i32,
}

impl StoreState {
   fn owner_of_pet_mut(&mut self, pet_id: PetId) -> Option<&mut Owner> {
      self.owners
         .iter_mut()
         .find(|o| o.find_pet(pet_id).is_some())
   }
}

// ===== MockClinicStore =====

#[derive(Clone, Default)]
pub struct MockClinicStore {
   state: Arc<Mutex<StoreState>>,
}

impl MockClinicStore {
   pub fn new() -> Self {
      Self::default()
   }

   /// 保存済みの飼い主を追加する
   ///
   /// 採番カウンタは追加した ID より大きい値に進める。
   pub fn add_owner(&self, owner: Owner) {
      let mut state = self.state.lock().unwrap();
      if let Some(id) = owner.id() {
         state.next_owner_id = state.next_owner_id.max(id.as_i32());
      }
      for pet in owner.pets() {
         if let Some(id) = pet.id() {
            state.next_pet_id = state.next_pet_id.max(id.as_i32());
         }
         for visit in pet.visits() {
            if let Some(id) = visit.id() {
               state.next_visit_id = state.next_visit_id.max(id.as_i32());
            }
         }
      }
      state.owners.push(owner);
   }

   pub fn add_pet_type(&self, pet_type: PetType) {
      self.state.lock().unwrap().pet_types.push(pet_type);
   }

   pub fn add_vet(&self, vet: Vet) {
      self.state.lock().unwrap().vets.push(vet);
   }

   /// 保存されている飼い主を取得する（アサーション用）
   pub fn owner(&self, id: OwnerId) -> Option<Owner> {
      self.state
         .lock()
         .unwrap()
         .owners
         .iter()
         .find(|o| o.id() == Some(id))
         .cloned()
   }

   pub fn owner_count(&self) -> usize {
      self.state.lock().unwrap().owners.len()
   }
}

#[async_trait]
impl OwnerRepository for MockClinicStore {
   async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, InfraError> {
      Ok(self.owner(*id))
   }

   async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, InfraError> {
      let mut owners: Vec<Owner> = self
         .state
         .lock()
         .unwrap()
         .owners
         .iter()
         .filter(|o| o.last_name().starts_with(last_name))
         .cloned()
         .collect();
      owners.sort_by(|a, b| a.last_name().cmp(b.last_name()).then(a.id().cmp(&b.id())));
      Ok(owners)
   }

   async fn insert(&self, owner: &Owner) -> Result<OwnerId, InfraError> {
      let mut state = self.state.lock().unwrap();
      state.next_owner_id += 1;
      let id = OwnerId::new(state.next_owner_id);
      state.owners.push(owner.clone().with_id(id));
      Ok(id)
   }

   async fn update(&self, owner: &Owner) -> Result<(), InfraError> {
      let id = owner
         .id()
         .ok_or_else(|| InfraError::unexpected("未保存の飼い主は更新できません"))?;
      let mut state = self.state.lock().unwrap();
      let slot = state
         .owners
         .iter_mut()
         .find(|o| o.id() == Some(id))
         .ok_or_else(|| InfraError::not_found("Owner", id))?;
      *slot = slot.clone().with_profile(owner.profile());
      Ok(())
   }

   async fn delete(&self, id: &OwnerId) -> Result<(), InfraError> {
      let mut state = self.state.lock().unwrap();
      let before = state.owners.len();
      state.owners.retain(|o| o.id() != Some(*id));
      if state.owners.len() == before {
         return Err(InfraError::not_found("Owner", id));
      }
      Ok(())
   }
}

#[async_trait]
impl PetRepository for MockClinicStore {
   async fn find_pet_types(&self) -> Result<Vec<PetType>, InfraError> {
      let mut types = self.state.lock().unwrap().pet_types.clone();
      types.sort_by(|a, b| a.name().cmp(b.name()));
      Ok(types)
   }

   async fn find_pet_type(&self, id: &PetTypeId) -> Result<Option<PetType>, InfraError> {
      Ok(self
         .state
         .lock()
         .unwrap()
         .pet_types
         .iter()
         .find(|t| t.id() == *id)
         .cloned())
   }

   async fn insert(&self, owner_id: &OwnerId, pet: &Pet) -> Result<PetId, InfraError> {
      let mut state = self.state.lock().unwrap();
      state.next_pet_id += 1;
      let id = PetId::new(state.next_pet_id);
      let owner = state
         .owners
         .iter_mut()
         .find(|o| o.id() == Some(*owner_id))
         .ok_or_else(|| InfraError::not_found("Owner", owner_id))?;
      owner.add_pet(pet.clone().with_id(id));
      Ok(id)
   }

   async fn update(&self, pet: &Pet) -> Result<(), InfraError> {
      let id = pet
         .id()
         .ok_or_else(|| InfraError::unexpected("未保存のペットは更新できません"))?;
      let mut state = self.state.lock().unwrap();
      let owner = state
         .owner_of_pet_mut(id)
         .ok_or_else(|| InfraError::not_found("Pet", id))?;
      owner.replace_pet(pet.clone());
      Ok(())
   }
}

#[async_trait]
impl VisitRepository for MockClinicStore {
   async fn insert(&self, visit: &Visit) -> Result<VisitId, InfraError> {
      let mut state = self.state.lock().unwrap();
      state.next_visit_id += 1;
      let id = VisitId::new(state.next_visit_id);
      let pet_id = visit.pet_id();
      let owner = state
         .owner_of_pet_mut(pet_id)
         .ok_or_else(|| InfraError::not_found("Pet", pet_id))?;
      if let Some(mut pet) = owner.find_pet(pet_id).cloned() {
         pet.add_visit(visit.clone().with_id(id));
         owner.replace_pet(pet);
      }
      Ok(id)
   }

   async fn find_by_pet_id(&self, pet_id: &PetId) -> Result<Vec<Visit>, InfraError> {
      let state = self.state.lock().unwrap();
      Ok(state
         .owners
         .iter()
         .find_map(|o| o.find_pet(*pet_id))
         .map(|p| p.visits().to_vec())
         .unwrap_or_default())
   }
}

#[async_trait]
impl VetRepository for MockClinicStore {
   async fn find_all(&self) -> Result<Vec<Vet>, InfraError> {
      let mut vets = self.state.lock().unwrap().vets.clone();
      vets.sort_by(|a, b| {
         a.last_name()
            .cmp(b.last_name())
            .then_with(|| a.first_name().cmp(b.first_name()))
      });
      Ok(vets)
   }
}
