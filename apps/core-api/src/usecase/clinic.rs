//! # 動物病院ユースケース
//!
//! 飼い主・ペット・来院記録・獣医に関する操作をまとめる。
//!
//! ## 設計方針
//!
//! - **リポジトリはトレイトオブジェクト**: `Arc<dyn OwnerRepository>` などをコンストラクタで受け取る
//! - **「今日」は Clock から取得**: 来院日のデフォルトと誕生日の検証をテストで固定できる
//! - **飼い主削除の失敗は区別しない**: ゲートウェイのエラーはすべて [`CoreApiError::OwnerDeletion`]

use std::sync::Arc;

use chrono::NaiveDate;
use petclinic_domain::{
    DomainError,
    clock::Clock,
    owner::{Owner, OwnerId, OwnerProfile},
    pet::{Pet, PetDetails, PetId, PetType, PetTypeId},
    vet::Vet,
    visit::Visit,
};
use petclinic_infra::repository::{
    OwnerRepository,
    PetRepository,
    VetRepository,
    VisitRepository,
};

use crate::error::CoreApiError;

/// ペット登録・更新の入力
pub struct PetInput {
    pub name:       String,
    pub birth_date: NaiveDate,
    pub type_id:    PetTypeId,
}

/// 来院記録登録の入力
pub struct VisitInput {
    /// 未指定の場合は今日
    pub date:        Option<NaiveDate>,
    pub description: String,
}

/// 動物病院ユースケース
pub struct ClinicUseCaseImpl {
    owner_repository: Arc<dyn OwnerRepository>,
    pet_repository:   Arc<dyn PetRepository>,
    visit_repository: Arc<dyn VisitRepository>,
    vet_repository:   Arc<dyn VetRepository>,
    clock:            Arc<dyn Clock>,
}

impl ClinicUseCaseImpl {
    pub fn new(
        owner_repository: Arc<dyn OwnerRepository>,
        pet_repository: Arc<dyn PetRepository>,
        visit_repository: Arc<dyn VisitRepository>,
        vet_repository: Arc<dyn VetRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            owner_repository,
            pet_repository,
            visit_repository,
            vet_repository,
            clock,
        }
    }

    // ===== 飼い主 =====

    /// ID で飼い主を取得する
    pub async fn find_owner(&self, id: OwnerId) -> Result<Owner, CoreApiError> {
        self.owner_repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound {
                    entity_type: "Owner",
                    id:          id.to_string(),
                }
                .into()
            })
    }

    /// 姓の前方一致で飼い主を検索する
    pub async fn find_owners(&self, last_name: &str) -> Result<Vec<Owner>, CoreApiError> {
        Ok(self
            .owner_repository
            .find_by_last_name(last_name.trim())
            .await?)
    }

    /// 飼い主を登録する
    pub async fn create_owner(&self, profile: OwnerProfile) -> Result<Owner, CoreApiError> {
        let owner = Owner::new(profile.validated()?);
        let id = self.owner_repository.insert(&owner).await?;

        tracing::info!(owner_id = %id, "飼い主を登録しました");
        Ok(owner.with_id(id))
    }

    /// 飼い主の連絡先情報を更新する（ペットはそのまま）
    pub async fn update_owner(
        &self,
        id: OwnerId,
        profile: OwnerProfile,
    ) -> Result<Owner, CoreApiError> {
        let profile = profile.validated()?;
        let owner = self.find_owner(id).await?.with_profile(profile);
        self.owner_repository.update(&owner).await?;
        Ok(owner)
    }

    /// 飼い主を削除する
    ///
    /// 所有するペット・来院記録も同時に削除される。
    pub async fn delete_owner(&self, id: OwnerId) -> Result<(), CoreApiError> {
        self.owner_repository
            .delete(&id)
            .await
            .map_err(CoreApiError::OwnerDeletion)?;

        tracing::info!(owner_id = %id, "飼い主を削除しました");
        Ok(())
    }

    // ===== ペット =====

    /// ペット種別を名前順で取得する
    pub async fn find_pet_types(&self) -> Result<Vec<PetType>, CoreApiError> {
        Ok(self.pet_repository.find_pet_types().await?)
    }

    /// 飼い主にペットを登録する
    ///
    /// 同じ飼い主が同名（大文字小文字を区別しない）のペットを持っている場合は 409。
    pub async fn add_pet(&self, owner_id: OwnerId, input: PetInput) -> Result<Pet, CoreApiError> {
        let owner = self.find_owner(owner_id).await?;
        let details = self.validate_pet(input).await?;

        if owner.find_pet_by_name(&details.name, None).is_some() {
            return Err(duplicate_pet_name(&details.name));
        }

        let pet = Pet::new(details);
        let id = self.pet_repository.insert(&owner_id, &pet).await?;

        tracing::info!(owner_id = %owner_id, pet_id = %id, "ペットを登録しました");
        Ok(pet.with_id(id))
    }

    /// 飼い主のペットを更新する
    pub async fn update_pet(
        &self,
        owner_id: OwnerId,
        pet_id: PetId,
        input: PetInput,
    ) -> Result<Pet, CoreApiError> {
        let owner = self.find_owner(owner_id).await?;
        let pet = find_owned_pet(&owner, pet_id)?.clone();
        let details = self.validate_pet(input).await?;

        if owner.find_pet_by_name(&details.name, Some(pet_id)).is_some() {
            return Err(duplicate_pet_name(&details.name));
        }

        let pet = pet.with_details(details);
        self.pet_repository.update(&pet).await?;
        Ok(pet)
    }

    async fn validate_pet(&self, input: PetInput) -> Result<PetDetails, CoreApiError> {
        let pet_type = self
            .pet_repository
            .find_pet_type(&input.type_id)
            .await?
            .ok_or_else(|| {
                CoreApiError::BadRequest(format!(
                    "ペット種別が存在しません: id={}",
                    input.type_id
                ))
            })?;

        Ok(PetDetails {
            name: input.name,
            birth_date: input.birth_date,
            pet_type,
        }
        .validated(self.clock.today())?)
    }

    // ===== 来院記録 =====

    /// ペットの来院記録を登録する
    pub async fn add_visit(
        &self,
        owner_id: OwnerId,
        pet_id: PetId,
        input: VisitInput,
    ) -> Result<Visit, CoreApiError> {
        let owner = self.find_owner(owner_id).await?;
        find_owned_pet(&owner, pet_id)?;

        let date = input.date.unwrap_or_else(|| self.clock.today());
        let visit = Visit::new(pet_id, date, input.description)?;
        let id = self.visit_repository.insert(&visit).await?;

        tracing::info!(pet_id = %pet_id, visit_id = %id, "来院記録を登録しました");
        Ok(visit.with_id(id))
    }

    /// ペットの来院記録を新しい順で取得する
    pub async fn find_visits(
        &self,
        owner_id: OwnerId,
        pet_id: PetId,
    ) -> Result<Vec<Visit>, CoreApiError> {
        let owner = self.find_owner(owner_id).await?;
        find_owned_pet(&owner, pet_id)?;

        Ok(self.visit_repository.find_by_pet_id(&pet_id).await?)
    }

    // ===== 獣医 =====

    /// 獣医を専門分野付きで取得する
    pub async fn find_vets(&self) -> Result<Vec<Vet>, CoreApiError> {
        Ok(self.vet_repository.find_all().await?)
    }
}

fn find_owned_pet(owner: &Owner, pet_id: PetId) -> Result<&Pet, CoreApiError> {
    owner.find_pet(pet_id).ok_or_else(|| {
        DomainError::NotFound {
            entity_type: "Pet",
            id:          pet_id.to_string(),
        }
        .into()
    })
}

fn duplicate_pet_name(name: &str) -> CoreApiError {
    CoreApiError::Conflict(format!("同じ名前のペットが既に登録されています: {name}"))
}
