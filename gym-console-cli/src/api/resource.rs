use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use super::{ApiClient, ApiError};
use crate::models::{
    Machine, MachineRequest, MachineUpdate, Member, MemberCreateRequest, MemberUpdate, Plan,
    PlanRequest, PlanUpdate, SessionRequest, SessionUpdate, Trainer, TrainerCreateRequest,
    TrainerUpdate, TrainingSession,
};

/// A REST collection: where it lives and what it exchanges
pub trait ResourceKind {
    /// Collection path relative to the API base, without slashes
    const PATH: &'static str;
    /// Singular noun for messages
    const NAME: &'static str;

    type Record: DeserializeOwned;
    type Create: Serialize;
    type Update: Serialize;
}

pub struct Members;
pub struct Trainers;
pub struct Machines;
pub struct Plans;
pub struct Sessions;

impl ResourceKind for Members {
    const PATH: &'static str = "users/members";
    const NAME: &'static str = "member";
    type Record = Member;
    type Create = MemberCreateRequest;
    type Update = MemberUpdate;
}

impl ResourceKind for Trainers {
    const PATH: &'static str = "users/trainers";
    const NAME: &'static str = "trainer";
    type Record = Trainer;
    type Create = TrainerCreateRequest;
    type Update = TrainerUpdate;
}

impl ResourceKind for Machines {
    const PATH: &'static str = "training/machines";
    const NAME: &'static str = "machine";
    type Record = Machine;
    type Create = MachineRequest;
    type Update = MachineUpdate;
}

impl ResourceKind for Plans {
    const PATH: &'static str = "training/plans";
    const NAME: &'static str = "plan";
    type Record = Plan;
    type Create = PlanRequest;
    type Update = PlanUpdate;
}

impl ResourceKind for Sessions {
    const PATH: &'static str = "training/sessions";
    const NAME: &'static str = "training session";
    type Record = TrainingSession;
    type Create = SessionRequest;
    type Update = SessionUpdate;
}

/// list/get/create/update/delete over one collection
pub struct ResourceClient<K> {
    api: ApiClient,
    _kind: PhantomData<K>,
}

impl<K> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> ResourceClient<K> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _kind: PhantomData,
        }
    }

    fn collection_path() -> String {
        format!("{}/", K::PATH)
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}/", K::PATH, id)
    }

    pub async fn list(&self) -> Result<Vec<K::Record>, ApiError> {
        self.api.get_list(&Self::collection_path(), &[]).await
    }

    /// List with query-string filters, e.g. `trainee_id`
    pub async fn list_filtered(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<K::Record>, ApiError> {
        self.api.get_list(&Self::collection_path(), query).await
    }

    pub async fn get(&self, id: i64) -> Result<K::Record, ApiError> {
        self.api.get_json(&Self::item_path(id)).await
    }

    pub async fn create(&self, payload: &K::Create) -> Result<K::Record, ApiError> {
        let record = self.api.post_json(&Self::collection_path(), payload).await?;
        tracing::info!("Created {}", K::NAME);
        Ok(record)
    }

    pub async fn update(&self, id: i64, partial: &K::Update) -> Result<K::Record, ApiError> {
        let record = self.api.patch_json(&Self::item_path(id), partial).await?;
        tracing::info!("Updated {} {}", K::NAME, id);
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&Self::item_path(id)).await?;
        tracing::info!("Deleted {} {}", K::NAME, id);
        Ok(())
    }
}

impl ResourceClient<Plans> {
    pub async fn list_for_trainee(&self, trainee_id: i64) -> Result<Vec<Plan>, ApiError> {
        self.list_filtered(&[("trainee_id", trainee_id.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_keep_trailing_slash() {
        assert_eq!(
            ResourceClient::<Members>::collection_path(),
            "users/members/"
        );
        assert_eq!(
            ResourceClient::<Sessions>::item_path(12),
            "training/sessions/12/"
        );
    }
}
