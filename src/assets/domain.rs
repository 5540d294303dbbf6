use async_trait::async_trait;
use crate::assets::dto::AssetDto;
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, AssetKind, AssetStatus, LibraryResult};

pub mod model;
pub mod service;

pub trait Asset: Identifiable {
    fn kind(&self) -> AssetKind;
    fn status(&self) -> AssetStatus;
}

// AssetRegistry owns the circulation status of every copy. Only the circulation engine
// calls set_status, always as part of a transition.
#[async_trait]
pub trait AssetRegistry: Sync + Send {
    // allocates the id a new copy will be registered under
    fn next_id(&self) -> AssetId;
    async fn register(&self, asset_id: AssetId, kind: AssetKind) -> LibraryResult<AssetDto>;
    async fn get(&self, asset_id: AssetId) -> LibraryResult<AssetDto>;
    async fn get_status(&self, asset_id: AssetId) -> LibraryResult<AssetStatus>;
    async fn set_status(&self, asset_id: AssetId, status: AssetStatus) -> LibraryResult<AssetDto>;
}
