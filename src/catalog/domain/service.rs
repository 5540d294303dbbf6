use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::assets::domain::AssetRegistry;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::CatalogItemEntity;
use crate::catalog::dto::CatalogItemDto;
use crate::catalog::repository::CatalogRepository;
use crate::core::domain::Configuration;
use crate::core::library::{AssetId, AssetKind, LibraryError, LibraryResult};

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    catalog_repository: Arc<dyn CatalogRepository>,
    asset_registry: Arc<dyn AssetRegistry>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, catalog_repository: Arc<dyn CatalogRepository>,
                      asset_registry: Arc<dyn AssetRegistry>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            catalog_repository,
            asset_registry,
        }
    }
}

fn validate(item: &CatalogItemDto) -> LibraryResult<()> {
    if item.title.trim().is_empty() {
        return Err(LibraryError::validation("title is required", Some("400".to_string())));
    }
    if item.kind == AssetKind::Book && item.isbn.as_deref().map_or(true, |isbn| isbn.trim().is_empty()) {
        return Err(LibraryError::validation(format!("book '{}' requires an isbn",
                                                    item.title).as_str(), Some("400".to_string())));
    }
    if item.number_of_copies < 1 {
        return Err(LibraryError::validation("number of copies must be positive", Some("400".to_string())));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_asset(&self, item: &CatalogItemDto) -> LibraryResult<CatalogItemDto> {
        validate(item)?;
        let mut entity = CatalogItemEntity::from(item);
        entity.asset_id = self.asset_registry.next_id();
        entity.version = 0;
        if entity.branch_id.is_empty() {
            entity.branch_id = self.branch_id.to_string();
        }
        // the copy only starts circulating once its catalog entry exists
        self.catalog_repository.create(&entity).await?;
        self.asset_registry.register(entity.asset_id, entity.kind).await?;
        info!(asset_id = entity.asset_id, kind = %entity.kind, "catalog item added");
        Ok(CatalogItemDto::from(&entity))
    }

    async fn update_asset(&self, item: &CatalogItemDto) -> LibraryResult<CatalogItemDto> {
        validate(item)?;
        let existing = self.catalog_repository.get(item.asset_id).await?;
        if existing.kind != item.kind {
            return Err(LibraryError::validation(format!("asset {} cannot change kind",
                                                        item.asset_id).as_str(), Some("400".to_string())));
        }
        self.catalog_repository.update(&CatalogItemEntity::from(item)).await?;
        self.find_asset_by_id(item.asset_id).await
    }

    async fn find_asset_by_id(&self, asset_id: AssetId) -> LibraryResult<CatalogItemDto> {
        self.catalog_repository.get(asset_id).await.map(|i| CatalogItemDto::from(&i))
    }

    async fn find_asset_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<CatalogItemDto>> {
        let res = self.catalog_repository.find_by_isbn(isbn).await?;
        Ok(res.iter().map(CatalogItemDto::from).collect())
    }
}

impl From<&CatalogItemEntity> for CatalogItemDto {
    fn from(other: &CatalogItemEntity) -> Self {
        Self {
            asset_id: other.asset_id,
            version: other.version,
            kind: other.kind,
            title: other.title.to_string(),
            author_or_director: other.author_or_director.to_string(),
            isbn: other.isbn.clone(),
            year: other.year,
            cost: other.cost,
            image_url: other.image_url.clone(),
            number_of_copies: other.number_of_copies,
            branch_id: other.branch_id.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&CatalogItemDto> for CatalogItemEntity {
    fn from(other: &CatalogItemDto) -> Self {
        Self {
            asset_id: other.asset_id,
            version: other.version,
            kind: other.kind,
            title: other.title.to_string(),
            author_or_director: other.author_or_director.to_string(),
            isbn: other.isbn.clone(),
            year: other.year,
            cost: other.cost,
            image_url: other.image_url.clone(),
            number_of_copies: other.number_of_copies,
            branch_id: other.branch_id.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
