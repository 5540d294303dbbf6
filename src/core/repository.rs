use async_trait::async_trait;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity, fails if the stored version moved on
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;
}
