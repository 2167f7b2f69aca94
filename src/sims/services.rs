use super::models::{Entity, Model};
use crate::common::database::insert_in_batches;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

/// Stores the given SIMs in chunks of `batch_size` rows
pub async fn insert_sims(
    db: &impl ConnectionTrait,
    sims: Vec<Model>,
    batch_size: usize,
) -> Result<u64, DbErr> {
    insert_in_batches(
        db,
        sims.into_iter().map(Model::into_insertable),
        batch_size,
    )
    .await
}

pub async fn delete_all_sims(db: &impl ConnectionTrait) -> Result<u64, DbErr> {
    let result = Entity::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}
