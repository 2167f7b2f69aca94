use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel};

/// Inserts rows in chunks of at most `batch_size`, keeping each statement
/// below the backend's bind-parameter limit. Returns the number of rows
/// written. An empty input never reaches the database.
pub async fn insert_in_batches<A, I>(
    db: &impl ConnectionTrait,
    rows: I,
    batch_size: usize,
) -> Result<u64, DbErr>
where
    A: ActiveModelTrait,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    I: IntoIterator<Item = A>,
{
    let batch_size = batch_size.max(1);
    let mut rows = rows.into_iter();
    let mut inserted = 0;

    loop {
        let batch: Vec<A> = rows.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }

        let batch_len = batch.len();
        inserted += <A::Entity as EntityTrait>::insert_many(batch)
            .exec_without_returning(db)
            .await?;
        tracing::debug!("Inserted batch of {batch_len} rows ({inserted} so far)");
    }

    Ok(inserted)
}
