use super::models::{
    ActiveModel, Column, Device, DeviceUpdate, Entity, MAX_SALE_TEMPERATURE,
    MIN_SALE_TEMPERATURE, NewDevice, READY_STATUS,
};
use crate::common::database::insert_in_batches;
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::sims::models::{self as sims, SimStatus};
use crate::{not_found, validation_error};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

fn into_devices(rows: Vec<(super::models::Model, Option<sims::Model>)>) -> Vec<Device> {
    rows.into_iter()
        .map(|(device, sim)| Device::from_parts(device, sim))
        .collect()
}

/// Devices whose SIM is waiting for activation, in device id order
pub async fn find_waiting_activation(db: &impl ConnectionTrait) -> Result<Vec<Device>, DbErr> {
    let rows = Entity::find()
        .find_also_related(sims::Entity)
        .filter(sims::Column::Status.eq(SimStatus::WaitingForActivation))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;

    Ok(into_devices(rows))
}

/// Devices that can be sold, ordered by the id of their SIM.
///
/// A device qualifies when it is READY, has a SIM, and declares a
/// temperature within [`MIN_SALE_TEMPERATURE`, `MAX_SALE_TEMPERATURE`].
pub async fn find_available_for_sale(db: &impl ConnectionTrait) -> Result<Vec<Device>, DbErr> {
    let rows = Entity::find()
        .find_also_related(sims::Entity)
        .filter(sims::Column::Id.is_not_null())
        .filter(Column::Status.eq(READY_STATUS))
        .filter(Column::Temperature.between(MIN_SALE_TEMPERATURE, MAX_SALE_TEMPERATURE))
        .order_by_asc(sims::Column::Id)
        .all(db)
        .await?;

    Ok(into_devices(rows))
}

/// Stores a single device and returns it with its SIM resolved
pub async fn create_device(db: &impl ConnectionTrait, device: NewDevice) -> Result<Device, DbErr> {
    let model = ActiveModel::from(device).insert(db).await?;
    let sim = match model.sim_id {
        Some(sim_id) => sims::Entity::find_by_id(sim_id).one(db).await?,
        None => None,
    };

    Ok(Device::from_parts(model, sim))
}

pub async fn insert_devices(
    db: &impl ConnectionTrait,
    devices: Vec<NewDevice>,
    batch_size: usize,
) -> Result<u64, DbErr> {
    insert_in_batches(db, devices.into_iter().map(ActiveModel::from), batch_size).await
}

/// Overwrites status, temperature and SIM of device `id` with `update`.
///
/// The SIM is looked up by id and must exist. Attaching a SIM that already
/// belongs to another device is rejected by the unique index on `sim_id`.
pub async fn update_device(
    db: &impl ConnectionTrait,
    id: i64,
    update: DeviceUpdate,
) -> BusinessResult<Device> {
    let existing = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| e.to_business_error("device"))?
        .ok_or_else(|| not_found!("device", id))?;

    if let Some(body_id) = update.id.filter(|body_id| *body_id != id) {
        tracing::debug!("Ignoring body id {body_id} while updating device {id}");
    }

    let sim = match update.sim {
        Some(reference) => Some(
            sims::Entity::find_by_id(reference.id)
                .one(db)
                .await
                .map_err(|e| e.to_business_error("sim"))?
                .ok_or_else(|| {
                    validation_error!(
                        "sim",
                        format!("SIM with id {} does not exist", reference.id)
                    )
                })?,
        ),
        None => None,
    };

    let mut device: ActiveModel = existing.into();
    device.status = Set(update.status);
    device.temperature = Set(update.temperature);
    device.sim_id = Set(sim.as_ref().map(|sim| sim.id));

    let updated = device.update(db).await.map_err(|e| match e {
        // Lost a race against a concurrent delete
        DbErr::RecordNotUpdated => not_found!("device", id),
        other => other.to_business_error("device"),
    })?;

    Ok(Device::from_parts(updated, sim))
}

/// Removes device `id`. Its SIM, if any, is left in place.
pub async fn delete_device(db: &impl ConnectionTrait, id: i64) -> BusinessResult<()> {
    let result = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| e.to_business_error("device"))?;

    if result.rows_affected == 0 {
        return Err(not_found!("device", id));
    }

    Ok(())
}

pub async fn delete_all_devices(db: &impl ConnectionTrait) -> Result<u64, DbErr> {
    let result = Entity::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}
