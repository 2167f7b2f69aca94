use crate::sims::models::Sim;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Status of a device that has been configured in the warehouse
pub const READY_STATUS: &str = "READY";
/// Operating temperature range (inclusive) a device must declare to be sold
pub const MIN_SALE_TEMPERATURE: f32 = -25.0;
pub const MAX_SALE_TEMPERATURE: f32 = 85.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub status: Option<String>,
    pub temperature: Option<f32>,
    #[sea_orm(unique)]
    pub sim_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::sims::models::Entity",
        from = "Column::SimId",
        to = "crate::sims::models::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Sim,
}

impl Related<crate::sims::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sim.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// An IoT device as exposed by the API, with its SIM resolved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Device {
    pub id: i64,
    pub status: Option<String>,
    pub temperature: Option<f32>,
    pub sim: Option<Sim>,
}

impl Device {
    pub fn from_parts(model: Model, sim: Option<Sim>) -> Self {
        Self {
            id: model.id,
            status: model.status,
            temperature: model.temperature,
            sim,
        }
    }

    /// READY, with a SIM, and a temperature inside the sale range
    pub fn is_available_for_sale(&self) -> bool {
        self.sim.is_some()
            && self.status.as_deref() == Some(READY_STATUS)
            && self.temperature.is_some_and(|temperature| {
                (MIN_SALE_TEMPERATURE..=MAX_SALE_TEMPERATURE).contains(&temperature)
            })
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device(id={}, status=", self.id)?;
        match &self.status {
            Some(status) => write!(f, "{status}")?,
            None => f.write_str("null")?,
        }
        f.write_str(", temperature=")?;
        match self.temperature {
            Some(temperature) => write!(f, "{temperature}")?,
            None => f.write_str("null")?,
        }
        f.write_str(", sim=")?;
        match &self.sim {
            Some(sim) => write!(f, "{sim})"),
            None => f.write_str("null)"),
        }
    }
}

/// Full replacement of a device. The `id` in the body is accepted but the
/// path id always selects the record.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct DeviceUpdate {
    pub id: Option<i64>,
    pub status: Option<String>,
    pub temperature: Option<f32>,
    pub sim: Option<SimReference>,
}

/// Points at an existing SIM; any other SIM fields sent along are ignored
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct SimReference {
    pub id: i64,
}

/// A device about to be stored; the id is assigned by the database
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewDevice {
    pub status: Option<String>,
    pub temperature: Option<f32>,
    pub sim_id: Option<i64>,
}

impl From<NewDevice> for ActiveModel {
    fn from(device: NewDevice) -> Self {
        ActiveModel {
            id: NotSet,
            status: Set(device.status),
            temperature: Set(device.temperature),
            sim_id: Set(device.sim_id),
        }
    }
}
