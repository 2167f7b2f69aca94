use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Lifecycle state of a SIM card, stored as its display string
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum SimStatus {
    #[sea_orm(string_value = "Active")]
    #[serde(rename = "Active")]
    Active,
    #[sea_orm(string_value = "Waiting for activation")]
    #[serde(rename = "Waiting for activation")]
    WaitingForActivation,
    #[sea_orm(string_value = "Deactivated")]
    #[serde(rename = "Deactivated")]
    Deactivated,
    #[sea_orm(string_value = "Blocked")]
    #[serde(rename = "Blocked")]
    Blocked,
}

impl SimStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SimStatus::Active => "Active",
            SimStatus::WaitingForActivation => "Waiting for activation",
            SimStatus::Deactivated => "Deactivated",
            SimStatus::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for SimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A SIM card. Ids are assigned by whoever registers the card.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Sim)]
#[sea_orm(table_name = "sims")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub operator_code: i32,
    pub country: String,
    pub status: SimStatus,
}

pub type Sim = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "crate::devices::models::Entity")]
    Device,
}

impl Related<crate::devices::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Active model with every column set, ready for insertion
    pub fn into_insertable(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            operator_code: Set(self.operator_code),
            country: Set(self.country),
            status: Set(self.status),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sim(id={}, operatorCode={}, country={}, status={})",
            self.id, self.operator_code, self.country, self.status
        )
    }
}
