//! Location Entity
//!
//! Physical sites where devices and bins are kept.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "location")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub location_id:    i32,
    pub location_name:  String,
    pub street_address: Option<String>,
    pub city:           Option<String>,
    pub state:          Option<String>,
    pub zip_code:       Option<String>,
    pub contact_number: Option<String>,
    pub created_at:     chrono::DateTime<chrono::Utc>,
    pub updated_at:     chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::device::Entity")]
    Device,
    #[sea_orm(has_many = "super::bin::Entity")]
    Bin,
    #[sea_orm(has_many = "super::user_location_access::Entity")]
    UserLocationAccess,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef { Relation::Device.def() }
}

impl Related<super::bin::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bin.def() }
}

impl Related<super::user_location_access::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserLocationAccess.def() }
}

impl ActiveModelBehavior for ActiveModel {}
