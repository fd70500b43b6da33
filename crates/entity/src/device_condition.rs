//! Device Condition Entity
//!
//! Condition grades recorded when a loan starts and when it is returned.
//! Loans reference this table twice, so the relations live on the loan side.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "device_condition")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub device_condition_id:   i32,
    #[sea_orm(unique)]
    pub device_condition_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
