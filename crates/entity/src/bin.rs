//! Bin Entity
//!
//! A physical container identified by an asset tag. Bins are the unit that
//! gets loaned.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bin")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub bin_id:             i32,
    #[sea_orm(unique)]
    pub asset_tag:          String,
    pub bin_contents:       Option<String>,
    pub created_by_user_id: i32,
    pub location_id:        i32,
    pub created_at:         chrono::DateTime<chrono::Utc>,
    pub updated_at:         chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::CreatedByUserId",
        to = "super::app_user::Column::AppUserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    CreatedBy,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::LocationId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Location,
    #[sea_orm(has_many = "super::loan::Entity")]
    Loan,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef { Relation::CreatedBy.def() }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef { Relation::Location.def() }
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef { Relation::Loan.def() }
}

impl ActiveModelBehavior for ActiveModel {}
