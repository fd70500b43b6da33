//! App User Entity
//!
//! Citizens and staff. Every user belongs to exactly one role and may be
//! granted access to any number of locations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub app_user_id:        i32,
    pub full_name:          String,
    /// Mirrors `full_name`
    pub app_user_full_name: String,
    #[sea_orm(unique)]
    pub email:              String,
    #[serde(skip_serializing)]
    pub password_hash:      String,
    pub user_role_id:       i32,
    pub dl_num:             Option<String>,
    pub dl_state:           Option<String>,
    pub street_address:     Option<String>,
    pub city:               Option<String>,
    pub state:              Option<String>,
    pub zip_code:           Option<String>,
    pub contact_number:     Option<String>,
    pub date_of_birth:      Option<chrono::NaiveDate>,
    pub created_at:         chrono::DateTime<chrono::Utc>,
    pub updated_at:         chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_role::Entity",
        from = "Column::UserRoleId",
        to = "super::user_role::Column::UserRoleId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    UserRole,
    #[sea_orm(has_many = "super::user_location_access::Entity")]
    UserLocationAccess,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserRole.def() }
}

impl Related<super::user_location_access::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserLocationAccess.def() }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef { super::user_location_access::Relation::Location.def() }

    fn via() -> Option<RelationDef> { Some(super::user_location_access::Relation::AppUser.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}
