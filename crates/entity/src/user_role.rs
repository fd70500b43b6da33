//! User Role Entity
//!
//! Authorization groupings. The role name doubles as the authority placed in
//! issued tokens.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_role_id:   i32,
    #[sea_orm(unique)]
    pub user_role_name: String,
    pub dl_required:    bool,
    pub is_active:      bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::app_user::Entity")]
    AppUser,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef { Relation::AppUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}
