//! Loan Status Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "loan_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub loan_status_id:   i32,
    #[sea_orm(unique)]
    pub loan_status_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::loan::Entity")]
    Loan,
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef { Relation::Loan.def() }
}

impl ActiveModelBehavior for ActiveModel {}
