//! Seed providers for roles and lookup tables.

use ::error::{AppError, SeedResult};
use entity::{device_condition, device_status, device_type, loan_status, user_role};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::SeedProvider;

/// Roles with whether a driver's license is required.
const ROLES: &[(&str, bool)] = &[("Admin", false), ("Employee", false), ("Citizen", true)];

/// Seeds the `user_role` table.
#[derive(Debug, Clone, Copy)]
pub struct UserRoleSeed;

#[async_trait::async_trait]
impl SeedProvider for UserRoleSeed {
    fn name(&self) -> &str { "user_roles" }

    async fn run(&self, db: &DatabaseConnection) -> Result<SeedResult, AppError> {
        let mut inserted = 0;
        let mut skipped = 0;

        for (name, dl_required) in ROLES {
            let existing = user_role::Entity::find()
                .filter(user_role::Column::UserRoleName.eq(*name))
                .one(db)
                .await?;
            if existing.is_some() {
                skipped += 1;
                continue;
            }

            user_role::ActiveModel {
                user_role_name: Set((*name).to_string()),
                dl_required: Set(*dl_required),
                is_active: Set(true),
                ..Default::default()
            }
            .insert(db)
            .await?;
            inserted += 1;
        }

        Ok(SeedResult::success(self.name(), inserted, skipped, 0))
    }
}

/// Lookup tables holding a single unique name column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    DeviceType,
    DeviceStatus,
    DeviceCondition,
    LoanStatus,
}

impl LookupTable {
    pub fn seed_name(&self) -> &'static str {
        match self {
            LookupTable::DeviceType => "device_types",
            LookupTable::DeviceStatus => "device_statuses",
            LookupTable::DeviceCondition => "device_conditions",
            LookupTable::LoanStatus => "loan_statuses",
        }
    }
}

/// Seeds one lookup table with a fixed list of names.
#[derive(Debug, Clone)]
pub struct LookupSeed {
    table: LookupTable,
    names: &'static [&'static str],
}

impl LookupSeed {
    pub fn new(table: LookupTable, names: &'static [&'static str]) -> Self {
        Self {
            table,
            names,
        }
    }

    async fn name_exists(&self, db: &DatabaseConnection, name: &str) -> Result<bool, AppError> {
        let exists = match self.table {
            LookupTable::DeviceType => {
                device_type::Entity::find()
                    .filter(device_type::Column::DeviceTypeName.eq(name))
                    .one(db)
                    .await?
                    .is_some()
            },
            LookupTable::DeviceStatus => {
                device_status::Entity::find()
                    .filter(device_status::Column::StatusName.eq(name))
                    .one(db)
                    .await?
                    .is_some()
            },
            LookupTable::DeviceCondition => {
                device_condition::Entity::find()
                    .filter(device_condition::Column::DeviceConditionName.eq(name))
                    .one(db)
                    .await?
                    .is_some()
            },
            LookupTable::LoanStatus => {
                loan_status::Entity::find()
                    .filter(loan_status::Column::LoanStatusName.eq(name))
                    .one(db)
                    .await?
                    .is_some()
            },
        };
        Ok(exists)
    }

    async fn insert(&self, db: &DatabaseConnection, name: &str) -> Result<(), AppError> {
        let name = name.to_string();
        match self.table {
            LookupTable::DeviceType => {
                device_type::ActiveModel {
                    device_type_name: Set(name),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            },
            LookupTable::DeviceStatus => {
                device_status::ActiveModel {
                    status_name: Set(name),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            },
            LookupTable::DeviceCondition => {
                device_condition::ActiveModel {
                    device_condition_name: Set(name),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            },
            LookupTable::LoanStatus => {
                loan_status::ActiveModel {
                    loan_status_name: Set(name),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            },
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SeedProvider for LookupSeed {
    fn name(&self) -> &str { self.table.seed_name() }

    async fn run(&self, db: &DatabaseConnection) -> Result<SeedResult, AppError> {
        let mut inserted = 0;
        let mut skipped = 0;

        for name in self.names {
            if self.name_exists(db, name).await? {
                skipped += 1;
            }
            else {
                self.insert(db, name).await?;
                inserted += 1;
            }
        }

        Ok(SeedResult::success(self.name(), inserted, skipped, 0))
    }
}
