//! Entity shape tests: table names, serialization and helpers.

use chrono::{TimeZone, Utc};
use entity::{app_user, loan};
use sea_orm::{EntityName, IdenStatic, entity::prelude::Decimal};

fn sample_user() -> app_user::Model {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    app_user::Model {
        app_user_id:        1,
        full_name:          "Ada Lovelace".to_string(),
        app_user_full_name: "Ada Lovelace".to_string(),
        email:              "ada@example.com".to_string(),
        password_hash:      "$argon2id$v=19$m=4096,t=3,p=1$c2FsdA$aGFzaA".to_string(),
        user_role_id:       1,
        dl_num:             None,
        dl_state:           None,
        street_address:     None,
        city:               Some("Springfield".to_string()),
        state:              Some("IL".to_string()),
        zip_code:           None,
        contact_number:     None,
        date_of_birth:      chrono::NaiveDate::from_ymd_opt(1990, 12, 10),
        created_at:         now,
        updated_at:         now,
    }
}

fn sample_loan() -> loan::Model {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    loan::Model {
        loan_id: 1,
        bin_id: 2,
        loan_status_id: 1,
        citizen_id: 3,
        employee_id: 4,
        start_at: start,
        due_at: Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap(),
        returned_at: None,
        loan_condition_id: 1,
        loan_condition_notes: None,
        return_condition_id: None,
        return_condition_notes: None,
        damage_fee: None,
        all_accessories_returned: None,
        missing_accessories: None,
        notes: None,
        created_at: start,
        updated_at: start,
    }
}

#[test]
fn test_table_names() {
    assert_eq!(entity::AppUser.table_name(), "app_user");
    assert_eq!(entity::UserRole.table_name(), "user_role");
    assert_eq!(entity::UserLocationAccess.table_name(), "user_location_access");
    assert_eq!(entity::Loan.table_name(), "loan");
    assert_eq!(entity::DeviceCondition.table_name(), "device_condition");
}

#[test]
fn test_column_names() {
    assert_eq!(loan::Column::AllAccessoriesReturned.as_str(), "all_accessories_returned");
    assert_eq!(app_user::Column::AppUserFullName.as_str(), "app_user_full_name");
}

#[test]
fn test_password_hash_never_serialized() {
    let value = serde_json::to_value(sample_user()).unwrap();
    assert!(value.get("password_hash").is_none());
    assert_eq!(value["email"], "ada@example.com");
    assert_eq!(value["date_of_birth"], "1990-12-10");
}

#[test]
fn test_loan_lifecycle_flag() {
    let mut loan = sample_loan();
    assert!(loan.is_active());

    loan.returned_at = Some(Utc::now());
    assert!(!loan.is_active());
}

#[test]
fn test_damage_fee_serializes_as_number() {
    let mut loan = sample_loan();
    loan.damage_fee = Some(Decimal::new(1250, 2));

    let value = serde_json::to_value(loan).unwrap();
    assert_eq!(value["damage_fee"], serde_json::json!(12.5));
}
