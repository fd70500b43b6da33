//! Loan lifecycle through the HTTP API: checkout, lookup, check-in,
//! replacement and deletion.

mod common;

use axum::http::StatusCode;
use common::{TestApp, insert_bin, insert_location};
use serde_json::{Value, json};

/// Seeded ids
const ACTIVE: i32 = 1;
const RETURNED: i32 = 2;
const GOOD: i32 = 2;
const DAMAGED: i32 = 4;

struct LoanSetup {
    app:    TestApp,
    token:  String,
    bin_id: i32,
}

async fn setup() -> LoanSetup {
    let app = TestApp::new().await;
    let location = insert_location(app.db(), "Main Library").await;
    let bin = insert_bin(app.db(), "BIN-001", app.admin.app_user_id, location.location_id).await;
    let token = app.employee_token();

    LoanSetup {
        app,
        token,
        bin_id: bin.bin_id,
    }
}

fn create_body(setup: &LoanSetup) -> Value {
    json!({
        "bin_id": setup.bin_id,
        "loan_status_id": ACTIVE,
        "citizen_id": setup.app.citizen.app_user_id,
        "employee_id": setup.app.employee.app_user_id,
        "due_at": "2025-09-21",
        "loan_condition_id": GOOD,
        "loan_condition_notes": "Minor scuffs",
        "notes": "First loan"
    })
}

async fn create_loan(setup: &LoanSetup) -> Value {
    let response = setup.app.post("/api/loans", &setup.token, create_body(setup)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"].clone()
}

#[tokio::test]
async fn test_create_loan() {
    let setup = setup().await;

    let response = setup.app.post("/api/loans", &setup.token, create_body(&setup)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "Loan created successfully");

    let data = &response.body["data"];
    assert_eq!(data["bin_id"], setup.bin_id);
    assert_eq!(data["loan_status_name"], "Active");
    assert_eq!(data["loan_condition_name"], "Good");
    assert_eq!(data["loan_condition_notes"], "Minor scuffs");
    assert_eq!(data["due_at"], "2025-09-21T00:00:00+00:00");
    assert!(data["returned_at"].is_null());
    assert!(data["return_condition_name"].is_null());
    assert!(data["start_at"].is_string());
}

#[tokio::test]
async fn test_create_loan_accepts_camel_case_keys() {
    let setup = setup().await;

    let response = setup
        .app
        .post(
            "/api/loans",
            &setup.token,
            json!({
                "binId": setup.bin_id,
                "loanStatusId": ACTIVE,
                "citizenId": setup.app.citizen.app_user_id,
                "employeeId": setup.app.employee.app_user_id,
                "dueAt": "2025-10-01",
                "loanConditionId": GOOD
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["due_at"], "2025-10-01T00:00:00+00:00");
}

#[tokio::test]
async fn test_create_loan_missing_fields() {
    let setup = setup().await;
    let mut body = create_body(&setup);
    body.as_object_mut().unwrap().remove("due_at");

    let response = setup.app.post("/api/loans", &setup.token, body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Missing required fields");
}

#[tokio::test]
async fn test_create_loan_checks_references_in_order() {
    let setup = setup().await;

    let cases = [
        ("bin_id", "Invalid bin ID"),
        ("loan_status_id", "Invalid status ID"),
        ("citizen_id", "Invalid citizen ID"),
        ("employee_id", "Invalid employee ID"),
        ("loan_condition_id", "Invalid loan condition ID"),
    ];

    for (field, message) in cases {
        let mut body = create_body(&setup);
        body[field] = json!(9999);

        let response = setup.app.post("/api/loans", &setup.token, body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", field);
        assert_eq!(response.error(), message);
    }

    // with every reference broken the bin is reported first
    let mut body = create_body(&setup);
    for (field, _) in cases {
        body[field] = json!(9999);
    }
    let response = setup.app.post("/api/loans", &setup.token, body).await;
    assert_eq!(response.error(), "Invalid bin ID");
}

#[tokio::test]
async fn test_list_and_get_loans() {
    let setup = setup().await;
    let created = create_loan(&setup).await;
    let loan_id = created["loan_id"].as_i64().unwrap();

    let response = setup.app.get("/api/loans", &setup.token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Loans retrieved successfully");
    assert_eq!(response.body["data"].as_array().unwrap().len(), 1);

    let response = setup.app.get(&format!("/api/loans/{}", loan_id), &setup.token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Loan retrieved successfully");
    assert_eq!(response.body["data"]["loan_id"], loan_id);
}

#[tokio::test]
async fn test_get_missing_loan() {
    let setup = setup().await;

    let response = setup.app.get("/api/loans/4242", &setup.token).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Loan not found");
}

#[tokio::test]
async fn test_check_in_with_patch() {
    let setup = setup().await;
    let created = create_loan(&setup).await;
    let uri = format!("/api/loans/{}", created["loan_id"]);

    let response = setup
        .app
        .patch(
            &uri,
            &setup.token,
            json!({
                "loan_status_id": RETURNED,
                "returned_at": "2025-09-20",
                "returnCondition": DAMAGED,
                "return_condition_notes": "Cracked screen",
                "damage_fee": 25.5,
                "all_accessories_returned": false,
                "missing_accessories": "Charger"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.message(), "Loan updated successfully");

    let data = &response.body["data"];
    assert_eq!(data["loan_status_name"], "Returned");
    assert_eq!(data["returned_at"], "2025-09-20T00:00:00+00:00");
    assert_eq!(data["return_condition_id"], DAMAGED);
    assert_eq!(data["return_condition_name"], "Damaged");
    assert_eq!(data["damage_fee"], 25.5);
    assert_eq!(data["all_accessories_returned"], false);
    assert_eq!(data["missing_accessories"], "Charger");
    // untouched fields survive a partial update
    assert_eq!(data["notes"], "First loan");
    assert_eq!(data["loan_condition_notes"], "Minor scuffs");
}

#[tokio::test]
async fn test_patch_rejects_unknown_status_and_condition() {
    let setup = setup().await;
    let created = create_loan(&setup).await;
    let uri = format!("/api/loans/{}", created["loan_id"]);

    let response = setup.app.patch(&uri, &setup.token, json!({"loan_status_id": 77})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid loan status ID");

    let response = setup.app.patch(&uri, &setup.token, json!({"return_condition_id": 77})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid return condition ID");
}

#[tokio::test]
async fn test_patch_rejects_bad_damage_fee() {
    let setup = setup().await;
    let created = create_loan(&setup).await;
    let uri = format!("/api/loans/{}", created["loan_id"]);

    let response = setup.app.patch(&uri, &setup.token, json!({"damage_fee": -5})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = setup.app.patch(&uri, &setup.token, json!({"damage_fee": 1.005})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_missing_loan() {
    let setup = setup().await;

    let response = setup.app.patch("/api/loans/4242", &setup.token, json!({"notes": "x"})).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Loan not found");
}

#[tokio::test]
async fn test_replace_loan_clears_absent_optionals() {
    let setup = setup().await;
    let created = create_loan(&setup).await;
    let uri = format!("/api/loans/{}", created["loan_id"]);

    let response = setup
        .app
        .put(
            &uri,
            &setup.token,
            json!({
                "bin_id": setup.bin_id,
                "loan_status_id": ACTIVE,
                "citizen_id": setup.app.citizen.app_user_id,
                "employee_id": setup.app.admin.app_user_id,
                "start_at": "2025-09-01",
                "due_at": "2025-09-30",
                "loan_condition_id": GOOD
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.message(), "Loan replaced successfully");

    let data = &response.body["data"];
    assert_eq!(data["employee_id"], setup.app.admin.app_user_id);
    assert_eq!(data["start_at"], "2025-09-01T00:00:00+00:00");
    assert_eq!(data["due_at"], "2025-09-30T00:00:00+00:00");
    assert!(data["notes"].is_null());
    assert!(data["loan_condition_notes"].is_null());
    assert!(data["returned_at"].is_null());
}

#[tokio::test]
async fn test_replace_loan_requires_start_at() {
    let setup = setup().await;
    let created = create_loan(&setup).await;
    let uri = format!("/api/loans/{}", created["loan_id"]);

    let response = setup.app.put(&uri, &setup.token, create_body(&setup)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Missing required fields");
}

#[tokio::test]
async fn test_replace_loan_rejects_unknown_return_condition() {
    let setup = setup().await;
    let created = create_loan(&setup).await;
    let uri = format!("/api/loans/{}", created["loan_id"]);

    let mut body = create_body(&setup);
    body["start_at"] = json!("2025-09-01");
    body["return_condition_id"] = json!(55);

    let response = setup.app.put(&uri, &setup.token, body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid return condition ID");
}

#[tokio::test]
async fn test_delete_loan() {
    let setup = setup().await;
    let created = create_loan(&setup).await;
    let uri = format!("/api/loans/{}", created["loan_id"]);

    let response = setup.app.delete(&uri, &setup.token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"message": "Loan deleted successfully"}));

    let response = setup.app.delete(&uri, &setup.token).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Loan not found");
}

#[tokio::test]
async fn test_bin_with_loans_cannot_be_deleted() {
    let setup = setup().await;
    create_loan(&setup).await;

    let response = setup
        .app
        .delete(&format!("/api/bins/{}", setup.bin_id), &setup.token)
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
