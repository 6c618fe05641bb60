// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration and login endpoints.
//!
//! Login is lookup-only: authentication security is an explicit non-goal,
//! matching the service's internal-tool scope.

use axum::Json;
use axum::extract::State;
use lettera_core::{Employee, User};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::AppState;

/// Request body for POST /api/auth/register/user.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
}

/// Request body for POST /api/auth/register/employee.
#[derive(Debug, Deserialize)]
pub struct RegisterEmployeeRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    pub category: String,
}

/// Response body for POST /api/auth/register/employee.
#[derive(Debug, Serialize)]
pub struct RegisterEmployeeResponse {
    pub user: User,
    pub employee: Employee,
}

/// Request body for POST /api/auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Response body for POST /api/auth/login.
///
/// `employee` is present when the account has an employee record, so clients
/// learn their employee id in one round-trip.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub employee: Option<Employee>,
}

/// POST /api/auth/register/user
pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state.letters.register_user(&body.name, &body.email).await?;
    Ok(Json(user))
}

/// POST /api/auth/register/employee
pub async fn register_employee(
    State(state): State<AppState>,
    Json(body): Json<RegisterEmployeeRequest>,
) -> Result<Json<RegisterEmployeeResponse>, ApiError> {
    let (user, employee) = state
        .letters
        .register_employee(
            &body.name,
            &body.email,
            body.department.as_deref(),
            &body.category,
        )
        .await?;
    Ok(Json(RegisterEmployeeResponse { user, employee }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state.letters.login(&body.email).await?;
    let employee = state.letters.employee_for_user(user.id).await?;
    Ok(Json(LoginResponse { user, employee }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_employee_request_deserializes_without_department() {
        let json = r#"{"name": "Борис", "email": "boris@bank.ru", "category": "credit"}"#;
        let req: RegisterEmployeeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Борис");
        assert!(req.department.is_none());
        assert_eq!(req.category, "credit");
    }

    #[test]
    fn login_response_serializes_optional_employee() {
        let resp = LoginResponse {
            user: User {
                id: 1,
                name: "Анна".into(),
                email: "anna@example.com".into(),
                role: lettera_core::UserRole::User,
                created_at: "2026-01-01T00:00:00.000Z".into(),
            },
            employee: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"employee\":null"));
    }
}
