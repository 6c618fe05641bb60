// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Statistics endpoints: read-only rollups over the letter store.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Query, State};
use lettera_engine::{CategoryStats, EmployeeStats, OverviewStats};
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::AppState;

/// Query parameters for GET /api/statistics/by_employee.
#[derive(Debug, Deserialize)]
pub struct EmployeeStatsQuery {
    pub employee_id: i64,
}

/// GET /api/statistics/overview
pub async fn overview(State(state): State<AppState>) -> Result<Json<OverviewStats>, ApiError> {
    Ok(Json(state.stats.overview().await?))
}

/// GET /api/statistics/by_category
pub async fn by_category(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, CategoryStats>>, ApiError> {
    Ok(Json(state.stats.by_category().await?))
}

/// GET /api/statistics/by_employee?employee_id=N
pub async fn by_employee(
    State(state): State<AppState>,
    Query(query): Query<EmployeeStatsQuery>,
) -> Result<Json<EmployeeStats>, ApiError> {
    Ok(Json(state.stats.by_employee(query.employee_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_stats_query_deserializes() {
        let query: EmployeeStatsQuery =
            serde_json::from_str(r#"{"employee_id": 7}"#).unwrap();
        assert_eq!(query.employee_id, 7);
    }
}
