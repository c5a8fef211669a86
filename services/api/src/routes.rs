use crate::infra::{optional_bound, AppState};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use rewards::engine::{
    aggregate_monthly, aggregate_total, enrich, filter_by_range, sort_by_date_descending,
    unique_customer_names, unique_month_buckets, EnrichedTransaction, MonthlyRewardRecord,
    TotalRewardRecord, Transaction,
};
use rewards::error::AppError;
use rewards::snapshot::TransactionSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

pub(crate) fn dashboard_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/rewards/dashboard", get(dashboard_endpoint))
        .route("/api/v1/rewards/report", post(report_endpoint))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RangeQuery {
    #[serde(default)]
    pub(crate) from: Option<String>,
    #[serde(default)]
    pub(crate) to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportRequest {
    /// Inline transaction records, the shape the upstream API serves.
    #[serde(default)]
    pub(crate) transactions: Option<Vec<Transaction>>,
    /// Alternatively, a CSV export of the transactions table.
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) from: Option<String>,
    #[serde(default)]
    pub(crate) to: Option<String>,
    #[serde(default)]
    pub(crate) include_transactions: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardResponse {
    pub(crate) data_source: SnapshotSource,
    pub(crate) monthly_rewards: Vec<MonthlyRewardRecord>,
    pub(crate) total_rewards: Vec<TotalRewardRecord>,
    pub(crate) customers: Vec<String>,
    pub(crate) months: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) transactions: Option<Vec<EnrichedTransaction>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SnapshotSource {
    Startup,
    Inline,
    Csv,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Full dashboard payload over the startup snapshot. `from`/`to` bound the
/// transaction listing; the reward tables always cover the whole snapshot,
/// matching the dashboard UI where date search lives inside the
/// transactions table.
pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let from = optional_bound(range.from.as_deref())?;
    let to = optional_bound(range.to.as_deref())?;

    Ok(Json(build_dashboard(
        &state.transactions,
        SnapshotSource::Startup,
        from,
        to,
        true,
    )))
}

/// Same payload computed over a caller-supplied snapshot, either inline
/// JSON records or a CSV export string.
pub(crate) async fn report_endpoint(
    Json(payload): Json<ReportRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let ReportRequest {
        transactions,
        csv,
        from,
        to,
        include_transactions,
    } = payload;

    let from = optional_bound(from.as_deref())?;
    let to = optional_bound(to.as_deref())?;

    let (transactions, source) = match (csv, transactions) {
        (Some(csv), _) => {
            let parsed = TransactionSnapshot::from_csv_reader(Cursor::new(csv.into_bytes()))?;
            (parsed, SnapshotSource::Csv)
        }
        (None, Some(transactions)) => (transactions, SnapshotSource::Inline),
        (None, None) => {
            return Err(AppError::request(
                "provide either `transactions` records or a `csv` export",
            ))
        }
    };

    Ok(Json(build_dashboard(
        &transactions,
        source,
        from,
        to,
        include_transactions,
    )))
}

fn build_dashboard(
    transactions: &[Transaction],
    source: SnapshotSource,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    include_transactions: bool,
) -> DashboardResponse {
    let enriched = enrich(transactions);

    let listing = if include_transactions {
        let sorted = sort_by_date_descending(&enriched);
        Some(filter_by_range(&sorted, from, to))
    } else {
        None
    };

    DashboardResponse {
        data_source: source,
        monthly_rewards: aggregate_monthly(&enriched),
        total_rewards: aggregate_total(&enriched),
        customers: unique_customer_names(&enriched),
        months: unique_month_buckets(&enriched),
        transactions: listing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use rewards::engine::calendar;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn sample_transactions() -> Vec<Transaction> {
        let transaction = |id: &str, customer: (&str, &str), date: &str, price: f64| Transaction {
            id: id.to_string(),
            customer_id: customer.0.to_string(),
            customer_name: customer.1.to_string(),
            purchase_date: calendar::parse_date(date).expect("valid test date"),
            product_purchased: "Widget".to_string(),
            price,
        };

        vec![
            transaction("t1", ("c-a", "Ana"), "2024-01-15", 120.0),
            transaction("t2", ("c-a", "Ana"), "2024-01-20", 80.0),
            transaction("t3", ("c-b", "Bela"), "2024-01-25", 150.0),
        ]
    }

    fn test_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
            transactions: Arc::new(sample_transactions()),
        }
    }

    #[tokio::test]
    async fn health_and_readiness_through_the_router() {
        let app = dashboard_routes().layer(Extension(test_state(false)));

        let health = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(health.status(), StatusCode::OK);

        let ready = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn dashboard_endpoint_serves_all_three_tables() {
        let app = dashboard_routes().layer(Extension(test_state(true)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/rewards/dashboard")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is JSON");

        assert_eq!(body["dataSource"], "startup");
        assert_eq!(body["monthlyRewards"].as_array().expect("array").len(), 2);
        assert_eq!(body["totalRewards"][0]["customerName"], "Bela");
        assert_eq!(body["totalRewards"][0]["rewardPoints"], 150);
        assert_eq!(body["customers"], json!(["Ana", "Bela"]));
        assert_eq!(body["months"], json!(["01/2024"]));
        // newest first
        assert_eq!(body["transactions"][0]["id"], "t3");
    }

    #[tokio::test]
    async fn dashboard_range_bounds_the_listing_not_the_tables() {
        let state = test_state(true);
        let Json(body) = dashboard_endpoint(
            Extension(state),
            Query(RangeQuery {
                from: Some("2024-01-20".to_string()),
                to: Some("".to_string()),
            }),
        )
        .await
        .expect("dashboard builds");

        let listing = body.transactions.expect("listing included");
        assert_eq!(listing.len(), 2);
        // aggregates still cover the full snapshot
        assert_eq!(body.monthly_rewards.len(), 2);
        assert_eq!(body.total_rewards.len(), 2);
    }

    #[tokio::test]
    async fn dashboard_rejects_malformed_bounds() {
        let state = test_state(true);
        let result = dashboard_endpoint(
            Extension(state),
            Query(RangeQuery {
                from: Some("01/20/2024".to_string()),
                to: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Request(_))));
    }

    #[tokio::test]
    async fn report_endpoint_computes_tables_from_inline_records() {
        let request = ReportRequest {
            transactions: Some(sample_transactions()),
            csv: None,
            from: None,
            to: None,
            include_transactions: false,
        };

        let Json(body) = report_endpoint(Json(request)).await.expect("report builds");

        assert_eq!(body.data_source, SnapshotSource::Inline);
        assert!(body.transactions.is_none());
        assert_eq!(body.monthly_rewards.len(), 2);
        let ana = body
            .monthly_rewards
            .iter()
            .find(|r| r.customer_name == "Ana")
            .expect("Ana record");
        assert_eq!(ana.reward_points, 120);
    }

    #[tokio::test]
    async fn report_endpoint_accepts_a_csv_export() {
        let request = ReportRequest {
            transactions: None,
            csv: Some(
                "id,customerId,customerName,purchaseDate,productPurchased,price\n\
                 t1,c-a,Ana,2024-01-15,Laptop,120.00\n\
                 t2,c-b,Bela,2024-01-25,Monitor,150.75\n"
                    .to_string(),
            ),
            from: None,
            to: None,
            include_transactions: true,
        };

        let Json(body) = report_endpoint(Json(request)).await.expect("report builds");

        assert_eq!(body.data_source, SnapshotSource::Csv);
        let listing = body.transactions.expect("listing included");
        assert_eq!(listing.len(), 2);
        assert_eq!(body.total_rewards[0].reward_points, 151);
    }

    #[tokio::test]
    async fn report_endpoint_requires_a_snapshot() {
        let request = ReportRequest {
            transactions: None,
            csv: None,
            from: None,
            to: None,
            include_transactions: false,
        };

        let result = report_endpoint(Json(request)).await;
        assert!(matches!(result, Err(AppError::Request(_))));
    }
}
