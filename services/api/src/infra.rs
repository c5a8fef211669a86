use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rewards::engine::{calendar, Transaction};
use rewards::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Shared request state: the readiness flag, the metrics handle, and the
/// immutable transaction snapshot loaded at startup. Every request reads
/// the same snapshot and computes its own fresh output, so concurrent
/// requests never contend.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) transactions: Arc<Vec<Transaction>>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    calendar::parse_date(raw)
}

/// Date bound from a query/body field. Absent or blank means unbounded;
/// anything else must parse as YYYY-MM-DD.
pub(crate) fn optional_bound(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse_date(value).map(Some).map_err(AppError::request),
    }
}
