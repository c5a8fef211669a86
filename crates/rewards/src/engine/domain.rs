use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A purchase record as delivered by the upstream transactions API.
///
/// Field names face the wire (`customerId`, `purchaseDate`, ...). The
/// price is deserialized leniently: a missing, null, or non-numeric value
/// becomes NaN so the points policy can degrade it to zero instead of the
/// whole snapshot failing on one bad record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub product_purchased: String,
    #[serde(default = "price_missing", deserialize_with = "lenient_price")]
    pub price: f64,
}

/// A transaction annotated with its computed reward points.
///
/// The points are derived solely from `price`; re-deriving them from the
/// same price is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub reward_points: u32,
}

/// One row of the monthly rewards table: points accumulated by a customer
/// within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRewardRecord {
    pub customer_id: String,
    pub customer_name: String,
    pub month: &'static str,
    pub year: i32,
    pub month_year: String,
    pub reward_points: u32,
}

/// One row of the total rewards table: points accumulated by a customer
/// across every transaction in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalRewardRecord {
    pub customer_id: String,
    pub customer_name: String,
    pub reward_points: u32,
}

fn price_missing() -> f64 {
    f64::NAN
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(raw)) => raw.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}
