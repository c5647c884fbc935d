// Dual-schema normalization
//
// The appliance has shipped two incompatible statistics shapes: the
// legacy generation returns flat fields (`unique_clients`,
// `ads_blocked_today`), the current one nests them (`clients.active`,
// `queries.blocked`). Each counter resolves through an ordered rule
// list, legacy key first; the first rule that matches wins. Supporting
// a third generation is one more path in the relevant list.

use serde_json::Value;

use crate::error::CoreError;
use crate::model::Summary;

/// Extraction rules per field: each entry is a key path into the stats
/// payload, tried in order.
const UNIQUE_CLIENTS: &[&[&str]] = &[&["unique_clients"], &["clients", "active"]];
const ADS_BLOCKED_TODAY: &[&[&str]] = &[&["ads_blocked_today"], &["queries", "blocked"]];

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(key))
}

fn extract_count(stats: &Value, rules: &[&[&str]], field: &'static str) -> Result<u64, CoreError> {
    rules
        .iter()
        .find_map(|path| lookup(stats, path))
        .and_then(Value::as_u64)
        .ok_or(CoreError::Schema { field })
}

/// Map a raw stats payload and blocking-status payload onto a [`Summary`].
///
/// Fails with [`CoreError::Schema`] when neither generation's mapping
/// matches a counter. The `blocking` flag is a lower-stakes display
/// field: when absent the appliance is treated as disabled rather than
/// failing the run.
pub fn normalize(stats: &Value, status: &Value) -> Result<Summary, CoreError> {
    Ok(Summary {
        unique_clients: extract_count(stats, UNIQUE_CLIENTS, "unique_clients")?,
        ads_blocked_today: extract_count(stats, ADS_BLOCKED_TODAY, "ads_blocked_today")?,
        blocking_enabled: status
            .get("blocking")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}
