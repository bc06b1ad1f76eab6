//! Response parsing.
//!
//! The SOAP transport renders a one-element collection as a bare object and
//! a longer one as an array, so every parser first flattens the response
//! into a uniform list of record objects.

use serde_json::Value;
use tracing::debug;

use crate::domain::{RouteRegistration, TollPlaza};

use super::error::TollError;

/// Key holding the plaza collection in a routing reply.
const PLAZA_COLLECTION: &str = "pracaPedagio";

fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn float_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int_field(record: &Value, key: &str) -> Option<i64> {
    record.get(key).and_then(int_value)
}

fn text_field(record: &Value, key: &str) -> String {
    record.get(key).and_then(text_value).unwrap_or_default()
}

/// Flatten a routing reply into its plaza records.
///
/// Accepted shapes:
/// - `{ "pracaPedagio": [record, ...] }`
/// - `{ "pracaPedagio": record }`
/// - `[record, ...]`
/// - a bare record (an object with an `id` and no collection key)
///
/// Non-object collection members are dropped.
fn plaza_records(response: &Value) -> Vec<&Value> {
    let collection = match response {
        Value::Object(map) => match map.get(PLAZA_COLLECTION) {
            Some(inner) => inner,
            None if map.contains_key("id") => return vec![response],
            None => return Vec::new(),
        },
        other => other,
    };

    match collection {
        Value::Array(items) => {
            let records: Vec<&Value> = items.iter().filter(|item| item.is_object()).collect();
            if records.len() < items.len() {
                debug!(
                    skipped = items.len() - records.len(),
                    "skipping non-record plaza entries"
                );
            }
            records
        }
        Value::Object(_) => vec![collection],
        _ => Vec::new(),
    }
}

fn plaza_from_record(record: &Value) -> TollPlaza {
    TollPlaza {
        id: int_field(record, "id"),
        name: text_field(record, "praca"),
        highway: text_field(record, "rodovia"),
        km: record.get("km").and_then(float_value).unwrap_or(0.0),
        concessionaire: text_field(record, "concessionaria"),
        status: int_field(record, "status").unwrap_or(0),
    }
}

/// Parse the plazas out of a routing reply.
///
/// Never fails: unknown shapes give an empty list, non-record members are
/// skipped, and missing fields default to empty / zero.
pub fn parse_plaza_response(response: &Value) -> Vec<TollPlaza> {
    plaza_records(response)
        .into_iter()
        .map(plaza_from_record)
        .collect()
}

/// Collect plaza ids from a routing reply, in order.
///
/// Records with no id, or an id that is not a number, are skipped.
pub fn extract_plaza_ids(response: &Value) -> Vec<i64> {
    plaza_records(response)
        .into_iter()
        .filter_map(|record| int_field(record, "id"))
        .collect()
}

fn check_status(response: &Value) -> Result<i64, TollError> {
    let code = int_field(response, "status").unwrap_or(0);
    if code != 0 {
        let message = response
            .get("statusMensagem")
            .and_then(text_value)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(TollError::Status { code, message });
    }
    Ok(code)
}

/// Parse a routing reply, failing if the service reported a non-zero status.
pub fn parse_routing_response(response: &Value) -> Result<Vec<TollPlaza>, TollError> {
    check_status(response)?;
    Ok(parse_plaza_response(response))
}

/// Parse the reply to a temporary route registration.
///
/// The service may omit the route name; `requested_name` is used then.
pub fn parse_route_registration(
    response: &Value,
    requested_name: &str,
) -> Result<RouteRegistration, TollError> {
    let status = check_status(response)?;

    let id = int_field(response, "id")
        .filter(|id| *id != 0)
        .ok_or(TollError::MissingRouteId)?;

    let name = response
        .get("nome")
        .and_then(text_value)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| requested_name.to_string());

    Ok(RouteRegistration { id, name, status })
}
