//! Normalizes the list and item envelopes the admin API has returned over time.

use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::page::Page;
use crate::record::{type_name, Record};
use crate::schema::ResourceSchema;

#[derive(Debug, Default)]
struct PageMeta {
    page: Option<u32>,
    total_pages: Option<u32>,
    total_items: Option<u64>,
}

/// Accepted shapes:
///
/// * a bare array (one page holding everything),
/// * Spring `{content, number, totalPages, totalElements}` with a 0-based `number`,
/// * `{data: {result, meta: {page, pages, total}}}`, also with `page`/`totalPages` directly under `data`.
///
/// Missing metadata falls back to the requested page, and the page count is never below the page number.
pub fn normalize_page(body: Value, schema: &ResourceSchema, requested_page: u32) -> Result<Page, GatewayError> {
    let (raw_items, meta) = match body {
        Value::Array(items) => {
            let total = items.len() as u64;
            (items, PageMeta { page: Some(1), total_pages: Some(1), total_items: Some(total) })
        }
        Value::Object(mut obj) => {
            if let Some(content) = obj.remove("content") {
                let items = expect_array(content, "content")?;
                let meta = PageMeta {
                    page: read_u32(&obj, &["number"])?
                        .map(|n| n.checked_add(1).ok_or_else(|| out_of_range("number", n.into())))
                        .transpose()?,
                    total_pages: read_u32(&obj, &["totalPages", "total_pages"])?,
                    total_items: read_u64(&obj, &["totalElements", "total_elements"]),
                };
                (items, meta)
            } else if let Some(data) = obj.remove("data") {
                data_envelope(data)?
            } else {
                return Err(GatewayError::Format("list response has no content or data field".into()));
            }
        }
        other => return Err(GatewayError::Format(format!("list response is {}", type_name(&other)))),
    };

    let items = raw_items
        .into_iter()
        .map(|item| Record::from_json(item, schema).map_err(GatewayError::Format))
        .collect::<Result<Vec<_>, _>>()?;

    let page_number = meta.page.unwrap_or(requested_page).max(1);
    let total_pages = meta.total_pages.unwrap_or(page_number).max(page_number);

    Ok(Page { items, page_number, total_pages, total_items: meta.total_items })
}

fn data_envelope(data: Value) -> Result<(Vec<Value>, PageMeta), GatewayError> {
    let mut data = match data {
        Value::Array(items) => return Ok((items, PageMeta::default())),
        Value::Object(obj) => obj,
        other => return Err(GatewayError::Format(format!("data is {}", type_name(&other)))),
    };

    let items = match ["result", "items", "content"].iter().find_map(|k| data.remove(*k)) {
        Some(items) => expect_array(items, "data.result")?,
        None => return Err(GatewayError::Format("data has no result array".into())),
    };

    let nested = data.get("meta").and_then(Value::as_object).cloned().unwrap_or_default();
    let meta = PageMeta {
        page: match read_u32(&nested, &["page", "currentPage"])? {
            Some(n) => Some(n),
            None => read_u32(&data, &["page"])?,
        },
        total_pages: match read_u32(&nested, &["pages", "totalPages"])? {
            Some(n) => Some(n),
            None => read_u32(&data, &["totalPages", "pages"])?,
        },
        total_items: read_u64(&nested, &["total", "totalItems"]).or_else(|| read_u64(&data, &["totalElements", "total"])),
    };
    Ok((items, meta))
}

/// Accepts a bare record or one wrapped as `{data: {...}}`.
pub fn normalize_record(body: Value, schema: &ResourceSchema) -> Result<Record, GatewayError> {
    match body {
        Value::Object(mut obj) if !obj.contains_key("id") && obj.get("data").is_some_and(Value::is_object) => {
            let inner = obj.remove("data").unwrap_or(Value::Null);
            Record::from_json(inner, schema).map_err(GatewayError::Format)
        }
        other => Record::from_json(other, schema).map_err(GatewayError::Format),
    }
}

fn expect_array(value: Value, field: &str) -> Result<Vec<Value>, GatewayError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(GatewayError::Format(format!("{field} is {}, expected an array", type_name(&other)))),
    }
}

fn read_u64(obj: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Page counters must fit in a `u32`; anything larger is a malformed body.
fn read_u32(obj: &Map<String, Value>, keys: &[&str]) -> Result<Option<u32>, GatewayError> {
    let Some(n) = read_u64(obj, keys) else { return Ok(None) };
    u32::try_from(n).map(Some).map_err(|_| out_of_range(keys[0], n))
}

fn out_of_range(field: &str, value: u64) -> GatewayError {
    GatewayError::Format(format!("{field} is out of range: {value}"))
}
