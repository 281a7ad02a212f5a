use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde_json::{Map, Value};

use crate::error::ControllerError;
use crate::schema::{FieldKind, ResourceSchema};

/// JSON object sent on create and update.
pub type Draft = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub i64);

impl ResourceId {
    /// Accepts `7` and `"7"`; the backend has emitted both.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self),
            Value::String(s) => s.trim().parse().ok().map(Self),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CategoryRef {
    Id(ResourceId),
    Embedded { id: ResourceId, name: String },
}

impl CategoryRef {
    pub fn id(&self) -> ResourceId {
        match self {
            Self::Id(id) | Self::Embedded { id, .. } => *id,
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        if let Some(id) = ResourceId::from_json(value) {
            return Some(Self::Id(id));
        }
        let obj = value.as_object()?;
        let id = obj.get("id").and_then(ResourceId::from_json)?;
        match obj.get("name").and_then(Value::as_str) {
            Some(name) => Some(Self::Embedded { id, name: name.to_string() }),
            None => Some(Self::Id(id)),
        }
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Embedded { name, .. } => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditTime {
    pub raw: String,
    pub parsed: Option<Timestamp>,
}

impl AuditTime {
    fn parse(raw: &str) -> Self {
        let parsed = raw.parse::<Timestamp>().ok().or_else(|| {
            // Spring's LocalDateTime carries no offset; the backend runs in UTC.
            raw.parse::<DateTime>().ok().and_then(|dt| dt.to_zoned(TimeZone::UTC).ok()).map(|z| z.timestamp())
        });
        Self { raw: raw.to_string(), parsed }
    }

    pub fn display(&self) -> String {
        match self.parsed {
            Some(ts) => ts.strftime("%Y-%m-%d %H:%M").to_string(),
            None => self.raw.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Audit {
    pub created_at: Option<AuditTime>,
    pub updated_at: Option<AuditTime>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl Audit {
    pub fn last_touched(&self) -> String {
        self.updated_at.as_ref().or(self.created_at.as_ref()).map(AuditTime::display).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: ResourceId,
    /// Canonical field keys in the order the schema declares them, then unknown keys as received.
    pub fields: IndexMap<String, Value>,
    pub category: Option<CategoryRef>,
    pub audit: Audit,
}

const ID_KEYS: &[&str] = &["id", "_id"];
const CATEGORY_KEYS: &[&str] = &["category", "categoryId", "category_id", "vocabularyCategoryId"];

impl Record {
    pub fn from_json(value: Value, schema: &ResourceSchema) -> Result<Self, String> {
        let Value::Object(mut obj) = value else {
            return Err(format!("expected a JSON object, got {}", type_name(&value)));
        };

        let id = ID_KEYS
            .iter()
            .find_map(|k| obj.get(*k).and_then(ResourceId::from_json))
            .ok_or_else(|| "record has no usable id".to_string())?;

        let mut category = None;
        for key in CATEGORY_KEYS {
            if let Some(raw) = obj.remove(*key) {
                category = category.or_else(|| CategoryRef::from_json(&raw));
            }
        }

        let audit = Audit {
            created_at: take_str(&mut obj, &["createdAt", "created_at"]).map(|s| AuditTime::parse(&s)),
            updated_at: take_str(&mut obj, &["updatedAt", "updated_at"]).map(|s| AuditTime::parse(&s)),
            created_by: take_str(&mut obj, &["createdBy", "created_by"]),
            updated_by: take_str(&mut obj, &["updatedBy", "updated_by"]),
        };

        for key in ID_KEYS {
            obj.remove(*key);
        }

        let mut fields = IndexMap::new();
        for spec in schema.fields {
            fields.insert(spec.key.to_string(), Value::Null);
        }
        for (key, value) in obj {
            match schema.canonical_key(&key) {
                // The canonical spelling wins when both it and an alias are present.
                Some(canonical) if canonical == key || fields[canonical].is_null() => {
                    fields.insert(canonical.to_string(), value);
                }
                Some(_) => {}
                None => {
                    fields.insert(key, value);
                }
            }
        }

        Ok(Self { id, fields, category, audit })
    }

    /// Builds a record from a request payload, for APIs that answer updates with an empty body.
    pub fn from_draft(id: ResourceId, draft: &Draft, schema: &ResourceSchema) -> Self {
        let mut value = Value::Object(draft.clone());
        if let Value::Object(obj) = &mut value {
            obj.insert("id".into(), Value::from(id.0));
        }
        match Self::from_json(value, schema) {
            Ok(record) => record,
            Err(_) => Self { id, fields: IndexMap::new(), category: None, audit: Audit::default() },
        }
    }

    pub fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn category_id(&self) -> Option<ResourceId> {
        self.category.as_ref().map(CategoryRef::id)
    }

    pub fn edit_buffer(&self, schema: &ResourceSchema) -> EditBuffer {
        let mut buffer = EditBuffer::default();
        for spec in schema.editable_fields() {
            buffer.values.insert(spec.key.to_string(), self.text(spec.key));
        }
        buffer
    }
}

fn take_str(obj: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    let mut found = None;
    for key in keys {
        if let Some(value) = obj.remove(*key) {
            let text = match value {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            };
            found = found.or(text);
        }
    }
    found
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Text values of the fields being edited, keyed by canonical field key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditBuffer {
    values: IndexMap<String, String>,
}

impl EditBuffer {
    pub fn blank(schema: &ResourceSchema) -> Self {
        let values = schema.editable_fields().map(|f| (f.key.to_string(), String::new())).collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn set(&mut self, key: &str, value: String) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Converts the buffer into a request payload. Empty integer fields become null.
    pub fn to_draft(&self, schema: &ResourceSchema) -> Result<Draft, ControllerError> {
        let mut draft = Draft::new();
        for (key, raw) in &self.values {
            let spec = schema.field(key).ok_or_else(|| ControllerError::UnknownField(key.clone()))?;
            let value = match spec.kind {
                FieldKind::Text => Value::String(raw.clone()),
                FieldKind::Integer if raw.trim().is_empty() => Value::Null,
                FieldKind::Integer => raw
                    .trim()
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| ControllerError::InvalidNumber { field: spec.title.to_string(), value: raw.clone() })?,
            };
            draft.insert(key.clone(), value);
        }
        Ok(draft)
    }
}
