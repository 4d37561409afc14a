//! Stats payload
//!
//! The JSON body served at `/performanceStats`. Two shapes exist in the wild: the older one
//! carries a flat `clientData` map keyed by client id, the newer one a
//! `clientStatusDictionary` whose entries also list the chunks each client is working on,
//! plus a `wipChunks` count. Both decode into [`StatsPayload`].

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// A single payload value that may be missing.
///
/// Displays the way a browser would stringify it, so a missing field reads `undefined`
/// instead of failing the render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field(Option<Value>);

impl Field {
    pub fn new(value: Value) -> Self {
        Self(Some(value))
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_object(&self) -> bool {
        matches!(self.0, Some(Value::Object(_)))
    }

    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    /// Text for a table cell, where missing and `null` both come out empty.
    pub fn cell_text(&self) -> String {
        match &self.0 {
            None | Some(Value::Null) => String::new(),
            Some(value) => value_text(value),
        }
    }

    /// Looks up `key` in a JSON object; anything else yields a missing field.
    fn lookup(object: &Value, key: &str) -> Self {
        Self(object.get(key).cloned())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A present `null` must stay distinguishable from an absent key.
        Value::deserialize(deserializer).map(Field::new)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => f.write_str("undefined"),
            Some(value) => f.write_str(&value_text(value)),
        }
    }
}

/// Browser string conversion of a JSON value.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if !n.is_f64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => float_text(f),
        None => n.to_string(),
    }
}

/// Shortest form, switching to exponent notation outside `[1e-6, 1e21)`.
fn float_text(f: f64) -> String {
    if f == 0.0 {
        // Covers -0 as well.
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", f);
    }
    let exp = format!("{:e}", f);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// The two payload shapes served by different server versions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum ApiVersion {
    /// `clientData` keyed by client id; no WIP count, no chunk lists.
    #[strum(to_string = "clientData")]
    ClientData,
    /// `clientStatusDictionary` with `clientID`, `ip`, `performance`, `chunks`; has `wipChunks`.
    #[strum(to_string = "clientStatusDictionary")]
    StatusDictionary,
}

impl ApiVersion {
    /// Layout used when neither the user nor the payload settles the version.
    pub const FALLBACK: ApiVersion = ApiVersion::StatusDictionary;

    /// Picks the layout for a render pass: an explicit choice wins, then detection.
    pub fn resolve(pinned: Option<ApiVersion>, payload: Option<&StatsPayload>) -> ApiVersion {
        pinned
            .or_else(|| payload.and_then(StatsPayload::detect_api_version))
            .unwrap_or(Self::FALLBACK)
    }

    pub fn has_wip_chunks(&self) -> bool {
        matches!(self, ApiVersion::StatusDictionary)
    }

    pub fn has_chunk_lists(&self) -> bool {
        matches!(self, ApiVersion::StatusDictionary)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsPayload {
    #[serde(default)]
    pub total_performance: Field,
    #[serde(default)]
    pub eta: Field,
    #[serde(default)]
    pub batched_chunks: Field,
    #[serde(default)]
    pub todo_chunks: Field,
    #[serde(default)]
    pub wip_chunks: Field,
    #[serde(default)]
    pub total_chunks: Field,
    /// Kept untyped so a malformed map cannot fail the whole decode.
    #[serde(default)]
    pub client_status_dictionary: Field,
    #[serde(default)]
    pub client_data: Field,
}

impl StatsPayload {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Infers the server version from which keys are present.
    pub fn detect_api_version(&self) -> Option<ApiVersion> {
        if self.client_status_dictionary.is_object() {
            Some(ApiVersion::StatusDictionary)
        } else if self.client_data.is_object() {
            Some(ApiVersion::ClientData)
        } else if !self.wip_chunks.is_missing() {
            Some(ApiVersion::StatusDictionary)
        } else {
            None
        }
    }

    /// Client entries read from the map that belongs to `version`.
    ///
    /// Entries come in property enumeration order: array-index keys ascending, then the
    /// other keys as the server sent them. A payload of the other shape, or a map that is
    /// not a JSON object, yields no entries.
    pub fn clients(&self, version: ApiVersion) -> Vec<ClientEntry> {
        let field = match version {
            ApiVersion::ClientData => &self.client_data,
            ApiVersion::StatusDictionary => &self.client_status_dictionary,
        };
        let Some(Value::Object(map)) = field.value() else {
            return Vec::new();
        };
        enumeration_order(map)
            .into_iter()
            .map(|(key, value)| ClientEntry::from_map_entry(version, key, value))
            .collect()
    }
}

/// Parses keys of the form `0`, `1`, ... up to `2^32 - 2` without leading zeros.
fn array_index(key: &str) -> Option<u32> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

fn enumeration_order(map: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut indexed: Vec<(u32, &str, &Value)> = Vec::new();
    let mut named: Vec<(&str, &Value)> = Vec::new();
    for (key, value) in map {
        match array_index(key) {
            Some(index) => indexed.push((index, key.as_str(), value)),
            None => named.push((key.as_str(), value)),
        }
    }
    indexed.sort_by_key(|(index, _, _)| *index);
    indexed
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .chain(named)
        .collect()
}

/// A list item's text; `null` leaves the item empty.
fn item_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => value_text(other),
    }
}

/// One client's line in the breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientEntry {
    pub client_id: Field,
    pub ip: Field,
    pub performance: Field,
    pub chunks: Field,
}

impl ClientEntry {
    fn from_map_entry(version: ApiVersion, key: &str, value: &Value) -> Self {
        let client_id = match version {
            ApiVersion::ClientData => Field::new(Value::String(key.to_string())),
            ApiVersion::StatusDictionary => Field::lookup(value, "clientID"),
        };
        Self {
            client_id,
            ip: Field::lookup(value, "ip"),
            performance: Field::lookup(value, "performance"),
            chunks: Field::lookup(value, "chunks"),
        }
    }

    /// Chunk identifiers assigned to the client, in order.
    pub fn chunk_ids(&self) -> Vec<String> {
        match self.chunks.value() {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(item_text).collect(),
            Some(other) => vec![item_text(other)],
        }
    }
}
