// ── LTM addressing and response models ──
//
// ObjectId and PoolMember carry BigIP's path-segment encodings. The
// virtual-server summary flattens the raw iControl JSON into the handful
// of fields the CLI actually displays.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use crate::error::Error;

// ── ObjectType ──────────────────────────────────────────────────────

/// LTM resource collection, rendered lowercase in URLs (`/mgmt/tm/ltm/{type}`).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    #[default]
    Virtual,
    Pool,
    Node,
}

// ── ObjectId ────────────────────────────────────────────────────────

/// A `(partition, name)` pair addressing one LTM object.
///
/// BigIP wants this as `~partition~name` inside URL path segments; the
/// [`Display`](fmt::Display) impl produces exactly that form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId<'a> {
    partition: &'a str,
    name: &'a str,
}

impl<'a> ObjectId<'a> {
    pub fn new(partition: &'a str, name: &'a str) -> Self {
        Self { partition, name }
    }

    pub fn partition(&self) -> &'a str {
        self.partition
    }

    pub fn name(&self) -> &'a str {
        self.name
    }
}

impl fmt::Display for ObjectId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}~{}", self.partition, self.name)
    }
}

// ── PoolMember ──────────────────────────────────────────────────────

/// A pool member: node address (IP or hostname) plus service port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolMember<'a> {
    name: &'a str,
    port: &'a str,
}

impl<'a> PoolMember<'a> {
    pub fn new(name: &'a str, port: &'a str) -> Self {
        Self { name, port }
    }

    /// Fully-qualified member name used in create bodies: `/partition/name:port`.
    pub fn qualified(&self, partition: &str) -> String {
        format!("/{partition}/{self}")
    }
}

impl fmt::Display for PoolMember<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.port)
    }
}

// ── Error bodies ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the appliance's `message` field from an error body.
///
/// iControl REST errors look like `{"code":404,"message":"...","errorStack":[]}`.
/// Returns `None` when the body is not JSON or carries no message.
pub fn response_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

// ── VirtualServerSummary ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VirtualServerStatus {
    Enabled,
    Disabled,
}

/// Normalized view of a `tm:ltm:virtual:virtualstate` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualServerSummary {
    pub name: String,
    pub partition: String,
    pub address_status: String,
    /// Address part of `destination`, without the partition prefix.
    pub destination: String,
    pub status: Option<VirtualServerStatus>,
    pub source: String,
    pub ip_protocol: String,
    pub source_port: String,
    pub pool: Option<String>,
    pub source_address_translation: Value,
}

impl VirtualServerSummary {
    /// Map a raw virtual-server JSON object into a summary.
    ///
    /// `enabled` / `disabled` are mutually exclusive presence flags on the
    /// appliance side; whichever key exists decides the status.
    pub fn from_json(raw: &Value) -> Result<Self, Error> {
        let status = if raw.get("enabled").is_some() {
            Some(VirtualServerStatus::Enabled)
        } else if raw.get("disabled").is_some() {
            Some(VirtualServerStatus::Disabled)
        } else {
            None
        };

        let full_destination = required_str(raw, "destination")?;
        let destination = parse_destination(full_destination).ok_or_else(|| {
            Error::Deserialization {
                message: format!("destination {full_destination:?} has no address segment"),
                body: raw.to_string(),
            }
        })?;

        Ok(Self {
            name: required_str(raw, "name")?.to_owned(),
            partition: required_str(raw, "partition")?.to_owned(),
            address_status: required_str(raw, "addressStatus")?.to_owned(),
            destination: destination.to_owned(),
            status,
            source: required_str(raw, "source")?.to_owned(),
            ip_protocol: required_str(raw, "ipProtocol")?.to_owned(),
            source_port: required_str(raw, "sourcePort")?.to_owned(),
            pool: raw.get("pool").and_then(Value::as_str).map(str::to_owned),
            source_address_translation: raw
                .get("sourceAddressTranslation")
                .cloned()
                .ok_or_else(|| missing_field("sourceAddressTranslation", raw))?,
        })
    }
}

/// `"/Common/10.1.1.1:80"` -> `"10.1.1.1:80"`: the segment after the second `/`.
pub(crate) fn parse_destination(destination: &str) -> Option<&str> {
    destination.split('/').nth(2)
}

fn required_str<'v>(raw: &'v Value, key: &str) -> Result<&'v str, Error> {
    raw.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| missing_field(key, raw))
}

fn missing_field(key: &str, raw: &Value) -> Error {
    Error::Deserialization {
        message: format!("virtual server is missing string field `{key}`"),
        body: raw.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn raw_virtual() -> Value {
        json!({
            "kind": "tm:ltm:virtual:virtualstate",
            "name": "vs_mobilidade_443",
            "partition": "producao",
            "addressStatus": "yes",
            "destination": "/Common/10.1.1.1:80",
            "enabled": true,
            "source": "0.0.0.0/0",
            "ipProtocol": "tcp",
            "sourcePort": "preserve",
            "pool": "/producao/pool_ws_mobilidade",
            "sourceAddressTranslation": { "type": "automap" }
        })
    }

    #[test]
    fn object_id_renders_tilde_form() {
        assert_eq!(ObjectId::new("P", "N").to_string(), "~P~N");
    }

    #[test]
    fn object_type_is_lowercase() {
        assert_eq!(ObjectType::default().to_string(), "virtual");
        assert_eq!(ObjectType::Pool.as_ref(), "pool");
        assert_eq!("node".parse::<ObjectType>().unwrap(), ObjectType::Node);
    }

    #[test]
    fn pool_member_forms() {
        let member = PoolMember::new("10.0.0.1", "8080");
        assert_eq!(member.to_string(), "10.0.0.1:8080");
        assert_eq!(member.qualified("producao"), "/producao/10.0.0.1:8080");
    }

    #[test]
    fn destination_takes_segment_after_second_slash() {
        assert_eq!(parse_destination("/Common/10.1.1.1:80"), Some("10.1.1.1:80"));
        assert_eq!(parse_destination("10.1.1.1:80"), None);
    }

    #[test]
    fn summary_maps_known_fields() {
        let summary = VirtualServerSummary::from_json(&raw_virtual()).unwrap();
        assert_eq!(summary.name, "vs_mobilidade_443");
        assert_eq!(summary.partition, "producao");
        assert_eq!(summary.address_status, "yes");
        assert_eq!(summary.destination, "10.1.1.1:80");
        assert_eq!(summary.status, Some(VirtualServerStatus::Enabled));
        assert_eq!(summary.ip_protocol, "tcp");
        assert_eq!(summary.source_port, "preserve");
        assert_eq!(summary.pool.as_deref(), Some("/producao/pool_ws_mobilidade"));
        assert_eq!(summary.source_address_translation, json!({ "type": "automap" }));
    }

    #[test]
    fn summary_status_follows_flag_presence() {
        let mut raw = raw_virtual();
        let obj = raw.as_object_mut().unwrap();
        obj.remove("enabled");
        obj.insert("disabled".into(), json!(true));
        let summary = VirtualServerSummary::from_json(&raw).unwrap();
        assert_eq!(summary.status, Some(VirtualServerStatus::Disabled));

        raw.as_object_mut().unwrap().remove("disabled");
        let summary = VirtualServerSummary::from_json(&raw).unwrap();
        assert_eq!(summary.status, None);
    }

    #[test]
    fn summary_without_pool() {
        let mut raw = raw_virtual();
        raw.as_object_mut().unwrap().remove("pool");
        let summary = VirtualServerSummary::from_json(&raw).unwrap();
        assert_eq!(summary.pool, None);
    }

    #[test]
    fn summary_missing_field_is_an_error() {
        let mut raw = raw_virtual();
        raw.as_object_mut().unwrap().remove("ipProtocol");
        let err = VirtualServerSummary::from_json(&raw).unwrap_err();
        assert!(err.to_string().contains("ipProtocol"), "{err}");
    }

    #[test]
    fn response_message_reads_icontrol_errors() {
        let body = r#"{"code":404,"message":"Object not found","errorStack":[]}"#;
        assert_eq!(response_message(body).as_deref(), Some("Object not found"));
        assert_eq!(response_message("<html>502</html>"), None);
        assert_eq!(response_message(r#"{"code":500}"#), None);
    }
}
