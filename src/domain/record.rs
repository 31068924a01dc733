//! Raw and masked login records
//!
//! A [`RawRecord`] is one decoded queue message body plus the injected
//! `create_date`. A [`MaskedRecord`] is the row handed to the load adapter, with
//! the columns in the fixed order given by [`MaskedRecord::COLUMNS`].

use crate::domain::errors::MaskloadError;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names read from login messages
pub mod fields {
    pub const USER_ID: &str = "user_id";
    pub const DEVICE_TYPE: &str = "device_type";
    pub const LOCALE: &str = "locale";
    pub const APP_VERSION: &str = "app_version";
    pub const DEVICE_ID: &str = "device_id";
    pub const IP: &str = "ip";
    pub const CREATE_DATE: &str = "create_date";
}

/// Format used for the injected `create_date` (HTTP IMF-fixdate)
pub const CREATE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Placeholder some producers write instead of a JSON null
const NONE_LITERAL: &str = "None";

/// Returns true for JSON null and the literal string `"None"`
pub fn is_null_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s == NONE_LITERAL,
        _ => false,
    }
}

/// Formats an ingestion timestamp the way it is stored in `create_date`
pub fn format_create_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(CREATE_DATE_FORMAT).to_string()
}

/// One decoded message body, decorated with `create_date`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Decodes a message body and injects `create_date`
    ///
    /// The injected timestamp overrides any `create_date` carried in the body.
    ///
    /// # Errors
    ///
    /// Returns [`MaskloadError::Serialization`] if the body is not JSON, and
    /// [`MaskloadError::Validation`] if it is JSON but not an object.
    pub fn from_message_body(body: &str, ingested_at: DateTime<Utc>) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        let Value::Object(mut fields) = value else {
            return Err(MaskloadError::Validation(
                "message body is not a JSON object".to_string(),
            ));
        };
        fields.insert(
            fields::CREATE_DATE.to_string(),
            Value::String(format_create_date(ingested_at)),
        );
        Ok(Self(fields))
    }

    /// Value stored under `name`, if the key is present
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Text of a non-identifying column, or `None` for SQL NULL
    ///
    /// Missing keys and null-like values both project to `None`. Non-string
    /// scalars are rendered with their JSON text.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            v if is_null_like(v) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Row appended to the login table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedRecord {
    pub user_id: Option<String>,
    pub device_type: Option<String>,
    pub masked_ip: Option<String>,
    pub masked_device_id: Option<String>,
    pub locale: Option<String>,
    pub app_version: Option<String>,
    pub create_date: Option<String>,
}

impl MaskedRecord {
    /// Output columns, in table order
    pub const COLUMNS: [&'static str; 7] = [
        "user_id",
        "device_type",
        "masked_ip",
        "masked_device_id",
        "locale",
        "app_version",
        "create_date",
    ];

    /// Projects a raw record plus its two masked values into a row
    pub fn project(
        raw: &RawRecord,
        masked_ip: Option<String>,
        masked_device_id: Option<String>,
    ) -> Self {
        Self {
            user_id: raw.text(fields::USER_ID),
            device_type: raw.text(fields::DEVICE_TYPE),
            masked_ip,
            masked_device_id,
            locale: raw.text(fields::LOCALE),
            app_version: raw.text(fields::APP_VERSION),
            create_date: raw.text(fields::CREATE_DATE),
        }
    }

    /// Column values in [`Self::COLUMNS`] order
    pub fn values(&self) -> [Option<&str>; 7] {
        [
            self.user_id.as_deref(),
            self.device_type.as_deref(),
            self.masked_ip.as_deref(),
            self.masked_device_id.as_deref(),
            self.locale.as_deref(),
            self.app_version.as_deref(),
            self.create_date.as_deref(),
        ]
    }
}
