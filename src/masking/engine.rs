//! Consistent masking engine
//!
//! Masks one field across a whole batch so that equal raw values get equal masks
//! and distinct raw values get independently drawn masks.
//!
//! # Algorithm
//!
//! 1. Extract and validate the field for every record. Any missing, malformed or
//!    (under [`NullPolicy::Reject`]) null value fails the pass before a single
//!    mask is drawn.
//! 2. Count how often each raw value occurs in the *entire* batch.
//! 3. Scan in order. Values seen once get a fresh mask and are never stored.
//!    Values seen more than once are resolved through a [`MaskingTable`] that
//!    lives only for this call.
//!
//! # Examples
//!
//! ```
//! use maskload::domain::RawRecord;
//! use maskload::masking::engine::mask_field;
//! use maskload::masking::generator::IdentifierGenerator;
//! use serde_json::json;
//!
//! let batch: Vec<RawRecord> = [json!({"device_id": "A"}), json!({"device_id": "B"}), json!({"device_id": "A"})]
//!     .into_iter()
//!     .map(|v| RawRecord::from(v.as_object().unwrap().clone()))
//!     .collect();
//!
//! let mut generator = IdentifierGenerator::from_entropy();
//! let masked = mask_field(&batch, "device_id", &mut generator)?;
//! assert_eq!(masked.len(), 3);
//! assert_eq!(masked[0], masked[2]);
//! # Ok::<(), maskload::domain::MaskingError>(())
//! ```

use crate::domain::{is_null_like, GeneratorError, MaskingError, RawRecord};
use crate::masking::config::NullPolicy;
use crate::masking::generator::{MaskGenerator, MaskKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Raw value to masked value mapping for one field of one batch
#[derive(Debug, Default)]
pub struct MaskingTable {
    entries: HashMap<String, String>,
}

impl MaskingTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Masked value previously stored for `raw`
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }

    /// Store the mask for `raw`
    pub fn insert(&mut self, raw: String, masked: String) {
        self.entries.insert(raw, masked);
    }

    /// Number of stored raw values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters collected while masking one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMaskStats {
    /// Field that was masked
    pub field: String,

    /// Kind of mask produced
    pub kind: MaskKind,

    /// Records scanned
    pub records: usize,

    /// Distinct non-null raw values
    pub distinct_values: usize,

    /// Raw values occurring more than once
    pub duplicated_values: usize,

    /// Entries placed in the masking table
    pub table_entries: usize,

    /// Calls made to the generator
    pub generator_calls: usize,

    /// Null-like values passed through unmasked
    pub null_values: usize,
}

impl FieldMaskStats {
    fn new(field: &str, kind: MaskKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
            records: 0,
            distinct_values: 0,
            duplicated_values: 0,
            table_entries: 0,
            generator_calls: 0,
            null_values: 0,
        }
    }
}

/// Masked values for one field, aligned with the input batch
#[derive(Debug, Clone)]
pub struct MaskedColumn {
    /// One entry per input record; `None` only for passed-through nulls
    pub values: Vec<Option<String>>,

    /// Counters for the pass
    pub stats: FieldMaskStats,
}

/// Mask `field` across `records`, rejecting null-like values
///
/// Returns one masked value per record, in input order.
///
/// # Errors
///
/// Fails with the offending field and record position if a value is missing,
/// null-like or not a usable identifier, and fails if the generator does. No
/// masked values are returned on failure.
pub fn mask_field<G>(
    records: &[RawRecord],
    field: &str,
    generator: &mut G,
) -> Result<Vec<String>, MaskingError>
where
    G: MaskGenerator + ?Sized,
{
    let column = mask_field_with_policy(records, field, generator, NullPolicy::Reject)?;
    // Reject guarantees every entry is present
    Ok(column.values.into_iter().flatten().collect())
}

/// Mask `field` across `records` under an explicit null policy
pub fn mask_field_with_policy<G>(
    records: &[RawRecord],
    field: &str,
    generator: &mut G,
    policy: NullPolicy,
) -> Result<MaskedColumn, MaskingError>
where
    G: MaskGenerator + ?Sized,
{
    let column = extract_column(records, field, policy)?;
    let counts = frequency(&column);

    let mut stats = FieldMaskStats::new(field, generator.kind());
    stats.records = column.len();
    stats.distinct_values = counts.len();
    stats.duplicated_values = counts.values().filter(|&&n| n > 1).count();

    let mut table = MaskingTable::new();
    let mut values = Vec::with_capacity(column.len());

    for raw in &column {
        let masked = match raw.as_deref() {
            None => {
                stats.null_values += 1;
                None
            }
            Some(raw) if counts.get(raw).copied().unwrap_or(0) > 1 => match table.get(raw) {
                Some(existing) => Some(existing.to_string()),
                None => {
                    let fresh = draw(generator, field, &mut stats)?;
                    table.insert(raw.to_string(), fresh.clone());
                    Some(fresh)
                }
            },
            Some(_) => Some(draw(generator, field, &mut stats)?),
        };
        values.push(masked);
    }

    stats.table_entries = table.len();

    tracing::debug!(
        field = %field,
        records = stats.records,
        distinct = stats.distinct_values,
        duplicated = stats.duplicated_values,
        generator_calls = stats.generator_calls,
        "Masked field"
    );

    Ok(MaskedColumn { values, stats })
}

/// Occurrence count of every non-null raw value of `field` in the batch
///
/// Validates every record the same way the masking pass does.
pub fn value_multiplicity(
    records: &[RawRecord],
    field: &str,
    policy: NullPolicy,
) -> Result<HashMap<String, usize>, MaskingError> {
    let column = extract_column(records, field, policy)?;
    Ok(frequency(&column)
        .into_iter()
        .map(|(raw, n)| (raw.to_string(), n))
        .collect())
}

/// Check one record's `field` against the rules the masking pass applies
///
/// `position` is only used to label the error.
pub fn check_field(
    record: &RawRecord,
    field: &str,
    position: usize,
    policy: NullPolicy,
) -> Result<(), MaskingError> {
    raw_value(record, field, position, policy).map(|_| ())
}

fn draw<G>(generator: &mut G, field: &str, stats: &mut FieldMaskStats) -> Result<String, MaskingError>
where
    G: MaskGenerator + ?Sized,
{
    stats.generator_calls += 1;
    let kind = generator.kind();
    let value = generator
        .generate()
        .map_err(|source| MaskingError::Generator {
            field: field.to_string(),
            source,
        })?;

    if !kind.matches(&value) {
        return Err(MaskingError::Generator {
            field: field.to_string(),
            source: GeneratorError::Malformed {
                kind: kind.label(),
                value,
            },
        });
    }

    Ok(value)
}

fn frequency<'c>(column: &'c [Option<Cow<'_, str>>]) -> HashMap<&'c str, usize> {
    let mut counts = HashMap::new();
    for raw in column.iter().flatten() {
        *counts.entry(raw.as_ref()).or_insert(0) += 1;
    }
    counts
}

fn extract_column<'a>(
    records: &'a [RawRecord],
    field: &str,
    policy: NullPolicy,
) -> Result<Vec<Option<Cow<'a, str>>>, MaskingError> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| raw_value(record, field, position, policy))
        .collect()
}

fn raw_value<'a>(
    record: &'a RawRecord,
    field: &str,
    position: usize,
    policy: NullPolicy,
) -> Result<Option<Cow<'a, str>>, MaskingError> {
    let value = record.get(field).ok_or_else(|| MaskingError::MissingField {
        field: field.to_string(),
        position,
    })?;

    if is_null_like(value) {
        return match policy {
            NullPolicy::Reject => Err(MaskingError::NullValue {
                field: field.to_string(),
                position,
            }),
            NullPolicy::PassThrough => Ok(None),
        };
    }

    let invalid = |reason: String| MaskingError::InvalidValue {
        field: field.to_string(),
        position,
        reason,
    };

    match value {
        Value::String(s) if s.trim().is_empty() => Err(invalid("value is blank".to_string())),
        Value::String(s) => Ok(Some(Cow::Borrowed(s.as_str()))),
        Value::Number(n) => Ok(Some(Cow::Owned(n.to_string()))),
        Value::Bool(_) => Err(invalid("expected a string or number, found a boolean".to_string())),
        Value::Array(_) => Err(invalid("expected a string or number, found an array".to_string())),
        Value::Object(_) => Err(invalid("expected a string or number, found an object".to_string())),
        Value::Null => Err(invalid("unexpected null".to_string())),
    }
}
