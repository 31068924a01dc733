//! Consistent pseudonymization of login identifiers
//!
//! Within one batch, every occurrence of the same raw `device_id` (or `ip`)
//! receives the same masked value, and distinct raw values receive
//! independently drawn masks. Nothing is remembered between batches.
//!
//! # Architecture
//!
//! - **Generators**: sources of fresh masked values per [`generator::MaskKind`]
//! - **Engine**: duplicate detection and the per-call masking table
//! - **Batch**: masks both identifying fields and projects output rows
//! - **Audit**: per-batch counters written as JSON lines
//!
//! # Usage
//!
//! ```rust
//! use maskload::domain::RawRecord;
//! use maskload::masking::{BatchMasker, MaskingConfig};
//! use serde_json::json;
//!
//! let raw = json!({"user_id": "u1", "device_id": "A", "ip": "10.0.0.1"});
//! let records = vec![RawRecord::from(raw.as_object().unwrap().clone())];
//!
//! let masker = BatchMasker::new(&MaskingConfig::default());
//! let batch = masker.mask(&records)?;
//! assert_eq!(batch.records.len(), 1);
//! # Ok::<(), maskload::domain::MaskingError>(())
//! ```

pub mod audit;
pub mod batch;
pub mod config;
pub mod engine;
pub mod generator;

pub use audit::AuditLogger;
pub use batch::{check_record, BatchMasker, MaskedBatch};
pub use config::{MaskingConfig, NullPolicy};
pub use engine::{
    check_field, mask_field, mask_field_with_policy, FieldMaskStats, MaskedColumn, MaskingTable,
};
pub use generator::{IdentifierGenerator, Ipv4Generator, MaskGenerator, MaskKind};
