//! Whole-batch masking and projection into output rows

use crate::domain::{fields, MaskedRecord, MaskingError, RawRecord};
use crate::masking::config::{MaskingConfig, NullPolicy};
use crate::masking::engine::{check_field, mask_field_with_policy, FieldMaskStats};
use crate::masking::generator::{IdentifierGenerator, Ipv4Generator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Output of masking one batch
#[derive(Debug, Clone)]
pub struct MaskedBatch {
    /// Rows aligned with the input batch
    pub records: Vec<MaskedRecord>,

    /// Counters for the device_id pass
    pub device_id: FieldMaskStats,

    /// Counters for the ip pass
    pub ip: FieldMaskStats,
}

impl MaskedBatch {
    /// Per-field counters, device_id first
    pub fn field_stats(&self) -> [FieldMaskStats; 2] {
        [self.device_id.clone(), self.ip.clone()]
    }
}

/// Masks device_id and ip over a batch and projects the result
///
/// Each call draws fresh generators, so masks are never shared across batches.
#[derive(Debug, Clone, Default)]
pub struct BatchMasker {
    null_policy: NullPolicy,
    seed: Option<u64>,
}

impl BatchMasker {
    /// Create a masker from configuration
    pub fn new(config: &MaskingConfig) -> Self {
        Self {
            null_policy: config.null_policy,
            seed: config.seed,
        }
    }

    /// Null policy applied to both fields
    pub fn null_policy(&self) -> NullPolicy {
        self.null_policy
    }

    /// Mask one batch
    ///
    /// Either both fields mask successfully and every input record yields a
    /// row, or an error is returned and nothing is produced.
    pub fn mask(&self, records: &[RawRecord]) -> Result<MaskedBatch, MaskingError> {
        let (mut device_generator, mut ip_generator) = self.generators();

        let device = mask_field_with_policy(
            records,
            fields::DEVICE_ID,
            &mut device_generator,
            self.null_policy,
        )?;
        let ip = mask_field_with_policy(records, fields::IP, &mut ip_generator, self.null_policy)?;

        Ok(MaskedBatch {
            records: project(records, ip.values, device.values),
            device_id: device.stats,
            ip: ip.stats,
        })
    }

    fn generators(&self) -> (IdentifierGenerator, Ipv4Generator) {
        match self.seed {
            Some(seed) => {
                let mut seeder = StdRng::seed_from_u64(seed);
                (
                    IdentifierGenerator::seeded(seeder.gen()),
                    Ipv4Generator::seeded(seeder.gen()),
                )
            }
            None => (
                IdentifierGenerator::from_entropy(),
                Ipv4Generator::from_entropy(),
            ),
        }
    }
}

/// Check that `record` would pass [`BatchMasker::mask`] under `policy`
///
/// Both identifying fields are checked, device_id first.
pub fn check_record(
    record: &RawRecord,
    position: usize,
    policy: NullPolicy,
) -> Result<(), MaskingError> {
    check_field(record, fields::DEVICE_ID, position, policy)?;
    check_field(record, fields::IP, position, policy)
}

/// Zip raw records with their masked ip and device_id into output rows
pub fn project(
    records: &[RawRecord],
    masked_ip: Vec<Option<String>>,
    masked_device_id: Vec<Option<String>>,
) -> Vec<MaskedRecord> {
    debug_assert_eq!(records.len(), masked_ip.len());
    debug_assert_eq!(records.len(), masked_device_id.len());

    records
        .iter()
        .zip(masked_ip)
        .zip(masked_device_id)
        .map(|((raw, ip), device_id)| MaskedRecord::project(raw, ip, device_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::generator::MaskKind;
    use serde_json::{json, Value};

    fn batch(values: Vec<Value>) -> Vec<RawRecord> {
        values
            .into_iter()
            .map(|v| RawRecord::from(v.as_object().unwrap().clone()))
            .collect()
    }

    fn login(user: &str, device: &str, ip: &str) -> Value {
        json!({
            "user_id": user,
            "device_type": "android",
            "device_id": device,
            "ip": ip,
            "locale": "RU",
            "app_version": "2.3.0",
            "create_date": "Mon, 06 Mar 2023 10:00:00 GMT"
        })
    }

    #[test]
    fn test_mask_batch_projects_all_columns() {
        let records = batch(vec![
            login("u1", "A", "1.1.1.1"),
            login("u2", "B", "1.1.1.1"),
            login("u3", "A", "2.2.2.2"),
        ]);
        let masker = BatchMasker::new(&MaskingConfig::default());
        let masked = masker.mask(&records).unwrap();

        assert_eq!(masked.records.len(), 3);
        let rows = &masked.records;
        assert_eq!(rows[0].user_id.as_deref(), Some("u1"));
        assert_eq!(rows[2].user_id.as_deref(), Some("u3"));
        assert_eq!(rows[0].masked_device_id, rows[2].masked_device_id);
        assert_ne!(rows[0].masked_device_id, rows[1].masked_device_id);
        assert_eq!(rows[0].masked_ip, rows[1].masked_ip);
        assert_ne!(rows[0].masked_ip, rows[2].masked_ip);
        assert_eq!(rows[1].locale.as_deref(), Some("RU"));
        assert_eq!(rows[1].app_version.as_deref(), Some("2.3.0"));

        for row in rows {
            assert!(MaskKind::DeviceIdentifier.matches(row.masked_device_id.as_deref().unwrap()));
            assert!(MaskKind::Ipv4Address.matches(row.masked_ip.as_deref().unwrap()));
        }

        assert_eq!(masked.device_id.table_entries, 1);
        assert_eq!(masked.ip.table_entries, 1);
    }

    #[test]
    fn test_seeded_masker_is_reproducible() {
        let records = batch(vec![login("u1", "A", "1.1.1.1"), login("u2", "B", "3.3.3.3")]);
        let config = MaskingConfig {
            seed: Some(99),
            ..MaskingConfig::default()
        };

        let first = BatchMasker::new(&config).mask(&records).unwrap();
        let second = BatchMasker::new(&config).mask(&records).unwrap();
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn test_failure_produces_nothing() {
        let records = batch(vec![login("u1", "A", "1.1.1.1"), json!({"user_id": "u2", "device_id": "B"})]);
        let err = BatchMasker::default().mask(&records).unwrap_err();
        assert_eq!(err.field(), "ip");
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn test_checked_records_always_mask() {
        let good = batch(vec![login("u1", "A", "1.1.1.1"), json!({"device_id": 7, "ip": "None"})]);
        for (position, record) in good.iter().enumerate() {
            check_record(record, position, NullPolicy::PassThrough).unwrap();
        }
        let masker = BatchMasker::new(&MaskingConfig {
            null_policy: NullPolicy::PassThrough,
            ..MaskingConfig::default()
        });
        assert_eq!(masker.mask(&good).unwrap().records.len(), 2);

        let bad = batch(vec![json!({"user_id": "u4", "device_id": "D"})]);
        let err = check_record(&bad[0], 5, NullPolicy::Reject).unwrap_err();
        assert_eq!(err.field(), "ip");
        assert_eq!(err.position(), Some(5));
    }

    #[test]
    fn test_optional_columns_become_null() {
        let records = batch(vec![json!({"device_id": "A", "ip": "1.1.1.1", "locale": null})]);
        let masked = BatchMasker::default().mask(&records).unwrap();
        let row = &masked.records[0];
        assert!(row.user_id.is_none());
        assert!(row.locale.is_none());
        assert!(row.create_date.is_none());
    }
}
