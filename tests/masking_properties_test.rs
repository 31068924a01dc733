//! Property tests for consistent masking over generated login data
//!
//! Raw identifiers are produced with `fake`, so every run exercises a
//! different batch.

use fake::faker::internet::en::IPv4;
use fake::uuid::UUIDv4;
use fake::Fake;
use maskload::domain::{fields, RawRecord};
use maskload::masking::engine::value_multiplicity;
use maskload::masking::{
    mask_field, BatchMasker, IdentifierGenerator, Ipv4Generator, MaskKind, MaskingConfig,
    NullPolicy,
};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use test_case::test_case;

/// Batch of `size` logins drawn from `devices` device ids and `ips` addresses
fn generated_batch(size: usize, devices: usize, ips: usize) -> Vec<RawRecord> {
    let device_pool: Vec<String> = (0..devices)
        .map(|_| UUIDv4.fake::<uuid::Uuid>().to_string())
        .collect();
    let ip_pool: Vec<String> = (0..ips).map(|_| IPv4().fake()).collect();

    (0..size)
        .map(|i| {
            let value = json!({
                "user_id": format!("user-{i}"),
                "device_type": "ios",
                "device_id": device_pool[(0..devices).fake::<usize>()],
                "ip": ip_pool[(0..ips).fake::<usize>()],
                "locale": "US",
                "app_version": "1.0.0"
            });
            RawRecord::from(value.as_object().cloned().unwrap_or_default())
        })
        .collect()
}

fn raw(records: &[RawRecord], field: &str) -> Vec<String> {
    records
        .iter()
        .map(|r| r.get(field).and_then(|v| v.as_str()).unwrap().to_string())
        .collect()
}

/// Equal raw values map to equal masks, distinct raw values to distinct masks
fn assert_consistent(raw: &[String], masked: &[String]) {
    assert_eq!(raw.len(), masked.len());

    let mut forward: HashMap<&str, &str> = HashMap::new();
    for (r, m) in raw.iter().zip(masked) {
        let previous = forward.insert(r, m);
        if let Some(previous) = previous {
            assert_eq!(previous, m, "raw value masked two ways");
        }
    }

    let distinct_masks: HashSet<&str> = forward.values().copied().collect();
    assert_eq!(distinct_masks.len(), forward.len(), "two raw values share a mask");
}

#[test_case(1, 1, 1 ; "single record")]
#[test_case(50, 50, 50 ; "mostly unique")]
#[test_case(200, 5, 3 ; "heavy repetition")]
#[test_case(500, 40, 120 ; "mixed")]
fn test_batch_masks_are_consistent(size: usize, devices: usize, ips: usize) {
    let records = generated_batch(size, devices, ips);
    let batch = BatchMasker::default().mask(&records).unwrap();
    assert_eq!(batch.records.len(), size);

    let masked_devices: Vec<String> = batch
        .records
        .iter()
        .map(|r| r.masked_device_id.clone().unwrap())
        .collect();
    let masked_ips: Vec<String> = batch
        .records
        .iter()
        .map(|r| r.masked_ip.clone().unwrap())
        .collect();

    assert_consistent(&raw(&records, fields::DEVICE_ID), &masked_devices);
    assert_consistent(&raw(&records, fields::IP), &masked_ips);

    assert!(masked_devices
        .iter()
        .all(|m| MaskKind::DeviceIdentifier.matches(m)));
    assert!(masked_ips.iter().all(|m| MaskKind::Ipv4Address.matches(m)));
}

#[test_case(MaskKind::DeviceIdentifier ; "device identifiers")]
#[test_case(MaskKind::Ipv4Address ; "ipv4 addresses")]
fn test_table_holds_only_repeated_values(kind: MaskKind) {
    let records = generated_batch(300, 20, 20);
    let field = match kind {
        MaskKind::DeviceIdentifier => fields::DEVICE_ID,
        MaskKind::Ipv4Address => fields::IP,
    };

    let counts = value_multiplicity(&records, field, NullPolicy::Reject).unwrap();
    let repeated = counts.values().filter(|&&n| n > 1).count();

    let column = match kind {
        MaskKind::DeviceIdentifier => maskload::masking::mask_field_with_policy(
            &records,
            field,
            &mut IdentifierGenerator::from_entropy(),
            NullPolicy::Reject,
        ),
        MaskKind::Ipv4Address => maskload::masking::mask_field_with_policy(
            &records,
            field,
            &mut Ipv4Generator::from_entropy(),
            NullPolicy::Reject,
        ),
    }
    .unwrap();

    assert_eq!(column.stats.kind, kind);
    assert_eq!(column.stats.distinct_values, counts.len());
    assert_eq!(column.stats.duplicated_values, repeated);
    assert_eq!(column.stats.table_entries, repeated);
    assert_eq!(column.stats.generator_calls, counts.len());
}

#[test]
fn test_masks_do_not_carry_across_batches() {
    let records = generated_batch(100, 3, 3);
    let first = mask_field(&records, fields::IP, &mut Ipv4Generator::from_entropy()).unwrap();
    let second = mask_field(&records, fields::IP, &mut Ipv4Generator::from_entropy()).unwrap();

    // Each call starts with an empty table; the two mappings are drawn independently
    assert_ne!(first, second);
}

#[test]
fn test_seeded_masker_is_deterministic() {
    let records = generated_batch(100, 10, 10);
    let config = MaskingConfig {
        seed: Some(7),
        ..MaskingConfig::default()
    };

    let first = BatchMasker::new(&config).mask(&records).unwrap();
    let second = BatchMasker::new(&config).mask(&records).unwrap();
    assert_eq!(first.records, second.records);
}
