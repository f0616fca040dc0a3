#![allow(unused)]

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, Once};

use walnut_zonecheck::preflight::{NsRow, SoaRow, SourceError, ZoneRecordSource};

/// Registers a global default tracing subscriber when called for the first time. This is intended
/// for use in tests.
pub fn subscribe() {
    static INSTALL_TRACING_SUBSCRIBER: Once = Once::new();
    INSTALL_TRACING_SUBSCRIBER.call_once(|| {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).unwrap();
    });
}

pub const SOA_CONTENT: &str =
    "ns1.example.com hostmaster.example.com 2024010100 28800 7200 604800 86400";

#[derive(Debug, Clone)]
struct StoredRecord {
    id: i64,
    name: String,
    rtype: &'static str,
    content: String,
    disabled: bool,
}

/// Record rows for many zones, keyed by zone id, shaped like a records table.
#[derive(Debug, Default)]
pub struct TestZoneStore {
    zones: Mutex<BTreeMap<i64, Vec<StoredRecord>>>,
    next_id: Mutex<i64>,
}

impl TestZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, zone_id: i64, name: &str, rtype: &'static str, content: &str, disabled: bool) -> i64 {
        let mut next = self.next_id.lock().expect("poisoned");
        *next += 1;
        let id = *next;

        let mut zones = self.zones.lock().expect("poisoned");
        zones.entry(zone_id).or_default().push(StoredRecord {
            id,
            name: name.to_owned(),
            rtype,
            content: content.to_owned(),
            disabled,
        });
        id
    }

    pub fn add_soa(&self, zone_id: i64, name: &str, content: &str) -> i64 {
        self.insert(zone_id, name, "SOA", content, false)
    }

    pub fn add_disabled_soa(&self, zone_id: i64, name: &str, content: &str) -> i64 {
        self.insert(zone_id, name, "SOA", content, true)
    }

    pub fn add_ns(&self, zone_id: i64, name: &str, target: &str) -> i64 {
        self.insert(zone_id, name, "NS", target, false)
    }

    pub fn add_record(&self, zone_id: i64, name: &str, rtype: &'static str, content: &str) -> i64 {
        self.insert(zone_id, name, rtype, content, false)
    }

    /// A zone with one apex SOA and two apex NS records.
    pub fn healthy(zone_id: i64, zone: &str) -> Self {
        let store = Self::new();
        store.add_soa(zone_id, zone, SOA_CONTENT);
        store.add_ns(zone_id, zone, "ns1.example.com");
        store.add_ns(zone_id, zone, "ns2.example.com");
        store
    }

    fn rows(&self, zone_id: i64, rtype: &str) -> Vec<StoredRecord> {
        let zones = self.zones.lock().expect("poisoned");
        zones
            .get(&zone_id)
            .into_iter()
            .flatten()
            .filter(|record| record.rtype == rtype && !record.disabled)
            .cloned()
            .collect()
    }
}

impl ZoneRecordSource for TestZoneStore {
    fn active_soa_rows(&self, zone_id: i64, _zone_name: &str) -> Result<Vec<SoaRow>, SourceError> {
        tracing::trace!(zone_id, "fetching SOA rows");
        Ok(self
            .rows(zone_id, "SOA")
            .into_iter()
            .map(|record| SoaRow::new(record.id, record.name, record.content))
            .collect())
    }

    fn ns_rows(&self, zone_id: i64, _zone_name: &str) -> Result<Vec<NsRow>, SourceError> {
        tracing::trace!(zone_id, "fetching NS rows");
        Ok(self
            .rows(zone_id, "NS")
            .into_iter()
            .map(|record| NsRow::new(record.name))
            .collect())
    }
}

/// A store whose backend is unreachable.
#[derive(Debug, Default)]
pub struct UnavailableStore;

impl ZoneRecordSource for UnavailableStore {
    fn active_soa_rows(&self, _zone_id: i64, _zone_name: &str) -> Result<Vec<SoaRow>, SourceError> {
        Err(SourceError::new(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "database unavailable",
        )))
    }

    fn ns_rows(&self, _zone_id: i64, _zone_name: &str) -> Result<Vec<NsRow>, SourceError> {
        Err(SourceError::new("timed out fetching NS rows"))
    }
}
