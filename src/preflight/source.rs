use std::sync::Arc;

/// Error type for zone record storage
///
/// Wraps whatever error the storage backend produced. Validation never turns
/// these into issues; they are reported to the caller as infrastructure
/// failures.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct SourceError(Box<dyn std::error::Error + Send + Sync>);

impl SourceError {
    /// Wrap a storage backend error.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        SourceError(error.into())
    }
}

/// An active SOA record row, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaRow {
    pub id: i64,
    pub name: String,
    pub content: String,
}

impl SoaRow {
    pub fn new(id: i64, name: impl Into<String>, content: impl Into<String>) -> Self {
        SoaRow {
            id,
            name: name.into(),
            content: content.into(),
        }
    }
}

/// The owner name of an NS record row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsRow {
    pub name: String,
}

impl NsRow {
    pub fn new(name: impl Into<String>) -> Self {
        NsRow { name: name.into() }
    }
}

/// Read access to the records of a zone
///
/// This trait is the narrow interface the pre-flight validator uses to fetch
/// records. Implementations might query a database, a zone file, or rows the
/// caller already holds (see [`ZoneSnapshot`]).
pub trait ZoneRecordSource {
    /// Fetch the active (not disabled) SOA rows of a zone
    ///
    /// # Arguments
    ///
    /// * `zone_id` - The storage identifier of the zone
    /// * `zone_name` - The apex name of the zone
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails
    fn active_soa_rows(&self, zone_id: i64, zone_name: &str) -> Result<Vec<SoaRow>, SourceError>;

    /// Fetch the NS rows of a zone
    ///
    /// Implementations may return only the apex NS rows or every NS row in
    /// the zone. Rows whose owner is not the apex never satisfy the apex NS
    /// check.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails
    fn ns_rows(&self, zone_id: i64, zone_name: &str) -> Result<Vec<NsRow>, SourceError>;
}

impl<S> ZoneRecordSource for &S
where
    S: ZoneRecordSource + ?Sized,
{
    fn active_soa_rows(&self, zone_id: i64, zone_name: &str) -> Result<Vec<SoaRow>, SourceError> {
        (**self).active_soa_rows(zone_id, zone_name)
    }

    fn ns_rows(&self, zone_id: i64, zone_name: &str) -> Result<Vec<NsRow>, SourceError> {
        (**self).ns_rows(zone_id, zone_name)
    }
}

impl<S> ZoneRecordSource for Arc<S>
where
    S: ZoneRecordSource + ?Sized,
{
    fn active_soa_rows(&self, zone_id: i64, zone_name: &str) -> Result<Vec<SoaRow>, SourceError> {
        (**self).active_soa_rows(zone_id, zone_name)
    }

    fn ns_rows(&self, zone_id: i64, zone_name: &str) -> Result<Vec<NsRow>, SourceError> {
        (**self).ns_rows(zone_id, zone_name)
    }
}

/// Rows the caller has already fetched for a single zone.
///
/// The zone id and name passed to the source methods are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneSnapshot {
    soa: Vec<SoaRow>,
    ns: Vec<NsRow>,
}

impl ZoneSnapshot {
    pub fn new(soa: Vec<SoaRow>, ns: Vec<NsRow>) -> Self {
        ZoneSnapshot { soa, ns }
    }

    pub fn with_soa(mut self, row: SoaRow) -> Self {
        self.soa.push(row);
        self
    }

    pub fn with_ns(mut self, row: NsRow) -> Self {
        self.ns.push(row);
        self
    }
}

impl ZoneRecordSource for ZoneSnapshot {
    fn active_soa_rows(&self, _zone_id: i64, _zone_name: &str) -> Result<Vec<SoaRow>, SourceError> {
        Ok(self.soa.clone())
    }

    fn ns_rows(&self, _zone_id: i64, _zone_name: &str) -> Result<Vec<NsRow>, SourceError> {
        Ok(self.ns.clone())
    }
}
