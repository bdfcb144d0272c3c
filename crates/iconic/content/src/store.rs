//! Active dataset snapshot and the bundled/remote version guard.

use std::sync::Arc;

use iconic_core::{
    DatasetSnapshot, DecodeError, FilterMode, IconOracle, IconRecord, SpriteSheet, Timestamp,
};

/// Result of offering a remote payload to the store.
#[derive(Clone, Debug)]
pub enum RemoteOutcome {
    /// The remote build was newer and is now active.
    Installed(Arc<DatasetSnapshot>),
    /// The remote build was not newer; the active snapshot is unchanged.
    Stale {
        remote: Timestamp,
        baseline: Timestamp,
    },
}

impl RemoteOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, RemoteOutcome::Installed(_))
    }
}

/// Holds the active [`DatasetSnapshot`].
///
/// Snapshots are swapped whole: a failed decode leaves the previous snapshot
/// and baseline untouched, and readers holding an `Arc` keep their version.
#[derive(Debug, Default)]
pub struct DatasetStore {
    current: Option<Arc<DatasetSnapshot>>,
    baseline: Option<Timestamp>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes and installs the bundled dataset unconditionally.
    pub fn load_bundled(
        &mut self,
        text: &str,
        sprite: SpriteSheet,
    ) -> Result<Arc<DatasetSnapshot>, DecodeError> {
        let snapshot = self.install(text, sprite)?;
        tracing::info!(
            target: "iconic::data",
            "Loaded bundled data ({} icons, {})",
            snapshot.icons().len(),
            snapshot.timestamp()
        );
        Ok(snapshot)
    }

    /// Installs a remote dataset only when it is strictly newer than the
    /// remembered baseline.
    ///
    /// Stale payloads are not decoded past their timestamp.
    pub fn load_remote(
        &mut self,
        text: &str,
        sprite: SpriteSheet,
    ) -> Result<RemoteOutcome, DecodeError> {
        let remote = DatasetSnapshot::peek_timestamp(text)?;

        if let Some(baseline) = self.baseline {
            if !remote.supersedes(baseline) {
                tracing::info!(
                    target: "iconic::data",
                    "Loaded remote data ({}) but bundled data is up to date or newer",
                    remote
                );
                return Ok(RemoteOutcome::Stale { remote, baseline });
            }
        }

        let snapshot = self.install(text, sprite)?;
        tracing::info!(
            target: "iconic::data",
            "Replaced bundled data with remote data ({} icons, {})",
            snapshot.icons().len(),
            snapshot.timestamp()
        );
        Ok(RemoteOutcome::Installed(snapshot))
    }

    pub fn current(&self) -> Option<&Arc<DatasetSnapshot>> {
        self.current.as_ref()
    }

    /// Timestamp a remote payload must exceed to be installed.
    pub fn baseline(&self) -> Option<Timestamp> {
        self.baseline
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<Arc<IconRecord>> {
        self.current.as_ref()?.lookup_by_name(name).cloned()
    }

    fn install(
        &mut self,
        text: &str,
        sprite: SpriteSheet,
    ) -> Result<Arc<DatasetSnapshot>, DecodeError> {
        let snapshot = Arc::new(DatasetSnapshot::parse(
            text,
            sprite.with_filter_mode(FilterMode::Point),
        )?);
        self.baseline = Some(snapshot.timestamp());
        self.current = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

impl IconOracle for DatasetStore {
    fn icon(&self, name: &str) -> Option<Arc<IconRecord>> {
        self.lookup_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLED: &str = "1000#m|0|1|0,0|1$0:3#Wires^Cut";
    const NEWER: &str = "2000#m|0|1|1,0|1$4#Keypad^Press";

    fn sprite() -> SpriteSheet {
        SpriteSheet::blank(64, 64)
    }

    #[test]
    fn bundled_load_sets_baseline_and_point_filtering() {
        let mut store = DatasetStore::new();
        let snapshot = store.load_bundled(BUNDLED, sprite()).unwrap();

        assert_eq!(store.baseline(), Some(Timestamp::from_millis(1000.0)));
        assert_eq!(snapshot.sprite().filter_mode(), FilterMode::Point);
        assert!(store.lookup_by_name("Wires").is_some());
    }

    #[test]
    fn newer_remote_replaces_snapshot() {
        let mut store = DatasetStore::new();
        store.load_bundled(BUNDLED, sprite()).unwrap();

        let outcome = store.load_remote(NEWER, sprite()).unwrap();
        assert!(outcome.is_installed());
        assert!(store.lookup_by_name("Wires").is_none());
        assert!(store.icon("Keypad").is_some());
    }

    #[test]
    fn equal_or_older_remote_is_ignored() {
        let mut store = DatasetStore::new();
        store.load_bundled(NEWER, sprite()).unwrap();

        let equal = store.load_remote(NEWER, sprite()).unwrap();
        assert!(!equal.is_installed());

        // Stale payloads are rejected on their timestamp alone.
        let older = store.load_remote("1000#not|an|icon", sprite()).unwrap();
        assert!(matches!(
            older,
            RemoteOutcome::Stale { remote, baseline }
                if remote.as_millis() == 1000.0 && baseline.as_millis() == 2000.0
        ));
        assert!(store.lookup_by_name("Keypad").is_some());
    }

    #[test]
    fn failed_decode_keeps_previous_snapshot() {
        let mut store = DatasetStore::new();
        store.load_bundled(BUNDLED, sprite()).unwrap();
        let held = store.lookup_by_name("Wires").unwrap();

        assert!(store.load_remote("3000#m|0|1|x,0|1$0#A^B", sprite()).is_err());
        assert!(store.load_bundled("garbage", sprite()).is_err());

        assert_eq!(store.baseline(), Some(Timestamp::from_millis(1000.0)));
        assert!(Arc::ptr_eq(&held, &store.lookup_by_name("Wires").unwrap()));
    }

    #[test]
    fn oversized_remote_range_keeps_previous_snapshot() {
        let mut store = DatasetStore::new();
        store.load_bundled(BUNDLED, sprite()).unwrap();

        let err = store
            .load_remote("3000#m|0|1|1,0|1$0:4294967295#Keypad^Press", sprite())
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::RangeOutsideGrid("0:4294967295".to_string())
        );

        assert_eq!(store.baseline(), Some(Timestamp::from_millis(1000.0)));
        assert!(store.lookup_by_name("Wires").is_some());
        assert!(store.lookup_by_name("Keypad").is_none());
    }

    #[test]
    fn remote_without_bundled_installs() {
        let mut store = DatasetStore::new();
        assert!(store.lookup_by_name("Keypad").is_none());
        assert!(store.load_remote(NEWER, sprite()).unwrap().is_installed());
    }
}
