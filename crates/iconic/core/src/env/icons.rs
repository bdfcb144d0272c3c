use std::sync::Arc;

use crate::data::IconRecord;

/// Read access to the active icon table.
///
/// Implemented by [`crate::data::DatasetSnapshot`] and by loaders that hold
/// one. An absent dataset simply resolves nothing.
pub trait IconOracle: Send + Sync {
    fn icon(&self, name: &str) -> Option<Arc<IconRecord>>;
}

impl<T: IconOracle> IconOracle for Option<T> {
    fn icon(&self, name: &str) -> Option<Arc<IconRecord>> {
        self.as_ref().and_then(|inner| inner.icon(name))
    }
}

impl<T: IconOracle + ?Sized> IconOracle for Arc<T> {
    fn icon(&self, name: &str) -> Option<Arc<IconRecord>> {
        (**self).icon(name)
    }
}
