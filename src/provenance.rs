//! Non-owning links from a derived sample to the sample it was converted
//! from.

use std::sync::{Arc, Weak};

use crate::models::ConvertibleColor;

/// A color sample that can be shared between threads and linked to.
pub type SharedColor = dyn ConvertibleColor + Send + Sync;

/// The sample another sample was derived from.
///
/// The link is weak: holding a data source neither keeps the original sample
/// alive nor allows changing it. It exists for lineage inspection only.
#[derive(Clone, Debug)]
pub struct DataSource(Weak<SharedColor>);

impl DataSource {
    /// Create a link to the given shared sample.
    pub fn new<C>(sample: &Arc<C>) -> Self
    where
        C: ConvertibleColor + Send + Sync + 'static,
    {
        let weak: Weak<C> = Arc::downgrade(sample);
        let weak: Weak<SharedColor> = weak;
        Self(weak)
    }

    /// Return the original sample if it is still alive.
    pub fn upgrade(&self) -> Option<Arc<SharedColor>> {
        self.0.upgrade()
    }

    /// Determine whether this link points at the given sample instance.
    pub fn points_to<C>(&self, sample: &Arc<C>) -> bool
    where
        C: ConvertibleColor + Send + Sync + 'static,
    {
        self.0.as_ptr() as *const () == Arc::as_ptr(sample) as *const ()
    }

    /// Determine whether the original sample has been dropped.
    pub fn is_dangling(&self) -> bool {
        self.0.strong_count() == 0
    }
}

impl<C> From<&Arc<C>> for DataSource
where
    C: ConvertibleColor + Send + Sync + 'static,
{
    fn from(value: &Arc<C>) -> Self {
        Self::new(value)
    }
}
