use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{ColoredDataPoint, LabeledValue, magnitude};
use crate::error::{ChartError, ChartResult};

static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one series allocation.
///
/// Animations restart when the identity changes, never on value comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(NEXT_SERIES_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Ordered, immutable sample list with a reference identity.
///
/// `clone` shares both the storage and the identity. Building a new series
/// from equal values yields a new identity.
#[derive(Debug, Clone)]
pub struct Series<P> {
    id: SeriesId,
    points: Arc<[P]>,
}

impl<P> Series<P> {
    #[must_use]
    pub fn new(points: Vec<P>) -> Self {
        Self {
            id: SeriesId::next(),
            points: points.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn points(&self) -> &[P] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.points.iter()
    }

    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P: LabeledValue> Series<P> {
    /// Largest drawable magnitude, 0 for an empty series.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .map(LabeledValue::magnitude)
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.points.iter().map(LabeledValue::magnitude).sum()
    }

    /// Drawable magnitudes in series order.
    #[must_use]
    pub fn magnitudes(&self) -> Vec<f64> {
        self.points.iter().map(|point| magnitude(point.value())).collect()
    }
}

impl<P> Default for Series<P> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<P> From<Vec<P>> for Series<P> {
    fn from(points: Vec<P>) -> Self {
        Self::new(points)
    }
}

impl<P> FromIterator<P> for Series<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, P> IntoIterator for &'a Series<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Insertion-ordered datasets keyed by subtitle, with one selected key.
#[derive(Debug, Clone, Default)]
pub struct DatasetCollection {
    datasets: IndexMap<String, Series<ColoredDataPoint>>,
    selected: Option<String>,
}

impl DatasetCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a dataset. The first inserted key becomes selected.
    ///
    /// Replacing keeps the key's tab position.
    pub fn insert(&mut self, key: impl Into<String>, series: Series<ColoredDataPoint>) {
        let key = key.into();
        debug!(key = %key, len = series.len(), "insert dataset");
        if self.selected.is_none() {
            self.selected = Some(key.clone());
        }
        self.datasets.insert(key, series);
    }

    #[must_use]
    pub fn with_dataset(
        mut self,
        key: impl Into<String>,
        points: Vec<ColoredDataPoint>,
    ) -> Self {
        self.insert(key, Series::new(points));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Series<ColoredDataPoint>> {
        self.datasets.get(key)
    }

    #[must_use]
    pub fn selected_key(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
            .as_deref()
            .and_then(|key| self.datasets.get_index_of(key))
    }

    #[must_use]
    pub fn selected_series(&self) -> Option<&Series<ColoredDataPoint>> {
        self.selected.as_deref().and_then(|key| self.datasets.get(key))
    }

    /// Selects `key`. Returns whether the selection changed.
    pub fn select(&mut self, key: &str) -> ChartResult<bool> {
        if !self.datasets.contains_key(key) {
            return Err(ChartError::UnknownDataset(key.to_owned()));
        }
        if self.selected.as_deref() == Some(key) {
            return Ok(false);
        }
        debug!(key, "select dataset");
        self.selected = Some(key.to_owned());
        Ok(true)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<ColoredDataPoint>)> for DatasetCollection {
    fn from_iter<I: IntoIterator<Item = (K, Vec<ColoredDataPoint>)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (key, points) in iter {
            collection.insert(key, Series::new(points));
        }
        collection
    }
}
