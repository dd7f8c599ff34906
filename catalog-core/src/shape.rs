//! Container-shape classification for recipe dumps.
//!
//! Dumps in the wild arrive as a plain array, as an object keyed by index
//! (`{"0": {...}, "1": {...}}`), wrapped in a `{"data": [...]}` envelope, or
//! as a generic object whose values are recipes. Each shape is a
//! [`ContainerStrategy`]; a [`ShapeClassifier`] tries them in order.

use serde_json::Value;
use std::fmt;

/// Default fraction of integer keys above which an object is treated as an
/// array that was round-tripped through an object-keyed export.
pub const DEFAULT_NUMERIC_KEY_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerShape {
    Array,
    NumericKeyedMap,
    DataEnvelope,
    ObjectValues,
}

impl ContainerShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerShape::Array => "array",
            ContainerShape::NumericKeyedMap => "numeric_keyed_map",
            ContainerShape::DataEnvelope => "data_envelope",
            ContainerShape::ObjectValues => "object_values",
        }
    }
}

impl fmt::Display for ContainerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A way of turning a parsed root value into an ordered entry list.
///
/// Returns `None` when the root does not have this strategy's shape, letting
/// the classifier move on to the next one.
pub trait ContainerStrategy: Send + Sync + fmt::Debug {
    fn shape(&self) -> ContainerShape;

    fn extract(&self, root: &Value) -> Option<Vec<Value>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayStrategy;

impl ContainerStrategy for ArrayStrategy {
    fn shape(&self) -> ContainerShape {
        ContainerShape::Array
    }

    fn extract(&self, root: &Value) -> Option<Vec<Value>> {
        root.as_array().cloned()
    }
}

/// Objects whose keys are mostly base-10 integers. Values are returned in
/// ascending numeric key order; non-numeric keys are dropped.
#[derive(Debug, Clone, Copy)]
pub struct NumericKeyedStrategy {
    pub threshold: f64,
}

impl Default for NumericKeyedStrategy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_NUMERIC_KEY_THRESHOLD,
        }
    }
}

impl ContainerStrategy for NumericKeyedStrategy {
    fn shape(&self) -> ContainerShape {
        ContainerShape::NumericKeyedMap
    }

    fn extract(&self, root: &Value) -> Option<Vec<Value>> {
        let map = root.as_object()?;
        if map.is_empty() {
            return None;
        }

        let mut numeric: Vec<(i64, &Value)> = map
            .iter()
            .filter_map(|(k, v)| k.parse::<i64>().ok().map(|n| (n, v)))
            .collect();

        let ratio = numeric.len() as f64 / map.len() as f64;
        if ratio <= self.threshold {
            return None;
        }

        numeric.sort_by_key(|(n, _)| *n);
        Some(numeric.into_iter().map(|(_, v)| v.clone()).collect())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DataEnvelopeStrategy;

impl ContainerStrategy for DataEnvelopeStrategy {
    fn shape(&self) -> ContainerShape {
        ContainerShape::DataEnvelope
    }

    fn extract(&self, root: &Value) -> Option<Vec<Value>> {
        root.as_object()?.get("data")?.as_array().cloned()
    }
}

/// Fallback for generic objects: every object-shaped value, in key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectValuesStrategy;

impl ContainerStrategy for ObjectValuesStrategy {
    fn shape(&self) -> ContainerShape {
        ContainerShape::ObjectValues
    }

    fn extract(&self, root: &Value) -> Option<Vec<Value>> {
        let map = root.as_object()?;
        Some(map.values().filter(|v| v.is_object()).cloned().collect())
    }
}

/// Ordered list of strategies; the first one that accepts the root wins.
#[derive(Debug)]
pub struct ShapeClassifier {
    strategies: Vec<Box<dyn ContainerStrategy>>,
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_NUMERIC_KEY_THRESHOLD)
    }
}

impl ShapeClassifier {
    pub fn new(strategies: Vec<Box<dyn ContainerStrategy>>) -> Self {
        Self { strategies }
    }

    /// Default strategy order with a custom numeric-key threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(vec![
            Box::new(ArrayStrategy),
            Box::new(NumericKeyedStrategy { threshold }),
            Box::new(DataEnvelopeStrategy),
            Box::new(ObjectValuesStrategy),
        ])
    }

    /// Returns the matching shape and its entries, or `None` if no strategy
    /// understands the root (scalars, null).
    pub fn classify(&self, root: &Value) -> Option<(ContainerShape, Vec<Value>)> {
        self.strategies
            .iter()
            .find_map(|s| s.extract(root).map(|entries| (s.shape(), entries)))
    }
}
