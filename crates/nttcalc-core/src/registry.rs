//! Transform factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::bitrev::BitReversedTransform;
use crate::error::NttError;
use crate::iterative::IterativeRadix2Transform;
use crate::naive::NaiveTransform;
use crate::recursive::RecursiveRadix2Transform;
use crate::transform::{CoreTransform, NttTransform, Transform, Variant};

/// Factory trait for creating transforms.
pub trait TransformFactory: Send + Sync {
    /// Get or create a transform by name.
    fn get(&self, name: &str) -> Result<Arc<dyn Transform>, NttError>;

    /// List all available transform names.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    cache: RwLock<HashMap<Variant, Arc<dyn Transform>>>,
}

impl DefaultFactory {
    /// Create a new default factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the transform for `variant`.
    #[must_use]
    pub fn transform_for(&self, variant: Variant) -> Arc<dyn Transform> {
        if let Some(t) = self.cache.read().get(&variant) {
            return Arc::clone(t);
        }

        let t = Self::create_transform(variant);
        Arc::clone(self.cache.write().entry(variant).or_insert(t))
    }

    pub(crate) fn create_transform(variant: Variant) -> Arc<dyn Transform> {
        let core: Arc<dyn CoreTransform> = match variant {
            Variant::Naive => Arc::new(NaiveTransform::new()),
            Variant::Recursive => Arc::new(RecursiveRadix2Transform::new()),
            Variant::Iterative => Arc::new(IterativeRadix2Transform::new()),
            Variant::BitReversed => Arc::new(BitReversedTransform::new()),
        };
        Arc::new(NttTransform::new(core))
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn Transform>, NttError> {
        let variant: Variant = name.parse()?;
        Ok(self.transform_for(variant))
    }

    fn available(&self) -> Vec<&str> {
        Variant::ALL.iter().map(|v| v.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_creates_every_variant() {
        let factory = DefaultFactory::new();
        for name in ["naive", "recursive", "iterative", "bitrev"] {
            let t = factory.get(name).unwrap();
            assert_eq!(t.name(), name);
        }
    }

    #[test]
    fn factory_accepts_aliases() {
        let factory = DefaultFactory::new();
        assert_eq!(factory.get("bit-reversed").unwrap().name(), "bitrev");
        assert_eq!(factory.get("radix2-iterative").unwrap().name(), "iterative");
    }

    #[test]
    fn factory_caches() {
        let factory = DefaultFactory::new();
        let t1 = factory.get("iterative").unwrap();
        let t2 = factory.get("iterative").unwrap();
        let t3 = factory.transform_for(Variant::Iterative);
        assert!(Arc::ptr_eq(&t1, &t2));
        assert!(Arc::ptr_eq(&t1, &t3));
    }

    #[test]
    fn factory_unknown_name() {
        let factory = DefaultFactory::new();
        assert!(matches!(factory.get("fft"), Err(NttError::Config(_))));
    }

    #[test]
    fn factory_available() {
        let factory = DefaultFactory::new();
        assert_eq!(
            factory.available(),
            vec!["naive", "recursive", "iterative", "bitrev"]
        );
    }
}
