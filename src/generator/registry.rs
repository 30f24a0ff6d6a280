use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use std::collections::HashMap;

/// Identifiers produced so far in one generation pass, per defining resource name.
#[derive(Debug, Default, Clone)]
pub struct IdRegistry {
    ids: HashMap<String, Vec<Value>>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Append `id` to the resource's list unless it is already there.
    /// Returns whether the value was added.
    pub fn record(&mut self, resource: &str, id: Value) -> bool {
        let ids = self.ids.entry(resource.to_string()).or_default();
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        true
    }

    pub fn ids(&self, resource: &str) -> &[Value] {
        self.ids.get(resource).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A uniformly chosen identifier of `resource`, if any were produced.
    pub fn pick<R: Rng + ?Sized>(&self, resource: &str, rng: &mut R) -> Option<Value> {
        self.ids(resource).choose(rng).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_record_skips_duplicates() {
        let mut registry = IdRegistry::new();
        assert!(registry.record("Author", json!("a1")));
        assert!(registry.record("Author", json!("a2")));
        assert!(!registry.record("Author", json!("a1")));
        assert_eq!(registry.ids("Author"), &[json!("a1"), json!("a2")]);
        assert!(registry.ids("Post").is_empty());
    }

    #[test]
    fn test_pick_and_clear() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut registry = IdRegistry::new();
        assert!(registry.pick("Author", &mut rng).is_none());

        registry.record("Author", json!(7));
        assert_eq!(registry.pick("Author", &mut rng), Some(json!(7)));

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.pick("Author", &mut rng).is_none());
    }
}
