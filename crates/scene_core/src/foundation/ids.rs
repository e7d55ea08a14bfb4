//! Unique identifier generation
//!
//! Every generated identifier draws from one process-wide counter, so an
//! identifier is never handed out twice even across different prefixes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Prefix for generated entity identifiers
pub const ENTITY_PREFIX: &str = "entity";

/// Prefix for generated component identifiers
pub const COMPONENT_PREFIX: &str = "component";

/// Prefix for generated scene identifiers
pub const SCENE_PREFIX: &str = "scene";

/// Produces unique, prefixed identifiers
pub struct IdGenerator;

impl IdGenerator {
    /// Next raw counter value
    pub fn next_raw() -> u64 {
        NEXT_ID.fetch_add(1, Ordering::Relaxed)
    }

    /// Next identifier in the form `{prefix}_{n}`
    pub fn next(prefix: &str) -> String {
        format!("{}_{}", prefix, Self::next_raw())
    }
}

/// Entity identifier
///
/// Components refer back to their owner through this value, never through a
/// second owning pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a fresh entity identifier
    pub fn generate() -> Self {
        Self(IdGenerator::next_raw())
    }

    /// Get the raw identifier value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", ENTITY_PREFIX, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| IdGenerator::next(COMPONENT_PREFIX)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_id_prefix() {
        let id = IdGenerator::next(SCENE_PREFIX);
        assert!(id.starts_with("scene_"));
        assert!(id["scene_".len()..].parse::<u64>().is_ok());
    }

    #[test]
    fn test_entity_id_display() {
        let entity = EntityId::generate();
        assert_eq!(entity.to_string(), format!("entity_{}", entity.raw()));
        assert_ne!(EntityId::generate(), entity);
    }
}
