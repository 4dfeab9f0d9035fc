//! Compile-time id to live object resolution
//!
//! The host's instantiator reports every object it produces through
//! [`InstantiationObserver`]. Tables are scoped to one schematic instance
//! and dropped with it.

use std::collections::HashMap;

use merx_core::{CompileTimeId, ObjectHandle, SchematicInstanceId};
use parking_lot::RwLock;

/// Ids of one schematic instance mapped to the objects produced for them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdResolutionTable {
    objects: HashMap<CompileTimeId, ObjectHandle>,
}

impl IdResolutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an object; returns the object previously recorded for `id`
    pub fn insert(&mut self, id: CompileTimeId, object: ObjectHandle) -> Option<ObjectHandle> {
        self.objects.insert(id, object)
    }

    /// Live object for an id
    pub fn resolve(&self, id: CompileTimeId) -> Option<ObjectHandle> {
        self.objects.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CompileTimeId, ObjectHandle)> + '_ {
        self.objects.iter().map(|(id, object)| (*id, *object))
    }
}

/// Hook the host's instantiator calls after producing each object
pub trait InstantiationObserver: Send + Sync {
    fn on_object_created(&self, instance: SchematicInstanceId, id: CompileTimeId, object: ObjectHandle);
}

/// Resolution tables of every live schematic instance
#[derive(Debug, Default)]
pub struct ResolverRegistry {
    tables: RwLock<HashMap<SchematicInstanceId, IdResolutionTable>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one produced object
    pub fn record(&self, instance: SchematicInstanceId, id: CompileTimeId, object: ObjectHandle) {
        let previous = self
            .tables
            .write()
            .entry(instance)
            .or_default()
            .insert(id, object);
        if let Some(previous) = previous {
            log::debug!(
                "Id {} of instance {:?} re-recorded: {:?} -> {:?}",
                id,
                instance,
                previous,
                object
            );
        }
    }

    /// Resolve an id within one instance
    pub fn resolve(&self, instance: SchematicInstanceId, id: CompileTimeId) -> Option<ObjectHandle> {
        self.tables.read().get(&instance).and_then(|table| table.resolve(id))
    }

    /// Copy of an instance's table
    pub fn table(&self, instance: SchematicInstanceId) -> Option<IdResolutionTable> {
        self.tables.read().get(&instance).cloned()
    }

    /// Whether any object was recorded for an instance
    pub fn contains(&self, instance: SchematicInstanceId) -> bool {
        self.tables.read().contains_key(&instance)
    }

    /// Drop an instance's table
    pub fn discard(&self, instance: SchematicInstanceId) -> Option<IdResolutionTable> {
        self.tables.write().remove(&instance)
    }

    /// Drop every table
    pub fn clear(&self) {
        self.tables.write().clear();
    }

    /// Number of instances with a table
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

impl InstantiationObserver for ResolverRegistry {
    fn on_object_created(&self, instance: SchematicInstanceId, id: CompileTimeId, object: ObjectHandle) {
        self.record(instance, id, object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i32) -> CompileTimeId {
        CompileTimeId::new(raw)
    }

    #[test]
    fn test_tables_are_scoped_per_instance() {
        let registry = ResolverRegistry::new();
        let a = SchematicInstanceId::new(1);
        let b = SchematicInstanceId::new(2);

        registry.record(a, id(3), ObjectHandle::new(100));
        registry.record(b, id(3), ObjectHandle::new(200));

        assert_eq!(registry.resolve(a, id(3)), Some(ObjectHandle::new(100)));
        assert_eq!(registry.resolve(b, id(3)), Some(ObjectHandle::new(200)));
        assert_eq!(registry.resolve(a, id(4)), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_discard() {
        let registry = ResolverRegistry::new();
        let instance = SchematicInstanceId::new(9);
        registry.on_object_created(instance, id(0), ObjectHandle::new(1));
        registry.on_object_created(instance, id(1), ObjectHandle::new(2));

        let table = registry.discard(instance).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!registry.contains(instance));
        assert_eq!(registry.resolve(instance, id(0)), None);
    }

    #[test]
    fn test_later_record_wins() {
        let mut table = IdResolutionTable::new();
        assert_eq!(table.insert(id(1), ObjectHandle::new(5)), None);
        assert_eq!(table.insert(id(1), ObjectHandle::new(6)), Some(ObjectHandle::new(5)));
        assert_eq!(table.resolve(id(1)), Some(ObjectHandle::new(6)));
    }
}
