//! Authored object hierarchy and its deterministic id walk
//!
//! Ids are handed out in pre-order: the root is `#0`, then each child
//! subtree in authored order. The runtime instantiates the same tree in the
//! same order and therefore derives the same ids.

use merx_core::{CompileTimeId, IdAllocator};
use serde::{Deserialize, Serialize};

/// What an authored object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Grouping node with no geometry
    Empty,
    /// Primitive shape
    Primitive { collidable: bool },
    /// Light source
    Light,
}

/// One authored object and its children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoredObject {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub children: Vec<AuthoredObject>,
}

impl AuthoredObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Grouping node
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Empty)
    }

    /// Primitive shape
    pub fn primitive(name: impl Into<String>, collidable: bool) -> Self {
        Self::new(name, ObjectKind::Primitive { collidable })
    }

    pub fn light(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Light)
    }

    /// Append a child
    pub fn with_child(mut self, child: AuthoredObject) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this object can receive a hitbox
    pub fn is_collidable(&self) -> bool {
        matches!(self.kind, ObjectKind::Primitive { collidable: true })
    }
}

/// One step of [`AuthoredHierarchy::walk`]
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry<'a> {
    pub object: &'a AuthoredObject,
    pub id: CompileTimeId,
    /// `None` for the root
    pub parent: Option<CompileTimeId>,
}

/// Object tree of one schematic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoredHierarchy {
    pub root: AuthoredObject,
}

impl AuthoredHierarchy {
    pub fn new(root: AuthoredObject) -> Self {
        Self { root }
    }

    /// Visit every object in pre-order, assigning ids as it goes
    pub fn walk(&self) -> Vec<WalkEntry<'_>> {
        let mut ids = IdAllocator::new();
        let mut entries = Vec::new();
        let mut stack: Vec<(&AuthoredObject, Option<CompileTimeId>)> = vec![(&self.root, None)];

        while let Some((object, parent)) = stack.pop() {
            let id = ids.next();
            entries.push(WalkEntry { object, id, parent });
            for child in object.children.iter().rev() {
                stack.push((child, Some(id)));
            }
        }
        entries
    }

    /// Object with the given id
    pub fn find(&self, id: CompileTimeId) -> Option<&AuthoredObject> {
        self.walk()
            .into_iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.object)
    }

    /// Id of the first object with the given name
    pub fn id_of(&self, name: &str) -> Option<CompileTimeId> {
        self.walk()
            .into_iter()
            .find(|entry| entry.object.name == name)
            .map(|entry| entry.id)
    }

    /// Whether the object with this id can receive a hitbox; `None` if unknown
    pub fn is_collidable(&self, id: CompileTimeId) -> Option<bool> {
        self.find(id).map(AuthoredObject::is_collidable)
    }

    /// Number of objects in the tree
    pub fn object_count(&self) -> usize {
        self.walk().len()
    }
}
