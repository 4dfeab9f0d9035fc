//! Object identifiers shared by the compiler and the runtime

use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of an authored object, assigned by a deterministic depth-first
/// walk of the schematic hierarchy.
///
/// Only meaningful for one compile/decompile pairing of a single schematic.
/// The runtime re-derives the same value by instantiating the hierarchy in
/// the same walk order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompileTimeId(i32);

impl CompileTimeId {
    /// Id of the schematic root
    pub const ROOT: Self = Self(0);

    /// Create from a raw value
    #[inline]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Get the raw value as written to artifacts
    #[inline]
    pub const fn raw(&self) -> i32 {
        self.0
    }
}

impl fmt::Debug for CompileTimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompileTimeId({})", self.0)
    }
}

impl fmt::Display for CompileTimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i32> for CompileTimeId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

/// Monotonic allocator used by hierarchy walks.
///
/// One walk owns one allocator. Two walks of the same hierarchy hand out
/// identical sequences.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: i32,
}

impl IdAllocator {
    /// Create an allocator starting at [`CompileTimeId::ROOT`]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next id
    pub fn next(&mut self) -> CompileTimeId {
        let id = CompileTimeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> usize {
        self.next as usize
    }
}

/// Handle of a live object in the host runtime
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectHandle(u64);

impl ObjectHandle {
    /// Create from the host's raw handle
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw handle
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHandle({})", self.0)
    }
}

/// Identifier of one spawned schematic instance in the host runtime
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchematicInstanceId(u64);

impl SchematicInstanceId {
    /// Create from the host's raw id
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Identifier of a connected player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);
