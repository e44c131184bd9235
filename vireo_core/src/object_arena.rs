use std::fmt;

use crate::nodes::registry::SceneObject;

/// Handle to an object stored in an [`ObjectArena`].
///
/// Ids are issued sequentially per arena, starting at 1; 0 is reserved as
/// the nil handle. Handles are only meaningful within the arena (and thus
/// the parse) that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn nil() -> Self {
        NodeId(0)
    }

    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena-based storage for scene objects.
/// Uses a `Vec<Option<SceneObject>>` indexed by NodeId for O(1) lookups.
/// Ids are allocated by the arena itself on insert, so the NodeId value
/// maps directly to a slot index (offset by 1, since 0 is reserved).
#[derive(Debug)]
pub struct ObjectArena {
    slots: Vec<Option<SceneObject>>,
    live: u32,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Insert an object and return its freshly allocated id.
    pub fn alloc(&mut self, object: SceneObject) -> NodeId {
        self.slots.push(Some(object));
        self.live += 1;
        NodeId(self.slots.len() as u32)
    }

    /// Get a reference to the object (if present).
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SceneObject> {
        if id.is_nil() {
            return None;
        }
        self.slots.get((id.0 as usize) - 1)?.as_ref()
    }

    /// Get a mutable reference to the object (if present).
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneObject> {
        if id.is_nil() {
            return None;
        }
        self.slots.get_mut((id.0 as usize) - 1)?.as_mut()
    }

    /// Remove an object, leaving a hole (`None`).
    #[inline]
    pub fn remove(&mut self, id: NodeId) -> Option<SceneObject> {
        if id.is_nil() {
            return None;
        }
        let slot = self.slots.get_mut((id.0 as usize) - 1)?;
        let out = slot.take()?;
        self.live -= 1;
        Some(out)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over all live objects.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneObject)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref().map(|obj| (NodeId((idx + 1) as u32), obj))
        })
    }

    /// Iterate mutably over all live objects.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut SceneObject)> {
        self.slots.iter_mut().enumerate().filter_map(|(idx, slot)| {
            slot.as_mut().map(|obj| (NodeId((idx + 1) as u32), obj))
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &SceneObject> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }
}

impl Default for ObjectArena {
    fn default() -> Self {
        Self::new()
    }
}
