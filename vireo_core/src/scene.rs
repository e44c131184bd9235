use crate::nodes::registry::SceneObject;
use crate::object_arena::{NodeId, ObjectArena};

/// Object tree built from a document: the arena owning every node plus
/// the handle of the root.
///
/// Parent/child links are stored on both sides, so every mutation goes
/// through [`attach`](Self::attach) / [`detach`](Self::detach) to keep
/// them consistent. Nodes outside the tree (shadow cameras, detached
/// light targets) live in the arena with a nil parent.
#[derive(Debug, Default)]
pub struct SceneGraph {
    pub arena: ObjectArena,
    pub root: NodeId,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, id: NodeId) -> Option<&SceneObject> {
        self.arena.get(id)
    }

    pub fn object_mut(&mut self, id: NodeId) -> Option<&mut SceneObject> {
        self.arena.get_mut(id)
    }

    pub fn root(&self) -> Option<&SceneObject> {
        self.arena.get(self.root)
    }

    /// Adds a free-standing object to the arena without linking it into
    /// the tree.
    pub fn insert(&mut self, object: SceneObject) -> NodeId {
        self.arena.alloc(object)
    }

    /// Links `child` under `parent`, detaching it from its current parent
    /// first. Appends to the end of the parent's child list.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        self.detach(child);
        if let Some(node) = self.arena.get_mut(child) {
            node.base_mut().parent = parent;
        } else {
            return;
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.base_mut().add_child(child);
        }
    }

    /// Unlinks `child` from its parent, leaving it in the arena.
    pub fn detach(&mut self, child: NodeId) {
        let parent = match self.arena.get(child) {
            Some(node) => node.base().parent,
            None => return,
        };
        if parent.is_nil() {
            return;
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.base_mut().remove_child(child);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.base_mut().parent = NodeId::nil();
        }
    }

    /// Handles of `start` and everything below it, depth first, children
    /// in attachment order.
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = match self.arena.get(id) {
                Some(node) => node,
                None => continue,
            };
            out.push(id);
            // push in reverse so the first child is visited first
            for &child in node.base().children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// First object whose uuid matches, searching the whole arena.
    pub fn find_by_uuid(&self, uuid: &str) -> Option<NodeId> {
        self.arena
            .iter()
            .find(|(_, node)| node.base().uuid == uuid)
            .map(|(id, _)| id)
    }

    /// First object with a matching name below (and including) `start`.
    pub fn find_by_name(&self, start: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(start)
            .into_iter()
            .find(|&id| self.arena.get(id).map(|n| n.base().name == name) == Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::object3d::{Group, Object3D};
    use crate::nodes::registry::SceneObject;

    fn named(name: &str) -> SceneObject {
        let mut base = Object3D::default();
        base.name = name.into();
        SceneObject::Object3D(base)
    }

    #[test]
    fn test_attach_sets_both_links() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(SceneObject::Group(Group::new()));
        let child = graph.insert(named("a"));
        graph.root = root;
        graph.attach(child, root);

        assert_eq!(graph.object(child).unwrap().base().parent, root);
        assert_eq!(graph.object(root).unwrap().children(), &[child]);
    }

    #[test]
    fn test_reattach_detaches_from_old_parent() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(named("a"));
        let b = graph.insert(named("b"));
        let child = graph.insert(named("child"));
        graph.attach(child, a);
        graph.attach(child, b);

        assert!(graph.object(a).unwrap().children().is_empty());
        assert_eq!(graph.object(b).unwrap().children(), &[child]);
        assert_eq!(graph.object(child).unwrap().base().parent, b);
    }

    #[test]
    fn test_descendants_depth_first() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(named("root"));
        let a = graph.insert(named("a"));
        let a1 = graph.insert(named("a1"));
        let b = graph.insert(named("b"));
        graph.attach(a, root);
        graph.attach(b, root);
        graph.attach(a1, a);

        assert_eq!(graph.descendants(root), vec![root, a, a1, b]);
    }

    #[test]
    fn test_find_by_uuid() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(named("a"));
        let uuid = graph.object(a).unwrap().uuid().to_string();
        assert_eq!(graph.find_by_uuid(&uuid), Some(a));
        assert_eq!(graph.find_by_uuid("missing"), None);
    }
}
