use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

/// Label stored for the synthetic root. Never emitted in paths or steps.
pub const ROOT_NAME: &str = "__root__";

/// Tree node in the arena-based outline structure.
#[derive(Debug)]
pub struct OutlineNode {
    /// Trimmed line content, not unique across the outline
    pub name: String,
    /// Index of parent node in the arena, None for the synthetic root
    pub parent: Option<Index>,
    /// Indices of child nodes in document order
    pub children: Vec<Index>,
}

/// Arena-based outline snapshot.
///
/// Owns every node of one parsed outline. The root is synthetic and always
/// present, so an empty outline is a root without children. Parent links are
/// plain arena indices: ownership only flows from parent to children.
#[derive(Debug)]
pub struct OutlineArena {
    arena: Arena<OutlineNode>,
    root: Index,
}

impl Default for OutlineArena {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineArena {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(OutlineNode {
            name: ROOT_NAME.to_string(),
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Append a node under `parent` and return its index.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, name: &str, parent: Index) -> Index {
        let node_idx = self.arena.insert(OutlineNode {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&OutlineNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn is_root(&self, idx: Index) -> bool {
        idx == self.root
    }

    /// Number of real (non-root) nodes.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-order traversal in document order, root excluded.
    pub fn iter(&self) -> OutlineIterator<'_> {
        OutlineIterator::new(self)
    }

    /// Longest root-to-leaf chain of real nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root).saturating_sub(1)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// `/`-joined names from below the root down to `idx`.
    pub fn path_of(&self, idx: Index) -> String {
        let mut names = Vec::new();
        let mut current = Some(idx);
        while let Some(current_idx) = current {
            if self.is_root(current_idx) {
                break;
            }
            match self.get_node(current_idx) {
                Some(node) => {
                    names.push(node.name.as_str());
                    current = node.parent;
                }
                None => break,
            }
        }
        names.reverse();
        names.join("/")
    }

    /// Render the outline for terminal display, labelled with `title`.
    pub fn to_termtree(&self, title: &str) -> Tree<String> {
        let leaves = self
            .get_node(self.root)
            .map(|root| {
                root.children
                    .iter()
                    .map(|&child| self.subtree(child))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Tree::new(title.to_string()).with_leaves(leaves)
    }

    fn subtree(&self, idx: Index) -> Tree<String> {
        match self.get_node(idx) {
            Some(node) => Tree::new(node.name.clone()).with_leaves(
                node.children
                    .iter()
                    .map(|&child| self.subtree(child))
                    .collect::<Vec<_>>(),
            ),
            None => Tree::new(String::new()),
        }
    }
}

pub struct OutlineIterator<'a> {
    arena: &'a OutlineArena,
    stack: Vec<Index>,
}

impl<'a> OutlineIterator<'a> {
    fn new(arena: &'a OutlineArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.get_node(arena.root()) {
            // Push children in reverse order for left-to-right traversal
            stack.extend(root.children.iter().rev().copied());
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for OutlineIterator<'a> {
    type Item = (Index, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_arena_when_created_then_only_root_exists() {
        let arena = OutlineArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.depth(), 0);
        assert_eq!(arena.iter().count(), 0);
    }

    #[test]
    fn given_nested_nodes_when_path_of_then_excludes_root() {
        let mut arena = OutlineArena::new();
        let a = arena.insert_node("a", arena.root());
        let b = arena.insert_node("b", a);
        let c = arena.insert_node("c", b);

        assert_eq!(arena.path_of(a), "a");
        assert_eq!(arena.path_of(c), "a/b/c");
        assert_eq!(arena.path_of(arena.root()), "");
        assert_eq!(arena.depth(), 3);
    }

    #[test]
    fn given_siblings_when_iterating_then_yields_document_order() {
        let mut arena = OutlineArena::new();
        let a = arena.insert_node("a", arena.root());
        arena.insert_node("a1", a);
        arena.insert_node("b", arena.root());

        let names: Vec<_> = arena.iter().map(|(_, n)| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a1", "b"]);
    }

    #[test]
    fn given_outline_when_rendering_termtree_then_contains_all_names() {
        let mut arena = OutlineArena::new();
        let a = arena.insert_node("a", arena.root());
        arena.insert_node("b", a);

        let rendered = arena.to_termtree("site").to_string();
        assert!(rendered.starts_with("site"));
        assert!(rendered.contains('a'));
        assert!(rendered.contains('b'));
    }
}
