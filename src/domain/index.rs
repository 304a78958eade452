//! Path map and reverse name index of one outline snapshot.

use generational_arena::Index;
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::domain::arena::OutlineArena;
use crate::domain::matcher::MatchPolicy;

/// What is known about one structural position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    /// Node name as written in the outline
    pub name: String,
    /// Path of the parent, None when the parent is the root
    pub parent_path: Option<String>,
    /// Child names in document order
    pub child_names: Vec<String>,
}

/// Path → record, in document order.
pub type PathMap = IndexMap<String, PathRecord>;

/// Match key → every path carrying that key, in document order.
pub type NameIndex = IndexMap<String, Vec<String>>;

/// Read-only index over one snapshot.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    paths: PathMap,
    names: NameIndex,
}

impl PathIndex {
    /// Index `tree`, keying the reverse index with `policy`.
    ///
    /// Sibling duplicates share a path; the later one replaces the earlier
    /// record but keeps its position.
    #[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn build(tree: &OutlineArena, policy: &dyn MatchPolicy) -> Self {
        let mut paths = PathMap::new();
        if let Some(root) = tree.get_node(tree.root()) {
            for &child in &root.children {
                collect(tree, child, None, &mut paths);
            }
        }

        let mut names = NameIndex::new();
        for (path, record) in &paths {
            names
                .entry(policy.key(&record.name))
                .or_default()
                .push(path.clone());
        }
        debug!(paths = paths.len(), names = names.len(), "indexed snapshot");

        Self { paths, names }
    }

    pub fn paths(&self) -> &PathMap {
        &self.paths
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    pub fn get(&self, path: &str) -> Option<&PathRecord> {
        self.paths.get(path)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.names.contains_key(key)
    }

    /// Paths carrying match key `key`, empty if unknown.
    pub fn paths_for(&self, key: &str) -> &[String] {
        self.names.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Name of the parent of `path`, None at root level.
    pub fn parent_name(&self, path: &str) -> Option<&str> {
        let parent = self.paths.get(path)?.parent_path.as_deref()?;
        self.paths.get(parent).map(|record| record.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn collect(tree: &OutlineArena, idx: Index, parent_path: Option<&str>, paths: &mut PathMap) {
    let Some(node) = tree.get_node(idx) else {
        return;
    };
    let path = match parent_path {
        Some(parent) => format!("{parent}/{}", node.name),
        None => node.name.clone(),
    };
    let child_names = node
        .children
        .iter()
        .filter_map(|&child| tree.get_node(child))
        .map(|child| child.name.clone())
        .collect();

    paths.insert(
        path.clone(),
        PathRecord {
            name: node.name.clone(),
            parent_path: parent_path.map(str::to_string),
            child_names,
        },
    );

    for &child in &node.children {
        collect(tree, child, Some(&path), paths);
    }
}
