//! Lazily loaded directory tree for the sidebar.
//!
//! Children are fetched the first time a node is expanded; collapsing keeps
//! them so re-expanding is free.

use crate::models::DirRecord;
use crate::utils::format::normalize_slashes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirNode {
    pub name: String,
    pub path: String,
    /// `None` until loaded.
    pub children: Option<Vec<DirNode>>,
    pub expanded: bool,
}

impl DirNode {
    fn from_record(record: DirRecord) -> Self {
        Self {
            name: record.name,
            path: record.path,
            children: None,
            expanded: false,
        }
    }

    pub fn full_path(&self) -> String {
        if self.path.is_empty() {
            return self.name.clone();
        }
        normalize_slashes(&format!("{}\\{}", self.path, self.name))
    }

    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }
}

/// Flattened visible row for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub name: String,
    pub full_path: String,
    pub expanded: bool,
}

/// Result of toggling a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toggle {
    Expanded,
    Collapsed,
    /// Children must be fetched from this path first.
    Load(String),
    Missing,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirTree {
    roots: Option<Vec<DirNode>>,
}

impl DirTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[DirNode] {
        self.roots.as_deref().unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.roots.is_some()
    }

    pub fn set_roots(&mut self, records: Vec<DirRecord>) {
        self.roots = Some(records.into_iter().map(DirNode::from_record).collect());
    }

    pub fn find(&self, full_path: &str) -> Option<&DirNode> {
        fn walk<'a>(nodes: &'a [DirNode], target: &str) -> Option<&'a DirNode> {
            nodes.iter().find_map(|node| {
                if node.full_path() == target {
                    return Some(node);
                }
                walk(node.children.as_deref()?, target)
            })
        }
        walk(self.roots(), full_path)
    }

    fn find_mut(&mut self, full_path: &str) -> Option<&mut DirNode> {
        fn walk<'a>(nodes: &'a mut [DirNode], target: &str) -> Option<&'a mut DirNode> {
            for node in nodes {
                if node.full_path() == target {
                    return Some(node);
                }
                if let Some(children) = node.children.as_deref_mut()
                    && let Some(found) = walk(children, target)
                {
                    return Some(found);
                }
            }
            None
        }
        walk(self.roots.as_deref_mut()?, full_path)
    }

    pub fn toggle(&mut self, full_path: &str) -> Toggle {
        let Some(node) = self.find_mut(full_path) else {
            return Toggle::Missing;
        };
        if !node.is_loaded() {
            return Toggle::Load(node.full_path());
        }
        node.expanded = !node.expanded;
        if node.expanded {
            Toggle::Expanded
        } else {
            Toggle::Collapsed
        }
    }

    /// Store fetched children and expand the node. Returns false if the node
    /// disappeared meanwhile.
    pub fn insert_children(&mut self, full_path: &str, records: Vec<DirRecord>) -> bool {
        let Some(node) = self.find_mut(full_path) else {
            return false;
        };
        node.children = Some(records.into_iter().map(DirNode::from_record).collect());
        node.expanded = true;
        true
    }

    /// Visible rows in display order as `(depth, node)`.
    pub fn visible_rows(&self) -> Vec<(usize, &DirNode)> {
        fn walk<'a>(nodes: &'a [DirNode], depth: usize, out: &mut Vec<(usize, &'a DirNode)>) {
            for node in nodes {
                out.push((depth, node));
                if node.expanded
                    && let Some(children) = &node.children
                {
                    walk(children, depth + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(self.roots(), 0, &mut out);
        out
    }

    pub fn rows(&self) -> Vec<TreeRow> {
        self.visible_rows()
            .into_iter()
            .map(|(depth, node)| TreeRow {
                depth,
                name: node.name.clone(),
                full_path: node.full_path(),
                expanded: node.expanded,
            })
            .collect()
    }
}
