//! Folder tree structures for hierarchical display.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use filedesk_core::types::FolderId;

use super::model::Folder;

/// A node in a folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Depth level (0 for root-level folders).
    pub depth: usize,
    /// Child folder nodes, sorted by name.
    pub children: Vec<FolderNode>,
}

/// The folder hierarchy reconstructed from the flat folder listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root-level node(s) of the tree.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: usize,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_folders: 0,
        }
    }

    /// Build a tree from the flat list returned by the backend.
    ///
    /// Folders whose parent is not part of the listing are shown at the root
    /// so nothing disappears from view. Folders caught in a parent cycle are
    /// unreachable from the root and left out.
    pub fn build(folders: &[Folder]) -> Self {
        let known: HashSet<FolderId> = folders.iter().map(|f| f.id).collect();
        let mut by_parent: HashMap<Option<FolderId>, Vec<&Folder>> = HashMap::new();
        for folder in folders {
            let parent = folder.parent_folder.filter(|p| known.contains(p));
            by_parent.entry(parent).or_default().push(folder);
        }
        for siblings in by_parent.values_mut() {
            siblings.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }

        let mut visited = HashSet::new();
        let roots = build_level(&by_parent, None, 0, &mut visited);

        Self {
            roots,
            total_folders: visited.len(),
        }
    }

    /// Depth-first iteration over all nodes, parents before children.
    pub fn walk(&self) -> Vec<&FolderNode> {
        fn visit<'a>(node: &'a FolderNode, out: &mut Vec<&'a FolderNode>) {
            out.push(node);
            for child in &node.children {
                visit(child, out);
            }
        }
        let mut out = Vec::with_capacity(self.total_folders);
        for root in &self.roots {
            visit(root, &mut out);
        }
        out
    }
}

fn build_level(
    by_parent: &HashMap<Option<FolderId>, Vec<&Folder>>,
    parent: Option<FolderId>,
    depth: usize,
    visited: &mut HashSet<FolderId>,
) -> Vec<FolderNode> {
    let Some(children) = by_parent.get(&parent) else {
        return Vec::new();
    };
    let mut nodes = Vec::with_capacity(children.len());
    for folder in children {
        if !visited.insert(folder.id) {
            continue;
        }
        nodes.push(FolderNode {
            id: folder.id,
            name: folder.name.clone(),
            depth,
            children: build_level(by_parent, Some(folder.id), depth + 1, visited),
        });
    }
    nodes
}
