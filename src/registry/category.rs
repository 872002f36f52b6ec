//! Derived category tree
//!
//! Groups the flat record list by project, then by active/inactive, for
//! presentation. The tree is a pure function of a registry snapshot and
//! is rebuilt in full on every load or mutation, never patched. Each
//! leaf carries a stable node id assigned at build time; the id maps
//! back to the registry index, so a displayed node never has to be
//! reverse-engineered from its display representation.

use crate::record::{Project, Record};
use std::collections::HashMap;

/// One displayed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    /// Stable node id, usable to address the record from the UI
    pub id: u32,
    pub title: String,
    pub kind: &'static str,
    pub date: String,
}

/// One project branch with its Active/Inactive groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    pub name: &'static str,
    pub active: Vec<LeafNode>,
    pub inactive: Vec<LeafNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    pub projects: Vec<ProjectNode>,
    index: HashMap<u32, usize>,
}

impl CategoryTree {
    /// Registry index for a displayed node id
    pub fn record_index(&self, id: u32) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn leaf_count(&self) -> usize {
        self.index.len()
    }

    /// Indented text rendering, one line per node
    pub fn render(&self) -> String {
        let mut out = String::new();
        for project in &self.projects {
            out.push_str(project.name);
            out.push('\n');
            for (group, leaves) in [("Active", &project.active), ("Inactive", &project.inactive)] {
                if leaves.is_empty() {
                    continue;
                }
                out.push_str(&format!("  {}\n", group));
                for leaf in leaves {
                    out.push_str(&format!(
                        "    [{}] {}  {}  {}\n",
                        leaf.id, leaf.title, leaf.kind, leaf.date
                    ));
                }
            }
        }
        out
    }
}

/// Build the category tree from a registry snapshot. Every project
/// appears as a root even when empty; leaf ordering within a group is
/// registry append order. Node ids are assigned sequentially from 1.
pub fn build_tree(records: &[Record]) -> CategoryTree {
    let mut projects: Vec<ProjectNode> = Project::ALL
        .iter()
        .map(|p| ProjectNode {
            name: p.name(),
            active: Vec::new(),
            inactive: Vec::new(),
        })
        .collect();

    let mut index = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        let id = (i + 1) as u32;
        index.insert(id, i);

        let leaf = LeafNode {
            id,
            title: record.title.clone(),
            kind: record.data.kind_label(),
            date: record.date_label(),
        };

        let node = &mut projects[record.project.index()];
        if record.alive {
            node.active.push(leaf);
        } else {
            node.inactive.push(leaf);
        }
    }

    CategoryTree { projects, index }
}
