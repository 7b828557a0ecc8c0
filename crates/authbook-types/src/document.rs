//! The whole persisted document: project name → file name → [`Node`].

use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::OrderedMap;

/// The full credential document.
///
/// Projects and files iterate in insertion order, which is the order they
/// appear in the backing file. Aggregation relies on this order: the first
/// project/file in scan order wins when several hold a credential for the
/// same address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    projects: OrderedMap<OrderedMap<Node>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Look up the node for a (project, file) pair.
    pub fn node(&self, project: &str, file: &str) -> Option<&Node> {
        self.projects.get(project)?.get(file)
    }

    /// The node for a (project, file) pair, created empty on first use.
    pub fn node_mut(&mut self, project: &str, file: &str) -> &mut Node {
        self.projects
            .entry(project.to_string())
            .or_default()
            .entry(file.to_string())
            .or_default()
    }

    /// Insert or replace a node.
    pub fn insert_node(&mut self, project: impl Into<String>, file: impl Into<String>, node: Node) {
        self.projects
            .entry(project.into())
            .or_default()
            .insert(file.into(), node);
    }

    /// Register a project with no files, keeping its position in scan order.
    pub fn insert_project(&mut self, project: impl Into<String>) {
        self.projects.entry(project.into()).or_default();
    }

    /// Every node in scan order as `(project, file, node)`.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &str, &Node)> {
        self.projects.iter().flat_map(|(project, files)| {
            files
                .iter()
                .map(move |(file, node)| (project.as_str(), file.as_str(), node))
        })
    }

    /// Project names in scan order.
    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    /// File names of one project in scan order. Empty if the project is unknown.
    pub fn files(&self, project: &str) -> Vec<&str> {
        self.projects
            .get(project)
            .map(|files| files.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
