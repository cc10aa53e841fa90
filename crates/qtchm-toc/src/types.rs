//! Types shared by the reconciliation passes.
use crate::sink::ProjectSink;

/// A node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TocNode {
  /// Display title. Empty means transparent: the node itself never reaches
  /// the sink and its children are attached to its parent instead.
  pub title:    String,
  /// Output-root-relative path, optionally with a `#fragment`.
  pub href:     String,
  /// Children in discovery order.
  pub children: Vec<TocNode>,
}

impl TocNode {
  #[must_use]
  pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
    Self {
      title:    title.into(),
      href:     href.into(),
      children: Vec::new(),
    }
  }

  #[must_use]
  pub fn is_transparent(&self) -> bool {
    self.title.is_empty()
  }

  /// Number of nodes in this subtree, this node included.
  #[must_use]
  pub fn node_count(&self) -> usize {
    1 + self.children.iter().map(Self::node_count).sum::<usize>()
  }
}

/// A keyword index entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
  pub name:  String,
  pub href:  String,
  pub title: String,
}

/// One item of a page's own leveled navigation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeveledEntry {
  pub level: u32,
  pub title: String,
  /// Already resolved to an output-root-relative path.
  pub href:  String,
}

impl LeveledEntry {
  #[must_use]
  pub fn new(
    level: u32,
    title: impl Into<String>,
    href: impl Into<String>,
  ) -> Self {
    Self {
      level,
      title: title.into(),
      href: href.into(),
    }
  }
}

/// A `<section>` element of a QHP file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
  /// Trimmed `title` attribute.
  pub title:     String,
  /// `ref` attribute; `None` when absent or empty.
  pub reference: Option<String>,
  pub children:  Vec<Section>,
}

/// A `<keyword>` element of a QHP file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
  pub name:      String,
  pub reference: String,
}

/// The parts of a QHP project file the reconciliation cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QhpDocument {
  /// Top-level sections of the first `<toc>` element.
  pub sections: Vec<Section>,
  /// Keywords of the first `<keywords>` element.
  pub keywords: Vec<Keyword>,
}

/// Everything one documentation module contributes to the project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleOutput {
  /// Directory basename of the module.
  pub name:  String,
  /// Top-level TOC nodes, in source order.
  pub toc:   Vec<TocNode>,
  /// Index entries, in source order.
  pub index: Vec<IndexEntry>,
}

impl ModuleOutput {
  /// Append this module's tree under the sink's TOC root and its keywords to
  /// the sink's index.
  ///
  /// Transparent nodes are flattened into their parent.
  pub fn append_to<S: ProjectSink>(&self, sink: &mut S) {
    let root = sink.toc_root();
    append_nodes(sink, root, &self.toc);
    for entry in &self.index {
      sink.add_index_entry(&entry.name, &entry.href, &entry.title);
    }
  }
}

fn append_nodes<S: ProjectSink>(
  sink: &mut S,
  parent: S::Handle,
  nodes: &[TocNode],
) {
  for node in nodes {
    if node.is_transparent() {
      append_nodes(sink, parent, &node.children);
    } else {
      let handle = sink.add_toc_entry(parent, &node.title, &node.href);
      append_nodes(sink, handle, &node.children);
    }
  }
}
