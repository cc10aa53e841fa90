#![allow(dead_code, clippy::expect_used, reason = "Fine in tests")]
use std::{fs, path::Path};

use qtchm_toc::{IndexEntry, ProjectSink, TocNode};

/// Write `content` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, content: &str) {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("Failed to create dir in test");
  }
  fs::write(&path, content).expect("Failed to write file in test");
}

/// A page carrying a QDoc style leveled TOC block.
pub fn page_with_toc(items: &[(u32, &str, &str)]) -> String {
  let mut html = String::from(
    "<html><body><div class=\"sidebar\"><div class=\"toc\"><ul>\n",
  );
  for (level, title, href) in items {
    html.push_str(&format!(
      "<li class=\"level{level}\"><a href=\"{href}\">{title}</a></li>\n"
    ));
  }
  html.push_str("</ul></div></div></body></html>\n");
  html
}

/// Wrap section and keyword markup into a QHP project file.
pub fn qhp(sections: &str, keywords: &str) -> String {
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<QtHelpProject version="1.0">
  <namespace>org.qt-project.test</namespace>
  <virtualFolder>test</virtualFolder>
  <filterSection>
    <toc>{sections}</toc>
    <keywords>{keywords}</keywords>
  </filterSection>
</QtHelpProject>
"#
  )
}

/// Recursively collect every href of a tree.
pub fn all_hrefs(nodes: &[TocNode], out: &mut Vec<String>) {
  for node in nodes {
    out.push(node.href.clone());
    all_hrefs(&node.children, out);
  }
}

/// Sink that records what it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
  /// `(parent, title, href)`, `parent` indexing into this list.
  pub entries:   Vec<(Option<usize>, String, String)>,
  pub files:     Vec<String>,
  pub index:     Vec<IndexEntry>,
  pub finalized: bool,
}

impl RecordingSink {
  pub fn children(&self, parent: Option<usize>) -> Vec<&str> {
    self
      .entries
      .iter()
      .filter(|(p, ..)| *p == parent)
      .map(|(_, title, _)| title.as_str())
      .collect()
  }

  pub fn position(&self, title: &str) -> Option<usize> {
    self.entries.iter().position(|(_, t, _)| t == title)
  }
}

impl ProjectSink for RecordingSink {
  type Error = std::convert::Infallible;
  type Handle = Option<usize>;

  fn toc_root(&self) -> Self::Handle {
    None
  }

  fn add_toc_entry(
    &mut self,
    parent: Self::Handle,
    title: &str,
    href: &str,
  ) -> Self::Handle {
    self
      .entries
      .push((parent, title.to_string(), href.to_string()));
    Some(self.entries.len() - 1)
  }

  fn add_file(&mut self, href: &str) {
    self.files.push(href.to_string());
  }

  fn add_index_entry(&mut self, name: &str, href: &str, title: &str) {
    self.index.push(IndexEntry {
      name:  name.to_string(),
      href:  href.to_string(),
      title: title.to_string(),
    });
  }

  fn finalize(&mut self) -> Result<(), Self::Error> {
    self.finalized = true;
    Ok(())
  }
}
