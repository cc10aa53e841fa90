//! Sitemap files: the `.hhc` contents tree and the `.hhk` keyword index.
use html_escape::encode_double_quoted_attribute;
use indexmap::IndexMap;
use log::warn;

/// Tab-indented line writer.
#[derive(Debug, Default)]
pub(crate) struct Lines {
  buf:    String,
  indent: usize,
}

impl Lines {
  pub(crate) fn line(&mut self, text: &str) {
    for _ in 0..self.indent {
      self.buf.push('\t');
    }
    self.buf.push_str(text);
    self.buf.push('\n');
  }

  pub(crate) fn blank(&mut self) {
    self.buf.push('\n');
  }

  pub(crate) fn indented(&mut self, f: impl FnOnce(&mut Self)) {
    self.indent += 1;
    f(self);
    self.indent -= 1;
  }

  pub(crate) fn param(&mut self, name: &str, value: &str) {
    self.line(&format!(
      "<param name=\"{}\" value=\"{}\">",
      encode_double_quoted_attribute(name),
      encode_double_quoted_attribute(value)
    ));
  }

  pub(crate) fn into_string(self) -> String {
    self.buf
  }
}

fn sitemap(
  properties: &[(&str, &str)],
  items: impl FnOnce(&mut Lines),
) -> String {
  let mut out = Lines::default();
  out.line(r#"<!DOCTYPE HTML PUBLIC "-//IETF//DTD HTML//EN">"#);
  out.line("<HTML>");
  out.line("<HEAD>");
  out.line(
    r#"<meta name="GENERATOR" content="Microsoft&reg; HTML Help Workshop 4.1">"#,
  );
  out.line("<!-- Sitemap 1.0 -->");
  out.line("</HEAD><BODY>");
  if !properties.is_empty() {
    out.line(r#"<OBJECT type="text/site properties">"#);
    out.indented(|out| {
      for (name, value) in properties {
        out.param(name, value);
      }
    });
    out.line("</OBJECT>");
  }
  out.line("<UL>");
  out.indented(items);
  out.line("</UL>");
  out.line("</BODY></HTML>");
  out.into_string()
}

/// Handle to a position in a [`Toc`]; the root has no index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocHandle(Option<usize>);

impl TocHandle {
  pub const ROOT: Self = Self(None);
}

#[derive(Debug, Clone)]
struct TocItem {
  name:     String,
  local:    String,
  children: Vec<usize>,
}

/// The contents tree.
#[derive(Debug, Clone)]
pub struct Toc {
  items:         Vec<TocItem>,
  roots:         Vec<usize>,
  window_styles: String,
  font:          String,
}

impl Default for Toc {
  fn default() -> Self {
    Self {
      items:         Vec::new(),
      roots:         Vec::new(),
      window_styles: "0x801627".to_string(),
      font:          "Tahoma,8,0".to_string(),
    }
  }
}

impl Toc {
  /// Append an item under `parent`.
  ///
  /// Blank names cannot be displayed; such an item is not created and the
  /// parent handle is returned so that its children land on the parent.
  pub fn append(
    &mut self,
    parent: TocHandle,
    name: &str,
    local: &str,
  ) -> TocHandle {
    let name = name.trim();
    if name.is_empty() {
      warn!("Refusing TOC entry with an empty name for {local}");
      return parent;
    }

    let id = self.items.len();
    self.items.push(TocItem {
      name:     name.to_string(),
      local:    local.to_string(),
      children: Vec::new(),
    });
    match parent.0.and_then(|idx| self.items.get_mut(idx)) {
      Some(item) => item.children.push(id),
      None => self.roots.push(id),
    }
    TocHandle(Some(id))
  }

  /// Number of items in the whole tree.
  #[must_use]
  pub fn len(&self) -> usize {
    self.items.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Render the `.hhc` file content.
  #[must_use]
  pub fn serialize(&self) -> String {
    let properties = [
      ("Window Styles", self.window_styles.as_str()),
      ("Font", self.font.as_str()),
    ];
    sitemap(&properties, |out| self.write_items(out, &self.roots))
  }

  fn write_items(&self, out: &mut Lines, ids: &[usize]) {
    for item in ids.iter().filter_map(|id| self.items.get(*id)) {
      out.line(r#"<LI> <OBJECT type="text/sitemap">"#);
      out.indented(|out| {
        out.param("Name", &item.name);
        out.param("Local", &item.local);
        out.line("</OBJECT>");
      });
      if !item.children.is_empty() {
        out.line("<UL>");
        out.indented(|out| self.write_items(out, &item.children));
        out.line("</UL>");
      }
    }
  }
}

/// The keyword index.
///
/// Entries sharing a name collapse into one keyword listing every target,
/// the way HTML Help shows a topic chooser.
#[derive(Debug, Clone, Default)]
pub struct Index {
  keywords: IndexMap<String, Vec<(String, String)>>,
}

impl Index {
  pub fn append(&mut self, name: &str, local: &str, title: &str) {
    let name = name.trim();
    if name.is_empty() {
      warn!("Refusing index entry with an empty name for {local}");
      return;
    }
    self
      .keywords
      .entry(name.to_string())
      .or_default()
      .push((local.to_string(), title.to_string()));
  }

  /// Number of distinct keywords.
  #[must_use]
  pub fn len(&self) -> usize {
    self.keywords.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.keywords.is_empty()
  }

  /// Targets recorded for `name`, in insertion order.
  #[must_use]
  pub fn targets(&self, name: &str) -> Option<&[(String, String)]> {
    self.keywords.get(name).map(Vec::as_slice)
  }

  /// Render the `.hhk` file content, keywords sorted case-insensitively.
  #[must_use]
  pub fn serialize(&self) -> String {
    let mut sorted: Vec<_> = self.keywords.iter().collect();
    sorted.sort_by_cached_key(|(name, _)| name.to_lowercase());

    sitemap(&[], |out| {
      for (name, targets) in sorted {
        out.line(r#"<LI> <OBJECT type="text/sitemap">"#);
        out.indented(|out| {
          out.param("Name", name);
          for (local, title) in targets {
            if !title.is_empty() {
              out.param("Name", title);
            }
            out.param("Local", local);
          }
          out.line("</OBJECT>");
        });
      }
    })
  }
}
