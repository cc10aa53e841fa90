//! The `.hhp` project file.
use std::collections::BTreeMap;

use crate::sitemap::Lines;

/// Positional fields of a `[WINDOWS]` definition.
const WINDOW_FIELDS: [&str; 20] = [
  "title",
  "contents_file",
  "index_file",
  "default_topic",
  "home",
  "jump1",
  "jump1_text",
  "jump2",
  "jump2_text",
  "navigation_pane_styles",
  "navigation_pane_width",
  "buttons",
  "initial_position",
  "style_flags",
  "extended_style_flags",
  "window_show_state",
  "navigation_pane_closed",
  "default_navigation_pane",
  "navigation_pane_position",
  "id",
];

/// A window definition.
#[derive(Debug, Clone)]
pub struct Window {
  name:    String,
  options: BTreeMap<&'static str, String>,
}

impl Window {
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    let mut options = BTreeMap::new();
    options.insert("id", "0".to_string());
    options.insert("navigation_pane_styles", "0x2120".to_string());
    options.insert("buttons", "0x3006".to_string());
    Self {
      name: name.into(),
      options,
    }
  }

  /// Set one of the positional fields. Unknown fields are ignored.
  pub fn set(&mut self, field: &str, value: impl Into<String>) {
    if let Some(known) = WINDOW_FIELDS.iter().find(|known| **known == field) {
      self.options.insert(*known, value.into());
    }
  }

  #[must_use]
  pub fn get(&self, field: &str) -> Option<&str> {
    self.options.get(field).map(String::as_str)
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Render `name=field,field,...`, filling unset fields from the project.
  fn render(&self, project: &BTreeMap<String, String>) -> String {
    let inherited = [
      ("contents_file", "contents_file"),
      ("index_file", "index_file"),
      ("home", "default_topic"),
    ];

    let fields: Vec<String> = WINDOW_FIELDS
      .iter()
      .map(|field| {
        let value = self.options.get(field).map(String::as_str).or_else(|| {
          inherited
            .iter()
            .find(|(window_key, _)| window_key == field)
            .and_then(|(_, project_key)| project.get(*project_key))
            .map(String::as_str)
        });
        quote(value.unwrap_or_default())
      })
      .collect();

    format!("{}={}", self.name, fields.join(","))
  }
}

/// Numbers and hex literals stay bare; other values are quoted.
fn quote(value: &str) -> String {
  if value.is_empty()
    || value.starts_with("0x")
    || value.chars().all(|c| c.is_ascii_digit())
  {
    value.to_string()
  } else {
    format!("\"{value}\"")
  }
}

/// Render an option key the way HTML Help Workshop spells it.
fn option_key(key: &str) -> String {
  let spaced = key.replace('_', " ").to_lowercase();
  let mut chars = spaced.chars();
  chars.next().map_or_else(String::new, |first| {
    first.to_uppercase().chain(chars).collect()
  })
}

/// The project file: options, main window and file list.
#[derive(Debug, Clone)]
pub struct Project {
  options: BTreeMap<String, String>,
  window:  Window,
  files:   Vec<String>,
}

impl Project {
  /// A project compiling to `<name>.chm`.
  #[must_use]
  pub fn new(name: &str) -> Self {
    let mut options = BTreeMap::new();
    for (key, value) in [
      ("compatibility", "1.1 or later"),
      ("display_compile_progress", "No"),
      ("language", "0x409 English (United States)"),
      ("default_window", "main"),
      // A binary index hides keywords with several topics.
      ("binary_index", "No"),
      ("full-text_search", "Yes"),
      ("binary_toc", "Yes"),
    ] {
      options.insert(key.to_string(), value.to_string());
    }
    options.insert("compiled_file".to_string(), format!("{name}.chm"));

    Self {
      options,
      window: Window::new("main"),
      files: Vec::new(),
    }
  }

  pub fn set(&mut self, key: &str, value: impl Into<String>) {
    self.options.insert(key.to_string(), value.into());
  }

  #[must_use]
  pub fn get(&self, key: &str) -> Option<&str> {
    self.options.get(key).map(String::as_str)
  }

  pub const fn window_mut(&mut self) -> &mut Window {
    &mut self.window
  }

  #[must_use]
  pub const fn window(&self) -> &Window {
    &self.window
  }

  /// Register a file in `[FILES]`.
  pub fn append(&mut self, file: impl Into<String>) {
    self.files.push(file.into());
  }

  #[must_use]
  pub fn files(&self) -> &[String] {
    &self.files
  }

  /// Render the `.hhp` file content.
  #[must_use]
  pub fn serialize(&self) -> String {
    let mut out = Lines::default();
    out.line("[OPTIONS]");
    for (key, value) in &self.options {
      out.line(&format!("{}={value}", option_key(key)));
    }
    out.blank();
    out.line("[WINDOWS]");
    out.line(&self.window.render(&self.options));
    out.blank();
    out.blank();
    if !self.files.is_empty() {
      out.line("[FILES]");
      for file in &self.files {
        out.line(file);
      }
      out.blank();
    }
    out.line("[INFOTYPES]");
    out.blank();
    out.into_string()
  }
}
