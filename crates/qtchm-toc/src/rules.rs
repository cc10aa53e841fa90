//! Documentation-set specific knobs for the reconciliation.
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

fn default_boilerplate_titles() -> Vec<String> {
  vec!["List of all members".to_string(), "Obsolete members".to_string()]
}

fn default_landing_page() -> String {
  "qtexamplesandtutorials.html".to_string()
}

fn default_external_host() -> String {
  "http://doc.qt.io".to_string()
}

/// What to do with a titled section that carries no `ref` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideAction {
  /// Drop the section and everything below it.
  Drop,
  /// Treat the section as if it had no title.
  Transparent,
  /// Use this reference instead.
  Ref(String),
}

/// One entry of the override table, keyed by module and section title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOverride {
  pub module: String,
  pub title:  String,
  pub action: OverrideAction,
}

impl SectionOverride {
  fn new(module: &str, title: &str, action: OverrideAction) -> Self {
    Self {
      module: module.to_string(),
      title: title.to_string(),
      action,
    }
  }
}

/// Known irregularities of the upstream Qt QHP files.
static BUILTIN_OVERRIDES: LazyLock<Vec<SectionOverride>> = LazyLock::new(|| {
  vec![
    SectionOverride::new("qtcore5", "C++ Classes", OverrideAction::Transparent),
    SectionOverride::new(
      "qtcore5compat",
      "C++ Classes",
      OverrideAction::Transparent,
    ),
    SectionOverride::new("qtshadertools", "Examples", OverrideAction::Drop),
    SectionOverride::new(
      "qtdatavisualization",
      "Getting Started",
      OverrideAction::Ref("qtdatavisualization-index.html".to_string()),
    ),
  ]
});

/// Rules that steer the reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocRules {
  /// Child section titles that carry no navigational value. A section whose
  /// children are all boilerplate gets its children from the page instead.
  #[serde(default = "default_boilerplate_titles")]
  pub boilerplate_titles: Vec<String>,

  /// Page whose categorized link grid is scanned in addition to its TOC.
  #[serde(default = "default_landing_page")]
  pub landing_page: String,

  /// Links starting with this prefix are skipped in the link grid.
  #[serde(default = "default_external_host")]
  pub external_host: String,

  /// Extra overrides, consulted before the built-in ones.
  #[serde(default)]
  pub overrides: Vec<SectionOverride>,
}

impl Default for TocRules {
  fn default() -> Self {
    Self {
      boilerplate_titles: default_boilerplate_titles(),
      landing_page:       default_landing_page(),
      external_host:      default_external_host(),
      overrides:          Vec::new(),
    }
  }
}

impl TocRules {
  #[must_use]
  pub fn is_boilerplate(&self, title: &str) -> bool {
    self.boilerplate_titles.iter().any(|t| t == title)
  }

  /// Find the override for a section of `module` titled `title`.
  #[must_use]
  pub fn find_override(
    &self,
    module: &str,
    title: &str,
  ) -> Option<&OverrideAction> {
    self
      .overrides
      .iter()
      .chain(BUILTIN_OVERRIDES.iter())
      .find(|o| o.module == module && o.title == title)
      .map(|o| &o.action)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_overrides_are_found() {
    let rules = TocRules::default();
    assert_eq!(
      rules.find_override("qtshadertools", "Examples"),
      Some(&OverrideAction::Drop)
    );
    assert_eq!(
      rules.find_override("qtcore5compat", "C++ Classes"),
      Some(&OverrideAction::Transparent)
    );
    assert_eq!(rules.find_override("qtcore", "C++ Classes"), None);
  }

  #[test]
  fn configured_overrides_win() {
    let rules = TocRules {
      overrides: vec![SectionOverride::new(
        "qtshadertools",
        "Examples",
        OverrideAction::Ref("qtshadertools-examples.html".to_string()),
      )],
      ..TocRules::default()
    };
    assert_eq!(
      rules.find_override("qtshadertools", "Examples"),
      Some(&OverrideAction::Ref("qtshadertools-examples.html".to_string()))
    );
  }
}
