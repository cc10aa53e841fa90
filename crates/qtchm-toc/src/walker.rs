//! Building the TOC from the section tree of a QHP file.
use log::debug;

use crate::{
  error::TocError,
  href::{self, Context},
  html::extract_page_toc,
  rules::{OverrideAction, TocRules},
  types::{Section, TocNode},
};

/// Build the TOC nodes for the top-level `sections` of `module`.
///
/// Sections pointing at missing files are dropped with their subtree.
/// Sections whose children are all boilerplate get their children from the
/// navigation embedded in their page instead.
///
/// # Errors
///
/// Returns [`TocError::MissingReference`] for a titled section without a
/// reference that no override covers, and [`TocError::ReadFile`] if a page
/// cannot be read.
pub fn walk_sections(
  ctx: &Context,
  module: &str,
  sections: &[Section],
) -> Result<Vec<TocNode>, TocError> {
  let mut nodes = Vec::new();
  for section in sections {
    visit(ctx, module, section, &mut nodes)?;
  }
  Ok(nodes)
}

fn visit(
  ctx: &Context,
  module: &str,
  section: &Section,
  parent: &mut Vec<TocNode>,
) -> Result<(), TocError> {
  let mut title = section.title.as_str();
  let mut reference = section.reference.as_deref();

  if !title.is_empty() && reference.is_none() {
    match ctx.rules().find_override(module, title) {
      Some(OverrideAction::Drop) => {
        debug!("Dropping section {title:?} of {module} by override");
        return Ok(());
      },
      Some(OverrideAction::Transparent) => title = "",
      Some(OverrideAction::Ref(synthesized)) => {
        reference = Some(synthesized.as_str());
      },
      None => {
        return Err(TocError::MissingReference {
          module: module.to_string(),
          title:  title.to_string(),
        });
      },
    }
  }

  let Some(reference) = reference.filter(|_| !title.is_empty()) else {
    // Transparent: children go straight to the parent.
    if !only_boilerplate(ctx.rules(), section) {
      for child in &section.children {
        visit(ctx, module, child, parent)?;
      }
    }
    return Ok(());
  };

  let href = href::module_href(module, reference);
  if !ctx.exists(&href) {
    debug!("Skipping section {title:?}: {href} does not exist");
    return Ok(());
  }

  let mut node = TocNode::new(title, href);
  if only_boilerplate(ctx.rules(), section) {
    if !href::has_fragment(&node.href) {
      node.children = extract_page_toc(ctx, &node.href)?;
    }
  } else {
    for child in &section.children {
      visit(ctx, module, child, &mut node.children)?;
    }
  }
  parent.push(node);
  Ok(())
}

/// Whether every child section is boilerplate. True for leaf sections.
fn only_boilerplate(rules: &TocRules, section: &Section) -> bool {
  section
    .children
    .iter()
    .all(|child| rules.is_boilerplate(&child.title))
}
