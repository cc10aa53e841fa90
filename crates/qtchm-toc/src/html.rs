//! Navigation extracted from a rendered page.
//!
//! QDoc pages describe their own structure in a `<div class="toc">` block:
//! a flat `<ul>` whose `<li class="levelN">` items carry the nesting depth.
//! This module turns that flat list back into a tree.
use std::fs;

use kuchikikiki::{NodeRef, parse_html};
use log::debug;
use tendril::TendrilSink;

use crate::{
  error::TocError,
  href::{self, Context},
  rules::TocRules,
  types::{LeveledEntry, TocNode},
};

/// Extract the navigation tree of the page at `page_href`.
///
/// Returns an empty list if the page does not exist. Nodes whose target file
/// is missing are pruned together with their subtree.
///
/// # Errors
///
/// Returns [`TocError::ReadFile`] if the page exists but cannot be read.
pub fn extract_page_toc(
  ctx: &Context,
  page_href: &str,
) -> Result<Vec<TocNode>, TocError> {
  let path = ctx.source_path(page_href);
  if !path.is_file() {
    debug!("No page to extract a TOC from: {}", path.display());
    return Ok(Vec::new());
  }

  let content = fs::read_to_string(&path).map_err(|source| {
    TocError::ReadFile {
      path: path.clone(),
      source,
    }
  })?;

  let mut nodes = page_toc(&content, page_href, ctx.rules());
  retain_existing(ctx, &mut nodes);
  Ok(nodes)
}

/// Build the navigation tree from page markup, without checking targets.
#[must_use]
pub fn page_toc(html: &str, page_href: &str, rules: &TocRules) -> Vec<TocNode> {
  let document = parse_html().one(html);

  let mut nodes = Vec::new();
  for entries in leveled_entries(&document, page_href) {
    nodes.extend(reconstruct(&entries));
  }

  if href::file_name(page_href) == rules.landing_page {
    nodes.extend(link_grid(&document, page_href, &rules.external_host));
  }

  nodes
}

/// Rebuild a tree from a flat leveled list.
///
/// The first entry fixes the base level, so only level differences matter.
/// A deeper level opens the previous node as a new ancestor; a shallower one
/// closes as many ancestors as the levels went up, never past the top.
#[must_use]
pub fn reconstruct(entries: &[LeveledEntry]) -> Vec<TocNode> {
  let mut top: Vec<TocNode> = Vec::new();
  // Open ancestors, outermost first. Their children so far live in
  // `node.children`.
  let mut ancestors: Vec<TocNode> = Vec::new();
  let mut prev_level: Option<u32> = None;

  for entry in entries {
    let prev = *prev_level.get_or_insert(entry.level);

    if entry.level > prev {
      if let Some(last) = current(&mut top, &mut ancestors).pop() {
        ancestors.push(last);
      }
    } else if entry.level < prev {
      for _ in entry.level..prev {
        let Some(closed) = ancestors.pop() else {
          break;
        };
        current(&mut top, &mut ancestors).push(closed);
      }
    }

    current(&mut top, &mut ancestors)
      .push(TocNode::new(entry.title.clone(), entry.href.clone()));
    prev_level = Some(entry.level);
  }

  while let Some(closed) = ancestors.pop() {
    current(&mut top, &mut ancestors).push(closed);
  }

  top
}

fn current<'a>(
  top: &'a mut Vec<TocNode>,
  ancestors: &'a mut [TocNode],
) -> &'a mut Vec<TocNode> {
  match ancestors.last_mut() {
    Some(parent) => &mut parent.children,
    None => top,
  }
}

/// One leveled list per `div.toc` block, in document order.
fn leveled_entries(
  document: &NodeRef,
  page_href: &str,
) -> Vec<Vec<LeveledEntry>> {
  let Ok(blocks) = document.select("div.toc") else {
    return Vec::new();
  };

  blocks
    .map(|block| {
      let mut entries = Vec::new();
      for item in child_elements(block.as_node(), "ul")
        .flat_map(|list| child_elements(&list, "li"))
      {
        let class = attribute(&item, "class");
        let Some(level) = class.as_deref().and_then(parse_level) else {
          debug!("Skipping TOC item without a level in {page_href}");
          continue;
        };
        let Some(anchor) = child_elements(&item, "a").next() else {
          continue;
        };
        let Some(target) = attribute(&anchor, "href") else {
          continue;
        };

        let title = anchor.text_contents().trim().to_string();
        // Placeholder entries such as `<a href="#"></a>`.
        if title.is_empty() && target.starts_with('#') {
          continue;
        }

        entries.push(LeveledEntry::new(
          level,
          title,
          href::page_href(page_href, &target),
        ));
      }
      entries
    })
    .collect()
}

/// The categorized link columns of the landing page.
///
/// Each column becomes a node titled by its heading paragraph and pointing
/// at the page itself, with the column's links as children.
fn link_grid(
  document: &NodeRef,
  page_href: &str,
  external_host: &str,
) -> Vec<TocNode> {
  let Ok(columns) = document.select("div.multi-column > div.doc-column") else {
    return Vec::new();
  };
  let (page_path, _) = href::split_fragment(page_href);

  columns
    .map(|column| {
      let column = column.as_node();
      let title = child_elements(column, "p")
        .next()
        .map(|p| p.text_contents().trim().to_string())
        .unwrap_or_default();

      let mut node = TocNode::new(title, page_path);
      for item in child_elements(column, "ul")
        .flat_map(|list| child_elements(&list, "li"))
      {
        // Some entries are plain text rather than links.
        let Some(anchor) = child_elements(&item, "a").next() else {
          continue;
        };
        let Some(target) = attribute(&anchor, "href") else {
          continue;
        };
        if !external_host.is_empty() && target.starts_with(external_host) {
          continue;
        }
        node.children.push(TocNode::new(
          anchor.text_contents().trim(),
          href::page_href(page_href, &target),
        ));
      }
      node
    })
    .collect()
}

/// Drop nodes whose target file is missing, with their subtree.
fn retain_existing(ctx: &Context, nodes: &mut Vec<TocNode>) {
  nodes.retain(|node| {
    let keep = ctx.exists(&node.href);
    if !keep {
      debug!("Dropping TOC entry {:?}: {} is missing", node.title, node.href);
    }
    keep
  });
  for node in nodes {
    retain_existing(ctx, &mut node.children);
  }
}

/// Parse the trailing number of a class such as `level2`.
fn parse_level(class: &str) -> Option<u32> {
  let class = class.trim();
  let prefix = class.trim_end_matches(|c: char| c.is_ascii_digit());
  class[prefix.len()..].parse().ok()
}

fn child_elements<'a>(
  node: &NodeRef,
  tag: &'a str,
) -> impl Iterator<Item = NodeRef> + use<'a> {
  node.children().filter(move |child| {
    child
      .as_element()
      .is_some_and(|element| element.name.local.as_ref() == tag)
  })
}

fn attribute(node: &NodeRef, name: &str) -> Option<String> {
  node
    .as_element()
    .and_then(|element| {
      element.attributes.borrow().get(name).map(str::to_string)
    })
}
