//! Keyword index built from the `<keywords>` list of a QHP file.
use log::debug;

use crate::{
  href::{self, Context},
  types::{IndexEntry, Keyword},
};

/// Build the index entries of `module`, in keyword order.
///
/// Keywords whose target file is missing are dropped, as are bare operator
/// keywords such as `operator==`; the spaced forms (`operator new`) stay.
#[must_use]
pub fn build_index(
  ctx: &Context,
  module: &str,
  keywords: &[Keyword],
) -> Vec<IndexEntry> {
  let mut index = Vec::with_capacity(keywords.len());
  let mut dropped = 0_usize;

  for keyword in keywords {
    if is_bare_operator(&keyword.name) {
      continue;
    }

    let href = href::module_href(module, &keyword.reference);
    if !ctx.exists(&href) {
      dropped += 1;
      continue;
    }

    index.push(IndexEntry {
      name: keyword.name.clone(),
      href,
      title: keyword.reference.clone(),
    });
  }

  if dropped > 0 {
    debug!("Dropped {dropped} keywords of {module} pointing at missing pages");
  }
  index
}

fn is_bare_operator(name: &str) -> bool {
  name.starts_with("operator") && !name.contains(' ')
}
