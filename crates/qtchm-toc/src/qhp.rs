//! Reading QHP (Qt Help Project) files.
//!
//! Only the first `<toc>` and the first `<keywords>` element are of
//! interest; everything else in the project file is skipped.
use std::{
  fs,
  path::{Path, PathBuf},
};

use log::debug;
use quick_xml::{
  Reader,
  events::{BytesStart, Event},
};

use crate::{
  error::TocError,
  types::{Keyword, QhpDocument, Section},
};

/// Read and parse the QHP file at `path`.
///
/// # Errors
///
/// Returns [`TocError::ReadFile`] if the file cannot be read, and
/// [`TocError::ParseQhp`] if it is not well-formed XML.
pub fn read_qhp(path: &Path) -> Result<QhpDocument, TocError> {
  let content =
    fs::read_to_string(path).map_err(|source| TocError::ReadFile {
      path: path.to_path_buf(),
      source,
    })?;
  parse_qhp(&content, path)
}

/// Parse QHP content; `path` is only used for error reporting.
///
/// # Errors
///
/// Returns [`TocError::ParseQhp`] if `content` is not well-formed XML.
pub fn parse_qhp(content: &str, path: &Path) -> Result<QhpDocument, TocError> {
  let mut reader = Reader::from_str(content);
  reader.config_mut().trim_text(true);

  let fail = |reader: &Reader<&[u8]>, source| {
    TocError::ParseQhp {
      path: path.to_path_buf(),
      position: reader.error_position(),
      source,
    }
  };

  let mut doc = QhpDocument::default();
  // Sections whose end tag has not been seen yet.
  let mut open: Vec<Section> = Vec::new();
  let mut in_toc = false;
  let mut toc_seen = false;
  let mut in_keywords = false;
  let mut keywords_seen = false;

  loop {
    let event = match reader.read_event() {
      Ok(event) => event,
      Err(source) => return Err(fail(&reader, source)),
    };

    match event {
      Event::Start(elem) => {
        match elem.name().as_ref() {
          b"toc" if !toc_seen => in_toc = true,
          b"keywords" if !keywords_seen => in_keywords = true,
          b"section" if in_toc => {
            let section =
              read_section(&elem, &reader).map_err(|e| fail(&reader, e))?;
            open.push(section);
          },
          b"keyword" if in_keywords => {
            if let Some(keyword) =
              read_keyword(&elem, &reader).map_err(|e| fail(&reader, e))?
            {
              doc.keywords.push(keyword);
            }
          },
          _ => {},
        }
      },
      Event::Empty(elem) => {
        match elem.name().as_ref() {
          b"toc" => toc_seen = true,
          b"keywords" => keywords_seen = true,
          b"section" if in_toc => {
            let section =
              read_section(&elem, &reader).map_err(|e| fail(&reader, e))?;
            attach(&mut open, &mut doc.sections, section);
          },
          b"keyword" if in_keywords => {
            if let Some(keyword) =
              read_keyword(&elem, &reader).map_err(|e| fail(&reader, e))?
            {
              doc.keywords.push(keyword);
            }
          },
          _ => {},
        }
      },
      Event::End(elem) => {
        match elem.name().as_ref() {
          b"section" if in_toc => {
            if let Some(section) = open.pop() {
              attach(&mut open, &mut doc.sections, section);
            }
          },
          b"toc" if in_toc => {
            in_toc = false;
            toc_seen = true;
          },
          b"keywords" if in_keywords => {
            in_keywords = false;
            keywords_seen = true;
          },
          _ => {},
        }
      },
      Event::Eof => break,
      _ => {},
    }
  }

  // Tolerate a truncated toc: close whatever is still open.
  while let Some(section) = open.pop() {
    attach(&mut open, &mut doc.sections, section);
  }

  Ok(doc)
}

fn attach(
  open: &mut [Section],
  top_level: &mut Vec<Section>,
  section: Section,
) {
  match open.last_mut() {
    Some(parent) => parent.children.push(section),
    None => top_level.push(section),
  }
}

fn read_section(
  elem: &BytesStart<'_>,
  reader: &Reader<&[u8]>,
) -> Result<Section, quick_xml::Error> {
  let title = attribute(elem, reader, b"title")?.unwrap_or_default();
  let reference = attribute(elem, reader, b"ref")?.filter(|r| !r.is_empty());
  Ok(Section {
    title: title.trim().to_string(),
    reference,
    children: Vec::new(),
  })
}

fn read_keyword(
  elem: &BytesStart<'_>,
  reader: &Reader<&[u8]>,
) -> Result<Option<Keyword>, quick_xml::Error> {
  let name = attribute(elem, reader, b"name")?;
  let reference = attribute(elem, reader, b"ref")?;
  match (name, reference) {
    (Some(name), Some(reference)) => Ok(Some(Keyword { name, reference })),
    (name, _) => {
      debug!("Skipping keyword without name or ref: {name:?}");
      Ok(None)
    },
  }
}

fn attribute(
  elem: &BytesStart<'_>,
  reader: &Reader<&[u8]>,
  key: &[u8],
) -> Result<Option<String>, quick_xml::Error> {
  for attr in elem.attributes() {
    let attr = attr?;
    if attr.key.as_ref() == key {
      let value = attr.decode_and_unescape_value(reader.decoder())?;
      return Ok(Some(value.into_owned()));
    }
  }
  Ok(None)
}

/// Locate the QHP file of a module directory, if any.
///
/// A module carries at most one; should there be several, the
/// lexicographically first wins.
///
/// # Errors
///
/// Returns [`TocError::ReadDir`] if the directory cannot be listed.
pub fn find_qhp(module_dir: &Path) -> Result<Option<PathBuf>, TocError> {
  let entries = fs::read_dir(module_dir).map_err(|source| {
    TocError::ReadDir {
      path: module_dir.to_path_buf(),
      source,
    }
  })?;

  let mut candidates: Vec<PathBuf> = entries
    .filter_map(Result::ok)
    .map(|entry| entry.path())
    .filter(|path| {
      path.is_file()
        && path
          .extension()
          .is_some_and(|ext| ext.eq_ignore_ascii_case("qhp"))
    })
    .collect();
  candidates.sort();
  Ok(candidates.into_iter().next())
}
