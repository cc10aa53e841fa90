#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use qtchm_hhp::HelpProject;
use qtchm_toc::{IndexEntry, ModuleOutput, ProjectSink, TocNode};
use tempfile::TempDir;

fn sample_module() -> ModuleOutput {
  ModuleOutput {
    name:  "qtdoc".to_string(),
    toc:   vec![TocNode {
      title:    "Qt".to_string(),
      href:     "qtdoc/index.html".to_string(),
      children: vec![
        TocNode::new("Overview", "qtdoc/index.html#overview"),
        TocNode {
          title:    String::new(),
          href:     "qtdoc/qtexamplesandtutorials.html".to_string(),
          children: vec![TocNode::new("Widgets", "qtdoc/widgets.html")],
        },
      ],
    }],
    index: vec![IndexEntry {
      name:  "Qt".to_string(),
      href:  "qtdoc/index.html".to_string(),
      title: "index.html".to_string(),
    }],
  }
}

#[test]
fn finalize_writes_all_three_files() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let mut project = HelpProject::new(
    temp_dir.path(),
    "Qt-6.5.3",
    "qtdoc/index.html",
    "Qt 6.5.3",
  );

  sample_module().append_to(&mut project);
  project.add_file("qtdoc/index.html");
  project.add_file("images/logo.png");
  project.finalize().expect("finalize");

  let hhp = fs::read_to_string(temp_dir.path().join("Qt-6.5.3.hhp"))
    .expect("hhp written");
  assert!(hhp.contains("Contents file=Qt-6.5.3.hhc\n"));
  assert!(hhp.contains("Index file=Qt-6.5.3.hhk\n"));
  assert!(hhp.contains("Default topic=qtdoc/index.html\n"));
  assert!(hhp.contains(",0x12120,,0x10184e,"));
  assert!(hhp.contains("[FILES]\nqtdoc/index.html\nimages/logo.png\n\n[INFOTYPES]\n"));

  let hhc = fs::read_to_string(temp_dir.path().join("Qt-6.5.3.hhc"))
    .expect("hhc written");
  assert!(hhc.contains("<param name=\"Font\" value=\"Tahoma,8,0\">"));
  let overview = hhc.find("\"Overview\"").expect("Overview listed");
  let widgets = hhc.find("\"Widgets\"").expect("Widgets listed");
  assert!(overview < widgets);
  // The transparent column leaves no entry of its own.
  assert!(!hhc.contains("qtexamplesandtutorials.html"));
  assert!(hhc.contains("\t\t\t<param name=\"Name\" value=\"Widgets\">\n"));

  let hhk = fs::read_to_string(temp_dir.path().join("Qt-6.5.3.hhk"))
    .expect("hhk written");
  assert!(hhk.contains("<param name=\"Local\" value=\"qtdoc/index.html\">"));
}

#[test]
fn toc_order_follows_append_order() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let mut project =
    HelpProject::new(temp_dir.path(), "Qt-6", "qtdoc/index.html", "Qt 6");

  sample_module().append_to(&mut project);
  ModuleOutput {
    name:  "qtcore".to_string(),
    toc:   vec![TocNode::new("Qt Core", "qtcore/qtcore-index.html")],
    index: Vec::new(),
  }
  .append_to(&mut project);

  assert_eq!(project.toc().len(), 4);
  let hhc = project.toc().serialize();
  let qt = hhc.find("\"Qt\"").expect("Qt listed");
  let core = hhc.find("\"Qt Core\"").expect("Qt Core listed");
  assert!(qt < core);
}
