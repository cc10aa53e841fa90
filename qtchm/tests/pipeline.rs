#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use std::{
  fs,
  path::{Path, PathBuf},
};

use qtchm::config::Config;
use tempfile::TempDir;

const STYLE_IMAGES: [&str; 2] = ["logo.png", "home.png"];

fn write(root: &Path, rel: &str, content: &str) {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("Failed to create dir in test");
  }
  fs::write(&path, content).expect("Failed to write file in test");
}

fn read(path: impl AsRef<Path>) -> String {
  fs::read_to_string(path).expect("Failed to read file in test")
}

fn qhp(sections: &str, keywords: &str) -> String {
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<QtHelpProject version="1.0">
  <filterSection>
    <toc>{sections}</toc>
    <keywords>{keywords}</keywords>
  </filterSection>
</QtHelpProject>
"#
  )
}

const LANDING_PAGE: &str = r##"<html><head>
<link rel="stylesheet" type="text/css" href="style/offline.css" />
<script type="text/javascript">
  document.write('<link rel="stylesheet" href="style/offline-dark.css" />');
</script>
</head><body>
<div class="navigationbar">
  <table><tr>
<td >Qt 6.5</td></tr></table>
</div>
<p class="naviNextPrevious"><a href="overview.html">Next</a></p><p/>
<div class="toc"><ul>
<li class="level1"><a href="#getting-started">Getting Started</a></li>
</ul></div>
</body></html>
"##;

const CLASS_PAGE: &str = r##"<html><body>
<div class="toc"><ul>
<li class="level1"><a href="#details">Detailed Description</a></li>
<li class="level2"><a href="#thread-affinity">Thread Affinity</a></li>
<li class="level1"><a href="#public-functions">Public Functions</a></li>
</ul></div>
</body></html>
"##;

/// A two module documentation tree plus a stylesheet next to it.
fn docs_tree(temp: &TempDir) -> Config {
  let source = temp.path().join("docs");

  write(
    &source,
    "qtdoc/qtdoc.index",
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<INDEX url=\"\" \
     title=\"Qt 6.5\" version=\"6.5.3\" project=\"QtDoc\">\n</INDEX>\n",
  );
  write(
    &source,
    "qtdoc/qtdoc.qhp",
    &qhp(
      r#"<section title="Qt" ref="index.html">
           <section title="List of all members" ref="index-members.html"/>
         </section>"#,
      r#"<keyword name="Qt" id="Qt" ref="index.html"/>"#,
    ),
  );
  write(&source, "qtdoc/index.html", LANDING_PAGE);
  write(&source, "qtdoc/images/logo.png", "logo");
  write(&source, "qtdoc/images/home.png", "home");
  write(&source, "qtdoc/images/diagram.png", "diagram");

  write(
    &source,
    "qtcore/qtcore.qhp",
    &qhp(
      r#"<section title="Qt Core" ref="qtcore-index.html">
           <section title="QObject" ref="qobject.html">
             <section title="List of all members" ref="qobject-members.html"/>
             <section title="Obsolete members" ref="qobject-obsolete.html"/>
           </section>
         </section>"#,
      r#"<keyword name="QObject" id="QObject" ref="qobject.html"/>
         <keyword name="operator==" ref="qobject.html#operator-eq-eq"/>"#,
    ),
  );
  write(&source, "qtcore/qtcore-index.html", "<html></html>");
  write(&source, "qtcore/qobject.html", CLASS_PAGE);
  write(&source, "qtcore/images/logo.png", "logo");
  write(&source, "qtcore/style/offline.css", "body {}");
  write(&source, "qtcore/snippets/code/main.cpp", "int main() {}");

  write(&source, "global/macros.qdocconf", "");
  write(temp.path(), "qt.css", "body { font-family: Tahoma; }");

  Config {
    source_dir: source,
    output_dir: temp.path().join("out"),
    style: temp.path().join("qt.css"),
    style_images: STYLE_IMAGES.iter().map(ToString::to_string).collect(),
    jobs: Some(2),
    ..Config::default()
  }
}

fn files_section(hhp: &str) -> Vec<&str> {
  hhp
    .split("[FILES]\n")
    .nth(1)
    .and_then(|rest| rest.split("\n\n").next())
    .map(|files| files.lines().collect())
    .unwrap_or_default()
}

#[test]
fn builds_project_for_docs_tree() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let config = docs_tree(&temp);
  let out = config.output_dir.clone();

  let hhp_path = qtchm::run(&config).expect("pipeline run");
  assert_eq!(hhp_path, out.join("Qt-6.5.3.hhp"));

  let hhp = read(&hhp_path);
  assert!(hhp.contains("Compiled file=Qt-6.5.3.chm\n"));
  assert!(hhp.contains("Default topic=qtdoc/index.html\n"));
  assert!(hhp.contains("main=\"Qt 6.5.3\",\"Qt-6.5.3.hhc\""));
  assert_eq!(files_section(&hhp), [
    "qtdoc/index.html",
    "qtdoc/images/diagram.png",
    "qtcore/qobject.html",
    "qtcore/qtcore-index.html",
    "qtcore/snippets/code/main.cpp",
    "images/logo.png",
    "images/home.png",
    "qt.css",
  ]);

  let hhc = read(out.join("Qt-6.5.3.hhc"));
  let positions: Vec<usize> = [
    "\"Qt\"",
    "\"Getting Started\"",
    "\"Qt Core\"",
    "\"QObject\"",
    "\"Detailed Description\"",
    "\"Thread Affinity\"",
    "\"Public Functions\"",
  ]
  .iter()
  .map(|name| hhc.find(name).unwrap_or_else(|| panic!("{name} in hhc")))
  .collect();
  assert!(positions.is_sorted());
  assert!(hhc.contains("value=\"qtcore/qobject.html#thread-affinity\""));
  assert!(!hhc.contains("List of all members"));

  let hhk = read(out.join("Qt-6.5.3.hhk"));
  assert!(hhk.contains("value=\"QObject\""));
  assert!(!hhk.contains("operator=="));
}

#[test]
fn copies_and_rewrites_output_tree() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let config = docs_tree(&temp);
  let out = config.output_dir.clone();

  qtchm::run(&config).expect("pipeline run");

  let landing = read(out.join("qtdoc/index.html"));
  assert!(landing.contains(
    "<link rel=\"stylesheet\" type=\"text/css\" href=\"../qt.css\" />\n</head>"
  ));
  assert!(!landing.contains("offline-dark.css"));
  assert!(
    landing.contains("<td ><a href=\"../qtdoc/index.html\">Qt 6.5</a></td>")
  );
  assert!(landing.contains("<a href=\"overview.html\">Next</a></p>\n"));

  assert_eq!(read(out.join("qt.css")), "body { font-family: Tahoma; }");
  assert_eq!(read(out.join("images/logo.png")), "logo");
  assert!(out.join("images/home.png").is_file());

  // Style images leave the modules; an images directory left empty goes too
  assert!(out.join("qtdoc/images/diagram.png").is_file());
  assert!(!out.join("qtdoc/images/logo.png").exists());
  assert!(!out.join("qtcore/images").exists());
  assert!(!out.join("qtcore/style").exists());
  assert!(out.join("qtcore/snippets/code/main.cpp").is_file());
  assert!(!out.join("global").exists());
}

#[test]
fn rerun_keeps_pages_and_rebuilds_project() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let config = docs_tree(&temp);
  let out = config.output_dir.clone();

  qtchm::run(&config).expect("first run");
  let first_hhc = read(out.join("Qt-6.5.3.hhc"));
  let first_hhp = read(out.join("Qt-6.5.3.hhp"));

  fs::write(out.join("qtcore/qobject.html"), "edited by hand")
    .expect("Failed to edit page");
  fs::remove_file(out.join("Qt-6.5.3.hhc")).expect("Failed to remove hhc");

  qtchm::run(&config).expect("second run");

  assert_eq!(read(out.join("qtcore/qobject.html")), "edited by hand");
  assert_eq!(read(out.join("Qt-6.5.3.hhc")), first_hhc);
  assert_eq!(read(out.join("Qt-6.5.3.hhp")), first_hhp);
}

#[test]
fn missing_version_is_fatal() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let config = docs_tree(&temp);
  write(&config.source_dir, "qtdoc/qtdoc.index", "<INDEX title=\"Qt\">");

  let err = qtchm::run(&config).expect_err("run without version");
  assert!(err.to_string().contains("Failed to parse Qt docs version"));
  assert!(!config.output_dir.join("Qt-6.5.3.hhp").exists());
}

#[test]
fn missing_reference_aborts_run() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let config = docs_tree(&temp);
  write(
    &config.source_dir,
    "qtgui/qtgui.qhp",
    &qhp(r#"<section title="Qt GUI"/>"#, ""),
  );

  let err = qtchm::run(&config).expect_err("run with a dangling section");
  assert!(
    format!("{err:?}").contains("empty reference in module `qtgui`"),
    "unexpected error: {err:?}"
  );
}

#[test]
fn modules_follow_landing_first_then_sorted_order() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let config = docs_tree(&temp);
  fs::create_dir_all(config.source_dir.join("activeqt"))
    .expect("Failed to create module dir");

  let modules: Vec<PathBuf> =
    qtchm::utils::module_dirs(&config).expect("module listing");
  let names: Vec<_> = modules
    .iter()
    .filter_map(|path| path.file_name())
    .map(|name| name.to_string_lossy().into_owned())
    .collect();
  assert_eq!(names, ["qtdoc", "activeqt", "qtcore"]);
}
