/// Accumulates the reconciled TOC, index and file manifest, and serializes
/// them once the run is over.
///
/// The reconciliation code only ever appends; it never reads back what it
/// handed over.
pub trait ProjectSink {
  /// Position in the TOC under which further entries can be nested.
  type Handle: Copy;
  type Error;

  /// The implicit root of the TOC.
  fn toc_root(&self) -> Self::Handle;

  /// Create a TOC entry under `parent` and return a handle to it.
  fn add_toc_entry(
    &mut self,
    parent: Self::Handle,
    title: &str,
    href: &str,
  ) -> Self::Handle;

  /// Register a file in the package manifest without a TOC entry.
  fn add_file(&mut self, href: &str);

  fn add_index_entry(&mut self, name: &str, href: &str, title: &str);

  /// Serialize everything accumulated so far.
  ///
  /// # Errors
  ///
  /// Returns the implementation's error if the output cannot be written.
  fn finalize(&mut self) -> Result<(), Self::Error>;
}
