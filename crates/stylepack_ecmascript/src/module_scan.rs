use oxc::span::Span;

/// Local binding that holds the value of `export default <expression>`.
pub const DEFAULT_EXPORT_LOCAL: &str = "__stylepack_default__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBinding {
  /// `import local from '...'`
  Default { local: String },
  /// `import { imported as local } from '...'`
  Named { imported: String, local: String },
  /// `import * as local from '...'`
  Namespace { local: String },
}

/// A static `import` declaration.
#[derive(Debug, Clone)]
pub struct ImportRecord {
  pub specifier: String,
  pub bindings: Vec<ImportBinding>,
  pub span: Span,
}

/// `exported` is the public name, `local` the binding in module scope that carries the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalExport {
  pub exported: String,
  pub local: String,
}

#[derive(Debug, Clone)]
pub enum Replacement {
  Text(String),
  /// Replaced by whatever the host renders for `import_records[idx]`.
  Import(usize),
}

#[derive(Debug, Clone)]
pub struct Edit {
  pub span: Span,
  pub replacement: Replacement,
}

#[derive(Debug, Default)]
pub struct ModuleScan {
  pub import_records: Vec<ImportRecord>,
  pub exports: Vec<LocalExport>,
  /// Sorted by position, never overlapping.
  pub edits: Vec<Edit>,
}

impl ModuleScan {
  /// Applies the edits to `source`, asking `render_import` for the replacement of every import
  /// declaration. It receives the position of the record in `import_records`.
  pub fn render(
    &self,
    source: &str,
    mut render_import: impl FnMut(usize, &ImportRecord) -> String,
  ) -> String {
    let mut output = String::with_capacity(source.len());
    let mut last = 0usize;
    for edit in &self.edits {
      let (start, end) = (edit.span.start as usize, edit.span.end as usize);
      output.push_str(&source[last..start]);
      match &edit.replacement {
        Replacement::Text(text) => output.push_str(text),
        Replacement::Import(idx) => {
          output.push_str(&render_import(*idx, &self.import_records[*idx]));
        }
      }
      last = end;
    }
    output.push_str(&source[last..]);
    output
  }
}
