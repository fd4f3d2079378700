use oxc::{
  allocator::Allocator,
  ast::ast::{
    Declaration, ExportDefaultDeclarationKind, ImportDeclarationSpecifier, ModuleExportName,
    Statement,
  },
  parser::Parser,
  span::{GetSpan, SourceType, Span},
};
use oxc_ecmascript::BoundNames;
use stylepack_error::BuildResult;

use crate::module_scan::{
  Edit, ImportBinding, ImportRecord, LocalExport, ModuleScan, Replacement, DEFAULT_EXPORT_LOCAL,
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Collects the static imports and local exports of an ES module, along with the edits that turn
  /// it into plain statements of a function body.
  pub fn scan(source: &str, id: &str) -> BuildResult<ModuleScan> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
    if !ret.errors.is_empty() {
      let errors = ret
        .errors
        .into_iter()
        .map(|error| anyhow::anyhow!("Failed to parse {id}: {error}"))
        .collect::<Vec<_>>();
      Err(errors)?;
    }

    let mut scan = ModuleScan::default();
    let mut errors = vec![];

    for stmt in &ret.program.body {
      match stmt {
        Statement::ImportDeclaration(decl) => {
          let mut bindings = vec![];
          for specifier in decl.specifiers.iter().flatten() {
            bindings.push(match specifier {
              ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                ImportBinding::Default { local: s.local.name.to_string() }
              }
              ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                ImportBinding::Namespace { local: s.local.name.to_string() }
              }
              ImportDeclarationSpecifier::ImportSpecifier(s) => ImportBinding::Named {
                imported: module_export_name(&s.imported),
                local: s.local.name.to_string(),
              },
            });
          }
          scan.edits.push(Edit {
            span: decl.span,
            replacement: Replacement::Import(scan.import_records.len()),
          });
          scan.import_records.push(ImportRecord {
            specifier: decl.source.value.to_string(),
            bindings,
            span: decl.span,
          });
        }
        Statement::ExportNamedDeclaration(decl) => {
          if decl.source.is_some() {
            errors.push(anyhow::anyhow!(
              "Re-exporting from another module is not supported in {id}"
            ));
            continue;
          }
          if let Some(declaration) = &decl.declaration {
            if matches!(
              declaration,
              Declaration::VariableDeclaration(_)
                | Declaration::FunctionDeclaration(_)
                | Declaration::ClassDeclaration(_)
            ) {
              declaration.bound_names(&mut |ident| {
                scan.exports.push(LocalExport {
                  exported: ident.name.to_string(),
                  local: ident.name.to_string(),
                });
              });
            }
            // Drop the `export` keyword, keep the declaration.
            scan.edits.push(Edit {
              span: Span::new(decl.span.start, declaration.span().start),
              replacement: Replacement::Text(String::new()),
            });
          } else {
            for specifier in &decl.specifiers {
              scan.exports.push(LocalExport {
                exported: module_export_name(&specifier.exported),
                local: module_export_name(&specifier.local),
              });
            }
            scan.edits.push(Edit { span: decl.span, replacement: Replacement::Text(String::new()) });
          }
        }
        Statement::ExportDefaultDeclaration(decl) => {
          let named_declaration = match &decl.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => func.id.as_ref(),
            ExportDefaultDeclarationKind::ClassDeclaration(class) => class.id.as_ref(),
            _ => None,
          };
          let value_start = decl.declaration.span().start;
          let (local, replacement) = match named_declaration {
            Some(ident) => (ident.name.to_string(), String::new()),
            None => (DEFAULT_EXPORT_LOCAL.to_string(), format!("var {DEFAULT_EXPORT_LOCAL} = ")),
          };
          scan.exports.push(LocalExport { exported: "default".to_string(), local });
          scan.edits.push(Edit {
            span: Span::new(decl.span.start, value_start),
            replacement: Replacement::Text(replacement),
          });
        }
        Statement::ExportAllDeclaration(_) => {
          errors.push(anyhow::anyhow!("`export * from` is not supported in {id}"));
        }
        _ => {}
      }
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    scan.edits.sort_by_key(|edit| edit.span.start);
    Ok(scan)
  }
}

fn module_export_name(name: &ModuleExportName) -> String {
  name.name().to_string()
}

#[cfg(test)]
mod tests {
  use super::EcmaCompiler;
  use crate::{ImportBinding, LocalExport, DEFAULT_EXPORT_LOCAL};

  #[test]
  fn scans_imports_and_exports() {
    let source = "import style, { locals as l } from './a.css';\nimport * as ns from './b.js';\nimport './c.css';\nexport const a = 1, b = 2;\nexport function run() {}\nconst c = 3;\nexport { c as 'd' };\nexport default style;\n";
    let scan = EcmaCompiler::scan(source, "index.js").unwrap();

    assert_eq!(scan.import_records.len(), 3);
    assert_eq!(scan.import_records[0].specifier, "./a.css");
    assert_eq!(
      scan.import_records[0].bindings,
      vec![
        ImportBinding::Default { local: "style".to_string() },
        ImportBinding::Named { imported: "locals".to_string(), local: "l".to_string() },
      ]
    );
    assert_eq!(
      scan.import_records[1].bindings,
      vec![ImportBinding::Namespace { local: "ns".to_string() }]
    );
    assert!(scan.import_records[2].bindings.is_empty());

    let exported = scan.exports.iter().map(|e| e.exported.as_str()).collect::<Vec<_>>();
    assert_eq!(exported, vec!["a", "b", "run", "d", "default"]);
    assert_eq!(
      scan.exports.last(),
      Some(&LocalExport { exported: "default".to_string(), local: DEFAULT_EXPORT_LOCAL.to_string() })
    );
  }

  #[test]
  fn renders_module_body() {
    let source = "import x from './x.css';\nexport const a = x;\nexport default function main() {}\n";
    let scan = EcmaCompiler::scan(source, "index.js").unwrap();
    let code = scan.render(source, |_, record| format!("/* {} */", record.specifier));
    assert_eq!(code, "/* ./x.css */\nconst a = x;\nfunction main() {}\n");

    let source = "export default 'a' + 'b';\n";
    let scan = EcmaCompiler::scan(source, "index.js").unwrap();
    let code = scan.render(source, |_, _| String::new());
    assert_eq!(code, format!("var {DEFAULT_EXPORT_LOCAL} = 'a' + 'b';\n"));
  }

  #[test]
  fn reports_syntax_errors() {
    let errors = EcmaCompiler::scan("export default {", "broken.js").unwrap_err();
    assert!(errors[0].to_string().starts_with("Failed to parse broken.js"));
    assert!(EcmaCompiler::scan("export * from './a.js'", "a.js").is_err());
  }
}
