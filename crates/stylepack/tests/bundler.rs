mod common;

use common::Fixture;
use stylepack::{Bundler, BundlerOptions, InputItem, Output};

async fn generate(
  fixture: &Fixture,
  options: BundlerOptions,
) -> stylepack::BuildResult<Vec<Output>> {
  let mut bundler =
    Bundler::new(BundlerOptions { cwd: Some(fixture.path().to_path_buf()), ..options }, vec![]);
  bundler.generate().await.map(|output| output.assets)
}

fn input(items: &[&str]) -> Option<Vec<InputItem>> {
  Some(items.iter().map(|item| (*item).into()).collect())
}

#[tokio::test]
async fn renders_modules_in_execution_order() {
  let fixture = Fixture::new(&[
    ("src/main.js", "import { a } from './a.js';\nimport b from './b.js';\nexport const sum = a + b;\n"),
    ("src/a.js", "import './shared.js';\nexport const a = 1;\n"),
    ("src/b.js", "import './shared.js';\nexport default 2;\n"),
    ("src/shared.js", "export var shared = true;\n"),
  ]);
  let assets =
    generate(&fixture, BundlerOptions { input: input(&["./src/main.js"]), ..Default::default() })
      .await
      .unwrap();

  let chunk = assets[0].as_chunk().unwrap();
  assert_eq!(chunk.filename.as_str(), "main.js");
  let order = chunk.module_ids.iter().map(|id| id.stabilize(fixture.path())).collect::<Vec<_>>();
  assert_eq!(order, vec!["src/shared.js", "src/a.js", "src/b.js", "src/main.js"]);

  let code = &chunk.code;
  assert!(code.contains("var a = __module_1.a;\nvar b = __module_2[\"default\"];"));
  assert!(code.contains("return { __proto__: null, sum: sum };"));
  assert!(code.ends_with("module.exports = __module_3;\n"));
}

#[tokio::test]
async fn names_entries_uniquely() {
  let fixture = Fixture::new(&[
    ("src/index.js", "export default 1;\n"),
    ("lib/index.js", "export default 2;\n"),
    ("lib/other.js", "export default 3;\n"),
  ]);
  let assets = generate(
    &fixture,
    BundlerOptions {
      input: Some(vec![
        "./src/index.js".into(),
        "./lib/index.js".into(),
        InputItem::named("custom", "./lib/other.js"),
      ]),
      ..Default::default()
    },
  )
  .await
  .unwrap();

  let filenames = assets.iter().map(Output::filename).collect::<Vec<_>>();
  assert_eq!(filenames, vec!["custom.js", "index.js", "index2.js"]);
}

#[tokio::test]
async fn hashed_file_names_are_stable() {
  let fixture = Fixture::new(&[("src/index.js", "export default 1;\n")]);
  let options = || BundlerOptions {
    input: input(&["./src/index.js"]),
    entry_filenames: Some("[name]-[hash:10].js".to_string()),
    ..Default::default()
  };

  let first = generate(&fixture, options()).await.unwrap();
  let second = generate(&fixture, options()).await.unwrap();
  assert_eq!(first[0].filename(), second[0].filename());
  assert_eq!(first[0].filename().len(), "index-".len() + 10 + ".js".len());
}

#[tokio::test]
async fn reports_circular_dependencies() {
  let fixture = Fixture::new(&[
    ("src/a.js", "import './b.js';\nexport default 'a';\n"),
    ("src/b.js", "import './a.js';\nexport default 'b';\n"),
  ]);
  let mut bundler = Bundler::new(
    BundlerOptions {
      cwd: Some(fixture.path().to_path_buf()),
      input: input(&["./src/a.js"]),
      ..Default::default()
    },
    vec![],
  );
  let output = bundler.generate().await.unwrap();

  let warnings = output.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
  assert_eq!(warnings, vec!["Circular dependency: src/a.js -> src/b.js -> src/a.js"]);
}

#[tokio::test]
async fn unresolved_import_fails() {
  let fixture = Fixture::new(&[("src/index.js", "import './missing.css';\n")]);
  let errors =
    generate(&fixture, BundlerOptions { input: input(&["./src/index.js"]), ..Default::default() })
      .await
      .unwrap_err();
  let message = errors[0].to_string();
  assert!(message.starts_with("Could not resolve \"./missing.css\" from \"src/index.js\""));
}

#[tokio::test]
async fn rejects_invalid_options() {
  let fixture = Fixture::new(&[("a.js", ""), ("b.js", "")]);

  let errors = generate(&fixture, BundlerOptions::default()).await.unwrap_err();
  assert!(errors[0].to_string().contains("options.input"));

  let errors = generate(
    &fixture,
    BundlerOptions {
      input: input(&["./a.js", "./b.js"]),
      file: Some("bundle.js".to_string()),
      ..Default::default()
    },
  )
  .await
  .unwrap_err();
  assert!(errors[0].to_string().contains("\"file\""));
}

#[tokio::test]
async fn write_creates_output_dir() {
  let fixture = Fixture::new(&[("src/index.js", "export default 1;\n")]);
  let mut bundler = Bundler::new(
    BundlerOptions {
      cwd: Some(fixture.path().to_path_buf()),
      input: input(&["./src/index.js"]),
      dir: Some("out/js".to_string()),
      ..Default::default()
    },
    vec![],
  );
  bundler.write().await.unwrap();
  assert!(fixture.read("out/js/index.js").contains("module.exports = __module_0;"));
}
