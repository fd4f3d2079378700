mod args;
mod types;

use std::{sync::Arc, time::Instant};

use ansi_term::Colour;
use args::{EnhanceArgs, InputArgs, OutputArgs, StyleArgs};
use clap::Parser;

use stylepack::{Bundler, BundlerOptions, Output};
use stylepack_plugin_style::{ExtractOption, InjectOption, StylePlugin, StylePluginOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  style: StyleArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

fn style_plugin_options(style: StyleArgs, minimize: bool) -> StylePluginOptions {
  let extract = style.extract.map(|extract| match extract.as_str() {
    "true" => ExtractOption::Auto,
    "false" => ExtractOption::Disabled,
    _ => ExtractOption::Path(extract),
  });

  let inject = if style.no_inject {
    InjectOption::Disabled
  } else {
    InjectOption::Enabled { insert_at: style.insert_at.map(Into::into) }
  };

  StylePluginOptions {
    extract,
    inject: Some(inject),
    source_map: style.source_map.map(Into::into),
    multi_entry: Some(style.multi_entry),
    modules: style.modules.then(|| true.into()),
    named_exports: style.named_exports.then(|| true.into()),
    minimize: Some(minimize),
    ..Default::default()
  }
}

fn print_output_assets(outputs: Vec<Output>) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content_as_bytes().len() as f64 / 1024.0);

    if size.len() > right {
      right = size.len();
    }

    if output.filename().len() > left {
      left = output.filename().len();
    }

    let is_chunk = matches!(output, Output::Chunk(_));
    assets.push((output.filename().to_string(), size, is_chunk));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (filename, size, is_chunk) in assets {
    let asset_type = if is_chunk { "chunk" } else { "asset" };
    let filename_len = filename.len();

    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint("<DIR>/"),
      color.paint(filename),
      "",
      dim.paint(asset_type),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    );
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_env("STYLEPACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Commands::parse();
  let InputArgs { cwd, input } = args.input;
  let input = input.map(|files| files.iter().map(|p| p.to_string_lossy().into()).collect());

  let plugin = match StylePlugin::new(style_plugin_options(args.style, args.enhance.minimize)) {
    Ok(plugin) => plugin,
    Err(error) => {
      println!("{} {}", Colour::Red.paint("Error:"), error);
      return;
    }
  };

  let mut bundler = Bundler::new(
    BundlerOptions {
      input,
      cwd,
      entry_filenames: args.output.entry_filenames,
      dir: args.output.dir,
      file: args.output.file,
    },
    vec![Arc::new(plugin)],
  );

  let start = Instant::now();
  match bundler.write().await {
    Ok(output) => {
      if !args.enhance.silent {
        // Print warnings
        for warning in output.warnings {
          println!("{} {}", Colour::Yellow.paint("Warning:"), warning);
        }

        // Print output assets
        if !output.assets.is_empty() {
          print_output_assets(output.assets);
        }
      }

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
    }
    Err(errors) => {
      for error in &*errors {
        println!("{} {}", Colour::Red.paint("Error:"), error);
      }
    }
  }
}
