mod accumulator;
mod class_name;
mod dedup_merge;
mod emitter;
mod loaders;
mod module_code;
mod options;
mod output_resolver;
mod plugin;
mod runtime;
mod session;
mod transformer;
mod types;

pub use lightningcss::targets::Browsers;

pub use crate::{
  loaders::{CustomLoader, LoaderContext, LoaderResult, ProcessFn},
  options::{
    normalized::NormalizedStylePluginOptions, ExtractInfo, ExtractOption, GetJsonFn, InjectFn,
    InjectOption, InsertAt, ModulesConfig, ModulesOption, NamedExportsFn, NamedExportsOption,
    OnExtractFn, SourceMapOption, StylePluginOptions, UseLoader,
  },
  plugin::StylePlugin,
  runtime::STYLE_INJECT_ID,
  transformer::{
    lightning::LightningTransformer, StyleTransformer, TransformOptions, TransformOutput,
  },
  types::{
    entry_context::{EntryContext, OutputKind},
    extraction_target::ExtractionTarget,
    style_result::{ClassMap, StyleResult},
  },
};
