use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum SourceMap {
  True,
  Inline,
}

impl From<SourceMap> for stylepack_plugin_style::SourceMapOption {
  fn from(value: SourceMap) -> Self {
    match value {
      SourceMap::True => stylepack_plugin_style::SourceMapOption::Enabled,
      SourceMap::Inline => stylepack_plugin_style::SourceMapOption::Inline,
    }
  }
}
