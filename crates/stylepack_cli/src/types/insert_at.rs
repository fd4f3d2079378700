use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
pub enum InsertAt {
  Top,
  Bottom,
}

impl From<InsertAt> for stylepack_plugin_style::InsertAt {
  fn from(value: InsertAt) -> Self {
    match value {
      InsertAt::Top => stylepack_plugin_style::InsertAt::Top,
      InsertAt::Bottom => stylepack_plugin_style::InsertAt::Bottom,
    }
  }
}
