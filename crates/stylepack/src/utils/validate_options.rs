use stylepack_common::NormalizedBundlerOptions;
use stylepack_error::BuildResult;

pub fn validate_options(options: &NormalizedBundlerOptions) -> BuildResult<()> {
  if options.input.is_empty() {
    Err(anyhow::anyhow!("You must supply options.input to stylepack"))?;
  }
  if options.file.is_some() && options.input.len() > 1 {
    Err(anyhow::anyhow!("Invalid value for option \"file\" - When building multiple entries, the \"dir\" option must be used, not \"file\"."))?;
  }
  Ok(())
}
