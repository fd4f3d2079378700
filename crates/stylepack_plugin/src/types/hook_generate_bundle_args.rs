use stylepack_common::{NormalizedBundlerOptions, Output};

#[derive(Debug)]
pub struct HookGenerateBundleArgs<'a> {
  pub options: &'a NormalizedBundlerOptions,
  pub bundle: &'a mut Vec<Output>,
}
