#[derive(Debug, Default)]
pub struct HookTransformOutput {
  pub code: String,
}
