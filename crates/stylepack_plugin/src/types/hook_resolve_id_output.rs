#[derive(Debug, Default)]
pub struct HookResolveIdOutput {
  pub id: String,
}
