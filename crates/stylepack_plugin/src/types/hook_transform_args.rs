#[derive(Debug)]
pub struct HookTransformArgs<'a> {
  pub id: &'a str,
  /// `id` relative to the working directory, with forward slashes.
  pub stable_id: &'a str,
  pub code: &'a String,
}
