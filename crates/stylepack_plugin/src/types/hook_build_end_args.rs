#[derive(Debug)]
pub struct HookBuildEndArgs {
  /// Rendered message of the error that aborted the build.
  pub error: String,
}
