use stylepack_common::ModuleId;
use stylepack_error::{BuildError, BuildResult};
use stylepack_plugin::{HookResolveIdArgs, PluginDriver};
use stylepack_resolver::Resolver;

/// Asks the plugins first, then falls back to node-style resolution.
pub fn resolve_id(
  plugin_driver: &PluginDriver,
  resolver: &Resolver,
  specifier: &str,
  importer: Option<&str>,
) -> BuildResult<ModuleId> {
  if let Some(output) = plugin_driver.resolve_id(&HookResolveIdArgs { importer, specifier })? {
    return Ok(ModuleId::new(output.id));
  }

  resolver.resolve(specifier, importer).map_err(|err| {
    let error = match importer {
      Some(importer) => {
        let importer = ModuleId::new(importer).stabilize(resolver.cwd());
        anyhow::anyhow!("Could not resolve \"{specifier}\" from \"{importer}\": {err}")
      }
      None => anyhow::anyhow!("Could not resolve entry module \"{specifier}\": {err}"),
    };
    BuildError::from(error)
  })
}
