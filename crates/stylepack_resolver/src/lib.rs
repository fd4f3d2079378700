// An wrapper around the `oxc_resolver` crate to provide a more stylepack-specific API.

mod resolver;

pub use crate::resolver::Resolver;

pub use oxc_resolver::ResolveError;
