//! Adapters exposing the candidate resolvers to host tools.
//!
//! - [`BundlerAliasResolver`]: a bundler's custom resolve hook for aliased
//!   specifiers, trying each candidate through the bundler's own resolver.
//! - [`AliasImporter`] / [`JsonVariablesImporter`]: stylesheet preprocessor
//!   import hooks.
//! - [`FsHostResolver`]: a plain filesystem host resolver for driving the
//!   bundler adapter without a bundler.

mod bundler;
mod host;
mod stylesheet;

pub use bundler::{
    AliasEntry, BundlerAliasResolver, HostResolveOptions, HostResolver, ResolvedId,
};
pub use host::FsHostResolver;
pub use stylesheet::{
    kebab_case, render_variables, AliasImporter, ImporterChain, ImporterResult,
    JsonVariablesImporter, LegacyImporter,
};
