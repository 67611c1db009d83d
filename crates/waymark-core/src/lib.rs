#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod adapter;
pub mod config;
pub mod error;
pub mod resolver;
pub mod version;

pub use adapter::{
    BundlerAliasResolver, FsHostResolver, HostResolveOptions, HostResolver, ImporterChain,
    ImporterResult, LegacyImporter, ResolvedId,
};
pub use config::{Config, ResolveConfig};
pub use error::Error;
pub use resolver::{
    alias_table, Alias, AliasRule, CandidateResolver, ExclusionSet, Merge, PossibleResolution,
    SharedResolver,
};
pub use version::VERSION;
