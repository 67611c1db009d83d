use super::{display_paths, load_resolve_config};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;
use waymark_core::adapter::AliasImporter;
use waymark_core::version::SCHEMA_VERSION;
use waymark_core::{BundlerAliasResolver, Config};

#[derive(Debug, Serialize)]
struct CandidatesOutput<'a> {
    schema_version: u32,
    specifier: &'a str,
    kind: &'static str,
    /// `null` when the table declines to answer.
    candidates: Option<Vec<String>>,
}

/// Print the alias table's candidates for `specifier` without asking a host.
pub fn run(
    config: &Config,
    config_path: Option<&Path>,
    specifier: &str,
    style: bool,
    json: bool,
) -> Result<()> {
    let resolve_config = load_resolve_config(config, config_path)?;

    let (kind, candidates) = if style {
        let importer = AliasImporter::new(
            &resolve_config.alias_rules(&config.cwd),
            resolve_config.style_extension(),
        );
        ("style", importer.candidates(specifier))
    } else {
        let resolver =
            BundlerAliasResolver::from_config(&resolve_config, &config.cwd).into_diagnostic()?;
        ("script", resolver.candidates(specifier))
    };

    let output = CandidatesOutput {
        schema_version: SCHEMA_VERSION,
        specifier,
        kind,
        candidates: candidates.as_deref().map(display_paths),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        match &output.candidates {
            None => println!("no answer"),
            Some(list) if list.is_empty() => println!("no candidates"),
            Some(list) => {
                for candidate in list {
                    println!("{candidate}");
                }
            }
        }
    }

    Ok(())
}
