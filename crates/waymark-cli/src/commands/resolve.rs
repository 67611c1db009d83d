use super::{absolutize, display_paths, load_resolve_config};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;
use waymark_core::version::SCHEMA_VERSION;
use waymark_core::{BundlerAliasResolver, Config, FsHostResolver, HostResolveOptions};

#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    schema_version: u32,
    specifier: &'a str,
    /// Whether the specifier went through the alias resolver.
    eligible: bool,
    candidates: Vec<String>,
    id: Option<String>,
    external: bool,
}

/// Run the bundler alias hook against the filesystem host resolver.
///
/// Exits with status 1 if the specifier stays unresolved.
pub fn run(
    config: &Config,
    config_path: Option<&Path>,
    specifier: &str,
    importer: Option<&Path>,
    json: bool,
) -> Result<()> {
    let resolve_config = load_resolve_config(config, config_path)?;
    let resolver =
        BundlerAliasResolver::from_config(&resolve_config, &config.cwd).into_diagnostic()?;
    let host = FsHostResolver::new(&config.cwd);

    let importer = importer.map(|p| absolutize(&config.cwd, p).to_string_lossy().into_owned());

    let eligible = resolver.is_eligible(specifier);
    let candidates = if eligible {
        resolver.candidates(specifier).unwrap_or_default()
    } else {
        Vec::new()
    };

    let resolved = resolver.resolve_id(
        specifier,
        importer.as_deref(),
        &HostResolveOptions::default(),
        &host,
    );

    let output = ResolveOutput {
        schema_version: SCHEMA_VERSION,
        specifier,
        eligible,
        candidates: display_paths(&candidates),
        external: resolved.as_ref().is_some_and(|r| r.external),
        id: resolved.map(|r| r.id),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        for candidate in &output.candidates {
            println!("  candidate: {candidate}");
        }
        match &output.id {
            Some(id) if output.external => println!("{id} (external)"),
            Some(id) => println!("{id}"),
            None => eprintln!("error: cannot resolve '{specifier}'"),
        }
    }

    if output.id.is_none() {
        std::process::exit(1);
    }
    Ok(())
}
