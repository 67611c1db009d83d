use super::load_resolve_config;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;
use waymark_core::version::SCHEMA_VERSION;
use waymark_core::{BundlerAliasResolver, Config};

#[derive(Debug, Serialize)]
struct AliasOutput {
    alias: String,
    directory: String,
    find: String,
    replacement: String,
}

#[derive(Debug, Serialize)]
struct AliasesOutput {
    schema_version: u32,
    aliases: Vec<AliasOutput>,
    exclude: Vec<String>,
}

/// List alias rules (with absolute targets) and exclusion patterns.
pub fn run(config: &Config, config_path: Option<&Path>, json: bool) -> Result<()> {
    let resolve_config = load_resolve_config(config, config_path)?;
    let resolver =
        BundlerAliasResolver::from_config(&resolve_config, &config.cwd).into_diagnostic()?;

    let aliases = resolver
        .rules()
        .iter()
        .zip(resolver.entries())
        .map(|(rule, entry)| AliasOutput {
            alias: rule.prefix.clone(),
            directory: rule.directory.to_string_lossy().into_owned(),
            find: entry.find.as_str().to_string(),
            replacement: entry.replacement.clone(),
        })
        .collect();

    let output = AliasesOutput {
        schema_version: SCHEMA_VERSION,
        aliases,
        exclude: resolver.exclusions().patterns().map(String::from).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        for alias in &output.aliases {
            println!("{} -> {}", alias.alias, alias.directory);
        }
        if !output.exclude.is_empty() {
            println!("exclude: {}", output.exclude.join(", "));
        }
    }

    Ok(())
}
