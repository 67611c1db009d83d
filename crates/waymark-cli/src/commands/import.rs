use super::{absolutize, load_resolve_config};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;
use waymark_core::version::SCHEMA_VERSION;
use waymark_core::{Config, ImporterChain, ImporterResult, LegacyImporter};

#[derive(Debug, Serialize)]
struct ImportOutput<'a> {
    schema_version: u32,
    url: &'a str,
    /// `file`, `contents` or `defer`.
    result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<String>,
}

/// Run the stylesheet importer chain on `url` as imported from `prev`.
pub fn run(
    config: &Config,
    config_path: Option<&Path>,
    url: &str,
    prev: &Path,
    json: bool,
) -> Result<()> {
    let resolve_config = load_resolve_config(config, config_path)?;
    let chain = ImporterChain::from_config(&resolve_config, &config.cwd);
    let prev = absolutize(&config.cwd, prev);

    let mut output = ImportOutput {
        schema_version: SCHEMA_VERSION,
        url,
        result: "defer",
        file: None,
        contents: None,
    };

    chain.import_with(url, &prev.to_string_lossy(), |result| match result {
        ImporterResult::File(file) => {
            output.result = "file";
            output.file = Some(file.to_string_lossy().into_owned());
        }
        ImporterResult::Contents(contents) => {
            output.result = "contents";
            output.contents = Some(contents);
        }
        ImporterResult::Defer => {}
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else if let Some(file) = &output.file {
        println!("{file}");
    } else if let Some(contents) = &output.contents {
        println!("{contents}");
    } else {
        println!("defer");
    }

    Ok(())
}
