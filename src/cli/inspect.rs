use anyhow::{Context, Error as AnyError};
use log::{debug, info};
use mmd_pmx::{resolve, try_resolve, Pmx};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct InspectOptions {
    /// Print the whole model as JSON instead of a summary.
    pub json: bool,
    /// Panic on a malformed file instead of reporting it.
    pub strict: bool,
}

pub fn inspect(input: impl AsRef<Path>, options: InspectOptions) -> Result<(), AnyError> {
    let input = input.as_ref();
    info!("inspecting `{}`.", input.display());

    let buf = std::fs::read(input)
        .with_context(|| format!("failed to read the file `{}`", input.display()))?;
    debug!("read {} bytes.", buf.len());

    let pmx = if options.strict {
        resolve(&buf)
    } else {
        try_resolve(&buf).with_context(|| format!("failed to decode `{}`", input.display()))?
    };

    println!("{}", render(&pmx, options)?);

    Ok(())
}

fn render(pmx: &Pmx, options: InspectOptions) -> Result<String, AnyError> {
    if options.json {
        serde_json::to_string_pretty(pmx).context("failed to serialize the model")
    } else {
        Ok(pmx.to_string())
    }
}
