use std::io::{self, Write};

use crate::artifacts::{ArtifactError, ArtifactStore, ConstructorSignature};
use crate::config::ConfigError;

const UNNAMED: &str = "(unnamed)";

#[derive(thiserror::Error, Debug)]
pub enum InspectError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Prints the constructor parameters of `name`, one `- <name>: <type>` line
/// each, or a single no-arguments notice.
pub fn write_constructor<S, W>(store: &S, name: Option<&str>, out: &mut W) -> Result<(), InspectError>
where
    S: ArtifactStore + ?Sized,
    W: Write,
{
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ConfigError::MissingContractName)?;

    let artifact = store.read_artifact(name)?;
    let signature = artifact.constructor();
    if signature.is_empty() {
        writeln!(out, "Constructor of {}: no arguments.", name)?;
        return Ok(());
    }

    tracing::info!("Constructor of {}:", name);
    render_params(&signature, out)?;
    Ok(())
}

fn render_params<W: Write>(signature: &ConstructorSignature, out: &mut W) -> io::Result<()> {
    for param in &signature.params {
        writeln!(
            out,
            "- {}: {}",
            param.display_name().unwrap_or(UNNAMED),
            param.kind
        )?;
    }
    Ok(())
}
