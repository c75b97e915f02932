pub mod abi;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use abi::{AbiEntry, ConstructorSignature, Param};

const BUILD_INFO_DIR: &str = "build-info";
const DEBUG_SUFFIX: &str = ".dbg.json";

/// Compiled contract as stored by Hardhat under `artifacts/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    pub abi: Vec<AbiEntry>,
}

impl Artifact {
    pub fn constructor(&self) -> ConstructorSignature {
        ConstructorSignature::from_abi(&self.abi)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("artifact for contract `{0}` not found")]
    NotFound(String),
    #[error("several contracts named `{name}`; use a fully qualified name: {}", .candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait ArtifactStore {
    /// Loads the artifact for a bare contract name (`MockERC20`) or a fully
    /// qualified one (`contracts/mocks/MockERC20.sol:MockERC20`).
    fn read_artifact(&self, name: &str) -> Result<Artifact, ArtifactError>;
}

/// Hardhat `artifacts/` directory: `<source path>/<Contract>.json`.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find_by_name(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        let file_name = format!("{}.json", name);
        let mut matches = Vec::new();
        collect_matches(&self.root, &file_name, &mut matches)?;
        matches.sort();

        match matches.len() {
            0 => Err(ArtifactError::NotFound(name.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_string(),
                candidates: matches.iter().map(|p| self.qualified_name(p)).collect(),
            }),
        }
    }

    /// `<root>/contracts/A.sol/A.json` -> `contracts/A.sol:A`.
    fn qualified_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let source = relative
            .parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        let contract = relative
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}:{}", source, contract)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn read_artifact(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let path = match name.rsplit_once(':') {
            Some((source, contract)) => {
                let path = self.root.join(source).join(format!("{}.json", contract));
                if !path.is_file() {
                    return Err(ArtifactError::NotFound(name.to_string()));
                }
                path
            }
            None => self.find_by_name(name)?,
        };
        tracing::debug!("reading artifact {:?}", path);

        let raw = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ArtifactError::Malformed { path, source })
    }
}

fn collect_matches(dir: &Path, file_name: &str, out: &mut Vec<PathBuf>) -> Result<(), ArtifactError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(ArtifactError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let entry_name = entry.file_name();
        let entry_name = entry_name.to_string_lossy();

        if path.is_dir() {
            if entry_name != BUILD_INFO_DIR {
                collect_matches(&path, file_name, out)?;
            }
        } else if entry_name == file_name && !entry_name.ends_with(DEBUG_SUFFIX) {
            out.push(path);
        }
    }
    Ok(())
}
