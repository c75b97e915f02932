use serde::Deserialize;

/// One parameter of an ABI entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Param {
    /// Declared name, `None` when missing or empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// ABI entry, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiEntry {
    Function {
        name: String,
        #[serde(default)]
        inputs: Vec<Param>,
        #[serde(default)]
        outputs: Vec<Param>,
    },
    Event {
        name: String,
        #[serde(default)]
        inputs: Vec<Param>,
    },
    Error {
        name: String,
        #[serde(default)]
        inputs: Vec<Param>,
    },
    Constructor {
        #[serde(default)]
        inputs: Vec<Param>,
    },
    Fallback {},
    Receive {},
    #[serde(other)]
    Unknown,
}

impl AbiEntry {
    pub fn constructor_inputs(&self) -> Option<&[Param]> {
        match self {
            AbiEntry::Constructor { inputs } => Some(inputs.as_slice()),
            _ => None,
        }
    }
}

/// Ordered constructor parameters. Empty means the constructor takes no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorSignature {
    pub params: Vec<Param>,
}

impl ConstructorSignature {
    /// First constructor entry of `abi`; an ABI without one yields an empty signature.
    pub fn from_abi(abi: &[AbiEntry]) -> Self {
        let params = abi
            .iter()
            .find_map(AbiEntry::constructor_inputs)
            .map(<[Param]>::to_vec)
            .unwrap_or_default();
        Self { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
