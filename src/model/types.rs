//! Object references shared by the bucket model and the wire model.

use serde::{Deserialize, Serialize};

/// Reference to a catalog object (display form, fact, metric, data set).
///
/// Serializes as `{"identifier": "..."}` or `{"uri": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjRef {
    Identifier(String),
    Uri(String),
}

impl ObjRef {
    pub fn identifier(id: impl Into<String>) -> Self {
        Self::Identifier(id.into())
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    /// The identifier or URI string, whichever this reference carries.
    pub fn as_str(&self) -> &str {
        match self {
            ObjRef::Identifier(s) | ObjRef::Uri(s) => s,
        }
    }
}

/// Reference that may point either into the current definition (by local
/// identifier) or out to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjRefInScope {
    #[serde(rename_all = "camelCase")]
    Local { local_identifier: String },
    Object(ObjRef),
}

impl ObjRefInScope {
    pub fn local(local_identifier: impl Into<String>) -> Self {
        Self::Local {
            local_identifier: local_identifier.into(),
        }
    }
}

impl From<ObjRef> for ObjRefInScope {
    fn from(value: ObjRef) -> Self {
        Self::Object(value)
    }
}
