// src/model/attribute.rs
use serde::{Deserialize, Serialize};

use crate::model::types::ObjRef;

/// A categorical display-form reference placed into a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Stable identifier within one definition
    pub local_identifier: String,
    pub display_form: ObjRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Attribute {
    pub fn new(local_identifier: impl Into<String>, display_form: ObjRef) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            display_form,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}
