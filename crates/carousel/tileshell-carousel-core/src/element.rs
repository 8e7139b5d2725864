use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use tileshell_motion_core::ElementId;

pub const ATTR_HEADER: &str = "header";

/// One page of a carousel: the host element plus what it carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildItem {
    pub element: ElementId,
    /// Opaque payload echoed back in selection events.
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl ChildItem {
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            data: serde_json::Value::Null,
            attributes: HashMap::new(),
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Pivot header label.
    pub fn header(&self) -> Option<&str> {
        self.attribute(ATTR_HEADER)
    }
}
