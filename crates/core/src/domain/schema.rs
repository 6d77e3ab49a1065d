// Data Source Schema

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Must be set by the caller
    Required,
    /// May be set by the caller
    Optional,
    /// Filled in by the data source
    Computed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttribute {
    pub name: String,
    pub description: String,
    pub kind: AttributeKind,
}

impl SchemaAttribute {
    fn new(name: &str, kind: AttributeKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceSchema {
    pub description: String,
    pub attributes: Vec<SchemaAttribute>,
}

impl DataSourceSchema {
    /// Schema of the command data source
    pub fn command() -> Self {
        use AttributeKind::{Computed, Optional, Required};

        Self {
            description: "Executes a local command, just like `local-exec`, and returns its output."
                .to_string(),
            attributes: vec![
                SchemaAttribute::new("command", Required, "The command to execute."),
                SchemaAttribute::new(
                    "working_dir",
                    Optional,
                    "Working directory of the program. Defaults to the current directory.",
                ),
                SchemaAttribute::new(
                    "output",
                    Computed,
                    "The standard output of the executed command.",
                ),
                SchemaAttribute::new(
                    "error",
                    Computed,
                    "The standard error output of the executed command.",
                ),
                SchemaAttribute::new(
                    "id",
                    Computed,
                    "The ID of the data source, always set to `-`.",
                ),
            ],
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&SchemaAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
