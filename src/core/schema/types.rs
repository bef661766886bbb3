use std::collections::HashMap;

/// One serializable field as declared in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    /// Type expression exactly as written (`List<int>`, `float[]`, ...).
    pub declared_type: String,
}

/// What the collector found in one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassScan {
    /// In-scope class names, in declaration order.
    pub class_names: Vec<String>,
    /// Serializable fields of those classes; the first declaration of a name wins.
    pub fields: Vec<SchemaField>,
}

impl ClassScan {
    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty()
    }

    pub(crate) fn push_field(&mut self, name: &str, declared_type: &str) {
        if self.fields.iter().any(|f| f.name == name) {
            return;
        }
        self.fields.push(SchemaField {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
        });
    }
}

/// Serializable surface of a component, joined to scenes through its guid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSchema {
    pub guid: String,
    /// Project-relative path of the declaring source file, `/`-separated.
    pub source_path: String,
    pub class_names: Vec<String>,
    pub fields: Vec<SchemaField>,
}

impl ComponentSchema {
    pub fn new(guid: impl Into<String>, source_path: impl Into<String>, scan: ClassScan) -> Self {
        Self {
            guid: guid.into(),
            source_path: source_path.into(),
            class_names: scan.class_names,
            fields: scan.fields,
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn field_type(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.declared_type.as_str())
    }

    /// Display name for reports: the first declared class, or the source path.
    pub fn display_name(&self) -> &str {
        self.class_names
            .first()
            .map(String::as_str)
            .unwrap_or(self.source_path.as_str())
    }
}

/// Frozen guid → schema map. Built once in Phase 1, read-only afterwards.
pub type SchemaMap = HashMap<String, ComponentSchema>;
