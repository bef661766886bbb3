//! C# source scanning for serializable component fields.
//!
//! The check is deliberately shallow: a class is a component only when its own
//! base list names one of the recognized capabilities. `class Boss : Enemy` is
//! not detected even if `Enemy : MonoBehaviour`.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::types::ClassScan;
use crate::config::Config;
use crate::core::error::{AnalysisError, AnalysisResult};

/// Closed sets of names that drive class and field selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRules {
    /// Base types that make a class a component.
    pub base_classes: Vec<String>,
    /// Attribute name fragments that opt a non-public field in.
    pub serialize_markers: Vec<String>,
    /// Attribute name fragments that opt any field out. Beats everything else.
    pub non_serialized_markers: Vec<String>,
}

impl Default for SchemaRules {
    fn default() -> Self {
        Self {
            base_classes: vec!["MonoBehaviour".to_string(), "ScriptableObject".to_string()],
            serialize_markers: vec!["SerializeField".to_string()],
            non_serialized_markers: vec!["NonSerialized".to_string()],
        }
    }
}

impl SchemaRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_classes: config.base_classes.clone(),
            serialize_markers: config.serialize_markers.clone(),
            non_serialized_markers: config.non_serialized_markers.clone(),
        }
    }

    fn is_capability(&self, base_type: &str) -> bool {
        self.base_classes.iter().any(|b| b == base_type)
    }

    fn is_serialize_marker(&self, attribute: &str) -> bool {
        self.serialize_markers
            .iter()
            .any(|m| attribute.contains(m.as_str()))
    }

    fn is_non_serialized_marker(&self, attribute: &str) -> bool {
        self.non_serialized_markers
            .iter()
            .any(|m| attribute.contains(m.as_str()))
    }
}

/// Scan one C# file for component classes and their serializable fields.
///
/// Returns an empty [`ClassScan`] when the file declares no component. Syntax
/// errors inside the file do not fail the scan; tree-sitter recovers and the
/// well-formed classes are still reported.
pub fn collect_schema(source: &str, path: &Path, rules: &SchemaRules) -> AnalysisResult<ClassScan> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_c_sharp::LANGUAGE.into())?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalysisError::SourceParse {
            path: path.to_path_buf(),
            message: "no syntax tree produced".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!(path = %path.display(), "C# source has syntax errors, scanning recovered tree");
    }

    let mut scan = ClassScan::default();
    visit_classes(root, source.as_bytes(), rules, &mut scan);
    Ok(scan)
}

fn visit_classes(node: Node, src: &[u8], rules: &SchemaRules, scan: &mut ClassScan) {
    if node.kind() == "class_declaration" && extends_capability(node, src, rules) {
        if let Some(name) = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(src).ok())
        {
            scan.class_names.push(name.to_string());
        }
        collect_fields(node, src, rules, scan);
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit_classes(child, src, rules, scan);
    }
}

fn extends_capability(class: Node, src: &[u8], rules: &SchemaRules) -> bool {
    let mut cursor = class.walk();
    let Some(bases) = class
        .named_children(&mut cursor)
        .find(|c| c.kind() == "base_list")
    else {
        return false;
    };

    let mut cursor = bases.walk();
    let found = bases
        .named_children(&mut cursor)
        .filter_map(|b| b.utf8_text(src).ok())
        .any(|text| rules.is_capability(base_type_token(text)));
    found
}

/// `UnityEngine.MonoBehaviour` → `MonoBehaviour`, `Base<T>` → `Base`.
fn base_type_token(text: &str) -> &str {
    let without_generics = text.split('<').next().unwrap_or(text);
    let last = without_generics
        .rsplit(['.', ':'])
        .next()
        .unwrap_or(without_generics);
    last.trim()
}

fn collect_fields(class: Node, src: &[u8], rules: &SchemaRules, scan: &mut ClassScan) {
    let body = class.child_by_field_name("body").or_else(|| {
        let mut cursor = class.walk();
        let body = class
            .named_children(&mut cursor)
            .find(|c| c.kind() == "declaration_list");
        body
    });
    let Some(body) = body else {
        return;
    };

    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        if member.kind() != "field_declaration" {
            continue;
        }
        if !is_serialized(member, src, rules) {
            continue;
        }
        collect_declarators(member, src, scan);
    }
}

fn is_serialized(field: Node, src: &[u8], rules: &SchemaRules) -> bool {
    let mut is_public = false;
    let mut marked = false;

    let mut cursor = field.walk();
    for child in field.named_children(&mut cursor) {
        match child.kind() {
            "modifier" => {
                if child.utf8_text(src).map(str::trim) == Ok("public") {
                    is_public = true;
                }
            }
            "attribute_list" => {
                for attribute in attribute_names(child, src) {
                    if rules.is_non_serialized_marker(attribute) {
                        return false;
                    }
                    if rules.is_serialize_marker(attribute) {
                        marked = true;
                    }
                }
            }
            _ => {}
        }
    }

    is_public || marked
}

fn attribute_names<'a>(list: Node, src: &'a [u8]) -> Vec<&'a str> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|c| c.kind() == "attribute")
        .filter_map(|attribute| {
            attribute
                .child_by_field_name("name")
                .unwrap_or(attribute)
                .utf8_text(src)
                .ok()
        })
        .collect()
}

fn collect_declarators(field: Node, src: &[u8], scan: &mut ClassScan) {
    let mut cursor = field.walk();
    let Some(declaration) = field
        .named_children(&mut cursor)
        .find(|c| c.kind() == "variable_declaration")
    else {
        return;
    };

    let Some(declared_type) = declaration
        .child_by_field_name("type")
        .and_then(|t| t.utf8_text(src).ok())
    else {
        return;
    };
    let declared_type = declared_type.trim();

    let mut cursor = declaration.walk();
    for declarator in declaration.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        if let Some(name) = declarator_name(declarator, src) {
            scan.push_field(name, declared_type);
        }
    }
}

fn declarator_name<'a>(declarator: Node, src: &'a [u8]) -> Option<&'a str> {
    let name = declarator.child_by_field_name("name").or_else(|| {
        let mut cursor = declarator.walk();
        let ident = declarator
            .named_children(&mut cursor)
            .find(|c| c.kind() == "identifier");
        ident
    })?;
    name.utf8_text(src).ok()
}
