//! Declaration extraction: parse source and collect named top-level constructs.

use tree_sitter::{Node, Parser};

use crate::error::LangError;
use crate::grammar::{Grammar, NameRule};

/// A named top-level code construct (function, class, type, import, ...).
///
/// Identity is the (kind, name) pair; the source position carries no
/// meaning for diffing. `text` holds the exact source span and is what
/// "modified" comparisons are based on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// The grammar node kind, e.g. `function_declaration`.
    pub kind: String,
    /// The extracted name, receiver-qualified for Go methods.
    pub name: String,
    /// The exact source text of the declaration.
    pub text: String,
}

/// Parse `source` with `grammar` and extract its top-level declarations.
///
/// A tree containing syntax errors is rejected rather than diffed around;
/// callers degrade to a unified diff. Declarations the naming rule cannot
/// name get a synthetic positional name so they still participate in the
/// diff.
pub fn extract_declarations(
    grammar: &Grammar,
    source: &[u8],
) -> Result<Vec<Declaration>, LangError> {
    let mut parser = Parser::new();
    parser.set_language(&grammar.language)?;

    let tree = parser.parse(source, None).ok_or(LangError::Parse)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(LangError::Syntax);
    }

    let mut decls = Vec::new();
    for i in 0..root.child_count() {
        let Some(child) = root.child(i) else { continue };
        let kind = child.kind();
        if !grammar.is_declaration_kind(kind) {
            continue;
        }

        let mut name = extract_name(grammar.name_rule, child, source)?;
        if name.is_empty() {
            name = format!("_{kind}_{i}");
        }

        decls.push(Declaration {
            kind: kind.to_string(),
            name,
            text: child.utf8_text(source)?.to_string(),
        });
    }

    Ok(decls)
}

fn extract_name(rule: NameRule, node: Node<'_>, source: &[u8]) -> Result<String, LangError> {
    match rule {
        NameRule::Default => default_name(node, source),
        NameRule::Go => go_name(node, source),
        NameRule::Js => js_name(node, source),
        NameRule::C => c_name(node, source),
    }
}

/// The `name` field if present, else the first identifier-like child.
fn default_name(node: Node<'_>, source: &[u8]) -> Result<String, LangError> {
    if let Some(name_node) = node.child_by_field_name("name") {
        return Ok(name_node.utf8_text(source)?.to_string());
    }
    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else { continue };
        if child.kind() == "identifier" || child.kind() == "type_identifier" {
            return Ok(child.utf8_text(source)?.to_string());
        }
    }
    Ok(String::new())
}

/// Go naming: methods are qualified by receiver type, type declarations
/// take the name of their type spec.
fn go_name(node: Node<'_>, source: &[u8]) -> Result<String, LangError> {
    match node.kind() {
        "method_declaration" => {
            let Some(name_node) = node.child_by_field_name("name") else {
                return Ok(String::new());
            };
            let name = name_node.utf8_text(source)?;
            match node.child_by_field_name("receiver") {
                Some(receiver) => {
                    let receiver_type = go_receiver_type(receiver, source)?;
                    Ok(format!("({receiver_type}).{name}"))
                }
                None => Ok(name.to_string()),
            }
        }
        "type_declaration" => {
            for i in 0..node.child_count() {
                let Some(child) = node.child(i) else { continue };
                if child.kind() == "type_spec" {
                    if let Some(name_node) = child.child_by_field_name("name") {
                        return Ok(name_node.utf8_text(source)?.to_string());
                    }
                }
            }
            Ok(String::new())
        }
        _ => default_name(node, source),
    }
}

fn go_receiver_type(receiver: Node<'_>, source: &[u8]) -> Result<String, LangError> {
    for i in 0..receiver.child_count() {
        let Some(child) = receiver.child(i) else { continue };
        if child.kind() == "parameter_declaration" {
            if let Some(type_node) = child.child_by_field_name("type") {
                return Ok(type_node.utf8_text(source)?.to_string());
            }
        }
    }
    Ok(receiver.utf8_text(source)?.to_string())
}

/// JS/TS naming: variable declarations use the declarator, exports use the
/// inner declaration, imports use their full text.
fn js_name(node: Node<'_>, source: &[u8]) -> Result<String, LangError> {
    match node.kind() {
        "lexical_declaration" | "variable_declaration" => {
            for i in 0..node.child_count() {
                let Some(child) = node.child(i) else { continue };
                if child.kind() == "variable_declarator" {
                    if let Some(name_node) = child.child_by_field_name("name") {
                        return Ok(name_node.utf8_text(source)?.to_string());
                    }
                }
            }
            Ok(String::new())
        }
        "export_statement" => match node.child_by_field_name("declaration") {
            Some(decl) => js_name(decl, source),
            None => default_name(node, source),
        },
        "import_statement" => Ok(node.utf8_text(source)?.to_string()),
        _ => default_name(node, source),
    }
}

/// C/C++ naming: the function name lives inside the declarator.
fn c_name(node: Node<'_>, source: &[u8]) -> Result<String, LangError> {
    match node.child_by_field_name("declarator") {
        Some(declarator) => find_identifier(declarator, source),
        None => default_name(node, source),
    }
}

/// Depth-first search for the first identifier node.
fn find_identifier(node: Node<'_>, source: &[u8]) -> Result<String, LangError> {
    if node.kind() == "identifier" {
        return Ok(node.utf8_text(source)?.to_string());
    }
    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else { continue };
        let name = find_identifier(child, source)?;
        if !name.is_empty() {
            return Ok(name);
        }
    }
    Ok(String::new())
}
