//! The extension → grammar registry.
//!
//! Each entry carries the tree-sitter language, the set of node kinds
//! treated as top-level declarations, and the naming rule used to derive
//! a declaration's identity.

use tree_sitter::Language;

/// How a declaration node's name is extracted for a given language family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameRule {
    /// `name` field, else the first identifier/type_identifier child.
    Default,
    /// Go: receiver-qualified methods (`(*Type).Method`) and type specs.
    Go,
    /// JS/TS: variable declarators, export statements, imports.
    Js,
    /// C/C++: the identifier lives inside the declarator.
    C,
}

/// A registered language: everything the structural differ needs to turn
/// source bytes into a declaration set.
pub struct Grammar {
    /// Short language name, used in log events.
    pub name: &'static str,
    /// The tree-sitter language for this grammar.
    pub language: Language,
    /// Root-level node kinds that count as declarations.
    pub declaration_kinds: &'static [&'static str],
    /// The naming rule for declaration identity.
    pub name_rule: NameRule,
}

impl Grammar {
    /// Look up the grammar for a file path by extension (case-insensitive).
    ///
    /// Returns `None` for extensions with no registered grammar; callers
    /// fall back to a unified diff in that case.
    pub fn for_path(path: &str) -> Option<Grammar> {
        let ext = std::path::Path::new(path)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        let grammar = match ext.as_str() {
            "go" => Grammar {
                name: "go",
                language: tree_sitter_go::LANGUAGE.into(),
                declaration_kinds: &[
                    "function_declaration",
                    "method_declaration",
                    "type_declaration",
                    "var_declaration",
                    "const_declaration",
                    "import_declaration",
                    "package_clause",
                ],
                name_rule: NameRule::Go,
            },
            "py" => Grammar {
                name: "python",
                language: tree_sitter_python::LANGUAGE.into(),
                declaration_kinds: &[
                    "function_definition",
                    "class_definition",
                    "import_statement",
                    "import_from_statement",
                ],
                name_rule: NameRule::Default,
            },
            "js" | "mjs" | "cjs" => Grammar {
                name: "javascript",
                language: tree_sitter_javascript::LANGUAGE.into(),
                declaration_kinds: &[
                    "function_declaration",
                    "class_declaration",
                    "export_statement",
                    "import_statement",
                    "lexical_declaration",
                    "variable_declaration",
                ],
                name_rule: NameRule::Js,
            },
            "ts" => Grammar {
                name: "typescript",
                language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                declaration_kinds: TS_DECLARATION_KINDS,
                name_rule: NameRule::Js,
            },
            "tsx" | "jsx" => Grammar {
                name: "tsx",
                language: tree_sitter_typescript::LANGUAGE_TSX.into(),
                declaration_kinds: TS_DECLARATION_KINDS,
                name_rule: NameRule::Js,
            },
            "rb" => Grammar {
                name: "ruby",
                language: tree_sitter_ruby::LANGUAGE.into(),
                declaration_kinds: &["method", "class", "module"],
                name_rule: NameRule::Default,
            },
            "rs" => Grammar {
                name: "rust",
                language: tree_sitter_rust::LANGUAGE.into(),
                declaration_kinds: &[
                    "function_item",
                    "struct_item",
                    "enum_item",
                    "impl_item",
                    "trait_item",
                    "mod_item",
                    "use_declaration",
                    "type_item",
                    "const_item",
                    "static_item",
                ],
                name_rule: NameRule::Default,
            },
            "java" => Grammar {
                name: "java",
                language: tree_sitter_java::LANGUAGE.into(),
                declaration_kinds: &[
                    "class_declaration",
                    "method_declaration",
                    "interface_declaration",
                    "enum_declaration",
                    "import_declaration",
                    "package_declaration",
                    "constructor_declaration",
                ],
                name_rule: NameRule::Default,
            },
            "c" | "h" => Grammar {
                name: "c",
                language: tree_sitter_c::LANGUAGE.into(),
                declaration_kinds: &[
                    "function_definition",
                    "declaration",
                    "preproc_include",
                    "preproc_def",
                    "struct_specifier",
                    "enum_specifier",
                    "type_definition",
                ],
                name_rule: NameRule::C,
            },
            "cpp" | "hpp" | "cc" | "cxx" => Grammar {
                name: "cpp",
                language: tree_sitter_cpp::LANGUAGE.into(),
                declaration_kinds: &[
                    "function_definition",
                    "declaration",
                    "preproc_include",
                    "preproc_def",
                    "struct_specifier",
                    "enum_specifier",
                    "class_specifier",
                    "type_definition",
                    "namespace_definition",
                    "template_declaration",
                ],
                name_rule: NameRule::C,
            },
            _ => return None,
        };
        Some(grammar)
    }

    /// Returns `true` if `kind` counts as a declaration in this grammar.
    pub fn is_declaration_kind(&self, kind: &str) -> bool {
        self.declaration_kinds.contains(&kind)
    }
}

/// TypeScript and TSX share one declaration-kind table.
const TS_DECLARATION_KINDS: &[&str] = &[
    "function_declaration",
    "class_declaration",
    "export_statement",
    "import_statement",
    "lexical_declaration",
    "variable_declaration",
    "interface_declaration",
    "type_alias_declaration",
    "enum_declaration",
];
