//! Source structural differ: declaration-level comparison of parsed code.
//!
//! Declarations are matched by identity (kind + name), never by
//! position, so reordering a file's top-level declarations produces no
//! changes. Bodies compare by exact source text.

use std::collections::{BTreeMap, BTreeSet};

use semadiff_lang::{extract_declarations, Declaration, Grammar};
use tracing::debug;

use crate::change::Change;
use crate::unified_diff::unified_diff;
use crate::{fallback_result, DiffFormat, SemanticDiffResult, NO_STRUCTURAL_CHANGES};

/// Produce a declaration-level diff for a recognized source file.
///
/// An unregistered extension yields a plain unified diff; a syntax error
/// on either side degrades with a message, matching the structured-value
/// failure policy.
pub(crate) fn diff_source(path: &str, base: &[u8], head: &[u8]) -> SemanticDiffResult {
    let Some(grammar) = Grammar::for_path(path) else {
        return SemanticDiffResult {
            format: DiffFormat::Unified,
            diff: unified_diff(path, base, head),
            message: None,
        };
    };

    let base_decls = match extract_declarations(&grammar, base) {
        Ok(decls) => decls,
        Err(err) => {
            debug!(path, language = grammar.name, error = %err, "base side failed structural parse");
            return fallback_result(path, base, head, "failed to parse base file");
        }
    };
    let head_decls = match extract_declarations(&grammar, head) {
        Ok(decls) => decls,
        Err(err) => {
            debug!(path, language = grammar.name, error = %err, "head side failed structural parse");
            return fallback_result(path, base, head, "failed to parse head file");
        }
    };

    let changes = diff_declarations(&base_decls, &head_decls);
    if changes.is_empty() {
        return SemanticDiffResult {
            format: DiffFormat::Structural,
            diff: NO_STRUCTURAL_CHANGES.to_string(),
            message: None,
        };
    }

    SemanticDiffResult {
        format: DiffFormat::Structural,
        diff: crate::change::render_changes(&changes),
        message: None,
    }
}

/// Compare two declaration sets by identity, in sorted identity order.
fn diff_declarations(base: &[Declaration], head: &[Declaration]) -> Vec<Change> {
    let base_map = index_declarations(base);
    let head_map = index_declarations(head);

    let keys: BTreeSet<&String> = base_map.keys().chain(head_map.keys()).collect();

    let mut changes = Vec::new();
    for key in keys {
        match (base_map.get(key), head_map.get(key)) {
            (Some(decl), None) => {
                changes.push(Change::removed(identity_label(decl), None));
            }
            (None, Some(decl)) => {
                changes.push(Change::added(identity_label(decl), None));
            }
            (Some(base_decl), Some(head_decl)) => {
                if base_decl.text != head_decl.text {
                    changes.push(Change::modified(identity_label(base_decl), None, None));
                }
            }
            (None, None) => unreachable!("key came from one of the two maps"),
        }
    }

    changes
}

/// Index declarations by `kind:name`. A duplicate identity keeps the
/// last occurrence, mirroring how the sets are built from source order.
fn index_declarations(decls: &[Declaration]) -> BTreeMap<String, &Declaration> {
    decls
        .iter()
        .map(|d| (format!("{}:{}", d.kind, d.name), d))
        .collect()
}

fn identity_label(decl: &Declaration) -> String {
    format!("{} {}", decl.kind, decl.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_go_source_no_structural_changes() {
        let src = b"package main\n\nfunc hello() {}\n";
        let result = diff_source("main.go", src, src);
        assert_eq!(result.format, DiffFormat::Structural);
        assert_eq!(result.diff, NO_STRUCTURAL_CHANGES);
    }

    #[test]
    fn go_function_added() {
        let result = diff_source(
            "main.go",
            b"package main\n\nfunc hello() {}\n",
            b"package main\n\nfunc hello() {}\n\nfunc goodbye() {}\n",
        );
        assert_eq!(result.format, DiffFormat::Structural);
        assert!(result.diff.contains("function_declaration goodbye: added"));
    }

    #[test]
    fn go_function_removed() {
        let result = diff_source(
            "main.go",
            b"package main\n\nfunc hello() {}\n\nfunc goodbye() {}\n",
            b"package main\n\nfunc hello() {}\n",
        );
        assert!(result.diff.contains("function_declaration goodbye: removed"));
    }

    #[test]
    fn go_function_body_edit_is_modified() {
        let result = diff_source(
            "main.go",
            b"package main\n\nfunc hello() {\n\tfmt.Println(\"hello\")\n}\n",
            b"package main\n\nfunc hello() {\n\tfmt.Println(\"world\")\n}\n",
        );
        assert!(result.diff.contains("function_declaration hello: modified"));
    }

    #[test]
    fn reordering_declarations_is_not_a_change() {
        let result = diff_source(
            "main.go",
            b"package main\n\nfunc a() {}\n\nfunc b() {}\n",
            b"package main\n\nfunc b() {}\n\nfunc a() {}\n",
        );
        assert_eq!(result.format, DiffFormat::Structural);
        assert_eq!(result.diff, NO_STRUCTURAL_CHANGES);
    }

    #[test]
    fn go_method_edit_is_receiver_qualified() {
        let result = diff_source(
            "server.go",
            b"package main\n\ntype Server struct{}\n\nfunc (s *Server) Start() {}\n",
            b"package main\n\ntype Server struct{}\n\nfunc (s *Server) Start() {\n\tfmt.Println(\"starting\")\n}\n",
        );
        assert!(result.diff.contains("(*Server).Start: modified"));
    }

    #[test]
    fn go_type_added() {
        let result = diff_source(
            "config.go",
            b"package main\n",
            b"package main\n\ntype Config struct {\n\tHost string\n}\n",
        );
        assert!(result.diff.contains("type_declaration Config: added"));
    }

    #[test]
    fn whitespace_only_body_edit_counts_as_modified() {
        // Body text equality is exact, not formatting-normalized.
        let result = diff_source(
            "main.go",
            b"package main\n\nfunc hello() { return }\n",
            b"package main\n\nfunc hello() {  return }\n",
        );
        assert!(result.diff.contains("function_declaration hello: modified"));
    }

    #[test]
    fn python_function_added() {
        let result = diff_source(
            "app.py",
            b"def hello():\n    pass\n",
            b"def hello():\n    pass\n\ndef goodbye():\n    pass\n",
        );
        assert_eq!(result.format, DiffFormat::Structural);
        assert!(result.diff.contains("function_definition goodbye: added"));
    }

    #[test]
    fn python_class_body_edit_is_modified() {
        let result = diff_source(
            "app.py",
            b"class Foo:\n    def bar(self):\n        return 1\n",
            b"class Foo:\n    def bar(self):\n        return 2\n",
        );
        assert!(result.diff.contains("class_definition Foo: modified"));
    }

    #[test]
    fn python_reordering_is_not_a_change() {
        let result = diff_source(
            "app.py",
            b"def a():\n    pass\n\ndef b():\n    pass\n",
            b"def b():\n    pass\n\ndef a():\n    pass\n",
        );
        assert_eq!(result.diff, NO_STRUCTURAL_CHANGES);
    }

    #[test]
    fn javascript_function_added() {
        let result = diff_source(
            "app.js",
            b"function hello() {\n  console.log(\"hello\");\n}\n",
            b"function hello() {\n  console.log(\"hello\");\n}\n\nfunction goodbye() {\n  console.log(\"goodbye\");\n}\n",
        );
        assert!(result.diff.contains("function_declaration goodbye: added"));
    }

    #[test]
    fn javascript_const_edit_is_modified() {
        let result = diff_source("config.js", b"const PORT = 3000;\n", b"const PORT = 8080;\n");
        assert!(result.diff.contains("lexical_declaration PORT: modified"));
    }

    #[test]
    fn typescript_interface_added() {
        let result = diff_source(
            "types.ts",
            b"interface User {\n  name: string;\n}\n",
            b"interface User {\n  name: string;\n}\n\ninterface Admin {\n  role: string;\n}\n",
        );
        assert!(result.diff.contains("interface_declaration Admin: added"));
    }

    #[test]
    fn tsx_component_edit_is_modified() {
        let result = diff_source(
            "App.tsx",
            b"function App() {\n  return <div>Hello</div>;\n}\n",
            b"function App() {\n  return <div>World</div>;\n}\n",
        );
        assert!(result.diff.contains("function_declaration App: modified"));
    }

    #[test]
    fn rust_function_added() {
        let result = diff_source("lib.rs", b"fn hello() {}\n", b"fn hello() {}\n\nfn goodbye() {}\n");
        assert!(result.diff.contains("function_item goodbye: added"));
    }

    #[test]
    fn java_class_body_edit_is_modified() {
        let result = diff_source(
            "Main.java",
            b"public class Main {\n    public static void main(String[] args) {}\n}\n",
            b"public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"hello\");\n    }\n}\n",
        );
        assert!(result.diff.contains("class_declaration Main: modified"));
    }

    #[test]
    fn c_function_body_edit_is_modified() {
        let result = diff_source(
            "main.c",
            b"#include <stdio.h>\n\nint main() {\n    return 0;\n}\n",
            b"#include <stdio.h>\n\nint main() {\n    printf(\"hello\\n\");\n    return 0;\n}\n",
        );
        assert!(result.diff.contains("main: modified"));
    }

    #[test]
    fn ruby_method_added() {
        let result = diff_source(
            "app.rb",
            b"def hello\n  puts \"hello\"\nend\n",
            b"def hello\n  puts \"hello\"\nend\n\ndef goodbye\n  puts \"goodbye\"\nend\n",
        );
        assert!(result.diff.contains("method goodbye: added"));
    }

    #[test]
    fn unregistered_extension_falls_back_to_unified() {
        let result = diff_source("notes.txt", b"hello\n", b"world\n");
        assert_eq!(result.format, DiffFormat::Unified);
        assert!(result.diff.contains("--- a/notes.txt"));
    }

    #[test]
    fn syntax_error_degrades_with_message() {
        let result = diff_source("main.go", b"func func func {{{", b"package main\n");
        assert_eq!(result.format, DiffFormat::Fallback);
        assert!(result.message.as_deref().unwrap_or("").contains("base"));
    }
}
