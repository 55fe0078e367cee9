//! Go replacements for common PHP standard library calls
//!
//! Calls are matched on the callee's unqualified name. Replacements that need
//! a Go helper register it in the additional-code registry under the PHP
//! function name, so each helper appears once however often it is called.

use crate::ast::{NameKind, Node, NodeKind, NodeType};
use crate::emitter::{Emitter, Hook, HookTable, Next};
use crate::error::Result;

const GETOPT_HELPER: &str = r#" // FIXME: error handle
func getopt(args string) map[string]string {
    ptr := map[string]*string{}

    for _, arg := range strings.Split(args, ":") {
        ptr[arg] = flag.String(arg, "", "")
    }
    flag.Parse()

    result := map[string]string{}
    for k, v := range ptr {
        result[k] = *v
    }

    return result
}"#;

const FILE_EXISTS_HELPER: &str = r#"func fileExists(filename string) bool {
    _, err := os.Stat(filename)
    return err == nil
}"#;

const FILE_PUT_CONTENTS_HELPER: &str = r#"func filePutContents(filename string, text string) error {
    return ioutil.WriteFile(filename, []byte(text), 0644)
}"#;

const FILE_GET_CONTENTS_HELPER: &str = r#"func fileGetContents(path string) string {
    tmp, _ := ioutil.ReadFile(path) // FIXME: error handle
    return string(tmp)
}"#;

/// One replacement: the Go callee and the helper it depends on
struct Replacement {
    php_name: &'static str,
    go_name: &'static str,
    /// Argument inserted before the original ones
    leading_arg: Option<&'static str>,
    helper: Option<&'static str>,
}

const REPLACEMENTS: &[Replacement] = &[
    Replacement {
        php_name: "var_dump",
        go_name: "fmt.Printf",
        leading_arg: Some(r#""%+v\n""#),
        helper: None,
    },
    Replacement {
        php_name: "count",
        go_name: "len",
        leading_arg: None,
        helper: None,
    },
    Replacement {
        php_name: "getopt",
        go_name: "getopt",
        leading_arg: None,
        helper: Some(GETOPT_HELPER),
    },
    Replacement {
        php_name: "file_exists",
        go_name: "fileExists",
        leading_arg: None,
        helper: Some(FILE_EXISTS_HELPER),
    },
    Replacement {
        php_name: "file_put_contents",
        go_name: "filePutContents",
        leading_arg: None,
        helper: Some(FILE_PUT_CONTENTS_HELPER),
    },
    Replacement {
        php_name: "file_get_contents",
        go_name: "fileGetContents",
        leading_arg: None,
        helper: Some(FILE_GET_CONTENTS_HELPER),
    },
];

/// Interceptors for `Expr_FuncCall` covering a handful of built-ins
#[derive(Debug, Default, Clone, Copy)]
pub struct StdlibHook;

impl StdlibHook {
    pub fn new() -> Self {
        Self
    }

    /// PHP function names this hook rewrites
    pub fn function_names() -> impl Iterator<Item = &'static str> {
        REPLACEMENTS.iter().map(|r| r.php_name)
    }
}

impl Hook for StdlibHook {
    fn register(&self, hooks: &mut HookTable) {
        hooks.register(NodeType::FuncCall, rewrite_call);
    }
}

fn rewrite_call(
    emitter: &mut Emitter,
    node: &Node,
    preserve_formatting: bool,
    next: Next<'_>,
) -> Result<String> {
    let NodeKind::FuncCall { name, args } = &node.kind else {
        return next.call(emitter, node, preserve_formatting);
    };
    let Some(replacement) = callee_name(name)
        .and_then(|callee| REPLACEMENTS.iter().find(|r| r.php_name == callee))
    else {
        return next.call(emitter, node, preserve_formatting);
    };

    if let Some(helper) = replacement.helper {
        emitter.add_additional_code(replacement.php_name, helper);
    }
    let args = emitter.render_args(args)?;
    match replacement.leading_arg {
        Some(leading) if args.is_empty() => Ok(format!("{}({})", replacement.go_name, leading)),
        Some(leading) => Ok(format!("{}({}, {})", replacement.go_name, leading, args)),
        None => Ok(format!("{}({})", replacement.go_name, args)),
    }
}

/// Callee of a plain or fully qualified global function name
fn callee_name(name: &Node) -> Option<&str> {
    match &name.kind {
        NodeKind::Name {
            parts,
            qualification: NameKind::Unqualified | NameKind::FullyQualified,
        } if parts.len() == 1 => Some(parts[0].as_str()),
        _ => None,
    }
}
