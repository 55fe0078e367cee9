use php_to_go::emitter::AdditionalCode;
use php_to_go::{ConvertOptions, Converter, Hook, HookTable, Node, NodeKind, NodeType, StdlibHook};

fn body_only() -> Converter {
    Converter::with_options(ConvertOptions::body_only())
}

#[test]
fn test_chain_runs_in_registration_order() {
    let mut converter = body_only();
    for marker in ["1", "2", "3"] {
        converter
            .register_hook(NodeType::Variable, move |emitter, node, preserve, next| {
                Ok(format!("{}({})", marker, next.call(emitter, node, preserve)?))
            })
            .unwrap();
    }
    assert_eq!(converter.convert("<?php\n$a;\n").unwrap(), "1(2(3(a)))");
}

#[test]
fn test_hook_can_short_circuit() {
    let mut converter = body_only();
    converter
        .register_hook(NodeType::Variable, |_, _, _, _| Ok("X".to_string()))
        .unwrap();
    converter
        .register_hook(NodeType::Variable, |_, _, _, _| {
            panic!("a later hook must not run")
        })
        .unwrap();
    assert_eq!(converter.convert("<?php\n$a = $b;\n").unwrap(), "X = X");
}

#[test]
fn test_next_reports_remaining_hooks() {
    let mut converter = body_only();
    converter
        .register_hook(NodeType::Variable, |emitter, node, preserve, next| {
            let remaining = next.remaining();
            Ok(format!("{}:{}", next.call(emitter, node, preserve)?, remaining))
        })
        .unwrap();
    converter
        .register_hook(NodeType::Variable, |emitter, node, preserve, next| {
            let remaining = next.remaining();
            Ok(format!("{}:{}", next.call(emitter, node, preserve)?, remaining))
        })
        .unwrap();
    assert_eq!(converter.convert("<?php\n$a;\n").unwrap(), "a:0:1");
}

#[test]
fn test_register_by_name() {
    let mut converter = body_only();
    converter
        .register_hook_by_name("Stmt_Echo", |_, _, _, _| Ok("log.Println()".to_string()))
        .unwrap();
    assert_eq!(converter.convert("<?php\necho 1;\n").unwrap(), "log.Println()");
    assert_eq!(converter.hooks().count(NodeType::Echo), 1);
}

#[test]
fn test_hook_renders_children_through_emitter() {
    let mut converter = body_only();
    converter
        .register_hook(NodeType::FuncCall, |emitter, node, preserve, next| {
            if let NodeKind::FuncCall { name, args } = &node.kind {
                if name.simple_name() == Some("strlen") {
                    return Ok(format!("len({})", emitter.render_args(args)?));
                }
            }
            next.call(emitter, node, preserve)
        })
        .unwrap();
    assert_eq!(
        converter.convert("<?php\n$n = strlen(trim($s));\n").unwrap(),
        "n = len(trim(s))"
    );
}

#[test]
fn test_additional_code_is_added_once() {
    let mut converter = Converter::new();
    converter
        .register_hook(NodeType::FuncCall, |emitter, node, preserve, next| {
            emitter.add_additional_code("helper", "func helper() {}");
            next.call(emitter, node, preserve)
        })
        .unwrap();
    let result = converter.convert("<?php\nhelper();\nhelper();\n").unwrap();
    assert_eq!(
        result,
        "// Code generated. MUST EDIT!\n\nfunc helper() {}\n\nhelper()\nhelper()"
    );
}

#[test]
fn test_additional_code_registry() {
    let mut code = AdditionalCode::new();
    assert!(code.is_empty());
    assert!(code.add("a", "func a() {}"));
    assert!(!code.add("a", "func other() {}"));
    assert!(code.add("b", "func b() {}"));
    assert_eq!(code.len(), 2);
    assert_eq!(code.get("a"), Some("func a() {}"));
    assert_eq!(code.flush(), "func a() {}\n\nfunc b() {}");
}

struct Rename;

impl Hook for Rename {
    fn register(&self, hooks: &mut HookTable) {
        hooks.register(NodeType::Variable, |emitter, node, preserve, next| {
            if let NodeKind::Variable(_) = &node.kind {
                return Ok(format!("v_{}", next.call(emitter, node, preserve)?));
            }
            next.call(emitter, node, preserve)
        });
    }
}

#[test]
fn test_install_hook_bundle() {
    let mut converter = body_only();
    converter.install(&Rename).unwrap();
    assert_eq!(converter.convert("<?php\n$a = $b;\n").unwrap(), "v_a = v_b");
}

#[test]
fn test_stdlib_hook_rewrites() {
    let mut converter = body_only();
    converter.install(&StdlibHook::new()).unwrap();
    assert_eq!(
        converter.convert("<?php\nvar_dump($a);\n").unwrap(),
        "fmt.Printf(\"%+v\\n\", a)"
    );
}

#[test]
fn test_stdlib_hook_delegates_unknown_functions() {
    let mut converter = body_only();
    converter.install(&StdlibHook::new()).unwrap();
    assert_eq!(
        converter.convert("<?php\nstr_replace($a, $b, $c);\n").unwrap(),
        "str_replace(a, b, c)"
    );
}

#[test]
fn test_stdlib_helpers_in_first_use_order() {
    let mut converter = Converter::new();
    converter.install(&StdlibHook::new()).unwrap();
    let result = converter
        .convert("<?php\n$t = file_get_contents($p);\nfile_put_contents($p, $t);\n$u = file_get_contents($q);\n")
        .unwrap();
    let get = result.find("func fileGetContents").unwrap();
    let put = result.find("func filePutContents").unwrap();
    assert!(get < put);
    assert_eq!(result.matches("func fileGetContents").count(), 1);
    assert!(result.ends_with("t = fileGetContents(p)\nfilePutContents(p, t)\nu = fileGetContents(q)"));
}

#[test]
fn test_hook_sees_nodes_built_by_hand() {
    let mut converter = body_only();
    converter
        .register_hook(NodeType::Return, |_, _, _, _| Ok("return nil".to_string()))
        .unwrap();
    let stmts = vec![Node::new(NodeKind::Return(None))];
    assert_eq!(converter.convert_nodes(&stmts).unwrap(), "return nil");
}

#[test]
fn test_stdlib_hook_without_arguments() {
    let mut converter = body_only();
    converter.install(&StdlibHook::new()).unwrap();
    assert_eq!(
        converter.convert("<?php\nvar_dump();\n").unwrap(),
        "fmt.Printf(\"%+v\\n\")"
    );
}
