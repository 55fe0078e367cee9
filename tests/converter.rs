use php_to_go::{ConvertOptions, Converter, Error, Node, NodeKind, StdlibHook};

const INDENT: &str = "    ";

fn convert(code: &str) -> String {
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    converter
        .convert(&format!("<?php\n{};\n", code))
        .unwrap()
}

fn lines(lines: &[&str]) -> String {
    lines.join("\n")
}

#[test]
fn test_single_quoted_string() {
    assert_eq!(convert("'hoge hoge'"), "\"hoge hoge\"");
}

#[test]
fn test_double_quoted_string() {
    assert_eq!(convert("\"foo bar\""), "\"foo bar\"");
}

#[test]
fn test_simple_map() {
    let expected = lines(&[
        "map[string]interface{}{",
        &format!("{}\"key\" : \"value\",", INDENT),
        &format!("{}\"hoge\" : \"huga\",", INDENT),
        "}",
    ]);
    assert_eq!(convert("['key' => 'value', 'hoge' => 'huga']"), expected);
    assert_eq!(convert("array('key' => 'value', 'hoge' => 'huga')"), expected);
}

#[test]
fn test_simple_list() {
    let mut expected = vec!["[]interface{}{".to_string()];
    for item in ["1", "2", "3", "\"hoge\"", "\"huga\"", "\"foo\"", "4", "5", "6"] {
        expected.push(format!("{}{},", INDENT, item));
    }
    expected.push("}".to_string());
    assert_eq!(
        convert("[1, 2, 3, 'hoge', \"huga\", 'foo', 4, 5, 6]"),
        expected.join("\n")
    );
}

#[test]
fn test_nested_map() {
    let i1 = INDENT;
    let i2 = INDENT.repeat(2);
    let i3 = INDENT.repeat(3);
    let expected = lines(&[
        "map[string]interface{}{",
        &format!("{}\"key\" : map[string]interface{{}}{{", i1),
        &format!("{}\"inner\" : \"value\",", i2),
        &format!("{}}},", i1),
        &format!("{}\"hoge\" : map[string]interface{{}}{{", i1),
        &format!("{}\"huga\" : map[string]interface{{}}{{", i2),
        &format!("{}\"foo\" : \"bar\",", i3),
        &format!("{}}},", i2),
        &format!("{}}},", i1),
        "}",
    ]);
    assert_eq!(
        convert("['key' => ['inner' => 'value'], 'hoge' => ['huga' => ['foo' => 'bar']]]"),
        expected
    );
}

#[test]
fn test_nested_list() {
    let i = |n: usize| INDENT.repeat(n);
    let expected = lines(&[
        "[]interface{}{",
        &format!("{}1,", i(1)),
        &format!("{}[]interface{{}}{{", i(1)),
        &format!("{}2,", i(2)),
        &format!("{}3,", i(2)),
        &format!("{}}},", i(1)),
        &format!("{}[]interface{{}}{{", i(1)),
        &format!("{}[]interface{{}}{{", i(2)),
        &format!("{}[]interface{{}}{{", i(3)),
        &format!("{}[]interface{{}}{{", i(4)),
        &format!("{}\"foo\",", i(5)),
        &format!("{}}},", i(4)),
        &format!("{}}},", i(3)),
        &format!("{}\"bar\",", i(3)),
        &format!("{}}},", i(2)),
        &format!("{}}},", i(1)),
        "}",
    ]);
    assert_eq!(convert("[1, [2, 3], [[[['foo']], 'bar']]]"), expected);
}

#[test]
fn test_simple_method_call() {
    assert_eq!(convert("$this->get()"), "this.get()");
}

#[test]
fn test_method_call_with_some_args() {
    let expected = lines(&[
        "this.get(1, 2, \"hoge\", dammy, []interface{}{",
        &format!("{}1,", INDENT),
        &format!("{}map[string]interface{{}}{{", INDENT),
        &format!("{}\"hoge\" : false,", INDENT.repeat(2)),
        &format!("{}}},", INDENT),
        "})",
    ]);
    assert_eq!(
        convert("$this->get(1, 2, 'hoge', $dammy, [1, ['hoge' => false]])"),
        expected
    );
}

#[test]
fn test_nested_method_call() {
    assert_eq!(
        convert("$this->get($this->get('dammy', $arg))"),
        "this.get(this.get(\"dammy\", arg))"
    );
}

#[test]
fn test_blank_lines_are_preserved() {
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    let result = converter
        .convert("<?php\n$a = 1;\n\n\n$b = 2;\n")
        .unwrap();
    assert_eq!(result, "a = 1\n\n\nb = 2");
}

#[test]
fn test_blank_lines_inside_function_body() {
    let source = lines(&[
        "<?php",
        "function f() {",
        "    $a = 1;",
        "",
        "",
        "    $b = 2;",
        "    if ($a) {",
        "        $c = 3;",
        "",
        "        $d = 4;",
        "    }",
        "}",
        "",
    ]);
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    assert_eq!(
        converter.convert(&source).unwrap(),
        lines(&[
            "func f() {",
            "    a = 1",
            "",
            "",
            "    b = 2",
            "    if a {",
            "        c = 3",
            "",
            "        d = 4",
            "    }",
            "}",
        ])
    );
}

#[test]
fn test_blank_lines_inside_class_body() {
    let source = lines(&[
        "<?php",
        "class Foo",
        "{",
        "    private $a;",
        "",
        "    private $b;",
        "",
        "    public function x()",
        "    {",
        "    }",
        "",
        "",
        "    public function y()",
        "    {",
        "    }",
        "}",
        "",
    ]);
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    assert_eq!(
        converter.convert(&source).unwrap(),
        lines(&[
            "// TODO: Think structure strategy.",
            "type Foo struct {",
            "    a interface{}",
            "",
            "    b interface{}",
            "}",
            "",
            "func (this *Foo) x() {",
            "}",
            "",
            "",
            "func (this *Foo) y() {",
            "}",
        ])
    );
}

#[test]
fn test_blank_lines_inside_array_literal() {
    let source = lines(&["<?php", "$a = [", "    1,", "", "    2,", "];", ""]);
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    assert_eq!(
        converter.convert(&source).unwrap(),
        lines(&["a = []interface{}{", "    1,", "", "    2,", "}"])
    );
}

#[test]
fn test_header_and_body() {
    let mut converter = Converter::new();
    let result = converter.convert("<?php\necho 'hi';\n").unwrap();
    assert_eq!(result, "// Code generated. MUST EDIT!\n\nfmt.Print(\"hi\")");
}

#[test]
fn test_additional_code_between_header_and_body() {
    let mut converter = Converter::new();
    converter.install(&StdlibHook::new()).unwrap();
    let result = converter
        .convert("<?php\nif (file_exists('a')) {\n    echo 1;\n}\n")
        .unwrap();
    let expected = lines(&[
        "// Code generated. MUST EDIT!",
        "",
        "func fileExists(filename string) bool {",
        "    _, err := os.Stat(filename)",
        "    return err == nil",
        "}",
        "",
        "if fileExists(\"a\") {",
        "    fmt.Print(1)",
        "}",
    ]);
    assert_eq!(result, expected);
}

#[test]
fn test_additional_code_disabled() {
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    converter.install(&StdlibHook::new()).unwrap();
    let result = converter.convert("<?php\n$ok = file_exists($f);\n").unwrap();
    assert_eq!(result, "ok = fileExists(f)");
}

#[test]
fn test_fibonacci_example() {
    let source = include_str!("fixtures/fibonacci.php");
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    converter.install(&StdlibHook::new()).unwrap();
    let result = converter.convert(source).unwrap();

    let expected = lines(&[
        "",
        "/**",
        " * @param int $count",
        " * @return array",
        " */",
        "func fibonacci(count int) array {",
        "    switch count {",
        "        case 1:",
        "            return []interface{}{",
        "                1,",
        "            }",
        "",
        "        case 2:",
        "            return []interface{}{",
        "                1,",
        "                1,",
        "            }",
        "",
        "        default:",
        "            tmp = fibonacci(count - 1)",
        "            tmp = append(tmp, tmp[len(tmp) - 1] + tmp[len(tmp) - 2])",
        "            return tmp",
        "    }",
        "}",
        "",
        "fmt.Printf(\"%+v\\n\", fibonacci(10))",
    ]);
    assert_eq!(result, expected);
}

#[test]
fn test_converter_is_reusable() {
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    converter.install(&StdlibHook::new()).unwrap();
    let first = converter.convert("<?php\n$a = count($b);\n").unwrap();
    let second = converter.convert("<?php\n$a = count($b);\n").unwrap();
    assert_eq!(first, "a = len(b)");
    assert_eq!(first, second);
}

#[test]
fn test_parse_error_is_fatal() {
    let mut converter = Converter::new();
    match converter.convert("<?php\nfunction (\n") {
        Err(Error::Parse { line, .. }) => assert!(line >= 2),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_too_deeply_nested() {
    let mut options = ConvertOptions::body_only();
    options.max_depth = 20;
    let mut converter = Converter::with_options(options);
    let source = format!("<?php\n$a = {}1{};\n", "[".repeat(40), "]".repeat(40));
    assert_eq!(
        converter.convert(&source),
        Err(Error::TooDeeplyNested { limit: 20 })
    );
}

#[test]
fn test_convert_nodes() {
    let stmts = vec![Node::new(NodeKind::Return(Some(Box::new(Node::variable(
        "x",
    )))))];
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    assert_eq!(converter.convert_nodes(&stmts).unwrap(), "return x");
}
