use php_to_go::{ConvertOptions, Converter};

fn convert(source: &str) -> String {
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    converter.convert(&format!("<?php\n{}\n", source)).unwrap()
}

fn lines(lines: &[&str]) -> String {
    lines.join("\n")
}

#[test]
fn test_if_elseif_else() {
    assert_eq!(
        convert("if ($a) { echo 1; } elseif ($b) { echo 2; } else { echo 3; }"),
        lines(&[
            "if a {",
            "    fmt.Print(1)",
            "} else if b {",
            "    fmt.Print(2)",
            "} else {",
            "    fmt.Print(3)",
            "}",
        ])
    );
}

#[test]
fn test_else_if_written_as_two_words() {
    assert_eq!(
        convert("if ($a) { echo 1; } else if ($b) { echo 2; }"),
        lines(&[
            "if a {",
            "    fmt.Print(1)",
            "} else if b {",
            "    fmt.Print(2)",
            "}",
        ])
    );
}

#[test]
fn test_for_loop() {
    assert_eq!(
        convert("for ($i = 0; $i < 10; $i++) { echo $i; }"),
        lines(&["for i = 0; i < 10; i++ {", "    fmt.Print(i)", "}"])
    );
}

#[test]
fn test_foreach_with_and_without_key() {
    assert_eq!(
        convert("foreach ($items as $k => $v) { echo $v; }"),
        lines(&["for k, v := range items {", "    fmt.Print(v)", "}"])
    );
    assert_eq!(
        convert("foreach ($items as $v) { echo $v; }"),
        lines(&["for _, v := range items {", "    fmt.Print(v)", "}"])
    );
}

#[test]
fn test_while_loop() {
    assert_eq!(
        convert("while ($a) { $a--; }"),
        lines(&["for a {", "    a--", "}"])
    );
}

#[test]
fn test_do_while_loop() {
    assert_eq!(
        convert("do { $a++; } while ($a < 10);"),
        lines(&[
            "for {",
            "    a++",
            "",
            "    if !(a < 10) {",
            "        break",
            "    }",
            "}",
        ])
    );
}

#[test]
fn test_switch_fallthrough_and_break() {
    let source = lines(&[
        "switch ($a) {",
        "    case 1:",
        "        echo 1;",
        "    case 2:",
        "        echo 2;",
        "        break;",
        "    default:",
        "        echo 3;",
        "}",
    ]);
    assert_eq!(
        convert(&source),
        lines(&[
            "switch a {",
            "    case 1:",
            "        fmt.Print(1)",
            "        fallthrough",
            "    case 2:",
            "        fmt.Print(2)",
            "    default:",
            "        fmt.Print(3)",
            "}",
        ])
    );
}

#[test]
fn test_multi_level_break() {
    assert_eq!(
        convert("while (true) { break 2; }"),
        lines(&["for true {", "    break 2 /* cannot convert */", "}"])
    );
}

#[test]
fn test_try_catch_finally() {
    let source = lines(&[
        "try {",
        "    foo();",
        "} catch (Exception $e) {",
        "    bar();",
        "} finally {",
        "    baz();",
        "}",
    ]);
    assert_eq!(
        convert(&source),
        lines(&[
            "// TODO: error trap",
            "foo()",
            "// catch (Exception e) {",
            "//     bar()",
            "// }",
            "// finally {",
            "//     baz()",
            "// }",
        ])
    );
}

#[test]
fn test_throw() {
    assert_eq!(
        convert("throw new Exception('boom');"),
        "return errors.New(\"boom\")"
    );
}

#[test]
fn test_function_with_types_and_default() {
    assert_eq!(
        convert("function add(int $a, int $b = 2): int { return $a + $b; }"),
        lines(&[
            "func add(a int, b int /* = 2 */) int {",
            "    return a + b",
            "}",
        ])
    );
}

#[test]
fn test_function_types_from_doc_comment() {
    let source = lines(&[
        "/**",
        " * @param string $name",
        " * @return bool",
        " */",
        "function check($name) { return true; }",
    ]);
    assert_eq!(
        convert(&source),
        lines(&[
            "/**",
            " * @param string $name",
            " * @return bool",
            " */",
            "func check(name string) bool {",
            "    return true",
            "}",
        ])
    );
}

#[test]
fn test_class_layout() {
    let source = lines(&[
        "class Foo extends Bar implements Baz",
        "{",
        "    /** @var string */",
        "    private $name = 'x';",
        "    const LIMIT = 10;",
        "",
        "    public function getName()",
        "    {",
        "        return $this->name;",
        "    }",
        "}",
    ]);
    assert_eq!(
        convert(&source),
        lines(&[
            "// TODO: Think structure strategy.",
            "// implements: Baz",
            "type Foo struct {",
            "    Bar",
            "    /** @var string */",
            "    name string = \"x\"",
            "}",
            "",
            "const LIMIT = 10",
            "",
            "func (this *Foo) getName() {",
            "    return this.name",
            "}",
        ])
    );
}

#[test]
fn test_abstract_method() {
    let source = "abstract class Shape { abstract public function area(): float; }";
    assert_eq!(
        convert(source),
        lines(&[
            "// TODO: Think structure strategy.",
            "type Shape struct {",
            "}",
            "",
            "// TODO: abstract",
            "func (this *Shape) area() float {}",
        ])
    );
}

#[test]
fn test_interface() {
    let source = "interface Shape extends Base { public function area(): float; }";
    assert_eq!(
        convert(source),
        lines(&["type Shape interface {", "    Base", "    area() float", "}"])
    );
}

#[test]
fn test_namespace_becomes_package() {
    assert_eq!(
        convert("namespace App\\Models;\n\necho 1;"),
        lines(&["package App.Models", "", "fmt.Print(1)"])
    );
}

#[test]
fn test_comments_before_statements() {
    assert_eq!(
        convert("// first\n# second\n$a = 1;"),
        lines(&["// first", "// second", "a = 1"])
    );
}

#[test]
fn test_trait_is_kept_with_marker() {
    assert_eq!(
        convert("trait T { }"),
        "trait T {\n} /* cannot convert */"
    );
}

#[test]
fn test_foreach_destructuring_is_marked() {
    assert_eq!(
        convert("foreach ($xs as [$a, $b]) { echo $a; }"),
        lines(&[
            "for _, [a, b] /* cannot convert */ := range xs {",
            "    fmt.Print(a)",
            "}",
        ])
    );
    assert_eq!(
        convert("foreach ($xs as $k => list($a, $b)) { echo $a; }"),
        lines(&[
            "for k, [a, b] /* cannot convert */ := range xs {",
            "    fmt.Print(a)",
            "}",
        ])
    );
}

#[test]
fn test_variadic_parameters() {
    assert_eq!(
        convert("function f(int ...$xs) {}"),
        lines(&["func f(xs ...int) {", "}"])
    );
    assert_eq!(
        convert("function f($a, ...$rest) {}"),
        lines(&["func f(a, rest ...interface{}) {", "}"])
    );
}
