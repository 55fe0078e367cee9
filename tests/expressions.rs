use php_to_go::{ConvertOptions, Converter};

fn convert(code: &str) -> String {
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    converter
        .convert(&format!("<?php\n{};\n", code))
        .unwrap()
}

#[test]
fn test_concat_becomes_plus() {
    assert_eq!(convert("$s = 'a' . $b"), "s = \"a\" + b");
    assert_eq!(convert("$s .= 'x'"), "s += \"x\"");
}

#[test]
fn test_power() {
    assert_eq!(convert("$x = $a ** 2"), "x = math.Pow(a, 2)");
    assert_eq!(convert("$x **= 2"), "x = math.Pow(x, 2)");
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(convert("$a === $b"), "a == b");
    assert_eq!(convert("$a !== $b"), "a != b");
    assert_eq!(convert("$a and $b"), "a && b");
}

#[test]
fn test_precedence_parentheses() {
    assert_eq!(convert("$x = ($a + $b) * $c"), "x = (a + b) * c");
    assert_eq!(convert("$x = $a + $b * $c"), "x = a + b * c");
}

#[test]
fn test_unsupported_operators_are_marked() {
    assert_eq!(convert("$a ?? $b"), "a ?? b /* cannot convert */");
    assert_eq!(convert("$a <=> $b"), "a <=> b /* cannot convert */");
}

#[test]
fn test_unary_and_casts() {
    assert_eq!(convert("~$a"), "^a");
    assert_eq!(convert("!$a"), "!a");
    assert_eq!(convert("(int) $a"), "int(a)");
    assert_eq!(convert("(string) $a"), "string(a)");
    assert_eq!(convert("(array) $a"), "(array) a /* cannot convert */");
}

#[test]
fn test_constants() {
    assert_eq!(convert("$a = null"), "a = nil");
    assert_eq!(convert("$a = FOO"), "a = FOO");
    assert_eq!(convert("Foo::BAR"), "Foo.BAR");
}

#[test]
fn test_calls_and_access() {
    assert_eq!(convert("foo(1, $b)"), "foo(1, b)");
    assert_eq!(convert("Foo::bar()"), "Foo.bar()");
    assert_eq!(convert("$a->b->c"), "a.b.c");
    assert_eq!(convert("$a['k'][0]"), "a[\"k\"][0]");
    assert_eq!(convert("Foo::$bar"), "Foo.bar");
}

#[test]
fn test_new_object() {
    assert_eq!(convert("$o = new Foo(1, 2)"), "o = &Foo{1, 2}");
    assert_eq!(convert("$o = clone $p"), "o = p");
}

#[test]
fn test_append_assignment() {
    assert_eq!(convert("$a[] = 1"), "a = append(a, 1)");
}

#[test]
fn test_list_destructuring() {
    assert_eq!(convert("list($a, , $b) = $c"), "a, _, b = c");
}

#[test]
fn test_ternary() {
    assert_eq!(
        convert("$a = $b ? 1 : 2"),
        "a = if b {\n    1\n} else {\n    2\n}"
    );
    assert_eq!(
        convert("$a = $b ?: 2"),
        "a = if b {\n    b\n} else {\n    2\n}"
    );
}

#[test]
fn test_closure_and_arrow_function() {
    assert_eq!(
        convert("$f = function ($x) use ($y) { return $x + $y; }"),
        "f = func (x) /* use(y) */ {\n    return x + y\n}"
    );
    assert_eq!(
        convert("$f = fn($x) => $x * 2"),
        "f = func (x) {\n    return x * 2\n}"
    );
}

#[test]
fn test_output_and_exit() {
    assert_eq!(convert("echo 'a', 'b'"), "fmt.Print(\"a\", \"b\")");
    assert_eq!(convert("print 'a'"), "fmt.Print(\"a\")");
    assert_eq!(convert("exit(1)"), "os.Exit(1)");
}

#[test]
fn test_language_constructs_are_marked() {
    assert_eq!(convert("isset($a)"), "isset(a) /* cannot convert */");
    assert_eq!(convert("empty($a)"), "empty(a) /* cannot convert */");
    assert_eq!(convert("@foo()"), "foo() /* NOTE: suppress error */");
    assert_eq!(
        convert("$a instanceof Foo"),
        "a instanceof Foo /* cannot convert */"
    );
}

#[test]
fn test_magic_constant() {
    assert_eq!(convert("__DIR__"), "__DIR__ /* cannot convert */");
}

#[test]
fn test_named_argument() {
    assert_eq!(
        convert("foo(name: 1)"),
        "foo(name: 1 /* cannot convert */)"
    );
}

#[test]
fn test_multibyte_function_name() {
    assert_eq!(convert("aaaaaaaaaé()"), "aaaaaaaaaé()");
    assert_eq!(convert("$x = déjà_vu_function(1)"), "x = déjà_vu_function(1)");
}

#[test]
fn test_argument_unpacking() {
    assert_eq!(convert("foo(...$args)"), "foo(args...)");
    assert_eq!(convert("foo(1, ...$rest)"), "foo(1, rest...)");
}
