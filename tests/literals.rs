use php_to_go::{ConvertOptions, Converter};

fn convert(source: &str) -> String {
    let mut converter = Converter::with_options(ConvertOptions::body_only());
    converter.convert(&format!("<?php\n{}\n", source)).unwrap()
}

#[test]
fn test_single_quoted_escapes() {
    assert_eq!(convert(r"$a = 'it\'s';"), r#"a = "it's""#);
    assert_eq!(convert(r"$a = 'a\nb';"), r#"a = "a\\nb""#);
}

#[test]
fn test_double_quoted_escapes() {
    assert_eq!(convert(r#"$a = "tab\there";"#), r#"a = "tab\there""#);
    assert_eq!(convert(r#"$a = "say \"hi\"";"#), r#"a = "say \"hi\"""#);
    assert_eq!(convert(r#"$a = "\x41\101";"#), r#"a = "AA""#);
}

#[test]
fn test_interpolation() {
    assert_eq!(convert(r#"$a = "Hello $name!";"#), r#"a = "Hello {name}!""#);
    assert_eq!(convert(r#"$a = "x {$obj->y} z";"#), r#"a = "x {obj.y} z""#);
}

#[test]
fn test_heredoc_as_raw_string() {
    let source = "$a = <<<EOT\nline one\n  line two\nEOT;";
    assert_eq!(convert(source), "a = `\nline one\n  line two\n`");
}

#[test]
fn test_heredoc_with_interpolation() {
    let source = "$a = <<<EOT\nHi $name\nEOT;";
    assert_eq!(convert(source), "a = `\nHi {name}\n`");
}

#[test]
fn test_nowdoc_keeps_text() {
    let source = "$a = <<<'EOT'\nno $interpolation here\nEOT;";
    assert_eq!(convert(source), "a = `\nno $interpolation here\n`");
}

#[test]
fn test_heredoc_with_backtick_is_quoted() {
    let source = "$a = <<<EOT\nrun `ls`\nEOT;";
    assert_eq!(convert(source), "a = \"run `ls`\"");
}

#[test]
fn test_empty_array() {
    assert_eq!(convert("$a = [];"), "a = []interface{}{}");
}

#[test]
fn test_implicit_keys_in_mixed_array() {
    assert_eq!(
        convert("$a = ['x' => 1, 2];"),
        "a = map[string]interface{}{\n    \"x\" : 1,\n    0 /* implicit key */ : 2,\n}"
    );
    assert_eq!(
        convert("$a = [5 => 'p', 'q'];"),
        "a = map[string]interface{}{\n    5 : \"p\",\n    6 /* implicit key */ : \"q\",\n}"
    );
}

#[test]
fn test_array_entry_comments() {
    let source = "$a = [\n    // first\n    1,\n    2,\n];";
    assert_eq!(
        convert(source),
        "a = []interface{}{\n    // first\n    1,\n    2,\n}"
    );
}

#[test]
fn test_numbers_verbatim() {
    assert_eq!(convert("$a = 0x1F;"), "a = 0x1F");
    assert_eq!(convert("$a = 1.5e3;"), "a = 1.5e3");
}
