//! Minimal PHPDoc parser
//!
//! Understands the summary text and `@tag body` entries of a `/** ... */`
//! comment, with typed accessors for `@param`, `@return` and `@var`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocBlockError {
    #[error("documentation comment must start with `/**`")]
    MissingOpener,

    #[error("documentation comment is not terminated with `*/`")]
    Unterminated,

    #[error("unbalanced type expression in @{tag}: `{text}`")]
    UnbalancedType { tag: String, text: String },
}

/// One `@name body` entry; continuation lines are folded into `body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub name: String,
    pub body: String,
}

/// A `@param` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    pub type_name: Option<String>,
    /// Parameter name without the `$`
    pub name: String,
    pub variadic: bool,
    pub by_ref: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub summary: String,
    pub tags: Vec<DocTag>,
}

/// Tags whose body starts with a type expression
const TYPED_TAGS: &[&str] = &["param", "return", "var", "throws", "property"];

impl DocBlock {
    pub fn parse(text: &str) -> Result<Self, DocBlockError> {
        let text = text.trim();
        let inner = text
            .strip_prefix("/**")
            .ok_or(DocBlockError::MissingOpener)?;
        let inner = inner
            .strip_suffix("*/")
            .ok_or(DocBlockError::Unterminated)?;

        let mut summary: Vec<&str> = Vec::new();
        let mut tags: Vec<DocTag> = Vec::new();

        for line in inner.lines() {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line).trim();

            if let Some(rest) = line.strip_prefix('@') {
                let (name, body) = match rest.find(char::is_whitespace) {
                    Some(pos) => (&rest[..pos], rest[pos..].trim()),
                    None => (rest, ""),
                };
                tags.push(DocTag {
                    name: name.to_string(),
                    body: body.to_string(),
                });
            } else if let Some(tag) = tags.last_mut() {
                if !line.is_empty() {
                    if !tag.body.is_empty() {
                        tag.body.push(' ');
                    }
                    tag.body.push_str(line);
                }
            } else if !line.is_empty() {
                summary.push(line);
            }
        }

        for tag in &tags {
            if TYPED_TAGS.contains(&tag.name.as_str()) {
                split_type(&tag.body).map_err(|_| DocBlockError::UnbalancedType {
                    tag: tag.name.clone(),
                    text: tag.body.clone(),
                })?;
            }
        }

        Ok(DocBlock {
            summary: summary.join(" "),
            tags,
        })
    }

    fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocTag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }

    /// `@param` entries; entries without a `$name` are skipped
    pub fn params(&self) -> Vec<ParamTag> {
        self.tags_named("param")
            .filter_map(|tag| {
                let (type_name, rest) = split_type(&tag.body).ok()?;
                let parsed = parse_param_name(rest);
                if parsed.is_none() {
                    log::debug!("skipping malformed @param `{}`", tag.body);
                }
                let (name, variadic, by_ref, description) = parsed?;
                Some(ParamTag {
                    type_name: type_name.map(str::to_string),
                    name,
                    variadic,
                    by_ref,
                    description,
                })
            })
            .collect()
    }

    /// Type of the first `@return` tag
    pub fn return_type(&self) -> Option<String> {
        self.first_type("return")
    }

    /// Type of the first `@var` tag
    pub fn var_type(&self) -> Option<String> {
        self.first_type("var")
    }

    fn first_type(&self, tag: &str) -> Option<String> {
        self.tags_named(tag)
            .find_map(|t| split_type(&t.body).ok().and_then(|(ty, _)| ty))
            .map(str::to_string)
    }
}

/// Split a tag body into its leading type expression and the rest.
///
/// Bodies starting with a variable (`$x`, `...$x`, `&$x`) have no type.
/// Whitespace ends the type only outside brackets.
fn split_type(body: &str) -> Result<(Option<&str>, &str), ()> {
    let body = body.trim_start();
    if body.is_empty() || body.starts_with('$') || body.starts_with("...") || body.starts_with("&$")
    {
        return Ok((None, body));
    }

    let mut depth: usize = 0;
    let mut end = body.len();
    for (i, c) in body.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => {
                depth = depth.checked_sub(1).ok_or(())?;
            }
            c if c.is_whitespace() && depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(());
    }
    Ok((Some(&body[..end]), body[end..].trim_start()))
}

fn parse_param_name(text: &str) -> Option<(String, bool, bool, String)> {
    let mut rest = text.trim_start();
    let by_ref = match rest.strip_prefix('&') {
        Some(r) => {
            rest = r;
            true
        }
        None => false,
    };
    let variadic = match rest.strip_prefix("...") {
        Some(r) => {
            rest = r;
            true
        }
        None => false,
    };
    let rest = rest.strip_prefix('$')?;
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some((
        rest[..end].to_string(),
        variadic,
        by_ref,
        rest[end..].trim().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_and_return() {
        let doc = DocBlock::parse(
            "/**\n * Compute things.\n *\n * @param int $count how many\n * @param string[] ...$names\n * @return array\n */",
        )
        .unwrap();
        assert_eq!(doc.summary, "Compute things.");
        let params = doc.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].type_name.as_deref(), Some("int"));
        assert_eq!(params[0].name, "count");
        assert_eq!(params[0].description, "how many");
        assert_eq!(params[1].type_name.as_deref(), Some("string[]"));
        assert!(params[1].variadic);
        assert_eq!(doc.return_type().as_deref(), Some("array"));
    }

    #[test]
    fn test_generic_type_with_spaces() {
        let doc = DocBlock::parse("/** @param array<int, string> $map */").unwrap();
        assert_eq!(
            doc.params()[0].type_name.as_deref(),
            Some("array<int, string>")
        );
    }

    #[test]
    fn test_untyped_param() {
        let doc = DocBlock::parse("/** @param $value */").unwrap();
        let params = doc.params();
        assert_eq!(params[0].type_name, None);
        assert_eq!(params[0].name, "value");
    }

    #[test]
    fn test_var_tag() {
        let doc = DocBlock::parse("/** @var bool */").unwrap();
        assert_eq!(doc.var_type().as_deref(), Some("bool"));
    }

    #[test]
    fn test_malformed_param_is_skipped() {
        let doc = DocBlock::parse("/** @param int\n * @param bool $ok */").unwrap();
        let params = doc.params();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "ok");
    }

    #[test]
    fn test_failures() {
        assert_eq!(
            DocBlock::parse("/* plain */"),
            Err(DocBlockError::MissingOpener)
        );
        assert_eq!(
            DocBlock::parse("/** @param int $x"),
            Err(DocBlockError::Unterminated)
        );
        assert!(matches!(
            DocBlock::parse("/** @param array<int $x */"),
            Err(DocBlockError::UnbalancedType { .. })
        ));
    }
}
