//! Hand-written prototype parser.
//!
//! Accepts the restricted declaration shape `<return type> <name>(<param>, ...)`
//! where the return type and every parameter are runs of identifiers and `*`.
//! Does NOT handle nested parentheses, function pointers, arrays or generic
//! types: those are rejected with a [`DefinitionError`] instead of being
//! half-parsed.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CodegenError, Result};

/// Why a single prototype line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("empty definition")]
    Empty,

    #[error("unsupported character '{0}'")]
    UnsupportedCharacter(char),

    #[error("missing '('")]
    MissingOpenParen,

    #[error("definition must end with ')'")]
    MissingCloseParen,

    #[error("nested or unbalanced parentheses are not supported")]
    NestedParentheses,

    #[error("missing function name before '('")]
    MissingName,

    #[error("invalid function name '{0}'")]
    InvalidName(String),

    #[error("missing return type")]
    MissingReturnType,

    #[error("invalid return type '{0}'")]
    InvalidReturnType(String),

    #[error("parameter {0} is empty")]
    EmptyParameter(usize),

    #[error("invalid parameter '{0}'")]
    InvalidParameter(String),
}

/// One parsed native function prototype.
///
/// Constructed once per input line and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    name: String,
    parameters: Vec<String>,
    return_type: String,
}

impl Definition {
    /// Parse a single prototype line.
    ///
    /// Examples:
    /// - `"int br_get_config()"`
    /// - `"void br_foo(x, y)"`
    /// - `"void br_sha256_init(br_sha256_context* ctx)"`
    pub fn parse(input: &str) -> std::result::Result<Self, DefinitionError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DefinitionError::Empty);
        }

        if let Some(c) = input
            .chars()
            .find(|c| !(is_ident_char(*c) || c.is_ascii_whitespace() || matches!(*c, '*' | '(' | ')' | ',')))
        {
            return Err(DefinitionError::UnsupportedCharacter(c));
        }

        let open = input.find('(').ok_or(DefinitionError::MissingOpenParen)?;
        if !input.ends_with(')') {
            return Err(DefinitionError::MissingCloseParen);
        }
        if input.matches('(').count() != 1 || input.matches(')').count() != 1 {
            return Err(DefinitionError::NestedParentheses);
        }

        let head = input[..open].trim_end();
        let (return_type, name) = split_return_and_name(head)?;
        let parameters = parse_parameters(&input[open + 1..input.len() - 1])?;

        Ok(Definition {
            name,
            parameters,
            return_type,
        })
    }

    /// Exported symbol name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter texts ("type + identifier") in declaration order.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Return type text as written, whitespace-normalized.
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// True when the function returns nothing.
    pub fn is_void(&self) -> bool {
        self.return_type == "void"
    }

    /// The normalized prototype: `<return type> <name>(<p1>, <p2>, ...)`.
    pub fn signature(&self) -> String {
        format!("{} {}({})", self.return_type, self.name, self.parameters.join(", "))
    }
}

impl std::fmt::Display for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.signature())
    }
}

/// Parse every non-blank line of a prototypes file.
///
/// Stops at the first malformed line and reports its 1-based line number.
/// Duplicate symbol names are rejected unless `allow_duplicates` is set.
pub fn parse_definitions(text: &str, allow_duplicates: bool) -> Result<Vec<Definition>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut definitions = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let definition = Definition::parse(raw).map_err(|source| CodegenError::InvalidDefinition {
            line,
            text: raw.trim().to_string(),
            source,
        })?;

        if let Some(&first_line) = seen.get(definition.name()) {
            if !allow_duplicates {
                return Err(CodegenError::DuplicateDefinition {
                    name: definition.name,
                    first_line,
                    line,
                });
            }
            tracing::warn!(name = definition.name(), line, first_line, "duplicate definition kept");
        } else {
            seen.insert(definition.name.clone(), line);
        }

        definitions.push(definition);
    }

    Ok(definitions)
}

/// Read and parse a prototypes file.
pub fn load_definitions(path: &Path, allow_duplicates: bool) -> Result<Vec<Definition>> {
    let text = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
    let definitions = parse_definitions(&text, allow_duplicates)?;
    if definitions.is_empty() {
        tracing::warn!(path = %path.display(), "prototypes file contains no definitions");
    }
    Ok(definitions)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(is_ident_char),
        _ => false,
    }
}

/// Tokenize a declaration fragment, splitting on whitespace but keeping `*` as separate tokens.
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for part in s.split_whitespace() {
        let mut remaining = part;
        while !remaining.is_empty() {
            if let Some(star_pos) = remaining.find('*') {
                if star_pos > 0 {
                    tokens.push(&remaining[..star_pos]);
                }
                tokens.push("*");
                remaining = &remaining[star_pos + 1..];
            } else {
                tokens.push(remaining);
                break;
            }
        }
    }
    tokens
}

/// A run of identifiers and `*` that starts with an identifier.
fn is_type_fragment(tokens: &[&str]) -> bool {
    match tokens.first() {
        Some(first) if is_ident(first) => tokens.iter().all(|t| *t == "*" || is_ident(t)),
        _ => false,
    }
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split the text before `(` into return type and function name.
fn split_return_and_name(head: &str) -> std::result::Result<(String, String), DefinitionError> {
    let name_start = head
        .rfind(|c: char| !is_ident_char(c))
        .map(|i| i + 1)
        .unwrap_or(0);
    let name = &head[name_start..];
    if name.is_empty() {
        return Err(DefinitionError::MissingName);
    }
    if !is_ident(name) {
        return Err(DefinitionError::InvalidName(name.to_string()));
    }

    let return_text = head[..name_start].trim();
    if return_text.is_empty() {
        return Err(DefinitionError::MissingReturnType);
    }
    if !is_type_fragment(&tokenize(return_text)) {
        return Err(DefinitionError::InvalidReturnType(return_text.to_string()));
    }

    Ok((normalize_whitespace(return_text), name.to_string()))
}

/// Parse the text between `(` and `)`.
fn parse_parameters(s: &str) -> std::result::Result<Vec<String>, DefinitionError> {
    let s = s.trim();
    if s.is_empty() || s == "void" {
        return Ok(Vec::new());
    }

    let mut params = Vec::new();
    for (i, part) in s.split(',').enumerate() {
        let part = part.trim();
        if part.is_empty() {
            return Err(DefinitionError::EmptyParameter(i + 1));
        }

        // The last token must be the parameter identifier. `void` alone only
        // stands for an empty list.
        let tokens = tokenize(part);
        let ends_with_name = tokens.last().is_some_and(|t| is_ident(t));
        if part == "void" || !ends_with_name || !is_type_fragment(&tokens) {
            return Err(DefinitionError::InvalidParameter(part.to_string()));
        }

        params.push(normalize_whitespace(part));
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_parameters() {
        let def = Definition::parse("int br_get_config()").unwrap();
        assert_eq!(def.name(), "br_get_config");
        assert!(def.parameters().is_empty());
        assert_eq!(def.return_type(), "int");
        assert!(!def.is_void());
    }

    #[test]
    fn parse_void_with_bare_parameters() {
        let def = Definition::parse("void br_foo(x, y)").unwrap();
        assert_eq!(def.name(), "br_foo");
        assert_eq!(def.parameters(), ["x", "y"]);
        assert_eq!(def.return_type(), "void");
        assert!(def.is_void());
    }

    #[test]
    fn parse_typed_parameters() {
        let def = Definition::parse(
            "void br_hmac_drbg_init(br_hmac_drbg_context* ctx, void* digest_class, void* seed, uint seed_len)",
        )
        .unwrap();
        assert_eq!(def.name(), "br_hmac_drbg_init");
        assert_eq!(
            def.parameters(),
            ["br_hmac_drbg_context* ctx", "void* digest_class", "void* seed", "uint seed_len"]
        );
    }

    #[test]
    fn parse_pointer_return() {
        let def = Definition::parse("byte* br_ssl_engine_sendapp_buf(void* cc, nuint* len)").unwrap();
        assert_eq!(def.return_type(), "byte*");
        assert_eq!(def.name(), "br_ssl_engine_sendapp_buf");
        assert!(!def.is_void());
    }

    #[test]
    fn pointer_star_attached_to_name() {
        let def = Definition::parse("void *br_alloc(uint n)").unwrap();
        assert_eq!(def.return_type(), "void *");
        assert_eq!(def.name(), "br_alloc");
        assert!(!def.is_void());
    }

    #[test]
    fn whitespace_is_normalized() {
        let def = Definition::parse("  unsigned   int   br_x ( uint   a ,byte*  b )  ").unwrap();
        assert_eq!(def.return_type(), "unsigned int");
        assert_eq!(def.parameters(), ["uint a", "byte* b"]);
        assert_eq!(def.signature(), "unsigned int br_x(uint a, byte* b)");
    }

    #[test]
    fn void_parameter_list_is_empty() {
        let def = Definition::parse("int br_version(void)").unwrap();
        assert!(def.parameters().is_empty());
        assert_eq!(def.to_string(), "int br_version()");
    }

    #[test]
    fn void_must_be_the_whole_list() {
        assert_eq!(
            Definition::parse("int f(void, int a)"),
            Err(DefinitionError::InvalidParameter("void".into()))
        );
        assert_eq!(
            Definition::parse("int f(int a, void)"),
            Err(DefinitionError::InvalidParameter("void".into()))
        );
        let def = Definition::parse("int f(void* p, int a)").unwrap();
        assert_eq!(def.parameters(), ["void* p", "int a"]);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Definition::parse("   "), Err(DefinitionError::Empty));
    }

    #[test]
    fn rejects_missing_parens() {
        assert_eq!(Definition::parse("int br_x"), Err(DefinitionError::MissingOpenParen));
        assert_eq!(Definition::parse("int br_x(int a"), Err(DefinitionError::MissingCloseParen));
    }

    #[test]
    fn rejects_nested_parentheses() {
        assert_eq!(
            Definition::parse("void br_cb(void (cb)(int), int x)"),
            Err(DefinitionError::NestedParentheses)
        );
        assert_eq!(Definition::parse("int br_x(a))"), Err(DefinitionError::NestedParentheses));
    }

    #[test]
    fn rejects_generics_and_arrays() {
        assert_eq!(
            Definition::parse("int br_x(Span<byte> a)"),
            Err(DefinitionError::UnsupportedCharacter('<'))
        );
        assert_eq!(
            Definition::parse("int br_x(byte a[4])"),
            Err(DefinitionError::UnsupportedCharacter('['))
        );
        assert_eq!(
            Definition::parse("int br_x();"),
            Err(DefinitionError::UnsupportedCharacter(';'))
        );
    }

    #[test]
    fn rejects_missing_name_and_return_type() {
        assert_eq!(Definition::parse("int *(a)"), Err(DefinitionError::MissingName));
        assert_eq!(Definition::parse("br_x(int a)"), Err(DefinitionError::MissingReturnType));
        assert_eq!(
            Definition::parse("int 9lives(int a)"),
            Err(DefinitionError::InvalidName("9lives".into()))
        );
    }

    #[test]
    fn rejects_bad_return_type() {
        assert_eq!(
            Definition::parse("* br_x()"),
            Err(DefinitionError::InvalidReturnType("*".into()))
        );
        assert_eq!(
            Definition::parse("int, br_x()"),
            Err(DefinitionError::InvalidReturnType("int,".into()))
        );
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            Definition::parse("int br_x(int a, , int b)"),
            Err(DefinitionError::EmptyParameter(2))
        );
        assert_eq!(
            Definition::parse("int br_x(byte*)"),
            Err(DefinitionError::InvalidParameter("byte*".into()))
        );
        assert_eq!(
            Definition::parse("int br_x(int 2a)"),
            Err(DefinitionError::InvalidParameter("int 2a".into()))
        );
    }

    #[test]
    fn parse_file_skips_blank_lines() {
        let text = "\u{feff}int br_get_config()\r\n\r\nvoid br_foo(x, y)\n   \n";
        let defs = parse_definitions(text, false).unwrap();
        let names: Vec<_> = defs.iter().map(Definition::name).collect();
        assert_eq!(names, ["br_get_config", "br_foo"]);
    }

    #[test]
    fn parse_file_reports_line_number() {
        let text = "int br_a()\n\nint br_b(\n";
        match parse_definitions(text, false).unwrap_err() {
            CodegenError::InvalidDefinition { line, text, source } => {
                assert_eq!(line, 3);
                assert_eq!(text, "int br_b(");
                assert_eq!(source, DefinitionError::MissingCloseParen);
            }
            other => panic!("expected InvalidDefinition, got {other:?}"),
        }
    }

    #[test]
    fn duplicates_rejected_by_default() {
        let text = "int br_a()\nvoid br_b()\nint br_a(int x)\n";
        match parse_definitions(text, false).unwrap_err() {
            CodegenError::DuplicateDefinition { name, first_line, line } => {
                assert_eq!(name, "br_a");
                assert_eq!(first_line, 1);
                assert_eq!(line, 3);
            }
            other => panic!("expected DuplicateDefinition, got {other:?}"),
        }
    }

    #[test]
    fn duplicates_kept_when_allowed() {
        let text = "int br_a()\nint br_a(int x)\n";
        let defs = parse_definitions(text, true).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[1].parameters(), ["int x"]);
    }

    #[test]
    fn load_missing_file() {
        let err = load_definitions(Path::new("/nonexistent/prototypes.txt"), false).unwrap_err();
        assert!(matches!(err, CodegenError::Io { .. }));
    }
}
