//! Atomic predicates over document text.
//!
//! Every function here is total: empty input, lossily decoded bytes and
//! truncated markup all produce a boolean.

use std::borrow::Cow;

use regex::Regex;

use crate::error::{Result, ValidatorError};

pub const PHP_OPEN: &str = "<?php";
pub const PHP_ECHO_OPEN: &str = "<?=";
pub const SHORT_OPEN: &str = "<?";
pub const FOREIGN_OBJECT_OPEN: &str = "<foreignObject";

/// Form controls recognised inside a foreignObject body.
pub const FORM_CONTROLS: [&str; 4] = ["input", "button", "select", "textarea"];

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ValidatorError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Whether the text carries a PHP opening marker (`<?php` or `<?=`).
#[must_use]
pub fn has_php_marker(text: &str) -> bool {
    text.contains(PHP_OPEN) || text.contains(PHP_ECHO_OPEN)
}

/// Regexes shared by several rules, compiled once per validator.
#[derive(Debug)]
pub struct Primitives {
    php_block: Regex,
    php_echo_block: Regex,
    svg_body: Regex,
    foreign_object_body: Regex,
    namespaced_svg_root: Regex,
    xhtml_ns_on_root: Regex,
    clickable_rect: Regex,
    dangerous: Vec<(String, Regex)>,
    unescaped_echo: Regex,
    input_then_query: Regex,
    query_then_input: Regex,
    parameterized: Regex,
    mixed_block_syntax: Regex,
    keyed_array_read: Regex,
    unterminated_echo: Regex,
    output_call: Regex,
    disallowed_elements: Vec<String>,
    max_document_size: u64,
    extensions: Vec<String>,
}

impl Primitives {
    /// Compile the shared matchers.
    ///
    /// # Errors
    /// Returns [`ValidatorError::InvalidPattern`] if a pattern fails to compile.
    pub fn new(options: &PrimitiveOptions) -> Result<Self> {
        let dangerous = options
            .dangerous_functions
            .iter()
            .map(|name| {
                let pattern = format!(r"\b{}\s*\(", regex::escape(name.trim()));
                compile(&pattern).map(|re| (name.trim().to_string(), re))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            php_block: compile(r"(?s)<\?php.*?\?>")?,
            php_echo_block: compile(r"(?s)<\?=.*?\?>")?,
            svg_body: compile(r"(?s)<svg[^>]*>(.*?)</svg>")?,
            foreign_object_body: compile(r"(?s)<foreignObject[^>]*>(.*?)</foreignObject>")?,
            namespaced_svg_root: compile(r#"<svg[^>]*xmlns=["']http://www\.w3\.org/2000/svg["']"#)?,
            xhtml_ns_on_root: compile(
                r#"<svg[^>]*xmlns:xhtml=["']http://www\.w3\.org/1999/xhtml["']"#,
            )?,
            clickable_rect: compile(r"<rect[^>]*onclick=")?,
            dangerous,
            unescaped_echo: compile(
                r"(?i)(?:\b(?:echo|print)\s*\(?\s*|<\?=\s*)\$_(?:GET|POST|REQUEST)\b",
            )?,
            input_then_query: compile(
                r"(?i)\$_(?:GET|POST|REQUEST)\b[^\n]*?\b(?:mysql_query|mysqli_query|pg_query|query)\s*\(",
            )?,
            query_then_input: compile(
                r"(?i)\b(?:mysql_query|mysqli_query|pg_query|query)\s*\([^\n]*?\$_(?:GET|POST|REQUEST)\b",
            )?,
            parameterized: compile(r"(?i)prepare|bind_?param|bindvalue|escape_string")?,
            mixed_block_syntax: compile(r"\}\s*(?:endforeach|endif|endwhile)\s*;")?,
            keyed_array_read: compile(
                r#"\$[a-zA-Z_][a-zA-Z0-9_]*\s*\[\s*["'][^"'\n]*["']\s*\]"#,
            )?,
            unterminated_echo: compile(r"echo\s+[^;\n]*\n")?,
            output_call: compile(r"(?:echo|print|printf|var_dump)\s*\(")?,
            disallowed_elements: options.disallowed_elements.clone(),
            max_document_size: options.max_document_size,
            extensions: options
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        })
    }

    /// Remove `<?php … ?>` and `<?= … ?>` blocks.
    #[must_use]
    pub fn strip_php(&self, text: &str) -> String {
        let without_php = self.php_block.replace_all(text, "");
        self.php_echo_block.replace_all(&without_php, "").into_owned()
    }

    /// Well-formedness of the markup, ignoring embedded PHP when present.
    #[must_use]
    pub fn is_well_formed(&self, text: &str) -> bool {
        if has_php_marker(text) {
            is_well_formed_xml(&self.strip_php(text))
        } else {
            is_well_formed_xml(text)
        }
    }

    /// Body of the first `<svg …>…</svg>` pair.
    #[must_use]
    pub fn svg_body<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.svg_body
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Body of the first `<foreignObject …>…</foreignObject>` pair.
    #[must_use]
    pub fn foreign_object_body<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.foreign_object_body
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// PHP code inside the SVG element body (short tags count here).
    #[must_use]
    pub fn php_in_svg_body(&self, text: &str) -> bool {
        self.svg_body(text).is_some_and(|body| {
            body.contains(PHP_OPEN) || body.contains(PHP_ECHO_OPEN) || body.contains(SHORT_OPEN)
        })
    }

    /// Namespaced SVG root plus embedded PHP somewhere in the file.
    #[must_use]
    pub fn has_hybrid_structure(&self, text: &str) -> bool {
        self.namespaced_svg_root.is_match(text) && has_php_marker(text)
    }

    /// First foreignObject body contains at least one form control.
    #[must_use]
    pub fn has_form_controls(&self, text: &str) -> bool {
        self.foreign_object_body(text).is_some_and(|body| {
            FORM_CONTROLS.iter().any(|control| {
                body.contains(&format!("<{control}")) || body.contains(&format!("<xhtml:{control}"))
            })
        })
    }

    /// SVG rectangle carrying a click handler.
    #[must_use]
    pub fn has_clickable_rect(&self, text: &str) -> bool {
        self.clickable_rect.is_match(text)
    }

    #[must_use]
    pub fn has_xhtml_namespace_on_root(&self, text: &str) -> bool {
        self.xhtml_ns_on_root.is_match(text)
    }

    /// Deny-listed functions called in the text, in deny-list order.
    #[must_use]
    pub fn dangerous_calls(&self, text: &str) -> Vec<&str> {
        self.dangerous
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// A request superglobal written straight to output.
    #[must_use]
    pub fn echoes_request_input(&self, text: &str) -> bool {
        self.unescaped_echo.is_match(text)
    }

    /// A request superglobal and a raw query call on one line with no
    /// parameterization keyword between them.
    #[must_use]
    pub fn has_sql_injection_shape(&self, text: &str) -> bool {
        self.input_then_query
            .find_iter(text)
            .chain(self.query_then_input.find_iter(text))
            .any(|m| !self.parameterized.is_match(m.as_str()))
    }

    /// Heuristics for code that tends to break at runtime.
    #[must_use]
    pub fn has_runtime_issue(&self, text: &str) -> bool {
        self.mixed_block_syntax.is_match(text)
            || self.has_unassigned_keyed_read(text)
            || self.unterminated_echo.is_match(text)
    }

    /// `$name['key']` read that is not the target of an assignment.
    fn has_unassigned_keyed_read(&self, text: &str) -> bool {
        self.keyed_array_read
            .find_iter(text)
            .any(|m| !text[m.end()..].trim_start().starts_with('='))
    }

    /// Output emitted before `header(` inside a PHP block, or an XML prolog
    /// ahead of a JSON content-type header.
    #[must_use]
    pub fn has_output_before_headers(&self, text: &str) -> bool {
        let in_block = self.php_block.find_iter(text).any(|block| {
            let code = block.as_str();
            code.find("header(")
                .is_some_and(|at| self.output_call.is_match(&code[..at]))
        });
        if in_block {
            return true;
        }
        match (
            text.find("<?xml"),
            text.find("header('Content-Type: application/json')"),
        ) {
            (Some(xml), Some(json)) => xml < json,
            _ => false,
        }
    }

    #[must_use]
    pub fn has_disallowed_element(&self, text: &str) -> bool {
        self.disallowed_elements
            .iter()
            .any(|element| text.contains(&format!("<{}", element.trim())))
    }

    #[must_use]
    pub const fn max_document_size(&self) -> u64 {
        self.max_document_size
    }

    #[must_use]
    pub fn is_target_extension(&self, extension: Option<&str>) -> bool {
        extension.is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Inputs that tune [`Primitives`].
#[derive(Debug, Clone)]
pub struct PrimitiveOptions {
    pub dangerous_functions: Vec<String>,
    pub disallowed_elements: Vec<String>,
    pub max_document_size: u64,
    pub extensions: Vec<String>,
}

impl From<&crate::config::Config> for PrimitiveOptions {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            dangerous_functions: config.rules.dangerous_functions.clone(),
            disallowed_elements: config.rules.disallowed_elements.clone(),
            max_document_size: config.rules.max_document_size,
            extensions: config.scan.extensions.clone(),
        }
    }
}

impl Default for PrimitiveOptions {
    fn default() -> Self {
        Self::from(&crate::config::Config::default())
    }
}

/// Each undeclared prefix costs one reparse; documents needing more are rejected.
const MAX_PREFIX_BINDINGS: usize = 32;

/// Parse `text` as XML. DTDs are allowed; SVG files often carry a doctype.
///
/// An undeclared namespace prefix is a namespace error, not a well-formedness
/// error: the prefix is bound on the root element and the parse retried.
#[must_use]
pub fn is_well_formed_xml(text: &str) -> bool {
    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;

    let mut text = Cow::Borrowed(text);
    for _ in 0..=MAX_PREFIX_BINDINGS {
        let parsed = roxmltree::Document::parse_with_options(&text, options).map(|_| ());
        match parsed {
            Ok(()) => return true,
            Err(roxmltree::Error::UnknownNamespace(prefix, _)) => {
                let Some(bound) = bind_prefix_on_root(&text, &prefix) else {
                    return false;
                };
                text = Cow::Owned(bound);
            }
            Err(_) => return false,
        }
    }
    false
}

fn bind_prefix_on_root(text: &str, prefix: &str) -> Option<String> {
    let at = root_name_end(text)?;
    Some(format!(
        "{} xmlns:{prefix}=\"urn:x-undeclared:{prefix}\"{}",
        &text[..at],
        &text[at..]
    ))
}

/// Byte offset just past the root element's tag name, skipping the prolog.
fn root_name_end(text: &str) -> Option<usize> {
    let mut i = 0;
    while let Some(offset) = text[i..].find('<') {
        let start = i + offset;
        let rest = &text[start..];
        if rest.starts_with("<!--") {
            i = start + rest.find("-->")? + 3;
        } else if rest.starts_with("<?") {
            i = start + rest.find("?>")? + 2;
        } else if rest.starts_with("<!") {
            i = start + declaration_end(rest)?;
        } else {
            let name = rest[1..].find(|c: char| c.is_whitespace() || c == '/' || c == '>')?;
            return Some(start + 1 + name);
        }
    }
    None
}

/// Length of a `<!...>` declaration, internal subset included.
fn declaration_end(decl: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, byte) in decl.bytes().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b'>' if depth == 0 => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Whether the raw bytes are valid UTF-8.
#[must_use]
pub fn is_utf8(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}

/// Size in KiB rounded to two decimals, as shown in size warnings.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn kib(size: u64) -> f64 {
    (size as f64 / 1024.0 * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "primitives_tests.rs"]
mod tests;
