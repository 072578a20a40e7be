//! URL templates with RFC 6570 style placeholders.
//!
//! Supported expressions:
//!
//! - `{name}` - simple expansion, the value is percent-encoded
//! - `{+name}` - reserved expansion, the value is inserted as-is
//! - `{?a,b}` - query expansion of the parameters that are present
//! - `{&a,b}` - query continuation, for templates that already carry a `?`
//!
//! Simple and reserved expressions may list several names, whose values are
//! joined with `,`.

use std::fmt;

use crate::error::{HarvestError, Result};
use crate::request::PathParams;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Simple(Vec<String>),
    Reserved(Vec<String>),
    Query { names: Vec<String>, leading: char },
}

/// A parsed URL template.
///
/// # Example
///
/// ```
/// use harvestapi::{PathParams, UrlTemplate};
///
/// let template = UrlTemplate::parse("{+baseurl}/clients/{client_id}").unwrap();
/// let path = PathParams::new()
///     .with("baseurl", "https://api.harvestapp.com/v2")
///     .with("client_id", 42);
///
/// let url = template.expand(&path, &[]).unwrap();
/// assert_eq!(url, "https://api.harvestapp.com/v2/clients/42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    source: String,
    parts: Vec<Part>,
}

impl UrlTemplate {
    /// Parse a template string.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::InvalidTemplate`] for unbalanced braces, empty
    /// expressions, invalid names and unsupported operators.
    pub fn parse(template: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            push_literal(template, &mut parts, &rest[..open])?;
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid(template, "unclosed expression"))?;
            parts.push(parse_expression(template, &after[..close])?);
            rest = &after[close + 1..];
        }
        push_literal(template, &mut parts, rest)?;

        Ok(Self {
            source: template.to_string(),
            parts,
        })
    }

    /// The original template text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names that must be supplied as path parameters.
    pub fn path_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().flat_map(|part| match part {
            Part::Simple(names) | Part::Reserved(names) => names.as_slice(),
            _ => &[][..],
        })
        .map(String::as_str)
    }

    /// Query keys declared by `{?...}` and `{&...}` expressions, in order.
    pub fn query_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().flat_map(|part| match part {
            Part::Query { names, .. } => names.as_slice(),
            _ => &[][..],
        })
        .map(String::as_str)
    }

    /// Expand the template.
    ///
    /// `query` holds already formatted key/value pairs. Each declared query
    /// key present in `query` is emitted once, in template order; undeclared
    /// keys are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::MissingPathParameter`] if a path placeholder
    /// has no value or an empty one, and
    /// [`HarvestError::InvalidPathParameter`] if a `{name}` value is `.` or
    /// `..`.
    pub fn expand(&self, path: &PathParams, query: &[(String, String)]) -> Result<String> {
        let mut url = String::with_capacity(self.source.len() + 32);

        for part in &self.parts {
            match part {
                Part::Literal(text) => url.push_str(text),
                Part::Simple(names) => {
                    let values = self.lookup(path, names)?;
                    // URL parsing would resolve these as dot segments.
                    if let Some((name, value)) = names
                        .iter()
                        .zip(&values)
                        .find(|(_, value)| matches!(**value, "." | ".."))
                    {
                        return Err(HarvestError::InvalidPathParameter {
                            name: name.clone(),
                            value: value.to_string(),
                            template: self.source.clone(),
                        });
                    }
                    let encoded: Vec<_> = values.iter().map(|v| urlencoding::encode(v)).collect();
                    url.push_str(&encoded.join(","));
                }
                Part::Reserved(names) => {
                    url.push_str(&self.lookup(path, names)?.join(","));
                }
                Part::Query { names, leading } => {
                    let mut separator = *leading;
                    for name in names {
                        if let Some((key, value)) = query.iter().find(|(key, _)| key == name) {
                            url.push(separator);
                            url.push_str(&urlencoding::encode(key));
                            url.push('=');
                            url.push_str(&urlencoding::encode(value));
                            separator = '&';
                        }
                    }
                }
            }
        }

        for (key, _) in query {
            if !self.query_names().any(|name| name == key.as_str()) {
                tracing::warn!(%key, template = %self.source, "query parameter not declared by template");
            }
        }

        Ok(url)
    }

    fn lookup<'a>(&self, path: &'a PathParams, names: &[String]) -> Result<Vec<&'a str>> {
        names
            .iter()
            .map(|name| match path.get(name) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(HarvestError::MissingPathParameter {
                    name: name.clone(),
                    template: self.source.clone(),
                }),
            })
            .collect()
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn push_literal(template: &str, parts: &mut Vec<Part>, text: &str) -> Result<()> {
    if text.contains('}') {
        return Err(invalid(template, "unmatched '}'"));
    }
    if !text.is_empty() {
        parts.push(Part::Literal(text.to_string()));
    }
    Ok(())
}

fn parse_expression(template: &str, expr: &str) -> Result<Part> {
    let mut chars = expr.chars();
    let Some(first) = chars.next() else {
        return Err(invalid(template, "empty expression"));
    };

    let body = chars.as_str();
    let part = match first {
        '+' => Part::Reserved(parse_names(template, body)?),
        '?' => Part::Query {
            names: parse_names(template, body)?,
            leading: '?',
        },
        '&' => Part::Query {
            names: parse_names(template, body)?,
            leading: '&',
        },
        '#' | '.' | '/' | ';' | '=' | ',' | '!' | '@' | '|' => {
            return Err(invalid(template, &format!("unsupported operator '{first}'")));
        }
        _ => Part::Simple(parse_names(template, expr)?),
    };
    Ok(part)
}

fn parse_names(template: &str, body: &str) -> Result<Vec<String>> {
    body.split(',')
        .map(|name| {
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
            if valid {
                Ok(name.to_string())
            } else {
                Err(invalid(template, &format!("invalid variable name '{name}'")))
            }
        })
        .collect()
}

fn invalid(template: &str, reason: &str) -> HarvestError {
    HarvestError::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
