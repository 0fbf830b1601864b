// ── Selective configuration filters ──
//
// Turns path specifiers such as `system/radius-server` into the nested
// element filter Junos expects inside `get-configuration`:
//
//   <configuration><system><radius-server/></system></configuration>
//
// Specifiers are emitted in input order with no merging; overlapping
// specifiers simply produce overlapping regions.

use std::fmt;

use crate::error::CoreError;

/// A validated configuration filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFilter {
    paths: Vec<Vec<String>>,
}

impl ConfigFilter {
    /// Validate and collect path specifiers.
    pub fn new<I, S>(specifiers: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = specifiers
            .into_iter()
            .map(|spec| parse_specifier(spec.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { paths })
    }

    /// Number of leaf tags, one per specifier.
    pub fn leaf_count(&self) -> usize {
        self.paths.len()
    }

    /// Nesting depth of each specifier, below the outer container.
    pub fn depths(&self) -> Vec<usize> {
        self.paths.iter().map(Vec::len).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Render the filter expression.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<configuration>");
        for segments in &self.paths {
            let Some((leaf, parents)) = segments.split_last() else {
                continue;
            };
            for parent in parents {
                out.push('<');
                out.push_str(parent);
                out.push('>');
            }
            out.push('<');
            out.push_str(leaf);
            out.push_str("/>");
            for parent in parents.iter().rev() {
                out.push_str("</");
                out.push_str(parent);
                out.push('>');
            }
        }
        out.push_str("</configuration>");
        out
    }
}

impl fmt::Display for ConfigFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

/// Build the filter expression for a list of specifiers in one step.
pub fn build_filter<S: AsRef<str>>(specifiers: &[S]) -> Result<String, CoreError> {
    ConfigFilter::new(specifiers).map(|filter| filter.to_xml())
}

fn parse_specifier(spec: &str) -> Result<Vec<String>, CoreError> {
    let invalid = |reason: &str| CoreError::InvalidFilter {
        specifier: spec.to_owned(),
        reason: reason.to_owned(),
    };

    if spec.is_empty() {
        return Err(invalid("specifier is empty"));
    }
    if spec.starts_with('/') || spec.ends_with('/') {
        return Err(invalid("leading or trailing '/'"));
    }

    spec.split('/')
        .map(|segment| {
            if segment.is_empty() {
                Err(invalid("empty path segment"))
            } else if !is_tag_name(segment) {
                Err(invalid(&format!("'{segment}' is not a valid element name")))
            } else {
                Ok(segment.to_owned())
            }
        })
        .collect()
}

fn is_tag_name(segment: &str) -> bool {
    let mut chars = segment.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
