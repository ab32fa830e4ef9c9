//! Compound template identifiers.
//!
//! Grammar:
//!
//! ```text
//! <catalog>:<template>[:<revision-or-version>]
//! <catalog>:<base>*<template>[:<revision-or-version>]
//! ```
//!
//! Parsing is total. Anything that does not match the grammar produces a
//! [`TemplatePath`] with every field empty, which no store lookup can match,
//! so a mistyped identifier always ends up as "not found".

use std::fmt;

use crate::template::TemplateKey;

const SEGMENT_DELIMITER: char = ':';
const BASE_DELIMITER: char = '*';

/// The four components of a compound template identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePath {
    pub catalog: String,
    pub template: String,
    pub base: String,
    /// Empty when the identifier names the template itself.
    pub revision_or_version: String,
}

impl TemplatePath {
    /// Decompose `raw` into its components.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_core::identifier::TemplatePath;
    ///
    /// let path = TemplatePath::parse("library:infra*k8s:12");
    /// assert_eq!(path.catalog, "library");
    /// assert_eq!(path.base, "infra");
    /// assert_eq!(path.template, "k8s");
    /// assert_eq!(path.revision_or_version, "12");
    ///
    /// assert_eq!(TemplatePath::parse("garbage"), TemplatePath::default());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let segments: Vec<&str> = raw.split(SEGMENT_DELIMITER).collect();
        let (catalog, template, revision_or_version) = match segments.as_slice() {
            [catalog, template] => (*catalog, *template, ""),
            [catalog, template, revision_or_version] => (*catalog, *template, *revision_or_version),
            _ => return Self::default(),
        };

        let parts: Vec<&str> = template.split(BASE_DELIMITER).collect();
        let (base, template) = match parts.as_slice() {
            [template] => ("", *template),
            [base, template] => (*base, *template),
            _ => return Self::default(),
        };

        Self {
            catalog: catalog.to_string(),
            template: template.to_string(),
            base: base.to_string(),
            revision_or_version: revision_or_version.to_string(),
        }
    }

    /// Identifier of a template (no version segment).
    pub fn template(catalog: &str, base: &str, template: &str) -> Self {
        Self {
            catalog: catalog.to_string(),
            template: template.to_string(),
            base: base.to_string(),
            revision_or_version: String::new(),
        }
    }

    /// Identifier of a specific revision of a template.
    pub fn revision(key: &TemplateKey, revision: i32) -> Self {
        Self {
            catalog: key.catalog.clone(),
            template: key.name.clone(),
            base: key.base.clone(),
            revision_or_version: revision.to_string(),
        }
    }

    /// The template this identifier refers to, ignoring any version segment.
    pub fn key(&self) -> TemplateKey {
        TemplateKey {
            catalog: self.catalog.clone(),
            base: self.base.clone(),
            name: self.template.clone(),
        }
    }
}

impl fmt::Display for TemplatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEGMENT_DELIMITER}", self.catalog)?;
        if !self.base.is_empty() {
            write!(f, "{}{BASE_DELIMITER}", self.base)?;
        }
        f.write_str(&self.template)?;
        if !self.revision_or_version.is_empty() {
            write!(f, "{SEGMENT_DELIMITER}{}", self.revision_or_version)?;
        }
        Ok(())
    }
}
