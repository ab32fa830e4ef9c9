//! Raw alternates to the structured template resource.

use base64::Engine;

use crate::error::{CoreError, CoreResult};
use crate::template::{Template, TemplateVersion};

/// What a single-template request should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Representation {
    #[default]
    Resource,
    /// The decoded template icon.
    Image,
    /// The raw readme text.
    Readme,
}

/// A decoded icon, ready to be served as binary content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Decode the stored base64 icon of `template`.
///
/// Corrupt stored data is reported as a validation error.
pub fn decode_icon(template: &Template) -> CoreResult<Icon> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(template.icon.trim())
        .map_err(|e| CoreError::Validation(format!("stored icon for {} is not valid base64: {e}", template.name)))?;

    Ok(Icon {
        filename: template.icon_filename.clone(),
        content_type: content_type_for_filename(&template.icon_filename),
        bytes,
    })
}

/// The readme to serve: the version's own readme when a version was
/// resolved, else the template's.
pub fn readme<'a>(template: &'a Template, version: Option<&'a TemplateVersion>) -> &'a str {
    match version {
        Some(version) => &version.readme,
        None => &template.readme,
    }
}

/// Infer a MIME type from an icon filename extension.
fn content_type_for_filename(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
