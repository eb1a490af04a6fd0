//! Extracts the JSON document from a raw template file.
//!
//! Template files are JSON wrapped in free text (comments, headers, the odd
//! trailing note). Everything between the first `{` and the last `}` is
//! taken as the document.

use serde_json::Value;

use super::TemplateError;

/// Parse a template file's contents into a JSON document.
///
/// Falls back to parsing the whole trimmed text when no `{ ... }` span
/// exists, so a bare JSON array or scalar still reports a useful error.
pub fn parse_template(content: &str) -> Result<Value, TemplateError> {
    let candidate = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content.trim(),
    };

    serde_json::from_str(candidate).map_err(TemplateError::Parse)
}
