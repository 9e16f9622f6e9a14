//! Identifier sanitization for generated type and member names.

use crate::error::{Result, ScaffoldError};
use regex::Regex;
use std::sync::LazyLock;

/// A language-independent identifier: a letter, letter number or connector
/// first, then letters, digits, marks, connectors and format characters.
static VALID_IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{Nl}\p{Pc}][\p{L}\p{Nl}\p{Nd}\p{Mn}\p{Mc}\p{Pc}\p{Cf}]*$").unwrap()
});

/// Every character outside the identifier continuation class.
static INVALID_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{Nl}\p{Nd}\p{Mn}\p{Mc}\p{Pc}\p{Cf}]").unwrap());

static LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{L}").unwrap());

/// Suffix appended to a sanitized procedure name to form its result type.
pub const RESULT_TYPE_SUFFIX: &str = "Result";

/// Check whether `name` is already a valid identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    VALID_IDENTIFIER_RE.is_match(name)
}

/// Turn an arbitrary procedure name into a valid identifier.
///
/// Names that are already valid are returned as-is. Otherwise every
/// character outside the identifier class is dropped and, when the
/// remainder does not start with a letter, an underscore is prepended.
///
/// # Errors
/// Returns `InvalidArgument` for an empty or whitespace-only name.
pub fn sanitize(name: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(ScaffoldError::invalid_argument(
            "name",
            "procedure name must not be blank",
        ));
    }

    let mut identifier = name.to_string();
    if !is_valid_identifier(&identifier) {
        identifier = INVALID_CHARS_RE.replace_all(&identifier, "").into_owned();

        if !LETTER_RE.is_match(&identifier) {
            identifier.insert(0, '_');
        }
    }

    Ok(identifier.replace(' ', ""))
}

/// Name of the generated result-row type for a procedure.
pub fn result_type_name(procedure_name: &str) -> Result<String> {
    Ok(sanitize(procedure_name)? + RESULT_TYPE_SUFFIX)
}
