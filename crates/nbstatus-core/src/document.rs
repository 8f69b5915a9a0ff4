//! Document-model and location collaborators, plus the naming predicate.

use crate::errors::NameError;

/// Characters a document name may not contain (path separators).
pub const FORBIDDEN_NAME_CHARS: [char; 3] = [':', '/', '\\'];

/// Identity of the open document. Owned by the document model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentIdentity {
    pub name: String,
    pub path: String,
    pub base_url: String,
}

/// Handle to the external document model.
///
/// Methods take `&self`: implementations own their interior mutability so
/// the widget and the rename controller can share one `Rc` handle.
pub trait DocumentModel {
    fn name(&self) -> String;

    fn identity(&self) -> DocumentIdentity;

    /// Whether `candidate` is acceptable as a new name.
    fn is_valid_name(&self, candidate: &str) -> bool {
        is_valid_name(candidate)
    }

    /// Start a rename. Completion is signalled later by a
    /// `notebook_renamed` event, never by a return value.
    fn rename(&self, new_name: &str);
}

/// Updates the host's address bar without adding a history entry.
pub trait LocationUpdater {
    fn replace_state(&mut self, path: &str, url: &str);
}

/// Check `candidate` against the naming rules.
///
/// # Errors
///
/// `NameError::Empty` for an empty name, `NameError::ForbiddenChar` for the
/// first path separator found.
pub fn validate_name(candidate: &str) -> Result<(), NameError> {
    if candidate.is_empty() {
        return Err(NameError::Empty);
    }
    match candidate.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        Some(c) => Err(NameError::ForbiddenChar(c)),
        None => Ok(()),
    }
}

pub fn is_valid_name(candidate: &str) -> bool {
    validate_name(candidate).is_ok()
}

/// Join URL parts with `/`, collapse repeated slashes, and percent-encode
/// every path segment.
pub fn url_join_encode(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    let mut collapsed = String::with_capacity(joined.len());
    let mut prev_slash = false;
    for c in joined.chars() {
        if c == '/' && prev_slash {
            continue;
        }
        prev_slash = c == '/';
        collapsed.push(c);
    }

    collapsed
        .split('/')
        .map(encode_uri_component)
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-encode everything outside the URI-component unreserved set.
fn encode_uri_component(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
