//! Format-preserving version patch.
//!
//! Rewrites the `version` value of the addon object identified by its
//! `transportUrl`, leaving every other byte of the document untouched. The
//! addon object is found by locating the `"transportUrl": "<url>"` pair,
//! walking back to the nearest unmatched `{` and forward to its matching `}`.
//! Brace matching only counts structural braces (outside string literals).

mod scan;

use regex::Regex;
use std::sync::LazyLock;

use scan::Structure;

static VERSION_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""version"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid version field pattern")
});

/// Why a patch left the text unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchMiss {
    #[error("transportUrl not found in catalog text")]
    UrlNotFound,
    #[error("no enclosing object for transportUrl")]
    NoEnclosingObject,
    #[error("unbalanced braces after transportUrl")]
    Unbalanced,
    #[error("no version field in addon object")]
    NoVersionField,
    #[error("version already current")]
    AlreadyCurrent,
}

/// JSON string literal for `s`, quotes included.
fn json_literal(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Patch the version of the addon whose `transportUrl` is `transport_url`,
/// or say why nothing was changed.
pub fn try_patch_version(
    text: &str,
    transport_url: &str,
    new_version: &str,
) -> Result<String, PatchMiss> {
    let structure = Structure::scan(text);

    let pattern = format!(
        r#""transportUrl"\s*:\s*{}"#,
        regex::escape(&json_literal(transport_url))
    );
    let url_field = Regex::new(&pattern).map_err(|_| PatchMiss::UrlNotFound)?;
    let found = url_field
        .find_iter(text)
        .find(|m| structure.is_string_start(m.start()))
        .ok_or(PatchMiss::UrlNotFound)?;

    let start = structure
        .enclosing_open(found.start())
        .ok_or(PatchMiss::NoEnclosingObject)?;
    let end = structure
        .matching_close(found.end())
        .ok_or(PatchMiss::Unbalanced)?;

    let object = &text[start..end];
    let value = VERSION_FIELD
        .captures_iter(object)
        .filter(|c| structure.is_string_start(start + c.get(0).map_or(0, |m| m.start())))
        .find_map(|c| c.get(1))
        .ok_or(PatchMiss::NoVersionField)?;

    let literal = json_literal(new_version);
    let escaped = &literal[1..literal.len() - 1];
    if value.as_str() == escaped {
        return Err(PatchMiss::AlreadyCurrent);
    }

    let value_start = start + value.start();
    let value_end = start + value.end();
    let mut out = String::with_capacity(text.len() + escaped.len());
    out.push_str(&text[..value_start]);
    out.push_str(escaped);
    out.push_str(&text[value_end..]);
    Ok(out)
}

/// Patch the version of the addon whose `transportUrl` is `transport_url`.
///
/// Returns the text unchanged when the addon object or its version field
/// cannot be located; this is not an error for the caller.
pub fn patch_version(text: &str, transport_url: &str, new_version: &str) -> String {
    match try_patch_version(text, transport_url, new_version) {
        Ok(patched) => patched,
        Err(PatchMiss::AlreadyCurrent) => text.to_string(),
        Err(miss) => {
            tracing::warn!(url = transport_url, reason = %miss, "version patch skipped");
            text.to_string()
        }
    }
}
