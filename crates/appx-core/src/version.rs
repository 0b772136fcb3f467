//! Version coercion for the manifest schema
//!
//! The manifest's `Identity` node requires a 4-component dotted
//! version. App descriptors usually carry 2 or 3 components, so the
//! reconciler pads with ".0" segments before writing.

use std::sync::OnceLock;

use regex::Regex;

fn dotted_digit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.\d").expect("static regex"))
}

/// Coerce a dotted version string to the 4-component form the manifest
/// schema requires.
///
/// Counts `.`+digit occurrences; the component count is that plus one
/// for the leading component. Fewer than four components get ".0"
/// appended until four are present. A string with no dotted-digit
/// pattern at all is returned unchanged, since it is either already
/// acceptable or not ours to coerce.
pub fn normalize_version(version: &str) -> String {
    let components = dotted_digit().find_iter(version).count();
    if components == 0 {
        return version.to_string();
    }

    let mut normalized = version.to_string();
    let mut count = components + 1;
    while count < 4 {
        normalized.push_str(".0");
        count += 1;
    }
    normalized
}
