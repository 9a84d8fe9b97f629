//! Canonical identifiers derived from mnemonics.

/// Suffix appended to a canonical identifier to name its metadata constant.
pub const METADATA_SUFFIX: &str = "_OP";

/// Names the generated preamble already defines.
pub const RESERVED_IDENTIFIERS: &[&str] = &["___", "I32", "I64", "F32", "F64"];

/// Uppercase the mnemonic, map `.` and `/` to `_` and drop quote characters.
///
/// `i32.trunc_s/f32` becomes `I32_TRUNC_S_F32`.
pub fn canonical_identifier(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '"' | '\''))
        .map(|c| match c {
            '.' | '/' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Name of the metadata constant for a canonical identifier.
pub fn metadata_identifier(ident: &str) -> String {
    format!("{ident}{METADATA_SUFFIX}")
}

/// Whether `ident` can be emitted as a constant name as-is.
pub fn is_emittable(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() || c == '_' => {}
        _ => return false,
    }
    ident != "_" && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
