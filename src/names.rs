// SPDX-License-Identifier: Apache-2.0

/// Separator between the package and the local name in the debug dump.
pub const DUMP_SEPARATOR: char = '.';

/// Separator between the package and the local name in document keys.
pub const DOCUMENT_SEPARATOR: &str = "::";

/// Converts a dump-style qualified name (`pkg.Type`) into the document key
/// convention (`pkg::Type`). Names that are already normalized are returned
/// unchanged.
pub fn normalize_qualified_name(name: &str) -> String {
    name.replace(DUMP_SEPARATOR, DOCUMENT_SEPARATOR)
}

/// Returns the final segment of a qualified symbol, accepting either
/// separator.
pub fn local_name(symbol: &str) -> &str {
    let after_colons = symbol.rsplit(DOCUMENT_SEPARATOR).next().unwrap_or(symbol);
    after_colons
        .rsplit(DUMP_SEPARATOR)
        .next()
        .unwrap_or(after_colons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_qualified_name() {
        assert_eq!(normalize_qualified_name("test1.Colors_e"), "test1::Colors_e");
        assert_eq!(normalize_qualified_name("a.b.C"), "a::b::C");
        assert_eq!(normalize_qualified_name("m::Color_e"), "m::Color_e");
        assert_eq!(normalize_qualified_name("Bare"), "Bare");
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("test1.Red"), "Red");
        assert_eq!(local_name("a.b.Red"), "Red");
        assert_eq!(local_name("m::Red"), "Red");
        assert_eq!(local_name("Red"), "Red");
    }
}
