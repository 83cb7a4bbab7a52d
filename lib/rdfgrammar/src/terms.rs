//! The [RDF vocabulary term sets](https://www.w3.org/TR/rdf-syntax-grammar/#section-grammar-notation)
//! gating which URIs are allowed where.
//!
//! The sets are built once per process and never change afterwards.

use rdfterm::UriRef;
use rdfterm::vocab::rdf;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Terms with a special meaning in the RDF/XML syntax.
pub const CORE_SYNTAX_TERMS: [UriRef; 7] = [
    rdf::RDF,
    rdf::ID,
    rdf::ABOUT,
    rdf::PARSE_TYPE,
    rdf::RESOURCE,
    rdf::NODE_ID,
    rdf::DATATYPE,
];

/// The core syntax terms plus `rdf:Description` and `rdf:li`.
pub const SYNTAX_TERMS: [UriRef; 2] = [rdf::DESCRIPTION, rdf::LI];

/// Terms removed from the syntax. They are always rejected.
pub const OLD_TERMS: [UriRef; 3] = [rdf::ABOUT_EACH, rdf::ABOUT_EACH_PREFIX, rdf::BAG_ID];

pub const CLASS_TERMS: [UriRef; 9] = [
    rdf::SEQ,
    rdf::BAG,
    rdf::ALT,
    rdf::STATEMENT,
    rdf::PROPERTY,
    rdf::LIST,
    rdf::XML_LITERAL,
    rdf::LANG_STRING,
    rdf::HTML,
];

pub const PROPERTY_TERMS: [UriRef; 7] = [
    rdf::SUBJECT,
    rdf::PREDICATE,
    rdf::OBJECT,
    rdf::TYPE,
    rdf::VALUE,
    rdf::FIRST,
    rdf::REST,
];

pub const RESOURCE_TERMS: [UriRef; 1] = [rdf::NIL];

static CORE_SYNTAX_TERM_SET: LazyLock<HashSet<UriRef>> =
    LazyLock::new(|| CORE_SYNTAX_TERMS.into_iter().collect());

static OLD_TERM_SET: LazyLock<HashSet<UriRef>> =
    LazyLock::new(|| OLD_TERMS.into_iter().collect());

static ALL_RDF_TERM_SET: LazyLock<HashSet<UriRef>> = LazyLock::new(|| {
    CORE_SYNTAX_TERMS
        .into_iter()
        .chain(SYNTAX_TERMS)
        .chain(OLD_TERMS)
        .chain(CLASS_TERMS)
        .chain(PROPERTY_TERMS)
        .chain(RESOURCE_TERMS)
        .collect()
});

/// The set of the [`CORE_SYNTAX_TERMS`].
pub fn core_syntax_terms() -> &'static HashSet<UriRef> {
    &CORE_SYNTAX_TERM_SET
}

/// The set of the [`OLD_TERMS`].
pub fn old_terms() -> &'static HashSet<UriRef> {
    &OLD_TERM_SET
}

/// Every term of the RDF vocabulary known by the parser, `rdf:_n` excluded.
pub fn all_rdf_terms() -> &'static HashSet<UriRef> {
    &ALL_RDF_TERM_SET
}

/// Checks that `n` is the number of a container membership property `rdf:_n`:
/// a positive decimal integer without leading zeros.
pub fn is_container_number(n: &str) -> bool {
    !n.is_empty() && !n.starts_with('0') && n.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn sets_are_built_once() {
        assert!(ptr::eq(core_syntax_terms(), core_syntax_terms()));
        assert!(ptr::eq(old_terms(), old_terms()));
        assert!(ptr::eq(all_rdf_terms(), all_rdf_terms()));
    }

    #[test]
    fn union() {
        assert_eq!(core_syntax_terms().len(), 7);
        assert_eq!(old_terms().len(), 3);
        assert_eq!(all_rdf_terms().len(), 29);
        assert!(core_syntax_terms().is_subset(all_rdf_terms()));
        assert!(old_terms().is_subset(all_rdf_terms()));
        assert!(all_rdf_terms().contains(&rdf::LI));
        assert!(!all_rdf_terms().contains(&rdf::member(1)));
    }

    #[test]
    fn container_numbers() {
        assert!(is_container_number("1"));
        assert!(is_container_number("120"));
        assert!(!is_container_number("0"));
        assert!(!is_container_number("01"));
        assert!(!is_container_number(""));
        assert!(!is_container_number("1a"));
        assert!(!is_container_number("-1"));
    }
}
