use crate::uri::UriRef;
use std::fmt;
use std::fmt::Write;

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// It is either a plain literal, with an optional language tag, or a typed literal with a datatype URI.
///
/// The default string formatter is returning an N-Triples compatible representation:
/// ```
/// use rdfterm::{Literal, UriRef};
///
/// assert_eq!(
///     "\"foo\\nbar\"",
///     Literal::new_simple_literal("foo\nbar").to_string()
/// );
///
/// assert_eq!(
///     "\"1999-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>",
///     Literal::new_typed_literal(
///         "1999-01-01",
///         UriRef::new("http://www.w3.org/2001/XMLSchema#date")?
///     )
///     .to_string()
/// );
///
/// assert_eq!(
///     "\"foo\"@en",
///     Literal::new_language_tagged_literal("foo", "en").to_string()
/// );
/// # Result::<_,rdfterm::UriParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Literal(LiteralContent);

#[derive(PartialEq, Eq, Debug, Clone, Hash)]
enum LiteralContent {
    Plain {
        value: String,
        language: Option<String>,
    },
    Typed {
        value: String,
        datatype: UriRef,
    },
}

impl Literal {
    /// Builds a plain literal without language tag.
    #[inline]
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self::new_plain_literal(value, None)
    }

    /// Builds a plain literal with a language tag.
    ///
    /// The tag is kept as written: no BCP47 validation is done.
    #[inline]
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::new_plain_literal(value, Some(language.into()))
    }

    /// Builds a plain literal with an optional language tag.
    ///
    /// An empty language tag is the same as no language tag.
    #[inline]
    pub fn new_plain_literal(value: impl Into<String>, language: Option<String>) -> Self {
        Self(LiteralContent::Plain {
            value: value.into(),
            language: language.filter(|l| !l.is_empty()),
        })
    }

    /// Builds a literal with a [datatype](https://www.w3.org/TR/rdf11-concepts/#dfn-datatype-iri).
    #[inline]
    pub fn new_typed_literal(value: impl Into<String>, datatype: impl Into<UriRef>) -> Self {
        Self(LiteralContent::Typed {
            value: value.into(),
            datatype: datatype.into(),
        })
    }

    /// The literal [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
    #[inline]
    pub fn value(&self) -> &str {
        match &self.0 {
            LiteralContent::Plain { value, .. } | LiteralContent::Typed { value, .. } => value,
        }
    }

    /// The language tag of a plain literal, if any.
    #[inline]
    pub fn language(&self) -> Option<&str> {
        match &self.0 {
            LiteralContent::Plain { language, .. } => language.as_deref(),
            LiteralContent::Typed { .. } => None,
        }
    }

    /// The datatype of a typed literal.
    #[inline]
    pub fn datatype(&self) -> Option<&UriRef> {
        match &self.0 {
            LiteralContent::Plain { .. } => None,
            LiteralContent::Typed { datatype, .. } => Some(datatype),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print_quoted_str(self.value(), f)?;
        match &self.0 {
            LiteralContent::Plain {
                language: Some(language),
                ..
            } => write!(f, "@{language}"),
            LiteralContent::Plain { language: None, .. } => Ok(()),
            LiteralContent::Typed { datatype, .. } => write!(f, "^^{datatype}"),
        }
    }
}

fn print_quoted_str(string: &str, f: &mut impl Write) -> fmt::Result {
    f.write_char('"')?;
    for c in string.chars() {
        match c {
            '\u{08}' => f.write_str("\\b"),
            '\t' => f.write_str("\\t"),
            '\n' => f.write_str("\\n"),
            '\u{0C}' => f.write_str("\\f"),
            '\r' => f.write_str("\\r"),
            '"' => f.write_str("\\\""),
            '\\' => f.write_str("\\\\"),
            '\0'..='\u{1F}' | '\u{7F}' => write!(f, "\\u{:04X}", u32::from(c)),
            _ => f.write_char(c),
        }?;
    }
    f.write_char('"')
}
