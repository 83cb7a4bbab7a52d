use crate::error::{RdfXmlParseError, RdfXmlSyntaxError};
use crate::productions::{DocOptions, Grammar};
use crate::xml::{DEFAULT_MAX_DEPTH, XmlDocument};
use rdfterm::{Graph, UriParseError, UriRef};
use std::env;
use std::io::Read;
use tracing::debug;

/// Environment variable holding the base URI used when none is configured.
pub const DEFAULT_BASE_URI_VAR: &str = "RDFXML_DEFAULT_BASE_URI";

/// Base URI used when none is configured nor set in [`DEFAULT_BASE_URI_VAR`].
pub const DEFAULT_BASE_URI: &str = "http://localhost/";

/// A [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) parser.
///
/// The XML document is fully loaded in memory, then matched against the RDF/XML grammar.
/// Matching stops at the first violation of the grammar: no partial graph is returned.
///
/// ```
/// use rdfgrammar::RdfXmlParser;
/// use rdfterm::{Literal, Triple, UriRef};
///
/// let file = r#"<?xml version="1.0"?>
/// <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
///  <rdf:Description rdf:about="http://example.com/foo">
///    <rdf:type rdf:resource="http://schema.org/Person" />
///    <schema:name>Foo</schema:name>
///  </rdf:Description>
///  <schema:Person rdf:about="http://example.com/bar" schema:name="Bar" />
/// </rdf:RDF>"#;
///
/// let graph = RdfXmlParser::new().parse_str(file)?;
/// assert_eq!(graph.len(), 4);
/// assert!(graph.contains(&Triple::new(
///     UriRef::new("http://example.com/bar")?,
///     UriRef::new("http://schema.org/name")?,
///     Literal::new_simple_literal("Bar"),
/// )));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct RdfXmlParser {
    base: Option<UriRef>,
    expect_rdf_root: bool,
    max_depth: usize,
}

impl Default for RdfXmlParser {
    fn default() -> Self {
        Self {
            base: None,
            expect_rdf_root: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RdfXmlParser {
    /// Builds a new [`RdfXmlParser`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URI used when no `xml:base` is in scope.
    ///
    /// If not set, the value of the `RDFXML_DEFAULT_BASE_URI` environment variable is used,
    /// falling back to `http://localhost/`.
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, UriParseError> {
        self.base = Some(UriRef::new(base_iri)?);
        Ok(self)
    }

    /// If `false`, the document element is matched as a node element instead of looking for
    /// `rdf:RDF` elements.
    ///
    /// ```
    /// use rdfgrammar::RdfXmlParser;
    ///
    /// let file = r#"<schema:Person xmlns:schema="http://schema.org/" xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" rdf:about="http://example.com/bar" schema:name="Bar" />"#;
    /// let graph = RdfXmlParser::new().expect_rdf_root(false).parse_str(file)?;
    /// assert_eq!(graph.len(), 2);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    #[inline]
    pub fn expect_rdf_root(mut self, expect_rdf_root: bool) -> Self {
        self.expect_rdf_root = expect_rdf_root;
        self
    }

    /// Maximal nesting of XML elements. Deeper documents are rejected.
    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses a RDF/XML file from a byte slice. It must be encoded in UTF-8.
    pub fn parse_slice(&self, data: &[u8]) -> Result<Graph, RdfXmlSyntaxError> {
        let document = XmlDocument::parse_slice_with_max_depth(data, self.max_depth)
            .inspect_err(log_failure)?;
        self.parse_document(&document)
    }

    pub fn parse_str(&self, data: &str) -> Result<Graph, RdfXmlSyntaxError> {
        self.parse_slice(data.as_bytes())
    }

    /// Parses a RDF/XML file from a [`Read`] implementation.
    ///
    /// The full input is read before parsing.
    pub fn parse_read(&self, mut read: impl Read) -> Result<Graph, RdfXmlParseError> {
        let mut data = Vec::new();
        read.read_to_end(&mut data)?;
        Ok(self.parse_slice(&data)?)
    }

    /// Matches an already loaded XML document.
    pub fn parse_document(&self, document: &XmlDocument) -> Result<Graph, RdfXmlSyntaxError> {
        let options = DocOptions {
            base_uri: self.base_uri(),
            expect_rdf_root: self.expect_rdf_root,
            max_depth: self.max_depth,
        };
        debug!(
            base_uri = %options.base_uri,
            expect_rdf_root = options.expect_rdf_root,
            "parsing RDF/XML document"
        );
        let mut grammar = Grammar::new();
        let roots = grammar.doc(document, &options).inspect_err(log_failure)?;
        let graph = grammar.into_graph();
        debug!(roots, triples = graph.len(), "RDF/XML document parsed");
        Ok(graph)
    }

    fn base_uri(&self) -> String {
        if let Some(base) = &self.base {
            return base.as_str().to_owned();
        }
        env::var(DEFAULT_BASE_URI_VAR)
            .ok()
            .and_then(|base| UriRef::new(base).ok())
            .map_or_else(|| DEFAULT_BASE_URI.to_owned(), UriRef::into_string)
    }
}

fn log_failure(error: &RdfXmlSyntaxError) {
    debug!(
        kind = %error.kind(),
        line = error.location().map(|l| l.line + 1),
        column = error.location().map(|l| l.column + 1),
        "RDF/XML parsing failed"
    );
}
