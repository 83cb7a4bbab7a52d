use rdfterm::UriParseError;
use std::error::Error;
use std::sync::Arc;
use std::{fmt, io};

/// A position in a text i.e. a `line` number starting from 0, a `column` number starting from 0 (in number of code points) and a global file `offset` starting from 0 (in number of bytes).
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
pub struct TextPosition {
    pub line: u64,
    pub column: u64,
    pub offset: u64,
}

/// Error returned during RDF/XML parsing.
#[derive(Debug, thiserror::Error)]
pub enum RdfXmlParseError {
    /// I/O error during parsing (file not found...).
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An error in the file syntax.
    #[error(transparent)]
    Syntax(#[from] RdfXmlSyntaxError),
}

impl From<RdfXmlParseError> for io::Error {
    #[inline]
    fn from(error: RdfXmlParseError) -> Self {
        match error {
            RdfXmlParseError::Io(error) => error,
            RdfXmlParseError::Syntax(error) => error.into(),
        }
    }
}

/// An error in the syntax of the parsed file.
///
/// It is composed of an [`RdfXmlErrorKind`] and, when the error is tied to an XML construct,
/// the position of this construct in the input.
#[derive(Debug)]
pub struct RdfXmlSyntaxError {
    kind: RdfXmlErrorKind,
    location: Option<TextPosition>,
}

impl RdfXmlSyntaxError {
    #[inline]
    pub(crate) fn new(kind: RdfXmlErrorKind, location: impl Into<Option<TextPosition>>) -> Self {
        Self {
            kind,
            location: location.into(),
        }
    }

    /// Builds an error about malformed XML from a printable error message.
    #[inline]
    pub(crate) fn msg(msg: impl Into<String>, location: impl Into<Option<TextPosition>>) -> Self {
        Self::new(RdfXmlErrorKind::InvalidXml(msg.into()), location)
    }

    /// The rule that has been violated.
    #[inline]
    pub fn kind(&self) -> &RdfXmlErrorKind {
        &self.kind
    }

    /// The location of the faulty construct inside of the file, if known.
    #[inline]
    pub fn location(&self) -> Option<TextPosition> {
        self.location
    }
}

impl fmt::Display for RdfXmlSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location {
            write!(
                f,
                "Parser error at line {} column {}: {}",
                location.line + 1,
                location.column + 1,
                self.kind
            )
        } else {
            self.kind.fmt(f)
        }
    }
}

impl Error for RdfXmlSyntaxError {
    #[inline]
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.kind.source()
    }
}

impl From<RdfXmlSyntaxError> for io::Error {
    #[inline]
    fn from(error: RdfXmlSyntaxError) -> Self {
        match error.kind {
            RdfXmlErrorKind::Xml(quick_xml::Error::Io(error)) => {
                Arc::try_unwrap(error).unwrap_or_else(|e| Self::new(e.kind(), e))
            }
            _ => Self::new(io::ErrorKind::InvalidData, error),
        }
    }
}

/// The RDF/XML grammar or lexical rule violated by the input.
#[derive(Debug, thiserror::Error)]
pub enum RdfXmlErrorKind {
    /// The input is not well-formed XML.
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),
    /// The input is not well-formed XML or is not encoded in UTF-8.
    #[error("{0}")]
    InvalidXml(String),
    /// A namespace prefix is used without being declared.
    #[error("Unknown prefix {prefix}:")]
    UnknownPrefix { prefix: String },
    /// A URI or a URI reference does not resolve to a valid absolute URI.
    #[error("{0}")]
    InvalidUri(#[from] UriParseError),
    /// No `rdf:RDF` element has been found while one was expected.
    #[error("No rdf:RDF element found in the document")]
    NoRdfElement,
    /// The `rdf:RDF` production has been applied to another element.
    #[error("<{uri}> is not rdf:RDF")]
    InvalidRootElement { uri: String },
    /// `rdf:RDF` carries attributes.
    #[error("rdf:RDF does not allow attributes, found <{uri}>")]
    RdfAttributesNotAllowed { uri: String },
    /// A core syntax term is used as element or property attribute.
    #[error("<{uri}> is a core syntax term and is not allowed as {production}")]
    CoreSyntaxTerm {
        uri: String,
        production: &'static str,
    },
    /// One of the terms removed from RDF/XML is used.
    #[error("<{uri}> has been removed from the RDF/XML syntax and is not allowed as {production}")]
    OldTerm {
        uri: String,
        production: &'static str,
    },
    /// `rdf:li` is used as node element or property attribute.
    #[error("rdf:li is not allowed as {production}")]
    ListItemNotAllowed { production: &'static str },
    /// `rdf:Description` is used as property element or property attribute.
    #[error("rdf:Description is not allowed as {production}")]
    DescriptionNotAllowed { production: &'static str },
    /// `rdf:_n` with `n` not being a positive decimal integer without leading zeros.
    #[error("<{uri}> is not a valid container membership property: invalid number")]
    InvalidContainerNumber { uri: String },
    /// A term of the RDF namespace that is not part of the RDF vocabulary.
    #[error("<{uri}> is not a term of the RDF vocabulary")]
    UnknownRdfTerm { uri: String },
    /// More than one of `rdf:ID`, `rdf:nodeID` and `rdf:about` on a node element.
    #[error("A node element allows only one of rdf:ID, rdf:nodeID and rdf:about")]
    ConflictingSubjectAttributes,
    /// An attribute that the selected property element production does not allow.
    #[error("<{uri}> is not allowed on a {production}")]
    UnexpectedAttribute {
        uri: String,
        production: &'static str,
    },
    /// The same RDF attribute is given more than once.
    #[error("<{uri}> is given more than once")]
    DuplicateAttribute { uri: String },
    /// Both `rdf:resource` and `rdf:nodeID` on an empty property element.
    #[error("Not both rdf:resource and rdf:nodeID could be set at the same time")]
    ConflictingObjectAttributes,
    /// A resource property element without exactly one child element.
    #[error("A resource property element must contain exactly one node element, found {count}")]
    SingleChildElementExpected { count: usize },
    /// A literal property element with child elements.
    #[error("A literal property element must not contain elements")]
    ChildElementsNotAllowed,
    /// The content of a `rdf:parseType="Literal"` property element is not well-formed XML.
    #[error("The rdf:XMLLiteral value is not well-formed XML: {0}")]
    InvalidXmlLiteral(#[source] quick_xml::Error),
    /// A `rdf:parseType` value other than `Resource`, `Literal` or `Collection`.
    #[error("rdf:parseType=\"{value}\" is not supported")]
    UnsupportedParseType { value: String },
    /// An attribute production applied to an attribute with another URI.
    #[error("Expected the {expected} attribute, found <{found}>")]
    AttributeUriMismatch {
        expected: &'static str,
        found: String,
    },
    /// A `rdf:parseType` attribute production applied to another value.
    #[error("Expected rdf:parseType=\"{expected}\", found \"{found}\"")]
    InvalidParseTypeValue {
        expected: &'static str,
        found: String,
    },
    /// A `rdf:ID` or `rdf:nodeID` value that is not an XML NCName.
    #[error("{value} is not a valid {attribute} value")]
    InvalidId {
        value: String,
        attribute: &'static str,
    },
    /// A `rdf:ID` resolving to a URI already used as subject.
    #[error("<{uri}> has already been used as rdf:ID value")]
    DuplicateId { uri: String },
    /// Elements are nested deeper than allowed.
    #[error("XML elements are nested deeper than the limit of {max_depth}")]
    NestingTooDeep { max_depth: usize },
}
