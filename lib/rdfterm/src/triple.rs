use crate::blank_node::BlankNode;
use crate::literal::Literal;
use crate::uri::UriRef;
use std::fmt;

/// The union of [URI references](UriRef) and [blank nodes](BlankNode).
///
/// It is the set of nodes allowed in the subject position of a [`Triple`].
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Subject {
    Uri(UriRef),
    Blank(BlankNode),
}

impl Subject {
    #[inline]
    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri(_))
    }

    #[inline]
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::Blank(_))
    }
}

impl fmt::Display for Subject {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(node) => node.fmt(f),
            Self::Blank(node) => node.fmt(f),
        }
    }
}

impl From<UriRef> for Subject {
    #[inline]
    fn from(node: UriRef) -> Self {
        Self::Uri(node)
    }
}

impl From<BlankNode> for Subject {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::Blank(node)
    }
}

/// An RDF node: the set of values allowed in the object position of a [`Triple`].
///
/// It is the union of [URI references](UriRef), [blank nodes](BlankNode) and [literals](Literal).
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Node {
    Uri(UriRef),
    Blank(BlankNode),
    Literal(Literal),
}

impl Node {
    #[inline]
    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri(_))
    }

    #[inline]
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for Node {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(node) => node.fmt(f),
            Self::Blank(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<UriRef> for Node {
    #[inline]
    fn from(node: UriRef) -> Self {
        Self::Uri(node)
    }
}

impl From<BlankNode> for Node {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::Blank(node)
    }
}

impl From<Literal> for Node {
    #[inline]
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Subject> for Node {
    #[inline]
    fn from(node: Subject) -> Self {
        match node {
            Subject::Uri(node) => Self::Uri(node),
            Subject::Blank(node) => Self::Blank(node),
        }
    }
}

impl PartialEq<Subject> for Node {
    fn eq(&self, other: &Subject) -> bool {
        match (self, other) {
            (Self::Uri(a), Subject::Uri(b)) => a == b,
            (Self::Blank(a), Subject::Blank(b)) => a == b,
            _ => false,
        }
    }
}

/// An [RDF triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple).
///
/// The default string formatter is returning an N-Triples compatible representation:
/// ```
/// use rdfterm::{Triple, UriRef};
///
/// assert_eq!(
///     "<http://example.com/s> <http://example.com/p> <http://example.com/o>",
///     Triple::new(
///         UriRef::new("http://example.com/s")?,
///         UriRef::new("http://example.com/p")?,
///         UriRef::new("http://example.com/o")?,
///     )
///     .to_string()
/// );
/// # Result::<_,rdfterm::UriParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Triple {
    /// The [subject](https://www.w3.org/TR/rdf11-concepts/#dfn-subject) of this triple.
    pub subject: Subject,

    /// The [predicate](https://www.w3.org/TR/rdf11-concepts/#dfn-predicate) of this triple.
    pub predicate: UriRef,

    /// The [object](https://www.w3.org/TR/rdf11-concepts/#dfn-object) of this triple.
    pub object: Node,
}

impl Triple {
    /// Builds an RDF [triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple).
    #[inline]
    pub fn new(
        subject: impl Into<Subject>,
        predicate: impl Into<UriRef>,
        object: impl Into<Node>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}
