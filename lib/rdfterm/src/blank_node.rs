use rand::random;
use std::fmt;

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// The common way to create a new blank node is to use the [`BlankNode::default()`] function.
/// It generates a random 128 bits identifier, so two generated blank nodes never share an identifier.
///
/// It is also possible to create a blank node from an identifier using [`BlankNode::new_unchecked()`].
/// Two blank nodes built from the same identifier are equal.
///
/// The default string formatter is returning an N-Triples compatible representation:
/// ```
/// use rdfterm::BlankNode;
///
/// assert_eq!("_:a122", BlankNode::new_unchecked("a122").to_string());
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct BlankNode {
    id: String,
}

impl BlankNode {
    /// Creates a blank node from an identifier without validation.
    ///
    /// It is the caller's responsibility to ensure that `id` is a valid identifier,
    /// e.g. an XML `NCName` for `rdf:nodeID` values.
    #[inline]
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the identifier of this blank node.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.id
    }
}

impl fmt::Display for BlankNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

impl Default for BlankNode {
    /// Builds a new blank node with a unique random id.
    #[inline]
    fn default() -> Self {
        // The id must not start with a digit to also be a valid XML name
        loop {
            let id: u128 = random();
            let id = format!("{id:x}");
            if matches!(id.as_bytes().first(), Some(b'a'..=b'f')) {
                return Self { id };
            }
        }
    }
}
