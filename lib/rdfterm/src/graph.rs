//! [In-memory implementation](super::Graph) of an ordered collection of triples.
//!
//! Usage example:
//! ```
//! use rdfterm::*;
//!
//! let mut graph = Graph::default();
//!
//! // insertion
//! let ex = UriRef::new("http://example.com")?;
//! let triple = Triple::new(ex.clone(), ex.clone(), ex.clone());
//! graph.add(triple.clone());
//! graph.add(triple.clone());
//!
//! // no deduplication
//! assert_eq!(graph.len(), 2);
//!
//! // simple filter
//! let subject = Subject::from(ex);
//! let results: Vec<_> = graph.triples_for_subject(&subject).collect();
//! assert_eq!(vec![&triple, &triple], results);
//! # Result::<_,Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::*;
use std::collections::HashSet;
use std::fmt;
use std::slice;
use std::vec;

/// An ordered multiset of [triples](Triple).
///
/// Triples are kept in insertion order and are never deduplicated.
/// The set of subjects is indexed so [`Graph::has_subject`] does not scan the triples.
#[derive(Default, Clone)]
pub struct Graph {
    triples: Vec<Triple>,
    subjects: HashSet<Subject>,
}

impl Graph {
    /// Creates a new graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a triple at the end of the graph.
    #[inline]
    pub fn add(&mut self, triple: Triple) {
        if !self.subjects.contains(&triple.subject) {
            self.subjects.insert(triple.subject.clone());
        }
        self.triples.push(triple);
    }

    /// Returns all the triples contained by the graph in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.triples.iter(),
        }
    }

    /// Returns the triples with the given subject in insertion order.
    pub fn triples_for_subject<'a>(
        &'a self,
        subject: &'a Subject,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| t.subject == *subject)
    }

    /// Returns the triples with the given predicate in insertion order.
    pub fn triples_for_predicate<'a>(
        &'a self,
        predicate: &'a UriRef,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.predicate == *predicate)
    }

    /// Checks if some triple of the graph has the given subject.
    #[inline]
    pub fn has_subject(&self, subject: &Subject) -> bool {
        self.subjects.contains(subject)
    }

    /// Checks if the graph contains the given triple.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Returns the number of triples in this graph, counting duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Checks if this graph contains a triple.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = vec::IntoIter<Triple>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.add(triple);
        }
    }
}

impl PartialEq for Graph {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.triples == other.triples
    }
}

impl Eq for Graph {}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.triples).finish()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in self {
            writeln!(f, "{t} .")?;
        }
        Ok(())
    }
}

/// Iterator returned by [`Graph::iter`].
pub struct Iter<'a> {
    inner: slice::Iter<'a, Triple>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Triple;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::rdf;

    fn triple(s: &'static str, o: &'static str) -> Triple {
        Triple::new(
            UriRef::new_static(s),
            UriRef::new_static("http://example.com/p"),
            UriRef::new_static(o),
        )
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut graph = Graph::new();
        graph.add(triple("http://example.com/b", "http://example.com/o"));
        graph.add(triple("http://example.com/a", "http://example.com/o"));
        graph.add(triple("http://example.com/b", "http://example.com/o"));
        assert_eq!(graph.len(), 3);
        let subjects = graph
            .iter()
            .map(|t| t.subject.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            subjects,
            [
                "<http://example.com/b>",
                "<http://example.com/a>",
                "<http://example.com/b>"
            ]
        );
    }

    #[test]
    fn membership() {
        let mut graph = Graph::new();
        let t = triple("http://example.com/a", "http://example.com/o");
        assert!(!graph.contains(&t));
        graph.add(t.clone());
        assert!(graph.contains(&t));
        assert!(graph.has_subject(&UriRef::new_static("http://example.com/a").into()));
        assert!(!graph.has_subject(&UriRef::new_static("http://example.com/o").into()));
    }

    #[test]
    fn subjects_are_indexed_on_every_insertion_path() {
        let mut graph = Graph::from_iter([triple("http://example.com/a", "http://example.com/o")]);
        graph.extend([triple("http://example.com/b", "http://example.com/o")]);
        assert!(graph.has_subject(&UriRef::new_static("http://example.com/a").into()));
        assert!(graph.has_subject(&UriRef::new_static("http://example.com/b").into()));
        assert!(!graph.has_subject(&UriRef::new_static("http://example.com/p").into()));
        let copy = graph.clone();
        assert_eq!(copy, graph);
        assert!(copy.has_subject(&UriRef::new_static("http://example.com/b").into()));
    }

    #[test]
    fn has_subject_scales() {
        let mut graph = Graph::new();
        for i in 0..50_000 {
            let subject = Subject::from(UriRef::new_unchecked(format!("http://example.com/{i}")));
            assert!(!graph.has_subject(&subject));
            graph.add(Triple::new(subject, rdf::VALUE, rdf::NIL));
        }
        assert_eq!(graph.len(), 50_000);
    }

    #[test]
    fn display_as_ntriples() {
        let graph = Graph::from_iter([triple("http://example.com/a", "http://example.com/o")]);
        assert_eq!(
            graph.to_string(),
            "<http://example.com/a> <http://example.com/p> <http://example.com/o> .\n"
        );
    }
}
