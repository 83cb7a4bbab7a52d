//! The event model: the XML tree seen through RDF/XML eyes.
//!
//! Each [`EventElement`] exposes the expanded URI of the XML element, its RDF relevant
//! attributes, its base URI and language (both inherited through `xml:base` and `xml:lang`)
//! and the mutable state the grammar needs while matching: the subject it describes and the
//! `rdf:li` counter.

use crate::c14n::canonicalize_content;
use crate::error::{RdfXmlErrorKind, RdfXmlSyntaxError, TextPosition};
use crate::utils::is_nc_name;
use crate::xml::XmlElement;
use rdfterm::vocab::{rdf, xml};
use rdfterm::{Subject, UriRef};
use std::rc::Rc;

/// Index of an [`EventElement`] inside of an [`EventTree`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct ElementId(usize);

/// The context inherited by an element from its ancestors.
#[derive(Debug, Clone)]
pub struct Scope {
    base_uri: Rc<str>,
    language: Option<Rc<str>>,
    prefixes: Rc<[(String, String)]>,
}

impl Scope {
    /// The scope outside of the document element.
    pub fn new(default_base_uri: &str) -> Self {
        Self {
            base_uri: default_base_uri.into(),
            language: None,
            prefixes: Rc::new([]),
        }
    }

    /// The scope inside of `element`, taking into account its `xmlns`, `xml:base` and `xml:lang` attributes.
    pub fn enter(&self, element: &XmlElement) -> Result<Self, RdfXmlSyntaxError> {
        let mut scope = self.clone();
        let mut declarations = element.namespace_declarations().peekable();
        if declarations.peek().is_some() {
            scope.prefixes = self
                .prefixes
                .iter()
                .cloned()
                .chain(declarations.map(|(p, n)| (p.to_owned(), n.to_owned())))
                .collect();
        }
        for attribute in element.attributes() {
            if attribute.namespace() != Some(xml::NAMESPACE) {
                continue;
            }
            match attribute.local_name() {
                "base" => {
                    let base = UriRef::resolve(&self.base_uri, attribute.value())
                        .map_err(|e| RdfXmlSyntaxError::new(e.into(), attribute.position()))?;
                    scope.base_uri = base.into_string().into();
                }
                "lang" => {
                    // xml:lang="" removes the inherited language
                    scope.language = if attribute.value().is_empty() {
                        None
                    } else {
                        Some(attribute.value().to_ascii_lowercase().into())
                    };
                }
                _ => (),
            }
        }
        Ok(scope)
    }

    #[inline]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Expands `value` if it is a QName using an in-scope prefix.
    fn expand_qname(&self, value: &str) -> Option<String> {
        let (prefix, local_name) = value.split_once(':')?;
        if !is_nc_name(prefix) {
            return None;
        }
        let (_, namespace) = self.prefixes.iter().rev().find(|(p, _)| p == prefix)?;
        Some(format!("{namespace}{local_name}"))
    }
}

/// An XML element as seen by the RDF/XML grammar.
#[derive(Debug, Clone)]
pub struct EventElement<'a> {
    name: String,
    attributes: Vec<EventAttribute>,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    scope: Scope,
    source: Option<&'a XmlElement>,
    position: TextPosition,
    subject: Option<Subject>,
    li_counter: u64,
}

impl<'a> EventElement<'a> {
    /// The element expanded name: its namespace followed by its local name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element expanded name as an absolute URI.
    pub fn uri(&self) -> Result<UriRef, RdfXmlSyntaxError> {
        UriRef::new(self.name.as_str()).map_err(|e| RdfXmlSyntaxError::new(e.into(), self.position))
    }

    /// Checks if the expanded name of this element is `uri`.
    #[inline]
    pub fn is(&self, uri: &UriRef) -> bool {
        self.name == uri.as_str()
    }

    /// The RDF attributes: `xml:*` attributes, namespace declarations and unqualified attributes are left out.
    #[inline]
    pub fn attributes(&self) -> &[EventAttribute] {
        &self.attributes
    }

    #[inline]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    #[inline]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[inline]
    pub fn base_uri(&self) -> &str {
        self.scope.base_uri()
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.scope.language()
    }

    /// The concatenation of the text children of the element.
    pub fn text(&self) -> String {
        self.source.map(XmlElement::text).unwrap_or_default()
    }

    /// The element content in exclusive canonical XML form.
    pub fn xml_literal(&self) -> String {
        self.source.map(canonicalize_content).unwrap_or_default()
    }

    #[inline]
    pub fn position(&self) -> TextPosition {
        self.position
    }

    /// The subject described by this element, once known.
    #[inline]
    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }
}

/// An RDF relevant attribute of an [`EventElement`].
#[derive(Debug, Clone)]
pub struct EventAttribute {
    name: String,
    value: String,
    element: ElementId,
    position: TextPosition,
}

impl EventAttribute {
    /// The attribute expanded name: its namespace followed by its local name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> Result<UriRef, RdfXmlSyntaxError> {
        UriRef::new(self.name.as_str()).map_err(|e| RdfXmlSyntaxError::new(e.into(), self.position))
    }

    #[inline]
    pub fn is(&self, uri: &UriRef) -> bool {
        self.name == uri.as_str()
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The element carrying this attribute.
    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    pub fn position(&self) -> TextPosition {
        self.position
    }
}

/// Arena owning the [`EventElement`]s of a parse.
///
/// Elements refer to their parent and their children by [`ElementId`].
#[derive(Debug, Default)]
pub struct EventTree<'a> {
    elements: Vec<EventElement<'a>>,
}

impl<'a> EventTree<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `source` and all its descendants to the tree.
    ///
    /// `scope` is the scope of the parent of `source`.
    pub fn build(
        &mut self,
        source: &'a XmlElement,
        scope: &Scope,
        max_depth: usize,
    ) -> Result<ElementId, RdfXmlSyntaxError> {
        self.build_element(source, None, scope, max_depth)
    }

    fn build_element(
        &mut self,
        source: &'a XmlElement,
        parent: Option<ElementId>,
        parent_scope: &Scope,
        remaining_depth: usize,
    ) -> Result<ElementId, RdfXmlSyntaxError> {
        if remaining_depth == 0 {
            return Err(RdfXmlSyntaxError::new(
                RdfXmlErrorKind::NestingTooDeep {
                    max_depth: self.depth(parent),
                },
                source.position(),
            ));
        }
        let scope = parent_scope.enter(source)?;
        let id = ElementId(self.elements.len());
        let attributes = source
            .attributes()
            .iter()
            .filter_map(|attribute| {
                let namespace = attribute.namespace()?;
                if namespace == xml::NAMESPACE || namespace == xml::XMLNS_NAMESPACE {
                    return None;
                }
                let value = scope
                    .expand_qname(attribute.value())
                    .unwrap_or_else(|| attribute.value().to_owned());
                Some(EventAttribute {
                    name: format!("{namespace}{}", attribute.local_name()),
                    value,
                    element: id,
                    position: attribute.position(),
                })
            })
            .collect();
        self.elements.push(EventElement {
            name: source.expanded_name(),
            attributes,
            children: Vec::new(),
            parent,
            scope: scope.clone(),
            source: Some(source),
            position: source.position(),
            subject: None,
            li_counter: 1,
        });
        let mut children = Vec::new();
        for child in source.child_elements() {
            children.push(self.build_element(child, Some(id), &scope, remaining_depth - 1)?);
        }
        self.elements[id.0].children = children;
        Ok(id)
    }

    fn depth(&self, mut element: Option<ElementId>) -> usize {
        let mut depth = 0;
        while let Some(id) = element {
            depth += 1;
            element = self.elements[id.0].parent;
        }
        depth
    }

    #[inline]
    pub fn element(&self, id: ElementId) -> &EventElement<'a> {
        &self.elements[id.0]
    }

    /// Sets the subject described by the element.
    pub fn set_subject(&mut self, id: ElementId, subject: Subject) {
        self.elements[id.0].subject = Some(subject);
    }

    /// The subject of the parent element, if known.
    pub fn parent_subject(&self, id: ElementId) -> Option<&Subject> {
        self.element(self.element(id).parent?).subject()
    }

    /// Renames an `rdf:li` element to the next `rdf:_n` of its parent and bumps the parent counter.
    pub fn expand_list(&mut self, id: ElementId) -> UriRef {
        let Some(parent) = self.elements[id.0].parent else {
            return rdf::LI;
        };
        let parent = &mut self.elements[parent.0];
        let uri = rdf::member(parent.li_counter);
        parent.li_counter += 1;
        self.elements[id.0].name = uri.as_str().to_owned();
        uri
    }

    /// Adds an `rdf:Description` element taking over the children of `property`, describing `subject`.
    ///
    /// It inherits the base URI and the language of `property`.
    pub fn synthesize_description(&mut self, property: ElementId, subject: Subject) -> ElementId {
        let id = ElementId(self.elements.len());
        let property_element = &self.elements[property.0];
        let description = EventElement {
            name: rdf::DESCRIPTION.as_str().to_owned(),
            attributes: Vec::new(),
            children: property_element.children.clone(),
            parent: Some(property),
            scope: property_element.scope.clone(),
            source: None,
            position: property_element.position,
            subject: Some(subject),
            li_counter: 1,
        };
        for child in &description.children {
            self.elements[child.0].parent = Some(id);
        }
        self.elements.push(description);
        id
    }
}

/// Collects the `rdf:RDF` elements of the tree rooted at `root` in document order.
///
/// The search goes on inside of found elements, so nested ones are returned too.
/// Each element is returned with the scope of its parent.
pub fn find_rdf_elements<'a>(
    root: &'a XmlElement,
    scope: &Scope,
) -> Result<Vec<(&'a XmlElement, Scope)>, RdfXmlSyntaxError> {
    let mut found = Vec::new();
    let mut stack = vec![(root, scope.clone())];
    while let Some((element, scope)) = stack.pop() {
        let inner = scope.enter(element)?;
        if element.namespace() == Some(rdf::NAMESPACE) && element.local_name() == "RDF" {
            found.push((element, scope));
        }
        let mut children = element.child_elements().collect::<Vec<_>>();
        children.reverse();
        stack.extend(children.into_iter().map(|child| (child, inner.clone())));
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    const DEFAULT_BASE: &str = "http://default.example/";

    fn build(document: &XmlDocument) -> (EventTree<'_>, ElementId) {
        let mut tree = EventTree::new();
        let root = tree
            .build(document.root(), &Scope::new(DEFAULT_BASE), 100)
            .unwrap();
        (tree, root)
    }

    #[test]
    fn base_and_language_are_inherited() {
        let document = XmlDocument::parse_str(
            r#"<a xmlns="http://ex/" xml:base="http://base/dir/" xml:lang="EN"><b xml:base="sub/"><c xml:lang=""/></b><d/></a>"#,
        )
        .unwrap();
        let (tree, root) = build(&document);
        let a = tree.element(root);
        assert_eq!(a.base_uri(), "http://base/dir/");
        assert_eq!(a.language(), Some("en"));
        let b = tree.element(a.children()[0]);
        assert_eq!(b.base_uri(), "http://base/dir/sub/");
        assert_eq!(b.language(), Some("en"));
        let c = tree.element(b.children()[0]);
        assert_eq!(c.language(), None);
        assert_eq!(c.parent(), Some(a.children()[0]));
        let d = tree.element(a.children()[1]);
        assert_eq!(d.base_uri(), "http://base/dir/");
    }

    #[test]
    fn prefixes_are_shared_until_redeclared() {
        let document = XmlDocument::parse_str(
            r#"<a xmlns="http://ex/" xmlns:p="http://p/"><b/><c/><d xmlns:q="http://q/"/></a>"#,
        )
        .unwrap();
        let (tree, root) = build(&document);
        let a = tree.element(root);
        let [b, c, d] = a.children() else {
            panic!("three children are expected")
        };
        assert!(Rc::ptr_eq(&a.scope.prefixes, &tree.element(*b).scope.prefixes));
        assert!(Rc::ptr_eq(&a.scope.prefixes, &tree.element(*c).scope.prefixes));
        let d = &tree.element(*d).scope;
        assert_eq!(d.prefixes.len(), 3);
        assert_eq!(d.expand_qname("p:x").as_deref(), Some("http://p/x"));
        assert_eq!(d.expand_qname("q:x").as_deref(), Some("http://q/x"));
    }

    #[test]
    fn default_base() {
        let document = XmlDocument::parse_str(r#"<a xmlns="http://ex/"/>"#).unwrap();
        let (tree, root) = build(&document);
        assert_eq!(tree.element(root).base_uri(), DEFAULT_BASE);
        assert_eq!(tree.element(root).language(), None);
        assert_eq!(tree.element(root).uri().unwrap(), "http://ex/a");
    }

    #[test]
    fn attributes_are_filtered_and_expanded() {
        let document = XmlDocument::parse_str(
            r#"<a xmlns="http://ex/" xmlns:ex="http://ex/" xml:lang="en" plain="1" ex:q="ex:foo" ex:r="http://x/"/>"#,
        )
        .unwrap();
        let (tree, root) = build(&document);
        let attributes = tree.element(root).attributes();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].name(), "http://ex/q");
        assert_eq!(attributes[0].value(), "http://ex/foo");
        assert_eq!(attributes[0].element(), root);
        assert_eq!(attributes[1].value(), "http://x/");
    }

    #[test]
    fn list_expansion() {
        let document = XmlDocument::parse_str(
            r#"<rdf:Seq xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><rdf:li/><rdf:li/></rdf:Seq>"#,
        )
        .unwrap();
        let (mut tree, root) = build(&document);
        let children = tree.element(root).children().to_vec();
        assert_eq!(tree.expand_list(children[0]), rdf::member(1));
        assert_eq!(tree.expand_list(children[1]), rdf::member(2));
        assert!(tree.element(children[1]).is(&rdf::member(2)));
    }

    #[test]
    fn description_synthesis() {
        let document =
            XmlDocument::parse_str(r#"<a xmlns="http://ex/" xml:lang="fr"><b/><c/></a>"#).unwrap();
        let (mut tree, root) = build(&document);
        let subject = Subject::from(rdfterm::BlankNode::default());
        let description = tree.synthesize_description(root, subject.clone());
        let element = tree.element(description);
        assert!(element.is(&rdf::DESCRIPTION));
        assert_eq!(element.subject(), Some(&subject));
        assert_eq!(element.language(), Some("fr"));
        assert_eq!(element.children().len(), 2);
        let first_child = element.children()[0];
        assert_eq!(tree.element(first_child).parent(), Some(description));
        assert_eq!(tree.parent_subject(first_child), Some(&subject));
    }

    #[test]
    fn rdf_elements_are_found_in_document_order() {
        let document = XmlDocument::parse_str(
            r#"<doc xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xml:base="http://b/"><rdf:RDF xml:lang="en"><rdf:RDF/></rdf:RDF><x xml:lang="de"><rdf:RDF/></x></doc>"#,
        )
        .unwrap();
        let found = find_rdf_elements(document.root(), &Scope::new(DEFAULT_BASE)).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].1.base_uri(), "http://b/");
        assert_eq!(found[0].1.language(), None);
        assert_eq!(found[0].0.child_elements().count(), 1);
        assert_eq!(found[1].1.language(), Some("en"));
        assert!(found[1].0.children().is_empty());
        assert_eq!(found[2].1.language(), Some("de"));
    }

    #[test]
    fn depth_limit() {
        let document = XmlDocument::parse_str(r#"<a xmlns="http://ex/"><b><c/></b></a>"#).unwrap();
        let mut tree = EventTree::new();
        tree.build(document.root(), &Scope::new(DEFAULT_BASE), 3)
            .unwrap();
        let error = EventTree::new()
            .build(document.root(), &Scope::new(DEFAULT_BASE), 2)
            .unwrap_err();
        assert!(matches!(
            error.kind(),
            RdfXmlErrorKind::NestingTooDeep { max_depth: 2 }
        ));
    }
}
