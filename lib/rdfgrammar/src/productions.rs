//! The [RDF/XML grammar](https://www.w3.org/TR/rdf-syntax-grammar/#section-Infoset-Grammar)
//! productions.
//!
//! Each production validates an element of the [`EventTree`] and appends the triples it
//! denotes to the output [`Graph`]. The first violation aborts the matching.

use crate::c14n::check_well_formed;
use crate::error::{RdfXmlErrorKind, RdfXmlSyntaxError, TextPosition};
use crate::event::{ElementId, EventAttribute, EventElement, EventTree, Scope, find_rdf_elements};
use crate::terms::{all_rdf_terms, core_syntax_terms, is_container_number, old_terms};
use crate::utils::{is_nc_name, is_whitespace_str};
use crate::xml::XmlDocument;
use rdfterm::vocab::rdf;
use rdfterm::{BlankNode, Graph, Literal, Node, Subject, Triple, UriRef};
use tracing::trace;

/// The alternatives of the property element production.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ElementShape {
    ParseTypeLiteral,
    ParseTypeResource,
    ParseTypeCollection,
    ParseTypeOther,
    Resource,
    Literal,
    Empty,
}

/// Selects the property element production to apply to `element`.
///
/// The first matching rule wins:
/// 1. `rdf:parseType` decides if present,
/// 2. child elements make a resource property element,
/// 3. `rdf:datatype` or some non white space text make a literal property element,
/// 4. anything else is an empty property element.
pub fn classify(element: &EventElement<'_>) -> ElementShape {
    if let Some(parse_type) = element
        .attributes()
        .iter()
        .find(|a| a.is(&rdf::PARSE_TYPE))
    {
        return match parse_type.value() {
            "Literal" => ElementShape::ParseTypeLiteral,
            "Resource" => ElementShape::ParseTypeResource,
            "Collection" => ElementShape::ParseTypeCollection,
            _ => ElementShape::ParseTypeOther,
        };
    }
    if !element.children().is_empty() {
        ElementShape::Resource
    } else if element.attributes().iter().any(|a| a.is(&rdf::DATATYPE))
        || !is_whitespace_str(&element.text())
    {
        ElementShape::Literal
    } else {
        ElementShape::Empty
    }
}

/// How a document is matched.
#[derive(Debug, Clone)]
pub struct DocOptions {
    pub base_uri: String,
    pub expect_rdf_root: bool,
    pub max_depth: usize,
}

/// The grammar state of a parse: the event tree being matched and the triples found so far.
#[derive(Debug, Default)]
pub struct Grammar<'a> {
    tree: EventTree<'a>,
    graph: Graph,
}

impl<'a> Grammar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Entry point: matches the `rdf:RDF` elements of the document or, if they are not expected,
    /// its document element as a node element.
    ///
    /// Returns the number of matched roots.
    pub fn doc(
        &mut self,
        document: &'a XmlDocument,
        options: &DocOptions,
    ) -> Result<usize, RdfXmlSyntaxError> {
        let scope = Scope::new(&options.base_uri);
        if !options.expect_rdf_root {
            trace!(element = %document.root().expanded_name(), "bare node element list");
            let root = self.tree.build(document.root(), &scope, options.max_depth)?;
            self.node_element_list(&[root])?;
            return Ok(1);
        }
        let roots = find_rdf_elements(document.root(), &scope)?;
        if roots.is_empty() {
            return Err(RdfXmlSyntaxError::new(
                RdfXmlErrorKind::NoRdfElement,
                document.root().position(),
            ));
        }
        for (element, scope) in &roots {
            let root = self.tree.build(element, scope, options.max_depth)?;
            self.rdf(root)?;
        }
        Ok(roots.len())
    }

    pub fn rdf(&mut self, id: ElementId) -> Result<(), RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        trace!(element = element.name(), "rdf:RDF");
        if !element.is(&rdf::RDF) {
            return Err(RdfXmlSyntaxError::new(
                RdfXmlErrorKind::InvalidRootElement {
                    uri: element.name().to_owned(),
                },
                element.position(),
            ));
        }
        if let Some(attribute) = element.attributes().first() {
            return Err(RdfXmlSyntaxError::new(
                RdfXmlErrorKind::RdfAttributesNotAllowed {
                    uri: attribute.name().to_owned(),
                },
                attribute.position(),
            ));
        }
        let children = element.children().to_vec();
        self.node_element_list(&children)
    }

    pub fn node_element_list(&mut self, elements: &[ElementId]) -> Result<(), RdfXmlSyntaxError> {
        for element in elements {
            self.node_element(*element)?;
        }
        Ok(())
    }

    /// Matches a node element and returns the subject it describes.
    pub fn node_element(&mut self, id: ElementId) -> Result<Subject, RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        trace!(element = element.name(), "node element");
        let uri = node_element_uris(element)?;

        let mut subject_attribute = None;
        let mut property_attributes = Vec::new();
        for attribute in element.attributes() {
            if attribute.is(&rdf::ID) || attribute.is(&rdf::NODE_ID) || attribute.is(&rdf::ABOUT)
            {
                if subject_attribute.is_some() {
                    return Err(RdfXmlSyntaxError::new(
                        RdfXmlErrorKind::ConflictingSubjectAttributes,
                        attribute.position(),
                    ));
                }
                subject_attribute = Some(attribute);
            } else {
                property_attributes.push(attribute);
            }
        }

        let subject: Subject = match subject_attribute {
            Some(attribute) if attribute.is(&rdf::ID) => {
                id_attribute(attribute, &self.tree, &self.graph)?.into()
            }
            Some(attribute) if attribute.is(&rdf::NODE_ID) => node_id_attribute(attribute)?.into(),
            Some(attribute) => about_attribute(attribute, &self.tree)?.into(),
            None => element
                .subject()
                .cloned()
                .unwrap_or_else(|| BlankNode::default().into()),
        };

        if !element.is(&rdf::DESCRIPTION) {
            self.graph
                .add(Triple::new(subject.clone(), rdf::TYPE, uri));
        }
        for attribute in property_attributes {
            let (predicate, object) = property_attribute(attribute, &self.tree)?;
            self.graph
                .add(Triple::new(subject.clone(), predicate, object));
        }

        let children = element.children().to_vec();
        self.tree.set_subject(id, subject.clone());
        self.property_element_list(&children)?;
        Ok(subject)
    }

    pub fn property_element_list(&mut self, elements: &[ElementId]) -> Result<(), RdfXmlSyntaxError> {
        for element in elements {
            self.property_element(*element)?;
        }
        Ok(())
    }

    /// Matches a property element with the alternative selected by [`classify`].
    ///
    /// The statement subject is the one of the parent node element.
    pub fn property_element(&mut self, id: ElementId) -> Result<(), RdfXmlSyntaxError> {
        if self.tree.element(id).is(&rdf::LI) {
            self.tree.expand_list(id);
        }
        let element = self.tree.element(id);
        let subject = self.tree.parent_subject(id).cloned().ok_or_else(|| {
            RdfXmlSyntaxError::msg(
                format!("The property element {} has no subject", element.name()),
                element.position(),
            )
        })?;
        let subject = &subject;
        let predicate = property_element_uris(element)?;
        let shape = classify(element);
        trace!(element = element.name(), ?shape, "property element");
        match shape {
            ElementShape::ParseTypeLiteral => {
                self.parse_type_literal_property_element(id, subject, predicate)
            }
            ElementShape::ParseTypeResource => {
                self.parse_type_resource_property_element(id, subject, predicate)
            }
            ElementShape::ParseTypeCollection => {
                self.parse_type_collection_property_element(id, subject, predicate)
            }
            ElementShape::ParseTypeOther => self.parse_type_other_property_element(id),
            ElementShape::Resource => self.resource_property_element(id, subject, predicate),
            ElementShape::Literal => self.literal_property_element(id, subject, predicate),
            ElementShape::Empty => self.empty_property_element(id, subject, predicate),
        }
    }

    pub fn resource_property_element(
        &mut self,
        id: ElementId,
        subject: &Subject,
        predicate: UriRef,
    ) -> Result<(), RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        let attributes = PropertyAttributes::partition(
            element,
            "resource property element",
            &[rdf::ID],
            false,
        )?;
        let reification = attributes
            .id
            .map(|a| id_attribute(a, &self.tree, &self.graph))
            .transpose()?;
        let [child] = element.children() else {
            return Err(RdfXmlSyntaxError::new(
                RdfXmlErrorKind::SingleChildElementExpected {
                    count: element.children().len(),
                },
                element.position(),
            ));
        };
        let child = *child;
        let object = self.node_element(child)?;
        self.emit(subject, predicate, object.into(), reification);
        Ok(())
    }

    pub fn literal_property_element(
        &mut self,
        id: ElementId,
        subject: &Subject,
        predicate: UriRef,
    ) -> Result<(), RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        let attributes = PropertyAttributes::partition(
            element,
            "literal property element",
            &[rdf::ID, rdf::DATATYPE],
            false,
        )?;
        if !element.children().is_empty() {
            return Err(RdfXmlSyntaxError::new(
                RdfXmlErrorKind::ChildElementsNotAllowed,
                element.position(),
            ));
        }
        let reification = attributes
            .id
            .map(|a| id_attribute(a, &self.tree, &self.graph))
            .transpose()?;
        let object = if let Some(datatype) = attributes.datatype {
            Literal::new_typed_literal(element.text(), datatype_attribute(datatype, &self.tree)?)
        } else {
            Literal::new_plain_literal(element.text(), element.language().map(str::to_owned))
        };
        self.emit(subject, predicate, object.into(), reification);
        Ok(())
    }

    pub fn empty_property_element(
        &mut self,
        id: ElementId,
        subject: &Subject,
        predicate: UriRef,
    ) -> Result<(), RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        let attributes = PropertyAttributes::partition(
            element,
            "empty property element",
            &[rdf::ID, rdf::RESOURCE, rdf::NODE_ID],
            true,
        )?;
        if let (Some(_), Some(node_id)) = (attributes.resource, attributes.node_id) {
            return Err(RdfXmlSyntaxError::new(
                RdfXmlErrorKind::ConflictingObjectAttributes,
                node_id.position(),
            ));
        }
        let reification = attributes
            .id
            .map(|a| id_attribute(a, &self.tree, &self.graph))
            .transpose()?;

        let object: Node = if attributes.resource.is_none()
            && attributes.node_id.is_none()
            && attributes.properties.is_empty()
        {
            Literal::new_plain_literal("", element.language().map(str::to_owned)).into()
        } else {
            let resource: Subject = if let Some(resource) = attributes.resource {
                resource_attribute(resource, &self.tree)?.into()
            } else if let Some(node_id) = attributes.node_id {
                node_id_attribute(node_id)?.into()
            } else {
                BlankNode::default().into()
            };
            for attribute in attributes.properties {
                let (property, value) = property_attribute(attribute, &self.tree)?;
                self.graph
                    .add(Triple::new(resource.clone(), property, value));
            }
            resource.into()
        };
        self.emit(subject, predicate, object, reification);
        Ok(())
    }

    pub fn parse_type_literal_property_element(
        &mut self,
        id: ElementId,
        subject: &Subject,
        predicate: UriRef,
    ) -> Result<(), RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        let attributes = PropertyAttributes::partition(
            element,
            "parseType=\"Literal\" property element",
            &[rdf::ID, rdf::PARSE_TYPE],
            false,
        )?;
        parse_literal_attribute(attributes.required_parse_type(element, "Literal")?)?;
        let reification = attributes
            .id
            .map(|a| id_attribute(a, &self.tree, &self.graph))
            .transpose()?;
        let value = element.xml_literal();
        check_well_formed(&value).map_err(|e| {
            RdfXmlSyntaxError::new(RdfXmlErrorKind::InvalidXmlLiteral(e), element.position())
        })?;
        let object = Literal::new_typed_literal(value, rdf::XML_LITERAL);
        self.emit(subject, predicate, object.into(), reification);
        Ok(())
    }

    pub fn parse_type_resource_property_element(
        &mut self,
        id: ElementId,
        subject: &Subject,
        predicate: UriRef,
    ) -> Result<(), RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        let attributes = PropertyAttributes::partition(
            element,
            "parseType=\"Resource\" property element",
            &[rdf::ID, rdf::PARSE_TYPE],
            false,
        )?;
        parse_resource_attribute(attributes.required_parse_type(element, "Resource")?)?;
        let reification = attributes
            .id
            .map(|a| id_attribute(a, &self.tree, &self.graph))
            .transpose()?;
        let has_children = !element.children().is_empty();

        let node = BlankNode::default();
        self.emit(subject, predicate, node.clone().into(), reification);
        if has_children {
            let description = self.tree.synthesize_description(id, node.into());
            self.node_element(description)?;
        }
        Ok(())
    }

    pub fn parse_type_collection_property_element(
        &mut self,
        id: ElementId,
        subject: &Subject,
        predicate: UriRef,
    ) -> Result<(), RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        let attributes = PropertyAttributes::partition(
            element,
            "parseType=\"Collection\" property element",
            &[rdf::ID, rdf::PARSE_TYPE],
            false,
        )?;
        parse_collection_attribute(attributes.required_parse_type(element, "Collection")?)?;
        let reification = attributes
            .id
            .map(|a| id_attribute(a, &self.tree, &self.graph))
            .transpose()?;
        let children = element.children().to_vec();

        let spine = children
            .iter()
            .map(|_| BlankNode::default())
            .collect::<Vec<_>>();
        let mut items = Vec::with_capacity(children.len());
        for child in children {
            items.push(self.node_element(child)?);
        }
        let head: Node = match spine.first() {
            Some(head) => head.clone().into(),
            None => rdf::NIL.into(),
        };
        self.emit(subject, predicate, head, reification);
        for (i, (node, item)) in spine.iter().zip(items).enumerate() {
            self.graph
                .add(Triple::new(node.clone(), rdf::FIRST, item));
            let rest: Node = match spine.get(i + 1) {
                Some(next) => next.clone().into(),
                None => rdf::NIL.into(),
            };
            self.graph.add(Triple::new(node.clone(), rdf::REST, rest));
        }
        Ok(())
    }

    /// Other parse types are not supported: this production always fails.
    pub fn parse_type_other_property_element(
        &mut self,
        id: ElementId,
    ) -> Result<(), RdfXmlSyntaxError> {
        let element = self.tree.element(id);
        let (value, position) = element
            .attributes()
            .iter()
            .find(|a| a.is(&rdf::PARSE_TYPE))
            .map_or((String::new(), element.position()), |a| {
                (a.value().to_owned(), a.position())
            });
        Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::UnsupportedParseType { value },
            position,
        ))
    }

    /// Adds `(subject, predicate, object)` and its reification if `reification` is set.
    fn emit(
        &mut self,
        subject: &Subject,
        predicate: UriRef,
        object: Node,
        reification: Option<UriRef>,
    ) {
        self.graph.add(Triple::new(
            subject.clone(),
            predicate.clone(),
            object.clone(),
        ));
        if let Some(reification) = reification {
            reify(&mut self.graph, subject.clone(), predicate, object, reification);
        }
    }
}

/// Appends to `graph` the four triples describing the statement `(subject, predicate, object)`
/// identified by `reification`.
///
/// ```
/// use rdfgrammar::reify;
/// use rdfterm::{Graph, Literal, UriRef};
///
/// let mut graph = Graph::new();
/// reify(
///     &mut graph,
///     UriRef::new("http://example.com/s")?.into(),
///     UriRef::new("http://example.com/p")?,
///     Literal::new_simple_literal("o").into(),
///     UriRef::new("http://example.com/#statement")?,
/// );
/// assert_eq!(graph.len(), 4);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn reify(
    graph: &mut Graph,
    subject: Subject,
    predicate: UriRef,
    object: Node,
    reification: UriRef,
) {
    graph.add(Triple::new(
        reification.clone(),
        rdf::TYPE,
        rdf::STATEMENT,
    ));
    graph.add(Triple::new(reification.clone(), rdf::SUBJECT, subject));
    graph.add(Triple::new(reification.clone(), rdf::PREDICATE, predicate));
    graph.add(Triple::new(reification, rdf::OBJECT, object));
}

/// The RDF attributes of a property element, sorted by role.
#[derive(Default)]
struct PropertyAttributes<'e> {
    id: Option<&'e EventAttribute>,
    datatype: Option<&'e EventAttribute>,
    parse_type: Option<&'e EventAttribute>,
    resource: Option<&'e EventAttribute>,
    node_id: Option<&'e EventAttribute>,
    properties: Vec<&'e EventAttribute>,
}

impl<'e> PropertyAttributes<'e> {
    /// Sorts the attributes of `element`.
    ///
    /// Core syntax terms must be in `allowed`, and may be given only once.
    /// Other attributes are property attributes, only accepted if `allow_property_attributes` is set.
    fn partition(
        element: &'e EventElement<'_>,
        production: &'static str,
        allowed: &[UriRef],
        allow_property_attributes: bool,
    ) -> Result<Self, RdfXmlSyntaxError> {
        let mut attributes = Self::default();
        for attribute in element.attributes() {
            let is_syntax_term = core_syntax_terms().iter().any(|t| attribute.is(t));
            if !is_syntax_term && allow_property_attributes {
                attributes.properties.push(attribute);
                continue;
            }
            if !allowed.iter().any(|t| attribute.is(t)) {
                return Err(RdfXmlSyntaxError::new(
                    RdfXmlErrorKind::UnexpectedAttribute {
                        uri: attribute.name().to_owned(),
                        production,
                    },
                    attribute.position(),
                ));
            }
            let slot = if attribute.is(&rdf::ID) {
                &mut attributes.id
            } else if attribute.is(&rdf::DATATYPE) {
                &mut attributes.datatype
            } else if attribute.is(&rdf::PARSE_TYPE) {
                &mut attributes.parse_type
            } else if attribute.is(&rdf::RESOURCE) {
                &mut attributes.resource
            } else {
                &mut attributes.node_id
            };
            if slot.is_some() {
                return Err(RdfXmlSyntaxError::new(
                    RdfXmlErrorKind::DuplicateAttribute {
                        uri: attribute.name().to_owned(),
                    },
                    attribute.position(),
                ));
            }
            *slot = Some(attribute);
        }
        Ok(attributes)
    }

    fn required_parse_type(
        &self,
        element: &EventElement<'_>,
        expected: &'static str,
    ) -> Result<&'e EventAttribute, RdfXmlSyntaxError> {
        self.parse_type.ok_or_else(|| {
            RdfXmlSyntaxError::new(
                RdfXmlErrorKind::InvalidParseTypeValue {
                    expected,
                    found: String::new(),
                },
                element.position(),
            )
        })
    }
}

/// Validates the URI of a node element.
pub fn node_element_uris(element: &EventElement<'_>) -> Result<UriRef, RdfXmlSyntaxError> {
    const PRODUCTION: &str = "node element";
    let uri = element.uri()?;
    let position = element.position();
    reject_core_syntax_term(&uri, PRODUCTION, position)?;
    if uri == rdf::LI {
        return Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::ListItemNotAllowed {
                production: PRODUCTION,
            },
            position,
        ));
    }
    reject_old_term(&uri, PRODUCTION, position)?;
    check_rdf_namespace_term(&uri, position)?;
    Ok(uri)
}

/// Validates the URI of a property element, once `rdf:li` has been expanded.
pub fn property_element_uris(element: &EventElement<'_>) -> Result<UriRef, RdfXmlSyntaxError> {
    const PRODUCTION: &str = "property element";
    let uri = element.uri()?;
    let position = element.position();
    reject_core_syntax_term(&uri, PRODUCTION, position)?;
    reject_description(&uri, PRODUCTION, position)?;
    reject_old_term(&uri, PRODUCTION, position)?;
    check_rdf_namespace_term(&uri, position)?;
    Ok(uri)
}

/// Validates the URI of a property attribute.
pub fn property_attribute_uris(attribute: &EventAttribute) -> Result<UriRef, RdfXmlSyntaxError> {
    const PRODUCTION: &str = "property attribute";
    let uri = attribute.uri()?;
    let position = attribute.position();
    reject_core_syntax_term(&uri, PRODUCTION, position)?;
    reject_description(&uri, PRODUCTION, position)?;
    if uri == rdf::LI {
        return Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::ListItemNotAllowed {
                production: PRODUCTION,
            },
            position,
        ));
    }
    reject_old_term(&uri, PRODUCTION, position)?;
    check_rdf_namespace_term(&uri, position)?;
    Ok(uri)
}

fn reject_core_syntax_term(
    uri: &UriRef,
    production: &'static str,
    position: TextPosition,
) -> Result<(), RdfXmlSyntaxError> {
    if core_syntax_terms().contains(uri) {
        return Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::CoreSyntaxTerm {
                uri: uri.as_str().to_owned(),
                production,
            },
            position,
        ));
    }
    Ok(())
}

fn reject_old_term(
    uri: &UriRef,
    production: &'static str,
    position: TextPosition,
) -> Result<(), RdfXmlSyntaxError> {
    if old_terms().contains(uri) {
        return Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::OldTerm {
                uri: uri.as_str().to_owned(),
                production,
            },
            position,
        ));
    }
    Ok(())
}

fn reject_description(
    uri: &UriRef,
    production: &'static str,
    position: TextPosition,
) -> Result<(), RdfXmlSyntaxError> {
    if *uri == rdf::DESCRIPTION {
        return Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::DescriptionNotAllowed { production },
            position,
        ));
    }
    Ok(())
}

/// Terms of the RDF namespace must be `rdf:_n` container membership properties or part of the vocabulary.
fn check_rdf_namespace_term(uri: &UriRef, position: TextPosition) -> Result<(), RdfXmlSyntaxError> {
    let Some(local_name) = uri.as_str().strip_prefix(rdf::NAMESPACE) else {
        return Ok(());
    };
    if let Some(n) = local_name.strip_prefix('_') {
        if !is_container_number(n) {
            return Err(RdfXmlSyntaxError::new(
                RdfXmlErrorKind::InvalidContainerNumber {
                    uri: uri.as_str().to_owned(),
                },
                position,
            ));
        }
    } else if !all_rdf_terms().contains(uri) {
        return Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::UnknownRdfTerm {
                uri: uri.as_str().to_owned(),
            },
            position,
        ));
    }
    Ok(())
}

/// The triple part denoted by a property attribute: `rdf:type` values are URIs, others are literals.
fn property_attribute(
    attribute: &EventAttribute,
    tree: &EventTree<'_>,
) -> Result<(UriRef, Node), RdfXmlSyntaxError> {
    let predicate = property_attribute_uris(attribute)?;
    let object = if predicate == rdf::TYPE {
        resolve(attribute, tree, attribute.value())?.into()
    } else {
        let language = tree.element(attribute.element()).language();
        Literal::new_plain_literal(attribute.value(), language.map(str::to_owned)).into()
    };
    Ok((predicate, object))
}

/// Resolves `relative` against the base URI of the element carrying `attribute`.
fn resolve(
    attribute: &EventAttribute,
    tree: &EventTree<'_>,
    relative: &str,
) -> Result<UriRef, RdfXmlSyntaxError> {
    UriRef::resolve(tree.element(attribute.element()).base_uri(), relative)
        .map_err(|e| RdfXmlSyntaxError::new(e.into(), attribute.position()))
}

fn expect_uri(
    attribute: &EventAttribute,
    expected: &UriRef,
    name: &'static str,
) -> Result<(), RdfXmlSyntaxError> {
    if attribute.is(expected) {
        Ok(())
    } else {
        Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::AttributeUriMismatch {
                expected: name,
                found: attribute.name().to_owned(),
            },
            attribute.position(),
        ))
    }
}

fn check_id(attribute: &EventAttribute, name: &'static str) -> Result<(), RdfXmlSyntaxError> {
    if is_nc_name(attribute.value()) {
        Ok(())
    } else {
        Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::InvalidId {
                value: attribute.value().to_owned(),
                attribute: name,
            },
            attribute.position(),
        ))
    }
}

/// `rdf:ID`: returns the URI `#id` resolved against the element base URI.
///
/// The URI must not already be the subject of a triple of `graph`.
pub fn id_attribute(
    attribute: &EventAttribute,
    tree: &EventTree<'_>,
    graph: &Graph,
) -> Result<UriRef, RdfXmlSyntaxError> {
    expect_uri(attribute, &rdf::ID, "rdf:ID")?;
    check_id(attribute, "rdf:ID")?;
    let uri = resolve(attribute, tree, &format!("#{}", attribute.value()))?;
    if graph.has_subject(&Subject::from(uri.clone())) {
        return Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::DuplicateId {
                uri: uri.into_string(),
            },
            attribute.position(),
        ));
    }
    Ok(uri)
}

/// `rdf:nodeID`: returns the named blank node.
pub fn node_id_attribute(attribute: &EventAttribute) -> Result<BlankNode, RdfXmlSyntaxError> {
    expect_uri(attribute, &rdf::NODE_ID, "rdf:nodeID")?;
    check_id(attribute, "rdf:nodeID")?;
    Ok(BlankNode::new_unchecked(attribute.value()))
}

pub fn about_attribute(
    attribute: &EventAttribute,
    tree: &EventTree<'_>,
) -> Result<UriRef, RdfXmlSyntaxError> {
    expect_uri(attribute, &rdf::ABOUT, "rdf:about")?;
    resolve(attribute, tree, attribute.value())
}

pub fn resource_attribute(
    attribute: &EventAttribute,
    tree: &EventTree<'_>,
) -> Result<UriRef, RdfXmlSyntaxError> {
    expect_uri(attribute, &rdf::RESOURCE, "rdf:resource")?;
    resolve(attribute, tree, attribute.value())
}

pub fn datatype_attribute(
    attribute: &EventAttribute,
    tree: &EventTree<'_>,
) -> Result<UriRef, RdfXmlSyntaxError> {
    expect_uri(attribute, &rdf::DATATYPE, "rdf:datatype")?;
    resolve(attribute, tree, attribute.value())
}

fn expect_parse_type(
    attribute: &EventAttribute,
    expected: &'static str,
) -> Result<(), RdfXmlSyntaxError> {
    expect_uri(attribute, &rdf::PARSE_TYPE, "rdf:parseType")?;
    if attribute.value() == expected {
        Ok(())
    } else {
        Err(RdfXmlSyntaxError::new(
            RdfXmlErrorKind::InvalidParseTypeValue {
                expected,
                found: attribute.value().to_owned(),
            },
            attribute.position(),
        ))
    }
}

pub fn parse_literal_attribute(attribute: &EventAttribute) -> Result<(), RdfXmlSyntaxError> {
    expect_parse_type(attribute, "Literal")
}

pub fn parse_resource_attribute(attribute: &EventAttribute) -> Result<(), RdfXmlSyntaxError> {
    expect_parse_type(attribute, "Resource")
}

pub fn parse_collection_attribute(attribute: &EventAttribute) -> Result<(), RdfXmlSyntaxError> {
    expect_parse_type(attribute, "Collection")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RDF_NS: &str = r#"xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/""#;

    fn with_tree<T>(data: &str, f: impl FnOnce(&mut Grammar<'_>, ElementId) -> T) -> T {
        let document = XmlDocument::parse_str(data).unwrap();
        let mut grammar = Grammar::new();
        let root = grammar
            .tree
            .build(document.root(), &Scope::new("http://base.example/doc"), 100)
            .unwrap();
        f(&mut grammar, root)
    }

    fn shape_of(data: &str) -> ElementShape {
        with_tree(data, |grammar, root| {
            let property = grammar.tree.element(root).children()[0];
            classify(grammar.tree.element(property))
        })
    }

    #[test]
    fn classification() {
        for (content, expected) in [
            (r#"<ex:p rdf:parseType="Literal"><ex:a/></ex:p>"#, ElementShape::ParseTypeLiteral),
            (r#"<ex:p rdf:parseType="Resource"/>"#, ElementShape::ParseTypeResource),
            (r#"<ex:p rdf:parseType="Collection"/>"#, ElementShape::ParseTypeCollection),
            (r#"<ex:p rdf:parseType="Foo">text</ex:p>"#, ElementShape::ParseTypeOther),
            (r#"<ex:p><ex:a/></ex:p>"#, ElementShape::Resource),
            (r#"<ex:p>text</ex:p>"#, ElementShape::Literal),
            (r#"<ex:p rdf:datatype="http://example.com/d"/>"#, ElementShape::Literal),
            (r#"<ex:p>  </ex:p>"#, ElementShape::Empty),
            (r#"<ex:p rdf:resource="http://example.com/o"/>"#, ElementShape::Empty),
        ] {
            let data = format!("<rdf:Description {RDF_NS}>{content}</rdf:Description>");
            assert_eq!(shape_of(&data), expected, "{content}");
        }
    }

    #[test]
    fn node_element_uri_rules() {
        for (name, valid) in [
            ("ex:Thing", true),
            ("rdf:Description", true),
            ("rdf:Bag", true),
            ("rdf:_3", true),
            ("rdf:RDF", false),
            ("rdf:about", false),
            ("rdf:li", false),
            ("rdf:aboutEach", false),
            ("rdf:_0", false),
            ("rdf:_03", false),
            ("rdf:foo", false),
        ] {
            let data = format!("<{name} {RDF_NS}/>");
            let result = with_tree(&data, |grammar, root| {
                node_element_uris(grammar.tree.element(root)).is_ok()
            });
            assert_eq!(result, valid, "{name}");
        }
    }

    #[test]
    fn property_element_uri_rules() {
        for (name, valid) in [
            ("ex:p", true),
            ("rdf:type", true),
            ("rdf:_1", true),
            ("rdf:Description", false),
            ("rdf:nodeID", false),
            ("rdf:bagID", false),
            ("rdf:_x", false),
        ] {
            let data = format!("<{name} {RDF_NS}/>");
            let result = with_tree(&data, |grammar, root| {
                property_element_uris(grammar.tree.element(root)).is_ok()
            });
            assert_eq!(result, valid, "{name}");
        }
    }

    #[test]
    fn property_attribute_uri_rules() {
        for (name, valid) in [
            ("ex:p", true),
            ("rdf:value", true),
            ("rdf:li", false),
            ("rdf:Description", false),
            ("rdf:datatype", false),
            ("rdf:aboutEachPrefix", false),
        ] {
            let data = format!(r#"<ex:e {RDF_NS} {name}="v"/>"#);
            let result = with_tree(&data, |grammar, root| {
                property_attribute_uris(&grammar.tree.element(root).attributes()[0]).is_ok()
            });
            assert_eq!(result, valid, "{name}");
        }
    }

    #[test]
    fn attribute_productions_check_their_uri() {
        with_tree(
            &format!(r#"<ex:e {RDF_NS} rdf:about="x" rdf:parseType="Resource"/>"#),
            |grammar, root| {
                let element = grammar.tree.element(root);
                let about = &element.attributes()[0];
                let parse_type = &element.attributes()[1];
                assert_eq!(
                    about_attribute(about, &grammar.tree).unwrap(),
                    "http://base.example/x"
                );
                assert!(matches!(
                    resource_attribute(about, &grammar.tree).unwrap_err().kind(),
                    RdfXmlErrorKind::AttributeUriMismatch {
                        expected: "rdf:resource",
                        ..
                    }
                ));
                parse_resource_attribute(parse_type).unwrap();
                assert!(matches!(
                    parse_literal_attribute(parse_type).unwrap_err().kind(),
                    RdfXmlErrorKind::InvalidParseTypeValue {
                        expected: "Literal",
                        ..
                    }
                ));
                parse_collection_attribute(about).unwrap_err();
            },
        );
    }

    #[test]
    fn id_attribute_rules() {
        with_tree(
            &format!(r#"<ex:e {RDF_NS} rdf:ID="a1" rdf:nodeID="a#b"/>"#),
            |grammar, root| {
                let element = grammar.tree.element(root);
                let id = &element.attributes()[0];
                let uri = id_attribute(id, &grammar.tree, &grammar.graph).unwrap();
                assert_eq!(uri, "http://base.example/doc#a1");
                assert!(matches!(
                    node_id_attribute(&element.attributes()[1]).unwrap_err().kind(),
                    RdfXmlErrorKind::InvalidId { .. }
                ));
                let mut graph = Graph::new();
                graph.add(Triple::new(uri, rdf::VALUE, rdf::NIL));
                assert!(matches!(
                    id_attribute(id, &grammar.tree, &graph).unwrap_err().kind(),
                    RdfXmlErrorKind::DuplicateId { .. }
                ));
            },
        );
    }

    #[test]
    fn property_elements_use_the_parent_subject() {
        with_tree(
            &format!(r#"<rdf:Description {RDF_NS}><ex:p xml:base="http://other.example/" rdf:resource="o"/></rdf:Description>"#),
            |grammar, root| {
                let property = grammar.tree.element(root).children()[0];
                grammar.property_element(property).unwrap_err();
                let subject = Subject::from(BlankNode::new_unchecked("s"));
                grammar.tree.set_subject(root, subject.clone());
                grammar.property_element(property).unwrap();
                assert!(grammar.graph.contains(&Triple::new(
                    subject,
                    UriRef::new("http://example.com/p").unwrap(),
                    UriRef::new("http://other.example/o").unwrap(),
                )));
            },
        );
    }

    #[test]
    fn reification_appends_four_triples() {
        let mut graph = Graph::new();
        let existing = Triple::new(rdf::NIL, rdf::TYPE, rdf::LIST);
        graph.add(existing.clone());
        let statement = UriRef::new("http://example.com/#s").unwrap();
        reify(
            &mut graph,
            rdf::NIL.into(),
            rdf::VALUE,
            Literal::new_simple_literal("v").into(),
            statement.clone(),
        );
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.iter().next(), Some(&existing));
        assert!(graph.contains(&Triple::new(statement.clone(), rdf::TYPE, rdf::STATEMENT)));
        assert!(graph.contains(&Triple::new(statement.clone(), rdf::SUBJECT, rdf::NIL)));
        assert!(graph.contains(&Triple::new(statement.clone(), rdf::PREDICATE, rdf::VALUE)));
        assert!(graph.contains(&Triple::new(
            statement,
            rdf::OBJECT,
            Literal::new_simple_literal("v")
        )));
    }

    #[test]
    fn rdf_production() {
        with_tree(&format!("<ex:root {RDF_NS}/>"), |grammar, root| {
            assert!(matches!(
                grammar.rdf(root).unwrap_err().kind(),
                RdfXmlErrorKind::InvalidRootElement { .. }
            ));
        });
        with_tree(&format!(r#"<rdf:RDF {RDF_NS} ex:a="b"/>"#), |grammar, root| {
            assert!(matches!(
                grammar.rdf(root).unwrap_err().kind(),
                RdfXmlErrorKind::RdfAttributesNotAllowed { .. }
            ));
        });
    }
}
