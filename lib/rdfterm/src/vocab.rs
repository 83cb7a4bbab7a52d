//! Provides ready to use [`UriRef`](super::UriRef)s for the RDF vocabulary.

pub mod rdf {
    //! [RDF](https://www.w3.org/TR/rdf11-concepts/) vocabulary.
    use crate::uri::UriRef;

    /// The RDF namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// The class of containers of alternatives.
    pub const ALT: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#Alt");
    /// The class of unordered containers.
    pub const BAG: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag");
    /// The first item in the subject RDF list.
    pub const FIRST: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#first");
    /// The class of HTML literal values.
    pub const HTML: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML");
    /// The class of language-tagged string literal values.
    pub const LANG_STRING: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");
    /// The class of RDF lists.
    pub const LIST: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#List");
    /// The empty list.
    pub const NIL: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");
    /// The object of the subject RDF statement.
    pub const OBJECT: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#object");
    /// The predicate of the subject RDF statement.
    pub const PREDICATE: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate");
    /// The class of RDF properties.
    pub const PROPERTY: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#Property");
    /// The rest of the subject RDF list after the first item.
    pub const REST: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#rest");
    /// The class of ordered containers.
    pub const SEQ: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq");
    /// The class of RDF statements.
    pub const STATEMENT: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement");
    /// The subject of the subject RDF statement.
    pub const SUBJECT: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#subject");
    /// The subject is an instance of a class.
    pub const TYPE: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
    /// Idiomatic property used for structured values.
    pub const VALUE: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#value");
    /// The class of XML literal values.
    pub const XML_LITERAL: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral");

    // RDF/XML syntax terms
    pub const RDF: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF");
    pub const ID: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#ID");
    pub const ABOUT: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#about");
    pub const PARSE_TYPE: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType");
    pub const RESOURCE: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#resource");
    pub const NODE_ID: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID");
    pub const DATATYPE: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype");
    pub const DESCRIPTION: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#Description");
    pub const LI: UriRef = UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#li");

    // Terms removed from the RDF/XML syntax
    pub const ABOUT_EACH: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach");
    pub const ABOUT_EACH_PREFIX: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix");
    pub const BAG_ID: UriRef =
        UriRef::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#bagID");

    /// Builds the container membership property `rdf:_n`.
    pub fn member(n: u64) -> UriRef {
        UriRef::new_unchecked(format!("{NAMESPACE}_{n}"))
    }
}

pub mod xml {
    //! [XML](https://www.w3.org/TR/xml-names/) reserved namespaces.

    /// The namespace bound to the `xml` prefix.
    pub const NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
    /// The namespace of namespace declarations (`xmlns` attributes).
    pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";
}
