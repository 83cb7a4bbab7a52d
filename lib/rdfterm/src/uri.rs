use oxiri::{Iri, IriParseError};
use std::borrow::Cow;
use std::fmt;

/// An absolute [URI reference](https://www.w3.org/TR/rdf11-concepts/#dfn-iri).
///
/// Equality and hashing are done on the normalized string: percent-encoded octets are
/// written with uppercase hexadecimal digits.
///
/// The default string formatter is returning an N-Triples compatible representation:
/// ```
/// use rdfterm::UriRef;
///
/// assert_eq!(
///     "<http://example.com/foo%C3%A9>",
///     UriRef::new("http://example.com/foo%c3%a9")?.to_string()
/// );
/// # Result::<_,rdfterm::UriParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct UriRef {
    uri: Cow<'static, str>,
}

impl UriRef {
    /// Builds and validates an absolute URI.
    pub fn new(uri: impl Into<String>) -> Result<Self, UriParseError> {
        let uri = uri.into();
        match Iri::parse(uri.as_str()) {
            Ok(_) => Ok(Self::new_unchecked(normalize_percent_encoding(uri))),
            Err(error) => Err(UriParseError { uri, error }),
        }
    }

    /// Resolves the URI reference `relative` against the absolute URI `base`.
    ///
    /// An empty `relative` reference yields `base` without its fragment.
    /// ```
    /// use rdfterm::UriRef;
    ///
    /// let base = "http://example.com/dir/doc#top";
    /// assert_eq!(UriRef::resolve(base, "#id")?, "http://example.com/dir/doc#id");
    /// assert_eq!(UriRef::resolve(base, "")?, "http://example.com/dir/doc");
    /// assert_eq!(UriRef::resolve(base, "../other")?, "http://example.com/other");
    /// # Result::<_,rdfterm::UriParseError>::Ok(())
    /// ```
    pub fn resolve(base: &str, relative: &str) -> Result<Self, UriParseError> {
        let base = Iri::parse(base).map_err(|error| UriParseError {
            uri: base.to_owned(),
            error,
        })?;
        let resolved = base.resolve(relative).map_err(|error| UriParseError {
            uri: relative.to_owned(),
            error,
        })?;
        Ok(Self::new_unchecked(normalize_percent_encoding(
            resolved.into_inner(),
        )))
    }

    /// Builds a URI from a string without validation.
    ///
    /// It is the caller's responsibility to ensure that `uri` is a valid absolute URI.
    ///
    /// [`UriRef::new()`] is a safe version of this constructor and should be used for untrusted data.
    #[inline]
    pub fn new_unchecked(uri: impl Into<String>) -> Self {
        Self {
            uri: Cow::Owned(uri.into()),
        }
    }

    /// Builds a URI from a static string without validation.
    ///
    /// Used for vocabulary constants.
    #[inline]
    pub const fn new_static(uri: &'static str) -> Self {
        Self {
            uri: Cow::Borrowed(uri),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.uri.into_owned()
    }
}

impl fmt::Display for UriRef {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.uri)
    }
}

impl AsRef<str> for UriRef {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for UriRef {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<UriRef> for str {
    #[inline]
    fn eq(&self, other: &UriRef) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<&str> for UriRef {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<UriRef> for &str {
    #[inline]
    fn eq(&self, other: &UriRef) -> bool {
        *self == other
    }
}

/// An error raised when a string is not a valid absolute URI or URI reference.
#[derive(Debug, thiserror::Error)]
#[error("invalid URI '{uri}': {error}")]
pub struct UriParseError {
    uri: String,
    #[source]
    error: IriParseError,
}

impl UriParseError {
    /// The string that failed to parse.
    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

fn normalize_percent_encoding(uri: String) -> String {
    let bytes = uri.as_bytes();
    let needs_rewrite = bytes.windows(3).any(|w| {
        w[0] == b'%' && (w[1].is_ascii_lowercase() || w[2].is_ascii_lowercase())
    });
    if !needs_rewrite {
        return uri;
    }
    let mut normalized = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            normalized.push(b'%');
            normalized.push(bytes[i + 1].to_ascii_uppercase());
            normalized.push(bytes[i + 2].to_ascii_uppercase());
            i += 3;
        } else {
            normalized.push(bytes[i]);
            i += 1;
        }
    }
    // Only ASCII bytes were changed
    String::from_utf8(normalized).unwrap_or(uri)
}
