use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-literal graph node: the only things allowed in subject position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Iri(String),
    BNode(String),
}

impl Subject {
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Subject::Iri(iri) => Some(iri),
            Subject::BNode(_) => None,
        }
    }

    pub fn is_bnode(&self) -> bool {
        matches!(self, Subject::BNode(_))
    }
}

/// An RDF literal: lexical form plus optional datatype IRI or language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }
}

/// Any term that can appear in object position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Iri(String),
    BNode(String),
    Literal(Literal),
}

impl Term {
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The comparable string form: lexical form for literals, the
    /// identifier itself for IRIs and blank nodes.
    pub fn lexical_form(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::BNode(label) => label,
            Term::Literal(lit) => &lit.lexical,
        }
    }

    /// Reinterpret this term in subject position, if allowed there.
    pub fn to_subject(&self) -> Option<Subject> {
        match self {
            Term::Iri(iri) => Some(Subject::Iri(iri.clone())),
            Term::BNode(label) => Some(Subject::BNode(label.clone())),
            Term::Literal(_) => None,
        }
    }
}

impl From<Subject> for Term {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Iri(iri) => Term::Iri(iri),
            Subject::BNode(label) => Term::BNode(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Subject,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Subject, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Iri(iri) => write!(f, "<{}>", iri),
            Subject::BNode(label) => write!(f, "_:{}", label),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BNode(label) => write!(f, "_:{}", label),
            Term::Literal(lit) => {
                write!(f, "\"{}\"", escape_literal(&lit.lexical))?;
                if let Some(lang) = &lit.language {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// Parse one term from its N-Triples-ish display form.
///
/// Bare tokens containing a scheme separator are accepted as IRIs so that
/// parser backends rendering IRIs without angle brackets still resolve.
pub(crate) fn parse_term(term: &str) -> Result<Term, String> {
    let s = term.trim();

    if let Some(rest) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(Term::Iri(rest.to_string()));
    }

    if let Some(rest) = s.strip_prefix("_:") {
        return Ok(Term::BNode(rest.to_string()));
    }

    if s.starts_with('"') {
        let mut end_quote = None;
        let mut prev_was_escape = false;
        for (i, ch) in s.char_indices().skip(1) {
            if ch == '"' && !prev_was_escape {
                end_quote = Some(i);
                break;
            }
            prev_was_escape = ch == '\\' && !prev_was_escape;
        }
        let Some(end) = end_quote else {
            return Err(format!("invalid literal term (missing closing quote): {s}"));
        };

        let lexical = unescape_literal(&s[1..end]);
        let rest = s[end + 1..].trim();

        let mut language = None;
        let mut datatype = None;
        if let Some(lang) = rest.strip_prefix('@') {
            language = Some(lang.to_string());
        } else if let Some(dt) = rest.strip_prefix("^^") {
            let dt = dt.trim();
            if let Some(dt_iri) = dt.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                datatype = Some(dt_iri.to_string());
            } else if !dt.is_empty() {
                datatype = Some(dt.to_string());
            }
        }
        // "x" and "x"^^xsd:string are the same literal; store the simple form.
        if datatype.as_deref() == Some("http://www.w3.org/2001/XMLSchema#string") {
            datatype = None;
        }

        return Ok(Term::Literal(Literal {
            lexical,
            datatype,
            language,
        }));
    }

    if s.contains(':') && !s.contains(char::is_whitespace) {
        return Ok(Term::Iri(s.to_string()));
    }

    Err(format!("unsupported RDF term form: {s}"))
}

pub(crate) fn parse_subject(term: &str) -> Result<Subject, String> {
    match parse_term(term)? {
        Term::Iri(iri) => Ok(Subject::Iri(iri)),
        Term::BNode(label) => Ok(Subject::BNode(label)),
        Term::Literal(_) => Err(format!("expected IRI or blank node, got literal: {term}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iri_term() {
        let term = parse_term("<https://example.org/p1>").unwrap();
        assert_eq!(term, Term::Iri("https://example.org/p1".to_string()));
    }

    #[test]
    fn test_parse_bnode_term() {
        let term = parse_term("_:b0").unwrap();
        assert_eq!(term, Term::BNode("b0".to_string()));
    }

    #[test]
    fn test_parse_typed_literal() {
        let term =
            parse_term("\"2023-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>").unwrap();
        assert_eq!(
            term,
            Term::Literal(Literal::typed(
                "2023-01-01",
                "http://www.w3.org/2001/XMLSchema#date"
            ))
        );
    }

    #[test]
    fn test_parse_lang_literal() {
        let term = parse_term("\"bonjour\"@fr").unwrap();
        let lit = term.as_literal().unwrap();
        assert_eq!(lit.lexical, "bonjour");
        assert_eq!(lit.language.as_deref(), Some("fr"));
    }

    #[test]
    fn test_literal_escape_roundtrip() {
        let lit = Literal::plain("line one\nline \"two\" \\ end");
        let rendered = Term::Literal(lit.clone()).to_string();
        let reparsed = parse_term(&rendered).unwrap();
        assert_eq!(reparsed.as_literal().unwrap().lexical, lit.lexical);
    }

    #[test]
    fn test_xsd_string_literal_normalizes_to_simple() {
        let term =
            parse_term("\"plain\"^^<http://www.w3.org/2001/XMLSchema#string>").unwrap();
        assert_eq!(term, Term::Literal(Literal::plain("plain")));
    }

    #[test]
    fn test_subject_rejects_literal() {
        assert!(parse_subject("\"not a subject\"").is_err());
    }
}
