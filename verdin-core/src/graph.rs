//! In-memory triple store for one crawled stream snapshot.
//!
//! The store is append-only and preserves insertion order. Queries walk
//! triples in the order pages were merged, keeping downstream failure
//! lists deterministic.

use crate::error::{Result, ValidationError};
use crate::term::{self, Subject, Term, Triple};
use rustc_hash::FxHashSet;
use sophia::api::parser::TripleParser;
use sophia::api::prelude::*;
use sophia::api::prelude::Triple as _;
use sophia::iri::Iri;
use sophia::turtle::parser::{nt::NTriplesParser, turtle::TurtleParser};
use std::fmt;
use std::str::FromStr;

/// Serialization formats accepted at the validation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    Turtle,
    NTriples,
}

impl FromStr for RdfFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "turtle" | "ttl" | "text/turtle" => Ok(RdfFormat::Turtle),
            "ntriples" | "nt" | "n-triples" | "application/n-triples" => Ok(RdfFormat::NTriples),
            other => Err(ValidationError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfFormat::Turtle => write!(f, "turtle"),
            RdfFormat::NTriples => write!(f, "ntriples"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TermError(String);

#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    seen: FxHashSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Insert one triple, keeping set semantics. Duplicates are no-ops.
    pub fn insert(&mut self, triple: Triple) {
        if self.seen.insert(triple.clone()) {
            self.triples.push(triple);
        }
    }

    /// Merge another graph into this one by value.
    pub fn merge(&mut self, other: Graph) {
        for triple in other.triples {
            self.insert(triple);
        }
    }

    pub fn contains(&self, subject: &Subject, predicate: &str, object: &Term) -> bool {
        self.seen.contains(&Triple {
            subject: subject.clone(),
            predicate: predicate.to_string(),
            object: object.clone(),
        })
    }

    /// Pattern query: `None` matches anything in that position.
    pub fn triples_matching<'a>(
        &'a self,
        subject: Option<&'a Subject>,
        predicate: Option<&'a str>,
        object: Option<&'a Term>,
    ) -> impl Iterator<Item = &'a Triple> {
        self.triples.iter().filter(move |t| {
            subject.is_none_or(|s| &t.subject == s)
                && predicate.is_none_or(|p| t.predicate == p)
                && object.is_none_or(|o| &t.object == o)
        })
    }

    /// Distinct subjects in first-seen order.
    pub fn subjects(&self) -> Vec<&Subject> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for triple in &self.triples {
            if seen.insert(&triple.subject) {
                out.push(&triple.subject);
            }
        }
        out
    }

    /// All objects of (subject, predicate), in insertion order.
    pub fn objects<'a>(&'a self, subject: &'a Subject, predicate: &'a str) -> Vec<&'a Term> {
        self.triples_matching(Some(subject), Some(predicate), None)
            .map(|t| &t.object)
            .collect()
    }

    /// Distinct subjects carrying (predicate, object), in first-seen order.
    pub fn subjects_with<'a>(&'a self, predicate: &'a str, object: &'a Term) -> Vec<&'a Subject> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for triple in self.triples_matching(None, Some(predicate), Some(object)) {
            if seen.insert(&triple.subject) {
                out.push(&triple.subject);
            }
        }
        out
    }

    /// Parse serialized RDF into a graph. Relative IRIs resolve against
    /// `base` when one is given.
    pub fn parse(content: &str, format: RdfFormat, base: Option<&str>) -> Result<Graph> {
        let reader = std::io::BufReader::new(content.as_bytes());
        let mut graph = Graph::new();
        let mut sink = |s: String, p: String, o: String| {
            let subject = term::parse_subject(&s).map_err(TermError)?;
            let predicate = match term::parse_term(&p).map_err(TermError)? {
                Term::Iri(iri) => iri,
                other => return Err(TermError(format!("predicate is not an IRI: {other}"))),
            };
            let object = term::parse_term(&o).map_err(TermError)?;
            graph.insert(Triple::new(subject, predicate, object));
            Ok::<(), TermError>(())
        };

        match format {
            RdfFormat::Turtle => {
                let base = match base {
                    Some(url) => Some(
                        Iri::new(url.to_string())
                            .map_err(|e| ValidationError::Parse(format!("invalid base IRI: {e}")))?,
                    ),
                    None => None,
                };
                let parser = TurtleParser { base };
                let mut source = parser.parse(reader);
                source
                    .try_for_each_triple(|t| {
                        sink(t.s().to_string(), t.p().to_string(), t.o().to_string())
                    })
                    .map_err(|e| ValidationError::Parse(format!("failed to parse Turtle: {e}")))?;
            }
            RdfFormat::NTriples => {
                let parser = NTriplesParser {};
                let mut source = parser.parse(reader);
                source
                    .try_for_each_triple(|t| {
                        sink(t.s().to_string(), t.p().to_string(), t.o().to_string())
                    })
                    .map_err(|e| {
                        ValidationError::Parse(format!("failed to parse N-Triples: {e}"))
                    })?;
            }
        }

        Ok(graph)
    }

    /// Serialize the whole graph as N-Triples.
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for triple in &self.triples {
            out.push_str(&triple.to_string());
            out.push('\n');
        }
        out
    }
}
