//! Page anonymization: every named subject of a fetched page is replaced
//! by a page-scoped opaque blank node, with the original IRI retained as
//! a provenance edge so the rename is reversible per page.

use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use verdin_core::term::{Literal, Subject, Term, Triple};
use verdin_core::vocab::{crawl, rdf};
use verdin_core::Graph;

fn page_digest(page_url: &str) -> u64 {
    let mut hasher = FxHasher::default();
    page_url.hash(&mut hasher);
    hasher.finish()
}

/// Rename the page's pre-existing blank nodes into the page's scope.
///
/// Parser-assigned labels restart for every document, so two pages merged
/// into one store would otherwise conflate unrelated blank nodes. Identity
/// within the page is preserved; labels become unique across pages.
fn scope_bnodes(graph: &Graph, digest: u64) -> Graph {
    let mut labels: FxHashMap<String, String> = FxHashMap::default();
    let scoped = |label: &str, labels: &mut FxHashMap<String, String>| {
        let next = labels.len();
        labels
            .entry(label.to_string())
            .or_insert_with(|| format!("p{:016x}b{}", digest, next))
            .clone()
    };

    let mut out = Graph::new();
    for triple in graph.iter() {
        let subject = match &triple.subject {
            Subject::BNode(label) => Subject::BNode(scoped(label, &mut labels)),
            named => named.clone(),
        };
        let object = match &triple.object {
            Term::BNode(label) => Term::BNode(scoped(label, &mut labels)),
            other => other.clone(),
        };
        out.insert(Triple::new(subject, &triple.predicate, object));
    }
    out
}

/// One fresh opaque label per distinct named subject, in first-seen
/// order. An already-anonymized graph has no named subjects left, so the
/// map comes back empty and re-anonymization is a no-op.
pub fn subject_map(graph: &Graph, page_url: &str) -> Vec<(String, String)> {
    let digest = page_digest(page_url);
    let mut entries = Vec::new();
    for subject in graph.subjects() {
        if let Subject::Iri(iri) = subject {
            entries.push((iri.clone(), format!("p{:016x}e{}", digest, entries.len())));
        }
    }
    entries
}

/// Rewrite every triple whose subject is mapped. Subject-only: objects
/// stay untouched even when they name a rewritten subject.
pub fn rewrite_subjects(graph: &Graph, map: &[(String, String)]) -> Graph {
    let index: FxHashMap<&str, &str> = map
        .iter()
        .map(|(iri, label)| (iri.as_str(), label.as_str()))
        .collect();

    let mut out = Graph::new();
    for triple in graph.iter() {
        let subject = match &triple.subject {
            Subject::Iri(iri) => match index.get(iri.as_str()) {
                Some(label) => Subject::BNode((*label).to_string()),
                None => triple.subject.clone(),
            },
            Subject::BNode(_) => triple.subject.clone(),
        };
        out.insert(Triple::new(subject, &triple.predicate, triple.object.clone()));
    }
    out
}

/// Anonymize a fetched page's graph and wrap it under a page entity
/// carrying the source URL, the content links and the response headers.
pub fn anonymize_page(
    page_graph: &Graph,
    page_url: &str,
    headers: &[(String, Vec<String>)],
) -> Graph {
    let page_graph = scope_bnodes(page_graph, page_digest(page_url));
    let map = subject_map(&page_graph, page_url);
    let mut processed = rewrite_subjects(&page_graph, &map);

    // Provenance: each opaque entity remembers its original subject.
    for (original, label) in &map {
        processed.insert(Triple::new(
            Subject::BNode(label.clone()),
            rdf::SUBJECT,
            Term::Iri(original.clone()),
        ));
    }

    let page = Subject::Iri(page_url.to_string());
    processed.insert(Triple::new(
        page.clone(),
        rdf::TYPE,
        Term::Iri(crawl::CRAWLED_PAGE.to_string()),
    ));
    processed.insert(Triple::new(
        page.clone(),
        crawl::HAS_PAGE_SOURCE,
        Term::Literal(Literal::plain(page_url)),
    ));
    for (_, label) in &map {
        processed.insert(Triple::new(
            page.clone(),
            crawl::HAS_CONTENTS,
            Term::BNode(label.clone()),
        ));
    }

    let digest = page_digest(page_url);
    for (idx, (name, values)) in headers.iter().enumerate() {
        let header_node = Subject::BNode(format!("p{:016x}h{}", digest, idx));
        processed.insert(Triple::new(
            page.clone(),
            crawl::HAS_HEADERS,
            Term::from(header_node.clone()),
        ));
        processed.insert(Triple::new(
            header_node.clone(),
            rdf::TYPE,
            Term::Iri(crawl::HEADER.to_string()),
        ));
        processed.insert(Triple::new(
            header_node.clone(),
            crawl::HEADER_NAME,
            Term::Literal(Literal::plain(name.clone())),
        ));
        for value in values {
            processed.insert(Triple::new(
                header_node.clone(),
                crawl::HEADER_VALUE,
                Term::Literal(Literal::plain(value.clone())),
            ));
        }
    }

    processed
}
