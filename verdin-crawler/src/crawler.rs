use crate::anonymize::anonymize_page;
use crate::error::{CrawlError, Result};
use crate::fetcher::Fetcher;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};
use url::Url;
use verdin_core::term::Term;
use verdin_core::vocab::{rdf, tree};
use verdin_core::{Graph, RdfFormat};

/// Breadth-first crawler over a fragmented stream's relation links.
///
/// The traversal is strictly sequential: one page is fetched, anonymized
/// and merged at a time, so the frontier and visited set have a single
/// writer. Any fetch or parse failure aborts the whole crawl; partial
/// graphs are never returned.
pub struct Crawler {
    fetcher: Fetcher,
}

impl Crawler {
    pub fn new() -> Self {
        Self {
            fetcher: Fetcher::new(),
        }
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            fetcher: Fetcher::with_timeout(timeout_secs),
        }
    }

    /// Crawl the stream starting at `start_url`, returning the
    /// accumulated graph of every reachable page.
    pub async fn crawl(&self, start_url: &str) -> Result<Graph> {
        Url::parse(start_url).map_err(|e| CrawlError::InvalidUrl(format!("{start_url}: {e}")))?;
        info!("Starting crawl of {}", start_url);

        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<String> = VecDeque::new();
        visited.insert(start_url.to_string());
        frontier.push_back(start_url.to_string());

        let mut accumulated = Graph::new();

        while let Some(url) = frontier.pop_front() {
            let page = self.fetcher.fetch(&url).await?;
            let page_graph = Graph::parse(&page.body, RdfFormat::Turtle, Some(&url)).map_err(
                |e| CrawlError::ParseError {
                    url: url.clone(),
                    message: e.to_string(),
                },
            )?;

            // Grow the frontier before anonymization renames the subjects.
            for target in relation_targets(&page_graph) {
                if visited.insert(target.clone()) {
                    debug!("Queuing {}", target);
                    frontier.push_back(target);
                }
            }

            let processed = anonymize_page(&page_graph, &url, &page.headers);
            accumulated.merge(processed);
        }

        info!(
            "Crawl complete. Visited {} pages, {} triples accumulated",
            visited.len(),
            accumulated.len()
        );
        Ok(accumulated)
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

/// Outgoing relation targets of one raw page:
/// `?node a tree:Node ; tree:relation ?r . ?r tree:node ?target`.
/// Distinct targets in discovery order.
pub fn relation_targets(page_graph: &Graph) -> Vec<String> {
    let tree_node = Term::Iri(tree::NODE.to_string());
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for node in page_graph.subjects_with(rdf::TYPE, &tree_node) {
        for relation_term in page_graph.objects(node, tree::RELATION) {
            let Some(relation) = relation_term.to_subject() else {
                continue;
            };
            for target in page_graph.objects(&relation, tree::NODE_PROP) {
                if let Some(iri) = target.as_iri()
                    && seen.insert(iri.to_string())
                {
                    targets.push(iri.to_string());
                }
            }
        }
    }

    targets
}
