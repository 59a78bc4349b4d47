//! # Recursive Link-Graph Walk
//!
//! Breadth-first traversal of the graph formed by `child` and `item` links.
//! Every node is fetched, identified, checked against its own core schema
//! and recorded exactly once.
//!
//! ## Invariants
//!
//! - Visited-set membership is keyed by the resolved absolute link target,
//!   so shared and cyclic references are validated once. The visited set is
//!   the only cycle breaker; there is no depth or node cap.
//! - A node that fails is recorded and the walk continues with the rest of
//!   the queue. Its links are still followed when its content could be
//!   parsed.

use std::collections::{HashSet, VecDeque};

use serde_json::Value;
use stacv_core::{Href, ObjectKind, SpecVersion, StacError};
use stacv_schema::ValidationMode;

use crate::result::{ModeOutcome, ValidationResult};
use crate::run::{enter, failed, identified, Orchestrator, RunState};

/// Link relations followed by the walk.
const FOLLOWED_RELS: &[&str] = &["child", "item"];

/// What a walk produced.
#[derive(Debug)]
pub struct Walk {
    /// Core check of the root object itself.
    pub root: Result<ModeOutcome, StacError>,
    /// One record per visited descendant, in visit order.
    pub descendants: Vec<ValidationResult>,
}

impl Walk {
    /// Whether the root and every visited descendant are valid.
    pub fn valid(&self) -> bool {
        matches!(&self.root, Ok(outcome) if outcome.passed())
            && self.descendants.iter().all(|r| r.valid_stac)
    }
}

impl Orchestrator {
    /// Walk the graph rooted at the already fetched and identified `doc`.
    pub(crate) fn walk(
        &self,
        root: &Href,
        doc: &Value,
        kind: ObjectKind,
        version: &SpecVersion,
    ) -> Walk {
        let root_check = self
            .selector
            .core(kind, version)
            .and_then(|schema| self.check_schemas(ValidationMode::Recursive, doc, &[schema]));

        let mut visited: HashSet<String> = HashSet::from([root.absolute().to_string()]);
        let mut queue: VecDeque<Href> = VecDeque::new();
        enqueue_links(root, doc, &mut visited, &mut queue);

        let mut descendants = Vec::new();
        while let Some(href) = queue.pop_front() {
            let (result, node) = self.validate_node(&href);
            if let Some(node) = node {
                enqueue_links(&href, &node, &mut visited, &mut queue);
            }
            descendants.push(result);
        }

        tracing::debug!(root = %root, visited = visited.len(), "walk finished");
        Walk {
            root: root_check,
            descendants,
        }
    }

    /// Fetch, identify and core-check one node. Returns the node's content
    /// when it could be fetched so its links can be followed.
    fn validate_node(&self, href: &Href) -> (ValidationResult, Option<Value>) {
        let target = href.to_string();
        let result = ValidationResult::new(target.as_str());
        let mode = Some(ValidationMode::Recursive);

        enter(&target, RunState::Fetching);
        let doc = match self.fetcher.fetch(href) {
            Ok(doc) => doc,
            Err(err) => return (failed(&target, result, mode, &err), None),
        };

        enter(&target, RunState::Identifying);
        let (result, kind, version) = match identified(result, &doc) {
            Ok(identified) => identified,
            Err((result, err)) => return (failed(&target, result, mode, &err), Some(doc)),
        };

        enter(&target, RunState::Selecting);
        let checked = self
            .selector
            .core(kind, &version)
            .and_then(|schema| self.check_schemas(ValidationMode::Recursive, &doc, &[schema]));
        let result = match checked {
            Ok(outcome) => {
                enter(&target, RunState::Done);
                result.merge(outcome)
            }
            Err(err) => failed(&target, result, mode, &err),
        };
        (result, Some(doc))
    }
}

/// `child` and `item` link targets of `doc`, resolved against `href`.
pub fn child_links(href: &Href, doc: &Value) -> Vec<Href> {
    let Some(links) = doc.get("links").and_then(Value::as_array) else {
        return Vec::new();
    };
    links
        .iter()
        .filter(|link| {
            link.get("rel")
                .and_then(Value::as_str)
                .is_some_and(|rel| FOLLOWED_RELS.contains(&rel))
        })
        .filter_map(|link| match link.get("href").and_then(Value::as_str) {
            Some(target) => Some(href.join(target).absolute()),
            None => {
                tracing::warn!(from = %href, "skipping link without href");
                None
            }
        })
        .collect()
}

fn enqueue_links(href: &Href, doc: &Value, visited: &mut HashSet<String>, queue: &mut VecDeque<Href>) {
    for link in child_links(href, doc) {
        if visited.insert(link.to_string()) {
            queue.push_back(link);
        }
    }
}
