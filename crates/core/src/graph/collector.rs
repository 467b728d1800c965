use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::ids::NoteId;

/// An unresolved link or embed, paired with the note that contains it.
///
/// Link text is resolved relative to its source, so the two travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub target_text: String,
    pub source_id: NoteId,
}

impl LinkReference {
    pub fn new(target_text: impl Into<String>, source_id: NoteId) -> Self {
        Self { target_text: target_text.into(), source_id }
    }
}

/// Where does a note link to?
pub trait LinkGraph {
    type Error;

    /// Outgoing links and embeds of a note, in document order.
    /// Empty when the note has no indexed metadata.
    fn links_of(&self, id: &NoteId) -> Result<Vec<LinkReference>, Self::Error>;

    /// Resolve link text relative to its source.
    /// Returns None for a dangling link.
    fn resolve(&self, link_text: &str, source: &NoteId)
    -> Result<Option<NoteId>, Self::Error>;
}

/// Collect every file reachable from `root` through links and embeds.
///
/// Breadth-first over an explicit worklist: a file is enqueued at most once,
/// so cycles and diamonds terminate and the work is linear in the number of
/// reachable links. Dangling links are dropped. The result always contains
/// `root`.
///
/// # Errors
/// Errors from the graph are returned unchanged; nothing is cached.
pub fn collect<G>(root: &NoteId, graph: &G) -> Result<BTreeSet<NoteId>, G::Error>
where
    G: LinkGraph + ?Sized,
{
    let mut visited = BTreeSet::from([root.clone()]);
    let mut queue = VecDeque::from([root.clone()]);

    while let Some(id) = queue.pop_front() {
        for reference in graph.links_of(&id)? {
            let Some(target) = graph.resolve(&reference.target_text, &reference.source_id)?
            else {
                debug!(source = %reference.source_id, link = %reference.target_text, "dangling link");
                continue;
            };

            if visited.insert(target.clone()) {
                queue.push_back(target);
            }
        }
    }

    debug!(root = %root, files = visited.len(), "collected link closure");
    Ok(visited)
}

/// [`collect`] over two closures instead of a [`LinkGraph`].
///
/// ```
/// use notestore_core::graph::{LinkReference, collect_with};
/// use notestore_core::ids::NoteId;
///
/// let files = collect_with::<(), _, _>(
///     &NoteId::new("a.md"),
///     |text, _source| Ok(Some(NoteId::new(format!("{text}.md")))),
///     |id| {
///         Ok(match id.as_str() {
///             "a.md" => vec![LinkReference::new("b", id.clone())],
///             _ => vec![],
///         })
///     },
/// )
/// .unwrap();
///
/// assert_eq!(files.len(), 2);
/// ```
pub fn collect_with<E, R, L>(
    root: &NoteId,
    resolve: R,
    links_of: L,
) -> Result<BTreeSet<NoteId>, E>
where
    R: Fn(&str, &NoteId) -> Result<Option<NoteId>, E>,
    L: Fn(&NoteId) -> Result<Vec<LinkReference>, E>,
{
    collect(root, &FnGraph { resolve, links_of, error: std::marker::PhantomData })
}

struct FnGraph<R, L, E> {
    resolve: R,
    links_of: L,
    error: std::marker::PhantomData<fn() -> E>,
}

impl<R, L, E> LinkGraph for FnGraph<R, L, E>
where
    R: Fn(&str, &NoteId) -> Result<Option<NoteId>, E>,
    L: Fn(&NoteId) -> Result<Vec<LinkReference>, E>,
{
    type Error = E;

    fn links_of(&self, id: &NoteId) -> Result<Vec<LinkReference>, E> {
        (self.links_of)(id)
    }

    fn resolve(&self, link_text: &str, source: &NoteId) -> Result<Option<NoteId>, E> {
        (self.resolve)(link_text, source)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory graph keyed by note name; link text is the target's name.
    struct MapGraph {
        edges: HashMap<&'static str, Vec<&'static str>>,
        expanded: RefCell<Vec<String>>,
    }

    impl MapGraph {
        fn new(edges: &[(&'static str, &[&'static str])]) -> Self {
            Self {
                edges: edges.iter().map(|(k, v)| (*k, v.to_vec())).collect(),
                expanded: RefCell::new(Vec::new()),
            }
        }
    }

    impl LinkGraph for MapGraph {
        type Error = String;

        fn links_of(&self, id: &NoteId) -> Result<Vec<LinkReference>, String> {
            self.expanded.borrow_mut().push(id.to_string());
            Ok(self
                .edges
                .get(id.as_str())
                .map(|targets| targets.iter().map(|t| LinkReference::new(*t, id.clone())).collect())
                .unwrap_or_default())
        }

        fn resolve(&self, link_text: &str, _source: &NoteId) -> Result<Option<NoteId>, String> {
            Ok(self.edges.contains_key(link_text).then(|| NoteId::new(link_text)))
        }
    }

    fn names(set: &BTreeSet<NoteId>) -> Vec<&str> {
        set.iter().map(NoteId::as_str).collect()
    }

    #[test]
    fn test_cycle_visits_each_note_once() {
        let graph = MapGraph::new(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
        let result = collect(&NoteId::new("A"), &graph).unwrap();

        assert_eq!(names(&result), vec!["A", "B", "C"]);
        assert_eq!(*graph.expanded.borrow(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_dangling_link_is_dropped() {
        let graph = MapGraph::new(&[("A", &["Ghost"])]);
        let result = collect(&NoteId::new("A"), &graph).unwrap();
        assert_eq!(names(&result), vec!["A"]);
    }

    #[test]
    fn test_root_without_links_is_included() {
        let graph = MapGraph::new(&[("A", &[])]);
        assert_eq!(names(&collect(&NoteId::new("A"), &graph).unwrap()), vec!["A"]);
    }

    #[test]
    fn test_self_loop() {
        let graph = MapGraph::new(&[("A", &["A", "A"])]);
        let result = collect(&NoteId::new("A"), &graph).unwrap();
        assert_eq!(names(&result), vec!["A"]);
        assert_eq!(graph.expanded.borrow().len(), 1);
    }

    #[test]
    fn test_diamond_expands_shared_node_once() {
        let graph = MapGraph::new(&[
            ("A", &["B", "C"]),
            ("B", &["D"]),
            ("C", &["D"]),
            ("D", &["B", "C", "A"]),
        ]);
        let result = collect(&NoteId::new("A"), &graph).unwrap();

        assert_eq!(names(&result), vec!["A", "B", "C", "D"]);
        assert_eq!(graph.expanded.borrow().len(), 4);
    }

    #[test]
    fn test_dense_graph_terminates() {
        let all: Vec<&'static str> = vec!["n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7"];
        let edges: Vec<(&'static str, &[&'static str])> =
            all.iter().map(|n| (*n, all.as_slice())).collect();
        let graph = MapGraph::new(&edges);

        let result = collect(&NoteId::new("n3"), &graph).unwrap();
        assert_eq!(result.len(), 8);
        assert_eq!(graph.expanded.borrow().len(), 8);
    }

    #[test]
    fn test_resolution_uses_reference_source() {
        let seen = RefCell::new(Vec::new());
        collect_with::<(), _, _>(
            &NoteId::new("dir/a.md"),
            |text, source| {
                seen.borrow_mut().push((text.to_string(), source.to_string()));
                Ok((text == "b").then(|| NoteId::new("dir/b.md")))
            },
            |id| Ok(if id.as_str() == "dir/a.md" { vec![LinkReference::new("b", id.clone())] } else { vec![] }),
        )
        .unwrap();

        assert_eq!(*seen.borrow(), vec![("b".to_string(), "dir/a.md".to_string())]);
    }

    #[test]
    fn test_errors_propagate() {
        let result = collect_with(
            &NoteId::new("a"),
            |_, _| Err("resolver failed"),
            |id| Ok(vec![LinkReference::new("x", id.clone())]),
        );
        assert_eq!(result, Err("resolver failed"));
    }
}
