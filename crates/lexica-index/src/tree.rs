// Arena-backed branch-compressed tree keyed by unit sequences.

use std::hash::Hash;

use hashbrown::HashMap;

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, corresponding to the empty unit sequence.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A tree node.
///
/// `label` holds the units on the edge leading into this node; it is empty
/// only for the root. Children are looked up by the first unit of their
/// label through `child_index`, while `children` keeps them in insertion
/// order, which is the order the search visits them in.
pub(crate) struct Node<U, T> {
    pub(crate) label: Vec<U>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) child_index: HashMap<U, NodeId>,
    pub(crate) payload: Vec<T>,
}

impl<U, T> Node<U, T> {
    fn new(label: Vec<U>) -> Self {
        Self {
            label,
            children: Vec::new(),
            child_index: HashMap::new(),
            payload: Vec::new(),
        }
    }
}

/// Branch-compressed tree mapping unit sequences to payload lists.
///
/// Chains of single-child nodes are collapsed into multi-unit edge labels:
/// apart from the root, a node without payload always has at least two
/// children. Inserting the same sequence several times appends to one
/// payload list, preserving insertion order.
///
/// Nodes live in a flat arena and refer to their children by [`NodeId`];
/// there are no parent links.
pub struct SyllabicIndex<U, T> {
    pub(crate) nodes: Vec<Node<U, T>>,
    word_count: usize,
}

impl<U, T> SyllabicIndex<U, T>
where
    U: Eq + Hash + Clone,
{
    /// Create an empty index holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Vec::new())],
            word_count: 0,
        }
    }

    /// Insert `payload` under the given unit sequence.
    ///
    /// Walks the existing edges as far as they match, splits the first edge
    /// whose label diverges from `units` (or extends past its end), and
    /// appends `payload` to the terminal node. Returns the terminal node.
    pub fn insert(&mut self, units: &[U], payload: T) -> NodeId {
        let mut node = NodeId::ROOT;
        let mut pos = 0;

        while pos < units.len() {
            let child = match self.nodes[node.index()].child_index.get(&units[pos]) {
                Some(&child) => child,
                None => {
                    let leaf = self.push_node(units[pos..].to_vec());
                    self.attach(node, leaf);
                    node = leaf;
                    break;
                }
            };

            // The first unit matched, so the common prefix is at least 1.
            let label = &self.nodes[child.index()].label;
            let common = common_prefix_len(label, &units[pos..]);
            node = if common < label.len() {
                self.split(node, child, common)
            } else {
                child
            };
            pos += common;
        }

        self.nodes[node.index()].payload.push(payload);
        self.word_count += 1;
        node
    }

    /// Find the node whose unit sequence is exactly `units`.
    ///
    /// Returns `None` when some unit has no matching edge, or when `units`
    /// ends inside a compressed edge label. The returned node may carry an
    /// empty payload if it is a branching point rather than a word end.
    pub fn exact_search(&self, units: &[U]) -> Option<NodeId> {
        let mut node = NodeId::ROOT;
        let mut pos = 0;

        while pos < units.len() {
            let child = *self.nodes[node.index()].child_index.get(&units[pos])?;
            let label = &self.nodes[child.index()].label;
            let rest = &units[pos..];
            if rest.len() < label.len() || rest[..label.len()] != label[..] {
                return None;
            }
            pos += label.len();
            node = child;
        }

        Some(node)
    }

    /// Payload list stored under exactly `units`, if any.
    pub fn get(&self, units: &[U]) -> Option<&[T]> {
        self.exact_search(units)
            .map(|node| self.payload(node))
            .filter(|payload| !payload.is_empty())
    }

    /// Every stored unit sequence with its payload, in search visitation
    /// order (depth-first, children in insertion order).
    pub fn entries(&self) -> Vec<(Vec<U>, &[T])> {
        let mut entries = Vec::new();
        let mut stack = vec![(NodeId::ROOT, Vec::new())];

        while let Some((id, mut prefix)) = stack.pop() {
            let node = &self.nodes[id.index()];
            prefix.extend_from_slice(&node.label);
            if !node.payload.is_empty() {
                entries.push((prefix.clone(), node.payload.as_slice()));
            }
            for &child in node.children.iter().rev() {
                stack.push((child, prefix.clone()));
            }
        }

        entries
    }

    fn push_node(&mut self, label: Vec<U>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(label));
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        let first = self.nodes[child.index()].label[0].clone();
        let parent = &mut self.nodes[parent.index()];
        parent.child_index.insert(first, child);
        parent.children.push(child);
    }

    /// Split the edge into `child` after `at` units. The new intermediate
    /// node takes over `child`'s slot in `parent` and is returned.
    fn split(&mut self, parent: NodeId, child: NodeId, at: usize) -> NodeId {
        let suffix = self.nodes[child.index()].label.split_off(at);
        let prefix = std::mem::replace(&mut self.nodes[child.index()].label, suffix);
        let first = prefix[0].clone();

        let middle = self.push_node(prefix);
        self.attach(middle, child);

        let parent = &mut self.nodes[parent.index()];
        parent.child_index.insert(first, middle);
        if let Some(slot) = parent.children.iter_mut().find(|slot| **slot == child) {
            *slot = middle;
        }

        middle
    }
}

impl<U, T> SyllabicIndex<U, T> {
    /// Payload list of a node (empty for pure branching nodes).
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this index.
    pub fn payload(&self, node: NodeId) -> &[T] {
        &self.nodes[node.index()].payload
    }

    /// Number of inserted payloads.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of nodes in the arena, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<U, T> Default for SyllabicIndex<U, T>
where
    U: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<U, T> std::fmt::Debug for SyllabicIndex<U, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyllabicIndex")
            .field("node_count", &self.nodes.len())
            .field("word_count", &self.word_count)
            .finish()
    }
}

fn common_prefix_len<U: PartialEq>(a: &[U], b: &[U]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn build(words: &[&'static str]) -> SyllabicIndex<char, &'static str> {
        let mut index = SyllabicIndex::new();
        for word in words {
            index.insert(&units(word), *word);
        }
        index
    }

    /// Checks the compaction invariant: no non-root node without payload has
    /// exactly one child, and every non-root label is non-empty.
    fn assert_compact<U: Eq + Hash + Clone, T>(index: &SyllabicIndex<U, T>) {
        for (i, node) in index.nodes.iter().enumerate().skip(1) {
            assert!(!node.label.is_empty(), "node {i} has an empty label");
            assert!(
                !(node.payload.is_empty() && node.children.len() == 1),
                "node {i} is an uncompressed single-child chain"
            );
        }
    }

    #[test]
    fn empty_index() {
        let index: SyllabicIndex<char, u32> = SyllabicIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.node_count(), 1);
        assert_eq!(index.exact_search(&[]), Some(NodeId::ROOT));
        assert_eq!(index.get(&[]), None);
        assert_eq!(index.get(&units("a")), None);
    }

    #[test]
    fn single_word_is_one_compressed_edge() {
        let index = build(&["koira"]);
        assert_eq!(index.node_count(), 2);
        assert_eq!(index.get(&units("koira")), Some(&["koira"][..]));
        assert_eq!(index.get(&units("koir")), None);
        assert_eq!(index.exact_search(&units("koir")), None);
    }

    #[test]
    fn diverging_word_splits_edge() {
        let index = build(&["cat", "cot"]);
        // root -> "c" -> {"at", "ot"}
        assert_eq!(index.node_count(), 4);
        let branch = index.exact_search(&units("c")).unwrap();
        assert!(index.payload(branch).is_empty());
        assert_eq!(index.get(&units("cat")), Some(&["cat"][..]));
        assert_eq!(index.get(&units("cot")), Some(&["cot"][..]));
        assert_compact(&index);
    }

    #[test]
    fn prefix_word_splits_edge_and_holds_payload() {
        let index = build(&["catalog", "cat"]);
        assert_eq!(index.node_count(), 3);
        assert_eq!(index.get(&units("cat")), Some(&["cat"][..]));
        assert_eq!(index.get(&units("catalog")), Some(&["catalog"][..]));
        assert_compact(&index);
    }

    #[test]
    fn extending_word_adds_child() {
        let index = build(&["cat", "catalog"]);
        assert_eq!(index.node_count(), 3);
        assert_eq!(index.get(&units("catalog")), Some(&["catalog"][..]));
        assert_eq!(index.exact_search(&units("cata")), None);
    }

    #[test]
    fn duplicate_insertions_append_in_order() {
        let mut index = SyllabicIndex::new();
        index.insert(&units("dog"), 1);
        index.insert(&units("dog"), 2);
        index.insert(&units("dog"), 3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&units("dog")), Some(&[1, 2, 3][..]));
        assert_eq!(index.node_count(), 2);
    }

    #[test]
    fn empty_sequence_is_stored_at_root() {
        let mut index: SyllabicIndex<char, &str> = SyllabicIndex::new();
        let node = index.insert(&[], "empty");
        assert_eq!(node, NodeId::ROOT);
        assert_eq!(index.get(&[]), Some(&["empty"][..]));
    }

    #[test]
    fn every_inserted_word_is_found() {
        let words = [
            "romane", "romanus", "romulus", "rubens", "ruber", "rubicon", "rubicundus", "rub",
            "r", "roman", "a", "ab", "abc",
        ];
        let index = build(&words);
        for word in words {
            let node = index.exact_search(&units(word)).unwrap();
            assert!(index.payload(node).contains(&word), "{word} not found");
        }
        assert_eq!(index.len(), words.len());
        assert_compact(&index);
    }

    #[test]
    fn entries_follow_insertion_order() {
        let index = build(&["dog", "cat", "cot", "do"]);
        let words: Vec<String> = index
            .entries()
            .into_iter()
            .map(|(u, _)| u.into_iter().collect())
            .collect();
        assert_eq!(words, ["do", "dog", "cat", "cot"]);
    }

    #[test]
    fn string_units() {
        let mut index = SyllabicIndex::new();
        let word: Vec<String> = ["kis", "sa"].iter().map(|s| s.to_string()).collect();
        index.insert(&word, 7u32);
        assert_eq!(index.get(&word), Some(&[7][..]));
        assert_eq!(index.get(&word[..1]), None);
    }
}
