//! Vocabulary trie keyed by Unicode scalar values.
//!
//! Nodes live in a single arena and refer to each other by index. Every node
//! keeps its children as a vector of `(scalar, child)` pairs sorted by scalar,
//! so a lookup is a binary search and the finished trie is one contiguous,
//! read-only structure that can be shared between threads.

type NodeId = u32;

const ROOT: NodeId = 0;

/// One vocabulary prefix.
#[derive(Debug, Clone)]
pub struct TrieNode {
    parent: Option<NodeId>,
    label: char,
    depth: usize,
    score: f32,
    id: i32,
    end: bool,
    children: Vec<(char, NodeId)>,
}

impl TrieNode {
    fn new(parent: Option<NodeId>, label: char, depth: usize) -> Self {
        Self {
            parent,
            label,
            depth,
            score: 0.0,
            id: 0,
            end: false,
            children: Vec::new(),
        }
    }

    /// Number of scalars from the root to this node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Piece score. Only meaningful when [`TrieNode::is_end`] is true.
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Piece id. Only meaningful when [`TrieNode::is_end`] is true.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Whether this node completes a vocabulary piece.
    pub fn is_end(&self) -> bool {
        self.end
    }

    fn child(&self, scalar: char) -> Option<NodeId> {
        self.children
            .binary_search_by(|(label, _)| label.cmp(&scalar))
            .ok()
            .map(|index| self.children[index].1)
    }
}

/// A vocabulary piece found by [`Trie::common_prefix_search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefixMatch {
    /// Length of the piece in scalars.
    pub depth: usize,
    /// Piece score.
    pub score: f32,
    /// Piece id.
    pub id: i32,
}

/// Arena-backed prefix tree over the vocabulary.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    pieces: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates a trie holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(None, '\0', 0)],
            pieces: 0,
        }
    }

    /// Inserts `piece`, creating one node per missing scalar.
    ///
    /// Only the final node is marked as a piece. Inserting the same piece again
    /// overwrites its score and id. Empty pieces are ignored.
    pub fn insert(&mut self, piece: &str, score: f32, id: i32) {
        if piece.is_empty() {
            return;
        }

        let mut current = ROOT;
        for scalar in piece.chars() {
            current = match self.nodes[current as usize].child(scalar) {
                Some(child) => child,
                None => self.add_child(current, scalar),
            };
        }

        let node = &mut self.nodes[current as usize];
        if !node.end {
            self.pieces += 1;
        }
        node.end = true;
        node.score = score;
        node.id = id;
    }

    fn add_child(&mut self, parent: NodeId, scalar: char) -> NodeId {
        let child = self.nodes.len() as NodeId;
        let depth = self.nodes[parent as usize].depth + 1;
        self.nodes.push(TrieNode::new(Some(parent), scalar, depth));

        let children = &mut self.nodes[parent as usize].children;
        let slot = children
            .binary_search_by(|(label, _)| label.cmp(&scalar))
            .unwrap_or_else(|slot| slot);
        children.insert(slot, (scalar, child));
        child
    }

    /// Returns every piece that is a prefix of `scalars`, shortest first.
    pub fn common_prefix_search<'a>(&'a self, scalars: &'a [char]) -> PrefixMatches<'a> {
        PrefixMatches {
            trie: self,
            scalars,
            node: ROOT,
            position: 0,
        }
    }

    /// Exact lookup of a piece, returning `(score, id)`.
    pub fn get(&self, piece: &str) -> Option<(f32, i32)> {
        if piece.is_empty() {
            return None;
        }
        let mut current = ROOT;
        for scalar in piece.chars() {
            current = self.nodes[current as usize].child(scalar)?;
        }
        let node = &self.nodes[current as usize];
        node.end.then_some((node.score, node.id))
    }

    /// Number of distinct pieces.
    pub fn len(&self) -> usize {
        self.pieces
    }

    /// Returns `true` when no piece has been inserted.
    pub fn is_empty(&self) -> bool {
        self.pieces == 0
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node at arena index `index`.
    pub fn node(&self, index: usize) -> Option<&TrieNode> {
        self.nodes.get(index)
    }

    /// Rebuilds the scalar path of the node at `index` from its parent links.
    pub fn piece_text(&self, index: usize) -> Option<String> {
        let mut node = self.nodes.get(index)?;
        let mut reversed = Vec::with_capacity(node.depth);
        while let Some(parent) = node.parent {
            reversed.push(node.label);
            node = &self.nodes[parent as usize];
        }
        Some(reversed.into_iter().rev().collect())
    }
}

/// Iterator returned by [`Trie::common_prefix_search`].
pub struct PrefixMatches<'a> {
    trie: &'a Trie,
    scalars: &'a [char],
    node: NodeId,
    position: usize,
}

impl Iterator for PrefixMatches<'_> {
    type Item = PrefixMatch;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&scalar) = self.scalars.get(self.position) {
            let Some(child) = self.trie.nodes[self.node as usize].child(scalar) else {
                self.position = self.scalars.len();
                return None;
            };
            self.node = child;
            self.position += 1;

            let node = &self.trie.nodes[child as usize];
            if node.end {
                return Some(PrefixMatch {
                    depth: node.depth,
                    score: node.score,
                    id: node.id,
                });
            }
        }
        None
    }
}
