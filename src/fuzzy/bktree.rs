// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Burkhard-Keller tree over the vocabulary.
//!
//! Every node holds one term. The edge from a parent to a child is labeled with
//! the exact edit distance between their terms, and every edge label out of a
//! node is distinct. Looking up `q` within `k` edits:
//!
//! ```text
//!   d = dist(q, node)
//!   report node if d <= k
//!   follow child edge l only if |d - l| <= k
//! ```
//!
//! The pruning rule is the triangle inequality: any term `t` below edge `l` has
//! `dist(node, t) = l`, so `dist(q, t) >= |d - l|`. If that lower bound already
//! exceeds `k` nothing under the edge can match. No false negatives, ever.
//!
//! # Layout
//!
//! Nodes live in one `Vec` addressed by [`NodeId`]; node 0 is the root. Child
//! edges are kept sorted by label so the admissible window `[d-k, d+k]` is a
//! contiguous slice found by binary search. The flat arena also means the
//! store can write the tree out as a list without recursion, and a deep,
//! degenerate tree cannot blow the stack on drop or lookup.

use std::collections::HashSet;
use std::io;

use super::levenshtein::levenshtein;

/// Handle of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One term plus its labeled child edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BkNode {
    pub term: String,
    /// `(edge label, child)`, strictly ascending by label.
    pub children: Vec<(u32, NodeId)>,
}

impl BkNode {
    fn leaf(term: &str) -> Self {
        Self {
            term: term.to_string(),
            children: Vec::new(),
        }
    }
}

/// A vocabulary term found within the distance bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMatch<'a> {
    pub term: &'a str,
    pub distance: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BkTree {
    nodes: Vec<BkNode>,
}

impl BkTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term. Returns `false` if it was already present.
    pub fn insert(&mut self, term: &str) -> bool {
        if self.nodes.is_empty() {
            self.nodes.push(BkNode::leaf(term));
            return true;
        }

        let mut current = NodeId::ROOT;
        loop {
            let (distance, slot) = {
                let node = &self.nodes[current.index()];
                let d = levenshtein(term, &node.term);
                (d, node.children.binary_search_by_key(&(d as u32), |&(l, _)| l))
            };

            if distance == 0 {
                return false;
            }

            match slot {
                Ok(pos) => current = self.nodes[current.index()].children[pos].1,
                Err(pos) => {
                    let child = NodeId(self.nodes.len() as u32);
                    self.nodes.push(BkNode::leaf(term));
                    self.nodes[current.index()]
                        .children
                        .insert(pos, (distance as u32, child));
                    return true;
                }
            }
        }
    }

    /// All terms within `max_distance` edits of `term`, closest first.
    ///
    /// Ties are broken by term so the output is fully deterministic.
    pub fn query(&self, term: &str, max_distance: usize) -> Vec<TermMatch<'_>> {
        let mut matches = Vec::new();
        if self.nodes.is_empty() {
            return matches;
        }

        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            let d = levenshtein(term, &node.term);
            if d <= max_distance {
                matches.push(TermMatch {
                    term: &node.term,
                    distance: d,
                });
            }

            // Only edges labeled within [d - k, d + k] can lead to a match
            let lower = d.saturating_sub(max_distance);
            let upper = d.saturating_add(max_distance);
            let start = node
                .children
                .partition_point(|&(label, _)| (label as usize) < lower);
            for &(label, child) in &node.children[start..] {
                if label as usize > upper {
                    break;
                }
                stack.push(child);
            }
        }

        matches.sort_unstable_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.term.cmp(b.term))
        });
        matches
    }

    /// Exact membership, walking a single root-to-leaf path.
    pub fn contains(&self, term: &str) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let mut current = NodeId::ROOT;
        loop {
            let node = &self.nodes[current.index()];
            let d = levenshtein(term, &node.term);
            if d == 0 {
                return true;
            }
            match node.children.binary_search_by_key(&(d as u32), |&(l, _)| l) {
                Ok(pos) => current = node.children[pos].1,
                Err(_) => return false,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }

        let mut max_depth = 0;
        let mut stack = vec![(NodeId::ROOT, 1usize)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &(_, child) in &self.nodes[id.index()].children {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    /// Terms in arena order (root first).
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.term.as_str())
    }

    /// Raw arena, for persistence.
    pub fn nodes(&self) -> &[BkNode] {
        &self.nodes
    }

    /// Rebuild a tree from a persisted arena, checking every structural invariant.
    ///
    /// Rejects: child handles out of range, unsorted or zero edge labels, nodes
    /// with zero or several parents, unreachable nodes, and duplicate terms.
    /// Every node must also sit exactly `label` edits from each ancestor whose
    /// edge `label` leads down to it, not only from its direct parent. A tree
    /// passing these checks answers queries exactly like the one saved.
    pub fn from_nodes(nodes: Vec<BkNode>) -> io::Result<Self> {
        let invalid = |msg: String| io::Error::new(io::ErrorKind::InvalidData, msg);

        if nodes.len() > u32::MAX as usize {
            return Err(invalid(format!("{} nodes exceed handle range", nodes.len())));
        }

        let mut parent_count = vec![0u32; nodes.len()];
        let mut parent: Vec<Option<(usize, u32)>> = vec![None; nodes.len()];
        for (ix, node) in nodes.iter().enumerate() {
            let mut last_label = 0u32;
            for &(label, child) in &node.children {
                if label <= last_label {
                    return Err(invalid(format!(
                        "node {} has unsorted or zero edge label {}",
                        ix, label
                    )));
                }
                last_label = label;

                let Some(child_node) = nodes.get(child.index()) else {
                    return Err(invalid(format!(
                        "node {} points to missing child {}",
                        ix, child.0
                    )));
                };
                if child == NodeId::ROOT {
                    return Err(invalid(format!("node {} points back to the root", ix)));
                }

                let actual = levenshtein(&node.term, &child_node.term);
                if actual != label as usize {
                    return Err(invalid(format!(
                        "edge {} -> {} labeled {} but terms are {} apart",
                        ix, child.0, label, actual
                    )));
                }
                parent_count[child.index()] += 1;
                parent[child.index()] = Some((ix, label));
            }
        }

        // Every non-root node has exactly one parent; together with the root
        // having none this makes the edge set a forest, and reachability below
        // makes it a single tree.
        for (ix, &count) in parent_count.iter().enumerate().skip(1) {
            if count != 1 {
                return Err(invalid(format!("node {} has {} parents", ix, count)));
            }
        }

        let tree = Self { nodes };
        if !tree.nodes.is_empty() {
            let mut seen = vec![false; tree.nodes.len()];
            let mut stack = vec![NodeId::ROOT];
            let mut reached = 0usize;
            while let Some(id) = stack.pop() {
                if std::mem::replace(&mut seen[id.index()], true) {
                    return Err(invalid(format!("node {} reached twice", id.0)));
                }
                reached += 1;
                stack.extend(tree.nodes[id.index()].children.iter().map(|&(_, c)| c));
            }
            if reached != tree.nodes.len() {
                return Err(invalid(format!(
                    "{} of {} nodes unreachable from the root",
                    tree.nodes.len() - reached,
                    tree.nodes.len()
                )));
            }
        }

        // Acyclic from here on, so every upward walk ends at the root
        for (ix, node) in tree.nodes.iter().enumerate() {
            let mut up = parent[ix].and_then(|(p, _)| parent[p]);
            while let Some((ancestor, label)) = up {
                let actual = levenshtein(&tree.nodes[ancestor].term, &node.term);
                if actual != label as usize {
                    return Err(invalid(format!(
                        "node {} sits under edge {} of node {} but is {} edits away",
                        ix, label, ancestor, actual
                    )));
                }
                up = parent[ancestor];
            }
        }

        let mut unique = HashSet::with_capacity(tree.nodes.len());
        for node in &tree.nodes {
            if !unique.insert(node.term.as_str()) {
                return Err(invalid(format!("duplicate term {:?}", node.term)));
            }
        }

        Ok(tree)
    }
}

impl<S: AsRef<str>> FromIterator<S> for BkTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tree = BkTree::new();
        for term in iter {
            tree.insert(term.as_ref());
        }
        tree
    }
}
