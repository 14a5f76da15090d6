// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BK-tree arena encoding.
//!
//! Format:
//! - node_count: varint
//! - For each node in arena order (root first):
//!   - term: varint length + UTF-8
//!   - child_count: varint
//!   - For each child: label varint, child handle varint
//!
//! Structural checks (labels, parents, reachability) are done by
//! [`BkTree::from_nodes`] once the arena is decoded.

use std::io;

use super::encoding::{encode_str, encode_varint, Cursor};
use crate::fuzzy::{BkNode, BkTree, NodeId};

pub fn encode_tree(tree: &BkTree, buf: &mut Vec<u8>) {
    encode_varint(tree.len() as u64, buf);
    for node in tree.nodes() {
        encode_str(&node.term, buf);
        encode_varint(node.children.len() as u64, buf);
        for &(label, child) in &node.children {
            encode_varint(u64::from(label), buf);
            encode_varint(u64::from(child.0), buf);
        }
    }
}

pub fn decode_tree(bytes: &[u8]) -> io::Result<BkTree> {
    let mut cursor = Cursor::new(bytes);
    // term (>=1 byte) + child count
    let node_count = cursor.count("node", 2)?;

    let mut nodes = Vec::with_capacity(node_count);
    for _ in 0..node_count {
        let term = cursor.string()?;
        let child_count = cursor.count("child", 2)?;
        let mut children = Vec::with_capacity(child_count);
        for _ in 0..child_count {
            let label = cursor.u32("edge label")?;
            let child = cursor.u32("child handle")?;
            children.push((label, NodeId(child)));
        }
        nodes.push(BkNode { term, children });
    }
    cursor.finish()?;

    BkTree::from_nodes(nodes)
}
