//! Tree diffing into DOM patches.
//!
//! Children are compared by position. Paths are child indices from the root
//! node, so `[]` addresses the root itself.

use serde::{Deserialize, Serialize};

use crate::html::{Element, Node};

/// A single DOM mutation the client applies in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    /// Replace the node at `path` with new markup.
    Replace { path: Vec<usize>, html: String },
    SetText { path: Vec<usize>, text: String },
    SetAttr {
        path: Vec<usize>,
        name: String,
        value: String,
    },
    RemoveAttr { path: Vec<usize>, name: String },
    /// Append markup after the last child of the element at `path`.
    Append { path: Vec<usize>, html: String },
    /// Drop children of the element at `path` from index `len` on.
    Truncate { path: Vec<usize>, len: usize },
}

impl Patch {
    /// Whether the patch adds, removes, replaces or relabels nodes.
    ///
    /// Attribute patches leave every node where it was, so a path the client
    /// computed before them still names the same element.
    pub fn moves_nodes(&self) -> bool {
        !matches!(self, Patch::SetAttr { .. } | Patch::RemoveAttr { .. })
    }
}

/// Compute the patches turning `old` into `new`.
pub fn diff<M>(old: &Node<M>, new: &Node<M>) -> Vec<Patch> {
    let mut patches = Vec::new();
    let mut path = Vec::new();
    diff_node(old, new, &mut path, &mut patches);
    patches
}

fn diff_node<M>(old: &Node<M>, new: &Node<M>, path: &mut Vec<usize>, patches: &mut Vec<Patch>) {
    match (old, new) {
        (Node::Text(a), Node::Text(b)) => {
            if a != b {
                patches.push(Patch::SetText {
                    path: path.clone(),
                    text: b.clone(),
                });
            }
        }
        (Node::Element(a), Node::Element(b)) if a.tag() == b.tag() => {
            diff_attrs(a, b, path, patches);
            diff_children(a, b, path, patches);
        }
        _ => patches.push(Patch::Replace {
            path: path.clone(),
            html: new.to_html(),
        }),
    }
}

fn diff_attrs<M>(old: &Element<M>, new: &Element<M>, path: &[usize], patches: &mut Vec<Patch>) {
    let old_attrs = old.rendered_attrs();
    let new_attrs = new.rendered_attrs();

    for (name, value) in &new_attrs {
        let unchanged = old_attrs.iter().any(|(n, v)| n == name && v == value);
        if !unchanged {
            patches.push(Patch::SetAttr {
                path: path.to_vec(),
                name: name.clone(),
                value: value.clone(),
            });
        }
    }
    for (name, _) in &old_attrs {
        if !new_attrs.iter().any(|(n, _)| n == name) {
            patches.push(Patch::RemoveAttr {
                path: path.to_vec(),
                name: name.clone(),
            });
        }
    }
}

fn diff_children<M>(
    old: &Element<M>,
    new: &Element<M>,
    path: &mut Vec<usize>,
    patches: &mut Vec<Patch>,
) {
    let old_children = old.child_nodes();
    let new_children = new.child_nodes();

    for (index, (a, b)) in old_children.iter().zip(new_children).enumerate() {
        path.push(index);
        diff_node(a, b, path, patches);
        path.pop();
    }

    if new_children.len() > old_children.len() {
        let mut html = String::new();
        for child in &new_children[old_children.len()..] {
            child.write_html(&mut html);
        }
        patches.push(Patch::Append {
            path: path.clone(),
            html,
        });
    } else if old_children.len() > new_children.len() {
        patches.push(Patch::Truncate {
            path: path.clone(),
            len: new_children.len(),
        });
    }
}
