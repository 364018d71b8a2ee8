//! # File Tree
//!
//! The in-memory project tree shown in the left panel.
//!
//! ```text
//! Forest
//! ├── roots: Vec<Arc<Node>>     // top-level nodes, display order
//! └── next_id: u64              // only ever moves forward
//!
//! Node
//! ├── id: NodeId
//! ├── name: String
//! └── kind: File | Folder { children, expanded }
//! ```
//!
//! ## Copy-on-write
//!
//! Every mutation takes `&Forest` and returns a new `Forest`. Only the path
//! from the root to the changed node is rebuilt; every other subtree is the
//! same `Arc<Node>` in both forests. Callers holding the old forest never see
//! the change.
//!
//! Lookups act on the first depth-first match. Ids are unique across the whole
//! forest, so the first match is the only match.

use std::fmt;
use std::sync::Arc;

/// Opaque node identifier. Allocated by [`Forest::insert_item`], never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the user asked to create in the new-item dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    #[default]
    File,
    Folder,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::File => "File",
            ItemKind::Folder => "Folder",
        }
    }

    pub fn other(self) -> Self {
        match self {
            ItemKind::File => ItemKind::Folder,
            ItemKind::Folder => ItemKind::File,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    File,
    Folder {
        children: Vec<Arc<Node>>,
        expanded: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn file(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::File,
        }
    }

    pub fn folder(id: NodeId, name: impl Into<String>, expanded: bool, children: Vec<Node>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Folder {
                children: children.into_iter().map(Arc::new).collect(),
                expanded,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Always `false` for files.
    pub fn is_expanded(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { expanded: true, .. })
    }

    /// Empty for files.
    pub fn children(&self) -> &[Arc<Node>] {
        match &self.kind {
            NodeKind::File => &[],
            NodeKind::Folder { children, .. } => children,
        }
    }

    pub fn item_kind(&self) -> ItemKind {
        match self.kind {
            NodeKind::File => ItemKind::File,
            NodeKind::Folder { .. } => ItemKind::Folder,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|child| child.subtree_size())
            .sum::<usize>()
    }

    fn max_id(&self) -> u64 {
        self.children()
            .iter()
            .map(|child| child.max_id())
            .fold(self.id.0, u64::max)
    }
}

/// One line of the rendered tree: a visible node and its nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub node: &'a Node,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    roots: Vec<Arc<Node>>,
    next_id: u64,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Forest {
    /// Builds a forest from owned nodes. The id counter starts above the
    /// largest id present so freshly inserted nodes never collide.
    pub fn new(roots: Vec<Node>) -> Self {
        let next_id = roots.iter().map(Node::max_id).max().map_or(1, |max| max + 1);
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
            next_id,
        }
    }

    /// The demo project every session starts with.
    pub fn seed() -> Self {
        Self::new(vec![
            Node::folder(
                NodeId(1),
                "src",
                true,
                vec![
                    Node::file(NodeId(2), "index.js"),
                    Node::file(NodeId(3), "styles.css"),
                ],
            ),
            Node::file(NodeId(4), "package.json"),
            Node::file(NodeId(5), "README.md"),
        ])
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes at every depth.
    pub fn total_nodes(&self) -> usize {
        self.roots.iter().map(|node| node.subtree_size()).sum()
    }

    /// Every id in depth-first pre-order.
    pub fn ids(&self) -> Vec<NodeId> {
        fn collect(nodes: &[Arc<Node>], out: &mut Vec<NodeId>) {
            for node in nodes {
                out.push(node.id);
                collect(node.children(), out);
            }
        }
        let mut out = Vec::with_capacity(self.total_nodes());
        collect(&self.roots, &mut out);
        out
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.path_to(id).and_then(|path| path.last().copied())
    }

    /// Ancestors of `id` from the root down, ending with the node itself.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<&Node>> {
        fn walk<'a>(nodes: &'a [Arc<Node>], id: NodeId, path: &mut Vec<&'a Node>) -> bool {
            for node in nodes {
                path.push(node);
                if node.id == id || walk(node.children(), id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
        let mut path = Vec::new();
        walk(&self.roots, id, &mut path).then_some(path)
    }

    /// Slash-joined names from the root to `id` (e.g. `src/index.js`).
    /// This is the key the document store uses.
    pub fn document_key(&self, id: NodeId) -> Option<String> {
        self.path_to(id).map(|path| {
            path.iter()
                .map(|node| node.name.as_str())
                .collect::<Vec<_>>()
                .join("/")
        })
    }

    /// Depth-first pre-order listing of what the tree panel shows.
    /// A folder's children appear only while it is expanded.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        fn walk<'a>(nodes: &'a [Arc<Node>], depth: usize, out: &mut Vec<VisibleRow<'a>>) {
            for node in nodes {
                out.push(VisibleRow { node, depth });
                if node.is_expanded() {
                    walk(node.children(), depth + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, 0, &mut out);
        out
    }

    /// Flips `expanded` on the folder with this id. Files and misses leave
    /// the forest unchanged.
    pub fn toggle_folder(&self, id: NodeId) -> Forest {
        self.rewrite(id, |node| match &node.kind {
            NodeKind::File => Edit::Keep,
            NodeKind::Folder { children, expanded } => Edit::Replace(Node {
                id: node.id,
                name: node.name.clone(),
                kind: NodeKind::Folder {
                    children: children.clone(),
                    expanded: !expanded,
                },
            }),
        })
    }

    /// Removes the node with this id wherever it sits. A folder goes with
    /// its whole subtree. Misses leave the forest unchanged.
    pub fn delete_item(&self, id: NodeId) -> Forest {
        self.rewrite(id, |_| Edit::Remove)
    }

    /// Appends a new node at the top level. Folders start empty and
    /// collapsed. The name is taken as-is.
    pub fn insert_item(&self, name: &str, kind: ItemKind) -> (Forest, NodeId) {
        let id = NodeId(self.next_id);
        let node = match kind {
            ItemKind::File => Node::file(id, name),
            ItemKind::Folder => Node::folder(id, name, false, Vec::new()),
        };
        let mut roots = self.roots.clone();
        roots.push(Arc::new(node));
        let forest = Forest {
            roots,
            next_id: self.next_id + 1,
        };
        (forest, id)
    }

    fn rewrite(&self, id: NodeId, edit: impl Fn(&Node) -> Edit) -> Forest {
        match rewrite_first(&self.roots, id, &edit) {
            Search::Hit(Some(roots)) => Forest {
                roots,
                next_id: self.next_id,
            },
            Search::Hit(None) | Search::Miss => self.clone(),
        }
    }
}

/// What to do with the node a search lands on.
enum Edit {
    Keep,
    Replace(Node),
    Remove,
}

enum Search {
    Miss,
    /// Found. `None` means the edit kept the node as it was.
    Hit(Option<Vec<Arc<Node>>>),
}

/// Depth-first search for `id` within one sibling sequence. On a hit the
/// sequence is rebuilt with the edit applied; siblings are shared.
fn rewrite_first<F: Fn(&Node) -> Edit>(nodes: &[Arc<Node>], id: NodeId, edit: &F) -> Search {
    for (index, node) in nodes.iter().enumerate() {
        if node.id == id {
            let siblings = match edit(node) {
                Edit::Keep => return Search::Hit(None),
                Edit::Replace(replacement) => {
                    let mut siblings = nodes.to_vec();
                    siblings[index] = Arc::new(replacement);
                    siblings
                }
                Edit::Remove => {
                    let mut siblings = nodes.to_vec();
                    siblings.remove(index);
                    siblings
                }
            };
            return Search::Hit(Some(siblings));
        }

        let NodeKind::Folder { children, expanded } = &node.kind else {
            continue;
        };
        match rewrite_first(children, id, edit) {
            Search::Miss => {}
            Search::Hit(None) => return Search::Hit(None),
            Search::Hit(Some(children)) => {
                let mut siblings = nodes.to_vec();
                siblings[index] = Arc::new(Node {
                    id: node.id,
                    name: node.name.clone(),
                    kind: NodeKind::Folder {
                        children,
                        expanded: *expanded,
                    },
                });
                return Search::Hit(Some(siblings));
            }
        }
    }
    Search::Miss
}
