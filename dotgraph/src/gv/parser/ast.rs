//! The syntax tree that the DOT parser produces. The tree keeps the program
//! as it was written: nothing is resolved, and default attributes are not
//! applied. The graph builder gives it meaning.

use std::fmt;

/// A place in the source text. Line and column are 1-based. The offset is the
/// one that `Scanner::location_report` expects.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub pos: usize,
}

/// A node reference, with an optional port ("port" or "port:compass").
#[derive(Debug, Clone, PartialEq)]
pub struct NodeId {
    pub name: String,
    pub port: Option<String>,
}

impl NodeId {
    pub fn new(name: &str, port: Option<String>) -> Self {
        NodeId {
            name: name.to_string(),
            port,
        }
    }
}

/// An attribute value. Html strings are stored without the outer '<' '>'.
#[derive(Debug, Clone, PartialEq)]
pub enum DotString {
    String(String),
    HtmlString(String),
}

impl DotString {
    pub fn as_str(&self) -> &str {
        match self {
            DotString::String(text) | DotString::HtmlString(text) => text,
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, DotString::HtmlString(_))
    }
}

impl fmt::Display for DotString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_html() {
            write!(f, "<{}>", self.as_str())
        } else {
            f.write_str(self.as_str())
        }
    }
}

/// The name=value pairs of one or more consecutive '[...]' blocks, in the
/// order they were written. Names may repeat.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttributeList {
    pub list: Vec<(String, DotString)>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, value: DotString) {
        self.list.push((name.to_string(), value));
    }

    pub fn append(&mut self, other: AttributeList) {
        self.list.extend(other.list);
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<(String, DotString)> {
        self.list.iter()
    }
}

/// Which default table a 'graph', 'node' or 'edge' statement updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrStmtTarget {
    Graph,
    Node,
    Edge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttrStmt {
    pub target: AttrStmtTarget,
    pub list: AttributeList,
}

impl AttrStmt {
    pub fn new(target: AttrStmtTarget, list: AttributeList) -> Self {
        AttrStmt { target, list }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeStmt {
    pub id: NodeId,
    pub list: AttributeList,
}

impl NodeStmt {
    pub fn new(id: NodeId, list: AttributeList) -> Self {
        NodeStmt { id, list }
    }
}

/// The edge operator as written. The graph kind decides the real direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKind {
    Arrow,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Node(NodeId),
    SubGraph(Graph),
}

/// One step of an edge chain: the operator, where it was written, and the
/// endpoint that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTarget {
    pub arrow: ArrowKind,
    pub loc: Location,
    pub endpoint: Endpoint,
}

/// A chain such as "a -> b -> {c d} [color=red]". The attributes apply to
/// every edge of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStmt {
    pub from: Endpoint,
    pub to: Vec<EdgeTarget>,
    pub list: AttributeList,
}

impl EdgeStmt {
    pub fn new(from: Endpoint) -> Self {
        EdgeStmt {
            from,
            to: Vec::new(),
            list: AttributeList::new(),
        }
    }

    pub fn push(&mut self, arrow: ArrowKind, loc: Location, endpoint: Endpoint) {
        self.to.push(EdgeTarget {
            arrow,
            loc,
            endpoint,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Edge(EdgeStmt),
    Node(NodeStmt),
    Attribute(AttrStmt),
    /// A graph attribute written as "name = value".
    Assignment(String, DotString),
    SubGraph(Graph),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StmtList {
    pub list: Vec<Stmt>,
}

impl StmtList {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A top level graph or a subgraph. Subgraphs take 'strict' and 'directed'
/// from the graph that contains them, so the flags are only read for top
/// level graphs.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub name: String,
    pub strict: bool,
    pub directed: bool,
    pub list: StmtList,
}

impl Graph {
    pub fn new(name: &str) -> Self {
        Graph {
            name: name.to_string(),
            strict: false,
            directed: false,
            list: StmtList::new(),
        }
    }
}
