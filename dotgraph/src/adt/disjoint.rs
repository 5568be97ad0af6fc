//! This module implements the disjoint-set (union-find) data structure. It is
//! used for finding the connected components of a graph while edges are
//! added, for example when building a minimum spanning tree.

/// A disjoint-set forest over the elements 0..n.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// Number of disjoint sets.
    count: usize,
}

impl DisjointSet {
    /// Creates \p n singleton sets.
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
            count: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of disjoint sets.
    pub fn num_sets(&self) -> usize {
        self.count
    }

    /// Returns the representative of the set that contains \p x.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression.
        let mut curr = x;
        while self.parent[curr] != root {
            let next = self.parent[curr];
            self.parent[curr] = root;
            curr = next;
        }
        root
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Merges the sets of \p a and \p b.
    /// \returns True if the sets were disjoint.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        // Union by rank.
        if self.rank[ra] < self.rank[rb] {
            self.parent[ra] = rb;
        } else if self.rank[ra] > self.rank[rb] {
            self.parent[rb] = ra;
        } else {
            self.parent[rb] = ra;
            self.rank[ra] += 1;
        }
        self.count -= 1;
        true
    }
}

#[test]
fn test_disjoint_set() {
    let mut ds = DisjointSet::new(5);
    assert_eq!(ds.num_sets(), 5);
    assert!(!ds.same_set(0, 1));

    assert!(ds.union(0, 1));
    assert!(ds.union(2, 3));
    assert!(!ds.union(1, 0));
    assert_eq!(ds.num_sets(), 3);

    assert!(ds.same_set(0, 1));
    assert!(!ds.same_set(1, 2));

    assert!(ds.union(1, 3));
    assert!(ds.same_set(0, 2));
    assert!(!ds.same_set(0, 4));
    assert_eq!(ds.num_sets(), 2);
}
