//! 优先队列的排序键
//!
//! 键为 (距离或估值, 顶点 ID)，顶点 ID 只用于打破平局，保证出队顺序确定。

use crate::numeric::Weight;
use crate::types::NodeId;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub(crate) struct Priority<W> {
    score: W,
    node: NodeId,
}

impl<W> Priority<W> {
    pub(crate) fn new(score: W, node: NodeId) -> Self {
        Self { score, node }
    }

    pub(crate) fn into_parts(self) -> (W, NodeId) {
        (self.score, self.node)
    }
}

impl<W: Weight> PartialEq for Priority<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for Priority<W> {}

impl<W: Weight> PartialOrd for Priority<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for Priority<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .compare(&other.score)
            .then_with(|| self.node.cmp(&other.node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    #[test]
    fn test_ties_broken_by_node() {
        let mut heap = BinaryHeap::new();
        heap.push(Reverse(Priority::new(2.0, NodeId::new(9))));
        heap.push(Reverse(Priority::new(1.0, NodeId::new(5))));
        heap.push(Reverse(Priority::new(1.0, NodeId::new(3))));

        let order: Vec<NodeId> = std::iter::from_fn(|| heap.pop().map(|Reverse(p)| p.into_parts().1))
            .collect();
        assert_eq!(order, vec![NodeId::new(3), NodeId::new(5), NodeId::new(9)]);
    }
}
