use super::models::{Coord, GoalMask, State};
use super::neighbor_policy::arrive;

pub type NodeId = usize;

/// One pushed search node. Superseded nodes stay in the arena untouched;
/// they are simply never popped as fresh again.
#[derive(Copy, Clone, Debug)]
pub struct SearchNode {
    pub state: State,
    pub g: u32,
    pub parent: Option<NodeId>,
}

/// Index-addressed node storage for one search invocation.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    /// Coordinates from the root to `terminal`, inclusive at both ends.
    pub fn path_to(&self, terminal: NodeId) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut cur = Some(terminal);
        while let Some(id) = cur {
            let node = &self.nodes[id];
            path.push(node.state.pos);
            cur = node.parent;
        }
        path.reverse();
        path
    }
}

/// Goal indices in the order they are first reached along `path`.
pub fn rescue_order(path: &[Coord], goals: &[Coord]) -> Vec<usize> {
    let mut mask = GoalMask::EMPTY;
    let mut order = Vec::with_capacity(goals.len());
    for &pos in path {
        let next = arrive(mask, pos, goals);
        order.extend((0..goals.len()).filter(|&i| next.contains(i) && !mask.contains(i)));
        mask = next;
    }
    order
}

/// Visit mask after each step of `path`.
pub fn mask_trace(path: &[Coord], goals: &[Coord]) -> Vec<GoalMask> {
    path.iter()
        .scan(GoalMask::EMPTY, |mask, &pos| {
            *mask = arrive(*mask, pos, goals);
            Some(*mask)
        })
        .collect()
}
