use std::cmp::Ordering;
use std::rc::Rc;

/// Search state together with its backward cost and heuristic estimate.
#[derive(Clone, Debug)]
pub struct SearchNode<S> {
    pub state: S,
    pub backward_cost: f64,
    pub heuristic: f64,
}

impl<S> SearchNode<S> {
    pub fn new(state: S, backward_cost: f64, heuristic: f64) -> Self {
        SearchNode {
            state,
            backward_cost,
            heuristic,
        }
    }

    pub fn total_priority(&self) -> f64 {
        self.backward_cost + self.heuristic
    }
}

/// Immutable fringe record. Entries form a backpointer chain towards the
/// root, an ancestor lives as long as some descendant is still reachable.
#[derive(Debug)]
pub struct FringeEntry<S, A> {
    pub parent: Option<Rc<FringeEntry<S, A>>>,
    pub node: SearchNode<S>,
    pub action: Option<A>,
}

impl<S, A: Clone> FringeEntry<S, A> {
    pub fn root(node: SearchNode<S>) -> Rc<Self> {
        Rc::new(FringeEntry {
            parent: None,
            node,
            action: None,
        })
    }

    pub fn child(parent: &Rc<Self>, node: SearchNode<S>, action: A) -> Rc<Self> {
        Rc::new(FringeEntry {
            parent: Some(Rc::clone(parent)),
            node,
            action: Some(action),
        })
    }

    pub fn state(&self) -> &S {
        &self.node.state
    }

    /// Actions from the root to this entry, in start to goal order.
    pub fn actions(&self) -> Vec<A> {
        let mut actions = Vec::new();
        let mut current = Some(self);
        while let Some(entry) = current {
            if let Some(action) = &entry.action {
                actions.push(action.clone());
            }
            current = entry.parent.as_deref();
        }
        actions.reverse();
        actions
    }
}

// Priority fringe wrapper, lowest priority pops first out of a max-heap.
#[derive(Debug)]
pub(crate) struct PriorityOrderWrapper<S, A> {
    pub(crate) entry: Rc<FringeEntry<S, A>>,
    pub(crate) sequence: usize,
}

impl<S, A> PriorityOrderWrapper<S, A> {
    pub(crate) fn new(entry: Rc<FringeEntry<S, A>>, sequence: usize) -> Self {
        PriorityOrderWrapper { entry, sequence }
    }

    pub(crate) fn priority(&self) -> f64 {
        self.entry.node.total_priority()
    }
}

impl<S, A> PartialEq for PriorityOrderWrapper<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S, A> Eq for PriorityOrderWrapper<S, A> {}

impl<S, A> PartialOrd for PriorityOrderWrapper<S, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, A> Ord for PriorityOrderWrapper<S, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority()
            .total_cmp(&self.priority())
            // Earlier insertion wins ties
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
