use crate::{
    edit_graph::*,
    heuristic::HeuristicInstance,
    prelude::*,
    queue::{Frontier, QueueElement},
    stats::AstarStats,
};

#[derive(Clone, Copy, Debug)]
struct State {
    g: Cost,
    /// The edge through which `g` was last improved.
    parent: Edge,
    /// Set when the state is expanded, and cleared again when it is reopened.
    closed: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            g: Cost::MAX,
            parent: Edge::None,
            closed: false,
        }
    }
}

/// Find the edit distance between `a` and `b` using A* with the given heuristic.
///
/// The heuristic must be admissible. With an overestimating heuristic the
/// search still terminates, but the returned distance may not be optimal.
///
/// Nodes whose `g` improves after they were expanded are reopened, so the
/// result is exact for admissible heuristics that are not consistent.
pub fn astar<H: HeuristicInstance>(a: Seq, b: Seq, h: &H) -> SearchResult {
    let start_time = instant::Instant::now();
    let ref graph = EditGraph::new(a, b);
    let mut stats = AstarStats::init(a, b);

    // The number of visited states is O(|a| |b|) in the worst case, but close
    // to |a| + |b| for similar sequences and a good heuristic.
    let capacity = a.len() + b.len() + 1;
    let mut queue = Frontier::<Pos>::with_capacity(capacity);
    let mut states = HashMap::<Pos, State>::with_capacity_and_hasher(capacity, Default::default());

    // Initialization with the root state.
    let h0 = {
        let start = graph.start();
        let h0 = h.h(start);
        queue.push(QueueElement {
            f: h0,
            g: 0,
            data: start,
        });
        stats.explored += 1;
        states.insert(
            start,
            State {
                g: 0,
                ..Default::default()
            },
        );
        h0
    };

    let distance = loop {
        let Some(QueueElement { f: queue_f, g: queue_g, data: pos }) = queue.pop() else {
            panic!("priority queue is empty before the target {} is reached.", graph.target());
        };

        let state = states.entry(pos).or_default();
        // Lazy deletion of outdated entries.
        if state.closed || queue_g > state.g {
            continue;
        }
        debug_assert_eq!(queue_g, state.g);

        state.closed = true;
        stats.expanded += 1;
        log::trace!("Expand {pos} g={queue_g} f={queue_f}");

        if graph.is_goal(pos) {
            break queue_g;
        }

        // Copy for local usage.
        let g = state.g;

        graph.iterate_outgoing_edges(pos, |next, edge| {
            let next_g = g + edge.cost();
            let cur_next = states.entry(next).or_default();

            // If the next state was already visited with smaller g, skip exploring again.
            if cur_next.g <= next_g {
                return;
            }
            if cur_next.closed {
                cur_next.closed = false;
                stats.reopened += 1;
                log::trace!("Reopen {next}: g {} -> {next_g}", cur_next.g);
            }
            cur_next.g = next_g;
            cur_next.parent = edge;

            queue.push(QueueElement {
                f: next_g + h.h(next),
                g: next_g,
                data: next,
            });
            stats.explored += 1;
        });
    };

    stats.distance = distance;
    stats.h = h.stats();
    stats.h.h0 = h0;
    stats.timing.astar = start_time.elapsed().as_secs_f64();
    if h0 > distance {
        log::warn!(
            "Heuristic at start is {h0} but the distance is only {distance}! The heuristic {} is not admissible.",
            h.params_string()
        );
    }
    log::debug!(
        "A* done: distance {distance}, expanded {}, explored {}, reopened {}",
        stats.expanded,
        stats.explored,
        stats.reopened
    );

    SearchResult {
        distance,
        target: graph.target(),
        states,
        stats,
    }
}

/// The outcome of a single A* search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// `g(target)` when the target was expanded.
    pub distance: Cost,
    pub target: Pos,
    states: HashMap<Pos, State>,
    pub stats: AstarStats,
}

impl SearchResult {
    /// The best known cost from the start to `pos`, if it was ever reached.
    pub fn g(&self, pos: Pos) -> Option<Cost> {
        self.states.get(&pos).map(|s| s.g)
    }

    /// All visited nodes and their best known `g`.
    pub fn cost_map(&self) -> impl Iterator<Item = (Pos, Cost)> + '_ {
        self.states.iter().map(|(&pos, s)| (pos, s.g))
    }

    /// Whether `pos` was expanded and not reopened afterwards.
    pub fn is_closed(&self, pos: Pos) -> bool {
        self.states.get(&pos).map_or(false, |s| s.closed)
    }

    pub fn closed(&self) -> impl Iterator<Item = Pos> + '_ {
        self.states
            .iter()
            .filter(|(_, s)| s.closed)
            .map(|(&pos, _)| pos)
    }

    /// Follow the parent edges back from the target. The path runs from
    /// `(0, 0)` to the target, inclusive.
    pub fn path(&self) -> Vec<Pos> {
        let traceback_start = instant::Instant::now();
        let mut path = vec![self.target];
        let mut cost = 0;
        let mut current = self.target;
        while current != Pos(0, 0) {
            let edge = self.states[&current].parent;
            cost += edge.cost();
            current = edge
                .back(&current)
                .unwrap_or_else(|| panic!("No parent found for position {current}!"));
            path.push(current);
        }
        path.reverse();
        assert_eq!(
            cost, self.distance,
            "Traceback cost {cost} does not equal distance to end {}!",
            self.distance
        );
        log::trace!(
            "Traceback of {} steps took {:?}",
            path.len(),
            traceback_start.elapsed()
        );
        path
    }
}
