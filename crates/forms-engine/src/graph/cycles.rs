//! Cycle detection
//!
//! Reports every simple cycle reachable from a field by following "depends
//! on" edges. Fields are numbered in depth-first discovery order from the
//! start. Strongly connected components (Tarjan) confine the search to the
//! parts of the graph that can hold a cycle, and a blocked-set circuit search
//! (Johnson) enumerates each cycle once, beginning at its earliest
//! discovered field. Acyclic collections cost one linear pass per start.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::{Field, FieldId};
use crate::graph::dependency::{
    build_dependency_map_with, ConditionTriggers, DependencyMap, TriggerResolver,
};

/// Cycles reachable from one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleWarning<'a> {
    pub field: &'a Field,
    pub cycles: Vec<Vec<FieldId>>,
}

/// Every cycle reachable from `field` by following "depends on" edges.
///
/// A field whose rule names itself yields the single cycle `[field.id]`.
/// Cycles through `field` start with it.
pub fn find_cycles(field: &Field, fields: &[Field]) -> Vec<Vec<FieldId>> {
    find_cycles_with(&ConditionTriggers, field, fields)
}

/// [`find_cycles`] with a custom trigger resolver
pub fn find_cycles_with<R>(resolver: &R, field: &Field, fields: &[Field]) -> Vec<Vec<FieldId>>
where
    R: TriggerResolver + ?Sized,
{
    let own = resolver.trigger_fields(field, fields);
    if own.is_empty() {
        return Vec::new();
    }
    let mut graph = build_dependency_map_with(resolver, fields);
    graph.insert(field.id.clone(), own);
    cycles_from(&field.id, &graph)
}

/// Run the detector for every field and keep those with cycles
pub fn cycle_warnings(fields: &[Field]) -> Vec<CycleWarning<'_>> {
    cycle_warnings_with(&ConditionTriggers, fields)
}

/// [`cycle_warnings`] with a custom trigger resolver
pub fn cycle_warnings_with<'a, R>(resolver: &R, fields: &'a [Field]) -> Vec<CycleWarning<'a>>
where
    R: TriggerResolver + ?Sized,
{
    let graph = build_dependency_map_with(resolver, fields);
    fields
        .iter()
        .filter_map(|field| {
            let cycles = cycles_from(&field.id, &graph);
            (!cycles.is_empty()).then_some(CycleWarning { field, cycles })
        })
        .collect()
}

fn cycles_from(start: &FieldId, graph: &DependencyMap) -> Vec<Vec<FieldId>> {
    let reach = Reachable::walk(start, graph);
    let component = Tarjan::components(&reach.edges);

    let mut cycles = Vec::new();
    for first in 0..reach.nodes.len() {
        let cyclic = reach.edges[first].iter().any(|&w| component[w] == component[first]);
        if !cyclic {
            continue;
        }
        let mut search = CircuitSearch::new(first, &reach.edges, &component);
        search.circuit(first);
        for circuit in search.found {
            let cycle: Vec<FieldId> = circuit.into_iter().map(|i| reach.nodes[i].clone()).collect();
            debug!(cycle = ?cycle, "dependency cycle");
            cycles.push(cycle);
        }
    }
    cycles
}

/// Sub-graph reachable from a start field, indexed by discovery order
struct Reachable<'g> {
    nodes: Vec<&'g FieldId>,
    edges: Vec<Vec<usize>>,
}

impl<'g> Reachable<'g> {
    fn walk(start: &'g FieldId, graph: &'g DependencyMap) -> Self {
        let mut index = HashMap::new();
        let mut nodes = Vec::new();
        Self::discover(start, graph, &mut index, &mut nodes);

        let edges = nodes
            .iter()
            .map(|&id| {
                graph
                    .get(id)
                    .map(|triggers| triggers.iter().filter_map(|t| index.get(t).copied()).collect())
                    .unwrap_or_default()
            })
            .collect();
        Self { nodes, edges }
    }

    fn discover(
        node: &'g FieldId,
        graph: &'g DependencyMap,
        index: &mut HashMap<&'g FieldId, usize>,
        nodes: &mut Vec<&'g FieldId>,
    ) {
        if index.contains_key(node) {
            return;
        }
        index.insert(node, nodes.len());
        nodes.push(node);
        if let Some(triggers) = graph.get(node) {
            for next in triggers {
                Self::discover(next, graph, index, nodes);
            }
        }
    }
}

/// Tarjan's strongly connected components
struct Tarjan<'e> {
    edges: &'e [Vec<usize>],
    next: usize,
    index: Vec<Option<usize>>,
    low: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    component: Vec<usize>,
    count: usize,
}

impl<'e> Tarjan<'e> {
    /// Component id of every node
    fn components(edges: &'e [Vec<usize>]) -> Vec<usize> {
        let n = edges.len();
        let mut tarjan = Self {
            edges,
            next: 0,
            index: vec![None; n],
            low: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            component: vec![0; n],
            count: 0,
        };
        for v in 0..n {
            if tarjan.index[v].is_none() {
                tarjan.visit(v);
            }
        }
        tarjan.component
    }

    fn visit(&mut self, v: usize) {
        let own = self.next;
        self.next += 1;
        self.index[v] = Some(own);
        self.low[v] = own;
        self.stack.push(v);
        self.on_stack[v] = true;

        let edges = self.edges;
        for &w in &edges[v] {
            match self.index[w] {
                None => {
                    self.visit(w);
                    self.low[v] = self.low[v].min(self.low[w]);
                }
                Some(seen) if self.on_stack[w] => self.low[v] = self.low[v].min(seen),
                Some(_) => {}
            }
        }

        if self.low[v] == own {
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                self.component[w] = self.count;
                if w == v {
                    break;
                }
            }
            self.count += 1;
        }
    }
}

/// Johnson's circuit search for the cycles whose earliest node is `start`
struct CircuitSearch<'e> {
    edges: &'e [Vec<usize>],
    component: &'e [usize],
    start: usize,
    blocked: Vec<bool>,
    blocked_by: Vec<Vec<usize>>,
    path: Vec<usize>,
    found: Vec<Vec<usize>>,
}

impl<'e> CircuitSearch<'e> {
    fn new(start: usize, edges: &'e [Vec<usize>], component: &'e [usize]) -> Self {
        let n = edges.len();
        Self {
            edges,
            component,
            start,
            blocked: vec![false; n],
            blocked_by: vec![Vec::new(); n],
            path: Vec::new(),
            found: Vec::new(),
        }
    }

    fn circuit(&mut self, v: usize) -> bool {
        let mut closed = false;
        self.path.push(v);
        self.blocked[v] = true;

        let (edges, component, start) = (self.edges, self.component, self.start);
        let allowed = |w: &&usize| **w >= start && component[**w] == component[start];
        for &w in edges[v].iter().filter(allowed) {
            if w == start {
                self.found.push(self.path.clone());
                closed = true;
            } else if !self.blocked[w] && self.circuit(w) {
                closed = true;
            }
        }

        if closed {
            self.unblock(v);
        } else {
            for &w in edges[v].iter().filter(allowed) {
                if !self.blocked_by[w].contains(&v) {
                    self.blocked_by[w].push(v);
                }
            }
        }
        self.path.pop();
        closed
    }

    fn unblock(&mut self, v: usize) {
        self.blocked[v] = false;
        for w in std::mem::take(&mut self.blocked_by[v]) {
            if self.blocked[w] {
                self.unblock(w);
            }
        }
    }
}
