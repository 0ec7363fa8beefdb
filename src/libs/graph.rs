//! Dependency graph over the tasks of one project.
//!
//! A task depends on the tasks listed in its `dependencies` set; an edge
//! `A -> B` means "A cannot start before B ends". The graph is rebuilt from a
//! task slice for every computation and never stored.
//!
//! All traversals use an explicit stack with visiting/visited marks, so very
//! long dependency chains cannot overflow the call stack.
//!
//! ## Ordering
//!
//! [`DependencyGraph::topological_order`] emits each task after all of its
//! dependencies. Roots are visited in input order and dependencies in id
//! order, so the output is deterministic for a fixed input.

use super::error::{TrackerError, TrackerResult};
use super::task::Task;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Visited,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    edges: HashMap<String, Vec<String>>,
    dangling: Vec<(String, String)>,
}

impl DependencyGraph {
    pub fn build(tasks: &[Task]) -> Self {
        let known: HashSet<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
        let mut graph = DependencyGraph::default();

        for task in tasks {
            let mut deps = Vec::with_capacity(task.dependencies.len());
            for dep in &task.dependencies {
                if known.contains(dep.as_str()) {
                    deps.push(dep.clone());
                } else {
                    graph.dangling.push((task.id.clone(), dep.clone()));
                }
            }
            if !graph.edges.contains_key(&task.id) {
                graph.nodes.push(task.id.clone());
            }
            graph.edges.entry(task.id.clone()).or_default().extend(deps);
        }
        graph
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.edges.contains_key(task_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct dependencies of `task_id` that exist in the graph.
    pub fn dependencies_of(&self, task_id: &str) -> &[String] {
        self.edges.get(task_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(task, dependency)` pairs pointing at tasks outside the graph.
    pub fn dangling(&self) -> &[(String, String)] {
        &self.dangling
    }

    /// Cycle reachable from `task_id`, as a path that starts and ends on the same task.
    pub fn detect_cycle(&self, task_id: &str) -> Option<Vec<String>> {
        if !self.contains(task_id) {
            return None;
        }
        self.walk(std::iter::once(task_id)).err()
    }

    /// First cycle found anywhere in the graph.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        self.walk(self.nodes.iter().map(String::as_str)).err()
    }

    pub fn topological_order(&self) -> TrackerResult<Vec<String>> {
        self.walk(self.nodes.iter().map(String::as_str)).map_err(|cycle| TrackerError::CircularDependency { cycle })
    }

    /// Whether adding `task_id -> dependency_id` would close a cycle.
    pub fn would_create_cycle(&self, task_id: &str, dependency_id: &str) -> bool {
        task_id == dependency_id || self.dependency_chain(dependency_id).iter().any(|id| id == task_id)
    }

    /// Every task `task_id` transitively depends on, nearest first, each listed once.
    pub fn dependency_chain(&self, task_id: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::from([task_id]);
        let mut queue: VecDeque<&str> = VecDeque::from([task_id]);
        let mut chain = Vec::new();

        while let Some(current) = queue.pop_front() {
            for dep in self.dependencies_of(current) {
                if seen.insert(dep.as_str()) {
                    chain.push(dep.clone());
                    queue.push_back(dep.as_str());
                }
            }
        }
        chain
    }

    /// Tasks that list `task_id` as a direct dependency, in input order.
    pub fn dependents(&self, task_id: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|node| self.dependencies_of(node).iter().any(|dep| dep == task_id))
            .cloned()
            .collect()
    }

    /// Post-order DFS from `roots`. `Err` carries the first cycle met.
    fn walk<'a>(&'a self, roots: impl Iterator<Item = &'a str>) -> Result<Vec<String>, Vec<String>> {
        let mut marks: HashMap<&'a str, Mark> = HashMap::new();
        let mut order = Vec::with_capacity(self.nodes.len());

        for root in roots {
            if marks.contains_key(root) {
                continue;
            }
            marks.insert(root, Mark::Visiting);
            let mut stack: Vec<(&'a str, usize)> = vec![(root, 0)];

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let deps = self.dependencies_of(node);

                if frame.1 < deps.len() {
                    let dep = deps[frame.1].as_str();
                    frame.1 += 1;
                    match marks.get(dep) {
                        Some(Mark::Visited) => {}
                        Some(Mark::Visiting) => {
                            let start = stack.iter().position(|(id, _)| *id == dep).unwrap_or(0);
                            let mut cycle: Vec<String> = stack[start..].iter().map(|(id, _)| id.to_string()).collect();
                            cycle.push(dep.to_string());
                            return Err(cycle);
                        }
                        None => {
                            marks.insert(dep, Mark::Visiting);
                            stack.push((dep, 0));
                        }
                    }
                } else {
                    marks.insert(node, Mark::Visited);
                    order.push(node.to_string());
                    stack.pop();
                }
            }
        }
        Ok(order)
    }
}

/// Tasks of `tasks` sorted so that every task follows its dependencies.
pub fn topological_order(tasks: &[Task]) -> TrackerResult<Vec<&Task>> {
    let order = DependencyGraph::build(tasks).topological_order()?;
    let by_id: HashMap<&str, &Task> = tasks.iter().map(|task| (task.id.as_str(), task)).collect();
    Ok(order.iter().filter_map(|id| by_id.get(id.as_str()).copied()).collect())
}
