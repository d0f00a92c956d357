use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use crate::{Error, Result};

/// Entry marker for a workflow. Not backed by a node.
pub const START: &str = "START";
/// Terminal marker for a workflow. Not backed by a node.
pub const END: &str = "END";

type StepFn<S> = Arc<dyn Fn(S) -> BoxFuture<'static, S> + Send + Sync>;
type DecideFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

enum Transition<S> {
    Fixed(String),
    Conditional(DecideFn<S>),
}

/// A directed graph of named asynchronous steps over a shared state value.
///
/// Build once with [`add_node`](Self::add_node) / [`add_edge`](Self::add_edge) /
/// [`add_conditional_edge`](Self::add_conditional_edge), then call
/// [`invoke`](Self::invoke) any number of times. The registration tables are
/// read-only after construction, so one graph can serve concurrent
/// invocations; each invocation owns its own state value.
///
/// The graph never inspects the state itself. Steps receive the current state
/// and return the next one; routing on step outcomes (including step-level
/// failures recorded inside the state) happens only through conditional edges.
///
/// Known limitation: no cycle detection. An edge set that forms a cycle loops
/// until the caller gives up on it.
pub struct StateGraph<S> {
    nodes: HashMap<String, StepFn<S>>,
    edges: HashMap<String, Transition<S>>,
}

impl<S> Default for StateGraph<S>
where
    S: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Send + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    /// Registers a step under `name`. Registering the same name twice
    /// replaces the previous step (last write wins).
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or one of the reserved markers. Node names
    /// are fixed at build time, so this can only fire while wiring a graph,
    /// never during an invocation.
    pub fn add_node<F, Fut>(&mut self, name: impl Into<String>, step: F) -> &mut Self
    where
        F: Fn(S) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = S> + Send + 'static,
    {
        let name = name.into();
        assert!(!name.is_empty(), "node name must not be empty");
        assert!(
            name != START && name != END,
            "{} and {} are reserved marker names",
            START,
            END
        );
        self.nodes
            .insert(name, Arc::new(move |state| Box::pin(step(state))));
        self
    }

    /// Registers an unconditional transition out of `from`. `to` may be
    /// [`END`]. A node has at most one outgoing rule; registering a second
    /// one replaces the first.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.insert(from.into(), Transition::Fixed(to.into()));
        self
    }

    /// Registers a transition out of `from` whose destination is computed
    /// from the current state at run time. `decide` must return a registered
    /// node name or [`END`].
    pub fn add_conditional_edge<F>(&mut self, from: impl Into<String>, decide: F) -> &mut Self
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
    {
        self.edges
            .insert(from.into(), Transition::Conditional(Arc::new(decide)));
        self
    }

    /// Walks the graph from [`START`], threading `initial` through each step
    /// in turn, and returns the final state.
    ///
    /// A node with no outgoing edge ends the walk gracefully; the state as
    /// produced so far is returned. A transition that names an unregistered
    /// node is a configuration error and fails with
    /// [`Error::UnknownNode`] without running further steps.
    pub async fn invoke(&self, initial: S) -> Result<S> {
        let mut state = initial;
        let mut current = START.to_string();

        loop {
            let transition = match self.edges.get(&current) {
                Some(t) => t,
                // No outgoing edge: the walk ends here.
                None => return Ok(state),
            };

            let destination = match transition {
                Transition::Fixed(to) => to.clone(),
                Transition::Conditional(decide) => decide(&state),
            };

            if destination == END {
                return Ok(state);
            }

            let step = self
                .nodes
                .get(&destination)
                .ok_or_else(|| Error::UnknownNode(destination.clone()))?;

            debug!("Running workflow node: {}", destination);
            state = step(state).await;
            current = destination;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct TestState {
        x: i32,
        error: Option<String>,
        visited: Vec<String>,
    }

    fn visit(name: &'static str, x: i32) -> impl Fn(TestState) -> BoxFuture<'static, TestState> {
        move |mut state: TestState| {
            Box::pin(async move {
                state.x = x;
                state.visited.push(name.to_string());
                state
            })
        }
    }

    #[tokio::test]
    async fn linear_chain_runs_every_node_once_in_order() {
        let mut graph = StateGraph::new();
        graph
            .add_node("a", visit("a", 1))
            .add_node("b", visit("b", 2))
            .add_node("c", visit("c", 3))
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", "c")
            .add_edge("c", END);

        let result = graph.invoke(TestState::default()).await.unwrap();
        assert_eq!(result.x, 3);
        assert_eq!(result.visited, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn conditional_edge_short_circuits_to_end_on_error() {
        let mut graph = StateGraph::new();
        graph
            .add_node("a", |mut state: TestState| async move {
                state.x = 1;
                state.error = Some("boom".to_string());
                state
            })
            .add_node("b", visit("b", 2))
            .add_node("c", visit("c", 3))
            .add_edge(START, "a")
            .add_conditional_edge("a", |state: &TestState| {
                if state.error.is_some() {
                    END.to_string()
                } else {
                    "b".to_string()
                }
            })
            .add_edge("b", "c")
            .add_edge("c", END);

        let result = graph.invoke(TestState::default()).await.unwrap();
        assert_eq!(result.x, 1);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert_eq!(result.visited, vec!["a"]);
    }

    #[tokio::test]
    async fn unknown_destination_node_is_fatal() {
        let mut graph = StateGraph::new();
        graph
            .add_node("a", visit("a", 1))
            .add_edge(START, "a")
            .add_edge("a", "missing");

        let err = graph.invoke(TestState::default()).await.unwrap_err();
        assert!(matches!(err, Error::UnknownNode(name) if name == "missing"));
    }

    #[tokio::test]
    async fn missing_outgoing_edge_is_a_graceful_stop() {
        let mut graph = StateGraph::new();
        graph.add_node("a", visit("a", 7)).add_edge(START, "a");

        let result = graph.invoke(TestState::default()).await.unwrap();
        assert_eq!(result.x, 7);
        assert_eq!(result.visited, vec!["a"]);
    }

    #[tokio::test]
    async fn empty_graph_returns_initial_state() {
        let graph: StateGraph<TestState> = StateGraph::new();
        let initial = TestState {
            x: 42,
            ..TestState::default()
        };
        let result = graph.invoke(initial.clone()).await.unwrap();
        assert_eq!(result, initial);
    }

    #[tokio::test]
    async fn re_registering_a_node_overwrites_the_previous_step() {
        let mut graph = StateGraph::new();
        graph
            .add_node("a", visit("a", 1))
            .add_node("a", visit("a", 42))
            .add_edge(START, "a")
            .add_edge("a", END);

        let result = graph.invoke(TestState::default()).await.unwrap();
        assert_eq!(result.x, 42);
    }

    #[tokio::test]
    async fn concurrent_invocations_do_not_share_state() {
        let mut graph = StateGraph::new();
        graph
            .add_node("scale", |mut state: TestState| async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                state.x *= 10;
                state
            })
            .add_edge(START, "scale")
            .add_edge("scale", END);

        let one = TestState {
            x: 1,
            ..TestState::default()
        };
        let two = TestState {
            x: 2,
            ..TestState::default()
        };

        let (a, b) = tokio::join!(graph.invoke(one), graph.invoke(two));
        assert_eq!(a.unwrap().x, 10);
        assert_eq!(b.unwrap().x, 20);
    }

    #[test]
    #[should_panic(expected = "reserved marker names")]
    fn registering_a_reserved_name_panics() {
        let mut graph = StateGraph::new();
        graph.add_node(END, |state: TestState| async move { state });
    }
}
