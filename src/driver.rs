use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::console::{Console, ConsoleError};
use crate::graph::{Graph, load_graph};
use crate::layout::LayoutStepper;
use crate::surface::{Surface, SurfaceError};

#[derive(Debug)]
pub enum Phase {
    AwaitingGraph,
    AwaitingDuration(Graph),
    Running { graph: Graph, budget: Duration },
    AwaitingRepeat,
    Terminated,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub graphs_loaded: usize,
    pub iterations: u64,
}

/// A timed run cut short by its surface, with the steps that completed before.
#[derive(Debug, thiserror::Error)]
#[error("simulation stopped after {iterations} iterations")]
pub struct Interrupted {
    pub iterations: u64,
    #[source]
    pub source: SurfaceError,
}

/// Runs layout steps, rendering after each one, until more than `budget` has elapsed.
/// At least one step always runs.
pub fn simulate(
    graph: &mut Graph,
    budget: Duration,
    surface: &mut impl Surface,
) -> Result<u64, Interrupted> {
    let mut stepper = LayoutStepper::default();
    let mut iterations = 0u64;
    let mut warned_non_finite = false;
    let started = Instant::now();

    loop {
        stepper.step(graph);
        iterations += 1;
        if let Err(source) = surface.render(graph) {
            return Err(Interrupted { iterations, source });
        }

        if !warned_non_finite && graph.has_non_finite_positions() {
            warned_non_finite = true;
            log::warn!("layout diverged to non-finite positions after {iterations} iterations");
        }

        if started.elapsed() > budget {
            break;
        }
    }

    log::info!(
        "ran {iterations} iterations on {} nodes in {:.2?}",
        graph.node_count(),
        started.elapsed()
    );

    Ok(iterations)
}

/// Interactive load → simulate → ask-again loop.
pub struct Session<R, W, S> {
    console: Console<R, W>,
    surface: S,
    phase: Phase,
    summary: SessionSummary,
}

impl<R: BufRead, W: Write, S: Surface> Session<R, W, S> {
    pub fn new(console: Console<R, W>, surface: S) -> Self {
        Self {
            console,
            surface,
            phase: Phase::AwaitingGraph,
            summary: SessionSummary::default(),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Drives phases until the session terminates.
    pub fn run(&mut self) -> Result<SessionSummary> {
        while !matches!(self.phase, Phase::Terminated) {
            self.advance()?;
        }
        Ok(self.summary)
    }

    /// Performs the work of the current phase and moves to the next one.
    pub fn advance(&mut self) -> Result<()> {
        let phase = std::mem::replace(&mut self.phase, Phase::Terminated);
        self.phase = match self.next_phase(phase) {
            Ok(next) => next,
            Err(StopReason::InputClosed) => {
                log::info!("console input closed, ending session");
                Phase::Terminated
            }
            Err(StopReason::SurfaceClosed) => {
                log::info!("drawing surface closed, ending session");
                Phase::Terminated
            }
            Err(StopReason::Failed(error)) => return Err(error),
        };
        Ok(())
    }

    fn next_phase(&mut self, phase: Phase) -> Result<Phase, StopReason> {
        let next = match phase {
            Phase::AwaitingGraph => {
                let graph = self.read_graph()?;
                self.surface.render(&graph)?;
                Phase::AwaitingDuration(graph)
            }
            Phase::AwaitingDuration(graph) => {
                let seconds = self.console.prompt_for_seconds()?;
                Phase::Running {
                    graph,
                    budget: Duration::from_secs(seconds.into()),
                }
            }
            Phase::Running { mut graph, budget } => {
                match simulate(&mut graph, budget, &mut self.surface) {
                    Ok(iterations) => self.summary.iterations += iterations,
                    Err(Interrupted { iterations, source }) => {
                        self.summary.iterations += iterations;
                        return Err(source.into());
                    }
                }
                Phase::AwaitingRepeat
            }
            Phase::AwaitingRepeat => {
                if self.console.prompt_for_repeat()? {
                    Phase::AwaitingGraph
                } else {
                    Phase::Terminated
                }
            }
            Phase::Terminated => Phase::Terminated,
        };
        Ok(next)
    }

    fn read_graph(&mut self) -> Result<Graph, StopReason> {
        let (path, file) = self.console.prompt_for_graph_file()?;

        match load_graph(file) {
            Ok(graph) => {
                self.summary.graphs_loaded += 1;
                Ok(graph)
            }
            Err(error) => {
                log::warn!("could not load {}: {error}", path.display());
                self.console.say(&error)?;
                Ok(Graph::default())
            }
        }
    }
}

enum StopReason {
    InputClosed,
    SurfaceClosed,
    Failed(anyhow::Error),
}

impl From<ConsoleError> for StopReason {
    fn from(error: ConsoleError) -> Self {
        match error {
            ConsoleError::Closed => Self::InputClosed,
            ConsoleError::Io(error) => {
                Self::Failed(anyhow::Error::new(error).context("console I/O failed"))
            }
        }
    }
}

impl From<SurfaceError> for StopReason {
    fn from(error: SurfaceError) -> Self {
        match error {
            SurfaceError::Closed => Self::SurfaceClosed,
        }
    }
}

/// Runs a whole session with the welcome banner in front.
pub fn run_session<R: BufRead, W: Write, S: Surface>(
    console: Console<R, W>,
    surface: S,
) -> Result<SessionSummary> {
    let mut session = Session::new(console, surface);
    session
        .console
        .welcome()
        .context("failed to write welcome banner")?;
    session.run()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::graph::{Edge, Node};
    use crate::surface::HeadlessSurface;

    struct ClosingSurface {
        remaining: usize,
    }

    impl Surface for ClosingSurface {
        fn render(&mut self, _graph: &Graph) -> Result<(), SurfaceError> {
            if self.remaining == 0 {
                return Err(SurfaceError::Closed);
            }
            self.remaining -= 1;
            Ok(())
        }
    }

    #[test]
    fn simulate_runs_at_least_one_step() {
        let mut graph = Graph {
            nodes: vec![Node::new(-1.0, 0.0), Node::new(1.0, 0.0)],
            edges: vec![Edge::new(0, 1)],
        };
        let mut surface = HeadlessSurface::new();

        let iterations = simulate(&mut graph, Duration::ZERO, &mut surface).unwrap();

        assert!(iterations >= 1);
        assert_eq!(surface.frames(), iterations);
        assert!(graph.nodes[0].x > -1.0);
    }

    #[test]
    fn simulate_stops_when_surface_closes() {
        let mut graph = Graph::with_circle_layout(3);
        let mut surface = ClosingSurface { remaining: 2 };

        let result = simulate(&mut graph, Duration::from_secs(3600), &mut surface);

        assert!(matches!(
            result,
            Err(Interrupted {
                iterations: 3,
                source: SurfaceError::Closed
            })
        ));
    }

    #[test]
    fn interrupted_run_still_counts_its_iterations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.txt");
        std::fs::write(&path, "2\n0 1\n").unwrap();

        let input = format!("{}\n5\n", path.display());
        let console = Console::new(Cursor::new(input.into_bytes()), Vec::new());
        let mut session = Session::new(console, ClosingSurface { remaining: 4 });

        let summary = session.run().unwrap();

        assert_eq!(summary.graphs_loaded, 1);
        assert_eq!(summary.iterations, 4);
    }

    #[test]
    fn corrupted_file_is_not_counted_as_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupted.txt");
        std::fs::write(&path, "lots\n").unwrap();

        let input = format!("{}\n", path.display());
        let mut output = Vec::new();
        let console = Console::new(Cursor::new(input.into_bytes()), &mut output);
        let mut session = Session::new(console, HeadlessSurface::new());

        let summary = session.run().unwrap();
        drop(session);

        assert_eq!(summary.graphs_loaded, 0);
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("Corrupted file on number of nodes."));
    }

    #[test]
    fn session_ends_when_input_closes_before_a_file() {
        let console = Console::new(Cursor::new(Vec::new()), Vec::new());
        let mut session = Session::new(console, HeadlessSurface::new());

        let summary = session.run().unwrap();

        assert_eq!(summary, SessionSummary::default());
        assert!(matches!(session.phase(), Phase::Terminated));
    }

    #[test]
    fn closed_surface_ends_session_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.txt");
        std::fs::write(&path, "2\n0 1\n").unwrap();

        let input = format!("{}\n1\n", path.display());
        let console = Console::new(Cursor::new(input.into_bytes()), Vec::new());
        let mut session = Session::new(console, ClosingSurface { remaining: 0 });

        session.run().unwrap();

        assert!(matches!(session.phase(), Phase::Terminated));
        assert_eq!(session.summary().graphs_loaded, 1);
    }

    #[test]
    fn phases_advance_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.txt");
        std::fs::write(&path, "3\n0 1\n1 2\n2 0\n").unwrap();

        let input = format!("{}\n1\nno\n", path.display());
        let console = Console::new(Cursor::new(input.into_bytes()), Vec::new());
        let mut session = Session::new(console, HeadlessSurface::new());

        session.advance().unwrap();
        let Phase::AwaitingDuration(graph) = session.phase() else {
            panic!("expected duration prompt, got {:?}", session.phase());
        };
        assert_eq!(graph.edge_count(), 3);

        session.advance().unwrap();
        assert!(matches!(
            session.phase(),
            Phase::Running { budget, .. } if *budget == Duration::from_secs(1)
        ));
    }
}
