use crate::graph::Graph;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("the drawing surface was closed")]
    Closed,
}

/// Drawing target for layout frames. Constructing a surface initializes the display.
pub trait Surface {
    /// Draws `graph` and returns once the frame has been handed over.
    fn render(&mut self, graph: &Graph) -> Result<(), SurfaceError>;
}

/// Surface without a window; frames are only counted and traced.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    frames: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Surface for HeadlessSurface {
    fn render(&mut self, graph: &Graph) -> Result<(), SurfaceError> {
        self.frames += 1;
        log::trace!(
            "frame {}: {} nodes, {} edges",
            self.frames,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn render(&mut self, graph: &Graph) -> Result<(), SurfaceError> {
        (**self).render(graph)
    }
}
