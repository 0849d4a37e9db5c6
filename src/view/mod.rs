mod paint;
pub mod viewport;

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use eframe::egui::{self, Align2, Color32, Context, FontId, Sense, vec2};

use crate::driver::SessionSummary;
use crate::graph::Graph;
use crate::surface::{Surface, SurfaceError};

const WINDOW_TITLE: &str = "GraphViz";

/// Fallback poll so a frame handed over between two repaints is never missed.
const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug)]
pub struct WindowOptions {
    pub side: f32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self { side: 480.0 }
    }
}

/// Hands frames to the window. The channel has no buffer, so `render` returns only
/// once the window has taken the frame.
pub struct WindowSurface {
    ctx: Context,
    frames: SyncSender<Graph>,
}

impl WindowSurface {
    fn new(ctx: Context, frames: SyncSender<Graph>) -> Self {
        Self { ctx, frames }
    }
}

impl Surface for WindowSurface {
    fn render(&mut self, graph: &Graph) -> Result<(), SurfaceError> {
        self.ctx.request_repaint();
        self.frames
            .send(graph.clone())
            .map_err(|_| SurfaceError::Closed)
    }
}

struct GraphWindow {
    frames: Receiver<Graph>,
    current: Option<Graph>,
    frame_count: u64,
    session_finished: bool,
}

impl GraphWindow {
    fn new(frames: Receiver<Graph>) -> Self {
        Self {
            frames,
            current: None,
            frame_count: 0,
            session_finished: false,
        }
    }

    fn receive_frame(&mut self) -> bool {
        match self.frames.try_recv() {
            Ok(graph) => {
                self.current = Some(graph);
                self.frame_count += 1;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.session_finished = true;
                false
            }
        }
    }

    fn status_text(&self) -> Option<String> {
        self.current.as_ref().map(|graph| {
            format!(
                "nodes: {}  edges: {}  frames: {}",
                graph.node_count(),
                graph.edge_count(),
                self.frame_count
            )
        })
    }
}

impl eframe::App for GraphWindow {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.receive_frame() {
            ctx.request_repaint();
        } else if !self.session_finished {
            ctx.request_repaint_after(FRAME_POLL_INTERVAL);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
                let painter = ui.painter_at(rect);

                match &self.current {
                    Some(graph) => paint::paint_graph(&painter, rect, graph),
                    None => paint::paint_graph(&painter, rect, &Graph::default()),
                }

                if let Some(status) = self.status_text() {
                    painter.text(
                        rect.left_bottom() + vec2(6.0, -4.0),
                        Align2::LEFT_BOTTOM,
                        status,
                        FontId::monospace(11.0),
                        Color32::GRAY,
                    );
                }
            });
    }
}

/// Opens the window on this thread and runs `session` on a worker thread that renders
/// into it. Returns when the window closes, which the worker requests once the session
/// ends.
pub fn run_window<F>(options: WindowOptions, session: F) -> Result<Option<SessionSummary>>
where
    F: FnOnce(WindowSurface) -> Result<SessionSummary> + Send + 'static,
{
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([options.side, options.side]),
        ..Default::default()
    };

    let (frame_tx, frame_rx) = mpsc::sync_channel(0);
    let (outcome_tx, outcome_rx) = mpsc::channel();

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let surface = WindowSurface::new(ctx.clone(), frame_tx);

            thread::spawn(move || {
                let result = session(surface);
                let _ = outcome_tx.send(result);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            });

            Ok(Box::new(GraphWindow::new(frame_rx)))
        }),
    )
    .map_err(|error| anyhow!("graph window failed: {error}"))?;

    match outcome_rx.try_recv() {
        Ok(result) => result.map(Some),
        Err(_) => {
            log::info!("window closed before the session finished");
            Ok(None)
        }
    }
}
