//! Force-directed layout of small graphs read from text files, drawn in a window
//! while the simulation runs for a user-chosen number of seconds.

pub mod console;
pub mod driver;
pub mod graph;
pub mod layout;
pub mod surface;
pub mod view;

pub use driver::{Session, SessionSummary, run_session};
pub use graph::{Edge, Graph, Node};
