//! Command-line front end for the `ride_heap` scheduler: file loading,
//! seeded ride generation, the sample scenario and console rendering.

pub mod cli;
pub mod demo;
pub mod generate;
pub mod input;
pub mod printer;

pub use cli::{run, Cli, Commands, LoadArgs, LoadSummary, View};
pub use printer::{render_array, render_schedule, render_tree, Label};
