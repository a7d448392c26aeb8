//! Shared application service layer for phasediagram.
//!
//! Sits between the library crates and the command-line front end:
//! dataset and compound lookup, YAML diagram configuration, diagram
//! assembly, CSV/JSON export and SVG rendering.

pub mod compound_service;
pub mod config;
pub mod diagram_service;
pub mod error;
pub mod export;
pub mod render;

// Re-export key types for convenience
pub use compound_service::{
    CompoundSummary, get_compound, list_compounds, load_compound_file, open_dataset,
};
pub use config::{DiagramConfig, DisplayOptions, Scale, load_config};
pub use diagram_service::{Diagram, build_diagram, build_diagram_for};
pub use error::{AppError, AppResult};
pub use export::{to_json, write_csv};
pub use render::{render_svg, save_svg};
