//! Stage pipelines: per-department catalogs, derived lookups, and the
//! pipeline widget classification.

pub mod actions;
pub mod model;
pub mod pipeline;
pub mod registry;

pub use actions::StageActions;
pub use model::{Stage, TimelineEvent};
pub use pipeline::{PipelineView, StageNode, StageNodeState};
pub use registry::StageRegistry;
