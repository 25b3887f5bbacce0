//! FILENAME: core/pipeline-engine/src/lib.rs
//! Aggregation pipeline for the e-commerce dashboard.
//!
//! Turns a read-only dataset snapshot plus a filter configuration into the
//! KPIs, series and tables the presentation layer renders.
//!
//! Layers:
//! - `definition`: Immutable filter configuration (what the user selected)
//! - `cache`: Normalised, indexed snapshot built once per session
//! - `view`: Renderable output (WHAT we display)
//! - `engine`: The pure `compute` function (HOW we calculate)

pub mod cache;
pub mod definition;
pub mod engine;
pub mod view;

pub use cache::{CacheStats, CachedItem, CachedOrder, CachedReview, PipelineCache, ProductInfo};
pub use definition::*;
pub use engine::{compute, compute_dashboard};
pub use view::*;
