//! Analytics engine for historical streetcar delay incidents.
//!
//! The engine is a set of pure transformations over an immutable, in-memory
//! incident table: filtering, summary metrics, a weekday/hour heatmap, a
//! per-route rush-hour deep dive with threshold-based recommendations, a
//! what-if intervention simulator, and a priority ranking of (route, hour)
//! combinations. The CLI in `main.rs` is a thin presentation layer; every
//! engine call takes the dataset explicitly and returns caller-owned data.

pub mod error;
pub mod filter;
pub mod heatmap;
pub mod inspect;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod priority;
pub mod recommend;
pub mod scenario;
pub mod types;
pub mod util;
pub mod window;
