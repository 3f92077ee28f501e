//! # PERIODIC
//!
//! Cards in 3D that rearrange themselves into a periodic table, a sphere, a
//! double helix or a grid.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   records   ┌──────────────┐  targets  ┌───────────────────┐
//! │ RecordSource │ ──────────▶ │    Engine    │ ────────▶ │ TransitionManager │
//! └──────────────┘             │  LayoutSet   │           │   tasks + driver  │
//!                              └──────────────┘           └─────────┬─────────┘
//!                                     ▲ frame(now)                  │ render
//!                              ┌──────┴───────┐           ┌─────────▼─────────┐
//!                              │ FrameDriver  │           │    RenderSink     │
//!                              └──────────────┘           └───────────────────┘
//! ```
//!
//! Everything runs on one thread. Handlers that cannot borrow the engine
//! queue layouts through [`Engine::requests`].

pub mod config;
pub mod driver;
pub mod engine;
pub mod sink;
pub mod source;
pub mod tier;

pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use driver::{FrameDriver, FrameStats, RunOutcome};
pub use engine::{scatter_point, Card, Engine, EngineState};
pub use sink::{Bounds, TraceSink};
pub use source::{parse_records, JsonFileSource, Record, RecordSource, SourceError, SourceResult, StaticSource};
pub use tier::{parse_net_worth, Palette, Rgba, Tier};

pub use periodic_layout::{LayoutName, LayoutSet};
pub use periodic_tween::{RenderFrame, RenderSink, Viewport};
