#![forbid(unsafe_code)]
//! `arrayviz` orchestrates animated operations over an ordered collection of numbered items.
//!
//! The engine owns the data; a rendering layer owns the motion. Every animated operation
//! ([`ArrayEngine::push`], [`ArrayEngine::swap`], [`ArrayEngine::bubble_sort`], ...) sets flags
//! that the rendering layer observes through [`ArrayEngine::view`], and only moves on once the
//! rendering layer reports back through the matching `on_*_end` acknowledgment. At most one
//! operation is in flight; a request made while busy fails with
//! [`VizError::OperationRejected`].
//!
//! [`HeadlessRenderer`] is a deterministic, frame-stepped rendering layer for tests and tooling.

mod animation;
mod collection;
mod config;
mod foundation;
mod gate;
mod geometry;
mod orchestrator;
mod render;
mod sort;

pub use animation::ease::Ease;
pub use collection::item::{Item, ItemState, StateKind};
pub use collection::store::{Collection, Mutation, MutationOutcome, Snapshot};
pub use config::model::{EngineConfig, MotionConfig};
pub use foundation::core::{
    BezPath, BoundaryOp, IdAllocator, ItemId, Layout, Point, Value, Vec2,
};
pub use foundation::deferred::{Deferred, PendingSlot, Resolver, deferred};
pub use foundation::error::{VizError, VizResult};
pub use gate::flags::{AckOutcome, Gate, OperationFlags, PairAcks};
pub use geometry::paths::{
    Bow, BoundaryMotion, SwapPath, SwapPaths, boundary_motion, swap_paths,
};
pub use orchestrator::engine::ArrayEngine;
pub use orchestrator::sort_run::{SortPhase, SortProgress};
pub use render::headless::{AckKind, AckRecord, HeadlessRenderer, ItemPose};
pub use render::view::RenderView;
pub use sort::bubble::{Step, bubble_sort_steps, replay_swaps};
