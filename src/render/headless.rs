//! Frame-stepped stand-in for the rendering layer.
//!
//! Watches the engine's [`RenderView`] once per frame, starts a timed transition whenever a
//! flag or item state changes, and calls the engine's acknowledgment entry points exactly once
//! per transition when it runs out. Poses are sampled from the same geometry a real renderer
//! would draw with.

use std::collections::HashMap;

use crate::collection::item::{ItemState, StateKind};
use crate::config::model::MotionConfig;
use crate::foundation::core::{BoundaryOp, ItemId, Layout};
use crate::foundation::error::{VizError, VizResult};
use crate::gate::flags::AckOutcome;
use crate::geometry::paths::{SwapPath, boundary_motion};
use crate::orchestrator::engine::ArrayEngine;
use crate::render::view::RenderView;

/// Acknowledgment entry point the renderer called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "ack", rename_all = "snake_case")]
pub enum AckKind {
    Boundary { op: BoundaryOp },
    ComparePre,
    ComparePost,
    SwapPre,
    SwapPost,
}

/// One acknowledgment fired by the renderer, with what the engine made of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AckRecord {
    pub frame: u64,
    #[serde(flatten)]
    pub kind: AckKind,
    /// Item index at the time the acknowledgment was sent (item-addressed acks only).
    pub index: Option<usize>,
    pub outcome: AckOutcome,
}

/// Sampled drawing state of one item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ItemPose {
    pub id: ItemId,
    pub index: usize,
    /// Top-left corner of the cell in row coordinates.
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
}

const HIGHLIGHT_SCALE: f64 = 1.1;

#[derive(Clone, Copy, Debug)]
enum Motion {
    Compare,
    Swap(SwapPath),
    SettleCompare,
    SettleSwap,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    motion: Motion,
    started: u64,
    frames: u64,
}

impl Transition {
    fn progress(&self, frame: u64) -> f64 {
        let elapsed = frame.saturating_sub(self.started);
        (elapsed as f64 / self.frames as f64).min(1.0)
    }

    fn is_finished(&self, frame: u64) -> bool {
        frame >= self.started + self.frames
    }
}

#[derive(Clone, Copy, Debug)]
struct Track {
    last: StateKind,
    transition: Option<Transition>,
}

#[derive(Clone, Copy, Debug)]
struct BoundaryTrack {
    op: BoundaryOp,
    id: ItemId,
    started: u64,
    frames: u64,
}

#[derive(Debug)]
pub struct HeadlessRenderer {
    layout: Layout,
    motion: MotionConfig,
    frame: u64,
    view: RenderView,
    tracks: HashMap<ItemId, Track>,
    boundary: Option<BoundaryTrack>,
    transcript: Vec<AckRecord>,
}

impl HeadlessRenderer {
    pub fn new(layout: Layout, motion: MotionConfig) -> Self {
        Self {
            layout,
            motion,
            frame: 0,
            view: RenderView::default(),
            tracks: HashMap::new(),
            boundary: None,
            transcript: Vec::new(),
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Every acknowledgment fired so far, in order.
    pub fn transcript(&self) -> &[AckRecord] {
        &self.transcript
    }

    /// `true` when no transition is running.
    pub fn is_quiet(&self) -> bool {
        self.boundary.is_none() && self.tracks.values().all(|t| t.transition.is_none())
    }

    /// Render one frame: pick up state changes, advance time, fire finished transitions.
    #[tracing::instrument(level = "trace", skip_all, fields(frame = self.frame))]
    pub fn tick(&mut self, engine: &mut ArrayEngine) -> VizResult<Vec<AckRecord>> {
        self.observe(&engine.view());
        self.frame += 1;

        let mut fired = Vec::new();
        if let Some(boundary) = self.boundary {
            if self.frame >= boundary.started + boundary.frames {
                self.boundary = None;
                let outcome = engine.on_boundary_end(boundary.op)?;
                fired.push(self.record(AckKind::Boundary { op: boundary.op }, None, outcome));
            }
        }

        // Snapshot order keeps the firing order deterministic.
        let mut finished = Vec::new();
        for item in self.view.snapshot.iter() {
            let Some(track) = self.tracks.get_mut(&item.id()) else {
                continue;
            };
            if let Some(transition) = track.transition {
                if transition.is_finished(self.frame) {
                    track.transition = None;
                    finished.push((item.id(), transition.motion));
                }
            }
        }

        for (id, motion) in finished {
            let Some(index) = engine.snapshot().index_of(id) else {
                continue;
            };
            let (kind, outcome) = match motion {
                Motion::Compare => (AckKind::ComparePre, engine.on_compare_pre_end(index)?),
                Motion::Swap(_) => (AckKind::SwapPre, engine.on_swap_pre_end(index)?),
                Motion::SettleCompare => {
                    (AckKind::ComparePost, engine.on_compare_post_end(index)?)
                }
                Motion::SettleSwap => (AckKind::SwapPost, engine.on_swap_post_end(index)?),
            };
            fired.push(self.record(kind, Some(index), outcome));
        }
        Ok(fired)
    }

    /// Tick until the engine is idle and every transition has played out.
    ///
    /// Returns the number of frames rendered.
    pub fn run_until_idle(&mut self, engine: &mut ArrayEngine, max_frames: u64) -> VizResult<u64> {
        let mut rendered = 0;
        loop {
            self.observe(&engine.view());
            if !engine.is_animating() && self.is_quiet() {
                tracing::debug!(rendered, frame = self.frame, "renderer idle");
                return Ok(rendered);
            }
            if rendered >= max_frames {
                return Err(VizError::Other(anyhow::anyhow!(
                    "engine did not settle within {max_frames} frames"
                )));
            }
            let _ = self.tick(engine)?;
            rendered += 1;
        }
    }

    /// Sample the pose of every item of the last observed view.
    pub fn poses(&self) -> Vec<ItemPose> {
        let pitch = self.layout.pitch();
        self.view
            .snapshot
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mut pose = ItemPose {
                    id: item.id(),
                    index,
                    x: index as f64 * pitch,
                    y: 0.0,
                    opacity: 1.0,
                    scale: 1.0,
                };

                if let Some(boundary) = self.boundary.filter(|b| b.id == item.id()) {
                    let t = self.motion.boundary_ease.apply(
                        (self.frame.saturating_sub(boundary.started)) as f64 / boundary.frames as f64,
                    );
                    let motion = boundary_motion(self.layout, boundary.op);
                    let offset = motion.offset_at(self.layout, t);
                    pose.x += offset.x;
                    pose.y += offset.y;
                    pose.opacity = if motion.appearing() { t } else { 1.0 - t };
                    return pose;
                }

                let Some(transition) = self.tracks.get(&item.id()).and_then(|t| t.transition)
                else {
                    if item.is_being_compared() {
                        pose.scale = HIGHLIGHT_SCALE;
                    }
                    return pose;
                };
                let p = transition.progress(self.frame);
                match transition.motion {
                    Motion::Compare => pose.scale = 1.0 + (HIGHLIGHT_SCALE - 1.0) * p,
                    Motion::SettleCompare => pose.scale = HIGHLIGHT_SCALE - (HIGHLIGHT_SCALE - 1.0) * p,
                    Motion::Swap(path) => {
                        let offset = path.offset_at(self.motion.swap_ease.apply(p));
                        pose.x += offset.x;
                        pose.y += offset.y;
                    }
                    Motion::SettleSwap => {}
                }
                pose
            })
            .collect()
    }

    /// Start transitions for whatever changed since the last observed view.
    fn observe(&mut self, view: &RenderView) {
        match view.boundary_op() {
            Some(op) if self.boundary.is_none_or(|b| b.op != op) => {
                if let Some(index) = view.boundary_index() {
                    let id = view.snapshot[index].id();
                    tracing::trace!(%op, %id, frame = self.frame, "boundary transition");
                    self.boundary = Some(BoundaryTrack {
                        op,
                        id,
                        started: self.frame,
                        frames: self.motion.frames(self.motion.boundary_secs),
                    });
                }
            }
            Some(_) => {}
            None => self.boundary = None,
        }

        self.tracks
            .retain(|id, _| view.snapshot.index_of(*id).is_some());
        for item in view.snapshot.iter() {
            let now = item.state().kind();
            // Items seen for the first time count as having been at rest.
            let track = self.tracks.entry(item.id()).or_insert(Track {
                last: StateKind::Idle,
                transition: None,
            });
            let from = track.last;
            if from == now {
                continue;
            }
            track.last = now;

            let (motion, secs) = match (from, item.state()) {
                (_, ItemState::Swapping { path }) => (Motion::Swap(*path), self.motion.swap_secs),
                (_, ItemState::Comparing) => (Motion::Compare, self.motion.compare_secs),
                (StateKind::Comparing, ItemState::Idle) => {
                    (Motion::SettleCompare, self.motion.settle_secs)
                }
                (StateKind::Swapping, ItemState::Idle) => {
                    (Motion::SettleSwap, self.motion.settle_secs)
                }
                _ => continue,
            };
            tracing::trace!(id = %item.id(), %from, to = %now, frame = self.frame, "item transition");
            track.transition = Some(Transition {
                motion,
                started: self.frame,
                frames: self.motion.frames(secs),
            });
        }
        self.view = view.clone();
    }

    fn record(&mut self, kind: AckKind, index: Option<usize>, outcome: AckOutcome) -> AckRecord {
        let record = AckRecord {
            frame: self.frame,
            kind,
            index,
            outcome,
        };
        tracing::trace!(?record, "acknowledgment fired");
        self.transcript.push(record);
        record
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/headless.rs"]
mod tests;
