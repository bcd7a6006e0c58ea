//! Spatial layout engine for the factory floor planner.
//!
//! The crate owns the in-memory model of a rectangular field and the
//! equipment placed on it, the overlap policy that decides which placements
//! are legal, the mapping between field space (meters) and render space
//! (pixels), and the drawing of the scene. The host (a browser page, the
//! `floorplan` CLI, or a test) feeds pointer and keyboard input into
//! [`engine::EngineCore`] and reacts to the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller and its [`engine::Action`]s |
//! | [`model`] | Field, items, kinds, and the overlap policy |
//! | [`geometry`] | Axis-aligned rectangle intersection |
//! | [`mapper`] | Field-space <-> render-space conversion |
//! | [`hit`] | Hit-testing against placed items |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`palette`] | Placement templates per equipment kind |
//! | [`frame_gate`] | Redraw throttling during continuous drags |
//! | [`render`] | Scene composition over a [`render::Surface`] |
//! | [`svg`] | SVG backend for [`render::Surface`] |
//! | [`export`] | JSON snapshot, SVG and PNG export |
//! | [`config`] | Editor settings read from the environment |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants |
//! | `web` | Browser canvas backend and `Engine` (feature `web`) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod frame_gate;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod mapper;
pub mod model;
pub mod palette;
pub mod render;
pub mod svg;
#[cfg(feature = "web")]
pub mod web;
