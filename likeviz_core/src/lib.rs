// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene values for `likeviz`.
//!
//! Chart builders never draw into a shared rendering context. Instead they return a
//! [`Scene`]: an explicit list of [`Mark`]s (rectangles, paths and text) in absolute
//! scene coordinates. Renderers consume that value in a single final pass.
//!
//! Every mark carries a stable [`MarkId`] and a `z_index`; renderers paint in
//! `(z_index, id)` order.

#![no_std]

extern crate alloc;

mod mark;
mod scene;

pub use mark::{
    Mark, MarkBuilder, MarkId, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor,
    TextBaseline, TextPayload,
};
pub use scene::Scene;
