// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene value returned by chart builders.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::mark::{Mark, MarkId};

/// An ordered list of marks plus the view rectangle they were laid out in.
///
/// `marks` keeps emission order; use [`Scene::paint_order`] when rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Outer view bounds (the full chart, margins included).
    pub view: Rect,
    /// Marks in emission order.
    pub marks: Vec<Mark>,
}

impl Scene {
    /// Creates an empty scene for the given view.
    pub fn new(view: Rect) -> Self {
        Self {
            view,
            marks: Vec::new(),
        }
    }

    /// Appends a mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the scene has no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Looks up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.iter().find(|m| m.id == id)
    }

    /// Returns marks sorted by `(z_index, id)`.
    ///
    /// The sort is stable, so marks sharing both keys keep emission order.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Union of the known bounds of all marks (text marks are skipped).
    pub fn content_bounds(&self) -> Option<Rect> {
        self.marks
            .iter()
            .filter_map(|m| m.payload.bounds())
            .reduce(|a, b| a.union(b))
    }
}

impl Extend<Mark> for Scene {
    fn extend<T: IntoIterator<Item = Mark>>(&mut self, iter: T) {
        self.marks.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn rect_mark(id: u64, z: i32, rect: Rect) -> Mark {
        Mark::builder(MarkId::from_raw(id))
            .rect()
            .z_index(z)
            .bounds(rect)
            .build()
    }

    #[test]
    fn paint_order_sorts_by_z_then_id() {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        scene.push(rect_mark(3, 10, Rect::new(0.0, 0.0, 1.0, 1.0)));
        scene.push(rect_mark(2, 0, Rect::new(0.0, 0.0, 1.0, 1.0)));
        scene.push(rect_mark(1, 10, Rect::new(0.0, 0.0, 1.0, 1.0)));

        let ids: Vec<u64> = scene.paint_order().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, [2, 1, 3]);
    }

    #[test]
    fn content_bounds_unions_mark_bounds() {
        let mut scene = Scene::new(Rect::ZERO);
        assert!(scene.content_bounds().is_none());
        scene.extend([
            rect_mark(1, 0, Rect::new(0.0, 0.0, 10.0, 10.0)),
            rect_mark(2, 0, Rect::new(20.0, 5.0, 30.0, 40.0)),
        ]);
        assert_eq!(scene.content_bounds(), Some(Rect::new(0.0, 0.0, 30.0, 40.0)));
        assert_eq!(scene.len(), 2);
        assert!(scene.get(MarkId::from_raw(2)).is_some());
    }
}
