// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: band, linear, time and ordinal color.
//!
//! Continuous scales map a `(d0, d1)` domain affinely onto a `(r0, r1)` range; ranges may be
//! inverted (`(height, 0)` puts larger values higher on screen). Band scales follow the
//! usual step/padding/align model of categorical positioning.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use peniko::{Brush, Color};

use crate::time;

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Time scale over seconds since the Unix epoch.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Returns tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Time(s) => s.range(),
        }
    }
}

impl From<ScaleLinear> for ScaleContinuous {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleTime> for ScaleContinuous {
    fn from(value: ScaleTime) -> Self {
        Self::Time(value)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain (`d0 == d1`) maps everything to `r0`.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns round tick values inside the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to extend the domain outward to round tick values.
    pub nice: bool,
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    ///
    /// Niceness widens the domain to multiples of the tick step for `tick_count` ticks,
    /// repeating until the step settles. `[0, 437]` becomes `[0, 450]`.
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let (d0, d1) = self.domain;
        if !d0.is_finite() || !d1.is_finite() {
            return self.domain;
        }
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let mut prestep = 0.0;
        for _ in 0..10 {
            let step = nice_step((stop - start) / tick_count.max(1) as f64);
            if step == 0.0 || step == prestep {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            prestep = step;
        }
        if reversed { (stop, start) } else { (start, stop) }
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

/// Round ticks between `min` and `max` (inclusive), at a 1/2/5 x 10^k step.
fn linear_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let i0 = (min / step).ceil();
    let i1 = (max / step).floor();
    let n_f = i1 - i0;
    if n_f.is_nan() || n_f < 0.0 {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "non-negative and capped at 10k"
    )]
    let n = n_f.min(10_000.0) as u64;
    (0..=n).map(|i| (i0 + i as f64) * step).collect()
}

/// Rounds a raw step up or down to 1, 2, 5 or 10 times a power of ten.
///
/// The cutoffs are the geometric midpoints `sqrt(50)`, `sqrt(10)` and `sqrt(2)`.
fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.071_067_811_865_475 {
        10.0
    } else if error >= 3.162_277_660_168_379_5 {
        5.0
    } else if error >= core::f64::consts::SQRT_2 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A time scale: a linear scale over seconds since the Unix epoch with calendar ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale over a `(start, end)` domain in seconds.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Returns tick timestamps aligned to whole seconds, minutes, hours or days.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.inner.domain();
        time::nice_time_ticks_seconds(d0, d1, count)
    }

    /// Returns the domain in seconds.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

/// A categorical band scale.
///
/// The range is divided into `n` steps. Each category gets a band of width
/// `step * (1 - padding_inner)`; `padding_outer` steps are left before the first band and
/// after the last, and `align` distributes any leftover space (0.5 centers the bands).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl ScaleBand {
    /// Creates an unpadded, centered band scale.
    ///
    /// Duplicate categories are dropped; the first occurrence keeps its slot.
    pub fn new<S: Into<String>>(domain: impl IntoIterator<Item = S>, range: (f64, f64)) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for s in domain {
            let s = s.into();
            if !unique.contains(&s) {
                unique.push(s);
            }
        }
        Self {
            domain: unique,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Sets inner and outer padding to the same fraction of a step.
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_padding_inner(padding).with_padding_outer(padding)
    }

    /// Sets the inner padding (gap between bands), clamped to `[0, 1]`.
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Sets the outer padding (space before the first and after the last band).
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Sets how leftover space is distributed, clamped to `[0, 1]`.
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    /// Returns the categories in slot order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.domain.len()
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        (r1 - r0).abs() / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Width of every band.
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the start position of the band in slot `index`.
    ///
    /// With an inverted range the first slot sits at the high end.
    pub fn x(&self, index: usize) -> f64 {
        let n = self.domain.len();
        let (r0, r1) = self.range;
        let reversed = r1 < r0;
        let (lo, hi) = if reversed { (r1, r0) } else { (r0, r1) };
        let step = self.step();
        let start = lo + (hi - lo - step * (n as f64 - self.padding_inner)) * self.align;
        let slot = if reversed {
            n.saturating_sub(index + 1)
        } else {
            index
        };
        start + step * slot as f64
    }

    /// Returns the slot of a category.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.domain.iter().position(|d| d == key)
    }

    /// Returns the start position of a category's band, or `None` if it is not in the domain.
    pub fn band(&self, key: &str) -> Option<f64> {
        self.index_of(key).map(|i| self.x(i))
    }

    /// Returns the center of a category's band.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.band(key).map(|x| x + self.band_width() * 0.5)
    }
}

/// The ten-color categorical palette used for series colors.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgba8(0x1f, 0x77, 0xb4, 0xff),
    Color::from_rgba8(0xff, 0x7f, 0x0e, 0xff),
    Color::from_rgba8(0x2c, 0xa0, 0x2c, 0xff),
    Color::from_rgba8(0xd6, 0x27, 0x28, 0xff),
    Color::from_rgba8(0x94, 0x67, 0xbd, 0xff),
    Color::from_rgba8(0x8c, 0x56, 0x4b, 0xff),
    Color::from_rgba8(0xe3, 0x77, 0xc2, 0xff),
    Color::from_rgba8(0x7f, 0x7f, 0x7f, 0xff),
    Color::from_rgba8(0xbc, 0xbd, 0x22, 0xff),
    Color::from_rgba8(0x17, 0xbe, 0xcf, 0xff),
];

/// Maps categories to colors by position in the domain, cycling through the palette.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal {
    domain: Vec<String>,
    palette: Vec<Color>,
    unknown: Color,
}

impl ScaleOrdinal {
    /// Creates an ordinal scale. Keys outside the domain map to gray.
    pub fn new<S: Into<String>>(
        domain: impl IntoIterator<Item = S>,
        palette: impl IntoIterator<Item = Color>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for s in domain {
            let s = s.into();
            if !unique.contains(&s) {
                unique.push(s);
            }
        }
        Self {
            domain: unique,
            palette: palette.into_iter().collect(),
            unknown: CATEGORY10[7],
        }
    }

    /// Sets the color for keys outside the domain.
    pub fn with_unknown(mut self, unknown: Color) -> Self {
        self.unknown = unknown;
        self
    }

    /// Returns the categories in slot order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Returns the color of a category.
    pub fn color(&self, key: &str) -> Color {
        if self.palette.is_empty() {
            return self.unknown;
        }
        match self.domain.iter().position(|d| d == key) {
            Some(i) => self.palette[i % self.palette.len()],
            None => self.unknown,
        }
    }

    /// Returns the color of a category as a solid brush.
    pub fn brush(&self, key: &str) -> Brush {
        Brush::Solid(self.color(key))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unpadded_band_scale_tiles_the_range() {
        let s = ScaleBand::new(["A", "B", "C"], (0.0, 300.0));
        assert!(close(s.band_width(), 100.0), "bw = {}", s.band_width());
        assert_eq!(s.band("A"), Some(0.0));
        assert_eq!(s.band("B"), Some(100.0));
        assert_eq!(s.band("C"), Some(200.0));
        assert_eq!(s.band("D"), None);
    }

    #[test]
    fn padded_band_scale_is_centered() {
        let s = ScaleBand::new(["a", "b", "c"], (70.0, 720.0)).with_padding(0.2);
        assert!(close(s.step(), 203.125), "step = {}", s.step());
        assert!(close(s.band_width(), 162.5), "bw = {}", s.band_width());
        let first = s.x(0);
        let last_end = s.x(2) + s.band_width();
        assert!(close(first - 70.0, 720.0 - last_end), "{first} / {last_end}");
    }

    #[test]
    fn inner_padding_only_keeps_bands_flush_with_the_range() {
        let s = ScaleBand::new(["x", "y"], (0.0, 100.0)).with_padding_inner(0.2);
        let step = 100.0 / 1.8;
        assert!(close(s.step(), step));
        assert!(close(s.x(0), 0.0));
        assert!(close(s.x(1), step));
        assert!(close(s.x(1) + s.band_width(), 100.0));
    }

    #[test]
    fn align_places_outer_padding_before_or_after_the_bands() {
        let base = ScaleBand::new(["x", "y"], (0.0, 100.0)).with_padding_outer(0.5);
        let step = 100.0 / 3.0;
        assert!(close(base.step(), step));

        let start = base.clone().with_align(0.0);
        assert!(close(start.x(0), 0.0));
        assert!(close(start.x(1), step));

        let end = base.clone().with_align(1.0);
        assert!(close(end.x(0), step));
        assert!(close(end.x(1) + end.band_width(), 100.0));

        assert!(close(base.x(0), step / 2.0), "centered by default");
        assert_eq!(base.clone().with_align(7.0), end, "align is clamped");
    }

    #[test]
    fn band_scale_with_inverted_range_reverses_slots() {
        let s = ScaleBand::new(["A", "B"], (200.0, 0.0));
        assert_eq!(s.band("A"), Some(100.0));
        assert_eq!(s.band("B"), Some(0.0));
    }

    #[test]
    fn band_scale_drops_duplicate_categories() {
        let s = ScaleBand::new(["A", "B", "A"], (0.0, 200.0));
        assert_eq!(s.count(), 2);
        assert!(close(s.band_width(), 100.0));
    }

    #[test]
    fn inverted_linear_range_maps_endpoints_and_midpoint() {
        let s = ScaleLinear::new((0.0, 1000.0), (300.0, 0.0));
        assert!(close(s.map(0.0), 300.0));
        assert!(close(s.map(1000.0), 0.0));
        assert!(close(s.map(500.0), 150.0));
    }

    #[test]
    fn nice_domain_rounds_outward() {
        let spec = ScaleLinearSpec::new((0.0, 437.0)).with_nice(true);
        assert_eq!(spec.resolved_domain(10), (0.0, 450.0));
        let spec = ScaleLinearSpec::new((0.0, 1000.0)).with_nice(true);
        assert_eq!(spec.resolved_domain(10), (0.0, 1000.0));
        let spec = ScaleLinearSpec::new((3.0, 97.0)).with_nice(true);
        assert_eq!(spec.resolved_domain(10), (0.0, 100.0));
        let spec = ScaleLinearSpec::new((0.0, 437.0));
        assert_eq!(spec.resolved_domain(10), (0.0, 437.0));
    }

    #[test]
    fn linear_ticks_stay_inside_the_domain() {
        let s = ScaleLinear::new((0.0, 1000.0), (300.0, 0.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&1000.0));

        let s = ScaleLinear::new((0.0, 437.0), (0.0, 1.0));
        assert_eq!(s.ticks(10).last(), Some(&400.0));
    }

    #[test]
    fn ordinal_scale_cycles_and_falls_back() {
        let s = ScaleOrdinal::new(["Image", "Video", "Link"], CATEGORY10[..2].iter().copied());
        assert_eq!(s.color("Image"), CATEGORY10[0]);
        assert_eq!(s.color("Video"), CATEGORY10[1]);
        assert_eq!(s.color("Link"), CATEGORY10[0]);
        assert_eq!(s.color("Story"), CATEGORY10[7]);

        let red = Color::from_rgba8(255, 0, 0, 255);
        let s = ScaleOrdinal::new(vec!["a"], Vec::new()).with_unknown(red);
        assert_eq!(s.color("a"), red);
    }
}
