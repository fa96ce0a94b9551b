//! Destructible heightmap terrain
//!
//! The battlefield is a 1-D column of heights over the horizontal extent.
//! Explosions carve craters, dirt weapons pile mounds; every mutation moves a
//! column toward a circular target profile and is clamped to the global
//! height range, so the map can never tear or teleport.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Spacing of procedural control points, in columns
const CONTROL_SPACING: usize = 64;
/// Smoothing passes applied after synthesis
const SMOOTH_PASSES: usize = 3;
/// Height change below which a column counts as untouched
const EPSILON: f32 = 1e-4;

/// Destructible 1-D heightmap over the battlefield width
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    heights: Vec<f32>,
    min_height: f32,
    max_height: f32,
}

impl Terrain {
    /// Generate a fresh battlefield: cosine-interpolated control points with a
    /// per-match blend between rolling and craggy styles, then box-smoothed.
    pub fn generate(width: usize, rng: &mut Pcg32) -> Self {
        let min_height = TERRAIN_MIN_HEIGHT;
        let max_height = TERRAIN_MAX_HEIGHT;
        let span = max_height - min_height;
        let base = min_height + span * 0.35;
        let amp = span * 0.25;

        // 0.0 = smooth rolling hills, 1.0 = craggy ridge line
        let style: f32 = rng.random();

        let n_ctrl = width / CONTROL_SPACING + 2;
        let ctrl: Vec<f32> = (0..n_ctrl)
            .map(|_| base + rng.random_range(-amp..amp))
            .collect();

        let mut heights = Vec::with_capacity(width);
        for x in 0..width {
            let fx = x as f32 / CONTROL_SPACING as f32;
            let i = fx as usize;
            let t = fx - i as f32;
            // Cosine interpolation between neighboring control points
            let t2 = (1.0 - (t * std::f32::consts::PI).cos()) * 0.5;
            let smooth = ctrl[i] * (1.0 - t2) + ctrl[(i + 1).min(n_ctrl - 1)] * t2;

            // Craggy component: short-wavelength ripple on top of the rolling base
            let ripple = (x as f32 * 0.11).sin() * amp * 0.3 + (x as f32 * 0.031).sin() * amp * 0.5;
            let h = smooth + ripple * style;
            heights.push(h.clamp(min_height, max_height));
        }

        // Box blur to knock the corners off
        for _ in 0..SMOOTH_PASSES {
            let prev = heights.clone();
            for x in 1..width.saturating_sub(1) {
                heights[x] = (prev[x - 1] + prev[x] + prev[x + 1]) / 3.0;
            }
        }

        log::debug!("terrain generated: width={width} style={style:.2}");
        Self {
            heights,
            min_height,
            max_height,
        }
    }

    /// Flat terrain at a fixed height, used by tests and scripted scenarios
    pub fn flat(width: usize, height: f32) -> Self {
        let min_height = TERRAIN_MIN_HEIGHT;
        let max_height = TERRAIN_MAX_HEIGHT;
        Self {
            heights: vec![height.clamp(min_height, max_height); width],
            min_height,
            max_height,
        }
    }

    /// Battlefield width in columns
    #[inline]
    pub fn width(&self) -> usize {
        self.heights.len()
    }

    /// Terrain height at horizontal position `x` (nearest-integer sample).
    /// Out-of-range positions clamp to the edge columns, never panic.
    #[inline]
    pub fn height_at(&self, x: f32) -> f32 {
        let i = (x.round().max(0.0) as usize).min(self.heights.len() - 1);
        self.heights[i]
    }

    /// Read-only column snapshot for the renderer
    #[inline]
    pub fn profile(&self) -> &[f32] {
        &self.heights
    }

    /// Excavate a crater centered at `(cx, cy)`. Every column within `radius`
    /// of `cx` that sits above the crater floor moves toward it by `strength`
    /// (1.0 = full carve in one call). Returns the touched column range.
    pub fn carve(&mut self, cx: f32, cy: f32, radius: f32, strength: f32) -> Option<(usize, usize)> {
        let strength = strength.clamp(0.0, 1.0);
        let min_h = self.min_height;
        self.reshape(cx, radius, move |floor_half, h| {
            let floor = (cy - floor_half).max(min_h);
            if h > floor {
                h + (floor - h) * strength
            } else {
                h
            }
        })
    }

    /// Pile a mound centered at `(cx, cy)`, the mirror of [`carve`]: columns
    /// below the mound crest move up toward it by `amount`.
    ///
    /// [`carve`]: Terrain::carve
    pub fn deposit(&mut self, cx: f32, cy: f32, radius: f32, amount: f32) -> Option<(usize, usize)> {
        let amount = amount.clamp(0.0, 1.0);
        let max_h = self.max_height;
        self.reshape(cx, radius, move |crest_half, h| {
            let crest = (cy + crest_half).min(max_h);
            if h < crest {
                h + (crest - h) * amount
            } else {
                h
            }
        })
    }

    /// Shared carve/deposit loop: `target` maps (half-chord, current height)
    /// to the new height for each column within `radius` of `cx`.
    fn reshape(
        &mut self,
        cx: f32,
        radius: f32,
        target: impl Fn(f32, f32) -> f32,
    ) -> Option<(usize, usize)> {
        if radius <= 0.0 || self.heights.is_empty() {
            return None;
        }
        let lo = (cx - radius).floor().max(0.0) as usize;
        let hi = ((cx + radius).ceil() as usize).min(self.heights.len() - 1);
        if lo > hi {
            return None;
        }

        let mut touched: Option<(usize, usize)> = None;
        let (min_h, max_h) = (self.min_height, self.max_height);
        for x in lo..=hi {
            let dx = x as f32 - cx;
            let chord_sq = radius * radius - dx * dx;
            if chord_sq < 0.0 {
                continue;
            }
            let h = self.heights[x];
            let new_h = target(chord_sq.sqrt(), h).clamp(min_h, max_h);
            if (new_h - h).abs() > EPSILON {
                self.heights[x] = new_h;
                touched = Some(match touched {
                    None => (x, x),
                    Some((first, _)) => (first, x),
                });
            }
        }
        touched
    }
}
