//! Destructible barriers
//!
//! A barrier is a boolean grid at sub-resolution (one cell covers
//! `cell_size` world units on each side). Hits are cell-exact: a projectile
//! only strikes if its impact point lands on an intact cell, so shots pass
//! through holes already blown open. Damage erodes a roughly circular patch,
//! always removing the centre and thinning out towards the rim.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use crate::settings::{BarrierSettings, Settings};

/// Fraction of width/height used by the arch cutouts and the bottom notch
const CUTOUT_FRACTION: f32 = 0.35;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub body: Body,
    /// Coarse damage class in `0..=damage_states`
    pub damage_state: u32,
    cells: Vec<bool>,
    cols: usize,
    rows: usize,
    remaining: usize,
    total: usize,
    cell_size: f32,
    damage_states: u32,
    destroyed_ratio: f32,
}

impl Barrier {
    /// Carve a fresh barrier with its top-left corner at `pos`
    pub fn new(pos: Vec2, config: &BarrierSettings) -> Self {
        let cols = ((config.width / config.cell_size).floor() as usize).max(1);
        let rows = ((config.height / config.cell_size).floor() as usize).max(1);
        let mut cells = vec![true; rows * cols];

        let arch_h = (rows as f32 * CUTOUT_FRACTION).floor() as usize;
        let arch_w = (cols as f32 * CUTOUT_FRACTION).floor() as usize;
        for y in 0..arch_h {
            for x in 0..cols {
                let left_corner = x < arch_w && y + x < arch_w;
                let right_corner = x + arch_w >= cols && y + cols < x + arch_w + 1;
                if left_corner || right_corner {
                    cells[y * cols + x] = false;
                }
            }
        }

        let notch_w = (cols as f32 * CUTOUT_FRACTION).floor() as usize;
        let notch_h = (rows as f32 * CUTOUT_FRACTION).floor() as usize;
        let notch_start = (cols - notch_w) / 2;
        for y in rows - notch_h..rows {
            for x in notch_start..notch_start + notch_w {
                cells[y * cols + x] = false;
            }
        }

        let total = cells.iter().filter(|c| **c).count();
        Self {
            body: Body::new(pos, Vec2::new(config.width, config.height)),
            damage_state: 0,
            cells,
            cols,
            rows,
            remaining: total,
            total,
            cell_size: config.cell_size,
            damage_states: config.damage_states,
            destroyed_ratio: config.destroyed_ratio,
        }
    }

    /// Evenly spaced row of barriers across the field
    pub fn row(settings: &Settings) -> Vec<Barrier> {
        let config = &settings.barriers;
        let count = config.count as f32;
        let gap = (settings.field.width - count * config.width) / (count + 1.0);
        (0..config.count)
            .map(|i| {
                let x = gap + (gap + config.width) * i as f32;
                Barrier::new(Vec2::new(x, config.y_position), config)
            })
            .collect()
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Grid dimensions as `(cols, rows)`
    pub fn grid_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Intact state of grid cell `(col, row)`; `None` outside the grid
    pub fn cell(&self, col: usize, row: usize) -> Option<bool> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Intact fraction of the carved shape
    pub fn integrity(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.remaining as f32 / self.total as f32
    }

    fn to_grid(&self, x: f32, y: f32) -> (i64, i64) {
        (
            ((x - self.body.pos.x) / self.cell_size).floor() as i64,
            ((y - self.body.pos.y) / self.cell_size).floor() as i64,
        )
    }

    fn index(&self, gx: i64, gy: i64) -> Option<usize> {
        if gx < 0 || gy < 0 || gx >= self.cols as i64 || gy >= self.rows as i64 {
            return None;
        }
        Some(gy as usize * self.cols + gx as usize)
    }

    /// Does the world point land on an intact grid cell
    pub fn hits_pixel(&self, x: f32, y: f32) -> bool {
        if !self.body.bounding_box().contains(Vec2::new(x, y)) {
            return false;
        }
        let (gx, gy) = self.to_grid(x, y);
        self.index(gx, gy).is_some_and(|i| self.cells[i])
    }

    /// Erode cells within `radius` world units of `(x, y)`. A cell at distance
    /// `d` (in cells) from the centre of a blast of `r` cells is removed with
    /// probability `1 - 0.5 * d / r`. Returns the number of cells removed.
    pub fn damage<R: Rng>(&mut self, x: f32, y: f32, radius: f32, rng: &mut R) -> usize {
        if self.body.destroyed {
            return 0;
        }
        let (cx, cy) = self.to_grid(x, y);
        let r = (radius / self.cell_size).ceil().max(0.0) as i64;

        let mut removed = 0;
        for dy in -r..=r {
            for dx in -r..=r {
                let Some(i) = self.index(cx + dx, cy + dy) else {
                    continue;
                };
                if !self.cells[i] {
                    continue;
                }
                let distance = ((dx * dx + dy * dy) as f32).sqrt();
                if r > 0 && distance > r as f32 {
                    continue;
                }
                let chance = if r == 0 { 1.0 } else { 1.0 - 0.5 * distance / r as f32 };
                if rng.random::<f32>() < chance {
                    self.cells[i] = false;
                    removed += 1;
                }
            }
        }

        self.remaining -= removed;
        let damaged = 1.0 - self.integrity();
        self.damage_state = ((damaged * self.damage_states as f32).floor() as u32).min(self.damage_states);
        if self.integrity() < self.destroyed_ratio {
            self.body.destroyed = true;
            log::debug!("Barrier at x={} destroyed", self.body.pos.x);
        }
        removed
    }
}

impl Entity for Barrier {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Barriers are static
    fn update(&mut self, _dt_ms: f32) {}
}
