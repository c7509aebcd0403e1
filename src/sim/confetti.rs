//! Confetti particle simulation
//!
//! A flat set of independent particles: spawned in bursts above the visible
//! area, advanced by fixed per-frame increments, discarded once they fall
//! past the bottom margin. Per-frame increments (not dt-scaled) are the
//! reference behavior; motion is frame-rate coupled.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{CONFETTI_REMOVE_MARGIN, CONFETTI_SPAWN_Y};

/// The five fixed confetti colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiColor {
    Pink,
    Gold,
    Mint,
    Sky,
    White,
}

impl ConfettiColor {
    pub const ALL: [ConfettiColor; 5] = [
        ConfettiColor::Pink,
        ConfettiColor::Gold,
        ConfettiColor::Mint,
        ConfettiColor::Sky,
        ConfettiColor::White,
    ];

    /// CSS fill color
    pub fn as_css(self) -> &'static str {
        match self {
            ConfettiColor::Pink => "#FF6FA3",
            ConfettiColor::Gold => "#FFD166",
            ConfettiColor::Mint => "#7EF2C2",
            ConfettiColor::Sky => "#73D7FF",
            ConfettiColor::White => "#FFFFFF",
        }
    }
}

/// One falling confetti square
#[derive(Debug, Clone, Copy)]
pub struct ConfettiParticle {
    pub pos: Vec2,
    /// Per-frame displacement: small horizontal drift, downward fall
    pub vel: Vec2,
    /// Side length of the square
    pub size: f32,
    pub color: ConfettiColor,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Per-frame rotation increment (radians)
    pub rotation_speed: f32,
}

/// Owns the active particle set and the spawn RNG
#[derive(Debug, Clone)]
pub struct ConfettiSim {
    particles: Vec<ConfettiParticle>,
    /// Visible area in pixels; spawn spread and discard line follow it
    bounds: Vec2,
    rng: Pcg32,
}

impl ConfettiSim {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self {
            particles: Vec::new(),
            bounds: Vec2::new(width, height),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Track the visible area (viewport resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }

    /// Append `count` fresh particles above the visible area.
    ///
    /// Additive: an in-flight burst keeps falling alongside the new one.
    pub fn spawn_burst(&mut self, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = self.spawn_particle();
            self.particles.push(particle);
        }
    }

    fn spawn_particle(&mut self) -> ConfettiParticle {
        ConfettiParticle {
            pos: Vec2::new(self.rng.random::<f32>() * self.bounds.x, CONFETTI_SPAWN_Y),
            vel: Vec2::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(2.0..5.0),
            ),
            size: self.rng.random_range(5.0..12.0),
            color: ConfettiColor::ALL[self.rng.random_range(0..ConfettiColor::ALL.len())],
            rotation: self.rng.random_range(0.0..PI),
            rotation_speed: self.rng.random_range(0.0..0.2),
        }
    }

    /// Advance every particle by one frame and discard the ones that fell
    /// past the bottom margin. Safe to call with no active particles.
    pub fn advance_frame(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.rotation += p.rotation_speed;
        }

        let floor = self.bounds.y + CONFETTI_REMOVE_MARGIN;
        self.particles.retain(|p| p.pos.y < floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_exact_count_additively() {
        let mut sim = ConfettiSim::new(1, 800.0, 600.0);
        assert_eq!(sim.particles().len(), 0);

        sim.spawn_burst(180);
        assert_eq!(sim.particles().len(), 180);

        // A second burst stacks on top of the first
        sim.spawn_burst(40);
        assert_eq!(sim.particles().len(), 220);
    }

    #[test]
    fn spawned_particles_start_above_the_fold() {
        let mut sim = ConfettiSim::new(2, 800.0, 600.0);
        sim.spawn_burst(180);

        for p in sim.particles() {
            assert_eq!(p.pos.y, CONFETTI_SPAWN_Y);
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.vel.y >= 2.0 && p.vel.y < 5.0);
            assert!(p.vel.x >= -1.0 && p.vel.x < 1.0);
            assert!(p.size >= 5.0 && p.size < 12.0);
            assert!(p.rotation >= 0.0 && p.rotation < PI);
            assert!(p.rotation_speed >= 0.0 && p.rotation_speed < 0.2);
        }
    }

    #[test]
    fn all_colors_show_up_in_a_full_burst() {
        let mut sim = ConfettiSim::new(3, 800.0, 600.0);
        sim.spawn_burst(180);
        for color in ConfettiColor::ALL {
            assert!(
                sim.particles().iter().any(|p| p.color == color),
                "missing {color:?}"
            );
        }
    }

    #[test]
    fn advance_moves_each_particle_by_its_own_velocity() {
        let mut sim = ConfettiSim::new(4, 800.0, 600.0);
        sim.spawn_burst(20);

        let before: Vec<_> = sim
            .particles()
            .iter()
            .map(|p| (p.pos, p.vel, p.rotation, p.rotation_speed))
            .collect();
        sim.advance_frame();

        for (p, (pos, vel, rotation, rotation_speed)) in sim.particles().iter().zip(&before) {
            assert!((p.pos.y - (pos.y + vel.y)).abs() < 1e-4);
            assert!((p.pos.x - (pos.x + vel.x)).abs() < 1e-4);
            assert!((p.rotation - (rotation + rotation_speed)).abs() < 1e-4);
            // Falling is strictly monotonic: every fall speed is positive
            assert!(p.pos.y > pos.y);
        }
    }

    #[test]
    fn particles_fall_out_past_the_margin() {
        let height = 100.0;
        let mut sim = ConfettiSim::new(5, 400.0, height);
        sim.spawn_burst(180);

        // Slowest fall speed is 2 px/frame from y = -20; everything must be
        // gone well before 200 frames, and nothing may survive below the
        // discard line along the way.
        for _ in 0..200 {
            sim.advance_frame();
            let floor = height + CONFETTI_REMOVE_MARGIN;
            assert!(sim.particles().iter().all(|p| p.pos.y < floor));
        }
        assert_eq!(sim.particles().len(), 0);
    }

    #[test]
    fn advance_with_no_particles_is_a_noop() {
        let mut sim = ConfettiSim::new(6, 800.0, 600.0);
        sim.advance_frame();
        assert_eq!(sim.particles().len(), 0);
    }

    #[test]
    fn same_seed_same_burst() {
        let mut a = ConfettiSim::new(99, 800.0, 600.0);
        let mut b = ConfettiSim::new(99, 800.0, 600.0);
        a.spawn_burst(50);
        b.spawn_burst(50);

        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.color, pb.color);
        }
    }
}
