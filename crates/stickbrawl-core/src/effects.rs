//! Hit sparks and screen shake.
//!
//! The combat pass only *emits* effects; advancing and drawing them is up to
//! the renderer, which calls [`Effects::advance`] once per drawn frame. No
//! simulation state ever reads effects back.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    GRAVITY, HIT_PARTICLE_COUNT, HIT_PARTICLE_LIFESPAN, HIT_PARTICLE_SPREAD,
    PARTICLE_GRAVITY_SCALE, SCREEN_SHAKE_DURATION, SCREEN_SHAKE_MAGNITUDE,
};

/// A short-lived spark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Centre of the spark.
    pub position: Vec2,
    /// Velocity in pixels per frame.
    pub velocity: Vec2,
    /// Draw radius.
    pub radius: f32,
    /// CSS colour.
    pub color: String,
    /// Frames left before removal.
    pub lifespan: u32,
    /// Lifespan at creation, for fading.
    pub max_lifespan: u32,
}

impl Particle {
    /// Opacity in `[0, 1]`, fading linearly over the lifespan.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn alpha(&self) -> f32 {
        if self.max_lifespan == 0 {
            return 0.0;
        }
        self.lifespan as f32 / self.max_lifespan as f32
    }
}

/// Camera shake request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    /// Frames of shake left.
    pub duration: u32,
    /// Maximum offset span in pixels.
    pub magnitude: f32,
}

/// All transient visual effects of a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    /// Live sparks.
    pub particles: Vec<Particle>,
    /// Current shake.
    pub shake: ScreenShake,
}

impl Effects {
    /// Emits the standard hit burst at `origin`.
    ///
    /// Spawns [`HIT_PARTICLE_COUNT`] white sparks with velocity components
    /// uniform in `[-4, 4)` and radius uniform in `[1, 4)`.
    pub fn burst(&mut self, origin: Vec2, rng: &mut ChaCha8Rng) {
        self.particles.reserve(HIT_PARTICLE_COUNT);
        for _ in 0..HIT_PARTICLE_COUNT {
            let velocity = Vec2::new(
                (rng.gen::<f32>() - 0.5) * HIT_PARTICLE_SPREAD,
                (rng.gen::<f32>() - 0.5) * HIT_PARTICLE_SPREAD,
            );
            self.particles.push(Particle {
                position: origin,
                velocity,
                radius: rng.gen::<f32>() * 3.0 + 1.0,
                color: "white".to_string(),
                lifespan: HIT_PARTICLE_LIFESPAN,
                max_lifespan: HIT_PARTICLE_LIFESPAN,
            });
        }
    }

    /// Starts a shake scaled by how much knockback went through.
    pub fn shake(&mut self, knockback_scale: f32) {
        self.shake = ScreenShake {
            duration: SCREEN_SHAKE_DURATION,
            magnitude: SCREEN_SHAKE_MAGNITUDE * knockback_scale,
        };
    }

    /// Advances effects by one rendered frame.
    ///
    /// Expired sparks are dropped, the rest fall under a tenth of gravity.
    /// Returns the camera offset for this frame, zero when not shaking.
    pub fn advance(&mut self, rng: &mut ChaCha8Rng) -> Vec2 {
        self.particles.retain(|p| p.lifespan > 0);
        for particle in &mut self.particles {
            particle.velocity.y += GRAVITY * PARTICLE_GRAVITY_SCALE;
            particle.position += particle.velocity;
            particle.lifespan -= 1;
        }

        if self.shake.duration == 0 {
            return Vec2::ZERO;
        }
        self.shake.duration -= 1;
        let magnitude = self.shake.magnitude;
        Vec2::new(
            (rng.gen::<f32>() - 0.5) * magnitude,
            (rng.gen::<f32>() - 0.5) * magnitude,
        )
    }

    /// Removes every effect.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.shake = ScreenShake::default();
    }
}
