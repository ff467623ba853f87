// The particle field: a fixed set of drifting points that bounce inside the
// viewport, with faint lines joining any pair that drifts close together.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A line to draw between two particles, by index into the field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub opacity: f64,
}

/// Fades linearly from 1 at distance 0 to 0 at `threshold`; anything at or
/// past the threshold is invisible.
pub fn connection_opacity(distance: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 || !(distance < threshold) {
        return 0.0;
    }
    (1.0 - distance / threshold).max(0.0).min(1.0)
}

pub struct ParticleField {
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    /// Seeds from `config.seed` when set, otherwise from the host's entropy source.
    pub fn new(width: u32, height: u32, config: FieldConfig) -> ParticleField {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ParticleField::with_rng(width, height, config, &mut rng)
    }

    pub fn with_rng<R: Rng>(
        width: u32,
        height: u32,
        config: FieldConfig,
        rng: &mut R,
    ) -> ParticleField {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            let pos_x = rng.gen::<f64>() * width as f64;
            let pos_y = rng.gen::<f64>() * height as f64;
            let vel_x = sample(rng, -config.max_speed, config.max_speed);
            let vel_y = sample(rng, -config.max_speed, config.max_speed);
            let radius = sample(rng, config.min_radius, config.max_radius);
            particles.push(Particle::new(pos_x, pos_y, vel_x, vel_y, radius));
        }
        ParticleField::from_particles(width, height, config, particles)
    }

    pub fn from_particles(
        width: u32,
        height: u32,
        config: FieldConfig,
        particles: Vec<Particle>,
    ) -> ParticleField {
        ParticleField {
            width,
            height,
            particles,
            config,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// New bounds apply from the next update. Particles are left where they
    /// are, even if that is now outside.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Moves every particle one step and returns how many wall bounces happened.
    pub fn update(&mut self) -> usize {
        let (width, height) = (self.width as f64, self.height as f64);
        let mut bounces = 0;
        for particle in &mut self.particles {
            let [x, y] = particle.step(width, height);
            bounces += x as usize + y as usize;
        }
        bounces
    }

    /// Every unordered pair closer than the connection distance. This is a
    /// plain O(n^2) scan, fine for the hundred or so particles a background uses.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.config.connection_distance;
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |i| {
            (i + 1..particles.len()).filter_map(move |j| {
                let delta = vecmath::vec2_sub(particles[j].pos, particles[i].pos);
                let opacity = connection_opacity(vecmath::vec2_len(delta), threshold);
                if opacity > 0.0 {
                    Some(Connection {
                        from: i,
                        to: j,
                        opacity,
                    })
                } else {
                    None
                }
            })
        })
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let config = &self.config;
        surface.fill_rect(
            0.0,
            0.0,
            self.width as f64,
            self.height as f64,
            config.trail,
        );
        for particle in &self.particles {
            surface.fill_circle(particle.pos, particle.radius, config.particle);
        }
        for connection in self.connections() {
            surface.stroke_line(
                self.particles[connection.from].pos,
                self.particles[connection.to].pos,
                config.line_width,
                config.connection.with_alpha(connection.opacity),
            );
        }
    }

    /// One full frame: step the simulation, then draw it.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.update();
        self.render(surface);
    }
}

// gen_range panics on an empty range, so a collapsed range yields its bound
fn sample<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low, high)
    } else {
        low
    }
}
