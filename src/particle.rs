// Simple particle struct to keep track of individual position, velocity, and radius

use vecmath::{vec2_add, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
        }
    }

    /// Advances one frame inside a `width` x `height` box and reports which
    /// axes bounced. Position is never clamped, so a particle can overshoot a
    /// wall by at most one step before heading back.
    pub fn step(&mut self, width: f64, height: f64) -> [bool; 2] {
        self.pos = vec2_add(self.pos, self.vel);
        [
            reflect(self.pos[0], &mut self.vel[0], width),
            reflect(self.pos[1], &mut self.vel[1], height),
        ]
    }
}

// Only flip while heading outward, otherwise a particle left outside by a
// resize would reverse every frame and never come back.
fn reflect(pos: f64, vel: &mut f64, limit: f64) -> bool {
    let outward = (pos <= 0.0 && *vel < 0.0) || (pos >= limit && *vel > 0.0);
    if outward {
        *vel = -*vel;
    }
    outward
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounces_off_right_wall_on_contact() {
        let mut p = Particle::new(799.0, 300.0, 1.0, 0.0, 2.0);
        let bounced = p.step(800.0, 600.0);
        assert_eq!(bounced, [true, false]);
        assert_eq!(p.pos, [800.0, 300.0]);
        assert_eq!(p.vel, [-1.0, 0.0]);

        p.step(800.0, 600.0);
        assert_eq!(p.pos, [799.0, 300.0]);
        assert_eq!(p.vel, [-1.0, 0.0]);
    }

    #[test]
    fn overshoot_is_not_clamped() {
        let mut p = Particle::new(50.0, 0.5, 0.0, -1.5, 1.0);
        assert_eq!(p.step(100.0, 100.0), [false, true]);
        assert_eq!(p.pos, [50.0, -1.0]);
        assert_eq!(p.vel, [0.0, 1.5]);
    }

    #[test]
    fn stranded_particle_flips_once_and_returns() {
        // left outside after the surface shrank from 800 to 400
        let mut p = Particle::new(700.0, 100.0, 0.5, 0.0, 1.0);
        let mut flips = 0;
        for _ in 0..1000 {
            if p.step(400.0, 300.0)[0] {
                flips += 1;
            }
        }
        assert_eq!(flips, 1);
        assert!(p.pos[0] < 400.0);
    }

    #[test]
    fn heading_inward_from_outside_never_flips() {
        let mut p = Particle::new(-20.0, 50.0, 0.25, 0.0, 1.0);
        for _ in 0..10 {
            assert_eq!(p.step(100.0, 100.0), [false, false]);
        }
        assert_eq!(p.vel, [0.25, 0.0]);
    }

    #[test]
    fn one_flip_per_wall_contact() {
        let mut p = Particle::new(3.0, 3.0, 0.7, 0.3, 1.0);
        let (width, height) = (10.0, 5.0);
        for _ in 0..5000 {
            let before = p.vel;
            let bounced = p.step(width, height);
            for axis in 0..2 {
                let limit = if axis == 0 { width } else { height };
                let touching = p.pos[axis] <= 0.0 || p.pos[axis] >= limit;
                if bounced[axis] {
                    assert!(touching);
                    assert_eq!(p.vel[axis], -before[axis]);
                } else {
                    assert_eq!(p.vel[axis], before[axis]);
                }
            }
            // overshoot never exceeds one step
            assert!(p.pos[0] >= -0.7 && p.pos[0] <= width + 0.7);
            assert!(p.pos[1] >= -0.3 && p.pos[1] <= height + 0.3);
        }
    }
}
