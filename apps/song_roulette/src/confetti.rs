//! Confetti burst shown when a spin settles

use nannou::prelude::*;
use rand::Rng;
use wheel_shared::Rgb;

/// Downward pull in points per second squared
const GRAVITY: f32 = -420.0;

#[derive(Debug, Clone)]
pub struct Confetto {
    pub pos: Point2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub spin: f32,
    pub angle: f32,
    pub color: Rgb,
}

impl Confetto {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, origin: Point2, color: Rgb) -> Self {
        // Mostly upwards, fanned out to both sides
        let angle = rng.random_range(0.15 * PI..0.85 * PI);
        let speed = rng.random_range(180.0..520.0);
        let max_life = rng.random_range(1.2..2.4);
        Self {
            pos: origin,
            vel: vec2(angle.cos() * speed, angle.sin() * speed),
            life: max_life,
            max_life,
            size: rng.random_range(4.0..9.0),
            spin: rng.random_range(-8.0..8.0),
            angle: 0.0,
            color,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.vel.y += GRAVITY * dt;
        self.vel *= 0.99;
        self.pos += self.vel * dt;
        self.angle += self.spin * dt;
        self.life -= dt;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Remaining life in `[0, 1]`
    pub fn fade(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Spawn `count` confetti at `origin` using the slice colors
pub fn burst(origin: Point2, colors: &[Rgb], count: usize) -> Vec<Confetto> {
    if colors.is_empty() {
        return Vec::new();
    }
    let mut rng = rand::rng();
    (0..count)
        .map(|i| Confetto::new(&mut rng, origin, colors[i % colors.len()]))
        .collect()
}

/// Advance every confetto and drop the expired ones
pub fn step(confetti: &mut Vec<Confetto>, dt: f32) {
    for c in confetti.iter_mut() {
        c.update(dt);
    }
    confetti.retain(Confetto::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_cycles_colors() {
        let colors = [Rgb::BLACK, Rgb::WHITE];
        let confetti = burst(pt2(0.0, 0.0), &colors, 5);
        assert_eq!(confetti.len(), 5);
        assert_eq!(confetti[2].color, Rgb::BLACK);
        assert_eq!(confetti[3].color, Rgb::WHITE);
        assert!(burst(pt2(0.0, 0.0), &[], 5).is_empty());
    }

    #[test]
    fn test_confetti_expire() {
        let mut confetti = burst(pt2(0.0, 0.0), &[Rgb::WHITE], 20);
        for _ in 0..300 {
            step(&mut confetti, 1.0 / 60.0);
        }
        assert!(confetti.is_empty());
    }
}
