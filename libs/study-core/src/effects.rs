//! Decorative effects: the emitter capability and particle planning.
//!
//! Widgets only raise signals through [`EffectsEmitter`]. A renderer that
//! wants actual particles asks a [`ParticlePlanner`] to lay them out.

use crate::types::EffectTarget;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Colours used by ambient glitter. The mouse trail uses the first five.
pub const GLITTER_COLORS: [&str; 6] = [
    "#6c63ff", "#ff6b6b", "#4ecdc4", "#45b7d1", "#f9ca24", "#f0932b",
];

const CELEBRATION_SPARKLES: u32 = 6;
const CELEBRATION_STAGGER: Duration = Duration::from_millis(100);
const CELEBRATION_SPREAD: f64 = 100.0;
const CARD_SPARKLES: u32 = 3;
const CARD_STAGGER: Duration = Duration::from_millis(200);
const CONFETTI_SPARKLES: u32 = 50;
const CONFETTI_STAGGER: Duration = Duration::from_millis(100);
const SPARKLE_LIFETIME: Duration = Duration::from_millis(3000);
const GLITTER_LIFETIME: Duration = Duration::from_millis(5000);
const TRAIL_LIFETIME: Duration = Duration::from_millis(1000);

/// Fire-and-forget decorative cues. Nothing here affects widget state.
pub trait EffectsEmitter {
    /// Celebration burst on one element (correct answer, matched item).
    fn celebrate(&mut self, target: EffectTarget);

    /// Small sparkle on one element (flashcard flipped to its back).
    fn sparkle(&mut self, target: EffectTarget);

    /// Page-wide burst when the matching game is complete.
    fn confetti(&mut self);
}

impl<E: EffectsEmitter + ?Sized> EffectsEmitter for &mut E {
    fn celebrate(&mut self, target: EffectTarget) {
        (**self).celebrate(target);
    }

    fn sparkle(&mut self, target: EffectTarget) {
        (**self).sparkle(target);
    }

    fn confetti(&mut self) {
        (**self).confetti();
    }
}

/// Emitter that drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl EffectsEmitter for NoEffects {
    fn celebrate(&mut self, _target: EffectTarget) {}
    fn sparkle(&mut self, _target: EffectTarget) {}
    fn confetti(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Bounding box of an element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point {
            x: self.left + self.width / 2.0,
            y: self.top + self.height / 2.0,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn rect(&self) -> Rect {
        Rect {
            left: 0.0,
            top: 0.0,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Sparkle,
    Glitter,
    TrailDot,
}

/// One planned decorative element.
///
/// Glitter rises from the bottom edge, so its `y` is the viewport height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Point,
    /// Wait before the particle appears.
    pub delay: Duration,
    /// CSS animation length, when the particle is animated.
    pub animation: Option<Duration>,
    /// Time after appearing at which the particle is removed.
    pub lifetime: Duration,
    pub color: Option<&'static str>,
}

/// Lays out particles for effect signals.
pub struct ParticlePlanner<R: Rng = ThreadRng> {
    rng: R,
}

impl ParticlePlanner<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for ParticlePlanner<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ParticlePlanner<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Six sparkles scattered around the centre of `rect`.
    pub fn celebration(&mut self, rect: Rect) -> Vec<Particle> {
        let center = rect.center();
        (0..CELEBRATION_SPARKLES)
            .map(|i| {
                let position = Point {
                    x: center.x + (self.rng.gen::<f64>() - 0.5) * CELEBRATION_SPREAD,
                    y: center.y + (self.rng.gen::<f64>() - 0.5) * CELEBRATION_SPREAD,
                };
                self.sparkle_at(position, CELEBRATION_STAGGER * i)
            })
            .collect()
    }

    /// Three sparkles placed inside `rect`.
    pub fn card_sparkles(&mut self, rect: Rect) -> Vec<Particle> {
        (0..CARD_SPARKLES)
            .map(|i| {
                let position = self.point_in(rect);
                self.sparkle_at(position, CARD_STAGGER * i)
            })
            .collect()
    }

    /// Fifty sparkles spread over the whole viewport.
    pub fn confetti(&mut self, viewport: Viewport) -> Vec<Particle> {
        (0..CONFETTI_SPARKLES)
            .map(|i| {
                let position = self.point_in(viewport.rect());
                self.sparkle_at(position, CONFETTI_STAGGER * i)
            })
            .collect()
    }

    /// One ambient glitter particle rising from the bottom edge.
    pub fn glitter(&mut self, viewport: Viewport) -> Particle {
        let color = GLITTER_COLORS.choose(&mut self.rng).copied();
        let animation = Duration::from_secs_f64(self.rng.gen::<f64>() * 3.0 + 2.0);
        Particle {
            kind: ParticleKind::Glitter,
            position: Point {
                x: self.rng.gen::<f64>() * viewport.width,
                y: viewport.height,
            },
            delay: Duration::ZERO,
            animation: Some(animation),
            lifetime: GLITTER_LIFETIME,
            color,
        }
    }

    /// A trail dot at the pointer, or nothing when the trail is off.
    pub fn trail_dot(&mut self, pointer: Point, enabled: bool) -> Option<Particle> {
        if !enabled {
            return None;
        }
        let color = GLITTER_COLORS[..5].choose(&mut self.rng).copied();
        Some(Particle {
            kind: ParticleKind::TrailDot,
            position: pointer,
            delay: Duration::ZERO,
            animation: None,
            lifetime: TRAIL_LIFETIME,
            color,
        })
    }

    fn point_in(&mut self, rect: Rect) -> Point {
        Point {
            x: rect.left + self.rng.gen::<f64>() * rect.width,
            y: rect.top + self.rng.gen::<f64>() * rect.height,
        }
    }

    fn sparkle_at(&mut self, position: Point, delay: Duration) -> Particle {
        let animation = Duration::from_secs_f64(self.rng.gen::<f64>() * 2.0 + 1.0);
        Particle {
            kind: ParticleKind::Sparkle,
            position,
            delay,
            animation: Some(animation),
            lifetime: SPARKLE_LIFETIME,
            color: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn planner() -> ParticlePlanner<StdRng> {
        ParticlePlanner::with_rng(StdRng::seed_from_u64(7))
    }

    const CARD: Rect = Rect {
        left: 100.0,
        top: 200.0,
        width: 80.0,
        height: 40.0,
    };

    #[test]
    fn celebration_stays_near_center() {
        let particles = planner().celebration(CARD);
        assert_eq!(particles.len(), 6);

        let center = CARD.center();
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.kind, ParticleKind::Sparkle);
            assert_eq!(p.delay, Duration::from_millis(100 * i as u64));
            assert!((p.position.x - center.x).abs() <= 50.0);
            assert!((p.position.y - center.y).abs() <= 50.0);
            let animation = p.animation.unwrap();
            assert!(animation >= Duration::from_secs(1) && animation <= Duration::from_secs(3));
            assert_eq!(p.lifetime, Duration::from_millis(3000));
        }
    }

    #[test]
    fn card_sparkles_inside_card() {
        let particles = planner().card_sparkles(CARD);
        assert_eq!(particles.len(), 3);
        assert_eq!(particles[2].delay, Duration::from_millis(400));
        assert!(particles.iter().all(|p| CARD.contains(p.position)));
    }

    #[test]
    fn confetti_covers_viewport() {
        let viewport = Viewport {
            width: 1280.0,
            height: 720.0,
        };
        let particles = planner().confetti(viewport);
        assert_eq!(particles.len(), 50);
        assert_eq!(particles[49].delay, Duration::from_millis(4900));
        assert!(particles.iter().all(|p| viewport.rect().contains(p.position)));
    }

    #[test]
    fn glitter_starts_at_bottom_edge() {
        let viewport = Viewport {
            width: 800.0,
            height: 600.0,
        };
        let mut planner = planner();
        for _ in 0..20 {
            let glitter = planner.glitter(viewport);
            assert_eq!(glitter.position.y, 600.0);
            assert!(glitter.position.x >= 0.0 && glitter.position.x <= 800.0);
            assert!(GLITTER_COLORS.contains(&glitter.color.unwrap()));
            assert_eq!(glitter.lifetime, Duration::from_millis(5000));
        }
    }

    #[test]
    fn trail_respects_toggle() {
        let mut planner = planner();
        let pointer = Point { x: 10.0, y: 20.0 };

        assert!(planner.trail_dot(pointer, false).is_none());

        let dot = planner.trail_dot(pointer, true).unwrap();
        assert_eq!(dot.position, pointer);
        assert_eq!(dot.lifetime, Duration::from_millis(1000));
        assert_ne!(dot.color, Some("#f0932b"));
    }
}
