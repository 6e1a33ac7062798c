use rand::Rng;

pub const HEART_GLYPHS: [char; 5] = ['❤', '💖', '💗', '💓', '💕'];

/// Upper bound on live hearts; bursts past this are dropped, not queued.
const MAX_HEARTS: usize = 128;

const MIN_LIFETIME: f32 = 2.0;
const MAX_LIFETIME: f32 = 5.0;

/// One rising heart. Position is fractional: `col` across the viewport,
/// `age / lifetime` up from the bottom.
#[derive(Debug, Clone)]
pub struct FloatingHeart {
    pub col: f32,
    pub age: f32,
    pub lifetime: f32,
    pub glyph: char,
}

impl FloatingHeart {
    /// Climb fraction in [0, 1].
    pub fn rise(&self) -> f32 {
        (self.age / self.lifetime).min(1.0)
    }
}

/// Pool of floating hearts. The pool owns expiry: each heart carries its
/// animation duration and is dropped once it has run.
#[derive(Debug, Default)]
pub struct Particles {
    hearts: Vec<FloatingHeart>,
}

impl Particles {
    pub fn new() -> Self {
        Self { hearts: Vec::new() }
    }

    pub fn spawn<R: Rng>(&mut self, count: u32, rng: &mut R) {
        for _ in 0..count {
            if self.hearts.len() >= MAX_HEARTS {
                break;
            }
            self.hearts.push(FloatingHeart {
                col: rng.gen(),
                age: 0.0,
                lifetime: rng.gen_range(MIN_LIFETIME..MAX_LIFETIME),
                glyph: HEART_GLYPHS[rng.gen_range(0..HEART_GLYPHS.len())],
            });
        }
    }

    pub fn tick(&mut self, dt: f32) {
        for heart in &mut self.hearts {
            heart.age += dt;
        }
        self.hearts.retain(|h| h.age < h.lifetime);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloatingHeart> {
        self.hearts.iter()
    }

    pub fn len(&self) -> usize {
        self.hearts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hearts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spawn_adds_the_requested_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut particles = Particles::new();
        particles.spawn(10, &mut rng);
        assert_eq!(particles.len(), 10);
        particles.spawn(20, &mut rng);
        assert_eq!(particles.len(), 30);
    }

    #[test]
    fn hearts_expire_after_their_lifetime() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut particles = Particles::new();
        particles.spawn(10, &mut rng);

        particles.tick(1.0);
        assert_eq!(particles.len(), 10);

        // Past the longest possible lifetime everything is gone.
        particles.tick(MAX_LIFETIME);
        assert!(particles.is_empty());
    }

    #[test]
    fn pool_is_bounded() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut particles = Particles::new();
        particles.spawn(1000, &mut rng);
        assert_eq!(particles.len(), MAX_HEARTS);
    }

    #[test]
    fn rise_is_clamped() {
        let heart = FloatingHeart {
            col: 0.5,
            age: 10.0,
            lifetime: 2.0,
            glyph: '❤',
        };
        assert_eq!(heart.rise(), 1.0);
    }
}
