use std::f32::consts::TAU;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Scenery piece kinds. Flowers carry an index into the palette so the ring
/// alternates colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    CherryTree,
    Flower(u8),
    Grass,
}

/// A scenery piece on the ground plane.
#[derive(Debug, Clone)]
pub struct Prop {
    pub kind: PropKind,
    pub x: f32,
    /// Depth; larger is nearer the viewer.
    pub z: f32,
}

pub const FLOWER_COLORS: usize = 4;

const TREE_COUNT: usize = 6;
const TREE_RADIUS: f32 = 4.5;
const FLOWER_COUNT: usize = 30;
const FLOWER_RADIUS: f32 = 2.5;
const GRASS_COUNT: usize = 40;
const GRASS_RADIUS: f32 = 5.0;

/// Lay out the scenery: a ring of cherry trees, a circle of flowers around
/// the couple, and scattered grass. Seeded so the layout is stable for the
/// lifetime of the process.
pub fn scatter(seed: u64) -> Vec<Prop> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut props = Vec::with_capacity(TREE_COUNT + FLOWER_COUNT + GRASS_COUNT);

    for i in 0..TREE_COUNT {
        let angle = (i as f32 / TREE_COUNT as f32) * TAU;
        props.push(Prop {
            kind: PropKind::CherryTree,
            x: angle.cos() * TREE_RADIUS,
            z: angle.sin() * TREE_RADIUS,
        });
    }

    for i in 0..FLOWER_COUNT {
        let angle = (i as f32 / FLOWER_COUNT as f32) * TAU;
        props.push(Prop {
            kind: PropKind::Flower((i % FLOWER_COLORS) as u8),
            x: angle.cos() * FLOWER_RADIUS,
            z: angle.sin() * FLOWER_RADIUS,
        });
    }

    for _ in 0..GRASS_COUNT {
        let angle = rng.gen::<f32>() * TAU;
        let radius = rng.gen::<f32>() * GRASS_RADIUS;
        props.push(Prop {
            kind: PropKind::Grass,
            x: angle.cos() * radius,
            z: angle.sin() * radius,
        });
    }

    props
}

/// The ring of hearts orbiting above the couple.
#[derive(Debug, Clone)]
pub struct HeartRing {
    pub angle: f32,
    pub bob: f32,
}

pub const HEART_RING_COUNT: usize = 8;

const RING_SPIN_RATE: f32 = 0.6;
const RING_BOB_RATE: f32 = 2.0;
const RING_BOB_AMOUNT: f32 = 0.1;

impl HeartRing {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            bob: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32, time: f32) {
        self.angle = (self.angle + RING_SPIN_RATE * dt) % TAU;
        self.bob = (time * RING_BOB_RATE).sin() * RING_BOB_AMOUNT;
    }
}

impl Default for HeartRing {
    fn default() -> Self {
        Self::new()
    }
}

/// The gold proposal ring. Spins constantly, lifts on the proposal line and
/// settles back shortly after.
#[derive(Debug, Clone)]
pub struct ProposalRing {
    pub spin: f32,
    pub lifted: bool,
}

const PROPOSAL_SPIN_RATE: f32 = 1.2;

impl ProposalRing {
    pub fn new() -> Self {
        Self {
            spin: 0.0,
            lifted: false,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.spin = (self.spin + PROPOSAL_SPIN_RATE * dt) % TAU;
    }
}

impl Default for ProposalRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_is_deterministic_for_a_seed() {
        let a = scatter(7);
        let b = scatter(7);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.kind, pb.kind);
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.z, pb.z);
        }
    }

    #[test]
    fn scatter_places_every_prop_kind() {
        let props = scatter(7);
        let trees = props
            .iter()
            .filter(|p| p.kind == PropKind::CherryTree)
            .count();
        let flowers = props
            .iter()
            .filter(|p| matches!(p.kind, PropKind::Flower(_)))
            .count();
        let grass = props.iter().filter(|p| p.kind == PropKind::Grass).count();
        assert_eq!(trees, 6);
        assert_eq!(flowers, 30);
        assert_eq!(grass, 40);
    }

    #[test]
    fn flowers_cycle_the_palette() {
        let props = scatter(7);
        let first_four: Vec<u8> = props
            .iter()
            .filter_map(|p| match p.kind {
                PropKind::Flower(c) => Some(c),
                _ => None,
            })
            .take(4)
            .collect();
        assert_eq!(first_four, vec![0, 1, 2, 3]);
    }

    #[test]
    fn heart_ring_angle_stays_bounded() {
        let mut ring = HeartRing::new();
        for _ in 0..10_000 {
            ring.tick(0.033, 1.0);
        }
        assert!(ring.angle >= 0.0 && ring.angle < TAU);
    }
}
