//! Id generation for created rounds, matches, series and competitions.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

/// Source of unique opaque ids, injected into every generator.
pub trait IdGenerator {
    fn next_id(&mut self) -> Uuid;
}

/// Random v4 uuids from the thread rng.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// v4-shaped uuids drawn from a seeded rng: same seed, same sequence.
#[derive(Clone, Debug)]
pub struct SeededIdGenerator {
    rng: StdRng,
}

impl SeededIdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IdGenerator for SeededIdGenerator {
    fn next_id(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> Uuid {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> Uuid {
        (**self).next_id()
    }
}
