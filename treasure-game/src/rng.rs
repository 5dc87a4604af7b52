//! Seeded random streams.
//!
//! Every source of chance in a session draws from its own stream derived
//! from the user seed, so a shop visit never shifts the dice for a later
//! brawl. Rules take `&mut impl RngCore` and read draws through the helpers
//! below, which turn one `u32` into a ratio in `[0, 1)`.

use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use sha2::Sha256;

use crate::constants::{STREAM_BRAWL, STREAM_DIG, STREAM_SHOP, STREAM_TOWN, STREAM_WEAR};
use crate::numbers::floor_f64_to_u32;

const RATIO_SCALE: f64 = 4_294_967_296.0;

/// One draw mapped onto `[0, 1)`.
pub fn sample_ratio<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.next_u32()) / RATIO_SCALE
}

/// True with probability `chance`.
pub fn roll_chance<R: RngCore + ?Sized>(rng: &mut R, chance: f64) -> bool {
    sample_ratio(rng) < chance
}

/// Uniform integer in `1..=sides`; zero sides always yields 0.
pub fn roll_die<R: RngCore + ?Sized>(rng: &mut R, sides: u32) -> u32 {
    if sides == 0 {
        return 0;
    }
    let face = floor_f64_to_u32(sample_ratio(rng) * f64::from(sides));
    face.min(sides - 1) + 1
}

/// Uniform index into a slice of `len` entries.
pub fn roll_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    let sides = u32::try_from(len).unwrap_or(u32::MAX);
    usize::try_from(roll_die(rng, sides)).map_or(0, |face| face.saturating_sub(1))
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Independent streams for each source of chance in a session.
#[derive(Debug, Clone)]
pub struct RngBundle {
    seed: u64,
    town: CountingRng<SmallRng>,
    shop: CountingRng<SmallRng>,
    brawl: CountingRng<SmallRng>,
    dig: CountingRng<SmallRng>,
    wear: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            town: CountingRng::new(derive_stream_seed(seed, STREAM_TOWN)),
            shop: CountingRng::new(derive_stream_seed(seed, STREAM_SHOP)),
            brawl: CountingRng::new(derive_stream_seed(seed, STREAM_BRAWL)),
            dig: CountingRng::new(derive_stream_seed(seed, STREAM_DIG)),
            wear: CountingRng::new(derive_stream_seed(seed, STREAM_WEAR)),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Terrain, toughness and treasure rolls for new towns.
    pub const fn town(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.town
    }

    /// Shopkeeper flavor picks.
    pub const fn shop(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.shop
    }

    pub const fn brawl(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.brawl
    }

    pub const fn dig(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.dig
    }

    /// Item-break rolls on crossings.
    pub const fn wear(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.wear
    }

    /// Total draws across all streams.
    #[must_use]
    pub const fn total_draws(&self) -> u64 {
        self.town.draws()
            + self.shop.draws()
            + self.brawl.draws()
            + self.dig.draws()
            + self.wear.draws()
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedRng;
    use super::*;

    #[test]
    fn same_seed_yields_same_streams() {
        let mut a = RngBundle::from_user_seed(42);
        let mut b = RngBundle::from_user_seed(42);
        assert_eq!(a.brawl().next_u32(), b.brawl().next_u32());
        assert_eq!(a.town().next_u64(), b.town().next_u64());
    }

    #[test]
    fn streams_are_domain_separated() {
        assert_ne!(
            derive_stream_seed(7, STREAM_TOWN),
            derive_stream_seed(7, STREAM_BRAWL)
        );
    }

    #[test]
    fn counting_tracks_draws() {
        let mut bundle = RngBundle::from_user_seed(1);
        let _ = sample_ratio(bundle.dig());
        let _ = roll_die(bundle.dig(), 20);
        assert_eq!(bundle.dig().draws(), 2);
        assert_eq!(bundle.total_draws(), 2);
    }

    #[test]
    fn die_covers_both_faces_of_range() {
        let mut low = ScriptedRng::new(&[0.0]);
        assert_eq!(roll_die(&mut low, 10), 1);
        let mut high = ScriptedRng::new(&[0.999_999]);
        assert_eq!(roll_die(&mut high, 10), 10);
        let mut none = ScriptedRng::new(&[0.5]);
        assert_eq!(roll_die(&mut none, 0), 0);
    }

    #[test]
    fn chance_compares_strictly_below() {
        let mut rng = ScriptedRng::new(&[0.5]);
        assert!(!roll_chance(&mut rng, 0.5));
        assert!(roll_chance(&mut rng, 0.51));
        assert!(!roll_chance(&mut rng, 0.0));
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut rng = ScriptedRng::new(&[0.999_999]);
        assert_eq!(roll_index(&mut rng, 3), 2);
        let mut rng = ScriptedRng::new(&[0.0]);
        assert_eq!(roll_index(&mut rng, 6), 0);
    }
}
