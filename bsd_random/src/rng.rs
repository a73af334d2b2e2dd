// `rand_core` integration so a `Generator` can drive the `rand` ecosystem.
//
// `next_random` only yields 31 bits, and its low bits are the weakest, so a
// full `u32` is assembled from the top 16 bits of two consecutive draws.
// `u64`s and byte fills are built from `u32`s with the stock `rand_core`
// helpers. Seeds are 4 little-endian bytes, passed straight to `seed`.

use rand_core::{Error, RngCore, SeedableRng, impls};

use crate::generator::Generator;

impl RngCore for Generator {
    fn next_u32(&mut self) -> u32 {
        let hi = (self.next_random() as u32) >> 15;
        let lo = (self.next_random() as u32) >> 15;
        (hi << 16) | lo
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Generator {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Generator::with_seed(u32::from_le_bytes(seed))
    }
}
