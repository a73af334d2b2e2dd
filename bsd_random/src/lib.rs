// bsd_random — BSD-compatible `random()` generator with swappable state.
//
// This crate reproduces the lagged-Fibonacci `random()` family from the C
// library, bit for bit: `srandom`-style seeding, `initstate`-style state
// installation with table size picked from the buffer size, `setstate`-style
// state swapping, and number production. The generator is an explicit value
// rather than hidden process-wide state.
//
// Module overview:
// - `state.rs`:        Buffer layout. `Mode` (LCG or lagged table), the packed
//                      `(n, i, j)` `Header`, and the validated `StateBuffer`
//                      handle that moves in and out of a generator.
// - `generator.rs`:    `Generator` — seed, install_state, swap_state,
//                      next_random, plus snapshot/restore.
// - `rng.rs`:          `rand_core::RngCore` and `SeedableRng` impls.
// - `libc_compat.rs`:  `srandom`/`random`/`initstate`/`setstate` over a
//                      thread-local generator.
// - `config.rs`:       `DrawConfig`, the JSON config for the `bsdrand` binary.
// - `error.rs`:        `StateError` and `ConfigError`.
//
// Not cryptographically secure: the full state is recoverable from a short
// run of outputs.

pub mod config;
pub mod error;
pub mod generator;
pub mod libc_compat;
pub mod rng;
pub mod state;

pub use config::DrawConfig;
pub use error::{ConfigError, Result, StateError};
pub use generator::Generator;
pub use state::{Header, MIN_STATE_BYTES, Mode, StateBuffer, TableSize};

/// Largest value `Generator::next_random` can return (2^31 - 1).
pub const RANDOM_MAX: i32 = 0x7fff_ffff;
