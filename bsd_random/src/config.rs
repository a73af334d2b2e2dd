// Draw configuration for the `bsdrand` binary.
//
// `DrawConfig` is loaded from JSON, with every field optional: missing fields
// take their `Default` values, so `{}` is a valid config. Command-line flags
// are applied on top by `main.rs`.
//
// Example:
//   { "seed": 2024, "state_size": 256, "count": 5, "dump_state": true }

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StateError};
use crate::generator::Generator;
use crate::state::Mode;

/// How many values to draw, and from what state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Seed passed to `install_state`.
    pub seed: u32,
    /// State buffer size in bytes; selects the table size.
    pub state_size: usize,
    /// Number of values to print.
    pub count: usize,
    /// Print the final state buffer as JSON after the draws.
    pub dump_state: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            state_size: 128,
            count: 10,
            dump_state: false,
        }
    }
}

impl DrawConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build a generator on a fresh buffer sized for the table `state_size`
    /// selects, seeded with `seed`. Sizes past 256 bytes allocate no more
    /// than 256 does.
    pub fn build_generator(&self) -> Result<Generator, StateError> {
        let mut rng = Generator::new();
        let words = Mode::for_byte_size(self.state_size)
            .map_or(0, Mode::required_words);
        rng.install_state(self.seed, vec![0; words], self.state_size)?;
        Ok(rng)
    }

    /// Draw `count` values. Returns them along with the generator, which has
    /// advanced past them.
    pub fn draw(&self) -> Result<(Vec<i32>, Generator), StateError> {
        let mut rng = self.build_generator()?;
        let values = (0..self.count).map(|_| rng.next_random()).collect();
        Ok((values, rng))
    }
}
