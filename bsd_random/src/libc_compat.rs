// C-library style entry points over a per-thread generator.
//
// `srandom`, `random`, `initstate`, and `setstate` behave like their libc
// namesakes, except that the implicit generator is thread-local rather than
// process-wide: each thread starts on the default state and never observes
// another thread's draws. Code that wants several streams, or wants to pass a
// stream around, should own a `Generator` directly.
//
// State buffers keep the owned-handle semantics of `Generator`: `initstate`
// takes the new buffer by value and returns the old one, and `setstate`
// swaps in a buffer previously returned by either call.

use std::cell::RefCell;

use crate::error::Result;
use crate::generator::Generator;
use crate::state::StateBuffer;

thread_local! {
    static GENERATOR: RefCell<Generator> = RefCell::new(Generator::new());
}

/// Reseed this thread's generator.
pub fn srandom(seed: u32) {
    GENERATOR.with_borrow_mut(|rng| rng.seed(seed));
}

/// Next value from this thread's generator, in `[0, RANDOM_MAX]`.
pub fn random() -> i32 {
    GENERATOR.with_borrow_mut(Generator::next_random)
}

/// Install `buffer` as this thread's state; see `Generator::install_state`.
pub fn initstate(seed: u32, buffer: Vec<u32>, byte_size: usize) -> Result<StateBuffer> {
    GENERATOR.with_borrow_mut(|rng| rng.install_state(seed, buffer, byte_size))
}

/// Swap a saved state into this thread's generator; see `Generator::swap_state`.
pub fn setstate(state: StateBuffer) -> StateBuffer {
    GENERATOR.with_borrow_mut(|rng| rng.swap_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;
    use crate::state::Mode;

    // libtest runs every test on a fresh thread, so each one sees its own
    // default-state generator.

    #[test]
    fn unseeded_stream_is_seed_one() {
        let mut reference = Generator::with_seed(1);
        for _ in 0..50 {
            assert_eq!(random(), reference.next_random());
        }
    }

    #[test]
    fn srandom_then_random_deterministic() {
        srandom(42);
        let a: Vec<i32> = (0..10).map(|_| random()).collect();
        srandom(42);
        let b: Vec<i32> = (0..10).map(|_| random()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn initstate_and_setstate_round_trip() {
        srandom(7);
        let default = initstate(11, vec![0; 2], 8).unwrap();
        let lcg_first = random();
        let lcg = setstate(default);
        assert_eq!(lcg.mode(), Mode::LinearCongruential);

        let mut reference = Generator::with_seed(7);
        assert_eq!(random(), reference.next_random());

        setstate(lcg);
        let mut lcg_reference = Generator::new();
        lcg_reference.install_state(11, vec![0; 2], 8).unwrap();
        assert_eq!(lcg_reference.next_random(), lcg_first);
        assert_eq!(random(), lcg_reference.next_random());
    }

    #[test]
    fn initstate_failure_keeps_stream() {
        srandom(3);
        random();
        assert_eq!(
            initstate(1, vec![0; 1], 4).unwrap_err(),
            StateError::SizeTooSmall { byte_size: 4 }
        );
        let mut reference = Generator::with_seed(3);
        reference.next_random();
        assert_eq!(random(), reference.next_random());
    }

    #[test]
    fn threads_do_not_share_state() {
        srandom(99);
        let here = random();
        let there = std::thread::spawn(|| {
            srandom(99);
            random()
        })
        .join()
        .unwrap();
        assert_eq!(here, there);
    }
}
