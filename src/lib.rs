//! Fortuna generator: expands a secret key into an unbounded pseudorandom
//! stream with a block cipher in counter mode, replacing its own key after
//! every request so past output cannot be recomputed from current state.
//!
//! Deciding when and with what to reseed is left to the caller.

pub mod aes_ctr;
pub mod counter;
pub mod error;
pub mod generator;
pub mod shad;

pub use aes_ctr::{Aes256Block, AesGenerator};
pub use counter::{encode_counter, encode_counter_into};
pub use error::Error;
pub use generator::{BlockSource, Generator, KeyHash, CHUNK_SIZE};
pub use shad::ShaD256;
