use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes256;

use crate::counter::encode_counter_into;
use crate::error::Error;
use crate::generator::{BlockSource, Generator};
use crate::shad::ShaD256;

/// The standard Fortuna generator: AES-256 in counter mode, SHA-256d reseeding.
pub type AesGenerator = Generator<Aes256Block, ShaD256>;

/// AES-256 keyed for one generator key. Each block is the raw single-block
/// encryption of the little-endian encoded counter.
pub struct Aes256Block {
    cipher: Aes256,
}

impl BlockSource for Aes256Block {
    const BLOCK_SIZE: usize = 16;
    const KEY_SIZE: usize = 32;
    // At most 2^16 blocks under one key. A counter-mode stream has no block
    // collisions, which becomes detectable near the 2^64 birthday bound.
    const MAX_BLOCKS_PER_REQUEST: usize = 1 << 16;

    fn with_key(key: &[u8]) -> Result<Self, Error> {
        let cipher = Aes256::new_from_slice(key).map_err(|_| Error::KeySizeMismatch {
            expected: Self::KEY_SIZE,
            actual: key.len(),
        })?;
        Ok(Self { cipher })
    }

    fn generate_single_block(&self, counter: u128, out: &mut [u8]) -> Result<(), Error> {
        if counter == 0 {
            return Err(Error::Invariant("counter 0 reached the cipher"));
        }
        if out.len() != Self::BLOCK_SIZE {
            return Err(Error::Invariant("cipher output is not one block"));
        }
        encode_counter_into(counter, out)?;
        self.cipher.encrypt_block(GenericArray::from_mut_slice(out));
        Ok(())
    }
}
