use std::fmt;
use std::marker::PhantomData;

use rand_core::{TryCryptoRng, TryRngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::error::Error;

/// Size of one caller-level request chunk. The key is replaced after each.
pub const CHUNK_SIZE: usize = 1 << 20;

/// Keyed single-block primitive the generator runs in counter mode.
///
/// The associated constants are the generator parameters for one cipher
/// instantiation. They are checked when a [`Generator`] is constructed.
pub trait BlockSource: Sized {
    /// Output bytes per block.
    const BLOCK_SIZE: usize;
    /// Key bytes. Must be a whole number of blocks.
    const KEY_SIZE: usize;
    /// Upper bound on blocks produced under one key before re-keying.
    const MAX_BLOCKS_PER_REQUEST: usize;

    /// Builds the primitive for the current generator key.
    fn with_key(key: &[u8]) -> Result<Self, Error>;

    /// Writes the block for `counter` into `out` (exactly `BLOCK_SIZE` bytes).
    fn generate_single_block(&self, counter: u128, out: &mut [u8]) -> Result<(), Error>;
}

/// Hash used to fold seed material into the key on reseed.
pub trait KeyHash {
    /// Digest of the concatenation of `parts`.
    fn digest(parts: &[&[u8]]) -> Zeroizing<Vec<u8>>;
}

/// Counter-mode generator with key rotation after every request chunk.
///
/// Starts unseeded (all-zero key, counter 0) and refuses to produce output
/// until [`Generator::reseed`] has been called at least once.
pub struct Generator<B, H> {
    key: Vec<u8>,
    counter: u128,
    _primitives: PhantomData<fn() -> (B, H)>,
}

impl<B: BlockSource, H: KeyHash> Generator<B, H> {
    /// Creates an unseeded generator, validating the block source parameters.
    pub fn new() -> Result<Self, Error> {
        validate_parameters::<B>()?;
        Ok(Self {
            key: vec![0u8; B::KEY_SIZE],
            counter: 0,
            _primitives: PhantomData,
        })
    }

    pub fn is_seeded(&self) -> bool {
        self.counter != 0
    }

    /// Current block counter. Also the number of reseeds plus blocks emitted.
    pub fn counter(&self) -> u128 {
        self.counter
    }

    pub fn max_bytes_per_request() -> usize {
        B::MAX_BLOCKS_PER_REQUEST * B::BLOCK_SIZE
    }

    /// Folds `seed` into the key: `key = H(key || seed)`, then bumps the counter.
    ///
    /// The counter keeps counting across reseeds instead of restarting, so
    /// the block sequence fed to the cipher never repeats for this instance.
    pub fn reseed(&mut self, seed: &[u8]) -> Result<(), Error> {
        let digest = H::digest(&[self.key.as_slice(), seed]);
        if digest.len() != B::KEY_SIZE {
            return Err(Error::KeySizeMismatch {
                expected: B::KEY_SIZE,
                actual: digest.len(),
            });
        }
        let counter = self
            .counter
            .checked_add(1)
            .ok_or(Error::CounterExhausted)?;

        self.key.copy_from_slice(&digest);
        self.counter = counter;

        log::debug!(
            "reseeded with {} seed bytes, counter now {}",
            seed.len(),
            self.counter
        );
        Ok(())
    }

    /// Returns exactly `n` pseudorandom bytes.
    pub fn pseudo_random_data(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        let mut out = vec![0u8; n];
        self.fill_bytes(&mut out)?;
        Ok(out)
    }

    /// Fills `dest` the same way [`Generator::pseudo_random_data`] would
    /// produce `dest.len()` bytes.
    pub fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        let full = dest.len() - dest.len() % CHUNK_SIZE;
        let (head, tail) = dest.split_at_mut(full);
        for chunk in head.chunks_exact_mut(CHUNK_SIZE) {
            self.generate_chunk(chunk)?;
        }
        // The trailing chunk always runs, even when empty, so every request
        // rotates the key at least once.
        self.generate_chunk(tail)
    }

    /// Produces `n` bytes as one request, handing each chunk to `f` in order
    /// instead of buffering the whole output.
    pub fn for_each_chunk<F>(&mut self, n: usize, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&[u8]) -> Result<(), Error>,
    {
        let mut buf = Zeroizing::new(vec![0u8; n.min(CHUNK_SIZE)]);
        for _ in 0..n / CHUNK_SIZE {
            self.generate_chunk(&mut buf[..CHUNK_SIZE])?;
            f(&buf[..CHUNK_SIZE])?;
        }

        let rem = n % CHUNK_SIZE;
        self.generate_chunk(&mut buf[..rem])?;
        if rem > 0 {
            f(&buf[..rem])?;
        }
        Ok(())
    }

    /// Fills `out` with output under the current key, then replaces the key.
    fn generate_chunk(&mut self, out: &mut [u8]) -> Result<(), Error> {
        let max = Self::max_bytes_per_request();
        if out.len() > max {
            return Err(Error::RequestTooLarge {
                requested: out.len(),
                max,
            });
        }

        let whole = out.len() - out.len() % B::BLOCK_SIZE;
        let (blocks, partial) = out.split_at_mut(whole);
        self.generate_blocks(blocks)?;
        if !partial.is_empty() {
            let mut last = Zeroizing::new(vec![0u8; B::BLOCK_SIZE]);
            self.generate_blocks(&mut last)?;
            partial.copy_from_slice(&last[..partial.len()]);
        }

        let mut next_key = Zeroizing::new(vec![0u8; B::KEY_SIZE]);
        self.generate_blocks(&mut next_key)?;
        self.key.copy_from_slice(&next_key);

        log::trace!(
            "rekeyed after {}-byte chunk, counter now {}",
            out.len(),
            self.counter
        );
        Ok(())
    }

    /// Writes `out.len() / BLOCK_SIZE` consecutive counter blocks into `out`.
    fn generate_blocks(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if self.counter == 0 {
            return Err(Error::NotSeeded);
        }
        if out.len() % B::BLOCK_SIZE != 0 {
            return Err(Error::Invariant("block buffer is not a whole number of blocks"));
        }
        if out.len() / B::BLOCK_SIZE > B::MAX_BLOCKS_PER_REQUEST {
            return Err(Error::Invariant("too many blocks requested under one key"));
        }
        if out.is_empty() {
            return Ok(());
        }

        let source = B::with_key(&self.key)?;
        for block in out.chunks_exact_mut(B::BLOCK_SIZE) {
            let next = self
                .counter
                .checked_add(1)
                .ok_or(Error::CounterExhausted)?;
            source.generate_single_block(self.counter, block)?;
            self.counter = next;
        }
        Ok(())
    }
}

fn validate_parameters<B: BlockSource>() -> Result<(), Error> {
    if !B::BLOCK_SIZE.is_power_of_two() {
        return Err(Error::InvalidParameters(format!(
            "block size {} is not a power of two",
            B::BLOCK_SIZE
        )));
    }
    if B::KEY_SIZE == 0 || B::KEY_SIZE % B::BLOCK_SIZE != 0 {
        return Err(Error::InvalidParameters(format!(
            "key size {} is not a whole number of {}-byte blocks",
            B::KEY_SIZE,
            B::BLOCK_SIZE
        )));
    }
    if B::MAX_BLOCKS_PER_REQUEST < B::KEY_SIZE / B::BLOCK_SIZE {
        return Err(Error::InvalidParameters(format!(
            "block budget {} cannot cover a {}-byte key",
            B::MAX_BLOCKS_PER_REQUEST,
            B::KEY_SIZE
        )));
    }
    if B::MAX_BLOCKS_PER_REQUEST.checked_mul(B::BLOCK_SIZE).is_none() {
        return Err(Error::InvalidParameters(
            "block budget overflows the request size".into(),
        ));
    }
    Ok(())
}

impl<B, H> fmt::Debug for Generator<B, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("key", &"<redacted>")
            .field("counter", &self.counter)
            .finish()
    }
}

impl<B, H> Drop for Generator<B, H> {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl<B: BlockSource, H: KeyHash> TryRngCore for Generator<B, H> {
    type Error = Error;

    fn try_next_u32(&mut self) -> Result<u32, Error> {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn try_next_u64(&mut self) -> Result<u64, Error> {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dst)
    }
}

impl<B: BlockSource, H: KeyHash> TryCryptoRng for Generator<B, H> {}
