use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::generator::KeyHash;

/// SHA-256d: SHA-256 applied twice. Produces a 32-byte generator key.
pub struct ShaD256;

impl KeyHash for ShaD256 {
    fn digest(parts: &[&[u8]]) -> Zeroizing<Vec<u8>> {
        let mut inner = Sha256::new();
        for part in parts {
            inner.update(part);
        }
        let mut first = inner.finalize();
        let second = Sha256::digest(first.as_slice());
        first.as_mut_slice().zeroize();
        Zeroizing::new(second.to_vec())
    }
}
