//! Keccak-p[1600, 24] permutation and the byte-oriented sponge built on it.
//!
//! The sponge is a two-phase state machine: it absorbs input until the first
//! output request, then pads, switches to squeezing and never absorbs again.
//! The phase is an explicit enum so that the absorb buffer only exists while
//! absorbing and the output buffer only exists while squeezing.

use tessera_core::{Error, Result};
use zeroize::Zeroize;

/// Number of 64-bit lanes in the state (5 x 5).
pub(crate) const STATE_LANES: usize = 25;

/// Number of rounds of Keccak-f[1600].
const ROUNDS: usize = 24;

/// Largest rate used by any instance (SHAKE128).
pub(crate) const MAX_RATE: usize = 168;

/// Output bit of the round-constant LFSR, rc(t) over GF(2) with
/// feedback polynomial x^8 + x^6 + x^5 + x^4 + 1.
const fn rc_bit(t: usize) -> u64 {
    let t = t % 255;
    let mut r: u16 = 1;
    let mut i = 0;
    while i < t {
        r <<= 1;
        if r & 0x100 != 0 {
            r ^= 0x171;
        }
        i += 1;
    }
    (r & 1) as u64
}

const fn round_constants() -> [u64; ROUNDS] {
    let mut rc = [0u64; ROUNDS];
    let mut round = 0;
    while round < ROUNDS {
        let mut j = 0;
        while j <= 6 {
            rc[round] |= rc_bit(j + 7 * round) << ((1 << j) - 1);
            j += 1;
        }
        round += 1;
    }
    rc
}

/// Round constants for the ι step, generated at compile time.
const RC: [u64; ROUNDS] = round_constants();

/// Rotation offsets for the ρ step, in π traversal order.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane indices visited by the π step.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Keccak-f[1600]: 24 rounds of θ, ρ, π, χ, ι over lanes indexed `x + 5y`.
pub(crate) fn keccak_f1600(state: &mut [u64; STATE_LANES]) {
    for &rc in RC.iter() {
        // θ
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }

        // ρ and π
        let mut carry = state[1];
        for (&lane, &offset) in PI.iter().zip(RHO.iter()) {
            let next = state[lane];
            state[lane] = carry.rotate_left(offset);
            carry = next;
        }

        // χ
        for y in 0..5 {
            let row = [
                state[5 * y],
                state[5 * y + 1],
                state[5 * y + 2],
                state[5 * y + 3],
                state[5 * y + 4],
            ];
            for x in 0..5 {
                state[x + 5 * y] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // ι
        state[0] ^= rc;
    }
}

/// XOR a block of bytes into the leading lanes, little-endian.
fn xor_block(state: &mut [u64; STATE_LANES], block: &[u8]) {
    for (lane, chunk) in state.iter_mut().zip(block.chunks(8)) {
        let mut bytes = [0u8; 8];
        bytes[..chunk.len()].copy_from_slice(chunk);
        *lane ^= u64::from_le_bytes(bytes);
    }
}

/// Copy the leading `out.len()` bytes of the state, little-endian.
fn extract_block(state: &[u64; STATE_LANES], out: &mut [u8]) {
    for (lane, chunk) in state.iter().zip(out.chunks_mut(8)) {
        chunk.copy_from_slice(&lane.to_le_bytes()[..chunk.len()]);
    }
}

/// Domain separation suffix appended before the 10*1 pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Domain {
    /// SHA3-* fixed-output hashes (`01` suffix).
    Hash,
    /// SHAKE* extendable-output functions (`1111` suffix).
    Xof,
}

impl Domain {
    const fn suffix(self) -> u8 {
        match self {
            Domain::Hash => 0x06,
            Domain::Xof => 0x1F,
        }
    }
}

#[derive(Clone)]
enum Phase {
    Absorbing {
        buffer: [u8; MAX_RATE],
        filled: usize,
    },
    Squeezing {
        block: [u8; MAX_RATE],
        offset: usize,
    },
}

/// A Keccak sponge with a fixed rate and domain.
#[derive(Clone)]
pub(crate) struct Sponge {
    state: [u64; STATE_LANES],
    rate: usize,
    domain: Domain,
    phase: Phase,
}

impl Sponge {
    /// Create an empty sponge in the absorbing phase.
    pub(crate) const fn new(rate: usize, domain: Domain) -> Self {
        debug_assert!(rate > 0 && rate <= MAX_RATE && rate % 8 == 0);
        Self {
            state: [0u64; STATE_LANES],
            rate,
            domain,
            phase: Phase::Absorbing {
                buffer: [0u8; MAX_RATE],
                filled: 0,
            },
        }
    }

    /// Create a sponge and absorb `parts` in order.
    ///
    /// A fresh sponge is always absorbing, so this cannot fail.
    pub(crate) fn with_inputs(rate: usize, domain: Domain, parts: &[&[u8]]) -> Self {
        let mut sponge = Self::new(rate, domain);
        if let Phase::Absorbing { buffer, filled } = &mut sponge.phase {
            for part in parts {
                absorb_into(&mut sponge.state, buffer, filled, rate, part);
            }
        }
        sponge
    }

    /// Whether the sponge has switched to squeezing.
    pub(crate) fn is_squeezing(&self) -> bool {
        matches!(self.phase, Phase::Squeezing { .. })
    }

    /// Absorb more input.
    ///
    /// # Errors
    /// [`Error::AbsorbAfterSqueeze`] once any output has been requested.
    pub(crate) fn absorb(&mut self, data: &[u8]) -> Result<()> {
        let rate = self.rate;
        match &mut self.phase {
            Phase::Absorbing { buffer, filled } => {
                absorb_into(&mut self.state, buffer, filled, rate, data);
                Ok(())
            }
            Phase::Squeezing { .. } => Err(Error::AbsorbAfterSqueeze),
        }
    }

    /// Pad the pending input and switch to squeezing. No-op when already squeezing.
    ///
    /// The first pad byte carries the domain suffix and the last carries 0x80.
    /// When only one byte is left in the block both land in it, giving 0x86
    /// for hashes and 0x9F for XOFs.
    fn finalize(&mut self) {
        let rate = self.rate;
        let suffix = self.domain.suffix();
        match &mut self.phase {
            Phase::Absorbing { buffer, filled } => {
                buffer[*filled..rate].fill(0);
                buffer[*filled] ^= suffix;
                buffer[rate - 1] ^= 0x80;
                xor_block(&mut self.state, &buffer[..rate]);
                keccak_f1600(&mut self.state);
                buffer.zeroize();
            }
            Phase::Squeezing { .. } => return,
        }
        self.phase = Phase::Squeezing {
            block: [0u8; MAX_RATE],
            offset: rate,
        };
    }

    /// Fill `out` with the next output bytes.
    ///
    /// Leftover bytes of the current output block are drained first; each
    /// further block is read from the state before the state is permuted.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
        self.finalize();
        let rate = self.rate;
        if let Phase::Squeezing { block, offset } = &mut self.phase {
            let mut written = 0;
            while written < out.len() {
                if *offset == rate {
                    extract_block(&self.state, &mut block[..rate]);
                    keccak_f1600(&mut self.state);
                    *offset = 0;
                }
                let take = (rate - *offset).min(out.len() - written);
                out[written..written + take].copy_from_slice(&block[*offset..*offset + take]);
                *offset += take;
                written += take;
            }
        }
    }
}

/// Buffer `data` and permute every time a full rate block is collected.
fn absorb_into(
    state: &mut [u64; STATE_LANES],
    buffer: &mut [u8; MAX_RATE],
    filled: &mut usize,
    rate: usize,
    mut data: &[u8],
) {
    while !data.is_empty() {
        let take = (rate - *filled).min(data.len());
        buffer[*filled..*filled + take].copy_from_slice(&data[..take]);
        *filled += take;
        data = &data[take..];
        if *filled == rate {
            xor_block(state, &buffer[..rate]);
            keccak_f1600(state);
            *filled = 0;
        }
    }
}

impl Drop for Sponge {
    fn drop(&mut self) {
        self.state.zeroize();
        match &mut self.phase {
            Phase::Absorbing { buffer, filled } => {
                buffer.zeroize();
                filled.zeroize();
            }
            Phase::Squeezing { block, offset } => {
                block.zeroize();
                offset.zeroize();
            }
        }
    }
}
