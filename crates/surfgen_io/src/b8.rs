//! Packed binary shot data in the stim `.b8` format.
//!
//! One shot occupies `ceil(bits_per_shot / 8)` bytes, bits packed
//! little-endian within each byte. For a memory experiment the shot
//! layout is the syndrome block, `num_rounds * num_anc` bits in
//! (round, ancilla) order, followed by `num_data` final data bits.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{ensure, Context, Result};
use bitvec::prelude::*;

/// Bit layout of a single memory-experiment shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotShape {
    pub num_rounds: usize,
    pub num_anc: usize,
    pub num_data: usize,
}

impl ShotShape {
    pub fn bits_per_shot(&self) -> usize {
        self.num_rounds * self.num_anc + self.num_data
    }

    /// The syndrome bit of `anc` in `round`.
    pub fn syndrome(&self, shot: &[bool], round: usize, anc: usize) -> Result<bool> {
        ensure!(shot.len() == self.bits_per_shot(), "shot length mismatch");
        ensure!(round < self.num_rounds, "round {round} out of range");
        ensure!(anc < self.num_anc, "ancilla {anc} out of range");
        Ok(shot[round * self.num_anc + anc])
    }

    /// The final measurement bit of data qubit `qubit`.
    pub fn data_outcome(&self, shot: &[bool], qubit: usize) -> Result<bool> {
        ensure!(shot.len() == self.bits_per_shot(), "shot length mismatch");
        ensure!(qubit < self.num_data, "data qubit {qubit} out of range");
        Ok(shot[self.num_rounds * self.num_anc + qubit])
    }
}

/// Load a raw `.b8` file as a bit vector.
pub fn load_b8_file<P: AsRef<Path>>(path: P) -> Result<BitVec<u8, Lsb0>> {
    let mut file = File::open(&path)
        .with_context(|| format!("failed to open .b8 file {}", path.as_ref().display()))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(BitVec::<u8, Lsb0>::from_vec(buffer))
}

/// Split raw bits into per-shot boolean vectors. Each shot is padded to
/// a whole number of bytes in the file; the padding is discarded.
pub fn slice_shots(raw_bits: &BitVec<u8, Lsb0>, bits_per_shot: usize) -> Vec<Vec<bool>> {
    let stride_bits = bits_per_shot.div_ceil(8) * 8;
    let num_shots = raw_bits.len() / stride_bits;

    let mut shots = Vec::with_capacity(num_shots);
    for i in 0..num_shots {
        let start = i * stride_bits;
        let slice = &raw_bits[start..start + bits_per_shot];
        shots.push(slice.iter().map(|b| *b).collect());
    }
    shots
}

/// Pack shots into `.b8` bytes. Every shot must have the same length,
/// which is padded up to a whole number of bytes.
pub fn pack_shots(shots: &[Vec<bool>], bits_per_shot: usize) -> Result<Vec<u8>> {
    let stride_bits = bits_per_shot.div_ceil(8) * 8;
    let mut bits = BitVec::<u8, Lsb0>::with_capacity(shots.len() * stride_bits);
    for shot in shots {
        ensure!(
            shot.len() == bits_per_shot,
            "shot has {} bits, expected {bits_per_shot}",
            shot.len()
        );
        for &bit in shot {
            bits.push(bit);
        }
        for _ in bits_per_shot..stride_bits {
            bits.push(false);
        }
    }
    Ok(bits.into_vec())
}

/// Pack and write shots to a `.b8` file.
pub fn write_b8_file<P: AsRef<Path>>(
    path: P,
    shots: &[Vec<bool>],
    bits_per_shot: usize,
) -> Result<()> {
    let bytes = pack_shots(shots, bits_per_shot)?;
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create .b8 file {}", path.as_ref().display()))?;
    file.write_all(&bytes)?;
    Ok(())
}
