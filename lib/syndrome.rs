//! Ancilla measurement, syndrome bits, and flags.
//!
//! Gadget registers are laid out with data qubits first, followed by ancillas.
//! At the end of a stage every ancilla is measured and reset; an ancilla
//! carrying any non-identity error is taken to produce a non-trivial outcome
//! (bit 1). Within each stage's outcome string, one designated position holds
//! that stage's syndrome bit and every other position is a flag.

use std::{ fmt, str::FromStr };
use crate::{ FTError, FTResult, pauli::PauliString };

/// An ordered string of classical bits.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitString(Vec<bool>);

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{}", if *b { '1' } else { '0' }))
    }
}

impl FromStr for BitString {
    type Err = FTError;

    fn from_str(s: &str) -> FTResult<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(FTError::InvalidBit(c)),
            })
            .collect::<FTResult<Vec<bool>>>()
            .map(Self)
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self { Self(bits) }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = bool>
    {
        Self(iter.into_iter().collect())
    }
}

impl BitString {
    /// Create an all-zero string of length `n`.
    pub fn zeros(n: usize) -> Self { Self(vec![false; n]) }

    /// Return the number of bits.
    pub fn len(&self) -> usize { self.0.len() }

    /// Return `true` if there are no bits.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Return the `k`-th bit, if it exists.
    pub fn get(&self, k: usize) -> Option<bool> { self.0.get(k).copied() }

    /// Return all bits.
    pub fn bits(&self) -> &[bool] { &self.0 }

    /// Iterate over bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Return `true` if any bit is set.
    pub fn any(&self) -> bool { self.0.iter().any(|b| *b) }

    /// Join two strings end to end.
    pub fn concat(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).collect()
    }

    /// Pack into an integer with the first bit most significant.
    pub fn key(&self) -> FTResult<u64> { bit_key(self.iter()) }
}

/// Pack bits into an integer key `Σ b_i 2^(n - 1 - i)`, so that the first bit
/// is the most significant.
///
/// Fails if there are more than 64 bits.
pub fn bit_key<I>(bits: I) -> FTResult<u64>
where I: IntoIterator<Item = bool>
{
    let mut key: u64 = 0;
    let mut n: usize = 0;
    for b in bits {
        n += 1;
        if n > 64 { return Err(FTError::KeyTooWide(n)); }
        key = (key << 1) | u64::from(b);
    }
    Ok(key)
}

/// Measure and reset the ancillas of `error`, which are all qubits at index
/// `num_data` and above.
///
/// Returns one outcome bit per ancilla (set when the ancilla carries any
/// non-identity error) and `error` with every ancilla reset to the identity.
///
/// *Panics if `num_data > error.len()`.*
pub fn reset_ancillas(error: &PauliString, num_data: usize)
    -> (BitString, PauliString)
{
    assert!(
        num_data <= error.len(),
        "{} data qubits do not fit in {} qubit(s)", num_data, error.len(),
    );
    let outcomes: BitString
        = (num_data..error.len())
        .map(|k| !error.pauli(k).is_identity())
        .collect();
    let mut reset = error.clone();
    reset.clear_from(num_data);
    (outcomes, reset)
}

/// Syndrome bits and the combined flag extracted from a gadget's ancilla
/// outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SyndromeFlags {
    /// One syndrome bit per stage, in stage order.
    pub syndrome: BitString,
    /// `true` if any non-syndrome outcome bit in any stage is set.
    pub flag: bool,
}

/// Split per-stage ancilla outcomes into syndrome bits and a flag.
///
/// `syndrome_positions[s]` is the index within `outcomes[s]` of stage `s`'s
/// syndrome bit.
pub fn extract_syndrome_and_flags(
    outcomes: &[BitString],
    syndrome_positions: &[usize],
) -> FTResult<SyndromeFlags>
{
    if outcomes.len() != syndrome_positions.len() {
        return Err(FTError::LengthMismatch(syndrome_positions.len(), outcomes.len()));
    }
    let mut syndrome: Vec<bool> = Vec::with_capacity(outcomes.len());
    let mut flag = false;
    for (outcome, &pos) in outcomes.iter().zip(syndrome_positions) {
        let bit = outcome.get(pos)
            .ok_or(FTError::QubitOutOfRange(pos, outcome.len()))?;
        syndrome.push(bit);
        flag |= outcome.iter().enumerate().any(|(k, b)| k != pos && b);
    }
    Ok(SyndromeFlags { syndrome: syndrome.into(), flag })
}

#[cfg(test)]
mod test {
    use super::*;

    fn bs(s: &str) -> BitString { s.parse().unwrap() }

    #[test]
    fn bitstring() {
        let b = bs("0110");
        assert_eq!(b.to_string(), "0110");
        assert_eq!(b.key().unwrap(), 6);
        assert!(b.any());
        assert!(!BitString::zeros(3).any());
        assert_eq!(b.concat(&bs("1")), bs("01101"));
        assert!(matches!("012".parse::<BitString>(), Err(FTError::InvalidBit('2'))));
        assert_eq!(bs("").key().unwrap(), 0);
    }

    #[test]
    fn keys() {
        assert_eq!(bit_key([false, false, false, false, true, false, true]).unwrap(), 5);
        assert_eq!(bit_key([true; 64]).unwrap(), u64::MAX);
        assert!(matches!(bit_key([true; 65]), Err(FTError::KeyTooWide(65))));
    }

    #[test]
    fn reset() {
        let e: PauliString = "XZ--Y-X".parse().unwrap();
        let (outcomes, reset) = reset_ancillas(&e, 4);
        assert_eq!(outcomes, bs("101"));
        assert_eq!(reset.to_string(), "XZ-----");
        let (outcomes, reset) = reset_ancillas(&e, 7);
        assert!(outcomes.is_empty());
        assert_eq!(reset, e);
    }

    #[test]
    fn syndrome_and_flags() {
        let outcomes = [bs("1000"), bs("0000"), bs("0001")];
        let sf = extract_syndrome_and_flags(&outcomes, &[0, 1, 3]).unwrap();
        assert_eq!(sf.syndrome, bs("101"));
        assert!(!sf.flag);

        let outcomes = [bs("1000"), bs("0010"), bs("0000")];
        let sf = extract_syndrome_and_flags(&outcomes, &[0, 1, 3]).unwrap();
        assert_eq!(sf.syndrome, bs("100"));
        assert!(sf.flag);

        assert!(extract_syndrome_and_flags(&outcomes, &[0, 1]).is_err());
        assert!(extract_syndrome_and_flags(&outcomes, &[0, 1, 4]).is_err());
    }
}
