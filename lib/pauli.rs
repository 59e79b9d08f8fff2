//! Phase-free Pauli operators on one or many qubits.
//!
//! Since overall phases never matter for fault tracking, a single-qubit Pauli
//! is fully described by two bits (*z*, *x*):
//!
//! | Pauli | *z* | *x* | symbol |
//! |:-----:|:---:|:---:|:------:|
//! | *I*   | 0   | 0   | `-`    |
//! | *X*   | 0   | 1   | `X`    |
//! | *Y*   | 1   | 1   | `Y`    |
//! | *Z*   | 1   | 0   | `Z`    |
//!
//! and composition of two operators is the bitwise XOR of their bits. An
//! *N*-qubit [`PauliString`] stores its *z* and *x* parts as bit arrays packed
//! into `u32`s, so that weights and commutation relations reduce to a handful
//! of word-level operations.
//!
//! Pauli strings read and write as one symbol per qubit, e.g. `"ZZ--ZZ-"`,
//! with qubit 0 leftmost. `I` is accepted in place of `-` when parsing.

use std::{
    fmt,
    ops::{ Mul, MulAssign },
    str::FromStr,
};
use crate::{ FTError, FTResult, gate::Symplectic };

pub(crate) const PW: [u32; 32] = [ // PW[i] = 2^i
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
    65536, 131072, 262144, 524288, 1048576, 2097152, 4194304, 8388608, 16777216,
    33554432, 67108864, 134217728, 268435456, 536870912, 1073741824, 2147483648
];

/// A single-qubit Pauli operator, up to phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Pauli {
    /// Parse a single symbol.
    pub fn from_symbol(c: char) -> FTResult<Self> {
        match c {
            '-' | 'I' => Ok(Self::I),
            'X' => Ok(Self::X),
            'Y' => Ok(Self::Y),
            'Z' => Ok(Self::Z),
            _ => Err(FTError::InvalidSymbol(c)),
        }
    }

    /// Return the symbol for `self`; the identity is written `-`.
    pub fn symbol(self) -> char {
        match self {
            Self::I => '-',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    /// Build from a (*z*, *x*) bit pair.
    pub fn from_bits(z: bool, x: bool) -> Self {
        match (z, x) {
            (false, false) => Self::I,
            (false, true) => Self::X,
            (true, true) => Self::Y,
            (true, false) => Self::Z,
        }
    }

    /// Return the (*z*, *x*) bit pair for `self`.
    pub fn bits(self) -> (bool, bool) {
        match self {
            Self::I => (false, false),
            Self::X => (false, true),
            Self::Y => (true, true),
            Self::Z => (true, false),
        }
    }

    /// Return `true` if `self` is `I`.
    pub fn is_identity(self) -> bool { matches!(self, Self::I) }

    /// Compose with another operator, discarding the phase.
    pub fn compose(self, other: Self) -> Self {
        let (za, xa) = self.bits();
        let (zb, xb) = other.bits();
        Self::from_bits(za ^ zb, xa ^ xb)
    }

    /// Return `true` if `self` and `other` commute.
    pub fn commutes_with(self, other: Self) -> bool {
        let (za, xa) = self.bits();
        let (zb, xb) = other.bits();
        !((za & xb) ^ (xa & zb))
    }

    /// Drop the *z* component, leaving only the *X*-type part.
    pub fn x_part(self) -> Self { Self::from_bits(false, self.bits().1) }

    /// Drop the *x* component, leaving only the *Z*-type part.
    pub fn z_part(self) -> Self { Self::from_bits(self.bits().0, false) }
}

impl Mul for Pauli {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self { self.compose(rhs) }
}

/// Parse a fault alphabet like `"XYZ"` into a list of Paulis.
pub fn parse_alphabet(alphabet: &str) -> FTResult<Vec<Pauli>> {
    alphabet.chars().map(Pauli::from_symbol).collect()
}

/// A phase-free tensor product of single-qubit Paulis.
///
/// Equality, ordering, and hashing are by value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PauliString {
    n: usize,
    // z and x bits for each qubit, packed into u32s; bits above `n` are kept
    // zero
    z: Vec<u32>,
    x: Vec<u32>,
}

impl PauliString {
    /// Create the identity on `n` qubits.
    pub fn identity(n: usize) -> Self {
        let over32: usize = (n >> 5) + 1;
        Self { n, z: vec![0; over32], x: vec![0; over32] }
    }

    /// Create a string with a single Pauli `p` on qubit `k` of `n`.
    ///
    /// *Panics if `k` is out of bounds.*
    pub fn single(n: usize, k: usize, p: Pauli) -> Self {
        let mut s = Self::identity(n);
        s.set(k, p);
        s
    }

    /// Collect a string from a sequence of single-qubit operators.
    pub fn from_paulis<I>(paulis: I) -> Self
    where I: IntoIterator<Item = Pauli>
    {
        let paulis: Vec<Pauli> = paulis.into_iter().collect();
        let mut s = Self::identity(paulis.len());
        paulis.into_iter().enumerate()
            .for_each(|(k, p)| { s.set(k, p); });
        s
    }

    /// Build from a binary vector of the form `[z | x]`.
    pub fn from_bits(bits: &[u8]) -> FTResult<Self> {
        if bits.len() % 2 != 0 {
            return Err(FTError::OddBinaryLength(bits.len()));
        }
        let n = bits.len() / 2;
        let mut s = Self::identity(n);
        for k in 0..n {
            let z = binary(bits[k])?;
            let x = binary(bits[n + k])?;
            s.set(k, Pauli::from_bits(z, x));
        }
        Ok(s)
    }

    /// Convert to a binary vector of the form `[z | x]`.
    pub fn to_bits(&self) -> Vec<u8> {
        let zs = (0..self.n).map(|k| self.z_bit(k) as u8);
        let xs = (0..self.n).map(|k| self.x_bit(k) as u8);
        zs.chain(xs).collect()
    }

    /// Return the number of qubits.
    pub fn len(&self) -> usize { self.n }

    /// Return `true` if `self` acts on zero qubits.
    pub fn is_empty(&self) -> bool { self.n == 0 }

    /// Return the Pauli on qubit `k`, if it exists.
    pub fn get(&self, k: usize) -> Option<Pauli> {
        (k < self.n).then(|| self.pauli(k))
    }

    /// Return the Pauli on qubit `k`.
    ///
    /// *Panics if `k` is out of bounds.*
    pub fn pauli(&self, k: usize) -> Pauli {
        assert!(k < self.n, "qubit {} out of bounds for {} qubit(s)", k, self.n);
        Pauli::from_bits(self.z_bit(k), self.x_bit(k))
    }

    /// Set the Pauli on qubit `k`.
    ///
    /// *Panics if `k` is out of bounds.*
    pub fn set(&mut self, k: usize, p: Pauli) -> &mut Self {
        assert!(k < self.n, "qubit {} out of bounds for {} qubit(s)", k, self.n);
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        let (z, x) = p.bits();
        if z { self.z[k5] |= pw; } else { self.z[k5] &= !pw; }
        if x { self.x[k5] |= pw; } else { self.x[k5] &= !pw; }
        self
    }

    pub(crate) fn z_bit(&self, k: usize) -> bool {
        self.z[k >> 5] & PW[k & 31] != 0
    }

    pub(crate) fn x_bit(&self, k: usize) -> bool {
        self.x[k >> 5] & PW[k & 31] != 0
    }

    /// Iterate over single-qubit Paulis from qubit 0 upward.
    pub fn iter(&self) -> impl Iterator<Item = Pauli> + '_ {
        (0..self.n).map(|k| self.pauli(k))
    }

    /// Iterate over the indices of qubits acted on non-trivially.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(|k| self.z_bit(*k) || self.x_bit(*k))
    }

    /// Return the number of non-identity positions.
    pub fn weight(&self) -> usize {
        self.z.iter().zip(&self.x)
            .map(|(z, x)| (z | x).count_ones() as usize)
            .sum()
    }

    /// Return `true` if every position is the identity.
    pub fn is_identity(&self) -> bool {
        self.z.iter().chain(&self.x).all(|w| *w == 0)
    }

    /// Compose with another string position-wise, discarding the phase.
    ///
    /// *Panics if the two strings have different lengths.*
    pub fn compose(&self, other: &Self) -> Self {
        assert_eq!(
            self.n, other.n,
            "cannot compose Pauli strings of lengths {} and {}", self.n, other.n,
        );
        let z = self.z.iter().zip(&other.z).map(|(a, b)| a ^ b).collect();
        let x = self.x.iter().zip(&other.x).map(|(a, b)| a ^ b).collect();
        Self { n: self.n, z, x }
    }

    /// Like [`compose`][Self::compose], but returns an error on a length
    /// mismatch.
    pub fn try_compose(&self, other: &Self) -> FTResult<Self> {
        if self.n != other.n {
            return Err(FTError::LengthMismatch(self.n, other.n));
        }
        Ok(self.compose(other))
    }

    /// Return `true` if `self` commutes with `other`, i.e. the two
    /// anticommute on an even number of positions.
    ///
    /// *Panics if the two strings have different lengths.*
    pub fn commutes_with(&self, other: &Self) -> bool {
        assert_eq!(
            self.n, other.n,
            "cannot compare Pauli strings of lengths {} and {}", self.n, other.n,
        );
        let anti: u32
            = self.z.iter().zip(&self.x).zip(other.z.iter().zip(&other.x))
            .map(|((za, xa), (zb, xb))| ((za & xb) ^ (xa & zb)).count_ones())
            .sum();
        anti % 2 == 0
    }

    /// Return the syndrome of `self` against a list of stabilizers: one bit
    /// per stabilizer, set when the two anticommute.
    ///
    /// *Panics if any stabilizer has a different length.*
    pub fn syndrome_of(&self, stabilizers: &[PauliString]) -> Vec<bool> {
        stabilizers.iter().map(|s| !self.commutes_with(s)).collect()
    }

    /// Keep only the *X*-type component at every position (`Y` becomes `X`,
    /// `Z` becomes `-`).
    pub fn x_part(&self) -> Self {
        Self { n: self.n, z: vec![0; self.z.len()], x: self.x.clone() }
    }

    /// Keep only the *Z*-type component at every position (`Y` becomes `Z`,
    /// `X` becomes `-`).
    pub fn z_part(&self) -> Self {
        Self { n: self.n, z: self.z.clone(), x: vec![0; self.x.len()] }
    }

    /// Split into the first `k` qubits and the rest.
    ///
    /// *Panics if `k > self.len()`.*
    pub fn split_at(&self, k: usize) -> (Self, Self) {
        assert!(k <= self.n, "split point {} out of bounds for {} qubit(s)", k, self.n);
        let head = Self::from_paulis((0..k).map(|j| self.pauli(j)));
        let tail = Self::from_paulis((k..self.n).map(|j| self.pauli(j)));
        (head, tail)
    }

    /// Join two strings end to end.
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_paulis(self.iter().chain(other.iter()))
    }

    /// Set every qubit at index `k` and above to the identity.
    pub fn clear_from(&mut self, k: usize) -> &mut Self {
        (k..self.n).for_each(|j| { self.set(j, Pauli::I); });
        self
    }
}

fn binary(b: u8) -> FTResult<bool> {
    match b {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(FTError::NonBinary(b)),
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|p| write!(f, "{}", p))
    }
}

impl FromStr for PauliString {
    type Err = FTError;

    fn from_str(s: &str) -> FTResult<Self> {
        let paulis: Vec<Pauli>
            = s.chars().map(Pauli::from_symbol).collect::<FTResult<_>>()?;
        Ok(Self::from_paulis(paulis))
    }
}

impl FromIterator<Pauli> for PauliString {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Pauli>
    {
        Self::from_paulis(iter)
    }
}

impl Mul for &PauliString {
    type Output = PauliString;

    fn mul(self, rhs: Self) -> PauliString { self.compose(rhs) }
}

impl Mul for PauliString {
    type Output = PauliString;

    fn mul(self, rhs: Self) -> PauliString { self.compose(&rhs) }
}

impl MulAssign<&PauliString> for PauliString {
    fn mul_assign(&mut self, rhs: &PauliString) {
        assert_eq!(
            self.n, rhs.n,
            "cannot compose Pauli strings of lengths {} and {}", self.n, rhs.n,
        );
        self.z.iter_mut().zip(&rhs.z).for_each(|(a, b)| { *a ^= b; });
        self.x.iter_mut().zip(&rhs.x).for_each(|(a, b)| { *a ^= b; });
    }
}

impl Symplectic for PauliString {
    fn num_qubits(&self) -> usize { self.n }

    fn swap_zx(&mut self, k: usize) {
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        let tmp: u32 = self.z[k5];
        self.z[k5] ^= (self.z[k5] ^ self.x[k5]) & pw;
        self.x[k5] ^= (self.x[k5] ^ tmp) & pw;
    }

    fn add_z(&mut self, dst: usize, src: usize) {
        if self.z_bit(src) { self.z[dst >> 5] ^= PW[dst & 31]; }
    }

    fn add_x(&mut self, dst: usize, src: usize) {
        if self.x_bit(src) { self.x[dst >> 5] ^= PW[dst & 31]; }
    }

    fn add_x_to_z(&mut self, dst: usize, src: usize) {
        if self.x_bit(src) { self.z[dst >> 5] ^= PW[dst & 31]; }
    }
}
