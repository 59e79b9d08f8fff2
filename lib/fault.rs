//! Enumeration and placement of single-location faults.
//!
//! A fault is a Pauli operator applied to the qubits of one circuit location
//! immediately after the gate there. Single-qubit locations may suffer any
//! letter of a chosen alphabet (usually `XYZ`); two-qubit locations may suffer
//! any pair of symbols from the alphabet plus the identity, except the pair
//! that is trivial on both qubits.

use std::fmt;
use itertools::iproduct;
use crate::{ FTError, FTResult, pauli::{ Pauli, PauliString } };

/// A Pauli fault on the qubits of a single location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fault(Vec<Pauli>);

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|p| write!(f, "{}", p))
    }
}

impl Fault {
    /// Create a new fault from its per-qubit components.
    pub fn new<I>(paulis: I) -> Self
    where I: IntoIterator<Item = Pauli>
    {
        Self(paulis.into_iter().collect())
    }

    /// Parse a fault from symbols, e.g. `"X-"`.
    pub fn parse(s: &str) -> FTResult<Self> {
        s.chars().map(Pauli::from_symbol).collect::<FTResult<_>>().map(Fault)
    }

    /// Return the number of qubits the fault acts on.
    pub fn arity(&self) -> usize { self.0.len() }

    /// Return the number of non-identity components.
    pub fn weight(&self) -> usize {
        self.0.iter().filter(|p| !p.is_identity()).count()
    }

    /// Return the per-qubit components.
    pub fn paulis(&self) -> &[Pauli] { &self.0 }

    /// Place the fault on an `n`-qubit register at `positions`.
    pub fn place(&self, n: usize, positions: &[usize]) -> FTResult<PauliString> {
        if positions.len() != self.arity() {
            return Err(FTError::FaultArity(self.to_string(), positions.len()));
        }
        let mut s = PauliString::identity(n);
        for (&k, &p) in positions.iter().zip(self.0.iter()) {
            if k >= n { return Err(FTError::QubitOutOfRange(k, n)); }
            s.set(k, p);
        }
        Ok(s)
    }
}

/// All faults to inject at one- and two-qubit locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultSet {
    single: Vec<Fault>,
    double: Vec<Fault>,
}

impl FaultSet {
    /// Enumerate faults over an alphabet of Paulis.
    ///
    /// Single-qubit faults are the alphabet letters in order. Two-qubit
    /// faults are every ordered pair over the identity plus the alphabet,
    /// minus the trivial pair, with the first component varying slowest; if
    /// `weight1_only` is set, they are instead limited to one letter on either
    /// qubit, in the order `(-, P), (P, -)` for each letter `P`.
    ///
    /// Identity letters in `alphabet` are ignored.
    pub fn enumerate(alphabet: &[Pauli], weight1_only: bool) -> Self {
        let letters: Vec<Pauli>
            = alphabet.iter().copied().filter(|p| !p.is_identity()).collect();
        let single: Vec<Fault>
            = letters.iter().map(|p| Fault(vec![*p])).collect();
        let double: Vec<Fault>
            = if weight1_only {
                letters.iter()
                    .flat_map(|p| [Fault(vec![Pauli::I, *p]), Fault(vec![*p, Pauli::I])])
                    .collect()
            } else {
                let with_id: Vec<Pauli>
                    = std::iter::once(Pauli::I).chain(letters.iter().copied())
                    .collect();
                iproduct!(with_id.iter(), with_id.iter())
                    .filter(|(a, b)| !(a.is_identity() && b.is_identity()))
                    .map(|(a, b)| Fault(vec![*a, *b]))
                    .collect()
            };
        Self { single, double }
    }

    /// Return the single-qubit faults.
    pub fn single(&self) -> &[Fault] { &self.single }

    /// Return the two-qubit faults.
    pub fn double(&self) -> &[Fault] { &self.double }

    /// Return the faults for a location acting on `arity` qubits; empty for
    /// anything other than 1 or 2.
    pub fn for_arity(&self, arity: usize) -> &[Fault] {
        match arity {
            1 => self.single.as_slice(),
            2 => self.double.as_slice(),
            _ => &[],
        }
    }

    /// Return the total number of faults.
    pub fn len(&self) -> usize { self.single.len() + self.double.len() }

    /// Return `true` if there are no faults.
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Enumerate faults over an alphabet; see [`FaultSet::enumerate`].
pub fn enumerate_faults(alphabet: &[Pauli], weight1_only: bool) -> FaultSet {
    FaultSet::enumerate(alphabet, weight1_only)
}

/// Place `fault` on an `n`-qubit register at `positions`.
pub fn place(n: usize, positions: &[usize], fault: &Fault) -> FTResult<PauliString> {
    fault.place(n, positions)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pauli::parse_alphabet;

    fn names(faults: &[Fault]) -> Vec<String> {
        faults.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn full_enumeration() {
        let faults = enumerate_faults(&parse_alphabet("XYZ").unwrap(), false);
        assert_eq!(names(faults.single()), vec!["X", "Y", "Z"]);
        assert_eq!(
            names(faults.double()),
            vec![
                "-X", "-Y", "-Z",
                "X-", "XX", "XY", "XZ",
                "Y-", "YX", "YY", "YZ",
                "Z-", "ZX", "ZY", "ZZ",
            ],
        );
        assert_eq!(faults.len(), 18);
    }

    #[test]
    fn single_letter() {
        let faults = enumerate_faults(&[Pauli::Z], false);
        assert_eq!(names(faults.single()), vec!["Z"]);
        assert_eq!(names(faults.double()), vec!["-Z", "Z-", "ZZ"]);
        let faults = enumerate_faults(&[Pauli::I, Pauli::X], false);
        assert_eq!(names(faults.single()), vec!["X"]);
    }

    #[test]
    fn weight1_only() {
        let faults = enumerate_faults(&parse_alphabet("XYZ").unwrap(), true);
        assert_eq!(names(faults.double()), vec!["-X", "X-", "-Y", "Y-", "-Z", "Z-"]);
        assert!(faults.double().iter().all(|f| f.weight() == 1));
        assert!(faults.for_arity(3).is_empty());
    }

    #[test]
    fn placement() {
        let xz = Fault::parse("XZ").unwrap();
        assert_eq!(place(5, &[1, 3], &xz).unwrap().to_string(), "-X-Z-");
        let yx = Fault::parse("YX").unwrap();
        assert_eq!(place(5, &[4, 0], &yx).unwrap().to_string(), "X---Y");
        assert!(matches!(place(5, &[1], &xz), Err(FTError::FaultArity(..))));
        assert!(matches!(place(5, &[1, 5], &xz), Err(FTError::QubitOutOfRange(5, 5))));
    }
}
