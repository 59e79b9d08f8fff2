//! Static lookup-table decoders from syndromes to corrections.
//!
//! A table maps every syndrome of a fixed width to a [`Correction`]: nothing,
//! a single Pauli on one data qubit (the Pauli type is chosen by the caller),
//! or an explicit Pauli string. The all-zero syndrome conventionally maps to
//! [`Correction::None`].
//!
//! [`LookupTable::decoder`] builds a table from a code by computing the
//! syndrome of every single-qubit error and requiring all of them to be
//! distinct.

use std::fmt;
use log::debug;
use rustc_hash::FxHashMap as HashMap;
use crate::{
    FTError,
    FTResult,
    pauli::{ Pauli, PauliString },
    syndrome::BitString,
    tableau::{ FaultTableau, syndrome_matrix },
};

/// A correction to apply to the data qubits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Correction {
    /// No correction.
    None,
    /// A single Pauli on this data qubit.
    Qubit(usize),
    /// An explicit correction on all data qubits.
    Pauli(PauliString),
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Qubit(k) => write!(f, "{}", k),
            Self::Pauli(p) => p.fmt(f),
        }
    }
}

impl Correction {
    /// Expand into a Pauli string on `num_data` qubits, using `basis` for
    /// single-qubit corrections.
    pub fn to_pauli_string(&self, num_data: usize, basis: Pauli)
        -> FTResult<PauliString>
    {
        match self {
            Self::None => Ok(PauliString::identity(num_data)),
            Self::Qubit(k) if *k >= num_data
                => Err(FTError::QubitOutOfRange(*k, num_data)),
            Self::Qubit(k) => Ok(PauliString::single(num_data, *k, basis)),
            Self::Pauli(p) if p.len() != num_data
                => Err(FTError::LengthMismatch(num_data, p.len())),
            Self::Pauli(p) => Ok(p.clone()),
        }
    }
}

/// A mapping from fixed-width syndromes to corrections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTable {
    width: usize,
    entries: HashMap<BitString, Correction>,
}

impl LookupTable {
    /// Create an empty table for syndromes of `width` bits.
    pub fn new(width: usize) -> Self {
        Self { width, entries: HashMap::default() }
    }

    /// Build a table from `(syndrome, correction)` pairs, with syndromes
    /// written as `0`/`1` strings.
    pub fn from_entries<'a, I>(width: usize, entries: I) -> FTResult<Self>
    where I: IntoIterator<Item = (&'a str, Correction)>
    {
        let mut table = Self::new(width);
        for (syndrome, correction) in entries {
            table.insert(syndrome.parse()?, correction)?;
        }
        Ok(table)
    }

    /// Insert an entry, returning the correction it replaces, if any.
    pub fn insert(&mut self, syndrome: BitString, correction: Correction)
        -> FTResult<Option<Correction>>
    {
        if syndrome.len() != self.width {
            return Err(FTError::LengthMismatch(self.width, syndrome.len()));
        }
        Ok(self.entries.insert(syndrome, correction))
    }

    /// Return the syndrome width.
    pub fn width(&self) -> usize { self.width }

    /// Return the number of entries.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Return `true` if the table has no entries.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Return `true` if every syndrome of the table's width has an entry.
    pub fn is_complete(&self) -> bool {
        self.width < usize::BITS as usize && self.entries.len() == 1 << self.width
    }

    /// Return the correction for `syndrome`, if there is one.
    pub fn get(&self, syndrome: &BitString) -> Option<&Correction> {
        self.entries.get(syndrome)
    }

    /// Return the correction for `syndrome`, failing if the table has no
    /// entry for it.
    pub fn lookup(&self, syndrome: &BitString) -> FTResult<&Correction> {
        self.entries.get(syndrome)
            .ok_or_else(|| FTError::UnknownSyndrome(syndrome.to_string()))
    }

    /// Return the correction for `syndrome` as a Pauli string on `num_data`
    /// qubits.
    pub fn correction(&self, syndrome: &BitString, num_data: usize, basis: Pauli)
        -> FTResult<PauliString>
    {
        self.lookup(syndrome)?.to_pauli_string(num_data, basis)
    }

    /// Iterate over all entries, sorted by syndrome.
    pub fn iter(&self) -> impl Iterator<Item = (&BitString, &Correction)> + '_ {
        let mut entries: Vec<(&BitString, &Correction)> = self.entries.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries.into_iter()
    }

    /// Derive a decoder for a code from the syndromes of all single-qubit
    /// errors.
    ///
    /// Errors are taken in the order *Z* on each qubit, then *X*, then *Y*;
    /// each syndrome has one bit per stabilizer, in the given order. The
    /// all-zero syndrome maps to [`Correction::None`]. Fails if two errors
    /// share a syndrome or any error has the trivial syndrome.
    pub fn decoder(code: &[PauliString]) -> FTResult<Self> {
        let n = code.first().ok_or(FTError::Empty("code"))?.len();
        let stabs = FaultTableau::from_strings(n, code)?;
        let errors: Vec<PauliString>
            = [Pauli::Z, Pauli::X, Pauli::Y].into_iter()
            .flat_map(|p| (0..n).map(move |k| PauliString::single(n, k, p)))
            .collect();
        let errs = FaultTableau::from_strings(n, &errors)?;
        let syndromes = syndrome_matrix(errs.as_matrix(), stabs.as_matrix());

        let mut table = Self::new(code.len());
        let zero = BitString::zeros(code.len());
        table.insert(zero.clone(), Correction::None)?;
        let mut owner: HashMap<BitString, &PauliString> = HashMap::default();
        for (i, error) in errors.iter().enumerate() {
            let syndrome: BitString
                = syndromes.row(i).iter().map(|b| *b != 0).collect();
            if syndrome == zero {
                return Err(FTError::DegenerateSyndrome(
                    syndrome.to_string(), "identity".to_string(), error.to_string()));
            }
            if let Some(prev) = owner.insert(syndrome.clone(), error) {
                return Err(FTError::DegenerateSyndrome(
                    syndrome.to_string(), prev.to_string(), error.to_string()));
            }
            table.insert(syndrome, Correction::Pauli(error.clone()))?;
        }
        debug!("derived decoder with {} entries for a {}-qubit code", table.len(), n);
        Ok(table)
    }
}

impl fmt::Display for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.entries.len();
        for (k, (syndrome, correction)) in self.iter().enumerate() {
            write!(f, "{}: {}", syndrome, correction)?;
            if k < n - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ps(s: &str) -> PauliString { s.parse().unwrap() }

    fn bs(s: &str) -> BitString { s.parse().unwrap() }

    #[test]
    fn index_table() {
        let lut = LookupTable::from_entries(
            3,
            [
                ("000", Correction::None),
                ("100", Correction::Qubit(3)),
                ("010", Correction::Qubit(1)),
                ("001", Correction::Qubit(0)),
            ],
        ).unwrap();
        assert_eq!(lut.len(), 4);
        assert!(!lut.is_complete());
        assert_eq!(lut.correction(&bs("100"), 7, Pauli::X).unwrap(), ps("---X---"));
        assert_eq!(lut.correction(&bs("000"), 7, Pauli::X).unwrap(), ps("-------"));
        assert!(matches!(
            lut.correction(&bs("111"), 7, Pauli::X),
            Err(FTError::UnknownSyndrome(s)) if s == "111",
        ));
        assert!(lut.correction(&bs("100"), 3, Pauli::X).is_err());
        assert!(LookupTable::new(3).insert(bs("10"), Correction::None).is_err());
    }

    #[test]
    fn steane_decoder() {
        let code: Vec<PauliString>
            = ["---ZZZZ", "ZZ--ZZ-", "Z-Z-Z-Z", "---XXXX", "XX--XX-", "X-X-X-X"]
            .iter().map(|s| ps(s)).collect();
        let lut = LookupTable::decoder(&code).unwrap();
        assert_eq!(lut.width(), 6);
        assert_eq!(lut.len(), 22);
        // X on qubit 0 anticommutes with the Z checks containing qubit 0
        assert_eq!(lut.get(&bs("011000")), Some(&Correction::Pauli(ps("X------"))));
        assert_eq!(lut.get(&bs("000011")), Some(&Correction::Pauli(ps("Z------"))));
        assert_eq!(lut.get(&bs("011011")), Some(&Correction::Pauli(ps("Y------"))));
        assert_eq!(lut.get(&bs("000000")), Some(&Correction::None));
        for (syndrome, correction) in lut.iter() {
            if let Correction::Pauli(p) = correction {
                let expected: BitString = p.syndrome_of(&code).into();
                assert_eq!(&expected, syndrome);
            }
        }
    }

    #[test]
    fn degenerate_decoder() {
        let code = vec![ps("ZZ-"), ps("-ZZ")];
        assert!(matches!(
            LookupTable::decoder(&code),
            Err(FTError::DegenerateSyndrome(..)),
        ));
        assert!(matches!(LookupTable::decoder(&[]), Err(FTError::Empty(_))));
    }

    #[test]
    fn display() {
        let lut = LookupTable::from_entries(
            1, [("1", Correction::Qubit(2)), ("0", Correction::None)]).unwrap();
        assert_eq!(lut.to_string(), "0: none\n1: 2");
    }
}
