//! Batched binary-tableau representation of many Pauli operators at once.
//!
//! A tableau on *n* qubits is a binary matrix with one row per operator and
//! 2*n* columns: the (*i*, *j*)-th entry is the *z* bit of qubit *j* of the
//! *i*-th operator, and the (*i*, *n* + *j*)-th entry is its *x* bit. Clifford
//! conjugation acts on whole columns at a time (see [`Symplectic`]), so a
//! single pass over a circuit propagates every row simultaneously.
//!
//! Entries are kept as `u8`s and updated with ordinary addition modulo 2;
//! reading rows back out as [`PauliString`]s checks that every entry is still
//! 0 or 1.
//!
//! The syndrome of a stack of errors against a stack of stabilizers is the
//! matrix product of the errors with the *twisted* stabilizers (*z* and *x*
//! halves exchanged), reduced modulo 2; see [`syndrome_matrix`].

use std::ops::Range;
use nalgebra as na;
use crate::{
    FTError,
    FTResult,
    fault::Fault,
    gate::{ Gate, Symplectic },
    pauli::PauliString,
};

/// A stack of Pauli operators on a common register, in `[z | x]` form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultTableau {
    n: usize,
    ops: na::DMatrix<u8>, // size rows x 2n
}

impl FaultTableau {
    /// Create a tableau of `rows` identity operators on `n` qubits.
    pub fn zeros(n: usize, rows: usize) -> Self {
        Self { n, ops: na::DMatrix::zeros(rows, 2 * n) }
    }

    /// Stack a sequence of `n`-qubit Pauli strings, one per row.
    pub fn from_strings<'a, I>(n: usize, strings: I) -> FTResult<Self>
    where I: IntoIterator<Item = &'a PauliString>
    {
        let strings: Vec<&PauliString> = strings.into_iter().collect();
        if let Some(bad) = strings.iter().find(|s| s.len() != n) {
            return Err(FTError::LengthMismatch(n, bad.len()));
        }
        let ops = na::DMatrix::from_fn(strings.len(), 2 * n, |i, j| {
            if j < n {
                strings[i].z_bit(j) as u8
            } else {
                strings[i].x_bit(j - n) as u8
            }
        });
        Ok(Self { n, ops })
    }

    /// Build the single-qubit components of `faults` placed at `positions` on
    /// an `n`-qubit register.
    ///
    /// Every fault contributes one row per position, holding its Pauli on that
    /// position alone; rows of the `j`-th fault occupy `j * a .. (j + 1) * a`,
    /// where `a = positions.len()`. Summing a fault's rows (see
    /// [`combine_rows`][Self::combine_rows]) recovers the whole fault.
    pub fn fault_operators(n: usize, positions: &[usize], faults: &[Fault])
        -> FTResult<Self>
    {
        let arity = positions.len();
        if let Some(&k) = positions.iter().find(|k| **k >= n) {
            return Err(FTError::QubitOutOfRange(k, n));
        }
        let mut tab = Self::zeros(n, faults.len() * arity);
        for (j, fault) in faults.iter().enumerate() {
            if fault.arity() != arity {
                return Err(FTError::FaultArity(fault.to_string(), arity));
            }
            for (q, (&k, p)) in positions.iter().zip(fault.paulis()).enumerate() {
                let (z, x) = p.bits();
                tab.ops[(j * arity + q, k)] = z as u8;
                tab.ops[(j * arity + q, n + k)] = x as u8;
            }
        }
        Ok(tab)
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the number of stacked operators.
    pub fn num_rows(&self) -> usize { self.ops.nrows() }

    /// Return the underlying binary matrix.
    pub fn as_matrix(&self) -> &na::DMatrix<u8> { &self.ops }

    /// Fail if any entry is not 0 or 1.
    pub fn check_binary(&self) -> FTResult<()> {
        match self.ops.iter().find(|v| **v > 1) {
            Some(v) => Err(FTError::NonBinary(*v)),
            None => Ok(()),
        }
    }

    /// Read out the `i`-th row.
    ///
    /// *Panics if `i` is out of bounds.*
    pub fn row(&self, i: usize) -> FTResult<PauliString> {
        let bits: Vec<u8> = self.ops.row(i).iter().copied().collect();
        PauliString::from_bits(&bits)
    }

    /// Read out all rows.
    pub fn rows(&self) -> FTResult<Vec<PauliString>> {
        (0..self.num_rows()).map(|i| self.row(i)).collect()
    }

    /// Compose a range of rows into a single operator.
    ///
    /// *Panics if `rows` is out of bounds.*
    pub fn combine_rows(&self, rows: Range<usize>) -> FTResult<PauliString> {
        let mut acc = PauliString::identity(self.n);
        for i in rows {
            acc *= &self.row(i)?;
        }
        Ok(acc)
    }

    /// Apply a Hadamard to qubit `k` of every row.
    pub fn hadamard_update(&mut self, k: usize) -> &mut Self {
        self.swap_zx(k);
        self
    }

    /// Apply a CNOT with control `c` and target `t` to every row.
    pub fn cnot_update(&mut self, c: usize, t: usize) -> &mut Self {
        self.add_z(c, t);
        self.add_x(t, c);
        self
    }

    /// Conjugate every row by a sequence of gates, in order.
    pub fn apply_gates<'a, I>(&mut self, gates: I) -> FTResult<&mut Self>
    where I: IntoIterator<Item = &'a Gate>
    {
        for gate in gates {
            gate.validate(self.n)?;
            gate.conjugate(self);
        }
        Ok(self)
    }

    fn add_col(&mut self, dst: usize, src: usize) {
        for i in 0..self.ops.nrows() {
            self.ops[(i, dst)] = (self.ops[(i, dst)] + self.ops[(i, src)]) % 2;
        }
    }
}

impl Symplectic for FaultTableau {
    fn num_qubits(&self) -> usize { self.n }

    fn swap_zx(&mut self, k: usize) {
        self.ops.swap_columns(k, self.n + k);
    }

    fn add_z(&mut self, dst: usize, src: usize) {
        self.add_col(dst, src);
    }

    fn add_x(&mut self, dst: usize, src: usize) {
        let n = self.n;
        self.add_col(n + dst, n + src);
    }

    fn add_x_to_z(&mut self, dst: usize, src: usize) {
        let n = self.n;
        self.add_col(dst, n + src);
    }
}

/// Compute the syndromes of stacked `errors` against stacked `stabilizers`,
/// both in `[z | x]` form.
///
/// Entry (*i*, *j*) of the result is 1 if error *i* anticommutes with
/// stabilizer *j*.
///
/// *Panics if the two matrices have different numbers of columns.*
pub fn syndrome_matrix(errors: &na::DMatrix<u8>, stabilizers: &na::DMatrix<u8>)
    -> na::DMatrix<u8>
{
    let n = stabilizers.ncols() / 2;
    let mut twisted: na::DMatrix<u32> = stabilizers.map(u32::from);
    (0..n).for_each(|k| { twisted.swap_columns(k, n + k); });
    let prod: na::DMatrix<u32> = errors.map(u32::from) * twisted.transpose();
    prod.map(|v| (v % 2) as u8)
}

#[cfg(test)]
mod test {
    use rand::{ Rng, SeedableRng, rngs::StdRng };
    use super::*;
    use crate::pauli::Pauli;

    fn ps(s: &str) -> PauliString { s.parse().unwrap() }

    fn random_string<R: Rng>(n: usize, rng: &mut R) -> PauliString {
        (0..n)
            .map(|_| Pauli::from_bits(rng.gen(), rng.gen()))
            .collect()
    }

    #[test]
    fn round_trip() {
        let strings = vec![ps("XYZ-"), ps("----"), ps("ZZXX")];
        let tab = FaultTableau::from_strings(4, &strings).unwrap();
        assert_eq!(tab.num_rows(), 3);
        assert_eq!(tab.rows().unwrap(), strings);
        assert!(FaultTableau::from_strings(3, &strings).is_err());
    }

    #[test]
    fn updates() {
        let mut tab = FaultTableau::from_strings(2, &[ps("X-"), ps("-Z"), ps("Y-")]).unwrap();
        tab.cnot_update(0, 1);
        assert_eq!(tab.rows().unwrap(), vec![ps("XX"), ps("ZZ"), ps("YX")]);
        tab.hadamard_update(1);
        assert_eq!(tab.rows().unwrap(), vec![ps("XZ"), ps("ZX"), ps("YZ")]);
    }

    #[test]
    fn agrees_with_strings() {
        let mut rng = StdRng::seed_from_u64(10546);
        let gates = [
            Gate::H(0), Gate::S(3), Gate::CX(2, 0), Gate::CZ(1, 3), Gate::CX(3, 4),
            Gate::H(4), Gate::CZ(0, 2), Gate::S(1), Gate::CX(4, 1),
        ];
        let strings: Vec<PauliString>
            = (0..50).map(|_| random_string(5, &mut rng)).collect();
        let mut tab = FaultTableau::from_strings(5, &strings).unwrap();
        tab.apply_gates(&gates).unwrap();
        for (i, s) in strings.into_iter().enumerate() {
            let mut s = s;
            gates.iter().for_each(|g| g.conjugate(&mut s));
            assert_eq!(tab.row(i).unwrap(), s);
        }
    }

    #[test]
    fn fault_rows() {
        let faults = vec![Fault::parse("XZ").unwrap(), Fault::parse("-Y").unwrap()];
        let tab = FaultTableau::fault_operators(4, &[1, 3], &faults).unwrap();
        assert_eq!(tab.num_rows(), 4);
        assert_eq!(tab.combine_rows(0..2).unwrap(), ps("-X-Z"));
        assert_eq!(tab.combine_rows(2..4).unwrap(), ps("---Y"));
        assert!(FaultTableau::fault_operators(4, &[1], &faults).is_err());
        assert!(FaultTableau::fault_operators(4, &[1, 4], &faults).is_err());
    }

    #[test]
    fn non_binary() {
        let mut tab = FaultTableau::zeros(2, 1);
        assert!(tab.check_binary().is_ok());
        tab.ops[(0, 1)] = 2;
        assert!(matches!(tab.check_binary(), Err(FTError::NonBinary(2))));
        assert!(matches!(tab.row(0), Err(FTError::NonBinary(2))));
    }

    #[test]
    fn syndromes() {
        let code = vec![ps("ZZZZ---"), ps("-ZZ-ZZ-"), ps("--ZZ-ZZ"), ps("XXXX---")];
        let errors = vec![ps("--Z----"), ps("X------"), ps("-------")];
        let s = FaultTableau::from_strings(7, &code).unwrap();
        let e = FaultTableau::from_strings(7, &errors).unwrap();
        let syn = syndrome_matrix(e.as_matrix(), s.as_matrix());
        assert_eq!(syn.shape(), (3, 4));
        for (i, err) in errors.iter().enumerate() {
            let expected: Vec<u8>
                = err.syndrome_of(&code).into_iter().map(u8::from).collect();
            let found: Vec<u8> = syn.row(i).iter().copied().collect();
            assert_eq!(found, expected);
        }
        assert_eq!(syn.row(1).iter().copied().collect::<Vec<u8>>(), vec![1, 0, 0, 0]);
    }
}
