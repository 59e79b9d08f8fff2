//! Clifford gates and their action on Pauli errors by conjugation.
//!
//! A Clifford gate *U* maps every Pauli operator *P* to another Pauli operator
//! *U P U*<sup>†</sup> (up to a phase, which is discarded here). In the binary
//! (*z*, *x*) encoding these maps are linear over GF(2) and reduce to a few
//! column operations:
//!
//! | gate | action |
//! |:----:|:-------|
//! | H(*k*) | *z*<sub>*k*</sub> ↔ *x*<sub>*k*</sub> |
//! | S(*k*) | *z*<sub>*k*</sub> ⊕= *x*<sub>*k*</sub> |
//! | CX(*c*, *t*) | *z*<sub>*c*</sub> ⊕= *z*<sub>*t*</sub>, *x*<sub>*t*</sub> ⊕= *x*<sub>*c*</sub> |
//! | CZ(*a*, *b*) | *z*<sub>*a*</sub> ⊕= *x*<sub>*b*</sub>, *z*<sub>*b*</sub> ⊕= *x*<sub>*a*</sub> |
//!
//! These primitives are captured by the [`Symplectic`] trait so that the same
//! gate definitions drive both a single [`PauliString`][crate::PauliString]
//! and a batched [`FaultTableau`][crate::tableau::FaultTableau].
//!
//! See also: <https://en.wikipedia.org/wiki/Clifford_gates>

use std::fmt;
use crate::{ FTError, FTResult };

/// Column operations on the binary (*z*, *x*) representation of one or more
/// Pauli operators.
///
/// Implementors only need to supply these four primitives; every gate in
/// [`Gate`] is expressed in terms of them.
pub trait Symplectic {
    /// Number of qubits acted on.
    fn num_qubits(&self) -> usize;

    /// Exchange the *z* and *x* bits of qubit `k`.
    fn swap_zx(&mut self, k: usize);

    /// Add the *z* bit of qubit `src` to the *z* bit of qubit `dst`.
    fn add_z(&mut self, dst: usize, src: usize);

    /// Add the *x* bit of qubit `src` to the *x* bit of qubit `dst`.
    fn add_x(&mut self, dst: usize, src: usize);

    /// Add the *x* bit of qubit `src` to the *z* bit of qubit `dst`.
    fn add_x_to_z(&mut self, dst: usize, src: usize);
}

/// A single gate acting on a register of qubits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Identity; used to mark idle locations where faults may still occur.
    I(usize),
    /// Hadamard
    H(usize),
    /// π/2 rotation about Z
    S(usize),
    /// Z-controlled π rotation about X.
    ///
    /// The first qubit index is the control.
    CX(usize, usize),
    /// Z-controlled π rotation about Z.
    CZ(usize, usize),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I(k) => write!(f, "I({})", k),
            Self::H(k) => write!(f, "H({})", k),
            Self::S(k) => write!(f, "S({})", k),
            Self::CX(a, b) => write!(f, "CX({}, {})", a, b),
            Self::CZ(a, b) => write!(f, "CZ({}, {})", a, b),
        }
    }
}

impl Gate {
    /// Build a gate from its name (`"I"`, `"H"`, `"S"`, `"CX"`, or `"CZ"`) and
    /// qubit indices.
    pub fn parse(name: &str, qubits: &[usize]) -> FTResult<Self> {
        match (name, qubits) {
            ("I", &[k]) => Ok(Self::I(k)),
            ("H", &[k]) => Ok(Self::H(k)),
            ("S", &[k]) => Ok(Self::S(k)),
            ("CX", &[a, b]) => Ok(Self::CX(a, b)),
            ("CZ", &[a, b]) => Ok(Self::CZ(a, b)),
            ("I" | "H" | "S" | "CX" | "CZ", _)
                => Err(FTError::GateArity(name.to_string(), qubits.len())),
            _ => Err(FTError::UnknownGate(name.to_string())),
        }
    }

    /// Return the gate's name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::I(..) => "I",
            Self::H(..) => "H",
            Self::S(..) => "S",
            Self::CX(..) => "CX",
            Self::CZ(..) => "CZ",
        }
    }

    /// Return the number of qubits the gate acts on.
    pub fn arity(&self) -> usize {
        match self {
            Self::I(..) | Self::H(..) | Self::S(..) => 1,
            Self::CX(..) | Self::CZ(..) => 2,
        }
    }

    /// Return the qubit indices the gate acts on, in order.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Self::I(k) | Self::H(k) | Self::S(k) => vec![k],
            Self::CX(a, b) | Self::CZ(a, b) => vec![a, b],
        }
    }

    /// Check that all indices are less than `n` and that two-qubit gates act
    /// on distinct qubits.
    pub fn validate(&self, n: usize) -> FTResult<()> {
        match *self {
            Self::I(k) | Self::H(k) | Self::S(k) => {
                if k >= n { return Err(FTError::QubitOutOfRange(k, n)); }
            },
            Self::CX(a, b) | Self::CZ(a, b) => {
                if a >= n { return Err(FTError::QubitOutOfRange(a, n)); }
                if b >= n { return Err(FTError::QubitOutOfRange(b, n)); }
                if a == b { return Err(FTError::DuplicateQubit(a)); }
            },
        }
        Ok(())
    }

    /// Conjugate `target` by `self`.
    pub fn conjugate<T>(&self, target: &mut T)
    where T: Symplectic + ?Sized
    {
        match *self {
            Self::I(_) => { },
            Self::H(k) => { target.swap_zx(k); },
            Self::S(k) => { target.add_x_to_z(k, k); },
            Self::CX(c, t) => {
                target.add_z(c, t);
                target.add_x(t, c);
            },
            Self::CZ(a, b) => {
                target.add_x_to_z(a, b);
                target.add_x_to_z(b, a);
            },
        }
    }
}

/// A series of [`Gate`]s on a fixed register of qubits.
///
/// All gates held by this type are guaranteed to apply to qubit indices less
/// than the register size, and all two-qubit gate indices are guaranteed to be
/// non-equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Circuit {
    n: usize,
    gates: Vec<Gate>,
}

impl IntoIterator for Circuit {
    type Item = Gate;
    type IntoIter = <Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.gates.into_iter() }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = <&'a Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.gates.iter() }
}

impl Circuit {
    /// Convert a series of gates to a new `n`-qubit circuit, verifying all
    /// qubit indices.
    pub fn new<I>(n: usize, gates: I) -> FTResult<Self>
    where I: IntoIterator<Item = Gate>
    {
        let gates: Vec<Gate> = gates.into_iter().collect();
        gates.iter().try_for_each(|g| g.validate(n))?;
        Ok(Self { n, gates })
    }

    /// Build a circuit from `(name, qubits)` pairs, e.g.
    /// `[("H", vec![1]), ("CX", vec![1, 0])]`.
    pub fn from_description<'a, I, Q>(n: usize, description: I)
        -> FTResult<Self>
    where
        I: IntoIterator<Item = (&'a str, Q)>,
        Q: AsRef<[usize]>,
    {
        let gates: Vec<Gate>
            = description.into_iter()
            .map(|(name, qubits)| Gate::parse(name, qubits.as_ref()))
            .collect::<FTResult<_>>()?;
        Self::new(n, gates)
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the number of gates.
    pub fn len(&self) -> usize { self.gates.len() }

    /// Return `true` if there are no gates.
    pub fn is_empty(&self) -> bool { self.gates.is_empty() }

    /// Return all gates in order.
    pub fn gates(&self) -> &[Gate] { &self.gates }

    /// Return the gate at index `i`, if it exists.
    pub fn get(&self, i: usize) -> Option<&Gate> { self.gates.get(i) }

    /// Return all gates strictly after index `i`.
    pub fn after(&self, i: usize) -> &[Gate] {
        self.gates.get(i + 1..).unwrap_or(&[])
    }

    /// Apply every gate in order to `target`.
    pub fn conjugate<T>(&self, target: &mut T)
    where T: Symplectic + ?Sized
    {
        self.gates.iter().for_each(|g| { g.conjugate(target); });
    }
}

#[cfg(test)]
mod test {
    use rand::{ Rng, SeedableRng, rngs::StdRng };
    use super::*;
    use crate::{ Pauli, PauliString };

    fn ps(s: &str) -> PauliString { s.parse().unwrap() }

    fn conj(gate: Gate, s: &str) -> String {
        let mut p = ps(s);
        gate.conjugate(&mut p);
        p.to_string()
    }

    #[test]
    fn parse() {
        assert_eq!(Gate::parse("CX", &[1, 0]).unwrap(), Gate::CX(1, 0));
        assert_eq!(Gate::parse("H", &[3]).unwrap(), Gate::H(3));
        assert!(matches!(Gate::parse("CX", &[1]), Err(FTError::GateArity(..))));
        assert!(matches!(Gate::parse("T", &[1]), Err(FTError::UnknownGate(..))));
        assert_eq!(Gate::CZ(2, 5).to_string(), "CZ(2, 5)");
        assert_eq!(Gate::CZ(2, 5).qubits(), vec![2, 5]);
    }

    #[test]
    fn single_qubit_rules() {
        assert_eq!(conj(Gate::H(0), "X"), "Z");
        assert_eq!(conj(Gate::H(0), "Z"), "X");
        assert_eq!(conj(Gate::H(0), "Y"), "Y");
        assert_eq!(conj(Gate::S(0), "X"), "Y");
        assert_eq!(conj(Gate::S(0), "Y"), "X");
        assert_eq!(conj(Gate::S(0), "Z"), "Z");
        assert_eq!(conj(Gate::I(0), "Y"), "Y");
    }

    #[test]
    fn cx_table() {
        let table = [
            ("-X", "-X"), ("-Y", "ZY"), ("-Z", "ZZ"),
            ("X-", "XX"), ("XX", "X-"), ("XY", "YZ"), ("XZ", "YY"),
            ("Y-", "YX"), ("YX", "Y-"), ("YY", "XZ"), ("YZ", "XY"),
            ("Z-", "Z-"), ("ZX", "ZX"), ("ZY", "-Y"), ("ZZ", "-Z"),
        ];
        for (input, output) in table {
            assert_eq!(conj(Gate::CX(0, 1), input), output, "CX on {}", input);
        }
    }

    #[test]
    fn cz_table() {
        let table = [
            ("-X", "ZX"), ("-Y", "ZY"), ("-Z", "-Z"),
            ("X-", "XZ"), ("XX", "YY"), ("XY", "YX"), ("XZ", "X-"),
            ("Y-", "YZ"), ("YX", "XY"), ("YY", "XX"), ("YZ", "Y-"),
            ("Z-", "Z-"), ("ZX", "-X"), ("ZY", "-Y"), ("ZZ", "ZZ"),
        ];
        for (input, output) in table {
            assert_eq!(conj(Gate::CZ(0, 1), input), output, "CZ on {}", input);
        }
    }

    #[test]
    fn involutions() {
        let gates = [Gate::H(1), Gate::CX(0, 2), Gate::CZ(2, 1)];
        for s in ["XYZ", "-ZX", "YY-", "Z-Y"] {
            for g in gates {
                let mut p = ps(s);
                g.conjugate(&mut p);
                g.conjugate(&mut p);
                assert_eq!(p, ps(s));
            }
        }
    }

    #[test]
    fn circuit_validation() {
        assert!(Circuit::new(3, [Gate::H(0), Gate::CX(0, 2)]).is_ok());
        assert!(matches!(
            Circuit::new(3, [Gate::H(3)]),
            Err(FTError::QubitOutOfRange(3, 3)),
        ));
        assert!(matches!(
            Circuit::new(3, [Gate::CZ(1, 1)]),
            Err(FTError::DuplicateQubit(1)),
        ));
        let circ = Circuit::from_description(
            5, [("CX", vec![1, 4]), ("CX", vec![0, 4])]).unwrap();
        assert_eq!(circ.len(), 2);
        assert_eq!(circ.after(0), &[Gate::CX(0, 4)]);
        assert!(circ.after(1).is_empty());
        assert!(circ.after(5).is_empty());
        let mut p = ps("----Z");
        circ.conjugate(&mut p);
        assert_eq!(p, ps("ZZ--Z"));
    }

    #[test]
    fn random_orders() {
        let mut rng = StdRng::seed_from_u64(10546);
        for _ in 0..200 {
            let p: PauliString
                = (0..4).map(|_| Pauli::from_bits(rng.gen(), rng.gen())).collect();
            let k: usize = rng.gen_range(0..4);
            let mut q = p.clone();
            (0..4).for_each(|_| Gate::S(k).conjugate(&mut q));
            assert_eq!(q, p);
            (0..2).for_each(|_| Gate::H(k).conjugate(&mut q));
            assert_eq!(q, p);
            let a: usize = rng.gen_range(0..4);
            let mut b: usize = rng.gen_range(0..3);
            if b >= a { b += 1; }
            // invertible, so only the identity maps to the identity
            let circ = Circuit::new(4, [Gate::CX(a, b), Gate::CZ(b, a)]).unwrap();
            circ.conjugate(&mut q);
            assert_eq!(q.is_identity(), p.is_identity());
        }
    }
}
