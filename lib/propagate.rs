//! Propagation of Pauli errors through gate sequences.
//!
//! An error present after some gate is carried to the end of its circuit by
//! conjugating it with every later gate. Gadgets made of several stages chain
//! this across stages, with an arbitrary hook run between them (usually
//! ancilla measurement and reset; see [`syndrome::reset_ancillas`]).
//!
//! [`syndrome::reset_ancillas`]: crate::syndrome::reset_ancillas

use std::fmt;
use crate::{
    FTError,
    FTResult,
    gate::{ Circuit, Gate },
    pauli::PauliString,
};

/// A place in a circuit where a fault can occur.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    /// On a qubit, before the first gate of the circuit.
    Idle(usize),
    /// Immediately after the gate at this index.
    Gate(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle(_) => write!(f, "-"),
            Self::Gate(i) => write!(f, "{}", i),
        }
    }
}

impl Location {
    /// Return the gate occupying this location in `circuit`, with idle
    /// locations given as [`Gate::I`].
    pub fn gate(&self, circuit: &Circuit) -> Option<Gate> {
        match *self {
            Self::Idle(k) => (k < circuit.num_qubits()).then_some(Gate::I(k)),
            Self::Gate(i) => circuit.get(i).copied(),
        }
    }
}

/// Push `error` through `gates` in order.
///
/// Fails if any gate addresses a qubit outside `error`.
pub fn propagate<'a, I>(mut error: PauliString, gates: I) -> FTResult<PauliString>
where I: IntoIterator<Item = &'a Gate>
{
    let n = error.len();
    for gate in gates {
        gate.validate(n)?;
        gate.conjugate(&mut error);
    }
    Ok(error)
}

/// Push an error injected at `location` through the rest of `circuit`.
///
/// Idle locations sit before the first gate, so their errors pass through the
/// whole circuit.
pub fn propagate_from(error: PauliString, circuit: &Circuit, location: Location)
    -> FTResult<PauliString>
{
    if error.len() != circuit.num_qubits() {
        return Err(FTError::LengthMismatch(circuit.num_qubits(), error.len()));
    }
    match location {
        Location::Idle(k) if k >= circuit.num_qubits()
            => Err(FTError::QubitOutOfRange(k, circuit.num_qubits())),
        Location::Idle(_) => propagate(error, circuit),
        Location::Gate(i) if i >= circuit.len()
            => Err(FTError::LocationOutOfRange(i, circuit.len())),
        Location::Gate(i) => propagate(error, circuit.after(i)),
    }
}

/// Push `error` through each of `stages` in full, calling `between` on the
/// result after every stage and carrying its output into the next one.
///
/// `between` receives the stage index (counting from 0 within `stages`).
pub fn propagate_multi_stage<'a, I, F>(
    mut error: PauliString,
    stages: I,
    mut between: F,
) -> FTResult<PauliString>
where
    I: IntoIterator<Item = &'a Circuit>,
    F: FnMut(usize, PauliString) -> FTResult<PauliString>,
{
    for (s, stage) in stages.into_iter().enumerate() {
        if stage.num_qubits() != error.len() {
            return Err(FTError::LengthMismatch(stage.num_qubits(), error.len()));
        }
        error = propagate(error, stage)?;
        error = between(s, error)?;
    }
    Ok(error)
}

#[cfg(test)]
mod test {
    use super::*;

    fn ps(s: &str) -> PauliString { s.parse().unwrap() }

    fn goto_prefix() -> Circuit {
        Circuit::from_description(
            7,
            [
                ("H", vec![1]),
                ("H", vec![2]),
                ("H", vec![3]),
                ("CX", vec![1, 0]),
                ("CX", vec![3, 5]),
                ("CX", vec![2, 6]),
                ("CX", vec![1, 4]),
                ("CX", vec![2, 0]),
                ("CX", vec![3, 6]),
            ],
        ).unwrap()
    }

    #[test]
    fn whole_circuit() {
        let circ = goto_prefix();
        let cases = [
            ("Z------", "ZZZ----"),
            ("-Z-----", "XX--X--"),
            ("--Z----", "X-X---X"),
            ("---Z---", "---X-XX"),
            ("----Z--", "-Z--Z--"),
            ("-----Z-", "---Z-Z-"),
            ("------Z", "--ZZ--Z"),
        ];
        for (input, output) in cases {
            assert_eq!(propagate(ps(input), &circ).unwrap(), ps(output), "from {}", input);
        }
    }

    #[test]
    fn from_location() {
        let circ = Circuit::from_description(
            5, [("CX", vec![1, 4]), ("CX", vec![0, 4])]).unwrap();
        let e = propagate_from(ps("----Z"), &circ, Location::Idle(0)).unwrap();
        assert_eq!(e, ps("ZZ--Z"));
        let e = propagate_from(ps("----Z"), &circ, Location::Gate(0)).unwrap();
        assert_eq!(e, ps("Z---Z"));
        let e = propagate_from(ps("----Z"), &circ, Location::Gate(1)).unwrap();
        assert_eq!(e, ps("----Z"));
        assert!(propagate_from(ps("---Z"), &circ, Location::Gate(0)).is_err());
        assert!(propagate_from(ps("----Z"), &circ, Location::Gate(2)).is_err());
        assert_eq!(Location::Idle(3).gate(&circ), Some(Gate::I(3)));
        assert_eq!(Location::Gate(1).gate(&circ), Some(Gate::CX(0, 4)));
    }

    #[test]
    fn bad_gate() {
        assert!(matches!(
            propagate(ps("--"), &[Gate::H(2)]),
            Err(FTError::QubitOutOfRange(2, 2)),
        ));
    }

    #[test]
    fn chained_stages() {
        let a = Circuit::from_description(2, [("CX", vec![0, 1])]).unwrap();
        let b = Circuit::from_description(2, [("H", vec![1])]).unwrap();
        let mut seen: Vec<String> = Vec::new();
        let e = propagate_multi_stage(ps("X-"), [&a, &b], |_, e| {
            seen.push(e.to_string());
            Ok(e)
        }).unwrap();
        assert_eq!(e, ps("XZ"));
        assert_eq!(seen, vec!["XX", "XZ"]);

        // clear the second qubit between stages
        let e = propagate_multi_stage(ps("X-"), [&a, &b], |_, mut e| {
            e.clear_from(1);
            Ok(e)
        }).unwrap();
        assert_eq!(e, ps("X-"));
    }
}
