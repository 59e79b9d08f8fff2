//! Tools for checking the fault tolerance of flag-qubit stabilizer measurement
//! gadgets built from Clifford circuits.
//!
//! Errors are tracked as Pauli strings with phases discarded, and are pushed
//! through circuits by Clifford conjugation (i.e. Hadamard, phase, and
//! controlled-*X*/*Z* gates). A single fault is injected at every circuit
//! location in turn, propagated to the end of a (possibly multi-stage)
//! gadget, decoded against its syndrome and flag outcomes, and classified as
//! accepted, rejected, or a violation of fault tolerance.
//!
//! Two engines are provided:
//! - a symbolic engine (see [`ft`]) that works on [`PauliString`]s one fault
//!   at a time, and
//! - a batched binary engine (see [`tableau`] and [`flag`]) that works on stacked
//!   symplectic tableaus and checks that flagged errors are distinguishable by
//!   their combined syndrome and flag signatures.
//!
//! Fixture codes, gate sequences, lookup tables, and gadgets are available
//! through [`registry::Registry`].
//!
//! # Example
//! ```
//! use ft_check::{ ft::{ CheckConfig, ErrorBasis, FaultToleranceChecker }, registry::Registry };
//!
//! let registry = Registry::builtin().unwrap();
//! let gadget = registry.gadget("steane_flag_bridge").unwrap();
//! let group = registry.stabilizer_group("steane_code").unwrap();
//! let config = CheckConfig::default().with_basis(Some(ErrorBasis::X));
//! let checker = FaultToleranceChecker::new(gadget, &group, config);
//! assert!(checker.check_ft().unwrap());
//! ```

use thiserror::Error;

pub mod pauli;
pub mod gate;
pub mod stab;
pub mod fault;
pub mod propagate;
pub mod syndrome;
pub mod lut;
pub mod tableau;
pub mod flag;
pub mod location;
pub mod ft;
pub mod registry;

pub use pauli::{ Pauli, PauliString };
pub use gate::{ Circuit, Gate };
pub use stab::StabilizerGroup;

/// Errors for fallible operations across the crate.
///
/// Every operation fails fast: the first malformed input is reported to the
/// caller and no partial result is returned.
#[derive(Debug, Error)]
pub enum FTError {
    /// Returned when a character is not one of `-`, `I`, `X`, `Y`, `Z`.
    #[error("invalid Pauli symbol '{0}'")]
    InvalidSymbol(char),

    /// Returned when a character in a bit string is not `0` or `1`.
    #[error("invalid bit '{0}'")]
    InvalidBit(char),

    /// Returned when a binary tableau holds an entry other than 0 or 1.
    #[error("non-binary tableau entry {0}")]
    NonBinary(u8),

    /// Returned when a binary vector does not split evenly into Z and X
    /// halves.
    #[error("binary vector of length {0} is not of the form [z | x]")]
    OddBinaryLength(usize),

    /// Returned when a gate name is not recognized.
    #[error("unknown gate '{0}'")]
    UnknownGate(String),

    /// Returned when a gate is given the wrong number of qubits.
    #[error("gate '{0}' cannot act on {1} qubit(s)")]
    GateArity(String, usize),

    /// Returned when a qubit index falls outside a register.
    #[error("qubit {0} is out of range for {1} qubit(s)")]
    QubitOutOfRange(usize, usize),

    /// Returned when a gate index falls outside a circuit.
    #[error("gate index {0} is out of range for a circuit of {1} gate(s)")]
    LocationOutOfRange(usize, usize),

    /// Returned when a two-qubit gate targets the same qubit twice.
    #[error("two-qubit gate acts on qubit {0} twice")]
    DuplicateQubit(usize),

    /// Returned when two objects that must have equal lengths do not.
    #[error("length mismatch: expected {0}, found {1}")]
    LengthMismatch(usize, usize),

    /// Returned when a fault's arity does not match the location it is placed
    /// at.
    #[error("fault '{0}' cannot be placed on {1} qubit(s)")]
    FaultArity(String, usize),

    /// Returned when a syndrome has no entry in a lookup table.
    #[error("no lookup table entry for syndrome {0}")]
    UnknownSyndrome(String),

    /// Returned when a bit string is too long to pack into an integer key.
    #[error("cannot pack {0} bits into an integer key")]
    KeyTooWide(usize),

    /// Returned when two distinct single-qubit errors share a syndrome while
    /// building a decoder.
    #[error("errors {1} and {2} share syndrome {0}")]
    DegenerateSyndrome(String, String, String),

    /// Returned when a code or gadget is given no stabilizers or stages.
    #[error("empty {0}")]
    Empty(&'static str),

    /// Returned when a gadget's parts are inconsistent with each other.
    #[error("invalid gadget: {0}")]
    InvalidGadget(String),

    /// Returned when a registry has no fixture under a name.
    #[error("no {0} named '{1}'")]
    UnknownFixture(&'static str, String),
}
pub type FTResult<T> = Result<T, FTError>;
