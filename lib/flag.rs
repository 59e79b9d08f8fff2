//! Flag-error catalogs and decode-table checks on the batched binary path.
//!
//! For a single flagged syndrome-extraction circuit, every fault at every
//! location is propagated to the end of the circuit (all faults at one
//! location at once, as rows of a [`FaultTableau`]). Faults that raise at
//! least one flag are kept, with their data error reduced modulo the local
//! stabilizers the circuit measures. The resulting catalog is fault-tolerant
//! with respect to a larger code if the flagged errors can be told apart by
//! the full code's syndrome together with the flag pattern: every key
//! (syndrome bits followed by flag bits, packed with the first bit most
//! significant) must point to a single error, up to the code's stabilizers.

use std::collections::BTreeMap;
use log::{ debug, info };
use crate::{
    FTError,
    FTResult,
    fault::{ Fault, FaultSet },
    gate::{ Circuit, Gate },
    pauli::{ Pauli, PauliString },
    stab::StabilizerGroup,
    syndrome::{ BitString, bit_key },
    tableau::{ FaultTableau, syndrome_matrix },
};

/// Qubit layout of a flagged circuit: data qubits first, then syndrome
/// ancillas, then flag ancillas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlagLayout {
    pub num_data: usize,
    pub num_syndrome: usize,
    pub num_flag: usize,
}

impl FlagLayout {
    /// Return the total number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_data + self.num_syndrome + self.num_flag
    }
}

/// A flagged fault and the data error it leaves behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlaggedError {
    /// Index of the gate the fault follows.
    pub location: usize,
    pub gate: Gate,
    pub fault: Fault,
    /// Flag ancilla outcomes.
    pub flags: BitString,
    /// Syndrome ancilla outcomes.
    pub syndrome: BitString,
    /// Lowest-weight data error modulo the local stabilizers.
    pub error: PauliString,
    /// All errors equivalent to `error`, sorted by weight.
    pub equivalents: Vec<PauliString>,
}

/// All flagged errors of a circuit that are distinct up to the local
/// stabilizers, in order of discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagErrorSet {
    layout: FlagLayout,
    entries: Vec<FlaggedError>,
}

impl FlagErrorSet {
    /// Return the layout the set was built for.
    pub fn layout(&self) -> FlagLayout { self.layout }

    /// Return the number of entries.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Return `true` if no fault raised a flag.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Return all entries.
    pub fn entries(&self) -> &[FlaggedError] { &self.entries }

    /// Iterate over entries in order of discovery.
    pub fn iter(&self) -> std::slice::Iter<'_, FlaggedError> {
        self.entries.iter()
    }
}

/// Catalog the flagged errors of `circuit`.
///
/// Every fault over `alphabet` (weight-2 faults included at two-qubit gates)
/// is injected after every gate. Data errors are reduced modulo `local`, which
/// acts on the data qubits only, and an entry is kept only for the first fault
/// producing each class of errors modulo `local`. Outcomes are read from the *x* bits of the
/// ancillas.
pub fn flag_error_set(
    layout: FlagLayout,
    local: &StabilizerGroup,
    alphabet: &[Pauli],
    circuit: &Circuit,
) -> FTResult<FlagErrorSet>
{
    let n = layout.num_qubits();
    if circuit.num_qubits() != n {
        return Err(FTError::LengthMismatch(n, circuit.num_qubits()));
    }
    if !local.is_empty() && local.num_qubits() != layout.num_data {
        return Err(FTError::LengthMismatch(layout.num_data, local.num_qubits()));
    }
    let faults = FaultSet::enumerate(alphabet, false);
    let mut entries: Vec<FlaggedError> = Vec::new();
    for (i, gate) in circuit.gates().iter().enumerate() {
        let positions = gate.qubits();
        let arity = positions.len();
        let here = faults.for_arity(arity);
        if here.is_empty() { continue; }
        let mut ops = FaultTableau::fault_operators(n, &positions, here)?;
        ops.apply_gates(circuit.after(i))?;
        ops.check_binary()?;
        for (j, fault) in here.iter().enumerate() {
            let total = ops.combine_rows(j * arity..(j + 1) * arity)?;
            let (data, ancillas) = total.split_at(layout.num_data);
            let outcomes: Vec<bool>
                = (0..ancillas.len()).map(|k| ancillas.x_bit(k)).collect();
            let (syndrome, flags) = outcomes.split_at(layout.num_syndrome);
            let flags: BitString = flags.iter().copied().collect();
            if !flags.any() { continue; }
            if entries.iter().any(|e| local.are_equivalent(&e.error, &data)) {
                continue;
            }
            let equivalents = local.stab_equiv(&data);
            let error = equivalents[0].clone();
            debug!(
                "flagged error {} (flags {}) from fault {} after gate {} {}",
                error, flags, fault, i, gate,
            );
            entries.push(FlaggedError {
                location: i,
                gate: *gate,
                fault: fault.clone(),
                flags,
                syndrome: syndrome.iter().copied().collect(),
                error,
                equivalents,
            });
        }
    }
    Ok(FlagErrorSet { layout, entries })
}

/// Place `error` on the qubits `locations` of an `n`-qubit register.
pub fn embed(error: &PauliString, n: usize, locations: &[usize])
    -> FTResult<PauliString>
{
    if locations.len() != error.len() {
        return Err(FTError::LengthMismatch(error.len(), locations.len()));
    }
    let mut full = PauliString::identity(n);
    for (k, &loc) in locations.iter().enumerate() {
        if loc >= n { return Err(FTError::QubitOutOfRange(loc, n)); }
        full.set(loc, error.pauli(k));
    }
    Ok(full)
}

/// Two inequivalent flagged errors sharing a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagConflict {
    pub key: u64,
    pub first: PauliString,
    pub second: PauliString,
}

/// A decode table built from a flag-error catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagDecodeTable {
    /// Map from packed (syndrome, flags) keys to the first error seen.
    pub table: BTreeMap<u64, PauliString>,
    /// Every key collision between inequivalent errors.
    pub conflicts: Vec<FlagConflict>,
}

impl FlagDecodeTable {
    /// Return `true` if no two inequivalent errors share a key.
    pub fn is_fault_tolerant(&self) -> bool { self.conflicts.is_empty() }
}

/// Check that the errors in `set`, placed on the qubits `stab_loc` of the code
/// generated by `code`, are distinguishable by their code syndromes and flags.
pub fn check_flag_ft(code: &[PauliString], set: &FlagErrorSet, stab_loc: &[usize])
    -> FTResult<FlagDecodeTable>
{
    let n = code.first().ok_or(FTError::Empty("code"))?.len();
    let group = StabilizerGroup::close(code.iter().cloned())?;
    let embedded: Vec<PauliString>
        = set.iter()
        .map(|entry| embed(&entry.error, n, stab_loc))
        .collect::<FTResult<_>>()?;
    let mut table: BTreeMap<u64, PauliString> = BTreeMap::new();
    let mut conflicts: Vec<FlagConflict> = Vec::new();
    if embedded.is_empty() {
        return Ok(FlagDecodeTable { table, conflicts });
    }
    let stabs = FaultTableau::from_strings(n, code)?;
    let errs = FaultTableau::from_strings(n, &embedded)?;
    let syndromes = syndrome_matrix(errs.as_matrix(), stabs.as_matrix());
    for (i, (entry, error)) in set.iter().zip(embedded).enumerate() {
        let bits = syndromes.row(i).iter().map(|b| *b != 0)
            .chain(entry.flags.iter())
            .collect::<Vec<bool>>();
        let key = bit_key(bits)?;
        match table.get(&key) {
            Some(prev) if !group.are_equivalent(prev, &error) => {
                debug!("key {} maps to both {} and {}", key, prev, error);
                conflicts.push(
                    FlagConflict { key, first: prev.clone(), second: error });
            },
            Some(_) => { },
            None => { table.insert(key, error); },
        }
    }
    info!(
        "flag decode table: {} entries, {} keys, {} conflicts",
        set.len(), table.len(), conflicts.len(),
    );
    Ok(FlagDecodeTable { table, conflicts })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pauli::parse_alphabet;

    fn ps(s: &str) -> PauliString { s.parse().unwrap() }

    const LAYOUT: FlagLayout
        = FlagLayout { num_data: 4, num_syndrome: 1, num_flag: 1 };

    fn flagged_zzzz(first_flag: usize) -> Circuit {
        let mut desc: Vec<(&str, Vec<usize>)> = vec![
            ("H", vec![5]),
            ("CX", vec![0, 4]),
            ("CX", vec![1, 4]),
            ("CX", vec![2, 4]),
            ("CX", vec![3, 4]),
            ("H", vec![5]),
        ];
        desc.insert(first_flag, ("CX", vec![5, 4]));
        desc.insert(5, ("CX", vec![5, 4]));
        Circuit::from_description(6, desc).unwrap()
    }

    fn local() -> StabilizerGroup {
        StabilizerGroup::from_strs(&["ZZZZ", "XXXX"]).unwrap()
    }

    fn steane() -> Vec<PauliString> {
        ["ZZZZ---", "-ZZ-ZZ-", "--ZZ-ZZ", "XXXX---", "-XX-XX-", "--XX-XX"]
            .iter().map(|s| ps(s)).collect()
    }

    #[test]
    fn catalog() {
        let circ = flagged_zzzz(2);
        assert_eq!(circ.gates()[2], Gate::CX(5, 4));
        assert_eq!(circ.gates()[5], Gate::CX(5, 4));
        let alphabet = parse_alphabet("XYZ").unwrap();
        let set = flag_error_set(LAYOUT, &local(), &alphabet, &circ).unwrap();
        let errors: Vec<String>
            = set.iter().map(|e| e.error.to_string()).collect();
        assert_eq!(
            errors,
            vec!["----", "Z---", "--ZZ", "ZY--", "ZX--", "---Z", "--XZ", "--YZ"],
        );
        assert!(set.iter().all(|e| e.flags.to_string() == "1"));
        let first = &set.entries()[0];
        assert_eq!((first.location, first.gate), (0, Gate::H(5)));
        assert_eq!(first.fault.to_string(), "Y");
        let second = &set.entries()[1];
        assert_eq!((second.location, second.fault.to_string()), (2, "-Y".to_string()));
        assert_eq!(second.equivalents[0], ps("Z---"));
    }

    #[test]
    fn decodable() {
        let circ = flagged_zzzz(2);
        let alphabet = parse_alphabet("XYZ").unwrap();
        let set = flag_error_set(LAYOUT, &local(), &alphabet, &circ).unwrap();
        let decode = check_flag_ft(&steane(), &set, &[0, 1, 2, 3]).unwrap();
        assert!(decode.is_fault_tolerant());
        assert_eq!(
            decode.table.keys().copied().collect::<Vec<u64>>(),
            vec![1, 5, 9, 11, 101, 105, 117, 123],
        );
        assert_eq!(decode.table[&5], ps("--ZZ---"));
        assert_eq!(decode.table[&123], ps("--XZ---"));
    }

    #[test]
    fn not_decodable_without_x_checks() {
        let circ = flagged_zzzz(2);
        let alphabet = parse_alphabet("XYZ").unwrap();
        let set = flag_error_set(LAYOUT, &local(), &alphabet, &circ).unwrap();
        let z_only: Vec<PauliString> = steane().into_iter().take(3).collect();
        let decode = check_flag_ft(&z_only, &set, &[0, 1, 2, 3]).unwrap();
        assert!(!decode.is_fault_tolerant());
        assert!(decode.conflicts.iter().any(|c| c.key == 1));
    }

    #[test]
    fn bad_inputs() {
        let circ = flagged_zzzz(2);
        let alphabet = parse_alphabet("XYZ").unwrap();
        let layout = FlagLayout { num_data: 4, num_syndrome: 1, num_flag: 2 };
        assert!(flag_error_set(layout, &local(), &alphabet, &circ).is_err());
        let set = flag_error_set(LAYOUT, &local(), &alphabet, &circ).unwrap();
        assert!(check_flag_ft(&steane(), &set, &[0, 1, 2]).is_err());
        assert!(check_flag_ft(&steane(), &set, &[0, 1, 2, 7]).is_err());
        assert!(check_flag_ft(&[], &set, &[0, 1, 2, 3]).is_err());
        assert_eq!(embed(&ps("XZ"), 4, &[3, 0]).unwrap(), ps("Z--X"));
    }

    #[test]
    fn catalog_is_distinct_up_to_stabilizers() {
        // produces flagged errors ZYX- and YZ-X, which differ by XXXX
        let circ = Circuit::new(
            6,
            [
                Gate::CZ(4, 5), Gate::CX(2, 1), Gate::CX(2, 5),
                Gate::CX(3, 0), Gate::CX(0, 5), Gate::CZ(1, 0),
            ],
        ).unwrap();
        let alphabet = parse_alphabet("XYZ").unwrap();
        let local = local();
        let set = flag_error_set(LAYOUT, &local, &alphabet, &circ).unwrap();
        assert!(!set.is_empty());
        assert_eq!(set.layout(), LAYOUT);
        for (i, a) in set.iter().enumerate() {
            for b in set.entries()[i + 1..].iter() {
                assert!(
                    !local.are_equivalent(&a.error, &b.error),
                    "{} and {} are equivalent", a.error, b.error,
                );
            }
        }
        let errors: Vec<PauliString> = set.iter().map(|e| e.error.clone()).collect();
        assert!(!(errors.contains(&ps("ZYX-")) && errors.contains(&ps("YZ-X"))));
    }
}
