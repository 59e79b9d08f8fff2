//! Fault-tolerance checks for flagged stabilizer-measurement gadgets.
//!
//! A [`Gadget`] is a sequence of stages acting on a common register of data
//! qubits followed by ancillas. At the end of every stage the ancillas are
//! measured and reset; one outcome bit per stage is a syndrome bit and the rest
//! are flags. A static [`LookupTable`] maps the combined syndrome to a
//! correction.
//!
//! [`FaultToleranceChecker`] injects every single fault at every location of
//! every stage (plus an optional layer of idle locations before the first
//! gate) and follows it to the end of the gadget:
//! 1. propagate through the rest of the fault's stage and every later stage,
//!    measuring and resetting ancillas in between;
//! 2. extract the syndrome and flag;
//! 3. apply the lookup-table correction;
//! 4. reduce modulo the code's stabilizers;
//! 5. optionally remove one Pauli type;
//! 6. classify as [`Verdict::Accepted`], [`Verdict::Rejected`], or
//!    [`Verdict::Violation`].
//!
//! The gadget is fault-tolerant if no fault ends in a violation.
//!
//! The free functions [`bad_locations`], [`modulo_stabilizers`], and
//! [`strip_basis`] provide the same steps piecemeal for a single circuit
//! without ancilla processing.

use std::fmt;
use log::{ debug, info, trace };
use crate::{
    FTError,
    FTResult,
    fault::FaultSet,
    gate::Circuit,
    location::{ LocationRecord, LocationTable, Verdict },
    lut::LookupTable,
    pauli::{ Pauli, PauliString },
    propagate::{ Location, propagate_from, propagate_multi_stage },
    stab::StabilizerGroup,
    syndrome::{ BitString, extract_syndrome_and_flags, reset_ancillas },
};

/// Choice of which Pauli type to keep when checking a single logical basis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorBasis {
    /// Keep *X*-type components only (`Y` becomes `X`, `Z` is removed).
    X,
    /// Keep *Z*-type components only (`Y` becomes `Z`, `X` is removed).
    Z,
}

impl ErrorBasis {
    /// Remove the components of `error` outside this basis.
    pub fn strip(self, error: &PauliString) -> PauliString {
        match self {
            Self::X => error.x_part(),
            Self::Z => error.z_part(),
        }
    }
}

/// Options for a fault-tolerance check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Paulis that a single fault may apply.
    pub alphabet: Vec<Pauli>,
    /// Limit faults at two-qubit gates to a single non-identity component.
    pub weight1_only: bool,
    /// Include idle locations on every qubit before the first gate.
    pub idle: bool,
    /// Strip errors to this basis before classifying them.
    pub basis: Option<ErrorBasis>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            alphabet: vec![Pauli::X, Pauli::Y, Pauli::Z],
            weight1_only: false,
            idle: true,
            basis: None,
        }
    }
}

impl CheckConfig {
    pub fn with_alphabet<I>(mut self, alphabet: I) -> Self
    where I: IntoIterator<Item = Pauli>
    {
        self.alphabet = alphabet.into_iter().collect();
        self
    }

    pub fn with_weight1_only(mut self, weight1_only: bool) -> Self {
        self.weight1_only = weight1_only;
        self
    }

    pub fn with_idle(mut self, idle: bool) -> Self {
        self.idle = idle;
        self
    }

    pub fn with_basis(mut self, basis: Option<ErrorBasis>) -> Self {
        self.basis = basis;
        self
    }
}

/// A multi-stage flagged syndrome-extraction gadget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gadget {
    num_data: usize,
    stages: Vec<Circuit>,
    syndrome_positions: Vec<usize>,
    lut: LookupTable,
    correction: Pauli,
}

impl Gadget {
    /// Create a new gadget.
    ///
    /// All stages must act on the same register, whose first `num_data`
    /// qubits are data. `syndrome_positions[s]` is the index, among the
    /// ancillas, of the syndrome bit measured at the end of stage `s`. Single
    /// qubit entries of `lut` are applied as `correction`.
    pub fn new(
        num_data: usize,
        stages: Vec<Circuit>,
        syndrome_positions: Vec<usize>,
        lut: LookupTable,
        correction: Pauli,
    ) -> FTResult<Self>
    {
        let n = stages.first().ok_or(FTError::Empty("gadget"))?.num_qubits();
        if let Some(bad) = stages.iter().find(|s| s.num_qubits() != n) {
            return Err(FTError::LengthMismatch(n, bad.num_qubits()));
        }
        if num_data > n {
            return Err(FTError::InvalidGadget(
                format!("{} data qubits in a {}-qubit register", num_data, n)));
        }
        if syndrome_positions.len() != stages.len() {
            return Err(FTError::InvalidGadget(
                format!(
                    "{} syndrome positions for {} stages",
                    syndrome_positions.len(), stages.len(),
                )
            ));
        }
        if let Some(&p) = syndrome_positions.iter().find(|p| **p >= n - num_data) {
            return Err(FTError::InvalidGadget(
                format!("syndrome position {} with {} ancillas", p, n - num_data)));
        }
        if lut.width() != stages.len() {
            return Err(FTError::InvalidGadget(
                format!(
                    "lookup table of width {} for {} stages",
                    lut.width(), stages.len(),
                )
            ));
        }
        Ok(Self { num_data, stages, syndrome_positions, lut, correction })
    }

    /// Return the number of data qubits.
    pub fn num_data(&self) -> usize { self.num_data }

    /// Return the total number of qubits.
    pub fn num_qubits(&self) -> usize { self.stages[0].num_qubits() }

    /// Return the number of ancillas.
    pub fn num_ancillas(&self) -> usize { self.num_qubits() - self.num_data }

    pub fn stages(&self) -> &[Circuit] { &self.stages }

    pub fn syndrome_positions(&self) -> &[usize] { &self.syndrome_positions }

    pub fn lut(&self) -> &LookupTable { &self.lut }

    /// Return the Pauli applied for single-qubit lookup-table entries.
    pub fn correction(&self) -> Pauli { self.correction }

    /// Return a copy of `self` with a different lookup table.
    pub fn with_lut(&self, lut: LookupTable) -> FTResult<Self> {
        Self::new(
            self.num_data,
            self.stages.clone(),
            self.syndrome_positions.clone(),
            lut,
            self.correction,
        )
    }
}

// inject every fault at every location of one stage and propagate it to the
// end of that stage
fn inject(
    stage_idx: usize,
    stage: &Circuit,
    idle: bool,
    faults: &FaultSet,
    num_data: usize,
) -> FTResult<Vec<LocationRecord>>
{
    let n = stage.num_qubits();
    let locations
        = (0..n).filter(|_| idle).map(Location::Idle)
        .chain((0..stage.len()).map(Location::Gate));
    let mut records: Vec<LocationRecord> = Vec::new();
    for loc in locations {
        let Some(gate) = loc.gate(stage) else { continue; };
        let positions = gate.qubits();
        for fault in faults.for_arity(positions.len()) {
            let start = fault.place(n, &positions)?;
            let error = propagate_from(start, stage, loc)?;
            records.push(
                LocationRecord::new(stage_idx, loc, gate, fault.clone(), error, num_data)?);
        }
    }
    Ok(records)
}

fn check_group(group: &StabilizerGroup, num_data: usize) -> FTResult<()> {
    if !group.is_empty() && group.num_qubits() != num_data {
        Err(FTError::LengthMismatch(num_data, group.num_qubits()))
    } else {
        Ok(())
    }
}

/// Per-location results of a fault-tolerance check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FTReport {
    records: Vec<LocationRecord>,
}

impl FTReport {
    /// Return all records, in injection order.
    pub fn records(&self) -> &[LocationRecord] { &self.records }

    /// Return the number of injected faults.
    pub fn len(&self) -> usize { self.records.len() }

    /// Return `true` if no faults were injected.
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Count records with a given verdict.
    pub fn count(&self, verdict: Verdict) -> usize {
        self.records.iter().filter(|r| r.verdict == Some(verdict)).count()
    }

    /// Iterate over records that violate fault tolerance.
    pub fn violations(&self) -> impl Iterator<Item = &LocationRecord> + '_ {
        self.records.iter().filter(|r| r.verdict == Some(Verdict::Violation))
    }

    /// Return `true` if no record is a violation.
    pub fn is_fault_tolerant(&self) -> bool { self.violations().next().is_none() }

    /// Return a tabular listing of all records.
    pub fn table(&self) -> LocationTable<'_> { LocationTable(&self.records) }
}

impl fmt::Display for FTReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.table().fmt(f)
    }
}

/// Driver for checking a [`Gadget`] against a code.
#[derive(Clone, Debug)]
pub struct FaultToleranceChecker<'a> {
    gadget: &'a Gadget,
    group: &'a StabilizerGroup,
    config: CheckConfig,
}

impl<'a> FaultToleranceChecker<'a> {
    /// Create a new checker. `group` is the stabilizer group of the code on
    /// the gadget's data qubits.
    pub fn new(gadget: &'a Gadget, group: &'a StabilizerGroup, config: CheckConfig)
        -> Self
    {
        Self { gadget, group, config }
    }

    pub fn config(&self) -> &CheckConfig { &self.config }

    /// Create a record for every fault at every location, with errors
    /// propagated to the end of their own stages.
    pub fn enumerate(&self) -> FTResult<Vec<LocationRecord>> {
        check_group(self.group, self.gadget.num_data())?;
        let faults
            = FaultSet::enumerate(&self.config.alphabet, self.config.weight1_only);
        let mut records: Vec<LocationRecord> = Vec::new();
        for (s, stage) in self.gadget.stages().iter().enumerate() {
            let idle = s == 0 && self.config.idle;
            records.append(
                &mut inject(s, stage, idle, &faults, self.gadget.num_data())?);
        }
        Ok(records)
    }

    /// Carry a record from the end of its stage through the rest of the
    /// pipeline and assign it a verdict.
    ///
    /// Fails if an unflagged fault produces a syndrome that the lookup table
    /// does not cover; flagged faults with such syndromes are rejected
    /// uncorrected.
    pub fn process(&self, mut record: LocationRecord) -> FTResult<LocationRecord> {
        let nd = self.gadget.num_data();
        let mut outcomes: Vec<BitString>
            = vec![BitString::zeros(self.gadget.num_ancillas()); record.stage];
        let (first, error) = reset_ancillas(&record.error, nd);
        outcomes.push(first);
        let later: &[Circuit]
            = self.gadget.stages().get(record.stage + 1..).unwrap_or(&[]);
        let error = propagate_multi_stage(error, later, |_, e| {
            let (o, reset) = reset_ancillas(&e, nd);
            outcomes.push(o);
            Ok(reset)
        })?;
        let sf = extract_syndrome_and_flags(&outcomes, self.gadget.syndrome_positions())?;
        let residual = error.split_at(nd).0;

        let correction
            = match (self.gadget.lut().get(&sf.syndrome), sf.flag) {
                (Some(c), _) => Some(c.to_pauli_string(nd, self.gadget.correction())?),
                (None, true) => None,
                (None, false) => {
                    return Err(FTError::UnknownSyndrome(sf.syndrome.to_string()));
                },
            };
        let corrected = match &correction {
            Some(c) => residual.compose(c),
            None => residual.clone(),
        };
        let (reduced, reduced_weight) = self.group.lowest_weight_equivalent(&corrected);
        let mut weight = reduced_weight;
        if let Some(basis) = self.config.basis {
            let stripped = basis.strip(&reduced);
            weight = stripped.weight();
            record.stripped = Some((stripped, weight));
        }
        let verdict = Verdict::classify(sf.flag, weight);

        record.outcomes = Some(outcomes);
        record.syndrome = Some(sf.syndrome);
        record.flag = Some(sf.flag);
        record.residual = Some(residual);
        record.corrected = correction.map(|_| corrected);
        record.reduced = Some((reduced, reduced_weight));
        record.verdict = Some(verdict);
        trace!(
            "stage {} location {} {} fault {}: {} -> {}",
            record.stage, record.location, record.gate, record.fault,
            record.final_error(), verdict,
        );
        if verdict.is_violation() {
            debug!(
                "violation at stage {} location {} ({}), fault {}: syndrome {}, error {}",
                record.stage, record.location, record.gate, record.fault,
                record.syndrome.as_ref().map(|s| s.to_string()).unwrap_or_default(),
                record.current_error(),
            );
        }
        Ok(record)
    }

    /// Enumerate, process, and classify every fault.
    pub fn run(&self) -> FTResult<FTReport> {
        let records: Vec<LocationRecord>
            = self.enumerate()?.into_iter()
            .map(|r| self.process(r))
            .collect::<FTResult<_>>()?;
        let report = FTReport { records };
        info!(
            "checked {} fault locations: {} accepted, {} rejected, {} violations",
            report.len(),
            report.count(Verdict::Accepted),
            report.count(Verdict::Rejected),
            report.count(Verdict::Violation),
        );
        Ok(report)
    }

    /// Return `true` if no single fault leads to a violation.
    pub fn check_ft(&self) -> FTResult<bool> {
        Ok(self.run()?.is_fault_tolerant())
    }
}

/// Propagate every fault of a single circuit to its end.
///
/// The first `num_data` qubits are data. Returns every record along with the
/// "bad" ones, whose data error has weight greater than 1.
pub fn bad_locations(circuit: &Circuit, num_data: usize, config: &CheckConfig)
    -> FTResult<(Vec<LocationRecord>, Vec<LocationRecord>)>
{
    let faults = FaultSet::enumerate(&config.alphabet, config.weight1_only);
    let all = inject(0, circuit, config.idle, &faults, num_data)?;
    let bad: Vec<LocationRecord>
        = all.iter().filter(|r| r.data_error().weight() > 1).cloned().collect();
    debug!("{} of {} locations are bad", bad.len(), all.len());
    Ok((all, bad))
}

/// Attach the lowest-weight equivalent of each record's current data error.
///
/// Returns the updated records along with those still heavier than 1.
pub fn modulo_stabilizers(records: Vec<LocationRecord>, group: &StabilizerGroup)
    -> FTResult<(Vec<LocationRecord>, Vec<LocationRecord>)>
{
    let mut updated: Vec<LocationRecord> = Vec::with_capacity(records.len());
    let mut remaining: Vec<LocationRecord> = Vec::new();
    for mut rec in records.into_iter() {
        check_group(group, rec.num_data)?;
        rec.reduced = Some(group.lowest_weight_equivalent(&rec.current_error()));
        if rec.weight() > 1 { remaining.push(rec.clone()); }
        updated.push(rec);
    }
    Ok((updated, remaining))
}

/// Strip each record's current data error to `basis`.
///
/// Returns the updated records along with those still heavier than 1.
pub fn strip_basis(records: Vec<LocationRecord>, basis: ErrorBasis)
    -> (Vec<LocationRecord>, Vec<LocationRecord>)
{
    let mut updated: Vec<LocationRecord> = Vec::with_capacity(records.len());
    let mut remaining: Vec<LocationRecord> = Vec::new();
    for mut rec in records.into_iter() {
        let stripped = basis.strip(&rec.current_error());
        let w = stripped.weight();
        rec.stripped = Some((stripped, w));
        if w > 1 { remaining.push(rec.clone()); }
        updated.push(rec);
    }
    (updated, remaining)
}
