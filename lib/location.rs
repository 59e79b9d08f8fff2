//! Per-fault records carried through the checking pipeline, and a tabular
//! listing of them.
//!
//! A [`LocationRecord`] is created once per injected fault and filled in as the
//! fault moves through the pipeline: propagation, ancilla outcomes, syndrome
//! and flag, correction, stabilizer reduction, basis stripping, and finally a
//! [`Verdict`]. Fields for stages a record has not reached are `None`.

use std::fmt;
use crate::{
    FTError,
    FTResult,
    fault::Fault,
    gate::Gate,
    pauli::PauliString,
    propagate::Location,
    syndrome::BitString,
};

/// Outcome of checking one fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// No flag, and the final error has weight at most 1.
    Accepted,
    /// A flag was raised; the run is discarded.
    Rejected,
    /// No flag, but the final error has weight greater than 1.
    Violation,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
            Self::Violation => write!(f, "violation"),
        }
    }
}

impl Verdict {
    /// Classify a fault from its flag and final weight.
    pub fn classify(flag: bool, weight: usize) -> Self {
        match (flag, weight) {
            (true, _) => Self::Rejected,
            (false, w) if w <= 1 => Self::Accepted,
            (false, _) => Self::Violation,
        }
    }

    /// Return `true` if `self` is `Accepted`.
    pub fn is_accepted(&self) -> bool { matches!(self, Self::Accepted) }

    /// Return `true` if `self` is `Rejected`.
    pub fn is_rejected(&self) -> bool { matches!(self, Self::Rejected) }

    /// Return `true` if `self` is `Violation`.
    pub fn is_violation(&self) -> bool { matches!(self, Self::Violation) }
}

/// Everything known about one injected fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationRecord {
    /// Stage the fault occurs in.
    pub stage: usize,
    pub location: Location,
    /// Gate at the location; [`Gate::I`] for idle locations.
    pub gate: Gate,
    pub fault: Fault,
    /// Error on the whole register at the end of the fault's stage, before
    /// any ancilla is measured.
    pub error: PauliString,
    pub num_data: usize,
    /// Ancilla outcomes of every stage.
    pub outcomes: Option<Vec<BitString>>,
    pub syndrome: Option<BitString>,
    pub flag: Option<bool>,
    /// Data error after the last stage.
    pub residual: Option<PauliString>,
    /// Data error after applying the lookup-table correction.
    pub corrected: Option<PauliString>,
    /// Lowest-weight equivalent data error and its weight.
    pub reduced: Option<(PauliString, usize)>,
    /// Reduced error with one Pauli type removed, and its weight.
    pub stripped: Option<(PauliString, usize)>,
    pub verdict: Option<Verdict>,
}

impl LocationRecord {
    /// Create a new record for a fault whose error, propagated to the end of
    /// its stage, is `error`.
    pub fn new(
        stage: usize,
        location: Location,
        gate: Gate,
        fault: Fault,
        error: PauliString,
        num_data: usize,
    ) -> FTResult<Self>
    {
        if num_data > error.len() {
            return Err(FTError::LengthMismatch(error.len(), num_data));
        }
        Ok(Self {
            stage,
            location,
            gate,
            fault,
            error,
            num_data,
            outcomes: None,
            syndrome: None,
            flag: None,
            residual: None,
            corrected: None,
            reduced: None,
            stripped: None,
            verdict: None,
        })
    }

    /// Return the data part of [`error`][Self::error].
    pub fn data_error(&self) -> PauliString {
        self.error.split_at(self.num_data).0
    }

    /// Return the ancilla part of [`error`][Self::error].
    pub fn ancilla_error(&self) -> PauliString {
        self.error.split_at(self.num_data).1
    }

    /// Render [`error`][Self::error] as `data|ancilla`.
    pub fn final_error(&self) -> String {
        let (data, anc) = self.error.split_at(self.num_data);
        format!("{}|{}", data, anc)
    }

    /// Return the most processed data error available: stripped, reduced,
    /// corrected, residual, or else the data part of `error`.
    pub fn current_error(&self) -> PauliString {
        self.stripped.as_ref().map(|(p, _)| p.clone())
            .or_else(|| self.reduced.as_ref().map(|(p, _)| p.clone()))
            .or_else(|| self.corrected.clone())
            .or_else(|| self.residual.clone())
            .unwrap_or_else(|| self.data_error())
    }

    /// Return the weight of [`current_error`][Self::current_error].
    pub fn weight(&self) -> usize {
        self.stripped.as_ref().map(|(_, w)| *w)
            .or_else(|| self.reduced.as_ref().map(|(_, w)| *w))
            .unwrap_or_else(|| self.current_error().weight())
    }
}

/// Tabular listing of records.
///
/// Columns are `idx gate location fault final_error`, followed by
/// `equiv_error weight` if any record has been reduced and `stripped weight`
/// if any record has been stripped. Gate positions are listed counting from
/// 1.
#[derive(Copy, Clone, Debug)]
pub struct LocationTable<'a>(pub &'a [LocationRecord]);

impl<'a> fmt::Display for LocationTable<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reduced = self.0.iter().any(|r| r.reduced.is_some());
        let stripped = self.0.iter().any(|r| r.stripped.is_some());
        write!(f, " idx  gate  location  fault  final_error")?;
        if reduced { write!(f, "  equiv_error  weight")?; }
        if stripped { write!(f, "  stripped  weight")?; }
        for rec in self.0.iter() {
            writeln!(f)?;
            let positions: Vec<String>
                = rec.gate.qubits().iter().map(|k| (k + 1).to_string()).collect();
            write!(
                f,
                "{:^5}{:^6}{:^10}{:^7}{:^13}",
                rec.location.to_string(),
                rec.gate.name(),
                format!("[{}]", positions.join(", ")),
                rec.fault.to_string(),
                rec.final_error(),
            )?;
            if reduced {
                match &rec.reduced {
                    Some((p, w)) => write!(f, "{:^13}{:^8}", p.to_string(), w)?,
                    None => write!(f, "{:^13}{:^8}", "", "")?,
                }
            }
            if stripped {
                match &rec.stripped {
                    Some((p, w)) => write!(f, "{:^13}{:^8}", p.to_string(), w)?,
                    None => write!(f, "{:^13}{:^8}", "", "")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record() -> LocationRecord {
        LocationRecord::new(
            0,
            Location::Gate(2),
            Gate::CX(2, 4),
            Fault::parse("ZZ").unwrap(),
            "--ZZZ".parse().unwrap(),
            4,
        ).unwrap()
    }

    #[test]
    fn verdicts() {
        assert_eq!(Verdict::classify(true, 5), Verdict::Rejected);
        assert_eq!(Verdict::classify(true, 0), Verdict::Rejected);
        assert_eq!(Verdict::classify(false, 1), Verdict::Accepted);
        assert_eq!(Verdict::classify(false, 2), Verdict::Violation);
    }

    #[test]
    fn parts() {
        let rec = record();
        assert_eq!(rec.final_error(), "--ZZ|Z");
        assert_eq!(rec.data_error().to_string(), "--ZZ");
        assert_eq!(rec.ancilla_error().to_string(), "Z");
        assert_eq!(rec.weight(), 2);
        assert!(LocationRecord::new(
            0, Location::Idle(0), Gate::I(0), Fault::parse("X").unwrap(),
            "X-".parse().unwrap(), 3,
        ).is_err());
    }

    #[test]
    fn table() {
        let mut rec = record();
        let table = LocationTable(std::slice::from_ref(&rec)).to_string();
        assert_eq!(
            table,
            " idx  gate  location  fault  final_error\n  2    CX    [3, 5]    ZZ      --ZZ|Z    ",
        );
        rec.reduced = Some(("--ZZ".parse().unwrap(), 2));
        let table = LocationTable(std::slice::from_ref(&rec)).to_string();
        assert!(table.starts_with(" idx  gate  location  fault  final_error  equiv_error  weight\n"));
        assert!(table.ends_with("    --ZZ        2    "));
        assert_eq!(rec.current_error().to_string(), "--ZZ");
    }
}
