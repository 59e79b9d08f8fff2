//! Named fixtures: stabilizer codes, gate sequences, lookup tables, and
//! assembled gadgets.
//!
//! A [`Registry`] is an ordinary value; build one with [`Registry::builtin`]
//! (or start from [`Registry::new`] and add your own) and pass it to whatever
//! needs fixtures.
//!
//! References:
//! - Goto (efficient Steane encoding):
//!   [Sci. Rep. 6, 19578][goto]
//! - Aliferis, Gottesman, Preskill (DiVincenzo-Shor cat encoding, Fig. 6):
//!   [arXiv:quant-ph/0504218][agp]
//!
//! [goto]: https://www.nature.com/articles/srep19578
//! [agp]: https://arxiv.org/abs/quant-ph/0504218

use rustc_hash::FxHashMap as HashMap;
use crate::{
    FTError,
    FTResult,
    ft::Gadget,
    gate::Circuit,
    lut::{ Correction, LookupTable },
    pauli::{ Pauli, PauliString },
    stab::StabilizerGroup,
};

type Sequence = &'static [(&'static str, &'static [usize])];

const BITFLIP_CODE: &[&str] = &["ZZ-", "-ZZ"];

const STEANE_CODE_GOTO: &[&str] = &[
    "---ZZZZ", "ZZ--ZZ-", "Z-Z-Z-Z",
    "---XXXX", "XX--XX-", "X-X-X-X",
];

const STEANE_CODE: &[&str] = &[
    "ZZZZ---", "-ZZ-ZZ-", "--ZZ-ZZ",
    "XXXX---", "-XX-XX-", "--XX-XX",
];

const GOTO_1C: Sequence = &[
    ("H", &[1]), ("H", &[2]), ("H", &[3]),
    ("CX", &[1, 0]), ("CX", &[3, 5]),
    ("CX", &[2, 6]),
    ("CX", &[1, 4]),
    ("CX", &[2, 0]), ("CX", &[3, 6]),
    ("CX", &[1, 5]),
    ("CX", &[6, 4]),
];

const ZZZZ_NONFT: Sequence = &[
    ("CX", &[0, 4]),
    ("CX", &[1, 4]),
    ("CX", &[2, 4]),
    ("CX", &[3, 4]),
];

const CAT_ENCODING_DIVINCENZO_SHOR: Sequence = &[
    ("H", &[1]),
    ("CX", &[1, 2]),
    ("CX", &[1, 0]), ("CX", &[2, 3]),
];

// ancillas end in the X basis; trailing Hadamards rotate them back for a
// Z-basis readout
const FLAG_BRIDGE_CZ_SINGLE: Sequence = &[
    ("H", &[4]), ("H", &[5]), ("H", &[6]),
    ("CZ", &[4, 5]),
    ("H", &[5]),
    ("CZ", &[5, 6]),
    ("CZ", &[0, 4]),
    ("CZ", &[1, 4]),
    ("CZ", &[2, 5]), ("H", &[6]),
    ("CZ", &[3, 6]),
    ("H", &[6]),
    ("CZ", &[5, 6]),
    ("H", &[5]),
    ("CZ", &[4, 5]),
    ("H", &[4]), ("H", &[5]), ("H", &[6]),
];

// detects X errors through the Z parity of qubits 0 1 2 3
const FLAG_BRIDGE_CZ_SX1: Sequence = &[
    ("H", &[7]), ("H", &[8]), ("H", &[9]),
    ("CZ", &[7, 8]),
    ("H", &[8]),
    ("CZ", &[8, 9]), ("CZ", &[0, 7]),
    ("CZ", &[1, 7]),
    ("CZ", &[2, 8]), ("H", &[9]),
    ("CZ", &[3, 9]),
    ("H", &[9]),
    ("CZ", &[8, 9]),
    ("H", &[8]),
    ("CZ", &[7, 8]),
    ("H", &[7]), ("H", &[8]), ("H", &[9]),
];

// detects X errors through the Z parity of qubits 1 2 4 5
const FLAG_BRIDGE_CZ_SX2: Sequence = &[
    ("H", &[8]), ("H", &[7]), ("H", &[9]),
    ("CZ", &[8, 7]),
    ("H", &[7]),
    ("CZ", &[7, 9]), ("CZ", &[2, 8]),
    ("CZ", &[4, 8]),
    ("CZ", &[1, 7]), ("H", &[9]),
    ("CZ", &[5, 9]),
    ("H", &[9]),
    ("CZ", &[7, 9]),
    ("H", &[7]),
    ("CZ", &[8, 7]),
    ("H", &[8]), ("H", &[7]), ("H", &[9]),
];

// detects X errors through the Z parity of qubits 2 3 5 6
const FLAG_BRIDGE_CZ_SX3: Sequence = &[
    ("H", &[10]), ("H", &[8]), ("H", &[9]),
    ("CZ", &[10, 8]),
    ("H", &[8]),
    ("CZ", &[8, 9]), ("CZ", &[5, 10]),
    ("CZ", &[6, 10]),
    ("CZ", &[2, 8]), ("H", &[9]),
    ("CZ", &[3, 9]),
    ("H", &[9]),
    ("CZ", &[8, 9]),
    ("H", &[8]),
    ("CZ", &[10, 8]),
    ("H", &[10]), ("H", &[8]), ("H", &[9]),
];

const STEANE_X_CHECKS: &[(&str, Option<usize>)] = &[
    ("000", None),
    ("100", Some(3)), ("010", Some(1)), ("001", Some(0)),
    ("110", Some(5)), ("101", Some(4)), ("011", Some(2)),
    ("111", Some(6)),
];

// single-qubit X corrections for the three Z checks of `steane_code`
const STEANE_FLAG_BRIDGE_INDEX: &[(&str, Option<usize>)] = &[
    ("000", None),
    ("100", Some(0)), ("010", Some(4)), ("001", Some(6)),
    ("110", Some(1)), ("101", Some(3)), ("011", Some(5)),
    ("111", Some(2)),
];

// as above, but `001` is left uncorrected; with the single-qubit entry some
// unflagged CZ faults in the last two stages end in weight-2 errors
const STEANE_FLAG_BRIDGE: &[(&str, &str)] = &[
    ("000", "-------"),
    ("100", "X------"), ("010", "----X--"), ("001", "-------"),
    ("110", "-X-----"), ("101", "---X---"), ("011", "-----X-"),
    ("111", "--X----"),
];

fn parse_code(stabilizers: &[&str]) -> FTResult<Vec<PauliString>> {
    stabilizers.iter().map(|s| s.parse()).collect()
}

fn index_lut(entries: &[(&'static str, Option<usize>)]) -> FTResult<LookupTable> {
    let width = entries.first().map(|(s, _)| s.len()).unwrap_or(0);
    LookupTable::from_entries(
        width,
        entries.iter().map(|(s, k)| (*s, k.map_or(Correction::None, Correction::Qubit))),
    )
}

fn pauli_lut(entries: &[(&'static str, &'static str)]) -> FTResult<LookupTable> {
    let width = entries.first().map(|(s, _)| s.len()).unwrap_or(0);
    let entries: Vec<(&str, Correction)>
        = entries.iter()
        .map(|(s, p)| {
            let p: PauliString = p.parse()?;
            let c = if p.is_identity() { Correction::None } else { Correction::Pauli(p) };
            Ok((*s, c))
        })
        .collect::<FTResult<_>>()?;
    LookupTable::from_entries(width, entries)
}

/// A collection of named fixtures.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    codes: HashMap<String, Vec<PauliString>>,
    sequences: HashMap<String, Circuit>,
    luts: HashMap<String, LookupTable>,
    gadgets: HashMap<String, Gadget>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self { Self::default() }

    /// Create a registry holding every built-in fixture.
    ///
    /// Codes: `bitflip_code`, `steane_code_goto`, `steane_code`.
    ///
    /// Sequences: `goto_1c`, `zzzz_nonft`, `cat_encoding_divincenzo_shor`,
    /// `flag_bridge_cz_single`, `flag_bridge_cz_sx1`, `flag_bridge_cz_sx2`,
    /// `flag_bridge_cz_sx3`.
    ///
    /// Lookup tables: `steane_x_checks`, `steane_flag_bridge_index`,
    /// `steane_flag_bridge`.
    ///
    /// Gadgets: `steane_flag_bridge`, the three flag-bridge *Z* checks of
    /// `steane_code` (detecting *X* errors) in sequence on 7 data qubits and 4 ancillas.
    pub fn builtin() -> FTResult<Self> {
        let mut reg = Self::new();
        reg.add_code("bitflip_code", parse_code(BITFLIP_CODE)?)
            .add_code("steane_code_goto", parse_code(STEANE_CODE_GOTO)?)
            .add_code("steane_code", parse_code(STEANE_CODE)?);

        let sequences: [(&str, usize, Sequence); 7] = [
            ("goto_1c", 7, GOTO_1C),
            ("zzzz_nonft", 5, ZZZZ_NONFT),
            ("cat_encoding_divincenzo_shor", 4, CAT_ENCODING_DIVINCENZO_SHOR),
            ("flag_bridge_cz_single", 7, FLAG_BRIDGE_CZ_SINGLE),
            ("flag_bridge_cz_sx1", 11, FLAG_BRIDGE_CZ_SX1),
            ("flag_bridge_cz_sx2", 11, FLAG_BRIDGE_CZ_SX2),
            ("flag_bridge_cz_sx3", 11, FLAG_BRIDGE_CZ_SX3),
        ];
        for (name, n, seq) in sequences {
            reg.add_sequence(name, Circuit::from_description(n, seq.iter().copied())?);
        }

        reg.add_lut("steane_x_checks", index_lut(STEANE_X_CHECKS)?)
            .add_lut("steane_flag_bridge_index", index_lut(STEANE_FLAG_BRIDGE_INDEX)?)
            .add_lut("steane_flag_bridge", pauli_lut(STEANE_FLAG_BRIDGE)?);

        let stages: Vec<Circuit>
            = ["flag_bridge_cz_sx1", "flag_bridge_cz_sx2", "flag_bridge_cz_sx3"]
            .into_iter()
            .map(|name| reg.sequence(name).cloned())
            .collect::<FTResult<_>>()?;
        let gadget = Gadget::new(
            7,
            stages,
            vec![0, 1, 3],
            reg.lut("steane_flag_bridge")?.clone(),
            Pauli::X,
        )?;
        reg.add_gadget("steane_flag_bridge", gadget);
        Ok(reg)
    }

    /// Add or replace a code.
    pub fn add_code(&mut self, name: &str, stabilizers: Vec<PauliString>) -> &mut Self {
        self.codes.insert(name.to_string(), stabilizers);
        self
    }

    /// Add or replace a gate sequence.
    pub fn add_sequence(&mut self, name: &str, circuit: Circuit) -> &mut Self {
        self.sequences.insert(name.to_string(), circuit);
        self
    }

    /// Add or replace a lookup table.
    pub fn add_lut(&mut self, name: &str, lut: LookupTable) -> &mut Self {
        self.luts.insert(name.to_string(), lut);
        self
    }

    /// Add or replace a gadget.
    pub fn add_gadget(&mut self, name: &str, gadget: Gadget) -> &mut Self {
        self.gadgets.insert(name.to_string(), gadget);
        self
    }

    /// Return the stabilizer generators of a code.
    pub fn code(&self, name: &str) -> FTResult<&[PauliString]> {
        self.codes.get(name)
            .map(|c| c.as_slice())
            .ok_or_else(|| FTError::UnknownFixture("code", name.to_string()))
    }

    /// Return the full stabilizer group of a code.
    pub fn stabilizer_group(&self, name: &str) -> FTResult<StabilizerGroup> {
        StabilizerGroup::close(self.code(name)?.iter().cloned())
    }

    /// Return a gate sequence.
    pub fn sequence(&self, name: &str) -> FTResult<&Circuit> {
        self.sequences.get(name)
            .ok_or_else(|| FTError::UnknownFixture("sequence", name.to_string()))
    }

    /// Return a lookup table.
    pub fn lut(&self, name: &str) -> FTResult<&LookupTable> {
        self.luts.get(name)
            .ok_or_else(|| FTError::UnknownFixture("lookup table", name.to_string()))
    }

    /// Return a gadget.
    pub fn gadget(&self, name: &str) -> FTResult<&Gadget> {
        self.gadgets.get(name)
            .ok_or_else(|| FTError::UnknownFixture("gadget", name.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_fixtures() {
        let reg = Registry::builtin().unwrap();
        assert_eq!(reg.code("bitflip_code").unwrap().len(), 2);
        assert_eq!(reg.stabilizer_group("steane_code").unwrap().len(), 63);
        assert_eq!(reg.stabilizer_group("steane_code_goto").unwrap().len(), 63);
        assert_eq!(reg.sequence("goto_1c").unwrap().len(), 11);
        assert_eq!(reg.sequence("zzzz_nonft").unwrap().num_qubits(), 5);
        assert_eq!(reg.sequence("flag_bridge_cz_sx2").unwrap().len(), 18);
        assert!(reg.lut("steane_flag_bridge").unwrap().is_complete());
        assert!(reg.lut("steane_x_checks").unwrap().is_complete());
        let gadget = reg.gadget("steane_flag_bridge").unwrap();
        assert_eq!(gadget.num_qubits(), 11);
        assert_eq!(gadget.num_ancillas(), 4);
        assert_eq!(gadget.stages().len(), 3);
    }

    #[test]
    fn unknown_names() {
        let reg = Registry::builtin().unwrap();
        assert!(matches!(
            reg.code("surface_code"),
            Err(FTError::UnknownFixture("code", name)) if name == "surface_code",
        ));
        assert!(reg.sequence("nope").is_err());
        assert!(reg.lut("nope").is_err());
        assert!(reg.gadget("nope").is_err());
    }

    #[test]
    fn flag_bridge_checks_match_code() {
        // every data qubit touched by a stage belongs to the Z check it
        // measures
        let reg = Registry::builtin().unwrap();
        let code = reg.code("steane_code").unwrap();
        for (name, check) in
            ["flag_bridge_cz_sx1", "flag_bridge_cz_sx2", "flag_bridge_cz_sx3"]
                .into_iter().zip(&code[..3])
        {
            let touched: Vec<usize>
                = reg.sequence(name).unwrap().gates().iter()
                .flat_map(|g| g.qubits())
                .filter(|k| *k < 7)
                .collect();
            let support: Vec<usize> = check.support().collect();
            let mut sorted = touched.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, support, "{}", name);
        }
    }

    #[test]
    fn custom_fixtures() {
        let mut reg = Registry::new();
        reg.add_code("rep", vec!["ZZ".parse().unwrap()]);
        assert_eq!(reg.stabilizer_group("rep").unwrap().len(), 1);
        assert!(reg.gadget("steane_flag_bridge").is_err());
    }
}
