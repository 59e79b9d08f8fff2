//! Stabilizer groups of error-correcting codes, up to phase.
//!
//! A code on *n* data qubits is given by *k* commuting, independent generators.
//! The full group contains every product of a subset of the generators; two
//! errors that differ by a group element act identically on the code space, so
//! an error only needs to be fixed up to multiplication by the group.
//!
//! The group is enumerated explicitly (2<sup>*k*</sup> − 1 non-trivial
//! elements), which is cheap for the small codes flag gadgets are designed
//! for. Elements are stored in a fixed order: the generators themselves, then
//! products of every pair of generators, then every triple, and so on, with
//! each size enumerated in lexicographic order of generator indices and
//! repeated values dropped. The identity is implicit and never stored.

use std::fmt;
use itertools::Itertools;
use rustc_hash::FxHashSet as HashSet;
use crate::{ FTError, FTResult, pauli::PauliString };

/// The full (phase-free) stabilizer group generated by a set of Pauli strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StabilizerGroup {
    n: usize,
    generators: Vec<PauliString>,
    elements: Vec<PauliString>,
}

impl StabilizerGroup {
    /// Compute the closure of a set of generators.
    ///
    /// Fails if the generators do not all have the same length.
    pub fn close<I>(generators: I) -> FTResult<Self>
    where I: IntoIterator<Item = PauliString>
    {
        let generators: Vec<PauliString> = generators.into_iter().collect();
        let n: usize = generators.first().map(|g| g.len()).unwrap_or(0);
        if let Some(bad) = generators.iter().find(|g| g.len() != n) {
            return Err(FTError::LengthMismatch(n, bad.len()));
        }
        let mut seen: HashSet<PauliString> = HashSet::default();
        let mut elements: Vec<PauliString> = Vec::new();
        let k = generators.len();
        for size in 1..=k {
            for combo in (0..k).combinations(size) {
                let mut prod = generators[combo[0]].clone();
                combo[1..].iter().for_each(|j| { prod *= &generators[*j]; });
                if !prod.is_identity() && seen.insert(prod.clone()) {
                    elements.push(prod);
                }
            }
        }
        Ok(Self { n, generators, elements })
    }

    /// Parse generators from strings and compute their closure.
    pub fn from_strs(generators: &[&str]) -> FTResult<Self> {
        let generators: Vec<PauliString>
            = generators.iter().map(|s| s.parse()).collect::<FTResult<_>>()?;
        Self::close(generators)
    }

    /// Return the number of qubits the group acts on.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the generators as given.
    pub fn generators(&self) -> &[PauliString] { &self.generators }

    /// Return all non-identity elements, in enumeration order.
    pub fn elements(&self) -> &[PauliString] { &self.elements }

    /// Return the number of stored (non-identity) elements.
    pub fn len(&self) -> usize { self.elements.len() }

    /// Return `true` if the group is trivial.
    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    /// Return `true` if `p` is in the group; the identity always is.
    pub fn contains(&self, p: &PauliString) -> bool {
        p.is_identity() || self.elements.contains(p)
    }

    /// Find the lowest-weight string equivalent to `error` modulo the group,
    /// and its weight.
    ///
    /// `error` itself is the first candidate; a group product only replaces
    /// the current best if it is strictly lighter, so ties resolve to the
    /// earliest candidate in enumeration order.
    ///
    /// *Panics if `error` does not act on the group's qubits.*
    pub fn lowest_weight_equivalent(&self, error: &PauliString)
        -> (PauliString, usize)
    {
        let mut best = error.clone();
        let mut best_weight = error.weight();
        for g in self.elements.iter() {
            let candidate = g.compose(error);
            let w = candidate.weight();
            if w < best_weight {
                best = candidate;
                best_weight = w;
            }
        }
        (best, best_weight)
    }

    /// List `error` and every group product with it, sorted by weight.
    ///
    /// The sort is stable, so `error` comes first among the lightest
    /// candidates if it is one of them.
    ///
    /// *Panics if `error` does not act on the group's qubits.*
    pub fn stab_equiv(&self, error: &PauliString) -> Vec<PauliString> {
        let mut equiv: Vec<PauliString>
            = std::iter::once(error.clone())
            .chain(self.elements.iter().map(|g| g.compose(error)))
            .collect();
        equiv.sort_by_key(|p| p.weight());
        equiv
    }

    /// Return `true` if `a` and `b` differ by a group element.
    ///
    /// *Panics if `a` and `b` have different lengths.*
    pub fn are_equivalent(&self, a: &PauliString, b: &PauliString) -> bool {
        self.contains(&a.compose(b))
    }
}

impl fmt::Display for StabilizerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.elements.len();
        for (k, g) in self.elements.iter().enumerate() {
            g.fmt(f)?;
            if k < n - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}
