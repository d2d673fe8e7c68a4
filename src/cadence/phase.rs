/// Alignment of the 5-field 3:2 repeat cycle relative to the current top field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// First field of film frame A.
    AA,
    /// A/B field boundary.
    AB,
    /// B/C field boundary.
    BC,
    /// Film frame C.
    CC,
    /// Film frame D.
    DD,
}

/// Which frame a film-mode field is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FieldSource {
    /// The frame before the current one.
    Previous,
    /// The current frame.
    Current,
}

impl Phase {
    /// Every phase in cycle order.
    pub const ALL: [Phase; 5] = [Phase::AA, Phase::AB, Phase::BC, Phase::CC, Phase::DD];

    /// Position in the cycle, `0..5`.
    pub fn index(self) -> usize {
        match self {
            Phase::AA => 0,
            Phase::AB => 1,
            Phase::BC => 2,
            Phase::CC => 3,
            Phase::DD => 4,
        }
    }

    /// Phase at cycle position `i`.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// One-hot encoding (`AA = 1` .. `DD = 16`).
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Decode a one-hot value; anything else is `None`.
    pub fn from_bit(bit: u8) -> Option<Self> {
        if !bit.is_power_of_two() {
            return None;
        }
        Self::from_index(bit.trailing_zeros() as usize)
    }

    /// The phase one top field later; `DD` wraps to `AA`.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Frame that supplies the output for this field while film mode holds.
    pub fn source(self, bottom_field: bool) -> FieldSource {
        let previous = match self {
            Phase::AA | Phase::DD => !bottom_field,
            Phase::AB => true,
            Phase::BC => bottom_field,
            Phase::CC => false,
        };
        if previous {
            FieldSource::Previous
        } else {
            FieldSource::Current
        }
    }

    /// Whether this field produces no output while film mode holds.
    ///
    /// Over one cycle four of the ten fields are shown, which restores the film rate.
    pub fn drops(self, bottom_field: bool) -> bool {
        match self {
            Phase::AA | Phase::DD => !bottom_field,
            Phase::AB => true,
            Phase::BC | Phase::CC => bottom_field,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::AA => "AA",
            Phase::AB => "AB",
            Phase::BC => "BC",
            Phase::CC => "CC",
            Phase::DD => "DD",
        };
        f.write_str(s)
    }
}

/// Set of phases, stored as the union of their one-hot bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhaseSet(u8);

impl PhaseSet {
    /// No phase.
    pub const EMPTY: Self = Self(0);

    /// Add `p`.
    pub fn insert(&mut self, p: Phase) {
        self.0 |= p.bit();
    }

    /// Return `true` when `p` is a member.
    pub fn contains(self, p: Phase) -> bool {
        self.0 & p.bit() != 0
    }

    /// Return `true` when no phase is a member.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest-indexed member.
    pub fn first(self) -> Option<Phase> {
        self.iter().next()
    }

    /// Members in cycle order.
    pub fn iter(self) -> impl Iterator<Item = Phase> {
        Phase::ALL.into_iter().filter(move |p| self.contains(*p))
    }

    /// Raw bitmask.
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl FromIterator<Phase> for PhaseSet {
    fn from_iter<I: IntoIterator<Item = Phase>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for p in iter {
            set.insert(p);
        }
        set
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cadence/phase.rs"]
mod tests;
