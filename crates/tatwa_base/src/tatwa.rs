//! Tatwa: one of five phases in a repeating 24-minute-per-phase cycle.
//!
//! The five tatwas follow a fixed order starting at the solar reference
//! event: Akash, Vayu, Teja, Prithvi, Apas. A full cycle lasts 120 minutes
//! and repeats indefinitely.
//!
//! A [`Tatwa`] is held in one of two modes:
//! - by name: only the phase is known, the cycle is taken as 1;
//! - by absolute position: a 1-based step count spanning all cycles.
//!
//! Name-mode arithmetic wraps around the five names and never leaves
//! cycle 1. Position-mode arithmetic shifts the absolute position and
//! fails below position 1.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::error::TatwaError;

/// Number of tatwas in one cycle.
pub const TATWA_COUNT: u8 = 5;

/// Duration of one tatwa in seconds (24 minutes).
pub const TATWA_SECONDS: i64 = 1440;

/// Duration of one full cycle in seconds (120 minutes).
pub const CYCLE_SECONDS: i64 = TATWA_SECONDS * TATWA_COUNT as i64;

/// The five canonical tatwas in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TatwaName {
    Akash,
    Vayu,
    Teja,
    Prithvi,
    Apas,
}

/// All five tatwas in order (0 = Akash, 4 = Apas).
pub const ALL_TATWAS: [TatwaName; 5] = [
    TatwaName::Akash,
    TatwaName::Vayu,
    TatwaName::Teja,
    TatwaName::Prithvi,
    TatwaName::Apas,
];

impl TatwaName {
    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Akash => "akash",
            Self::Vayu => "vayu",
            Self::Teja => "teja",
            Self::Prithvi => "prithvi",
            Self::Apas => "apas",
        }
    }

    /// Capitalized name for display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Akash => "Akash",
            Self::Vayu => "Vayu",
            Self::Teja => "Teja",
            Self::Prithvi => "Prithvi",
            Self::Apas => "Apas",
        }
    }

    /// 0-based index within the cycle (Akash=0 .. Apas=4).
    pub const fn index(self) -> u8 {
        match self {
            Self::Akash => 0,
            Self::Vayu => 1,
            Self::Teja => 2,
            Self::Prithvi => 3,
            Self::Apas => 4,
        }
    }

    /// All five tatwas in order.
    pub const fn all() -> &'static [TatwaName; 5] {
        &ALL_TATWAS
    }

    /// Tatwa at a cyclic index; any integer wraps modulo 5.
    pub fn from_index(index: i64) -> Self {
        wrap(i128::from(index))
    }

    /// Move `offset` steps around the cycle, wrapping in both directions.
    pub fn advance(self, offset: i64) -> Self {
        wrap(i128::from(self.index()) + i128::from(offset))
    }
}

fn wrap(index: i128) -> TatwaName {
    ALL_TATWAS[index.rem_euclid(i128::from(TATWA_COUNT)) as usize]
}

impl FromStr for TatwaName {
    type Err = TatwaError;

    /// Parse a tatwa name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ALL_TATWAS
            .iter()
            .copied()
            .find(|t| t.name() == normalized)
            .ok_or_else(|| TatwaError::InvalidName(s.to_string()))
    }
}

impl Display for TatwaName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which representation a [`Tatwa`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TatwaMode {
    Name,
    Position,
}

/// A position in the infinite five-tatwa cycle.
///
/// Equality, ordering and hashing all go through [`Tatwa::position`], so a
/// name-mode value compares as its cycle-1 position. Positions run from 1
/// to `i64::MAX`.
#[derive(Clone, Copy)]
pub struct Tatwa {
    repr: Repr,
}

#[derive(Clone, Copy)]
enum Repr {
    /// Phase only; the cycle is taken as 1.
    Named(TatwaName),
    /// 1-based absolute position across cycles, at most `i64::MAX`.
    Positioned(NonZeroU64),
}

impl Tatwa {
    /// Build a name-mode tatwa. Case and surrounding whitespace are ignored.
    pub fn by_name(name: &str) -> Result<Self, TatwaError> {
        Ok(Self::named(name.parse()?))
    }

    /// Build a position-mode tatwa. Fails for `position < 1`.
    pub fn by_position(position: i64) -> Result<Self, TatwaError> {
        u64::try_from(position)
            .ok()
            .and_then(NonZeroU64::new)
            .map(|p| Self { repr: Repr::Positioned(p) })
            .ok_or(TatwaError::InvalidPosition(position))
    }

    /// Position-mode tatwa for `name` in cycle 1.
    pub fn in_first_cycle(name: TatwaName) -> Self {
        Self {
            repr: Repr::Positioned(NonZeroU64::MIN.saturating_add(u64::from(name.index()))),
        }
    }

    const fn named(name: TatwaName) -> Self {
        Self { repr: Repr::Named(name) }
    }

    /// Active representation.
    pub fn mode(&self) -> TatwaMode {
        match self.repr {
            Repr::Named(_) => TatwaMode::Name,
            Repr::Positioned(_) => TatwaMode::Position,
        }
    }

    /// The phase this value falls on.
    pub fn tatwa_name(&self) -> TatwaName {
        match self.repr {
            Repr::Named(name) => name,
            Repr::Positioned(p) => ALL_TATWAS[((p.get() - 1) % u64::from(TATWA_COUNT)) as usize],
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        self.tatwa_name().name()
    }

    /// 1-based absolute position. Name mode assumes cycle 1.
    pub fn position(&self) -> u64 {
        match self.repr {
            Repr::Named(name) => u64::from(name.index()) + 1,
            Repr::Positioned(p) => p.get(),
        }
    }

    /// 1-based cycle number. Always 1 in name mode.
    pub fn cycle(&self) -> u64 {
        (self.position() - 1) / u64::from(TATWA_COUNT) + 1
    }

    /// Offset the tatwa by `offset` steps.
    ///
    /// Name mode wraps around the cycle and never fails. Position mode
    /// shifts the absolute position and fails if it would drop below 1 or
    /// pass `i64::MAX`.
    pub fn checked_add(self, offset: i64) -> Result<Self, TatwaError> {
        self.shift(i128::from(offset))
    }

    /// `checked_add(-offset)`.
    pub fn checked_sub(self, offset: i64) -> Result<Self, TatwaError> {
        self.shift(-i128::from(offset))
    }

    fn shift(self, offset: i128) -> Result<Self, TatwaError> {
        match self.repr {
            Repr::Named(name) => Ok(Self::named(wrap(i128::from(name.index()) + offset))),
            Repr::Positioned(p) => {
                let target = i128::from(p.get()) + offset;
                let target =
                    i64::try_from(target).map_err(|_| TatwaError::PositionOutOfRange(target))?;
                Self::by_position(target)
            }
        }
    }

    /// Signed number of forward steps from `self` to `other`.
    ///
    /// `other` may be another tatwa, a name (read as its cycle-1 position)
    /// or an absolute position (must be >= 1). Position-mode distances are
    /// never wrapped: from Apas (5) to Akash (1) is -4.
    pub fn distance_to<'a>(&self, other: impl Into<TatwaOperand<'a>>) -> Result<i64, TatwaError> {
        let target = other.into().position()?;
        Ok(target as i64 - self.position() as i64)
    }

    /// Infallible form of [`distance_to`](Self::distance_to) for two tatwas.
    pub fn distance(&self, other: &Tatwa) -> i64 {
        // both positions lie in 1..=i64::MAX, so the difference fits
        other.position() as i64 - self.position() as i64
    }
}

impl From<TatwaName> for Tatwa {
    fn from(name: TatwaName) -> Self {
        Self::named(name)
    }
}

impl FromStr for Tatwa {
    type Err = TatwaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::by_name(s)
    }
}

impl PartialEq for Tatwa {
    fn eq(&self, other: &Self) -> bool {
        self.distance(other) == 0
    }
}

impl Eq for Tatwa {}

impl PartialOrd for Tatwa {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tatwa {
    /// `a < b` iff the distance from `a` to `b` is positive.
    fn cmp(&self, other: &Self) -> Ordering {
        0.cmp(&self.distance(other))
    }
}

impl Hash for Tatwa {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position().hash(state);
    }
}

impl Display for Tatwa {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tatwa_name().label())
    }
}

impl Debug for Tatwa {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tatwa")
            .field("name", &self.name())
            .field("position", &self.position())
            .field("cycle", &self.cycle())
            .field("mode", &self.mode())
            .finish()
    }
}

/// Right-hand side of [`Tatwa::distance_to`].
#[derive(Debug, Clone, Copy)]
pub enum TatwaOperand<'a> {
    Tatwa(Tatwa),
    Name(&'a str),
    Position(i64),
}

impl TatwaOperand<'_> {
    fn position(self) -> Result<u64, TatwaError> {
        match self {
            Self::Tatwa(t) => Ok(t.position()),
            Self::Name(name) => name
                .parse::<TatwaName>()
                .map(|n| u64::from(n.index()) + 1)
                .map_err(|_| TatwaError::InvalidArgument(format!("unknown tatwa name {name:?}"))),
            Self::Position(p) => u64::try_from(p)
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| TatwaError::InvalidArgument(format!("position {p} is below 1"))),
        }
    }
}

impl From<Tatwa> for TatwaOperand<'_> {
    fn from(t: Tatwa) -> Self {
        Self::Tatwa(t)
    }
}

impl From<&Tatwa> for TatwaOperand<'_> {
    fn from(t: &Tatwa) -> Self {
        Self::Tatwa(*t)
    }
}

impl From<TatwaName> for TatwaOperand<'_> {
    fn from(name: TatwaName) -> Self {
        Self::Tatwa(Tatwa::named(name))
    }
}

impl<'a> From<&'a str> for TatwaOperand<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for TatwaOperand<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl From<i64> for TatwaOperand<'_> {
    fn from(position: i64) -> Self {
        Self::Position(position)
    }
}
