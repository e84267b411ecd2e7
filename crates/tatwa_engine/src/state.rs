//! Dependency table for the environment's derived state.
//!
//! Every setter names the field it changed and the environment clears the
//! transitive closure of [`StateField::dependents`]. The timezone is not a
//! field here: it is only ever replaced together with the coordinates.

/// A piece of environment state that can be set or cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateField {
    Address,
    Coordinates,
    SolarDate,
    QueryDate,
    QueryTime,
    QueryInstant,
    SolarEvents,
    Tatwas,
}

/// Fields cleared when solar events are supplied by hand.
pub const MANUAL_SUPERSEDES: [StateField; 5] = [
    StateField::Address,
    StateField::Coordinates,
    StateField::SolarDate,
    StateField::QueryDate,
    StateField::QueryTime,
];

impl StateField {
    /// Fields derived directly from `self`.
    pub const fn dependents(self) -> &'static [StateField] {
        match self {
            Self::Address => &[Self::SolarEvents],
            Self::Coordinates => &[Self::SolarEvents, Self::QueryInstant],
            Self::SolarDate => &[Self::SolarEvents],
            Self::QueryDate | Self::QueryTime => &[Self::QueryInstant],
            Self::QueryInstant => &[Self::Tatwas],
            Self::SolarEvents => &[Self::Tatwas],
            Self::Tatwas => &[],
        }
    }

    /// Every field that must be cleared when `self` changes, in
    /// dependency order. Does not include `self`.
    pub fn invalidated(self) -> Vec<StateField> {
        let mut out = Vec::new();
        let mut stack: Vec<StateField> = self.dependents().iter().rev().copied().collect();
        while let Some(field) = stack.pop() {
            if field == self || out.contains(&field) {
                continue;
            }
            out.push(field);
            stack.extend(field.dependents().iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StateField; 8] = [
        StateField::Address,
        StateField::Coordinates,
        StateField::SolarDate,
        StateField::QueryDate,
        StateField::QueryTime,
        StateField::QueryInstant,
        StateField::SolarEvents,
        StateField::Tatwas,
    ];

    #[test]
    fn coordinates_clear_events_query_and_tatwas() {
        let cleared = StateField::Coordinates.invalidated();
        assert!(cleared.contains(&StateField::SolarEvents));
        assert!(cleared.contains(&StateField::QueryInstant));
        assert!(cleared.contains(&StateField::Tatwas));
        assert!(!cleared.contains(&StateField::Address));
        assert_eq!(cleared.len(), 3);
    }

    #[test]
    fn address_clears_events_and_tatwas() {
        assert_eq!(
            StateField::Address.invalidated(),
            vec![StateField::SolarEvents, StateField::Tatwas]
        );
    }

    #[test]
    fn query_components_clear_instant_and_tatwas() {
        for f in [StateField::QueryDate, StateField::QueryTime] {
            assert_eq!(
                f.invalidated(),
                vec![StateField::QueryInstant, StateField::Tatwas]
            );
        }
    }

    #[test]
    fn tatwas_are_a_leaf() {
        assert!(StateField::Tatwas.invalidated().is_empty());
    }

    #[test]
    fn every_field_eventually_clears_tatwas() {
        for f in ALL {
            if f != StateField::Tatwas {
                assert!(f.invalidated().contains(&StateField::Tatwas), "{f:?}");
            }
        }
    }

    #[test]
    fn table_is_acyclic() {
        for f in ALL {
            assert!(!f.invalidated().contains(&f), "{f:?}");
        }
    }

    #[test]
    fn no_duplicates() {
        for f in ALL {
            let v = f.invalidated();
            for (i, a) in v.iter().enumerate() {
                assert!(!v[i + 1..].contains(a), "{f:?} lists {a:?} twice");
            }
        }
    }
}
