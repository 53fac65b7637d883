use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A position in a search strategy's abstract, totally-ordered index space.
///
/// Each variant has a canonical textual serialization that is injective and
/// total over legal values: `ExhaustiveSearchIndex` serializes as `"<n>"`,
/// `SuperabundantEnumerationIndex` as `"<level>,<index_in_level>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "search_index_type", content = "value")]
pub enum SearchIndex {
    ExhaustiveSearchIndex { n: BigUint },
    SuperabundantEnumerationIndex { level: u64, index_in_level: u64 },
}

impl SearchIndex {
    pub const EXHAUSTIVE: &'static str = "ExhaustiveSearchIndex";
    pub const SUPERABUNDANT: &'static str = "SuperabundantEnumerationIndex";

    /// The `search_index_type` tag accompanying this index.
    pub fn index_name(&self) -> &'static str {
        match self {
            SearchIndex::ExhaustiveSearchIndex { .. } => Self::EXHAUSTIVE,
            SearchIndex::SuperabundantEnumerationIndex { .. } => Self::SUPERABUNDANT,
        }
    }

    /// The index space's default starting position (n = 1, or level 1 index 0).
    /// Strategies may choose a different practical starting point.
    pub fn default_for(index_type: &str) -> Result<Self, ModelError> {
        match index_type {
            Self::EXHAUSTIVE => Ok(SearchIndex::ExhaustiveSearchIndex { n: BigUint::one() }),
            Self::SUPERABUNDANT => Ok(SearchIndex::SuperabundantEnumerationIndex {
                level: 1,
                index_in_level: 0,
            }),
            other => Err(ModelError::UnknownIndexType(other.to_string())),
        }
    }

    /// Canonical textual serialization used for storage and comparison.
    pub fn to_canonical_string(&self) -> String {
        match self {
            SearchIndex::ExhaustiveSearchIndex { n } => n.to_string(),
            SearchIndex::SuperabundantEnumerationIndex { level, index_in_level } => {
                format!("{level},{index_in_level}")
            }
        }
    }

    /// Parse a canonical string back into a `SearchIndex`, given its type tag.
    pub fn from_canonical_string(index_type: &str, value: &str) -> Result<Self, ModelError> {
        match index_type {
            Self::EXHAUSTIVE => {
                let n = value.parse::<BigUint>().map_err(|_| ModelError::MalformedIndex {
                    index_type: index_type.to_string(),
                    value: value.to_string(),
                })?;
                Ok(SearchIndex::ExhaustiveSearchIndex { n })
            }
            Self::SUPERABUNDANT => {
                let (level_str, index_str) = value.split_once(',').ok_or_else(|| {
                    ModelError::MalformedIndex {
                        index_type: index_type.to_string(),
                        value: value.to_string(),
                    }
                })?;
                let level = level_str.parse::<u64>().map_err(|_| ModelError::MalformedIndex {
                    index_type: index_type.to_string(),
                    value: value.to_string(),
                })?;
                let index_in_level =
                    index_str.parse::<u64>().map_err(|_| ModelError::MalformedIndex {
                        index_type: index_type.to_string(),
                        value: value.to_string(),
                    })?;
                Ok(SearchIndex::SuperabundantEnumerationIndex { level, index_in_level })
            }
            other => Err(ModelError::UnknownIndexType(other.to_string())),
        }
    }

    /// Compare two indices of the same variant. Errors if the variants differ.
    pub fn compare(&self, other: &SearchIndex) -> Result<Ordering, ModelError> {
        match (self, other) {
            (SearchIndex::ExhaustiveSearchIndex { n: a }, SearchIndex::ExhaustiveSearchIndex { n: b }) => {
                Ok(a.cmp(b))
            }
            (
                SearchIndex::SuperabundantEnumerationIndex { level: l1, index_in_level: i1 },
                SearchIndex::SuperabundantEnumerationIndex { level: l2, index_in_level: i2 },
            ) => Ok((l1, i1).cmp(&(l2, i2))),
            _ => Err(ModelError::IncomparableIndexTypes(
                self.index_name().to_string(),
                other.index_name().to_string(),
            )),
        }
    }
}

impl fmt::Display for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index_name(), self.to_canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn exhaustive_index_round_trips_through_canonical_string(n in any::<u64>()) {
            let idx = SearchIndex::ExhaustiveSearchIndex { n: BigUint::from(n) };
            let s = idx.to_canonical_string();
            let back = SearchIndex::from_canonical_string(idx.index_name(), &s).unwrap();
            prop_assert_eq!(idx, back);
        }

        #[test]
        fn superabundant_index_round_trips_through_canonical_string(level in any::<u64>(), index_in_level in any::<u64>()) {
            let idx = SearchIndex::SuperabundantEnumerationIndex { level, index_in_level };
            let s = idx.to_canonical_string();
            let back = SearchIndex::from_canonical_string(idx.index_name(), &s).unwrap();
            prop_assert_eq!(idx, back);
        }
    }

    #[test]
    fn round_trips_exhaustive() {
        let idx = SearchIndex::ExhaustiveSearchIndex { n: BigUint::from(5041u32) };
        let s = idx.to_canonical_string();
        let back = SearchIndex::from_canonical_string(idx.index_name(), &s).unwrap();
        assert_eq!(idx, back);
    }

    #[test]
    fn round_trips_superabundant() {
        let idx = SearchIndex::SuperabundantEnumerationIndex { level: 4, index_in_level: 1 };
        let s = idx.to_canonical_string();
        assert_eq!(s, "4,1");
        let back = SearchIndex::from_canonical_string(idx.index_name(), &s).unwrap();
        assert_eq!(idx, back);
    }

    #[test]
    fn rejects_malformed() {
        assert!(SearchIndex::from_canonical_string(SearchIndex::SUPERABUNDANT, "not-a-pair").is_err());
        assert!(SearchIndex::from_canonical_string(SearchIndex::EXHAUSTIVE, "abc").is_err());
    }

    #[test]
    fn rejects_unknown_type() {
        assert!(SearchIndex::from_canonical_string("NotAStrategy", "1").is_err());
    }

    #[test]
    fn compare_rejects_mixed_variants() {
        let a = SearchIndex::ExhaustiveSearchIndex { n: BigUint::from(1u32) };
        let b = SearchIndex::SuperabundantEnumerationIndex { level: 1, index_in_level: 0 };
        assert!(a.compare(&b).is_err());
    }
}
