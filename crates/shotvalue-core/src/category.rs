// Shot categories and the fixed-key per-category table.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};

// ---------------------------------------------------------------------------
// Shot value
// ---------------------------------------------------------------------------

/// Point value of a field goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ShotValue {
    Two,
    Three,
}

impl ShotValue {
    /// Read the value from a shot type tag such as "3-pt jump shot".
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.contains("3-pt") {
            Some(ShotValue::Three)
        } else if tag.contains("2-pt") {
            Some(ShotValue::Two)
        } else {
            None
        }
    }

    pub fn points(self) -> u32 {
        match self {
            ShotValue::Two => 2,
            ShotValue::Three => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Shot category
// ---------------------------------------------------------------------------

/// Upper bound (inclusive, feet) of the longest two-point distance bin.
const MID_RANGE_MAX_FT: f64 = 15.0;

/// The seven distance/value bins. Every shot lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShotCategory {
    /// 2-pt, 0 to 5 ft inclusive.
    TwoAtRim,
    /// 2-pt, over 5 up to 10 ft.
    TwoShortRange,
    /// 2-pt, over 10 up to 15 ft.
    TwoMidRange,
    /// 2-pt, over 15 ft.
    TwoLong,
    /// 3-pt, 25 ft or less.
    ThreeStandard,
    /// 3-pt, over 25 up to 30 ft.
    ThreeDeep,
    /// 3-pt, over 30 ft.
    ThreeHeave,
}

impl ShotCategory {
    /// All categories in distance order, twos before threes.
    pub const ALL: [ShotCategory; 7] = [
        ShotCategory::TwoAtRim,
        ShotCategory::TwoShortRange,
        ShotCategory::TwoMidRange,
        ShotCategory::TwoLong,
        ShotCategory::ThreeStandard,
        ShotCategory::ThreeDeep,
        ShotCategory::ThreeHeave,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Classify a shot by its value tag, then its distance.
    ///
    /// A tag naming neither value is classified by distance alone: up to
    /// 15 ft counts as a two, anything longer as a three.
    pub fn classify(shot_type: Option<&str>, distance_ft: f64) -> Self {
        let value = shot_type.and_then(ShotValue::from_tag).unwrap_or(
            if distance_ft <= MID_RANGE_MAX_FT {
                ShotValue::Two
            } else {
                ShotValue::Three
            },
        );
        Self::bin(value, distance_ft)
    }

    /// Bin a shot of known value by distance. Bounds are inclusive on the
    /// upper edge of each bin.
    pub fn bin(value: ShotValue, distance_ft: f64) -> Self {
        match value {
            ShotValue::Two => {
                if distance_ft <= 5.0 {
                    ShotCategory::TwoAtRim
                } else if distance_ft <= 10.0 {
                    ShotCategory::TwoShortRange
                } else if distance_ft <= MID_RANGE_MAX_FT {
                    ShotCategory::TwoMidRange
                } else {
                    ShotCategory::TwoLong
                }
            }
            ShotValue::Three => {
                if distance_ft <= 25.0 {
                    ShotCategory::ThreeStandard
                } else if distance_ft <= 30.0 {
                    ShotCategory::ThreeDeep
                } else {
                    ShotCategory::ThreeHeave
                }
            }
        }
    }

    pub fn value(self) -> ShotValue {
        match self {
            ShotCategory::TwoAtRim
            | ShotCategory::TwoShortRange
            | ShotCategory::TwoMidRange
            | ShotCategory::TwoLong => ShotValue::Two,
            ShotCategory::ThreeStandard | ShotCategory::ThreeDeep | ShotCategory::ThreeHeave => {
                ShotValue::Three
            }
        }
    }

    pub fn points(self) -> u32 {
        self.value().points()
    }

    /// Chart label.
    pub fn label(self) -> &'static str {
        match self {
            ShotCategory::TwoAtRim => "2-pt 0-5 ft",
            ShotCategory::TwoShortRange => "2-pt 6-10 ft",
            ShotCategory::TwoMidRange => "2-pt 11-15 ft",
            ShotCategory::TwoLong => "2-pt >15 ft",
            ShotCategory::ThreeStandard => "3-pt <26 ft",
            ShotCategory::ThreeDeep => "3-pt 26-30 ft",
            ShotCategory::ThreeHeave => "3-pt >30 ft",
        }
    }

    fn index(self) -> usize {
        match self {
            ShotCategory::TwoAtRim => 0,
            ShotCategory::TwoShortRange => 1,
            ShotCategory::TwoMidRange => 2,
            ShotCategory::TwoLong => 3,
            ShotCategory::ThreeStandard => 4,
            ShotCategory::ThreeDeep => 5,
            ShotCategory::ThreeHeave => 6,
        }
    }
}

impl fmt::Display for ShotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Category map
// ---------------------------------------------------------------------------

/// A value for each of the seven shot categories.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryMap<T> {
    values: [T; ShotCategory::COUNT],
}

impl<T> CategoryMap<T> {
    /// Build a map by evaluating `f` once per category.
    pub fn from_fn(mut f: impl FnMut(ShotCategory) -> T) -> Self {
        CategoryMap {
            values: ShotCategory::ALL.map(&mut f),
        }
    }

    /// Iterate `(category, value)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (ShotCategory, &T)> {
        ShotCategory::ALL.into_iter().zip(self.values.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    /// Transform every value, keeping its category.
    pub fn map<U>(&self, mut f: impl FnMut(ShotCategory, &T) -> U) -> CategoryMap<U> {
        CategoryMap::from_fn(|category| f(category, &self[category]))
    }
}

impl<T> Index<ShotCategory> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: ShotCategory) -> &T {
        &self.values[category.index()]
    }
}

impl<T> IndexMut<ShotCategory> for CategoryMap<T> {
    fn index_mut(&mut self, category: ShotCategory) -> &mut T {
        &mut self.values[category.index()]
    }
}

/// Serialized as an ordered map keyed by category label.
impl<T: Serialize> Serialize for CategoryMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ShotCategory::COUNT))?;
        for (category, value) in self.iter() {
            map.serialize_entry(category.label(), value)?;
        }
        map.end()
    }
}
