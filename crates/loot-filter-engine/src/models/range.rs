use serde::{Deserialize, Serialize};

/// Inclusive bounds a range field may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeDomain {
    pub floor: u32,
    pub ceiling: u32,
}

impl RangeDomain {
    pub const ITEM_LEVEL: RangeDomain = RangeDomain::new(0, 100);
    pub const QUALITY: RangeDomain = RangeDomain::new(0, 20);
    pub const SOCKETS: RangeDomain = RangeDomain::new(0, 5);
    pub const AREA_LEVEL: RangeDomain = RangeDomain::new(0, 100);

    pub const fn new(floor: u32, ceiling: u32) -> Self {
        Self { floor, ceiling }
    }

    /// Clamp a possibly out-of-domain value (e.g. `v - 1` of a `< 0` comparison).
    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(i64::from(self.floor), i64::from(self.ceiling)) as u32
    }

    pub fn contains(&self, range: ValueRange) -> bool {
        range.min >= self.floor && range.max <= self.ceiling
    }
}

/// An inclusive `[min, max]` range with `min <= max`.
///
/// Serialized as a two element array, which is the shape slider widgets
/// store, so persisted workspaces read back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct ValueRange {
    min: u32,
    max: u32,
}

impl ValueRange {
    /// Build a range from two bounds in either order.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn exactly(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn full(domain: RangeDomain) -> Self {
        Self::new(domain.floor, domain.ceiling)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }
}

impl From<[u32; 2]> for ValueRange {
    fn from([a, b]: [u32; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<ValueRange> for [u32; 2] {
    fn from(range: ValueRange) -> Self {
        [range.min, range.max]
    }
}

/// Serde adapter for single-handle sliders, persisted as `[value]`.
pub(crate) mod single_slider {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [*value].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [value] = <[u32; 1]>::deserialize(deserializer)?;
        Ok(value)
    }
}
