use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};

/// Census tract identifier.
/// Keep the original GEOID text (with leading zeros) but avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeoId(Arc<str>); // e.g., "48201100000" for a Harris County tract

impl GeoId {
    pub fn new(id: impl Into<Arc<str>>) -> Self { Self(id.into()) }

    #[inline] pub fn id(&self) -> &str { &self.0 }

    /// State FIPS prefix (first 2 characters).
    #[inline] pub fn state(&self) -> GeoId { self.prefix(2) }

    /// County FIPS prefix (first 5 characters).
    #[inline] pub fn county(&self) -> GeoId { self.prefix(5) }

    /// If the id is shorter than expected, just take the full id.
    fn prefix(&self, len: usize) -> GeoId {
        // GEOIDs are ASCII digits, but never slice through a multibyte char.
        let end = self.0.char_indices().nth(len).map(|(i, _)| i).unwrap_or(self.0.len());
        GeoId(Arc::from(&self.0[..end]))
    }
}

impl Default for GeoId {
    fn default() -> Self { GeoId::from("") }
}

impl From<&str> for GeoId {
    fn from(id: &str) -> Self { Self(Arc::from(id)) }
}

impl From<String> for GeoId {
    fn from(id: String) -> Self { Self(Arc::from(id)) }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl Serialize for GeoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
