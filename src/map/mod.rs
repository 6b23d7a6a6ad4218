mod category;
mod geo_id;
mod io;
mod layer;
mod place;
mod tract;

pub use category::PlaceCategory;
pub use geo_id::GeoId;
pub use layer::{IndexLayer, LegendEntry, Metric};
pub use place::{Place, PlaceSet};
pub use tract::{Tract, TractSet};
