mod csv;
mod geojson;

pub(crate) use geojson::*;
pub use csv::*;
