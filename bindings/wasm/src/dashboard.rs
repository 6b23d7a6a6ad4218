use serde::Serialize;
use thirdplace_core::{
    correlation_table, write_csv_string, Action, AppState, Change, Config, GeoId, PlaceSet, Store,
    TractSet,
};
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::common::*;

/// Summary of one load, returned to the page for its status line.
#[derive(Serialize)]
struct LoadResult<'a> {
    count: usize,
    changes: &'a [Change],
}

#[wasm_bindgen]
pub struct WasmDashboard {
    store: Store,
    config: Config,
}

#[wasm_bindgen]
impl WasmDashboard {
    /// Create an empty dashboard. `config` is optional TOML text.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WasmDashboard, JsValue> {
        let config = match config {
            Some(text) => Config::from_toml_str(&text).map_err(js_err)?,
            None => Config::default(),
        };
        let store = Store::new(AppState::new(config.analysis.clone()));
        Ok(WasmDashboard { store, config })
    }

    /// Load the tracts FeatureCollection from GeoJSON text. May be called before or after `load_places`.
    pub fn load_tracts(&mut self, geojson: &str) -> Result<JsValue, JsValue> {
        let tracts = TractSet::from_geojson_str(geojson).map_err(js_err)?;
        let count = tracts.len();
        let changes = self.store.dispatch(Action::TractsLoaded(tracts));
        to_js(&LoadResult { count, changes: &changes })
    }

    /// Load the places FeatureCollection from GeoJSON text.
    pub fn load_places(&mut self, geojson: &str) -> Result<JsValue, JsValue> {
        let places = PlaceSet::from_geojson_str(geojson).map_err(js_err)?;
        let count = places.len();
        let changes = self.store.dispatch(Action::PlacesLoaded(places));
        to_js(&LoadResult { count, changes: &changes })
    }

    /// Register `callback(change, details)`, called once per change after every dispatch.
    /// `details` is the selected tract's panel, or null.
    pub fn subscribe(&mut self, callback: js_sys::Function) {
        self.store.subscribe(move |state, change| {
            let change = match to_js(change) {
                Ok(value) => value,
                Err(e) => return console_error("subscribe", e),
            };
            let details = match state.details().map(|d| to_js(&d)).transpose() {
                Ok(details) => details.unwrap_or(JsValue::NULL),
                Err(e) => {
                    console_error("subscribe", e);
                    JsValue::NULL
                }
            };
            if let Err(e) = callback.call2(&JsValue::NULL, &change, &details) {
                console_error("subscribe", e);
            }
        });
    }

    /// Switch the active index layer; unknown ids select the overall layer.
    pub fn set_layer(&mut self, layer: Option<String>) -> Result<JsValue, JsValue> {
        let changes = self.store.dispatch(Action::SetActiveLayer(parse_layer(layer)));
        to_js(&changes)
    }

    /// Select a tract by GEOID. Returns false when tracts are not loaded or the id is unknown.
    pub fn select(&mut self, geo_id: &str) -> bool {
        let geo_id = GeoId::from(geo_id);
        self.store.dispatch(Action::SelectTract(geo_id.clone()));
        self.store.state().selected() == Some(&geo_id)
    }

    pub fn clear_selection(&mut self) -> Result<JsValue, JsValue> {
        let changes = self.store.dispatch(Action::ClearSelection);
        to_js(&changes)
    }

    /// Id of the active map layer, e.g. "overall-index".
    pub fn active_layer(&self) -> String {
        self.store.state().active_layer().layer_id().to_string()
    }

    /// Detail panel for the selected tract, or null.
    pub fn details(&self) -> Result<JsValue, JsValue> {
        match self.store.state().details() {
            Some(details) => to_js(&details),
            None => Ok(JsValue::NULL),
        }
    }

    /// Ranking entries, highest overall index first; `top` limits the count.
    pub fn ranking(&self, top: Option<usize>) -> Result<JsValue, JsValue> {
        let ranking = self.store.state().ranking();
        let entries = top.map_or(ranking.entries(), |n| ranking.top(n));
        to_js(entries)
    }

    pub fn density_table(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.state().density_table())
    }

    pub fn income_table(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.state().income_table())
    }

    /// Income correlation rows, or null before tracts load.
    pub fn correlations(&self) -> Result<JsValue, JsValue> {
        match self.store.state().income_correlations() {
            Some(rows) => to_js(&rows.map_err(js_err)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Income correlations as CSV text, for download.
    pub fn correlations_csv(&self) -> Result<String, JsValue> {
        let rows = self.store.state().income_correlations()
            .ok_or_else(|| js_err("tracts are not loaded"))?
            .map_err(js_err)?;
        let mut df = correlation_table(&rows).map_err(js_err)?;
        write_csv_string(&mut df).map_err(js_err)
    }

    /// Histogram of the active layer with `value` marked.
    pub fn distribution(&self, value: f64) -> Result<JsValue, JsValue> {
        to_js(&self.store.state().distribution(value))
    }

    /// Legend rows for the active layer.
    pub fn legend(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.state().active_layer().legend(&self.config.colors))
    }

    /// `[stop, color]` pairs for the active layer's fill interpolation.
    pub fn color_stops(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.state().active_layer().color_stops(&self.config.colors))
    }

    /// Initial camera and style for the map.
    pub fn map_view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.config.map)
    }
}
