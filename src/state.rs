//! Application state for the dashboard.
//!
//! State is immutable: `AppState::reduce` returns a new state plus the list of
//! changes it made, and `Store` forwards those changes to subscribers. The two
//! datasets load independently and may arrive in either order, so every view
//! checks that the data it needs is present.

use std::{fmt, sync::Arc};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    analysis::{density_table, income_correlations, income_table, CorrelationRow, DistributionView, TractDetails},
    config::AnalysisConfig,
    map::{GeoId, IndexLayer, PlaceSet, Tract, TractSet},
    stats::{Aggregation, Distributions, Ranking},
};

#[derive(Debug)]
pub enum Action {
    TractsLoaded(TractSet),
    PlacesLoaded(PlaceSet),
    SetActiveLayer(IndexLayer),
    SelectTract(GeoId),
    ClearSelection,
}

/// What a reduction changed, for subscribers to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Change {
    Tracts,
    Places,
    ActiveLayer(IndexLayer),
    Selection(Option<GeoId>),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    tracts: Option<Arc<TractSet>>,
    places: Option<Arc<PlaceSet>>,
    ranking: Arc<Ranking>,              // rebuilt whenever tracts load
    distributions: Arc<Distributions>,
    active_layer: IndexLayer,
    selected: Option<GeoId>,
    config: Arc<AnalysisConfig>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config: Arc::new(config), ..Default::default() }
    }

    #[inline] pub fn tracts(&self) -> Option<&TractSet> { self.tracts.as_deref() }

    #[inline] pub fn places(&self) -> Option<&PlaceSet> { self.places.as_deref() }

    #[inline] pub fn ranking(&self) -> &Ranking { &self.ranking }

    #[inline] pub fn distributions(&self) -> &Distributions { &self.distributions }

    #[inline] pub fn active_layer(&self) -> IndexLayer { self.active_layer }

    #[inline] pub fn selected(&self) -> Option<&GeoId> { self.selected.as_ref() }

    #[inline] pub fn config(&self) -> &AnalysisConfig { &self.config }

    /// The selected tract, if tracts are loaded and one is selected.
    pub fn selected_tract(&self) -> Option<&Tract> {
        self.tracts()?.get(self.selected.as_ref()?)
    }

    /// Apply an action, returning the new state and what changed. `self` is left untouched.
    pub fn reduce(&self, action: Action) -> (AppState, Vec<Change>) {
        let mut next = self.clone();
        let mut changes = Vec::new();

        match action {
            Action::TractsLoaded(tracts) => {
                info!("[AppState] tracts loaded ({} tracts)", tracts.len());
                next.ranking = Arc::new(Ranking::build(&tracts));
                next.distributions = Arc::new(Distributions::build(&tracts));
                if next.selected.as_ref().is_some_and(|id| !tracts.contains(id)) {
                    next.selected = None;
                    changes.push(Change::Selection(None));
                }
                next.tracts = Some(Arc::new(tracts));
                changes.insert(0, Change::Tracts);
            }
            Action::PlacesLoaded(places) => {
                info!("[AppState] places loaded ({} places)", places.len());
                next.places = Some(Arc::new(places));
                changes.push(Change::Places);
            }
            Action::SetActiveLayer(layer) => {
                if layer != self.active_layer {
                    next.active_layer = layer;
                    changes.push(Change::ActiveLayer(layer));
                }
            }
            Action::SelectTract(geo_id) => {
                let known = self.tracts().is_some_and(|tracts| tracts.contains(&geo_id));
                if !known {
                    debug!("[AppState] ignoring selection of unknown tract {geo_id}");
                } else if self.selected.as_ref() != Some(&geo_id) {
                    next.selected = Some(geo_id.clone());
                    changes.push(Change::Selection(Some(geo_id)));
                }
            }
            Action::ClearSelection => {
                if next.selected.take().is_some() {
                    changes.push(Change::Selection(None));
                }
            }
        }

        (next, changes)
    }

    /// Panel contents for the selected tract.
    pub fn details(&self) -> Option<TractDetails> {
        let tract = self.selected_tract()?;
        Some(TractDetails::build(
            tract,
            &self.ranking,
            &self.distributions,
            self.places(),
            self.active_layer,
            &self.config,
        ))
    }

    /// Distribution of the active layer, marking `value`.
    pub fn distribution(&self, value: f64) -> Option<DistributionView> {
        self.tracts()?;
        Some(DistributionView::build(&self.distributions, self.active_layer, value, self.config.histogram_bins))
    }

    pub fn rank_of(&self, geo_id: &GeoId) -> Option<usize> { self.ranking.rank(geo_id) }

    pub fn density_table(&self) -> Option<Aggregation> {
        Some(density_table(self.tracts()?, &self.config.density_categories))
    }

    pub fn income_table(&self) -> Option<Aggregation> {
        Some(income_table(self.tracts()?, &self.config.income_brackets))
    }

    pub fn income_correlations(&self) -> Option<Result<Vec<CorrelationRow>>> {
        self.tracts().map(income_correlations)
    }
}

type Subscriber = Box<dyn FnMut(&AppState, &Change)>;

/// Holds the current state and notifies subscribers after every dispatch.
#[derive(Default)]
pub struct Store {
    state: AppState,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state, subscribers: Vec::new() }
    }

    #[inline] pub fn state(&self) -> &AppState { &self.state }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&AppState, &Change) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Reduce `action` into the current state and notify subscribers of each change.
    pub fn dispatch(&mut self, action: Action) -> Vec<Change> {
        let (next, changes) = self.state.reduce(action);
        self.state = next;

        for change in &changes {
            for subscriber in self.subscribers.iter_mut() {
                subscriber(&self.state, change);
            }
        }
        changes
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::map::{Place, PlaceCategory};

    fn tracts(ids: &[(&str, f64)]) -> TractSet {
        TractSet::new(ids.iter()
            .map(|&(id, overall)| Tract { geo_id: id.into(), overall, traditional_count: 3.0, ..Default::default() })
            .collect())
    }

    fn places() -> PlaceSet {
        PlaceSet::new(vec![Place {
            name: Some("Corner Cafe".into()),
            category: PlaceCategory::Traditional,
            sub_type: Some("cafe".into()),
            tract_id: Some("b".into()),
            location: geo::Point::new(0.0, 0.0),
        }])
    }

    #[test]
    fn reduce_leaves_original_untouched() {
        let state = AppState::default();
        let (next, changes) = state.reduce(Action::TractsLoaded(tracts(&[("a", 0.8), ("b", 0.3), ("c", 0.5)])));
        assert_eq!(changes, vec![Change::Tracts]);
        assert!(state.tracts().is_none());
        assert_eq!(next.ranking().len(), 3);
        assert_eq!(next.rank_of(&"c".into()), Some(2));
    }

    #[test]
    fn selection_requires_known_tract() {
        let state = AppState::default();
        let (state, changes) = state.reduce(Action::SelectTract("a".into()));
        assert!(changes.is_empty());
        assert!(state.selected().is_none());

        let (state, _) = state.reduce(Action::TractsLoaded(tracts(&[("a", 0.8)])));
        let (state, changes) = state.reduce(Action::SelectTract("zzz".into()));
        assert!(changes.is_empty());

        let (state, changes) = state.reduce(Action::SelectTract("a".into()));
        assert_eq!(changes, vec![Change::Selection(Some("a".into()))]);
        assert_eq!(state.selected_tract().map(|t| t.overall), Some(0.8));

        let (state, changes) = state.reduce(Action::ClearSelection);
        assert_eq!(changes, vec![Change::Selection(None)]);
        assert!(state.details().is_none());
    }

    #[test]
    fn reload_drops_stale_selection() {
        let (state, _) = AppState::default().reduce(Action::TractsLoaded(tracts(&[("a", 0.8)])));
        let (state, _) = state.reduce(Action::SelectTract("a".into()));
        let (state, changes) = state.reduce(Action::TractsLoaded(tracts(&[("b", 0.1)])));
        assert_eq!(changes, vec![Change::Tracts, Change::Selection(None)]);
        assert!(state.selected().is_none());
    }

    #[test]
    fn places_may_arrive_first() {
        let (state, changes) = AppState::default().reduce(Action::PlacesLoaded(places()));
        assert_eq!(changes, vec![Change::Places]);
        assert!(state.details().is_none());
        assert!(state.density_table().is_none());
        assert!(state.distribution(0.5).is_none());

        let (state, _) = state.reduce(Action::TractsLoaded(tracts(&[("a", 0.8), ("b", 0.3)])));
        let (state, _) = state.reduce(Action::SelectTract("b".into()));
        let details = state.details().unwrap();
        let types = details.place_types.unwrap();
        assert!(!types.estimated);
        assert_eq!(types.entries[0].label, "Cafe");
        assert_eq!(types.entries[0].count, 3);
    }

    #[test]
    fn layer_change_updates_distribution() {
        let (state, _) = AppState::default().reduce(Action::TractsLoaded(tracts(&[("a", 0.8)])));
        let (state, changes) = state.reduce(Action::SetActiveLayer(IndexLayer::Modern));
        assert_eq!(changes, vec![Change::ActiveLayer(IndexLayer::Modern)]);
        let (state, changes) = state.reduce(Action::SetActiveLayer(IndexLayer::Modern));
        assert!(changes.is_empty());
        assert_eq!(state.distribution(0.0).unwrap().title, "Modern Index");
    }

    #[test]
    fn store_notifies_subscribers() {
        let seen: Rc<RefCell<Vec<Change>>> = Rc::default();
        let mut store = Store::default();
        let log = seen.clone();
        store.subscribe(move |_, change| log.borrow_mut().push(change.clone()));

        store.dispatch(Action::TractsLoaded(tracts(&[("a", 0.8)])));
        store.dispatch(Action::SelectTract("a".into()));
        store.dispatch(Action::SelectTract("a".into()));
        store.dispatch(Action::PlacesLoaded(PlaceSet::default()));

        assert_eq!(*seen.borrow(), vec![
            Change::Tracts,
            Change::Selection(Some("a".into())),
            Change::Places,
        ]);
        assert_eq!(store.state().selected(), Some(&GeoId::from("a")));
    }
}
