use anyhow::{Context, Result};
use thirdplace::{Action, AppState, GeoId, IndexLayer, PlaceSet, Store, TractSet};

use crate::cli::{Cli, TractArgs};

pub fn run(cli: &Cli, args: &TractArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let layer = IndexLayer::from_str(&args.layer)
        .with_context(|| format!("[tract] unknown layer {:?}", args.layer))?;

    let mut store = Store::new(AppState::new(config.analysis));
    store.dispatch(Action::TractsLoaded(TractSet::from_geojson_file(&args.tracts)?));
    if let Some(path) = &args.places {
        store.dispatch(Action::PlacesLoaded(PlaceSet::from_geojson_file(path)?));
    }
    store.dispatch(Action::SetActiveLayer(layer));

    let geo_id = GeoId::from(args.geo_id.as_str());
    if store.dispatch(Action::SelectTract(geo_id)).is_empty() {
        anyhow::bail!("[tract] no tract with GEOID {}", args.geo_id);
    }
    let details = store.state().details()
        .context("[tract] selected tract has no details")?;

    println!("Tract {} ({})", details.geo_id, details.density_category);
    if let Some(rank) = details.rank {
        println!("Rank {rank} of {}", details.total_tracts);
    }
    println!();
    println!("  Third Place Index  {:.3}", details.overall);
    println!("  Traditional        {:.3}", details.traditional);
    println!("  Community          {:.3}", details.community);
    println!("  Modern             {:.3}", details.modern);

    println!();
    for item in &details.demographics {
        println!("  {:<32} {}", item.label, item.value);
    }

    println!();
    for (category, count) in &details.places {
        println!("  {:<12} {count}", category.display_name());
    }

    if let Some(types) = &details.place_types {
        println!();
        let note = if types.estimated { " (estimated)" } else { "" };
        println!("Place types{note}");
        for entry in &types.entries {
            println!("  {:<28} {:>4}  {}", entry.label, entry.count, entry.category.display_name());
        }
    }

    let view = &details.distribution;
    println!();
    println!("{} distribution", view.title);
    let widest = view.histogram.max_count().max(1);
    for (i, bin) in view.histogram.bins().iter().enumerate() {
        let bar = "#".repeat(bin.count * 40 / widest);
        let marker = if view.selected_bin == Some(i) { "<" } else { "" };
        println!("  {:.2}-{:.2} {:>5} {bar}{marker}", bin.x0, bin.x1, bin.count);
    }
    Ok(())
}
