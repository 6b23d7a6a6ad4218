use anyhow::Result;
use thirdplace::density_table;

use crate::cli::{Cli, TableArgs};

pub fn run(cli: &Cli, args: &TableArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let tracts = super::load_tracts(args.tracts.as_ref(), &config)?;
    let table = density_table(&tracts, &config.analysis.density_categories);
    super::emit_aggregation(&table, "density", args.output.as_ref())
}
