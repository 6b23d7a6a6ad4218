use anyhow::Result;
use thirdplace::income_table;

use crate::cli::{Cli, TableArgs};

pub fn run(cli: &Cli, args: &TableArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let tracts = super::load_tracts(args.tracts.as_ref(), &config)?;
    let table = income_table(&tracts, &config.analysis.income_brackets);
    super::emit_aggregation(&table, "income", args.output.as_ref())
}
