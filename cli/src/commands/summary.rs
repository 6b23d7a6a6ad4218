use anyhow::Result;
use thirdplace::{category_share, income_correlations, metric_summaries};

use crate::cli::{Cli, SummaryArgs};

pub fn run(cli: &Cli, args: &SummaryArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let tracts = super::load_tracts(args.tracts.as_ref(), &config)?;

    println!("{} tracts", tracts.len());
    println!();
    println!("{:<24} {:>10} {:>10} {:>10} {:>10} {:>10}", "metric", "mean", "median", "std dev", "min", "max");
    for summary in metric_summaries(&tracts) {
        let s = &summary.stats;
        println!("{:<24} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            summary.label, s.mean, s.median, s.std_dev, s.min, s.max);
    }

    println!();
    for (category, share) in category_share(&tracts) {
        println!("{:<24} {:>9.1}%", category.display_name(), share * 100.0);
    }

    println!();
    println!("{:<24} {:>8} {:<12} {:<9} {:>6}", "vs. median income", "r", "strength", "direction", "n");
    for row in income_correlations(&tracts)? {
        println!("{:<24} {:>8.3} {:<12} {:<9} {:>6}",
            row.label, row.r, row.strength.to_string(), row.direction.to_string(), row.n);
    }
    Ok(())
}
