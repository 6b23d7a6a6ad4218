use anyhow::Result;
use thirdplace::{write_csv, Ranking};

use crate::cli::{Cli, RankArgs};

pub fn run(cli: &Cli, args: &RankArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let tracts = super::load_tracts(args.tracts.as_ref(), &config)?;
    let ranking = Ranking::build(&tracts);

    if let Some(path) = &args.output {
        let mut df = ranking.to_dataframe()?;
        write_csv(&mut df, path)?;
        println!("wrote {} tracts to {}", ranking.len(), path.display());
        return Ok(())
    }

    let shown = args.top.map_or(ranking.entries(), |n| ranking.top(n));
    println!("{:>5}  {:<12} {:>8} {:>8} {:>8} {:>8}", "rank", "GEOID", "TPI", "trad", "comm", "modern");
    for (i, entry) in shown.iter().enumerate() {
        println!("{:>5}  {:<12} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
            i + 1, entry.geo_id.id(), entry.overall, entry.traditional, entry.community, entry.modern);
    }
    Ok(())
}
