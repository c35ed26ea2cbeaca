use crate::cli::DataArgs;
use airwise_core::{render_table, Config, LatestTable};

pub fn run(data: &DataArgs) -> anyhow::Result<()> {
    let config = Config::new();
    let dataset = super::load_dataset(data)?;
    let context = dataset.grounding(&config);

    println!(
        "City sample ({} of {}):\n{}\n",
        context.cities().len(),
        context.city_count(),
        context.city_context()
    );
    println!(
        "Station sample ({} of {}):\n{}\n",
        context.stations().len(),
        context.station_count(),
        context.station_context()
    );
    println!(
        "Estimated prompt tokens: {} (budget {})",
        context.estimated_tokens(),
        config.prompt_token_budget
    );
    Ok(())
}

pub fn run_snapshot(data: &DataArgs, rows: Option<usize>) -> anyhow::Result<()> {
    let config = Config::new();
    let rows = rows.unwrap_or(config.snapshot_rows);
    let dataset = super::load_dataset(data)?;

    println!("Latest city readings:\n{}\n", snapshot(&dataset.cities, rows));
    println!("Latest station readings:\n{}", snapshot(&dataset.stations, rows));
    Ok(())
}

fn snapshot(table: &LatestTable, rows: usize) -> String {
    let cells: Vec<Vec<String>> = table.head(rows).iter().map(|obs| obs.cells()).collect();
    render_table(table.kind().columns(), &cells)
}
