use crate::cli::DataArgs;

pub fn run(data: &DataArgs) -> anyhow::Result<()> {
    let dataset = super::load_dataset(data)?;
    match dataset.worst_city_alert() {
        Some(alert) => println!("{}", alert.message()),
        None => println!("No city readings are available."),
    }
    Ok(())
}
