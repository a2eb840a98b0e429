use {
    anyhow::{Context, Result},
    clap::Parser,
    pane_charts::ComponentArgs,
    std::path::PathBuf,
    tabled::{Table, Tabled, settings::Style},
};

/// Summarise a chart payload written by `pane-charts`.
#[derive(Parser, Debug)]
struct Args {
    payload: PathBuf,
}

#[derive(Tabled)]
struct SeriesRow {
    chart: usize,
    series: usize,
    kind: String,
    title: String,
    pane: usize,
    points: usize,
    first: String,
    last: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("reading {}", args.payload.display()))?;
    let envelope = ComponentArgs::from_json(&text).context("not a chart payload envelope")?;

    let rows: Vec<SeriesRow> = envelope
        .charts
        .iter()
        .enumerate()
        .flat_map(|(chart, payload)| {
            payload
                .series
                .iter()
                .enumerate()
                .map(move |(series, def)| SeriesRow {
                    chart,
                    series,
                    kind: def.kind.to_string(),
                    title: def.title.clone().unwrap_or_default(),
                    pane: def.pane,
                    points: def.len(),
                    first: def.first_time().unwrap_or("-").to_string(),
                    last: def.last_time().unwrap_or("-").to_string(),
                })
        })
        .collect();

    println!("key: {}", envelope.key.as_deref().unwrap_or("(none)"));
    for (idx, payload) in envelope.charts.iter().enumerate() {
        println!(
            "chart {idx}: {}x{}, {} pane(s)",
            payload.layout.width.unwrap_or_default(),
            payload.layout.height.unwrap_or_default(),
            payload.pane_count()
        );
    }
    println!("{}", Table::new(rows).with(Style::modern()));

    Ok(())
}
