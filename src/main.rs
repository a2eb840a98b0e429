use {
    anyhow::Result,
    clap::Parser,
    pane_charts::{
        Cli, DisplayBoundary, JsonFileBoundary,
        data::source_for_path,
        display::Output,
        display::WidgetEvent,
    },
    std::panic,
};

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("pane_charts"), my_code_level)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    let spec = args.pipeline_spec()?;
    let table = source_for_path(&args.bars).load_table()?;

    spec.lint();
    let charts = spec.run(&table)?;

    let mut boundary = JsonFileBoundary::new(match &args.out {
        Some(path) => Output::File(path.clone()),
        None => Output::Stdout,
    });
    let key = args.key.as_deref().or(spec.key.as_deref());
    let state = boundary.render(&charts, key)?;

    if let Some(event) = state.as_ref().and_then(WidgetEvent::from_value) {
        log::info!("widget reported a click on {:?}", event.day());
    }
    log::info!(
        "{} bars -> {} chart(s), {} series, {} points",
        table.len(),
        charts.len(),
        charts.iter().map(|c| c.series.len()).sum::<usize>(),
        charts.iter().map(|c| c.point_count()).sum::<usize>()
    );

    Ok(())
}
