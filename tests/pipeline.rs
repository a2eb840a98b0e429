use {
    pane_charts::{
        Bar, ChartError, ComponentArgs, CsvBarSource, DataTable, DisplayBoundary,
        JsonFileBoundary, Preset,
        analysis::{ChartAssembler, ColorPolicy, Colorizer, extract_series},
        config::{COLOR_BEAR, COLOR_BULL},
        data::BarSource,
        domain::Trim,
        models::{ChartLayout, Column, SeriesData, SeriesDefinition, SeriesKind},
    },
    std::io::Write,
};

fn day(i: usize) -> String {
    // 2024-01-01 plus i days, without pulling chrono into the tests
    let months = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let (mut month, mut rest) = (0, i);
    while rest >= months[month] {
        rest -= months[month];
        month += 1;
    }
    format!("2024-{:02}-{:02}", month + 1, rest + 1)
}

fn bars(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.3).sin() * 8.0 + i as f64 * 0.1;
            let open = close + (i as f64 * 1.7).cos() * 1.5;
            Bar::new(
                day(i),
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
                1_000.0 + (i % 7) as f64 * 100.0,
            )
        })
        .collect()
}

#[test]
fn multipane_preset_end_to_end() {
    let table = DataTable::from_bars(&bars(90));
    let charts = Preset::Multipane.spec("AAPL").run(&table).unwrap();

    assert_eq!(charts.len(), 1);
    let chart = &charts[0];
    assert_eq!(chart.pane_count(), 4);

    let lengths: Vec<usize> = chart.series.iter().map(SeriesDefinition::len).collect();
    // candles, SMA 60, EMA 14, bid vol, ask vol, RSI 14, MACDh, MACDs, MACD
    assert_eq!(lengths, vec![90, 31, 77, 90, 90, 76, 75, 75, 79]);

    for series in &chart.series {
        if let SeriesData::Values(points) = &series.data {
            assert!(
                points.iter().all(|p| p.value.is_finite()),
                "{:?} still has warm-up NaNs",
                series.title
            );
        }
    }

    let sma = &chart.series[1];
    assert_eq!(sma.first_time(), Some(day(59).as_str()));
    assert_eq!(sma.last_time(), Some(day(89).as_str()));

    match &chart.series[4].data {
        SeriesData::Values(points) => assert!(points.iter().all(|p| p.value < 0.0)),
        other => panic!("ask volume should be values, got {other:?}"),
    }
}

#[test]
fn candle_colours_follow_open_versus_close() {
    let source = bars(30);
    let table = DataTable::from_bars(&source);
    let charts = Preset::Stacked.spec("MSFT").run(&table).unwrap();
    assert_eq!(charts.len(), 3);

    let SeriesData::Ohlc(candles) = &charts[0].series[0].data else {
        panic!("first series should be candles");
    };
    for (bar, candle) in source.iter().zip(candles) {
        let expected = if bar.open > bar.close { COLOR_BEAR } else { COLOR_BULL };
        assert_eq!(candle.color.as_deref(), Some(expected));
    }

    // volume bars reuse the candle colour column
    let SeriesData::Values(volume) = &charts[1].series[0].data else {
        panic!("volume should be values");
    };
    assert_eq!(volume[0].color, candles[0].color);
}

#[test]
fn csv_to_payload_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("aapl.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Volume").unwrap();
    for bar in bars(70) {
        writeln!(
            file,
            "{} 00:00:00-05:00,{},{},{},{},{}",
            bar.time, bar.open, bar.high, bar.low, bar.close, bar.volume
        )
        .unwrap();
    }
    drop(file);

    let table = CsvBarSource::new(&csv_path).load_table().unwrap();
    let spec = Preset::Multipane.spec("AAPL");
    let charts = spec.run(&table).unwrap();

    let out = dir.path().join("payload.json");
    let mut boundary = JsonFileBoundary::to_path(&out);
    assert_eq!(boundary.render(&charts, spec.key.as_deref()).unwrap(), None);

    let envelope = ComponentArgs::from_json(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(envelope.key.as_deref(), Some("multipane"));
    assert_eq!(envelope.charts, charts);
    assert_eq!(envelope.charts[0].series[0].first_time(), Some("2024-01-01"));
}

#[test]
fn extraction_lengths_and_times_for_every_trim() {
    let table = DataTable::from_bars(&bars(12));

    for n in 0..=15 {
        let points = extract_series(&table, "close", Trim::new(n), &ColorPolicy::Omit).unwrap();
        assert_eq!(points.len(), 12usize.saturating_sub(n), "trim {n}");
        for (offset, point) in points.iter().enumerate() {
            assert_eq!(point.time, table.times()[n + offset]);
            assert_eq!(point.value, table.numeric("close").unwrap()[n + offset]);
        }
    }

    assert_eq!(
        extract_series(&table, "SMA_60", Trim::NONE, &ColorPolicy::Omit),
        Err(ChartError::ColumnNotFound {
            column: "SMA_60".into()
        })
    );
}

#[test]
fn three_row_colourizer_scenario() {
    let table = DataTable::from_columns(
        vec!["2024-01-02".into(), "2024-01-03".into(), "2024-01-04".into()],
        vec![
            ("close".into(), Column::Numeric(vec![10.0, 12.0, 9.0])),
            ("open".into(), Column::Numeric(vec![11.0, 11.0, 9.0])),
        ],
    )
    .unwrap();

    let colors = Colorizer::new("open", "close", "bear", "bull")
        .colors(&table)
        .unwrap();
    assert_eq!(colors, vec!["bear", "bull", "bull"]);
}

#[test]
fn warm_up_trim_leaves_the_single_defined_value() {
    let table = DataTable::from_columns(
        (0..5).map(day).collect(),
        vec![(
            "SMA".into(),
            Column::Numeric(vec![f64::NAN, f64::NAN, f64::NAN, f64::NAN, 7.5]),
        )],
    )
    .unwrap();

    let points = extract_series(&table, "SMA", Trim::new(4), &ColorPolicy::Omit).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].value, 7.5);
    assert_eq!(points[0].time, day(4));
}

#[test]
fn candles_then_volume_assemble_in_order() {
    let table = DataTable::from_bars(&bars(5));
    let candles = SeriesDefinition::new(
        SeriesKind::Candlestick,
        SeriesData::Ohlc(
            pane_charts::analysis::extract_ohlc(&table, Trim::NONE, &ColorPolicy::Omit).unwrap(),
        ),
    )
    .unwrap();
    let volume = SeriesDefinition::new(
        SeriesKind::Histogram,
        SeriesData::Values(
            extract_series(&table, "volume", Trim::NONE, &ColorPolicy::Omit).unwrap(),
        ),
    )
    .unwrap();

    let payload = ChartAssembler::new(ChartLayout::sized(600, 400))
        .add(candles, 0)
        .add(volume, 1)
        .build()
        .unwrap();
    assert_eq!(payload.panes(), vec![0, 1]);
    assert_eq!(payload.series[0].kind, SeriesKind::Candlestick);
    assert_eq!(payload.series[1].kind, SeriesKind::Histogram);
}
