use flagscope::data::classify::{classify_column, ChannelKind, ClassifiedDataset};
use flagscope::data::dataset::{Column, ColumnValues, Dataset};

fn sample() -> Dataset {
    let n = 4;
    Dataset::from_parts(
        "time",
        (0..n).map(|i| i as f64).collect(),
        vec![
            Column::new("Valve", ColumnValues::Bool(vec![true, false, false, true])),
            Column::new("F-Pump", ColumnValues::Numeric(vec![0.0, 1.0, f64::NAN, 2.0])),
            Column::new("Load %", ColumnValues::Numeric(vec![10.0, 20.0, 30.0, 40.0])),
            Column::new("Temp", ColumnValues::Numeric(vec![1.0, 2.0, 3.0, 4.0])),
            Column::new("Note", ColumnValues::Text(vec!["a".into(); 4])),
            Column::new("F-Door", ColumnValues::Bool(vec![false; 4])),
            Column::new("F-Level %", ColumnValues::Numeric(vec![0.0; 4])),
        ],
    )
    .unwrap()
}

#[test]
fn every_plottable_column_gets_exactly_one_kind() {
    let data = ClassifiedDataset::new(sample()).unwrap();
    let cls = data.classification();
    assert_eq!(cls.names(ChannelKind::Flag), ["Valve", "F-Door"]);
    assert_eq!(cls.names(ChannelKind::BoolState), ["F-Pump", "F-Level %"]);
    assert_eq!(cls.names(ChannelKind::Percent), ["Load %"]);
    assert_eq!(cls.names(ChannelKind::Numeric), ["Temp"]);
    assert_eq!(cls.unclassified(), ["Note"]);

    for col in data.dataset().columns() {
        let hits = ChannelKind::ALL
            .into_iter()
            .filter(|k| cls.contains(*k, &col.name))
            .count();
        let expected = usize::from(col.name != "Note");
        assert_eq!(hits, expected, "column {}", col.name);
    }
}

#[test]
fn boolean_type_wins_over_prefix_and_prefix_wins_over_percent() {
    let b = ColumnValues::Bool(vec![true]);
    let x = ColumnValues::Numeric(vec![1.0]);
    assert_eq!(classify_column("F-Door", &b), Some(ChannelKind::Flag));
    assert_eq!(classify_column("F-Level %", &x), Some(ChannelKind::BoolState));
    assert_eq!(classify_column("Load %", &x), Some(ChannelKind::Percent));
    assert_eq!(classify_column("Temp", &x), Some(ChannelKind::Numeric));
    assert_eq!(classify_column("Note", &ColumnValues::Text(vec![])), None);
}

#[test]
fn bool_state_values_are_recast_with_nan_as_true() {
    let data = ClassifiedDataset::new(sample()).unwrap();
    assert_eq!(
        data.boolean("F-Pump").unwrap(),
        [false, true, true, true].as_slice()
    );
    assert!(data.numeric("F-Pump").is_none());
    assert!(data.boolean("Temp").is_none());
    assert_eq!(data.numeric("Load %").unwrap().len(), 4);
}

#[test]
fn distinct_counts_drive_picker_defaults() {
    let data = ClassifiedDataset::new(sample()).unwrap();
    assert_eq!(data.distinct_count("Valve"), 2);
    assert_eq!(data.distinct_count("F-Door"), 1);
    assert_eq!(data.distinct_count("F-Pump"), 2);
    assert_eq!(data.distinct_count("Temp"), 4);
}

#[test]
fn gaps_inside_a_running_state_keep_it_running() {
    let ds = Dataset::from_parts(
        "time",
        vec![0.0, 1.0, 2.0],
        vec![Column::new("F-Pump", ColumnValues::Numeric(vec![1.0, f64::NAN, 1.0]))],
    )
    .unwrap();
    let data = ClassifiedDataset::new(ds).unwrap();
    assert_eq!(data.boolean("F-Pump").unwrap(), [true, true, true].as_slice());
    assert_eq!(data.distinct_count("F-Pump"), 1);
}

#[test]
fn classification_is_stable_across_runs() {
    let first = ClassifiedDataset::new(sample()).unwrap();
    let second = ClassifiedDataset::new(sample()).unwrap();
    assert_eq!(first.classification(), second.classification());
    for kind in ChannelKind::ALL {
        assert_eq!(
            first.classification().names(kind),
            second.classification().names(kind)
        );
    }
}
