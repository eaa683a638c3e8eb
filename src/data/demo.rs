//! Deterministic demo datasets, used by `--demo` and by tests.
//!
//! [`generate`] mirrors a typical process log: a third of the signals are
//! plain numeric values, a third are `F-` process states stored as `0`/`1`,
//! the rest are native boolean flags. Two percent channels are always added.
//!
//! [`battery`] simulates charge/discharge cycles of a battery pack.

use crate::data::dataset::{Column, ColumnValues, Dataset};
use crate::error::LoadError;

/// Smallest number of generated signals.
pub const MIN_SIGNALS: usize = 5;
/// First demo timestamp, 2024-01-01T00:00:00Z.
pub const DEMO_START: f64 = 1_704_067_200.0;
/// Spacing between demo samples in seconds.
pub const DEMO_STEP: f64 = 1.0;

/// Build a demo dataset with `points` rows and at least [`MIN_SIGNALS`] signals.
pub fn generate(points: usize, signals: usize) -> Result<Dataset, LoadError> {
    let signals = signals.max(MIN_SIGNALS);
    let n_numeric = signals / 3;
    let n_states = signals / 3;
    let n_flags = signals - n_numeric - n_states;

    let times: Vec<f64> = (0..points)
        .map(|k| DEMO_START + k as f64 * DEMO_STEP)
        .collect();
    let mut columns = Vec::with_capacity(signals + 2);

    for i in 0..n_numeric {
        let (amp, period) = (10.0 * (i + 1) as f64, 40.0 + 13.0 * i as f64);
        let values = (0..points)
            .map(|k| {
                let k = k as f64;
                amp * (std::f64::consts::TAU * k / period).sin() + 0.05 * k
            })
            .collect();
        columns.push(Column::new(
            format!("Value_{i}"),
            ColumnValues::Numeric(values),
        ));
    }

    for i in 0..n_states {
        let values = square_wave(points, 25 + 9 * i, i)
            .map(|on| if on { 1.0 } else { 0.0 })
            .collect();
        columns.push(Column::new(
            format!("F-Process_{i}"),
            ColumnValues::Numeric(values),
        ));
    }

    for i in 0..n_flags {
        let values = square_wave(points, 11 + 5 * i, 3 * i + 1).collect();
        columns.push(Column::new(format!("State_{i}"), ColumnValues::Bool(values)));
    }

    for (i, name) in ["PRC1 %", "PRC2 %"].into_iter().enumerate() {
        let period = 60.0 + 30.0 * i as f64;
        let values = (0..points)
            .map(|k| 50.0 + 45.0 * (std::f64::consts::TAU * k as f64 / period).cos())
            .collect();
        columns.push(Column::new(name, ColumnValues::Numeric(values)));
    }

    log::info!("generated demo dataset: {points} rows, {signals} signals");
    Dataset::from_parts("time", times, columns)
}

/// Battery pack parameters. Voltages in mV, currents in mA.
mod batt {
    pub const START_MV: f64 = 10_800.0;
    pub const FULL_MV: f64 = 12_600.0;
    pub const EMPTY_MV: f64 = 9_000.0;
    pub const MAX_MA: f64 = 3_000.0;
    pub const CAPACITY_MAH: f64 = 5_000.0;
    pub const SAMPLE_SECS: f64 = 10.0;
    /// Capacity kept after each cycle.
    pub const CAPACITY_FADE: f64 = 0.998;
    /// Internal resistance growth per cycle.
    pub const RESISTANCE_GROWTH: f64 = 1.005;
    pub const AMBIENT_C: f64 = 22.0;
    pub const MAX_C: f64 = 45.0;
    pub const HEAT: f64 = 0.0002;
    pub const COOLING: f64 = 0.0001;
    /// Current above which the pack counts as charging or discharging.
    pub const ACTIVE_MA: f64 = 50.0;
    /// Voltage tolerance and idle current of the full/empty flags.
    pub const FLAG_MV: f64 = 5.0;
    pub const IDLE_MA: f64 = 5.0;
}

/// Number of cycles in the battery demo.
pub const BATTERY_CYCLES: usize = 3;

fn steps(hours: f64) -> usize {
    (hours * 3600.0 / batt::SAMPLE_SECS) as usize
}

fn fraction(i: usize, n: usize) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64
    } else {
        0.0
    }
}

/// Voltage and current of one cycle: 2 h charge, 2 h rest, 2 h discharge, 5 h rest.
fn battery_cycle() -> (Vec<f64>, Vec<f64>) {
    let (mut volts, mut amps) = (Vec::new(), Vec::new());

    let n = steps(2.0);
    for i in 0..n {
        let x = fraction(i, n);
        volts.push(
            batt::START_MV + (x * 10.0).ln_1p() * (batt::FULL_MV - batt::START_MV) / 11f64.ln(),
        );
        amps.push(batt::MAX_MA * (-3.0 * x).exp());
    }

    let rest = steps(2.0);
    volts.extend(std::iter::repeat(batt::FULL_MV).take(rest));
    amps.extend(std::iter::repeat(0.0).take(rest));

    let cutoff = n * 95 / 100;
    for i in 0..n {
        let x = fraction(i, n);
        volts.push(batt::FULL_MV - x.powf(1.7) * (batt::FULL_MV - batt::EMPTY_MV));
        amps.push(if i < cutoff {
            -batt::MAX_MA
        } else {
            -batt::MAX_MA * (1.0 - fraction(i - cutoff, n - cutoff))
        });
    }

    let rest = steps(5.0);
    volts.extend(std::iter::repeat(batt::EMPTY_MV).take(rest));
    amps.extend(std::iter::repeat(0.0).take(rest));
    (volts, amps)
}

/// Build the battery demo: [`BATTERY_CYCLES`] cycles sampled every 10 s.
///
/// Channels: voltage, current, temperature, capacity, error bound and
/// remaining capacity; `FC`/`FD` full and empty flags; `F-CHARGE` and
/// `F-DISCHARGE` states; `Health %` and `Efficiency %`.
pub fn battery() -> Result<Dataset, LoadError> {
    let (cycle_volts, cycle_amps) = battery_cycle();
    let len = cycle_volts.len();
    let rows = len * BATTERY_CYCLES;

    let mut voltage = Vec::with_capacity(rows);
    let mut current = Vec::with_capacity(rows);
    let mut temperature = Vec::with_capacity(rows);
    let mut capacity = Vec::with_capacity(rows);
    let mut max_error = Vec::with_capacity(rows);
    let mut remaining = Vec::with_capacity(rows);

    for cycle in 0..BATTERY_CYCLES {
        let cap = batt::CAPACITY_MAH * batt::CAPACITY_FADE.powi(cycle as i32);
        let err = 5.0 * batt::RESISTANCE_GROWTH.powi(cycle as i32);
        let mut temp = batt::AMBIENT_C;
        for (i, (&v, &a)) in cycle_volts.iter().zip(&cycle_amps).enumerate() {
            if i > 0 {
                let elapsed = i as f64 * batt::SAMPLE_SECS;
                let loss = (a / 1000.0).powi(2) * (1.0 + 0.01 * elapsed / 3600.0);
                temp = (temp + loss * batt::HEAT - batt::COOLING).clamp(batt::AMBIENT_C, batt::MAX_C);
            }
            voltage.push(v);
            current.push(a);
            temperature.push(temp);
            capacity.push(cap);
            max_error.push(err);
            let charge = ((v - batt::EMPTY_MV) / (batt::FULL_MV - batt::EMPTY_MV)).clamp(0.0, 1.0);
            remaining.push(charge * cap);
        }
    }

    let times = (0..rows)
        .map(|k| DEMO_START + k as f64 * batt::SAMPLE_SECS)
        .collect();
    let idle = |a: f64| a.abs() < batt::IDLE_MA;
    let fc = voltage
        .iter()
        .zip(&current)
        .map(|(&v, &a)| v >= batt::FULL_MV - batt::FLAG_MV && idle(a))
        .collect();
    let fd = voltage
        .iter()
        .zip(&current)
        .map(|(&v, &a)| v <= batt::EMPTY_MV + batt::FLAG_MV && idle(a))
        .collect();
    let on = |b: bool| if b { 1.0 } else { 0.0 };
    let charging = current.iter().map(|&a| on(a > batt::ACTIVE_MA)).collect();
    let discharging = current.iter().map(|&a| on(a < -batt::ACTIVE_MA)).collect();
    let health = voltage
        .iter()
        .map(|&v| 100.0 * (v - batt::EMPTY_MV) / (batt::FULL_MV - batt::EMPTY_MV))
        .collect();
    let efficiency = (0..rows)
        .map(|k| {
            let phase = 10.0 * std::f64::consts::PI * fraction(k, rows);
            (90.0 + 10.0 * phase.sin()).clamp(70.0, 100.0)
        })
        .collect();

    let columns = vec![
        Column::new("Voltage", ColumnValues::Numeric(voltage)),
        Column::new("Current", ColumnValues::Numeric(current)),
        Column::new("Temperature", ColumnValues::Numeric(temperature)),
        Column::new("Capacity", ColumnValues::Numeric(capacity)),
        Column::new("Max Error", ColumnValues::Numeric(max_error)),
        Column::new("Remaining Capacity", ColumnValues::Numeric(remaining)),
        Column::new("FC", ColumnValues::Bool(fc)),
        Column::new("FD", ColumnValues::Bool(fd)),
        Column::new("F-CHARGE", ColumnValues::Numeric(charging)),
        Column::new("F-DISCHARGE", ColumnValues::Numeric(discharging)),
        Column::new("Health %", ColumnValues::Numeric(health)),
        Column::new("Efficiency %", ColumnValues::Numeric(efficiency)),
    ];

    log::info!("generated battery demo: {rows} rows, {BATTERY_CYCLES} cycles");
    Dataset::from_parts("Timestamp", times, columns)
}

/// On/off pattern whose runs alternate between `half` and `half / 2` samples,
/// shifted by `phase`.
fn square_wave(points: usize, half: usize, phase: usize) -> impl Iterator<Item = bool> {
    let cycle = half + half / 2;
    (0..points).map(move |k| (k + phase) % cycle >= half)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_counts_follow_thirds() {
        let ds = generate(50, 9).unwrap();
        let names: Vec<&str> = ds.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.iter().filter(|n| n.starts_with("Value_")).count(), 3);
        assert_eq!(names.iter().filter(|n| n.starts_with("F-Process_")).count(), 3);
        assert_eq!(names.iter().filter(|n| n.starts_with("State_")).count(), 3);
        assert!(names.contains(&"PRC1 %"));
        assert!(names.contains(&"PRC2 %"));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate(30, 5).unwrap(), generate(30, 5).unwrap());
    }

    #[test]
    fn battery_cycles_charge_rest_discharge_rest() {
        let ds = battery().unwrap();
        let per_cycle = steps(2.0) * 2 + steps(2.0) + steps(5.0);
        assert_eq!(ds.len(), per_cycle * BATTERY_CYCLES);
        assert_eq!(ds.times()[1] - ds.times()[0], batt::SAMPLE_SECS);

        let column = |name: &str| match &ds.column(name).unwrap().values {
            ColumnValues::Numeric(v) => v.clone(),
            other => panic!("{name} is not numeric: {other:?}"),
        };
        let charging = column("F-CHARGE");
        let discharging = column("F-DISCHARGE");
        assert_eq!(charging[0], 1.0);
        assert!(charging.iter().zip(&discharging).all(|(c, d)| c * d == 0.0));
        assert!(discharging.contains(&1.0));

        match &ds.column("FC").unwrap().values {
            ColumnValues::Bool(v) => assert!(v[steps(2.0) + 1]),
            other => panic!("FC is not boolean: {other:?}"),
        }
        let temps = column("Temperature");
        assert!(temps.iter().all(|t| (batt::AMBIENT_C..=batt::MAX_C).contains(t)));
    }

    #[test]
    fn too_few_signals_are_raised() {
        let ds = generate(10, 1).unwrap();
        assert_eq!(ds.columns().len(), MIN_SIGNALS + 2);
    }
}
