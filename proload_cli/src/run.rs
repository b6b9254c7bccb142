//! Command execution: wire config, sensor and core together and render results.

use proload_core::error::Result;
use proload_core::util::{fmt_fixed, render_load_bar};
use proload_core::{DemoScenario, Reading, SystemConfig, SystemInfo, sample};
use proload_hardware::SimulatedSensor;
use proload_traits::VoltageSource;
use serde_json::{Value, json};

/// Width of the text load bar.
const BAR_WIDTH: usize = 20;

/// Result of one command in both output flavours.
pub struct Output {
    pub text: String,
    pub json: Value,
}

pub fn read(
    sys: &SystemConfig,
    sensor: &mut SimulatedSensor,
    voltage: Option<f64>,
    disconnected: bool,
) -> Result<Output> {
    if disconnected {
        sensor.disconnect();
    }
    if let Some(v) = voltage {
        sensor.set_voltage(v)?;
    }
    let (volts, reading) = sample(sys, sensor)?;
    Ok(reading_output(sys, sensor, volts, &reading))
}

pub fn demo(
    sys: &SystemConfig,
    sensor: &mut SimulatedSensor,
    percent: Option<f64>,
    scenario: Option<DemoScenario>,
) -> Result<Output> {
    let pct = percent
        .or(scenario.map(DemoScenario::percent))
        .ok_or_else(|| eyre::eyre!("demo needs --percent or --scenario"))?;
    let target_v = sys.voltage_for_target_load(pct);
    tracing::info!(target_pct = pct, volts = target_v, "demo load");
    // A flat calibration has no voltage for most targets; the injector stays put.
    if target_v.is_nan() {
        tracing::warn!(target_pct = pct, "no sensor voltage reaches this load");
    } else {
        sensor.set_voltage(target_v)?;
    }
    let (volts, reading) = sample(sys, sensor)?;
    let mut out = reading_output(sys, sensor, volts, &reading);
    out.text = format!(
        "TARGET   {} %  ({} V)\n{}",
        fmt_fixed(pct, 1),
        fmt_fixed(target_v, 2),
        out.text
    );
    if let Value::Object(map) = &mut out.json {
        map.insert("target_pct".into(), json!(pct));
        map.insert("target_voltage".into(), json!(target_v));
    }
    Ok(out)
}

pub fn fit(sys: &SystemConfig) -> Output {
    let c = sys.coefficients();
    let points: Vec<Value> = sys
        .calibration()
        .points()
        .iter()
        .map(|p| json!({ "id": p.id, "voltage": p.voltage, "weight": p.weight }))
        .collect();
    let mut text = String::from("ID   VOLTAGE    WEIGHT\n");
    for p in sys.calibration().points() {
        text.push_str(&format!(
            "{:<4} {:>7} V  {:>10} kg\n",
            p.id,
            fmt_fixed(p.voltage, 3),
            fmt_fixed(p.weight, 1)
        ));
    }
    text.push_str(&format!(
        "SLOPE     {}\nINTERCEPT {}",
        fmt_fixed(c.slope, 4),
        fmt_fixed(c.intercept, 4)
    ));
    Output {
        text,
        json: json!({ "slope": c.slope, "intercept": c.intercept, "points": points }),
    }
}

pub fn info(sys: &SystemConfig) -> Output {
    let info = SystemInfo::from(sys);
    Output {
        text: info.to_string(),
        json: json!({
            "firmware": info.firmware,
            "hardware_id": info.hardware_id,
            "max_load_kg": info.max_load_kg,
            "calibration_points": info.calibration_points,
            "slope": info.slope,
            "intercept": info.intercept,
        }),
    }
}

fn reading_output(
    sys: &SystemConfig,
    sensor: &SimulatedSensor,
    volts: f64,
    r: &Reading,
) -> Output {
    let link = match sensor.device_name() {
        Some(name) => format!("{name} (connected)"),
        None => "no sensor (disconnected)".to_string(),
    };
    let text = format!(
        "DEVICE   {link}\nVOLTAGE  {} V\nWEIGHT   {} kg\nLOAD     {} %  {}\nSTATUS   {}",
        fmt_fixed(volts, 2),
        fmt_fixed(r.weight, 1),
        fmt_fixed(r.load_percentage, 1),
        render_load_bar(r.load_percentage, BAR_WIDTH),
        r.status,
    );
    // serde_json maps NaN/Inf to null
    let json = json!({
        "device": sensor.device_name(),
        "connected": sensor.is_connected(),
        "voltage": volts,
        "weight_kg": r.weight,
        "load_pct": r.load_percentage,
        "max_load_kg": sys.max_load(),
        "status": r.status.label(),
        "color": r.status.color_hex(),
    });
    Output { text, json }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proload_core::{CalibrationPoint, CalibrationSet};

    #[test]
    fn read_renders_factory_midpoint() {
        let sys = SystemConfig::factory();
        let mut sensor = SimulatedSensor::new();
        let out = read(&sys, &mut sensor, Some(2.5), false).unwrap();
        assert!(out.text.contains("5000.0 kg"));
        assert!(out.text.contains("50.0 %"));
        assert!(out.text.contains("NORMAL"));
        assert_eq!(out.json["status"], "NORMAL");
        assert_eq!(out.json["weight_kg"], 5000.0);
    }

    #[test]
    fn disconnected_read_is_zero() {
        let sys = SystemConfig::factory();
        let mut sensor = SimulatedSensor::new();
        let out = read(&sys, &mut sensor, Some(4.6), true).unwrap();
        assert!(out.text.contains("disconnected"));
        assert_eq!(out.json["weight_kg"], 0.0);
        assert_eq!(out.json["connected"], false);
    }

    #[test]
    fn demo_scenario_hits_status() {
        let sys = SystemConfig::factory();
        let mut sensor = SimulatedSensor::new();
        let out = demo(&sys, &mut sensor, None, Some(DemoScenario::Danger)).unwrap();
        assert_eq!(out.json["status"], "DANGER");
        assert_eq!(out.json["target_pct"], 90.0);
    }

    #[test]
    fn flat_calibration_demo_shows_unreachable_target() {
        let mut sys = SystemConfig::factory();
        let flat = CalibrationSet::from_points(vec![
            CalibrationPoint::new(1, 1.0, 100.0),
            CalibrationPoint::new(2, 2.0, 100.0),
        ])
        .unwrap();
        sys.replace_calibration(flat).unwrap();
        let mut sensor = SimulatedSensor::new();
        sensor.set_voltage(2.5).unwrap();

        let out = demo(&sys, &mut sensor, Some(1.0), None).unwrap();
        assert!(out.text.starts_with("TARGET   1.0 %  (N/A V)"));
        assert!(out.json["target_voltage"].is_null());
        assert_eq!(out.json["voltage"], 2.5);
        assert_eq!(out.json["weight_kg"], 100.0);
    }

    #[test]
    fn fit_prints_four_decimals() {
        let out = fit(&SystemConfig::factory());
        assert!(out.text.contains("SLOPE     2500.0000"));
        assert!(out.text.contains("INTERCEPT -1250.0000"));
        assert_eq!(out.json["points"].as_array().map(Vec::len), Some(2));
    }
}
