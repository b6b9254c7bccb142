//! Human-readable error descriptions and structured JSON error formatting.

use proload_core::error::{CalibrationError, LoadCellError};
use proload_hardware::error::HwError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(le) = err.downcast_ref::<LoadCellError>() {
        return match le {
            LoadCellError::Capacity(msg) => format!(
                "What happened: Invalid capacity ({msg}).\nLikely causes: A zero, negative or non-numeric value for --capacity-t or capacity.max_load_t.\nHow to fix: Enter the capacity in tonnes as a positive number (e.g. `--capacity-t 10`)."
            ),
            LoadCellError::Calibration(ce) => humanize_calibration(ce),
            LoadCellError::Config(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
            ),
            LoadCellError::Sensor(msg) => format!(
                "What happened: Sensor read failed ({msg}).\nLikely causes: The sensor link is down.\nHow to fix: Reconnect the sensor, or read with --disconnected to show zero load."
            ),
        };
    }

    if let Some(ce) = err.downcast_ref::<CalibrationError>() {
        return humanize_calibration(ce);
    }

    if let Some(HwError::InvalidVoltage) = err.downcast_ref::<HwError>() {
        return "What happened: The injector was given a voltage that is not a number.\nHow to fix: Pass a numeric --voltage between 0.4 and 4.7.".to_string();
    }

    // String-based heuristics for errors coming from file loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("calibration csv must have headers") {
        return "Invalid headers in calibration CSV. Expected 'id,voltage,weight'.".to_string();
    }

    if lower.contains("open calibration csv") {
        return format!(
            "What happened: Could not open the calibration CSV.\nHow to fix: Check the --calibration path. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

fn humanize_calibration(ce: &CalibrationError) -> String {
    match ce {
        CalibrationError::DegenerateVoltages(v) => format!(
            "What happened: Every calibration point was captured at {v} V, so no slope can be fitted (voltages are all identical).\nHow to fix: Capture points at different loads so the sensor voltage changes between them."
        ),
        CalibrationError::NonFinite { id } => format!(
            "What happened: Calibration point {id} is not a finite number.\nHow to fix: Re-enter its voltage and weight."
        ),
        CalibrationError::IllConditioned => format!(
            "What happened: {ce}.\nHow to fix: Check the calibration voltages for extreme values and re-capture the points."
        ),
        CalibrationError::DuplicateId(id) => format!(
            "What happened: {ce}.\nHow to fix: Give every calibration point a unique id (offending id: {id})."
        ),
        CalibrationError::UnknownId(id) => format!(
            "What happened: {ce}.\nHow to fix: Pick an id from the current point list (see `proload fit`); {id} is not in it."
        ),
        CalibrationError::IdsExhausted => format!(
            "What happened: {ce}.\nHow to fix: Remove the point with the largest id, then capture again."
        ),
    }
}

/// Short, stable error category used in JSON output.
pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(le) = err.downcast_ref::<LoadCellError>() {
        return match le {
            LoadCellError::Capacity(_) => "Capacity",
            LoadCellError::Calibration(_) => "Calibration",
            LoadCellError::Config(_) => "Config",
            LoadCellError::Sensor(_) => "Sensor",
        };
    }
    if err.downcast_ref::<CalibrationError>().is_some() {
        return "Calibration";
    }
    if err.downcast_ref::<HwError>().is_some() {
        return "Sensor";
    }
    "Error"
}

/// Sensor problems exit with 3; everything else with 1 (clap uses 2 for usage errors).
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match reason_name(err) {
        "Sensor" => 3,
        _ => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({ "reason": reason_name(err), "message": humanize(err) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_errors_are_explained() {
        let err: eyre::Report = LoadCellError::Capacity("0 t".into()).into();
        assert!(humanize(&err).contains("Invalid capacity"));
        assert_eq!(exit_code_for_error(&err), 1);
        assert!(format_error_json(&err).contains("\"reason\":\"Capacity\""));
    }

    #[test]
    fn sensor_errors_exit_three() {
        let err: eyre::Report = LoadCellError::Sensor("down".into()).into();
        assert_eq!(exit_code_for_error(&err), 3);
    }

    #[test]
    fn unknown_and_duplicate_ids_get_different_hints() {
        let unknown: eyre::Report = LoadCellError::from(CalibrationError::UnknownId(9)).into();
        let dup: eyre::Report = CalibrationError::DuplicateId(2).into();
        let unknown = humanize(&unknown);
        assert!(unknown.contains("unknown calibration point id 9"));
        assert!(!unknown.contains("unique id"));
        assert!(humanize(&dup).contains("unique id (offending id: 2)"));
    }

    #[test]
    fn ill_conditioned_fit_is_not_called_identical() {
        let err: eyre::Report = CalibrationError::IllConditioned.into();
        let text = humanize(&err);
        assert!(text.contains("too close together"));
        assert!(!text.contains("identical"));
        assert_eq!(reason_name(&err), "Calibration");
    }

    #[test]
    fn csv_header_heuristic() {
        let err = eyre::eyre!("calibration CSV must have headers 'id,voltage,weight', got: raw,grams");
        assert!(humanize(&err).starts_with("Invalid headers"));
        assert_eq!(reason_name(&err), "Error");
    }
}
