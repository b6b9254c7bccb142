#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing, validation and the runtime mapping must reject bad input without panicking.
    let Ok(cfg) = toml::from_str::<proload_config::Config>(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    // Extreme magnitudes may still be refused by the runtime mapping; that is fine.
    if let Ok(sys) = proload_core::SystemConfig::try_from(&cfg) {
        assert!(sys.coefficients().is_finite());
        let r = sys.evaluate(cfg.sensor.voltage, cfg.sensor.connected);
        assert!(r.weight.is_nan() || r.weight >= 0.0);
    }
});
