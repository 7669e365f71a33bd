use std::time::Duration;

use super::PlatformExtensions;
use crate::system::command::stdout_within;
use crate::system::snapshot::BatteryReading;

/// `pmset` answers in a few milliseconds; past this the battery row shows N/A.
const PMSET_TIMEOUT: Duration = Duration::from_millis(500);

pub struct Platform;

impl PlatformExtensions for Platform {
    async fn battery() -> Option<BatteryReading> {
        let args = ["-g".to_string(), "batt".to_string()];
        let output = stdout_within("pmset", &args, PMSET_TIMEOUT).await?;
        parse_pmset(&output)
    }

    // No sensor list without SMC access; temperatures come from the helper.
    fn has_native_sensors() -> bool {
        false
    }

    fn default_temperature_helper() -> Option<&'static str> {
        Some("osx-cpu-temp")
    }
}

/// `pmset -g batt` prints the power source on the first line and one line per
/// battery, e.g. ` -InternalBattery-0 (id=1234)	85%; charging; ...`.
fn parse_pmset(output: &str) -> Option<BatteryReading> {
    let mut lines = output.lines();
    let on_ac = lines.next()?.contains("'AC Power'");
    let battery_line = lines.find(|l| l.contains("InternalBattery"))?;
    let pct_end = battery_line.find('%')?;
    let digits_start = battery_line[..pct_end]
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);
    let percent: f32 = battery_line[digits_start..pct_end].parse().ok()?;
    Some(BatteryReading {
        percent: percent.clamp(0.0, 100.0),
        is_charging: on_ac,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_discharging_laptop() {
        let out = "Now drawing from 'Battery Power'\n -InternalBattery-0 (id=4653155)\t85%; discharging; 4:20 remaining present: true\n";
        let reading = parse_pmset(out).unwrap();
        assert_eq!(reading.percent, 85.0);
        assert!(!reading.is_charging);
    }

    #[test]
    fn parses_plugged_in_laptop() {
        let out = "Now drawing from 'AC Power'\n -InternalBattery-0 (id=4653155)\t100%; charged; 0:00 remaining present: true\n";
        assert!(parse_pmset(out).unwrap().is_charging);
    }

    #[test]
    fn desktop_mac_has_no_battery() {
        assert!(parse_pmset("Now drawing from 'AC Power'\n").is_none());
    }
}
