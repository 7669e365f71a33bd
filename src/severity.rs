/// Which way a reading goes bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HighIsBad,
    LowIsBad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityBand {
    Normal,
    Warning,
    Critical,
}

impl SeverityBand {
    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Normal => "OK",
            SeverityBand::Warning => "WARNING",
            SeverityBand::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
    NetworkLoad,
    BatteryLevel,
    CpuTemperature,
    BatteryTemperature,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
    pub polarity: Polarity,
}

impl MetricKind {
    pub fn thresholds(self) -> Thresholds {
        match self {
            MetricKind::Cpu | MetricKind::Memory | MetricKind::Disk | MetricKind::NetworkLoad => {
                Thresholds {
                    warning: 60.0,
                    critical: 80.0,
                    polarity: Polarity::HighIsBad,
                }
            }
            MetricKind::BatteryLevel => Thresholds {
                warning: 50.0,
                critical: 20.0,
                polarity: Polarity::LowIsBad,
            },
            MetricKind::CpuTemperature => Thresholds {
                warning: 60.0,
                critical: 80.0,
                polarity: Polarity::HighIsBad,
            },
            MetricKind::BatteryTemperature => Thresholds {
                warning: 35.0,
                critical: 45.0,
                polarity: Polarity::HighIsBad,
            },
        }
    }
}

/// Map a reading to its band. Cutoffs are strict: a value sitting exactly on
/// a cutoff stays in the lower band.
pub fn classify(kind: MetricKind, value: f64) -> SeverityBand {
    let t = kind.thresholds();
    match t.polarity {
        Polarity::HighIsBad => {
            if value > t.critical {
                SeverityBand::Critical
            } else if value > t.warning {
                SeverityBand::Warning
            } else {
                SeverityBand::Normal
            }
        }
        Polarity::LowIsBad => {
            if value < t.critical {
                SeverityBand::Critical
            } else if value < t.warning {
                SeverityBand::Warning
            } else {
                SeverityBand::Normal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_boundaries_are_strict() {
        assert_eq!(classify(MetricKind::Cpu, 60.0), SeverityBand::Normal);
        assert_eq!(classify(MetricKind::Cpu, 60.1), SeverityBand::Warning);
        assert_eq!(classify(MetricKind::Cpu, 80.0), SeverityBand::Warning);
        assert_eq!(classify(MetricKind::Cpu, 80.1), SeverityBand::Critical);
    }

    #[test]
    fn battery_polarity_is_inverted() {
        assert_eq!(classify(MetricKind::BatteryLevel, 15.0), SeverityBand::Critical);
        assert_eq!(classify(MetricKind::Cpu, 15.0), SeverityBand::Normal);
        assert_eq!(classify(MetricKind::BatteryLevel, 20.0), SeverityBand::Warning);
        assert_eq!(classify(MetricKind::BatteryLevel, 50.0), SeverityBand::Normal);
        assert_eq!(classify(MetricKind::BatteryLevel, 49.9), SeverityBand::Warning);
    }

    #[test]
    fn temperature_cutoffs_differ_by_kind() {
        assert_eq!(classify(MetricKind::CpuTemperature, 40.0), SeverityBand::Normal);
        assert_eq!(
            classify(MetricKind::BatteryTemperature, 40.0),
            SeverityBand::Warning
        );
        assert_eq!(
            classify(MetricKind::BatteryTemperature, 45.5),
            SeverityBand::Critical
        );
        assert_eq!(classify(MetricKind::CpuTemperature, 81.0), SeverityBand::Critical);
    }

    #[test]
    fn shared_percent_kinds_agree() {
        for kind in [
            MetricKind::Cpu,
            MetricKind::Memory,
            MetricKind::Disk,
            MetricKind::NetworkLoad,
        ] {
            assert_eq!(classify(kind, 70.0), SeverityBand::Warning);
            assert_eq!(classify(kind, 70.0), classify(kind, 70.0));
        }
    }

    #[test]
    fn bands_order_by_severity() {
        assert!(SeverityBand::Normal < SeverityBand::Warning);
        assert!(SeverityBand::Warning < SeverityBand::Critical);
    }
}
