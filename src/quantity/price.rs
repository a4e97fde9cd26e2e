quantity!(CentsPerKilowattHour, f64, "¢/kWh");

impl CentsPerKilowattHour {
    /// Prices strictly below this one are considered favourable.
    pub const THRESHOLD: Self = Self(8.0);

    #[must_use]
    pub fn is_under_threshold(self) -> bool {
        self < Self::THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok() -> Result<(), std::num::ParseFloatError> {
        let price: CentsPerKilowattHour = "5.50".parse()?;
        assert_eq!(price, CentsPerKilowattHour(5.5));
        Ok(())
    }

    #[test]
    fn parse_negative_ok() -> Result<(), std::num::ParseFloatError> {
        let price: CentsPerKilowattHour = "-0.3".parse()?;
        assert!(price.is_under_threshold());
        Ok(())
    }

    #[test]
    fn parse_garbage_fails() {
        assert!("cheap".parse::<CentsPerKilowattHour>().is_err());
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(CentsPerKilowattHour(7.99).is_under_threshold());
        assert!(!CentsPerKilowattHour(8.0).is_under_threshold());
        assert!(!CentsPerKilowattHour(9.1).is_under_threshold());
    }

    #[test]
    fn display_respects_precision() {
        assert_eq!(format!("{:.2}", CentsPerKilowattHour(5.5)), "5.50 ¢/kWh");
    }
}
