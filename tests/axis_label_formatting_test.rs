// tests/axis_label_formatting_test.rs

use lab_reduction::plot_framework::format_axis_value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_axis_uses_k_notation() {
        // Attenuation counts run from ~27k down to ~8k
        assert_eq!(format_axis_value(27032.0), "27.0k");
        assert_eq!(format_axis_value(13516.0), "13.5k");
        assert_eq!(format_axis_value(1000.0), "1.0k");
        assert_eq!(format_axis_value(1_500_000.0), "1.5M");
    }

    #[test]
    fn test_voltage_axis_keeps_two_decimals() {
        assert_eq!(format_axis_value(-9.04), "-9.04");
        assert_eq!(format_axis_value(-1.25), "-1.25");
        assert_eq!(format_axis_value(12.5), "12.5");
        assert_eq!(format_axis_value(999.5), "999.5");
    }

    #[test]
    fn test_whole_numbers_have_no_decimals() {
        assert_eq!(format_axis_value(0.0), "0");
        assert_eq!(format_axis_value(5.0), "5");
        assert_eq!(format_axis_value(-15.0), "-15");
    }

    #[test]
    fn test_small_currents_show_milliamp_resolution() {
        assert_eq!(format_axis_value(0.035), "0.035");
        assert_eq!(format_axis_value(-0.0042), "-0.004");
    }
}
