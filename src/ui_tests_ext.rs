use super::{format_currency, status_color_code, utilization_percent, Palette};
use crate::metrics::TalukRollup;

#[test]
fn currency_uses_indian_grouping() {
    assert_eq!(format_currency("₹", 500_000.0), "₹5,00,000");
    assert_eq!(format_currency("₹", 110_000.0), "₹1,10,000");
    assert_eq!(format_currency("₹", 12_345_678.0), "₹1,23,45,678");
    assert_eq!(format_currency("₹", 350.0), "₹350");
    assert_eq!(format_currency("₹", 0.0), "₹0");
}

#[test]
fn currency_keeps_significant_fractions() {
    assert_eq!(format_currency("Rs ", 1234.5), "Rs 1,234.5");
    assert_eq!(format_currency("₹", 99.99), "₹99.99");
    assert_eq!(format_currency("₹", -2500.0), "-₹2,500");
}

#[test]
fn status_colors_follow_lifecycle() {
    assert_eq!(status_color_code("pending-approval"), "33");
    assert_eq!(status_color_code("in-progress"), "36");
    assert_eq!(status_color_code("completed"), "32");
    assert_eq!(status_color_code("on-hold"), "37");
}

#[test]
fn disabled_palette_leaves_text_plain() {
    let palette = Palette { enabled: false };
    assert_eq!(palette.status("completed", "Completed"), "[Completed]");
    let palette = Palette { enabled: true };
    assert_eq!(palette.dim("x"), "\x1b[2mx\x1b[0m");
}

#[test]
fn utilization_percent_handles_zero_allocation() {
    let mut group = TalukRollup {
        taluk: "North Taluk".to_string(),
        projects: 1,
        allocated: 0.0,
        utilized: 0.0,
        total_progress: 0,
        average_progress: 0,
        completed: 0,
        in_progress: 0,
    };
    assert_eq!(utilization_percent(&group), 0);
    group.allocated = 500_000.0;
    group.utilized = 110_000.0;
    assert_eq!(utilization_percent(&group), 22);
}
