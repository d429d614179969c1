//! Progress and ready-to-assign formatting
//!
//! Bars are drawn with plain ASCII so they survive any terminal and can be
//! asserted on in tests. Each color has its own glyph.

use crate::models::Category;
use crate::services::{AssignState, Progress, ProgressBar, ProgressColor, ReadyToAssign};

const EMPTY: char = '.';

fn solid_glyph(color: ProgressColor) -> char {
    match color {
        ProgressColor::Green => '#',
        ProgressColor::Yellow => '=',
        ProgressColor::Red => '!',
        ProgressColor::Primary => '+',
        ProgressColor::GreenLite => ':',
        ProgressColor::YellowLite => '-',
        ProgressColor::PrimaryLite => '~',
        ProgressColor::Grey | ProgressColor::Unknown => EMPTY,
    }
}

fn lite_glyph(color: ProgressColor) -> char {
    match color {
        ProgressColor::Green | ProgressColor::GreenLite => ':',
        ProgressColor::Yellow | ProgressColor::YellowLite => '-',
        ProgressColor::Primary | ProgressColor::PrimaryLite => '~',
        ProgressColor::Red => '!',
        ProgressColor::Grey | ProgressColor::Unknown => EMPTY,
    }
}

fn cells(bar: &ProgressBar, width: usize) -> usize {
    ((bar.fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width)
}

/// Draw one track: the solid bar over its lite underlay
fn track(solid: &ProgressBar, lite: Option<&ProgressBar>, width: usize) -> String {
    let solid_cells = cells(solid, width);
    let lite_cells = lite.map_or(0, |l| cells(l, width));
    let lite_char = lite.map_or(EMPTY, |l| lite_glyph(l.color));

    (0..width)
        .map(|i| {
            if i < solid_cells {
                solid_glyph(solid.color)
            } else if i < lite_cells {
                lite_char
            } else {
                EMPTY
            }
        })
        .collect()
}

/// Render a progress value as one or two bracketed tracks
///
/// The secondary track is half as wide as the primary one.
pub fn format_bar(progress: &Progress, width: usize) -> String {
    let mut output = format!(
        "[{}]",
        track(&progress.bar1, Some(&progress.bar1_lite), width)
    );

    if let Some(bar2) = &progress.bar2 {
        let secondary_width = (width / 2).max(1);
        output.push_str(&format!(
            "[{}]",
            track(bar2, progress.bar2_lite.as_ref(), secondary_width)
        ));
    }

    output
}

/// A labelled progress line with its hint
pub fn format_progress_line(label: &str, progress: &Progress, width: usize) -> String {
    let hint = progress.hint.to_string();
    let line = format!("{:<24} {}", label, format_bar(progress, width));
    if hint.is_empty() {
        line
    } else {
        format!("{}  {}", line, hint)
    }
}

/// One-line summary of the ready-to-assign state
pub fn format_ready_banner(ready: &ReadyToAssign, categories: &[Category]) -> String {
    match ready.state() {
        AssignState::ToAssign(amount) => {
            format!("Ready to Assign ({}): {}", ready.month, amount)
        }
        AssignState::FullyAssigned => format!("All money assigned for {}", ready.month),
        AssignState::Overspent(overspent) => {
            let name = categories
                .iter()
                .find(|c| c.id == overspent.category_id)
                .map(Category::label)
                .unwrap_or_else(|| overspent.category_id.to_string());
            format!(
                "All money assigned for {}, but {} is overspent by {}",
                ready.month, name, overspent.overspent_by
            )
        }
        AssignState::OverAssigned(amount) => format!(
            "Over-assigned for {}: {} more assigned than available",
            ready.month, amount
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryGroup, CategoryId, Money, YearMonth};
    use crate::services::{progress, OverspentCategory};

    fn m(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_empty_bar() {
        assert_eq!(format_bar(&Progress::empty(), 10), "[..........]");
    }

    #[test]
    fn test_no_target_all_spent_bar() {
        let p = progress(m(0), m(10000), m(0));
        assert_eq!(format_bar(&p, 10), "[::::::::::]");
    }

    #[test]
    fn test_partly_spent_bar() {
        let p = progress(m(0), m(10000), m(5000));
        assert_eq!(format_bar(&p, 10), "[#####:::::]");
    }

    #[test]
    fn test_underfunded_bar() {
        let p = progress(m(40000), m(20000), m(10000));
        assert_eq!(format_bar(&p, 8), "[==--....]");
    }

    #[test]
    fn test_overfunded_has_secondary_track() {
        let p = progress(m(30000), m(40000), m(40000));
        assert_eq!(format_bar(&p, 8), "[########][++++]");
    }

    #[test]
    fn test_progress_line_includes_hint() {
        let p = progress(m(0), m(0), m(-2000));
        let line = format_progress_line("Dining", &p, 4);
        assert!(line.starts_with("Dining"));
        assert!(line.contains("[!!!!]"));
        assert!(line.ends_with("Overspent by $20.00, assign more or remove spending"));

        let untouched = progress(m(0), m(100), m(100));
        assert!(format_progress_line("Gifts", &untouched, 4).ends_with(']'));
    }

    #[test]
    fn test_ready_banner() {
        let month = YearMonth::new(2026, 10).unwrap();
        let group = CategoryGroup::new("Wants");
        let mut dining = crate::models::Category::new("Dining", group.id);
        dining.id = CategoryId::from_u128(1);

        let ready = ReadyToAssign {
            month,
            amount: m(2500),
            overspent_category: None,
        };
        assert_eq!(
            format_ready_banner(&ready, &[]),
            "Ready to Assign (2026-10): $25.00"
        );

        let ready = ReadyToAssign {
            month,
            amount: m(0),
            overspent_category: Some(OverspentCategory {
                category_id: dining.id,
                overspent_by: m(700),
            }),
        };
        assert_eq!(
            format_ready_banner(&ready, &[dining]),
            "All money assigned for 2026-10, but Dining is overspent by $7.00"
        );

        let ready = ReadyToAssign {
            month,
            amount: m(-100),
            overspent_category: None,
        };
        assert!(format_ready_banner(&ready, &[]).starts_with("Over-assigned"));
    }
}
