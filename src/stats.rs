use std::fmt::{self, Display};
use std::path::PathBuf;

/// Aggregate byte statistics of one export run. Sizes are reported in
/// megabytes of 1,000,000 bytes, rounded to 2 decimals; the gain is rounded
/// to 1 decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportStats {
    pub total_old_megabytes: f64,
    pub total_new_megabytes: f64,
    pub difference_megabytes: f64,
    pub gain_percent: f64,
    pub export_dir: PathBuf,
}

impl ExportStats {
    pub fn from_totals(total_old: u64, total_new: u64, export_dir: PathBuf) -> Self {
        let total_old_megabytes = megabytes(total_old);
        let total_new_megabytes = megabytes(total_new);
        Self {
            total_old_megabytes,
            total_new_megabytes,
            difference_megabytes: round2(total_old_megabytes - total_new_megabytes),
            gain_percent: gain_percent(total_old, total_new),
            export_dir,
        }
    }
}

impl Display for ExportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "original size: {:.2} MB", self.total_old_megabytes)?;
        writeln!(f, "new size:      {:.2} MB", self.total_new_megabytes)?;
        writeln!(
            f,
            "saved:         {:.2} MB ({:.1}%)",
            self.difference_megabytes, self.gain_percent
        )?;
        writeln!(f, "export folder: {}", self.export_dir.display())
    }
}

fn megabytes(bytes: u64) -> f64 {
    round2(bytes as f64 / 1_000_000.0)
}

/// `(old - new) / old * 100`, 0 when there is nothing to compare against.
fn gain_percent(total_old: u64, total_new: u64) -> f64 {
    if total_old == 0 {
        return 0.0;
    }
    let gain = (total_old as f64 - total_new as f64) / total_old as f64 * 100.0;
    round1(gain)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn known_gain() {
        let stats = ExportStats::from_totals(1_000_000, 400_000, PathBuf::from("/tmp"));
        assert_eq!(stats.total_old_megabytes, 1.0);
        assert_eq!(stats.total_new_megabytes, 0.4);
        assert_eq!(stats.difference_megabytes, 0.6);
        assert_eq!(stats.gain_percent, 60.0);
    }

    #[test]
    fn zero_old_size_reports_zero_gain() {
        let stats = ExportStats::from_totals(0, 123, PathBuf::from("/tmp"));
        assert_eq!(stats.gain_percent, 0.0);
    }

    #[test]
    fn megabytes_round_to_two_decimals() {
        let stats = ExportStats::from_totals(1_236_000, 400_000, PathBuf::from("/tmp"));
        assert_eq!(stats.total_old_megabytes, 1.24);
        assert_eq!(stats.total_new_megabytes, 0.4);
        assert_eq!(stats.difference_megabytes, 0.84);
        assert_eq!(stats.gain_percent, 67.6);
    }

    #[test]
    fn growth_reports_negative_gain() {
        let stats = ExportStats::from_totals(1_000_000, 1_500_000, PathBuf::from("/tmp"));
        assert_eq!(stats.gain_percent, -50.0);
    }

    #[quickcheck]
    fn gain_is_bounded_when_output_shrinks(total_old: u32, total_new: u32) -> bool {
        let total_old = total_old as u64;
        let total_new = (total_new as u64).min(total_old);
        let stats = ExportStats::from_totals(total_old, total_new, PathBuf::new());
        (0.0..=100.0).contains(&stats.gain_percent)
    }
}
