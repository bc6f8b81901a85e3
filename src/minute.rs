use serde::Serialize;

use crate::dataset::Column;

pub const BIN_EDGES: [u32; 9] = [0, 15, 30, 45, 60, 75, 90, 105, 120];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MinuteBin {
    From0To15,
    From15To30,
    From30To45,
    From45To60,
    From60To75,
    From75To90,
    From90To105,
    From105To120,
}

impl MinuteBin {
    pub const ALL: [MinuteBin; 8] = [
        MinuteBin::From0To15,
        MinuteBin::From15To30,
        MinuteBin::From30To45,
        MinuteBin::From45To60,
        MinuteBin::From60To75,
        MinuteBin::From75To90,
        MinuteBin::From90To105,
        MinuteBin::From105To120,
    ];

    pub fn for_minute(minute: u32) -> Option<Self> {
        BIN_EDGES
            .windows(2)
            .position(|w| minute >= w[0] && minute < w[1])
            .map(|idx| Self::ALL[idx])
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn bounds(self) -> (u32, u32) {
        let idx = self.index();
        (BIN_EDGES[idx], BIN_EDGES[idx + 1])
    }

    pub fn label(self) -> &'static str {
        match self {
            MinuteBin::From0To15 => "0-15",
            MinuteBin::From15To30 => "15-30",
            MinuteBin::From30To45 => "30-45",
            MinuteBin::From45To60 => "45-60",
            MinuteBin::From60To75 => "60-75",
            MinuteBin::From75To90 => "75-90",
            MinuteBin::From90To105 => "90-105",
            MinuteBin::From105To120 => "105-120",
        }
    }
}

/// First run of ASCII digits in `raw`, or 0 when there is none.
/// "90+2" is 90, "45'" is 45. Runs too long for `u32` saturate.
pub fn parse_minute(raw: &str) -> u32 {
    let Some(start) = raw.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    raw[start..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

pub fn derive_minutes(column: &Column) -> Vec<u32> {
    column
        .values()
        .map(|cell| cell.map(parse_minute).unwrap_or(0))
        .collect()
}

pub fn derive_bins(minutes: &[u32]) -> Vec<Option<MinuteBin>> {
    minutes.iter().map(|m| MinuteBin::for_minute(*m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_match_edges() {
        assert_eq!(MinuteBin::From0To15.bounds(), (0, 15));
        assert_eq!(MinuteBin::From105To120.bounds(), (105, 120));
    }

    #[test]
    fn digits_after_text_are_found() {
        assert_eq!(parse_minute("min 7"), 7);
        assert_eq!(parse_minute("+"), 0);
    }
}
