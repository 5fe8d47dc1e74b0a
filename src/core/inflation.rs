//! Inflation normalization using annual CPI averages.
//!
//! Index values are normalized to 2024 = 100; 2025 and 2026 are projections.
//! Years outside the table are never extrapolated: amounts pass through
//! unchanged.

/// Default target year for normalized budgets
pub const DEFAULT_TARGET_YEAR: i32 = 2024;

/// First year covered by [`CPI_INDEX`]
pub const FIRST_CPI_YEAR: i32 = 1980;

/// Annual CPI index, one entry per year starting at [`FIRST_CPI_YEAR`]
pub const CPI_INDEX: [f64; 47] = [
    26.0, 28.7, 30.5, 31.5, 32.8, // 1980-1984
    34.0, 34.6, 35.9, 37.4, 39.2, // 1985-1989
    41.3, 43.0, 44.3, 45.6, 46.8, // 1990-1994
    48.1, 49.5, 50.7, 51.5, 52.6, // 1995-1999
    54.4, 56.0, 56.9, 58.2, 59.7, // 2000-2004
    61.7, 63.7, 65.5, 68.1, 67.8, // 2005-2009
    68.9, 71.1, 72.6, 73.6, 74.8, // 2010-2014
    74.9, 75.8, 77.5, 79.4, 80.8, // 2015-2019
    81.8, 85.7, 92.6, 96.5, 100.0, // 2020-2024
    102.5, 105.0, // 2025-2026 (projected)
];

/// Index value for a year, if the table covers it
pub fn cpi_index(year: i32) -> Option<f64>
{
    let offset = year.checked_sub(FIRST_CPI_YEAR)?;
    usize::try_from(offset)
        .ok()
        .and_then(|i| {
            CPI_INDEX
                .get(i)
                .copied()
        })
}

/// Last year covered by the table
pub fn last_cpi_year() -> i32
{
    FIRST_CPI_YEAR + CPI_INDEX.len() as i32 - 1
}

/// Multiplier converting `from_year` dollars into `to_year` dollars (1.0 on a miss)
pub fn inflation_multiplier(
    from_year: i32,
    to_year: i32,
) -> f64
{
    match (cpi_index(from_year), cpi_index(to_year))
    {
        (Some(from), Some(to)) => to / from,
        _ => 1.0,
    }
}

/// Convert `amount` from `from_year` dollars to `to_year` dollars.
///
/// Returns `amount` untouched when either year is missing from the table or
/// the amount is not positive.
pub fn adjust(
    amount: i64,
    from_year: i32,
    to_year: i32,
) -> i64
{
    if amount <= 0
    {
        return amount;
    }

    match (cpi_index(from_year), cpi_index(to_year))
    {
        (Some(from), Some(to)) => (amount as f64 * to / from).round() as i64,
        _ => amount,
    }
}

/// Compact currency rendering: `$1.2B`, `$30M`, `$500K`, `$950`
pub fn format_currency(amount: i64) -> String
{
    if amount <= 0
    {
        return "N/A".to_string();
    }

    let value = amount as f64;
    if amount >= 1_000_000_000
    {
        format!("${:.1}B", value / 1_000_000_000.0)
    }
    else if amount >= 1_000_000
    {
        format!("${:.0}M", value / 1_000_000.0)
    }
    else if amount >= 1_000
    {
        format!("${:.0}K", value / 1_000.0)
    }
    else
    {
        format!("${amount}")
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_table_bounds()
    {
        assert_eq!(cpi_index(1980), Some(26.0));
        assert_eq!(cpi_index(2024), Some(100.0));
        assert_eq!(cpi_index(2026), Some(105.0));
        assert_eq!(cpi_index(1979), None);
        assert_eq!(cpi_index(2027), None);
        assert_eq!(last_cpi_year(), 2026);
    }

    #[test]
    fn test_adjust_rounds_to_target_year_dollars()
    {
        // 2014 -> 2024: 100 / 74.8
        assert_eq!(adjust(10_000_000, 2014, 2024), 13_368_984);
        assert_eq!(adjust(10_000_000, 2024, 2024), 10_000_000);
        assert_eq!(adjust(1_000, 2024, 2014), 748);
    }

    #[test]
    fn test_adjust_passes_through_misses()
    {
        assert_eq!(adjust(5_000_000, 1975, 2024), 5_000_000);
        assert_eq!(adjust(5_000_000, 2020, 2030), 5_000_000);
        assert_eq!(adjust(0, 2010, 2024), 0);
        assert_eq!(inflation_multiplier(1950, 2024), 1.0);
    }

    #[test]
    fn test_multiplier()
    {
        let m = inflation_multiplier(2020, 2024);
        assert!((m - 100.0 / 81.8).abs() < 1e-12);
    }

    #[test]
    fn test_format_currency()
    {
        assert_eq!(format_currency(0), "N/A");
        assert_eq!(format_currency(950), "$950");
        assert_eq!(format_currency(500_000), "$500K");
        assert_eq!(format_currency(30_000_000), "$30M");
        assert_eq!(format_currency(1_200_000_000), "$1.2B");
    }
}
