//! Split fee arithmetic.

/// Converts the platform's fixed absolute fee into the percentage the processor's split field expects, rounded to two
/// decimal places.
///
/// The processor's `marketplace_fee` is percentage-based, so the percentage must be recomputed from each request's own
/// total. A fixed percentage would silently drift with price.
pub fn marketplace_fee_percentage(fixed_fee: f64, total_amount: f64) -> f64 {
    let pct = (fixed_fee / total_amount) * 100.0;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod test {
    use super::marketplace_fee_percentage;

    #[test]
    fn fee_is_recomputed_from_the_request_total() {
        assert_eq!(marketplace_fee_percentage(0.01, 2.0), 0.5);
        assert_eq!(marketplace_fee_percentage(0.01, 1.0), 1.0);
        assert_eq!(marketplace_fee_percentage(0.01, 100.0), 0.01);
        assert_eq!(marketplace_fee_percentage(1.0, 3.0), 33.33);
    }

    #[test]
    fn fee_equal_to_total_is_one_hundred_percent() {
        assert_eq!(marketplace_fee_percentage(5.0, 5.0), 100.0);
    }
}
