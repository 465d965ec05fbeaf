use serde::Serialize;
use utoipa::ToSchema;

pub const MIN_COMMISSION_RATE: i32 = 5;
pub const MAX_COMMISSION_RATE: i32 = 50;
pub const DEFAULT_COMMISSION_RATE: i32 = 25;

/// Platform cut and artist share of a sale. `commission + artist_earnings`
/// always equals the sale total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CommissionSplit {
    pub total: i64,
    pub commission: i64,
    pub artist_earnings: i64,
}

impl CommissionSplit {
    /// `commission = round(total * rate / 100)`, halves rounded up.
    pub fn calculate(total: i64, rate: i32) -> Self {
        let scaled = total * i64::from(rate);
        let commission = (scaled + 50).div_euclid(100);
        Self {
            total,
            commission,
            artist_earnings: total - commission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_of_a_thousand() {
        let split = CommissionSplit::calculate(1000, 25);
        assert_eq!(split.commission, 250);
        assert_eq!(split.artist_earnings, 750);
    }

    #[test]
    fn halves_round_up() {
        // 510 * 5 / 100 = 25.5
        assert_eq!(CommissionSplit::calculate(510, 5).commission, 26);
        // 501 * 5 / 100 = 25.05
        assert_eq!(CommissionSplit::calculate(501, 5).commission, 25);
        // 999 * 15 / 100 = 149.85
        assert_eq!(CommissionSplit::calculate(999, 15).commission, 150);
    }

    #[test]
    fn split_always_sums_to_total() {
        for price in (500..=10_000).step_by(7) {
            for rate in MIN_COMMISSION_RATE..=MAX_COMMISSION_RATE {
                let split = CommissionSplit::calculate(price, rate);
                assert_eq!(split.commission + split.artist_earnings, price);

                let exact = price * i64::from(rate);
                let floor = exact / 100;
                let expected = if exact % 100 >= 50 { floor + 1 } else { floor };
                assert_eq!(split.commission, expected, "price={price} rate={rate}");
            }
        }
    }

    #[test]
    fn bounds_of_the_price_range() {
        let low = CommissionSplit::calculate(500, 50);
        assert_eq!((low.commission, low.artist_earnings), (250, 250));
        let high = CommissionSplit::calculate(10_000, 5);
        assert_eq!((high.commission, high.artist_earnings), (500, 9_500));
    }
}
