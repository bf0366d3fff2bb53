//! Event calendar: which pay revisions fire in a given month, and the month horizon

use crate::error::ProjectionError;
use crate::input::PromotionEvent;
use crate::rules::{DaSchedule, JanuaryRevision};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Pay revisions selected for one calendar month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthRevisions {
    /// Promotion firing this month (first configured match)
    pub promotion: Option<PromotionEvent>,

    /// Annual increment fires (never together with a promotion)
    pub increment: bool,

    /// January DA revision or pay commission reset
    pub january: Option<JanuaryRevision>,
}

impl MonthRevisions {
    pub fn is_empty(&self) -> bool {
        self.promotion.is_none() && !self.increment && self.january.is_none()
    }
}

/// Decides, per month, which revision classes apply
#[derive(Debug, Clone)]
pub struct EventCalendar {
    promotions: Vec<PromotionEvent>,
    increment_month: u32,
    schedule: DaSchedule,
}

impl EventCalendar {
    /// Build a calendar; colliding promotions keep input order and are logged
    pub fn new(promotions: &[PromotionEvent], increment_month: u32, schedule: DaSchedule) -> Self {
        for (i, promo) in promotions.iter().enumerate() {
            if promotions[..i].iter().any(|p| p.matches(promo.year, promo.month)) {
                log::warn!(
                    "promotion #{} collides with an earlier promotion in {}-{:02}; it will be ignored",
                    i + 1,
                    promo.year,
                    promo.month
                );
            }
        }

        Self {
            promotions: promotions.to_vec(),
            increment_month,
            schedule,
        }
    }

    /// Revisions for `(year, month)` in priority order
    pub fn revisions_for(&self, year: i32, month: u32) -> MonthRevisions {
        let promotion = self
            .promotions
            .iter()
            .find(|p| p.matches(year, month))
            .copied();

        let increment = month == self.increment_month && promotion.is_none();

        // Evaluated independently of promotion and increment
        let january = if month == 1 {
            Some(self.schedule.january_revision(year))
        } else {
            None
        };

        MonthRevisions { promotion, increment, january }
    }

    /// Promotions that can never fire within `[start, end]`
    pub fn promotions_outside(&self, start: NaiveDate, end: NaiveDate) -> Vec<PromotionEvent> {
        self.promotions
            .iter()
            .filter(|p| match NaiveDate::from_ymd_opt(p.year, p.month, 1) {
                Some(date) => date < start || date > end,
                None => true,
            })
            .copied()
            .collect()
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Last day of the month containing `date`
pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    first_of_month(date)
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// First-of-month dates from `start`'s month through `end`'s month, inclusive
pub fn month_starts(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, ProjectionError> {
    let last = first_of_month(end);
    let mut current = first_of_month(start);
    let mut months = Vec::new();

    while current <= last {
        months.push(current);
        current = current
            .checked_add_months(Months::new(1))
            .ok_or(ProjectionError::DateOutOfRange(current))?;
    }

    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_promotion_suppresses_increment() {
        let promotions = [PromotionEvent::from_percent(2027, 3, 10.0)];
        let calendar = EventCalendar::new(&promotions, 3, DaSchedule::default());

        let march = calendar.revisions_for(2027, 3);
        assert!(march.promotion.is_some());
        assert!(!march.increment);

        let next_march = calendar.revisions_for(2028, 3);
        assert!(next_march.promotion.is_none());
        assert!(next_march.increment);
    }

    #[test]
    fn test_january_rule_independent_of_promotion() {
        let promotions = [PromotionEvent::from_percent(2030, 1, 20.0)];
        let calendar = EventCalendar::new(&promotions, 1, DaSchedule::default());

        let revisions = calendar.revisions_for(2030, 1);
        assert!(revisions.promotion.is_some());
        assert!(!revisions.increment);
        assert_eq!(revisions.january, Some(JanuaryRevision::PayCommission { year: 2030 }));
    }

    #[test]
    fn test_quiet_month() {
        let calendar = EventCalendar::new(&[], 7, DaSchedule::default());
        assert!(calendar.revisions_for(2031, 5).is_empty());
        assert!(calendar.revisions_for(2031, 7).increment);
    }

    // Collisions are not expected from real configurations; first in input order applies.
    #[test]
    fn test_colliding_promotions_first_wins() {
        let promotions = [
            PromotionEvent::from_percent(2029, 6, 10.0),
            PromotionEvent::from_percent(2029, 6, 25.0),
        ];
        let calendar = EventCalendar::new(&promotions, 7, DaSchedule::default());
        let revisions = calendar.revisions_for(2029, 6);
        assert_eq!(revisions.promotion, Some(promotions[0]));
    }

    #[test]
    fn test_promotions_outside_horizon() {
        let promotions = [
            PromotionEvent::from_percent(2020, 6, 10.0),
            PromotionEvent::from_percent(2029, 6, 10.0),
            PromotionEvent::from_percent(2045, 6, 10.0),
        ];
        let calendar = EventCalendar::new(&promotions, 7, DaSchedule::default());
        let outside = calendar.promotions_outside(date(2026, 10, 1), date(2040, 1, 1));
        assert_eq!(outside.len(), 2);
        assert_eq!(outside[0].year, 2020);
        assert_eq!(outside[1].year, 2045);
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(first_of_month(date(2026, 10, 19)), date(2026, 10, 1));
        assert_eq!(end_of_month(date(2038, 1, 1)), Some(date(2038, 1, 31)));
        assert_eq!(end_of_month(date(2024, 2, 10)), Some(date(2024, 2, 29)));
        assert_eq!(end_of_month(date(2023, 12, 31)), Some(date(2023, 12, 31)));
    }

    #[test]
    fn test_month_starts_inclusive() {
        let months = month_starts(date(2026, 10, 19), date(2027, 2, 3)).unwrap();
        assert_eq!(
            months,
            vec![
                date(2026, 10, 1),
                date(2026, 11, 1),
                date(2026, 12, 1),
                date(2027, 1, 1),
                date(2027, 2, 1),
            ]
        );
        assert_eq!(month_starts(date(2026, 10, 19), date(2026, 10, 20)).unwrap().len(), 1);
    }
}
