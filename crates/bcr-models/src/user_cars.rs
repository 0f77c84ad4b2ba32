//! Rental associations between users and cars.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CarId, UserCarId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCar {
    pub id: UserCarId,
    pub user_id: UserId,
    pub car_id: CarId,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserCar {
    /// Whether `[from, until)` intersects this rental.
    pub fn overlaps(&self, from: DateTime<Utc>, until: DateTime<Utc>) -> bool {
        self.rent_started_at < until && self.rent_ended_at > from
    }

    /// Whether the car is out on this rental at `at`.
    pub fn covers(&self, at: DateTime<Utc>) -> bool {
        self.rent_started_at <= at && self.rent_ended_at >= at
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentCarDto {
    pub rent_started_at: DateTime<Utc>,
    /// Defaults to one day after `rentStartedAt`
    pub rent_ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewUserCar {
    pub user_id: UserId,
    pub car_id: CarId,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn rental(start_day: u32, end_day: u32) -> UserCar {
        let now = Utc::now();
        UserCar {
            id: UserCarId::new(1),
            user_id: UserId::new(1),
            car_id: CarId::new(1),
            rent_started_at: Utc.with_ymd_and_hms(2024, 1, start_day, 0, 0, 0).unwrap(),
            rent_ended_at: Utc.with_ymd_and_hms(2024, 1, end_day, 0, 0, 0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_overlaps() {
        let r = rental(10, 12);
        let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();

        assert!(r.overlaps(day(11), day(13)));
        assert!(r.overlaps(day(9), day(11)));
        assert!(r.overlaps(day(10), day(12)));
        assert!(!r.overlaps(day(12), day(14)));
        assert!(!r.overlaps(day(8), day(10)));
    }

    #[test]
    fn test_covers() {
        let r = rental(10, 12);
        let start = r.rent_started_at;
        assert!(r.covers(start));
        assert!(r.covers(start + Duration::days(1)));
        assert!(!r.covers(start - Duration::seconds(1)));
    }

    #[test]
    fn test_rent_dto_end_is_optional() {
        let dto: RentCarDto =
            serde_json::from_str(r#"{"rentStartedAt":"2024-01-10T00:00:00Z"}"#).unwrap();
        assert!(dto.rent_ended_at.is_none());
    }
}
