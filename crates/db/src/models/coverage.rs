use chrono::{NaiveDate, NaiveTime};
use mde_core::types::DbId;
use sqlx::FromRow;

/// A bounding box with an optional time window.
///
/// A point coverage has no `latitude_max` / `longitude_max`.
#[derive(Debug, Clone, FromRow)]
pub struct SpatialTemporalCoverage {
    pub id: DbId,
    pub latitude_min: f64,
    pub latitude_max: Option<f64>,
    pub longitude_min: f64,
    pub longitude_max: Option<f64>,
    pub description: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub time_start: Option<NaiveTime>,
    pub time_end: Option<NaiveTime>,
    pub timezone: Option<String>,
}
