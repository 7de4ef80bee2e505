//! Chart-ready series: history and forecast merged on one date axis.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ProductForecast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Historical,
    Forecast,
}

/// One x-axis position. Historical points carry their actual as the
/// forecast line too, so the two lines join up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub actual: Option<u32>,
    pub forecast: Option<u32>,
    pub lower: Option<u32>,
    pub upper: Option<u32>,
    pub kind: SeriesKind,
}

/// Merge `forecast.historical` and `forecast.forecast` into one date-ordered
/// series with one point per date.
///
/// If a date appears in both, the historical value wins for `forecast` and the
/// band comes from the forecast point.
pub fn chart_series(forecast: &ProductForecast) -> Vec<ChartPoint> {
    let mut by_date: BTreeMap<NaiveDate, ChartPoint> = BTreeMap::new();

    for h in &forecast.historical {
        by_date.insert(
            h.date,
            ChartPoint {
                date: h.date,
                actual: Some(h.actual_quantity),
                forecast: Some(h.actual_quantity),
                lower: None,
                upper: None,
                kind: SeriesKind::Historical,
            },
        );
    }

    for f in &forecast.forecast {
        by_date
            .entry(f.date)
            .and_modify(|p| {
                p.lower = Some(f.lower_bound);
                p.upper = Some(f.upper_bound);
                p.kind = SeriesKind::Forecast;
            })
            .or_insert(ChartPoint {
                date: f.date,
                actual: None,
                forecast: Some(f.forecast_quantity),
                lower: Some(f.lower_bound),
                upper: Some(f.upper_bound),
                kind: SeriesKind::Forecast,
            });
    }

    by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ForecastPoint, HistoricalPoint, Trend};
    use chrono::Duration;
    use stockcast_core::ProductId;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + Duration::days(n)
    }

    fn forecast_with(historical: Vec<HistoricalPoint>, forecast: Vec<ForecastPoint>) -> ProductForecast {
        ProductForecast {
            product_id: ProductId::new("1").unwrap(),
            product_name: "Chair".to_string(),
            current_stock: 10,
            reorder_point: 5,
            forecasted_demand_total: 0,
            recommended_order_quantity: 0,
            trend: Trend::Stable,
            confidence_percent: 90,
            historical,
            forecast,
        }
    }

    fn fp(n: i64, q: u32) -> ForecastPoint {
        ForecastPoint {
            date: day(n),
            forecast_quantity: q,
            lower_bound: q - 1,
            upper_bound: q + 1,
        }
    }

    #[test]
    fn concatenates_in_date_order() {
        let f = forecast_with(
            vec![HistoricalPoint::new(day(0), 10), HistoricalPoint::new(day(7), 12)],
            vec![fp(10, 13), fp(13, 14)],
        );
        let series = chart_series(&f);

        assert_eq!(series.len(), 4);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(series[1].actual, Some(12));
        assert_eq!(series[1].forecast, Some(12));
        assert_eq!(series[1].kind, SeriesKind::Historical);
        assert_eq!(series[2].actual, None);
        assert_eq!((series[2].lower, series[2].upper), (Some(12), Some(14)));
        assert_eq!(series[3].kind, SeriesKind::Forecast);
    }

    #[test]
    fn overlapping_date_keeps_historical_value_and_forecast_band() {
        let f = forecast_with(vec![HistoricalPoint::new(day(3), 20)], vec![fp(3, 25)]);
        let series = chart_series(&f);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].actual, Some(20));
        assert_eq!(series[0].forecast, Some(20));
        assert_eq!((series[0].lower, series[0].upper), (Some(24), Some(26)));
        assert_eq!(series[0].kind, SeriesKind::Forecast);
    }
}
