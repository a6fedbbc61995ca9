//! Average-price chart series
//!
//! The chart endpoint returns one bucket per interval with the average price,
//! traded amount and (sometimes) min/max. Line, volume and candle series are
//! derived from those buckets.

use super::numeric::{deserialize_f64, deserialize_opt_f64};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One bucket from `/chart/average-price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragePrice {
    /// Unix seconds
    pub time: i64,
    #[serde(deserialize_with = "deserialize_f64")]
    pub average_price: f64,
    #[serde(default, deserialize_with = "deserialize_f64")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "deserialize_opt_f64")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A price sample in whichever shape the series carries.
///
/// The variant is fixed when the payload is decoded, so readers never probe
/// the shape at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PricePoint {
    Value(f64),
    Candle(Candle),
    Single(SeriesPoint),
}

impl PricePoint {
    /// Price to display for this sample (candle close for candles)
    pub fn price(&self) -> f64 {
        match self {
            PricePoint::Value(v) => *v,
            PricePoint::Single(p) => p.value,
            PricePoint::Candle(c) => c.close,
        }
    }

    pub fn time(&self) -> Option<i64> {
        match self {
            PricePoint::Value(_) => None,
            PricePoint::Single(p) => Some(p.time),
            PricePoint::Candle(c) => Some(c.time),
        }
    }
}

/// Change between the first and last price of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub absolute: f64,
    pub percent: f64,
}

/// Average price per bucket
pub fn price_series(buckets: &[AveragePrice]) -> Vec<SeriesPoint> {
    buckets
        .iter()
        .map(|b| SeriesPoint {
            time: b.time,
            value: b.average_price,
        })
        .collect()
}

/// Traded amount per bucket
pub fn volume_series(buckets: &[AveragePrice]) -> Vec<SeriesPoint> {
    buckets
        .iter()
        .map(|b| SeriesPoint {
            time: b.time,
            value: b.total_amount,
        })
        .collect()
}

/// Candles chained from consecutive averages.
///
/// open = previous bucket's average (own average for the first), close = own
/// average, high/low = reported max/min or the open/close envelope.
pub fn candles(buckets: &[AveragePrice]) -> Vec<Candle> {
    buckets
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let open = i
                .checked_sub(1)
                .map(|prev| buckets[prev].average_price)
                .unwrap_or(b.average_price);
            let close = b.average_price;

            Candle {
                time: b.time,
                open,
                high: b.max.unwrap_or_else(|| open.max(close)),
                low: b.min.unwrap_or_else(|| open.min(close)),
                close,
            }
        })
        .collect()
}

/// Trailing buckets within `frame` of the newest one. Assumes ascending time.
pub fn window(buckets: &[AveragePrice], frame: TimeFrame) -> &[AveragePrice] {
    let Some(last) = buckets.last() else {
        return buckets;
    };
    let start = last.time.saturating_sub(frame.as_secs() as i64);
    let first = buckets.partition_point(|b| b.time < start);
    &buckets[first..]
}

/// Most recent price in a series
pub fn latest_price(points: &[PricePoint]) -> Option<f64> {
    points.last().map(PricePoint::price)
}

/// First-to-last change; `None` with fewer than two points or a zero start
pub fn price_change(points: &[PricePoint]) -> Option<PriceChange> {
    if points.len() < 2 {
        return None;
    }
    let first = points.first()?.price();
    let last = points.last()?.price();
    if first == 0.0 || !first.is_finite() || !last.is_finite() {
        return None;
    }

    let absolute = last - first;
    Some(PriceChange {
        absolute,
        percent: absolute / first * 100.0,
    })
}

// =============================================================================
// TimeFrame
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeFrame {
    FiveMinutes,
    FifteenMinutes,
    #[default]
    OneHour,
    FourHours,
    OneDay,
    OneWeek,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 6] = [
        TimeFrame::FiveMinutes,
        TimeFrame::FifteenMinutes,
        TimeFrame::OneHour,
        TimeFrame::FourHours,
        TimeFrame::OneDay,
        TimeFrame::OneWeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::FiveMinutes => "5m",
            TimeFrame::FifteenMinutes => "15m",
            TimeFrame::OneHour => "1h",
            TimeFrame::FourHours => "4h",
            TimeFrame::OneDay => "1d",
            TimeFrame::OneWeek => "1w",
        }
    }

    pub fn as_secs(&self) -> u64 {
        match self {
            TimeFrame::FiveMinutes => 300,
            TimeFrame::FifteenMinutes => 900,
            TimeFrame::OneHour => 3_600,
            TimeFrame::FourHours => 14_400,
            TimeFrame::OneDay => 86_400,
            TimeFrame::OneWeek => 604_800,
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeFrame::ALL
            .into_iter()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown time frame: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(time: i64, avg: f64, min: Option<f64>, max: Option<f64>) -> AveragePrice {
        AveragePrice {
            time,
            average_price: avg,
            total_amount: avg * 10.0,
            min,
            max,
        }
    }

    #[test]
    fn test_candles_chain_from_previous_average() {
        let buckets = vec![
            bucket(1, 10.0, None, None),
            bucket(2, 12.0, None, Some(15.0)),
            bucket(3, 11.0, Some(9.0), None),
        ];
        let c = candles(&buckets);

        assert_eq!(c[0], Candle { time: 1, open: 10.0, high: 10.0, low: 10.0, close: 10.0 });
        assert_eq!(c[1], Candle { time: 2, open: 10.0, high: 15.0, low: 10.0, close: 12.0 });
        assert_eq!(c[2], Candle { time: 3, open: 12.0, high: 12.0, low: 9.0, close: 11.0 });
    }

    #[test]
    fn test_series() {
        let buckets = vec![bucket(1, 10.0, None, None), bucket(2, 20.0, None, None)];
        assert_eq!(price_series(&buckets)[1], SeriesPoint { time: 2, value: 20.0 });
        assert_eq!(volume_series(&buckets)[0], SeriesPoint { time: 1, value: 100.0 });
    }

    #[test]
    fn test_price_point_shapes_decoded_once() {
        let raw = r#"[3.5, {"time": 1, "value": 4.0}, {"time": 2, "open": 1, "high": 6, "low": 1, "close": 5.5}]"#;
        let points: Vec<PricePoint> = serde_json::from_str(raw).unwrap();

        assert!(matches!(points[0], PricePoint::Value(_)));
        assert!(matches!(points[1], PricePoint::Single(_)));
        assert!(matches!(points[2], PricePoint::Candle(_)));
        assert_eq!(latest_price(&points), Some(5.5));
        assert_eq!(points[1].time(), Some(1));
    }

    #[test]
    fn test_price_change() {
        let points = vec![PricePoint::Value(10.0), PricePoint::Value(12.5)];
        let change = price_change(&points).unwrap();
        assert_eq!(change.absolute, 2.5);
        assert_eq!(change.percent, 25.0);

        assert!(price_change(&points[..1]).is_none());
        assert!(price_change(&[PricePoint::Value(0.0), PricePoint::Value(1.0)]).is_none());
        assert_eq!(latest_price(&[]), None);
    }

    #[test]
    fn test_bucket_json() {
        let b: AveragePrice = serde_json::from_str(
            r#"{"time": 1700000000, "averagePrice": 12.5, "totalAmount": 4000}"#,
        )
        .unwrap();
        assert_eq!(b.min, None);
        assert_eq!(b.average_price, 12.5);
    }

    #[test]
    fn test_window_keeps_trailing_buckets() {
        let buckets: Vec<AveragePrice> = (0..10)
            .map(|i| bucket(i * 1_800, 10.0 + i as f64, None, None))
            .collect();

        // Newest at 16200; one hour back is 12600
        let last_hour = window(&buckets, TimeFrame::OneHour);
        assert_eq!(last_hour.len(), 3);
        assert_eq!(last_hour[0].time, 12_600);

        assert_eq!(window(&buckets, TimeFrame::OneWeek).len(), 10);
        assert!(window(&[], TimeFrame::FiveMinutes).is_empty());
    }

    #[test]
    fn test_time_frame_parse() {
        assert_eq!("4H".parse::<TimeFrame>().unwrap(), TimeFrame::FourHours);
        assert_eq!(TimeFrame::default().as_secs(), 3_600);
        assert!("2m".parse::<TimeFrame>().is_err());
        assert_eq!(TimeFrame::OneWeek.to_string(), "1w");
    }
}
