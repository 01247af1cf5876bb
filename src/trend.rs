//! Week-over-week trend and statistical anomaly detection.
//!
//! Operates on an already time-ordered series of one member's weekly wait
//! loads (ascending by week — ordering is the caller's precondition, never
//! verified here).

use serde::{Deserialize, Serialize};

use crate::model::WeekSnapshot;
use crate::summary::member_summary;

/// Anomaly threshold in standard deviations. Fixed by design; not a knob.
const ANOMALY_SIGMA: f64 = 1.5;

/// Minimum series length before anomaly detection says anything at all.
const ANOMALY_MIN_WEEKS: usize = 3;

/// One week of a member's wait-graph load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyLoad {
    pub week_label: String,
    /// People waiting on the member that week.
    pub inbound: usize,
    /// People the member was waiting on.
    pub outbound: usize,
}

impl WeeklyLoad {
    pub fn new(week_label: impl Into<String>, inbound: usize, outbound: usize) -> Self {
        Self {
            week_label: week_label.into(),
            inbound,
            outbound,
        }
    }
}

/// Last week minus the week before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub inbound_diff: i64,
    pub outbound_diff: i64,
}

/// A week whose inbound load statistically exceeded the rest of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyWeek {
    pub week_label: String,
    pub inbound: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// `None` below two weeks of data.
    pub trend: Option<TrendDelta>,
    pub anomalies: Vec<AnomalyWeek>,
}

/// Week-over-week delta plus statistical outliers.
///
/// A week is anomalous when its inbound load exceeds `mean + 1.5σ`
/// (population standard deviation) of the remaining weeks' inbound loads.
/// Holding the week under test out of its own baseline keeps a single
/// spike from masking itself. Detection needs at least three weeks.
///
/// A perfectly flat series has σ = 0 and can never flag anything: no week
/// exceeds `mean + 0`. That is intended behavior, not a degenerate case to
/// patch around.
pub fn detect_bottleneck_trend(series: &[WeeklyLoad]) -> TrendReport {
    let trend = match series {
        [.., prev, last] => Some(TrendDelta {
            inbound_diff: last.inbound as i64 - prev.inbound as i64,
            outbound_diff: last.outbound as i64 - prev.outbound as i64,
        }),
        _ => None,
    };

    let mut anomalies = Vec::new();
    if series.len() >= ANOMALY_MIN_WEEKS {
        for (i, week) in series.iter().enumerate() {
            let rest = series
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, w)| w.inbound as f64);
            let (mean, stddev) = mean_stddev(rest);
            if week.inbound as f64 > mean + ANOMALY_SIGMA * stddev {
                anomalies.push(AnomalyWeek {
                    week_label: week.week_label.clone(),
                    inbound: week.inbound,
                });
            }
        }
    }

    TrendReport { trend, anomalies }
}

/// Assemble one member's trend series from already time-ordered snapshots.
///
/// Each point is the member's wait counts for that week, labeled with the
/// snapshot's week label. Feed the result straight into
/// [`detect_bottleneck_trend`].
pub fn weekly_loads(snapshots: &[WeekSnapshot], member_name: &str) -> Vec<WeeklyLoad> {
    snapshots
        .iter()
        .map(|snapshot| {
            let summary = member_summary(&snapshot.items, member_name);
            WeeklyLoad {
                week_label: snapshot.week_label.clone(),
                inbound: summary.pre_inbound,
                outbound: summary.pre_count,
            }
        })
        .collect()
}

/// Population mean and standard deviation. (0, 0) for an empty iterator —
/// callers gate on series length before this matters.
fn mean_stddev(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn series(inbounds: &[usize]) -> Vec<WeeklyLoad> {
        inbounds
            .iter()
            .enumerate()
            .map(|(i, &inbound)| WeeklyLoad::new(format!("2026-W{:02}", i + 1), inbound, 0))
            .collect()
    }

    #[test]
    fn test_trend_is_last_minus_second_to_last() {
        let report = detect_bottleneck_trend(&[
            WeeklyLoad::new("2026-W01", 4, 1),
            WeeklyLoad::new("2026-W02", 1, 3),
        ]);
        assert_eq!(
            report.trend,
            Some(TrendDelta {
                inbound_diff: -3,
                outbound_diff: 2,
            })
        );
    }

    #[test]
    fn test_single_week_has_no_trend() {
        let report = detect_bottleneck_trend(&series(&[5]));
        assert_eq!(report.trend, None);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_flat_series_flags_nothing() {
        // σ = 0, nothing can exceed mean + 0.
        let report = detect_bottleneck_trend(&series(&[2, 2, 2]));
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_spike_is_flagged() {
        let report = detect_bottleneck_trend(&series(&[1, 1, 10]));
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].week_label, "2026-W03");
        assert_eq!(report.anomalies[0].inbound, 10);
    }

    #[test]
    fn test_early_spike_is_flagged_too() {
        let report = detect_bottleneck_trend(&series(&[10, 1, 1]));
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].week_label, "2026-W01");
    }

    #[test]
    fn test_mild_variation_is_not_anomalous() {
        let report = detect_bottleneck_trend(&series(&[3, 4, 3, 4]));
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_two_weeks_is_below_anomaly_minimum() {
        let report = detect_bottleneck_trend(&series(&[1, 10]));
        assert!(report.anomalies.is_empty());
        assert!(report.trend.is_some());
    }

    #[test]
    fn test_weekly_loads_from_snapshots() {
        use crate::model::{Collaborator, Relation, WorkItem};
        use chrono::NaiveDate;

        let snapshots = vec![
            WeekSnapshot::new(
                "2026-W33",
                vec![
                    WorkItem::new("Ada", "BE")
                        .with_collaborator(Collaborator::new("Bea", Relation::Pre)),
                    WorkItem::new("Bea", "FE"),
                ],
            )
            .with_week_of(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()),
            WeekSnapshot::new(
                "2026-W34",
                vec![WorkItem::new("Ada", "BE"), WorkItem::new("Bea", "FE")],
            )
            .with_week_of(NaiveDate::from_ymd_opt(2026, 8, 17).unwrap()),
        ];

        let series = weekly_loads(&snapshots, "Bea");
        assert_eq!(
            series,
            vec![
                WeeklyLoad::new("2026-W33", 1, 0),
                WeeklyLoad::new("2026-W34", 0, 0),
            ]
        );

        let report = detect_bottleneck_trend(&series);
        assert_eq!(report.trend.unwrap().inbound_diff, -1);
    }

    #[test]
    fn test_empty_series() {
        let report = detect_bottleneck_trend(&[]);
        assert_eq!(report, TrendReport::default());
    }
}
