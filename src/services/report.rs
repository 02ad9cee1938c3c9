use std::fmt;

use crate::models::EvaluationReport;

const COMPARISON_WIDTH: usize = 10;
const KENDALL_WIDTH: usize = 11;

/// Console rendering of an [`EvaluationReport`]
///
/// ```text
/// *** Item-Item Recommendation for User 19 with modified dataset: ***
/// FOX 28 News at 10pm - 31.36
/// ...
/// *** Kendall Rank correlation coefficient ***
///             Item_Item  User_User   ItemKNN     WRMF
/// Item_Item    1.00000    0.15556 ...
/// ```
pub struct TextReport<'a>(pub &'a EvaluationReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write_recommendations(f, report)?;
        write_tpr_curves(f, report)?;
        write_comparison(f, report)?;
        write_legend(f, report)?;
        write_kendall(f, report)
    }
}

fn item_label(report: &EvaluationReport, item: usize) -> String {
    report
        .item_name(item)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", item))
}

fn write_recommendations(f: &mut fmt::Formatter<'_>, report: &EvaluationReport) -> fmt::Result {
    for (idx, recs) in report.masked_recommendations.iter().enumerate() {
        if idx > 0 {
            writeln!(f)?;
        }
        writeln!(
            f,
            "*** {} Recommendation for User {} with modified dataset: ***",
            recs.strategy, report.user
        )?;
        for scored in &recs.items {
            writeln!(f, "{} - {}", item_label(report, scored.item), scored.score)?;
        }
    }
    Ok(())
}

fn write_tpr_curves(f: &mut fmt::Formatter<'_>, report: &EvaluationReport) -> fmt::Result {
    if report.tpr_curves.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(
        f,
        "*** True positive rate vs k for User {} (first {} shows held out) ***",
        report.user, report.holdout
    )?;

    write!(f, "{:^w$}", "k", w = COMPARISON_WIDTH)?;
    for curve in &report.tpr_curves {
        write!(f, "{:^w$}", curve.strategy.to_string(), w = COMPARISON_WIDTH)?;
    }
    writeln!(f)?;

    // Curves share the same k values; the first one drives the rows
    for (row, point) in report.tpr_curves[0].points.iter().enumerate() {
        write!(f, "{:^w$}", point.k, w = COMPARISON_WIDTH)?;
        for curve in &report.tpr_curves {
            match curve.points.get(row) {
                Some(p) => write!(f, "{:^w$.4}", p.rate, w = COMPARISON_WIDTH)?,
                None => write!(f, "{:^w$}", "", w = COMPARISON_WIDTH)?,
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_comparison(f: &mut fmt::Formatter<'_>, report: &EvaluationReport) -> fmt::Result {
    writeln!(f)?;
    writeln!(
        f,
        "*** Recommendation with various methods for user {} with original dataset: ***",
        report.user
    )?;

    for ranking in &report.comparison {
        write!(f, "{:^w$}", ranking.label, w = COMPARISON_WIDTH)?;
    }
    writeln!(f)?;

    let rows = report.comparison.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in 0..rows {
        for ranking in &report.comparison {
            match ranking.items.get(row) {
                Some(item) => write!(f, "{:^w$}", item, w = COMPARISON_WIDTH)?,
                None => write!(f, "{:^w$}", "", w = COMPARISON_WIDTH)?,
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_legend(f: &mut fmt::Formatter<'_>, report: &EvaluationReport) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{:^w$}{}", "ShowID", "ShowName", w = COMPARISON_WIDTH)?;
    for entry in &report.legend {
        writeln!(
            f,
            "{:^w$} - {}",
            entry.item,
            item_label(report, entry.item),
            w = COMPARISON_WIDTH
        )?;
    }
    Ok(())
}

fn write_kendall(f: &mut fmt::Formatter<'_>, report: &EvaluationReport) -> fmt::Result {
    let kendall = &report.kendall;

    writeln!(f)?;
    writeln!(f, "*** Kendall Rank correlation coefficient ***")?;
    write!(f, "{:^w$}", "", w = KENDALL_WIDTH)?;
    for label in &kendall.labels {
        write!(f, "{:^w$}", label, w = KENDALL_WIDTH)?;
    }
    writeln!(f)?;

    for (label, row) in kendall.labels.iter().zip(kendall.values.rows()) {
        write!(f, "{:<w$}", label, w = KENDALL_WIDTH)?;
        for value in row {
            write!(f, "{:^w$.5}", value, w = KENDALL_WIDTH)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CorrelationMatrix, LegendEntry, Ranking, ScoredItem, Strategy, StrategyCurve,
        StrategyRecommendations, TprPoint,
    };
    use chrono::Utc;
    use ndarray::array;
    use uuid::Uuid;

    fn sample_report() -> EvaluationReport {
        EvaluationReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            user: 19,
            holdout: 100,
            masked_recommendations: vec![StrategyRecommendations {
                strategy: Strategy::ItemItem,
                items: vec![
                    ScoredItem { item: 48, score: 31.5 },
                    ScoredItem { item: 7, score: 30.25 },
                ],
            }],
            tpr_curves: vec![
                StrategyCurve {
                    strategy: Strategy::UserUser,
                    points: vec![TprPoint { k: 1, rate: 0.0 }, TprPoint { k: 2, rate: 0.125 }],
                },
                StrategyCurve {
                    strategy: Strategy::ItemItem,
                    points: vec![TprPoint { k: 1, rate: 0.0625 }, TprPoint { k: 2, rate: 0.125 }],
                },
            ],
            comparison: vec![
                Ranking::new("Item-Item", vec![48, 7]),
                Ranking::new("WRMF", vec![7, 48]),
            ],
            legend: vec![
                LegendEntry { item: 7, name: None },
                LegendEntry {
                    item: 48,
                    name: Some("FOX 28 News at 10pm".to_string()),
                },
            ],
            kendall: CorrelationMatrix {
                labels: vec!["Item_Item".to_string(), "WRMF".to_string()],
                values: array![[1.0, -1.0], [-1.0, 1.0]],
            },
        }
    }

    #[test]
    fn test_recommendations_use_names_with_index_fallback() {
        let text = TextReport(&sample_report()).to_string();

        assert!(
            text.contains("*** Item-Item Recommendation for User 19 with modified dataset: ***")
        );
        assert!(text.contains("FOX 28 News at 10pm - 31.5\n"));
        assert!(text.contains("#7 - 30.25\n"));
    }

    #[test]
    fn test_tpr_table_rows() {
        let text = TextReport(&sample_report()).to_string();

        assert!(text.contains("    k     User-User Item-Item \n"));
        assert!(text.contains("    1       0.0000    0.0625  \n"));
        assert!(text.contains("    2       0.1250    0.1250  \n"));
    }

    #[test]
    fn test_comparison_and_legend_layout() {
        let text = TextReport(&sample_report()).to_string();

        assert!(text.contains("Item-Item    WRMF   \n"));
        assert!(text.contains("    48        7     \n"));
        assert!(text.contains("  ShowID  ShowName\n"));
        assert!(text.contains("    48     - FOX 28 News at 10pm\n"));
        assert!(text.contains("    7      - #7\n"));
    }

    #[test]
    fn test_kendall_table_layout() {
        let text = TextReport(&sample_report()).to_string();

        assert!(text.contains("*** Kendall Rank correlation coefficient ***\n"));
        assert!(text.contains("            Item_Item    WRMF    \n"));
        assert!(text.contains("Item_Item    1.00000   -1.00000  \n"));
        assert!(text.contains("WRMF        -1.00000    1.00000  \n"));
    }
}
