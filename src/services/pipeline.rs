use chrono::Utc;
use std::collections::BTreeSet;
use std::time::Instant;

use crate::{
    config::Config,
    data::ItemCatalog,
    error::{AppError, AppResult},
    models::{
        EvaluationReport, InteractionMatrix, LegendEntry, Ranking, Strategy, StrategyCurve,
        StrategyRecommendations,
    },
    services::{
        correlation::kendall_correlation_matrix, evaluation::true_positive_rate_curve,
        scoring::recommend, top_k::top_k_items,
    },
    telemetry::RunId,
};

/// Runs the full evaluation for the configured user
///
/// The steps are:
/// 1. Hide the user's first `holdout` interactions in a copy of the matrix
/// 2. Score both strategies on the copy and take their top-N within the
///    hidden block
/// 3. Sweep k and measure how much of the hidden history each strategy
///    recovers, against the untouched original
/// 4. Score both strategies on the original and take their top `compare_k`
/// 5. Compare those two rankings with the baselines by Kendall tau
///
/// `matrix` itself is never modified.
pub fn run_evaluation(
    run_id: RunId,
    matrix: &InteractionMatrix,
    catalog: &dyn ItemCatalog,
    config: &Config,
) -> AppResult<EvaluationReport> {
    let start = Instant::now();
    let user = config.user_index;

    config.validate()?;
    if config.compare_k > matrix.n_items() {
        return Err(AppError::InvalidArgument(format!(
            "compare_k={} exceeds item count {}",
            config.compare_k,
            matrix.n_items()
        )));
    }

    tracing::info!(
        users = matrix.n_users(),
        items = matrix.n_items(),
        user,
        holdout = config.holdout,
        catalog = catalog.source(),
        "Starting evaluation"
    );

    // 1. Mask the evaluated user's known history
    let masked = matrix.masked_user_history(user, config.holdout)?;

    // 2-3. Point recommendations and TPR curves on the masked copy
    let mut masked_recommendations = Vec::with_capacity(Strategy::ALL.len());
    let mut tpr_curves = Vec::with_capacity(Strategy::ALL.len());

    for strategy in Strategy::ALL {
        let scores = recommend(strategy, &masked)?;

        let items = top_k_items(user, config.top_n, &scores, Some(config.holdout))?;
        masked_recommendations.push(StrategyRecommendations { strategy, items });

        let points = true_positive_rate_curve(
            &scores,
            matrix,
            user,
            config.holdout,
            config.k_min..config.k_max,
        )?;

        tracing::info!(
            strategy = %strategy,
            final_k = points.last().map(|p| p.k),
            final_rate = points.last().map(|p| p.rate),
            "True-positive rate sweep completed"
        );

        tpr_curves.push(StrategyCurve { strategy, points });
    }

    // 4. Top-k on the original matrix
    let mut comparison = Vec::with_capacity(Strategy::ALL.len() + 2);
    for strategy in Strategy::ALL {
        let scores = recommend(strategy, matrix)?;
        let top = top_k_items(user, config.compare_k, &scores, None)?;
        comparison.push(Ranking::from_scored(strategy.to_string(), &top));
    }
    comparison.push(Ranking::new("ItemKNN", config.itemknn_baseline.clone()));
    comparison.push(Ranking::new("WRMF", config.wrmf_baseline.clone()));

    // 5. Rank correlation, labelled the way the table prints them
    let labelled: Vec<Ranking> = comparison
        .iter()
        .map(|r| Ranking::new(r.label.replace('-', "_"), r.items.clone()))
        .collect();
    let kendall = kendall_correlation_matrix(&labelled)?;

    let legend = build_legend(catalog, &masked_recommendations, &comparison);

    tracing::info!(
        processing_time_ms = start.elapsed().as_millis() as u64,
        legend_items = legend.len(),
        "Evaluation completed"
    );

    Ok(EvaluationReport {
        run_id: run_id.0,
        generated_at: Utc::now(),
        user,
        holdout: config.holdout,
        masked_recommendations,
        tpr_curves,
        comparison,
        legend,
        kendall,
    })
}

/// Names every distinct item mentioned in the report, sorted by index
///
/// Covers the masked top-N lists as well as the comparison rankings, since
/// the text report prints names for both.
fn build_legend(
    catalog: &dyn ItemCatalog,
    recommendations: &[StrategyRecommendations],
    comparison: &[Ranking],
) -> Vec<LegendEntry> {
    let items: BTreeSet<usize> = recommendations
        .iter()
        .flat_map(|r| r.items.iter().map(|s| s.item))
        .chain(comparison.iter().flat_map(|r| r.items.iter().copied()))
        .collect();

    items
        .into_iter()
        .map(|item| LegendEntry {
            item,
            name: catalog.name(item),
        })
        .collect()
}
