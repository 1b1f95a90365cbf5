//! End-to-end runs through the orchestrator.

use std::sync::Arc;

use atomscope_analytics::orchestrator::{OrchestratorStatus, ProgressCallback};
use atomscope_analytics::{
    AnalysisKind, AnalysisOrchestrator, AnalysisProgress, AnalysisRequest, AnalysisResult,
    AnalyticsConfig, AnalyticsError, AtomVector, Dataset, KMeansConfig, MetricKind, OrchestratorState,
    PatternKind, SimilarityConfig,
};
use parking_lot::Mutex;

use crate::common::{blob_dataset, blob_of};

#[tokio::test]
async fn test_full_session_over_one_dataset() {
    let orchestrator = AnalysisOrchestrator::new();
    let dataset = blob_dataset(5, 17);

    let stats = orchestrator
        .run_kind(&dataset, AnalysisKind::Statistics)
        .await
        .unwrap();
    let stats = stats.as_statistics().unwrap();
    assert_eq!(stats.summary.vector_count, 15);
    assert_eq!(stats.summary.dimension, 3);

    let pca = orchestrator.run(&dataset, AnalysisRequest::pca(2)).await.unwrap();
    let pca = pca.as_pca().unwrap();
    assert_eq!(pca.projected_data.len(), 15);

    let clusters = orchestrator
        .run(&dataset, AnalysisRequest::kmeans(3))
        .await
        .unwrap();
    let clusters = clusters.as_kmeans().unwrap();
    for (i, &label) in clusters.assignments.iter().enumerate() {
        assert_eq!(label, blob_of(i));
    }

    let tree = orchestrator
        .run_kind(&dataset, AnalysisKind::Hierarchical)
        .await
        .unwrap();
    assert_eq!(tree.as_hierarchical().unwrap().dendrogram.merge_count(), 14);

    let patterns = orchestrator
        .run_kind(&dataset, AnalysisKind::Patterns)
        .await
        .unwrap();
    let report = patterns.as_patterns().unwrap();
    assert!(report
        .patterns
        .iter()
        .all(|p| (0.0..=1.0).contains(&p.confidence)));

    let status: OrchestratorStatus = orchestrator.status();
    assert_eq!(status.completed_runs, 5);
    assert_eq!(status.history_len, 5);
    assert_eq!(
        orchestrator.latest().unwrap().kind,
        AnalysisKind::Patterns
    );
}

#[tokio::test]
async fn test_similarity_with_probe() {
    let orchestrator = AnalysisOrchestrator::new();
    let dataset = Dataset::new(vec![
        AtomVector::new(0u64, vec![1.0, 0.0]),
        AtomVector::new(1u64, vec![0.0, 1.0]),
        AtomVector::new(2u64, vec![1.0, 0.1]),
    ])
    .with_probe(AtomVector::new("input", vec![1.0, 0.0]));

    let request = AnalysisRequest::Similarity(SimilarityConfig::default().with_metric(MetricKind::Cosine));
    let result = orchestrator.run(&dataset, request).await.unwrap();
    let report = result.as_similarity().unwrap();

    let probe = report.probe_scores.as_ref().unwrap();
    assert_eq!(probe.len(), 3);
    assert!((probe[0] - 1.0).abs() < 1e-12);
    assert!(probe[1].abs() < 1e-12);
    assert_eq!(report.top_pairs[0].first_index, 0);
    assert_eq!(report.top_pairs[0].second_index, 2);
}

#[tokio::test]
async fn test_zero_dimension_reported_end_to_end() {
    let orchestrator = AnalysisOrchestrator::new();
    let dataset = Dataset::from_rows(vec![
        vec![1.0, 0.0, 2.0],
        vec![3.0, 0.0, -1.0],
        vec![-2.0, 0.0, 0.5],
    ]);

    let result = orchestrator
        .run_kind(&dataset, AnalysisKind::Patterns)
        .await
        .unwrap();
    let report = result.as_patterns().unwrap();
    let zero: Vec<_> = report.of_kind(PatternKind::ZeroDimension).collect();
    assert_eq!(zero.len(), 1);
    assert_eq!(zero[0].dimension, Some(1));
}

#[tokio::test]
async fn test_shared_orchestrator_rejects_second_task() {
    let orchestrator = Arc::new(AnalysisOrchestrator::new());
    let dataset = Arc::new(blob_dataset(20, 5));

    let first = {
        let orchestrator = Arc::clone(&orchestrator);
        let dataset = Arc::clone(&dataset);
        async move { orchestrator.run(&dataset, AnalysisRequest::kmeans(3)).await }
    };
    let second = {
        let orchestrator = Arc::clone(&orchestrator);
        let dataset = Arc::clone(&dataset);
        async move {
            tokio::task::yield_now().await;
            orchestrator.run(&dataset, AnalysisRequest::pca(2)).await
        }
    };

    let (first, second) = tokio::join!(first, second);
    assert!(first.is_ok());
    assert!(matches!(
        second,
        Err(AnalyticsError::AnalysisInProgress {
            running: AnalysisKind::KMeans
        })
    ));
    assert!(matches!(
        orchestrator.state(),
        OrchestratorState::Completed {
            kind: AnalysisKind::KMeans,
            ..
        }
    ));
}

#[tokio::test]
async fn test_progress_reaches_completion_for_every_kind() {
    let orchestrator = AnalysisOrchestrator::new();
    let dataset = blob_dataset(4, 2);

    for kind in [
        AnalysisKind::Pca,
        AnalysisKind::KMeans,
        AnalysisKind::Hierarchical,
        AnalysisKind::Statistics,
        AnalysisKind::Patterns,
        AnalysisKind::Similarity,
    ] {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback =
            Arc::new(move |p: AnalysisProgress| sink.lock().push(p.percent));
        let request = AnalysisRequest::from_config(kind, orchestrator.config());

        orchestrator
            .run_with_progress(&dataset, request, callback)
            .await
            .unwrap();

        let seen = seen.lock();
        assert_eq!(seen.last(), Some(&100), "{} did not complete", kind);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[tokio::test]
async fn test_exploration_preset_session() {
    let orchestrator =
        AnalysisOrchestrator::with_config(AnalyticsConfig::exploration_preset()).unwrap();
    let dataset = blob_dataset(6, 8);

    let pca = orchestrator
        .run_kind(&dataset, AnalysisKind::Pca)
        .await
        .unwrap();
    assert_eq!(pca.as_pca().unwrap().components(), 3);

    let request = AnalysisRequest::KMeans(KMeansConfig {
        seed: Some(4),
        ..orchestrator.config().kmeans.clone()
    });
    let result = orchestrator.run(&dataset, request).await.unwrap();
    let kmeans = result.as_kmeans().unwrap();
    assert!(kmeans.clusters.iter().all(|c| c.size > 0));
}

#[tokio::test]
async fn test_result_json_contract() {
    let orchestrator = AnalysisOrchestrator::new();
    let dataset = blob_dataset(3, 1);
    let result = orchestrator
        .run(&dataset, AnalysisRequest::kmeans(3))
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["kind"], "kmeans");
    assert_eq!(json["payload"]["type"], "kmeans");
    assert!(json["payload"]["data"]["silhouetteScore"].is_number());
    assert_eq!(json["parameters"]["type"], "kmeans");
    assert_eq!(json["shape"]["count"], 9);
}

#[tokio::test]
async fn test_results_with_nan_read_back_from_json() {
    let orchestrator = AnalysisOrchestrator::new();
    let dataset = Dataset::from_rows(vec![vec![1.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]])
        .with_probe(AtomVector::new("flat", vec![2.0, 2.0, 2.0]));

    let stats = orchestrator
        .run_kind(&dataset, AnalysisKind::Statistics)
        .await
        .unwrap();
    let back: AnalysisResult = serde_json::from_str(&stats.to_json().unwrap()).unwrap();
    assert_eq!(back.id, stats.id);
    let corr = back
        .as_statistics()
        .unwrap()
        .correlation_matrix
        .as_ref()
        .unwrap();
    assert!(corr[0][0].is_nan());
    assert!(corr[0][1].is_nan());
    assert!((corr[1][1] - 1.0).abs() < 1e-12);

    let request =
        AnalysisRequest::Similarity(SimilarityConfig::default().with_metric(MetricKind::Pearson));
    let similarity = orchestrator.run(&dataset, request).await.unwrap();
    let back: AnalysisResult = serde_json::from_str(&similarity.to_json().unwrap()).unwrap();
    let report = back.as_similarity().unwrap();
    assert!(report.matrix[0][1].is_nan());
    assert!((report.matrix[1][1] - 1.0).abs() < 1e-12);
    assert!(report.probe_scores.as_ref().unwrap().iter().all(|s| s.is_nan()));
}
