//! Pipeline metrics hooks. Kept in their own test binary because the
//! recorder is process-global.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use plagscan::{
    IngestError, MatchError, PipelineError, PipelineMetrics, PlagscanConfig, RawDocument,
    Scanner, set_pipeline_metrics,
};

#[derive(Default)]
struct RecordingMetrics {
    events: Mutex<Vec<String>>,
}

impl PipelineMetrics for RecordingMetrics {
    fn record_ingest(&self, _latency: Duration, result: Result<(), IngestError>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("ingest:{}", result.is_ok()));
    }

    fn record_normalize(&self, _latency: Duration, token_count: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("normalize:{token_count}"));
    }

    fn record_compare(&self, _latency: Duration, result: Result<(), MatchError>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("compare:{}", result.is_ok()));
    }
}

#[test]
fn metrics_recorder_observes_each_stage() {
    let metrics = Arc::new(RecordingMetrics::default());
    set_pipeline_metrics(Some(metrics.clone() as Arc<dyn PipelineMetrics>));

    let scanner = Scanner::new(&PlagscanConfig::default()).expect("scanner");
    scanner
        .compare_documents(
            RawDocument::text("a.txt", "Running foxes jumped over the lazy dogs!"),
            RawDocument::text("b.txt", "Running foxes jumped over the lazy dogs!"),
        )
        .expect("compare");
    let err = scanner
        .compare_documents(
            RawDocument::text("a.txt", "text"),
            RawDocument::text("b.odt", "text"),
        )
        .unwrap_err();
    assert!(matches!(err, PipelineError::Ingest(_)));

    set_pipeline_metrics(None);
    scanner.compare_texts("ignored", "ignored").expect("compare");

    let events = metrics.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "ingest:true",
            "normalize:5",
            "ingest:true",
            "normalize:5",
            "compare:true",
            "ingest:true",
            "normalize:1",
            "ingest:false",
        ]
    );
}
