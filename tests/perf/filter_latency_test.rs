use std::time::Instant;

use crate::model::{ResultEntity, ResultKind, TabId};
use crate::search::{compute_visible, count_for};

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

fn corpus() -> Vec<ResultEntity> {
    let kinds = [
        ResultKind::Person,
        ResultKind::Folder,
        ResultKind::File,
        ResultKind::Video,
        ResultKind::Image,
    ];
    let mut items: Vec<ResultEntity> = (0..10_000)
        .map(|i| {
            ResultEntity::new(&i.to_string(), kinds[i % kinds.len()], &format!("Document_{i:05}.txt"))
                .with_subtitle(&format!("in Archive/{:03}", i % 250))
        })
        .collect();
    items.push(
        ResultEntity::new("q4", ResultKind::File, "Q4_Report.xlsx").with_subtitle("in Reports"),
    );
    items
}

#[test]
fn keystroke_recompute_p95_under_25ms() {
    let items = corpus();

    // One keystroke recomputes the visible list plus every tab badge.
    let recompute = |query: &str| {
        let visible = compute_visible(&items, query, TabId::Files).len();
        let badges: usize = TabId::ORDERED
            .iter()
            .map(|&tab| count_for(&items, query, tab))
            .sum();
        visible + badges
    };

    for _ in 0..10 {
        let _ = recompute("report");
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(40);
        for _ in 0..40 {
            let start = Instant::now();
            let _ = recompute("report");
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    let budget_ms = if cfg!(debug_assertions) { 400.0 } else { 25.0 };
    assert!(
        median_p95 <= budget_ms,
        "median batch p95 too high: {median_p95:.3}ms (budget {budget_ms}ms); batches={batch_p95:?}",
    );
    assert_eq!(recompute("q4_report"), 1 + 1 + 1);
}
