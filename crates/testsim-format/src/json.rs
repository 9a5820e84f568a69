use anyhow::Result;
use serde::Serialize;
use testsim_math::{ratio_pct, threshold_pct};
use testsim_types::{
    CheckMatch, ClusterReport, ListEntry, ListReport, SignatureDiff, SimilarityStats, TestRef,
};

use crate::CheckView;

#[derive(Serialize)]
struct ListJson<'a> {
    total_tests: usize,
    threshold: i64,
    potentially_redundant: Vec<RedundantJson<'a>>,
    all_tests: Vec<ListTestJson<'a>>,
}

#[derive(Serialize)]
struct RedundantJson<'a> {
    test: &'a TestRef,
    most_similar: &'a TestRef,
    similarity: f64,
}

#[derive(Serialize)]
struct ListTestJson<'a> {
    #[serde(flatten)]
    test: &'a TestRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    most_similar_to: Option<&'a str>,
}

impl<'a> From<&'a ListEntry> for ListTestJson<'a> {
    fn from(entry: &'a ListEntry) -> Self {
        let best = entry.best_match.as_ref();
        Self {
            test: &entry.test,
            max_similarity: best.map(|b| ratio_pct(b.score)),
            most_similar_to: best.map(|b| b.test.id.as_str()),
        }
    }
}

pub(crate) fn list(report: &ListReport) -> Result<String> {
    if report.total_tests == 0 {
        let empty = serde_json::json!({ "tests": [], "potentially_redundant": [] });
        return Ok(serde_json::to_string_pretty(&empty)?);
    }

    let json = ListJson {
        total_tests: report.total_tests,
        threshold: threshold_pct(report.threshold),
        potentially_redundant: report
            .potentially_redundant
            .iter()
            .filter_map(|entry| {
                let best = entry.best_match.as_ref()?;
                Some(RedundantJson {
                    test: &entry.test,
                    most_similar: &best.test,
                    similarity: ratio_pct(best.score),
                })
            })
            .collect(),
        all_tests: report.entries().map(ListTestJson::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

#[derive(Serialize)]
struct CheckJson<'a> {
    test: &'a TestRef,
    similar_tests: Vec<CheckMatchJson<'a>>,
}

#[derive(Serialize)]
struct CheckMatchJson<'a> {
    test: &'a TestRef,
    similarity: f64,
    only_in_target: &'a [String],
    only_in_similar: &'a [String],
    common_count: usize,
}

impl<'a> From<&'a CheckMatch> for CheckMatchJson<'a> {
    fn from(m: &'a CheckMatch) -> Self {
        Self {
            test: &m.test,
            similarity: ratio_pct(m.score),
            only_in_target: &m.only_in_target,
            only_in_similar: &m.only_in_similar,
            common_count: m.common_count,
        }
    }
}

pub(crate) fn check(view: CheckView<'_>) -> Result<String> {
    let value = match view {
        CheckView::Found(report) => serde_json::to_value(CheckJson {
            test: &report.test,
            similar_tests: report.similar.iter().map(CheckMatchJson::from).collect(),
        })?,
        CheckView::NotFound { test_id, .. } => {
            serde_json::json!({ "error": "Test not found", "test_id": test_id })
        }
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

#[derive(Serialize)]
struct DiffJson<'a> {
    test_a: &'a str,
    test_b: &'a str,
    #[serde(flatten)]
    diff: &'a SignatureDiff,
}

pub(crate) fn diff(test_a: &str, test_b: &str, diff: &SignatureDiff) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DiffJson {
        test_a,
        test_b,
        diff,
    })?)
}

#[derive(Serialize)]
struct ReportJson<'a> {
    summary: Option<&'a SimilarityStats>,
    #[serde(flatten)]
    clusters: &'a ClusterReport,
}

pub(crate) fn report(stats: Option<&SimilarityStats>, report: &ClusterReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ReportJson {
        summary: stats,
        clusters: report,
    })?)
}
