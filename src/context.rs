//! Picks the reports relevant to a free-text question and renders them as a data block.
//!
//! Classification is a keyword match on the lowercased question. The first category with a
//! hit wins, checked in the order failure, regional, segment, trends.

use serde::Serialize;

use crate::analysis::{FailureReport, RegionReport, SegmentReport, Summary, TrendReport};
use crate::engine::InsightEngine;

const FAILURE_KEYWORDS: &[&str] = &["fail", "error", "issue", "problem", "peak"];
const REGIONAL_KEYWORDS: &[&str] = &["region", "state", "geography", "bill", "recharge", "weekend"];
const SEGMENT_KEYWORDS: &[&str] = &["age", "device", "segment", "p2m", "fraud", "high-value", "success"];
const TRENDS_KEYWORDS: &[&str] = &["trend", "hour", "time", "day", "volume", "pattern"];

/// Amount threshold used when a segment question mentions it.
pub const HIGH_VALUE_AMOUNT: f64 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Failure,
    Regional,
    Segment,
    Trends,
    General,
}

pub fn classify_intent(question: &str) -> Intent {
    let q = question.to_lowercase();
    let hit = |words: &[&str]| words.iter().any(|w| q.contains(w));

    if hit(FAILURE_KEYWORDS) {
        Intent::Failure
    } else if hit(REGIONAL_KEYWORDS) {
        Intent::Regional
    } else if hit(SEGMENT_KEYWORDS) {
        Intent::Segment
    } else if hit(TRENDS_KEYWORDS) {
        Intent::Trends
    } else {
        Intent::General
    }
}

/// The reports gathered for one question. Absent reports are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightContext {
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_analysis: Option<FailureReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_analysis_overall: Option<FailureReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional_analysis: Option<RegionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_payment_regional: Option<RegionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recharge_regional: Option<RegionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_analysis: Option<SegmentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<TrendReport>,
}

impl InsightContext {
    fn with_summary(summary: Summary) -> Self {
        Self {
            summary,
            failure_analysis: None,
            failure_analysis_overall: None,
            regional_analysis: None,
            bill_payment_regional: None,
            recharge_regional: None,
            segment_analysis: None,
            trends: None,
        }
    }

    /// The text handed to the conversational layer: the pretty-printed reports, then the question.
    pub fn render(&self, question: &str) -> serde_json::Result<String> {
        let data = serde_json::to_string_pretty(self)?;
        Ok(format!(
            "RELEVANT DATA FOR THIS QUERY:\n{data}\n\nUSER QUESTION: {question}"
        ))
    }
}

pub fn build_context(engine: &InsightEngine, question: &str) -> InsightContext {
    let intent = classify_intent(question);
    let q = question.to_lowercase();
    let mut ctx = InsightContext::with_summary(engine.get_summary());

    match intent {
        Intent::Failure => {
            ctx.failure_analysis = Some(engine.get_failure_analysis(q.contains("peak")));
            ctx.failure_analysis_overall = Some(engine.get_failure_analysis(false));
        }
        Intent::Regional => {
            let weekend = q.contains("weekend");
            ctx.regional_analysis = Some(engine.get_regional_analysis(None, weekend));
            if q.contains("bill") {
                ctx.bill_payment_regional =
                    Some(engine.get_regional_analysis(Some("Bill Payment"), weekend));
            }
            if q.contains("recharge") {
                ctx.recharge_regional = Some(engine.get_regional_analysis(Some("Recharge"), weekend));
            }
        }
        Intent::Segment => {
            let min_amount = (question.contains("5000") || question.contains("5,000"))
                .then_some(HIGH_VALUE_AMOUNT);
            ctx.segment_analysis = Some(engine.get_success_rate_by_segment(Some("P2M"), min_amount));
        }
        Intent::Trends => {
            ctx.trends = Some(engine.get_transaction_trends());
        }
        Intent::General => {
            ctx.failure_analysis = Some(engine.get_failure_analysis(false));
            ctx.trends = Some(engine.get_transaction_trends());
            ctx.regional_analysis = Some(engine.get_regional_analysis(None, false));
        }
    }

    tracing::debug!(?intent, "built insight context");
    ctx
}
