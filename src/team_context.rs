//! Prior-season team context, parsed out of the free-text summary block on a
//! team page ("Record: 37-45, ...", "SRS: 5.31 (4th of 30)", ...).
//!
//! A context fetch is always best-effort: a soft-failed or broken page
//! degrades to the all-zero context so the surrounding record still lands.

use log::warn;

use crate::document::Document;
use crate::extract::{round3, win_ratio};
use crate::http_client::{FetchClient, Transport};

#[derive(Debug, Clone, Default)]
pub struct NbaTeamContext {
    pub win_pct: f64,
    pub expected_win_pct: f64,
    pub srs: f64,
    pub pace: f64,
    pub off_rtg: f64,
    pub def_rtg: f64,
    pub pts_per_g: f64,
    pub opp_pts_per_g: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CollegeTeamContext {
    pub win_pct: f64,
    pub srs: f64,
    pub sos: f64,
    pub off_rtg: f64,
    pub def_rtg: f64,
    pub pts_per_g: f64,
    pub opp_pts_per_g: f64,
}

/// Text after "Label:" in the first summary paragraph carrying that label.
pub fn summary_value(doc: &Document, label: &str) -> Option<String> {
    let want = format!("{label}:");
    for p in doc.select_all("p") {
        let text = p.text().collect::<String>();
        let trimmed = text.trim();
        if let Some(rest) = trimmed.strip_prefix(&want) {
            return Some(rest.trim().to_string());
        }
    }
    None
}

/// First number after "Label:", with any "(4th of 30)" rank suffix ignored.
/// Absent labels and labels with no parseable value are 0.0.
pub fn labeled_number(doc: &Document, label: &str) -> f64 {
    let Some(rest) = summary_value(doc, label) else {
        return 0.0;
    };
    let before_rank = rest.split('(').next().unwrap_or(&rest);
    for token in before_rank.split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-');
        if token.is_empty() || token == "-" {
            continue;
        }
        if let Ok(v) = token.parse::<f64>() {
            return v;
        }
    }
    0.0
}

/// Win share of a "W-L" value after "Label:" ("37-45" -> 0.451); 0.0 when
/// the label or a parseable record is absent.
pub fn labeled_win_ratio(doc: &Document, label: &str) -> f64 {
    match summary_value(doc, label) {
        Some(rest) => win_ratio(&rest),
        None => 0.0,
    }
}

pub fn parse_nba_context(doc: &Document) -> NbaTeamContext {
    NbaTeamContext {
        win_pct: round3(labeled_win_ratio(doc, "Record")),
        expected_win_pct: round3(labeled_win_ratio(doc, "Expected W-L")),
        srs: labeled_number(doc, "SRS"),
        pace: labeled_number(doc, "Pace"),
        off_rtg: labeled_number(doc, "Off Rtg"),
        def_rtg: labeled_number(doc, "Def Rtg"),
        pts_per_g: labeled_number(doc, "PTS/G"),
        opp_pts_per_g: labeled_number(doc, "Opp PTS/G"),
    }
}

pub fn parse_college_context(doc: &Document) -> CollegeTeamContext {
    CollegeTeamContext {
        win_pct: round3(labeled_win_ratio(doc, "Record")),
        srs: labeled_number(doc, "SRS"),
        sos: labeled_number(doc, "SOS"),
        off_rtg: labeled_number(doc, "ORtg"),
        def_rtg: labeled_number(doc, "DRtg"),
        pts_per_g: labeled_number(doc, "PTS/G"),
        opp_pts_per_g: labeled_number(doc, "Opp PTS/G"),
    }
}

/// Fetch and parse an NBA team season summary; any failure degrades to the
/// zero context.
pub fn fetch_nba_context<T: Transport>(client: &FetchClient<T>, url: &str) -> NbaTeamContext {
    match client.fetch(url) {
        Ok(Some(doc)) => parse_nba_context(&doc),
        Ok(None) => {
            warn!("nba team context rate-limited at {url}, using defaults");
            NbaTeamContext::default()
        }
        Err(err) => {
            warn!("nba team context fetch failed at {url}: {err:#}, using defaults");
            NbaTeamContext::default()
        }
    }
}

/// Fetch and parse a college season summary; any failure degrades to the
/// zero context.
pub fn fetch_college_context<T: Transport>(
    client: &FetchClient<T>,
    url: &str,
) -> CollegeTeamContext {
    match client.fetch(url) {
        Ok(Some(doc)) => parse_college_context(&doc),
        Ok(None) => {
            warn!("college team context rate-limited at {url}, using defaults");
            CollegeTeamContext::default()
        }
        Err(err) => {
            warn!("college team context fetch failed at {url}: {err:#}, using defaults");
            CollegeTeamContext::default()
        }
    }
}
