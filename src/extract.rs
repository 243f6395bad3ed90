//! Field extraction: fixed per-table stat mappings and the free-text
//! patterns (height/weight, position line, won-loss records) the source
//! pages bury in prose.
//!
//! Every extractor is total over absent markup: a missing cell, label or
//! pattern resolves to its neutral default. Malformed numeric text is the
//! one thing allowed to fail, so corrupt pages don't silently become zeros.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Document, TableRow};
use crate::record::{AdvancedStats, Per40Stats, Per100Stats, PerGameStats};

static HEIGHT_WEIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d{3})cm,\s*(\d{2,3})kg\)").expect("height/weight pattern is valid")
});

static WON_LOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)-(\d+)").expect("won-loss pattern is valid"));

/// Basic per-game stats from the final season row. The games-started share
/// is derived here with its zero-games guard.
pub fn per_game_stats(row: &TableRow<'_>) -> Result<PerGameStats> {
    let games = row.stat("games")?;
    let started = row.stat("games_started")?;
    Ok(PerGameStats {
        games,
        games_started_pct: games_started_pct(started, games),
        minutes: row.stat("mp_per_g")?,
        fg: row.stat("fg_per_g")?,
        fga: row.stat("fga_per_g")?,
        fg_pct: row.stat("fg_pct")?,
        fg3: row.stat("fg3_per_g")?,
        fg3a: row.stat("fg3a_per_g")?,
        fg3_pct: row.stat("fg3_pct")?,
        ft: row.stat("ft_per_g")?,
        fta: row.stat("fta_per_g")?,
        ft_pct: row.stat("ft_pct")?,
        orb: row.stat("orb_per_g")?,
        drb: row.stat("drb_per_g")?,
        trb: row.stat("trb_per_g")?,
        ast: row.stat("ast_per_g")?,
        stl: row.stat("stl_per_g")?,
        blk: row.stat("blk_per_g")?,
        tov: row.stat("tov_per_g")?,
        pf: row.stat("pf_per_g")?,
        pts: row.stat("pts_per_g")?,
    })
}

pub fn advanced_stats(row: &TableRow<'_>) -> Result<AdvancedStats> {
    Ok(AdvancedStats {
        per: row.stat("per")?,
        ts_pct: row.stat("ts_pct")?,
        fg3a_rate: row.stat("fg3a_per_fga_pct")?,
        fta_rate: row.stat("fta_per_fga_pct")?,
        pprod: row.stat("pprod")?,
        orb_pct: row.stat("orb_pct")?,
        drb_pct: row.stat("drb_pct")?,
        trb_pct: row.stat("trb_pct")?,
        ast_pct: row.stat("ast_pct")?,
        stl_pct: row.stat("stl_pct")?,
        blk_pct: row.stat("blk_pct")?,
        tov_pct: row.stat("tov_pct")?,
        usg_pct: row.stat("usg_pct")?,
        ows: row.stat("ows")?,
        dws: row.stat("dws")?,
        ws: row.stat("ws")?,
        ws_per_40: row.stat("ws_per_40")?,
        obpm: row.stat("obpm")?,
        dbpm: row.stat("dbpm")?,
        bpm: row.stat("bpm")?,
    })
}

pub fn per40_stats(row: &TableRow<'_>) -> Result<Per40Stats> {
    Ok(Per40Stats {
        fg: row.stat("fg_per_min")?,
        fga: row.stat("fga_per_min")?,
        fg3: row.stat("fg3_per_min")?,
        fg3a: row.stat("fg3a_per_min")?,
        ft: row.stat("ft_per_min")?,
        fta: row.stat("fta_per_min")?,
        orb: row.stat("orb_per_min")?,
        drb: row.stat("drb_per_min")?,
        trb: row.stat("trb_per_min")?,
        ast: row.stat("ast_per_min")?,
        stl: row.stat("stl_per_min")?,
        blk: row.stat("blk_per_min")?,
        tov: row.stat("tov_per_min")?,
        pf: row.stat("pf_per_min")?,
        pts: row.stat("pts_per_min")?,
    })
}

pub fn per100_stats(row: &TableRow<'_>) -> Result<Per100Stats> {
    Ok(Per100Stats {
        fg: row.stat("fg_per_poss")?,
        fga: row.stat("fga_per_poss")?,
        fg3: row.stat("fg3_per_poss")?,
        fg3a: row.stat("fg3a_per_poss")?,
        ft: row.stat("ft_per_poss")?,
        fta: row.stat("fta_per_poss")?,
        orb: row.stat("orb_per_poss")?,
        drb: row.stat("drb_per_poss")?,
        trb: row.stat("trb_per_poss")?,
        ast: row.stat("ast_per_poss")?,
        stl: row.stat("stl_per_poss")?,
        blk: row.stat("blk_per_poss")?,
        tov: row.stat("tov_per_poss")?,
        pf: row.stat("pf_per_poss")?,
        pts: row.stat("pts_per_poss")?,
        off_rtg: row.stat("off_rtg")?,
        def_rtg: row.stat("def_rtg")?,
    })
}

/// Share of games started, as a percentage rounded to 2 decimals. Zero games
/// played yields 0.0, never a division error.
pub fn games_started_pct(started: f64, games: f64) -> f64 {
    if games > 0.0 {
        round2(started / games * 100.0)
    } else {
        0.0
    }
}

/// Height (cm) and weight (kg) from the "(###cm, ##kg)" pattern anywhere in
/// the page text. (0.0, 0.0) when the pattern is absent.
pub fn height_weight(doc: &Document) -> (f64, f64) {
    let text = doc.text();
    let Some(caps) = HEIGHT_WEIGHT_RE.captures(&text) else {
        return (0.0, 0.0);
    };
    let height = caps[1].parse::<f64>().unwrap_or(0.0);
    let weight = caps[2].parse::<f64>().unwrap_or(0.0);
    (height, weight)
}

/// The external college-stats link on a player profile, query string
/// stripped. Its absence is the documented signal to skip the player.
pub fn college_stats_link(doc: &Document) -> Option<String> {
    for anchor in doc.select_all("a") {
        let text = anchor.text().collect::<String>();
        if text.contains("More College Stats") {
            let href = anchor.value().attr("href")?;
            let base = href.split('?').next().unwrap_or(href);
            return Some(base.to_string());
        }
    }
    None
}

/// Number of league relatives listed on a profile: the count of anchors in
/// the paragraph holding the "Relatives" label.
pub fn relatives_count(doc: &Document) -> u32 {
    for strong in doc.select_all("strong") {
        let text = strong.text().collect::<String>();
        if !text.contains("Relatives") {
            continue;
        }
        let mut node = strong.parent();
        while let Some(parent) = node {
            if let Some(el) = scraper::ElementRef::wrap(parent) {
                if el.value().name() == "p" {
                    let Ok(sel) = scraper::Selector::parse("a") else {
                        return 0;
                    };
                    return el.select(&sel).count() as u32;
                }
            }
            node = parent.parent();
        }
        return 0;
    }
    0
}

/// The "Position:" line from the profile meta block, normalized to
/// comma-joined abbreviations ("Shooting Guard and Power Forward" -> "SG,PF").
pub fn position_line(doc: &Document) -> String {
    for p in doc.select_all("div#meta p") {
        let text = p.text().collect::<String>();
        let Some((_, after)) = text.split_once("Position:") else {
            continue;
        };
        let raw = after.split('▪').next().unwrap_or(after).trim();
        return normalize_positions(raw);
    }
    String::new()
}

const POSITION_NAMES: &[(&str, &str)] = &[
    ("Point Guard", "PG"),
    ("Shooting Guard", "SG"),
    ("Small Forward", "SF"),
    ("Power Forward", "PF"),
    ("Center", "C"),
];

pub fn normalize_positions(raw: &str) -> String {
    let tmp = raw.replace(" and ", "|").replace(" / ", "|").replace('-', "|");
    let mut out: Vec<&str> = Vec::new();
    for token in tmp.split('|') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let code = POSITION_NAMES
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, code)| *code)
            .or_else(|| {
                POSITION_NAMES
                    .iter()
                    .map(|(_, code)| *code)
                    .find(|code| code.eq_ignore_ascii_case(token))
            });
        if let Some(code) = code {
            if !out.contains(&code) {
                out.push(code);
            }
        }
    }
    out.join(",")
}

/// Win share of a "W-L" fragment ("37-45" -> 0.451, rounded to 3 decimals).
/// Anything without two integers, including "0-0", is 0.0.
pub fn win_ratio(text: &str) -> f64 {
    let Some(caps) = WON_LOST_RE.captures(text) else {
        return 0.0;
    };
    let won = caps[1].parse::<f64>().unwrap_or(0.0);
    let lost = caps[2].parse::<f64>().unwrap_or(0.0);
    if won + lost > 0.0 {
        round3(won / (won + lost))
    } else {
        0.0
    }
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn games_started_share_guards_zero_games() {
        assert_eq!(games_started_pct(20.0, 0.0), 0.0);
        assert_eq!(games_started_pct(0.0, 0.0), 0.0);
        assert_eq!(games_started_pct(18.0, 36.0), 50.0);
        assert_eq!(games_started_pct(1.0, 3.0), 33.33);
    }

    #[test]
    fn height_weight_pattern_and_absence() {
        let doc = Document::parse("<p>6-8, 215lb (203cm, 97kg)</p>");
        assert_eq!(height_weight(&doc), (203.0, 97.0));
        let doc = Document::parse("<p>no measurements listed</p>");
        assert_eq!(height_weight(&doc), (0.0, 0.0));
    }

    #[test]
    fn college_link_strips_query_string() {
        let doc = Document::parse(
            r#"<a href="https://stats.example/players/joe-1.html?utm=x">
               More College Stats on SR/CBB</a>"#,
        );
        assert_eq!(
            college_stats_link(&doc).as_deref(),
            Some("https://stats.example/players/joe-1.html")
        );
    }

    #[test]
    fn missing_college_link_is_none() {
        let doc = Document::parse(r#"<a href="/x">Game Logs</a>"#);
        assert!(college_stats_link(&doc).is_none());
    }

    #[test]
    fn relatives_counts_anchors_in_label_paragraph() {
        let doc = Document::parse(
            r#"<p><strong>Relatives:</strong>
               <a href="/a">Brother</a>, <a href="/b">Father</a></p>"#,
        );
        assert_eq!(relatives_count(&doc), 2);
        let doc = Document::parse("<p><strong>Born:</strong> 1999</p>");
        assert_eq!(relatives_count(&doc), 0);
    }

    #[test]
    fn position_line_normalizes_multi_valued_positions() {
        let doc = Document::parse(
            r#"<div id="meta">
               <p><strong>Position:</strong> Shooting Guard and Power Forward ▪
                  <strong>Shoots:</strong> Right</p></div>"#,
        );
        assert_eq!(position_line(&doc), "SG,PF");
    }

    #[test]
    fn normalize_positions_handles_abbreviations_and_dedup() {
        assert_eq!(normalize_positions("PG / SG"), "PG,SG");
        assert_eq!(normalize_positions("Center"), "C");
        assert_eq!(
            normalize_positions("Point Guard and Point Guard"),
            "PG"
        );
        assert_eq!(normalize_positions("Wing"), "");
        assert_eq!(normalize_positions(""), "");
    }

    #[test]
    fn win_ratio_parses_and_guards() {
        assert_eq!(win_ratio("37-45"), 0.451);
        assert_eq!(win_ratio("Record: 37-45, 10th in Conference"), 0.451);
        assert_eq!(win_ratio("0-0"), 0.0);
        assert_eq!(win_ratio("no record here"), 0.0);
    }
}
