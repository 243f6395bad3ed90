//! Player profile metadata and college season stats.

use anyhow::Result;
use chrono::NaiveDate;
use log::warn;

use crate::document::Document;
use crate::extract;
use crate::http_client::{FetchClient, Transport};
use crate::record::{AdvancedStats, Per40Stats, Per100Stats, PerGameStats};

const PER_GAME_TABLE: &str = "players_per_game";
const ADVANCED_TABLE: &str = "players_advanced";
const PER_40_TABLE: &str = "players_per_min";
const PER_100_TABLE: &str = "players_per_poss";
const NBA_SEASONS_TABLE: &str = "per_game";

/// Per-player attributes independent of any single season. A profile whose
/// college-stats link is missing has no usable meta; the player is skipped.
#[derive(Debug, Clone)]
pub struct PlayerMeta {
    pub relatives: u32,
    pub college_stats_url: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub position: String,
}

/// Fetch a profile page and pull the player meta. The parsed document is
/// returned alongside so the caller can resolve the main NBA team without a
/// second fetch. `Ok(None)` means the page was rate-limited away.
pub fn player_meta<T: Transport>(
    client: &FetchClient<T>,
    profile_url: &str,
) -> Result<Option<(PlayerMeta, Document)>> {
    let Some(doc) = client.fetch(profile_url)? else {
        return Ok(None);
    };

    let birth_date = doc
        .select_first("span#necro-birth")
        .and_then(|el| el.value().attr("data-birth"))
        .and_then(|raw| match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(err) => {
                warn!("unparseable birth date {raw:?} at {profile_url}: {err}");
                None
            }
        });

    let meta = PlayerMeta {
        relatives: extract::relatives_count(&doc),
        college_stats_url: extract::college_stats_link(&doc),
        birth_date,
        position: extract::position_line(&doc),
    };
    Ok(Some((meta, doc)))
}

/// College career scraped from the stats site: physicals plus the four
/// final-season stat groups. Season count comes from the per-game table's
/// row count; the last row is the authoritative final season.
#[derive(Debug, Clone)]
pub struct CollegeStats {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub seasons: u32,
    pub per_game: PerGameStats,
    pub advanced: AdvancedStats,
    pub per40: Per40Stats,
    pub per100: Per100Stats,
}

/// Fetch the college stats page. `Ok(None)` when the page was rate-limited
/// or carries no per-game table; either way the player is skipped.
pub fn college_stats<T: Transport>(
    client: &FetchClient<T>,
    stats_url: &str,
) -> Result<Option<CollegeStats>> {
    let Some(doc) = client.fetch(stats_url)? else {
        return Ok(None);
    };

    let (height_cm, weight_kg) = extract::height_weight(&doc);

    let rows = doc.table_rows(PER_GAME_TABLE);
    let Some(last) = rows.last() else {
        return Ok(None);
    };
    let per_game = extract::per_game_stats(last)?;
    let seasons = rows.len() as u32;

    let advanced = match doc.table_rows(ADVANCED_TABLE).last() {
        Some(row) => extract::advanced_stats(row)?,
        None => AdvancedStats::default(),
    };
    let per40 = match doc.table_rows(PER_40_TABLE).last() {
        Some(row) => extract::per40_stats(row)?,
        None => Per40Stats::default(),
    };
    let per100 = match doc.table_rows(PER_100_TABLE).last() {
        Some(row) => extract::per100_stats(row)?,
        None => Per100Stats::default(),
    };

    Ok(Some(CollegeStats {
        height_cm,
        weight_kg,
        seasons,
        per_game,
        advanced,
        per40,
        per100,
    }))
}

/// The team a player logged the most games for across the earliest four
/// distinct seasons of the NBA per-game table on the profile page.
///
/// Multi-team aggregate rows (TOT/2TM/3TM, the listing convention for
/// same-season trades) are excluded from the sums. Ties break to the team
/// appearing in the earliest season, then to the lexically smallest
/// abbreviation, so resolution never depends on row iteration order.
pub fn main_nba_team(profile_doc: &Document) -> Option<String> {
    let mut seasons: Vec<String> = Vec::new();
    // (team, summed games, index of the season the team first appeared in)
    let mut games_by_team: Vec<(String, f64, usize)> = Vec::new();

    for row in profile_doc.table_rows(NBA_SEASONS_TABLE) {
        let Some(season) = row.cell_text("season").filter(|s| !s.is_empty()) else {
            continue;
        };
        let Some(team) = row.cell_text("team_id").filter(|t| !t.is_empty()) else {
            continue;
        };
        if team == "TOT" || team.ends_with("TM") {
            continue;
        }

        if !seasons.contains(&season) {
            if seasons.len() == 4 {
                break;
            }
            seasons.push(season);
        }
        let season_idx = seasons.len() - 1;

        let games = row.stat("games").unwrap_or(0.0);
        match games_by_team.iter_mut().find(|(t, _, _)| *t == team) {
            Some((_, sum, _)) => *sum += games,
            None => games_by_team.push((team, games, season_idx)),
        }
    }

    games_by_team
        .into_iter()
        .max_by(|(team_a, games_a, idx_a), (team_b, games_b, idx_b)| {
            games_a
                .partial_cmp(games_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(idx_b.cmp(idx_a))
                .then(team_b.cmp(team_a))
        })
        .map(|(team, _, _)| team)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season_row(season: &str, team: &str, games: u32) -> String {
        format!(
            r#"<tr><th data-stat="season">{season}</th>
                <td data-stat="team_id">{team}</td>
                <td data-stat="games">{games}</td></tr>"#
        )
    }

    fn seasons_doc(rows: &[String]) -> Document {
        Document::parse(&format!(
            r#"<table id="per_game"><tbody>{}</tbody></table>"#,
            rows.join("")
        ))
    }

    #[test]
    fn main_team_sums_games_within_first_four_seasons() {
        let doc = seasons_doc(&[
            season_row("2015-16", "PHI", 50),
            season_row("2016-17", "PHI", 20),
            season_row("2016-17", "BOS", 40),
            season_row("2017-18", "BOS", 70),
            season_row("2018-19", "BOS", 75),
            // Fifth season must not count.
            season_row("2019-20", "PHI", 82),
        ]);
        assert_eq!(main_nba_team(&doc).as_deref(), Some("BOS"));
    }

    #[test]
    fn aggregate_rows_are_excluded() {
        let doc = seasons_doc(&[
            season_row("2016-17", "TOT", 60),
            season_row("2016-17", "2TM", 60),
            season_row("2016-17", "DEN", 35),
            season_row("2016-17", "MIN", 25),
        ]);
        assert_eq!(main_nba_team(&doc).as_deref(), Some("DEN"));
    }

    #[test]
    fn ties_break_to_earliest_then_lexical() {
        let doc = seasons_doc(&[
            season_row("2016-17", "UTA", 40),
            season_row("2017-18", "ATL", 40),
        ]);
        assert_eq!(main_nba_team(&doc).as_deref(), Some("UTA"));

        let doc = seasons_doc(&[
            season_row("2016-17", "UTA", 20),
            season_row("2016-17", "ATL", 20),
        ]);
        assert_eq!(main_nba_team(&doc).as_deref(), Some("ATL"));
    }

    #[test]
    fn no_nba_seasons_means_no_main_team() {
        let doc = Document::parse("<p>rookie, never played</p>");
        assert!(main_nba_team(&doc).is_none());
    }
}
