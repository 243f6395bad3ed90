//! The canonical denormalized output record.
//!
//! Every record carries the full fixed column set regardless of what the
//! source pages actually contained; anything unresolved keeps its default.
//! `COLUMNS` is the single authoritative catalog and `values` always yields
//! exactly one value per column, so every batch is union-compatible for
//! tabular export.

use crate::features::EngineeredFeatures;
use crate::team_context::{CollegeTeamContext, NbaTeamContext};

#[derive(Debug, Clone, Default)]
pub struct ProspectRecord {
    pub draft_year: i32,
    pub pick_number: u32,
    pub nba_team: String,
    pub name: String,
    pub position: String,
    pub age: f64,
    pub college: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub relatives: u32,
    pub college_seasons: u32,
    pub per_game: PerGameStats,
    pub advanced: AdvancedStats,
    pub per40: Per40Stats,
    pub per100: Per100Stats,
    pub nba_context: NbaTeamContext,
    pub college_context: CollegeTeamContext,
    pub features: EngineeredFeatures,
}

/// Final college season, basic per-game table.
#[derive(Debug, Clone, Default)]
pub struct PerGameStats {
    pub games: f64,
    pub games_started_pct: f64,
    pub minutes: f64,
    pub fg: f64,
    pub fga: f64,
    pub fg_pct: f64,
    pub fg3: f64,
    pub fg3a: f64,
    pub fg3_pct: f64,
    pub ft: f64,
    pub fta: f64,
    pub ft_pct: f64,
    pub orb: f64,
    pub drb: f64,
    pub trb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub pf: f64,
    pub pts: f64,
}

/// Final college season, advanced/efficiency table.
#[derive(Debug, Clone, Default)]
pub struct AdvancedStats {
    pub per: f64,
    pub ts_pct: f64,
    pub fg3a_rate: f64,
    pub fta_rate: f64,
    pub pprod: f64,
    pub orb_pct: f64,
    pub drb_pct: f64,
    pub trb_pct: f64,
    pub ast_pct: f64,
    pub stl_pct: f64,
    pub blk_pct: f64,
    pub tov_pct: f64,
    pub usg_pct: f64,
    pub ows: f64,
    pub dws: f64,
    pub ws: f64,
    pub ws_per_40: f64,
    pub obpm: f64,
    pub dbpm: f64,
    pub bpm: f64,
}

/// Final college season, per-40-minutes table.
#[derive(Debug, Clone, Default)]
pub struct Per40Stats {
    pub fg: f64,
    pub fga: f64,
    pub fg3: f64,
    pub fg3a: f64,
    pub ft: f64,
    pub fta: f64,
    pub orb: f64,
    pub drb: f64,
    pub trb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub pf: f64,
    pub pts: f64,
}

/// Final college season, per-100-possessions table.
#[derive(Debug, Clone, Default)]
pub struct Per100Stats {
    pub fg: f64,
    pub fga: f64,
    pub fg3: f64,
    pub fg3a: f64,
    pub ft: f64,
    pub fta: f64,
    pub orb: f64,
    pub drb: f64,
    pub trb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub pf: f64,
    pub pts: f64,
    pub off_rtg: f64,
    pub def_rtg: f64,
}

#[rustfmt::skip]
pub const COLUMNS: &[&str] = &[
    // Identity and meta
    "Draft Year", "Pick Number", "NBA Team", "Name", "POS", "Age", "College",
    "Height", "Weight", "NBA Relatives", "Seasons Played (College)",
    // Basic per-game
    "G", "GS%", "MPG",
    "FG", "FGA", "FG%", "3P", "3PA", "3P%", "FT", "FTA", "FT%",
    "ORB", "DRB", "TRB", "AST", "STL", "BLK", "TOV", "PF", "PTS",
    // Advanced
    "PER", "TS%", "3PAr", "FTr", "PProd",
    "ORB%", "DRB%", "TRB%", "AST%", "STL%", "BLK%", "TOV%", "USG%",
    "OWS", "DWS", "WS", "WS/40", "OBPM", "DBPM", "BPM",
    // Per 40 minutes
    "FG/40", "FGA/40", "3P/40", "3PA/40", "FT/40", "FTA/40",
    "ORB/40", "DRB/40", "TRB/40", "AST/40", "STL/40", "BLK/40",
    "TOV/40", "PF/40", "PTS/40",
    // Per 100 possessions
    "FG/100", "FGA/100", "3P/100", "3PA/100", "FT/100", "FTA/100",
    "ORB/100", "DRB/100", "TRB/100", "AST/100", "STL/100", "BLK/100",
    "TOV/100", "PF/100", "PTS/100", "ORtg", "DRtg",
    // NBA team context (main team, season before the draft)
    "NBA Win%", "NBA Expected Win%", "NBA SRS", "NBA Pace",
    "NBA ORtg", "NBA DRtg", "NBA PPG", "NBA OPPG",
    // College team context
    "CT_Win%", "CT_SRS", "CT_SOS", "CT_ORtg", "CT_DRtg", "CT_PTS/G", "CT_PTSA/G",
    // Engineered
    "Height/Weight", "BMI", "AST/TOV", "PTS/USG", "3PA/FGA", "3PAr_TS",
    "ShotTouchBlend", "Team Dev Score", "College Strength",
];

impl ProspectRecord {
    /// One value per entry of `COLUMNS`, in the same order.
    pub fn values(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(COLUMNS.len());
        out.push(self.draft_year.to_string());
        out.push(self.pick_number.to_string());
        out.push(self.nba_team.clone());
        out.push(self.name.clone());
        out.push(self.position.clone());
        out.push(num(self.age));
        out.push(self.college.clone());
        out.push(num(self.height_cm));
        out.push(num(self.weight_kg));
        out.push(self.relatives.to_string());
        out.push(self.college_seasons.to_string());

        let g = &self.per_game;
        out.extend(
            [
                g.games,
                g.games_started_pct,
                g.minutes,
                g.fg,
                g.fga,
                g.fg_pct,
                g.fg3,
                g.fg3a,
                g.fg3_pct,
                g.ft,
                g.fta,
                g.ft_pct,
                g.orb,
                g.drb,
                g.trb,
                g.ast,
                g.stl,
                g.blk,
                g.tov,
                g.pf,
                g.pts,
            ]
            .map(num),
        );

        let a = &self.advanced;
        out.extend(
            [
                a.per, a.ts_pct, a.fg3a_rate, a.fta_rate, a.pprod, a.orb_pct, a.drb_pct, a.trb_pct,
                a.ast_pct, a.stl_pct, a.blk_pct, a.tov_pct, a.usg_pct, a.ows, a.dws, a.ws,
                a.ws_per_40, a.obpm, a.dbpm, a.bpm,
            ]
            .map(num),
        );

        let m = &self.per40;
        out.extend(
            [
                m.fg, m.fga, m.fg3, m.fg3a, m.ft, m.fta, m.orb, m.drb, m.trb, m.ast, m.stl, m.blk,
                m.tov, m.pf, m.pts,
            ]
            .map(num),
        );

        let p = &self.per100;
        out.extend(
            [
                p.fg, p.fga, p.fg3, p.fg3a, p.ft, p.fta, p.orb, p.drb, p.trb, p.ast, p.stl, p.blk,
                p.tov, p.pf, p.pts, p.off_rtg, p.def_rtg,
            ]
            .map(num),
        );

        let n = &self.nba_context;
        out.extend(
            [
                n.win_pct,
                n.expected_win_pct,
                n.srs,
                n.pace,
                n.off_rtg,
                n.def_rtg,
                n.pts_per_g,
                n.opp_pts_per_g,
            ]
            .map(num),
        );

        let c = &self.college_context;
        out.extend(
            [
                c.win_pct,
                c.srs,
                c.sos,
                c.off_rtg,
                c.def_rtg,
                c.pts_per_g,
                c.opp_pts_per_g,
            ]
            .map(num),
        );

        let f = &self.features;
        out.extend(
            [
                f.height_weight,
                f.bmi,
                f.ast_tov,
                f.pts_usg,
                f.three_rate,
                f.spacing_ts,
                f.shot_touch_blend,
                f.team_dev_score,
                f.college_strength,
            ]
            .map(num),
        );

        out
    }
}

fn num(v: f64) -> String {
    if v == 0.0 {
        // Normalize -0.0 and keep empty-source defaults compact.
        "0".to_string()
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_column_has_a_value() {
        let record = ProspectRecord::default();
        assert_eq!(record.values().len(), COLUMNS.len());
    }

    #[test]
    fn defaults_serialize_as_zero_or_empty() {
        let record = ProspectRecord::default();
        let values = record.values();
        let name_idx = COLUMNS.iter().position(|c| *c == "Name").unwrap();
        let per_idx = COLUMNS.iter().position(|c| *c == "PER").unwrap();
        assert_eq!(values[name_idx], "");
        assert_eq!(values[per_idx], "0");
    }

    #[test]
    fn column_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for col in COLUMNS {
            assert!(seen.insert(col), "duplicate column {col}");
        }
    }
}
