//! One pick in, one denormalized record out.
//!
//! The pipeline is linear: profile meta, age, college stats, team contexts,
//! merge. Exactly two conditions drop the pick entirely (no college-stats
//! link, no per-game table); every other missing piece degrades to its
//! documented default so the record still lands with the full schema.

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info};

use crate::draft::Pick;
use crate::extract::round2;
use crate::features;
use crate::http_client::{FetchClient, Transport};
use crate::mappings;
use crate::player;
use crate::record::ProspectRecord;
use crate::team_context;

/// Nominal draft day: June 25 of the draft year.
const DRAFT_MONTH: u32 = 6;
const DRAFT_DAY: u32 = 25;

/// Page roots for the two stats hosts, injectable for offline tests.
pub struct AssembleContext<'a, T: Transport> {
    pub client: &'a FetchClient<T>,
    pub bbref_base: &'a str,
    pub sports_ref_base: &'a str,
}

/// Assemble the full record for one pick. `Ok(None)` is the documented
/// skip: a player without discoverable college statistics contributes no
/// record, and the batch moves on.
pub fn assemble<T: Transport>(
    ctx: &AssembleContext<'_, T>,
    pick: &Pick,
    draft_year: i32,
) -> Result<Option<ProspectRecord>> {
    let Some((meta, profile_doc)) = player::player_meta(ctx.client, &pick.profile_url)? else {
        info!("skipping {}: profile page unavailable", pick.name);
        return Ok(None);
    };
    let Some(college_url) = meta.college_stats_url.as_deref() else {
        info!("skipping {}: no college stats link", pick.name);
        return Ok(None);
    };

    let age = draft_age(meta.birth_date, draft_year);

    let Some(college) = player::college_stats(ctx.client, college_url)? else {
        info!("skipping {}: no college per-game table", pick.name);
        return Ok(None);
    };

    // Anchor NBA context on the early-career main team when it exists,
    // otherwise on the team that made the pick.
    let anchor_team = player::main_nba_team(&profile_doc).unwrap_or_else(|| pick.team.clone());
    let nba_context = if anchor_team.is_empty() {
        Default::default()
    } else {
        let abbr = mappings::resolve_team(&anchor_team, draft_year);
        let url = format!("{}/teams/{}/{}.html", ctx.bbref_base, abbr, draft_year);
        team_context::fetch_nba_context(ctx.client, &url)
    };

    let college_context = if pick.college.is_empty() {
        Default::default()
    } else {
        let slug = mappings::college_slug(&pick.college);
        let url = format!(
            "{}/cbb/schools/{}/men/{}.html",
            ctx.sports_ref_base, slug, draft_year
        );
        team_context::fetch_college_context(ctx.client, &url)
    };

    let mut record = ProspectRecord {
        draft_year,
        pick_number: pick.pick_number,
        nba_team: pick.team.clone(),
        name: pick.name.clone(),
        position: meta.position,
        age,
        college: pick.college.clone(),
        height_cm: college.height_cm,
        weight_kg: college.weight_kg,
        relatives: meta.relatives,
        college_seasons: college.seasons,
        per_game: college.per_game,
        advanced: college.advanced,
        per40: college.per40,
        per100: college.per100,
        nba_context,
        college_context,
        ..ProspectRecord::default()
    };
    record.features = features::engineer(&record);

    debug!(
        "assembled {} ({} season record, pick {})",
        record.name, record.college_seasons, record.pick_number
    );
    Ok(Some(record))
}

/// Minimal entry for a pick whose assembly failed hard: identity fields from
/// the listing, documented defaults everywhere else.
pub fn partial_record(pick: &Pick, draft_year: i32) -> ProspectRecord {
    ProspectRecord {
        draft_year,
        pick_number: pick.pick_number,
        nba_team: pick.team.clone(),
        name: pick.name.clone(),
        college: pick.college.clone(),
        ..ProspectRecord::default()
    }
}

/// Age in years at the nominal draft day, rounded to 2 decimals; 0.0 when
/// the birth date is unknown.
pub fn draft_age(birth_date: Option<NaiveDate>, draft_year: i32) -> f64 {
    let Some(birth) = birth_date else {
        return 0.0;
    };
    let Some(draft_day) = NaiveDate::from_ymd_opt(draft_year, DRAFT_MONTH, DRAFT_DAY) else {
        return 0.0;
    };
    let days = (draft_day - birth).num_days() as f64;
    round2(days / 365.25)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_at_nominal_draft_day() {
        let birth = NaiveDate::from_ymd_opt(1999, 3, 15);
        assert_eq!(draft_age(birth, 2021), 22.28);
    }

    #[test]
    fn unknown_birth_date_is_zero_age() {
        assert_eq!(draft_age(None, 2021), 0.0);
    }

    #[test]
    fn partial_record_keeps_identity_and_defaults() {
        let pick = Pick {
            pick_number: 14,
            team: "GSW".to_string(),
            name: "Somebody".to_string(),
            profile_url: "https://host/p.html".to_string(),
            college: "Kansas".to_string(),
        };
        let record = partial_record(&pick, 2020);
        assert_eq!(record.pick_number, 14);
        assert_eq!(record.name, "Somebody");
        assert_eq!(record.age, 0.0);
        assert_eq!(record.per_game.pts, 0.0);
        assert_eq!(record.values().len(), crate::record::COLUMNS.len());
    }
}
