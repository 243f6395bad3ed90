//! Draft-year listing page: one `Pick` per drafted player.

use anyhow::{Context, Result};
use log::warn;
use url::Url;

use crate::document::Document;
use crate::http_client::{FetchClient, Transport};

pub const BBREF_BASE: &str = "https://www.basketball-reference.com";
pub const SPORTS_REF_BASE: &str = "https://www.sports-reference.com";

const DRAFT_TABLE_ID: &str = "stats";

/// One draft selection from the listing page. Immutable once parsed;
/// consumed exactly once by the record assembler.
#[derive(Debug, Clone)]
pub struct Pick {
    pub pick_number: u32,
    pub team: String,
    pub name: String,
    pub profile_url: String,
    pub college: String,
}

pub fn draft_url(base: &str, year: i32) -> String {
    format!("{base}/draft/NBA_{year}.html")
}

/// All picks of one draft year. A rate-limited listing page or an absent
/// draft table yields an empty vec so the batch moves on to the next year.
pub fn draft_picks<T: Transport>(
    client: &FetchClient<T>,
    base: &str,
    year: i32,
) -> Result<Vec<Pick>> {
    let url = draft_url(base, year);
    let Some(doc) = client.fetch(&url)? else {
        warn!("draft listing for {year} rate-limited, skipping year");
        return Ok(Vec::new());
    };

    let rows = doc.table_rows(DRAFT_TABLE_ID);
    if rows.is_empty() {
        warn!("no draft table found for {year}");
        return Ok(Vec::new());
    }

    let base_url = Url::parse(base).with_context(|| format!("invalid base url {base}"))?;
    let mut picks = Vec::with_capacity(rows.len());
    for row in &rows {
        // Rows without a player link are placeholders (forfeited picks).
        let Some(href) = row.cell_link("player") else {
            continue;
        };
        let profile_url = base_url
            .join(&href)
            .with_context(|| format!("invalid player link {href}"))?
            .to_string();

        let pick_number = row
            .cell_text("pick_overall")
            .and_then(|text| text.parse::<u32>().ok())
            .unwrap_or(0);

        picks.push(Pick {
            pick_number,
            team: row.cell_text("team_id").unwrap_or_default(),
            name: row.cell_text("player").unwrap_or_default(),
            profile_url,
            college: row.cell_text("college_name").unwrap_or_default(),
        });
    }
    Ok(picks)
}
