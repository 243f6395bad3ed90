use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use draftscope::assemble::{self, AssembleContext};
use draftscope::draft;
use draftscope::http_client::{FetchClient, HttpResponse, RetryPolicy, Transport};
use draftscope::record::{ProspectRecord, COLUMNS};

const BASE: &str = "https://hoops.test";
const SR_BASE: &str = "https://stats.test";

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Serves fixture pages by URL; unknown URLs 404 and URLs in `throttled`
/// always answer 429.
struct FixtureTransport {
    pages: HashMap<String, String>,
    throttled: Vec<String>,
}

impl FixtureTransport {
    fn site() -> Self {
        let mut pages = HashMap::new();
        let mut page = |url: String, fixture: &str| {
            pages.insert(url, read_fixture(fixture));
        };
        page(format!("{BASE}/draft/NBA_2019.html"), "draft_2019.html");
        page(
            format!("{BASE}/players/a/ayersal01.html"),
            "profile_ayers.html",
        );
        page(
            format!("{BASE}/players/b/boydbe01.html"),
            "profile_boyd.html",
        );
        page(
            format!("{BASE}/players/c/colecal01.html"),
            "profile_cole.html",
        );
        page(
            format!("{SR_BASE}/cbb/players/alonzo-ayers-1.html"),
            "college_ayers.html",
        );
        page(
            format!("{SR_BASE}/cbb/players/caleb-cole-1.html"),
            "college_cole.html",
        );
        page(format!("{BASE}/teams/MEM/2019.html"), "team_mem_2019.html");
        page(
            format!("{SR_BASE}/cbb/schools/duke/men/2019.html"),
            "school_duke_2019.html",
        );
        FixtureTransport {
            pages,
            throttled: Vec::new(),
        }
    }
}

impl Transport for FixtureTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        if self.throttled.iter().any(|t| t == url) {
            return Ok(HttpResponse {
                status: 429,
                body: String::new(),
            });
        }
        match self.pages.get(url) {
            Some(body) => Ok(HttpResponse {
                status: 200,
                body: body.clone(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

fn client(transport: FixtureTransport) -> FetchClient<FixtureTransport> {
    FetchClient::with_transport(
        transport,
        RetryPolicy {
            backoff_base: Duration::ZERO,
            backoff_cap: Duration::ZERO,
            ..RetryPolicy::default()
        },
        Duration::ZERO,
    )
}

fn run_batch(client: &FetchClient<FixtureTransport>) -> Vec<ProspectRecord> {
    let ctx = AssembleContext {
        client,
        bbref_base: BASE,
        sports_ref_base: SR_BASE,
    };
    let picks = draft::draft_picks(client, BASE, 2019).expect("listing should parse");
    assert_eq!(picks.len(), 3);

    picks
        .iter()
        .filter_map(|pick| assemble::assemble(&ctx, pick, 2019).expect("no hard failures"))
        .collect()
}

#[test]
fn batch_assembles_records_and_skips_players_without_college_stats() {
    let client = client(FixtureTransport::site());
    let records = run_batch(&client);

    // Boyd has no college-stats link and produces no record.
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.values().len(), COLUMNS.len());
        assert_eq!(record.draft_year, 2019);
    }
    assert_eq!(records[0].name, "Alonzo Ayers");
    assert_eq!(records[1].name, "Caleb Cole");
}

#[test]
fn full_profile_resolves_every_section() {
    let client = client(FixtureTransport::site());
    let records = run_batch(&client);
    let ayers = &records[0];

    assert_eq!(ayers.pick_number, 1);
    assert_eq!(ayers.nba_team, "ORL");
    assert_eq!(ayers.position, "PF");
    assert_eq!(ayers.age, 20.28);
    assert_eq!(ayers.college, "Duke");
    assert_eq!(ayers.height_cm, 208.0);
    assert_eq!(ayers.weight_kg, 104.0);
    assert_eq!(ayers.relatives, 1);
    assert_eq!(ayers.college_seasons, 2);

    // Final season row, not the first one.
    assert_eq!(ayers.per_game.pts, 18.3);
    assert_eq!(ayers.per_game.games_started_pct, 94.44);
    assert_eq!(ayers.advanced.per, 28.4);
    assert_eq!(ayers.per40.pts, 24.3);
    // The per-100 table is wrapped in an HTML comment on the fixture page.
    assert_eq!(ayers.per100.off_rtg, 118.2);
    assert_eq!(ayers.per100.def_rtg, 94.1);

    // NBA context comes from the main early-career team (MEM), not the
    // drafting team.
    assert_eq!(ayers.nba_context.win_pct, 0.402);
    assert_eq!(ayers.nba_context.expected_win_pct, 0.39);
    assert_eq!(ayers.nba_context.srs, -4.32);
    assert_eq!(ayers.nba_context.pace, 102.5);
    assert_eq!(ayers.college_context.win_pct, 0.842);
    assert_eq!(ayers.college_context.sos, 10.11);

    assert_eq!(ayers.features.height_weight, 2.0);
    assert_eq!(ayers.features.bmi, 24.0);
    assert_eq!(ayers.features.ast_tov, 1.133);
    assert_eq!(ayers.features.pts_usg, 0.935);
    assert_eq!(ayers.features.three_rate, 0.279);
    assert_eq!(ayers.features.spacing_ts, 0.171);
    assert_eq!(ayers.features.shot_touch_blend, 0.588);
    assert_eq!(ayers.features.team_dev_score, 3.0);
    assert_eq!(ayers.features.college_strength, 4.0);
}

#[test]
fn missing_sections_degrade_to_defaults() {
    let client = client(FixtureTransport::site());
    let records = run_batch(&client);
    let cole = &records[1];

    assert_eq!(cole.position, "PG");
    assert_eq!(cole.age, 18.98);
    assert_eq!(cole.college_seasons, 1);
    assert_eq!(cole.per_game.pts, 10.2);
    assert_eq!(cole.per_game.games_started_pct, 100.0);

    // No advanced/per-40/per-100 tables on the college page.
    assert_eq!(cole.advanced.per, 0.0);
    assert_eq!(cole.per40.pts, 0.0);
    assert_eq!(cole.per100.off_rtg, 0.0);

    // No NBA seasons table: context falls back to the drafting team, whose
    // page 404s, and both contexts stay zero.
    assert_eq!(cole.nba_context.win_pct, 0.0);
    assert_eq!(cole.nba_context.srs, 0.0);
    assert_eq!(cole.college_context.win_pct, 0.0);

    assert_eq!(cole.features.three_rate, 0.0);
    assert_eq!(cole.features.team_dev_score, 2.0);
}

#[test]
fn rate_limited_profile_is_a_soft_skip() {
    let mut transport = FixtureTransport::site();
    transport
        .throttled
        .push(format!("{BASE}/players/a/ayersal01.html"));
    let client = client(transport);
    let records = run_batch(&client);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Caleb Cole");
}
