//! Static identity tables: franchise renames, development reputation and
//! college prestige tiers, plus school-page slugs.

/// Franchise rename table: (current abbreviation, first season year under the
/// current code, abbreviation used before that season). Relocations are added
/// here, never as conditionals in resolution logic.
pub const TEAM_RENAMES: &[(&str, i32, &str)] = &[
    ("OKC", 2008, "SEA"),
    ("BRK", 2012, "NJN"),
    ("NOP", 2013, "NOH"),
    ("CHO", 2014, "CHA"),
];

/// Resolve a team abbreviation as of a given season year. Years strictly
/// before the rename cutoff map back to the historical code; everything else
/// (including unknown abbreviations) passes through unchanged.
pub fn resolve_team<'a>(abbr: &'a str, as_of_year: i32) -> &'a str {
    for (current, cutoff, historical) in TEAM_RENAMES {
        if *current == abbr && as_of_year < *cutoff {
            return historical;
        }
    }
    abbr
}

/// Front-office player-development reputation, 0 (poor) to 4 (great).
const TEAM_DEVELOPMENT: &[(&str, f64)] = &[
    // Great reputation
    ("SAS", 4.0),
    ("GSW", 4.0),
    ("BOS", 4.0),
    ("TOR", 4.0),
    ("MIA", 4.0),
    ("OKC", 4.0),
    // Good
    ("MIL", 3.0),
    ("DEN", 3.0),
    ("MEM", 3.0),
    ("IND", 3.0),
    ("ATL", 3.0),
    ("CLE", 3.0),
    ("ORL", 3.0),
    ("DAL", 3.0),
    // Average
    ("MIN", 2.0),
    ("LAL", 2.0),
    ("NYK", 2.0),
    ("HOU", 2.0),
    // Not ideal
    ("BKN", 1.0),
    ("DET", 1.0),
    ("PHI", 1.0),
    ("UTA", 1.0),
    ("POR", 1.0),
    ("LAC", 1.0),
    // Bottom of the league
    ("PHX", 0.0),
    ("NOP", 0.0),
    ("NOH", 0.0),
    ("SAC", 0.0),
    ("CHI", 0.0),
    ("WAS", 0.0),
    ("CHO", 0.0),
    ("CHA", 0.0),
];

/// College program prestige, 0 (everything else) to 4 (blue blood).
const COLLEGE_STRENGTH: &[(&str, f64)] = &[
    // Blue bloods
    ("Duke", 4.0),
    ("Kentucky", 4.0),
    ("Kansas", 4.0),
    ("UNC", 4.0),
    // NBA factories
    ("UCLA", 3.0),
    ("Arizona", 3.0),
    ("UConn", 3.0),
    ("Villanova", 3.0),
    ("Gonzaga", 3.0),
    ("Michigan State", 3.0),
    ("Texas", 3.0),
    ("Alabama", 3.0),
    ("Houston", 3.0),
    ("Baylor", 3.0),
    ("Louisville", 3.0),
    // Respected power programs
    ("Florida", 2.0),
    ("Virginia", 2.0),
    ("Tennessee", 2.0),
    ("Arkansas", 2.0),
    ("Oregon", 2.0),
    ("Auburn", 2.0),
    ("Michigan", 2.0),
    ("Indiana", 2.0),
    ("USC", 2.0),
    ("Ohio State", 2.0),
    ("Purdue", 2.0),
    ("Creighton", 2.0),
    ("Marquette", 2.0),
    ("Illinois", 2.0),
    ("Miami (FL)", 2.0),
    ("LSU", 2.0),
    ("Iowa", 2.0),
    ("Oklahoma", 2.0),
    ("San Diego State", 2.0),
    ("VCU", 2.0),
    // Recognizable but less typical
    ("Florida State", 1.0),
    ("Georgia", 1.0),
    ("Wisconsin", 1.0),
    ("Colorado", 1.0),
    ("Texas Tech", 1.0),
    ("Seton Hall", 1.0),
    ("Syracuse", 1.0),
    ("Providence", 1.0),
    ("NC State", 1.0),
    ("Maryland", 1.0),
    ("Saint Mary's", 1.0),
    ("Dayton", 1.0),
    ("Memphis", 1.0),
    ("Wake Forest", 1.0),
    ("Missouri", 1.0),
    ("Arizona State", 1.0),
    ("Xavier", 1.0),
];

pub fn team_development_score(abbr: &str) -> f64 {
    lookup(TEAM_DEVELOPMENT, abbr)
}

pub fn college_strength(college: &str) -> f64 {
    lookup(COLLEGE_STRENGTH, college)
}

fn lookup(table: &[(&str, f64)], key: &str) -> f64 {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}

/// Schools whose stats-site slug is not the mechanical lowercase-hyphenate
/// of the draft page's college name.
const COLLEGE_SLUGS: &[(&str, &str)] = &[
    ("UNC", "north-carolina"),
    ("North Carolina", "north-carolina"),
    ("UConn", "connecticut"),
    ("USC", "southern-california"),
    ("LSU", "louisiana-state"),
    ("VCU", "virginia-commonwealth"),
    ("BYU", "brigham-young"),
    ("SMU", "southern-methodist"),
    ("NC State", "north-carolina-state"),
    ("Miami (FL)", "miami-fl"),
    ("Saint Mary's", "saint-marys-ca"),
    ("Ole Miss", "mississippi"),
];

/// Stats-site URL slug for a college name, e.g. "Michigan State" ->
/// "michigan-state". Unknown names are slugified mechanically.
pub fn college_slug(college: &str) -> String {
    for (name, slug) in COLLEGE_SLUGS {
        if *name == college {
            return (*slug).to_string();
        }
    }
    let mut slug = String::with_capacity(college.len());
    for ch in college.trim().chars() {
        match ch {
            'A'..='Z' => slug.push(ch.to_ascii_lowercase()),
            'a'..='z' | '0'..='9' => slug.push(ch),
            ' ' | '-' => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }
    slug.trim_matches('-').to_string()
}
