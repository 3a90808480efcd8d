//! Flat-file persistence: the top-10 score table and the single
//! player-progress record. Unreadable or malformed data falls back to
//! defaults; nothing here is surfaced to the player.

use std::collections::BTreeSet;
use std::fs;
use std::num::ParseIntError;
use std::path::Path;

use macroquad::logging::{error, warn};
use thiserror::Error;

use crate::skins::{self, SkinDef};

pub const HIGHSCORES_FILE: &str = "highscores.csv";
pub const PLAYER_DATA_FILE: &str = "player_data.csv";
pub const MAX_ENTRIES: usize = 10;
pub const STARTING_DOUBLOONS: u32 = 50;
pub const MAX_NAME_LEN: usize = 10;

const HEADER: &str = "Name,Score";
// Sub-delimiter for the unlocked-id set, distinct from the field comma.
const SET_SEPARATOR: char = ';';

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("invalid number: {0}")]
    InvalidNumber(#[from] ParseIntError),
    #[error("selected skin {0} is not an unlocked catalog entry")]
    InvalidSelection(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Creates the score file with its header row if it does not exist yet.
pub fn ensure_highscores_file(path: &Path) {
    if !path.exists() {
        if let Err(err) = fs::write(path, format!("{HEADER}\n")) {
            error!("could not create {}: {}", path.display(), err);
        }
    }
}

/// Loads up to [`MAX_ENTRIES`] entries, descending by score. A missing or
/// unreadable file yields an empty table.
pub fn load_highscores(path: &Path) -> Vec<ScoreEntry> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return Vec::new(),
    };
    let mut entries: Vec<ScoreEntry> = text
        .lines()
        .skip(1)
        .filter_map(|line| {
            let (name, score) = line.split_once(',')?;
            let score = score.trim().parse().ok()?;
            Some(ScoreEntry {
                name: name.to_string(),
                score,
            })
        })
        .collect();
    sort_and_truncate(&mut entries);
    entries
}

/// Merges one entry into the table and rewrites the whole file.
pub fn save_highscore_entry(path: &Path, name: &str, score: u32) {
    let mut entries = load_highscores(path);
    entries.push(ScoreEntry {
        name: name.to_string(),
        score,
    });
    sort_and_truncate(&mut entries);

    let mut out = String::from(HEADER);
    out.push('\n');
    for e in &entries {
        out.push_str(&format!("{},{}\n", e.name, e.score));
    }
    if let Err(err) = fs::write(path, out) {
        error!("could not write {}: {}", path.display(), err);
    }
}

// Stable sort keeps insertion order among equal scores.
fn sort_and_truncate(entries: &mut Vec<ScoreEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_ENTRIES);
}

/// Whether `score` would enter the current table.
pub fn qualifies(entries: &[ScoreEntry], score: u32) -> bool {
    score > 0
        && (entries.len() < MAX_ENTRIES || entries.last().is_none_or(|last| score > last.score))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProgress {
    pub doubloons: u32,
    pub selected: usize,
    pub unlocked: BTreeSet<usize>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        PlayerProgress {
            doubloons: STARTING_DOUBLOONS,
            selected: 0,
            unlocked: BTreeSet::from([0]),
        }
    }
}

impl PlayerProgress {
    pub fn owns(&self, id: usize) -> bool {
        self.unlocked.contains(&id)
    }

    /// Shop action on a skin: select it if owned, otherwise purchase and
    /// select it when affordable. Returns whether anything changed; an
    /// unaffordable purchase is a silent no-op.
    pub fn choose(&mut self, skin: &SkinDef) -> bool {
        if self.owns(skin.id) {
            self.selected = skin.id;
            return true;
        }
        if self.doubloons < skin.price {
            return false;
        }
        self.doubloons -= skin.price;
        self.unlocked.insert(skin.id);
        self.selected = skin.id;
        true
    }
}

/// One row: `doubloons,selected,unlocked` with the unlocked-id set joined
/// ascending by `;`. An empty set field decodes as `{0}`.
pub fn encode_progress(p: &PlayerProgress) -> String {
    let unlocked = p
        .unlocked
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(&SET_SEPARATOR.to_string());
    format!("{},{},{}", p.doubloons, p.selected, unlocked)
}

pub fn decode_progress(line: &str) -> Result<PlayerProgress, ParseError> {
    let mut fields = line.trim().split(',');
    let doubloons = fields
        .next()
        .ok_or(ParseError::MissingField("doubloons"))?
        .parse()?;
    let selected: usize = fields
        .next()
        .ok_or(ParseError::MissingField("selected"))?
        .parse()?;

    let mut unlocked = BTreeSet::from([0]);
    if let Some(set) = fields.next() {
        for id in set.split(SET_SEPARATOR).filter(|s| !s.is_empty()) {
            unlocked.insert(id.parse()?);
        }
    }
    // Ids outside the catalog are stale; drop them rather than carry them.
    unlocked.retain(|id| skins::get(*id).is_some());
    unlocked.insert(0);

    if !unlocked.contains(&selected) {
        return Err(ParseError::InvalidSelection(selected));
    }
    Ok(PlayerProgress {
        doubloons,
        selected,
        unlocked,
    })
}

/// Missing file is a normal first run; anything else that fails to decode
/// resets to defaults with a logged warning.
pub fn load_progress(path: &Path) -> PlayerProgress {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return PlayerProgress::default(),
    };
    match decode_progress(&text) {
        Ok(p) => p,
        Err(err) => {
            warn!("player data unreadable ({}), resetting to defaults", err);
            PlayerProgress::default()
        }
    }
}

pub fn save_progress(path: &Path, p: &PlayerProgress) {
    let mut row = encode_progress(p);
    row.push('\n');
    if let Err(err) = fs::write(path, row) {
        error!("could not write {}: {}", path.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fresh_filesystem_yields_defaults() {
        let dir = tempdir().unwrap();
        let p = load_progress(&dir.path().join("player_data.csv"));
        assert_eq!(p.doubloons, 50);
        assert_eq!(p.selected, 0);
        assert_eq!(p.unlocked, BTreeSet::from([0]));
    }

    #[test]
    fn missing_score_file_is_an_empty_table() {
        let dir = tempdir().unwrap();
        assert!(load_highscores(&dir.path().join("highscores.csv")).is_empty());
    }

    #[test]
    fn ensure_creates_header_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscores.csv");
        ensure_highscores_file(&path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Name,Score\n");
        assert!(load_highscores(&path).is_empty());
    }

    #[test]
    fn table_stays_sorted_and_capped_at_ten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscores.csv");
        for score in [30, 10, 120, 70, 50, 90, 20, 40, 110, 60, 80, 100] {
            save_highscore_entry(&path, "AAA", score);
        }
        let table = load_highscores(&path);
        assert_eq!(table.len(), MAX_ENTRIES);
        assert!(table.windows(2).all(|w| w[0].score >= w[1].score));
        // 10 and 20 were pushed out by the ten higher scores.
        assert_eq!(table.last().unwrap().score, 30);
    }

    #[test]
    fn equal_scores_keep_insertion_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscores.csv");
        save_highscore_entry(&path, "FIRST", 50);
        save_highscore_entry(&path, "SECOND", 50);
        save_highscore_entry(&path, "THIRD", 50);
        let names: Vec<_> = load_highscores(&path)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscores.csv");
        fs::write(&path, "Name,Score\nABC,40\nnot a row\nDEF,notanumber\nGHI,10\n").unwrap();
        let table = load_highscores(&path);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].name, "ABC");
        assert_eq!(table[1].name, "GHI");
    }

    #[test]
    fn qualification_rule() {
        let full: Vec<ScoreEntry> = (1..=10)
            .rev()
            .map(|i| ScoreEntry {
                name: "X".into(),
                score: i * 10,
            })
            .collect();
        assert!(qualifies(&[], 10));
        assert!(!qualifies(&[], 0));
        assert!(qualifies(&full, 15));
        assert!(!qualifies(&full, 10));
        assert!(qualifies(&full[..5], 1));
    }

    #[test]
    fn progress_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("player_data.csv");
        let p = PlayerProgress {
            doubloons: 230,
            selected: 2,
            unlocked: BTreeSet::from([0, 2, 3]),
        };
        save_progress(&path, &p);
        assert_eq!(load_progress(&path), p);
    }

    #[test]
    fn encode_joins_ids_with_semicolons() {
        let p = PlayerProgress {
            doubloons: 7,
            selected: 1,
            unlocked: BTreeSet::from([0, 1, 3]),
        };
        assert_eq!(encode_progress(&p), "7,1,0;1;3");
    }

    #[test]
    fn decode_empty_set_field_defaults_to_base_skin() {
        let p = decode_progress("12,0,").unwrap();
        assert_eq!(p.doubloons, 12);
        assert_eq!(p.unlocked, BTreeSet::from([0]));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_progress("").is_err());
        assert!(decode_progress("abc,0,0").is_err());
        assert!(decode_progress("50").is_err());
        assert!(decode_progress("50,1,0;x").is_err());
        // Selected skin must be in the unlocked set.
        assert!(decode_progress("50,3,0;1").is_err());
    }

    #[test]
    fn corrupt_progress_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("player_data.csv");
        fs::write(&path, "this is not a save file").unwrap();
        assert_eq!(load_progress(&path), PlayerProgress::default());
    }

    #[test]
    fn purchase_deducts_exactly_the_price() {
        let mut p = PlayerProgress {
            doubloons: 150,
            ..Default::default()
        };
        let speedy = skins::get(1).unwrap();
        assert!(p.choose(speedy));
        assert_eq!(p.doubloons, 50);
        assert_eq!(p.selected, 1);
        assert!(p.owns(1));
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let mut p = PlayerProgress::default();
        let golden = skins::get(3).unwrap();
        let before = p.clone();
        assert!(!p.choose(golden));
        assert_eq!(p, before);
    }

    #[test]
    fn selection_stays_inside_unlocked_set() {
        let mut p = PlayerProgress {
            doubloons: 400,
            ..Default::default()
        };
        for skin in skins::all() {
            p.choose(skin);
            assert!(p.unlocked.contains(&p.selected));
        }
        // 100 + 200 affordable, 500 was not.
        assert_eq!(p.doubloons, 100);
        assert!(!p.owns(3));
    }
}
