use crate::error::AppError;
use crate::models::attributes::{Difficulty, ElixirMode, GumMode, RunAttributes};
use crate::models::runs::{ChallengeRun, EasterEggRun, MapContext, MetricKind, PlayerCount};
use crate::store::FactStore;
use rusqlite::{Connection, Row};
use std::sync::{Mutex, PoisonError};

const SCHEMA: &str = include_str!("schema.sql");

const ATTRIBUTE_COLUMNS: &str =
    "gum_mode, aats_used, elixir_mode, difficulty, support_used, rampage_inducer_used, relics_used";

pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Db {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Db {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, rusqlite::Error>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&conn)
    }
}

fn parse_column<T>(
    row: &Row<'_>,
    idx: usize,
    column: &'static str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    Ok(raw.and_then(|text| {
        let parsed = parse(&text);
        if parsed.is_none() {
            tracing::warn!(column, value = %text, "ignoring unknown attribute value");
        }
        parsed
    }))
}

/// Reads the attribute columns, laid out as in `ATTRIBUTE_COLUMNS`, starting at `first`.
fn read_attributes(row: &Row<'_>, first: usize) -> rusqlite::Result<RunAttributes> {
    Ok(RunAttributes {
        gum_mode: parse_column(row, first, "gum_mode", GumMode::parse)?,
        aats_used: row.get(first + 1)?,
        elixir_mode: parse_column(row, first + 2, "elixir_mode", ElixirMode::parse)?,
        difficulty: parse_column(row, first + 3, "difficulty", Difficulty::parse)?,
        support_used: row.get(first + 4)?,
        rampage_inducer_used: row.get(first + 5)?,
        relics_used: row.get(first + 6)?,
    })
}

fn read_player_count(row: &Row<'_>, idx: usize, table: &str, id: i64) -> rusqlite::Result<Option<PlayerCount>> {
    let raw: String = row.get(idx)?;
    let parsed = PlayerCount::parse(&raw);
    if parsed.is_none() {
        tracing::warn!(table, id, player_count = %raw, "skipping run with unknown player count");
    }
    Ok(parsed)
}

impl FactStore for Db {
    fn map_catalog(&self) -> Result<Vec<MapContext>, AppError> {
        Ok(self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT m.id, m.slug, m.name, g.short_code
                 FROM maps m JOIN games g ON g.id = m.game_id
                 ORDER BY m.id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(MapContext {
                    id: row.get(0)?,
                    slug: row.get(1)?,
                    name: row.get(2)?,
                    game_code: row.get(3)?,
                })
            })?;

            let mut maps = Vec::new();
            for row in rows {
                maps.push(row?);
            }
            Ok(maps)
        })?)
    }

    fn challenge_runs(&self) -> Result<Vec<ChallengeRun>, AppError> {
        let sql = format!(
            "SELECT cc.id, cc.user_id, c.map_id, c.challenge_type, c.metric_kind, cc.player_count,
             cc.round_reached, cc.kill_count, cc.score, cc.is_verified, cc.completed_at, {ATTRIBUTE_COLUMNS}
             FROM challenge_completions cc JOIN challenges c ON c.id = cc.challenge_id
             ORDER BY cc.id"
        );
        Ok(self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| {
                let id: i64 = row.get(0)?;
                let Some(player_count) = read_player_count(row, 5, "challenge_completions", id)? else {
                    return Ok(None);
                };
                let metric_kind: String = row.get(4)?;
                Ok(Some(ChallengeRun {
                    id,
                    user_id: row.get(1)?,
                    map_id: row.get(2)?,
                    challenge_type: row.get(3)?,
                    metric_kind: MetricKind::from_challenge_kind(&metric_kind),
                    player_count,
                    round_reached: row.get(6)?,
                    kill_count: row.get(7)?,
                    score: row.get(8)?,
                    is_verified: row.get(9)?,
                    completed_at: row.get(10)?,
                    attributes: read_attributes(row, 11)?,
                }))
            })?;

            let mut runs = Vec::new();
            for row in rows {
                runs.extend(row?);
            }
            Ok(runs)
        })?)
    }

    fn easter_egg_runs(&self) -> Result<Vec<EasterEggRun>, AppError> {
        let sql = format!(
            "SELECT ec.id, ec.user_id, e.map_id, e.id, e.name, ec.player_count,
             ec.completion_time_seconds, ec.round_reached, ec.is_verified, ec.completed_at, {ATTRIBUTE_COLUMNS}
             FROM easter_egg_completions ec JOIN easter_eggs e ON e.id = ec.easter_egg_id
             ORDER BY ec.id"
        );
        Ok(self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| {
                let id: i64 = row.get(0)?;
                let Some(player_count) = read_player_count(row, 5, "easter_egg_completions", id)? else {
                    return Ok(None);
                };
                Ok(Some(EasterEggRun {
                    id,
                    user_id: row.get(1)?,
                    map_id: row.get(2)?,
                    easter_egg_id: row.get(3)?,
                    easter_egg_name: row.get(4)?,
                    player_count,
                    completion_time_seconds: row.get(6)?,
                    round_reached: row.get(7)?,
                    is_verified: row.get(8)?,
                    completed_at: row.get(9)?,
                    attributes: read_attributes(row, 10)?,
                }))
            })?;

            let mut runs = Vec::new();
            for row in rows {
                runs.extend(row?);
            }
            Ok(runs)
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    fn seed(db: &Db) {
        db.with_conn(|conn| {
            conn.execute_batch(
                "INSERT INTO games (id, short_code, name) VALUES (1, 'BO3', 'Black Ops III');
                 INSERT INTO maps (id, game_id, slug, name) VALUES (10, 1, 'der-eisendrache', 'Der Eisendrache');
                 INSERT INTO challenges (id, map_id, challenge_type, metric_kind) VALUES (100, 10, 'NO_DOWNS', 'ROUNDS');
                 INSERT INTO challenges (id, map_id, challenge_type, metric_kind) VALUES (101, 10, 'MOST_KILLS', 'KILLS');
                 INSERT INTO easter_eggs (id, map_id, name) VALUES (200, 10, 'Keeper Protector');",
            )?;
            conn.execute(
                "INSERT INTO challenge_completions
                 (id, user_id, challenge_id, player_count, round_reached, kill_count, is_verified,
                  completed_at, gum_mode, aats_used)
                 VALUES (1, ?1, 100, 'SOLO', 42, NULL, 1, '2024-03-01 18:00:00', 'CLASSICS_ONLY', 0)",
                params!["user-a"],
            )?;
            conn.execute(
                "INSERT INTO challenge_completions
                 (id, user_id, challenge_id, player_count, round_reached, kill_count, completed_at, gum_mode)
                 VALUES (2, ?1, 101, 'DUO', 12, 900, '2024-03-02 18:00:00', 'MEGAS')",
                params!["user-b"],
            )?;
            conn.execute(
                "INSERT INTO easter_egg_completions
                 (id, user_id, easter_egg_id, player_count, completion_time_seconds, round_reached,
                  is_verified, completed_at)
                 VALUES (1, ?1, 200, 'SQUAD', 2400, NULL, 1, '2024-03-03 18:00:00')",
                params!["user-a"],
            )?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_db_open_in_memory() {
        let db = Db::open_in_memory().expect("Failed to open in-memory DB");
        db.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'
                 AND name IN ('challenge_completions', 'easter_egg_completions')",
                [],
                |row| row.get(0),
            )?;
            assert_eq!(count, 2);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_map_catalog_joins_game_code() {
        let db = Db::open_in_memory().unwrap();
        seed(&db);
        let maps = db.map_catalog().unwrap();
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].game_code, "BO3");
        assert_eq!(maps[0].slug, "der-eisendrache");
    }

    #[test]
    fn test_challenge_runs_read_scoring_fields_and_attributes() {
        let db = Db::open_in_memory().unwrap();
        seed(&db);
        let runs = db.challenge_runs().unwrap();
        assert_eq!(runs.len(), 2);

        let no_downs = &runs[0];
        assert_eq!(no_downs.map_id, 10);
        assert_eq!(no_downs.metric_kind, MetricKind::Rounds);
        assert_eq!(no_downs.round_reached, 42);
        assert!(no_downs.is_verified);
        assert_eq!(no_downs.attributes.gum_mode, Some(GumMode::ClassicsOnly));
        assert_eq!(no_downs.attributes.aats_used, Some(false));

        let kills = &runs[1];
        assert_eq!(kills.metric_kind, MetricKind::Kills);
        assert_eq!(kills.kill_count, Some(900));
        assert_eq!(kills.player_count, PlayerCount::Duo);
        assert!(!kills.is_verified);
        // unknown enum text reads as a missing attribute
        assert_eq!(kills.attributes.gum_mode, None);
    }

    #[test]
    fn test_unknown_attribute_only_clears_its_own_column() {
        let db = Db::open_in_memory().unwrap();
        seed(&db);
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO easter_egg_completions
                 (id, user_id, easter_egg_id, player_count, completion_time_seconds, completed_at,
                  elixir_mode, difficulty)
                 VALUES (2, 'user-b', 200, 'SOLO', 3000, '2024-03-04 18:00:00', 'CLASSICS_ONLY', 'NIGHTMARE')",
                [],
            )
        })
        .unwrap();
        let runs = db.easter_egg_runs().unwrap();
        let attributes = &runs[1].attributes;
        assert_eq!(attributes.elixir_mode, Some(ElixirMode::ClassicsOnly));
        assert_eq!(attributes.difficulty, None);
        assert_eq!(attributes.gum_mode, None);
    }

    #[test]
    fn test_parse_column_reads_named_column() {
        let db = Db::open_in_memory().unwrap();
        let parsed = db
            .with_conn(|conn| {
                conn.query_row("SELECT 'HARDCORE', 'MEGAS'", [], |row| {
                    Ok((
                        parse_column(row, 0, "difficulty", Difficulty::parse)?,
                        parse_column(row, 1, "gum_mode", GumMode::parse)?,
                    ))
                })
            })
            .unwrap();
        assert_eq!(parsed, (Some(Difficulty::Hardcore), None));
    }

    #[test]
    fn test_easter_egg_runs_keep_optional_timing() {
        let db = Db::open_in_memory().unwrap();
        seed(&db);
        let runs = db.easter_egg_runs().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].easter_egg_name, "Keeper Protector");
        assert_eq!(runs[0].completion_time_seconds, Some(2400));
        assert_eq!(runs[0].round_reached, None);
        assert_eq!(runs[0].player_count, PlayerCount::Squad);
    }

    #[test]
    fn test_unknown_player_count_is_skipped() {
        let db = Db::open_in_memory().unwrap();
        seed(&db);
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO challenge_completions (id, user_id, challenge_id, player_count, round_reached)
                 VALUES (3, 'user-c', 100, 'OCTET', 99)",
                [],
            )
        })
        .unwrap();
        assert_eq!(db.challenge_runs().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_table_is_a_hard_error() {
        let db = Db::open_in_memory().unwrap();
        db.with_conn(|conn| conn.execute_batch("DROP TABLE easter_egg_completions;"))
            .unwrap();
        assert!(matches!(db.easter_egg_runs(), Err(AppError::Db(_))));
    }
}
