//! SQLite implementation of [`ProgressStore`].
//!
//! [`SqliteStore`] persists learner state in a SQLite database with WAL mode,
//! transactions on every multi-statement write, and automatic schema
//! migrations. Trees and assessments are stored as JSON TEXT columns via
//! serde_json; scalar learner state gets real columns so it stays queryable.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use skillpath_core::{
    count_leaf_topics, validate_forest, DailyTask, Roadmap, RoadmapAssessment, RoadmapId,
    RoadmapLevel, RoadmapProgress, TopicId, TopicNode, TopicResult,
};

use crate::error::StorageError;
use crate::traits::ProgressStore;
use crate::types::RoadmapSummary;

/// SQLite-backed implementation of [`ProgressStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Verifies a roadmap exists, returning an error if not.
    fn assert_roadmap_exists(&self, id: &RoadmapId) -> Result<(), StorageError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM roadmaps WHERE id = ?1)",
            params![id.as_str()],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StorageError::RoadmapNotFound { id: id.clone() });
        }
        Ok(())
    }

    /// Deserializes a RoadmapLevel from TEXT.
    fn str_to_level(s: &str) -> RoadmapLevel {
        match s {
            "Intermediate" => RoadmapLevel::Intermediate,
            "Advanced" => RoadmapLevel::Advanced,
            _ => RoadmapLevel::Beginner, // fallback
        }
    }

    /// Parses a stored ISO date column.
    fn parse_date(text: &str) -> Result<NaiveDate, StorageError> {
        text.parse::<NaiveDate>()
            .map_err(|e| StorageError::Reconstruction {
                reason: format!("invalid stored date '{}': {}", text, e),
            })
    }

    fn load_tasks(&self, sql: &str, param: &str) -> Result<Vec<DailyTask>, StorageError> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let raw: Vec<RawTask> = stmt
            .query_map(params![param], |row| {
                Ok(RawTask {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    roadmap_id: row.get(2)?,
                    roadmap_title: row.get(3)?,
                    node_id: row.get(4)?,
                    node_title: row.get(5)?,
                    description: row.get(6)?,
                    points: row.get(7)?,
                    completed: row.get(8)?,
                    completed_at_ms: row.get(9)?,
                })
            })?
            .collect::<Result<_, _>>()?;

        raw.into_iter().map(RawTask::into_task).collect()
    }
}

/// Row image of a daily task; dates convert outside the row closure so parse
/// failures surface as [`StorageError::Reconstruction`].
struct RawTask {
    id: String,
    date: String,
    roadmap_id: String,
    roadmap_title: String,
    node_id: String,
    node_title: String,
    description: String,
    points: u32,
    completed: bool,
    completed_at_ms: Option<i64>,
}

impl RawTask {
    fn into_task(self) -> Result<DailyTask, StorageError> {
        Ok(DailyTask {
            date: SqliteStore::parse_date(&self.date)?,
            id: self.id,
            roadmap_id: RoadmapId::new(self.roadmap_id),
            roadmap_title: self.roadmap_title,
            node_id: TopicId::new(self.node_id),
            node_title: self.node_title,
            description: self.description,
            points: self.points,
            completed: self.completed,
            completed_at_ms: self.completed_at_ms.map(|ms| ms as u64),
        })
    }
}

impl ProgressStore for SqliteStore {
    fn insert_roadmap(
        &mut self,
        roadmap: &Roadmap,
        tree: &[TopicNode],
    ) -> Result<(), StorageError> {
        validate_forest(tree)?;

        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM roadmaps WHERE id = ?1)",
            params![roadmap.id.as_str()],
            |row| row.get(0),
        )?;
        if exists {
            return Err(StorageError::DuplicateRoadmap {
                id: roadmap.id.clone(),
            });
        }

        let tree_json = serde_json::to_string(tree)?;
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO roadmaps (id, title, description, level, recommended, position) \
             VALUES (?1, ?2, ?3, ?4, ?5, (SELECT COUNT(*) FROM roadmaps))",
            params![
                roadmap.id.as_str(),
                roadmap.title,
                roadmap.description,
                roadmap.level.as_str(),
                roadmap.recommended,
            ],
        )?;
        tx.execute(
            "INSERT INTO roadmap_trees (roadmap_id, tree_json) VALUES (?1, ?2)",
            params![roadmap.id.as_str(), tree_json],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_roadmap(&self, id: &RoadmapId) -> Result<Roadmap, StorageError> {
        self.conn
            .query_row(
                "SELECT id, title, description, level, recommended FROM roadmaps WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    Ok(Roadmap {
                        id: RoadmapId::new(row.get::<_, String>(0)?),
                        title: row.get(1)?,
                        description: row.get(2)?,
                        level: Self::str_to_level(&row.get::<_, String>(3)?),
                        recommended: row.get(4)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| StorageError::RoadmapNotFound { id: id.clone() })
    }

    fn get_tree(&self, id: &RoadmapId) -> Result<Vec<TopicNode>, StorageError> {
        let tree_json: Option<String> = self
            .conn
            .query_row(
                "SELECT tree_json FROM roadmap_trees WHERE roadmap_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match tree_json {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(StorageError::RoadmapNotFound { id: id.clone() }),
        }
    }

    fn list_roadmaps(&self) -> Result<Vec<RoadmapSummary>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT r.id, r.title, r.level, r.recommended, t.tree_json \
             FROM roadmaps r JOIN roadmap_trees t ON t.roadmap_id = r.id \
             ORDER BY r.position",
        )?;
        let rows: Vec<(String, String, String, bool, String)> = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?
            .collect::<Result<_, _>>()?;

        let mut summaries = Vec::with_capacity(rows.len());
        for (id, title, level, recommended, tree_json) in rows {
            let tree: Vec<TopicNode> = serde_json::from_str(&tree_json)?;
            summaries.push(RoadmapSummary {
                id: RoadmapId::new(id),
                title,
                level: Self::str_to_level(&level),
                recommended,
                total_topics: count_leaf_topics(&tree),
            });
        }
        Ok(summaries)
    }

    fn insert_assessment(&mut self, assessment: &RoadmapAssessment) -> Result<(), StorageError> {
        self.assert_roadmap_exists(&assessment.roadmap_id)?;
        let assessment_json = serde_json::to_string(assessment)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO assessments (roadmap_id, assessment_json) VALUES (?1, ?2)",
            params![assessment.roadmap_id.as_str(), assessment_json],
        )?;
        Ok(())
    }

    fn get_assessment(&self, id: &RoadmapId) -> Result<RoadmapAssessment, StorageError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT assessment_json FROM assessments WHERE roadmap_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(StorageError::AssessmentNotFound { id: id.clone() }),
        }
    }

    fn record_result(
        &mut self,
        topic: &TopicId,
        result: &TopicResult,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO topic_results (topic_id, score, passed, updated_at_ms) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                topic.as_str(),
                result.score,
                result.passed,
                result.updated_at_ms as i64,
            ],
        )?;
        Ok(())
    }

    fn get_result(&self, topic: &TopicId) -> Result<Option<TopicResult>, StorageError> {
        let result = self
            .conn
            .query_row(
                "SELECT score, passed, updated_at_ms FROM topic_results WHERE topic_id = ?1",
                params![topic.as_str()],
                |row| {
                    Ok(TopicResult {
                        score: row.get(0)?,
                        passed: row.get(1)?,
                        updated_at_ms: row.get::<_, i64>(2)? as u64,
                    })
                },
            )
            .optional()?;
        Ok(result)
    }

    fn all_results(&self) -> Result<BTreeMap<TopicId, TopicResult>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT topic_id, score, passed, updated_at_ms FROM topic_results ORDER BY topic_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                TopicId::new(row.get::<_, String>(0)?),
                TopicResult {
                    score: row.get(1)?,
                    passed: row.get(2)?,
                    updated_at_ms: row.get::<_, i64>(3)? as u64,
                },
            ))
        })?;

        let mut results = BTreeMap::new();
        for row in rows {
            let (topic, result) = row?;
            results.insert(topic, result);
        }
        Ok(results)
    }

    fn collection(&self) -> Result<Vec<RoadmapId>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT roadmap_id FROM collection ORDER BY position")?;
        let ids = stmt
            .query_map([], |row| Ok(RoadmapId::new(row.get::<_, String>(0)?)))?
            .collect::<Result<_, _>>()?;
        Ok(ids)
    }

    fn set_collection(&mut self, ids: &[RoadmapId]) -> Result<Vec<RoadmapId>, StorageError> {
        let mut deduped: Vec<&RoadmapId> = Vec::new();
        for id in ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM collection", [])?;
        {
            let mut stmt = tx
                .prepare_cached("INSERT INTO collection (roadmap_id, position) VALUES (?1, ?2)")?;
            for (position, id) in deduped.iter().enumerate() {
                stmt.execute(params![id.as_str(), position as i64])?;
            }
        }
        tx.commit()?;

        self.collection()
    }

    fn remove_from_collection(&mut self, id: &RoadmapId) -> Result<Vec<RoadmapId>, StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM collection WHERE roadmap_id = ?1",
            params![id.as_str()],
        )?;
        tx.execute(
            "DELETE FROM levels WHERE roadmap_id = ?1",
            params![id.as_str()],
        )?;
        tx.execute(
            "DELETE FROM roadmap_progress WHERE roadmap_id = ?1",
            params![id.as_str()],
        )?;
        tx.commit()?;

        self.collection()
    }

    fn set_level(&mut self, id: &RoadmapId, level: RoadmapLevel) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO levels (roadmap_id, level) VALUES (?1, ?2)",
            params![id.as_str(), level.as_str()],
        )?;
        Ok(())
    }

    fn get_level(&self, id: &RoadmapId) -> Result<Option<RoadmapLevel>, StorageError> {
        let level: Option<String> = self
            .conn
            .query_row(
                "SELECT level FROM levels WHERE roadmap_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(level.as_deref().map(Self::str_to_level))
    }

    fn upsert_progress(&mut self, progress: &RoadmapProgress) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO roadmap_progress \
             (roadmap_id, completion_percent, completed_topics, total_topics) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                progress.roadmap_id.as_str(),
                progress.completion_percent,
                progress.completed_topics,
                progress.total_topics,
            ],
        )?;
        Ok(())
    }

    fn get_progress(&self, id: &RoadmapId) -> Result<Option<RoadmapProgress>, StorageError> {
        let progress = self
            .conn
            .query_row(
                "SELECT completion_percent, completed_topics, total_topics \
                 FROM roadmap_progress WHERE roadmap_id = ?1",
                params![id.as_str()],
                |row| {
                    Ok(RoadmapProgress {
                        roadmap_id: id.clone(),
                        completion_percent: row.get(0)?,
                        completed_topics: row.get(1)?,
                        total_topics: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(progress)
    }

    fn list_progress(&self) -> Result<Vec<RoadmapProgress>, StorageError> {
        // Catalog order keeps listings deterministic; summaries for roadmaps
        // no longer in the catalog are not listed.
        let mut stmt = self.conn.prepare_cached(
            "SELECT p.roadmap_id, p.completion_percent, p.completed_topics, p.total_topics \
             FROM roadmap_progress p JOIN roadmaps r ON r.id = p.roadmap_id \
             ORDER BY r.position",
        )?;
        let items = stmt
            .query_map([], |row| {
                Ok(RoadmapProgress {
                    roadmap_id: RoadmapId::new(row.get::<_, String>(0)?),
                    completion_percent: row.get(1)?,
                    completed_topics: row.get(2)?,
                    total_topics: row.get(3)?,
                })
            })?
            .collect::<Result<_, _>>()?;
        Ok(items)
    }

    fn save_daily_tasks(
        &mut self,
        date: NaiveDate,
        tasks: &[DailyTask],
    ) -> Result<(), StorageError> {
        let date_text = date.to_string();
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM daily_tasks WHERE date = ?1",
            params![date_text],
        )?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO daily_tasks \
                 (id, date, roadmap_id, roadmap_title, node_id, node_title, description, \
                  points, completed, completed_at_ms) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for task in tasks {
                stmt.execute(params![
                    task.id,
                    task.date.to_string(),
                    task.roadmap_id.as_str(),
                    task.roadmap_title,
                    task.node_id.as_str(),
                    task.node_title,
                    task.description,
                    task.points,
                    task.completed,
                    task.completed_at_ms.map(|ms| ms as i64),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn daily_tasks(&self, date: NaiveDate) -> Result<Vec<DailyTask>, StorageError> {
        self.load_tasks(
            "SELECT id, date, roadmap_id, roadmap_title, node_id, node_title, description, \
             points, completed, completed_at_ms \
             FROM daily_tasks WHERE date = ?1 ORDER BY rowid",
            &date.to_string(),
        )
    }

    fn complete_daily_task(
        &mut self,
        task_id: &str,
        completed_at_ms: u64,
    ) -> Result<DailyTask, StorageError> {
        let changed = self.conn.execute(
            "UPDATE daily_tasks SET completed = 1, completed_at_ms = ?2 WHERE id = ?1",
            params![task_id, completed_at_ms as i64],
        )?;
        if changed == 0 {
            return Err(StorageError::TaskNotFound {
                id: task_id.to_string(),
            });
        }

        let mut tasks = self.load_tasks(
            "SELECT id, date, roadmap_id, roadmap_title, node_id, node_title, description, \
             points, completed, completed_at_ms \
             FROM daily_tasks WHERE id = ?1",
            task_id,
        )?;
        tasks.pop().ok_or_else(|| StorageError::TaskNotFound {
            id: task_id.to_string(),
        })
    }

    fn fingerprints(&self) -> Result<HashMap<RoadmapId, String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT roadmap_id, fingerprint FROM fingerprints")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                RoadmapId::new(row.get::<_, String>(0)?),
                row.get::<_, String>(1)?,
            ))
        })?;

        let mut fingerprints = HashMap::new();
        for row in rows {
            let (id, fingerprint) = row?;
            fingerprints.insert(id, fingerprint);
        }
        Ok(fingerprints)
    }

    fn set_fingerprint(&mut self, id: &RoadmapId, fingerprint: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO fingerprints (roadmap_id, fingerprint) VALUES (?1, ?2)",
            params![id.as_str(), fingerprint],
        )?;
        Ok(())
    }
}
