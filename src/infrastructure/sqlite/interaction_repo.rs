use crate::domain::entities::interaction::Interaction;
use crate::domain::error::DomainError;
use crate::domain::ports::interaction_recorder::InteractionRecorder;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::Mutex;

const SELECT_COLS: &str = "id, user_query, extracted_symptoms, system_response, score, model_response, created_at";

pub struct SqliteInteractionRepo {
    conn: Mutex<Connection>,
}

impl SqliteInteractionRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_interaction(row: &rusqlite::Row) -> Result<Interaction, rusqlite::Error> {
        let created_str: String = row.get(6)?;
        Ok(Interaction {
            id: row.get(0)?,
            user_query: row.get(1)?,
            extracted_symptoms: row.get(2)?,
            system_response: row.get(3)?,
            score: row.get(4)?,
            model_response: row.get(5)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
                })?,
        })
    }
}

impl InteractionRecorder for SqliteInteractionRepo {
    fn record(&self, interaction: &Interaction) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO interactions (id, user_query, extracted_symptoms, system_response, score, model_response, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                interaction.id,
                interaction.user_query,
                interaction.extracted_symptoms,
                interaction.system_response,
                interaction.score,
                interaction.model_response,
                interaction.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to record interaction: {e}")))?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<Interaction>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!("SELECT {SELECT_COLS} FROM interactions ORDER BY created_at DESC, rowid DESC LIMIT ?1");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![limit as i64], Self::row_to_interaction)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(format!("Failed to read interaction: {e}")))
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM interactions", [], |r| r.get(0))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(count as usize)
    }
}
