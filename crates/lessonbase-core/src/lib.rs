#[cfg(test)]
mod tests;

use parking_lot::Mutex;
use rusqlite::{functions::FunctionFlags, params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::Arc};
use thiserror::Error;

// Search module (enabled with "search" feature)
#[cfg(feature = "search")]
pub mod search;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Message(String),
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Relational store holding modules, their content items and the glossary.
#[derive(Clone)]
pub struct ContentStore {
    base_root: PathBuf,
    db_path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub base_root: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvInfo {
    pub base_root: PathBuf,
    pub db_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub module_id: String,
    pub module_title: String,
    pub module_desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryRecord {
    pub index_id: i64,
    pub term: String,
    pub definition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub content_id: i64,
    pub parent_module: String,
    pub content_order: i64,
    pub content_type: ContentType,
    pub content: Option<String>,
    pub text: Option<String>,
}

/// Kind of a module content item, stored as a plain string column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Text,
    List,
    Quiz,
    Other(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Text => "text",
            ContentType::List => "list",
            ContentType::Quiz => "quiz",
            ContentType::Other(raw) => raw,
        }
    }
}

impl From<String> for ContentType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => ContentType::Text,
            "list" => ContentType::List,
            "quiz" => ContentType::Quiz,
            _ => ContentType::Other(raw),
        }
    }
}

impl From<ContentType> for String {
    fn from(kind: ContentType) -> Self {
        kind.as_str().to_string()
    }
}

/// Lower-case one character, keeping a single `char` so folded text stays
/// aligned with the original.
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Per-character case fold used on both sides of every substring match.
pub fn fold_case(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

const MODULE_COLUMNS: &str = "module_id, module_title, module_desc";
const CONTENT_COLUMNS: &str =
    "content_id, parent_module, content_order, content_type, content, text";
const GLOSSARY_COLUMNS: &str = "index_id, term, definition";

impl ContentStore {
    pub fn initialize(overrides: EnvOverrides) -> CoreResult<Self> {
        let base_root = overrides
            .base_root
            .or_else(|| env_path("LESSONBASE_ROOT"))
            .or_else(default_base_root)
            .ok_or_else(|| CoreError::Message("Unable to resolve user home directory".into()))?;
        let db_path = overrides
            .db_path
            .or_else(|| env_path("LESSONBASE_DB_PATH"))
            .unwrap_or_else(|| base_root.join("lessonbase.db"));

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        register_fold(&conn)?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS modules (
                module_id TEXT PRIMARY KEY,
                module_title TEXT NOT NULL,
                module_desc TEXT
            );

            CREATE TABLE IF NOT EXISTS module_data (
                content_id INTEGER PRIMARY KEY AUTOINCREMENT,
                parent_module TEXT NOT NULL,
                content_order INTEGER NOT NULL DEFAULT 0,
                content_type TEXT NOT NULL DEFAULT 'text',
                content TEXT,
                text TEXT
            );

            CREATE TABLE IF NOT EXISTS glossary (
                index_id INTEGER PRIMARY KEY AUTOINCREMENT,
                term TEXT NOT NULL,
                definition TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_module_data_parent ON module_data(parent_module);
            CREATE INDEX IF NOT EXISTS idx_glossary_term ON glossary(term);
        ",
        )?;

        Ok(Self {
            base_root,
            db_path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn env_info(&self) -> EnvInfo {
        EnvInfo {
            base_root: self.base_root.clone(),
            db_path: self.db_path.clone(),
        }
    }

    pub fn list_modules(&self) -> CoreResult<Vec<ModuleRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MODULE_COLUMNS} FROM modules ORDER BY module_id"
            ))?;
            let rows = stmt
                .query_map([], row_to_module)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_module(&self, module_id: &str) -> CoreResult<Option<ModuleRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MODULE_COLUMNS} FROM modules WHERE module_id = ?1"
            ))?;
            Ok(stmt.query_row([module_id], row_to_module).optional()?)
        })
    }

    /// Content items of one module in display order.
    pub fn module_content(&self, parent_module: &str) -> CoreResult<Vec<ContentRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTENT_COLUMNS} FROM module_data
                 WHERE parent_module = ?1 ORDER BY content_order, content_id"
            ))?;
            let rows = stmt
                .query_map([parent_module], row_to_content)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Glossary entries whose term starts with `prefix`, ordered by term.
    pub fn glossary_starting_with(&self, prefix: &str) -> CoreResult<Vec<GlossaryRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {GLOSSARY_COLUMNS} FROM glossary
                 WHERE fold(term) LIKE ?1 || '%' ORDER BY fold(term), term"
            ))?;
            let rows = stmt
                .query_map([fold_case(prefix)], row_to_glossary)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn find_modules(&self, term: &str) -> CoreResult<Vec<ModuleRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MODULE_COLUMNS} FROM modules
                 WHERE fold(module_title) LIKE '%' || ?1 || '%'
                    OR fold(module_desc) LIKE '%' || ?1 || '%'"
            ))?;
            let rows = stmt
                .query_map([fold_case(term)], row_to_module)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn find_module_content(&self, term: &str) -> CoreResult<Vec<ContentRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTENT_COLUMNS} FROM module_data
                 WHERE fold(content) LIKE '%' || ?1 || '%'
                    OR fold(text) LIKE '%' || ?1 || '%'"
            ))?;
            let rows = stmt
                .query_map([fold_case(term)], row_to_content)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn find_glossary_entries(&self, term: &str) -> CoreResult<Vec<GlossaryRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {GLOSSARY_COLUMNS} FROM glossary
                 WHERE fold(term) LIKE '%' || ?1 || '%'
                    OR fold(definition) LIKE '%' || ?1 || '%'"
            ))?;
            let rows = stmt
                .query_map([fold_case(term)], row_to_glossary)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn insert_module(
        &self,
        module_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> CoreResult<ModuleRecord> {
        let module_id = module_id.trim();
        if module_id.is_empty() {
            return Err(CoreError::Message("Module id is required.".into()));
        }
        if self.get_module(module_id)?.is_some() {
            return Err(CoreError::Message(format!(
                "Module \"{module_id}\" already exists."
            )));
        }
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO modules (module_id, module_title, module_desc) VALUES (?1, ?2, ?3)",
                params![module_id, title, description],
            )?;
            Ok(())
        })?;
        Ok(ModuleRecord {
            module_id: module_id.to_string(),
            module_title: title.to_string(),
            module_desc: description.map(str::to_string),
        })
    }

    pub fn insert_module_content(
        &self,
        parent_module: &str,
        content_order: i64,
        content_type: &ContentType,
        content: Option<&str>,
        text: Option<&str>,
    ) -> CoreResult<ContentRecord> {
        if parent_module.trim().is_empty() {
            return Err(CoreError::Message("Parent module is required.".into()));
        }
        let content_id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO module_data (parent_module, content_order, content_type, content, text)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![parent_module, content_order, content_type.as_str(), content, text],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        Ok(ContentRecord {
            content_id,
            parent_module: parent_module.to_string(),
            content_order,
            content_type: content_type.clone(),
            content: content.map(str::to_string),
            text: text.map(str::to_string),
        })
    }

    pub fn insert_glossary_entry(
        &self,
        term: &str,
        definition: Option<&str>,
    ) -> CoreResult<GlossaryRecord> {
        if term.trim().is_empty() {
            return Err(CoreError::Message("Glossary term is required.".into()));
        }
        let index_id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO glossary (term, definition) VALUES (?1, ?2)",
                params![term, definition],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        Ok(GlossaryRecord {
            index_id,
            term: term.to_string(),
            definition: definition.map(str::to_string),
        })
    }

    fn with_conn<F, T>(&self, action: F) -> CoreResult<T>
    where
        F: FnOnce(&Connection) -> CoreResult<T>,
    {
        let conn = self.conn.lock();
        action(&conn)
    }
}

fn row_to_module(row: &rusqlite::Row<'_>) -> rusqlite::Result<ModuleRecord> {
    Ok(ModuleRecord {
        module_id: row.get(0)?,
        module_title: row.get(1)?,
        module_desc: row.get(2)?,
    })
}

fn row_to_content(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentRecord> {
    Ok(ContentRecord {
        content_id: row.get(0)?,
        parent_module: row.get(1)?,
        content_order: row.get(2)?,
        content_type: ContentType::from(row.get::<_, String>(3)?),
        content: row.get(4)?,
        text: row.get(5)?,
    })
}

fn row_to_glossary(row: &rusqlite::Row<'_>) -> rusqlite::Result<GlossaryRecord> {
    Ok(GlossaryRecord {
        index_id: row.get(0)?,
        term: row.get(1)?,
        definition: row.get(2)?,
    })
}

/// `fold(text)` in SQL. `LIKE` alone only ignores ASCII case.
fn register_fold(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| fold_case(&t)))
        },
    )
}

fn default_base_root() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lessonbase"))
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key).ok().map(PathBuf::from)
}
