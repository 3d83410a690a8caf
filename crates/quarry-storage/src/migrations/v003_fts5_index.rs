//! v003: FTS5 external-content index over chunk content, with sync triggers.

use rusqlite::Connection;

use quarry_core::errors::QuarryResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> QuarryResult<()> {
    conn.execute_batch(
        "
        CREATE VIRTUAL TABLE IF NOT EXISTS chunk_fts USING fts5(
            content,
            content='chunks',
            content_rowid='id',
            tokenize='unicode61 remove_diacritics 2'
        );

        CREATE TRIGGER IF NOT EXISTS chunk_fts_insert AFTER INSERT ON chunks BEGIN
            INSERT INTO chunk_fts(rowid, content) VALUES (new.id, new.content);
        END;

        CREATE TRIGGER IF NOT EXISTS chunk_fts_delete BEFORE DELETE ON chunks BEGIN
            INSERT INTO chunk_fts(chunk_fts, rowid, content)
            VALUES ('delete', old.id, old.content);
        END;

        CREATE TRIGGER IF NOT EXISTS chunk_fts_update AFTER UPDATE ON chunks BEGIN
            INSERT INTO chunk_fts(chunk_fts, rowid, content)
            VALUES ('delete', old.id, old.content);
            INSERT INTO chunk_fts(rowid, content) VALUES (new.id, new.content);
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
