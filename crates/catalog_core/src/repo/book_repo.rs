//! Book repository and SQLite implementation.

use super::links::{self, BOOK_LANGUAGES};
use super::position::{self, OrderedTable};
use super::{ensure_connection_ready, parse_uuid, CatalogRepository, RepoError, RepoResult};
use crate::model::book::Book;
use crate::model::{CatalogId, Scope};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

pub(crate) const BOOKS: OrderedTable = OrderedTable::root("books", "book");

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    czech_name,
    original_name,
    note,
    position
FROM books";

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["books", "book_languages"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteBookRepository<'_> {
    type Entity = Book;

    fn insert(&self, book: &Book) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO books (id, czech_name, original_name, note, position)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                book.id.to_string(),
                book.czech_name.as_str(),
                book.original_name.as_str(),
                book.note.as_str(),
                book.position,
            ],
        )?;
        links::replace_languages(&tx, &BOOK_LANGUAGES, book.id, &book.languages)?;
        tx.commit()?;
        Ok(())
    }

    fn update(&self, book: &Book) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE books
             SET
                czech_name = ?2,
                original_name = ?3,
                note = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                book.id.to_string(),
                book.czech_name.as_str(),
                book.original_name.as_str(),
                book.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: BOOKS.label,
                id: book.id,
            });
        }
        links::replace_languages(&tx, &BOOK_LANGUAGES, book.id, &book.languages)?;
        tx.commit()?;
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let mut book = parse_book_row(row)?;
            book.languages = links::load_languages(self.conn, &BOOK_LANGUAGES, book.id)?;
            return Ok(Some(book));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Book>> {
        BOOKS.scope_filter(scope)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY position ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        for book in &mut books {
            book.languages = links::load_languages(self.conn, &BOOK_LANGUAGES, book.id)?;
        }
        Ok(books)
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &BOOKS, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &BOOKS)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &BOOKS, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &BOOKS, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &BOOKS, ordered)
    }

    fn duplicate(&self, source: &Book, position: i64) -> RepoResult<Book> {
        let copy = Book {
            id: Uuid::new_v4(),
            position,
            ..source.clone()
        };
        self.insert(&copy)?;
        Ok(copy)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id_text: String = row.get("id")?;
    Ok(Book {
        id: parse_uuid(&id_text, "books.id")?,
        czech_name: row.get("czech_name")?,
        original_name: row.get("original_name")?,
        languages: Vec::new(),
        note: row.get("note")?,
        position: row.get("position")?,
    })
}
