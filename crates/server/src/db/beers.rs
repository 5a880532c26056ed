//! Database operations for beers.
//!
//! Every mutation is a single `UPDATE ... RETURNING` statement, so concurrent
//! requests against the same beer are serialized by `SQLite` itself and each
//! caller sees the row exactly as its own statement left it. Mutations on an
//! unknown ID return [`RepositoryError::NotFound`].
//!
//! Every write also takes the next `revision`, a table-wide counter that gives
//! a strict recency order even when two writes share an `updated_at`.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use taplist_core::BeerId;

use super::RepositoryError;
use crate::models::{Beer, BeerChanges, NewBeer, PourOutcome};

/// Columns selected for a full beer row.
const BEER_COLUMNS: &str = "id, tap_number, name, description, abv, style, brewery, image_path, \
     pints_remaining, pints_total, is_draft, is_active, created_at, updated_at";

/// Next value of the table-wide write counter.
const NEXT_REVISION: &str = "(SELECT COALESCE(MAX(revision), 0) + 1 FROM beers)";

/// SET clause stamping a write with the current time and the next revision.
const TOUCH: &str = "updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now'), \
     revision = (SELECT COALESCE(MAX(revision), 0) + 1 FROM beers)";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for beer queries.
#[derive(Debug, sqlx::FromRow)]
struct BeerRow {
    id: i64,
    tap_number: i64,
    name: String,
    description: String,
    abv: f64,
    style: String,
    brewery: String,
    image_path: String,
    pints_remaining: f64,
    pints_total: f64,
    is_draft: bool,
    is_active: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<BeerRow> for Beer {
    fn from(row: BeerRow) -> Self {
        Self {
            id: BeerId::new(row.id),
            tap_number: row.tap_number,
            name: row.name,
            description: row.description,
            abv: row.abv,
            style: row.style,
            brewery: row.brewery,
            image_path: row.image_path,
            pints_remaining: row.pints_remaining,
            pints_total: row.pints_total,
            is_draft: row.is_draft,
            is_active: row.is_active,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

/// Internal row type for pour results.
#[derive(Debug, sqlx::FromRow)]
struct PourRow {
    id: i64,
    name: String,
    pints_remaining: f64,
    pints_total: f64,
}

impl From<PourRow> for PourOutcome {
    fn from(row: PourRow) -> Self {
        Self {
            id: BeerId::new(row.id),
            name: row.name,
            pints_remaining: row.pints_remaining,
            pints_total: row.pints_total,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for beer database operations.
pub struct BeerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BeerRepository<'a> {
    /// Create a new beer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get a beer by ID, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        let sql = format!("SELECT {BEER_COLUMNS} FROM beers WHERE id = ?");
        let row = sqlx::query_as::<_, BeerRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Beers currently on tap, by tap number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_on_tap(&self) -> Result<Vec<Beer>, RepositoryError> {
        self.list_where("is_active = 1 AND is_draft = 0", "tap_number ASC, id ASC")
            .await
    }

    /// All live beers (drafts included), by tap number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Beer>, RepositoryError> {
        self.list_where("is_active = 1", "tap_number ASC, id ASC")
            .await
    }

    /// Live drafts, most recently changed first.
    ///
    /// Ordered by `revision`, so writes within the same millisecond still
    /// sort in the order they happened.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_drafts(&self) -> Result<Vec<Beer>, RepositoryError> {
        self.list_where("is_active = 1 AND is_draft = 1", "revision DESC")
            .await
    }

    async fn list_where(&self, filter: &str, order: &str) -> Result<Vec<Beer>, RepositoryError> {
        let sql = format!("SELECT {BEER_COLUMNS} FROM beers WHERE {filter} ORDER BY {order}");
        let rows = sqlx::query_as::<_, BeerRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a beer with a full keg.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &NewBeer) -> Result<Beer, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO beers (
                tap_number, name, description, abv, style, brewery, image_path,
                is_draft, pints_remaining, pints_total, revision
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, {NEXT_REVISION})
            RETURNING {BEER_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, BeerRow>(&sql)
            .bind(input.tap_number)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.abv)
            .bind(&input.style)
            .bind(&input.brewery)
            .bind(&input.image_path)
            .bind(input.is_draft)
            .bind(input.pints_total)
            .bind(input.pints_total)
            .fetch_one(self.pool)
            .await?;

        Ok(row.into())
    }

    /// Apply an admin edit.
    ///
    /// Keg-swap policy: when the resolved total differs from the stored one,
    /// remaining is reset to the new total; otherwise remaining is kept.
    /// `SQLite` evaluates every SET expression against the pre-update row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the beer does not exist, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn update(&self, id: BeerId, changes: &BeerChanges) -> Result<Beer, RepositoryError> {
        let sql = format!(
            r"
            UPDATE beers SET
                tap_number = ?,
                name = ?,
                description = ?,
                abv = ?,
                style = ?,
                brewery = ?,
                is_draft = ?,
                image_path = COALESCE(?, image_path),
                pints_remaining = CASE
                    WHEN COALESCE(?, pints_total) <> pints_total THEN COALESCE(?, pints_total)
                    ELSE pints_remaining
                END,
                pints_total = COALESCE(?, pints_total),
                {TOUCH}
            WHERE id = ?
            RETURNING {BEER_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, BeerRow>(&sql)
            .bind(changes.tap_number)
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(changes.abv)
            .bind(&changes.style)
            .bind(&changes.brewery)
            .bind(changes.is_draft)
            .bind(changes.image_path.as_deref())
            .bind(changes.pints_total)
            .bind(changes.pints_total)
            .bind(changes.pints_total)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Soft-delete a beer. Repeating it is harmless.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the beer does not exist, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn soft_delete(&self, id: BeerId) -> Result<Beer, RepositoryError> {
        self.mutate("is_active = 0", "id = ?", id).await
    }

    /// Put a draft on tap with a full keg.
    ///
    /// Archived beers are not touched and report `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no live beer has this ID, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn activate(&self, id: BeerId) -> Result<Beer, RepositoryError> {
        self.mutate(
            "is_draft = 0, pints_remaining = pints_total",
            "id = ? AND is_active = 1",
            id,
        )
        .await
    }

    /// Move a beer back to drafts. Pint counts are untouched.
    ///
    /// Archived beers are not touched and report `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no live beer has this ID, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn to_draft(&self, id: BeerId) -> Result<Beer, RepositoryError> {
        self.mutate("is_draft = 1", "id = ? AND is_active = 1", id)
            .await
    }

    /// Mark a fresh keg tapped: remaining back to total.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the beer does not exist, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn reset_pints(&self, id: BeerId) -> Result<Beer, RepositoryError> {
        self.mutate("pints_remaining = pints_total", "id = ?", id)
            .await
    }

    /// Pour `amount` pints, clamping remaining at zero.
    ///
    /// `amount` should already be resolved with `taplist_core::keg::pour_amount`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the beer does not exist, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn pour(&self, id: BeerId, amount: f64) -> Result<PourOutcome, RepositoryError> {
        let sql = format!(
            r"
            UPDATE beers SET
                pints_remaining = MAX(0.0, pints_remaining - ?),
                {TOUCH}
            WHERE id = ?
            RETURNING id, name, pints_remaining, pints_total
            "
        );
        let row = sqlx::query_as::<_, PourRow>(&sql)
            .bind(amount)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    async fn mutate(&self, set: &str, filter: &str, id: BeerId) -> Result<Beer, RepositoryError> {
        let sql =
            format!("UPDATE beers SET {set}, {TOUCH} WHERE {filter} RETURNING {BEER_COLUMNS}");
        let row = sqlx::query_as::<_, BeerRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }
}
