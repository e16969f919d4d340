//! Reference data: portfolios, specializations and diseases. Plain CRUD with
//! no encoded columns.

use rusqlite::OptionalExtension as _;

use hospital_core::{
  Id,
  disease::{Disease, NewDisease},
  portfolio::{NewPortfolio, Portfolio},
  specialization::{NewSpecialization, Specialization},
  store::Repository,
};

use super::SqliteStore;
use crate::{Error, Result};

// ─── Portfolios ──────────────────────────────────────────────────────────────

fn portfolio_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Portfolio> {
  Ok(Portfolio {
    id:              row.get(0)?,
    education:       row.get(1)?,
    awards:          row.get(2)?,
    work_experience: row.get(3)?,
  })
}

impl Repository<Portfolio> for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewPortfolio) -> Result<Portfolio> {
    self
      .call(move |conn| {
        conn.execute(
          "INSERT INTO portfolios (education, awards, work_experience)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![input.education, input.awards, input.work_experience],
        )?;
        Ok(Portfolio {
          id:              conn.last_insert_rowid(),
          education:       input.education,
          awards:          input.awards,
          work_experience: input.work_experience,
        })
      })
      .await
  }

  async fn get(&self, id: Id) -> Result<Option<Portfolio>> {
    self
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, education, awards, work_experience FROM portfolios WHERE id = ?1",
            [id],
            portfolio_from_row,
          )
          .optional()?)
      })
      .await
  }

  async fn list(&self) -> Result<Vec<Portfolio>> {
    self
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, education, awards, work_experience FROM portfolios ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], portfolio_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn update(&self, id: Id, changes: NewPortfolio) -> Result<Option<Portfolio>> {
    self
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE portfolios SET education = ?2, awards = ?3, work_experience = ?4
           WHERE id = ?1",
          rusqlite::params![id, changes.education, changes.awards, changes.work_experience],
        )?;
        Ok((updated > 0).then(|| Portfolio {
          id,
          education: changes.education,
          awards: changes.awards,
          work_experience: changes.work_experience,
        }))
      })
      .await
  }

  async fn delete(&self, id: Id) -> Result<bool> {
    self
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM portfolios WHERE id = ?1", [id])? > 0)
      })
      .await
  }
}

// ─── Specializations ─────────────────────────────────────────────────────────

fn specialization_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Specialization> {
  Ok(Specialization { id: row.get(0)?, name: row.get(1)? })
}

impl Repository<Specialization> for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewSpecialization) -> Result<Specialization> {
    self
      .call(move |conn| {
        conn.execute("INSERT INTO specializations (name) VALUES (?1)", [&input.name])?;
        Ok(Specialization { id: conn.last_insert_rowid(), name: input.name })
      })
      .await
  }

  async fn get(&self, id: Id) -> Result<Option<Specialization>> {
    self
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, name FROM specializations WHERE id = ?1",
            [id],
            specialization_from_row,
          )
          .optional()?)
      })
      .await
  }

  async fn list(&self) -> Result<Vec<Specialization>> {
    self
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name FROM specializations ORDER BY id")?;
        let rows = stmt
          .query_map([], specialization_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn update(
    &self,
    id: Id,
    changes: NewSpecialization,
  ) -> Result<Option<Specialization>> {
    self
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE specializations SET name = ?2 WHERE id = ?1",
          rusqlite::params![id, changes.name],
        )?;
        Ok((updated > 0).then(|| Specialization { id, name: changes.name }))
      })
      .await
  }

  async fn delete(&self, id: Id) -> Result<bool> {
    self
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM specializations WHERE id = ?1", [id])? > 0)
      })
      .await
  }
}

// ─── Diseases ────────────────────────────────────────────────────────────────

fn disease_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Disease> {
  Ok(Disease {
    id:          row.get(0)?,
    body_part:   row.get(1)?,
    description: row.get(2)?,
  })
}

impl Repository<Disease> for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewDisease) -> Result<Disease> {
    self
      .call(move |conn| {
        conn.execute(
          "INSERT INTO diseases (body_part, description) VALUES (?1, ?2)",
          rusqlite::params![input.body_part, input.description],
        )?;
        Ok(Disease {
          id:          conn.last_insert_rowid(),
          body_part:   input.body_part,
          description: input.description,
        })
      })
      .await
  }

  async fn get(&self, id: Id) -> Result<Option<Disease>> {
    self
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, body_part, description FROM diseases WHERE id = ?1",
            [id],
            disease_from_row,
          )
          .optional()?)
      })
      .await
  }

  async fn list(&self) -> Result<Vec<Disease>> {
    self
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, body_part, description FROM diseases ORDER BY id")?;
        let rows = stmt
          .query_map([], disease_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn update(&self, id: Id, changes: NewDisease) -> Result<Option<Disease>> {
    self
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE diseases SET body_part = ?2, description = ?3 WHERE id = ?1",
          rusqlite::params![id, changes.body_part, changes.description],
        )?;
        Ok((updated > 0).then(|| Disease {
          id,
          body_part: changes.body_part,
          description: changes.description,
        }))
      })
      .await
  }

  async fn delete(&self, id: Id) -> Result<bool> {
    self
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM diseases WHERE id = ?1", [id])? > 0)
      })
      .await
  }
}
