use rusqlite::OptionalExtension as _;

use hospital_core::{
  Id,
  doctor::{Doctor, NewDoctor},
  store::{DoctorStore, Repository},
};

use super::SqliteStore;
use crate::{
  Error, Result,
  encode::{DOCTOR_COLUMNS, doctor_from_row},
};

fn select_one(
  conn: &rusqlite::Connection,
  column: &str,
  value: Id,
) -> rusqlite::Result<Option<Doctor>> {
  conn
    .query_row(
      &format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE {column} = ?1"),
      [value],
      doctor_from_row,
    )
    .optional()
}

impl Repository<Doctor> for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewDoctor) -> Result<Doctor> {
    let doctor = self
      .call(move |conn| {
        conn.execute(
          "INSERT INTO doctors (
             name, surname, patronymic, image_id, gender, rating, age,
             available, specialization_id, portfolio_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            input.name,
            input.surname,
            input.patronymic,
            input.image_id,
            input.gender,
            f64::from(input.rating),
            input.age,
            input.available,
            input.specialization_id,
            input.portfolio_id,
          ],
        )?;
        Ok(Doctor {
          id:                conn.last_insert_rowid(),
          name:              input.name,
          surname:           input.surname,
          patronymic:        input.patronymic,
          image_id:          input.image_id,
          gender:            input.gender,
          rating:            input.rating,
          age:               input.age,
          available:         input.available,
          specialization_id: input.specialization_id,
          portfolio_id:      input.portfolio_id,
        })
      })
      .await?;

    tracing::debug!(id = doctor.id, "doctor row inserted");
    Ok(doctor)
  }

  async fn get(&self, id: Id) -> Result<Option<Doctor>> {
    self.call(move |conn| Ok(select_one(conn, "id", id)?)).await
  }

  async fn list(&self) -> Result<Vec<Doctor>> {
    self
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {DOCTOR_COLUMNS} FROM doctors ORDER BY id"))?;
        let rows = stmt
          .query_map([], doctor_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn update(&self, id: Id, changes: NewDoctor) -> Result<Option<Doctor>> {
    self
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE doctors SET
             name = ?2, surname = ?3, patronymic = ?4, image_id = ?5,
             gender = ?6, rating = ?7, age = ?8, available = ?9,
             specialization_id = ?10, portfolio_id = ?11
           WHERE id = ?1",
          rusqlite::params![
            id,
            changes.name,
            changes.surname,
            changes.patronymic,
            changes.image_id,
            changes.gender,
            f64::from(changes.rating),
            changes.age,
            changes.available,
            changes.specialization_id,
            changes.portfolio_id,
          ],
        )?;
        if updated == 0 {
          return Ok(None);
        }
        Ok(select_one(conn, "id", id)?)
      })
      .await
  }

  async fn delete(&self, id: Id) -> Result<bool> {
    self
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM doctors WHERE id = ?1", [id])? > 0)
      })
      .await
  }
}

impl DoctorStore for SqliteStore {
  async fn find_by_portfolio_id(&self, portfolio_id: Id) -> Result<Option<Doctor>> {
    self
      .call(move |conn| Ok(select_one(conn, "portfolio_id", portfolio_id)?))
      .await
  }

  async fn list_available(&self, specialization_id: Id) -> Result<Vec<Doctor>> {
    self
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DOCTOR_COLUMNS} FROM doctors
           WHERE specialization_id = ?1 AND available = 1
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([specialization_id], doctor_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }
}
