use chrono::Utc;
use rusqlite::OptionalExtension as _;

use hospital_core::{
  Id,
  patient::{NewPatient, Patient, PatientChanges},
  store::{PatientStore, Repository},
};

use super::SqliteStore;
use crate::{
  Error, Result,
  encode::{PATIENT_COLUMNS, RawPatient, encode_dt, encode_ids},
};

fn select_one(
  conn: &rusqlite::Connection,
  column: &str,
  value: impl rusqlite::ToSql,
) -> rusqlite::Result<Option<RawPatient>> {
  conn
    .query_row(
      &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE {column} = ?1"),
      [value],
      RawPatient::from_row,
    )
    .optional()
}

impl Repository<Patient> for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewPatient) -> Result<Patient> {
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);

    let patient = self
      .call(move |conn| {
        conn.execute(
          "INSERT INTO patients (
             email, name, surname, patronymic, age, gender,
             phone_number, address, password, policy_number,
             disease_ids, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, '[]', ?11)",
          rusqlite::params![
            input.email,
            input.name,
            input.surname,
            input.patronymic,
            input.age,
            input.gender,
            input.phone_number,
            input.address,
            input.password_hash,
            input.policy_number,
            at_str,
          ],
        )?;
        Ok(Patient {
          id:            conn.last_insert_rowid(),
          email:         input.email,
          name:          input.name,
          surname:       input.surname,
          patronymic:    input.patronymic,
          age:           input.age,
          gender:        input.gender,
          phone_number:  input.phone_number,
          address:       input.address,
          password_hash: input.password_hash,
          policy_number: input.policy_number,
          disease_ids:   Vec::new(),
          created_at,
        })
      })
      .await?;

    tracing::debug!(id = patient.id, "patient row inserted");
    Ok(patient)
  }

  async fn get(&self, id: Id) -> Result<Option<Patient>> {
    let raw = self
      .call(move |conn| Ok(select_one(conn, "id", id)?))
      .await?;
    raw.map(RawPatient::into_patient).transpose()
  }

  async fn list(&self) -> Result<Vec<Patient>> {
    let raws: Vec<RawPatient> = self
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawPatient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawPatient::into_patient).collect()
  }

  async fn update(&self, id: Id, changes: PatientChanges) -> Result<Option<Patient>> {
    let disease_ids = encode_ids(&changes.disease_ids)?;

    // `created_at` is never touched.
    let raw = self
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE patients SET
             email = ?2, name = ?3, surname = ?4, patronymic = ?5, age = ?6,
             gender = ?7, phone_number = ?8, address = ?9, password = ?10,
             policy_number = ?11, disease_ids = ?12
           WHERE id = ?1",
          rusqlite::params![
            id,
            changes.email,
            changes.name,
            changes.surname,
            changes.patronymic,
            changes.age,
            changes.gender,
            changes.phone_number,
            changes.address,
            changes.password_hash,
            changes.policy_number,
            disease_ids,
          ],
        )?;
        if updated == 0 {
          return Ok(None);
        }
        Ok(select_one(conn, "id", id)?)
      })
      .await?;
    raw.map(RawPatient::into_patient).transpose()
  }

  async fn delete(&self, id: Id) -> Result<bool> {
    self
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM patients WHERE id = ?1", [id])? > 0)
      })
      .await
  }
}

impl PatientStore for SqliteStore {
  async fn find_by_email<'a>(&'a self, email: &'a str) -> Result<Option<Patient>> {
    let email = email.to_owned();
    let raw = self
      .call(move |conn| Ok(select_one(conn, "email", email)?))
      .await?;
    raw.map(RawPatient::into_patient).transpose()
  }

  async fn find_by_policy_number<'a>(
    &'a self,
    policy_number: &'a str,
  ) -> Result<Option<Patient>> {
    let policy_number = policy_number.to_owned();
    let raw = self
      .call(move |conn| Ok(select_one(conn, "policy_number", policy_number)?))
      .await?;
    raw.map(RawPatient::into_patient).transpose()
  }
}
