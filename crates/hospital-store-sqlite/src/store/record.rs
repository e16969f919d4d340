use rusqlite::OptionalExtension as _;

use hospital_core::{
  Id,
  record::{NewRecord, Record},
  store::{RecordStore, Repository},
};

use super::SqliteStore;
use crate::{
  Error, Result,
  encode::{RECORD_COLUMNS, RawRecord, encode_dt},
};

fn select_one(conn: &rusqlite::Connection, id: Id) -> rusqlite::Result<Option<RawRecord>> {
  conn
    .query_row(
      &format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?1"),
      [id],
      RawRecord::from_row,
    )
    .optional()
}

/// Build the record as persisted once its id is known.
fn persisted(id: Id, input: NewRecord) -> Record {
  Record {
    id,
    hospital_address: input.hospital_address,
    doctor_office: input.doctor_office,
    tagging: input.tagging,
    patient_id: input.patient_id,
    doctor_id: input.doctor_id,
    specialization_id: input.specialization_id,
    time_record: input.time_record,
  }
}

impl Repository<Record> for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewRecord) -> Result<Record> {
    let time_str = encode_dt(input.time_record);

    let record = self
      .call(move |conn| {
        conn.execute(
          "INSERT INTO records (
             hospital_address, doctor_office, tagging,
             patient_id, doctor_id, specialization_id, time_record
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            input.hospital_address,
            input.doctor_office,
            input.tagging,
            input.patient_id,
            input.doctor_id,
            input.specialization_id,
            time_str,
          ],
        )?;
        Ok(persisted(conn.last_insert_rowid(), input))
      })
      .await?;

    tracing::debug!(id = record.id, "record row inserted");
    Ok(record)
  }

  async fn get(&self, id: Id) -> Result<Option<Record>> {
    let raw = self.call(move |conn| Ok(select_one(conn, id)?)).await?;
    raw.map(RawRecord::into_record).transpose()
  }

  async fn list(&self) -> Result<Vec<Record>> {
    let raws: Vec<RawRecord> = self
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {RECORD_COLUMNS} FROM records ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn update(&self, id: Id, changes: NewRecord) -> Result<Option<Record>> {
    let time_str = encode_dt(changes.time_record);

    let raw = self
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE records SET
             hospital_address = ?2, doctor_office = ?3, tagging = ?4,
             patient_id = ?5, doctor_id = ?6, specialization_id = ?7,
             time_record = ?8
           WHERE id = ?1",
          rusqlite::params![
            id,
            changes.hospital_address,
            changes.doctor_office,
            changes.tagging,
            changes.patient_id,
            changes.doctor_id,
            changes.specialization_id,
            time_str,
          ],
        )?;
        if updated == 0 {
          return Ok(None);
        }
        Ok(select_one(conn, id)?)
      })
      .await?;
    raw.map(RawRecord::into_record).transpose()
  }

  async fn delete(&self, id: Id) -> Result<bool> {
    self
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM records WHERE id = ?1", [id])? > 0)
      })
      .await
  }
}

impl RecordStore for SqliteStore {
  async fn list_by_patient(&self, patient_id: Id) -> Result<Vec<Record>> {
    let raws: Vec<RawRecord> = self
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM records
           WHERE patient_id = ?1
           ORDER BY time_record, id"
        ))?;
        let rows = stmt
          .query_map([patient_id], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn create_if_doctor_available(&self, input: NewRecord) -> Result<Option<Record>> {
    let time_str = encode_dt(input.time_record);

    // The availability read and the insert are one statement, so a doctor
    // flipped to unavailable concurrently can never gain a record.
    let record = self
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO records (
             hospital_address, doctor_office, tagging,
             patient_id, doctor_id, specialization_id, time_record
           )
           SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
           WHERE EXISTS (SELECT 1 FROM doctors WHERE id = ?5 AND available = 1)",
          rusqlite::params![
            input.hospital_address,
            input.doctor_office,
            input.tagging,
            input.patient_id,
            input.doctor_id,
            input.specialization_id,
            time_str,
          ],
        )?;
        if inserted == 0 {
          return Ok(None);
        }
        Ok(Some(persisted(conn.last_insert_rowid(), input)))
      })
      .await?;

    match &record {
      Some(r) => tracing::debug!(id = r.id, "record row inserted"),
      None => tracing::debug!("conditional record insert skipped"),
    }
    Ok(record)
  }
}
