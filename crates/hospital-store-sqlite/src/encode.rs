//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Id lists are stored as
//! compact JSON arrays.

use chrono::{DateTime, Utc};
use hospital_core::{Id, doctor::Doctor, patient::Patient, record::Record};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Id lists ────────────────────────────────────────────────────────────────

pub fn encode_ids(ids: &[Id]) -> Result<String> {
  Ok(serde_json::to_string(ids)?)
}

pub fn decode_ids(s: &str) -> Result<Vec<Id>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawPatient::from_row`].
pub const PATIENT_COLUMNS: &str = "id, email, name, surname, patronymic, age, \
   gender, phone_number, address, password, policy_number, disease_ids, created_at";

/// Raw values read directly from a `patients` row.
pub struct RawPatient {
  pub id:            Id,
  pub email:         String,
  pub name:          String,
  pub surname:       String,
  pub patronymic:    Option<String>,
  pub age:           u8,
  pub gender:        String,
  pub phone_number:  Option<String>,
  pub address:       Option<String>,
  pub password:      String,
  pub policy_number: String,
  pub disease_ids:   String,
  pub created_at:    String,
}

impl RawPatient {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      email:         row.get(1)?,
      name:          row.get(2)?,
      surname:       row.get(3)?,
      patronymic:    row.get(4)?,
      age:           row.get(5)?,
      gender:        row.get(6)?,
      phone_number:  row.get(7)?,
      address:       row.get(8)?,
      password:      row.get(9)?,
      policy_number: row.get(10)?,
      disease_ids:   row.get(11)?,
      created_at:    row.get(12)?,
    })
  }

  pub fn into_patient(self) -> Result<Patient> {
    Ok(Patient {
      id:            self.id,
      email:         self.email,
      name:          self.name,
      surname:       self.surname,
      patronymic:    self.patronymic,
      age:           self.age,
      gender:        self.gender,
      phone_number:  self.phone_number,
      address:       self.address,
      password_hash: self.password,
      policy_number: self.policy_number,
      disease_ids:   decode_ids(&self.disease_ids)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`doctor_from_row`].
pub const DOCTOR_COLUMNS: &str = "id, name, surname, patronymic, image_id, \
   gender, rating, age, available, specialization_id, portfolio_id";

/// Doctors hold no encoded columns, so they decode in one step.
pub fn doctor_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Doctor> {
  let rating: f64 = row.get(6)?;
  Ok(Doctor {
    id:                row.get(0)?,
    name:              row.get(1)?,
    surname:           row.get(2)?,
    patronymic:        row.get(3)?,
    image_id:          row.get(4)?,
    gender:            row.get(5)?,
    rating:            rating as f32,
    age:               row.get(7)?,
    available:         row.get(8)?,
    specialization_id: row.get(9)?,
    portfolio_id:      row.get(10)?,
  })
}

/// Column list matching [`RawRecord::from_row`].
pub const RECORD_COLUMNS: &str = "id, hospital_address, doctor_office, tagging, \
   patient_id, doctor_id, specialization_id, time_record";

/// Raw values read directly from a `records` row.
pub struct RawRecord {
  pub id:                Id,
  pub hospital_address:  String,
  pub doctor_office:     String,
  pub tagging:           String,
  pub patient_id:        Id,
  pub doctor_id:         Id,
  pub specialization_id: Id,
  pub time_record:       String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      hospital_address:  row.get(1)?,
      doctor_office:     row.get(2)?,
      tagging:           row.get(3)?,
      patient_id:        row.get(4)?,
      doctor_id:         row.get(5)?,
      specialization_id: row.get(6)?,
      time_record:       row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<Record> {
    Ok(Record {
      id:                self.id,
      hospital_address:  self.hospital_address,
      doctor_office:     self.doctor_office,
      tagging:           self.tagging,
      patient_id:        self.patient_id,
      doctor_id:         self.doctor_id,
      specialization_id: self.specialization_id,
      time_record:       decode_dt(&self.time_record)?,
    })
  }
}
