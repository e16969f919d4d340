//! SQL schema for the hospital record SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS patients (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT    NOT NULL,
    name          TEXT    NOT NULL,
    surname       TEXT    NOT NULL,
    patronymic    TEXT,
    age           INTEGER NOT NULL,
    gender        TEXT    NOT NULL,
    phone_number  TEXT,
    address       TEXT,
    password      TEXT    NOT NULL,   -- argon2 PHC string, never plaintext
    policy_number TEXT    NOT NULL,
    disease_ids   TEXT    NOT NULL DEFAULT '[]',  -- JSON array of disease ids
    created_at    TEXT    NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- The authority of record for patient uniqueness; the service-level
-- lookups only shorten the common path.
CREATE UNIQUE INDEX IF NOT EXISTS patients_email_key         ON patients(email);
CREATE UNIQUE INDEX IF NOT EXISTS patients_policy_number_key ON patients(policy_number);

CREATE TABLE IF NOT EXISTS portfolios (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    education       TEXT    NOT NULL,
    awards          TEXT    NOT NULL DEFAULT '',
    work_experience INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS specializations (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS diseases (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    body_part   TEXT    NOT NULL,
    description TEXT    NOT NULL
);

-- Catalog ids (specialization, portfolio) are plain integers: doctors and
-- records may name catalog rows that have not been entered yet.
CREATE TABLE IF NOT EXISTS doctors (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT    NOT NULL,
    surname           TEXT    NOT NULL,
    patronymic        TEXT,
    image_id          INTEGER NOT NULL,
    gender            TEXT    NOT NULL,
    rating            REAL    NOT NULL,
    age               INTEGER NOT NULL,
    available         INTEGER NOT NULL,   -- 0 | 1
    specialization_id INTEGER NOT NULL,
    portfolio_id      INTEGER NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS doctors_portfolio_id_key ON doctors(portfolio_id);
CREATE INDEX IF NOT EXISTS doctors_specialization_idx      ON doctors(specialization_id);

CREATE TABLE IF NOT EXISTS records (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    hospital_address  TEXT    NOT NULL,
    doctor_office     TEXT    NOT NULL,
    tagging           TEXT    NOT NULL DEFAULT '',
    patient_id        INTEGER NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    doctor_id         INTEGER NOT NULL REFERENCES doctors(id)  ON DELETE CASCADE,
    specialization_id INTEGER NOT NULL,
    time_record       TEXT    NOT NULL    -- ISO 8601 UTC
);

CREATE INDEX IF NOT EXISTS records_patient_idx ON records(patient_id);

PRAGMA user_version = 1;
";
