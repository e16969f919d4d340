//! Service-level scenarios over an in-memory SQLite store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use hospital_core::{
  Id,
  doctor::{Doctor, NewDoctor},
  patient::{NewPatient, Patient, PatientChanges},
  record::{NewRecord, Record},
  store::{DoctorStore, PatientStore, RecordStore, Repository, StoreError, UniqueField},
};
use hospital_store_sqlite::SqliteStore;

use crate::{
  AuthService, BookingService, DoctorService, Error, PatientService, PatientUpdate,
  Registration, TokenConfig, TokenIssuer, credential,
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn issuer() -> Arc<TokenIssuer> {
  Arc::new(TokenIssuer::new(&TokenConfig {
    access_secret:             "access-secret".into(),
    access_expiration_minutes: 15,
    refresh_secret:            "refresh-secret".into(),
    refresh_expiration_days:   30,
  }))
}

async fn store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.expect("in-memory store"))
}

fn registration(email: &str, policy_number: &str, password: &str) -> Registration {
  Registration {
    email:         email.into(),
    name:          "Maksim".into(),
    surname:       "Petrov".into(),
    patronymic:    None,
    age:           20,
    gender:        "male".into(),
    phone_number:  Some("85555555555".into()),
    address:       None,
    password:      password.into(),
    policy_number: policy_number.into(),
  }
}

fn new_doctor(portfolio_id: Id, available: bool) -> NewDoctor {
  NewDoctor {
    name: "Ivan".into(),
    surname: "Sidorov".into(),
    patronymic: None,
    image_id: 1,
    gender: "male".into(),
    rating: 4.5,
    age: 45,
    available,
    specialization_id: 1,
    portfolio_id,
  }
}

fn new_record(patient_id: Id, doctor_id: Id) -> NewRecord {
  NewRecord {
    hospital_address:  "Lenina 1".into(),
    doctor_office:     "204".into(),
    tagging:           "no food 3 hours before".into(),
    patient_id,
    doctor_id,
    specialization_id: 1,
    time_record:       Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
  }
}

fn update_from(r: &Registration, password: Option<&str>) -> PatientUpdate {
  PatientUpdate {
    email:         r.email.clone(),
    name:          r.name.clone(),
    surname:       r.surname.clone(),
    patronymic:    r.patronymic.clone(),
    age:           r.age,
    gender:        r.gender.clone(),
    phone_number:  r.phone_number.clone(),
    address:       r.address.clone(),
    password:      password.map(str::to_owned),
    policy_number: r.policy_number.clone(),
    disease_ids:   vec![],
  }
}

// ─── Registration & login ────────────────────────────────────────────────────

#[tokio::test]
async fn registration_uniqueness_scenario() {
  let s = store().await;
  let auth = AuthService::new(s.clone(), issuer());

  let pair = auth.register(registration("a@x.com", "111", "pw1")).await.unwrap();
  assert!(!pair.access_token.is_empty());
  assert!(!pair.refresh_token.is_empty());

  let err = auth.register(registration("a@x.com", "222", "pw2")).await.unwrap_err();
  assert!(matches!(err, Error::RepeatedEmail));

  let err = auth.register(registration("b@x.com", "111", "pw2")).await.unwrap_err();
  assert!(matches!(err, Error::RepeatedPolicyNumber));

  // Email is checked first when both collide.
  let err = auth.register(registration("a@x.com", "111", "pw2")).await.unwrap_err();
  assert!(matches!(err, Error::RepeatedEmail));

  assert_eq!(Repository::<Patient>::list(&*s).await.unwrap().len(), 1);
}

#[tokio::test]
async fn registered_password_is_stored_hashed() {
  let s = store().await;
  let auth = AuthService::new(s.clone(), issuer());
  auth.register(registration("a@x.com", "111", "pw1")).await.unwrap();

  let stored = s.find_by_email("a@x.com").await.unwrap().unwrap();
  assert_ne!(stored.password_hash, "pw1");
  assert!(credential::verify(&stored.password_hash, "pw1"));
}

#[tokio::test]
async fn login_by_email_and_policy_number() {
  let s = store().await;
  let tokens = issuer();
  let auth = AuthService::new(s, tokens.clone());
  auth.register(registration("a@x.com", "111", "pw1")).await.unwrap();

  let pair = auth.auth_by_email("a@x.com", "pw1").await.unwrap();
  let claims = tokens.verify_access(&pair.access_token).unwrap();
  assert_eq!(claims.user.email, "a@x.com");
  assert_eq!(claims.user.policy_number, "111");
  assert_eq!(tokens.verify_refresh(&pair.refresh_token).unwrap().id, claims.user.id);

  let pair = auth.auth_by_policy_number("111", "pw1").await.unwrap();
  assert_eq!(tokens.verify_access(&pair.access_token).unwrap().user.email, "a@x.com");
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
  let s = store().await;
  let auth = AuthService::new(s, issuer());
  auth.register(registration("a@x.com", "111", "pw1")).await.unwrap();

  for wrong in ["pw2", "", "PW1", "pw1 "] {
    assert!(matches!(
      auth.auth_by_email("a@x.com", wrong).await,
      Err(Error::InvalidCredentials)
    ));
    assert!(matches!(
      auth.auth_by_policy_number("111", wrong).await,
      Err(Error::InvalidCredentials)
    ));
  }
}

#[tokio::test]
async fn unknown_login_is_not_found() {
  let s = store().await;
  let auth = AuthService::new(s, issuer());

  assert!(matches!(
    auth.auth_by_email("nobody@x.com", "pw").await,
    Err(Error::NotFound("patient"))
  ));
  assert!(matches!(
    auth.auth_by_policy_number("999", "pw").await,
    Err(Error::NotFound("patient"))
  ));
}

#[tokio::test]
async fn malformed_registration_is_rejected_before_storage() {
  let s = store().await;
  let auth = AuthService::new(s.clone(), issuer());

  let err = auth.register(registration("not-an-email", "111", "pw")).await.unwrap_err();
  assert!(matches!(err, Error::Validation(hospital_core::Error::InvalidEmail(_))));

  let err = auth.register(registration("a@x.com", "111", "")).await.unwrap_err();
  assert!(matches!(err, Error::Validation(hospital_core::Error::EmptyField("password"))));

  assert!(Repository::<Patient>::list(&*s).await.unwrap().is_empty());
}

// ─── Refresh ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_issues_a_new_pair() {
  let s = store().await;
  let tokens = issuer();
  let auth = AuthService::new(s, tokens.clone());
  let first = auth.register(registration("a@x.com", "111", "pw1")).await.unwrap();

  let second = auth.refresh(&first.refresh_token).await.unwrap();
  let claims = tokens.verify_access(&second.access_token).unwrap();
  assert_eq!(claims.user.email, "a@x.com");
}

#[tokio::test]
async fn refresh_rejects_bad_tokens() {
  let s = store().await;
  let auth = AuthService::new(s, issuer());
  let pair = auth.register(registration("a@x.com", "111", "pw1")).await.unwrap();

  assert!(matches!(auth.refresh("garbage").await, Err(Error::InvalidCredentials)));
  assert!(matches!(
    auth.refresh(&pair.access_token).await,
    Err(Error::InvalidCredentials)
  ));
}

#[tokio::test]
async fn refresh_for_deleted_patient_is_not_found() {
  let s = store().await;
  let auth = AuthService::new(s.clone(), issuer());
  let pair = auth.register(registration("a@x.com", "111", "pw1")).await.unwrap();

  let id = s.find_by_email("a@x.com").await.unwrap().unwrap().id;
  Repository::<Patient>::delete(&*s, id).await.unwrap();

  assert!(matches!(
    auth.refresh(&pair.refresh_token).await,
    Err(Error::NotFound("patient"))
  ));
}

// ─── Patient administration ──────────────────────────────────────────────────

#[tokio::test]
async fn patient_update_rehashes_only_when_password_given() {
  let s = store().await;
  let patients = PatientService::new(s.clone());
  let reg = registration("a@x.com", "111", "pw1");
  let created = patients.create(reg.clone()).await.unwrap();

  let kept = patients.update(created.id, update_from(&reg, None)).await.unwrap();
  assert_eq!(kept.password_hash, created.password_hash);

  let changed = patients
    .update(created.id, update_from(&reg, Some("pw2")))
    .await
    .unwrap();
  assert!(credential::verify(&changed.password_hash, "pw2"));
  assert!(!credential::verify(&changed.password_hash, "pw1"));
}

#[tokio::test]
async fn patient_update_keeps_uniqueness() {
  let s = store().await;
  let patients = PatientService::new(s);
  let a = registration("a@x.com", "111", "pw");
  let b = registration("b@x.com", "222", "pw");
  patients.create(a.clone()).await.unwrap();
  let created_b = patients.create(b.clone()).await.unwrap();

  let mut steal_email = update_from(&b, None);
  steal_email.email = a.email.clone();
  assert!(matches!(
    patients.update(created_b.id, steal_email).await,
    Err(Error::RepeatedEmail)
  ));

  let mut steal_policy = update_from(&b, None);
  steal_policy.policy_number = a.policy_number.clone();
  assert!(matches!(
    patients.update(created_b.id, steal_policy).await,
    Err(Error::RepeatedPolicyNumber)
  ));

  // A patient's own values never collide with themselves.
  let mut own = update_from(&b, None);
  own.age = 30;
  assert_eq!(patients.update(created_b.id, own).await.unwrap().age, 30);
}

#[tokio::test]
async fn patient_get_and_update_missing() {
  let s = store().await;
  let patients = PatientService::new(s);
  let reg = registration("a@x.com", "111", "pw");

  assert!(matches!(patients.get(5).await, Err(Error::NotFound("patient"))));
  assert!(matches!(
    patients.update(5, update_from(&reg, None)).await,
    Err(Error::NotFound("patient"))
  ));
  assert!(matches!(
    patients.get(0).await,
    Err(Error::Validation(hospital_core::Error::InvalidId(0)))
  ));
}

// ─── Doctor administration ───────────────────────────────────────────────────

#[tokio::test]
async fn doctor_portfolio_is_unique() {
  let s = store().await;
  let doctors = DoctorService::new(s);
  let first = doctors.create(new_doctor(7, true)).await.unwrap();

  assert!(matches!(
    doctors.create(new_doctor(7, false)).await,
    Err(Error::RepeatedPortfolioId)
  ));

  // Updating a doctor while keeping their own portfolio is fine.
  let updated = doctors.update(first.id, new_doctor(7, false)).await.unwrap();
  assert!(!updated.available);

  let second = doctors.create(new_doctor(8, true)).await.unwrap();
  assert!(matches!(
    doctors.update(second.id, new_doctor(7, true)).await,
    Err(Error::RepeatedPortfolioId)
  ));
}

#[tokio::test]
async fn doctor_rating_is_bounded() {
  let s = store().await;
  let doctors = DoctorService::new(s);
  let mut input = new_doctor(1, true);
  input.rating = 7.0;
  assert!(matches!(
    doctors.create(input).await,
    Err(Error::Validation(hospital_core::Error::RatingOutOfRange(_)))
  ));
}

#[tokio::test]
async fn available_doctors_follow_the_flag() {
  let s = store().await;
  let doctors = DoctorService::new(s);
  let d = doctors.create(new_doctor(1, false)).await.unwrap();
  assert!(doctors.list_available(1).await.unwrap().is_empty());

  doctors.update(d.id, new_doctor(1, true)).await.unwrap();
  let available = doctors.list_available(1).await.unwrap();
  assert_eq!(available.iter().map(|d| d.id).collect::<Vec<_>>(), vec![d.id]);

  assert!(matches!(doctors.update(99, new_doctor(2, true)).await, Err(Error::NotFound("doctor"))));
}

// ─── Booking ─────────────────────────────────────────────────────────────────

async fn booking_fixture(available: bool) -> (Arc<SqliteStore>, Patient, Doctor) {
  let s = store().await;
  let patient = PatientService::new(s.clone())
    .create(registration("a@x.com", "111", "pw"))
    .await
    .unwrap();
  let doctor = DoctorService::new(s.clone())
    .create(new_doctor(1, available))
    .await
    .unwrap();
  (s, patient, doctor)
}

#[tokio::test]
async fn booking_is_gated_by_availability() {
  let (s, patient, doctor) = booking_fixture(false).await;
  let booking = BookingService::new(s.clone());
  let doctors = DoctorService::new(s.clone());

  let err = booking
    .create_record(new_record(patient.id, doctor.id))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DoctorNotAvailable));
  assert!(Repository::<Record>::list(&*s).await.unwrap().is_empty());

  doctors.update(doctor.id, new_doctor(1, true)).await.unwrap();

  let record = booking
    .create_record(new_record(patient.id, doctor.id))
    .await
    .unwrap();
  assert!(record.id >= 1);
  assert_eq!(record.doctor_id, doctor.id);
  assert_eq!(record.patient_id, patient.id);
  assert_eq!(record.specialization_id, 1);
  assert_eq!(Repository::<Record>::list(&*s).await.unwrap(), vec![record]);
}

#[tokio::test]
async fn booking_unknown_doctor_fails_closed() {
  let (s, patient, _) = booking_fixture(true).await;
  let booking = BookingService::new(s.clone());

  assert!(matches!(
    booking.create_record(new_record(patient.id, 404)).await,
    Err(Error::NotFound("doctor"))
  ));
  assert!(Repository::<Record>::list(&*s).await.unwrap().is_empty());
}

#[tokio::test]
async fn booking_unknown_patient_is_not_found() {
  let (s, patient, doctor) = booking_fixture(true).await;
  let booking = BookingService::new(s.clone());

  let err = booking.create_record(new_record(999, doctor.id)).await.unwrap_err();
  assert!(matches!(err, Error::NotFound("patient")));
  assert!(!err.is_unexpected());
  assert!(Repository::<Record>::list(&*s).await.unwrap().is_empty());

  let record = booking
    .create_record(new_record(patient.id, doctor.id))
    .await
    .unwrap();
  assert!(matches!(
    booking.update_record(record.id, new_record(999, doctor.id)).await,
    Err(Error::NotFound("patient"))
  ));
}

#[tokio::test]
async fn record_update_does_not_recheck_availability() {
  let (s, patient, doctor) = booking_fixture(true).await;
  let booking = BookingService::new(s.clone());
  let record = booking
    .create_record(new_record(patient.id, doctor.id))
    .await
    .unwrap();

  DoctorService::new(s.clone())
    .update(doctor.id, new_doctor(1, false))
    .await
    .unwrap();

  let mut changes = new_record(patient.id, doctor.id);
  changes.doctor_office = "305".into();
  let updated = booking.update_record(record.id, changes).await.unwrap();
  assert_eq!(updated.doctor_office, "305");

  assert!(matches!(
    booking.update_record(99, new_record(patient.id, doctor.id)).await,
    Err(Error::NotFound("record"))
  ));
}

#[tokio::test]
async fn records_are_listed_per_patient() {
  let (s, patient, doctor) = booking_fixture(true).await;
  let booking = BookingService::new(s);
  booking.create_record(new_record(patient.id, doctor.id)).await.unwrap();
  booking.create_record(new_record(patient.id, doctor.id)).await.unwrap();

  assert_eq!(booking.records_for_patient(patient.id).await.unwrap().len(), 2);
  assert!(booking.records_for_patient(patient.id + 1).await.unwrap().is_empty());
}

// ─── Failure propagation ─────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("connection reset")]
struct Broken;

impl StoreError for Broken {
  fn unique_violation(&self) -> Option<UniqueField> { None }
}

// Every call fails as if the database had gone away.
struct BrokenStore;

impl Repository<Patient> for BrokenStore {
  type Error = Broken;
  async fn create(&self, _: NewPatient) -> Result<Patient, Broken> { Err(Broken) }
  async fn get(&self, _: Id) -> Result<Option<Patient>, Broken> { Err(Broken) }
  async fn list(&self) -> Result<Vec<Patient>, Broken> { Err(Broken) }
  async fn update(&self, _: Id, _: PatientChanges) -> Result<Option<Patient>, Broken> {
    Err(Broken)
  }
  async fn delete(&self, _: Id) -> Result<bool, Broken> { Err(Broken) }
}

impl PatientStore for BrokenStore {
  async fn find_by_email<'a>(&'a self, _: &'a str) -> Result<Option<Patient>, Broken> {
    Err(Broken)
  }
  async fn find_by_policy_number<'a>(&'a self, _: &'a str) -> Result<Option<Patient>, Broken> {
    Err(Broken)
  }
}

impl Repository<Doctor> for BrokenStore {
  type Error = Broken;
  async fn create(&self, _: NewDoctor) -> Result<Doctor, Broken> { Err(Broken) }
  async fn get(&self, _: Id) -> Result<Option<Doctor>, Broken> { Err(Broken) }
  async fn list(&self) -> Result<Vec<Doctor>, Broken> { Err(Broken) }
  async fn update(&self, _: Id, _: NewDoctor) -> Result<Option<Doctor>, Broken> { Err(Broken) }
  async fn delete(&self, _: Id) -> Result<bool, Broken> { Err(Broken) }
}

impl DoctorStore for BrokenStore {
  async fn find_by_portfolio_id(&self, _: Id) -> Result<Option<Doctor>, Broken> { Err(Broken) }
  async fn list_available(&self, _: Id) -> Result<Vec<Doctor>, Broken> { Err(Broken) }
}

impl Repository<Record> for BrokenStore {
  type Error = Broken;
  async fn create(&self, _: NewRecord) -> Result<Record, Broken> { Err(Broken) }
  async fn get(&self, _: Id) -> Result<Option<Record>, Broken> { Err(Broken) }
  async fn list(&self) -> Result<Vec<Record>, Broken> { Err(Broken) }
  async fn update(&self, _: Id, _: NewRecord) -> Result<Option<Record>, Broken> { Err(Broken) }
  async fn delete(&self, _: Id) -> Result<bool, Broken> { Err(Broken) }
}

impl RecordStore for BrokenStore {
  async fn list_by_patient(&self, _: Id) -> Result<Vec<Record>, Broken> { Err(Broken) }
  async fn create_if_doctor_available(&self, _: NewRecord) -> Result<Option<Record>, Broken> {
    Err(Broken)
  }
}

// Reads see an available doctor and an existing patient, but the doctor is
// switched off before the conditional insert runs.
struct FlippedStore;

fn available_doctor(id: Id) -> Doctor {
  let d = new_doctor(1, true);
  Doctor {
    id,
    name: d.name,
    surname: d.surname,
    patronymic: d.patronymic,
    image_id: d.image_id,
    gender: d.gender,
    rating: d.rating,
    age: d.age,
    available: true,
    specialization_id: d.specialization_id,
    portfolio_id: d.portfolio_id,
  }
}

fn stored_patient(id: Id) -> Patient {
  Patient {
    id,
    email: "a@x.com".into(),
    name: "Maksim".into(),
    surname: "Petrov".into(),
    patronymic: None,
    age: 20,
    gender: "male".into(),
    phone_number: None,
    address: None,
    password_hash: "$argon2id$unused".into(),
    policy_number: "111".into(),
    disease_ids: vec![],
    created_at: Utc::now(),
  }
}

impl Repository<Patient> for FlippedStore {
  type Error = Broken;
  async fn create(&self, _: NewPatient) -> Result<Patient, Broken> { Err(Broken) }
  async fn get(&self, id: Id) -> Result<Option<Patient>, Broken> { Ok(Some(stored_patient(id))) }
  async fn list(&self) -> Result<Vec<Patient>, Broken> { Err(Broken) }
  async fn update(&self, _: Id, _: PatientChanges) -> Result<Option<Patient>, Broken> {
    Err(Broken)
  }
  async fn delete(&self, _: Id) -> Result<bool, Broken> { Err(Broken) }
}

impl PatientStore for FlippedStore {
  async fn find_by_email<'a>(&'a self, _: &'a str) -> Result<Option<Patient>, Broken> {
    Err(Broken)
  }
  async fn find_by_policy_number<'a>(&'a self, _: &'a str) -> Result<Option<Patient>, Broken> {
    Err(Broken)
  }
}

impl Repository<Doctor> for FlippedStore {
  type Error = Broken;
  async fn create(&self, _: NewDoctor) -> Result<Doctor, Broken> { Err(Broken) }
  async fn get(&self, id: Id) -> Result<Option<Doctor>, Broken> { Ok(Some(available_doctor(id))) }
  async fn list(&self) -> Result<Vec<Doctor>, Broken> { Err(Broken) }
  async fn update(&self, _: Id, _: NewDoctor) -> Result<Option<Doctor>, Broken> { Err(Broken) }
  async fn delete(&self, _: Id) -> Result<bool, Broken> { Err(Broken) }
}

impl DoctorStore for FlippedStore {
  async fn find_by_portfolio_id(&self, _: Id) -> Result<Option<Doctor>, Broken> { Err(Broken) }
  async fn list_available(&self, _: Id) -> Result<Vec<Doctor>, Broken> { Err(Broken) }
}

impl Repository<Record> for FlippedStore {
  type Error = Broken;
  async fn create(&self, _: NewRecord) -> Result<Record, Broken> { Err(Broken) }
  async fn get(&self, _: Id) -> Result<Option<Record>, Broken> { Err(Broken) }
  async fn list(&self) -> Result<Vec<Record>, Broken> { Err(Broken) }
  async fn update(&self, _: Id, _: NewRecord) -> Result<Option<Record>, Broken> { Err(Broken) }
  async fn delete(&self, _: Id) -> Result<bool, Broken> { Err(Broken) }
}

impl RecordStore for FlippedStore {
  async fn list_by_patient(&self, _: Id) -> Result<Vec<Record>, Broken> { Err(Broken) }
  async fn create_if_doctor_available(&self, _: NewRecord) -> Result<Option<Record>, Broken> {
    Ok(None)
  }
}

#[tokio::test]
async fn lookup_failures_propagate_as_unexpected() {
  let auth = AuthService::new(Arc::new(BrokenStore), issuer());

  let err = auth.register(registration("a@x.com", "111", "pw")).await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));
  assert!(err.is_unexpected());

  let err = auth.auth_by_email("a@x.com", "pw").await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));
  assert_eq!(err.to_string(), "storage error: connection reset");
}

#[tokio::test]
async fn booking_lookup_failures_propagate_as_unexpected() {
  let booking = BookingService::new(Arc::new(BrokenStore));

  let err = booking.create_record(new_record(1, 2)).await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));
  assert!(err.is_unexpected());

  let err = booking.update_record(1, new_record(1, 2)).await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));

  assert!(matches!(booking.records_for_patient(1).await, Err(Error::Store(_))));
}

#[tokio::test]
async fn availability_lost_before_insert_is_not_available() {
  let booking = BookingService::new(Arc::new(FlippedStore));

  let err = booking.create_record(new_record(1, 2)).await.unwrap_err();
  assert!(matches!(err, Error::DoctorNotAvailable));
  assert!(!err.is_unexpected());
}

#[test]
fn unique_backstops_map_to_repeated_kinds() {
  use hospital_store_sqlite::Error as StoreErr;

  assert!(matches!(
    Error::from_store(StoreErr::UniqueViolation(UniqueField::Email)),
    Error::RepeatedEmail
  ));
  assert!(matches!(
    Error::from_store(StoreErr::UniqueViolation(UniqueField::PolicyNumber)),
    Error::RepeatedPolicyNumber
  ));
  assert!(matches!(
    Error::from_store(StoreErr::UniqueViolation(UniqueField::PortfolioId)),
    Error::RepeatedPortfolioId
  ));
  assert!(!Error::RepeatedEmail.is_unexpected());
}
