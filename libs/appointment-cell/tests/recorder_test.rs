// libs/appointment-cell/tests/recorder_test.rs

mod common;

use std::fs;

use assert_matches::assert_matches;
use chrono::NaiveDate;

use appointment_cell::{
    record_file_name, AppointmentRecord, AppointmentRecorder, AppointmentRequest, StorageError,
};
use shared_utils::test_utils::TestConfig;

use common::{default_validator, fixed_now, fixed_today, valid_request};

fn accepted(request: AppointmentRequest) -> appointment_cell::AcceptedAppointment {
    default_validator().accept(request, fixed_today()).unwrap()
}

#[test]
fn test_file_name_uses_names_and_second_timestamp() {
    let id = record_file_name("Ivanov", "Ivan", fixed_now());
    assert_eq!(id.as_str(), "Ivanov_Ivan_20240115143022.json");

    let id = record_file_name("Петренко", "Олена", fixed_now());
    assert_eq!(id.to_string(), "Петренко_Олена_20240115143022.json");
}

#[test]
fn test_file_name_cannot_escape_storage_directory() {
    let id = record_file_name("../../etc", "pass\\wd:", fixed_now());
    assert_eq!(id.as_str(), ".._.._etc_pass_wd__20240115143022.json");
    assert!(!id.as_str().contains('/'));
}

#[test]
fn test_record_creates_directory_and_single_file() {
    let config = TestConfig::default();
    let recorder = AppointmentRecorder::new(config.appointments_dir());
    assert!(!config.appointments_dir().exists());

    let id = recorder
        .record_at(&accepted(valid_request(fixed_today())), fixed_now())
        .unwrap();

    assert_eq!(id.as_str(), "Петренко_Олена_20240115143022.json");
    let stored = config.stored_records();
    assert_eq!(stored, vec![recorder.record_path(&id)]);

    // Only the final file remains; the temporary file was renamed into place
    let entries = fs::read_dir(config.appointments_dir()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_record_round_trips_all_fields() {
    let config = TestConfig::default();
    let recorder = AppointmentRecorder::new(config.appointments_dir());
    let request = AppointmentRequest {
        email: "olena@example.com".to_string(),
        urgent: true,
        first_visit: false,
        ..valid_request(fixed_today())
    };

    let id = recorder.record_at(&accepted(request.clone()), fixed_now()).unwrap();
    let content = fs::read_to_string(recorder.record_path(&id)).unwrap();
    let record: AppointmentRecord = serde_json::from_str(&content).unwrap();

    assert_eq!(record.last_name, request.last_name);
    assert_eq!(record.first_name, request.first_name);
    assert_eq!(record.middle_name, request.middle_name);
    assert_eq!(Some(record.birth_date), request.birth_date);
    assert_eq!(record.phone, request.phone);
    assert_eq!(record.email, request.email);
    assert_eq!(record.department, request.department);
    assert_eq!(record.doctor, request.doctor);
    assert_eq!(Some(record.appointment_date), request.appointment_date);
    assert_eq!(record.appointment_time, request.appointment_time);
    assert!(record.urgent);
    assert!(!record.first_visit);
    assert_eq!(record.reason, request.reason);
    assert_eq!(record.created_at, fixed_now());
}

#[test]
fn test_record_json_layout() {
    let config = TestConfig::default();
    let recorder = AppointmentRecorder::new(config.appointments_dir());

    let id = recorder
        .record_at(&accepted(valid_request(fixed_today())), fixed_now())
        .unwrap();
    let content = fs::read_to_string(recorder.record_path(&id)).unwrap();

    // Pretty-printed with Cyrillic left unescaped
    assert!(content.contains("\n  \"doctor\": \"Сердечна В.П.\""));
    assert!(content.contains("\"appointment_time\": \"10:30\""));
    assert!(content.contains("\"birth_date\": \"1990-05-20\""));
    assert!(content.contains("\"appointment_date\": \"2024-01-16\""));
    assert!(content.contains("\"created_at\": \"2024-01-15T14:30:22\""));
    assert!(!content.contains("\\u"));
    assert!(!content.contains("consent"));

    let keys = [
        "last_name",
        "first_name",
        "middle_name",
        "birth_date",
        "phone",
        "email",
        "department",
        "doctor",
        "appointment_date",
        "appointment_time",
        "urgent",
        "first_visit",
        "reason",
        "created_at",
    ];
    let positions: Vec<usize> = keys
        .iter()
        .map(|key| {
            content
                .find(&format!("\n  \"{key}\":"))
                .unwrap_or_else(|| panic!("{key} missing from record"))
        })
        .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "record keys out of order: {positions:?}"
    );

    let json = TestConfig::read_record(&recorder.record_path(&id));
    assert_eq!(json.as_object().unwrap().len(), keys.len());
}

#[test]
fn test_insurance_fields_written_only_when_present() {
    let config = TestConfig::default();
    let recorder = AppointmentRecorder::new(config.appointments_dir());
    let request = AppointmentRequest {
        insurance: Some("Уніка".to_string()),
        policy_number: Some("AB-123456".to_string()),
        ..valid_request(fixed_today())
    };

    let id = recorder.record_at(&accepted(request), fixed_now()).unwrap();
    let json = TestConfig::read_record(&recorder.record_path(&id));

    assert_eq!(json["insurance"], "Уніка");
    assert_eq!(json["policy_number"], "AB-123456");
}

#[test]
fn test_same_person_same_second_overwrites() {
    let config = TestConfig::default();
    let recorder = AppointmentRecorder::new(config.appointments_dir());

    let first = recorder
        .record_at(&accepted(valid_request(fixed_today())), fixed_now())
        .unwrap();
    let second_request = AppointmentRequest {
        appointment_time: "15:00".to_string(),
        ..valid_request(fixed_today())
    };
    let second = recorder.record_at(&accepted(second_request), fixed_now()).unwrap();

    assert_eq!(first, second);
    let stored = config.stored_records();
    assert_eq!(stored.len(), 1);
    assert_eq!(TestConfig::read_record(&stored[0])["appointment_time"], "15:00");
}

#[test]
fn test_different_seconds_produce_separate_files() {
    let config = TestConfig::default();
    let recorder = AppointmentRecorder::new(config.appointments_dir());
    let later = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(14, 30, 23)
        .unwrap();

    recorder
        .record_at(&accepted(valid_request(fixed_today())), fixed_now())
        .unwrap();
    recorder
        .record_at(&accepted(valid_request(fixed_today())), later)
        .unwrap();

    assert_eq!(config.stored_records().len(), 2);
}

#[test]
fn test_unusable_storage_directory_is_reported() {
    let config = TestConfig::default();
    let blocker = config.root().join("not-a-directory");
    fs::write(&blocker, "occupied").unwrap();

    let recorder = AppointmentRecorder::new(blocker.join("appointments"));
    let result = recorder.record_at(&accepted(valid_request(fixed_today())), fixed_now());

    assert_matches!(result, Err(StorageError::CreateDirectory { ref path, .. }) if path == &blocker.join("appointments"));
    let message = result.unwrap_err().to_string();
    assert!(message.starts_with("Не вдалося створити каталог"));
}

#[test]
fn test_failed_write_leaves_no_partial_file() {
    let config = TestConfig::default();
    let recorder = AppointmentRecorder::new(config.appointments_dir());

    // A directory squatting on the record path makes the final rename fail
    let target = recorder.record_path(&record_file_name("Петренко", "Олена", fixed_now()));
    fs::create_dir_all(&target).unwrap();

    let result = recorder.record_at(&accepted(valid_request(fixed_today())), fixed_now());

    assert_matches!(result, Err(StorageError::Write { ref path, .. }) if path == &target);
    assert!(config.stored_records().iter().all(|path| path.is_dir()));
    let entries = fs::read_dir(config.appointments_dir()).unwrap().count();
    assert_eq!(entries, 1);
}
