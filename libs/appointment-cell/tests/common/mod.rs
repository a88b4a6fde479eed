// Shared fixtures for appointment-cell integration tests
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};

use appointment_cell::{AppointmentRequest, AppointmentValidator};
use doctor_cell::DepartmentCatalog;

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

pub fn fixed_now() -> NaiveDateTime {
    fixed_today().and_hms_opt(14, 30, 22).unwrap()
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The reference booking: cardiology, tomorrow at 10:30, consent given.
pub fn valid_request(today: NaiveDate) -> AppointmentRequest {
    AppointmentRequest {
        last_name: "Петренко".to_string(),
        first_name: "Олена".to_string(),
        middle_name: "Іванівна".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 20),
        phone: "+380501234567".to_string(),
        email: String::new(),
        department: "Кардіологія".to_string(),
        doctor: "Сердечна В.П.".to_string(),
        appointment_date: today.succ_opt(),
        appointment_time: "10:30".to_string(),
        urgent: false,
        first_visit: true,
        reason: "Головний біль".to_string(),
        insurance: None,
        policy_number: None,
        consent: true,
    }
}

pub fn default_validator() -> AppointmentValidator {
    AppointmentValidator::new(Arc::new(DepartmentCatalog::default()))
}
