//! Integration tests for the storage collaborators

use chrono::{TimeZone, Utc};
use tr_core::{CredentialStore, VehicleStatus, VehicleStore};
use tr_store::credentials::SignupError;
use tr_store::{
    login, register_user, register_vehicle, seed, JsonCredentialStore, JsonVehicleStore, KvStore,
    LoginError, RegistrationError, SignupForm, VehicleDraft,
};
use uuid::Uuid;

fn temp_kv(tag: &str) -> KvStore {
    KvStore::open(std::env::temp_dir().join(format!("traceride-it-{}-{}.json", tag, Uuid::new_v4())))
}

fn draft(plate: &str) -> VehicleDraft {
    VehicleDraft {
        name: "Fiat Argo".to_string(),
        plate: plate.to_string(),
        brand: "Fiat".to_string(),
        model: "Argo".to_string(),
        color: "Silver".to_string(),
        year: "2021".to_string(),
        chip_code: "CHIP-42".to_string(),
        status: VehicleStatus::Moving,
        latitude: -23.5615,
        longitude: -46.6562,
    }
}

#[test]
fn test_register_moving_vehicle_gets_single_seed_fix() {
    let store = JsonVehicleStore::new(temp_kv("register-moving"));
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let vehicle = register_vehicle(&store, &draft("ABC-1234"), now).unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Moving);
    assert_eq!(vehicle.locations.len(), 1);
    assert_eq!(vehicle.locations[0].latitude, -23.5615);
    assert_eq!(vehicle.locations[0].timestamp, now);

    let loaded = store.get_all();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].plate, "ABC-1234");
}

#[test]
fn test_register_parked_vehicle_gets_short_path() {
    let store = JsonVehicleStore::new(temp_kv("register-parked"));
    let now = Utc::now();

    let mut d = draft("PRK-0001");
    d.status = VehicleStatus::Parked;
    let vehicle = register_vehicle(&store, &d, now).unwrap();

    assert_eq!(vehicle.status, VehicleStatus::Parked);
    assert!(vehicle.locations.len() > 1, "parked vehicles get a pre-generated path");
    // The path ends at the registered position, stamped now
    let last = vehicle.locations.last().unwrap();
    assert_eq!(last.latitude, -23.5615);
    assert_eq!(last.timestamp, now);
    // Timestamps are ordered by capture time
    for pair in vehicle.locations.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
    // The walk stays near the seed
    for loc in &vehicle.locations {
        assert!((loc.latitude - d.latitude).abs() <= 0.005 + 1e-9);
        assert!((loc.longitude - d.longitude).abs() <= 0.005 + 1e-9);
    }
}

#[test]
fn test_duplicate_plate_rejected_and_count_unchanged() {
    let store = JsonVehicleStore::new(temp_kv("dup-plate"));
    let now = Utc::now();

    register_vehicle(&store, &draft("ABC-1234"), now).unwrap();
    assert_eq!(store.get_all().len(), 1);

    let err = register_vehicle(&store, &draft("ABC-1234"), now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<RegistrationError>(),
        Some(&RegistrationError::DuplicatePlate("ABC-1234".to_string()))
    );
    assert_eq!(store.get_all().len(), 1, "rejected registration must not write");

    // Plate matching is case-sensitive: a different casing is a new plate
    register_vehicle(&store, &draft("abc-1234"), now).unwrap();
    assert_eq!(store.get_all().len(), 2);
}

#[test]
fn test_registration_field_validation() {
    let store = JsonVehicleStore::new(temp_kv("validation"));
    let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();

    let mut empty_color = draft("VAL-0001");
    empty_color.color = "  ".to_string();
    let err = register_vehicle(&store, &empty_color, now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<RegistrationError>(),
        Some(&RegistrationError::MissingField("color"))
    );

    let mut bad_year = draft("VAL-0002");
    bad_year.year = "20x1".to_string();
    let err = register_vehicle(&store, &bad_year, now).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RegistrationError>(),
        Some(RegistrationError::InvalidYear(_))
    ));

    let mut future_year = draft("VAL-0003");
    future_year.year = "2030".to_string();
    let err = register_vehicle(&store, &future_year, now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<RegistrationError>(),
        Some(&RegistrationError::YearOutOfRange(2030))
    );

    let mut ancient = draft("VAL-0004");
    ancient.year = "1899".to_string();
    let err = register_vehicle(&store, &ancient, now).unwrap_err();
    assert_eq!(
        err.downcast_ref::<RegistrationError>(),
        Some(&RegistrationError::YearOutOfRange(1899))
    );

    assert!(store.get_all().is_empty(), "no rejected draft may be persisted");
}

#[test]
fn test_signup_then_login_matrix() {
    let store = JsonCredentialStore::new(temp_kv("login"));
    let form = SignupForm {
        email: "ana@example.com".to_string(),
        national_id: "123.456.789-00".to_string(),
        password: "hunter2".to_string(),
        confirm_password: "hunter2".to_string(),
    };
    register_user(&store, &form).unwrap();

    // Either identifier works with the right password
    assert!(login(&store, "ana@example.com", "hunter2").is_ok());
    assert!(login(&store, "123.456.789-00", "hunter2").is_ok());

    // Wrong password, wrong identifier, near-miss password
    assert_eq!(
        login(&store, "ana@example.com", "hunter3"),
        Err(LoginError::InvalidCredentials)
    );
    assert_eq!(
        login(&store, "bob@example.com", "hunter2"),
        Err(LoginError::InvalidCredentials)
    );
    assert_eq!(
        login(&store, "ana@example.com", "Hunter2"),
        Err(LoginError::InvalidCredentials),
        "password comparison is exact"
    );
}

#[test]
fn test_login_without_account() {
    let store = JsonCredentialStore::new(temp_kv("no-account"));
    assert_eq!(
        login(&store, "ana@example.com", "hunter2"),
        Err(LoginError::NoAccount)
    );
}

#[test]
fn test_signup_validation() {
    let store = JsonCredentialStore::new(temp_kv("signup"));

    let mut no_email = SignupForm {
        email: String::new(),
        national_id: "123".to_string(),
        password: "pw".to_string(),
        confirm_password: "pw".to_string(),
    };
    let err = register_user(&store, &no_email).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SignupError>(),
        Some(&SignupError::MissingField("email"))
    );

    no_email.email = "ana@example.com".to_string();
    no_email.confirm_password = "different".to_string();
    let err = register_user(&store, &no_email).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SignupError>(),
        Some(&SignupError::PasswordMismatch)
    );

    assert!(store.load().is_none(), "rejected signup must not write");
}

#[test]
fn test_demo_seed_installs_once() {
    let store = JsonVehicleStore::new(temp_kv("seed"));

    seed::install_demo_data(&store).unwrap();
    let first = store.get_all();
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|v| v.demo));
    assert!(first.iter().all(|v| !v.locations.is_empty()));

    let moving = first.iter().find(|v| v.status == VehicleStatus::Moving).unwrap();
    assert_eq!(moving.plate, "ABC-1234");
    assert_eq!(moving.locations.len(), 8);

    // Second install is a no-op
    seed::install_demo_data(&store).unwrap();
    let second = store.get_all();
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].id, first[0].id);
}
