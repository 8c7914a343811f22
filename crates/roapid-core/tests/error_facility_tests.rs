use roapid_core::errors::{ExError, ExErrorKind, RoapidError};
use roapid_core::ResourceKey;

#[test]
fn test_invalid_key_maps_to_invalid_input() {
    let err = ResourceKey::new("../escape.json").unwrap_err();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert_eq!(ex_err.resource_key(), Some("../escape.json"));
}

#[test]
fn test_format_error_structured_fields() {
    let err = RoapidError::Format {
        message: "expected object, found array".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Format);
    assert_eq!(ex_err.code(), "ERR_FORMAT");
    assert!(ex_err.message().contains("not a JSON object"));
}

#[test]
fn test_io_error_carries_path() {
    let err = RoapidError::Io {
        path: "data/users-7.json".to_string(),
        message: "permission denied".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert_eq!(ex_err.path(), Some("data/users-7.json"));
    assert!(ex_err.to_string().contains("data/users-7.json"));
}

#[test]
fn test_serde_json_error_becomes_serialization() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: RoapidError = json_err.into();
    assert!(matches!(err, RoapidError::Serialization { .. }));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Format, "ERR_FORMAT"),
        (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        (ExErrorKind::ExternalService, "ERR_EXTERNAL_SERVICE"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}
