//! Library integration tests.

use ensure_params::requirements::{EnsureError, MissingPath};
use ensure_params::ParamsError;

#[test]
fn error_types_are_public() {
    let err = ParamsError::UnknownRequirementSet {
        name: "create_pet".into(),
    };
    assert!(err.to_string().contains("create_pet"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> ensure_params::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn ensure_errors_convert_into_params_errors() {
    let err: ParamsError = EnsureError::from(MissingPath::from_keys(["pet", "name"])).into();
    assert_eq!(err.to_string(), "Required parameter missing: pet => name");
}
