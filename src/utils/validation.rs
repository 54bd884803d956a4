use validator::Validate;

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Validate)]
    struct Probe {
        #[validate(email)]
        email: String,
    }

    #[test]
    fn invalid_payload_maps_to_validation_error() {
        let err = validate_payload(&Probe {
            email: "not-an-email".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
