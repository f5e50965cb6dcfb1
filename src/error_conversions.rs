//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the conversions live here. Service conversions are only compiled with the
//! `server` feature.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod service {
    use std::io;

    use crate::domain::types::TypeConstraintError;
    use crate::files::documents::DocumentError;
    use crate::forms::FormError;
    use crate::letter::LetterError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            match val {
                FormError::Rows(rows) => ServiceError::Import(rows),
                other => ServiceError::Form(other.to_string()),
            }
        }
    }

    impl From<LetterError> for ServiceError {
        fn from(val: LetterError) -> Self {
            match val {
                LetterError::Cancelled => ServiceError::Cancelled,
                other => ServiceError::Internal(other.to_string()),
            }
        }
    }

    impl From<io::Error> for ServiceError {
        fn from(val: io::Error) -> Self {
            match val.kind() {
                io::ErrorKind::Unsupported => ServiceError::Unavailable(val.to_string()),
                io::ErrorKind::NotFound => ServiceError::NotFound,
                _ => ServiceError::Internal(val.to_string()),
            }
        }
    }

    impl From<DocumentError> for ServiceError {
        fn from(val: DocumentError) -> Self {
            match val {
                DocumentError::InvalidName(_) => ServiceError::Form(val.to_string()),
                DocumentError::NotFound(_) => ServiceError::NotFound,
                DocumentError::Io(err) => ServiceError::from(err),
            }
        }
    }
}
