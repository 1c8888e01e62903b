//! Configuration validation logic.

use crate::errors::Error;

/// Longest collection name accepted; leaves room for the derived index name
/// inside Postgres' 63-byte identifier limit.
pub const MAX_COLLECTION_NAME_LEN: usize = 48;

/// Validates resolved configuration values.
pub struct ConfigValidator<'a> {
    /// Postgres connection URI.
    pub connection_string: &'a str,
    /// Collection (table) name.
    pub collection_name: &'a str,
    /// Embedding vector length.
    pub embedding_dims: usize,
    /// User the round trip runs as.
    pub user_id: &'a str,
    pub embedding_model: &'a str,
    pub llm_model: &'a str,
    pub temperature: f32,
}

impl ConfigValidator<'_> {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Connection string uses the `postgresql://` scheme
    /// - Embedding dimension is positive
    /// - Collection name is a plain SQL identifier
    /// - User id and model names are not empty
    /// - Temperature is finite and within 0.0..=2.0
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_connection_string()?;
        self.validate_embedding_dims()?;
        self.validate_collection_name()?;
        self.validate_non_empty("User id", self.user_id)?;
        self.validate_non_empty("Embedding model", self.embedding_model)?;
        self.validate_non_empty("LLM model", self.llm_model)?;
        self.validate_temperature()?;

        Ok(())
    }

    fn validate_connection_string(&self) -> Result<(), Error> {
        if !self.connection_string.starts_with("postgresql://") {
            return Err(Error::Config(
                "SUPABASE_DB_URL is not set or is not a valid postgresql:// URL. \
                 Please set it in your environment or .env file."
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn validate_embedding_dims(&self) -> Result<(), Error> {
        if self.embedding_dims == 0 {
            return Err(Error::Config(
                "MEM0_EMBEDDING_DIMS must be a positive integer.".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_collection_name(&self) -> Result<(), Error> {
        let name = self.collection_name;
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid_start || !valid_rest {
            return Err(Error::Config(format!(
                "Invalid collection name {name:?}: use letters, digits and underscores, \
                 starting with a letter or underscore"
            )));
        }
        if name.len() > MAX_COLLECTION_NAME_LEN {
            return Err(Error::Config(format!(
                "Invalid collection name {name:?}: longer than {MAX_COLLECTION_NAME_LEN} characters"
            )));
        }
        Ok(())
    }

    fn validate_non_empty(&self, label: &str, value: &str) -> Result<(), Error> {
        if value.trim().is_empty() {
            return Err(Error::Config(format!("{label} cannot be empty")));
        }
        Ok(())
    }

    fn validate_temperature(&self) -> Result<(), Error> {
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "Invalid LLM temperature: {} (must be between 0.0 and 2.0)",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ConfigValidator<'static> {
        ConfigValidator {
            connection_string: "postgresql://u:p@localhost:5432/postgres",
            collection_name: "mem0_memories",
            embedding_dims: 1536,
            user_id: "test-user",
            embedding_model: "text-embedding-3-small",
            llm_model: "gpt-4o-mini",
            temperature: 0.1,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_zero_dims_rejected() {
        let validator = ConfigValidator {
            embedding_dims: 0,
            ..valid()
        };
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_collection_name_rules() {
        for bad in ["", "1abc", "has-dash", "quote\"d", "spa ce"] {
            let validator = ConfigValidator {
                collection_name: bad,
                ..valid()
            };
            assert!(
                matches!(validator.validate(), Err(Error::Config(_))),
                "expected {bad:?} to be rejected"
            );
        }

        let long = "a".repeat(MAX_COLLECTION_NAME_LEN + 1);
        let validator = ConfigValidator {
            collection_name: &long,
            ..valid()
        };
        assert!(matches!(validator.validate(), Err(Error::Config(_))));

        let validator = ConfigValidator {
            collection_name: "_Memories_2",
            ..valid()
        };
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_blank_user_id_rejected() {
        let validator = ConfigValidator {
            user_id: "  ",
            ..valid()
        };
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_temperature_bounds() {
        let mut validator = valid();
        validator.temperature = f32::NAN;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));

        validator.temperature = 2.5;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));

        validator.temperature = 0.0;
        assert!(validator.validate().is_ok());
    }
}
