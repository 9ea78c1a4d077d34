//! Estate configuration.

/// Configuration for opening an [`Estate`](crate::Estate).
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to fsync the journal on every commit (safer but slower).
    pub sync_on_commit: bool,

    /// Page size used when a filter does not specify one.
    pub default_page_size: u32,

    /// Upper bound the listing API applies to caller-supplied page sizes.
    pub max_page_size: u32,

    /// Whether 500 responses carry the internal error text in `errors`.
    pub expose_error_details: bool,

    /// File name of the journal inside the estate directory.
    pub journal_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_on_commit: true,
            default_page_size: 10,
            max_page_size: 100,
            expose_error_details: false,
            journal_file_name: "listings.journal".to_string(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to fsync the journal on every commit.
    #[must_use]
    pub const fn sync_on_commit(mut self, value: bool) -> Self {
        self.sync_on_commit = value;
        self
    }

    /// Sets the default page size.
    #[must_use]
    pub const fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the largest page size the listing API will serve.
    #[must_use]
    pub const fn max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = size;
        self
    }

    /// Sets whether internal error text is exposed in responses.
    #[must_use]
    pub const fn expose_error_details(mut self, value: bool) -> Self {
        self.expose_error_details = value;
        self
    }

    /// Sets the journal file name.
    #[must_use]
    pub fn journal_file_name(mut self, name: impl Into<String>) -> Self {
        self.journal_file_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.sync_on_commit);
        assert_eq!(config.default_page_size, 10);
        assert!(!config.expose_error_details);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .sync_on_commit(false)
            .default_page_size(25)
            .max_page_size(50)
            .journal_file_name("test.journal");

        assert!(!config.sync_on_commit);
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_page_size, 50);
        assert_eq!(config.journal_file_name, "test.journal");
    }
}
