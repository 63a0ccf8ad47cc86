/// Two configuration sources asked for incompatible things.
///
/// Rendered as `'<conflicting_source>' conflicts with '<setting_name>'`, naming both sides so
/// the operator can find them in the config file.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("'{conflicting_source}' conflicts with '{setting_name}'")]
pub struct ConfigConflict {
    pub setting_name: &'static str,
    pub conflicting_source: &'static str,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("malformed response: missing or invalid :status")]
    MissingStatus,
}
