use std::time::Duration;

use super::builder::Builder;

#[derive(Debug, Clone)]
pub struct DatabaseOpts {
    pub(super) path:              String,
    pub(super) enable_mvcc:       bool,
    pub(super) enable_encryption: bool,
    pub(super) busy_timeout:      Option<Duration>,
}

impl From<&Builder> for DatabaseOpts {
    fn from(builder: &Builder) -> Self {
        Self {
            path:              builder.path.clone(),
            enable_mvcc:       builder.enable_mvcc,
            enable_encryption: builder.enable_encryption,
            busy_timeout:      builder.busy_timeout,
        }
    }
}
