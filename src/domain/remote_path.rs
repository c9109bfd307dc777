use std::fmt;

/// Remote storage location such as `latch:///dir/file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath(String);

impl RemotePath {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append a segment, keeping exactly one `/` between parts.
    ///
    /// Unlike URL resolution, a segment never replaces the last component
    /// of the base.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.trim_start_matches('/');
        if segment.is_empty() {
            return self.clone();
        }

        let mut joined = self.0.clone();
        if !joined.ends_with('/') {
            joined.push('/');
        }
        joined.push_str(segment);
        Self(joined)
    }

    /// Log file destination for one run.
    pub fn run_log(base: &str, pipeline: &str, execution_name: &str, file_name: &str) -> Self {
        Self::new(base).join(pipeline).join(execution_name).join(file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path component after the scheme and authority (`latch:///a/b` → `/a/b`).
    pub fn path(&self) -> &str {
        match self.0.split_once("://") {
            Some((_, rest)) => match rest.find('/') {
                Some(idx) => &rest[idx..],
                None => "/",
            },
            None => &self.0,
        }
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
