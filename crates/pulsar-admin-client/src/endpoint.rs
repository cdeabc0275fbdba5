//! Admin API endpoint paths.
//!
//! An [`Endpoint`] is a list of unescaped path segments plus query
//! parameters. Segments are percent-escaped only when the endpoint is joined
//! onto the web service URL, so a subscription named `a/b` stays one segment.

use crate::config::ApiVersion;
use crate::error::{Error, Result};
use pulsar_admin_types::TopicName;
use reqwest::Url;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    /// `/admin/<version>/<component>`; `component` may contain `/`.
    pub fn new(version: ApiVersion, component: &str) -> Self {
        let mut segments = vec!["admin".to_string()];
        if !version.as_str().is_empty() {
            segments.push(version.as_str().to_string());
        }
        segments.extend(
            component
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        Self {
            segments,
            query: Vec::new(),
        }
    }

    /// Endpoint rooted at a topic: `/admin/<version>/<domain>/<tenant>/<ns>/<topic>`.
    pub fn topic(version: ApiVersion, topic: &TopicName) -> Self {
        Self::new(version, "").segments(topic.rest_path_segments())
    }

    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.segments
            .extend(segments.into_iter().map(|s| s.to_string()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Join this endpoint onto `base`, escaping each segment.
    pub fn to_url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::InvalidConfig(format!("web service URL cannot be a base: {base}"))
            })?;
            path.pop_if_empty();
            path.extend(&self.segments);
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}
