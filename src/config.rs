use crate::util;

pub const DEFAULT_SOURCE_URL: &str = "http://aws.amazon.com/ec2/instance-types/";
pub const DEFAULT_ANCHOR_ID: &str = "instance-type-matrix";

pub struct Config {
    /// Page holding the instance type matrix.
    pub source_url: String,
    /// Value of the `id` attribute marking the matrix heading.
    pub anchor_id: String,
    /// Bot name / user agent
    pub bot_name: String,
    /// Overall deadline (in secs) for a single request made by the default
    /// transport.
    pub timeout_secs: u64,
    /// How many times the default transport retries a failed request or a
    /// 5xx response. A value of 0 disables retrying.
    pub max_retries: u32,
    /// Base delay (in millis) before the first retry. It doubles on every
    /// subsequent attempt.
    pub retry_delay_ms: u64,
}

impl Config {
    pub fn sanity_check(&self) {
        if self.anchor_id.trim().is_empty() {
            panic!("config.anchor_id cannot be empty");
        }
        if !util::is_http_url(&self.source_url) {
            panic!("config.source_url must be an http(s) url");
        }
        if self.timeout_secs == 0 {
            panic!("config.timeout_secs cannot be zero");
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_owned(),
            anchor_id: DEFAULT_ANCHOR_ID.to_owned(),
            bot_name: "ec2-catalog-bot".to_owned(),
            timeout_secs: 30,
            max_retries: 3,
            retry_delay_ms: 500,
        }
    }
}
