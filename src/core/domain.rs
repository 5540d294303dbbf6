use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::GatewayPublisherVia;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
    fn version(&self) -> i64;
}


// Configuration abstracts config options for the circulation engine
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub book_loan_days: i64,
    pub claim_window_hours: i64,
    pub lock_timeout_ms: u64,
    pub notification_buffer: usize,
    pub notification_max_attempts: u32,
    pub notification_retry_ms: u64,
    pub gateway: GatewayPublisherVia,
    #[serde(default)]
    pub sns_topic_arn: Option<String>,
    pub log_level: String,
    pub log_json: bool,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            book_loan_days: 15,
            claim_window_hours: 24,
            lock_timeout_ms: 5000,
            notification_buffer: 1024,
            notification_max_attempts: 3,
            notification_retry_ms: 100,
            gateway: GatewayPublisherVia::Logs,
            sns_topic_arn: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    /// Loads configuration from `LMS_*` environment variables (and `.env`), falling back to
    /// the defaults of [`Configuration::new`] for the `main` branch.
    pub fn load() -> LibraryResult<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(Environment::with_prefix("LMS").try_parsing(true))
    }

    pub(crate) fn load_from(env: Environment) -> LibraryResult<Self> {
        let defaults = Configuration::new("main");
        let config = Config::builder()
            .set_default("branch_id", defaults.branch_id)?
            .set_default("book_loan_days", defaults.book_loan_days)?
            .set_default("claim_window_hours", defaults.claim_window_hours)?
            .set_default("lock_timeout_ms", defaults.lock_timeout_ms as i64)?
            .set_default("notification_buffer", defaults.notification_buffer as i64)?
            .set_default("notification_max_attempts", defaults.notification_max_attempts as i64)?
            .set_default("notification_retry_ms", defaults.notification_retry_ms as i64)?
            .set_default("gateway", defaults.gateway.to_string())?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .add_source(env)
            .build()?;
        let config: Configuration = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot turn into due dates, claim windows or retry delays.
    pub fn validate(&self) -> LibraryResult<()> {
        if self.branch_id.trim().is_empty() {
            return Err(invalid("branch_id", "must not be blank"));
        }
        check_range("book_loan_days", self.book_loan_days, 1, MAX_LOAN_DAYS)?;
        check_range("claim_window_hours", self.claim_window_hours, 1, MAX_CLAIM_WINDOW_HOURS)?;
        check_range("lock_timeout_ms", self.lock_timeout_ms as i64, 1, MAX_DELAY_MS)?;
        check_range("notification_buffer", self.notification_buffer as i64, 1, MAX_NOTIFICATION_BUFFER)?;
        check_range("notification_max_attempts", self.notification_max_attempts as i64, 1, MAX_NOTIFICATION_ATTEMPTS)?;
        check_range("notification_retry_ms", self.notification_retry_ms as i64, 0, MAX_DELAY_MS)?;
        Ok(())
    }
}

const MAX_LOAN_DAYS: i64 = 3650;
const MAX_CLAIM_WINDOW_HOURS: i64 = 24 * 365;
const MAX_DELAY_MS: i64 = 600_000;
const MAX_NOTIFICATION_BUFFER: i64 = 1_000_000;
const MAX_NOTIFICATION_ATTEMPTS: i64 = 20;

fn check_range(name: &str, value: i64, min: i64, max: i64) -> LibraryResult<()> {
    if value < min || value > max {
        return Err(invalid(name, format!("{} is outside {}..={}", value, min, max).as_str()));
    }
    Ok(())
}

fn invalid(name: &str, reason: &str) -> LibraryError {
    LibraryError::validation(format!("invalid configuration {}: {}", name, reason).as_str(),
                             Some("config".to_string()))
}
