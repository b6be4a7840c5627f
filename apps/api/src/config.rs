use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_PROGRAM_NAME: &str = "Master of Innovation Design";
const DEFAULT_PROGRAM_INSTITUTION: &str = "Wichita State University";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub program: ProgramProfile,
    /// Document-store credentials. Loaded and reported at startup, never used.
    pub storage: Option<StorageCredentials>,
}

/// The academic program the chat assistant talks about.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramProfile {
    pub name: String,
    pub institution: String,
}

impl Default for ProgramProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROGRAM_NAME.to_string(),
            institution: DEFAULT_PROGRAM_INSTITUTION.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct StorageCredentials {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    pub bucket: String,
}

// Keeps the private key out of logs.
impl std::fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let program = ProgramProfile {
            name: lookup("PROGRAM_NAME").unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string()),
            institution: lookup("PROGRAM_INSTITUTION")
                .unwrap_or_else(|| DEFAULT_PROGRAM_INSTITUTION.to_string()),
        };

        Ok(Config {
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            llm_timeout_secs: lookup("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            program,
            storage: storage_credentials(&lookup),
        })
    }
}

/// All four storage variables must be present for the credential set to count as configured.
fn storage_credentials<F>(lookup: &F) -> Option<StorageCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
    Some(StorageCredentials {
        project_id: non_empty("FIREBASE_PROJECT_ID")?,
        client_email: non_empty("FIREBASE_CLIENT_EMAIL")?,
        // Keys pasted into env files carry escaped newlines
        private_key: non_empty("FIREBASE_PRIVATE_KEY")?.replace("\\n", "\n"),
        bucket: non_empty("FIREBASE_STORAGE_BUCKET")?,
    })
}
