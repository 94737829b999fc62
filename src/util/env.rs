//! Process configuration sourced from the environment (and a `.env` file in
//! development).
//!
//! Every value is read through the [`var!`] macro so call sites stay
//! decoupled from the backing struct; the struct itself is deserialized once
//! and cached for the process lifetime.

use std::sync::LazyLock;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::OnceCell;

static ENV_VARS: LazyLock<OnceCell<Env>> = LazyLock::new(OnceCell::new);
pub async fn get_var(var: Var) -> EnvResult<&'static str> {
    let vars = ENV_VARS.get_or_try_init(|| async { Env::new() }).await?;
    Ok(match var {
        Var::DatabaseUrl => &vars.database_url,
        Var::ServerApiPort => &vars.server_api_port,
        Var::GithubWebhookSecret => &vars.github_webhook_secret,
        Var::ContentHostBase => &vars.content_host_base,
        Var::CourseRepoName => &vars.course_repo_name,
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Env {
    pub database_url: String,
    pub server_api_port: String,
    pub github_webhook_secret: String,

    #[serde(default = "default_content_host")]
    pub content_host_base: String,

    #[serde(default = "default_course_repo")]
    pub course_repo_name: String,
}

impl Env {
    pub fn new() -> EnvResult<Self> {
        from_env::<Env>()
    }
}

#[derive(Debug)]
pub enum Var {
    DatabaseUrl,
    ServerApiPort,
    GithubWebhookSecret,
    ContentHostBase,
    CourseRepoName,
}

#[macro_export]
macro_rules! var {
    ($ev:expr) => {
        $crate::util::env::get_var($ev)
    };
}

fn default_content_host() -> String {
    String::from("https://raw.githubusercontent.com")
}

fn default_course_repo() -> String {
    String::from("ai-academy-2026")
}

/// Deserializes a struct from `dotenvy::vars()`. All fields are strings (or
/// defaulted), so routing the var map through a `serde_json` object is
/// sufficient and avoids hand-rolling a deserializer.
pub fn from_env<T>() -> EnvResult<T>
where
    T: serde::de::DeserializeOwned,
{
    from_iter(dotenvy::vars())
}

pub fn from_iter<Iter, T>(iter: Iter) -> EnvResult<T>
where
    T: serde::de::DeserializeOwned,
    Iter: IntoIterator<Item = (String, String)>,
{
    let map: serde_json::Map<String, Value> = iter
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    Ok(serde_json::from_value(Value::Object(map))?)
}

pub type EnvResult<T> = core::result::Result<T, EnvErr>;

#[derive(Debug, Error)]
pub enum EnvErr {
    #[error("env deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    fn base_vars() -> Vec<(String, String)> {
        [
            ("DATABASE_URL", "postgres://localhost/academy"),
            ("SERVER_API_PORT", "8181"),
            ("GITHUB_WEBHOOK_SECRET", "hunter2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_from_iter_with_defaults() {
        let env: Env = from_iter(base_vars()).unwrap();

        assert_eq!(env.server_api_port, "8181");
        assert_eq!(env.content_host_base, "https://raw.githubusercontent.com");
        assert_eq!(env.course_repo_name, "ai-academy-2026");
    }

    #[test]
    fn test_from_iter_missing_required() {
        let mut vars = base_vars();
        vars.retain(|(k, _)| k != "GITHUB_WEBHOOK_SECRET");

        assert!(from_iter::<_, Env>(vars).is_err());
    }

    #[test]
    fn test_from_iter_override_default() {
        let mut vars = base_vars();
        vars.push((
            "CONTENT_HOST_BASE".to_string(),
            "http://localhost:9999".to_string(),
        ));

        let env: Env = from_iter(vars).unwrap();
        assert_eq!(env.content_host_base, "http://localhost:9999");
    }
}
